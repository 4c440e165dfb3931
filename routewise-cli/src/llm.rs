use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use routewise_core::{DisabledGenerator, TextGenerator};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::config::{normalize_model, LlmSection};

const SYSTEM_PROMPT: &str =
    "You are a helpful route planning assistant. Answer with the requested JSON only.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
    Offline,
}

impl Provider {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "anthropic" => Ok(Provider::Anthropic),
            "offline" | "none" => Ok(Provider::Offline),
            other => bail!("unknown llm provider: {other} (expected openai, anthropic or offline)"),
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Anthropic => "https://api.anthropic.com",
            Provider::OpenAI | Provider::Offline => "https://api.openai.com",
        }
    }
}

/// A chat-completion backed generator. One HTTP attempt per prompt.
pub struct LlmGenerator {
    provider: Provider,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
    api_key: Option<String>,
    client: reqwest::Client,
}

/// Build the generator named by the config, or a disabled one when offline.
pub fn build_generator(llm: &LlmSection, offline: bool) -> Result<Arc<dyn TextGenerator>> {
    let provider = if offline {
        Provider::Offline
    } else {
        Provider::parse(&llm.provider)?
    };

    if provider == Provider::Offline {
        tracing::info!("text generation disabled; advisories will be synthesized");
        return Ok(Arc::new(DisabledGenerator));
    }

    let a = auth::load_auth()?;
    let api_key = match provider {
        Provider::OpenAI => auth::openai_api_key(&a),
        Provider::Anthropic => auth::anthropic_api_key(&a),
        Provider::Offline => None,
    };
    if api_key.is_none() {
        tracing::warn!(?provider, "no API key configured; every request will use the fallback advisory");
    }

    let client = reqwest::Client::builder()
        .timeout(llm.timeout())
        .build()
        .context("build http client")?;

    Ok(Arc::new(LlmGenerator {
        provider,
        model: normalize_model(&llm.model),
        base_url: llm
            .base_url
            .clone()
            .unwrap_or_else(|| provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string(),
        temperature: llm.temperature,
        max_tokens: llm.max_tokens,
        api_key,
        client,
    }))
}

#[async_trait]
impl TextGenerator for LlmGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        match self.provider {
            Provider::Anthropic => self.anthropic_complete(prompt).await,
            Provider::OpenAI => self.openai_complete(prompt).await,
            Provider::Offline => bail!("text generation is disabled"),
        }
    }
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct AnthropicReq<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Msg<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResp {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    t: String,
    text: Option<String>,
}

#[derive(Serialize)]
struct OpenAiReq<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAiResp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: Option<String>,
}

impl AnthropicResp {
    fn text(self) -> String {
        let mut s = String::new();
        for b in self.content {
            if b.t == "text" {
                if let Some(t) = b.text {
                    s.push_str(&t);
                }
            }
        }
        s.trim().to_string()
    }
}

impl OpenAiResp {
    fn text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

impl LlmGenerator {
    async fn anthropic_complete(&self, prompt: &str) -> Result<String> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            anyhow!("missing anthropic_api_key; run: routewise auth paste-anthropic-api-key")
        })?;

        let body = AnthropicReq {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: SYSTEM_PROMPT,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
        };

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(key)?);
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .headers(headers)
            .json(&body)
            .send()
            .await
            .context("anthropic request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("anthropic error: {status} {txt}");
        }

        let out: AnthropicResp = resp.json().await.context("parse anthropic response")?;
        Ok(out.text())
    }

    async fn openai_complete(&self, prompt: &str) -> Result<String> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            anyhow!("missing openai_api_key; run: routewise auth paste-openai-api-key")
        })?;

        let body = OpenAiReq {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Msg {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header(AUTHORIZATION, format!("Bearer {key}"))
            .json(&body)
            .send()
            .await
            .context("openai request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("openai error: {status} {txt}");
        }

        let out: OpenAiResp = resp.json().await.context("parse openai response")?;
        Ok(out.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!(Provider::parse("OpenAI").unwrap(), Provider::OpenAI);
        assert_eq!(Provider::parse("anthropic").unwrap(), Provider::Anthropic);
        assert_eq!(Provider::parse("offline").unwrap(), Provider::Offline);
        assert!(Provider::parse("gemini").is_err());
    }

    #[test]
    fn test_anthropic_text_joins_text_blocks() {
        let out: AnthropicResp = serde_json::from_str(
            r#"{"content":[{"type":"text","text":" Route A "},{"type":"tool_use"},{"type":"text","text":"then B\n"}]}"#,
        )
        .unwrap();
        assert_eq!(out.text(), "Route A then B");
    }

    #[test]
    fn test_openai_text_takes_first_choice() {
        let out: OpenAiResp = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  {\"description\":\"x\"} "}}]}"#,
        )
        .unwrap();
        assert_eq!(out.text(), r#"{"description":"x"}"#);

        let empty: OpenAiResp = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.text(), "");
    }

    #[tokio::test]
    async fn test_missing_key_fails_generation() {
        let generator = LlmGenerator {
            provider: Provider::OpenAI,
            model: "gpt-4o-mini".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            temperature: 0.4,
            max_tokens: 10,
            api_key: None,
            client: reqwest::Client::new(),
        };
        let err = generator.generate("hi").await.unwrap_err();
        assert!(err.to_string().contains("missing openai_api_key"));
    }
}
