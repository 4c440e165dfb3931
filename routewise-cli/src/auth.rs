use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::state::ensure_routewise_home;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthState {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

fn auth_path() -> Result<PathBuf> {
    Ok(ensure_routewise_home()?.join("auth.json"))
}

/// Stored keys, or an empty state when `auth.json` does not exist yet.
pub fn load_auth() -> Result<AuthState> {
    let path = auth_path()?;
    match fs::read_to_string(&path) {
        Ok(raw) => serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(AuthState::default()),
        Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
    }
}

pub fn save_auth(auth: &AuthState) -> Result<()> {
    let path = auth_path()?;
    let raw = serde_json::to_string_pretty(auth).context("serialize auth state")?;
    fs::write(&path, raw).with_context(|| format!("write {}", path.display()))
}

/// Environment wins over the stored key; blank values count as missing.
fn pick_key(env: Option<String>, stored: Option<String>) -> Option<String> {
    env.into_iter()
        .chain(stored)
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}

pub fn openai_api_key(auth: &AuthState) -> Option<String> {
    pick_key(std::env::var("OPENAI_API_KEY").ok(), auth.openai_api_key.clone())
}

pub fn anthropic_api_key(auth: &AuthState) -> Option<String> {
    pick_key(
        std::env::var("ANTHROPIC_API_KEY").ok(),
        auth.anthropic_api_key.clone(),
    )
}

/// A provider whose key can be pasted into `auth.json`.
struct KeySlot {
    provider: &'static str,
    prefix: &'static str,
    field: fn(&mut AuthState) -> &mut Option<String>,
}

fn openai_field(auth: &mut AuthState) -> &mut Option<String> {
    &mut auth.openai_api_key
}

fn anthropic_field(auth: &mut AuthState) -> &mut Option<String> {
    &mut auth.anthropic_api_key
}

const OPENAI_SLOT: KeySlot = KeySlot {
    provider: "OpenAI",
    prefix: "sk-",
    field: openai_field,
};

const ANTHROPIC_SLOT: KeySlot = KeySlot {
    provider: "Anthropic",
    prefix: "sk-ant-",
    field: anthropic_field,
};

impl KeySlot {
    /// Validate `raw` and write it into `auth`.
    fn store(&self, auth: &mut AuthState, raw: &str) -> Result<()> {
        let key = raw.trim();
        if !key.starts_with(self.prefix) {
            bail!(
                "key didn't look like an {} API key (expected prefix {})",
                self.provider,
                self.prefix
            );
        }
        *(self.field)(auth) = Some(key.to_string());
        Ok(())
    }

    fn paste(&self) -> Result<()> {
        print!("Paste {} API key (starts with {}): ", self.provider, self.prefix);
        io::stdout().flush().ok();
        let mut line = String::new();
        io::stdin().read_line(&mut line).context("read key from stdin")?;

        let mut auth = load_auth()?;
        self.store(&mut auth, &line)?;
        save_auth(&auth)?;
        println!("Saved {} API key to {}", self.provider, auth_path()?.display());
        Ok(())
    }
}

pub fn openai_paste_api_key() -> Result<()> {
    OPENAI_SLOT.paste()
}

pub fn anthropic_paste_api_key() -> Result<()> {
    ANTHROPIC_SLOT.paste()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_key_prefers_env() {
        assert_eq!(
            pick_key(Some("sk-env".into()), Some("sk-file".into())).as_deref(),
            Some("sk-env")
        );
        assert_eq!(pick_key(None, Some("sk-file".into())).as_deref(), Some("sk-file"));
        assert_eq!(pick_key(Some("  ".into()), Some("sk-file".into())).as_deref(), Some("sk-file"));
        assert_eq!(pick_key(None, None), None);
    }

    #[test]
    fn test_key_slot_checks_prefix_and_fills_its_field() {
        let mut auth = AuthState::default();
        ANTHROPIC_SLOT.store(&mut auth, "  sk-ant-abc\n").unwrap();
        assert_eq!(auth.anthropic_api_key.as_deref(), Some("sk-ant-abc"));
        assert_eq!(auth.openai_api_key, None);

        let err = ANTHROPIC_SLOT.store(&mut auth, "sk-plain").unwrap_err();
        assert!(err.to_string().contains("sk-ant-"));
        assert_eq!(auth.anthropic_api_key.as_deref(), Some("sk-ant-abc"));

        OPENAI_SLOT.store(&mut auth, "sk-proj-1").unwrap();
        assert_eq!(auth.openai_api_key.as_deref(), Some("sk-proj-1"));
    }

    #[test]
    fn test_auth_state_tolerates_missing_fields() {
        let a: AuthState = serde_json::from_str(r#"{"openai_api_key":"sk-x"}"#).unwrap();
        assert_eq!(a.openai_api_key.as_deref(), Some("sk-x"));
        assert_eq!(a.anthropic_api_key, None);
    }
}
