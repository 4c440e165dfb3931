use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use routewise_core::{AdvisoryAssembler, RouteRequest};
use std::net::SocketAddr;

mod auth;
mod config;
mod llm;
mod logging;
mod server;
mod state;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ROUTEWISE_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "routewise",
    version,
    long_version = LONG_VERSION,
    about = "Route advisories from free-text generation, normalized to a fixed schema"
)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute one advisory and print it as JSON
    Advise {
        #[arg(long)]
        pickup: String,

        #[arg(long)]
        destination: String,

        /// Travel purpose: Emergency, Quick, Fuel, Drive (anything else uses defaults)
        #[arg(long, default_value = "")]
        reason: String,

        /// Skip the text generator and synthesize the advisory locally
        #[arg(long)]
        offline: bool,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Run the HTTP API (POST /api/route)
    Serve {
        /// Listen address (default: server.addr from config)
        #[arg(long)]
        addr: Option<String>,

        /// Skip the text generator and synthesize every advisory locally
        #[arg(long)]
        offline: bool,
    },

    /// Manage ~/.routewise/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Store provider API keys in ~/.routewise/auth.json
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,

    /// Print the effective config
    Show,
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    PasteOpenaiApiKey,
    PasteAnthropicApiKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_json)?;

    match cli.command {
        Command::Advise {
            pickup,
            destination,
            reason,
            offline,
            compact,
        } => {
            let assembler = build_assembler(offline)?;
            let request = RouteRequest::new(pickup, destination, reason);
            let advisory = assembler.advise(&request).await;

            let out = if compact {
                serde_json::to_string(&advisory)?
            } else {
                serde_json::to_string_pretty(&advisory)?
            };
            println!("{out}");
        }

        Command::Serve { addr, offline } => {
            let cfg = config::load_config()?;
            let addr = addr.unwrap_or(cfg.server.addr);
            let addr: SocketAddr = addr
                .parse()
                .with_context(|| format!("invalid listen address: {addr}"))?;

            let assembler = build_assembler(offline)?;
            server::run_server(assembler, addr).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },

        Command::Auth { command } => match command {
            AuthCommand::PasteOpenaiApiKey => auth::openai_paste_api_key()?,
            AuthCommand::PasteAnthropicApiKey => auth::anthropic_paste_api_key()?,
        },
    }

    Ok(())
}

fn build_assembler(offline: bool) -> Result<AdvisoryAssembler> {
    let cfg = config::load_config()?;
    let generator = llm::build_generator(&cfg.llm, offline)?;
    AdvisoryAssembler::new(generator, cfg.llm.timeout())
}
