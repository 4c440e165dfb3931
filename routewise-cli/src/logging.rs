use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber on stderr.
///
/// Level comes from `RUST_LOG` (default `info`). `json` switches to JSON lines.
pub fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("init tracing: {e}"))
}
