use clap::Parser;
use rollbook::http::AppState;
use rollbook::{config, http, logger, Registry};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rollbookd", about = "Student records HTTP API server")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Bind address, e.g. 127.0.0.1:8000. Overrides config.
    #[arg(long)]
    bind: Option<String>,
    /// API bearer token accepted by the server. Repeatable. Overrides config.
    #[arg(long = "api-token")]
    api_token: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut cfg = config::load_config(args.config);
    if let Some(bind) = args.bind {
        cfg.bind = Some(bind);
    }
    if !args.api_token.is_empty() {
        cfg.api_tokens = Some(args.api_token);
    }

    let log_init = match &cfg.log_config {
        Some(path) => logger::init_from(path),
        None => rollbook::init(),
    };
    if let Err(e) = log_init {
        eprintln!("logging disabled: {e}");
    }

    if cfg.tokens().is_empty() {
        log::warn!("no api tokens configured; every student route will reject");
    }

    let registry = Registry::new();
    let state = AppState::new(registry.query_service(), registry.mutation_service(), cfg.tokens());

    let addr = cfg.bind_addr();
    log::info!("rollbookd listening on {addr}");
    http::serve(state, &addr).await?;
    Ok(())
}
