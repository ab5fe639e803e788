use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use journal_voice::engine::RemoteEngineFactory;
use journal_voice::{create_router, AppState, Config, SessionController};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "journal-voice", about = "Voice capture service for journal fields")]
struct Args {
    /// Path to the configuration file, without extension
    #[arg(long, default_value = "config/journal-voice")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    info!("{} starting", cfg.service.name);
    info!(
        "Capture timings: review {}ms, debounce {}ms, auto-retry {}",
        cfg.capture.review_delay_ms,
        cfg.capture.interim_debounce_ms,
        if cfg.capture.auto_retry { "on" } else { "off" }
    );

    let (factory, engine) = RemoteEngineFactory::new();
    let controller = SessionController::new(cfg.capture.clone(), Arc::new(factory));
    let state = AppState::new(controller, engine);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server error")?;

    Ok(())
}
