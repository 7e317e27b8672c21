use std::sync::Arc;

use betty::api::HttpBackend;
use betty::channels::cli;
use betty::config::BotConfig;
use betty::engine::Engine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BotConfig::from_env()?;

    eprintln!("🤖 Betty v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.base_url);
    eprintln!("   Pack: {} ({})", config.pack.label(), config.bot_id);
    eprintln!("   Type a message and press Enter. /quit to exit.\n");

    let backend = HttpBackend::new(&config.base_url);

    // Branding is best-effort; the default greeting covers a cold backend.
    let meta = match backend.fetch_meta(&config.bot_id).await {
        Ok(meta) => Some(meta),
        Err(e) => {
            tracing::warn!("Could not fetch bot metadata: {e}");
            None
        }
    };

    let engine = Engine::new(config, Arc::new(backend));
    cli::run(engine, meta).await?;

    Ok(())
}
