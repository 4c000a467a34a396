use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use scalp_signals::config::Config;
use scalp_signals::server;
use scalp_signals::service::SignalService;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    if cfg.api_key.is_empty() {
        anyhow::bail!("SIGNALS_API_KEY must be set");
    }

    let bind_addr = cfg.bind_addr.clone();
    let shared_config = cfg.shared();
    let service = SignalService::from_config(shared_config.clone())?;

    info!("{}", "=".repeat(60));
    info!("Forex scalp signal service starting up");
    info!("Default source: {:?}", shared_config.default_source);
    info!(
        "LLM source: {}",
        if service.has_llm() {
            format!("enabled ({})", shared_config.openai_model)
        } else {
            "disabled (set OPENAI_API_KEY and TWELVEDATA_API_KEY)".to_string()
        }
    );
    info!("{}", "=".repeat(60));

    server::serve(Arc::new(service), &bind_addr).await
}
