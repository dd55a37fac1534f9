use anyhow::Context;

use shopdash_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopdash_observability::init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let app = shopdash_api::app::build_app(&config).context("failed to wire application")?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
