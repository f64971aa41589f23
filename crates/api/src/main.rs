use anyhow::Context;

use greenloop_infra::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    greenloop_observability::init();

    let config = AppConfig::from_env();
    let services = greenloop_api::app::services::build_services(&config)
        .context("failed to wire application services")?;
    let app = greenloop_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        data_dir = %config.data_dir.display(),
        ai_enabled = config.ai.is_some(),
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
