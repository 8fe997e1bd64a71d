//! parkdesk server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parkdesk_mailer::SmtpMailer;
use parkdesk_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = parkdesk_config::load_settings().context("failed to load settings")?;
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    if settings.smtp.host.is_none() {
        tracing::warn!("No SMTP relay configured; summary emails will fail");
    }

    let mailer = Arc::new(SmtpMailer::new(settings.smtp.clone()));
    let state = AppState::new(settings, mailer);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "parkdesk listening");

    axum::serve(listener, app).await?;

    Ok(())
}
