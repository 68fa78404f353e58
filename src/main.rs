//! HR Analytics Dashboard
//!
//! Serves the dashboard on `HOST`:`PORT` (default `127.0.0.1:8501`).

use anyhow::Result;
use hr_dashboard::web::{self, ServeConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=warn".to_string());
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter)?)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = ServeConfig::from_env()?;
    info!(dataset = %config.dataset_path.display(), "starting HR analytics dashboard");

    web::serve(config).await
}
