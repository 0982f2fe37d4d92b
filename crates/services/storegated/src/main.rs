//! Storegate dashboard server (storegated)
//!
//! Serves the e-commerce admin dashboard routes behind the route permission
//! gate and forwards uploads, ad moderation and PayPal payments to the
//! external API server.
//!
//! # Examples
//!
//! ```bash
//! export JWT_SECRET=your_jwt_secret
//! export API_BASE_URL=https://api.shop.example
//! export STOREGATE_CONFIG=/etc/storegate/config.toml   # optional
//! storegated
//! ```

use storegate_auth::jwt::Keys;
use storegate_config::StoregateConfig;
use storegated::{api::setup_api, prelude::*, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,storegate_web=debug,storegate_requests=info,tower_http=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StoregateConfig::load()?;
    tracing::info!("Configuration: {config}");

    let keys = Keys::from_env().inspect_err(|_| {
        tracing::error!("JWT_SECRET must be set to a non-empty value");
    })?;
    let state = AppState::new(&config, keys)?;
    let (_, api_handle) = setup_api(state, &config.server.bind).await?;

    tokio::select! {
        result = api_handle => {
            tracing::error!("API server stopped: {:?}", result);
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }

    Ok(())
}
