//! Pharmacy Storefront server

use anyhow::Result;
use pharmacy_storefront::api::{self, AppState};
use pharmacy_storefront::publisher::EventPublisher;
use pharmacy_storefront::store::{AddressStore, PgAddressStore};
use pharmacy_storefront::StorefrontConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    tracing::debug!(?config, "configuration loaded");

    let addresses = match &config.database_url {
        Some(url) => {
            let pg = PgAddressStore::connect(url, config.database_max_connections).await?;
            pg.migrate().await?;
            AddressStore::Postgres(pg)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, addresses are kept in memory");
            AddressStore::in_memory()
        }
    };
    tracing::info!(backend = addresses.backend(), "address store ready");

    let events = EventPublisher::connect(config.nats_url.as_deref()).await;
    let state = AppState::build(addresses, events, config.seed_demo_data).await?;
    let app = api::router(state);

    let addr = config.socket_addr();
    tracing::info!(%addr, "pharmacy storefront listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
