mod state;

use crate::state::AppState;
use anyhow::{Context, Result};
use cart::abstract_trait::CartSyncServiceTrait;
use shared::{
    config::Config,
    utils::{Telemetry, init_logger},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let (state, telemetry) = setup().context("Failed to setup application")?;

    let mut events = state.bus.subscribe();
    let listener = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!(
                "📦 Event observed: type={}, aggregate_id={}",
                event.event_type, event.aggregate_id
            );
        }
    });

    let result = state.cart.cart_sync.fetch_cart().await;
    if result.success {
        info!("✅ Initial cart hydrated");
    } else {
        warn!("⚠️ Initial cart fetch failed: {}", result.message);
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("🛑 Shutdown signal received (Ctrl+C).");

    state.cart.cart_sync.close();
    listener.abort();

    if let Err(e) = telemetry.shutdown().await {
        error!("Failed to shutdown telemetry: {e}");
    }

    info!("✅ Storefront sync shutdown complete.");

    Ok(())
}

fn setup() -> Result<(Arc<AppState>, Telemetry)> {
    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::new("storefront-sync", "http://otel-collector:4317".to_string());
    let logger_provider = telemetry.init_logger();
    let _tracer_provider = telemetry.init_tracer();
    let _meter_provider = telemetry.init_meter();

    init_logger(logger_provider, "storefront");

    let state = Arc::new(AppState::new(config).context("Failed to create AppState")?);

    info!("✅ Application setup completed successfully.");

    Ok((state, telemetry))
}
