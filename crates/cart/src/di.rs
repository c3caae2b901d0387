use crate::{
    abstract_trait::DynCartApiClient,
    api_client::CartApiClient,
    service::{CartSyncService, CartSyncServiceDeps},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{config::Config, events::EventBus, http::HttpClient};
use std::{fmt, sync::Arc, time::Duration};

#[derive(Clone)]
pub struct DependenciesInject {
    pub cart_sync: CartSyncService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("cart_sync", &"CartSyncService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub config: Config,
    pub bus: EventBus,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Result<Self> {
        let DependenciesInjectDeps { config, bus } = deps;

        let http = HttpClient::new(
            config.cart_service_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
        .context("failed to build cart service HTTP client")?;

        let client: DynCartApiClient = Arc::new(CartApiClient::new(http));

        let cart_sync = CartSyncService::new(CartSyncServiceDeps { client, bus }, registry)
            .context("failed initialize cart sync service")?;

        Ok(Self { cart_sync })
    }
}
