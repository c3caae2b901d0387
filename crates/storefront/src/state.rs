use anyhow::{Context, Result};
use cart::di::{
    DependenciesInject as CartDependencies, DependenciesInjectDeps as CartDependenciesDeps,
};
use prometheus_client::registry::Registry;
use review::di::{
    DependenciesInject as ReviewDependencies, DependenciesInjectDeps as ReviewDependenciesDeps,
};
use shared::{config::Config, events::EventBus};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub cart: CartDependencies,
    pub review: ReviewDependencies,
    pub bus: EventBus,
    pub registry: Arc<Registry>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("cart", &self.cart)
            .field("review", &self.review)
            .field("registry", &"Registry")
            .finish()
    }
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let mut registry = Registry::default();
        let bus = EventBus::new(config.event_channel_capacity);

        let cart = CartDependencies::new(
            CartDependenciesDeps {
                config: config.clone(),
                bus: bus.clone(),
            },
            &mut registry,
        )
        .context("Failed to initialize cart dependency container")?;

        let review = ReviewDependencies::new(
            ReviewDependenciesDeps {
                config,
                bus: bus.clone(),
            },
            &mut registry,
        )
        .context("Failed to initialize review dependency container")?;

        Ok(Self {
            cart,
            review,
            bus,
            registry: Arc::new(registry),
        })
    }
}
