use crate::{
    abstract_trait::DynReviewApiClient,
    api_client::ReviewApiClient,
    service::{ReactionToggleService, ReactionToggleServiceDeps},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{config::Config, events::EventBus, http::HttpClient};
use std::{fmt, sync::Arc, time::Duration};

#[derive(Clone)]
pub struct DependenciesInject {
    pub reaction_toggle: ReactionToggleService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("reaction_toggle", &"ReactionToggleService")
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
            config.review_service_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
        .context("failed to build review service HTTP client")?;

        let client: DynReviewApiClient = Arc::new(ReviewApiClient::new(http));

        let reaction_toggle =
            ReactionToggleService::new(ReactionToggleServiceDeps { client, bus }, registry)
                .context("failed initialize reaction toggle service")?;

        Ok(Self { reaction_toggle })
    }
}
