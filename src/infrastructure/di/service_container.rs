//! Service container for dependency injection
//!
//! Wires up services with their dependencies.

use std::sync::Arc;

use crate::application::services::FipService;
use crate::config::Settings;
use crate::infrastructure::traits::{FipApi, HttpFipClient};
use crate::infrastructure::ApiResult;

/// Container holding application services.
pub struct ServiceContainer {
    pub fip_service: FipService,
}

impl ServiceContainer {
    /// Create a new service container talking HTTP to the configured host.
    pub fn new(settings: Settings) -> ApiResult<Self> {
        let api = Arc::new(HttpFipClient::new(&settings)?);
        Ok(Self::with_deps(api))
    }

    /// Create a service container with a custom client (for testing).
    pub fn with_deps(api: Arc<dyn FipApi>) -> Self {
        Self {
            fip_service: FipService::new(api),
        }
    }
}
