//! Floating IP service
//!
//! One method per subcommand, each forwarding a single request to the API.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{FilterArgs, ReleaseReport};
use crate::infrastructure::traits::FipApi;
use crate::infrastructure::ApiError;

/// Floating IP operations against the remote service.
pub struct FipService {
    api: Arc<dyn FipApi>,
}

impl FipService {
    pub fn new(api: Arc<dyn FipApi>) -> Self {
        Self { api }
    }

    /// Allocate floating IPs. `count` is passed to the service as given.
    #[instrument(skip(self))]
    pub fn allocate(&self, count: &str) -> ApplicationResult<Vec<String>> {
        let ips = self.api.allocate(count)?;
        debug!("allocate: got {} ips", ips.len());
        Ok(ips)
    }

    /// Release every IP in order, continuing past failures.
    ///
    /// `on_failure` is called as each failure happens; the report holds the
    /// full outcome once all IPs were tried.
    #[instrument(skip(self, on_failure))]
    pub fn release<F>(&self, ips: &[String], mut on_failure: F) -> ReleaseReport
    where
        F: FnMut(&str, &ApiError),
    {
        let mut report = ReleaseReport::default();
        for ip in ips {
            match self.api.release(ip) {
                Ok(()) => report.record_success(ip.as_str()),
                Err(e) => {
                    debug!("release: {} failed: {}", ip, e);
                    on_failure(ip, &e);
                    report.record_failure(ip.as_str(), e.to_string());
                }
            }
        }
        report
    }

    #[instrument(skip(self))]
    pub fn associate(&self, ip: &str, container: &str) -> ApplicationResult<()> {
        self.api.associate(ip, container)?;
        Ok(())
    }

    /// Detach the container's floating IP and return it.
    #[instrument(skip(self))]
    pub fn deassociate(&self, container: &str) -> ApplicationResult<String> {
        Ok(self.api.deassociate(container)?)
    }

    /// List floating IPs. All filter flags are validated before the request is sent.
    #[instrument(skip(self))]
    pub fn list(&self, filter_flags: &[String]) -> ApplicationResult<Vec<String>> {
        let filters = FilterArgs::from_flags(filter_flags)?;
        debug!("list: {} filter names", filters.len());
        Ok(self.api.list(&filters)?)
    }
}
