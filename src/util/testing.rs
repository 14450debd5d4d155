use std::collections::HashSet;
use std::sync::{Mutex, Once, PoisonError};
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::FilterArgs;
use crate::infrastructure::traits::FipApi;
use crate::infrastructure::{ApiError, ApiResult};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
}

/// A request as seen by `StubApi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Allocate(String),
    Release(String),
    Associate(String, String),
    Deassociate(String),
    List(FilterArgs),
}

/// In-memory `FipApi` that records every call.
///
/// Calls whose first argument is in the failing set return a 404 status error.
#[derive(Debug, Default)]
pub struct StubApi {
    calls: Mutex<Vec<ApiCall>>,
    ips: Vec<String>,
    failing: HashSet<String>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// IPs returned by `allocate`, `list` and (first one) `deassociate`.
    pub fn with_ips<I, S>(mut self, ips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ips = ips.into_iter().map(Into::into).collect();
        self
    }

    pub fn failing_on(mut self, target: impl Into<String>) -> Self {
        self.failing.insert(target.into());
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn check(&self, target: &str) -> ApiResult<()> {
        if self.failing.contains(target) {
            Err(ApiError::Status {
                status: 404,
                message: format!("no such floating IP or container: {target}"),
            })
        } else {
            Ok(())
        }
    }
}

impl FipApi for StubApi {
    fn allocate(&self, count: &str) -> ApiResult<Vec<String>> {
        self.record(ApiCall::Allocate(count.to_string()));
        self.check(count)?;
        Ok(self.ips.clone())
    }

    fn release(&self, ip: &str) -> ApiResult<()> {
        self.record(ApiCall::Release(ip.to_string()));
        self.check(ip)
    }

    fn associate(&self, ip: &str, container: &str) -> ApiResult<()> {
        self.record(ApiCall::Associate(ip.to_string(), container.to_string()));
        self.check(ip)
    }

    fn deassociate(&self, container: &str) -> ApiResult<String> {
        self.record(ApiCall::Deassociate(container.to_string()));
        self.check(container)?;
        Ok(self.ips.first().cloned().unwrap_or_default())
    }

    fn list(&self, filters: &FilterArgs) -> ApiResult<Vec<String>> {
        self.record(ApiCall::List(filters.clone()));
        Ok(self.ips.clone())
    }
}
