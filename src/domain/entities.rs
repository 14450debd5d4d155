//! Domain entities: release bookkeeping

/// A floating IP that could not be released, with the reason reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFailure {
    pub ip: String,
    pub message: String,
}

/// Outcome of a best-effort batch release.
///
/// Every requested IP ends up in exactly one of the two lists, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    pub released: Vec<String>,
    pub failed: Vec<ReleaseFailure>,
}

impl ReleaseReport {
    pub fn record_success(&mut self, ip: impl Into<String>) {
        self.released.push(ip.into());
    }

    pub fn record_failure(&mut self, ip: impl Into<String>, message: impl Into<String>) {
        self.failed.push(ReleaseFailure {
            ip: ip.into(),
            message: message.into(),
        });
    }

    pub fn total(&self) -> usize {
        self.released.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
