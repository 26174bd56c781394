// Transport configuration for building reqwest::Client instances.
//
// The pixel board's firmware serves plain, unauthenticated HTTP on the
// local network, so there is no TLS or cookie machinery here — just the
// timeout and user agent shared by every request.

use std::time::Duration;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("glowfly/0.1.0")
            .build()?)
    }
}
