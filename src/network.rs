//! Network reachability probe gating the OCR action.
//!
//! OCR relies on services that are blocked in some regions. The heuristic is
//! a plain GET against a well-known URL: if it cannot complete within the
//! timeout, the network is treated as restricted.

use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::config::NetworkConfig;

pub trait RegionProbe: Send + Sync {
    /// True when OCR should be refused for this network.
    fn is_restricted_network(&self) -> bool;
}

/// Probe backed by a blocking `ureq` request.
pub struct HttpRegionProbe {
    agent: ureq::Agent,
    url: String,
}

impl HttpRegionProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            // Any HTTP response proves the host is reachable
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            url: url.into(),
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.probe_url.clone(), config.timeout())
    }

    /// True if the probe URL answered at all.
    #[instrument(skip(self), fields(url = %self.url))]
    pub fn can_reach(&self) -> bool {
        match self.agent.get(&self.url).call() {
            Ok(response) => {
                info!(status = response.status().as_u16(), "Probe URL reachable");
                true
            }
            Err(e) => {
                warn!(error = %e, "Probe URL unreachable");
                false
            }
        }
    }
}

impl RegionProbe for HttpRegionProbe {
    fn is_restricted_network(&self) -> bool {
        !self.can_reach()
    }
}

/// Fixed answer. Used when the region check is disabled and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticRegionProbe {
    pub restricted: bool,
}

impl RegionProbe for StaticRegionProbe {
    fn is_restricted_network(&self) -> bool {
        self.restricted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_probe() {
        assert!(StaticRegionProbe { restricted: true }.is_restricted_network());
        assert!(!StaticRegionProbe::default().is_restricted_network());
    }

    #[test]
    fn test_unreachable_url_is_restricted() {
        // Port 9 on localhost (discard) is closed on any normal test host
        let probe = HttpRegionProbe::new("http://127.0.0.1:9/", Duration::from_millis(500));
        assert!(probe.is_restricted_network());
    }

    #[test]
    fn test_from_config_uses_configured_url() {
        let config = NetworkConfig {
            probe_url: "http://127.0.0.1:9/".to_string(),
            timeout_ms: 200,
        };
        let probe = HttpRegionProbe::from_config(&config);
        assert_eq!(probe.url, "http://127.0.0.1:9/");
    }
}
