//! Dev-server detection.
//!
//! The dev server is considered up when it answers a request for its HMR
//! client at `{origin}/@vite/client`. Callers probe once at startup; a running
//! dev server takes precedence over the build manifest.

use crate::config::{Origin, VITE_CLIENT_PATH};
use crate::error::{codes, ConfigError};
use reqwest::Client;
use std::time::Duration;

/// Default connect timeout for the probe.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Default total request timeout for the probe.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP probe for a running dev server.
#[derive(Debug, Clone)]
pub struct DevServerProbe {
    http: Client,
}

impl DevServerProbe {
    /// Create a probe with the default timeouts.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a probe with explicit timeouts.
    pub fn with_timeouts(connect: Duration, request: Duration) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .connect_timeout(connect)
            .timeout(request)
            .user_agent(concat!("viteconf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ConfigError::new(
                    codes::PROBE_CLIENT_FAILED,
                    format!("Failed to create HTTP client: {e}"),
                )
            })?;

        Ok(Self { http })
    }

    /// Whether a dev server answers at `origin`.
    ///
    /// Connection failures, timeouts and non-success statuses all mean "not
    /// running"; this never errors.
    pub async fn is_running(&self, origin: &Origin) -> bool {
        let url = origin.join_path(VITE_CLIENT_PATH);

        match self.http.get(&url).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(%url, %status, "dev server probe answered");
                status.is_success()
            }
            Err(e) => {
                tracing::debug!(%url, error = %e, "dev server not reachable");
                false
            }
        }
    }
}
