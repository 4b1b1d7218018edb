//! HTTP adapter delivering audit events to the audit service.

use crate::task::ports::{AuditDeliveryError, AuditEvent, AuditSink};
use async_trait::async_trait;
use std::time::Duration;

/// Sends audit events as `POST {base_url}/logs`.
///
/// A client built without a base URL accepts every event and sends
/// nothing.
#[derive(Debug, Clone)]
pub struct HttpAuditClient {
    endpoint: Option<String>,
    client: reqwest::Client,
}

impl HttpAuditClient {
    /// Creates a client for the audit service at `base_url`.
    ///
    /// Empty or missing URLs leave the client unconfigured. A trailing `/`
    /// is ignored. `timeout` bounds each request.
    ///
    /// # Errors
    ///
    /// Returns [`AuditDeliveryError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(base_url: Option<&str>, timeout: Duration) -> Result<Self, AuditDeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AuditDeliveryError::transport)?;
        let endpoint = base_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(|url| format!("{url}/logs"));
        Ok(Self { endpoint, client })
    }

    /// Creates a client that never sends anything.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            endpoint: None,
            client: reqwest::Client::new(),
        }
    }

    /// Returns the full append endpoint, if configured.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

#[async_trait]
impl AuditSink for HttpAuditClient {
    async fn deliver(&self, event: AuditEvent) -> Result<(), AuditDeliveryError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Ok(());
        };

        let response = self
            .client
            .post(endpoint)
            .json(&event)
            .send()
            .await
            .map_err(AuditDeliveryError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditDeliveryError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}
