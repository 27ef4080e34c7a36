use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::HttpMethod;

/// A single encoded request, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: HttpMethod,
    /// Endpoint URL without the query, e.g. `http://api.mixpanel.com/track/`.
    pub endpoint: String,
    /// Encoded query string (`...&data=...`).
    pub query: String,
}

impl Request {
    /// `endpoint?query`, the URL reported in errors.
    pub fn url(&self) -> String {
        format!("{}?{}", self.endpoint, self.query)
    }
}

/// Sends one request and classifies the outcome.
///
/// Implementations make exactly one attempt: `Ok(())` for a 2xx response,
/// `Err` otherwise.
pub trait Transport: Send + Sync {
    fn send(&self, request: &Request) -> Result<()>;
}

/// Blocking HTTP transport backed by `ureq`.
pub struct HttpDispatcher {
    agent: ureq::Agent,
}

impl HttpDispatcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            // A 3xx is a failed attempt, never a second request.
            .redirects(0)
            .user_agent(&format!("mixpanel-activity-rust/{}", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl Transport for HttpDispatcher {
    fn send(&self, request: &Request) -> Result<()> {
        let url = request.url();
        tracing::debug!(
            endpoint = %request.endpoint,
            method = ?request.method,
            query_len = request.query.len(),
            "dispatching request"
        );

        let result = match request.method {
            HttpMethod::Post => self
                .agent
                .post(&request.endpoint)
                .set("Content-Type", "application/x-www-form-urlencoded")
                .send_string(&request.query),
            HttpMethod::Get => self.agent.get(&url).call(),
        };

        match result {
            Ok(resp) => {
                let status = resp.status();
                if !(200..300).contains(&status) {
                    tracing::warn!(status, endpoint = %request.endpoint, "request rejected");
                    return Err(Error::RemoteRejected { status, url });
                }
                tracing::debug!(status, endpoint = %request.endpoint, "request accepted");
                Ok(())
            }
            Err(ureq::Error::Status(status, _resp)) => {
                tracing::warn!(status, endpoint = %request.endpoint, "request rejected");
                Err(Error::RemoteRejected { status, url })
            }
            Err(ureq::Error::Transport(e)) => {
                tracing::warn!(error = %e, endpoint = %request.endpoint, "transport failure");
                Err(Error::TransportFailure {
                    url,
                    message: e.to_string(),
                })
            }
        }
    }
}
