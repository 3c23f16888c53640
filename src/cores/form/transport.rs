use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::cores::form::state::Payload;

pub const DEFAULT_ENDPOINT: &str = "/submit-form";

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),

    #[error("Network response was not ok ({0})")]
    Status(u16),
}

// Carries the serialized form to the intake endpoint
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn post(&self, payload: &Payload) -> Result<(), SubmitError>;
}

pub struct HttpSubmitTransport {
    client: Client,
    endpoint: String,
}

impl HttpSubmitTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SubmitError::Network(format!("Failed to build client: {}", err)))?;
        Ok(HttpSubmitTransport { client, endpoint: endpoint.into() })
    }

    // Posts to the site's own intake path, e.g. `https://nocostnurse.com` -> `https://nocostnurse.com/submit-form`
    pub fn for_site(base_url: &str, timeout: Duration) -> Result<Self, SubmitError> {
        Self::new(format!("{}{}", base_url.trim_end_matches('/'), DEFAULT_ENDPOINT), timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmitTransport for HttpSubmitTransport {
    async fn post(&self, payload: &Payload) -> Result<(), SubmitError> {
        let response = self.client.post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|err| SubmitError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(SubmitError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_transport_targets_the_intake_path() {
        let timeout = Duration::from_secs(5);
        let transport = HttpSubmitTransport::for_site("https://nocostnurse.com/", timeout).unwrap();
        assert_eq!(transport.endpoint(), "https://nocostnurse.com/submit-form");

        let transport = HttpSubmitTransport::for_site("http://127.0.0.1:8080", timeout).unwrap();
        assert_eq!(transport.endpoint(), "http://127.0.0.1:8080/submit-form");
    }
}
