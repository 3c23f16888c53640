use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::configs::settings::MailConfig;
use crate::cores::mailer::email_controller::{DeliveryReceipt, EmailSender, MailerError, OutboundEmail};

#[derive(Deserialize)]
struct SendResponse {
    id: Option<String>,
}

// Resend HTTP API client. Built once at startup and shared by every request.
pub struct ResendClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ResendClient {
    pub fn new(config: &MailConfig, api_key: String) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|err| MailerError::Transport(format!("Failed to build client: {}", err)))?;

        Ok(ResendClient {
            client,
            api_url: config.api_url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailerError> {
        let response = match self.client.post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(email)
            .send()
            .await {
                Ok(resp) => resp,
                Err(err) if err.is_timeout() => {
                    return Err(MailerError::Transport(format!("timed out: {}", err)))
                }
                Err(err) => return Err(MailerError::Transport(err.to_string())),
            };

        let status = response.status();
        let body_text = response.text().await
            .map_err(|err| MailerError::InvalidResponse(format!("Failed to read response body: {}", err)))?;

        if !status.is_success() {
            return Err(MailerError::Rejected { status: status.as_u16(), detail: body_text });
        }

        let body: SendResponse = serde_json::from_str(&body_text)
            .map_err(|err| MailerError::InvalidResponse(format!("Failed to parse response: {}", err)))?;

        Ok(DeliveryReceipt { id: body.id })
    }
}
