use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Body of one send request to the email provider
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub id: Option<String>,
}

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("request to email provider failed: {0}")]
    Transport(String),

    #[error("email provider rejected the message ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("unreadable email provider response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailerError>;
}
