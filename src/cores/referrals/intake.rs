use log::{error, info, warn};
use std::sync::Arc;
use thiserror::Error;

use crate::configs::settings::MailConfig;
use crate::cores::mailer::email_controller::{EmailSender, MailerError, OutboundEmail};
use crate::cores::referrals::bot_filter::{screen, AutomationSignal};
use crate::cores::referrals::clock::Clock;
use crate::cores::referrals::submission::{RawSubmission, ReferralSubmission};
use crate::cores::referrals::template::render_notification;

pub const SUCCESS_MESSAGE: &str = "Referral submitted successfully";

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("method {0} is not allowed")]
    MethodNotAllowed(String),

    #[error("malformed request body: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Missing required fields")]
    MissingFields,

    #[error(transparent)]
    Delivery(#[from] MailerError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntakeError {
    pub fn status_code(&self) -> u16 {
        match self {
            IntakeError::MethodNotAllowed(_) => 405,
            IntakeError::MissingFields => 400,
            IntakeError::Malformed(_)
            | IntakeError::Delivery(_)
            | IntakeError::Internal(_) => 500,
        }
    }

    // What the caller is allowed to see. Inner detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            IntakeError::MethodNotAllowed(_) => "Method Not Allowed",
            IntakeError::MissingFields => "Missing required fields",
            IntakeError::Delivery(MailerError::Transport(_))
            | IntakeError::Delivery(MailerError::Rejected { .. }) => "Failed to send email",
            IntakeError::Delivery(MailerError::InvalidResponse(_))
            | IntakeError::Malformed(_)
            | IntakeError::Internal(_) => "Internal Server Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    Delivered { id: Option<String> },
    // Answered like a success so automated senders learn nothing.
    Filtered(AutomationSignal),
}

// Sender and recipients of every notification
#[derive(Debug, Clone)]
pub struct Envelope {
    pub from: String,
    pub to: Vec<String>,
}

impl From<&MailConfig> for Envelope {
    fn from(config: &MailConfig) -> Self {
        Envelope { from: config.from.clone(), to: config.to.clone() }
    }
}

/// Runs one submission through parse, bot filter, validation, templating and relay.
///
/// Bot checks run before required-field validation so a filtered sender never sees
/// a 400. At most one call is made to `mailer`, and only after validation passed.
pub async fn process_submission(
    body: &[u8],
    clock: &dyn Clock,
    mailer: &dyn EmailSender,
    envelope: &Envelope,
) -> Result<IntakeOutcome, IntakeError> {
    let raw = RawSubmission::from_slice(body)?;

    if let Some(signal) = screen(&raw, clock.now_millis()) {
        warn!("Dropping automated referral submission: {}", signal);
        return Ok(IntakeOutcome::Filtered(signal));
    }

    let submission = ReferralSubmission::try_from(raw)?;
    let notification = render_notification(&submission);

    let email = OutboundEmail {
        from: envelope.from.clone(),
        to: envelope.to.clone(),
        subject: notification.subject,
        html: notification.html,
    };

    match mailer.send(&email).await {
        Ok(receipt) => {
            info!("Referral notification sent, id={}", receipt.id.as_deref().unwrap_or("-"));
            Ok(IntakeOutcome::Delivered { id: receipt.id })
        }
        Err(err) => {
            error!(target: "error_log", "Resend API Error: {}", err);
            Err(IntakeError::Delivery(err))
        }
    }
}

// Process-lifetime dependencies of the intake endpoint, shared by both HTTP adapters.
pub struct IntakeService {
    clock: Arc<dyn Clock>,
    mailer: Arc<dyn EmailSender>,
    envelope: Envelope,
}

impl IntakeService {
    pub fn new(clock: Arc<dyn Clock>, mailer: Arc<dyn EmailSender>, envelope: Envelope) -> Self {
        IntakeService { clock, mailer, envelope }
    }

    pub async fn process(&self, body: &[u8]) -> Result<IntakeOutcome, IntakeError> {
        process_submission(body, self.clock.as_ref(), self.mailer.as_ref(), &self.envelope).await
    }
}
