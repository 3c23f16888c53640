use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::configs::settings::MailConfig;
use crate::cores::mailer::email_controller::{DeliveryReceipt, EmailSender, MailerError, OutboundEmail};
use crate::cores::referrals::clock::Clock;
use crate::cores::referrals::intake::{Envelope, IntakeService};

pub const NOW: i64 = 1_700_000_600_000;

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

// Test double for the email provider: records every message and answers as configured
pub struct FakeMailer {
    accept: bool,
    calls: AtomicUsize,
    sent: Mutex<Vec<OutboundEmail>>,
}

impl FakeMailer {
    pub fn accepting() -> Arc<Self> {
        Arc::new(FakeMailer { accept: true, calls: AtomicUsize::new(0), sent: Mutex::new(Vec::new()) })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(FakeMailer { accept: false, calls: AtomicUsize::new(0), sent: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_subject(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|email| email.subject.clone())
    }
}

#[async_trait]
impl EmailSender for FakeMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(email.clone());
        if self.accept {
            Ok(DeliveryReceipt { id: Some("49a3999c-0ce1-4ea6-ab68-afcd6dc2e794".into()) })
        } else {
            Err(MailerError::Rejected { status: 403, detail: "domain not verified".into() })
        }
    }
}

pub fn intake_service(clock_millis: i64, mailer: Arc<FakeMailer>) -> IntakeService {
    IntakeService::new(Arc::new(FixedClock(clock_millis)), mailer, Envelope::from(&MailConfig::default()))
}
