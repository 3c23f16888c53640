use serde_json::Value;
use std::fmt;

use crate::cores::referrals::submission::RawSubmission;

/// Minimum time a human needs between page load and submit.
pub const MIN_FILL_MILLIS: i64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomationSignal {
    Honeypot,
    TooFast { elapsed_ms: i64 },
    UnreadableTimestamp,
}

impl fmt::Display for AutomationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomationSignal::Honeypot => write!(f, "honeypot field filled"),
            AutomationSignal::TooFast { elapsed_ms } => {
                write!(f, "submitted {}ms after load (minimum {}ms)", elapsed_ms, MIN_FILL_MILLIS)
            }
            AutomationSignal::UnreadableTimestamp => write!(f, "form_timestamp is not a number"),
        }
    }
}

fn read_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

// Honeypot first, then timing. `None` means the submission looks human.
pub fn screen(raw: &RawSubmission, now_millis: i64) -> Option<AutomationSignal> {
    if raw.website.as_deref().is_some_and(|w| !w.trim().is_empty()) {
        return Some(AutomationSignal::Honeypot);
    }

    match raw.form_timestamp.as_ref() {
        None | Some(Value::Null) => None,
        // The hidden input is posted empty when the page script never ran
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(value) => match read_timestamp(value) {
            None => Some(AutomationSignal::UnreadableTimestamp),
            Some(loaded_at) => {
                let elapsed_ms = now_millis.saturating_sub(loaded_at);
                if elapsed_ms < MIN_FILL_MILLIS {
                    Some(AutomationSignal::TooFast { elapsed_ms })
                } else {
                    None
                }
            }
        },
    }
}
