use crate::cores::form::definition::{FormDefinition, StepSpec};
use crate::cores::form::fields::{ConsentKind, FieldKind, FieldSpec};

pub const HONEYPOT_FIELD: &str = "website";
pub const TIMESTAMP_FIELD: &str = "form_timestamp";

pub const PROFESSIONS: &[&str] = &["rn", "lpn", "cna", "hha", "other"];
pub const MEDICAID_OPTIONS: &[&str] = &["yes", "unsure"];

// The four-step nurse referral questionnaire
pub fn referral_form() -> FormDefinition {
    FormDefinition {
        steps: vec![
            StepSpec {
                title: "Your Information",
                fields: vec![
                    FieldSpec::new("nominator_first_name", FieldKind::Text, false),
                    FieldSpec::new("nominator_last_name", FieldKind::Text, false),
                    FieldSpec::new("nominator_email", FieldKind::Email, true),
                    FieldSpec::new("nominator_phone", FieldKind::Tel, true),
                ],
            },
            StepSpec {
                title: "Candidate Information",
                fields: vec![
                    FieldSpec::new("nominee_first_name", FieldKind::Text, true),
                    FieldSpec::new("nominee_last_name", FieldKind::Text, false),
                    FieldSpec::new("nominee_profession", FieldKind::Select { options: PROFESSIONS }, true),
                    FieldSpec::new("nominee_phone", FieldKind::Tel, true),
                ],
            },
            StepSpec {
                title: "Qualifications",
                fields: vec![
                    FieldSpec::new("medicaid_approved", FieldKind::Radio { options: MEDICAID_OPTIONS }, true),
                    FieldSpec::new("referral_context", FieldKind::TextArea, false),
                ],
            },
            StepSpec {
                title: "Consent",
                fields: vec![
                    FieldSpec::new("referral_consent", FieldKind::Consent(ConsentKind::ReferralShare), true),
                ],
            },
        ],
        hidden: vec![
            FieldSpec::new(HONEYPOT_FIELD, FieldKind::Hidden, false),
            FieldSpec::new(TIMESTAMP_FIELD, FieldKind::Hidden, false),
        ],
    }
}
