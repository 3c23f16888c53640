use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

// Digits plus formatting characters, at least ten of them.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\d\s\-()+]{10,}$").expect("phone pattern is valid")
});

pub const MSG_SELECT_OPTION: &str = "Please select an option";
pub const MSG_AGREE_CONTACT: &str = "You must agree to be contacted";
pub const MSG_CONFIRM_SHARE: &str = "You must confirm permission to share";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MSG_PHONE_REQUIRED: &str = "Phone number is required";
pub const MSG_PHONE_INVALID: &str = "Please enter a valid phone number";
pub const MSG_REQUIRED: &str = "This field is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentKind {
    // General "agree to be contacted"
    Contact,
    // Nominator confirms they may share the nominee's details
    ReferralShare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Tel,
    Select { options: &'static [&'static str] },
    Radio { options: &'static [&'static str] },
    Consent(ConsentKind),
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind, required: bool) -> Self {
        FieldSpec { name, kind, required }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}

/// Full check run when the user tries to leave a step.
///
/// `value` is the current value of the field, or `None` when nothing is entered,
/// no radio option is picked, or the checkbox is unchecked.
pub fn validate_field(spec: &FieldSpec, value: Option<&str>) -> Result<(), &'static str> {
    if !spec.required {
        return Ok(());
    }
    let trimmed = value.map(str::trim).unwrap_or("");

    match &spec.kind {
        FieldKind::Radio { .. } => {
            if nothing_chosen(value) {
                return Err(MSG_SELECT_OPTION);
            }
        }
        FieldKind::Consent(kind) => {
            if nothing_chosen(value) {
                return Err(match kind {
                    ConsentKind::ReferralShare => MSG_CONFIRM_SHARE,
                    ConsentKind::Contact => MSG_AGREE_CONTACT,
                });
            }
        }
        FieldKind::Email => {
            if trimmed.is_empty() {
                return Err(MSG_EMAIL_REQUIRED);
            }
            if !is_valid_email(trimmed) {
                return Err(MSG_EMAIL_INVALID);
            }
        }
        FieldKind::Tel => {
            if trimmed.is_empty() {
                return Err(MSG_PHONE_REQUIRED);
            }
            if !is_valid_phone(trimmed) {
                return Err(MSG_PHONE_INVALID);
            }
        }
        FieldKind::Select { .. } => {
            if nothing_chosen(value) {
                return Err(MSG_SELECT_OPTION);
            }
        }
        FieldKind::Text | FieldKind::TextArea | FieldKind::Hidden => {
            if trimmed.is_empty() {
                return Err(MSG_REQUIRED);
            }
        }
    }
    Ok(())
}

// Check run on blur: only flags a malformed email or phone, never an empty field.
pub fn check_format(spec: &FieldSpec, value: Option<&str>) -> Option<&'static str> {
    let trimmed = value.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return None;
    }
    match spec.kind {
        FieldKind::Email if !is_valid_email(trimmed) => Some(MSG_EMAIL_INVALID),
        FieldKind::Tel if !is_valid_phone(trimmed) => Some(MSG_PHONE_INVALID),
        _ => None,
    }
}

fn nothing_chosen(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}
