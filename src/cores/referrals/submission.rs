use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::cores::referrals::intake::IntakeError;

// Referral payload as posted by the browser form. Every field is optional here;
// `ReferralSubmission::try_from` enforces which ones are required.
#[derive(Deserialize, Serialize, Debug, Default, Clone, ToSchema)]
pub struct RawSubmission {
    // Step 1: nominator
    #[serde(default, deserialize_with = "lenient_text")]
    pub nominator_first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nominator_last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nominator_email: Option<String>,      // (Required)
    #[serde(default, deserialize_with = "lenient_text")]
    pub nominator_phone: Option<String>,

    // Step 2: nominee
    #[serde(default, deserialize_with = "lenient_text")]
    pub nominee_first_name: Option<String>,   // (Required)
    #[serde(default, deserialize_with = "lenient_text")]
    pub nominee_last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nominee_profession: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nominee_phone: Option<String>,        // (Required)

    // Step 3: qualifications
    #[serde(default, deserialize_with = "lenient_text")]
    pub medicaid_approved: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub referral_context: Option<String>,

    // Step 4: consent. A checked box posts "on", JSON clients may send a bool.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub referral_consent: Option<Value>,

    // Anti-automation
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub form_timestamp: Option<Value>,
}

// Accepts strings, numbers and booleans so a hand-built JSON body is read the same
// way as a serialized FormData.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

impl RawSubmission {
    pub fn from_slice(body: &[u8]) -> Result<Self, IntakeError> {
        serde_json::from_slice(body).map_err(IntakeError::Malformed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicaidApproval {
    Yes,
    Unsure,
}

impl MedicaidApproval {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("yes") => MedicaidApproval::Yes,
            _ => MedicaidApproval::Unsure,
        }
    }
}

/// A referral that passed required-field validation.
///
/// Built only through `TryFrom<RawSubmission>`, so holding one means nominator email,
/// nominee first name and nominee phone are non-blank.
#[derive(Debug, Clone)]
pub struct ReferralSubmission {
    pub nominator_first_name: String,
    pub nominator_last_name: String,
    pub nominator_email: String,
    pub nominator_phone: String,
    pub nominee_first_name: String,
    pub nominee_last_name: String,
    pub nominee_profession: String,
    pub nominee_phone: String,
    pub medicaid_approved: MedicaidApproval,
    pub referral_context: Option<String>,
    pub referral_consent: bool,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Browser truthiness, except that the literal strings "false", "off" and "0" mean no.
pub fn consent_given(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => {
            let s = s.trim();
            !s.is_empty() && !matches!(s.to_ascii_lowercase().as_str(), "false" | "off" | "0")
        }
        Some(_) => true,
    }
}

impl TryFrom<RawSubmission> for ReferralSubmission {
    type Error = IntakeError;

    fn try_from(raw: RawSubmission) -> Result<Self, Self::Error> {
        let referral_consent = consent_given(raw.referral_consent.as_ref());
        let medicaid_approved = MedicaidApproval::parse(raw.medicaid_approved.as_deref());

        let (nominator_email, nominee_first_name, nominee_phone) = match (
            required(raw.nominator_email),
            required(raw.nominee_first_name),
            required(raw.nominee_phone),
        ) {
            (Some(email), Some(first), Some(phone)) => (email, first, phone),
            _ => return Err(IntakeError::MissingFields),
        };

        Ok(ReferralSubmission {
            nominator_first_name: raw.nominator_first_name.unwrap_or_default(),
            nominator_last_name: raw.nominator_last_name.unwrap_or_default(),
            nominator_email,
            nominator_phone: raw.nominator_phone.unwrap_or_default(),
            nominee_first_name,
            nominee_last_name: raw.nominee_last_name.unwrap_or_default(),
            nominee_profession: raw.nominee_profession.unwrap_or_default(),
            nominee_phone,
            medicaid_approved,
            referral_context: raw.referral_context.filter(|c| !c.trim().is_empty()),
            referral_consent,
        })
    }
}
