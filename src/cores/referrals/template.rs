use crate::cores::referrals::submission::{MedicaidApproval, ReferralSubmission};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub html: String,
}

// Every submitted value goes through here before it touches the HTML body.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn subject_line(sub: &ReferralSubmission) -> String {
    let subject = format!(
        "New Referral: {} {} ({})",
        sub.nominee_first_name,
        sub.nominee_last_name,
        sub.nominee_profession.to_uppercase()
    );
    subject.replace(['\r', '\n'], " ")
}

const SECTION_HEADING: &str = "border-bottom: 2px solid #f1f5f9; padding-bottom: 10px; color: #154da9;";
const LATER_SECTION_HEADING: &str = "border-bottom: 2px solid #f1f5f9; padding-bottom: 10px; margin-top: 30px; color: #154da9;";

fn row(label: &str, value: &str) -> String {
    format!("<p><strong>{}:</strong> {}</p>\n", label, value)
}

pub fn render_notification(sub: &ReferralSubmission) -> Notification {
    let e = escape_html;
    let medicaid = match sub.medicaid_approved {
        MedicaidApproval::Yes => "✅ Yes",
        MedicaidApproval::Unsure => "❓ Unsure",
    };
    let context = sub.referral_context.as_deref().map(e).unwrap_or_else(|| "N/A".to_string());
    let consent = if sub.referral_consent { "✅ Given" } else { "❌ Not Given" };

    let mut body = String::new();
    body.push_str(&format!("<h2 style=\"{}\">Step 1: Nominator Info</h2>\n", SECTION_HEADING));
    body.push_str(&row("Name", &format!("{} {}", e(&sub.nominator_first_name), e(&sub.nominator_last_name))));
    body.push_str(&row("Email", &e(&sub.nominator_email)));
    body.push_str(&row("Phone", &e(&sub.nominator_phone)));

    body.push_str(&format!("<h2 style=\"{}\">Step 2: Candidate Info</h2>\n", LATER_SECTION_HEADING));
    body.push_str(&row("Name", &format!("{} {}", e(&sub.nominee_first_name), e(&sub.nominee_last_name))));
    body.push_str(&row("Profession", &e(&sub.nominee_profession.to_uppercase())));
    body.push_str(&row("Phone", &e(&sub.nominee_phone)));

    body.push_str(&format!("<h2 style=\"{}\">Step 3: Qualifications</h2>\n", LATER_SECTION_HEADING));
    body.push_str(&row("Medicaid Approved in GA", medicaid));
    body.push_str(&row("Context", &context));

    body.push_str(&format!("<h2 style=\"{}\">Step 4: Consent</h2>\n", LATER_SECTION_HEADING));
    body.push_str(&row("Permission to Contact", consent));

    let html = format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; border: 1px solid #e2e8f0; border-radius: 8px; overflow: hidden;">
<div style="background: #134598; padding: 20px; text-align: center;">
<h1 style="color: white; margin: 0; font-size: 24px;">New Referral Received</h1>
</div>
<div style="padding: 30px; color: #1e293b; line-height: 1.6;">
{}</div>
<div style="background: #f8fafc; padding: 20px; text-align: center; color: #64748b; font-size: 12px;">
Sent from No Cost Nurse Referral Network
</div>
</div>
"#,
        body
    );

    Notification { subject: subject_line(sub), html }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ReferralSubmission {
        ReferralSubmission {
            nominator_first_name: "Pat".into(),
            nominator_last_name: "Lee".into(),
            nominator_email: "pat@example.com".into(),
            nominator_phone: "(678) 555-0000".into(),
            nominee_first_name: "Jane".into(),
            nominee_last_name: "Doe".into(),
            nominee_profession: "rn".into(),
            nominee_phone: "(404) 555-1234".into(),
            medicaid_approved: MedicaidApproval::Yes,
            referral_context: None,
            referral_consent: true,
        }
    }

    #[test]
    fn subject_uppercases_profession() {
        assert_eq!(subject_line(&submission()), "New Referral: Jane Doe (RN)");
    }

    #[test]
    fn subject_has_no_line_breaks() {
        let mut sub = submission();
        sub.nominee_last_name = "Doe\r\nBcc: x@example.com".into();
        assert!(!subject_line(&sub).contains('\n'));
        assert!(!subject_line(&sub).contains('\r'));
    }

    #[test]
    fn body_renders_every_section() {
        let html = render_notification(&submission()).html;
        assert!(html.contains("New Referral Received"));
        assert!(html.contains("<p><strong>Name:</strong> Pat Lee</p>"));
        assert!(html.contains("<p><strong>Email:</strong> pat@example.com</p>"));
        assert!(html.contains("<p><strong>Profession:</strong> RN</p>"));
        assert!(html.contains("<p><strong>Medicaid Approved in GA:</strong> ✅ Yes</p>"));
        assert!(html.contains("<p><strong>Context:</strong> N/A</p>"));
        assert!(html.contains("<p><strong>Permission to Contact:</strong> ✅ Given</p>"));
        assert!(html.contains("Sent from No Cost Nurse Referral Network"));
    }

    #[test]
    fn unsure_and_missing_consent_render() {
        let mut sub = submission();
        sub.medicaid_approved = MedicaidApproval::Unsure;
        sub.referral_consent = false;
        sub.referral_context = Some("Worked with her for years".into());
        let html = render_notification(&sub).html;
        assert!(html.contains("❓ Unsure"));
        assert!(html.contains("❌ Not Given"));
        assert!(html.contains("Worked with her for years"));
    }

    #[test]
    fn submitted_markup_is_escaped() {
        let mut sub = submission();
        sub.nominee_first_name = "<script>alert('x')</script>".into();
        sub.referral_context = Some("Tom & \"Jerry\"".into());
        let html = render_notification(&sub).html;
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
    }
}
