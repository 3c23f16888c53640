use actix_web::{web, HttpRequest, HttpResponse};
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::apis::referral_api::reply::{guarded, into_reply};
use crate::cores::referrals::intake::{IntakeError, IntakeService};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/.netlify/functions/submit-form")
            .route(web::route().to(function_submit)),
    );
}

// Serverless-function style invocation: the platform hands over method and raw body.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub async fn handle_function_event(event: &FunctionEvent, service: &IntakeService) -> FunctionResponse {
    handle_invocation(&event.http_method, event.body.as_deref().map(str::as_bytes), service).await
}

// Shared by decoded events and the HTTP route; the body stays raw bytes until the pipeline parses it.
async fn handle_invocation(method: &str, body: Option<&[u8]>, service: &IntakeService) -> FunctionResponse {
    let result = if method.eq_ignore_ascii_case("POST") {
        guarded(service.process(body.unwrap_or_default())).await
    } else {
        Err(IntakeError::MethodNotAllowed(method.to_string()))
    };

    let reply = into_reply(result);
    let body = serde_json::to_string(&reply.body)
        .unwrap_or_else(|_| r#"{"error":"Internal Server Error"}"#.to_string());
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    FunctionResponse { status_code: reply.status.as_u16(), headers, body }
}

async fn function_submit(
    req: HttpRequest,
    body: web::Bytes,
    service: web::Data<IntakeService>,
) -> HttpResponse {
    let body: Option<&[u8]> = if body.is_empty() { None } else { Some(&body[..]) };
    let response = handle_invocation(req.method().as_str(), body, &service).await;

    let mut builder = HttpResponse::build(
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    );
    for (name, value) in &response.headers {
        builder.insert_header((name.as_str(), value.as_str()));
    }
    builder.body(response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::configs::settings::MailConfig;
    use crate::cores::mailer::email_controller::{DeliveryReceipt, EmailSender, MailerError, OutboundEmail};
    use crate::cores::referrals::clock::Clock;
    use crate::cores::referrals::intake::Envelope;

    struct FixedClock;

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            1_700_000_100_000
        }
    }

    #[derive(Default)]
    struct CountingMailer(AtomicUsize);

    #[async_trait]
    impl EmailSender for CountingMailer {
        async fn send(&self, _email: &OutboundEmail) -> Result<DeliveryReceipt, MailerError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(DeliveryReceipt { id: Some("fn_1".into()) })
        }
    }

    fn service(mailer: Arc<CountingMailer>) -> IntakeService {
        IntakeService::new(Arc::new(FixedClock), mailer, Envelope::from(&MailConfig::default()))
    }

    fn event(method: &str, body: Option<&str>) -> FunctionEvent {
        FunctionEvent { http_method: method.into(), body: body.map(str::to_string) }
    }

    #[tokio::test]
    async fn non_post_is_rejected_before_parsing() {
        let mailer = Arc::new(CountingMailer::default());
        let response = handle_function_event(&event("GET", Some("{")), &service(mailer.clone())).await;
        assert_eq!(response.status_code, 405);
        assert_eq!(response.body, r#"{"error":"Method Not Allowed"}"#);
        assert_eq!(mailer.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_body_is_internal_error() {
        let mailer = Arc::new(CountingMailer::default());
        let response = handle_function_event(&event("POST", None), &service(mailer)).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, r#"{"error":"Internal Server Error"}"#);
    }

    #[tokio::test]
    async fn valid_event_is_relayed() {
        let mailer = Arc::new(CountingMailer::default());
        let body = r#"{"nominator_email":"pat@example.com","nominee_first_name":"Jane","nominee_phone":"4045551234","nominee_profession":"rn","form_timestamp":"1700000000000"}"#;
        let response = handle_function_event(&event("post", Some(body)), &service(mailer.clone())).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.body, r#"{"message":"Referral submitted successfully","id":"fn_1"}"#);
        assert_eq!(mailer.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_utf8_body_is_not_repaired() {
        let mailer = Arc::new(CountingMailer::default());
        let body = b"{\"nominator_email\":\"pat@example.com\",\"nominee_first_name\":\"J\xffne\",\"nominee_phone\":\"4045551234\"}";
        let response = handle_invocation("POST", Some(&body[..]), &service(mailer.clone())).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, r#"{"error":"Internal Server Error"}"#);
        assert_eq!(mailer.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn event_reads_platform_field_names() {
        let event: FunctionEvent = serde_json::from_str(r#"{"httpMethod":"POST","body":"{}"}"#).unwrap();
        assert_eq!(event.http_method, "POST");
        assert_eq!(event.body.as_deref(), Some("{}"));
    }
}
