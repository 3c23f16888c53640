use actix_web::{web, HttpResponse, Responder};

use crate::apis::referral_api::reply::{guarded, into_reply};
use crate::cores::referrals::intake::{IntakeError, IntakeService};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/submit-form")
            .route(web::post().to(submit_form))
            .default_service(web::route().to(method_not_allowed)),
    );
}

#[utoipa::path(
    post,
    path = "/submit-form",
    request_body = crate::cores::referrals::submission::RawSubmission,
    responses(
        (status = 200, body = crate::apis::schemas::SubmitResponse),
        (status = 400, body = crate::apis::schemas::ErrorResponse),
        (status = 405, body = crate::apis::schemas::ErrorResponse),
        (status = 500, body = crate::apis::schemas::ErrorResponse),
    )
)]

// The body is read raw so that an unparseable payload is answered by the pipeline, not the extractor.
pub async fn submit_form(
    body: web::Bytes,
    service: web::Data<IntakeService>,
) -> impl Responder {
    into_reply(guarded(service.process(&body)).await).into_response()
}

pub async fn method_not_allowed() -> HttpResponse {
    into_reply(Err(IntakeError::MethodNotAllowed(String::new()))).into_response()
}
