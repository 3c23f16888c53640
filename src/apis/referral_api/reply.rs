use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use futures::FutureExt;
use log::error;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use crate::apis::schemas::{ErrorResponse, ReplyBody, SubmitResponse};
use crate::cores::referrals::intake::{IntakeError, IntakeOutcome, SUCCESS_MESSAGE};

// Status and JSON body shared by both hosting adapters
#[derive(Debug, PartialEq, Eq)]
pub struct IntakeReply {
    pub status: StatusCode,
    pub body: ReplyBody,
}

impl IntakeReply {
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status).json(self.body)
    }
}

pub fn into_reply(result: Result<IntakeOutcome, IntakeError>) -> IntakeReply {
    match result {
        Ok(IntakeOutcome::Delivered { id }) => IntakeReply {
            status: StatusCode::OK,
            body: ReplyBody::Success(SubmitResponse { message: SUCCESS_MESSAGE.to_string(), id }),
        },
        Ok(IntakeOutcome::Filtered(_)) => IntakeReply {
            status: StatusCode::OK,
            body: ReplyBody::Success(SubmitResponse { message: SUCCESS_MESSAGE.to_string(), id: None }),
        },
        Err(err) => {
            if let IntakeError::Malformed(_) | IntakeError::Internal(_) = err {
                error!(target: "error_log", "Referral intake error: {}", err);
            }
            IntakeReply {
                status: StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body: ReplyBody::Failure(ErrorResponse { error: err.public_message().to_string() }),
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs the intake pipeline, turning a panic anywhere inside it into `IntakeError::Internal`.
pub async fn guarded<F>(fut: F) -> Result<IntakeOutcome, IntakeError>
where
    F: Future<Output = Result<IntakeOutcome, IntakeError>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => Err(IntakeError::Internal(format!("handler panicked: {}", panic_message(panic.as_ref())))),
    }
}
