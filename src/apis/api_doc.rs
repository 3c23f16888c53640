use utoipa::OpenApi;

use crate::apis::health;
use crate::apis::referral_api::submit;
use crate::apis::schemas::{ErrorResponse, SubmitResponse};
use crate::cores::referrals::submission::RawSubmission;


#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        submit::submit_form,
    ),
    components(
        schemas(RawSubmission, SubmitResponse, ErrorResponse)
    )
)]

pub struct ApiDoc;
