use actix_web::{get, web, Responder};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, body = String),
    )
)]

#[get("/health")]
pub async fn health() -> impl Responder {
    "OK"
}
