pub mod api_doc;
pub mod health;
pub mod referral_api;
pub mod schemas;

use actix_web::web;

// Every route of the service, shared by the server and the HTTP tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(referral_api::submit::configure)
        .configure(referral_api::function::configure);
}
