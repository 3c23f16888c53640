use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use log::info;
use log4rs::init_file;
use std::sync::Arc;
use std::{fs::File, io::BufReader};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use referral_intake::apis;
use referral_intake::apis::api_doc::ApiDoc;
use referral_intake::configs::settings::Config;
use referral_intake::cores::mailer::resend::ResendClient;
use referral_intake::cores::referrals::clock::SystemClock;
use referral_intake::cores::referrals::intake::{Envelope, IntakeService};
use referral_intake::middleware::access_log::AccessLog;

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

fn load_tls_config(config: &Config) -> std::io::Result<rustls::ServerConfig> {
    let mut certs_file = BufReader::new(File::open(&config.server_cert_file)?);
    let mut key_file = BufReader::new(File::open(&config.key_file)?);

    let tls_certs = rustls_pemfile::certs(&mut certs_file)
        .collect::<Result<Vec<_>, _>>()?;
    let tls_key = rustls_pemfile::private_key(&mut key_file)?
        .ok_or_else(|| startup_error("TLS setup failed", "no private key found"))?;

    rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(tls_certs, tls_key)
        .map_err(|e| startup_error("TLS setup failed", e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load_config().map_err(|e| startup_error("Config load failed", e))?;
    init_file(&config.log_config, Default::default()).map_err(|e| startup_error("Logger setup failed", e))?;

    // The provider client lives for the whole process and is handed to the handlers.
    let api_key = config.resend_api_key().map_err(|e| startup_error("Mail setup failed", e))?;
    let mailer = ResendClient::new(&config.mail, api_key).map_err(|e| startup_error("Mail setup failed", e))?;
    let intake = web::Data::new(IntakeService::new(
        Arc::new(SystemClock),
        Arc::new(mailer),
        Envelope::from(&config.mail),
    ));

    let address = (config.host.clone(), config.port);
    info!("Starting server on {}:{}", address.0, address.1);

    let cors_origins = config.cors_allowed_origins.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["POST", "OPTIONS"])
            .allowed_headers(vec!["Content-Type"])
            .max_age(3600);
        if cors_origins.is_empty() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        App::new()
            .wrap(cors)
            .wrap(AccessLog::new())
            .app_data(intake.clone())
            .configure(apis::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()))
    });

    if config.tls_enabled {
        let tls_config = load_tls_config(&config)?;
        server.bind_rustls_0_23(address, tls_config)?.run().await
    } else {
        server.bind(address)?.run().await
    }
}
