use actix_service::{Service, Transform};
use actix_web::{dev::{ServiceRequest, ServiceResponse}, Error};
use std::task::{Context, Poll};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::{error, info};

use crate::utils::log::{log_request, RequestLine};

// One access log line per request, plus an error log line for 5xx responses
#[derive(Clone, Default)]
pub struct AccessLog;

impl AccessLog {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AccessLogMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AccessLogMiddleware { service })
    }
}

pub struct AccessLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let line = RequestLine::from_request(req.request());
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => {
                    let status = res.status();
                    info!(target: "access_log", "{}", log_request(&line, status.as_u16(), None));
                    if status.is_server_error() {
                        let reason = status.canonical_reason().unwrap_or("server error");
                        error!(target: "error_log", "{}", log_request(&line, status.as_u16(), Some(reason)));
                    }
                    Ok(res)
                }
                Err(err) => {
                    let status = err.as_response_error().status_code().as_u16();
                    error!(target: "error_log", "{}", log_request(&line, status, Some(&err.to_string())));
                    Err(err)
                }
            }
        })
    }
}
