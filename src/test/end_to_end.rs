#[cfg(test)]
pub mod tests {
    use actix_web::{web, App, HttpServer};
    use actix_web::dev::ServerHandle;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::apis;
    use crate::middleware::access_log::AccessLog;
    use crate::cores::form::controller::FormController;
    use crate::cores::form::referral_form::referral_form;
    use crate::cores::form::state::{Effect, FormEvent, SubmitStatus, SUBMIT_FAILED_NOTICE};
    use crate::cores::form::transport::HttpSubmitTransport;
    use crate::test::support::{intake_service, FakeMailer, NOW};

    fn start_server(mailer: Arc<FakeMailer>) -> (SocketAddr, ServerHandle) {
        let data = web::Data::new(intake_service(NOW, mailer));
        let server = HttpServer::new(move || {
            App::new()
                .wrap(AccessLog::new())
                .app_data(data.clone())
                .configure(apis::configure)
        })
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);
        (addr, handle)
    }

    fn input(name: &str, value: &str) -> FormEvent {
        FormEvent::Input { name: name.into(), value: value.into() }
    }

    fn completed_form() -> FormController {
        let mut controller = FormController::new(referral_form(), NOW - 20_000);
        for event in [
            input("nominator_first_name", "Pat"),
            input("nominator_email", "pat@example.com"),
            input("nominator_phone", "678 555 0000"),
            FormEvent::Next,
            input("nominee_first_name", "Jane"),
            input("nominee_last_name", "Doe"),
            input("nominee_profession", "lpn"),
            input("nominee_phone", "4045551234"),
            FormEvent::Next,
            input("medicaid_approved", "yes"),
            FormEvent::Next,
            FormEvent::Toggle { name: "referral_consent".into(), checked: true },
        ] {
            controller.dispatch(event);
        }
        assert_eq!(controller.state().current_step, 4);
        controller
    }

    #[actix_rt::test]
    async fn completed_form_is_delivered_through_the_endpoint() {
        let mailer = FakeMailer::accepting();
        let (addr, handle) = start_server(mailer.clone());
        let transport = HttpSubmitTransport::for_site(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();

        let mut controller = completed_form();
        let effects = controller.submit(&transport).await;

        assert_eq!(effects.last(), Some(&Effect::ScrollToSuccess));
        assert_eq!(controller.state().status, SubmitStatus::Succeeded);
        assert_eq!(mailer.calls(), 1);
        assert_eq!(mailer.last_subject().as_deref(), Some("New Referral: Jane Doe (LPN)"));

        handle.stop(true).await;
    }

    #[actix_rt::test]
    async fn provider_failure_reaches_the_form_as_an_alert() {
        let mailer = FakeMailer::rejecting();
        let (addr, handle) = start_server(mailer.clone());
        let endpoint = format!("http://{}/.netlify/functions/submit-form", addr);
        let transport = HttpSubmitTransport::new(endpoint, Duration::from_secs(5)).unwrap();

        let mut controller = completed_form();
        let effects = controller.submit(&transport).await;

        assert_eq!(effects.last(), Some(&Effect::Alert(SUBMIT_FAILED_NOTICE)));
        assert_eq!(controller.state().status, SubmitStatus::Editing);
        assert_eq!(controller.state().value("nominee_phone"), Some("(404) 555-1234"));
        assert_eq!(mailer.calls(), 1);

        handle.stop(true).await;
    }
}
