use actix_web::HttpRequest;
use chrono::Local;

// Request details captured up front, so no handle to the request is kept while routing runs
#[derive(Debug, Clone)]
pub struct RequestLine {
    pub client_ip: String,
    pub method: String,
    pub uri: String,
    pub http_version: String,
    pub referer: String,
    pub user_agent: String,
}

impl RequestLine {
    pub fn from_request(req: &HttpRequest) -> Self {
        let header = |name: &str, default: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or(default)
                .to_string()
        };
        let client_ip = req.connection_info()
            .realip_remote_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        RequestLine {
            client_ip,
            method: req.method().as_str().to_string(),
            uri: req.uri().to_string(),
            http_version: format!("{:?}", req.version()),
            referer: header("Referer", "-"),
            user_agent: header("User-Agent", "unknown"),
        }
    }
}

// Combined log format line for the access log and error log
pub fn log_request(
    line: &RequestLine,
    status_code: u16,
    error_message: Option<&str>,
) -> String {
    let time = Local::now().format("%d/%b/%Y:%H:%M:%S %z");
    let RequestLine { client_ip, method, uri, http_version, referer, user_agent } = line;

    match error_message {
        // Error log format
        Some(msg) => format!(
            "{client_ip} - - [{time}] \"{method} {uri} {http_version}\" {status_code} \"{referer}\" \"{user_agent}\" \"{msg}\""
        ),
        // Access log format
        None => format!(
            "{client_ip} - - [{time}] \"{method} {uri} {http_version}\" {status_code} \"{referer}\" \"{user_agent}\""
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn access_line_carries_request_details() {
        let req = TestRequest::post()
            .uri("/submit-form")
            .insert_header(("User-Agent", "curl/8.0"))
            .insert_header(("Referer", "https://nocostnurse.com/"))
            .to_http_request();

        let line = log_request(&RequestLine::from_request(&req), 200, None);
        assert!(line.contains("\"POST /submit-form HTTP/1.1\" 200"));
        assert!(line.contains("\"https://nocostnurse.com/\" \"curl/8.0\""));
        assert!(line.ends_with("\"curl/8.0\""));
    }

    #[test]
    fn error_line_appends_message() {
        let req = TestRequest::get().uri("/submit-form").to_http_request();
        let line = log_request(&RequestLine::from_request(&req), 405, Some("Method Not Allowed"));
        assert!(line.contains("\"GET /submit-form HTTP/1.1\" 405 \"-\" \"unknown\""));
        assert!(line.ends_with("\"Method Not Allowed\""));
    }
}
