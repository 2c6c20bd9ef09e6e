//! Client context extractor.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};

/// Identity bucket shared by clients whose address cannot be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Who sent a request, as far as the headers and socket tell.
///
/// Use this in handlers that consult the admission gate:
/// ```ignore
/// async fn create(client: ClientContext) -> impl Responder {
///     format!("Hello, {}!", client.ip)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    /// First `X-Forwarded-For` hop, else the peer address, else `unknown`.
    pub ip: String,
    pub origin: Option<String>,
    pub referer: Option<String>,
}

impl ClientContext {
    pub fn from_request_head(req: &HttpRequest) -> Self {
        let header_str = |name: header::HeaderName| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let forwarded = req
            .headers()
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .and_then(|chain| chain.split(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty())
            .map(str::to_string);

        let ip = forwarded
            .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

        Self {
            ip,
            origin: header_str(header::ORIGIN),
            referer: header_str(header::REFERER),
        }
    }
}

impl FromRequest for ClientContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_request_head(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_first_forwarded_hop_wins() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", " 203.0.113.7 , 10.0.0.1"))
            .peer_addr("127.0.0.1:5000".parse().unwrap())
            .to_http_request();

        assert_eq!(ClientContext::from_request_head(&req).ip, "203.0.113.7");
    }

    #[test]
    fn test_falls_back_to_peer_then_unknown() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.1:5000".parse().unwrap())
            .to_http_request();
        assert_eq!(ClientContext::from_request_head(&req).ip, "192.0.2.1");

        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", " , "))
            .to_http_request();
        assert_eq!(ClientContext::from_request_head(&req).ip, UNKNOWN_CLIENT);
    }

    #[test]
    fn test_captures_origin_and_referer() {
        let req = TestRequest::default()
            .insert_header((header::ORIGIN, "https://bridgemind.ai"))
            .insert_header((header::REFERER, "https://bridgemind.ai/compete"))
            .to_http_request();

        let client = ClientContext::from_request_head(&req);
        assert_eq!(client.origin.as_deref(), Some("https://bridgemind.ai"));
        assert_eq!(client.referer.as_deref(), Some("https://bridgemind.ai/compete"));
    }
}
