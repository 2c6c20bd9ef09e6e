//! CORS middleware - single allowed origin, or `*` for any.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::{
        Method,
        header::{self, HeaderMap, HeaderValue},
    },
};
use futures::future::LocalBoxFuture;
use signup_shared::ErrorResponse;

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// CORS middleware factory.
///
/// Requests without an `Origin` header pass untouched. A matching origin
/// gets the `Access-Control-Allow-*` headers, and preflight `OPTIONS`
/// requests are answered here with 204. Any other origin is refused
/// with 403 before reaching a handler.
#[derive(Clone)]
pub struct Cors {
    allowed_origin: Rc<str>,
}

impl Cors {
    pub fn new(allowed_origin: &str) -> Self {
        Self {
            allowed_origin: Rc::from(allowed_origin),
        }
    }

    fn allows(&self, origin: &str) -> bool {
        &*self.allowed_origin == "*" || origin == &*self.allowed_origin
    }
}

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CorsService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsService {
            service,
            cors: self.clone(),
        }))
    }
}

pub struct CorsService<S> {
    service: S,
    cors: Cors,
}

fn apply_headers(headers: &mut HeaderMap, origin: &HeaderValue) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
}

impl<S, B> Service<ServiceRequest> for CorsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let origin = req.headers().get(header::ORIGIN).cloned();
        let is_preflight = req.method() == Method::OPTIONS;

        let allowed = match &origin {
            None => true,
            Some(value) => value.to_str().map(|o| self.cors.allows(o)).unwrap_or(false),
        };

        if !allowed {
            tracing::warn!(origin = ?origin, path = %req.path(), "Origin rejected by CORS");

            let error = ErrorResponse::forbidden("Not allowed by CORS").with_instance(req.path());
            let response = HttpResponse::Forbidden().json(error);
            let (http_req, _payload) = req.into_parts();
            let srv_response = ServiceResponse::new(http_req, response);

            return Box::pin(async move { Ok(srv_response.map_into_right_body()) });
        }

        if is_preflight {
            let mut response = HttpResponse::NoContent().finish();
            if let Some(origin) = &origin {
                apply_headers(response.headers_mut(), origin);
            }
            let (http_req, _payload) = req.into_parts();
            let srv_response = ServiceResponse::new(http_req, response);

            return Box::pin(async move { Ok(srv_response.map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            if let Some(origin) = &origin {
                apply_headers(res.headers_mut(), origin);
            }
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_rt::test]
    async fn test_cors_decisions() {
        let app = test::init_service(
            App::new()
                .wrap(Cors::new("https://bridgemind.ai"))
                .route("/ping", web::get().to(ok)),
        )
        .await;

        // No origin: passes without CORS headers
        let res = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(res.status(), 200);
        assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

        // Matching origin: headers echoed
        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://bridgemind.ai"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://bridgemind.ai"
        );

        // Preflight
        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://bridgemind.ai"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 204);

        // Foreign origin
        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 403);
    }

    #[actix_rt::test]
    async fn test_wildcard_allows_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(Cors::new("*"))
                .route("/ping", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://anywhere.example"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
    }
}
