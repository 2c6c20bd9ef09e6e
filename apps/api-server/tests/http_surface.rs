mod common;

use actix_web::http::{Method, StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use api_server::create_app;
use common::{Fixture, post_json};

#[actix_rt::test]
async fn test_health_and_descriptor() {
    let app = test::init_service(create_app(Fixture::default().state())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["environment"], "test");
    assert!(body["timestamp"].is_string());

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "BridgeMind Signup API");
    assert_eq!(body["endpoints"]["goalpostBeta"], "/api/goalpost-beta");
}

#[actix_rt::test]
async fn test_unknown_route_is_problem_404() {
    let app = test::init_service(create_app(Fixture::default().state())).await;

    let req = test::TestRequest::get()
        .uri("/api/nowhere")
        .insert_header(("X-Request-ID", "trace-42"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers().get("x-request-id").unwrap(), "trace-42");

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["instance"], "/api/nowhere");
    assert_eq!(body["requestId"], "trace-42");
}

#[actix_rt::test]
async fn test_malformed_json_is_400() {
    let app = test::init_service(create_app(Fixture::default().state())).await;

    let req = test::TestRequest::post()
        .uri("/api/beta-signups")
        .insert_header(header::ContentType::json())
        .set_payload("{\"email\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["instance"], "/api/beta-signups");
    assert!(body["requestId"].is_string());
}

#[actix_rt::test]
async fn test_cors_allows_configured_origin_only() {
    let state = Fixture {
        allowed_origin: Some("https://bridgemind.ai".to_string()),
        ..Fixture::default()
    }
    .state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/competition-signups")
        .insert_header((header::ORIGIN, "https://bridgemind.ai"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://bridgemind.ai"
    );

    let req = test::TestRequest::get()
        .uri("/api/beta-signups")
        .insert_header((header::ORIGIN, "https://evil.example"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let req = post_json(
        "/api/competition-signups",
        json!({ "email": "dee@example.com", "acceptedRules": true }),
    )
    .insert_header((header::ORIGIN, "https://bridgemind.ai"))
    .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://bridgemind.ai"
    );
}

#[actix_rt::test]
async fn test_stats_start_empty_then_count_exactly() {
    let app = test::init_service(create_app(Fixture::default().state())).await;

    let req = test::TestRequest::get().uri("/api/beta-signups/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body,
        json!({ "total": 0, "byReferrer": [], "byExperience": [], "byGoal": [] })
    );

    let req = test::TestRequest::get()
        .uri("/api/competition-signups/stats")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["recentCount"], 0);

    for (email, referrer) in [
        ("a@example.com", Some("twitter")),
        ("b@example.com", Some("twitter")),
        ("c@example.com", None),
    ] {
        let mut body = json!({ "email": email });
        if let Some(r) = referrer {
            body["referrer"] = json!(r);
        }
        let req = post_json("/api/beta-signups", body).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }
    for campaign in ["1k-subs", "spring-jam"] {
        let req = post_json(
            "/api/competition-signups",
            json!({ "email": "e@example.com", "acceptedRules": true, "campaign": campaign }),
        )
        .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/beta-signups/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 3);
    let referrers = body["byReferrer"].as_array().unwrap();
    assert!(referrers.contains(&json!({ "key": "twitter", "count": 2 })));
    assert!(referrers.contains(&json!({ "key": null, "count": 1 })));

    let req = test::TestRequest::get()
        .uri("/api/competition-signups/stats")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["recentCount"], 2);
    assert_eq!(body["byCampaign"].as_array().unwrap().len(), 2);
    let daily = body["dailySignups"].as_array().unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0]["count"], 2);
}
