//! HTTP tests for the email OTP routes

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};

use otp_api::{app, build_state, handlers, DefaultAppState};
use otp_core::domain::{Identity, RealmRef};
use otp_core::services::RateLimiter;
use otp_infra::{InMemoryIdentityStore, MockEmailSender};
use otp_shared::config::{AppConfig, RateLimitConfig};
use otp_shared::OtpResponse;

struct Fixture {
    state: web::Data<DefaultAppState>,
    store: Arc<InMemoryIdentityStore>,
    sender: MockEmailSender,
}

async fn fixture(rate_limit: RateLimitConfig) -> Fixture {
    let store = Arc::new(InMemoryIdentityStore::new());
    let acme = RealmRef::new("acme").with_display_name("Acme Corp");
    store
        .insert_identity(
            Identity::new("u-1", acme.clone(), "jdoe")
                .with_email("john.doe@example.com")
                .with_first_name("John"),
        )
        .await;
    store
        .insert_identity(Identity::new("u-2", acme, "svc-reporting"))
        .await;
    store.register_client("acme", "web-app", true).await;
    store.register_client("acme", "legacy-portal", false).await;

    let mut config = AppConfig::default();
    config.rate_limit = rate_limit;

    let sender = MockEmailSender::new();
    let limiter = Arc::new(RateLimiter::with_system_clock(config.rate_limit.clone()));
    let state = web::Data::new(build_state(
        &config,
        store.clone(),
        Arc::new(sender.clone()),
        limiter,
    ));

    Fixture {
        state,
        store,
        sender,
    }
}

macro_rules! service {
    ($fixture:expr) => {
        test::init_service(
            App::new()
                .configure(app::configure($fixture.state.clone()))
                .default_service(web::route().to(handlers::not_found)),
        )
        .await
    };
}

fn code_in(body: &str) -> String {
    body.split_whitespace()
        .find(|word| word.len() == 6 && word.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .expect("code in email body")
}

#[actix_web::test]
async fn test_send_returns_masked_email() {
    let fixture = fixture(RateLimitConfig::default()).await;
    let app = service!(fixture);

    let req = test::TestRequest::post()
        .uri("/realms/acme/email-otp/send")
        .set_json(serde_json::json!({ "email": "john.doe@example.com", "clientId": "web-app" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: OtpResponse = test::read_body_json(resp).await;
    assert!(body.success);
    assert_eq!(body.message, "OTP sent successfully to jo***@example.com");
    assert_eq!(body.error_code, None);
    assert_eq!(fixture.sender.get_message_count(), 1);
}

#[actix_web::test]
async fn test_send_and_verify_round_trip() {
    let fixture = fixture(RateLimitConfig::default()).await;
    let app = service!(fixture);

    let req = test::TestRequest::post()
        .uri("/realms/acme/email-otp/send")
        .set_json(serde_json::json!({ "userId": "u-1" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let message = fixture
        .sender
        .last_message_to("john.doe@example.com")
        .expect("message recorded");
    let code = code_in(&message.text_body);

    let req = test::TestRequest::post()
        .uri("/realms/acme/email-otp/verify")
        .set_json(serde_json::json!({ "email": "john.doe@example.com", "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: OtpResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "Email verified successfully");
    assert!(fixture.store.identity("u-1").await.unwrap().email_verified);

    // The code is consumed
    let req = test::TestRequest::post()
        .uri("/realms/acme/email-otp/verify")
        .set_json(serde_json::json!({ "userId": "u-1", "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: OtpResponse = test::read_body_json(resp).await;
    assert_eq!(body.error_code.as_deref(), Some("INVALID_CODE"));
    assert_eq!(body.message, "Invalid or expired OTP code");
}

#[actix_web::test]
async fn test_send_error_statuses() {
    let fixture = fixture(RateLimitConfig::default()).await;
    let app = service!(fixture);

    let cases = [
        (serde_json::json!({}), StatusCode::BAD_REQUEST, "MISSING_IDENTIFIER"),
        (serde_json::json!({ "email": "  " }), StatusCode::BAD_REQUEST, "MISSING_IDENTIFIER"),
        (serde_json::json!({ "userId": "nobody" }), StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
        (serde_json::json!({ "userId": "u-2" }), StatusCode::BAD_REQUEST, "NO_EMAIL"),
        (
            serde_json::json!({ "userId": "u-1", "clientId": "legacy-portal" }),
            StatusCode::BAD_REQUEST,
            "INVALID_CLIENT",
        ),
        (
            serde_json::json!({ "userId": "u-1", "clientId": "unknown" }),
            StatusCode::BAD_REQUEST,
            "INVALID_CLIENT",
        ),
        (serde_json::json!({ "email": "not-an-email" }), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
    ];

    for (payload, status, code) in cases {
        let req = test::TestRequest::post()
            .uri("/realms/acme/email-otp/send")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status, "payload {}", payload);

        let body: OtpResponse = test::read_body_json(resp).await;
        assert!(!body.success);
        assert_eq!(body.error_code.as_deref(), Some(code), "payload {}", payload);
    }

    assert_eq!(fixture.sender.get_message_count(), 0);
}

#[actix_web::test]
async fn test_user_in_other_realm_is_not_found() {
    let fixture = fixture(RateLimitConfig::default()).await;
    let app = service!(fixture);

    let req = test::TestRequest::post()
        .uri("/realms/globex/email-otp/send")
        .set_json(serde_json::json!({ "userId": "u-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_verify_requires_code() {
    let fixture = fixture(RateLimitConfig::default()).await;
    let app = service!(fixture);

    for payload in [
        serde_json::json!({ "userId": "u-1" }),
        serde_json::json!({ "userId": "u-1", "code": "" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/realms/acme/email-otp/verify")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: OtpResponse = test::read_body_json(resp).await;
        assert_eq!(body.error_code.as_deref(), Some("MISSING_CODE"));
    }
}

#[actix_web::test]
async fn test_malformed_body_is_validation_error() {
    let fixture = fixture(RateLimitConfig::default()).await;
    let app = service!(fixture);

    let req = test::TestRequest::post()
        .uri("/realms/acme/email-otp/send")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: OtpResponse = test::read_body_json(resp).await;
    assert_eq!(body.error_code.as_deref(), Some("VALIDATION_ERROR"));
}

#[actix_web::test]
async fn test_send_rate_limit() {
    let limits = RateLimitConfig {
        max_send_attempts: 2,
        ..RateLimitConfig::default()
    };
    let fixture = fixture(limits).await;
    let app = service!(fixture);

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/realms/acme/email-otp/send")
            .set_json(serde_json::json!({ "userId": "u-1" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    // Same identity reached by email shares the window
    let req = test::TestRequest::post()
        .uri("/realms/acme/email-otp/send")
        .set_json(serde_json::json!({ "email": "john.doe@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: OtpResponse = test::read_body_json(resp).await;
    assert_eq!(body.error_code.as_deref(), Some("RATE_LIMIT_EXCEEDED"));
    assert_eq!(body.message, "Too many attempts. Please try again later.");
    assert_eq!(fixture.sender.get_message_count(), 2);
}

#[actix_web::test]
async fn test_verify_rate_limit() {
    let limits = RateLimitConfig {
        max_verify_attempts: 3,
        ..RateLimitConfig::default()
    };
    let fixture = fixture(limits).await;
    let app = service!(fixture);

    let mut statuses = Vec::new();
    for _ in 0..4 {
        let req = test::TestRequest::post()
            .uri("/realms/acme/email-otp/verify")
            .set_json(serde_json::json!({ "userId": "u-1", "code": "000000" }))
            .to_request();
        statuses.push(test::call_service(&app, req).await.status());
    }

    assert_eq!(
        statuses,
        vec![
            StatusCode::BAD_REQUEST,
            StatusCode::BAD_REQUEST,
            StatusCode::BAD_REQUEST,
            StatusCode::TOO_MANY_REQUESTS,
        ]
    );
}

#[actix_web::test]
async fn test_delivery_failure_is_send_failed() {
    let fixture = fixture(RateLimitConfig::default()).await;
    fixture.sender.set_simulate_failure(true);
    let app = service!(fixture);

    let req = test::TestRequest::post()
        .uri("/realms/acme/email-otp/send")
        .set_json(serde_json::json!({ "userId": "u-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: OtpResponse = test::read_body_json(resp).await;
    assert_eq!(body.error_code.as_deref(), Some("SEND_FAILED"));
}

#[actix_web::test]
async fn test_health_endpoints() {
    let fixture = fixture(RateLimitConfig::default()).await;
    let app = service!(fixture);

    let req = test::TestRequest::get()
        .uri("/realms/acme/email-otp/health")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: OtpResponse = test::read_body_json(resp).await;
    assert!(body.success);
    assert_eq!(body.message, "LUSATEK Email OTP service is running");

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "email-otp");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let fixture = fixture(RateLimitConfig::default()).await;
    let app = service!(fixture);

    let req = test::TestRequest::get().uri("/realms/acme/other").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
