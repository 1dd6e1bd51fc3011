mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use common::{TestApp, generate_unique_email, test_server_config};
use http_body_util::BodyExt;
use snippetbox::router::with_global_layers;
use snippetbox_config::ServerConfig;
use tower::ServiceExt;

const SECURITY_HEADERS: [(&str, &str); 5] = [
    (
        "content-security-policy",
        "default-src 'self'; style-src 'self' fonts.googleapis.com; font-src fonts.gstatic.com",
    ),
    ("referrer-policy", "origin-when-cross-origin"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "deny"),
    ("x-xss-protection", "0"),
];

async fn panicking_handler() -> &'static str {
    panic!("handler exploded")
}

async fn slow_handler() -> &'static str {
    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    "too late"
}

fn global_config(debug: bool) -> ServerConfig {
    ServerConfig {
        debug,
        request_timeout_secs: 1,
        ..test_server_config()
    }
}

async fn call(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let mut app = TestApp::new();

    for path in ["/", "/ping", "/no/such/page", "/snippet/create"] {
        let response = app.get(path).await;
        for (name, value) in SECURITY_HEADERS {
            assert_eq!(response.header(name), Some(value), "{name} on {path}");
        }
    }
}

#[tokio::test]
async fn test_ping() {
    let mut app = TestApp::new();

    let response = app.get("/ping").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "OK");
    assert!(response.set_cookies().is_empty());
    assert!(app.sessions.is_empty().await);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut app = TestApp::new();

    let response = app.get("/missing").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, "Not Found");
}

#[tokio::test]
async fn test_static_files_are_served() {
    let mut app = TestApp::new();

    let response = app.get("/static/css/main.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookies().is_empty());
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let mut app = TestApp::new();

    let response = app.get("/user/login").await;

    let cookie = response
        .set_cookies()
        .into_iter()
        .find(|c| c.name() == "session")
        .unwrap();
    assert_eq!(cookie.value().len(), 43);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(cookie::SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(
        cookie.max_age(),
        Some(cookie::time::Duration::seconds(app.session_config.lifetime_secs))
    );
    assert_eq!(response.header("vary"), Some("Cookie"));
}

#[tokio::test]
async fn test_unmodified_session_sets_no_cookie() {
    let mut app = TestApp::new();

    // The first page view issues a CSRF token, which writes the session.
    let response = app.get("/about").await;
    assert_eq!(response.set_cookies().len(), 1);

    let token = app.session_token().map(str::to_string);
    let response = app.get("/about").await;
    assert!(response.set_cookies().is_empty());
    assert_eq!(app.session_token().map(str::to_string), token);
}

#[tokio::test]
async fn test_unknown_session_cookie_starts_fresh_session() {
    let mut app = TestApp::new();
    app.set_session_token(Some("not-a-real-token".to_string()));

    let response = app.get("/user/login").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_ne!(app.session_token(), Some("not-a-real-token"));
    assert!(app.session_is_stored().await);
}

#[tokio::test]
async fn test_csrf_token_accepted_from_header() {
    let mut app = TestApp::new();
    app.login_new_user(&generate_unique_email()).await;

    let page = app.get("/").await;
    let token = page.csrf_token().unwrap();
    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/user/logout")
                .header("x-csrf-token", token),
            Body::empty(),
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_csrf_token_stable_within_session() {
    let mut app = TestApp::new();

    let first = app.get("/user/login").await.csrf_token().unwrap();
    let second = app.get("/user/signup").await.csrf_token().unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_panic_is_recovered() {
    let router = with_global_layers(
        Router::new().route("/boom", get(panicking_handler)),
        &global_config(false),
    );

    let (status, headers, body) = call(router, "/boom").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(headers[header::CONNECTION], "close");
    for (name, value) in SECURITY_HEADERS {
        assert_eq!(headers.get(name).and_then(|v| v.to_str().ok()), Some(value), "{name}");
    }
    assert_eq!(body, "Internal Server Error");
}

#[tokio::test]
async fn test_panic_message_shown_in_debug_mode() {
    let router = with_global_layers(
        Router::new().route("/boom", get(panicking_handler)),
        &global_config(true),
    );

    let (status, _, body) = call(router, "/boom").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("handler exploded"));
}

#[tokio::test]
async fn test_server_after_panic_keeps_serving() {
    let router = with_global_layers(
        Router::new()
            .route("/boom", get(panicking_handler))
            .route("/ok", get(|| async { "fine" })),
        &global_config(false),
    );

    call(router.clone(), "/boom").await;
    let (status, _, body) = call(router, "/ok").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "fine");
}

#[tokio::test(start_paused = true)]
async fn test_slow_request_times_out() {
    let router = with_global_layers(
        Router::new().route("/slow", get(slow_handler)),
        &global_config(false),
    );

    let (status, headers, _) = call(router, "/slow").await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(headers["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn test_debug_mode_exposes_error_chain() {
    let mut app = TestApp::with_server_config(ServerConfig {
        debug: true,
        ..test_server_config()
    });
    app.login_new_user(&generate_unique_email()).await;
    app.users.set_unavailable(true);

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("pool timed out"));
}

#[tokio::test]
async fn test_production_mode_hides_error_chain() {
    let mut app = TestApp::new();
    app.login_new_user(&generate_unique_email()).await;
    app.users.set_unavailable(true);

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.body.contains("pool timed out"));
}
