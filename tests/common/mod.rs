#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use cookie::Cookie;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use snippetbox::router::init_router;
use snippetbox::state::AppState;
use snippetbox_config::{ServerConfig, SessionConfig};
use snippetbox_models::{MemorySnippetStore, MemoryUserStore, UserId};
use snippetbox_session::{MemoryStore, SessionManager, token::hash_token};

pub const TEST_PASSWORD: &str = "pa$$word123";

pub fn test_server_config() -> ServerConfig {
    ServerConfig {
        debug: false,
        ..ServerConfig::default()
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn set_cookies(&self) -> Vec<Cookie<'static>> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| Cookie::parse(v.to_string()).ok())
            .collect()
    }

    /// Value of the hidden `csrf_token` input in the rendered page.
    pub fn csrf_token(&self) -> Option<String> {
        let marker = r#"name="csrf_token" value=""#;
        let start = self.body.find(marker)? + marker.len();
        let end = self.body[start..].find('"')? + start;
        Some(self.body[start..end].to_string())
    }
}

/// The full application over in-memory stores, driven like a browser that
/// keeps the session cookie between requests.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserStore>,
    pub snippets: Arc<MemorySnippetStore>,
    pub sessions: Arc<MemoryStore>,
    pub session_config: SessionConfig,
    session_cookie: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_server_config(test_server_config())
    }

    pub fn with_server_config(config: ServerConfig) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let snippets = Arc::new(MemorySnippetStore::new());
        let sessions = Arc::new(MemoryStore::new());
        let session_config = SessionConfig::default();

        let state = AppState::new(
            users.clone(),
            snippets.clone(),
            SessionManager::new(sessions.clone(), &session_config),
            config,
        );

        Self {
            router: init_router(state),
            users,
            snippets,
            sessions,
            session_config,
            session_cookie: None,
        }
    }

    /// Raw session token currently held by the client.
    pub fn session_token(&self) -> Option<&str> {
        self.session_cookie.as_deref()
    }

    pub fn set_session_token(&mut self, token: Option<String>) {
        self.session_cookie = token;
    }

    /// Whether the server still holds a record for the client's token.
    pub async fn session_is_stored(&self) -> bool {
        match &self.session_cookie {
            Some(token) => self.sessions.contains(&hash_token(token)).await,
            None => false,
        }
    }

    pub async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let builder = match &self.session_cookie {
            Some(token) => builder.header(
                header::COOKIE,
                format!("{}={}", self.session_config.cookie_name, token),
            ),
            None => builder,
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let response = TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        };

        for cookie in response.set_cookies() {
            if cookie.name() != self.session_config.cookie_name {
                continue;
            }
            let removed = cookie.value().is_empty()
                || cookie.max_age().is_some_and(|age| age.is_zero());
            self.session_cookie = if removed {
                None
            } else {
                Some(cookie.value().to_string())
            };
        }

        response
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::builder().method("GET").uri(uri), Body::empty())
            .await
    }

    /// Posts an urlencoded form exactly as given, without adding a CSRF token.
    pub async fn post_raw(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(fields).unwrap();
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(body),
        )
        .await
    }

    /// Fetches `form_uri` for a CSRF token, then posts `fields` with it to `uri`.
    pub async fn post_form(
        &mut self,
        form_uri: &str,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> TestResponse {
        let page = self.get(form_uri).await;
        let token = page
            .csrf_token()
            .unwrap_or_else(|| panic!("no csrf token on {form_uri}"));

        let mut fields = fields.to_vec();
        fields.push(("csrf_token", &token));
        self.post_raw(uri, &fields).await
    }

    pub async fn create_user(&self, name: &str, email: &str) -> UserId {
        self.users.insert(name, email, TEST_PASSWORD).await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> TestResponse {
        self.post_form(
            "/user/login",
            "/user/login",
            &[("email", email), ("password", password)],
        )
        .await
    }

    /// Creates a user and logs in as them.
    pub async fn login_new_user(&mut self, email: &str) -> UserId {
        let id = self.create_user("Alice", email).await;
        let response = self.login(email, TEST_PASSWORD).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        id
    }

    pub async fn logout(&mut self) -> TestResponse {
        self.post_form("/", "/user/logout", &[]).await
    }
}

pub fn generate_unique_email() -> String {
    format!("user-{}@example.com", uuid::Uuid::new_v4())
}
