//! Shared test helpers for integration tests.
//!
//! [`MockApi`] is an in-process stand-in for the MentorHub API bound to a
//! random local port. It accepts exactly one access token at a time and
//! rotates it on every successful refresh.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::Barrier;

use mentorhub_client::{ApiClient, RouteNavigator};
use mentorhub_core::config::AppConfig;
use mentorhub_core::traits::SessionStore;
use mentorhub_session::keys;
use mentorhub_session::memory::MemorySessionStore;

/// Password accepted by the mock login endpoint.
pub const PASSWORD: &str = "correct-horse";
/// Access token the mock accepts before any refresh.
pub const INITIAL_TOKEN: &str = "access-0";
/// Refresh token issued at login.
pub const REFRESH_TOKEN: &str = "refresh-0";

/// How the refresh endpoint answers.
#[derive(Debug, Clone, Copy)]
pub enum RefreshMode {
    /// Issue a new access token.
    Succeed,
    /// Issue a new access token and a rotated refresh token.
    Rotate,
    /// Reject with the given status.
    Reject(u16),
}

/// Server-side state of the mock API.
pub struct MockState {
    valid_token: Mutex<String>,
    generation: AtomicUsize,
    mode: Mutex<RefreshMode>,
    refresh_delay: Mutex<Duration>,
    gate: Mutex<Option<Arc<Barrier>>>,
    /// Number of calls to the refresh endpoint.
    pub refresh_calls: AtomicUsize,
    /// Bodies posted to the refresh endpoint.
    pub refresh_bodies: Mutex<Vec<Value>>,
    /// Bearer token seen on each protected or public call, in arrival order.
    pub seen_tokens: Mutex<Vec<Option<String>>>,
}

impl MockState {
    fn new() -> Self {
        Self {
            valid_token: Mutex::new(INITIAL_TOKEN.to_string()),
            generation: AtomicUsize::new(0),
            mode: Mutex::new(RefreshMode::Succeed),
            refresh_delay: Mutex::new(Duration::ZERO),
            gate: Mutex::new(None),
            refresh_calls: AtomicUsize::new(0),
            refresh_bodies: Mutex::new(Vec::new()),
            seen_tokens: Mutex::new(Vec::new()),
        }
    }

    fn is_valid(&self, token: Option<&str>) -> bool {
        token == Some(self.valid_token.lock().unwrap().as_str())
    }

    fn record(&self, token: &Option<String>) {
        self.seen_tokens.lock().unwrap().push(token.clone());
    }
}

/// A running mock API.
pub struct MockApi {
    /// Base URL of the server, e.g. `http://127.0.0.1:41234`.
    pub base_url: String,
    /// Shared server state.
    pub state: Arc<MockState>,
}

impl MockApi {
    /// Start the mock on a random local port.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::new());

        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/refresh-token", post(refresh_token))
            .route("/communities", get(communities))
            .route("/always-401", get(always_unauthorized))
            .route("/health", get(health))
            .route("/boom", get(boom))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Mock API has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock API failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Change how the refresh endpoint answers.
    pub fn set_refresh_mode(&self, mode: RefreshMode) {
        *self.state.mode.lock().unwrap() = mode;
    }

    /// Hold every refresh response for `delay`.
    pub fn set_refresh_delay(&self, delay: Duration) {
        *self.state.refresh_delay.lock().unwrap() = delay;
    }

    /// Hold rejected `/communities` calls until `parties` of them arrived,
    /// so that they fail together.
    pub fn gate_unauthorized(&self, parties: usize) {
        *self.state.gate.lock().unwrap() = Some(Arc::new(Barrier::new(parties)));
    }

    /// The access token currently accepted.
    pub fn valid_token(&self) -> String {
        self.state.valid_token.lock().unwrap().clone()
    }

    /// Number of refresh calls received.
    pub fn refresh_calls(&self) -> usize {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }

    /// Bearer tokens seen so far.
    pub fn seen_tokens(&self) -> Vec<Option<String>> {
        self.state.seen_tokens.lock().unwrap().clone()
    }

    /// Refresh request bodies seen so far.
    pub fn refresh_bodies(&self) -> Vec<Value> {
        self.state.refresh_bodies.lock().unwrap().clone()
    }
}

/// A client wired to a mock API, an in-memory store, and a navigator.
pub struct TestClient {
    /// The client under test.
    pub client: ApiClient,
    /// Its session store.
    pub store: Arc<MemorySessionStore>,
    /// Its navigator.
    pub navigator: Arc<RouteNavigator>,
}

impl TestClient {
    /// Build a client for `api` that starts on route `path`.
    pub fn new(api: &MockApi, path: &str) -> Self {
        let mut config = AppConfig::default();
        config.api.base_url = api.base_url.clone();
        config.api.timeout_seconds = 5;

        let store = Arc::new(MemorySessionStore::new());
        let navigator = Arc::new(RouteNavigator::new(path));
        let client = ApiClient::new(&config, store.clone(), navigator.clone())
            .expect("Failed to build client");

        Self {
            client,
            store,
            navigator,
        }
    }

    /// Seed the store with a session. `None` leaves that key unset.
    pub async fn seed(&self, access: Option<&str>, refresh: Option<&str>, user_type: &str) {
        if let Some(access) = access {
            self.store
                .set(keys::ACCESS_TOKEN, access, Some(Duration::from_secs(3600)))
                .await
                .unwrap();
        }
        if let Some(refresh) = refresh {
            self.store.set(keys::REFRESH_TOKEN, refresh, None).await.unwrap();
        }
        self.store.set(keys::USER_ID, "user-42", None).await.unwrap();
        self.store.set(keys::USER_TYPE, user_type, None).await.unwrap();
    }

    /// Read one stored key.
    pub async fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key).await.unwrap()
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

fn unauthorized(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "statusCode": 401, "message": message })),
    )
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] != PASSWORD {
        return unauthorized("Invalid email or password");
    }

    let access = state.valid_token.lock().unwrap().clone();
    (
        StatusCode::OK,
        Json(json!({
            "accessToken": access,
            "refreshToken": REFRESH_TOKEN,
            "userId": "user-42",
            "userType": "Mentor",
            "email": body["email"],
        })),
    )
}

async fn refresh_token(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    state.refresh_bodies.lock().unwrap().push(body);

    let delay = *state.refresh_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let mode = *state.mode.lock().unwrap();
    if let RefreshMode::Reject(status) = mode {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, Json(json!({ "message": "Refresh token expired" })));
    }

    let generation = state.generation.fetch_add(1, Ordering::SeqCst) + 1;
    let access = format!("access-{generation}");
    *state.valid_token.lock().unwrap() = access.clone();

    let body = match mode {
        RefreshMode::Rotate => json!({
            "accessToken": access,
            "refreshToken": format!("refresh-{generation}"),
        }),
        _ => json!({ "accessToken": access }),
    };
    (StatusCode::OK, Json(body))
}

async fn communities(State(state): State<Arc<MockState>>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let token = bearer(&headers);
    state.record(&token);

    if state.is_valid(token.as_deref()) {
        return (
            StatusCode::OK,
            Json(json!({ "items": [{ "id": 1, "name": "Rustaceans" }] })),
        );
    }

    let gate = state.gate.lock().unwrap().clone();
    if let Some(gate) = gate {
        gate.wait().await;
    }
    unauthorized("jwt expired")
}

async fn always_unauthorized(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.record(&bearer(&headers));
    unauthorized("Forbidden resource")
}

async fn health(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Json<Value> {
    state.record(&bearer(&headers));
    Json(json!({ "status": "ok" }))
}

async fn boom() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "kaboom" })),
    )
}
