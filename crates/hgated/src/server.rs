//! HTTP adapter: thin translation between JSON bodies and engine calls
//!
//! The adapter must not weaken the engine's contract: a decoy login and a
//! real login serialize to byte-identical response shapes, and the internal
//! `authentic` flag never reaches a body. Decoy visibility is metrics-only.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use prometheus_client::registry::Registry;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use hgate_core::config::HgateConfig;
use hgate_core::{CardBrand, HgateError, Identity};
use hgate_crypto::HashParams;
use hgate_decoy::DecoyPolicy;
use hgate_engine::AuthEngine;
use hgate_store::{CredentialStore, JsonFileStore};

use crate::metrics::Metrics;

pub struct AppState<S> {
    pub engine: Arc<AuthEngine<S>>,
    pub metrics: Metrics,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CardInfoPayload {
    card_number: String,
    cvv: String,
    expiration_date: String,
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    full_name: String,
    email: String,
    password: SecretString,
    card_info: CardInfoPayload,
    #[serde(default)]
    balance: Option<String>,
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    success: bool,
    username: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: SecretString,
}

/// The one login response shape, for real and decoy logins alike.
#[derive(Debug, Serialize)]
struct LoginResponse {
    success: bool,
    user: Identity,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub fn router<S: CredentialStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/register", post(register_handler::<S>))
        .route("/login", post(login_handler::<S>))
        .route("/healthz", get(|| async { (StatusCode::OK, "ok") }))
        .with_state(state)
}

async fn register_handler<S: CredentialStore + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let identity = Identity {
        account_id: uuid::Uuid::new_v4().to_string(),
        full_name: req.full_name,
        email: req.email.clone(),
        card_brand: CardBrand::detect(&req.card_info.card_number),
        card_number: req.card_info.card_number,
        cvv: req.card_info.cvv,
        expiration_date: req.card_info.expiration_date,
        balance: req.balance.unwrap_or_else(|| "0.00 RON".into()),
    };

    match state.engine.register(&req.email, &req.password, identity).await {
        Ok(()) => {
            state.metrics.registrations_total.inc();
            (
                StatusCode::CREATED,
                Json(RegisterResponse {
                    success: true,
                    username: req.email,
                }),
            )
                .into_response()
        }
        Err(HgateError::AlreadyExists) => (
            StatusCode::CONFLICT,
            Json(ErrorBody {
                error: "user already exists".into(),
            }),
        )
            .into_response(),
        Err(e) => internal_error("register", e),
    }
}

async fn login_handler<S: CredentialStore + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<LoginRequest>,
) -> Response {
    match state.engine.login(&req.email, &req.password).await {
        // `login.authentic` is deliberately dropped here.
        Ok(login) => {
            state.metrics.logins_total.inc();
            (
                StatusCode::OK,
                Json(LoginResponse {
                    success: true,
                    user: login.identity,
                }),
            )
                .into_response()
        }
        Err(HgateError::UserNotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: "user not found".into(),
            }),
        )
            .into_response(),
        Err(e) => internal_error("login", e),
    }
}

fn internal_error(op: &str, e: HgateError) -> Response {
    error!("{op} failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "internal error".into(),
        }),
    )
        .into_response()
}

pub async fn run(config: HgateConfig) -> Result<()> {
    let store = JsonFileStore::open(&config.store.path)?;

    let mut registry = Registry::default();
    let metrics = Metrics::new(&mut registry);

    let decoy_counter = metrics.decoy_logins_total.clone();
    let engine = AuthEngine::new(store)
        .with_hash_params(HashParams {
            mem_cost_kib: config.auth.argon2_mem_cost_kib,
            time_cost: config.auth.argon2_time_cost,
            parallelism: config.auth.argon2_parallelism,
        })
        .with_login_delay(Duration::from_millis(config.auth.login_delay_ms))
        .with_decoy_policy(DecoyPolicy::from(&config.decoy))
        .with_alert(Box::new(move |_| {
            decoy_counter.inc();
        }));

    if let Some(addr) = config.server.metrics_addr.clone() {
        let registry = Arc::new(registry);
        tokio::spawn(async move {
            if let Err(e) = crate::metrics::serve(addr, registry).await {
                error!("metrics server failed: {e}");
            }
        });
    }

    let state = AppState {
        engine: Arc::new(engine),
        metrics,
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .map_err(|e| anyhow::anyhow!("bind {}: {e}", config.server.listen))?;

    info!(addr = %config.server.listen, "hgated: listening on /register, /login, /healthz");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("http server: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use hgate_store::MemoryStore;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let engine = AuthEngine::new(MemoryStore::new())
            .with_hash_params(HashParams {
                mem_cost_kib: 1024,
                time_cost: 1,
                parallelism: 1,
            })
            .with_login_delay(Duration::from_millis(10));

        let mut registry = Registry::default();
        let state = AppState {
            engine: Arc::new(engine),
            metrics: Metrics::new(&mut registry),
        };
        router(state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn register_body() -> Value {
        json!({
            "full_name": "Alice Example",
            "email": "alice@example.com",
            "password": "Secret123!",
            "card_info": {
                "card_number": "5425233430109903",
                "cvv": "123",
                "expiration_date": "09/29"
            },
            "balance": "2500.00 RON"
        })
    }

    #[tokio::test]
    async fn register_then_login_real() {
        let app = test_app();

        let res = app.clone().oneshot(post_json("/register", register_body())).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = app
            .oneshot(post_json(
                "/login",
                json!({"email": "alice@example.com", "password": "Secret123!"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], "alice@example.com");
        assert_eq!(body["user"]["full_name"], "Alice Example");
    }

    #[tokio::test]
    async fn duplicate_register_conflicts() {
        let app = test_app();

        let res = app.clone().oneshot(post_json("/register", register_body())).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = app.oneshot(post_json("/register", register_body())).await.unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let app = test_app();
        let res = app
            .oneshot(post_json(
                "/login",
                json!({"email": "bob@nowhere.com", "password": "anything"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn decoy_login_is_indistinguishable_in_shape() {
        let app = test_app();
        app.clone().oneshot(post_json("/register", register_body())).await.unwrap();

        let real = body_json(
            app.clone()
                .oneshot(post_json(
                    "/login",
                    json!({"email": "alice@example.com", "password": "Secret123!"}),
                ))
                .await
                .unwrap(),
        )
        .await;

        let decoy = body_json(
            app.clone()
                .oneshot(post_json(
                    "/login",
                    json!({"email": "alice@example.com", "password": "wrong1"}),
                ))
                .await
                .unwrap(),
        )
        .await;

        // Identical top-level and user-level key sets; no flag leaks.
        let keys = |v: &Value| {
            v.as_object()
                .unwrap()
                .keys()
                .cloned()
                .collect::<Vec<String>>()
        };
        assert_eq!(keys(&real), keys(&decoy));
        assert_eq!(keys(&real["user"]), keys(&decoy["user"]));
        assert!(decoy.get("authentic").is_none());
        assert!(decoy["user"].get("authentic").is_none());
        assert_ne!(real["user"]["card_number"], decoy["user"]["card_number"]);

        // The same wrong password reproduces the same decoy.
        let decoy2 = body_json(
            app.oneshot(post_json(
                "/login",
                json!({"email": "alice@example.com", "password": "wrong1"}),
            ))
            .await
            .unwrap(),
        )
        .await;
        assert_eq!(decoy["user"], decoy2["user"]);
    }
}
