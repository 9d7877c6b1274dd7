//! Prometheus /metrics + health check HTTP endpoints
//!
//! Endpoints:
//!   GET /metrics  — Prometheus text format
//!   GET /healthz  — Liveness probe (always 200 if process is running)
//!
//! `hgate_decoy_logins` is the silent-alert surface: the login API never
//! distinguishes decoys, this counter is where operators watch for
//! credential-stuffing activity.

use anyhow::Result;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::registry::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct Metrics {
    pub registrations_total: Counter,
    pub logins_total: Counter,
    pub decoy_logins_total: Counter,
}

impl Metrics {
    pub fn new(registry: &mut Registry) -> Self {
        let metrics = Self {
            registrations_total: Counter::default(),
            logins_total: Counter::default(),
            decoy_logins_total: Counter::default(),
        };
        registry.register(
            "hgate_registrations",
            "Completed user registrations",
            metrics.registrations_total.clone(),
        );
        registry.register(
            "hgate_logins",
            "Login calls answered with an identity (real or decoy)",
            metrics.logins_total.clone(),
        );
        registry.register(
            "hgate_decoy_logins",
            "Logins that served a decoy identity",
            metrics.decoy_logins_total.clone(),
        );
        metrics
    }
}

/// Serve Prometheus metrics and the liveness probe on `addr`
/// (e.g. "127.0.0.1:9102")
pub async fn serve(addr: String, registry: Arc<Registry>) -> Result<()> {
    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(registry);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("metrics bind {addr}: {e}"))?;

    tracing::info!(addr = %addr, "metrics: listening on /metrics, /healthz");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("metrics server: {e}"))
}

async fn metrics_handler(State(registry): State<Arc<Registry>>) -> impl IntoResponse {
    let mut body = String::new();
    match encode(&mut body, &registry) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            body,
        ),
        Err(e) => {
            tracing::error!("metrics encode failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("content-type", "text/plain")],
                e.to_string(),
            )
        }
    }
}

async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
