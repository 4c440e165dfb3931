use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use routewise_core::{AdvisoryAssembler, RouteAdvisory, RouteRequest};

struct AppState {
    assembler: AdvisoryAssembler,
}

async fn handle_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Json<RouteAdvisory> {
    Json(state.assembler.advise(&request).await)
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(assembler: AdvisoryAssembler) -> Router {
    Router::new()
        .route("/api/route", post(handle_route))
        .route("/health", get(health))
        .with_state(Arc::new(AppState { assembler }))
}

/// Serve the advisory API until the process is stopped.
pub async fn run_server(assembler: AdvisoryAssembler, addr: SocketAddr) -> Result<()> {
    let app = router(assembler);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!("Advisory API listening on {}", addr);
    axum::serve(listener, app).await.context("serve advisory API")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use routewise_core::DisabledGenerator;
    use std::time::Duration;

    #[tokio::test]
    async fn test_handle_route_returns_fallback_advisory() {
        let assembler =
            AdvisoryAssembler::new(Arc::new(DisabledGenerator), Duration::from_secs(1)).unwrap();
        let state = Arc::new(AppState { assembler });
        let request = RouteRequest::new("Mumbai Central", "Bandra Kurla Complex", "Emergency");

        let Json(advisory) = handle_route(State(state), Json(request)).await;
        assert_eq!(advisory.reason.as_deref(), Some("Emergency"));
        assert_eq!(advisory.algorithm, "A*");
        assert!(advisory.error.is_some());
        assert!(advisory.chart_data.within_bounds());
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "ok");
    }
}
