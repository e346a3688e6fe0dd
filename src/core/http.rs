//! Axum routers for the analysis and price services

use axum::{
    extract::{rejection::JsonRejection, MatchedPath, Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use prometheus::IntGauge;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, Level};

use crate::analysis::AnalysisService;
use crate::config::AppConfig;
use crate::error::AnalysisError;
use crate::metrics::Metrics;
use crate::models::analysis::{AnalysisRequest, AnalysisResult, PriceQuote};

pub const SERVICE_NAME: &str = "contract-lens";
pub const PRICE_SERVICE_BANNER: &str = "contract-lens price service is running";

/// Shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService>,
    pub metrics: Arc<Metrics>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: AnalysisService, metrics: Arc<Metrics>) -> Self {
        Self {
            service: Arc::new(service),
            metrics,
            started_at: Instant::now(),
        }
    }
}

/// Which route group a process serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// `/analyze`, `/price/{symbol}`, `/health`
    Analysis,
    /// `/` banner plus `/price/{symbol}`
    Price,
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "uptime_seconds": state.started_at.elapsed().as_secs(),
        "language_model": state.service.has_language_model(),
    }))
}

async fn export_metrics(State(state): State<AppState>) -> Result<String, StatusCode> {
    state.metrics.export().map_err(|e| {
        tracing::error!(error = %e, "Failed to encode metrics");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn banner() -> &'static str {
    PRICE_SERVICE_BANNER
}

/// Holds one slot of `http_requests_in_flight` until dropped, so requests
/// abandoned by a disconnecting client are released too.
struct InFlight<'a>(&'a IntGauge);

impl<'a> InFlight<'a> {
    fn enter(gauge: &'a IntGauge) -> Self {
        gauge.inc();
        Self(gauge)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.dec();
    }
}

/// Count and time every request; 5xx responses are logged with the route
/// template rather than the raw path.
async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let metrics = &state.metrics;
    let in_flight = InFlight::enter(&metrics.http_requests_in_flight);
    let response = next.run(request).await;
    drop(in_flight);

    let elapsed = started.elapsed();
    metrics.http_requests_total.inc();
    metrics
        .http_request_duration_seconds
        .observe(elapsed.as_secs_f64());

    let status = response.status();
    if status.is_server_error() {
        tracing::error!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis(),
            "Request failed"
        );
    } else {
        debug!(method = %method, route = %route, status = status.as_u16(), "Request served");
    }

    response
}

/// Technical snapshot and commentary for an option contract
async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AnalysisError> {
    let Json(request) = body.map_err(|rejection| {
        AnalysisError::Validation(format!("invalid request body: {}", rejection.body_text()))
    })?;
    state.service.analyze(request).await.map(Json)
}

/// Latest hourly close for a symbol
async fn price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<PriceQuote>, AnalysisError> {
    state.service.price(&symbol).await.map(Json)
}

fn finish(routes: Router<AppState>, state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    routes
        .route("/metrics", get(export_metrics))
        .route("/price/{symbol}", get(price))
        .route_layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Analysis service: `/analyze`, `/price/{symbol}`, `/health`, `/metrics`
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze));
    finish(routes, state)
}

/// Standalone price service: `/`, `/price/{symbol}`, `/metrics`
pub fn create_price_router(state: AppState) -> Router {
    finish(Router::new().route("/", get(banner)), state)
}

/// Bind `0.0.0.0:{port}` and serve until the process exits
pub async fn start_server(
    config: AppConfig,
    kind: ServiceKind,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new().map_err(|e| e.to_string())?);
    let service = AnalysisService::from_config(&config, Some(metrics.clone()))?;
    let state = AppState::new(service, metrics);

    let app = match kind {
        ServiceKind::Analysis => create_router(state),
        ServiceKind::Price => create_price_router(state),
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, kind = ?kind, "HTTP server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
