//! Stock Valuation Finder server.
//!
//! Loads the market dataset once at startup and serves the dashboard page
//! plus the JSON endpoints it renders from. Every request filters the shared,
//! read-only dataset and rebuilds the affected figures.

pub mod chart_routes;
pub mod config;
pub mod dashboard_routes;
pub mod embedded_frontend;
pub mod error;
pub mod request_id;
pub mod security_headers;
pub mod selection;
pub mod table_routes;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use market_data::{resolve_default_selection, LoadSummary, MarketDataset, Selection};
use serde::Serialize;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::security_headers::HeaderPolicy;

pub use config::ServerConfig;
pub use error::{ApiResponse, AppError};

/// Page text and initial selection, resolved against the loaded data.
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub title: String,
    pub subtitle: String,
    pub notes: Vec<String>,
    pub upcoming_improvements: Vec<String>,
    pub default_selection: Selection,
}

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<MarketDataset>,
    pub settings: Arc<DashboardSettings>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(dataset: MarketDataset, config: &ServerConfig) -> Self {
        let default_selection = resolve_default_selection(
            &dataset,
            &config.default_sector,
            &config.default_industries,
        );
        let settings = DashboardSettings {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            notes: config.notes.clone(),
            upcoming_improvements: config.upcoming_improvements.clone(),
            default_selection,
        };

        Self {
            dataset: Arc::new(dataset),
            settings: Arc::new(settings),
            started_at: Utc::now(),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub companies: usize,
    pub sectors: usize,
    pub uptime_secs: i64,
    #[schema(value_type = Object)]
    pub load: LoadSummary,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Server is up; dataset row counts", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        companies: state.dataset.len(),
        sectors: state.dataset.sectors().len(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        load: state.dataset.summary().clone(),
    })
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Stock Valuation Finder API"),
    paths(
        health,
        dashboard_routes::get_dashboard_config,
        dashboard_routes::get_dashboard,
        dashboard_routes::list_sectors,
        dashboard_routes::list_industries,
        chart_routes::get_treemap,
        chart_routes::get_scatter,
        table_routes::get_table,
    ),
    components(schemas(HealthResponse, dashboard_routes::DashboardConfig, dashboard_routes::MetricInfo)),
    tags(
        (name = "Dashboard", description = "Page setup, dropdown options and the combined view"),
        (name = "Charts", description = "Treemap and valuation scatters"),
        (name = "Table", description = "Company rows"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let layer = CorsLayer::new().allow_methods([Method::GET]);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Full application router with middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(dashboard_routes::dashboard_routes())
        .merge(chart_routes::chart_routes())
        .merge(table_routes::table_routes())
        .merge(embedded_frontend::frontend_routes())
        .layer(middleware::from_fn_with_state(
            HeaderPolicy {
                hsts: config.enable_hsts,
            },
            security_headers::security_headers_middleware,
        ))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(cors_layer(&config.allowed_origins))
        .with_state(state)
}

pub fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "api_server=info,market_data=info,tower_http=info".into());

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    tracing::info!("Loading market data from {}", config.data_path.display());

    let dataset = MarketDataset::load_csv(&config.data_path)
        .with_context(|| format!("Failed to load market data from {}", config.data_path.display()))?;
    if dataset.is_empty() {
        tracing::warn!("Market data file has no usable rows; charts will be empty");
    }

    let state = AppState::new(dataset, &config);
    tracing::info!(
        "{} companies across {} sectors; default selection: {} {:?}",
        state.dataset.len(),
        state.dataset.sectors().len(),
        state.settings.default_selection.sector,
        state.settings.default_selection.industries
    );

    let app = build_router(state, &config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Stock Valuation Finder listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
