//! GreenGap Web Server
//!
//! Axum-based REST API exposing the rebound analytics pipeline to the
//! GreenGap dashboard.
//!
//! - Simulated-data endpoints for demos
//! - Analysis of caller-supplied series and uploaded datasets
//! - Configurable CORS policy
//! - Sanitized error responses (input errors are 400, everything else 500)

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use greengap_core::{advisor_for, Advisor, AnalysisConfig, Pipeline, Simulator};

mod handlers;

/// Maximum file upload size (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Upper bound on simulated periods per request
pub const MAX_SIMULATION_DAYS: usize = 3650;

/// Environment variable holding comma-separated allowed CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "GREENGAP_ALLOWED_ORIGINS";

/// Origins allowed when nothing is configured (local frontend dev servers)
const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEV_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl ServerConfig {
    /// Read allowed origins from `GREENGAP_ALLOWED_ORIGINS`, falling back to
    /// the local dev origins
    pub fn from_env() -> Self {
        match std::env::var(ALLOWED_ORIGINS_ENV) {
            Ok(value) => Self {
                allowed_origins: parse_origins(&value),
            },
            Err(_) => Self::default(),
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
///
/// Read-only after startup; every request computes independently.
pub struct AppState {
    pub pipeline: Pipeline,
    pub simulator: Simulator,
    pub advisor: Option<Box<dyn Advisor>>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(analysis: AnalysisConfig, config: ServerConfig) -> Self {
        let advisor = advisor_for(analysis.advisor);
        Self::with_advisor(analysis, config, advisor)
    }

    /// Build state with an explicit advisor (or none)
    pub fn with_advisor(
        analysis: AnalysisConfig,
        config: ServerConfig,
        advisor: Option<Box<dyn Advisor>>,
    ) -> Self {
        let simulator = Simulator::new(analysis.simulation.clone(), analysis.efficiency_gain);
        Self {
            pipeline: Pipeline::new(analysis),
            simulator,
            advisor,
            config,
        }
    }

    pub fn analysis(&self) -> &AnalysisConfig {
        self.pipeline.config()
    }
}

/// Create the application router
pub fn create_router(analysis: AnalysisConfig, config: ServerConfig) -> Router {
    create_router_with_state(AppState::new(analysis, config))
}

/// Create the application router from prepared state (for testing)
pub fn create_router_with_state(state: AppState) -> Router {
    match &state.advisor {
        Some(advisor) => info!("Recommendation advisor: {}", advisor.name()),
        None => info!("ℹ️  No recommendation advisor configured"),
    }

    let cors = build_cors(&state.config);
    let state = Arc::new(state);

    let api_routes = Router::new()
        .route("/simulate", get(handlers::simulate))
        .route("/detect-rebound", get(handlers::detect_rebound))
        .route(
            "/analyze",
            get(handlers::analyze_simulated).post(handlers::analyze_series),
        )
        .route("/dashboard", get(handlers::dashboard))
        .route("/scenario", post(handlers::scenario))
        .route(
            "/upload",
            post(handlers::upload_dataset)
                // Room for multipart framing around a maximum-size file
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 64 * 1024)),
        );

    Router::new()
        .route("/", get(handlers::home))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Start the server
pub async fn serve(
    host: &str,
    port: u16,
    analysis: AnalysisConfig,
    config: ServerConfig,
) -> anyhow::Result<()> {
    info!(
        "CORS allowed origins: {}",
        if config.allowed_origins.is_empty() {
            "none".to_string()
        } else {
            config.allowed_origins.join(", ")
        }
    );

    let app = create_router(analysis, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Caller mistakes are reported back verbatim
        if let Some(core) = err.downcast_ref::<greengap_core::Error>() {
            if core.is_input_error() {
                return Self::bad_request(&core.to_string());
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
