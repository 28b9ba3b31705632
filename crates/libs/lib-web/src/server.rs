//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads configuration, prepares the database, wires the
//! disease classifier and serves the router built by [`create_router`].

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, map_res, require_auth, stamp_req, RequestStamp};
use crate::services::{DiseaseClassifier, HttpClassifier};
use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
    Router,
};
use lib_core::{create_pool, run_migrations, AppError, Config, DbPool};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
// endregion: --- Imports

/// Multipart framing allowance on top of the image size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    /// `None` when no classifier endpoint is configured.
    pub classifier: Option<Arc<dyn DiseaseClassifier>>,
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for Option<Arc<dyn DiseaseClassifier>> {
    fn from_ref(state: &AppState) -> Self {
        state.classifier.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8001")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8001".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:3001".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Install the global tracing subscriber, filtered by `LOG_LEVEL`.
pub fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    // A second call (tests, embedding) keeps the first subscriber.
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        warn!("Global tracing subscriber already set");
    }
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection or migrations fail
/// - The classifier client cannot be built
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!(" AGRI CONNECT BACKEND STARTING");

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;

    info!("Database URL: {}", app_config.database_url);
    ensure_sqlite_dir(&app_config.database_url)?;

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations");
    run_migrations(&pool).await?;
    info!(" Migrations complete");

    let classifier = HttpClassifier::from_config(&app_config)?
        .map(|c| Arc::new(c) as Arc<dyn DiseaseClassifier>);
    match &app_config.classifier_url {
        Some(url) => info!(" Disease classifier: {}", url),
        None => warn!(" CLASSIFIER_URL not set - /api/predict will answer 503"),
    }
    if app_config.payment_key_id.is_none() {
        warn!(" RAZORPAY_KEY_ID not set - /api/checkout will answer 503");
    }
    if app_config.seed_endpoint_enabled {
        warn!(" Seed endpoint enabled - do not use in production");
    }

    let state = AppState {
        db: pool,
        config: app_config,
        classifier,
    };

    let app = create_router(state, config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the parent directory of a file-backed SQLite database.
fn ensure_sqlite_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(db_path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let db_path = db_path.trim_start_matches("//");
    if db_path.starts_with(":memory:") || db_path.is_empty() {
        return Ok(());
    }

    let db_path = db_path.split('?').next().unwrap_or(db_path);
    if let Some(parent) = std::path::Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    use axum::http::{header, HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::HeaderName::from_static(crate::middleware::REQUEST_ID_HEADER)]);

    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    info!("[ROUTE SETUP] Registering HTTP routes...");
    let public = Router::new()
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/listings", get(handlers::listings::list_listings))
        .route("/api/listings/{id}", get(handlers::listings::get_listing))
        .route("/api/pesticides", get(handlers::diagnosis::list_pesticides))
        .route(
            "/api/predict",
            post(handlers::diagnosis::predict).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/crop-rotation", post(handlers::rotation::plan))
        .route("/api/crop-rotation/soils", get(handlers::rotation::soils))
        .route("/api/seed-data", post(handlers::system::seed_data));

    let protected = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/listings/mine", get(handlers::listings::my_listings))
        .route("/api/listings", post(handlers::listings::create_listing))
        .route("/api/listings/{id}", delete(handlers::listings::delete_listing))
        .route("/api/checkout", post(handlers::checkout::checkout))
        .route("/api/orders", get(handlers::checkout::my_orders))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    public
        .merge(protected)
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            AppError::NotFound("Route not found".to_string())
        })
        .with_state(state)
        .layer(from_fn(map_res))
        .layer(from_fn(log_requests))
        // Tower HTTP trace layer for spans
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri().path(),
                    )
                },
            ),
        )
        // Request stamping runs first so every layer below sees the ID
        .layer(from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST /api/auth/signup");
    info!("   • POST /api/auth/login");
    info!("   • GET  /api/auth/me");
    info!(" MARKETPLACE:");
    info!("   • GET  /api/listings?type={{type}}&category={{category}}");
    info!("   • GET  /api/listings/{{id}}");
    info!("   • GET  /api/listings/mine");
    info!("   • POST /api/listings");
    info!("   • DELETE /api/listings/{{id}}");
    info!("   • POST /api/checkout");
    info!("   • GET  /api/orders");
    info!(" DIAGNOSIS:");
    info!("   • POST /api/predict (multipart field `file`)");
    info!("   • GET  /api/pesticides?plant={{plant}}&disease={{disease}}");
    info!(" CROP ROTATION:");
    info!("   • POST /api/crop-rotation");
    info!("   • GET  /api/crop-rotation/soils");
    info!(" SYSTEM:");
    info!("   • GET  /");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
