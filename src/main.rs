use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use interview_prep_backend::{
    config::{get_config, init_config, LogFormat},
    database::pool::create_pool,
    middleware::{cors::quiz_cors, rate_limit},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config.log_format);

    let pool = create_pool().await?;
    let app_state = AppState::new(config, pool)?;

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/quiz/generate", post(routes::quiz::generate_quiz))
        .route("/api/quiz/catalog", get(routes::quiz::get_catalog))
        .route("/api/quiz/categories", get(routes::quiz::list_categories))
        .route("/api/quiz/categories/:id", get(routes::quiz::get_category))
        .route(
            "/api/quiz/categories/:id/questions",
            get(routes::quiz::get_category_questions),
        )
        .route("/api/quiz/attempts", post(routes::quiz::submit_attempt))
        .route("/api/tips", post(routes::tips::get_tips))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.public_rps),
            rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .with_state(app_state)
        .layer(quiz_cors())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
