use recall_api::{config::ApiConfig, middleware, router, state::ApiState, tracing as api_tracing};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    api_tracing::init_tracing(&config.env);

    // Initialize the application state
    let state = ApiState::new(&config)?;

    let cors = middleware::cors::create_cors_layer(config.allowed_origins.clone());

    // Create the application router
    let app = router::router()
        .with_state(state)
        .layer(axum::middleware::from_fn(
            middleware::request_id::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start the server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
