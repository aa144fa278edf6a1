use organizer_api::config;
use organizer_api::routes;
use organizer_api::store::StoreManager;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, API keys, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Organizer API in {:?} mode", config.environment);

    // Pools are created lazily; schema bootstrap failing here only means the
    // first storage request will surface the store error instead.
    if let Err(e) = StoreManager::ensure_schema().await {
        tracing::warn!("Document store schema bootstrap failed: {}", e);
    }

    let app = routes::app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Organizer API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
