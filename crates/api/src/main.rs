use ferrobank_api::app::{AppConfig, build_app};

#[tokio::main]
async fn main() {
    ferrobank_observability::init();

    // Explicit configuration; the process never mints a fresh random secret,
    // which would strand every previously issued session on restart.
    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let secure_cookies = std::env::var("APP_ENV")
        .map(|v| v == "production")
        .unwrap_or(false);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let app = build_app(AppConfig {
        jwt_secret,
        secure_cookies,
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("failed to bind listener");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
