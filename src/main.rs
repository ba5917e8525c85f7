use dotenvy::dotenv;
use moonline::ai::rotation::KeyRotation;
use moonline::ai::{client::GeminiClient, LunaResolver};
use moonline::app::create_router;
use moonline::config::luna_config::LunaConfig;
use moonline::config::security_config::JWTSecret;
use moonline::db::{build_pool, run_migrations};
use moonline::logging::setup_logging;
use moonline::models::models::AppState;
use http::HeaderValue;
use std::{env, net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), eyre::Error> {
    setup_logging();

    info!("Starting MoonLine");

    dotenv().ok();
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| "moonline.db".to_string());
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    let cors_origins = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173".to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .collect::<Vec<String>>();

    info!("cors origins: {:?}", cors_origins);

    let pool = build_pool(&db_url, 10)?;
    {
        let mut conn = pool.get()?;
        run_migrations(&mut conn)?;
    }
    info!("Database ready at {}", db_url);

    let luna = LunaConfig::from_env();
    let client = GeminiClient::new(reqwest::Client::new(), &luna.api_url, luna.timeout)?;
    let rotation = Arc::new(KeyRotation::new(luna.api_keys.clone()));
    let resolver = LunaResolver::new(client, rotation, luna.enabled);
    if resolver.is_enabled() {
        info!("Luna AI enabled, {} key slot(s) configured", luna.api_keys.len());
    } else {
        warn!("Luna AI disabled, replies come from the fallback table");
    }

    let state = Arc::new(AppState {
        db: pool,
        jwt_secret: JWTSecret::new().jwt_secret,
        resolver,
    });

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(
            cors_origins
                .iter()
                .map(|s| s.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?,
        );

    let app = create_router(state).layer(cors);

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    let listener = TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);
    info!(
        "Swagger UI available at http://{}/swagger-ui/index.html#/",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

// handle Ctrl+C for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
