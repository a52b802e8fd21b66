use std::sync::Arc;

use axum::Extension;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use ctf_blog_api::infra::{config::Config, cors, db, routes};

#[tokio::main]
async fn main() {
    dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Arc::new(Config::from_env());

    let database = db::connect(&config)
        .await
        .expect("Failed to connect to MongoDB");
    db::ensure_indexes(&database)
        .await
        .expect("Failed to create indexes");
    info!("Connected to MongoDB");

    let app = routes::create_router(&config.upload_dir)
        .layer(cors::create_cors())
        .layer(Extension(database))
        .layer(Extension(config.clone()));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .expect("Failed to bind address");
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
