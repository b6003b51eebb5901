use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use describer_core::vision::VisionModel;
use describer_gateway::routes::{app, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("Describer gateway initializing...");

    let model = match VisionModel::from_env() {
        Ok(model) => {
            // Reachability check; failure is logged, not fatal.
            match model.ping().await {
                Ok(reply) => info!("Vision backend reachable: {}", reply),
                Err(err) => error!("Vision backend configured but unresponsive: {}", err),
            }
            model
        }
        Err(err) => panic!("Failed to initialize vision client: {}", err),
    };

    let state = AppState {
        vision: Arc::new(model),
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(8000);

    let listener = TcpListener::bind(("0.0.0.0", port)).await.unwrap();
    info!("Gateway listening on port {}...", port);

    axum::serve(listener, app(state)).await.unwrap();
}
