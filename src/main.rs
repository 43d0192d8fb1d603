use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gameshow::{
    build_router,
    catalog::{demo_game, seed_demo_answers, GameCatalog, HttpGameCatalog, InMemoryGameCatalog},
    evaluator::{AnswerEvaluator, HttpAnswerEvaluator, InMemoryAnswerEvaluator},
    play::start_cleanup_task,
    AppConfig, AppState, EventBus, PlayManager,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gameshow=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gameshow quiz server");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    // Remote API when configured, otherwise the built-in demo game
    let (catalog, evaluator): (Arc<dyn GameCatalog>, Arc<dyn AnswerEvaluator>) =
        match &config.api_url {
            Some(api_url) => {
                info!(api_url = %api_url, "Using remote gameshow API");
                (
                    Arc::new(HttpGameCatalog::new(api_url.clone())),
                    Arc::new(HttpAnswerEvaluator::new(api_url.clone())),
                )
            }
            None => {
                info!("GAMESHOW_API_URL not set, serving the demo game");
                let catalog = InMemoryGameCatalog::new();
                catalog.insert(demo_game()).await;
                let evaluator = InMemoryAnswerEvaluator::new();
                seed_demo_answers(&evaluator).await;
                (Arc::new(catalog), Arc::new(evaluator))
            }
        };

    let play_manager = PlayManager::new(
        catalog,
        evaluator,
        EventBus::new(),
        config.rules.clone(),
        config.driver.clone(),
    );

    tokio::spawn(start_cleanup_task(
        play_manager.clone(),
        config.cleanup.clone(),
    ));

    let bind_addr = config.bind_addr.clone();
    let app = build_router(AppState::new(play_manager));

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind_addr = %bind_addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!(bind_addr = %bind_addr, "Server running");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
    }
}
