use std::sync::Arc;
use tokio::signal;
use tracing::info;

use fictionary_core::{PhaseController, WordList, WordSource};
use fictionary_server::{
    config::Config, coordinator::SessionCoordinator, create_routes, websocket::ConnectionManager,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    info!("Starting Fictionary server...");

    let config = Config::new();

    let words: Box<dyn WordSource> = match &config.words_file {
        Some(path) => {
            info!("Loading word list from {}", path);
            match WordList::from_json_file(path) {
                Ok(list) => Box::new(list),
                Err(e) => {
                    tracing::error!("Failed to load word list '{}': {:#}", path, e);
                    tracing::error!(
                        "WORDS_FILE must point to a JSON array of {{word, definition}} objects."
                    );
                    std::process::exit(1);
                }
            }
        }
        None => {
            info!("Using the builtin word list");
            Box::new(WordList::builtin())
        }
    };

    let connection_manager = Arc::new(ConnectionManager::new());
    let controller = PhaseController::new(config.min_players_to_start, config.podium_size);
    let coordinator = Arc::new(SessionCoordinator::new(
        connection_manager,
        words,
        controller,
    ));

    let routes = create_routes(coordinator);

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config
            .host
            .parse::<std::net::IpAddr>()
            .expect("Invalid HOST"),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
