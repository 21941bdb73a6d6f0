use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::ws::{Message, WebSocket};

use crate::coordinator::SessionCoordinator;
use fictionary_types::ClientMessage;

pub mod connection;
pub mod handlers;
pub mod rate_limiter;

use connection::ConnectionId;
pub use connection::ConnectionManager;
use handlers::MessageHandler;
use rate_limiter::RateLimiter;

pub async fn handle_connection(websocket: WebSocket, coordinator: Arc<SessionCoordinator>) {
    let connection_id = ConnectionId::new();
    info!("new WebSocket connection: {}", connection_id);

    let (mut ws_sender, mut ws_receiver) = websocket.split();
    let connection_manager = coordinator.connections().clone();

    let message_receiver = connection_manager.create_connection(connection_id).await;
    let message_handler = MessageHandler::new(connection_id, coordinator.clone());

    // Late joiners get the player list and current phase right away.
    coordinator.handle_connect(connection_id).await;

    let incoming_handler = {
        let coordinator = coordinator.clone();
        let message_handler = message_handler.clone();
        let mut rate_limiter = RateLimiter::new();

        async move {
            while let Some(result) = ws_receiver.next().await {
                match result {
                    Ok(msg) => {
                        if let Err(e) = handle_message(
                            msg,
                            connection_id,
                            &mut rate_limiter,
                            &message_handler,
                            &coordinator,
                        )
                        .await
                        {
                            error!("error handling message for {}: {}", connection_id, e);
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("WebSocket error for {}: {}", connection_id, e);
                        break;
                    }
                }
            }
        }
    };

    let outgoing_handler = {
        async move {
            let mut receiver = message_receiver;

            while let Some(message) = receiver.recv().await {
                let json = match serde_json::to_string(&message) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("failed to serialize message: {:?}", e);
                        continue;
                    }
                };

                if let Err(e) = ws_sender.send(Message::text(json)).await {
                    warn!("failed to send message to {}: {:?}", connection_id, e);
                    break;
                }
            }
        }
    };

    tokio::select! {
        _ = incoming_handler => {},
        _ = outgoing_handler => {},
    }

    info!("connection {} disconnected", connection_id);
    coordinator.connections().remove_connection(connection_id).await;
}

async fn handle_message(
    msg: Message,
    connection_id: ConnectionId,
    rate_limiter: &mut RateLimiter,
    message_handler: &MessageHandler,
    coordinator: &SessionCoordinator,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if !rate_limiter.allow() {
        warn!("rate limit exceeded for {}, dropping connection", connection_id);
        return Err("rate limit exceeded".into());
    }

    // Only text frames carry actions; pings and binary are ignored.
    if !msg.is_text() {
        return Ok(());
    }

    let text = msg.to_str().map_err(|_| "invalid text message")?;

    // A payload the schema doesn't recognize is announced, not fatal.
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(client_message) => message_handler.handle_message(client_message).await,
        Err(e) => coordinator.announce_malformed(e.to_string()).await,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fictionary_core::{PhaseController, WordList};
    use std::time::Duration;

    fn test_coordinator() -> Arc<SessionCoordinator> {
        Arc::new(SessionCoordinator::new(
            Arc::new(ConnectionManager::new()),
            Box::new(WordList::builtin()),
            PhaseController::default(),
        ))
    }

    #[tokio::test]
    async fn a_rate_limited_frame_is_a_fatal_error() {
        let coordinator = test_coordinator();
        let connection_id = ConnectionId::new();
        let handler = MessageHandler::new(connection_id, coordinator.clone());
        let mut limiter = RateLimiter::with_limits(0, Duration::from_secs(60));

        let result = handle_message(
            Message::text(r#""StartGame""#),
            connection_id,
            &mut limiter,
            &handler,
            &coordinator,
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn frames_under_the_cap_pass_through() {
        let coordinator = test_coordinator();
        let connection_id = ConnectionId::new();
        let handler = MessageHandler::new(connection_id, coordinator.clone());
        let mut limiter = RateLimiter::with_limits(5, Duration::from_secs(60));

        let result = handle_message(
            Message::text(r#""StartGame""#),
            connection_id,
            &mut limiter,
            &handler,
            &coordinator,
        )
        .await;

        assert!(result.is_ok());
    }
}
