use std::sync::Arc;
use tracing::info;

use crate::coordinator::SessionCoordinator;
use crate::websocket::connection::ConnectionId;
use fictionary_types::ClientMessage;

/// Maps each inbound action to the coordinator call that applies it. The
/// handler itself is stateless beyond knowing which connection it serves;
/// all outcomes, success or failure, reach the client through broadcasts.
#[derive(Clone)]
pub struct MessageHandler {
    connection_id: ConnectionId,
    coordinator: Arc<SessionCoordinator>,
}

impl MessageHandler {
    pub fn new(connection_id: ConnectionId, coordinator: Arc<SessionCoordinator>) -> Self {
        Self {
            connection_id,
            coordinator,
        }
    }

    pub async fn handle_message(&self, message: ClientMessage) {
        match message {
            ClientMessage::Join { name } => {
                info!("connection {} joining as '{}'", self.connection_id, name);
                self.coordinator.join(&name).await;
            }
            ClientMessage::StartGame => self.coordinator.start_game().await,
            ClientMessage::SubmitDefinition {
                player_name,
                definition,
            } => {
                self.coordinator
                    .submit_definition(&player_name, &definition)
                    .await;
            }
            ClientMessage::StartVoting => self.coordinator.start_voting().await,
            ClientMessage::Vote {
                voter_name,
                voted_for_name,
            } => self.coordinator.vote(&voter_name, &voted_for_name).await,
            ClientMessage::EndVoting => self.coordinator.end_voting().await,
            ClientMessage::NewRound => self.coordinator.new_round().await,
            ClientMessage::EndGame => self.coordinator.end_game().await,
            ClientMessage::ResetSession => self.coordinator.reset_session().await,
        }
    }
}
