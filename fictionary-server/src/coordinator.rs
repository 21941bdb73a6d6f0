use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::websocket::{ConnectionManager, connection::ConnectionId};
use fictionary_core::{GameSession, PhaseController, WordSource};
use fictionary_types::{GameError, ServerMessage};

/// The single authority over the one shared session. Every inbound action
/// funnels through here: the session mutex serializes validate, mutate and
/// broadcast, so no two actions are ever in flight against the state at
/// once. When two duplicates race, the first to take the lock wins and the
/// second is rejected.
///
/// Failures are announced to the whole session, not just the originator.
/// That transparency is the original design, kept on purpose.
pub struct SessionCoordinator {
    session: Mutex<GameSession>,
    controller: PhaseController,
    words: Box<dyn WordSource>,
    connections: Arc<ConnectionManager>,
}

impl SessionCoordinator {
    pub fn new(
        connections: Arc<ConnectionManager>,
        words: Box<dyn WordSource>,
        controller: PhaseController,
    ) -> Self {
        Self {
            session: Mutex::new(GameSession::new()),
            controller,
            words,
            connections,
        }
    }

    pub fn connections(&self) -> &Arc<ConnectionManager> {
        &self.connections
    }

    /// Resynchronize a late joiner: current player list and current phase,
    /// delivered to that connection alone. Everyone else already has both.
    pub async fn handle_connect(&self, id: ConnectionId) {
        let session = self.session.lock().await;
        let snapshot = [
            ServerMessage::Players {
                players: session.players().to_vec(),
            },
            ServerMessage::PhaseChanged {
                phase: session.phase().clone(),
            },
        ];
        for message in snapshot {
            if let Err(e) = self.connections.send_to_connection(id, message).await {
                warn!(connection = %id, "dropping connect snapshot: {}", e);
                return;
            }
        }
    }

    pub async fn join(&self, name: &str) {
        let mut session = self.session.lock().await;
        match session.register_player(name) {
            Ok(()) => {
                info!(player = name, "player registered");
                self.connections
                    .broadcast(ServerMessage::Players {
                        players: session.players().to_vec(),
                    })
                    .await;
            }
            Err(e) => self.announce_error(e).await,
        }
    }

    pub async fn start_game(&self) {
        let mut session = self.session.lock().await;
        match self.controller.start_game(&mut session, self.words.as_ref()) {
            Ok(broadcasts) => self.fan_out(broadcasts).await,
            Err(e) => self.announce_error(e).await,
        }
    }

    pub async fn submit_definition(&self, player_name: &str, definition: &str) {
        let mut session = self.session.lock().await;
        match session.submit_definition(player_name, definition) {
            Ok(()) => {
                self.connections
                    .broadcast(ServerMessage::DefinitionsUpdated {
                        definitions: session.definitions().to_vec(),
                    })
                    .await;
            }
            Err(e) => self.announce_error(e).await,
        }
    }

    pub async fn start_voting(&self) {
        let mut session = self.session.lock().await;
        match self.controller.start_voting(&mut session) {
            Ok(broadcasts) => self.fan_out(broadcasts).await,
            Err(e) => self.announce_error(e).await,
        }
    }

    pub async fn vote(&self, voter_name: &str, voted_for_name: &str) {
        let mut session = self.session.lock().await;
        match session.submit_vote(voter_name, voted_for_name) {
            Ok(()) => {
                self.connections
                    .broadcast(ServerMessage::VotesUpdated {
                        votes: session.votes().to_vec(),
                    })
                    .await;
            }
            Err(e) => self.announce_error(e).await,
        }
    }

    pub async fn end_voting(&self) {
        let mut session = self.session.lock().await;
        let broadcasts = self.controller.end_voting(&mut session);
        self.fan_out(broadcasts).await;
    }

    pub async fn new_round(&self) {
        let mut session = self.session.lock().await;
        match self.controller.new_round(&mut session, self.words.as_ref()) {
            Ok(broadcasts) => self.fan_out(broadcasts).await,
            Err(e) => self.announce_error(e).await,
        }
    }

    pub async fn end_game(&self) {
        let session = self.session.lock().await;
        let broadcasts = self.controller.end_game(&session);
        self.fan_out(broadcasts).await;
    }

    pub async fn reset_session(&self) {
        let mut session = self.session.lock().await;
        info!("resetting session");
        let broadcasts = self.controller.reset_game(&mut session);
        self.fan_out(broadcasts).await;
    }

    /// Surface a schema-invalid inbound payload as a session-wide error
    /// instead of crashing the coordinator.
    pub async fn announce_malformed(&self, detail: String) {
        self.announce_error(GameError::MalformedAction { detail }).await;
    }

    async fn announce_error(&self, error: GameError) {
        warn!(%error, "rejected action");
        self.connections
            .broadcast(ServerMessage::Error {
                message: error.to_string(),
            })
            .await;
    }

    async fn fan_out(&self, broadcasts: Vec<ServerMessage>) {
        for message in broadcasts {
            self.connections.broadcast(message).await;
        }
    }
}
