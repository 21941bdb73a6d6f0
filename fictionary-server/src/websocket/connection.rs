use fictionary_types::ServerMessage;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One live observer of the shared session. Outbound messages go through an
/// unbounded channel drained by the connection's writer task.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    sender: mpsc::UnboundedSender<ServerMessage>,
}

impl Connection {
    pub fn new(id: ConnectionId) -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let connection = Self { id, sender };
        (connection, receiver)
    }

    pub fn send(&self, message: ServerMessage) -> Result<(), String> {
        self.sender
            .send(message)
            .map_err(|_| "connection closed".to_string())
    }
}

/// Registry of everyone watching the session. The broadcast is the primary
/// fan-out primitive: every state change goes to every connection.
pub struct ConnectionManager {
    connections: RwLock<HashMap<ConnectionId, Connection>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create_connection(
        &self,
        id: ConnectionId,
    ) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (connection, receiver) = Connection::new(id);
        let mut connections = self.connections.write().await;
        connections.insert(id, connection);
        receiver
    }

    pub async fn remove_connection(&self, id: ConnectionId) {
        let mut connections = self.connections.write().await;
        connections.remove(&id);
    }

    pub async fn send_to_connection(
        &self,
        id: ConnectionId,
        message: ServerMessage,
    ) -> Result<(), String> {
        let connections = self.connections.read().await;
        match connections.get(&id) {
            Some(connection) => connection.send(message),
            None => Err("connection not found".to_string()),
        }
    }

    /// Fan a message out to every connection. Connections whose channel has
    /// closed are pruned here rather than by a background sweep.
    pub async fn broadcast(&self, message: ServerMessage) {
        let stale: Vec<ConnectionId> = {
            let connections = self.connections.read().await;
            connections
                .values()
                .filter(|connection| connection.send(message.clone()).is_err())
                .map(|connection| connection.id)
                .collect()
        };

        if !stale.is_empty() {
            let mut connections = self.connections.write().await;
            for id in stale {
                tracing::info!("pruning closed connection {}", id);
                connections.remove(&id);
            }
        }
    }

    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
