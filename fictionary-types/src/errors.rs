use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Recoverable, user-facing validation failures. Every variant is surfaced
/// to the session as a broadcast `ServerMessage::Error`; none is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("the name '{name}' is already registered")]
    DuplicateName { name: String },
    #[error("'{player_name}' has already submitted a definition this round")]
    DuplicateSubmission { player_name: String },
    #[error("'{voter_name}' has already voted this round")]
    DuplicateVote { voter_name: String },
    #[error("not enough players to start the game ({actual} of {required})")]
    InsufficientPlayers { required: usize, actual: usize },
    #[error("no word has been drawn for this round")]
    NoActiveRound,
    #[error("malformed action: {detail}")]
    MalformedAction { detail: String },
}
