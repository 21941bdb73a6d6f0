use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{DefinitionEntry, GamePhase, Player, Vote};

/// Actions a client may take against the shared session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Join { name: String },
    StartGame,
    SubmitDefinition { player_name: String, definition: String },
    StartVoting,
    Vote { voter_name: String, voted_for_name: String },
    EndVoting,
    NewRound,
    EndGame,
    ResetSession,
}

/// State slices pushed to every connected observer. Clients render only
/// what these carry; there is no client-side authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all_fields = "camelCase")]
pub enum ServerMessage {
    Players { players: Vec<Player> },
    /// Word text only. The definition stays on the server until voting.
    NewWord { word: String },
    PhaseChanged { phase: GamePhase },
    DefinitionsUpdated { definitions: Vec<DefinitionEntry> },
    /// Shuffled fakes plus the sentinel true definition.
    VotingOptions { options: Vec<DefinitionEntry> },
    VotesUpdated { votes: Vec<Vote> },
    GameOver { top_players: Vec<Player> },
    Error { message: String },
}
