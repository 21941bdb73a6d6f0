use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Reserved author name marking the dictionary's own definition among
/// the voting options. Votes cast for this name award the voter.
pub const TRUE_DEFINITION: &str = "correct";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Registration,
    Definition,
    Voting,
    Results,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Word {
    pub word: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionEntry {
    pub player_name: String,
    pub definition: String,
}

impl DefinitionEntry {
    /// The synthetic entry carrying the dictionary definition, mixed in
    /// with the fakes before voting.
    pub fn true_definition(word: &Word) -> Self {
        Self {
            player_name: TRUE_DEFINITION.to_string(),
            definition: word.definition.clone(),
        }
    }

    pub fn is_true_definition(&self) -> bool {
        self.player_name == TRUE_DEFINITION
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub voter_name: String,
    pub voted_for_name: String,
}
