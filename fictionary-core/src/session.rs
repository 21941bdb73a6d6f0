use fictionary_types::{
    DefinitionEntry, GameError, GamePhase, Player, TRUE_DEFINITION, Vote, Word,
};

/// The authoritative record of the one shared session: registered players,
/// the active word, this round's definitions and votes, and the current
/// phase. All mutation goes through here; callers never touch the
/// collections directly.
#[derive(Debug)]
pub struct GameSession {
    players: Vec<Player>,
    current_word: Option<Word>,
    definitions: Vec<DefinitionEntry>,
    votes: Vec<Vote>,
    phase: GamePhase,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            current_word: None,
            definitions: Vec::new(),
            votes: Vec::new(),
            phase: GamePhase::Registration,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn definitions(&self) -> &[DefinitionEntry] {
        &self.definitions
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.current_word.as_ref()
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        tracing::info!(?phase, "changing game phase");
        self.phase = phase;
    }

    /// Install the word for a new round. Round artifacts are cleared
    /// separately via `reset_round`.
    pub fn set_current_word(&mut self, word: Word) {
        self.current_word = Some(word);
    }

    /// Add a player with a zero score. Rejection leaves the player list
    /// untouched.
    pub fn register_player(&mut self, name: &str) -> Result<(), GameError> {
        if self.players.iter().any(|p| p.name == name) {
            return Err(GameError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.players.push(Player::new(name));
        Ok(())
    }

    /// Record a fake definition, at most one per player per round.
    pub fn submit_definition(&mut self, player_name: &str, definition: &str) -> Result<(), GameError> {
        if self.definitions.iter().any(|d| d.player_name == player_name) {
            return Err(GameError::DuplicateSubmission {
                player_name: player_name.to_string(),
            });
        }
        self.definitions.push(DefinitionEntry {
            player_name: player_name.to_string(),
            definition: definition.to_string(),
        });
        Ok(())
    }

    /// Record a vote, at most one per voter per round. The target is not
    /// validated here; unresolvable targets are ignored at tally time.
    pub fn submit_vote(&mut self, voter_name: &str, voted_for_name: &str) -> Result<(), GameError> {
        if self.votes.iter().any(|v| v.voter_name == voter_name) {
            return Err(GameError::DuplicateVote {
                voter_name: voter_name.to_string(),
            });
        }
        self.votes.push(Vote {
            voter_name: voter_name.to_string(),
            voted_for_name: voted_for_name.to_string(),
        });
        Ok(())
    }

    /// The anonymized option set for voting: every submitted definition plus
    /// the sentinel entry carrying the dictionary definition. Order is
    /// submission order; the caller shuffles before broadcasting.
    pub fn voting_options(&self) -> Result<Vec<DefinitionEntry>, GameError> {
        let word = self.current_word.as_ref().ok_or(GameError::NoActiveRound)?;
        let mut options = self.definitions.clone();
        options.push(DefinitionEntry::true_definition(word));
        Ok(options)
    }

    /// Score the round. Per vote: the sentinel target awards the voter +2
    /// (spotting the real definition), a resolvable player target awards
    /// that player +1 (their fake fooled the voter), anything else is
    /// silently ignored. Must be invoked exactly once per round; a second
    /// call double-awards.
    pub fn tally_votes(&mut self) {
        let awards: Vec<(String, u32)> = self
            .votes
            .iter()
            .map(|vote| {
                if vote.voted_for_name == TRUE_DEFINITION {
                    (vote.voter_name.clone(), 2)
                } else {
                    (vote.voted_for_name.clone(), 1)
                }
            })
            .collect();

        for (name, points) in awards {
            if let Some(player) = self.players.iter_mut().find(|p| p.name == name) {
                player.score += points;
            }
        }
    }

    /// Drop this round's definitions and votes. Players and scores persist.
    pub fn reset_round(&mut self) {
        self.definitions.clear();
        self.votes.clear();
    }

    /// Full reset back to an empty session.
    pub fn reset_session(&mut self) {
        self.players.clear();
        self.definitions.clear();
        self.votes.clear();
        self.current_word = None;
    }

    /// Top `n` players by score, descending. Ties keep registration order
    /// (stable sort). Does not mutate scores.
    pub fn top_players(&self, n: usize) -> Vec<Player> {
        let mut ranked = self.players.clone();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(n);
        ranked
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
