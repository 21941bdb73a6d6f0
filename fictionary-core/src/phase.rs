use rand::seq::SliceRandom;

use fictionary_types::{GameError, GamePhase, ServerMessage};

use crate::session::GameSession;
use crate::words::WordSource;

/// Number of players announced when the game ends.
pub const PODIUM_SIZE: usize = 3;

/// The finite-state machine over `{Registration, Definition, Voting,
/// Results, End}`. Each transition mutates the session and returns the
/// ordered broadcasts it produced; the gateway fans them out.
///
/// Phase values are advisory: clients use them to pick the right view, but
/// the server does not reject actions that arrive out of phase (a vote
/// during Definition is recorded). Tightening this is a deliberate
/// non-change; see DESIGN.md.
#[derive(Debug, Clone)]
pub struct PhaseController {
    min_players: usize,
    podium_size: usize,
}

impl PhaseController {
    pub fn new(min_players: usize, podium_size: usize) -> Self {
        Self {
            min_players,
            podium_size,
        }
    }

    /// Registration -> Definition. Fails if too few players are registered,
    /// leaving the phase unchanged.
    pub fn start_game(
        &self,
        session: &mut GameSession,
        words: &dyn WordSource,
    ) -> Result<Vec<ServerMessage>, GameError> {
        let registered = session.players().len();
        if registered < self.min_players {
            return Err(GameError::InsufficientPlayers {
                required: self.min_players,
                actual: registered,
            });
        }
        self.begin_round(session, words)
    }

    /// Results -> Definition. Same effect as `start_game` without the
    /// player-count check; players are already present.
    pub fn new_round(
        &self,
        session: &mut GameSession,
        words: &dyn WordSource,
    ) -> Result<Vec<ServerMessage>, GameError> {
        self.begin_round(session, words)
    }

    /// Definition -> Voting. Builds the anonymized option set (fakes plus
    /// the sentinel true definition) and shuffles it so submission order
    /// leaks nothing about authorship.
    pub fn start_voting(&self, session: &mut GameSession) -> Result<Vec<ServerMessage>, GameError> {
        let mut options = session.voting_options()?;
        options.shuffle(&mut rand::thread_rng());

        session.set_phase(GamePhase::Voting);
        Ok(vec![
            ServerMessage::VotingOptions { options },
            ServerMessage::PhaseChanged {
                phase: GamePhase::Voting,
            },
        ])
    }

    /// Voting -> Results. Tallies exactly once, then clears the round
    /// artifacts; scores persist.
    pub fn end_voting(&self, session: &mut GameSession) -> Vec<ServerMessage> {
        session.tally_votes();
        session.reset_round();
        session.set_phase(GamePhase::Results);
        vec![
            ServerMessage::Players {
                players: session.players().to_vec(),
            },
            ServerMessage::PhaseChanged {
                phase: GamePhase::Results,
            },
        ]
    }

    /// Terminal announcement from any state: the podium, sorted by score.
    /// The stored phase is left alone so a session can keep playing after
    /// peeking at the standings.
    pub fn end_game(&self, session: &GameSession) -> Vec<ServerMessage> {
        vec![ServerMessage::GameOver {
            top_players: session.top_players(self.podium_size),
        }]
    }

    /// Back to an empty Registration from any state.
    pub fn reset_game(&self, session: &mut GameSession) -> Vec<ServerMessage> {
        session.reset_session();
        session.set_phase(GamePhase::Registration);
        vec![ServerMessage::Players {
            players: Vec::new(),
        }]
    }

    fn begin_round(
        &self,
        session: &mut GameSession,
        words: &dyn WordSource,
    ) -> Result<Vec<ServerMessage>, GameError> {
        let word = words.fetch_random_word().map_err(|e| {
            tracing::error!(error = %e, "word source failed to supply a word");
            GameError::NoActiveRound
        })?;

        session.reset_round();
        let word_text = word.word.clone();
        session.set_current_word(word);
        session.set_phase(GamePhase::Definition);

        Ok(vec![
            ServerMessage::NewWord { word: word_text },
            ServerMessage::PhaseChanged {
                phase: GamePhase::Definition,
            },
        ])
    }
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new(2, PODIUM_SIZE)
    }
}
