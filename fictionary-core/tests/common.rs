use fictionary_core::{GameSession, PhaseController, WordList};
use fictionary_types::{Player, ServerMessage, Word};

/// Creates a single-entry word source so tests know which word gets drawn.
pub fn create_test_words() -> WordList {
    WordList::new(vec![Word {
        word: "firewall".to_string(),
        definition: "A network security system that monitors traffic".to_string(),
    }])
    .unwrap()
}

/// Creates a session with the given players already registered.
pub fn create_session_with_players(names: &[&str]) -> GameSession {
    let mut session = GameSession::new();
    for name in names {
        session
            .register_player(name)
            .unwrap_or_else(|e| panic!("failed to register {name}: {e}"));
    }
    session
}

/// The default controller: two players to start, top three on the podium.
pub fn create_controller() -> PhaseController {
    PhaseController::default()
}

/// Helper to get a player's score by name.
pub fn score_of(session: &GameSession, name: &str) -> u32 {
    session
        .players()
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.score)
        .unwrap_or_else(|| panic!("no player named {name}"))
}

/// Extracts the player list from a `Players` broadcast.
pub fn players_broadcast(broadcasts: &[ServerMessage]) -> &Vec<Player> {
    broadcasts
        .iter()
        .find_map(|m| match m {
            ServerMessage::Players { players } => Some(players),
            _ => None,
        })
        .expect("expected a Players broadcast")
}
