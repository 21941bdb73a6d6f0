use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use fictionary_core::{PhaseController, WordList, WordSource};
use fictionary_server::coordinator::SessionCoordinator;
use fictionary_server::websocket::ConnectionManager;
use fictionary_server::websocket::connection::ConnectionId;
use fictionary_types::{GamePhase, ServerMessage, TRUE_DEFINITION, Word};

fn fixed_words() -> Box<dyn WordSource> {
    Box::new(
        WordList::new(vec![Word {
            word: "protocol".to_string(),
            definition: "A set of rules that allows data exchange between devices".to_string(),
        }])
        .unwrap(),
    )
}

async fn coordinator_with_observers(
    count: usize,
) -> (Arc<SessionCoordinator>, Vec<UnboundedReceiver<ServerMessage>>) {
    let connections = Arc::new(ConnectionManager::new());
    let mut receivers = Vec::new();
    for _ in 0..count {
        receivers.push(connections.create_connection(ConnectionId::new()).await);
    }

    let coordinator = Arc::new(SessionCoordinator::new(
        connections,
        fixed_words(),
        PhaseController::default(),
    ));
    (coordinator, receivers)
}

fn drain(receiver: &mut UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(message) = receiver.try_recv() {
        messages.push(message);
    }
    messages
}

#[tokio::test]
async fn connect_snapshot_goes_only_to_the_late_joiner() {
    let (coordinator, mut receivers) = coordinator_with_observers(1).await;
    coordinator.join("alice").await;
    drain(&mut receivers[0]);

    let late_id = ConnectionId::new();
    let mut late_receiver = coordinator.connections().create_connection(late_id).await;
    coordinator.handle_connect(late_id).await;

    let messages = drain(&mut late_receiver);
    assert_eq!(messages.len(), 2);
    let ServerMessage::Players { players } = &messages[0] else {
        panic!("expected Players first, got {messages:?}");
    };
    assert_eq!(players.len(), 1);
    assert_eq!(
        messages[1],
        ServerMessage::PhaseChanged {
            phase: GamePhase::Registration
        }
    );

    // Existing connections are not re-sent state they already hold.
    assert!(drain(&mut receivers[0]).is_empty());
}

#[tokio::test]
async fn duplicate_join_error_is_announced_to_everyone() {
    let (coordinator, mut receivers) = coordinator_with_observers(3).await;

    coordinator.join("alice").await;
    coordinator.join("alice").await;

    for receiver in &mut receivers {
        let messages = drain(receiver);
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], ServerMessage::Players { .. }));
        // The error goes to all observers, not just the offender.
        let ServerMessage::Error { message } = &messages[1] else {
            panic!("expected a broadcast error, got {:?}", messages[1]);
        };
        assert!(message.contains("alice"));
    }
}

#[tokio::test]
async fn start_game_with_one_player_changes_nothing() {
    let (coordinator, mut receivers) = coordinator_with_observers(1).await;
    coordinator.join("solo").await;
    drain(&mut receivers[0]);

    coordinator.start_game().await;

    let messages = drain(&mut receivers[0]);
    assert_eq!(messages.len(), 1);
    assert!(matches!(messages[0], ServerMessage::Error { .. }));
}

#[tokio::test]
async fn full_game_flow_over_the_gateway() {
    let (coordinator, mut receivers) = coordinator_with_observers(3).await;

    coordinator.join("a").await;
    coordinator.join("b").await;
    coordinator.join("c").await;
    coordinator.start_game().await;

    let messages = drain(&mut receivers[0]);
    assert!(messages.contains(&ServerMessage::NewWord {
        word: "protocol".to_string()
    }));
    assert!(messages.contains(&ServerMessage::PhaseChanged {
        phase: GamePhase::Definition
    }));
    // The definition never rides along with the word.
    assert!(
        !serde_json::to_string(&messages)
            .unwrap()
            .contains("set of rules")
    );
    for receiver in &mut receivers[1..] {
        drain(receiver);
    }

    coordinator.submit_definition("a", "a diplomatic handshake").await;
    coordinator.submit_definition("b", "a courtroom transcript").await;
    coordinator.start_voting().await;

    let messages = drain(&mut receivers[0]);
    let options = messages
        .iter()
        .find_map(|m| match m {
            ServerMessage::VotingOptions { options } => Some(options),
            _ => None,
        })
        .expect("expected voting options");
    assert_eq!(options.len(), 3);
    assert_eq!(options.iter().filter(|o| o.is_true_definition()).count(), 1);
    for receiver in &mut receivers[1..] {
        drain(receiver);
    }

    coordinator.vote("a", TRUE_DEFINITION).await;
    coordinator.vote("b", "a").await;
    coordinator.vote("c", "b").await;
    coordinator.end_voting().await;

    // Every observer sees the same final scores: a=3, b=1, c=0.
    for receiver in &mut receivers {
        let messages = drain(receiver);
        let players = messages
            .iter()
            .rev()
            .find_map(|m| match m {
                ServerMessage::Players { players } => Some(players),
                _ => None,
            })
            .expect("expected a score broadcast");
        let scores: Vec<(&str, u32)> = players
            .iter()
            .map(|p| (p.name.as_str(), p.score))
            .collect();
        assert_eq!(scores, vec![("a", 3), ("b", 1), ("c", 0)]);
        assert!(messages.contains(&ServerMessage::PhaseChanged {
            phase: GamePhase::Results
        }));
    }

    coordinator.end_game().await;
    let messages = drain(&mut receivers[0]);
    let ServerMessage::GameOver { top_players } = &messages[0] else {
        panic!("expected the podium");
    };
    assert_eq!(top_players[0].name, "a");
    assert_eq!(top_players[0].score, 3);
}

#[tokio::test]
async fn racing_duplicate_submissions_first_one_wins() {
    let (coordinator, mut receivers) = coordinator_with_observers(1).await;
    coordinator.join("a").await;
    coordinator.join("b").await;
    coordinator.start_game().await;
    drain(&mut receivers[0]);

    let first = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.submit_definition("a", "first").await })
    };
    let second = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.submit_definition("a", "second").await })
    };
    first.await.unwrap();
    second.await.unwrap();

    let messages = drain(&mut receivers[0]);
    let updates = messages
        .iter()
        .filter(|m| matches!(m, ServerMessage::DefinitionsUpdated { .. }))
        .count();
    let errors = messages
        .iter()
        .filter(|m| matches!(m, ServerMessage::Error { .. }))
        .count();
    assert_eq!(updates, 1, "exactly one submission is applied");
    assert_eq!(errors, 1, "the loser is rejected as a duplicate");
}

#[tokio::test]
async fn malformed_payloads_become_session_errors() {
    let (coordinator, mut receivers) = coordinator_with_observers(2).await;

    coordinator
        .announce_malformed("unknown variant `Dance`".to_string())
        .await;

    for receiver in &mut receivers {
        let messages = drain(receiver);
        assert_eq!(messages.len(), 1);
        let ServerMessage::Error { message } = &messages[0] else {
            panic!("expected an error broadcast");
        };
        assert!(message.contains("malformed action"));
    }
}

#[test]
fn wire_format_matches_the_front_end_contract() {
    let message = ServerMessage::PhaseChanged {
        phase: GamePhase::Voting,
    };
    assert_eq!(
        serde_json::to_string(&message).unwrap(),
        r#"{"PhaseChanged":{"phase":"voting"}}"#
    );

    let message = ServerMessage::VotingOptions {
        options: vec![fictionary_types::DefinitionEntry {
            player_name: "correct".to_string(),
            definition: "the real one".to_string(),
        }],
    };
    assert_eq!(
        serde_json::to_string(&message).unwrap(),
        r#"{"VotingOptions":{"options":[{"playerName":"correct","definition":"the real one"}]}}"#
    );

    let inbound = r#"{"Vote":{"voterName":"alice","votedForName":"correct"}}"#;
    let parsed: fictionary_types::ClientMessage = serde_json::from_str(inbound).unwrap();
    assert!(matches!(
        parsed,
        fictionary_types::ClientMessage::Vote { .. }
    ));
}
