//! Integration tests for rooms, matchmaking and the round lifecycle.

use std::time::Duration;

use cherrypick_protocol::{
    ClientMessage, GameMode, GameStatus, Guess, PlayerId, Recipient, Room, RoomId, ServerMessage,
};
use cherrypick_room::{
    BotPolicy, Effects, RoomConfig, RoomError, RoomRegistry, SessionOrchestrator, TimerRequest,
};

// =========================================================================
// Helpers
// =========================================================================

/// Bots play a fixed script: the n-th living bot guesses `script[n]`.
struct ScriptedBots(Vec<Guess>);

impl BotPolicy for ScriptedBots {
    fn generate_guesses(&mut self, room: &Room) -> Vec<(PlayerId, Guess)> {
        room.players
            .iter()
            .filter(|p| p.is_bot && p.is_alive())
            .zip(self.0.iter().cycle())
            .map(|(p, g)| (p.id, *g))
            .collect()
    }
}

fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

fn registry() -> RoomRegistry {
    RoomRegistry::with_seed(RoomConfig::default(), 7)
}

fn orchestrator(config: RoomConfig, bots: Vec<Guess>) -> SessionOrchestrator<ScriptedBots> {
    SessionOrchestrator::new(RoomRegistry::with_seed(config, 7), ScriptedBots(bots))
}

fn room_of(orch: &SessionOrchestrator<ScriptedBots>, player: u64) -> Room {
    orch.registry()
        .get_room_by_connection(pid(player))
        .cloned()
        .expect("player should be seated")
}

fn event_names(effects: &Effects) -> Vec<&'static str> {
    effects
        .messages
        .iter()
        .map(|(_, msg)| match msg {
            ServerMessage::Welcome { .. } => "welcome",
            ServerMessage::RoomUpdate { .. } => "room_update",
            ServerMessage::GameStarted { .. } => "game_started",
            ServerMessage::PlayerLocked { .. } => "player_locked",
            ServerMessage::RoundResult { .. } => "round_result",
            ServerMessage::NewRound { .. } => "new_round",
            ServerMessage::GameOver { .. } => "game_over",
            ServerMessage::PlayerLeft { .. } => "player_left",
            ServerMessage::Queued { .. } => "queued",
            ServerMessage::HeartbeatAck { .. } => "heartbeat_ack",
            ServerMessage::Error { .. } => "error",
        })
        .collect()
}

/// Opens a MULTIPLAYER lobby hosted by player 1 and seats `others`.
fn lobby(orch: &mut SessionOrchestrator<ScriptedBots>, others: &[u64]) -> RoomId {
    orch.create_room(pid(1), "Host", "cherry", GameMode::Multiplayer);
    let room_id = room_of(orch, 1).id;
    for id in others {
        orch.join_room(pid(*id), &room_id, &format!("p{id}"), "peach");
    }
    room_id
}

// =========================================================================
// Registry
// =========================================================================

#[test]
fn test_create_room_seats_the_host() {
    let mut reg = registry();
    let room = reg
        .create_room(pid(1), "Ana", "cherry", GameMode::Multiplayer)
        .unwrap()
        .clone();

    assert_eq!(room.status, GameStatus::Lobby);
    assert_eq!(room.round_number, 0);
    assert_eq!(room.host_id, pid(1));
    assert_eq!(room.players.len(), 1);
    assert!(room.players[0].is_host);
    assert!(room.players[0].is_ready);
    assert_eq!(room.players[0].lives, 5);
    assert_eq!(reg.room_of(pid(1)), Some(&room.id));
}

#[test]
fn test_room_codes_use_the_unambiguous_alphabet() {
    let mut reg = registry();
    for id in 1..=50 {
        let room = reg
            .create_room(pid(id), "p", "x", GameMode::Multiplayer)
            .unwrap();
        let code = room.id.as_str();
        assert_eq!(code.len(), 6);
        assert!(code.bytes().all(|b| RoomConfig::CODE_ALPHABET.contains(&b)));
    }
    assert_eq!(reg.room_count(), 50);
}

#[test]
fn test_code_space_exhaustion_is_reported() {
    let config = RoomConfig {
        code_length: 1,
        max_code_attempts: 500,
        ..RoomConfig::default()
    };
    let mut reg = RoomRegistry::with_seed(config, 1);
    let alphabet = RoomConfig::CODE_ALPHABET.len() as u64;
    for id in 0..alphabet {
        reg.create_room(pid(id), "p", "x", GameMode::Multiplayer)
            .unwrap();
    }
    let err = reg
        .create_room(pid(999), "p", "x", GameMode::Multiplayer)
        .unwrap_err();
    assert_eq!(err, RoomError::CodeSpaceExhausted);
}

#[test]
fn test_one_seat_per_connection() {
    let mut reg = registry();
    let first = reg
        .create_room(pid(1), "Ana", "x", GameMode::Multiplayer)
        .unwrap()
        .id
        .clone();
    let err = reg
        .create_room(pid(1), "Ana", "x", GameMode::OneVOne)
        .unwrap_err();
    assert_eq!(err, RoomError::AlreadyInRoom(pid(1), first.clone()));

    let err = reg.join_room(pid(1), &first, "Ana", "x").unwrap_err();
    assert_eq!(err, RoomError::AlreadyInRoom(pid(1), first));
    assert_eq!(reg.room_count(), 1);
}

#[test]
fn test_join_is_case_insensitive() {
    let mut reg = registry();
    let code = reg
        .create_room(pid(1), "Ana", "x", GameMode::Multiplayer)
        .unwrap()
        .id
        .clone();
    let lower = RoomId::new(code.as_str().to_lowercase());

    let room = reg.join_room(pid(2), &lower, "Bo", "y").unwrap();
    assert_eq!(room.players.len(), 2);
    assert!(!room.players[1].is_host);
    assert!(!room.players[1].is_ready);
}

#[test]
fn test_join_unknown_room() {
    let mut reg = registry();
    let err = reg
        .join_room(pid(1), &RoomId::new("NOPE22"), "Ana", "x")
        .unwrap_err();
    assert_eq!(err, RoomError::RoomNotFound(RoomId::new("NOPE22")));
    assert_eq!(err.to_string(), "Room not found");
    assert_eq!(reg.room_of(pid(1)), None);
}

#[test]
fn test_full_room_is_left_untouched() {
    let mut reg = registry();
    let code = reg
        .create_room(pid(1), "Ana", "x", GameMode::OneVOne)
        .unwrap()
        .id
        .clone();
    reg.join_room(pid(2), &code, "Bo", "y").unwrap();
    let before = reg.get_room(&code).cloned();

    let err = reg.join_room(pid(3), &code, "Cy", "z").unwrap_err();
    assert_eq!(err, RoomError::RoomFull(code.clone()));
    assert_eq!(reg.get_room(&code).cloned(), before);
    assert_eq!(reg.room_of(pid(3)), None);
}

#[test]
fn test_multiplayer_capacity_is_five() {
    let mut reg = registry();
    let code = reg
        .create_room(pid(1), "Ana", "x", GameMode::Multiplayer)
        .unwrap()
        .id
        .clone();
    for id in 2..=5 {
        reg.join_room(pid(id), &code, "p", "x").unwrap();
    }
    assert!(matches!(
        reg.join_room(pid(6), &code, "p", "x"),
        Err(RoomError::RoomFull(_))
    ));
}

#[test]
fn test_join_after_start_is_refused() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    let room_id = lobby(&mut orch, &[2]);
    orch.start_game(pid(1));

    let effects = orch.join_room(pid(3), &room_id, "Late", "x");
    assert_eq!(event_names(&effects), vec!["error"]);
    let (to, msg) = &effects.messages[0];
    assert_eq!(*to, Recipient::Player(pid(3)));
    assert_eq!(
        *msg,
        ServerMessage::Error {
            message: "Game in progress".into()
        }
    );
}

#[test]
fn test_host_migrates_to_the_earliest_human() {
    let mut reg = registry();
    let code = reg
        .create_room(pid(1), "Ana", "x", GameMode::Multiplayer)
        .unwrap()
        .id
        .clone();
    reg.join_room(pid(2), &code, "Bo", "y").unwrap();
    reg.join_room(pid(3), &code, "Cy", "z").unwrap();

    let departure = reg.remove_player(pid(1)).unwrap();
    assert_eq!(departure.new_host, Some(pid(2)));
    assert!(!departure.room_destroyed());

    let room = reg.get_room(&code).unwrap();
    assert_eq!(room.host_id, pid(2));
    assert!(room.player(pid(2)).unwrap().is_host);
    assert_eq!(reg.room_of(pid(1)), None);
}

#[test]
fn test_last_human_leaving_destroys_the_room() {
    let mut orch = orchestrator(RoomConfig::default(), vec![30, 60]);
    orch.create_room(pid(1), "Ana", "x", GameMode::OneVOne);
    let room_id = room_of(&orch, 1).id;
    orch.start_game(pid(1));
    assert_eq!(room_of(&orch, 1).players.len(), 3);

    let effects = orch.disconnect(pid(1));
    assert!(effects.messages.is_empty());
    assert_eq!(effects.timers, vec![TimerRequest::Cancel { room_id: room_id.clone() }]);
    assert!(orch.registry().get_room(&room_id).is_none());
    assert_eq!(orch.registry().room_count(), 0);
}

#[test]
fn test_remove_unseated_player_is_a_no_op() {
    let mut reg = registry();
    assert!(reg.remove_player(pid(42)).is_none());
}

// =========================================================================
// Matchmaking
// =========================================================================

#[test]
fn test_two_tickets_make_a_one_v_one_room() {
    let mut reg = registry();
    assert!(reg.enqueue(pid(1), "Ana", "x").is_none());
    assert_eq!(reg.queue_position(pid(1)), Some(1));

    let room = reg.enqueue(pid(2), "Bo", "y").unwrap().clone();
    assert_eq!(room.mode, GameMode::OneVOne);
    assert_eq!(room.status, GameStatus::Lobby);
    assert_eq!(room.host_id, pid(1));
    assert!(room.players.iter().all(|p| p.is_ready));
    assert_eq!(reg.queue_len(), 0);
    assert_eq!(reg.room_of(pid(2)), Some(&room.id));
}

#[test]
fn test_queue_is_fifo() {
    let mut reg = registry();
    reg.enqueue(pid(1), "a", "x");
    let first = reg.enqueue(pid(2), "b", "x").unwrap().id.clone();
    reg.enqueue(pid(3), "c", "x");
    let second = reg.enqueue(pid(4), "d", "x").unwrap().clone();

    assert_ne!(first, second.id);
    assert_eq!(second.host_id, pid(3));
}

#[test]
fn test_duplicate_and_seated_tickets_are_ignored() {
    let mut reg = registry();
    reg.enqueue(pid(1), "a", "x");
    assert!(reg.enqueue(pid(1), "a", "x").is_none());
    assert_eq!(reg.queue_len(), 1);

    reg.create_room(pid(9), "host", "x", GameMode::Multiplayer)
        .unwrap();
    assert!(reg.enqueue(pid(9), "host", "x").is_none());
    assert_eq!(reg.queue_len(), 1);
}

#[test]
fn test_disconnect_withdraws_the_ticket() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    let effects = orch.join_queue(pid(1), "Ana", "x");
    assert_eq!(
        effects.messages,
        vec![(Recipient::Player(pid(1)), ServerMessage::Queued { position: 1 })]
    );

    orch.disconnect(pid(1));
    assert_eq!(orch.registry().queue_len(), 0);

    let effects = orch.join_queue(pid(2), "Bo", "y");
    assert_eq!(event_names(&effects), vec!["queued"]);
}

#[test]
fn test_leave_queue() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    orch.join_queue(pid(1), "Ana", "x");
    let effects = orch.handle(pid(1), ClientMessage::LeaveQueue);
    assert!(effects.is_empty());
    assert_eq!(orch.registry().queue_len(), 0);
}

#[test]
fn test_matched_pair_gets_a_room_update() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    orch.join_queue(pid(1), "Ana", "x");
    let effects = orch.join_queue(pid(2), "Bo", "y");

    let room_id = room_of(&orch, 1).id;
    assert_eq!(event_names(&effects), vec!["room_update"]);
    assert_eq!(effects.messages[0].0, Recipient::Room(room_id.clone()));
    assert_eq!(orch.registry().members(&room_id), vec![pid(1), pid(2)]);
}

// =========================================================================
// Lifecycle
// =========================================================================

#[test]
fn test_start_game_adds_bots_to_one_v_one() {
    let mut orch = orchestrator(RoomConfig::default(), vec![10, 20]);
    orch.create_room(pid(1), "Ana", "x", GameMode::OneVOne);

    let effects = orch.start_game(pid(1));
    assert_eq!(event_names(&effects), vec!["room_update", "game_started"]);

    let room = room_of(&orch, 1);
    assert_eq!(room.status, GameStatus::Playing);
    assert_eq!(room.round_number, 1);
    let names: Vec<&str> = room.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Sour Grape", "Coconut"]);
    assert!(room.players[1..].iter().all(|p| p.is_bot && p.is_ready));
    assert!(room.players[1..].iter().all(|p| p.id.0 >= 1 << 48));
    // Bots are not connections.
    assert_eq!(orch.registry().members(&room.id), vec![pid(1)]);
}

#[test]
fn test_multiplayer_start_adds_no_bots() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    lobby(&mut orch, &[2, 3]);
    orch.start_game(pid(1));
    let room = room_of(&orch, 1);
    assert_eq!(room.players.len(), 3);
    assert!(room.players.iter().all(|p| !p.is_bot));
}

#[test]
fn test_only_the_host_starts_and_only_once() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    lobby(&mut orch, &[2]);

    assert!(orch.start_game(pid(2)).is_empty());
    assert_eq!(room_of(&orch, 1).status, GameStatus::Lobby);

    assert!(!orch.start_game(pid(1)).is_empty());
    assert!(orch.start_game(pid(1)).is_empty());
    assert_eq!(room_of(&orch, 1).round_number, 1);
}

#[test]
fn test_guesses_lock_until_everyone_is_in() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    let room_id = lobby(&mut orch, &[2]);
    orch.start_game(pid(1));

    let effects = orch.submit_guess(pid(1), 50);
    assert_eq!(
        effects.messages,
        vec![(
            Recipient::Room(room_id.clone()),
            ServerMessage::PlayerLocked { player_id: pid(1) }
        )]
    );
    assert!(effects.timers.is_empty());

    let effects = orch.submit_guess(pid(2), 30);
    assert_eq!(event_names(&effects), vec!["round_result"]);
    let ServerMessage::RoundResult { room, result } = &effects.messages[0].1 else {
        panic!("expected a round result");
    };
    assert_eq!(result.target_number, 32);
    assert_eq!(result.winner_id, Some(pid(2)));
    assert_eq!(result.eliminated_ids, vec![pid(1)]);
    assert_eq!(room.status, GameStatus::Reveal);
    assert_eq!(room.player(pid(1)).unwrap().lives, 4);
    assert_eq!(room.last_result.as_ref(), Some(result));

    assert_eq!(
        effects.timers,
        vec![TimerRequest::Arm {
            room_id,
            round: 1,
            delay: Duration::from_secs(5),
        }]
    );
}

#[test]
fn test_invalid_guesses_are_ignored() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    lobby(&mut orch, &[2]);

    // Lobby: not playing yet.
    assert!(orch.submit_guess(pid(1), 10).is_empty());
    orch.start_game(pid(1));

    assert!(orch.submit_guess(pid(1), 101).is_empty());
    assert!(orch.submit_guess(pid(1), -1).is_empty());
    assert!(orch.submit_guess(pid(99), 10).is_empty());
    assert_eq!(room_of(&orch, 1).player(pid(1)).unwrap().current_guess, None);

    // Both bounds are valid.
    assert!(!orch.submit_guess(pid(1), 0).is_empty());
    assert!(!orch.submit_guess(pid(2), 100).is_empty());
}

#[test]
fn test_solo_human_against_bots_resolves_on_submit() {
    let mut orch = orchestrator(RoomConfig::default(), vec![40, 40]);
    orch.create_room(pid(1), "Ana", "x", GameMode::OneVOne);
    orch.start_game(pid(1));

    let effects = orch.submit_guess(pid(1), 40);
    let ServerMessage::RoundResult { room, result } = &effects.messages[0].1 else {
        panic!("expected a round result");
    };
    // Humans come first in the sheet, so the tie goes to the human.
    assert_eq!(result.winner_id, Some(pid(1)));
    assert_eq!(result.eliminated_ids.len(), 2);
    assert_eq!(result.all_guesses.len(), 3);
    assert!(room.players[1..].iter().all(|p| p.lives == 4));
}

/// Two bots that take turns playing 30 and 31, so each wins every other
/// round.
struct AlternatingBots;

impl BotPolicy for AlternatingBots {
    fn generate_guesses(&mut self, room: &Room) -> Vec<(PlayerId, Guess)> {
        let script: [Guess; 2] = if room.round_number % 2 == 1 {
            [30, 31]
        } else {
            [31, 30]
        };
        room.players
            .iter()
            .filter(|p| p.is_bot && p.is_alive())
            .zip(script)
            .map(|(p, g)| (p.id, g))
            .collect()
    }
}

#[test]
fn test_bots_play_out_rounds_after_the_human_is_out() {
    let config = RoomConfig {
        starting_lives: 2,
        ..RoomConfig::default()
    };
    let mut orch = SessionOrchestrator::new(RoomRegistry::with_seed(config, 7), AlternatingBots);
    orch.create_room(pid(1), "Ana", "x", GameMode::OneVOne);
    let room_id = orch.registry().room_of(pid(1)).cloned().unwrap();
    orch.start_game(pid(1));

    // 90 is never close to 0.8 × the mean; a different bot wins each round.
    orch.submit_guess(pid(1), 90);
    orch.advance(&room_id, 1);
    orch.submit_guess(pid(1), 90);

    let room = orch.registry().get_room(&room_id).cloned().unwrap();
    let lives: Vec<(bool, u8)> = room.players.iter().map(|p| (p.is_bot, p.lives)).collect();
    assert_eq!(lives, vec![(false, 0), (true, 1), (true, 1)]);

    // Nobody can submit in round 3, so it resolves on the spot.
    let effects = orch.advance(&room_id, 2);
    assert_eq!(
        event_names(&effects),
        vec!["new_round", "room_update", "round_result"]
    );
    assert!(matches!(
        effects.timers.as_slice(),
        [TimerRequest::Arm { round: 3, .. }]
    ));
    let ServerMessage::RoundResult { result, .. } = &effects.messages[2].1 else {
        panic!("expected a round result");
    };
    assert_eq!(result.all_guesses.len(), 2);
    assert!(result.all_guesses.get(&pid(1)).is_none());

    let effects = orch.advance(&room_id, 3);
    assert_eq!(event_names(&effects), vec!["game_over", "room_update"]);
    let ServerMessage::GameOver { winner, room } = &effects.messages[0].1 else {
        panic!("expected game over");
    };
    assert!(winner.as_ref().is_some_and(|p| p.is_bot));
    assert_eq!(room.status, GameStatus::GameOver);
}

#[test]
fn test_advance_starts_the_next_round() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    let room_id = lobby(&mut orch, &[2]);
    orch.start_game(pid(1));
    orch.submit_guess(pid(1), 50);
    orch.submit_guess(pid(2), 30);

    let effects = orch.advance(&room_id, 1);
    assert_eq!(event_names(&effects), vec!["new_round", "room_update"]);

    let room = room_of(&orch, 1);
    assert_eq!(room.status, GameStatus::Playing);
    assert_eq!(room.round_number, 2);
    assert!(room.last_result.is_none());
    assert!(room.players.iter().all(|p| p.current_guess.is_none()));
}

#[test]
fn test_stale_advance_is_discarded() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    let room_id = lobby(&mut orch, &[2]);
    orch.start_game(pid(1));

    // Not in reveal yet.
    assert!(orch.advance(&room_id, 1).is_empty());

    orch.submit_guess(pid(1), 50);
    orch.submit_guess(pid(2), 30);
    assert!(orch.advance(&room_id, 7).is_empty());
    assert!(orch.advance(&RoomId::new("GONE99"), 1).is_empty());
    assert_eq!(room_of(&orch, 1).status, GameStatus::Reveal);

    assert!(!orch.advance(&room_id, 1).is_empty());
    // A second fire for the same round arrives too late.
    assert!(orch.advance(&room_id, 1).is_empty());
}

#[test]
fn test_game_over_names_the_last_survivor() {
    let config = RoomConfig {
        starting_lives: 1,
        ..RoomConfig::default()
    };
    let mut orch = orchestrator(config, vec![]);
    let room_id = lobby(&mut orch, &[2]);
    orch.start_game(pid(1));
    orch.submit_guess(pid(1), 50);
    orch.submit_guess(pid(2), 30);

    let effects = orch.advance(&room_id, 1);
    assert_eq!(event_names(&effects), vec!["game_over", "room_update"]);
    let ServerMessage::GameOver { winner, room } = &effects.messages[0].1 else {
        panic!("expected game over");
    };
    assert_eq!(winner.as_ref().map(|p| p.id), Some(pid(2)));
    assert_eq!(room.status, GameStatus::GameOver);
    assert!(effects.timers.is_empty());

    // Terminal: nothing moves it on.
    assert!(orch.start_game(pid(1)).is_empty());
    assert!(orch.submit_guess(pid(2), 10).is_empty());
}

#[test]
fn test_dead_players_cannot_guess() {
    let config = RoomConfig {
        starting_lives: 1,
        ..RoomConfig::default()
    };
    let mut orch = orchestrator(config, vec![]);
    let room_id = lobby(&mut orch, &[2, 3]);
    orch.start_game(pid(1));
    orch.submit_guess(pid(1), 50);
    orch.submit_guess(pid(2), 30);
    orch.submit_guess(pid(3), 31);
    // mean 37 → target 30: player 2 wins, 1 and 3 are out.
    let effects = orch.advance(&room_id, 1);
    assert_eq!(event_names(&effects), vec!["game_over", "room_update"]);

    let room = room_of(&orch, 1);
    assert_eq!(room.player(pid(1)).unwrap().lives, 0);
    assert!(orch.submit_guess(pid(1), 10).is_empty());
}

#[test]
fn test_leaver_unblocks_the_round() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    let room_id = lobby(&mut orch, &[2, 3]);
    orch.start_game(pid(1));
    orch.submit_guess(pid(1), 50);
    orch.submit_guess(pid(2), 30);

    let effects = orch.disconnect(pid(3));
    assert_eq!(
        event_names(&effects),
        vec!["player_left", "room_update", "round_result"]
    );
    let ServerMessage::PlayerLeft { players } = &effects.messages[0].1 else {
        panic!("expected player left");
    };
    assert_eq!(players.len(), 2);
    assert!(matches!(
        effects.timers.as_slice(),
        [TimerRequest::Arm { round: 1, .. }]
    ));
    assert_eq!(orch.registry().members(&room_id), vec![pid(1), pid(2)]);
}

#[test]
fn test_host_leaving_mid_game_hands_over() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    lobby(&mut orch, &[2, 3]);
    orch.start_game(pid(1));

    let effects = orch.disconnect(pid(1));
    assert_eq!(event_names(&effects), vec!["player_left", "room_update"]);
    let room = room_of(&orch, 2);
    assert_eq!(room.host_id, pid(2));
    assert_eq!(room.status, GameStatus::Playing);
}

#[test]
fn test_handle_dispatches_client_actions() {
    let mut orch = orchestrator(RoomConfig::default(), vec![]);
    let effects = orch.handle(
        pid(1),
        ClientMessage::CreateRoom {
            name: "Ana".into(),
            avatar: "x".into(),
            mode: GameMode::Multiplayer,
        },
    );
    assert_eq!(event_names(&effects), vec!["room_update"]);
    let code = room_of(&orch, 1).id;

    let effects = orch.handle(
        pid(2),
        ClientMessage::JoinRoom {
            room_id: code.as_str().to_lowercase(),
            name: "Bo".into(),
            avatar: "y".into(),
        },
    );
    assert_eq!(event_names(&effects), vec!["room_update"]);

    assert!(
        orch.handle(pid(1), ClientMessage::Heartbeat { client_time: 5 })
            .is_empty()
    );
    orch.handle(pid(1), ClientMessage::StartGame);
    let effects = orch.handle(pid(1), ClientMessage::SubmitGuess { number: 12 });
    assert_eq!(event_names(&effects), vec!["player_locked"]);
}
