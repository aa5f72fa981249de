mod common;

use battleship_client::domain::{
    BattlefieldRecord, CellDelta, CellRecord, PlayerRecord, PlayerRef, TurnResponse, TurnResult,
};
use battleship_client::{
    CellCriteria, CellFlags, CellId, Coordinate, Game, GameError, Outcome, Phase, PlayerId,
    OPPONENTS,
};
use common::{
    human_cell_id, init_response_for, opponent_cell_id, ships, HUMAN_ID, OPPONENT, OPPONENT_ID,
};

fn active_game(name: &str, size: usize) -> Game {
    let mut game = Game::new();
    let outgoing = game.init(name, size, &ships()).unwrap();
    let response = init_response_for(&outgoing.request);
    game.apply_init_response(outgoing.ticket, response).unwrap();
    game
}

fn turn(cells: &[(CellId, u16)], defeated: Option<PlayerId>) -> TurnResponse {
    TurnResponse {
        cells: cells
            .iter()
            .map(|&(id, flags)| CellDelta { id, flags })
            .collect(),
        result: defeated.map(|id| TurnResult {
            player: PlayerRef { id },
        }),
    }
}

#[test]
fn test_new_game_is_uninitialized() {
    let game = Game::new();
    assert_eq!(game.phase(), Phase::Uninitialized);
    assert!(game.players().is_empty());
    assert!(game.human().is_none());
}

#[test]
fn test_init_builds_unconfirmed_human_board() {
    let mut game = Game::new();
    let outgoing = game.init("Alice", 7, &ships()).unwrap();

    assert_eq!(game.phase(), Phase::AwaitingInit);
    assert_eq!(game.in_flight(), Some(outgoing.ticket));
    assert_eq!(game.players().len(), 1);
    let human = game.human().unwrap();
    assert_eq!(human.name(), "Alice");
    assert!(!human.is_ai_controlled());
    assert_eq!(human.battlefield().cells().len(), 49);
    assert!(human.battlefield().cells().iter().all(|c| c.id().is_none()));
}

#[test]
fn test_init_request_lists_only_ship_coordinates() {
    let mut game = Game::new();
    let outgoing = game.init("Alice", 7, &ships()).unwrap();
    let request = outgoing.request;
    assert_eq!(request.player_name, "Alice");
    assert_eq!(request.opponents, OPPONENTS);
    assert_eq!(request.size, 7);
    let expected: Vec<Coordinate> = ["A1", "B1", "C1", "A3", "A4"]
        .iter()
        .map(|c| Coordinate::from(*c))
        .collect();
    assert_eq!(request.coordinates, expected);
}

#[test]
fn test_init_response_creates_ai_opponent() {
    let game = active_game("Alice", 7);

    assert_eq!(game.phase(), Phase::Active);
    assert_eq!(game.in_flight(), None);
    assert_eq!(game.players().len(), 2);

    let alice = game.find_player_by_name("Alice").unwrap();
    assert!(std::ptr::eq(alice, game.human().unwrap()));
    assert_eq!(alice.id(), Some(HUMAN_ID));
    assert!(!alice.is_ai_controlled());

    let bob = game.find_player_by_name(OPPONENT).unwrap();
    assert_eq!(bob.id(), Some(OPPONENT_ID));
    assert!(bob.is_ai_controlled());
    assert_eq!(bob.battlefield().cells().len(), 49);
    assert!(std::ptr::eq(bob, &game.players()[1]));
}

#[test]
fn test_reconciliation_matches_cells_by_coordinate() {
    let game = active_game("Alice", 7);
    let bob = game.find_player_by_id(OPPONENT_ID).unwrap();
    // payload order was reversed, ids must still follow coordinates
    let cell = bob
        .battlefield()
        .find_cell_by_criteria(&CellCriteria::coordinate("C2"))
        .unwrap();
    assert_eq!(cell.id(), Some(opponent_cell_id(7, 1, 2)));

    let alice = game.human().unwrap();
    assert!(alice.battlefield().cells().iter().all(|c| c.is_confirmed()));
}

#[test]
fn test_ship_coordinates_survive_reconciliation() {
    let game = active_game("Alice", 9);
    let human = game.human().unwrap();
    for coordinate in ships() {
        let cell = game
            .find_player_cell_by_criteria(
                &CellCriteria::coordinate(coordinate.clone()).with_player(HUMAN_ID),
            )
            .unwrap();
        assert!(cell.has_flag(CellFlags::SHIP), "{} lost its ship flag", coordinate);
        assert!(cell.is_confirmed());
    }
    assert_eq!(human.battlefield().coordinates_with(CellFlags::SHIP), ships_sorted());
}

fn ships_sorted() -> Vec<Coordinate> {
    let mut ships = ships();
    ships.sort_by_key(|c| {
        let (row, col) = c.position().unwrap();
        (row, col)
    });
    ships
}

#[test]
fn test_player_scoped_lookup_skips_other_players() {
    let game = active_game("Alice", 7);
    let cell = game
        .find_player_cell_by_criteria(&CellCriteria::coordinate("A1").with_player(OPPONENT_ID))
        .unwrap();
    assert_eq!(cell.id(), Some(opponent_cell_id(7, 0, 0)));

    let err = game
        .find_player_cell_by_criteria(&CellCriteria::id(human_cell_id(7, 0, 0)).with_player(OPPONENT_ID))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_unmatched_coordinate_is_fatal_and_atomic() {
    let mut game = Game::new();
    let outgoing = game.init("Alice", 7, &ships()).unwrap();
    let mut response = init_response_for(&outgoing.request);
    response[0].cells[0].coordinate = Coordinate::from("Z9");

    let err = game
        .apply_init_response(outgoing.ticket, response)
        .unwrap_err();
    assert_eq!(
        err,
        GameError::UnmatchedCoordinate {
            player: "Alice".to_string(),
            coordinate: "Z9".to_string(),
        }
    );
    assert_ne!(err, GameError::NotInitialized);
    assert_eq!(game.phase(), Phase::AwaitingInit);
    assert_eq!(game.players().len(), 1);
    assert_eq!(game.human().unwrap().id(), None);
}

#[test]
fn test_non_square_opponent_payload_is_rejected() {
    let mut game = Game::new();
    let outgoing = game.init("Alice", 7, &ships()).unwrap();
    let mut response = init_response_for(&outgoing.request);
    response[1].cells.pop();

    let err = game
        .apply_init_response(outgoing.ticket, response)
        .unwrap_err();
    assert_eq!(err, GameError::NonSquareBoard(48));
    assert_eq!(game.players().len(), 1);
}

#[test]
fn test_duplicate_player_id_is_rejected() {
    let mut game = Game::new();
    let outgoing = game.init("Alice", 7, &ships()).unwrap();
    let mut response = init_response_for(&outgoing.request);
    response[1].player.id = HUMAN_ID;

    let err = game
        .apply_init_response(outgoing.ticket, response)
        .unwrap_err();
    assert!(matches!(err, GameError::DuplicatePlayer(_)));
}

#[test]
fn test_opponent_size_may_differ_from_human_size() {
    let mut game = Game::new();
    let outgoing = game.init("Alice", 7, &ships()).unwrap();
    let mut response = init_response_for(&outgoing.request);
    response[1] = BattlefieldRecord {
        id: None,
        player: PlayerRecord {
            id: OPPONENT_ID,
            name: OPPONENT.to_string(),
        },
        cells: (0..100)
            .map(|i| CellRecord {
                id: CellId(5000 + i as u64),
                coordinate: Coordinate::from_position(i / 10, i % 10),
                flags: 0,
            })
            .collect(),
    };
    game.apply_init_response(outgoing.ticket, response).unwrap();
    assert_eq!(game.find_player_by_id(OPPONENT_ID).unwrap().battlefield().size(), 10);
}

#[test]
fn test_update_requires_initialized_game() {
    let mut game = Game::new();
    assert_eq!(game.update(CellId(1)).unwrap_err(), GameError::NotInitialized);

    game.init("Alice", 7, &ships()).unwrap();
    assert_eq!(game.update(CellId(1)).unwrap_err(), GameError::NotInitialized);
}

#[test]
fn test_update_addresses_cell_by_server_id() {
    let mut game = active_game("Alice", 7);
    let target = opponent_cell_id(7, 3, 3);
    let outgoing = game.update(target).unwrap();
    assert_eq!(outgoing.request.cell_id, target);
    assert_eq!(game.in_flight(), Some(outgoing.ticket));
}

#[test]
fn test_update_unknown_cell_is_not_found() {
    let mut game = active_game("Alice", 7);
    let err = game.update(CellId(424242)).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(game.in_flight(), None);
}

#[test]
fn test_second_update_while_in_flight_is_rejected() {
    let mut game = active_game("Alice", 7);
    game.update(opponent_cell_id(7, 0, 0)).unwrap();
    assert_eq!(
        game.update(opponent_cell_id(7, 0, 1)).unwrap_err(),
        GameError::TurnInFlight
    );
}

#[test]
fn test_turn_response_replaces_flags_across_players() {
    let mut game = active_game("Alice", 7);
    let target = opponent_cell_id(7, 0, 0);
    let human_cell = human_cell_id(7, 4, 4);
    let outgoing = game.update(target).unwrap();

    let outcome = game
        .apply_turn_response(
            outgoing.ticket,
            turn(
                &[
                    (target, CellFlags::DEAD_SHIP.bits()),
                    (opponent_cell_id(7, 1, 1), CellFlags::SKIP.bits()),
                    (human_cell, CellFlags::DEAD.bits()),
                ],
                None,
            ),
        )
        .unwrap();

    assert_eq!(outcome, None);
    assert_eq!(game.phase(), Phase::Active);
    assert_eq!(game.in_flight(), None);
    let flags = |id| game.find_player_cell_by_criteria(&CellCriteria::id(id)).unwrap().flags();
    assert_eq!(flags(target), CellFlags::DEAD_SHIP);
    assert_eq!(flags(opponent_cell_id(7, 1, 1)), CellFlags::SKIP);
    assert_eq!(flags(human_cell), CellFlags::DEAD);
    assert!(!game.is_targetable(target));
    assert!(!game.is_targetable(human_cell));
    assert!(game.is_targetable(opponent_cell_id(7, 2, 2)));
}

#[test]
fn test_terminal_result_naming_ai_player_is_a_win() {
    let mut game = active_game("Alice", 7);
    let outgoing = game.update(opponent_cell_id(7, 0, 0)).unwrap();

    let outcome = game
        .apply_turn_response(outgoing.ticket, turn(&[(CellId(5), 2)], Some(PlayerId(11))))
        .unwrap();

    assert_eq!(outcome, Some(Outcome::Won));
    assert_eq!(outcome.unwrap().message(), "you won");
    assert_eq!(game.phase(), Phase::Terminal(Outcome::Won));
    assert_eq!(game.update(opponent_cell_id(7, 0, 1)).unwrap_err(), GameError::GameOver);
}

#[test]
fn test_terminal_result_naming_human_is_a_loss() {
    let mut game = active_game("Alice", 7);
    let outgoing = game.update(opponent_cell_id(7, 0, 0)).unwrap();

    let outcome = game
        .apply_turn_response(
            outgoing.ticket,
            turn(&[(opponent_cell_id(7, 0, 0), CellFlags::DEAD.bits())], Some(HUMAN_ID)),
        )
        .unwrap();

    assert_eq!(outcome, Some(Outcome::Lost));
    assert_eq!(game.outcome(), Some(Outcome::Lost));
    assert_eq!(outcome.unwrap().message(), "you lost");
}

#[test]
fn test_unknown_cell_in_turn_response_mutates_nothing() {
    let mut game = active_game("Alice", 7);
    let target = opponent_cell_id(7, 0, 0);
    let outgoing = game.update(target).unwrap();

    let err = game
        .apply_turn_response(
            outgoing.ticket,
            turn(&[(target, CellFlags::DEAD.bits()), (CellId(99_999), 1)], None),
        )
        .unwrap_err();

    assert!(err.is_not_found());
    let cell = game.find_player_cell_by_criteria(&CellCriteria::id(target)).unwrap();
    assert_eq!(cell.flags(), CellFlags::NONE);
    assert_eq!(game.phase(), Phase::Active);
}

#[test]
fn test_unknown_result_player_mutates_nothing() {
    let mut game = active_game("Alice", 7);
    let target = opponent_cell_id(7, 0, 0);
    let outgoing = game.update(target).unwrap();

    let err = game
        .apply_turn_response(
            outgoing.ticket,
            turn(&[(target, CellFlags::DEAD.bits())], Some(PlayerId(77))),
        )
        .unwrap_err();

    assert!(matches!(err, GameError::PlayerNotFound(_)));
    let cell = game.find_player_cell_by_criteria(&CellCriteria::id(target)).unwrap();
    assert_eq!(cell.flags(), CellFlags::NONE);
}

#[test]
fn test_stale_turn_response_is_dropped() {
    let mut game = active_game("Alice", 7);
    let first = game.update(opponent_cell_id(7, 0, 0)).unwrap();
    game.apply_turn_response(first.ticket, turn(&[], None)).unwrap();
    let second = game.update(opponent_cell_id(7, 0, 1)).unwrap();

    let err = game
        .apply_turn_response(
            first.ticket,
            turn(&[(opponent_cell_id(7, 0, 0), CellFlags::DEAD.bits())], None),
        )
        .unwrap_err();
    assert!(matches!(err, GameError::StaleResponse { .. }));
    assert_eq!(game.in_flight(), Some(second.ticket));
    let cell = game
        .find_player_cell_by_criteria(&CellCriteria::id(opponent_cell_id(7, 0, 0)))
        .unwrap();
    assert_eq!(cell.flags(), CellFlags::NONE);
}

#[test]
fn test_reinit_discards_previous_session() {
    let mut game = active_game("Alice", 7);
    let old = game.update(opponent_cell_id(7, 0, 0)).unwrap();

    let outgoing = game.init("Carol", 8, &ships()).unwrap();
    assert_eq!(game.phase(), Phase::AwaitingInit);
    assert_eq!(game.players().len(), 1);
    assert_eq!(game.human().unwrap().name(), "Carol");
    assert!(game.find_player_by_name("Alice").is_err());
    assert_ne!(outgoing.ticket, old.ticket);

    // a late answer from the previous game must not leak into the new one
    let err = game
        .apply_turn_response(old.ticket, turn(&[], None))
        .unwrap_err();
    assert_eq!(err, GameError::UnexpectedResponse("turn"));

    let response = init_response_for(&outgoing.request);
    game.apply_init_response(outgoing.ticket, response).unwrap();
    assert_eq!(game.players().len(), 2);
}

#[test]
fn test_init_response_for_previous_epoch_is_stale() {
    let mut game = Game::new();
    let first = game.init("Alice", 7, &ships()).unwrap();
    let second = game.init("Alice", 7, &ships()).unwrap();

    let err = game
        .apply_init_response(first.ticket, init_response_for(&first.request))
        .unwrap_err();
    assert!(matches!(err, GameError::StaleResponse { .. }));
    game.apply_init_response(second.ticket, init_response_for(&second.request))
        .unwrap();
}

#[test]
fn test_abandon_releases_in_flight_turn() {
    let mut game = active_game("Alice", 7);
    let outgoing = game.update(opponent_cell_id(7, 0, 0)).unwrap();
    assert!(game.abandon(outgoing.ticket));
    assert!(!game.abandon(outgoing.ticket));
    game.update(opponent_cell_id(7, 0, 0)).unwrap();
}

#[test]
fn test_invalid_ship_layout_keeps_previous_session() {
    let mut game = active_game("Alice", 7);
    let err = game
        .init("Carol", 7, &[Coordinate::from("K1")])
        .unwrap_err();
    assert_eq!(err, GameError::InvalidCoordinate("K1".to_string()));
    assert_eq!(game.phase(), Phase::Active);
    assert_eq!(game.human().unwrap().name(), "Alice");
}

#[test]
fn test_init_accepts_boards_wider_than_the_alphabet() {
    assert!(Game::new().init("Alice", 200, &[]).is_ok());

    let mut game = Game::new();
    let outgoing = game.init("Alice", 30, &[]).unwrap();
    let response = init_response_for(&outgoing.request);
    game.apply_init_response(outgoing.ticket, response).unwrap();
    assert_eq!(game.players().len(), 2);
    assert!(game
        .players()
        .iter()
        .all(|p| p.battlefield().cells().iter().all(|c| c.is_confirmed())));
}

#[test]
fn test_truncated_human_record_is_rejected() {
    let mut game = Game::new();
    let outgoing = game.init("Alice", 7, &ships()).unwrap();
    let mut response = init_response_for(&outgoing.request);
    response[0].cells.truncate(3);

    let err = game
        .apply_init_response(outgoing.ticket, response)
        .unwrap_err();
    assert_eq!(
        err,
        GameError::CellCountMismatch {
            player: "Alice".to_string(),
            expected: 49,
            got: 3,
        }
    );
    assert_eq!(game.phase(), Phase::AwaitingInit);
    assert!(game
        .human()
        .unwrap()
        .battlefield()
        .cells()
        .iter()
        .all(|c| !c.is_confirmed()));
}

#[test]
fn test_repeated_coordinate_in_record_is_rejected() {
    let mut game = Game::new();
    let outgoing = game.init("Alice", 7, &ships()).unwrap();
    let mut response = init_response_for(&outgoing.request);
    response[1].cells[1].coordinate = response[1].cells[0].coordinate.clone();
    let repeated = response[1].cells[0].coordinate.as_str().to_string();

    let err = game
        .apply_init_response(outgoing.ticket, response)
        .unwrap_err();
    assert_eq!(
        err,
        GameError::DuplicateCoordinate {
            player: OPPONENT.to_string(),
            coordinate: repeated,
        }
    );
    assert_eq!(game.players().len(), 1);
}

#[test]
fn test_repeated_player_name_in_response_is_rejected() {
    let mut game = Game::new();
    let outgoing = game.init("Alice", 7, &ships()).unwrap();
    let mut response = init_response_for(&outgoing.request);
    let mut twin = response[1].clone();
    twin.player.id = PlayerId(12);
    response.push(twin);

    let err = game
        .apply_init_response(outgoing.ticket, response)
        .unwrap_err();
    assert!(matches!(err, GameError::DuplicatePlayer(_)));
    assert_eq!(game.players().len(), 1);
    assert_eq!(game.phase(), Phase::AwaitingInit);
}
