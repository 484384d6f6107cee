//! Tests for the backgammon turn engine driven through its public API.

use strictly_backgammon::{
    BoardState, Color, DiceSource, Die, EngineError, Game, Move, Phase, PointId,
};

fn pt(n: u8) -> PointId {
    PointId::field(n).unwrap()
}

fn die(v: u8) -> Die {
    Die::new(v).unwrap()
}

/// Builds a game on `layout` and plays Black's roll so it is ready to move.
fn black_to_move(layout: &[(PointId, Color, usize)], rolls: &[(u8, u8)]) -> Game {
    let board = BoardState::from_layout(layout).unwrap();
    let mut game = Game::new(board, DiceSource::scripted(rolls.iter().copied()).unwrap());
    game.roll_dice().unwrap();
    assert_eq!(*game.tick().phase(), Phase::BlackMove);
    game
}

#[test]
fn test_opening_roll_offers_compound_move() {
    let game = black_to_move(
        &[
            (pt(1), Color::Black, 2),
            (pt(12), Color::Black, 5),
            (pt(17), Color::Black, 3),
            (pt(19), Color::Black, 5),
            (pt(24), Color::White, 2),
            (pt(13), Color::White, 5),
            (pt(8), Color::White, 3),
            (pt(6), Color::White, 5),
        ],
        &[(3, 5)],
    );

    let to_nine = game.legal_moves_to(pt(9)).unwrap();
    assert!(to_nine.contains(&Move::new(pt(1), pt(9), vec![die(3), die(5)], vec![pt(4)])));
    // 1 -> 6 is blocked by White's made point, so only one order works.
    assert_eq!(to_nine.len(), 1);

    let to_six = game.legal_moves_to(pt(6)).unwrap();
    assert!(to_six.is_empty());
}

#[test]
fn test_blocked_entry_skips_turn() {
    let mut game = black_to_move(
        &[
            (PointId::BLACK_BAR, Color::Black, 1),
            (pt(12), Color::Black, 14),
            (pt(1), Color::White, 2),
            (pt(2), Color::White, 2),
            (pt(3), Color::White, 2),
            (pt(4), Color::White, 2),
            (pt(5), Color::White, 2),
            (pt(6), Color::White, 2),
            (pt(13), Color::White, 3),
        ],
        &[(3, 5)],
    );
    let before = game.board().clone();

    assert!(game.legal_moves().unwrap().is_empty());
    assert!(!game.has_possible_moves());

    assert_eq!(*game.tick().phase(), Phase::BlackEnd);
    let info = game.tick();
    assert_eq!(*info.phase(), Phase::WhiteRoll);
    assert_eq!(info.message(), "ROLL DICE");
    assert_eq!(game.board(), &before);
    assert!(game.dice().is_empty());
}

#[test]
fn test_bar_stone_must_enter_first() {
    let mut game = black_to_move(
        &[
            (PointId::BLACK_BAR, Color::Black, 1),
            (pt(12), Color::Black, 14),
            (pt(13), Color::White, 15),
        ],
        &[(3, 5)],
    );

    let moves = game.legal_moves().unwrap();
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|mv| mv.origin() == PointId::BLACK_BAR));
    assert!(game.legal_moves_from(pt(12)).unwrap().is_empty());

    game.apply_move(&Move::single(PointId::BLACK_BAR, pt(3), die(3))).unwrap();
    assert_eq!(game.board().bar_count(Color::Black), 0);
    assert!(!game.legal_moves_from(pt(12)).unwrap().is_empty());
}

#[test]
fn test_hit_sends_blot_to_bar() {
    let mut game = black_to_move(
        &[
            (pt(1), Color::Black, 15),
            (pt(4), Color::White, 1),
            (pt(13), Color::White, 14),
        ],
        &[(3, 5), (2, 1)],
    );

    let snapshot = game
        .apply_move(&Move::single(pt(1), pt(4), die(3)))
        .unwrap();
    assert_eq!(snapshot.count_at(PointId::WHITE_BAR), 1);
    assert_eq!(*snapshot.point(pt(4)).unwrap().color(), Some(Color::Black));
    assert_eq!(game.board().stone_count(Color::White), 15);
    assert_eq!(game.board().stone_count(Color::Black), 15);

    game.apply_move(&Move::single(pt(1), pt(6), die(5))).unwrap();
    assert_eq!(*game.tick().phase(), Phase::BlackEnd);
    assert_eq!(*game.tick().phase(), Phase::WhiteRoll);
    game.roll_dice().unwrap();
    assert_eq!(*game.tick().phase(), Phase::WhiteMove);

    let moves = game.legal_moves().unwrap();
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|mv| mv.origin() == PointId::WHITE_BAR));
}

#[test]
fn test_bear_off_waits_for_last_straggler() {
    let mut game = black_to_move(
        &[
            (pt(14), Color::Black, 1),
            (pt(20), Color::Black, 14),
            (pt(2), Color::White, 15),
        ],
        &[(5, 5)],
    );
    assert_eq!(game.dice().remaining_count(), 4);
    assert!(game.legal_moves_to(PointId::BLACK_HOME).unwrap().is_empty());

    game.apply_move(&Move::single(pt(14), pt(19), die(5))).unwrap();

    let bear_offs = game.legal_moves_to(PointId::BLACK_HOME).unwrap();
    assert!(bear_offs.contains(&Move::single(pt(20), PointId::BLACK_HOME, die(5))));

    game.apply_move(&Move::single(pt(20), PointId::BLACK_HOME, die(5))).unwrap();
    assert_eq!(game.board().home_count(Color::Black), 1);
    assert_eq!(game.dice().remaining_count(), 2);
}

#[test]
fn test_win_is_sticky() {
    let mut game = black_to_move(
        &[
            (PointId::BLACK_HOME, Color::Black, 14),
            (pt(24), Color::Black, 1),
            (pt(13), Color::White, 15),
        ],
        &[(1, 2)],
    );

    let snapshot = game
        .apply_move(&Move::single(pt(24), PointId::BLACK_HOME, die(1)))
        .unwrap();
    assert_eq!(*snapshot.winner(), Some(Color::Black));
    assert_eq!(game.winner(), Some(Color::Black));

    for _ in 0..3 {
        let info = game.tick();
        assert_eq!(*info.phase(), Phase::BlackMove);
        assert_eq!(info.message(), "BLACK WINS!!!");
        assert_eq!(*info.winner(), Some(Color::Black));
    }

    assert_eq!(
        game.roll_dice(),
        Err(EngineError::GameOver {
            winner: Color::Black
        })
    );
    assert!(matches!(
        game.legal_moves(),
        Err(EngineError::GameOver { .. })
    ));
    assert!(matches!(
        game.apply_move(&Move::single(pt(13), pt(11), die(2))),
        Err(EngineError::GameOver { .. })
    ));
}

#[test]
fn test_rejected_move_leaves_state_untouched() {
    let mut game = Game::new(
        BoardState::standard(),
        DiceSource::scripted([(3, 5)]).unwrap(),
    );
    game.roll_dice().unwrap();
    game.tick();
    let board = game.current_board();

    // A die that was never rolled.
    let err = game
        .apply_move(&Move::single(pt(1), pt(3), die(2)))
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalMove { .. }));
    assert_eq!(game.current_board(), board);
    assert_eq!(game.dice().faces(), &[die(3), die(5)]);
    assert_eq!(game.phase(), Phase::BlackMove);
}

#[test]
fn test_out_of_phase_requests() {
    let mut game = Game::new(
        BoardState::standard(),
        DiceSource::scripted([(3, 5)]).unwrap(),
    );
    assert!(matches!(
        game.legal_moves(),
        Err(EngineError::OutOfPhase { phase: Phase::BlackRoll, .. })
    ));
    assert!(matches!(
        game.apply_move(&Move::single(pt(1), pt(4), die(3))),
        Err(EngineError::OutOfPhase { .. })
    ));

    game.roll_dice().unwrap();
    assert!(matches!(
        game.roll_dice(),
        Err(EngineError::OutOfPhase { .. })
    ));
}

#[test]
fn test_exhausted_script_reports_error() {
    let source = DiceSource::scripted(Vec::<(u8, u8)>::new()).unwrap();
    let mut game = Game::new(BoardState::standard(), source);
    assert_eq!(game.roll_dice(), Err(EngineError::DiceExhausted));
    assert!(!game.is_dice_committed());
    assert_eq!(game.phase(), Phase::BlackRoll);
}

#[test]
fn test_move_shifts_exactly_one_stone_each_turn() {
    let mut game = Game::new(
        BoardState::standard(),
        DiceSource::scripted([(3, 5), (3, 5)]).unwrap(),
    );
    game.roll_dice().unwrap();
    game.tick();

    let before = game.current_board();
    let after = game
        .apply_move(&Move::single(pt(12), pt(17), die(5)))
        .unwrap();
    for view in after.points() {
        let expected = match view.point() {
            p if *p == pt(12) => before.count_at(*p) - 1,
            p if *p == pt(17) => before.count_at(*p) + 1,
            p => before.count_at(*p),
        };
        assert_eq!(*view.count(), expected, "at {}", view.point());
    }

    game.apply_move(&Move::single(pt(12), pt(15), die(3))).unwrap();
    game.tick();
    game.tick();
    game.roll_dice().unwrap();
    game.tick();
    assert_eq!(game.phase(), Phase::WhiteMove);

    // White runs the mirrored pair the other way.
    let before = game.current_board();
    game.apply_move(&Move::single(pt(13), pt(8), die(5))).unwrap();
    let after = game
        .apply_move(&Move::single(pt(13), pt(10), die(3)))
        .unwrap();
    assert_eq!(after.count_at(pt(13)), before.count_at(pt(13)) - 2);
    assert_eq!(after.count_at(pt(8)), before.count_at(pt(8)) + 1);
    assert_eq!(after.count_at(pt(10)), 1);
    assert_eq!(after.count_at(pt(12)), 3);
    assert_eq!(after.count_at(pt(15)), 1);
}
