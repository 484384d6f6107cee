//! Property checks over positions reached by random play.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use strictly_backgammon::invariants::{BoardInvariants, InvariantSet};
use strictly_backgammon::{
    BoardState, Color, DiceMode, DiceSource, EngineConfig, Game, PhaseKind, PointId,
    STONES_PER_COLOR, run_soak,
};

/// True if `color` may stop on `id` on `board`.
fn open_for(board: &BoardState, id: PointId, color: Color) -> bool {
    if !id.is_field() {
        return true;
    }
    let point = board.point(id);
    point.color() != Some(color.opponent()) || point.len() <= 1
}

/// Plays a seeded random game for at most `ticks` ticks, checking every
/// generated move on the way.
fn check_random_game(seed: u64, ticks: usize) {
    let mut game = Game::new(BoardState::standard(), DiceSource::random(Some(seed)));
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..ticks {
        if game.winner().is_some() {
            break;
        }
        match game.phase().kind() {
            PhaseKind::Roll if !game.is_dice_committed() => {
                game.roll_dice().unwrap();
            }
            PhaseKind::Move => {
                let color = game.phase().color();
                let moves = game.legal_moves().unwrap();

                for mv in &moves {
                    assert!(mv.dice().len() <= game.dice().remaining_count());
                    assert_eq!(mv.waypoints().len() + 1, mv.dice().len());
                    assert!(open_for(game.board(), mv.destination(), color), "{mv}");

                    let mut scratch = game.board().clone();
                    scratch.apply_move(mv).unwrap();
                    assert_eq!(scratch.stone_count(Color::Black), STONES_PER_COLOR);
                    assert_eq!(scratch.stone_count(Color::White), STONES_PER_COLOR);
                    assert!(BoardInvariants::check_all(&scratch).is_ok());
                }

                if game.board().bar_count(color) > 0 {
                    assert!(moves.iter().all(|mv| mv.origin() == PointId::bar(color)));
                }

                if let Some(mv) = moves.iter().choose(&mut rng) {
                    let mv = mv.clone();
                    game.apply_move(&mv).unwrap();
                }
            }
            _ => {}
        }
        game.tick();
    }
}

#[test]
fn test_generated_moves_are_sound() {
    for seed in 0..4 {
        check_random_game(seed, 400);
    }
}

#[test]
fn test_soak_random_dice() {
    let config = EngineConfig::new(DiceMode::Random, Some(11), true);
    let report = run_soak(&config, 5).unwrap();
    assert_eq!(*report.games(), 5);
    assert_eq!(report.black_wins() + report.white_wins(), 5);
}

#[test]
fn test_soak_sequential_dice() {
    let config = EngineConfig::new(DiceMode::Sequential, Some(3), true);
    let report = run_soak(&config, 2).unwrap();
    assert_eq!(report.black_wins() + report.white_wins(), 2);
}
