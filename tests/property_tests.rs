//! Property tests over random legal play.
//!
//! A match is seeded with a random opening and then driven by a stream of
//! choice indices, each picking one of the currently legal moves or builds.
//! After every step the supply bound, the lose-check definition and the
//! snapshot's purity are checked.

use proptest::prelude::*;

use not_santorini::board::Grid;
use not_santorini::core::{BuilderNumber, Coord, PieceKind, PlayerId, RulesConfig};
use not_santorini::rules::{Match, MoveResult, Phase, Player, WinReason};

/// Every (builder, destination) pair `player` could move.
fn move_options(game: &Match, player: PlayerId) -> Vec<(BuilderNumber, Coord)> {
    let Some(p) = game.player(player) else {
        return Vec::new();
    };
    p.builders()
        .flat_map(|b| {
            b.legal_moves(game.grid())
                .into_iter()
                .map(move |to| (b.id().number, to))
        })
        .collect()
}

/// Apply one step of play chosen by `pick`. Returns false once finished.
fn step(game: &mut Match, pick: usize) -> bool {
    match game.current_phase() {
        Phase::Setup { .. } | Phase::Finished(_) => false,
        Phase::Move(player) => {
            let options = move_options(game, player);
            assert!(!options.is_empty(), "{player} in move phase with no moves");
            let (builder, to) = options[pick % options.len()];
            match game.submit_move(player, to.x(), to.y()).unwrap() {
                MoveResult::Moved { .. } => {}
                MoveResult::Ambiguous { options } => {
                    assert!(options.contains(&builder));
                    assert!(game.resolve_ambiguous_move(builder).unwrap().applied());
                }
                MoveResult::NoLegalMove => panic!("legal move {to} was refused"),
            }
            true
        }
        Phase::Build(player) => {
            let builder = game.builder_to_build().unwrap();
            let targets = game
                .player(player)
                .unwrap()
                .builder(builder)
                .legal_builds(game.grid());
            assert!(!targets.is_empty(), "build phase with nowhere to build");
            let at = targets[pick % targets.len()];
            assert!(game
                .submit_build(player, builder, at.x(), at.y())
                .unwrap()
                .applied());
            true
        }
    }
}

/// `check_lose` spelled out: no builder can move to any of its neighbors.
fn boxed_in(player: &Player, grid: &Grid) -> bool {
    !player.builders().any(|b| {
        b.coord()
            .neighbors()
            .any(|n| b.can_move_to(grid, n.x(), n.y()))
    })
}

fn small_caps() -> impl Strategy<Value = RulesConfig> {
    (0u8..=16, 0u8..=14, 0u8..=12, 0u8..=14).prop_map(|(l1, l2, l3, dome)| {
        RulesConfig::standard()
            .with_cap(PieceKind::Level1, l1)
            .with_cap(PieceKind::Level2, l2)
            .with_cap(PieceKind::Level3, l3)
            .with_cap(PieceKind::Dome, dome)
    })
}

proptest! {
    /// Used pieces never exceed their caps, and every used piece is on the board.
    #[test]
    fn test_inventory_bound(
        seed in any::<u64>(),
        config in small_caps(),
        picks in prop::collection::vec(any::<usize>(), 0..300),
    ) {
        let mut game = Match::random_setup(config.clone(), seed).unwrap();
        for pick in picks {
            if !step(&mut game, pick) {
                break;
            }
            let inventory = game.grid().inventory();
            for kind in PieceKind::ALL {
                prop_assert!(inventory.used(kind) <= config.piece_caps[kind]);
            }
        }

        let inventory = game.grid().inventory();
        let placed_domes = game.grid().tiles().filter(|t| t.is_domed()).count();
        prop_assert_eq!(usize::from(inventory.used(PieceKind::Dome)), placed_domes);
        let levels: usize = game.grid().tiles().map(|t| usize::from(t.level())).sum();
        let level_pieces: usize = [PieceKind::Level1, PieceKind::Level2, PieceKind::Level3]
            .iter()
            .map(|&k| usize::from(inventory.used(k)))
            .sum();
        prop_assert_eq!(levels, level_pieces);
    }

    /// `check_lose` agrees with a direct neighbor scan at every step.
    #[test]
    fn test_check_lose_definition(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 0..200),
    ) {
        let mut game = Match::random_setup(RulesConfig::standard(), seed).unwrap();
        for pick in picks {
            for id in PlayerId::all() {
                let player = game.player(id).unwrap();
                prop_assert_eq!(player.check_lose(game.grid()), boxed_in(player, game.grid()));
            }
            if !step(&mut game, pick) {
                break;
            }
        }
    }

    /// Query-only calls leave the snapshot untouched.
    #[test]
    fn test_snapshot_purity(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        let mut game = Match::random_setup(RulesConfig::standard(), seed).unwrap();
        for pick in picks {
            if !step(&mut game, pick) {
                break;
            }
        }

        let before = game.snapshot();
        for id in PlayerId::all() {
            let player = game.player(id).unwrap();
            let _ = player.check_win(game.grid());
            let _ = player.check_lose(game.grid());
            for b in player.builders() {
                for target in Coord::all() {
                    let _ = b.can_move_to(game.grid(), target.x(), target.y());
                    let _ = b.can_build_on(game.grid(), target.x(), target.y());
                }
            }
        }
        let _ = game.remaining_pieces();
        let _ = game.current_phase();
        prop_assert_eq!(game.snapshot(), before);
    }

    /// The match only ends on a level-3 builder or a boxed-in player.
    #[test]
    fn test_terminal_reason_holds(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 0..400),
    ) {
        let mut game = Match::random_setup(RulesConfig::standard(), seed).unwrap();
        for pick in picks {
            if !step(&mut game, pick) {
                break;
            }
        }

        if let Some(result) = game.result() {
            let winner = game.player(result.winner).unwrap();
            let loser = game.player(result.winner.opponent()).unwrap();
            match result.reason {
                WinReason::ReachedLevelThree => {
                    prop_assert!(winner.check_win(game.grid()));
                }
                WinReason::OpponentBlocked => {
                    prop_assert!(loser.check_lose(game.grid()));
                }
            }
        }
    }
}
