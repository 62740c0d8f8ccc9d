//! Builder and player legality integration tests.
//!
//! These exercise the move/build predicates over whole boards, plus the
//! win and lose checks that the match state machine relies on.

use not_santorini::board::Grid;
use not_santorini::core::{BuilderId, BuilderNumber, Coord, PieceKind, PlayerId, RulesConfig};
use not_santorini::rules::{Builder, MoveAttempt, Player};

fn at(x: i32, y: i32) -> Coord {
    Coord::new(x, y).unwrap()
}

fn raise(grid: &mut Grid, x: i32, y: i32, times: usize) {
    for _ in 0..times {
        grid.build(at(x, y)).unwrap();
    }
}

fn dome(grid: &mut Grid, x: i32, y: i32) {
    let remaining = 4 - usize::from(grid.tile(at(x, y)).level());
    raise(grid, x, y, remaining);
}

fn place_player(grid: &mut Grid, id: PlayerId, first: (i32, i32), second: (i32, i32)) -> Player {
    let b1 = Builder::place(
        BuilderId::new(id, BuilderNumber::FIRST),
        grid,
        at(first.0, first.1),
    )
    .unwrap();
    let b2 = Builder::place(
        BuilderId::new(id, BuilderNumber::SECOND),
        grid,
        at(second.0, second.1),
    )
    .unwrap();
    Player::new(id, [b1, b2])
}

// =============================================================================
// Adjacency
// =============================================================================

/// Test that only the eight king-move neighbors are ever legal.
#[test]
fn test_move_and_build_only_to_neighbors() {
    let mut grid = Grid::new(&RulesConfig::standard());
    let builder = Builder::place(
        BuilderId::new(PlayerId::ONE, BuilderNumber::FIRST),
        &mut grid,
        at(3, 3),
    )
    .unwrap();

    for target in Coord::all() {
        let expected = target.chebyshev(at(3, 3)) == 1;
        assert_eq!(builder.can_move_to(&grid, target.x(), target.y()), expected, "{target}");
        assert_eq!(builder.can_build_on(&grid, target.x(), target.y()), expected, "{target}");
    }
}

/// Test that building uses the same adjacency on both axes.
#[test]
fn test_build_adjacency_is_symmetric() {
    let mut grid = Grid::new(&RulesConfig::standard());
    let builder = Builder::place(
        BuilderId::new(PlayerId::ONE, BuilderNumber::FIRST),
        &mut grid,
        at(2, 2),
    )
    .unwrap();

    // Same column, two rows away: not adjacent.
    assert!(!builder.can_build_on(&grid, 2, 4));
    // Same row, two columns away: not adjacent either.
    assert!(!builder.can_build_on(&grid, 4, 2));
    // Straight up and straight across are both fine.
    assert!(builder.can_build_on(&grid, 2, 3));
    assert!(builder.can_build_on(&grid, 3, 2));
}

// =============================================================================
// Scenarios
// =============================================================================

/// Test the centre scenario: (4,4) is reachable, and four builds dome it.
#[test]
fn test_centre_builder_and_doming_neighbor() {
    let mut grid = Grid::new(&RulesConfig::standard());
    let builder = Builder::place(
        BuilderId::new(PlayerId::ONE, BuilderNumber::FIRST),
        &mut grid,
        at(3, 3),
    )
    .unwrap();
    assert!(builder.can_move_to(&grid, 4, 4));

    let pieces: Vec<_> = (0..4)
        .map(|_| builder.build_on(&mut grid, 4, 4).unwrap())
        .collect();
    assert_eq!(pieces, PieceKind::ALL.to_vec());
    assert!(grid.tile(at(4, 4)).is_domed());
    assert!(!builder.can_move_to(&grid, 4, 4));
    assert!(!builder.can_build_on(&grid, 4, 4));
}

/// Test that a builder ringed by domes only loses once its partner is stuck too.
#[test]
fn test_boxed_in_by_domes() {
    let mut grid = Grid::new(&RulesConfig::standard());
    let player = place_player(&mut grid, PlayerId::ONE, (3, 3), (1, 1));

    for neighbor in at(3, 3).neighbors() {
        dome(&mut grid, neighbor.x(), neighbor.y());
    }
    let boxed = player.builder(BuilderNumber::FIRST);
    assert!(boxed.legal_moves(&grid).is_empty());
    assert!(boxed.legal_builds(&grid).is_empty());

    // (2,2) is already domed; the partner still has (1,2) and (2,1).
    assert!(!player.check_lose(&grid));

    dome(&mut grid, 1, 2);
    dome(&mut grid, 2, 1);
    assert!(player.check_lose(&grid));
}

/// Test that an opponent's builders also block movement.
#[test]
fn test_boxed_in_by_builders_and_height() {
    let mut grid = Grid::new(&RulesConfig::standard());
    let player = place_player(&mut grid, PlayerId::TWO, (1, 1), (5, 5));
    let _opponent = place_player(&mut grid, PlayerId::ONE, (1, 2), (2, 1));
    raise(&mut grid, 2, 2, 2);
    for (x, y) in [(4, 4), (4, 5), (5, 4)] {
        dome(&mut grid, x, y);
    }

    assert!(player.check_lose(&grid));

    // Lowering the bar: a level-1 neighbor is climbable.
    let mut easier = Grid::new(&RulesConfig::standard());
    let player = place_player(&mut easier, PlayerId::TWO, (1, 1), (5, 5));
    let _opponent = place_player(&mut easier, PlayerId::ONE, (1, 2), (2, 1));
    raise(&mut easier, 2, 2, 1);
    for (x, y) in [(4, 4), (4, 5), (5, 4)] {
        dome(&mut easier, x, y);
    }
    assert!(!player.check_lose(&easier));
}

/// Test that a win needs a builder standing on level 3, not just next to it.
#[test]
fn test_win_on_reaching_level_three() {
    let mut grid = Grid::new(&RulesConfig::standard());
    let mut player = place_player(&mut grid, PlayerId::ONE, (1, 1), (5, 5));
    raise(&mut grid, 1, 1, 2);
    raise(&mut grid, 2, 2, 3);

    assert!(!player.check_win(&grid));
    let attempt = player.attempt_move(&mut grid, 2, 2).unwrap();
    assert_eq!(
        attempt,
        MoveAttempt::Moved {
            builder: BuilderNumber::FIRST,
            from: at(1, 1)
        }
    );
    assert!(player.check_win(&grid));
}

/// Test that check_lose agrees with scanning every builder's neighbors.
#[test]
fn test_check_lose_matches_neighbor_scan() {
    let mut grid = Grid::new(&RulesConfig::standard());
    let player = place_player(&mut grid, PlayerId::ONE, (1, 1), (5, 1));
    let scan = |grid: &Grid| {
        !player.builders().any(|b| {
            b.coord()
                .neighbors()
                .any(|n| b.can_move_to(grid, n.x(), n.y()))
        })
    };

    let walls = [(1, 2), (2, 1), (2, 2), (4, 1), (4, 2), (5, 2)];
    for (x, y) in walls {
        assert_eq!(player.check_lose(&grid), scan(&grid));
        dome(&mut grid, x, y);
    }
    assert_eq!(player.check_lose(&grid), scan(&grid));
    assert!(player.check_lose(&grid));
}
