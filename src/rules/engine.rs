//! The match: setup, alternating turns, and terminal detection.
//!
//! ## Turn order
//!
//! ```text
//! Setup ─▶ Move(P1) ─▶ Build(P1) ─▶ Move(P2) ─▶ Build(P2) ─▶ Move(P1) ...
//! ```
//!
//! - Entering `Move(p)` first checks whether `p` is boxed in; if so the
//!   opponent wins immediately.
//! - Right after a move, the mover wins if a builder stands on level 3.
//!   The build step is skipped in that case.
//! - The build must be made by the builder that just moved. If it has
//!   nowhere to build (every neighbor's next piece is out of supply), the
//!   turn passes without a build.
//!
//! ## Two-step moves
//!
//! When both of a player's builders can reach the requested tile,
//! `submit_move` returns `MoveResult::Ambiguous` without changing anything.
//! The caller asks the player which builder they meant and completes the
//! move with `resolve_ambiguous_move`.
//!
//! ## Errors vs results
//!
//! Refusals that happen in normal play (unreachable tile, domed tile,
//! empty supply) come back inside `MoveResult`, `BuildResult` and
//! `PlacementResult`. Acting out of turn, out of phase, or with an off-board
//! coordinate is an `Err`.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, instrument, warn};

use super::builder::Builder;
use super::player::{BuilderOptions, MoveAttempt, Player};
use super::snapshot::Snapshot;
use crate::board::Grid;
use crate::core::action::{Action, ActionRecord};
use crate::core::config::{PieceCounts, PieceKind, RulesConfig};
use crate::core::coord::Coord;
use crate::core::error::{Error, Rejection, Result};
use crate::core::player::{BuilderId, BuilderNumber, PlayerId, PlayerMap};
use crate::core::rng::GameRng;

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    /// The winner moved a builder onto a level-3 tile.
    ReachedLevelThree,
    /// The loser had no legal move at the start of their turn.
    OpponentBlocked,
}

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: PlayerId,
    pub reason: WinReason,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Where the match currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for `next` to be placed.
    Setup { next: BuilderId },
    /// Waiting for this player to move.
    Move(PlayerId),
    /// Waiting for this player to build.
    Build(PlayerId),
    /// Terminal.
    Finished(GameResult),
}

impl Phase {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Finished(_))
    }

    /// The player expected to act, if any.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        match *self {
            Phase::Setup { next } => Some(next.player),
            Phase::Move(p) | Phase::Build(p) => Some(p),
            Phase::Finished(_) => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Setup { next } => write!(f, "setup (placing {})", next),
            Phase::Move(p) => write!(f, "{} move phase", p),
            Phase::Build(p) => write!(f, "{} build phase", p),
            Phase::Finished(result) => write!(f, "game over ({} won)", result.winner),
        }
    }
}

/// Outcome of `place_builder`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementResult {
    Placed {
        builder: BuilderId,
        winner: Option<PlayerId>,
    },
    Rejected(Rejection),
}

/// Outcome of `submit_move` / `resolve_ambiguous_move`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// A builder moved.
    Moved {
        builder: BuilderId,
        from: Coord,
        to: Coord,
        winner: Option<PlayerId>,
    },
    /// Both builders can reach the tile; call `resolve_ambiguous_move`.
    Ambiguous { options: BuilderOptions },
    /// Neither builder can reach the tile. Nothing changed.
    NoLegalMove,
}

impl MoveResult {
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, MoveResult::Ambiguous { .. })
    }

    #[must_use]
    pub fn applied(&self) -> bool {
        matches!(self, MoveResult::Moved { .. })
    }

    /// The builders to choose between, empty unless ambiguous.
    #[must_use]
    pub fn builder_options(&self) -> &[BuilderNumber] {
        match self {
            MoveResult::Ambiguous { options } => options,
            _ => &[],
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            MoveResult::Moved { winner, .. } => *winner,
            _ => None,
        }
    }

    /// For callers that already validated the target: `NoLegalMove`
    /// becomes an `Err`.
    ///
    /// # Errors
    ///
    /// `NoLegalMove` if neither of `player`'s builders could reach the tile.
    pub fn require_reachable(self, player: PlayerId) -> Result<Self> {
        match self {
            MoveResult::NoLegalMove => Err(Error::NoLegalMove { player }),
            other => Ok(other),
        }
    }
}

/// Outcome of `submit_build`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildResult {
    /// The piece was placed. `winner` is set when the opponent is now boxed in.
    Built {
        at: Coord,
        piece: PieceKind,
        winner: Option<PlayerId>,
    },
    /// Not a legal build. Nothing changed.
    Rejected(Rejection),
}

impl BuildResult {
    #[must_use]
    pub fn applied(&self) -> bool {
        matches!(self, BuildResult::Built { .. })
    }

    #[must_use]
    pub fn reason(&self) -> Option<Rejection> {
        match self {
            BuildResult::Rejected(reason) => Some(*reason),
            BuildResult::Built { .. } => None,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            BuildResult::Built { winner, .. } => *winner,
            BuildResult::Rejected(_) => None,
        }
    }
}

/// A move waiting for the player to pick a builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingMove {
    player: PlayerId,
    x: i32,
    y: i32,
}

/// One match: the grid, both players, and the turn state machine.
///
/// ## Example
///
/// ```
/// use not_santorini::core::{BuilderNumber, PlayerId, RulesConfig};
/// use not_santorini::rules::{Match, Phase};
///
/// let mut game = Match::with_placements(
///     RulesConfig::standard(),
///     [(1, 1), (5, 5), (1, 5), (5, 1)],
/// )
/// .unwrap();
/// assert_eq!(game.current_phase(), Phase::Move(PlayerId::ONE));
///
/// let moved = game.submit_move(PlayerId::ONE, 2, 2).unwrap();
/// assert!(moved.applied());
///
/// let built = game.submit_build(PlayerId::ONE, BuilderNumber::FIRST, 2, 3).unwrap();
/// assert!(built.applied());
/// assert_eq!(game.current_phase(), Phase::Move(PlayerId::TWO));
/// ```
#[derive(Clone, Debug)]
pub struct Match {
    config: RulesConfig,
    grid: Grid,
    placed: SmallVec<[Builder; 4]>,
    players: Option<PlayerMap<Player>>,
    phase: Phase,
    pending: Option<PendingMove>,
    moved: Option<BuilderNumber>,
    round: u32,
    history: Vector<ActionRecord>,
}

impl Match {
    /// A new match waiting for the first builder to be placed.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        let grid = Grid::new(&config);
        Self {
            config,
            grid,
            placed: SmallVec::new(),
            players: None,
            phase: Phase::Setup {
                next: BuilderId::new(PlayerId::ONE, BuilderNumber::FIRST),
            },
            pending: None,
            moved: None,
            round: 0,
            history: Vector::new(),
        }
    }

    /// A match with all four builders already placed, in the order
    /// P1B1, P1B2, P2B1, P2B2.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` or `IllegalPlacement` for a bad starting tile.
    pub fn with_placements(config: RulesConfig, placements: [(i32, i32); 4]) -> Result<Self> {
        let mut game = Self::new(config);
        for (x, y) in placements {
            if let PlacementResult::Rejected(reason) = game.place_builder(x, y)? {
                return Err(Error::IllegalPlacement {
                    target: Coord::new(x, y)?,
                    reason,
                });
            }
        }
        Ok(game)
    }

    /// A match with the four builders on distinct random tiles.
    ///
    /// The same seed always gives the same opening.
    pub fn random_setup(config: RulesConfig, seed: u64) -> Result<Self> {
        let tiles = GameRng::new(seed).distinct_tiles(4);
        let mut placements = [(0, 0); 4];
        for (slot, tile) in placements.iter_mut().zip(tiles) {
            *slot = (tile.x(), tile.y());
        }
        info!(seed, "random opening");
        Self::with_placements(config, placements)
    }

    /// Throw the board away and start a fresh match with the same rules.
    pub fn restart(&mut self) {
        info!("match restarted");
        *self = Self::new(self.config.clone());
    }

    // === Queries ===

    #[must_use]
    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Remaining pieces `[L1, L2, L3, Dome]`.
    #[must_use]
    pub fn remaining_pieces(&self) -> PieceCounts {
        self.grid.remaining_pieces()
    }

    /// A player, once setup is complete.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.as_ref().map(|players| &players[id])
    }

    /// Round number; 0 during setup, 1 for the first full round.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The result, once the match is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// The builder that must build this turn, during a build phase.
    #[must_use]
    pub fn builder_to_build(&self) -> Option<BuilderNumber> {
        match self.phase {
            Phase::Build(_) => self.moved,
            _ => None,
        }
    }

    /// Every committed action so far.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.grid, self.phase, self.round, self.history.clone())
    }

    // === Setup ===

    /// Place the next builder in setup order.
    ///
    /// # Errors
    ///
    /// - `WrongPhase` outside setup.
    /// - `OutOfBounds` for an off-board tile.
    #[instrument(skip(self))]
    pub fn place_builder(&mut self, x: i32, y: i32) -> Result<PlacementResult> {
        let Phase::Setup { next } = self.phase else {
            return Err(self.violation(Error::WrongPhase {
                action: "place a builder",
                phase: self.phase.to_string(),
            }));
        };
        let coord = Coord::new(x, y).map_err(|e| self.violation(e))?;

        if let Err(reason) = Builder::check_placement(&self.grid, coord) {
            debug!(builder = %next, %coord, %reason, "placement rejected");
            return Ok(PlacementResult::Rejected(reason));
        }

        let builder = Builder::place(next, &mut self.grid, coord)?;
        self.placed.push(builder);
        self.record(Action::Place { builder: next, at: coord });
        debug!(builder = %next, %coord, "builder placed");

        let winner = match BuilderId::all().nth(self.placed.len()) {
            Some(following) => {
                self.phase = Phase::Setup { next: following };
                None
            }
            None => {
                self.finish_setup();
                self.result().map(|r| r.winner)
            }
        };
        Ok(PlacementResult::Placed {
            builder: next,
            winner,
        })
    }

    fn finish_setup(&mut self) {
        let Ok([a, b, c, d]) = std::mem::take(&mut self.placed).into_inner() else {
            return;
        };
        self.players = Some(PlayerMap::from([
            Player::new(PlayerId::ONE, [a, b]),
            Player::new(PlayerId::TWO, [c, d]),
        ]));
        info!("setup complete");
        self.round = 1;
        self.begin_turn(PlayerId::ONE);
    }

    // === Moving ===

    /// Ask `player` to move one of their builders to `(x, y)`.
    ///
    /// # Errors
    ///
    /// - `WrongPhase` / `WrongPlayer` when it is not this player's move.
    /// - `OutOfBounds` for an off-board tile.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, player: PlayerId, x: i32, y: i32) -> Result<MoveResult> {
        self.require_turn("move", player, false)?;
        Coord::new(x, y).map_err(|e| self.violation(e))?;
        self.pending = None;

        let grid = &mut self.grid;
        let Some(players) = self.players.as_mut() else {
            return Err(Error::WrongPhase {
                action: "move",
                phase: self.phase.to_string(),
            });
        };
        let mover = &mut players[player];

        match mover.attempt_move(grid, x, y)? {
            MoveAttempt::NoLegalMove => {
                debug!(%player, x, y, "no builder can reach target");
                Ok(MoveResult::NoLegalMove)
            }
            MoveAttempt::Ambiguous => {
                let options = mover.movable_builders(grid, x, y);
                debug!(%player, x, y, "both builders can reach target");
                self.pending = Some(PendingMove { player, x, y });
                Ok(MoveResult::Ambiguous { options })
            }
            MoveAttempt::Moved { builder, from } => Ok(self.after_move(player, builder, from)),
        }
    }

    /// Finish an ambiguous move with the builder the player picked.
    ///
    /// # Errors
    ///
    /// - `NoPendingMove` if the last `submit_move` was not ambiguous.
    /// - `NotAnOption` if `builder` cannot make that move.
    #[instrument(skip(self))]
    pub fn resolve_ambiguous_move(&mut self, builder: BuilderNumber) -> Result<MoveResult> {
        let Some(pending) = self.pending else {
            return Err(self.violation(Error::NoPendingMove));
        };
        self.require_turn("move", pending.player, false)?;

        let grid = &mut self.grid;
        let Some(players) = self.players.as_mut() else {
            return Err(Error::NoPendingMove);
        };
        let mover = &mut players[pending.player];
        if !mover.builder(builder).can_move_to(grid, pending.x, pending.y) {
            return Err(self.violation(Error::NotAnOption { builder }));
        }

        let from = mover.move_builder(grid, builder, pending.x, pending.y)?;
        self.pending = None;
        Ok(self.after_move(pending.player, builder, from))
    }

    fn after_move(&mut self, player: PlayerId, number: BuilderNumber, from: Coord) -> MoveResult {
        let id = BuilderId::new(player, number);
        let (to, won) = match self.player(player) {
            Some(p) => (p.builder(number).coord(), p.check_win(&self.grid)),
            None => (from, false),
        };
        self.record(Action::Move { builder: id, from, to });
        self.moved = Some(number);

        let can_build = self
            .player(player)
            .is_some_and(|p| !p.builder(number).legal_builds(&self.grid).is_empty());

        let winner = if won {
            self.finish(player, WinReason::ReachedLevelThree);
            Some(player)
        } else if can_build {
            self.phase = Phase::Build(player);
            None
        } else {
            info!(%player, builder = %number, "no legal build, turn passes");
            self.end_turn(player);
            self.result().map(|r| r.winner)
        };
        MoveResult::Moved {
            builder: id,
            from,
            to,
            winner,
        }
    }

    // === Building ===

    /// Build with the builder that just moved.
    ///
    /// # Errors
    ///
    /// - `WrongPhase` / `WrongPlayer` when it is not this player's build.
    /// - `WrongBuilder` if `builder` is not the one that moved.
    /// - `OutOfBounds` for an off-board tile.
    #[instrument(skip(self))]
    pub fn submit_build(
        &mut self,
        player: PlayerId,
        builder: BuilderNumber,
        x: i32,
        y: i32,
    ) -> Result<BuildResult> {
        self.require_turn("build", player, true)?;
        if let Some(expected) = self.moved.filter(|&m| m != builder) {
            return Err(self.violation(Error::WrongBuilder {
                expected,
                actual: builder,
            }));
        }
        let at = Coord::new(x, y).map_err(|e| self.violation(e))?;

        let grid = &mut self.grid;
        let Some(players) = self.players.as_ref() else {
            return Err(Error::WrongPhase {
                action: "build",
                phase: self.phase.to_string(),
            });
        };

        let piece = match players[player].attempt_build(grid, builder, x, y)? {
            Ok(piece) => piece,
            Err(reason) => {
                debug!(%player, %at, %reason, "build rejected");
                return Ok(BuildResult::Rejected(reason));
            }
        };

        self.record(Action::Build {
            builder: BuilderId::new(player, builder),
            at,
            piece,
        });
        self.end_turn(player);
        Ok(BuildResult::Built {
            at,
            piece,
            winner: self.result().map(|r| r.winner),
        })
    }

    // === Transitions ===

    fn end_turn(&mut self, player: PlayerId) {
        self.moved = None;
        let next = player.opponent();
        if next == PlayerId::ONE {
            self.round += 1;
        }
        self.begin_turn(next);
    }

    /// Enter `Move(player)`, unless `player` is boxed in.
    fn begin_turn(&mut self, player: PlayerId) {
        let stuck = self
            .player(player)
            .is_some_and(|p| p.check_lose(&self.grid));
        if stuck {
            info!(%player, "no legal move");
            self.finish(player.opponent(), WinReason::OpponentBlocked);
        } else {
            self.phase = Phase::Move(player);
            info!(%player, round = self.round, "move phase");
        }
    }

    fn finish(&mut self, winner: PlayerId, reason: WinReason) {
        info!(%winner, ?reason, round = self.round, "match over");
        self.pending = None;
        self.moved = None;
        self.phase = Phase::Finished(GameResult { winner, reason });
    }

    fn require_turn(&self, action: &'static str, player: PlayerId, building: bool) -> Result<()> {
        let active = match (self.phase, building) {
            (Phase::Move(p), false) | (Phase::Build(p), true) => p,
            _ => {
                return Err(self.violation(Error::WrongPhase {
                    action,
                    phase: self.phase.to_string(),
                }))
            }
        };
        if active != player {
            return Err(self.violation(Error::WrongPlayer {
                expected: active,
                actual: player,
            }));
        }
        Ok(())
    }

    fn violation(&self, err: Error) -> Error {
        warn!(%err, phase = %self.phase, "contract violation");
        err
    }

    fn record(&mut self, action: Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(action, self.round, sequence));
    }
}
