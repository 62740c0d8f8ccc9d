//! Interactive two-player console for not-santorini.
//!
//! Reads moves from stdin, draws the board on stdout. Logs go to stderr.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use not_santorini::{
    BuildResult, BuilderNumber, Coord, GameResult, Match, MoveResult, Phase, PieceCounts,
    PlacementResult, PlayerId, Rejection, RulesConfig, WinReason,
};

const COORD_HINT: &str = "Please input only two integers from 1 and 5, separated with a space.";
const RANGE_HINT: &str = "Please input an integer from 1 to 5 for both coordinates.";

/// Two-player builder game on a 5x5 grid
#[derive(Parser, Debug)]
#[command(name = "not-santorini")]
#[command(about = "Play NotSantorini at the console", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter, e.g. `debug` or `not_santorini=trace` (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Place all four builders randomly instead of asking
    #[arg(long)]
    random_setup: bool,

    /// Seed for the random opening; each replay uses the next seed
    #[arg(long, requires = "random_setup")]
    seed: Option<u64>,

    /// Piece supply as `level1,level2,level3,dome`
    #[arg(long, value_parser = parse_caps, default_value = "16,14,12,14")]
    caps: PieceCounts,
}

fn parse_caps(raw: &str) -> Result<PieceCounts, String> {
    let counts = raw
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|e| format!("{part:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match counts.as_slice() {
        &[l1, l2, l3, dome] => Ok(PieceCounts::new(l1, l2, l3, dome)),
        _ => Err(format!("expected 4 counts, got {}", counts.len())),
    }
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    let config = RulesConfig::standard().with_caps(cli.caps);
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(?config, random_setup = cli.random_setup, "starting console");

    println!(
        "Welcome!\n\
         Player one controls builder 1 () and builder 2 []\n\
         Player two controls builder 1 {{}} and builder 2 <>\n\
         The game will now start"
    );

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock());
    let mut game = Match::new(config.clone());

    for played in 0u64.. {
        if cli.random_setup {
            let opening = seed.wrapping_add(played);
            game = Match::random_setup(config.clone(), opening)
                .with_context(|| format!("random opening with seed {opening}"))?;
            println!("Builders placed at random (seed {opening}).");
        } else {
            game.restart();
            if setup(&mut game, &mut console)?.is_none() {
                break;
            }
        }

        let Some(result) = play(&mut game, &mut console)? else {
            break;
        };
        announce(result);

        if !console.play_again()? {
            println!("Thank you for playing!");
            break;
        }
    }
    Ok(())
}

// === Console I/O ===

/// Line-oriented prompt over any buffered reader. `None` means input closed.
struct Console<R> {
    input: R,
    line: String,
}

impl<R: BufRead> Console<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<&str>> {
        print!("{prompt}");
        io::stdout().flush()?;
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            debug!("input closed");
            return Ok(None);
        }
        Ok(Some(self.line.trim()))
    }

    /// Ask for `x y` until the answer is a tile on the board.
    fn ask_tile(&mut self, prompt: &str, range_hint: &str) -> Result<Option<(i32, i32)>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse_tile(answer, range_hint) {
                Ok(tile) => return Ok(Some(tile)),
                Err(hint) => println!("{hint}"),
            }
        }
    }

    fn ask_builder(&mut self) -> Result<Option<BuilderNumber>> {
        loop {
            let Some(answer) = self.ask("Which builder would you like to move? (1 or 2) ")? else {
                return Ok(None);
            };
            match answer.parse::<u8>().ok().and_then(BuilderNumber::new) {
                Some(number) => return Ok(Some(number)),
                None => println!("Please type only 1 or 2"),
            }
        }
    }

    fn play_again(&mut self) -> Result<bool> {
        loop {
            match self.ask("Do you want to play again? (Y/N)")? {
                Some("Y") => return Ok(true),
                Some("N") | None => return Ok(false),
                Some(_) => println!("Please input only the character \"Y\" or \"N\""),
            }
        }
    }
}

fn parse_pair(answer: &str) -> Option<(i32, i32)> {
    let mut parts = answer.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((x, y))
}

/// An on-board `x y`, or the message to show for this answer.
fn parse_tile<'a>(answer: &str, range_hint: &'a str) -> Result<(i32, i32), &'a str> {
    let Some((x, y)) = parse_pair(answer) else {
        return Err(COORD_HINT);
    };
    if Coord::in_bounds(x, y) {
        Ok((x, y))
    } else {
        Err(range_hint)
    }
}

fn spoken(player: PlayerId) -> &'static str {
    if player == PlayerId::ONE {
        "one"
    } else {
        "two"
    }
}

// === Match flow ===

fn setup<R: BufRead>(game: &mut Match, console: &mut Console<R>) -> Result<Option<()>> {
    while let Phase::Setup { next } = game.current_phase() {
        let which = if next.number == BuilderNumber::FIRST {
            "first"
        } else {
            "second"
        };
        let prompt = format!(
            "Player {}: Where would you like to place your {which} builder? (x y): ",
            next.player.num()
        );
        let Some((x, y)) = console.ask_tile(&prompt, RANGE_HINT)? else {
            return Ok(None);
        };
        if let PlacementResult::Rejected(_) = game.place_builder(x, y)? {
            println!("Please input coordinates different from those of previous builders.");
        }
    }
    Ok(Some(()))
}

/// Run turns until the match ends. `None` if input closed first.
fn play<R: BufRead>(game: &mut Match, console: &mut Console<R>) -> Result<Option<GameResult>> {
    while !game.current_phase().is_finished() {
        let taken = match game.current_phase() {
            Phase::Move(player) => {
                show(game, "Move");
                take_move(game, console, player)?
            }
            Phase::Build(player) => {
                show(game, "Build");
                take_build(game, console, player)?
            }
            Phase::Setup { .. } | Phase::Finished(_) => None,
        };
        if taken.is_none() {
            return Ok(None);
        }
    }
    Ok(game.result())
}

fn show(game: &Match, step: &str) {
    let Some(player) = game.current_phase().active_player() else {
        return;
    };
    let marks = if player == PlayerId::ONE {
        "(1) [2] "
    } else {
        "{1} <2>"
    };
    let snapshot = game.snapshot();
    println!(
        "PLAYER {} ({step} Phase): Builders {marks}",
        spoken(player).to_uppercase()
    );
    println!("{snapshot}");
    println!("{}", snapshot.remaining_line());
}

fn take_move<R: BufRead>(
    game: &mut Match,
    console: &mut Console<R>,
    player: PlayerId,
) -> Result<Option<()>> {
    loop {
        let Some((x, y)) = console.ask_tile("Where would you like to move to? ", COORD_HINT)? else {
            return Ok(None);
        };
        match game.submit_move(player, x, y)? {
            MoveResult::Moved { .. } => return Ok(Some(())),
            MoveResult::Ambiguous { .. } => {
                let Some(number) = console.ask_builder()? else {
                    return Ok(None);
                };
                game.resolve_ambiguous_move(number)?;
                return Ok(Some(()));
            }
            MoveResult::NoLegalMove => {
                if game.grid().tile_at(x, y)?.is_domed() {
                    println!("That tile had been domed!");
                } else {
                    println!("Neither of your builders can reach that.");
                }
            }
        }
    }
}

fn take_build<R: BufRead>(
    game: &mut Match,
    console: &mut Console<R>,
    player: PlayerId,
) -> Result<Option<()>> {
    let builder = game
        .builder_to_build()
        .context("build phase without a moved builder")?;
    loop {
        let Some((x, y)) = console.ask_tile("Where would you like to build? (x y) ", COORD_HINT)?
        else {
            return Ok(None);
        };
        match game.submit_build(player, builder, x, y)? {
            BuildResult::Built { .. } => return Ok(Some(())),
            BuildResult::Rejected(Rejection::Domed) => println!("That tile had been domed!"),
            BuildResult::Rejected(Rejection::PieceExhausted(kind)) => {
                println!("There are no {kind} pieces left.")
            }
            BuildResult::Rejected(_) => println!("Your builder can't do that."),
        }
    }
}

fn announce(result: GameResult) {
    let loser = result.winner.opponent();
    if result.reason == WinReason::OpponentBlocked {
        println!("Player {} can't move.", spoken(loser));
    }
    println!("A winner is player {}!", spoken(result.winner));
}
