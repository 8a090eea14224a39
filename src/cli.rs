//! Command-line options and the solve-and-print driver.

use clap::Parser;
use log::{debug, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ffi::OsStr;
use std::io::{self, Read, Write};
use std::time::Instant;

use n_puzzle::{
    Board, Direction, Error, Goal, Heuristic, Instance, Outcome, Solver, SolverConfig, Strategy,
};

/// Solve a sliding n-puzzle read from standard input with IDA*.
///
/// The input holds the number of tiles N, the flattened index of the blank in
/// the goal (-1 for the last cell), then the rows of the start board. The
/// output is -1 for an unsolvable board, or the number of moves followed by one
/// direction per line, naming the way each tile slides.
#[derive(Parser, Debug)]
#[command(name = "n-puzzle", version)]
pub(crate) struct Cli {
    /// Search strategy
    #[arg(value_enum, short, long, default_value_t = Strategy::Recursive)]
    pub(crate) strategy: Strategy,

    /// Cost-to-go estimate guiding the search
    #[arg(value_enum, short = 'H', long, default_value_t = Heuristic::Manhattan)]
    pub(crate) heuristic: Heuristic,

    /// Give up (and print -1) after expanding this many nodes
    #[arg(long)]
    pub(crate) node_limit: Option<u64>,

    /// Also try the move that undoes the previous one
    #[arg(long, default_value_t = false)]
    pub(crate) keep_reversals: bool,

    /// Print the elapsed search time as a final "# TIMES_MS" line (also on
    /// when FMI_TIME_ONLY is set to any non-empty value)
    #[arg(short, long, default_value_t = false)]
    pub(crate) time_only: bool,

    /// Replay the solution board by board on standard error
    #[arg(long, default_value_t = false)]
    pub(crate) show: bool,

    /// Solve a random board of this dimension instead of reading standard input
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) random: Option<u32>,

    /// Goal blank index used with --random
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub(crate) blank: i64,

    /// Seed for --random
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,
}

/// Environment variable that turns the timing line on.
pub(crate) const TIME_ONLY_ENV: &str = "FMI_TIME_ONLY";

impl Cli {
    /// Fold the value of [`TIME_ONLY_ENV`] into `--time-only`. Any non-empty
    /// value counts, whatever it says.
    pub(crate) fn apply_time_env(&mut self, value: Option<&OsStr>) {
        if value.is_some_and(|value| !value.is_empty()) {
            self.time_only = true;
        }
    }

    pub(crate) fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            strategy: self.strategy,
            heuristic: self.heuristic,
            node_limit: self.node_limit,
            prune_reversals: !self.keep_reversals,
        }
    }
}

/// Log to standard error, honouring `RUST_LOG` unless `--debug` is given.
pub(crate) fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

/// Read or generate the instance, solve it, and print the result to `out`.
///
/// Generated instances and the `--show` replay go to `diag`.
pub(crate) fn run<R, W, E>(cli: &Cli, input: R, out: &mut W, diag: &mut E) -> Result<(), Error>
where
    R: Read,
    W: Write,
    E: Write,
{
    let instance = match cli.random {
        Some(size) => {
            let goal = Goal::new(size as usize, cli.blank)?;
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let instance = Instance::random(&goal, cli.blank, &mut rng);
            write!(diag, "{instance}")?;
            instance
        }
        None => Instance::read(input)?,
    };

    let goal = instance.goal()?;
    debug!("Start board:\n{}", instance.board);
    debug!("Goal board:\n{}", goal.board());

    let start = Instant::now();
    let mut solver = Solver::new(&goal, cli.solver_config());
    let outcome = solver.solve(&instance.board)?;
    let stats = solver.stats();
    info!(
        "{} pass(es), {} nodes expanded, final threshold {}",
        stats.iterations, stats.nodes, stats.threshold
    );

    write_outcome(out, &outcome)?;

    if cli.show {
        if let Outcome::Solved(moves) = &outcome {
            replay(diag, &instance.board, moves)?;
        }
    }

    if cli.time_only {
        writeln!(out, "# TIMES_MS: alg={}", start.elapsed().as_millis())?;
    }
    Ok(())
}

fn write_outcome<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Solved(moves) => {
            writeln!(out, "{}", moves.len())?;
            for dir in moves {
                writeln!(out, "{dir}")?;
            }
        }
        Outcome::Unsolvable | Outcome::BudgetExhausted { .. } => writeln!(out, "-1")?,
    }
    Ok(())
}

fn replay<W: Write>(diag: &mut W, start: &Board, moves: &[Direction]) -> io::Result<()> {
    let mut board = start.clone();
    writeln!(diag, "Initial board:\n{board}")?;
    for &dir in moves {
        match board.apply_move(dir) {
            Some(next) => board = next,
            None => break,
        }
        writeln!(diag, "{dir}\n{board}")?;
    }
    Ok(())
}
