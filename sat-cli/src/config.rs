use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Parsed CLI choices: which engine to run, which reduction (if any) to
/// apply to the input first, and where the input comes from.
#[derive(Parser, Debug)]
#[command(
    name = "sat-cli",
    version,
    about = "DPLL SAT solving and graph-reduction front ends"
)]
pub struct Config {
    /// Path to the input file; reads standard input if omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Which engine explores the search tree.
    #[arg(short, long, value_enum, default_value_t = Mode::Sequential)]
    pub mode: Mode,

    /// Reduce a graph decision problem to CNF instead of reading DIMACS
    /// directly.
    #[arg(short, long, value_enum)]
    pub reduction: Option<Reduction>,

    /// The `k` parameter for `--reduction independent-set`.
    #[arg(short = 'k', long, default_value_t = 1)]
    pub k: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Sequential,
    Parallel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Reduction {
    IndependentSet,
    ThreeColorable,
    HamiltonianPath,
}
