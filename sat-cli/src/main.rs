//! The interactive CLI menu: selects sequential SAT, parallel SAT, or one
//! of the three graph reductions; reads one instance from standard input
//! or `--input FILE`; prints the result via `report`.

mod config;
mod reductions;
mod report;

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use sat_core::{parse_dimacs, solve_parallel, solve_sequential, Cnf, MalformedInput, SatResult};

use config::{Config, Mode};
use reductions::{hamiltonian_path, k_independent_set, parse_graph, three_colorable};

fn main() -> ExitCode {
    let config = Config::parse();
    let reads_file = config.input.is_some();

    loop {
        let text = match read_input(&config) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("could not read input: {err}");
                return ExitCode::FAILURE;
            }
        };

        match build_cnf(&config, &text) {
            Ok(cnf) => {
                let result = match config.mode {
                    Mode::Sequential => solve_sequential(cnf),
                    Mode::Parallel => solve_parallel(cnf),
                };
                println!("{}", render(&result, &config));
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                eprintln!("{err}");
                print_usage();
                if reads_file {
                    return ExitCode::FAILURE;
                }
                // stdin: loop back and read the next attempt.
            }
        }
    }
}

fn read_input(config: &Config) -> std::io::Result<String> {
    let mut text = String::new();
    match &config.input {
        Some(path) => {
            text = std::fs::read_to_string(path)?;
        }
        None => {
            std::io::stdin().read_to_string(&mut text)?;
        }
    }
    Ok(text)
}

fn build_cnf(config: &Config, text: &str) -> Result<Cnf, MalformedInput> {
    match config.reduction {
        None => parse_dimacs(text),
        Some(reduction) => {
            let graph = parse_graph(text)?;
            Ok(match reduction {
                config::Reduction::IndependentSet => k_independent_set(&graph, config.k),
                config::Reduction::ThreeColorable => three_colorable(&graph),
                config::Reduction::HamiltonianPath => hamiltonian_path(&graph),
            })
        }
    }
}

fn render(result: &SatResult, config: &Config) -> String {
    match result {
        SatResult::Unsat => report::UNSATISFIABLE.to_string(),
        SatResult::Sat(cnf) => match config.reduction {
            None => report::format_model(cnf),
            Some(reduction) => report::format_reduction(reduction, cnf),
        },
    }
}

fn print_usage() {
    eprintln!("usage: sat-cli [--input FILE] [--mode sequential|parallel] [--reduction independent-set|three-colorable|hamiltonian-path] [-k N]");
}
