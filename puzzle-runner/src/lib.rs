//! Command line shared by the yearly puzzle binaries.
//!
//! ```text
//! aoc2024 <DAY> [PART] [--test N] [--input-dir DIR]
//! ```
//!
//! Reads `day{DAY}.in` (or `day{DAY}test{N}.in`) from the crate's bundled
//! `inputs/` directory and prints one answer per line.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use thiserror::Error;

/// Solves one part (1 or 2) of a day's puzzle for the given input.
pub type Solver = fn(u8, &str) -> anyhow::Result<String>;

#[derive(Parser, Debug)]
#[command(about = "Print the answers to one day's puzzle")]
pub struct Args {
    /// Day of the month.
    pub day: u8,

    /// Which half of the puzzle to solve; both when omitted.
    #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Use the worked example `day{DAY}test{N}.in` instead of the real input.
    #[arg(short, long)]
    pub test: Option<u32>,

    /// Directory holding the input files.
    #[arg(long, env = "AOC_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,
}

impl Args {
    pub fn input_path(&self, default_dir: &Path) -> PathBuf {
        let dir = self.input_dir.as_deref().unwrap_or(default_dir);
        match self.test {
            Some(n) => dir.join(format!("day{}test{}.in", self.day, n)),
            None => dir.join(format!("day{}.in", self.day)),
        }
    }

    pub fn parts(&self) -> std::ops::RangeInclusive<u8> {
        match self.part {
            Some(part) => part..=part,
            None => 1..=2,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunnerError {
    #[error("no solution available for {year} day {day}")]
    DayNotAvailable { year: u16, day: u8 },
}

pub fn find_solver(year: u16, days: &[(u8, Solver)], day: u8) -> Result<Solver, RunnerError> {
    days.iter()
        .find(|&&(d, _)| d == day)
        .map(|&(_, solver)| solver)
        .ok_or(RunnerError::DayNotAvailable { year, day })
}

/// Answers for every requested part, in part order.
pub fn solve(solver: Solver, args: &Args, input: &str) -> anyhow::Result<Vec<String>> {
    args.parts()
        .map(|part| -> anyhow::Result<String> {
            let time = Instant::now();
            let answer = solver(part, input).with_context(|| format!("day {} part {}", args.day, part))?;
            info!("day {} part {}: {} seconds elapsed", args.day, part, time.elapsed().as_secs_f32());
            Ok(answer)
        })
        .collect()
}

/// Log to stderr, `info` and above unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    // A second call only happens in tests and can be ignored.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}

/// Entry point of a year binary. `default_dir` is the bundled input directory.
pub fn run(year: u16, days: &[(u8, Solver)], default_dir: &str) -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    debug!("{args:?}");

    let solver = find_solver(year, days, args.day)?;
    let path = args.input_path(Path::new(default_dir));
    let input = fs::read_to_string(&path).with_context(|| format!("cannot read {}", path.display()))?;
    for answer in solve(solver, &args, &input)? {
        println!("{answer}");
    }
    Ok(())
}
