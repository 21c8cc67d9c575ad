#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use puzsolver::level::Level;
use puzsolver::puzzles::{chocolate, pointing, sliding, PuzzleKind};
use puzsolver::report::{self, DescribeMove};
use puzsolver::search::{
    AStar, BreadthFirst, DepthFirst, IdaStar, PuzzleState, SearchResult, Solver,
};

use crate::options::{Options, SolverKind};

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let path = options.input_path();
    let levels = Level::from_file(path)
        .with_context(|| format!("failed to read levels from \"{}\"", path.display()))?;
    let mut out: Box<dyn Write> = match options.output_path() {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create \"{}\"", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    };
    for level in &levels {
        info!("Solving {} level {}", options.puzzle(), level.id());
        solve_level(&options, level, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn solve_level(options: &Options, level: &Level, out: &mut impl Write) -> Result<()> {
    match options.puzzle() {
        PuzzleKind::Pointing => {
            let game = pointing::Game::new(level)?;
            run(options, level.id(), pointing::State::new(&game), out)
        }
        PuzzleKind::Chocolate => {
            let game = chocolate::Game::new(level)?;
            run(options, level.id(), chocolate::State::new(&game), out)
        }
        PuzzleKind::Sliding => {
            let game = sliding::Game::new(level)?;
            run(options, level.id(), sliding::State::new(&game), out)
        }
    }
}

fn run<S>(options: &Options, id: &str, start: S, out: &mut impl Write) -> Result<()>
where
    S: PuzzleState + Display + DescribeMove,
{
    let astar = AStar::new()
        .tie_break(options.tie_break())
        .limits(options.limits());
    if options.all_solutions() {
        let outcome = astar.solve_all(start);
        info!(
            "Level {}: {} shortest solutions",
            id,
            outcome.solutions.len()
        );
        report::write_all_solutions_report(out, id, &outcome, options.format())?;
        return Ok(());
    }
    let outcome = match options.solver() {
        SolverKind::AStar => astar.solve(start),
        SolverKind::BreadthFirst => BreadthFirst::new().limits(options.limits()).solve(start),
        SolverKind::DepthFirst => DepthFirst::new().limits(options.limits()).solve(start),
        SolverKind::IdaStar => IdaStar::new().limits(options.limits()).solve(start),
    };
    let msg = match &outcome.result {
        SearchResult::Solved(_) => "solved",
        SearchResult::NoSolution => "not solvable",
        SearchResult::LimitReached => "search limit reached",
    };
    info!("Level {}: {}", id, msg);
    report::write_report(out, id, &outcome, options.format())?;
    Ok(())
}
