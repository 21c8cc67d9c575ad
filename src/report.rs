//! Writing the results of solving levels

use std::fmt::Display;
use std::io;
use std::io::Write;
use std::str::FromStr;

use anyhow::anyhow;

use crate::search::{AllSolutionsOutcome, SearchOutcome, SearchResult, SearchStats, Solution};

/// Which states of a solution are written
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolutionFormat {
    /// Every state from the start state to the goal state
    AllStates,
    GoalStateOnly,
    /// One move per line instead of the states
    MovesOnly,
    MovesOnlySingleLine,
}

/// A state that can name the move leading to one of its children
pub trait DescribeMove {
    fn describe_move(&self, child: &Self) -> String;
}

impl Default for SolutionFormat {
    fn default() -> Self {
        SolutionFormat::GoalStateOnly
    }
}

impl FromStr for SolutionFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SolutionFormat::AllStates),
            "goal" => Ok(SolutionFormat::GoalStateOnly),
            "moves" => Ok(SolutionFormat::MovesOnly),
            "moves-line" => Ok(SolutionFormat::MovesOnlySingleLine),
            _ => Err(anyhow!("unknown solution format: {}", s)),
        }
    }
}

/// Writes the report of a single level: the solution, if any, followed by search statistics
pub fn write_report<S: Display + DescribeMove>(
    out: &mut impl Write,
    id: &str,
    outcome: &SearchOutcome<S>,
    format: SolutionFormat,
) -> io::Result<()> {
    writeln!(out, "Level {}", id)?;
    match &outcome.result {
        SearchResult::Solved(solution) => write_solution(out, solution, format)?,
        SearchResult::NoSolution => writeln!(out, "No solution")?,
        SearchResult::LimitReached => writeln!(out, "Search limit reached")?,
    }
    write_stats(out, &outcome.stats)
}

/// Writes the report of a level solved for every shortest solution
pub fn write_all_solutions_report<S: Display + DescribeMove>(
    out: &mut impl Write,
    id: &str,
    outcome: &AllSolutionsOutcome<S>,
    format: SolutionFormat,
) -> io::Result<()> {
    writeln!(out, "Level {}", id)?;
    for (i, solution) in outcome.solutions.iter().enumerate() {
        writeln!(out, "Solution {}", i)?;
        write_solution(out, solution, format)?;
    }
    if outcome.solutions.is_empty() {
        writeln!(out, "No solution")?;
    }
    if outcome.limit_reached {
        writeln!(out, "Search limit reached")?;
    }
    write_stats(out, &outcome.stats)
}

fn write_solution<S: Display + DescribeMove>(
    out: &mut impl Write,
    solution: &Solution<S>,
    format: SolutionFormat,
) -> io::Result<()> {
    let moves = || {
        solution
            .path
            .windows(2)
            .map(|pair| pair[0].describe_move(&pair[1]))
    };
    match format {
        SolutionFormat::AllStates => {
            writeln!(out, "Sequence of moves:")?;
            for state in &solution.path {
                write!(out, "{}", state)?;
            }
        }
        SolutionFormat::GoalStateOnly => {
            writeln!(out, "Sequence of moves:")?;
            write!(out, "{}", solution.goal())?;
        }
        SolutionFormat::MovesOnly => {
            writeln!(out, "Sequence of moves:")?;
            for m in moves() {
                writeln!(out, "{}", m)?;
            }
        }
        SolutionFormat::MovesOnlySingleLine => {
            write!(out, "Sequence of moves:")?;
            for (i, m) in moves().enumerate() {
                let sep = if i == 0 { " " } else { "; " };
                write!(out, "{}{}", sep, m)?;
            }
            writeln!(out)?;
        }
    }
    writeln!(out, "Number of moves: {}", solution.moves())
}

fn write_stats(out: &mut impl Write, stats: &SearchStats) -> io::Result<()> {
    writeln!(out, "Number of vertices examined: {}", stats.examined)?;
    writeln!(out, "{:.6} [s]", stats.elapsed.as_secs_f64())?;
    writeln!(out)
}
