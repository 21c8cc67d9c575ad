use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use puzsolver::puzzles::PuzzleKind;
use puzsolver::report::SolutionFormat;
use puzsolver::search::{SearchLimits, TieBreak};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SolverKind {
    AStar,
    BreadthFirst,
    DepthFirst,
    IdaStar,
}

#[derive(Clone)]
pub(crate) struct Options {
    puzzle: PuzzleKind,
    input_path: PathBuf,
    output_path: Option<PathBuf>,
    solver: SolverKind,
    format: SolutionFormat,
    all_solutions: bool,
    tie_break: TieBreak,
    limits: SearchLimits,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let solver = match matches.value_of("solver").unwrap_or("astar") {
            "astar" => SolverKind::AStar,
            "bfs" => SolverKind::BreadthFirst,
            "dfs" => SolverKind::DepthFirst,
            "idastar" => SolverKind::IdaStar,
            s => return Err(anyhow!("unknown solver: {}", s)),
        };
        let seed = parse_opt::<u64>(matches, "seed")?;
        let tie_break = match matches.value_of("tie_break") {
            None if seed.is_some() => return Err(anyhow!("--seed requires --tie-break random")),
            None => TieBreak::default(),
            Some("fifo") => TieBreak::Fifo,
            Some("lifo") => TieBreak::Lifo,
            Some("random") => TieBreak::Random(seed.unwrap_or(0)),
            Some(s) => return Err(anyhow!("unknown tie-break: {}", s)),
        };
        let all_solutions = matches.is_present("all_solutions");
        if all_solutions && solver != SolverKind::AStar {
            return Err(anyhow!("--all-solutions requires the astar solver"));
        }
        let mut limits = SearchLimits::unlimited();
        if let Some(max) = parse_opt::<usize>(matches, "max_nodes")? {
            limits = limits.max_examined(max);
        }
        if let Some(secs) = parse_opt::<f64>(matches, "time_limit")? {
            if !secs.is_finite() || secs < 0.0 {
                return Err(anyhow!("invalid time limit: {}", secs));
            }
            limits = limits.time_limit(Duration::from_secs_f64(secs));
        }
        Ok(Self {
            puzzle: matches
                .value_of("puzzle")
                .ok_or_else(|| anyhow!("no puzzle specified"))?
                .parse()?,
            input_path: matches
                .value_of("input")
                .ok_or_else(|| anyhow!("no input specified"))?
                .into(),
            output_path: matches.value_of("output").map(PathBuf::from),
            solver,
            format: match matches.value_of("format") {
                Some(s) => s.parse::<SolutionFormat>()?,
                None => SolutionFormat::default(),
            },
            all_solutions,
            tie_break,
            limits,
        })
    }

    pub fn puzzle(&self) -> PuzzleKind {
        self.puzzle
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn solver(&self) -> SolverKind {
        self.solver
    }

    pub fn format(&self) -> SolutionFormat {
        self.format
    }

    pub fn all_solutions(&self) -> bool {
        self.all_solutions
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }
}

fn parse_opt<T>(matches: &ArgMatches<'_>, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|s| s.parse::<T>().with_context(|| format!("invalid {}: {}", name, s)))
        .transpose()
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg};

    App::new("puzsolver")
        .about("Solve logic puzzles by search and constraint propagation")
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("puzzle")
                .short("p")
                .long("puzzle")
                .takes_value(true)
                .value_name("PUZZLE")
                .possible_values(&["pointing", "chocolate", "sliding"])
                .required(true)
                .help("the kind of puzzle in the level file")
                .display_order(1),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("PATH")
                .required(true)
                .help("read levels from a file")
                .display_order(1),
        )
        .arg(
            Arg::with_name("solver")
                .short("s")
                .long("solver")
                .takes_value(true)
                .possible_values(&["astar", "bfs", "dfs", "idastar"])
                .help("the search algorithm (default astar)"),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .takes_value(true)
                .possible_values(&["goal", "all", "moves", "moves-line"])
                .help("print the goal state, every state or only the moves of a solution (default goal)"),
        )
        .arg(
            Arg::with_name("all_solutions")
                .long("all-solutions")
                .help("find every shortest solution"),
        )
        .arg(
            Arg::with_name("tie_break")
                .long("tie-break")
                .takes_value(true)
                .possible_values(&["fifo", "lifo", "random"])
                .help("the order of states with equal scores (default fifo)"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .value_name("N")
                .help("the seed of the random tie-break"),
        )
        .arg(
            Arg::with_name("max_nodes")
                .long("max-nodes")
                .takes_value(true)
                .value_name("N")
                .help("stop after examining this many states"),
        )
        .arg(
            Arg::with_name("time_limit")
                .long("time-limit")
                .takes_value(true)
                .value_name("SECS")
                .help("stop searching a level after this many seconds"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("PATH")
                .help("write the report to a file instead of stdout"),
        )
}
