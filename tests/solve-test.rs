use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;

use puzsolver::collections::Position;
use puzsolver::level::Level;
use puzsolver::puzzles::{chocolate, pointing, sliding};
use puzsolver::search::{
    AStar, BreadthFirst, DepthFirst, IdaStar, PuzzleState, SearchLimits, SearchResult, Solver,
    TieBreak,
};

const TIE_BREAKS: [TieBreak; 4] = [
    TieBreak::Fifo,
    TieBreak::Lifo,
    TieBreak::Random(1),
    TieBreak::Random(42),
];

fn levels(name: &str) -> Result<Vec<Level>> {
    let levels = Level::from_file(project_path(format!("res/levels/{}.txt", name)))?;
    assert!(!levels.is_empty());
    Ok(levels)
}

#[test]
fn pointing_levels() -> Result<()> {
    for level in levels("pointing")? {
        println!("Solving pointing level {}", level.id());
        let game = pointing::Game::new(&level)?;
        let mut goals = BTreeSet::new();
        for &tie_break in &TIE_BREAKS {
            let outcome = AStar::new()
                .tie_break(tie_break)
                .solve(pointing::State::new(&game));
            let solution = outcome
                .result
                .solved()
                .unwrap_or_else(|| panic!("Could not solve level {}", level.id()));
            let goal = solution.goal();
            assert!(goal.is_goal_state());
            assert!(game.verify(goal.marked()), "level {}", level.id());
            goals.insert(goal.marked().clone());
        }
        let others = vec![
            BreadthFirst::new().solve(pointing::State::new(&game)),
            DepthFirst::new().solve(pointing::State::new(&game)),
        ];
        for outcome in others {
            let solution = outcome.result.into_solved().unwrap();
            let marked = solution.goal().marked();
            assert!(game.verify(marked), "level {}", level.id());
            goals.insert(marked.clone());
        }
        // every level has a single solution
        assert_eq!(1, goals.len(), "level {}", level.id());
    }
    Ok(())
}

#[test]
fn chocolate_levels() -> Result<()> {
    let expected: Vec<Vec<(i32, i32)>> = vec![
        (0..2).flat_map(|r| (0..3).map(move |c| (r, c))).collect(),
        (2..4).flat_map(|r| (0..3).map(move |c| (r, c))).collect(),
        (2..4).flat_map(|r| (1..4).map(move |c| (r, c))).collect(),
        vec![(0, 1), (0, 2), (0, 3), (1, 1), (1, 2), (1, 3), (3, 2), (3, 3)],
    ];
    let levels = levels("chocolate")?;
    assert_eq!(expected.len(), levels.len());
    for (level, expected) in levels.iter().zip(expected) {
        println!("Solving chocolate level {}", level.id());
        let game = chocolate::Game::new(level)?;
        let expected: BTreeSet<Position> =
            expected.into_iter().map(|(r, c)| Position::new(r, c)).collect();
        for &tie_break in &TIE_BREAKS {
            let outcome = AStar::new()
                .tie_break(tie_break)
                .solve(chocolate::State::new(&game));
            let solution = outcome
                .result
                .into_solved()
                .unwrap_or_else(|| panic!("Could not solve level {}", level.id()));
            let cells = solution.goal().cells();
            assert!(game.verify(cells), "level {}", level.id());
            let chocolate: BTreeSet<Position> = cells
                .iter_positions()
                .filter(|&(_, &cell)| cell == chocolate::Cell::Chocolate)
                .map(|(p, _)| p)
                .collect();
            assert_eq!(expected, chocolate, "level {}", level.id());
        }
    }
    Ok(())
}

#[test]
fn sliding_levels() -> Result<()> {
    let optimal = [6, 12, 18, 9];
    let levels = levels("sliding")?;
    assert_eq!(optimal.len(), levels.len());
    for (level, &moves) in levels.iter().zip(&optimal) {
        println!("Solving sliding level {}", level.id());
        let game = sliding::Game::new(level)?;
        let astar = AStar::new().solve(sliding::State::new(&game));
        let solution = astar.result.solved().unwrap();
        assert!(solution.goal().is_goal_state());
        assert_eq!(moves, solution.moves(), "level {}", level.id());
        let bfs = BreadthFirst::new().solve(sliding::State::new(&game));
        assert_eq!(
            solution.cost,
            bfs.result.solved().unwrap().cost,
            "level {}",
            level.id()
        );
        let ida = IdaStar::new().solve(sliding::State::new(&game));
        let ida_solution = ida.result.solved().unwrap();
        assert!(ida_solution.goal().is_goal_state());
        assert_eq!(solution.cost, ida_solution.cost, "level {}", level.id());
    }
    Ok(())
}

#[test]
fn sliding_all_solutions() -> Result<()> {
    let level = Level::new(
        "corner",
        vec!["4 1 3".to_string(), "7 2 6".to_string(), "0 5 8".to_string()],
    );
    let game = sliding::Game::new(&level)?;
    let outcome = AStar::new().solve_all(sliding::State::new(&game));
    assert!(!outcome.limit_reached);
    assert!(!outcome.solutions.is_empty());
    let moves: BTreeSet<usize> = outcome.solutions.iter().map(|s| s.moves()).collect();
    assert_eq!(1, moves.len());
    for solution in &outcome.solutions {
        assert!(solution.goal().is_goal_state());
    }
    let single = AStar::new().solve(sliding::State::new(&game));
    assert_eq!(
        Some(&single.result.solved().unwrap().moves()),
        moves.iter().next()
    );
    Ok(())
}

#[test]
fn search_limit() -> Result<()> {
    let levels = levels("sliding")?;
    let game = sliding::Game::new(&levels[2])?;
    let outcome = BreadthFirst::new()
        .limits(SearchLimits::unlimited().max_examined(10))
        .solve(sliding::State::new(&game));
    assert!(matches!(outcome.result, SearchResult::LimitReached));
    assert_eq!(10, outcome.stats.examined);
    Ok(())
}

#[test]
fn report_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("report.txt");
    let status = Command::new(env!("CARGO_BIN_EXE_puzsolver"))
        .arg("--puzzle")
        .arg("sliding")
        .arg("--input")
        .arg(project_path("res/levels/sliding.txt"))
        .arg("--output")
        .arg(&output)
        .status()?;
    assert!(status.success());
    let report = fs::read_to_string(&output)?;
    assert_eq!(4, report.matches("Sequence of moves:").count());
    assert!(report.starts_with("Level 1\nSequence of moves:\n1 2 3\n4 5 6\n7 8  \n"));
    for moves in &[6, 12, 18, 9] {
        assert!(report.contains(&format!("Number of moves: {}\n", moves)));
    }
    assert_eq!(4, report.matches("Number of vertices examined: ").count());
    Ok(())
}

#[test]
fn moves_report_with_idastar() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_puzsolver"))
        .args(&["-p", "sliding", "-s", "idastar", "-f", "moves-line", "-i"])
        .arg(project_path("res/levels/sliding.txt"))
        .output()?;
    assert!(output.status.success());
    let report = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = report
        .lines()
        .filter(|line| line.starts_with("Sequence of moves: "))
        .collect();
    assert_eq!(4, lines.len());
    for (line, &moves) in lines.iter().zip(&[6, 12, 18, 9]) {
        assert_eq!(moves - 1, line.matches("; ").count(), "{}", line);
    }
    Ok(())
}

#[test]
fn invalid_level_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("levels.txt");
    fs::write(&input, "level 1\n1 2\n2 0\n")?;
    let output = Command::new(env!("CARGO_BIN_EXE_puzsolver"))
        .args(&["-p", "sliding", "-i"])
        .arg(&input)
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("invalid level 1"), "{}", stderr);
    Ok(())
}

fn project_path(path: impl AsRef<Path>) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
}
