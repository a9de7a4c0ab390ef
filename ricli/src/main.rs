use anyhow::{Context, Result};
use clap::Parser;
use std::convert::TryFrom;
use std::path::PathBuf;
use std::{fs, process};
use tracing::debug;

use ricochet_board::{
    print_board, Board, BoardDefinition, PositionEncoding, Robot, RobotPositions, Round,
};
use ricochet_solver::{default_stages, Stage, StagedSolver, Solver};

/// Solves a ricochet robots round with a staged breadth first search.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// A robot and its start position, e.g. `red=0,0`. Can be repeated.
    #[arg(short, long = "robot", value_parser = parse_robot)]
    robots: Vec<(Robot, Coordinates)>,

    /// The robot which has to reach the goal.
    #[arg(long, default_value = "red")]
    goal_robot: Robot,

    /// The goal field, e.g. `3,1`.
    #[arg(short, long, value_parser = parse_coordinates)]
    goal: Coordinates,

    /// A JSON board definition, the standard board is used if missing.
    #[arg(short, long)]
    board: Option<PathBuf>,

    /// A JSON list of search stages, the default stages are used if missing.
    #[arg(short, long)]
    stages: Option<PathBuf>,

    /// Run the searches of a stage in parallel.
    #[arg(short, long)]
    parallel: bool,

    /// Draw the board after every move.
    #[arg(short, long)]
    verbose: bool,

    /// Color the robots and the goal when drawing the board.
    #[arg(short, long)]
    color: bool,
}

/// A `(column, row)` pair, checked against the board once it is loaded.
type Coordinates = (PositionEncoding, PositionEncoding);

fn parse_coordinates(s: &str) -> Result<Coordinates, String> {
    let (column, row) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", s))?;
    let column = column
        .trim()
        .parse()
        .map_err(|e| format!("invalid column `{}`: {}", column, e))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row `{}`: {}", row, e))?;
    Ok((column, row))
}

fn parse_robot(s: &str) -> Result<(Robot, Coordinates), String> {
    let (robot, pos) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `robot=x,y`, got `{}`", s))?;
    let robot = robot.parse::<Robot>().map_err(|e| e.to_string())?;
    Ok((robot, parse_coordinates(pos)?))
}

fn load_board(path: Option<&PathBuf>) -> Result<Board> {
    let path = match path {
        Some(path) => path,
        None => return Ok(Board::standard()),
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;
    let definition = BoardDefinition::from_json(&json)
        .with_context(|| format!("failed to parse board file {}", path.display()))?;
    Board::try_from(definition).with_context(|| format!("invalid board in {}", path.display()))
}

fn load_stages(path: Option<&PathBuf>) -> Result<Vec<Stage>> {
    let path = match path {
        Some(path) => path,
        None => return Ok(default_stages()),
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read stage file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("failed to parse stage file {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let board = load_board(args.board.as_ref())?;
    let stages = load_stages(args.stages.as_ref())?;

    let robots = if args.robots.is_empty() {
        vec![
            (Robot::Red, (0, 0)),
            (Robot::Green, (2, 3)),
            (Robot::Blue, (15, 15)),
        ]
    } else {
        args.robots
    };
    let start = RobotPositions::from_tuples(&board, &robots).context("invalid robot positions")?;
    let (column, row) = args.goal;
    let goal = board.position(column, row).context("invalid goal")?;
    let round = Round::new(board, args.goal_robot, goal).context("invalid goal")?;
    debug!(?start, goal = %round.goal_position(), "starting search");

    if args.verbose {
        print_board(round.board(), &start, Some(round.goal_position()), args.color);
    }

    let solution = match StagedSolver::new(stages)
        .with_parallel_cases(args.parallel)
        .solve(&round, start)
    {
        Some(solution) => solution,
        None => {
            println!("no solution");
            process::exit(2);
        }
    };

    println!("{} moves", solution.cost());
    let history = solution.history();
    for (i, &(robot, direction)) in solution.path().movements().iter().enumerate() {
        let after = history[i + 1];
        let destination = after
            .get(robot)
            .context("moved robot is missing from the board")?;
        println!(" {:>2}  {:<8}{:<6}{}", i + 1, robot, direction, destination);
        if args.verbose {
            print_board(round.board(), &after, Some(round.goal_position()), args.color);
        }
    }

    Ok(())
}
