//! Solvers for Ricochet Robots rounds.
//!
//! The [`BreadthFirst`](BreadthFirst) solver runs a single breadth first search restricted by a
//! [`SearchCase`](SearchCase): which robots may move, how often a robot may visit the same field
//! and how many moves a solution may need. The [`StagedSolver`](StagedSolver) runs a series of
//! such searches with increasingly loose restrictions until one of them succeeds.

mod blacklist;
mod breadth_first;
mod staged;
mod state;

use getset::Getters;
use ricochet_board::{Direction, Robot, RobotPositions, Round};

pub use blacklist::Blacklist;
pub use breadth_first::{get_next_states, BreadthFirst, Movable, SearchCase};
pub use staged::{default_stages, Movers, Stage, StagedSolver};
pub use state::{GameState, SearchTree, StateId};

/// A search for a way to move the goal robot of a round onto its goal.
pub trait Solver {
    /// Find a solution to get from the `start_positions` to the goal of `round`.
    ///
    /// Returns `None` if the search ends without reaching the goal.
    fn solve(&mut self, round: &Round, start_positions: RobotPositions) -> Option<Solution>;
}

/// Runs a single breadth first search within the constraints of `case`.
pub fn solve_case(round: &Round, start_positions: RobotPositions, case: SearchCase) -> Option<Solution> {
    BreadthFirst::new(case).solve(round, start_positions)
}

/// Runs the default stages of the [`StagedSolver`](StagedSolver).
pub fn full_solve(round: &Round, start_positions: RobotPositions) -> Option<Solution> {
    StagedSolver::default().solve(round, start_positions)
}

/// A path from a starting position to another position.
///
/// Contains the starting positions of the robots, their final positions and a path from the former
/// to the latter. The path consists of tuples of a robot and the direction it moved in.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct Path {
    start_pos: RobotPositions,
    end_pos: RobotPositions,
    movements: Vec<(Robot, Direction)>,
}

impl Path {
    /// Creates a new path containing the starting and final positions of the robots and a path
    /// to reach the target.
    pub fn new(
        start_pos: RobotPositions,
        end_pos: RobotPositions,
        movements: Vec<(Robot, Direction)>,
    ) -> Self {
        debug_assert!(!movements.is_empty() || start_pos == end_pos);
        Self {
            start_pos,
            end_pos,
            movements,
        }
    }

    /// Returns the number of moves in the path.
    pub fn len(&self) -> usize {
        self.movements.len()
    }

    /// Checks if the path has a length of 0.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The winning state of a search together with all states leading to it.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Only the states from the start to the winning state.
    tree: SearchTree,
    state: StateId,
    /// The index of the stage that found the solution, if it was found by a staged search.
    stage: Option<usize>,
}

impl Solution {
    /// Extracts the branch leading to `state` from `tree`.
    pub(crate) fn new(tree: &SearchTree, state: StateId) -> Self {
        let (tree, state) = tree.branch(state);
        Self {
            tree,
            state,
            stage: None,
        }
    }

    pub(crate) fn found_in_stage(mut self, stage: usize) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Returns the winning state.
    pub fn state(&self) -> &GameState {
        &self.tree[self.state]
    }

    /// Returns the number of moves of the solution.
    pub fn cost(&self) -> usize {
        self.state().cost()
    }

    /// Returns the states from the start to the winning state, its parent links lead back to
    /// the start.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Returns the index of the stage which found the solution.
    pub fn stage(&self) -> Option<usize> {
        self.stage
    }

    /// Returns the robot positions after every move, starting with the start positions.
    pub fn history(&self) -> Vec<RobotPositions> {
        let mut history: Vec<_> = self
            .tree
            .ancestors(self.state)
            .map(|(_, state)| state.positions())
            .collect();
        history.reverse();
        history
    }

    /// Returns the moves of the solution.
    pub fn path(&self) -> Path {
        self.tree.path_to(self.state)
    }
}
