use getset::CopyGetters;
use rayon::prelude::*;
use ricochet_board::{Robot, RobotPositions, Round};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::breadth_first::{BreadthFirst, Movable, SearchCase};
use crate::{Solution, Solver};

/// Which robots the searches of a [`Stage`](Stage) may move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movers {
    /// Only the robot which has to reach the goal.
    GoalRobot,
    /// Every robot on the board.
    All,
    /// The goal robot and one other robot, one search per other robot.
    GoalAndEachOther,
}

/// One step of a staged search.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Stage {
    /// The robots that may be moved.
    movers: Movers,
    /// The blacklist limit of the searches, `None` means unlimited.
    #[serde(default)]
    blacklist_limit: Option<usize>,
    /// The cost limit of the searches, `None` means unlimited.
    #[serde(default)]
    cost_limit: Option<usize>,
}

impl Stage {
    /// Creates a new stage.
    pub fn new(movers: Movers, blacklist_limit: Option<usize>, cost_limit: Option<usize>) -> Self {
        Self {
            movers,
            blacklist_limit,
            cost_limit,
        }
    }

    /// Returns the searches to run for this stage when `goal_robot` has to be moved from `start`.
    ///
    /// Empty if the stage needs other robots but `goal_robot` is alone.
    pub fn cases(&self, goal_robot: Robot, start: &RobotPositions) -> Vec<SearchCase> {
        let case = |movable| SearchCase::new(movable, self.blacklist_limit, self.cost_limit);
        match self.movers {
            Movers::GoalRobot => vec![case(Movable::Only(vec![goal_robot]))],
            Movers::All => vec![case(Movable::All)],
            Movers::GoalAndEachOther => start
                .iter()
                .filter(|&(robot, _)| robot != goal_robot)
                .map(|(other, _)| case(Movable::Only(vec![goal_robot, other])))
                .collect(),
        }
    }
}

/// The stages used by [`StagedSolver::default`](StagedSolver::default).
///
/// Starts with the cheapest searches, moving only the goal robot, and ends with the most
/// expensive one, moving every robot with a high blacklist limit.
pub fn default_stages() -> Vec<Stage> {
    vec![
        Stage::new(Movers::GoalRobot, None, Some(8)),
        Stage::new(Movers::All, Some(2), Some(10)),
        Stage::new(Movers::GoalAndEachOther, Some(10), Some(10)),
        Stage::new(Movers::GoalAndEachOther, Some(100), Some(6)),
        Stage::new(Movers::All, Some(100), Some(10)),
    ]
}

/// Runs breadth first searches with increasingly loose constraints until one succeeds.
///
/// Stages are run in order and a stage only runs if all previous stages failed. A stage can
/// consist of several searches, see [`Movers::GoalAndEachOther`](Movers::GoalAndEachOther). These
/// are either run one after another, returning the first solution, or in parallel, returning the
/// cheapest solution. Ties are broken by the order of the searches, so the result does not depend
/// on which search finishes first.
#[derive(Debug, Clone)]
pub struct StagedSolver {
    stages: Vec<Stage>,
    parallel_cases: bool,
}

impl StagedSolver {
    /// Creates a new solver running `stages` in the given order.
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            parallel_cases: false,
        }
    }

    /// Sets whether the searches of a stage run in parallel.
    pub fn with_parallel_cases(mut self, parallel_cases: bool) -> Self {
        self.parallel_cases = parallel_cases;
        self
    }

    /// Returns the stages of the solver.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    fn solve_sequential(
        round: &Round,
        start: RobotPositions,
        cases: Vec<SearchCase>,
    ) -> Option<Solution> {
        cases
            .into_iter()
            .find_map(|case| BreadthFirst::new(case).solve(round, start))
    }

    fn solve_parallel(
        round: &Round,
        start: RobotPositions,
        cases: Vec<SearchCase>,
    ) -> Option<Solution> {
        cases
            .into_par_iter()
            .enumerate()
            .filter_map(|(i, case)| {
                BreadthFirst::new(case)
                    .solve(round, start)
                    .map(|solution| (i, solution))
            })
            .min_by_key(|(i, solution)| (solution.cost(), *i))
            .map(|(_, solution)| solution)
    }
}

impl Default for StagedSolver {
    fn default() -> Self {
        Self::new(default_stages())
    }
}

impl Solver for StagedSolver {
    fn solve(&mut self, round: &Round, start_positions: RobotPositions) -> Option<Solution> {
        for (index, stage) in self.stages.iter().enumerate() {
            let cases = stage.cases(round.goal_robot(), &start_positions);
            if cases.is_empty() {
                debug!(stage = index, "no robots to pair with, skipping stage");
                continue;
            }

            debug!(stage = index, cases = cases.len(), ?stage, "running stage");
            let found = if self.parallel_cases {
                Self::solve_parallel(round, start_positions, cases)
            } else {
                Self::solve_sequential(round, start_positions, cases)
            };

            if let Some(solution) = found {
                info!(stage = index, moves = solution.cost(), "found a solution");
                return Some(solution.found_in_stage(index));
            }
        }

        debug!(stages = self.stages.len(), "all stages failed");
        None
    }
}
