use getset::{CopyGetters, Getters};
use ricochet_board::{Moves, Robot, RobotPositions, Round};
use std::collections::VecDeque;
use tracing::{debug, warn};

use crate::blacklist::Blacklist;
use crate::state::{GameState, SearchTree, StateId};
use crate::{Solution, Solver};

/// The robots a search may move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movable {
    /// Every robot on the board may move.
    All,
    /// Only the listed robots may move.
    Only(Vec<Robot>),
}

impl Movable {
    /// Checks if `robot` may be moved.
    pub fn contains(&self, robot: Robot) -> bool {
        match self {
            Movable::All => true,
            Movable::Only(robots) => robots.contains(&robot),
        }
    }
}

/// The constraints of a single breadth first search.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct SearchCase {
    /// The robots which may be moved.
    #[getset(get = "pub")]
    movable: Movable,
    /// How often a robot may be moved onto the same field, see [`Blacklist`](Blacklist).
    #[getset(get_copy = "pub")]
    blacklist_limit: Option<usize>,
    /// The search is aborted once a state with more moves is taken from the queue.
    #[getset(get_copy = "pub")]
    cost_limit: Option<usize>,
}

impl SearchCase {
    /// Creates a new search case. `None` means unlimited.
    pub fn new(movable: Movable, blacklist_limit: Option<usize>, cost_limit: Option<usize>) -> Self {
        Self {
            movable,
            blacklist_limit,
            cost_limit,
        }
    }

    /// A search moving all robots without any limits.
    ///
    /// Finds an optimal solution, but may never terminate if the goal is unreachable.
    pub fn unlimited() -> Self {
        Self::new(Movable::All, None, None)
    }
}

/// Turns the moves of `robot` into the states following the state `parent`.
///
/// Discards a destination if it equals the robot's current position, if it equals the robot's
/// position in the state before `parent`, or if `blacklist` does not admit it. The blacklist is
/// consulted last, so discarded moves are not counted as visits. Only immediate back-moves are
/// detected, longer cycles pass.
pub fn get_next_states(
    robot: Robot,
    moves: &Moves,
    tree: &SearchTree,
    parent: StateId,
    blacklist: &mut Blacklist,
) -> Vec<GameState> {
    let state = &tree[parent];
    let current = match state.positions().get(robot) {
        Some(pos) => pos,
        None => return Vec::new(),
    };
    let previous = state
        .parent()
        .and_then(|id| tree[id].positions().get(robot));

    moves
        .iter()
        .filter(|&(_, dest)| dest != current && Some(dest) != previous)
        .filter(|&(_, dest)| blacklist.admit(robot, dest))
        .map(|(direction, dest)| GameState::successor(parent, state, robot, direction, dest))
        .collect()
}

/// Searches the game states in order of moves needed to reach them.
///
/// States are never deduplicated. A [`Blacklist`](Blacklist) and a cost limit keep the search
/// finite; without both, the first solution found is optimal but an unsolvable round keeps the
/// search running forever.
#[derive(Debug, Clone)]
pub struct BreadthFirst {
    case: SearchCase,
    /// Holds all states created by the last search.
    tree: SearchTree,
    blacklist: Blacklist,
}

impl Solver for BreadthFirst {
    fn solve(&mut self, round: &Round, start_positions: RobotPositions) -> Option<Solution> {
        self.tree = SearchTree::with_capacity(4096);
        self.blacklist = Blacklist::new(self.case.blacklist_limit);

        // Check if the robot has already reached the target
        if round.target_reached(&start_positions) {
            let root = self.tree.insert_root(start_positions);
            return Some(Solution::new(&self.tree, root));
        }

        if start_positions.get(round.goal_robot()).is_none() {
            warn!(robot = %round.goal_robot(), "the goal robot is not on the board");
            return None;
        }

        let found = self.start(round, start_positions);
        debug!(
            states = self.tree.len(),
            solved = found.is_some(),
            "breadth first search finished"
        );
        found.map(|id| Solution::new(&self.tree, id))
    }
}

impl BreadthFirst {
    /// Creates a new solver searching within the constraints of `case`.
    pub fn new(case: SearchCase) -> Self {
        Self {
            blacklist: Blacklist::new(case.blacklist_limit),
            case,
            tree: SearchTree::default(),
        }
    }

    /// Returns the states created by the last search.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Returns the visit counters of the last search.
    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Runs the search and returns the id of the first state reaching the goal.
    fn start(&mut self, round: &Round, start_pos: RobotPositions) -> Option<StateId> {
        let root = self.tree.insert_root(start_pos);
        let mut queue = VecDeque::with_capacity(4096);
        queue.push_back(root);

        while let Some(id) = queue.pop_front() {
            // The queue is ordered by cost, all remaining states are too expensive as well.
            let cost = self.tree[id].cost();
            if self.case.cost_limit.map_or(false, |limit| cost > limit) {
                debug!(cost, queued = queue.len(), "cost limit exceeded");
                return None;
            }

            let positions = self.tree[id].positions();
            for (robot, _) in positions.iter() {
                if !self.case.movable.contains(robot) {
                    continue;
                }
                let moves = match positions.robot_moves(robot, round.cache()) {
                    Some(moves) => moves,
                    None => continue,
                };

                for next in get_next_states(robot, &moves, &self.tree, id, &mut self.blacklist) {
                    let reached = round.target_reached(&next.positions());
                    let next_id = self.tree.insert(next);
                    // Check the goal before queueing, the first winner is returned.
                    if reached {
                        return Some(next_id);
                    }
                    queue.push_back(next_id);
                }
            }
        }

        None
    }
}
