use getset::CopyGetters;
use ricochet_board::{Direction, Position, Robot, RobotPositions};
use std::ops;

use crate::Path;

/// Identifies a [`GameState`](GameState) inside a [`SearchTree`](SearchTree).
///
/// Ids are handed out in increasing order, a parent always has a smaller id than its children.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    /// Returns the index of the state in its tree.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the search tree.
///
/// Holds the robot positions, the number of moves needed to reach them and a link to the state
/// they were reached from. A state is never changed after it has been created.
#[derive(Debug, Copy, Clone, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct GameState {
    /// The positions of all robots.
    positions: RobotPositions,
    /// The number of moves needed to reach this state.
    cost: usize,
    /// The state this one was reached from, `None` for the root.
    parent: Option<StateId>,
    /// The robot and direction moved to get here from the parent.
    reached_with: Option<(Robot, Direction)>,
}

impl GameState {
    /// Creates a state without a parent.
    pub fn root(positions: RobotPositions) -> Self {
        Self {
            positions,
            cost: 0,
            parent: None,
            reached_with: None,
        }
    }

    /// Creates the state reached by moving `robot` in `direction` to `destination`.
    pub fn successor(
        parent_id: StateId,
        parent: &GameState,
        robot: Robot,
        direction: Direction,
        destination: Position,
    ) -> Self {
        Self {
            positions: parent.positions.with_robot(robot, destination),
            cost: parent.cost + 1,
            parent: Some(parent_id),
            reached_with: Some((robot, direction)),
        }
    }
}

/// An arena holding every state created during a search.
///
/// States refer to their parent by [`StateId`](StateId), so following the ids from any state
/// leads back to the root.
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    states: Vec<GameState>,
}

impl SearchTree {
    /// Creates a new empty tree with room for `capacity` states.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
        }
    }

    /// Adds a root state holding `positions`.
    pub fn insert_root(&mut self, positions: RobotPositions) -> StateId {
        self.insert(GameState::root(positions))
    }

    /// Adds `state` to the tree and returns its id.
    pub fn insert(&mut self, state: GameState) -> StateId {
        debug_assert!(state.parent.map_or(true, |id| id.0 < self.states.len()));
        self.states.push(state);
        StateId(self.states.len() - 1)
    }

    /// Returns the state with `id` if it exists.
    pub fn get(&self, id: StateId) -> Option<&GameState> {
        self.states.get(id.0)
    }

    /// Returns the number of stored states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Checks if the tree holds no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates over all states in the order they were inserted.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &GameState)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateId(i), state))
    }

    /// Iterates from the state with `id` over all its ancestors up to the root.
    pub fn ancestors(&self, id: StateId) -> impl Iterator<Item = (StateId, &GameState)> + '_ {
        std::iter::successors(Some(id), move |&id| self[id].parent)
            .map(move |id| (id, &self[id]))
    }

    /// Copies the states from the root to `id` into a new tree.
    ///
    /// The returned id refers to the copy of `id`, the last state of the new tree.
    pub fn branch(&self, id: StateId) -> (SearchTree, StateId) {
        let mut chain: Vec<GameState> = self.ancestors(id).map(|(_, &state)| state).collect();
        chain.reverse();

        let mut branch = SearchTree::with_capacity(chain.len());
        let mut previous = None;
        for mut state in chain {
            state.parent = previous;
            previous = Some(branch.insert(state));
        }

        let last = StateId(branch.len() - 1);
        (branch, last)
    }

    /// Returns the path from the root to the state with `id`.
    pub fn path_to(&self, id: StateId) -> Path {
        let mut movements: Vec<_> = self
            .ancestors(id)
            .filter_map(|(_, state)| state.reached_with)
            .collect();
        movements.reverse();

        let start = self
            .ancestors(id)
            .last()
            .map(|(_, state)| state.positions)
            .unwrap_or_else(|| self[id].positions);
        Path::new(start, self[id].positions, movements)
    }
}

impl ops::Index<StateId> for SearchTree {
    type Output = GameState;

    fn index(&self, index: StateId) -> &Self::Output {
        &self.states[index.0]
    }
}
