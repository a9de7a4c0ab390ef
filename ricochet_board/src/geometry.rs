//! Wall bounds of the fields of a board.
//!
//! A robot sliding along a row or column stops in front of the first obstacle in its way. The
//! obstacles are walls, the edges of the board and other robots. Walls never move, so the bounds
//! they create are computed once per board and stored in an [`ExtremeCache`](ExtremeCache). The
//! robots are taken into account later by the move generator in
//! [`RobotPositions::robot_moves`](crate::RobotPositions::robot_moves).

use itertools::iproduct;
use std::{fmt, ops};
use tracing::trace;

use crate::{Board, Position, PositionEncoding};

/// A coordinate measured in half fields.
///
/// Fields sit on even values (`2 * column` or `2 * row`) and walls on the odd values between
/// them, so the wall at `x = 3.5` has the half coordinate `7`. Signed to allow the positions just
/// outside of the board.
pub type HalfCoordinate = i32;

/// Finds the fields bounding a slide starting at `current` along one axis.
///
/// `obstacles` contains the half coordinates of all walls and robots on the same line. Returns
/// the field in front of the nearest obstacle above `current` and the field in front of the
/// nearest obstacle below it. Without an obstacle in a direction, the edge of the board is the
/// bound. Obstacles equal to `current` are ignored.
pub fn extremes<I>(
    current: PositionEncoding,
    obstacles: I,
    side_length: PositionEncoding,
) -> (PositionEncoding, PositionEncoding)
where
    I: IntoIterator<Item = HalfCoordinate>,
{
    let current = 2 * HalfCoordinate::from(current);
    // Start just outside of the board.
    let mut above = 2 * HalfCoordinate::from(side_length);
    let mut below = -2;

    for obstacle in obstacles {
        if obstacle > current && obstacle < above {
            above = obstacle;
        } else if obstacle < current && obstacle > below {
            below = obstacle;
        }
    }

    // Round towards `current`, a wall at 7 (3.5) stops a robot at 3 and a robot at 10 (5) at 4.
    let above = (above + 1).div_euclid(2) - 1;
    let below = below.div_euclid(2) + 1;
    (above as PositionEncoding, below as PositionEncoding)
}

/// The furthest fields a robot can reach from a field in every direction if only walls are
/// considered.
///
/// `up` and `down` are rows, `right` and `left` are columns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Extremes {
    /// The highest reachable row.
    pub up: PositionEncoding,
    /// The lowest reachable row.
    pub down: PositionEncoding,
    /// The rightmost reachable column.
    pub right: PositionEncoding,
    /// The leftmost reachable column.
    pub left: PositionEncoding,
}

/// The [`Extremes`](Extremes) of every field on a board.
///
/// Built once from the walls of a board and never changed afterwards, so it can be shared freely
/// between searches on the same board.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtremeCache {
    side_length: PositionEncoding,
    extremes: Vec<Extremes>,
}

impl ExtremeCache {
    /// Computes the wall bounds of every field on `board`.
    ///
    /// Takes `O(side_length² * walls)` time.
    pub fn new(board: &Board) -> Self {
        let side_length = board.side_length();
        let walls: Vec<_> = board.walls().iter().map(|wall| wall.half_units()).collect();

        let extremes = iproduct!(0..side_length, 0..side_length)
            .map(|(column, row)| {
                let (half_column, half_row) = (
                    2 * HalfCoordinate::from(column),
                    2 * HalfCoordinate::from(row),
                );
                let (up, down) = extremes(
                    row,
                    walls.iter().filter(|w| w.0 == half_column).map(|w| w.1),
                    side_length,
                );
                let (right, left) = extremes(
                    column,
                    walls.iter().filter(|w| w.1 == half_row).map(|w| w.0),
                    side_length,
                );
                Extremes {
                    up,
                    down,
                    right,
                    left,
                }
            })
            .collect();

        trace!(side_length, walls = walls.len(), "built extreme cache");
        Self {
            side_length,
            extremes,
        }
    }

    /// Returns the side length of the board the cache was built for.
    pub fn side_length(&self) -> PositionEncoding {
        self.side_length
    }
}

impl ops::Index<Position> for ExtremeCache {
    type Output = Extremes;

    #[inline(always)]
    fn index(&self, index: Position) -> &Self::Output {
        debug_assert!(
            index.column() < self.side_length && index.row() < self.side_length,
            "{} is not on a board with side length {}",
            index,
            self.side_length
        );
        &self.extremes[index.column() as usize * self.side_length as usize + index.row() as usize]
    }
}

impl fmt::Debug for ExtremeCache {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("ExtremeCache")
            .field("side_length", &self.side_length)
            .finish()
    }
}
