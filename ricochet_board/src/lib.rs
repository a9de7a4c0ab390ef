#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

//! Basic components to play Ricochet Robots.
//!
//! The board game [Ricochet Robots](https://en.wikipedia.org/wiki/Ricochet_Robot) is played on a
//! square board containing some walls and up to four robots. The goal of a round is to move one
//! designated robot onto a goal field. The robots can each move in all four directions but only
//! stop when they hit a wall, the edge of the board or another robot. This is counted as one move
//! and all robots can be moved in arbitrary order.
//!
//! Coordinates follow the usual mathematical orientation: `x` is the column and grows to the
//! right, `y` is the row and grows upwards. Walls lie between two neighbouring fields and are
//! therefore anchored on a half-integer on one axis, e.g. `(3.5, 1)` is the wall between the
//! fields `(3, 1)` and `(4, 1)`.
//!
//! The main components are the [`Board`](Board), [`RobotPositions`](RobotPositions) and the
//! [`Round`](Round). A `Board` stores the walls. `RobotPositions` stores where the robots are and
//! computes where they can move to. A `Round` combines a board with the goal and an
//! [`ExtremeCache`](ExtremeCache), the precomputed wall bounds used for move generation.

mod definition;
mod draw;
mod error;
pub mod geometry;
mod positions;
mod standard;

use std::convert::TryFrom;
use std::{fmt, str};

pub use crate::definition::BoardDefinition;
pub use crate::draw::{draw_board, draw_colored_board, print_board};
pub use crate::error::BoardError;
pub use crate::geometry::{extremes, ExtremeCache, Extremes, HalfCoordinate};
pub use crate::positions::{Moves, Position, PositionEncoding, RobotPositions};
pub use crate::standard::{STANDARD_SIDE_LENGTH, STANDARD_WALLS};

/// The largest supported side length of a board.
pub const MAX_SIDE_LENGTH: PositionEncoding = 255;

/// All `Direction`s a robot can move in.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Right,
    Direction::Left,
];

/// All robots defined by their color.
pub const ROBOTS: [Robot; 4] = [Robot::Red, Robot::Blue, Robot::Green, Robot::Yellow];

/// A wall between two neighbouring fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wall {
    /// The wall at `(column + 0.5, row)`, between `(column, row)` and `(column + 1, row)`.
    Vertical {
        /// The column left of the wall.
        column: PositionEncoding,
        /// The row the wall is in.
        row: PositionEncoding,
    },
    /// The wall at `(column, row + 0.5)`, between `(column, row)` and `(column, row + 1)`.
    Horizontal {
        /// The column the wall is in.
        column: PositionEncoding,
        /// The row below the wall.
        row: PositionEncoding,
    },
}

/// A ricochet robots board containing walls, but no robots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    side_length: PositionEncoding,
    walls: Vec<Wall>,
}

/// One round of a ricochet game.
///
/// Represents the problem of moving `goal_robot` onto `goal_position`. The round owns the board
/// together with the extreme cache built from its walls, so the cache always matches the walls.
#[derive(Debug, Clone)]
pub struct Round {
    board: Board,
    cache: ExtremeCache,
    goal_robot: Robot,
    goal_position: Position,
}

/// The robots identified by their color.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Robot {
    Red,
    Blue,
    Green,
    Yellow,
}

/// The directions a robot can be moved in.
///
/// `Up` increases the row, `Right` increases the column.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let string = format!("{:?}", &self);
        f.pad(&string)
    }
}

impl Robot {
    /// Returns the index of the robot in [`ROBOTS`](ROBOTS).
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Robot::Red => 0,
            Robot::Blue => 1,
            Robot::Green => 2,
            Robot::Yellow => 3,
        }
    }

    /// Returns the two letter label used when drawing the robot.
    pub fn label(self) -> &'static str {
        match self {
            Robot::Red => "RE",
            Robot::Blue => "BL",
            Robot::Green => "GR",
            Robot::Yellow => "YE",
        }
    }
}

impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let string = format!("{:?}", &self);
        f.pad(&string)
    }
}

impl str::FromStr for Robot {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Robot::Red),
            "blue" | "b" => Ok(Robot::Blue),
            "green" | "g" => Ok(Robot::Green),
            "yellow" | "y" => Ok(Robot::Yellow),
            _ => Err(BoardError::UnknownRobot(s.to_string())),
        }
    }
}

impl Wall {
    /// Creates a wall from its coordinates.
    ///
    /// Exactly one of the coordinates has to be a half-integer, the other one an integer.
    /// Negative coordinates are rejected as well.
    pub fn from_coordinates(x: f64, y: f64) -> Result<Self, BoardError> {
        let malformed = || BoardError::MalformedWall { x, y };
        let half_x = to_half_units(x).ok_or_else(malformed)?;
        let half_y = to_half_units(y).ok_or_else(malformed)?;

        match (half_x % 2, half_y % 2) {
            (1, 0) => Ok(Wall::Vertical {
                column: ((half_x - 1) / 2) as PositionEncoding,
                row: (half_y / 2) as PositionEncoding,
            }),
            (0, 1) => Ok(Wall::Horizontal {
                column: (half_x / 2) as PositionEncoding,
                row: ((half_y - 1) / 2) as PositionEncoding,
            }),
            _ => Err(malformed()),
        }
    }

    /// Returns the coordinates of the wall.
    pub fn coordinates(self) -> (f64, f64) {
        let (x, y) = self.half_units();
        (f64::from(x) / 2.0, f64::from(y) / 2.0)
    }

    /// Returns the coordinates of the wall in half units, see
    /// [`HalfCoordinate`](HalfCoordinate).
    #[inline]
    pub fn half_units(self) -> (HalfCoordinate, HalfCoordinate) {
        match self {
            Wall::Vertical { column, row } => {
                (2 * HalfCoordinate::from(column) + 1, 2 * HalfCoordinate::from(row))
            }
            Wall::Horizontal { column, row } => {
                (2 * HalfCoordinate::from(column), 2 * HalfCoordinate::from(row) + 1)
            }
        }
    }

    /// Checks if both fields separated by the wall lie on a board with `side_length`.
    fn fits(self, side_length: PositionEncoding) -> bool {
        match self {
            Wall::Vertical { column, row } => column + 1 < side_length && row < side_length,
            Wall::Horizontal { column, row } => column < side_length && row + 1 < side_length,
        }
    }
}

/// Converts a coordinate into half units if it is a non-negative multiple of `0.5`.
fn to_half_units(value: f64) -> Option<HalfCoordinate> {
    let doubled = value * 2.0;
    let max = f64::from(2 * HalfCoordinate::from(MAX_SIDE_LENGTH));
    if doubled.is_finite() && doubled.fract() == 0.0 && (0.0..=max).contains(&doubled) {
        Some(doubled as HalfCoordinate)
    } else {
        None
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (x, y) = self.coordinates();
        write!(f, "({}, {})", x, y)
    }
}

/// Board impl containing code to create a board.
impl Board {
    /// Creates a new board with the given `walls`.
    ///
    /// Fails if the side length is not supported or a wall does not fit on the board.
    pub fn new(side_length: PositionEncoding, walls: Vec<Wall>) -> Result<Self, BoardError> {
        if !(2..=MAX_SIDE_LENGTH).contains(&side_length) {
            return Err(BoardError::InvalidSideLength(side_length));
        }

        if let Some(wall) = walls.iter().find(|wall| !wall.fits(side_length)) {
            let (x, y) = wall.coordinates();
            return Err(BoardError::WallOutOfBounds { x, y, side_length });
        }

        Ok(Self { side_length, walls })
    }

    /// Creates a new board from wall coordinates like `(3.5, 1.0)`.
    pub fn from_coordinates(
        side_length: PositionEncoding,
        walls: &[(f64, f64)],
    ) -> Result<Self, BoardError> {
        let walls = walls
            .iter()
            .map(|&(x, y)| Wall::from_coordinates(x, y))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(side_length, walls)
    }

    /// Creates a new empty board with no walls with `side_length`.
    pub fn new_empty(side_length: PositionEncoding) -> Result<Self, BoardError> {
        Self::new(side_length, Vec::new())
    }

    /// Creates the standard 16x16 board.
    pub fn standard() -> Self {
        Self {
            side_length: STANDARD_SIDE_LENGTH,
            walls: STANDARD_WALLS.to_vec(),
        }
    }
}

/// Board impl containing code to interact with a board.
impl Board {
    /// Returns the side length of the board.
    pub fn side_length(&self) -> PositionEncoding {
        self.side_length
    }

    /// Returns the walls of the board.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Checks if `pos` lies on the board.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.column() < self.side_length && pos.row() < self.side_length
    }

    /// Creates the position `(column, row)` if it lies on the board.
    ///
    /// Checks the raw coordinates before they are packed into a [`Position`](Position), so values
    /// too large for the encoding are rejected instead of wrapping onto another field.
    pub fn position(
        &self,
        column: PositionEncoding,
        row: PositionEncoding,
    ) -> Result<Position, BoardError> {
        if column < self.side_length && row < self.side_length {
            Ok(Position::new(column, row))
        } else {
            Err(BoardError::OutOfBounds {
                column,
                row,
                side_length: self.side_length,
            })
        }
    }

    /// Returns `pos` if it lies on the board.
    pub fn check_position(&self, pos: Position) -> Result<Position, BoardError> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(BoardError::OutOfBounds {
                column: pos.column(),
                row: pos.row(),
                side_length: self.side_length,
            })
        }
    }
}

impl TryFrom<BoardDefinition> for Board {
    type Error = BoardError;

    fn try_from(definition: BoardDefinition) -> Result<Self, Self::Error> {
        Board::from_coordinates(definition.side_length, &definition.walls)
    }
}

impl Round {
    /// Creates a new ricochet robots round and builds the extreme cache for the board.
    pub fn new(
        board: Board,
        goal_robot: Robot,
        goal_position: Position,
    ) -> Result<Self, BoardError> {
        let goal_position = board.check_position(goal_position)?;
        let cache = ExtremeCache::new(&board);
        Ok(Self {
            board,
            cache,
            goal_robot,
            goal_position,
        })
    }

    /// Returns the `Board` the robots move on.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the wall bounds of every field of the board.
    pub fn cache(&self) -> &ExtremeCache {
        &self.cache
    }

    /// Returns the robot that has to reach the goal.
    pub fn goal_robot(&self) -> Robot {
        self.goal_robot
    }

    /// Returns the goal position.
    pub fn goal_position(&self) -> Position {
        self.goal_position
    }

    /// Checks if the goal has been reached.
    pub fn target_reached(&self, positions: &RobotPositions) -> bool {
        positions.contains_colored_robot(self.goal_robot, self.goal_position)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, BoardError, Position, Robot, RobotPositions, Round, Wall};
    use std::convert::TryFrom;

    #[test]
    fn board_creation() {
        let board = Board::standard();
        assert_eq!(board.side_length(), 16);
        assert_eq!(board.walls().len(), 50);
        // The standard walls pass the same validation as user supplied ones.
        assert_eq!(
            Board::new(16, board.walls().to_vec()).unwrap(),
            Board::standard()
        );
    }

    #[test]
    fn wall_from_coordinates() {
        assert_eq!(
            Wall::from_coordinates(3.5, 1.0).unwrap(),
            Wall::Vertical { column: 3, row: 1 }
        );
        assert_eq!(
            Wall::from_coordinates(11.0, 0.5).unwrap(),
            Wall::Horizontal { column: 11, row: 0 }
        );
        assert_eq!(Wall::Vertical { column: 3, row: 1 }.coordinates(), (3.5, 1.0));
        assert_eq!(Wall::Horizontal { column: 11, row: 0 }.half_units(), (22, 1));
    }

    #[test]
    fn malformed_walls() {
        for &(x, y) in &[(3.0, 1.0), (3.5, 1.5), (3.25, 1.0), (-0.5, 2.0), (f64::NAN, 1.0)] {
            assert!(
                matches!(
                    Wall::from_coordinates(x, y),
                    Err(BoardError::MalformedWall { .. })
                ),
                "({}, {}) was accepted",
                x,
                y
            );
        }
    }

    #[test]
    fn walls_outside_of_board() {
        // (15.5, 0) would separate column 15 from a column 16 which does not exist.
        let err = Board::from_coordinates(16, &[(15.5, 0.0)]).unwrap_err();
        assert!(matches!(err, BoardError::WallOutOfBounds { .. }));
        let err = Board::from_coordinates(4, &[(1.0, 3.5)]).unwrap_err();
        assert!(matches!(err, BoardError::WallOutOfBounds { .. }));
        assert!(Board::from_coordinates(4, &[(2.5, 3.0), (3.0, 2.5)]).is_ok());
    }

    #[test]
    fn side_length_range() {
        assert!(matches!(
            Board::new_empty(1),
            Err(BoardError::InvalidSideLength(1))
        ));
        assert!(matches!(
            Board::new_empty(256),
            Err(BoardError::InvalidSideLength(256))
        ));
        assert!(Board::new_empty(2).is_ok());
    }

    #[test]
    fn robot_from_str() {
        assert_eq!("red".parse::<Robot>().unwrap(), Robot::Red);
        assert_eq!("Yellow".parse::<Robot>().unwrap(), Robot::Yellow);
        assert_eq!("g".parse::<Robot>().unwrap(), Robot::Green);
        assert!(matches!(
            "purple".parse::<Robot>(),
            Err(BoardError::UnknownRobot(_))
        ));
    }

    #[test]
    fn round_goal_on_board() {
        let board = Board::new_empty(4).unwrap();
        assert!(matches!(
            Round::new(board.clone(), Robot::Red, Position::new(4, 0)),
            Err(BoardError::OutOfBounds { .. })
        ));

        let round = Round::new(board.clone(), Robot::Red, Position::new(3, 0)).unwrap();
        let positions = RobotPositions::new(
            &board,
            vec![(Robot::Red, Position::new(3, 0)), (Robot::Blue, Position::new(0, 0))],
        )
        .unwrap();
        assert!(round.target_reached(&positions));
        let positions = positions.with_robot(Robot::Red, Position::new(3, 1));
        assert!(!round.target_reached(&positions));

        assert_eq!(board.position(1, 3).unwrap(), Position::new(1, 3));
        // 257 does not fit into the row bits and must not wrap to row 1.
        assert!(matches!(
            board.position(1, 257),
            Err(BoardError::OutOfBounds {
                column: 1,
                row: 257,
                side_length: 4
            })
        ));
        assert!(matches!(
            board.position(256, 0),
            Err(BoardError::OutOfBounds { column: 256, .. })
        ));
    }

    #[test]
    fn board_from_definition() {
        let definition = crate::BoardDefinition {
            side_length: 4,
            walls: vec![(0.5, 1.0), (2.0, 1.5)],
        };
        let board = Board::try_from(definition).unwrap();
        assert_eq!(
            board.walls(),
            &[
                Wall::Vertical { column: 0, row: 1 },
                Wall::Horizontal { column: 2, row: 1 }
            ]
        );
    }
}
