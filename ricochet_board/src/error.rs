use thiserror::Error;

use crate::{PositionEncoding, Robot};

/// Everything that can be wrong with a board configuration.
///
/// Invalid configurations are rejected when a [`Board`](crate::Board),
/// [`RobotPositions`](crate::RobotPositions) or [`Round`](crate::Round) is created, so a search
/// never runs over inconsistent data.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The side length is outside of the supported range.
    #[error("a board side length of {0} is not supported, it has to be between 2 and 255")]
    InvalidSideLength(PositionEncoding),
    /// The coordinates are not a half-integer on exactly one axis and an integer on the other.
    #[error("({x}, {y}) is not a wall between two neighbouring fields")]
    MalformedWall {
        /// The x coordinate of the rejected wall.
        x: f64,
        /// The y coordinate of the rejected wall.
        y: f64,
    },
    /// The wall does not separate two fields on the board.
    #[error("the wall at ({x}, {y}) lies outside of a board with side length {side_length}")]
    WallOutOfBounds {
        /// The x coordinate of the wall.
        x: f64,
        /// The y coordinate of the wall.
        y: f64,
        /// The side length of the board.
        side_length: PositionEncoding,
    },
    /// A position lies outside of the board.
    #[error("the position {column},{row} lies outside of a board with side length {side_length}")]
    OutOfBounds {
        /// The column of the position.
        column: PositionEncoding,
        /// The row of the position.
        row: PositionEncoding,
        /// The side length of the board.
        side_length: PositionEncoding,
    },
    /// Two robots were placed on the same field.
    #[error("{first} and {second} are both placed on {column},{row}")]
    DuplicatePosition {
        /// The robot placed first.
        first: Robot,
        /// The robot placed second.
        second: Robot,
        /// The column of the shared field.
        column: PositionEncoding,
        /// The row of the shared field.
        row: PositionEncoding,
    },
    /// A robot was placed more than once.
    #[error("the {0} robot was placed more than once")]
    DuplicateRobot(Robot),
    /// No robot was placed at all.
    #[error("at least one robot has to be placed on the board")]
    NoRobots,
    /// The name does not belong to any robot.
    #[error("unknown robot {0:?}, expected one of red, blue, green or yellow")]
    UnknownRobot(String),
    /// A board definition could not be parsed.
    #[error("failed to parse the board definition")]
    Definition(#[from] serde_json::Error),
}
