use itertools::Itertools;
use std::{fmt, mem, ops};

use crate::geometry::{extremes, ExtremeCache, Extremes, HalfCoordinate};
use crate::{Board, BoardError, Direction, Robot, DIRECTIONS, ROBOTS};

/// The type a position is encoded as.
///
/// Half of the bits store the column, the other half the row. A u16 is sufficient to encode any
/// position on a board with a side length of up to 255, see [Position] for more information.
pub type PositionEncoding = u16;

/// A position on the board.
///
/// ```txt
/// x (column) y (row)
/// 0000_0000|0000_0000
/// ```
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    encoded_position: PositionEncoding,
}

/// The fields a robot reaches when moving in each of the four directions.
///
/// A field equal to the robot's current position means the robot is blocked in that direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Moves {
    /// The destination when moving up.
    pub up: Position,
    /// The destination when moving down.
    pub down: Position,
    /// The destination when moving right.
    pub right: Position,
    /// The destination when moving left.
    pub left: Position,
}

/// Positions of the robots on the board.
///
/// Any non-empty subset of the four robots can be placed. All positions are on the board and no
/// two robots share a field. The type is `Copy`, moving a robot creates a new value.
#[derive(Copy, Clone, Hash, PartialEq, Eq)]
pub struct RobotPositions {
    robots: [Option<Position>; 4],
}

impl Position {
    /// Number of bits used for the encoding.
    const BIT_COUNT: PositionEncoding = mem::size_of::<PositionEncoding>() as PositionEncoding * 8;

    /// Bitflag used to extract the row information of a position by removing the column bits.
    ///
    /// The first half of the bits is `0` the rest `1`, `0000_0000_1111_1111` for `u16`.
    const ROW_FLAG: PositionEncoding = (1 << (Self::BIT_COUNT / 2)) - 1;

    /// Creates a new position.
    ///
    /// The caller has to make sure, that the given coordinates are within the bounds of the board,
    /// see [`Board::position`](Board::position) for a checked version.
    pub fn new(column: PositionEncoding, row: PositionEncoding) -> Self {
        debug_assert!(
            column <= Self::ROW_FLAG && row <= Self::ROW_FLAG,
            "({}, {}) does not fit into a position",
            column,
            row
        );
        Position {
            encoded_position: (column << (Self::BIT_COUNT / 2)) ^ (row & Self::ROW_FLAG),
        }
    }

    /// Returns the column (x coordinate) of the position.
    #[inline(always)]
    pub fn column(&self) -> PositionEncoding {
        self.encoded_position >> (Self::BIT_COUNT / 2)
    }

    /// Returns the row (y coordinate) of the position.
    #[inline(always)]
    pub fn row(&self) -> PositionEncoding {
        self.encoded_position & Self::ROW_FLAG
    }

    /// Returns the position in the same row with `column`.
    #[inline(always)]
    fn with_column(self, column: PositionEncoding) -> Self {
        Self::new(column, self.row())
    }

    /// Returns the position in the same column with `row`.
    #[inline(always)]
    fn with_row(self, row: PositionEncoding) -> Self {
        Self::new(self.column(), row)
    }

    /// Returns the position in half units.
    fn half_units(self) -> (HalfCoordinate, HalfCoordinate) {
        (
            2 * HalfCoordinate::from(self.column()),
            2 * HalfCoordinate::from(self.row()),
        )
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.column(), self.row())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.column(), self.row())
    }
}

impl From<Position> for (PositionEncoding, PositionEncoding) {
    fn from(pos: Position) -> Self {
        (pos.column(), pos.row())
    }
}

impl From<(PositionEncoding, PositionEncoding)> for Position {
    fn from((col, row): (PositionEncoding, PositionEncoding)) -> Self {
        Self::new(col, row)
    }
}

impl Moves {
    /// Combines the extremes of a field with the current position into destinations.
    fn from_extremes(current: Position, extremes: Extremes) -> Self {
        Self {
            up: current.with_row(extremes.up),
            down: current.with_row(extremes.down),
            right: current.with_column(extremes.right),
            left: current.with_column(extremes.left),
        }
    }

    /// Iterates over the destinations in the order of [`DIRECTIONS`](DIRECTIONS).
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Position)> + '_ {
        DIRECTIONS.iter().map(move |&dir| (dir, self[dir]))
    }
}

impl ops::Index<Direction> for Moves {
    type Output = Position;

    fn index(&self, index: Direction) -> &Self::Output {
        match index {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Right => &self.right,
            Direction::Left => &self.left,
        }
    }
}

impl RobotPositions {
    /// Places the robots on `board`.
    ///
    /// Fails if a position is not on the board, two robots share a field, a robot is placed twice
    /// or no robot is placed at all.
    pub fn new<I>(board: &Board, robots: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (Robot, Position)>,
    {
        let mut positions = Self {
            robots: [None; 4],
        };

        for (robot, pos) in robots {
            let pos = board.check_position(pos)?;
            if positions.robots[robot.index()].is_some() {
                return Err(BoardError::DuplicateRobot(robot));
            }
            if let Some((other, _)) = positions.iter().find(|&(_, other)| other == pos) {
                return Err(BoardError::DuplicatePosition {
                    first: other,
                    second: robot,
                    column: pos.column(),
                    row: pos.row(),
                });
            }
            positions.robots[robot.index()] = Some(pos);
        }

        if positions.is_empty() {
            return Err(BoardError::NoRobots);
        }
        Ok(positions)
    }

    /// Places the robots given as `(robot, (column, row))` on `board`.
    pub fn from_tuples(
        board: &Board,
        robots: &[(Robot, (PositionEncoding, PositionEncoding))],
    ) -> Result<Self, BoardError> {
        let robots = robots
            .iter()
            .map(|&(robot, (column, row))| Ok((robot, board.position(column, row)?)))
            .collect::<Result<Vec<_>, BoardError>>()?;
        Self::new(board, robots)
    }

    /// Returns the position of `robot` if it is on the board.
    #[inline(always)]
    pub fn get(&self, robot: Robot) -> Option<Position> {
        self.robots[robot.index()]
    }

    /// Iterates over the placed robots and their positions in the order of [`ROBOTS`](ROBOTS).
    pub fn iter(&self) -> impl Iterator<Item = (Robot, Position)> + '_ {
        ROBOTS
            .iter()
            .zip(self.robots.iter())
            .filter_map(|(&robot, pos)| pos.map(|pos| (robot, pos)))
    }

    /// Returns the number of placed robots.
    pub fn len(&self) -> usize {
        self.robots.iter().flatten().count()
    }

    /// Checks if no robot is placed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the positions with `robot` moved to `new_position`.
    ///
    /// The caller has to make sure `new_position` is on the board and free.
    pub fn with_robot(mut self, robot: Robot, new_position: Position) -> Self {
        debug_assert!(self.get(robot).is_some(), "{} is not on the board", robot);
        self.robots[robot.index()] = Some(new_position);
        self
    }

    /// Checks if the `robot` is on `pos`.
    #[inline(always)]
    pub fn contains_colored_robot(&self, robot: Robot, pos: Position) -> bool {
        self.get(robot) == Some(pos)
    }

    /// Computes the fields `robot` reaches when moving in each direction.
    ///
    /// Starts from the wall bounds stored in `cache` and tightens them with every other robot in
    /// the same row or column. The result contains the current position for every direction the
    /// robot is blocked in. Returns `None` if `robot` is not on the board.
    ///
    /// The positions have to lie on the board `cache` was built for.
    pub fn robot_moves(&self, robot: Robot, cache: &ExtremeCache) -> Option<Moves> {
        let current = self.get(robot)?;
        let (column, row) = (current.column(), current.row());
        let mut bounds = cache[current];

        for (other, pos) in self.iter() {
            if other == robot {
                continue;
            }

            if pos.column() == column {
                let other_row = pos.row();
                if other_row > row && other_row <= bounds.up {
                    bounds.up = other_row - 1;
                } else if other_row < row && other_row >= bounds.down {
                    bounds.down = other_row + 1;
                }
            } else if pos.row() == row {
                let other_column = pos.column();
                if other_column > column && other_column <= bounds.right {
                    bounds.right = other_column - 1;
                } else if other_column < column && other_column >= bounds.left {
                    bounds.left = other_column + 1;
                }
            }
        }

        Some(Moves::from_extremes(current, bounds))
    }

    /// Computes the same destinations as [`robot_moves`](Self::robot_moves) without a cache.
    ///
    /// All walls and robots on the robot's row and column are collected and passed to
    /// [`extremes`](extremes) at once. Much slower, since every wall is checked on every call.
    pub fn robot_moves_uncached(&self, robot: Robot, board: &Board) -> Option<Moves> {
        let current = self.get(robot)?;
        let (half_column, half_row) = current.half_units();

        let obstacles = board
            .walls()
            .iter()
            .map(|wall| wall.half_units())
            .chain(
                self.iter()
                    .filter(|&(other, _)| other != robot)
                    .map(|(_, pos)| pos.half_units()),
            )
            .collect::<Vec<_>>();

        let (up, down) = extremes(
            current.row(),
            obstacles
                .iter()
                .filter(|&&(x, _)| x == half_column)
                .map(|&(_, y)| y),
            board.side_length(),
        );
        let (right, left) = extremes(
            current.column(),
            obstacles
                .iter()
                .filter(|&&(_, y)| y == half_row)
                .map(|&(x, _)| x),
            board.side_length(),
        );

        Some(Moves::from_extremes(
            current,
            Extremes {
                up,
                down,
                right,
                left,
            },
        ))
    }

    /// Moves `robot` as far in the given `direction` as possible.
    ///
    /// Returns an unchanged copy if the robot is not on the board.
    pub fn move_in_direction(self, cache: &ExtremeCache, robot: Robot, direction: Direction) -> Self {
        match self.robot_moves(robot, cache) {
            Some(moves) => self.with_robot(robot, moves[direction]),
            None => self,
        }
    }

    /// Creates an Iterator over all positions reachable in one move that differ from `self`.
    pub fn reachable_positions<'a>(
        &'a self,
        cache: &'a ExtremeCache,
    ) -> impl Iterator<Item = (RobotPositions, (Robot, Direction))> + 'a {
        self.iter()
            .map(|(robot, _)| robot)
            .cartesian_product(DIRECTIONS.iter())
            .filter_map(move |(robot, &direction)| {
                Some(self.move_in_direction(cache, robot, direction))
                    .filter(|pos| pos != self)
                    .map(|pos| (pos, (robot, direction)))
            })
    }
}

impl fmt::Debug for RobotPositions {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for RobotPositions {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let lines = self
            .iter()
            .map(|(robot, pos)| format!("{}: {}", robot, pos))
            .join("\n");
        write!(fmt, "{}", lines)
    }
}

#[cfg(test)]
mod tests {
    use super::{Moves, Position};
    use crate::{Board, BoardError, Direction, ExtremeCache, PositionEncoding, Robot, RobotPositions};
    use rand::distributions::{Distribution, Uniform};
    use rand::SeedableRng;

    fn single_robot(board: &Board, column: PositionEncoding, row: PositionEncoding) -> RobotPositions {
        RobotPositions::from_tuples(board, &[(Robot::Red, (column, row))]).unwrap()
    }

    /// Places all four robots randomly on distinct fields of `board`.
    fn random_positions(board: &Board, rng: &mut rand::rngs::StdRng) -> RobotPositions {
        let uniform = Uniform::from(0..board.side_length());
        loop {
            let tuples: Vec<_> = crate::ROBOTS
                .iter()
                .map(|&robot| (robot, (uniform.sample(rng), uniform.sample(rng))))
                .collect();
            if let Ok(positions) = RobotPositions::from_tuples(board, &tuples) {
                return positions;
            }
        }
    }

    #[test]
    fn check_flags() {
        let base: PositionEncoding = 2;
        let row_flag = base.pow((Position::BIT_COUNT / 2) as u32) - 1;
        assert_eq!(row_flag, Position::ROW_FLAG);
        let pos = Position::new(200, 17);
        assert_eq!((pos.column(), pos.row()), (200, 17));
    }

    #[test]
    fn wall_stops_robot() {
        let board = Board::from_coordinates(16, &[(3.5, 1.0)]).unwrap();
        let cache = ExtremeCache::new(&board);
        let positions = single_robot(&board, 1, 1);

        assert_eq!(
            positions.robot_moves(Robot::Red, &cache).unwrap(),
            Moves {
                up: Position::new(1, 15),
                down: Position::new(1, 0),
                right: Position::new(3, 1),
                left: Position::new(0, 1),
            }
        );
    }

    #[test]
    fn empty_board_reaches_edges() {
        let board = Board::new_empty(6).unwrap();
        let cache = ExtremeCache::new(&board);
        for column in 0..6 {
            for row in 0..6 {
                let moves = single_robot(&board, column, row)
                    .robot_moves(Robot::Red, &cache)
                    .unwrap();
                assert_eq!(moves.up, Position::new(column, 5));
                assert_eq!(moves.down, Position::new(column, 0));
                assert_eq!(moves.right, Position::new(5, row));
                assert_eq!(moves.left, Position::new(0, row));
            }
        }
    }

    #[test]
    fn robots_stop_robot() {
        let board = Board::new_empty(16).unwrap();
        let cache = ExtremeCache::new(&board);
        let positions = RobotPositions::from_tuples(
            &board,
            &[
                (Robot::Red, (5, 5)),
                (Robot::Blue, (5, 9)),
                (Robot::Green, (5, 6)),
                (Robot::Yellow, (0, 5)),
            ],
        )
        .unwrap();

        let moves = positions.robot_moves(Robot::Red, &cache).unwrap();
        // Green is directly above, so moving up is not possible.
        assert_eq!(moves.up, Position::new(5, 5));
        assert_eq!(moves.down, Position::new(5, 0));
        assert_eq!(moves.right, Position::new(15, 5));
        assert_eq!(moves.left, Position::new(1, 5));

        let moves = positions.robot_moves(Robot::Blue, &cache).unwrap();
        assert_eq!(moves.down, Position::new(5, 7));
    }

    #[test]
    fn robot_behind_wall_is_ignored() {
        let board = Board::from_coordinates(16, &[(3.5, 1.0)]).unwrap();
        let cache = ExtremeCache::new(&board);
        let positions =
            RobotPositions::from_tuples(&board, &[(Robot::Red, (1, 1)), (Robot::Blue, (8, 1))])
                .unwrap();
        assert_eq!(
            positions.robot_moves(Robot::Red, &cache).unwrap().right,
            Position::new(3, 1)
        );
        // A robot right in front of the wall stops the robot earlier.
        let positions = positions.with_robot(Robot::Blue, Position::new(3, 1));
        assert_eq!(
            positions.robot_moves(Robot::Red, &cache).unwrap().right,
            Position::new(2, 1)
        );
    }

    #[test]
    fn missing_robot_has_no_moves() {
        let board = Board::new_empty(4).unwrap();
        let cache = ExtremeCache::new(&board);
        let positions = single_robot(&board, 0, 0);
        assert_eq!(positions.robot_moves(Robot::Green, &cache), None);
        assert_eq!(positions.robot_moves_uncached(Robot::Green, &board), None);
    }

    #[test]
    fn cached_matches_uncached() {
        let board = Board::standard();
        let cache = ExtremeCache::new(&board);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);

        for _ in 0..500 {
            let positions = random_positions(&board, &mut rng);
            for (robot, _) in positions.iter() {
                let cached = positions.robot_moves(robot, &cache);
                assert_eq!(cached, positions.robot_moves_uncached(robot, &board));
                // Calling again yields the same result.
                assert_eq!(cached, positions.robot_moves(robot, &cache));
            }
        }
    }

    #[test]
    fn obstacles_never_lengthen_moves() {
        let board = Board::standard();
        let cache = ExtremeCache::new(&board);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        let distance = |from: Position, to: Position| {
            (from.column() as i32 - to.column() as i32).abs()
                + (from.row() as i32 - to.row() as i32).abs()
        };

        for _ in 0..200 {
            let full = random_positions(&board, &mut rng);
            let start = full.get(Robot::Red).unwrap();
            let alone = RobotPositions::new(&board, vec![(Robot::Red, start)]).unwrap();

            let free = alone.robot_moves(Robot::Red, &cache).unwrap();
            let blocked = full.robot_moves(Robot::Red, &cache).unwrap();
            for (dir, pos) in blocked.iter() {
                assert!(distance(start, pos) <= distance(start, free[dir]));
            }
        }
    }

    #[test]
    fn moves_iterate_in_direction_order() {
        let board = Board::new_empty(4).unwrap();
        let cache = ExtremeCache::new(&board);
        let moves = single_robot(&board, 0, 0)
            .robot_moves(Robot::Red, &cache)
            .unwrap();
        let directions: Vec<_> = moves.iter().map(|(dir, _)| dir).collect();
        assert_eq!(
            directions,
            vec![Direction::Up, Direction::Down, Direction::Right, Direction::Left]
        );
        // Blocked directions are reported as the current position.
        assert_eq!(moves.down, Position::new(0, 0));
        assert_eq!(moves.left, Position::new(0, 0));
    }

    #[test]
    fn invalid_placements() {
        let board = Board::new_empty(4).unwrap();
        assert!(matches!(
            RobotPositions::from_tuples(&board, &[(Robot::Red, (1, 1)), (Robot::Blue, (1, 1))]),
            Err(BoardError::DuplicatePosition {
                first: Robot::Red,
                second: Robot::Blue,
                ..
            })
        ));
        assert!(matches!(
            RobotPositions::from_tuples(&board, &[(Robot::Red, (1, 1)), (Robot::Red, (2, 1))]),
            Err(BoardError::DuplicateRobot(Robot::Red))
        ));
        assert!(matches!(
            RobotPositions::from_tuples(&board, &[(Robot::Red, (4, 1))]),
            Err(BoardError::OutOfBounds { .. })
        ));
        assert!(matches!(
            RobotPositions::from_tuples(&board, &[]),
            Err(BoardError::NoRobots)
        ));
        // Coordinates too large for the encoding must not wrap onto the board.
        assert!(matches!(
            RobotPositions::from_tuples(&board, &[(Robot::Red, (256, 3))]),
            Err(BoardError::OutOfBounds {
                column: 256,
                row: 3,
                side_length: 4
            })
        ));
        assert!(matches!(
            RobotPositions::from_tuples(&board, &[(Robot::Red, (1, 257))]),
            Err(BoardError::OutOfBounds { row: 257, .. })
        ));
    }

    #[test]
    fn reachable_positions() {
        let board = Board::new_empty(16).unwrap();
        let cache = ExtremeCache::new(&board);
        let starting_pos = RobotPositions::from_tuples(
            &board,
            &[
                (Robot::Red, (0, 0)),
                (Robot::Blue, (1, 0)),
                (Robot::Green, (0, 1)),
                (Robot::Yellow, (1, 1)),
            ],
        )
        .unwrap();

        let expected = [
            (
                starting_pos.with_robot(Robot::Blue, Position::new(15, 0)),
                (Robot::Blue, Direction::Right),
            ),
            (
                starting_pos.with_robot(Robot::Green, Position::new(0, 15)),
                (Robot::Green, Direction::Up),
            ),
            (
                starting_pos.with_robot(Robot::Yellow, Position::new(1, 15)),
                (Robot::Yellow, Direction::Up),
            ),
            (
                starting_pos.with_robot(Robot::Yellow, Position::new(15, 1)),
                (Robot::Yellow, Direction::Right),
            ),
        ];

        assert_eq!(
            &starting_pos.reachable_positions(&cache).collect::<Vec<_>>(),
            &expected
        );
    }
}
