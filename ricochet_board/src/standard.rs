//! The board layout used when no other board is given.

use crate::{PositionEncoding, Wall};

/// The side length of the standard board.
pub const STANDARD_SIDE_LENGTH: PositionEncoding = 16;

const fn v(column: PositionEncoding, row: PositionEncoding) -> Wall {
    Wall::Vertical { column, row }
}

const fn h(column: PositionEncoding, row: PositionEncoding) -> Wall {
    Wall::Horizontal { column, row }
}

/// The walls of the standard 16x16 board.
///
/// `v(3, 0)` is the wall at `(3.5, 0)` and `h(11, 0)` the wall at `(11, 0.5)`.
pub const STANDARD_WALLS: [Wall; 50] = [
    v(3, 0),
    v(13, 0),
    v(10, 1),
    v(3, 2),
    v(1, 3),
    v(14, 3),
    v(5, 4),
    v(3, 5),
    v(10, 5),
    v(11, 6),
    v(6, 7),
    v(8, 7),
    v(6, 8),
    v(8, 8),
    v(1, 9),
    v(11, 9),
    v(5, 10),
    v(3, 11),
    v(9, 11),
    v(14, 12),
    v(7, 13),
    v(4, 14),
    v(10, 14),
    v(2, 15),
    v(8, 15),
    h(0, 5),
    h(0, 11),
    h(1, 9),
    h(2, 2),
    h(3, 4),
    h(3, 10),
    h(4, 2),
    h(5, 4),
    h(5, 13),
    h(6, 10),
    h(7, 6),
    h(7, 8),
    h(7, 12),
    h(8, 6),
    h(8, 8),
    h(9, 10),
    h(10, 4),
    h(11, 0),
    h(11, 14),
    h(12, 6),
    h(12, 8),
    h(14, 3),
    h(14, 12),
    h(15, 5),
    h(15, 13),
];
