use serde::{Deserialize, Serialize};

use crate::{Board, BoardError, PositionEncoding};

/// The serialized form of a board.
///
/// Walls are stored as coordinate pairs, e.g. `[3.5, 1]` for the wall between `(3, 1)` and
/// `(4, 1)`:
///
/// ```json
/// { "side_length": 16, "walls": [[3.5, 0], [11, 0.5]] }
/// ```
///
/// Convert it into a [`Board`](Board) with `Board::try_from` to validate the walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDefinition {
    /// The side length of the square board.
    pub side_length: PositionEncoding,
    /// The walls as `(x, y)` coordinates.
    #[serde(default)]
    pub walls: Vec<(f64, f64)>,
}

impl BoardDefinition {
    /// Parses a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the definition into pretty printed JSON.
    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&Board> for BoardDefinition {
    fn from(board: &Board) -> Self {
        Self {
            side_length: board.side_length(),
            walls: board.walls().iter().map(|wall| wall.coordinates()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BoardDefinition;
    use crate::{Board, BoardError, Wall};
    use std::convert::TryFrom;

    #[test]
    fn parse_definition() {
        let definition =
            BoardDefinition::from_json(r#"{ "side_length": 8, "walls": [[3.5, 0], [1, 0.5]] }"#)
                .unwrap();
        let board = Board::try_from(definition).unwrap();
        assert_eq!(board.side_length(), 8);
        assert_eq!(
            board.walls(),
            &[
                Wall::Vertical { column: 3, row: 0 },
                Wall::Horizontal { column: 1, row: 0 }
            ]
        );
    }

    #[test]
    fn walls_are_optional() {
        let definition = BoardDefinition::from_json(r#"{ "side_length": 5 }"#).unwrap();
        assert_eq!(Board::try_from(definition).unwrap(), Board::new_empty(5).unwrap());
    }

    #[test]
    fn invalid_definitions() {
        assert!(matches!(
            BoardDefinition::from_json(r#"{ "walls": [] }"#),
            Err(BoardError::Definition(_))
        ));

        let definition =
            BoardDefinition::from_json(r#"{ "side_length": 8, "walls": [[3.5, 0.5]] }"#).unwrap();
        assert!(matches!(
            Board::try_from(definition),
            Err(BoardError::MalformedWall { .. })
        ));
    }

    #[test]
    fn standard_board_survives_serialization() {
        let board = Board::standard();
        let json = BoardDefinition::from(&board).to_json().unwrap();
        let parsed = Board::try_from(BoardDefinition::from_json(&json).unwrap()).unwrap();
        assert_eq!(parsed, board);
    }
}
