use draw_a_box::{find_character, Weight};

use crate::{Board, Position, Robot, RobotPositions, Wall};

/// Width per field in the string in number of characters.
pub const FIELD_DRAW_WIDTH: usize = 5;

/// Height per field in the string in number of characters.
pub const FIELD_DRAW_HEIGHT: usize = 2;

/// The label drawn on the goal field.
const GOAL_LABEL: &str = "**";

/// Walls to the right and below a field as seen on screen, i.e. with the top row first.
#[derive(Debug, Copy, Clone, Default)]
struct Field {
    down: bool,
    right: bool,
}

/// Creates a string representation of a board with robots and an optional goal.
///
/// The top row of the board is drawn first. Robots are drawn with their two letter label, the
/// goal as `**` unless a robot stands on it. Walls and the edge of the board are heavy lines.
pub fn draw_board(board: &Board, positions: &RobotPositions, goal: Option<Position>) -> String {
    render(board, positions, goal, false)
}

/// Like [`draw_board`](draw_board), but colors the robot labels and the goal with ANSI escape
/// codes.
pub fn draw_colored_board(
    board: &Board,
    positions: &RobotPositions,
    goal: Option<Position>,
) -> String {
    render(board, positions, goal, true)
}

/// Prints the board as drawn by [`draw_board`](draw_board) or, if `colored` is set,
/// [`draw_colored_board`](draw_colored_board).
pub fn print_board(
    board: &Board,
    positions: &RobotPositions,
    goal: Option<Position>,
    colored: bool,
) {
    print!("{}", render(board, positions, goal, colored));
}

fn render(
    board: &Board,
    positions: &RobotPositions,
    goal: Option<Position>,
    colored: bool,
) -> String {
    let side_length = board.side_length() as usize;
    let mut canvas = create_board_string_vec(&wall_fields(board));

    let labels = goal
        .map(|pos| (pos, None))
        .into_iter()
        .chain(positions.iter().map(|(robot, pos)| (pos, Some(robot))));
    for (pos, robot) in labels {
        let (first, second) = if colored {
            colored_label(robot)
        } else {
            let label = robot.map_or(GOAL_LABEL, Robot::label);
            (&label[0..1], &label[1..2])
        };
        let col = pos.column() as usize * FIELD_DRAW_WIDTH + 2;
        let row = (side_length - 1 - pos.row() as usize) * FIELD_DRAW_HEIGHT + 1;
        canvas[col][row] = first;
        canvas[col + 1][row] = second;
    }

    let mut output = String::new();
    for row in 0..canvas[0].len() {
        for col in &canvas {
            output.push_str(col[row]);
        }
        output.push('\n');
    }

    output
}

/// The two halves of a label, the color starts with the first and ends with the second one.
fn colored_label(robot: Option<Robot>) -> (&'static str, &'static str) {
    match robot {
        Some(Robot::Red) => ("\x1b[91mR", "E\x1b[0m"),
        Some(Robot::Blue) => ("\x1b[94mB", "L\x1b[0m"),
        Some(Robot::Green) => ("\x1b[92mG", "R\x1b[0m"),
        Some(Robot::Yellow) => ("\x1b[93mY", "E\x1b[0m"),
        None => ("\x1b[1;36m*", "*\x1b[0m"),
    }
}

/// Converts the walls of `board` into screen fields, indexed by `[column][screen_row]`.
///
/// The last column and row get walls to the right and below, which also close the board on the
/// left and the top, since `create_board_string_vec` wraps around at the edges.
fn wall_fields(board: &Board) -> Vec<Vec<Field>> {
    let len = board.side_length() as usize;
    let mut fields = vec![vec![Field::default(); len]; len];

    for wall in board.walls() {
        match *wall {
            Wall::Vertical { column, row } => {
                fields[column as usize][len - 1 - row as usize].right = true
            }
            Wall::Horizontal { column, row } => {
                fields[column as usize][len - 2 - row as usize].down = true
            }
        }
    }

    for i in 0..len {
        fields[len - 1][i].right = true;
        fields[i][len - 1].down = true;
    }

    fields
}

/// Creates the strings making up the board, indexed by `[column][row]` of the canvas.
fn create_board_string_vec(walls: &[Vec<Field>]) -> Vec<Vec<&'static str>> {
    let width = walls.len();
    let height = walls[0].len();
    let canvas_width = width * FIELD_DRAW_WIDTH + 1;
    let canvas_height = height * FIELD_DRAW_HEIGHT + 1;

    let mut canvas = vec![vec![" "; canvas_height]; canvas_width];
    let mut corner_weights = vec![vec![[Weight::Empty; 4]; canvas_height]; canvas_width];

    // Set corners
    for col in (0..canvas_width).step_by(FIELD_DRAW_WIDTH) {
        for row in (0..canvas_height).step_by(FIELD_DRAW_HEIGHT) {
            let up_left_col = (col / FIELD_DRAW_WIDTH + width - 1) % width;
            let up_left_row = (row / FIELD_DRAW_HEIGHT + height - 1) % height;
            let up_left = walls[up_left_col][up_left_row];
            let up_right = walls[(up_left_col + 1) % width][up_left_row];
            let down_left = walls[up_left_col][(up_left_row + 1) % height];

            let weight = |is_set| if is_set { Weight::Heavy } else { Weight::Light };
            let mut up_weight = weight(up_left.right);
            let mut left_weight = weight(up_left.down);
            let mut right_weight = weight(up_right.down);
            let mut down_weight = weight(down_left.right);

            match col {
                0 => left_weight = Weight::Empty,
                i if i == (canvas_width - 1) => right_weight = Weight::Empty,
                _ => (),
            }

            match row {
                0 => up_weight = Weight::Empty,
                i if i == (canvas_height - 1) => down_weight = Weight::Empty,
                _ => (),
            }

            corner_weights[col][row] = [up_weight, right_weight, down_weight, left_weight];
            canvas[col][row] = find_character(up_weight, right_weight, down_weight, left_weight);
        }
    }

    // Set horizontal connections
    for row in (0..canvas_height).step_by(FIELD_DRAW_HEIGHT) {
        let mut setting = Weight::Light;
        for col in 0..canvas_width {
            if col % FIELD_DRAW_WIDTH == 0 {
                setting = corner_weights[col][row][1];
            } else {
                let empty = Weight::Empty;
                canvas[col][row] = find_character(empty, setting, empty, setting);
            }
        }
    }

    // Set vertical connections
    for col in (0..canvas_width).step_by(FIELD_DRAW_WIDTH) {
        let mut setting = Weight::Light;
        for row in 0..canvas_height {
            if row % FIELD_DRAW_HEIGHT == 0 {
                setting = corner_weights[col][row][2];
            } else {
                let empty = Weight::Empty;
                canvas[col][row] = find_character(setting, empty, setting, empty);
            }
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::{draw_board, draw_colored_board, FIELD_DRAW_HEIGHT, FIELD_DRAW_WIDTH};
    use crate::{Board, Position, Robot, RobotPositions};

    #[test]
    fn canvas_size() {
        let board = Board::standard();
        let positions =
            RobotPositions::from_tuples(&board, &[(Robot::Red, (0, 0))]).unwrap();
        let drawn = draw_board(&board, &positions, None);
        let lines: Vec<_> = drawn.lines().collect();
        assert_eq!(lines.len(), 16 * FIELD_DRAW_HEIGHT + 1);
        assert!(lines
            .iter()
            .all(|line| line.chars().count() == 16 * FIELD_DRAW_WIDTH + 1));
    }

    #[test]
    fn robots_and_goal_are_drawn() {
        let board = Board::new_empty(4).unwrap();
        let positions = RobotPositions::from_tuples(
            &board,
            &[(Robot::Red, (0, 0)), (Robot::Green, (3, 3))],
        )
        .unwrap();
        let drawn = draw_board(&board, &positions, Some(Position::new(1, 2)));
        let lines: Vec<_> = drawn.lines().collect();

        // The top row of the board is the second line, the bottom row the second to last.
        let top: Vec<char> = lines[1].chars().collect();
        let bottom: Vec<char> = lines[7].chars().collect();
        let second: Vec<char> = lines[3].chars().collect();
        assert_eq!(top[17..19].iter().collect::<String>(), "GR");
        assert_eq!(bottom[2..4].iter().collect::<String>(), "RE");
        assert_eq!(second[7..9].iter().collect::<String>(), "**");
    }

    #[test]
    fn robot_hides_goal() {
        let board = Board::new_empty(4).unwrap();
        let positions = RobotPositions::from_tuples(&board, &[(Robot::Blue, (1, 2))]).unwrap();
        let drawn = draw_board(&board, &positions, Some(Position::new(1, 2)));
        assert!(drawn.contains("BL"));
        assert!(!drawn.contains("**"));
    }

    #[test]
    fn colored_labels() {
        let board = Board::new_empty(4).unwrap();
        let positions = RobotPositions::from_tuples(
            &board,
            &[(Robot::Red, (0, 0)), (Robot::Yellow, (3, 3))],
        )
        .unwrap();
        let goal = Some(Position::new(1, 2));
        let colored = draw_colored_board(&board, &positions, goal);

        assert!(colored.contains("\x1b[91mRE\x1b[0m"));
        assert!(colored.contains("\x1b[93mYE\x1b[0m"));
        assert!(colored.contains("\x1b[1;36m**\x1b[0m"));

        // Without the escape codes both drawings are the same.
        let stripped = colored
            .replace("\x1b[0m", "")
            .replace("\x1b[1;36m", "")
            .replace("\x1b[91m", "")
            .replace("\x1b[93m", "");
        assert_eq!(stripped, draw_board(&board, &positions, goal));
    }
}
