use super::field::{Board, BOARD_SIZE};
use super::types::Player;

/// Every line that wins the game, in evaluation order: rows, columns,
/// main diagonal, anti-diagonal.
const LINES: [[(usize, usize); BOARD_SIZE]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// The owner of the first completed line, if any.
pub fn winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.map(|(row, col)| board.get(row, col));
        if a == b && b == c {
            a.player()
        } else {
            None
        }
    })
}
