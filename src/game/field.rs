use super::types::{Cell, Player};

pub const BOARD_SIZE: usize = 3;

/// The 3×3 game board, indexed by (row, col).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Cell::Empty` for coordinates outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Cell::Empty;
        }
        self.cells[row][col]
    }

    /// Place `player` at (row, col). Returns `false` and leaves the board
    /// untouched if the square is out of bounds or already taken.
    pub fn set(&mut self, row: usize, col: usize, player: Player) -> bool {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return false;
        }
        if self.cells[row][col] != Cell::Empty {
            return false;
        }
        self.cells[row][col] = player.cell();
        true
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c != Cell::Empty)
    }

    /// All empty squares in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.cells[row][col] == Cell::Empty)
    }

    pub fn moves_made(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c != Cell::Empty).count()
    }

    /// Temporarily place `player` on an empty square, run `check` against the
    /// resulting board, then clear the square again.
    pub(crate) fn probe<R>(
        &mut self,
        row: usize,
        col: usize,
        player: Player,
        check: impl FnOnce(&Board) -> R,
    ) -> R {
        debug_assert_eq!(self.cells[row][col], Cell::Empty);
        self.cells[row][col] = player.cell();
        let result = check(self);
        self.cells[row][col] = Cell::Empty;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_rejects_occupied_and_out_of_bounds() {
        let mut board = Board::new();
        assert!(board.set(1, 1, Player::X));
        assert!(!board.set(1, 1, Player::O));
        assert_eq!(board.get(1, 1), Cell::X);

        assert!(!board.set(3, 0, Player::O));
        assert!(!board.set(0, 3, Player::O));
        assert_eq!(board.moves_made(), 1);
    }

    #[test]
    fn empty_cells_are_row_major() {
        let mut board = Board::new();
        board.set(0, 0, Player::X);
        board.set(1, 2, Player::O);

        let cells: Vec<_> = board.empty_cells().collect();
        assert_eq!(
            cells,
            vec![(0, 1), (0, 2), (1, 0), (1, 1), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn full_iff_no_empty_cells() {
        let mut board = Board::new();
        let mut player = Player::X;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                assert!(!board.is_full());
                assert!(board.empty_cells().next().is_some());
                board.set(row, col, player);
                player = player.other();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.empty_cells().count(), 0);
    }

    #[test]
    fn probe_restores_square() {
        let mut board = Board::new();
        board.set(0, 0, Player::X);
        let before = board;

        let seen = board.probe(2, 2, Player::O, |b| b.get(2, 2));
        assert_eq!(seen, Cell::O);
        assert_eq!(board, before);
    }
}
