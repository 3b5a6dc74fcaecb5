use rand::seq::IteratorRandom;
use rand::Rng;

use crate::game::field::Board;
use crate::game::rules::winner;
use crate::game::types::{Difficulty, Player};

/// Mark placed by the computer.
pub const AI_PLAYER: Player = Player::O;

/// Choose the computer's next square, as (row, col).
/// Returns `None` only when the board has no empty squares.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<(usize, usize)> {
    match difficulty {
        Difficulty::Easy => random_move(board, rng),
        // Both levels share the one-ply heuristic; there is no deeper search.
        Difficulty::Medium | Difficulty::Hard => greedy_move(board, rng),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Easy – Random
// ════════════════════════════════════════════════════════════════════════════

fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    board.empty_cells().choose(rng)
}

// ════════════════════════════════════════════════════════════════════════════
// Medium / Hard – take a win, else block, else random
// ════════════════════════════════════════════════════════════════════════════

/// Walk the empty squares in row-major order and return the first one that
/// either completes a line for the computer or stops the human completing one.
/// The win check runs before the block check on each square.
fn greedy_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    let mut scratch = *board;
    let candidates: Vec<_> = board.empty_cells().collect();

    for &(row, col) in &candidates {
        if scratch.probe(row, col, AI_PLAYER, |b| winner(b) == Some(AI_PLAYER)) {
            return Some((row, col));
        }
        let opponent = AI_PLAYER.other();
        if scratch.probe(row, col, opponent, |b| winner(b) == Some(opponent)) {
            return Some((row, col));
        }
    }

    random_move(board, rng)
}
