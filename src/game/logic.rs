use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use super::field::Board;
use super::rules::winner;
use super::types::{GameMode, Outcome, Player, Statistics};
use crate::ai;
use crate::storage::StatsStore;

/// Where the session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMove(Player),
    Terminal(Outcome),
}

/// Result of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// Square out of bounds, occupied, not the human's turn, or game over.
    Invalid,
    /// Move applied (and any computer reply), game is still running.
    Continue,
    /// Move applied, game is now over.
    GameOver(Outcome),
}

/// One game from the first move to a win or draw.
pub struct GameSession {
    board: Board,
    state: SessionState,
    mode: GameMode,
    statistics: Statistics,
    stats_store: Box<dyn StatsStore>,
    rng: StdRng,
}

impl GameSession {
    /// Start a game. Statistics are loaded from `stats_store` now and saved
    /// back once the game ends.
    pub fn new(mode: GameMode, computer_begins: bool, stats_store: Box<dyn StatsStore>) -> Self {
        Self::with_rng(mode, computer_begins, stats_store, StdRng::from_entropy())
    }

    pub fn with_rng(
        mode: GameMode,
        computer_begins: bool,
        stats_store: Box<dyn StatsStore>,
        rng: StdRng,
    ) -> Self {
        let statistics = stats_store.load();
        let mut session = Self {
            board: Board::new(),
            state: SessionState::AwaitingMove(Player::X),
            mode,
            statistics,
            stats_store,
            rng,
        };
        if computer_begins && matches!(mode, GameMode::VersusComputer(_)) {
            // Opening O move; X is active afterwards as usual.
            session.computer_turn();
        }
        session
    }

    pub fn current_state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        match self.state {
            SessionState::AwaitingMove(_) => Outcome::InProgress,
            SessionState::Terminal(outcome) => outcome,
        }
    }

    /// Statistics including this game once it has finished.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn moves_made(&self) -> usize {
        self.board.moves_made()
    }

    /// Returns `true` if a click on (row, col) would be accepted.
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        match self.state {
            SessionState::AwaitingMove(player) => {
                self.is_human(player) && self.board.empty_cells().any(|c| c == (row, col))
            }
            SessionState::Terminal(_) => false,
        }
    }

    /// Place the active player's mark at (row, col). Against the computer,
    /// its reply is applied before this returns.
    pub fn place(&mut self, row: usize, col: usize) -> MoveResult {
        if !self.is_valid_move(row, col) {
            debug!(row, col, state = ?self.state, "placement rejected");
            return MoveResult::Invalid;
        }
        let SessionState::AwaitingMove(player) = self.state else {
            return MoveResult::Invalid;
        };

        if let Some(result) = self.apply(row, col, player) {
            return result;
        }

        if let GameMode::VersusComputer(_) = self.mode {
            if self.state == SessionState::AwaitingMove(ai::AI_PLAYER) {
                return self.computer_turn();
            }
        }
        MoveResult::Continue
    }

    fn is_human(&self, player: Player) -> bool {
        match self.mode {
            GameMode::TwoPlayer => true,
            GameMode::VersusComputer(_) => player != ai::AI_PLAYER,
        }
    }

    fn computer_turn(&mut self) -> MoveResult {
        let GameMode::VersusComputer(difficulty) = self.mode else {
            return MoveResult::Continue;
        };
        let Some((row, col)) = ai::select_move(&self.board, difficulty, &mut self.rng) else {
            error!("computer asked to move on a full board");
            return MoveResult::Invalid;
        };
        debug!(?difficulty, row, col, "computer move");
        self.apply(row, col, ai::AI_PLAYER).unwrap_or(MoveResult::Continue)
    }

    /// Set the mark and advance the state machine. Returns `Some` when the
    /// move ended the game (or could not be applied).
    fn apply(&mut self, row: usize, col: usize, player: Player) -> Option<MoveResult> {
        if !self.board.set(row, col, player) {
            return Some(MoveResult::Invalid);
        }

        if let Some(w) = winner(&self.board) {
            return Some(self.finish(Outcome::Win(w)));
        }
        if self.board.is_full() {
            return Some(self.finish(Outcome::Draw));
        }

        self.state = SessionState::AwaitingMove(player.other());
        None
    }

    fn finish(&mut self, outcome: Outcome) -> MoveResult {
        self.state = SessionState::Terminal(outcome);
        self.statistics.record(outcome);
        info!(?outcome, games = self.statistics.games, "game finished");
        if let Err(e) = self.stats_store.save(&self.statistics) {
            warn!(error = %e, "failed to save statistics");
        }
        MoveResult::GameOver(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::game::types::{Cell, Difficulty};
    use crate::storage::StorageError;

    /// In-memory store that counts saves.
    #[derive(Clone, Default)]
    struct MemoryStore {
        stats: Rc<RefCell<Statistics>>,
        saves: Rc<RefCell<u32>>,
    }

    impl StatsStore for MemoryStore {
        fn load(&self) -> Statistics {
            *self.stats.borrow()
        }

        fn save(&self, stats: &Statistics) -> Result<(), StorageError> {
            *self.stats.borrow_mut() = *stats;
            *self.saves.borrow_mut() += 1;
            Ok(())
        }
    }

    fn session(mode: GameMode, computer_begins: bool, store: &MemoryStore) -> GameSession {
        GameSession::with_rng(
            mode,
            computer_begins,
            Box::new(store.clone()),
            StdRng::seed_from_u64(42),
        )
    }

    #[test]
    fn starts_with_x_on_empty_board() {
        let store = MemoryStore::default();
        let s = session(GameMode::TwoPlayer, false, &store);
        assert_eq!(s.current_state(), SessionState::AwaitingMove(Player::X));
        assert_eq!(s.moves_made(), 0);
        assert_eq!(s.outcome(), Outcome::InProgress);
    }

    #[test]
    fn top_row_wins_for_x() {
        let store = MemoryStore::default();
        let mut s = session(GameMode::TwoPlayer, false, &store);
        assert_eq!(s.place(0, 0), MoveResult::Continue);
        assert_eq!(s.place(1, 1), MoveResult::Continue);
        assert_eq!(s.place(0, 1), MoveResult::Continue);
        assert_eq!(s.place(1, 0), MoveResult::Continue);
        assert_eq!(
            s.place(0, 2),
            MoveResult::GameOver(Outcome::Win(Player::X))
        );
        assert_eq!(
            s.current_state(),
            SessionState::Terminal(Outcome::Win(Player::X))
        );

        let stats = *store.stats.borrow();
        assert_eq!(stats.x_wins, 1);
        assert_eq!(stats.games, 1);
        assert_eq!(*store.saves.borrow(), 1);
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let store = MemoryStore::default();
        let mut s = session(GameMode::TwoPlayer, false, &store);
        let moves = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ];
        let (last, rest) = moves.split_last().unwrap();
        for &(row, col) in rest {
            assert_eq!(s.place(row, col), MoveResult::Continue);
        }
        assert_eq!(s.place(last.0, last.1), MoveResult::GameOver(Outcome::Draw));
        assert_eq!(store.stats.borrow().draws, 1);
        assert_eq!(store.stats.borrow().games, 1);
    }

    #[test]
    fn turns_alternate_and_occupied_squares_are_rejected() {
        let store = MemoryStore::default();
        let mut s = session(GameMode::TwoPlayer, false, &store);
        s.place(1, 1);
        assert_eq!(s.current_state(), SessionState::AwaitingMove(Player::O));

        assert_eq!(s.place(1, 1), MoveResult::Invalid);
        assert_eq!(s.place(5, 0), MoveResult::Invalid);
        assert_eq!(s.current_state(), SessionState::AwaitingMove(Player::O));
        assert_eq!(s.board().get(1, 1), Cell::X);
    }

    #[test]
    fn terminal_state_is_absorbing() {
        let store = MemoryStore::default();
        let mut s = session(GameMode::TwoPlayer, false, &store);
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            s.place(row, col);
        }
        let board = *s.board();
        assert_eq!(s.place(2, 2), MoveResult::Invalid);
        assert_eq!(*s.board(), board);
        assert_eq!(*store.saves.borrow(), 1);
        assert_eq!(store.stats.borrow().games, 1);
    }

    #[test]
    fn computer_replies_immediately() {
        let store = MemoryStore::default();
        let mut s = session(GameMode::VersusComputer(Difficulty::Easy), false, &store);
        assert_eq!(s.place(1, 1), MoveResult::Continue);
        assert_eq!(s.moves_made(), 2);
        assert_eq!(s.current_state(), SessionState::AwaitingMove(Player::X));
    }

    /// X to move on a board already holding `xs` and `os`.
    fn midgame(
        difficulty: Difficulty,
        xs: &[(usize, usize)],
        os: &[(usize, usize)],
        store: &MemoryStore,
    ) -> GameSession {
        let mut board = Board::new();
        for &(row, col) in xs {
            assert!(board.set(row, col, Player::X));
        }
        for &(row, col) in os {
            assert!(board.set(row, col, Player::O));
        }
        GameSession {
            board,
            state: SessionState::AwaitingMove(Player::X),
            mode: GameMode::VersusComputer(difficulty),
            statistics: store.load(),
            stats_store: Box::new(store.clone()),
            rng: StdRng::seed_from_u64(42),
        }
    }

    #[test]
    fn computer_blocks_open_row() {
        let store = MemoryStore::default();
        let mut s = midgame(Difficulty::Medium, &[(0, 0)], &[(1, 1)], &store);

        assert_eq!(s.place(0, 1), MoveResult::Continue);
        assert_eq!(s.board().get(0, 2), Cell::O);
        assert_eq!(s.moves_made(), 4);
        assert_eq!(s.current_state(), SessionState::AwaitingMove(Player::X));
        assert_eq!(*store.saves.borrow(), 0);
    }

    #[test]
    fn computer_reply_can_end_the_game() {
        let store = MemoryStore::default();
        store.stats.borrow_mut().o_wins = 2;
        store.stats.borrow_mut().games = 3;
        let mut s = midgame(
            Difficulty::Hard,
            &[(1, 0), (2, 2)],
            &[(1, 1), (2, 1)],
            &store,
        );

        assert_eq!(
            s.place(0, 2),
            MoveResult::GameOver(Outcome::Win(Player::O))
        );
        assert_eq!(s.board().get(0, 1), Cell::O);
        assert_eq!(
            s.current_state(),
            SessionState::Terminal(Outcome::Win(Player::O))
        );

        let stats = *store.stats.borrow();
        assert_eq!(stats.o_wins, 3);
        assert_eq!(stats.x_wins, 0);
        assert_eq!(stats.games, 4);
        assert_eq!(*store.saves.borrow(), 1);
        assert_eq!(s.place(0, 0), MoveResult::Invalid);
    }

    #[test]
    fn computer_games_always_finish_and_record_once() {
        for difficulty in Difficulty::ALL {
            let store = MemoryStore::default();
            let mut s = session(GameMode::VersusComputer(difficulty), false, &store);
            while let SessionState::AwaitingMove(_) = s.current_state() {
                let (row, col) = s.board().empty_cells().next().unwrap();
                assert_ne!(s.place(row, col), MoveResult::Invalid);
            }
            let stats = *store.stats.borrow();
            assert_eq!(stats.games, 1);
            assert_eq!(stats.x_wins + stats.o_wins + stats.draws, 1);
            let expected = match s.outcome() {
                Outcome::Win(Player::X) => stats.x_wins,
                Outcome::Win(Player::O) => stats.o_wins,
                Outcome::Draw => stats.draws,
                Outcome::InProgress => 0,
            };
            assert_eq!(expected, 1);
            assert_eq!(*store.saves.borrow(), 1);
        }
    }

    #[test]
    fn computer_begins_places_one_o_before_x() {
        let store = MemoryStore::default();
        let s = session(GameMode::VersusComputer(Difficulty::Medium), true, &store);
        assert_eq!(s.moves_made(), 1);
        assert_eq!(s.current_state(), SessionState::AwaitingMove(Player::X));
        assert_eq!(s.board().empty_cells().count(), 8);
    }

    #[test]
    fn computer_begins_ignored_for_two_players() {
        let store = MemoryStore::default();
        let s = session(GameMode::TwoPlayer, true, &store);
        assert_eq!(s.moves_made(), 0);
    }

    #[test]
    fn statistics_accumulate_across_sessions() {
        let store = MemoryStore::default();
        store.stats.borrow_mut().o_wins = 5;
        store.stats.borrow_mut().games = 5;

        let mut s = session(GameMode::TwoPlayer, false, &store);
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            s.place(row, col);
        }
        assert_eq!(s.statistics().games, 6);
        assert_eq!(s.statistics().o_wins, 5);
        assert_eq!(store.stats.borrow().x_wins, 1);
    }
}
