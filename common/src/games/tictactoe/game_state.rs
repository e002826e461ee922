use serde::{Deserialize, Serialize};

use super::board::{is_board_full, is_valid_move};
use super::scoreboard::Scoreboard;
use super::types::{
    BOARD_CELLS, Board, COMPUTER_MARK, GamePhase, GameStatus, HUMAN_MARK, Mark, WinningLine,
    empty_board,
};
use super::win_detector::check_win_with_line;

/// Board, turn marker and scores of one session. Only `place_mark`,
/// `reset_round` and `reset_scores` mutate it.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    winning_line: Option<WinningLine>,
    last_move: Option<usize>,
    scoreboard: Scoreboard,
}

/// Read-only copy handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current_mark: Mark,
    pub phase: GamePhase,
    pub status: GameStatus,
    pub winning_line: Option<WinningLine>,
    pub last_move: Option<usize>,
    pub scores: Scoreboard,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: empty_board(),
            current_mark: HUMAN_MARK,
            status: GameStatus::InProgress,
            winning_line: None,
            last_move: None,
            scoreboard: Scoreboard::default(),
        }
    }

    /// Starts a round from an arbitrary position, scores untouched. The turn
    /// goes to whichever side has fewer marks, X on equal counts.
    pub fn from_board(board: Board) -> Self {
        let x_count = board.iter().filter(|&&cell| cell == Mark::X).count();
        let o_count = board.iter().filter(|&&cell| cell == Mark::O).count();
        let mut state = Self {
            board,
            current_mark: if x_count > o_count { Mark::O } else { Mark::X },
            ..Self::new()
        };
        state.check_game_over();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    pub fn phase(&self) -> GamePhase {
        if self.status.is_over() {
            GamePhase::RoundOver
        } else if self.current_mark == COMPUTER_MARK {
            GamePhase::ComputerTurn
        } else {
            GamePhase::HumanTurn
        }
    }

    pub fn place_mark(&mut self, mark: Mark, index: usize) -> Result<(), String> {
        if self.status.is_over() {
            return Err("Round is already over".to_string());
        }

        if mark != self.current_mark {
            return Err(format!("Not {}'s turn", mark));
        }

        if index >= BOARD_CELLS {
            return Err(format!("Cell {} is out of bounds", index));
        }

        if !is_valid_move(&self.board, index) {
            return Err(format!("Cell {} is already marked", index));
        }

        self.board[index] = mark;
        self.last_move = Some(index);

        self.check_game_over();

        if self.status.is_over() {
            self.scoreboard.record(self.status);
        }
        self.switch_turn();

        Ok(())
    }

    /// Clears the board and gives the first move back to X. Scores are kept.
    pub fn reset_round(&mut self) {
        self.board = empty_board();
        self.current_mark = HUMAN_MARK;
        self.status = GameStatus::InProgress;
        self.winning_line = None;
        self.last_move = None;
    }

    pub fn reset_scores(&mut self) {
        self.scoreboard.reset();
        self.reset_round();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            current_mark: self.current_mark,
            phase: self.phase(),
            status: self.status,
            winning_line: self.winning_line,
            last_move: self.last_move,
            scores: self.scoreboard,
        }
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    fn check_game_over(&mut self) {
        if let Some(line) = check_win_with_line(&self.board) {
            self.winning_line = Some(line);
            self.status = match line.mark {
                Mark::X => GameStatus::XWon,
                _ => GameStatus::OWon,
            };
            return;
        }

        if is_board_full(&self.board) {
            self.status = GameStatus::Draw;
        }
    }
}
