mod board;
mod bot_controller;
mod game_state;
mod scoreboard;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::{get_available_moves, is_board_full, is_valid_move};
pub use bot_controller::{BotInput, calculate_move};
pub use game_state::{GameSnapshot, TicTacToeGameState};
pub use scoreboard::Scoreboard;
pub use session::{TicTacToeCommand, TicTacToeSession};
pub use settings::{DEFAULT_COMPUTER_MOVE_DELAY, DEFAULT_ROUND_RESET_DELAY, TicTacToeSessionSettings};
pub use types::{
    BOARD_CELLS, Board, COMPUTER_MARK, GamePhase, GameStatus, HUMAN_MARK, Mark, WinningLine,
    empty_board,
};
pub use win_detector::{WINNING_LINES, check_win, check_win_with_line};
