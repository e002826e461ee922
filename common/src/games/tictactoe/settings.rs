use std::time::Duration;

pub const DEFAULT_COMPUTER_MOVE_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_ROUND_RESET_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub computer_move_delay: Duration,
    pub round_reset_delay: Duration,
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            computer_move_delay: DEFAULT_COMPUTER_MOVE_DELAY,
            round_reset_delay: DEFAULT_ROUND_RESET_DELAY,
        }
    }
}
