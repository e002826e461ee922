use tokio::sync::mpsc;

use crate::games::scheduler::{DelayedTransitions, Expired};
use crate::games::{GameBroadcaster, SessionRng};
use crate::log;
use super::bot_controller::{BotInput, calculate_move};
use super::game_state::{GameSnapshot, TicTacToeGameState};
use super::settings::TicTacToeSessionSettings;
use super::types::{COMPUTER_MARK, GamePhase, GameStatus, HUMAN_MARK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicTacToeCommand {
    ActivateCell { index: usize },
    ResetScores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingTransition {
    ComputerMove,
    RoundReset,
}

/// Owns the game state of one human-vs-computer session and applies commands
/// and delayed transitions to it one at a time.
pub struct TicTacToeSession {
    session_id: String,
    game_state: TicTacToeGameState,
    settings: TicTacToeSessionSettings,
    rng: SessionRng,
    transitions: DelayedTransitions<PendingTransition>,
    expired_rx: mpsc::UnboundedReceiver<Expired<PendingTransition>>,
}

impl TicTacToeSession {
    pub fn new(session_id: String, settings: TicTacToeSessionSettings, rng: SessionRng) -> Self {
        Self::with_game_state(session_id, TicTacToeGameState::new(), settings, rng)
    }

    pub fn with_game_state(
        session_id: String,
        game_state: TicTacToeGameState,
        settings: TicTacToeSessionSettings,
        rng: SessionRng,
    ) -> Self {
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();
        Self {
            session_id,
            game_state,
            settings,
            rng,
            transitions: DelayedTransitions::new(expired_tx),
            expired_rx,
        }
    }

    pub fn game_state(&self) -> &TicTacToeGameState {
        &self.game_state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game_state.snapshot()
    }

    /// Runs until every command sender is dropped. A snapshot is broadcast on
    /// start and after every change.
    pub async fn run(
        mut self,
        mut command_rx: mpsc::UnboundedReceiver<TicTacToeCommand>,
        broadcaster: impl GameBroadcaster,
    ) {
        log!("[session:{}] Started with seed {}", self.session_id, self.rng.seed());
        if self.game_state.phase() != GamePhase::HumanTurn {
            self.enter_phase();
        }
        broadcaster.broadcast_state(self.snapshot()).await;

        loop {
            let changed = tokio::select! {
                command = command_rx.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => break,
                    }
                }
                Some(expired) = self.expired_rx.recv() => self.handle_expired(expired),
            };

            if changed {
                broadcaster.broadcast_state(self.snapshot()).await;
            }
        }

        self.transitions.cancel();
        log!("[session:{}] Stopped", self.session_id);
    }

    /// Returns true if the state changed.
    pub fn handle_command(&mut self, command: TicTacToeCommand) -> bool {
        match command {
            TicTacToeCommand::ActivateCell { index } => self.handle_cell_activated(index),
            TicTacToeCommand::ResetScores => {
                if self.transitions.cancel() {
                    log!("[session:{}] Cancelled pending transition on score reset", self.session_id);
                }
                self.game_state.reset_scores();
                log!("[session:{}] Scores reset", self.session_id);
                true
            }
        }
    }

    fn handle_cell_activated(&mut self, index: usize) -> bool {
        if self.game_state.phase() != GamePhase::HumanTurn {
            log!(
                "[session:{}] Ignored cell {}: not the human's turn ({:?})",
                self.session_id,
                index,
                self.game_state.phase()
            );
            return false;
        }

        match self.game_state.place_mark(HUMAN_MARK, index) {
            Ok(()) => {
                self.enter_phase();
                true
            }
            Err(e) => {
                log!("[session:{}] Ignored cell {}: {}", self.session_id, index, e);
                false
            }
        }
    }

    fn handle_expired(&mut self, expired: Expired<PendingTransition>) -> bool {
        if !self.transitions.accept(&expired) {
            log!(
                "[session:{}] Dropped stale {:?} (token {})",
                self.session_id,
                expired.transition,
                expired.token
            );
            return false;
        }

        match expired.transition {
            PendingTransition::ComputerMove => self.play_computer_turn(),
            PendingTransition::RoundReset => {
                self.game_state.reset_round();
                true
            }
        }
    }

    fn play_computer_turn(&mut self) -> bool {
        if self.game_state.phase() != GamePhase::ComputerTurn {
            return false;
        }

        let input = BotInput::from_game_state(&self.game_state);
        let Some(index) = calculate_move(&input, &mut self.rng) else {
            log!("[session:{}] Computer has no move on a board in progress", self.session_id);
            return false;
        };

        match self.game_state.place_mark(COMPUTER_MARK, index) {
            Ok(()) => {
                self.enter_phase();
                true
            }
            Err(e) => {
                log!("[session:{}] Computer failed to place mark at {}: {}", self.session_id, index, e);
                false
            }
        }
    }

    /// Schedules whatever the current phase needs next, replacing anything pending.
    fn enter_phase(&mut self) {
        match self.game_state.phase() {
            GamePhase::HumanTurn => {
                self.transitions.cancel();
            }
            GamePhase::ComputerTurn => {
                self.transitions
                    .schedule(self.settings.computer_move_delay, PendingTransition::ComputerMove);
            }
            GamePhase::RoundOver => {
                let status = self.game_state.status();
                let scores = self.game_state.scoreboard();
                log!(
                    "[session:{}] Round over: {} (X {} / O {} / ties {})",
                    self.session_id,
                    describe_result(status),
                    scores.x_wins,
                    scores.o_wins,
                    scores.ties
                );
                self.transitions
                    .schedule(self.settings.round_reset_delay, PendingTransition::RoundReset);
            }
        }
    }
}

fn describe_result(status: GameStatus) -> &'static str {
    match status {
        GameStatus::XWon => "X won",
        GameStatus::OWon => "O won",
        GameStatus::Draw => "tie",
        GameStatus::InProgress => "in progress",
    }
}
