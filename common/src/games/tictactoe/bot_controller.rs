use super::board::get_available_moves;
use super::game_state::TicTacToeGameState;
use super::types::{Board, Mark};
use super::win_detector::check_win;
use crate::games::SessionRng;

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            current_mark: state.current_mark(),
        }
    }
}

/// One-ply heuristic: take a winning cell if there is one, otherwise block the
/// opponent's winning cell, otherwise pick uniformly among empty cells.
/// Ties inside the first two rules go to the lowest index.
///
/// Returns `None` when the board has no empty cell or `current_mark` is
/// `Mark::Empty`.
pub fn calculate_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let opponent_mark = input.current_mark.opponent()?;
    let available_moves = get_available_moves(&input.board);

    if available_moves.is_empty() {
        return None;
    }

    find_winning_move(&input.board, &available_moves, input.current_mark)
        .or_else(|| find_winning_move(&input.board, &available_moves, opponent_mark))
        .or_else(|| rng.choose(&available_moves).copied())
}

fn find_winning_move(board: &Board, available_moves: &[usize], mark: Mark) -> Option<usize> {
    let mut board = *board;
    available_moves.iter().copied().find(|&index| {
        board[index] = mark;
        let wins = check_win(&board) == Some(mark);
        board[index] = Mark::Empty;
        wins
    })
}
