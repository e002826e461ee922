use super::types::{Board, Mark, WinningLine};

/// Rows, then columns, then the two diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    WINNING_LINES.iter().find_map(|&[a, b, c]| {
        let mark = board[a];
        if mark != Mark::Empty && board[b] == mark && board[c] == mark {
            Some(WinningLine::new(mark, [a, b, c]))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::empty_board;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    #[test]
    fn test_every_line_wins_on_otherwise_empty_board() {
        for mark in [X, O] {
            for line in WINNING_LINES {
                let mut board = empty_board();
                for index in line {
                    board[index] = mark;
                }
                assert_eq!(check_win(&board), Some(mark), "line {:?}", line);
                assert_eq!(check_win_with_line(&board), Some(WinningLine::new(mark, line)));
            }
        }
    }

    #[test]
    fn test_every_line_wins_with_other_cells_filled() {
        for line in WINNING_LINES {
            let mut board = [O; 9];
            for (index, cell) in board.iter_mut().enumerate() {
                if index % 2 == 0 {
                    *cell = E;
                }
            }
            for index in line {
                board[index] = X;
            }
            // Odd cells hold O; no triple consists of odd cells only.
            assert_eq!(check_win(&board), Some(X), "line {:?}", line);
        }
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(check_win(&empty_board()), None);
    }

    #[test]
    fn test_full_board_without_line_is_tie() {
        let board = [X, O, X, X, O, O, O, X, X];
        assert_eq!(check_win(&board), None);
        assert_eq!(check_win_with_line(&board), None);
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let board = [X, X, O, E, E, E, E, E, E];
        assert_eq!(check_win(&board), None);
    }
}
