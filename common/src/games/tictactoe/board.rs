use super::types::{Board, Mark};

/// Empty cell indices in ascending order.
pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Mark::Empty)
        .map(|(index, _)| index)
        .collect()
}

pub fn is_valid_move(board: &Board, index: usize) -> bool {
    board.get(index) == Some(&Mark::Empty)
}

pub fn is_board_full(board: &Board) -> bool {
    board.iter().all(|&cell| cell != Mark::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::empty_board;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    #[test]
    fn test_available_moves_are_ascending_empty_cells() {
        let board = [X, E, O, E, X, E, E, O, E];
        assert_eq!(get_available_moves(&board), vec![1, 3, 5, 6, 8]);
    }

    #[test]
    fn test_empty_board_has_every_move() {
        assert_eq!(get_available_moves(&empty_board()), (0..9).collect::<Vec<_>>());
        assert!(!is_board_full(&empty_board()));
    }

    #[test]
    fn test_is_valid_move_rejects_occupied_and_out_of_range() {
        let board = [X, E, E, E, E, E, E, E, E];
        assert!(!is_valid_move(&board, 0));
        assert!(is_valid_move(&board, 1));
        assert!(!is_valid_move(&board, 9));
    }

    #[test]
    fn test_full_board() {
        let board = [X, O, X, X, O, O, O, X, X];
        assert!(is_board_full(&board));
        assert!(get_available_moves(&board).is_empty());
    }
}
