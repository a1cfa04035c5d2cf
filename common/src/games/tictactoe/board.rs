use super::types::{Mark, Position};

pub fn get_available_moves(board: &[Vec<Mark>]) -> Vec<Position> {
    let mut moves = Vec::new();
    for (row, cells) in board.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell == Mark::Empty {
                moves.push(Position::new(row, col));
            }
        }
    }
    moves
}

pub fn is_board_full(board: &[Vec<Mark>]) -> bool {
    board
        .iter()
        .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
}
