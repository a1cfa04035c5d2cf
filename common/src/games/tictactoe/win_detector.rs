use super::types::{Mark, Position, WinningCombo};

/// Lines that win on a `size`x`size` board, in the order they are checked:
/// rows top to bottom, columns left to right, main diagonal, anti-diagonal.
pub fn winning_combos(size: usize) -> Vec<WinningCombo> {
    let rows = (0..size).map(|row| {
        (0..size)
            .map(|col| Position::new(row, col))
            .collect::<WinningCombo>()
    });
    let columns = (0..size).map(|col| {
        (0..size)
            .map(|row| Position::new(row, col))
            .collect::<WinningCombo>()
    });
    let main_diagonal: WinningCombo = (0..size).map(|i| Position::new(i, i)).collect();
    let anti_diagonal: WinningCombo = (0..size).map(|i| Position::new(i, size - 1 - i)).collect();

    rows.chain(columns)
        .chain([main_diagonal, anti_diagonal])
        .collect()
}

fn line_owner(board: &[Vec<Mark>], combo: &[Position]) -> Option<Mark> {
    let first = combo.first()?;
    let mark = board[first.row][first.col];
    if mark == Mark::Empty {
        return None;
    }

    combo
        .iter()
        .all(|pos| board[pos.row][pos.col] == mark)
        .then_some(mark)
}

/// Index and owner of the first fully occupied line.
pub fn find_winning_combo(board: &[Vec<Mark>], combos: &[WinningCombo]) -> Option<(usize, Mark)> {
    combos
        .iter()
        .enumerate()
        .find_map(|(index, combo)| line_owner(board, combo).map(|mark| (index, mark)))
}

pub fn has_winning_line(board: &[Vec<Mark>], combos: &[WinningCombo], mark: Mark) -> bool {
    if mark == Mark::Empty {
        return false;
    }
    combos
        .iter()
        .any(|combo| combo.iter().all(|pos| board[pos.row][pos.col] == mark))
}
