use std::io::BufRead;

use common::games::tictactoe::{GameOutcome, Move, Position, TicTacToeGame};

pub fn render_board(game: &TicTacToeGame) -> String {
    let size = game.board_size();
    let labels = game.current_labels();
    let separator = format!("  +{}", "---+".repeat(size));

    let mut out = String::from("\n   ");
    for col in 0..size {
        out.push_str(&format!(" {}  ", col));
    }
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');

    for (row, cells) in labels.iter().enumerate() {
        out.push_str(&format!("{} |", row));
        for cell in cells {
            let text = cell.to_string();
            out.push_str(&format!(" {} |", if text.is_empty() { " " } else { text.as_str() }));
        }
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
    }
    out
}

pub fn describe_outcome(game: &TicTacToeGame) -> Option<String> {
    match game.outcome() {
        GameOutcome::InProgress => None,
        GameOutcome::Tied => Some("Game is tied!".to_string()),
        GameOutcome::Won { combo, mark } => {
            let cells: Vec<String> = combo
                .iter()
                .map(|pos| format!("({}, {})", pos.row, pos.col))
                .collect();
            let who = if mark == game.computer_mark() {
                "computer"
            } else {
                "you"
            };
            Some(format!("{} wins ({}) along {}", mark, who, cells.join(" ")))
        }
    }
}

/// Parses `"row col"`.
pub fn parse_position(input: &str, board_size: usize) -> Result<Position, String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let [row, col] = parts.as_slice() else {
        return Err("Enter row and column as two numbers, e.g. '1 2'".to_string());
    };

    let row: usize = row
        .parse()
        .map_err(|_| format!("'{}' is not a row number", row))?;
    let col: usize = col
        .parse()
        .map_err(|_| format!("'{}' is not a column number", col))?;

    if row >= board_size || col >= board_size {
        return Err(format!(
            "Row and column must be between 0 and {}",
            board_size - 1
        ));
    }
    Ok(Position::new(row, col))
}

/// Prompts until the current player enters a playable cell. `Ok(None)` once
/// input is exhausted.
pub fn read_player_move(
    game: &TicTacToeGame,
    input: &mut impl BufRead,
) -> std::io::Result<Option<Move>> {
    let mark = game.current_player().mark();
    loop {
        println!("Your move as {} (row col):", mark);

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let pos = match parse_position(&line, game.board_size()) {
            Ok(pos) => pos,
            Err(message) => {
                println!("Invalid: {}", message);
                continue;
            }
        };

        let mv = Move::new(pos.row, pos.col, mark);
        if game.is_valid_move(&mv) {
            return Ok(Some(mv));
        }
        println!("Invalid: cell already occupied.");
    }
}

pub fn read_yes_no(input: &mut impl BufRead) -> std::io::Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
