use super::board::{get_available_moves, is_board_full};
use super::game_state::TicTacToeGame;
use super::types::{Mark, Position, WinningCombo};
use super::win_detector::has_winning_line;

// Internal scores are weighted by depth so a faster win (or slower loss)
// ranks above an equivalent one further down the tree.
const WIN_VALUE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// +1 computer wins, -1 human wins, 0 draw, under perfect play.
    pub score: i32,
    /// `None` when the searched board was already terminal.
    pub position: Option<Position>,
}

pub struct SearchContext<'a> {
    pub combos: &'a [WinningCombo],
    pub bot_mark: Mark,
    pub human_mark: Mark,
}

impl<'a> SearchContext<'a> {
    pub fn from_game(game: &'a TicTacToeGame) -> Self {
        Self {
            combos: game.winning_combos(),
            bot_mark: game.computer_mark(),
            human_mark: game.human_mark(),
        }
    }

    /// Exhaustive minimax over `board`. `is_maximizing` selects the side to
    /// move: the computer when true, the human otherwise.
    ///
    /// Cells are filled and cleared in place; `board` is unchanged on return.
    /// Among equally scored candidates the first in row-major order wins.
    pub fn minimax(&self, board: &mut [Vec<Mark>], is_maximizing: bool) -> SearchResult {
        let (value, position) = self.search(board, is_maximizing, 0);
        SearchResult {
            score: value.signum(),
            position,
        }
    }

    fn terminal_value(&self, board: &[Vec<Mark>], depth: i32) -> Option<i32> {
        if has_winning_line(board, self.combos, self.bot_mark) {
            return Some(WIN_VALUE - depth);
        }
        if has_winning_line(board, self.combos, self.human_mark) {
            return Some(depth - WIN_VALUE);
        }
        if is_board_full(board) {
            return Some(0);
        }
        None
    }

    fn search(
        &self,
        board: &mut [Vec<Mark>],
        is_maximizing: bool,
        depth: i32,
    ) -> (i32, Option<Position>) {
        if let Some(value) = self.terminal_value(board, depth) {
            return (value, None);
        }

        let mark = if is_maximizing {
            self.bot_mark
        } else {
            self.human_mark
        };

        let mut best_value = if is_maximizing { i32::MIN } else { i32::MAX };
        let mut best_position = None;

        for pos in get_available_moves(board) {
            board[pos.row][pos.col] = mark;
            let (value, _) = self.search(board, !is_maximizing, depth + 1);
            board[pos.row][pos.col] = Mark::Empty;

            let improves = if is_maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improves {
                best_value = value;
                best_position = Some(pos);
            }
        }

        (best_value, best_position)
    }
}

pub fn calculate_minimax_move(game: &TicTacToeGame) -> SearchResult {
    let mut board = game.current_labels();
    SearchContext::from_game(game).minimax(&mut board, true)
}
