mod board;
mod bot_controller;
mod game_state;
mod types;
mod win_detector;

pub use board::{get_available_moves, is_board_full};
pub use bot_controller::{SearchContext, SearchResult, calculate_minimax_move};
pub use game_state::{
    DEFAULT_BOARD_SIZE, DEFAULT_COMPUTER_LABEL, DEFAULT_HUMAN_LABEL, TicTacToeGame,
    default_players,
};
pub use types::{GameOutcome, Mark, Move, Player, Position, WinningCombo};
pub use win_detector::{find_winning_combo, has_winning_line, winning_combos};
