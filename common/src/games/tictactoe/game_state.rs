use std::collections::HashSet;

use crate::log;
use super::board::get_available_moves;
use super::bot_controller::{SearchContext, SearchResult, calculate_minimax_move};
use super::types::{GameOutcome, Mark, Move, Player, Position, WinningCombo};
use super::win_detector::{find_winning_combo, winning_combos};

pub const DEFAULT_BOARD_SIZE: usize = 3;
pub const DEFAULT_COMPUTER_LABEL: char = 'X';
pub const DEFAULT_HUMAN_LABEL: char = 'O';

pub fn default_players() -> Vec<Player> {
    vec![Player::new('X', "blue"), Player::new('O', "green")]
}

/// Committed state of one game session.
///
/// Turn order is bookkeeping only: `is_valid_move` and `apply_move` accept a
/// move from any player, so the caller decides whose move it takes.
#[derive(Clone, Debug)]
pub struct TicTacToeGame {
    board: Vec<Vec<Move>>,
    board_size: usize,
    players: Vec<Player>,
    current_player: usize,
    computer_label: char,
    human_label: char,
    winning_combos: Vec<WinningCombo>,
    winner: Option<(usize, Mark)>,
}

impl TicTacToeGame {
    pub fn new(
        players: Vec<Player>,
        board_size: usize,
        computer_label: char,
        human_label: char,
    ) -> Result<Self, String> {
        if players.len() < 2 {
            return Err(format!(
                "TicTacToe requires at least 2 players, got {}",
                players.len()
            ));
        }
        if board_size == 0 {
            return Err("Board size must be positive".to_string());
        }

        let mut labels = HashSet::new();
        for player in &players {
            if !labels.insert(player.label) {
                return Err(format!("Duplicate player label '{}'", player.label));
            }
        }
        if computer_label == human_label {
            return Err(format!(
                "Computer and human share the label '{}'",
                computer_label
            ));
        }
        for label in [computer_label, human_label] {
            if !labels.contains(&label) {
                return Err(format!("No player has the label '{}'", label));
            }
        }

        Ok(Self {
            board: empty_board(board_size),
            board_size,
            players,
            current_player: 0,
            computer_label,
            human_label,
            winning_combos: winning_combos(board_size),
            winner: None,
        })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn computer_label(&self) -> char {
        self.computer_label
    }

    pub fn human_label(&self) -> char {
        self.human_label
    }

    pub fn computer_mark(&self) -> Mark {
        Mark::Player(self.computer_label)
    }

    pub fn human_mark(&self) -> Mark {
        Mark::Player(self.human_label)
    }

    pub fn winning_combos(&self) -> &[WinningCombo] {
        &self.winning_combos
    }

    /// Detached copy of the cell marks.
    pub fn current_labels(&self) -> Vec<Vec<Mark>> {
        self.board
            .iter()
            .map(|row| row.iter().map(|mv| mv.mark).collect())
            .collect()
    }

    pub fn available_positions(&self) -> Vec<Position> {
        get_available_moves(&self.current_labels())
    }

    /// Out-of-range coordinates are never valid.
    pub fn is_valid_move(&self, mv: &Move) -> bool {
        if self.winner.is_some() {
            return false;
        }
        if mv.row >= self.board_size || mv.col >= self.board_size {
            return false;
        }
        self.board[mv.row][mv.col].mark == Mark::Empty
    }

    /// Writes `mv` and records the first completed line, if any.
    ///
    /// # Panics
    ///
    /// If `is_valid_move(mv)` is false.
    pub fn apply_move(&mut self, mv: Move) {
        assert!(
            self.is_valid_move(&mv),
            "Invalid move at ({}, {}): cell taken, out of range, or game already won",
            mv.row,
            mv.col
        );

        self.board[mv.row][mv.col] = mv;

        let labels = self.current_labels();
        if let Some((index, mark)) = find_winning_combo(&labels, &self.winning_combos) {
            log!(
                "Player {} completed a line at {:?}",
                mark,
                self.winning_combos[index]
            );
            self.winner = Some((index, mark));
        } else if get_available_moves(&labels).is_empty() {
            log!("Board full, game tied");
        }
    }

    pub fn toggle_player(&mut self) {
        self.current_player = (self.current_player + 1) % self.players.len();
    }

    pub fn set_current_player(&mut self, label: char) -> Result<(), String> {
        let index = self
            .players
            .iter()
            .position(|p| p.label == label)
            .ok_or_else(|| format!("No player has the label '{}'", label))?;
        self.current_player = index;
        Ok(())
    }

    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }

    pub fn is_tied(&self) -> bool {
        self.winner.is_none() && self.available_positions().is_empty()
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner.map(|(_, mark)| mark)
    }

    /// Line to highlight once a winner is recorded.
    pub fn winner_combo(&self) -> Option<&[Position]> {
        self.winner
            .map(|(index, _)| self.winning_combos[index].as_slice())
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.winner {
            Some((index, mark)) => GameOutcome::Won {
                combo: self.winning_combos[index].clone(),
                mark,
            },
            None if self.is_tied() => GameOutcome::Tied,
            None => GameOutcome::InProgress,
        }
    }

    /// Clears the board and the recorded winner. Whose turn it is stays as
    /// is; use `set_current_player` to pick who starts the next round.
    pub fn reset_game(&mut self) {
        self.board = empty_board(self.board_size);
        self.winner = None;
        log!("Game reset");
    }

    pub fn minimax(&self, board: &mut [Vec<Mark>], is_maximizing: bool) -> SearchResult {
        SearchContext::from_game(self).minimax(board, is_maximizing)
    }

    /// Optimal move for the computer on the committed board, or `None` when
    /// the game is already over.
    pub fn best_move_for_computer(&self) -> Option<Move> {
        calculate_minimax_move(self)
            .position
            .map(|pos| Move::new(pos.row, pos.col, self.computer_mark()))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        self.board.get(row)?.get(col).map(|mv| mv.mark)
    }
}

impl Default for TicTacToeGame {
    fn default() -> Self {
        Self {
            board: empty_board(DEFAULT_BOARD_SIZE),
            board_size: DEFAULT_BOARD_SIZE,
            players: default_players(),
            current_player: 0,
            computer_label: DEFAULT_COMPUTER_LABEL,
            human_label: DEFAULT_HUMAN_LABEL,
            winning_combos: winning_combos(DEFAULT_BOARD_SIZE),
            winner: None,
        }
    }
}

fn empty_board(size: usize) -> Vec<Vec<Move>> {
    (0..size)
        .map(|row| (0..size).map(|col| Move::empty(row, col)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::IndexedRandom;

    fn play(game: &mut TicTacToeGame, row: usize, col: usize, label: char) {
        game.apply_move(Move::new(row, col, Mark::Player(label)));
    }

    fn combo(cells: &[(usize, usize)]) -> Vec<Position> {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_new_game_is_empty() {
        let game = TicTacToeGame::default();

        assert_eq!(game.available_positions().len(), 9);
        assert_eq!(game.available_positions()[0], Position::new(0, 0));
        assert!(!game.has_winner());
        assert!(!game.is_tied());
        assert_eq!(game.current_player().label, 'X');
        assert_eq!(game.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_new_rejects_bad_setup() {
        let two = default_players;

        assert!(TicTacToeGame::new(vec![Player::new('X', "blue")], 3, 'X', 'O').is_err());
        assert!(TicTacToeGame::new(two(), 0, 'X', 'O').is_err());
        assert!(TicTacToeGame::new(two(), 3, 'X', 'X').is_err());
        assert!(TicTacToeGame::new(two(), 3, 'X', 'Z').is_err());
        assert!(
            TicTacToeGame::new(
                vec![Player::new('X', "blue"), Player::new('X', "red")],
                3,
                'X',
                'O'
            )
            .is_err()
        );
        assert!(TicTacToeGame::new(two(), 4, 'O', 'X').is_ok());
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in winning_combos(3) {
            let mut game = TicTacToeGame::default();
            for pos in &line {
                assert!(!game.has_winner());
                play(&mut game, pos.row, pos.col, 'O');
            }

            assert!(game.has_winner());
            assert_eq!(game.winner(), Some(Mark::Player('O')));
            assert_eq!(game.winner_combo(), Some(line.as_slice()));
        }
    }

    #[test]
    fn test_top_row_win() {
        let mut game = TicTacToeGame::default();
        play(&mut game, 0, 0, 'X');
        play(&mut game, 1, 0, 'O');
        play(&mut game, 0, 1, 'X');
        play(&mut game, 1, 1, 'O');
        play(&mut game, 0, 2, 'X');

        assert!(game.has_winner());
        assert_eq!(game.winner_combo(), Some(combo(&[(0, 0), (0, 1), (0, 2)]).as_slice()));
        assert_eq!(
            game.outcome(),
            GameOutcome::Won {
                combo: combo(&[(0, 0), (0, 1), (0, 2)]),
                mark: Mark::Player('X'),
            }
        );
    }

    #[test]
    fn test_tie() {
        let mut game = TicTacToeGame::default();
        let moves = [
            (0, 0, 'X'), (0, 1, 'O'), (0, 2, 'X'),
            (1, 1, 'O'), (1, 0, 'X'), (1, 2, 'O'),
            (2, 1, 'X'), (2, 0, 'O'), (2, 2, 'X'),
        ];
        for (row, col, label) in moves {
            play(&mut game, row, col, label);
        }

        assert!(game.is_tied());
        assert!(!game.has_winner());
        assert_eq!(game.outcome(), GameOutcome::Tied);
    }

    #[test]
    fn test_board_frozen_after_win() {
        let mut game = TicTacToeGame::default();
        play(&mut game, 0, 0, 'X');
        play(&mut game, 1, 1, 'X');
        play(&mut game, 2, 2, 'X');

        assert!(game.has_winner());
        for pos in game.available_positions() {
            assert!(!game.is_valid_move(&Move::new(pos.row, pos.col, Mark::Player('O'))));
        }
        assert_eq!(game.best_move_for_computer(), None);
    }

    #[test]
    fn test_valid_move_checks_cell_and_bounds() {
        let mut game = TicTacToeGame::default();
        play(&mut game, 1, 1, 'X');

        assert!(!game.is_valid_move(&Move::new(1, 1, Mark::Player('O'))));
        assert!(game.is_valid_move(&Move::new(0, 0, Mark::Player('O'))));
        assert!(game.is_valid_move(&Move::new(0, 0, Mark::Player('X'))));
        assert!(!game.is_valid_move(&Move::new(3, 0, Mark::Player('O'))));
        assert!(!game.is_valid_move(&Move::new(0, 7, Mark::Player('O'))));
    }

    #[test]
    #[should_panic(expected = "Invalid move")]
    fn test_apply_move_on_taken_cell_panics() {
        let mut game = TicTacToeGame::default();
        play(&mut game, 1, 1, 'X');
        play(&mut game, 1, 1, 'O');
    }

    #[test]
    #[should_panic(expected = "Invalid move")]
    fn test_apply_move_out_of_range_panics() {
        let mut game = TicTacToeGame::default();
        play(&mut game, 0, 3, 'X');
    }

    #[test]
    fn test_apply_move_does_not_advance_turn() {
        let mut game = TicTacToeGame::default();
        play(&mut game, 0, 0, 'X');

        assert_eq!(game.current_player().label, 'X');
    }

    #[test]
    fn test_toggle_player_cycles() {
        let players = vec![
            Player::new('X', "blue"),
            Player::new('O', "green"),
            Player::new('Z', "red"),
        ];
        let mut game = TicTacToeGame::new(players, 3, 'X', 'O').unwrap();

        let mut seen = Vec::new();
        for _ in 0..7 {
            seen.push(game.current_player().label);
            game.toggle_player();
        }

        assert_eq!(seen, vec!['X', 'O', 'Z', 'X', 'O', 'Z', 'X']);
    }

    #[test]
    fn test_set_current_player() {
        let mut game = TicTacToeGame::default();

        assert!(game.set_current_player('O').is_ok());
        assert_eq!(game.current_player().label, 'O');
        assert!(game.set_current_player('Q').is_err());
        assert_eq!(game.current_player().label, 'O');
    }

    #[test]
    fn test_reset_keeps_turn_and_geometry() {
        let mut game = TicTacToeGame::default();
        play(&mut game, 0, 0, 'X');
        play(&mut game, 0, 1, 'X');
        play(&mut game, 0, 2, 'X');
        game.toggle_player();

        game.reset_game();

        assert!(!game.has_winner());
        assert_eq!(game.winner_combo(), None);
        assert_eq!(game.available_positions().len(), 9);
        assert_eq!(game.current_player().label, 'O');
        assert_eq!(game.winning_combos().len(), 8);
        assert_eq!(game.cell(0, 0), Some(Mark::Empty));
        assert_eq!(game.cell(3, 0), None);
    }

    #[test]
    fn test_labels_are_detached() {
        let game = TicTacToeGame::default();
        let mut labels = game.current_labels();
        labels[0][0] = Mark::Player('X');

        assert_eq!(game.cell(0, 0), Some(Mark::Empty));
    }

    #[test]
    fn test_computer_opens_in_corner() {
        let game = TicTacToeGame::default();

        assert_eq!(
            game.best_move_for_computer(),
            Some(Move::new(0, 0, Mark::Player('X')))
        );
    }

    #[test]
    fn test_search_from_game_leaves_board_untouched() {
        let mut game = TicTacToeGame::default();
        play(&mut game, 1, 1, 'O');
        let before = game.current_labels();

        let mut snapshot = game.current_labels();
        let result = game.minimax(&mut snapshot, true);

        assert_eq!(result.score, 0);
        assert_eq!(snapshot, before);
        assert_eq!(game.current_labels(), before);
    }

    // Walks every line of human play against the computer and checks that
    // the human never ends up with a completed line.
    fn assert_computer_never_loses(game: &TicTacToeGame, computer_to_move: bool) {
        if game.has_winner() {
            assert_eq!(game.winner(), Some(game.computer_mark()));
            return;
        }
        if game.is_tied() {
            return;
        }

        if computer_to_move {
            let mv = game.best_move_for_computer().unwrap();
            assert_computer_never_loses(&replay(game, mv), false);
        } else {
            for pos in game.available_positions() {
                let mv = Move::new(pos.row, pos.col, game.human_mark());
                assert_computer_never_loses(&replay(game, mv), true);
            }
        }
    }

    fn replay(game: &TicTacToeGame, mv: Move) -> TicTacToeGame {
        let mut next = game.clone();
        next.apply_move(mv);
        next
    }

    #[test]
    fn test_computer_never_loses_when_moving_first() {
        assert_computer_never_loses(&TicTacToeGame::default(), true);
    }

    #[test]
    fn test_computer_never_loses_when_moving_second() {
        assert_computer_never_loses(&TicTacToeGame::default(), false);
    }

    #[test]
    fn test_random_playouts() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let mut game = TicTacToeGame::default();
            game.set_current_player('O').unwrap();

            while !game.has_winner() && !game.is_tied() {
                let mv = if game.current_player().label == game.computer_label() {
                    game.best_move_for_computer().unwrap()
                } else {
                    let positions = game.available_positions();
                    let pos = positions.choose(&mut rng).unwrap();
                    Move::new(pos.row, pos.col, game.human_mark())
                };
                assert!(game.is_valid_move(&mv));
                game.apply_move(mv);
                game.toggle_player();
            }

            assert_ne!(game.winner(), Some(game.human_mark()));
        }
    }
}
