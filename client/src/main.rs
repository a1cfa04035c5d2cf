mod terminal;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use common::config::{DEFAULT_CONFIG_FILE, load_config};
use common::games::tictactoe::TicTacToeGame;
use common::{log, logger};

use terminal::{describe_outcome, read_player_move, read_yes_no, render_board};

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against an unbeatable computer")]
struct Args {
    /// YAML game configuration; defaults are used when the file is missing.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Let the human open every round.
    #[arg(long)]
    human_first: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

enum RoundEnd {
    Finished,
    InputClosed,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = load_config(&args.config)?;
    if args.human_first {
        config.computer_starts = false;
    }
    let mut game = config.create_game()?;
    log!(
        "Starting {}x{} game, computer plays {}",
        config.board_size,
        config.board_size,
        config.computer_label
    );

    println!("Rows and columns are numbered 0-{}.", config.board_size - 1);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    loop {
        if let RoundEnd::InputClosed = play_round(&mut game, &mut input)? {
            break;
        }

        print!("Play again? (yes/no): ");
        std::io::stdout().flush()?;
        if !read_yes_no(&mut input)? {
            break;
        }

        game.reset_game();
        game.set_current_player(config.starting_label())?;
    }

    println!("Thanks for playing!");
    Ok(())
}

fn play_round(
    game: &mut TicTacToeGame,
    input: &mut impl BufRead,
) -> Result<RoundEnd, Box<dyn std::error::Error>> {
    println!("{}", render_board(game));

    loop {
        let mv = if game.current_player().label == game.computer_label() {
            println!("Computer is thinking...");
            match game.best_move_for_computer() {
                Some(mv) if game.is_valid_move(&mv) => mv,
                _ => return Err("search produced no playable move on an open board".into()),
            }
        } else {
            match read_player_move(game, input)? {
                Some(mv) => mv,
                None => return Ok(RoundEnd::InputClosed),
            }
        };

        game.apply_move(mv);
        println!("{} played at row {}, col {}.", mv.mark, mv.row, mv.col);
        println!("{}", render_board(game));

        if let Some(message) = describe_outcome(game) {
            println!("{}", message);
            log!("Round over: {}", message);
            return Ok(RoundEnd::Finished);
        }

        game.toggle_player();
    }
}
