//! grid-arcade - terminal front end
//!
//! Plays tic-tac-toe or snake against the library's session controller.
//! Logs go to stderr; set `RUST_LOG=grid_arcade=debug` to watch moves.

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use grid_arcade::games::snake::{SnakeBuilder, SnakeCell, SnakeGame};
use grid_arcade::games::tictactoe::{Mark, Square, TicTacToeBuilder, SIZE};
use grid_arcade::session::{run, IntervalTicker, SessionController};
use grid_arcade::{Coord, Direction, Outcome, RandomAgent, SessionConfig};

/// grid-arcade CLI.
#[derive(Parser)]
#[command(name = "grid-arcade")]
#[command(about = "Tic-tac-toe and snake in the terminal")]
#[command(version)]
struct Cli {
    /// Seed for every random choice in the session
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play tic-tac-toe
    Tictactoe {
        /// Let the computer play one side
        #[arg(long)]
        vs_computer: bool,

        /// Computer plays X and opens every round (needs --vs-computer)
        #[arg(long, requires = "vs_computer")]
        computer_first: bool,
    },

    /// Play snake
    Snake {
        /// Milliseconds between ticks
        #[arg(long, default_value_t = 300)]
        interval_ms: u64,

        /// Board side length
        #[arg(long, default_value_t = 20)]
        size: usize,

        /// Points per food eaten
        #[arg(long, default_value_t = 10)]
        food_points: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SessionConfig::default().with_seed(cli.seed);

    match cli.command {
        Commands::Tictactoe { vs_computer, computer_first } => play_tictactoe(config, vs_computer, computer_first),
        Commands::Snake { interval_ms, size, food_points } => {
            play_snake(config.with_tick_interval_ms(interval_ms), size, food_points)
        }
    }
}

// =============================================================================
// Tic-tac-toe
// =============================================================================

fn play_tictactoe(config: SessionConfig, vs_computer: bool, computer_first: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = TicTacToeBuilder::new();
    if vs_computer {
        builder = if computer_first { builder.computer(Mark::X) } else { builder.computer(Mark::O) };
    }

    let mut session = SessionController::new(builder.build(), config);
    if vs_computer {
        session = session.with_agent(RandomAgent);
    }
    info!(vs_computer, computer_first, "tic-tac-toe session started");

    println!("Enter moves as `row col` (0-2). r = new round, c = clear scores, q = quit.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        render_tictactoe(&session);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        match line.trim() {
            "q" | "quit" => break,
            "r" | "reset" => {
                session.reset();
            }
            "c" | "clear" => session.clear_scores(),
            input => match parse_cell(input) {
                Some(cell) => {
                    if let Err(rejected) = session.submit_move(cell) {
                        println!("Rejected: {rejected}");
                    }
                }
                None => println!("Could not read `{input}`; expected two numbers like `1 2`."),
            },
        }
    }

    let scores = session.teardown();
    println!("Final scores: {scores}");
    Ok(())
}

fn parse_cell(input: &str) -> Option<Coord> {
    let mut parts = input.split_whitespace().map(str::parse::<i32>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(row)), Some(Ok(col)), None) => Some(Coord::new(row, col)),
        _ => None,
    }
}

fn render_tictactoe(session: &SessionController<grid_arcade::TicTacToe>) {
    let state = session.state();
    println!();
    for row in 0..SIZE as i32 {
        let cells: Vec<String> = (0..SIZE as i32)
            .map(|col| match state.board().get(Coord::new(row, col)) {
                Ok(Square::Taken(mark)) => mark.to_string(),
                _ => ".".to_string(),
            })
            .collect();
        println!(" {}", cells.join(" "));
    }

    match state.outcome() {
        Some(outcome) => println!("Round over: {}. Press r to play again.", describe(outcome.label())),
        None => println!("{} to move", state.current()),
    }
    println!("{}", session.scores());
}

fn describe(label: &str) -> String {
    match label {
        "Draws" => "draw".to_string(),
        mark => format!("{mark} wins"),
    }
}

// =============================================================================
// Snake
// =============================================================================

enum SnakeCommand {
    Turn(Direction),
    Start,
    Reset,
    Clear,
    Quit,
}

fn parse_snake_command(input: &str) -> Option<SnakeCommand> {
    let command = match input.trim() {
        "w" => SnakeCommand::Turn(Direction::Up),
        "s" => SnakeCommand::Turn(Direction::Down),
        "a" => SnakeCommand::Turn(Direction::Left),
        "d" => SnakeCommand::Turn(Direction::Right),
        "p" | "play" => SnakeCommand::Start,
        "r" | "reset" => SnakeCommand::Reset,
        "c" | "clear" => SnakeCommand::Clear,
        "q" | "quit" => SnakeCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Stdin lines arrive on a channel so the tick loop never blocks on input.
fn spawn_input() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Apply one command. Returns false on quit.
fn apply_snake_command(session: &mut SessionController<SnakeGame>, command: SnakeCommand) -> bool {
    match command {
        SnakeCommand::Turn(direction) => {
            if let Err(rejected) = session.submit_move(direction) {
                debug!(%rejected, "turn ignored");
            }
        }
        SnakeCommand::Start => {
            if session.is_terminal() {
                session.reset();
            }
            session.start();
        }
        SnakeCommand::Reset => {
            session.reset();
        }
        SnakeCommand::Clear => session.clear_scores(),
        SnakeCommand::Quit => return false,
    }
    true
}

fn play_snake(config: SessionConfig, size: usize, food_points: u32) -> Result<(), Box<dyn std::error::Error>> {
    let center = (size / 2) as i32;
    let game = SnakeBuilder::new()
        .board_size(size, size)
        .start(Coord::new(center, center))
        .food_points(food_points)
        .build()?;

    let mut ticker = IntervalTicker::from_config(&config);
    let mut session = SessionController::new(game, config);
    let input = spawn_input();
    info!(size, interval_ms = ticker.interval().as_millis() as u64, "snake session started");

    println!("Steer with w/a/s/d then Enter. p = play, r = reset, c = clear scores, q = quit.");
    let mut quit = false;

    while !quit {
        render_snake(&session);

        // Idle: block until the player does something.
        let Ok(line) = input.recv() else { break };
        let Some(command) = parse_snake_command(&line) else { continue };
        if !apply_snake_command(&mut session, command) {
            break;
        }

        let outcome = run(&mut session, &mut ticker, |session| {
            loop {
                match input.try_recv() {
                    Ok(line) => {
                        if let Some(command) = parse_snake_command(&line) {
                            if !apply_snake_command(session, command) {
                                quit = true;
                                return ControlFlow::Break(());
                            }
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        quit = true;
                        return ControlFlow::Break(());
                    }
                }
            }
            render_snake(session);
            ControlFlow::Continue(())
        });

        if let Some(outcome) = outcome {
            info!(outcome = outcome.label(), "snake round over");
        }
    }

    let scores = session.teardown();
    println!("Final scores: {scores}");
    Ok(())
}

fn render_snake(session: &SessionController<SnakeGame>) {
    let state = session.state();
    let board = state.board();
    let head = state.head();

    let mut out = String::new();
    out.push('\n');
    for y in 0..board.height() as i32 {
        for x in 0..board.width() as i32 {
            let cell = Coord::new(x, y);
            let glyph = match board.get(cell) {
                Ok(SnakeCell::Segment) if cell == head => '@',
                Ok(SnakeCell::Segment) => 'o',
                Ok(SnakeCell::Food) => '*',
                _ => '.',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    println!("{out}Score: {}  {}", state.score(), session.scores());

    if let Some(outcome) = state.outcome() {
        println!("Game over ({}). Press p to play again.", outcome.label());
    } else if !session.is_running() {
        println!("Press p to start.");
    }
}
