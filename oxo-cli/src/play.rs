//! Interactive play loop
//!
//! Renders the board to the terminal and reads commands from stdin. The
//! computer's move is scheduled before the thinking delay and applied
//! through the session's pending-move check afterwards, so a reset issued
//! in between never lands a stale move on the fresh board.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use oxo_core::{GameError, GameEvent, Line, Mode, MoveOutcome, Player, Session};

/// Run the interactive loop until the player quits or stdin closes
pub fn run(mode: &str, seed: Option<u64>, delay_ms: u64) -> Result<()> {
    let mode = parse_mode(mode)?;
    let mut session = match seed {
        Some(seed) => Session::with_seed(mode, seed),
        None => Session::new(mode),
    };

    tracing::info!("Starting session: mode={:?}, delay={}ms", mode, delay_ms);

    print_help();
    println!("{}", render(&session, None));
    print_status(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if session.computer_to_move() {
            computer_turn(&mut session, delay_ms)?;
            continue;
        }

        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let line = match lines.next() {
            Some(line) => line.context("Failed to read stdin")?,
            None => break,
        };

        if !handle_command(&mut session, line.trim())? {
            break;
        }
    }

    Ok(())
}

/// Dispatch one input line; returns false when the player quits
fn handle_command(session: &mut Session, input: &str) -> Result<bool> {
    match input {
        "" => {}
        "q" | "quit" => return Ok(false),
        "h" | "help" => print_help(),
        "r" | "reset" => {
            session.reset();
            println!("{}", render(session, None));
            print_status(session);
        }
        "n" | "new" => {
            let events = session.start_new_game();
            report_events(session, &events);
            println!("{}", render(session, None));
            print_status(session);
        }
        "pvp" | "pvc" => {
            // Mode switch clears the board but keeps the scores
            let mode = parse_mode(input)?;
            session.set_mode(mode);
            println!("Mode is now {}", mode_name(mode));
            println!("{}", render(session, None));
            print_status(session);
        }
        _ => match input.parse::<usize>() {
            Ok(index) => play_cell(session, index),
            Err(_) => println!("Unrecognized command: {input:?} (h for help)"),
        },
    }
    Ok(true)
}

/// Apply a human move; rule violations are reported and ignored
fn play_cell(session: &mut Session, index: usize) {
    match session.apply_move(index) {
        Ok(events) => report_events(session, &events),
        Err(err @ GameError::GameOver) => {
            println!("{err} (r to play again, n for a fresh match)");
        }
        Err(err) => println!("{err}"),
    }
}

/// Schedule, wait out the thinking delay, then apply via the staleness check
fn computer_turn(session: &mut Session, delay_ms: u64) -> Result<()> {
    let pending = match session.schedule_computer_move() {
        Ok(pending) => pending,
        Err(err) => bail!("Computer has no move: {err}"),
    };

    println!("Computer is thinking...");
    thread::sleep(Duration::from_millis(delay_ms));

    match session.apply_pending(pending) {
        Ok(Some(events)) => report_events(session, &events),
        Ok(None) => tracing::debug!("Discarded stale computer move"),
        Err(err) => bail!("Computer move failed: {err}"),
    }
    Ok(())
}

// ============================================================================
// EVENT REPORTING
// ============================================================================

fn report_events(session: &Session, events: &[GameEvent]) {
    let mut winning_line = None;
    for event in events {
        if let GameEvent::GameEnded {
            winning_line: line, ..
        } = event
        {
            winning_line = *line;
        }
    }

    for event in events {
        match event {
            GameEvent::MoveApplied { index, player } => {
                println!("{player} -> cell {index}");
                println!("{}", render(session, winning_line));
            }
            GameEvent::GameEnded { outcome, .. } => match outcome {
                MoveOutcome::Win(player) => println!("{player} wins!"),
                MoveOutcome::Draw => println!("It's a draw!"),
                MoveOutcome::Continue => {}
            },
            GameEvent::ScoresChanged { scores } => {
                println!(
                    "Scores: X {} | O {} | draws {}",
                    scores.x, scores.o, scores.draws
                );
            }
        }
    }

    if session.state().is_active() {
        print_status(session);
    }
}

fn print_status(session: &Session) {
    let player = session.state().current_player();
    if session.mode() == Mode::Pvc && player == Player::O {
        println!("Computer's turn");
    } else {
        println!("{player}'s turn");
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Render the grid; empty cells show their index, winning cells are bracketed
fn render(session: &Session, winning_line: Option<Line>) -> String {
    let board = session.state().board();
    let mut out = String::new();

    for row in 0..3 {
        if row > 0 {
            out.push_str("---+---+---\n");
        }
        for col in 0..3 {
            let index = row * 3 + col;
            if col > 0 {
                out.push('|');
            }
            let mark = match board.get(index) {
                Some(player) => player.to_string(),
                None => index.to_string(),
            };
            let highlighted = winning_line.is_some_and(|line| line.contains(&index));
            if highlighted {
                out.push_str(&format!("[{mark}]"));
            } else {
                out.push_str(&format!(" {mark} "));
            }
        }
        out.push('\n');
    }

    out
}

fn print_help() {
    println!("Enter a cell index (0-8) to move, or:");
    println!("  r      reset the board (scores kept)");
    println!("  n      new match (scores cleared)");
    println!("  pvp    switch to player-vs-player");
    println!("  pvc    switch to player-vs-computer");
    println!("  q      quit");
}

// ============================================================================
// UTILITIES
// ============================================================================

fn parse_mode(mode: &str) -> Result<Mode> {
    match mode {
        "pvp" => Ok(Mode::Pvp),
        "pvc" => Ok(Mode::Pvc),
        other => bail!("Unknown mode {other:?} (expected pvp or pvc)"),
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Pvp => "player vs player",
        Mode::Pvc => "player vs computer",
    }
}
