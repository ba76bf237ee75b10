use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use minado_core::{Coord, Coord2, OpenOutcome, Session};
use rand::rngs::SmallRng;

use crate::view;

const DEFAULT_PLAYER: &str = "player";

#[derive(Debug, PartialEq)]
enum Command {
    Open(Coord2),
    Mark(Coord2),
    Quit,
}

/// Interactive session from the first open to win, loss, or quit.
pub fn run(mut session: Session, mut rng: SmallRng) -> Result<()> {
    let board = session.board();
    println!(
        "Welcome, {}! The field is {}x{} with {} mines.",
        session.player_name(),
        board.rows(),
        board.cols(),
        board.mine_count()
    );
    println!("{}", view::render_board(board));

    let Some(safe) = first_open_target(&session)? else {
        println!("Bye!");
        return Ok(());
    };

    // The first-opened cell stays mine-free, so this open cannot explode.
    let board = session.board_mut();
    board.place_mines(safe, &mut rng);
    board.compute_values();
    board.open(safe)?;

    if session.board_mut().is_solved() {
        return finish_won(&session);
    }

    print_help();
    play(&mut session)
}

/// Asks for a name, falling back to a default on empty input.
pub fn prompt_player_name() -> Result<String> {
    let line = prompt("Enter your name: ")?.unwrap_or_default();
    let name = line.trim();
    Ok(if name.is_empty() {
        DEFAULT_PLAYER.to_string()
    } else {
        name.to_string()
    })
}

fn play(session: &mut Session) -> Result<()> {
    loop {
        println!("{}", view::render_board(session.board()));
        let Some(line) = prompt("> ")? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Some(Command::Quit) => break,
            Some(Command::Open(coords)) => match session.board_mut().open(coords) {
                Ok(OpenOutcome::Exploded) => return finish_lost(session),
                Ok(_) => {
                    if session.board_mut().is_solved() {
                        return finish_won(session);
                    }
                }
                Err(err) => println!("{err}"),
            },
            Some(Command::Mark(coords)) => {
                if let Err(err) = session.board_mut().mark(coords) {
                    println!("{err}");
                }
            }
            None => print_help(),
        }
    }
    println!("Bye!");
    Ok(())
}

fn finish_won(session: &Session) -> Result<()> {
    println!("{}", view::render_board(session.board()));
    println!("Congratulations, {}! Field cleared.", session.player_name());
    Ok(())
}

fn finish_lost(session: &mut Session) -> Result<()> {
    session.board_mut().open_all_mines();
    println!("{}", view::render_board(session.board()));
    println!(
        "Boom! That was a mine. Better luck next time, {}.",
        session.player_name()
    );
    Ok(())
}

fn first_open_target(session: &Session) -> Result<Option<Coord2>> {
    let board = session.board();
    loop {
        let Some(line) = prompt("First tile to open (ROW COL): ")? else {
            return Ok(None);
        };
        let mut parts = line.split_whitespace();
        match parse_coords(&mut parts) {
            Some(coords) if board.is_in_bounds(coords) => return Ok(Some(coords)),
            _ => println!(
                "Enter a row between 1 and {} and a column between 1 and {}.",
                board.rows(),
                board.cols()
            ),
        }
    }
}

fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush().context("could not flush stdout")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("could not read input")?;
    Ok((read != 0).then_some(line))
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    Some(match parts.next()? {
        "o" | "open" => Command::Open(parse_coords(&mut parts)?),
        "m" | "mark" => Command::Mark(parse_coords(&mut parts)?),
        "q" | "quit" => Command::Quit,
        _ => return None,
    })
}

/// Coordinates are 1-based on the prompt and 0-based on the board.
fn parse_coords<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<Coord2> {
    let row: Coord = parts.next()?.parse().ok()?;
    let col: Coord = parts.next()?.parse().ok()?;
    Some((row.checked_sub(1)?, col.checked_sub(1)?))
}

fn print_help() {
    println!("Commands:");
    println!("  o ROW COL   open a tile (1-based)");
    println!("  m ROW COL   mark or unmark a tile");
    println!("  q           quit");
}
