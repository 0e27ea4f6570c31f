//! Terminal shell for memory-match.
//!
//! Usage: `memory-cli [settings.toml]`
//!
//! Reads one command per line. Set `RUST_LOG=debug` to trace every reveal.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use memory_match::{
    BoardView, CardFace, CardView, GameSettings, RevealOutcome, Screen, SessionController,
    SessionEvent,
};
use tracing_subscriber::EnvFilter;

const COLUMNS: usize = 4;
const PROGRESS_WIDTH: usize = 24;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => match GameSettings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("memory-cli: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => GameSettings::default(),
    };

    let mut session = match SessionController::new(settings) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("memory-cli: {e}");
            return ExitCode::FAILURE;
        }
    };

    session.subscribe(|event: &SessionEvent, _: &SessionController| match event {
        SessionEvent::Revealed(RevealOutcome::Matched { .. }) => println!("It's a pair!"),
        SessionEvent::GameOver { steps } => {
            println!("Victory! You cleared the board in {steps} steps.")
        }
        _ => {}
    });

    let mut lines = io::stdin().lock().lines();
    loop {
        show(&session);
        if let Err(e) = io::stdout().flush() {
            tracing::warn!(error = %e, "could not flush stdout");
        }

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let input = line.trim();
        if matches!(input, "q" | "quit") {
            break;
        }

        match session.screen() {
            Screen::Start => on_start_screen(&mut session, input),
            Screen::Playing => on_playing_screen(&mut session, input),
            Screen::Results => session.reset(),
        }
    }

    ExitCode::SUCCESS
}

fn show(session: &SessionController) {
    match session.screen() {
        Screen::Start => {
            println!();
            println!("Welcome! Memory trains your visual memory.");
            println!("Every picture is on two cards. Flip two at a time; a pair stays open.");
            for (i, theme) in session.themes().enumerate() {
                println!("  {}) {}", i + 1, theme.label);
            }
            print!("Choose a theme (number or name, 'q' to quit): ");
        }
        Screen::Playing => {
            if let Some(board) = session.board() {
                render_board(&board);
                if board.game_over {
                    print!("Press enter to see the results: ");
                } else {
                    print!("Card number ('menu', 'restart', 'q'): ");
                }
            }
        }
        Screen::Results => {
            render_results(session);
            print!("Press enter for a new game: ");
        }
    }
}

fn on_start_screen(session: &mut SessionController, input: &str) {
    let theme = match input.parse::<usize>() {
        Ok(n) => session
            .themes()
            .nth(n.wrapping_sub(1))
            .map(|t| t.name.clone()),
        Err(_) => Some(input.to_string()),
    };

    match theme {
        Some(theme) => {
            if let Err(e) = session.start(&theme) {
                println!("{e}");
            }
        }
        None => println!("No theme number {input}."),
    }
}

fn on_playing_screen(session: &mut SessionController, input: &str) {
    match input {
        "menu" => session.reset(),
        "restart" => {
            if let Some(theme) = session.theme().map(str::to_string) {
                if let Err(e) = session.start(&theme) {
                    println!("{e}");
                }
            }
        }
        "" if session.is_game_over() => {
            if let Err(e) = session.finish() {
                println!("{e}");
            }
        }
        _ => flip(session, input),
    }
}

fn flip(session: &mut SessionController, input: &str) {
    let Some(board) = session.board() else {
        return;
    };
    let card = input
        .parse::<usize>()
        .ok()
        .and_then(|n| board.cards.get(n.wrapping_sub(1)));
    let Some(card) = card else {
        println!("Pick a card between 1 and {}.", board.cards.len());
        return;
    };

    match session.reveal(&card.id) {
        Ok(response) => {
            if let Some(ticket) = response.clear_ticket {
                if let Some(board) = session.board() {
                    render_board(&board);
                }
                println!("No match.");
                std::thread::sleep(ticket.delay);
                session.fire_clear(ticket);
            }
        }
        Err(e) => println!("{e}"),
    }
}

fn render_board(board: &BoardView) {
    let filled = (board.progress * PROGRESS_WIDTH as f64).round() as usize;
    println!();
    println!(
        "[{}{}] opened {} / {}   {} steps",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH.saturating_sub(filled)),
        board.pairs_found,
        board.total_pairs,
        board.steps
    );

    for (row, cards) in board.cards.chunks(COLUMNS).enumerate() {
        let line: Vec<String> = cards
            .iter()
            .enumerate()
            .map(|(col, card)| format!("{:>2} {:<16}", row * COLUMNS + col + 1, card_label(card)))
            .collect();
        println!("{}", line.join(" "));
    }
}

fn card_label(card: &CardView) -> String {
    let name = card
        .url
        .as_deref()
        .map(|url| url.rsplit('/').next().unwrap_or(url))
        .unwrap_or("??");
    match card.face {
        CardFace::Hidden => "[ ?? ]".to_string(),
        CardFace::Revealed => format!("[{name}]"),
        CardFace::Matched => format!("({name})"),
    }
}

fn render_results(session: &SessionController) {
    let Ok(rows) = session.results() else {
        return;
    };
    let steps = session.final_steps().unwrap_or_default();

    println!();
    println!("You finished the game in {steps} steps. Well done!");
    println!("Best results:");
    println!("{:>5}  {:<16} {:>5}", "Place", "Name", "Steps");
    for row in rows {
        let marker = if row.is_current { '>' } else { ' ' };
        println!(
            "{marker}{:>4}  {:<16} {:>5}",
            row.rank, row.entry.name, row.entry.steps_count
        );
    }
}
