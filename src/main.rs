use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tungsten::config::{self, Config};
use tungsten::export::json::{export_json_to_path, import_json};
use tungsten::{App, Flashcard, ReviewSession, SqliteRepository, select_due};

#[derive(Parser)]
#[command(name = "tungsten", about = "Spaced repetition flashcards", version)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the SQLite database (overrides the config file)
    #[arg(long, global = true, env = "TUNGSTEN_DATABASE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all flashcards
    List,
    /// Create a flashcard, due immediately
    Add { front: String, back: String },
    /// Change the text of a flashcard without touching its schedule
    Edit { id: i64, front: String, back: String },
    /// Delete a flashcard
    Delete { id: i64 },
    /// List flashcards due today, longest overdue first
    Due,
    /// Grade a single review (0 = blackout, 5 = perfect recall)
    Review { id: i64, grade: u8 },
    /// Review every due card interactively
    Study,
    /// Write all flashcards to a JSON file
    Export { path: PathBuf },
    /// Add flashcards from a JSON file
    Import { path: PathBuf },
    /// Show the date used for scheduling
    Today,
    /// Move the simulated date forward by one day
    NextDay,
    /// Go back to the calendar date
    ResetDate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config_exists = config_path.exists();
    let config = Config::load(&config_path)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if !config_exists {
        warn!("Config file {} not found, using defaults", config_path.display());
    }

    let db_path = config.resolve_database_path(cli.database.as_deref());
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    info!("Database path: {}", db_path.display());

    let repo = SqliteRepository::open(&db_path).context("Failed to initialize database")?;
    let calendar_today = Local::now().date_naive();
    let today = repo.current_date(calendar_today)?;
    let mut app = App::new(repo);

    match cli.command {
        Command::List => {
            for card in app.get_all_flashcards()?.values() {
                print_card(card);
            }
        }
        Command::Add { front, back } => {
            let card = app.save_flashcard(&front, &back, today)?;
            println!("Created flashcard {}", card.id);
        }
        Command::Edit { id, front, back } => {
            app.modify_flashcard(id, &front, &back)?;
            println!("Updated flashcard {id}");
        }
        Command::Delete { id } => {
            app.delete_flashcard(id)?;
            println!("Deleted flashcard {id}");
        }
        Command::Due => {
            let due = app.get_review_cards(today)?;
            if due.is_empty() {
                println!("No cards to review");
            }
            for card in &due {
                print_card(card);
            }
        }
        Command::Review { id, grade } => {
            let card = app.review_card(id, grade, today)?;
            println!("Next review of flashcard {} on {}", card.id, card.review_date);
        }
        Command::Study => study(&mut app, today)?,
        Command::Export { path } => {
            let cards = app.get_all_flashcards()?;
            export_json_to_path(&cards, &path)?;
            println!("Exported {} flashcards to {}", cards.len(), path.display());
        }
        Command::Import { path } => {
            let imported = app.import_flashcards(import_json(&path)?)?;
            println!("Imported {} flashcards", imported.len());
        }
        Command::Today => println!("{today}"),
        Command::NextDay => {
            let next = app.repository().advance_day(calendar_today)?;
            println!("{next}");
        }
        Command::ResetDate => {
            app.repository().reset_date()?;
            println!("{calendar_today}");
        }
    }

    Ok(())
}

fn print_card(card: &Flashcard) {
    println!(
        "{:>4}  {} | {}  (reps {}, EF {:.2}, interval {}d, due {})",
        card.id, card.front, card.back, card.repetitions, card.easiness, card.interval, card.review_date
    );
}

/// Runs a review session over stdin until every due card is passed or the user quits.
fn study(app: &mut App<SqliteRepository>, today: NaiveDate) -> Result<()> {
    let cards = app.get_all_flashcards()?;
    let mut session = ReviewSession::new(&select_due(cards.values(), today));
    if session.is_completed() {
        println!("No cards to review");
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_round = 0;

    while let Some(id) = session.current() {
        if session.round() != last_round {
            last_round = session.round();
            println!("{}", session.phase_message());
        }

        let Some(card) = cards.get(&id) else {
            session.skip_current();
            continue;
        };

        println!("\n{}", card.front);
        prompt("(press Enter to show the answer) ")?;
        if lines.next().transpose()?.is_none() {
            break;
        }
        println!("{}", card.back);

        prompt("How well did you recall this? [0-5, q to quit] ")?;
        let Some(answer) = lines.next().transpose()? else {
            break;
        };
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("q") {
            break;
        }

        match answer.parse::<u8>() {
            Ok(grade) => match session.grade_current(app, grade, today) {
                Ok(Some(reviewed)) => println!("Next review on {}", reviewed.review_date),
                Ok(None) => {}
                Err(tungsten::Error::InvalidGrade(g)) => println!("Grade {g} is not in 0-5"),
                Err(tungsten::Error::NotFound(_)) => session.skip_current(),
                Err(e) => return Err(e.into()),
            },
            Err(_) => println!("Please enter a number from 0 to 5"),
        }
    }

    println!("\nReviewed {} cards", session.reviewed_count());
    Ok(())
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(())
}
