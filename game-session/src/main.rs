use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::info;

use game_core::{GuessOutcome, WordSource};
use game_persistence::{
    ChangeFeed,
    connection::connect_and_migrate,
    repositories::{GameRepository, RankingRepository, SeriesRepository, UserRepository},
};
use game_session::{Config, Session, SessionContext, share};
use game_types::{GameStatus, LetterVerdict, MAX_TURNS};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Word Fill session...");

    let config = Config::new();

    let words = match &config.words_file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(list) => WordSource::from_word_list(&list),
            Err(e) => {
                tracing::error!("Failed to read word list '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => WordSource::embedded(),
    };
    if words.is_empty() {
        tracing::error!("Word list is empty.");
        tracing::error!("Set WORDS_FILE to a file with one five-letter word per line.");
        std::process::exit(1);
    }
    info!("Loaded {} words", words.len());

    let db = match connect_and_migrate().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    let feed = ChangeFeed::default();
    let user_id = std::env::var("PLAYER_UID").unwrap_or_else(|_| "local-player".to_string());
    let username = std::env::var("PLAYER_NAME").unwrap_or_else(|_| "Local Player".to_string());

    let session = Session::new(SessionContext {
        user_id,
        users: UserRepository::new(db.clone()),
        games: GameRepository::new(db.clone(), feed.clone()),
        series: SeriesRepository::new(db.clone(), feed.clone()),
        rankings: RankingRepository::new(db, feed.clone()),
        feed,
        words: Arc::new(words),
        config,
    });

    let profile = match session.ensure_profile(&username).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Failed to load profile: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Signed in as {} ({} tier, {} points)",
        profile.username, profile.tier, profile.score
    );

    let mut game = match session.new_game() {
        Ok(game) => game,
        Err(e) => {
            tracing::error!("Failed to start a game: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Guess the 5-letter word. You have {} turns. Type 'quit' to give up.",
        MAX_TURNS
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = stdin.lock().lines().next() else {
            break;
        };
        let input = line.trim().to_string();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") {
            println!("The word was '{}'.", game.secret());
            break;
        }

        match session.submit_guess(&mut game, &input).await {
            GuessOutcome::Rejected(err) => println!("{}", err),
            GuessOutcome::Accepted { verdicts } => {
                println!(
                    "{}  ({}/{})",
                    render_row(&verdicts),
                    game.turns_used(),
                    MAX_TURNS
                );
            }
            GuessOutcome::Completed {
                verdicts,
                record,
                stats,
            } => {
                println!(
                    "{}  ({}/{})",
                    render_row(&verdicts),
                    game.turns_used(),
                    MAX_TURNS
                );
                match record.status {
                    GameStatus::Won => println!("Solved in {} turns!", stats.turns_used),
                    _ => println!("Out of turns. The word was '{}'.", game.secret()),
                }
                if let Ok(Some(profile)) = session.profile().await {
                    println!("{} points, {} tier", profile.score, profile.tier);
                }
                println!("\n{}", share::share_message(&game, "https://wordfill.example"));
                break;
            }
        }
    }

    info!("Session finished.");
}

fn render_row(verdicts: &[LetterVerdict]) -> String {
    verdicts
        .iter()
        .map(|verdict| match verdict {
            LetterVerdict::Correct => "🟩",
            LetterVerdict::Present => "🟨",
            LetterVerdict::Absent => "⬛",
        })
        .collect()
}
