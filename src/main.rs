//! Auto-play demo.
//!
//! Loads `concentration.toml` (or the path given as the first argument),
//! fetches card faces from the character API when credentials are
//! configured and numeric labels otherwise, then plays one game with a
//! random player, printing the table after every update.

use std::fmt::Display;
use std::path::Path;

use concentration::{
    load_engine, AppConfig, GameRng, GameSession, LabelProvider, MarvelClient, MatchEngine, Snapshot,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "concentration.toml";

#[tokio::main]
async fn main() -> concentration::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(std::env::args().nth(1))?;

    match &config.provider {
        Some(provider) => {
            let client = MarvelClient::new(provider.clone())?;
            let engine = load_engine(&client, &config.game).await;
            play(engine).await
        }
        None => {
            let engine = load_engine(&LabelProvider, &config.game).await;
            play(engine).await
        }
    }
}

fn load_config(path: Option<String>) -> concentration::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path),
        None if Path::new(DEFAULT_CONFIG).exists() => AppConfig::from_file(DEFAULT_CONFIG),
        None => {
            info!("No config file, using defaults");
            Ok(AppConfig::default())
        }
    }
}

async fn play<P>(engine: MatchEngine<P>) -> concentration::Result<()>
where
    P: Clone + Display + Send + Sync + 'static,
{
    if engine.deck().is_empty() {
        warn!("Nothing to play: no card faces were loaded");
        return Ok(());
    }

    let session = GameSession::spawn(engine);
    let mut updates = session.updates()?;
    let mut player = GameRng::from_entropy();

    print_table(&session.snapshot());
    pick(&session, &session.snapshot(), &mut player)?;

    while let Some(update) = updates.recv().await {
        println!("{:?}", update.event);
        print_table(&update.snapshot);

        if update.snapshot.is_complete() {
            println!("Done: {} pairs in {} flips", update.snapshot.matched_pairs, update.snapshot.flips);
            break;
        }
        if update.snapshot.accepts_input() {
            pick(&session, &update.snapshot, &mut player)?;
        }
    }

    session.shutdown().await?;
    Ok(())
}

fn pick<P>(session: &GameSession<P>, snapshot: &Snapshot<P>, player: &mut GameRng) -> concentration::Result<()>
where
    P: Clone + Send + Sync + 'static,
{
    match player.choose(&snapshot.selectable()) {
        Some(&index) => session.reveal(index),
        None => Ok(()),
    }
}

fn print_table<P: Clone + Display>(snapshot: &Snapshot<P>) {
    let cells: Vec<String> = snapshot
        .cards
        .iter()
        .map(|card| {
            if card.is_face_up() {
                format!("[{:^6}]", truncate(&card.payload.to_string(), 6))
            } else {
                "[ ???? ]".to_string()
            }
        })
        .collect();

    for row in cells.chunks(4) {
        println!("{}", row.join(" "));
    }
    println!(
        "matched {}/{} | flips {}",
        snapshot.matched_pairs, snapshot.total_pairs, snapshot.flips
    );
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
