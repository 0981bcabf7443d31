use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hibiki_core::config::AppConfig;
use hibiki_core::output::OutputFile;
use hibiki_core::poller::{PollIntervals, Poller};
use hibiki_core::sentinel;
use hibiki_core::title::TitleParser;
use hibiki_detect::{NativeSystem, PlayerDatabase};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hibiki=debug")),
        )
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    let db = load_players();
    let parser = TitleParser::new(&db.title_suffixes());
    let output = OutputFile::new(config.output.file.clone());
    let intervals = PollIntervals {
        search: Duration::from_secs(config.poll.search_interval),
        watch: Duration::from_secs(config.poll.watch_interval),
    };

    output.write(sentinel::WAITING);
    info!(file = %output.path().display(), "Monitoring started");

    for player in db.enabled_players().cloned() {
        let poller = Poller::new(
            player,
            NativeSystem::new(),
            parser.clone(),
            output.clone(),
            intervals,
        );
        tokio::spawn(poller.run());
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }

    info!("Monitoring stopped");
    output.write(sentinel::STOPPED);
}

/// Embedded player database with user overrides merged on top.
fn load_players() -> PlayerDatabase {
    let mut db = PlayerDatabase::embedded();

    let path = AppConfig::players_path();
    if path.exists() {
        let user = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|s| PlayerDatabase::from_toml(&s).map_err(|e| e.to_string()));
        match user {
            Ok(user) => db.merge_user(&user),
            Err(e) => warn!(path = %path.display(), error = %e, "Ignoring invalid players.toml"),
        }
    }

    db
}
