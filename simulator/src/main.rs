use std::path::PathBuf;

use chacun::PlayerColor;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simulator::{play_games, Config, Deck, Recorder};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to a JSON file with the tiles to play with, instead of the built-in ones
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// How many games to play
    #[arg(short, long, default_value_t = 10)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// How many players take part, between 2 and 5
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=5))]
    players: u8,

    /// Record the games' turns as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let deck = match &args.catalog {
        Some(path) => Deck::load(path)?,
        None => Deck::builtin()?,
    };

    let mut config = Config {
        rng: StdRng::seed_from_u64(seed),
        recorder,
        players: PlayerColor::ALL[..usize::from(args.players)].to_vec(),
        deck,
    };
    let total = play_games(&mut config, args.num_games)?;

    let games = args.num_games.max(1) as f32;
    eprintln!(
        "End result after {} games with {} players:\n- {:.1} tiles placed per game\n- {:.1} tiles discarded per game\n- {:.1} occupants placed per game\n- {} forests and {} rivers closed",
        args.num_games,
        args.players,
        total.tiles_placed as f32 / games,
        total.tiles_discarded as f32 / games,
        total.occupants_placed as f32 / games,
        total.closed_forests,
        total.closed_rivers,
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
