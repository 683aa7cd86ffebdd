use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use letter_soup::{GeneratorConfig, PlacementStrategy, Puzzle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate a letter-soup word search from a list of words.
#[derive(Parser, Debug)]
struct Args {
    /// Words to hide in the grid.
    words: Vec<String>,
    /// Grid size; computed from the words when omitted.
    #[arg(long)]
    size: Option<usize>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Try every position for each word instead of a bounded number of random ones.
    #[arg(long, conflicts_with = "max_attempts")]
    exhaustive: bool,
    /// Random trials per word before it is skipped.
    #[arg(long)]
    max_attempts: Option<usize>,
    /// JSON configuration file; command line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the grid and placements as JSON instead of a text preview.
    #[arg(long)]
    json: bool,
    /// Tracing filter, e.g. "info", "debug".
    #[arg(long, default_value = "info")]
    log: String,
}

fn load_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GeneratorConfig::from_json(&text)?
        }
        None => GeneratorConfig::default(),
    };

    if args.size.is_some() {
        config.grid_size = args.size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.exhaustive {
        config.strategy = PlacementStrategy::Exhaustive;
    } else if let Some(max_attempts) = args.max_attempts {
        config.strategy = PlacementStrategy::Randomized { max_attempts };
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&args)?;
    tracing::debug!(?config, "loaded configuration");

    let mut rng = config.rng();
    let puzzle = Puzzle::generate(args.words.as_slice(), &config, &mut rng)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&puzzle)?);
    } else {
        print!("{}", puzzle);
    }

    Ok(())
}
