use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swiss_sim::{
    render_report, run_simulation, Distribution, MatchFormat, PlayerConfig, RatingSystem,
    SimulationConfig, TournamentConfig,
};

#[derive(Parser)]
#[command(name = "swiss-sim")]
#[command(about = "Monte Carlo Swiss-tournament simulator for rating-model research")]
#[command(version)]
struct Cli {
    /// Number of players
    #[arg(short = 'p', long, default_value_t = 100)]
    players: usize,

    /// Minimum player rating
    #[arg(long, default_value_t = 1000.0)]
    min_rating: f64,

    /// Maximum player rating
    #[arg(long, default_value_t = 2000.0)]
    max_rating: f64,

    /// Rating distribution
    #[arg(short, long, value_enum, default_value = "linear")]
    distribution: Distribution,

    /// Match format
    #[arg(short, long, value_enum, default_value = "bo1")]
    format: MatchFormat,

    /// Number of simulated tournaments
    #[arg(short, long, default_value_t = 100)]
    iterations: u32,

    /// Rounds per tournament
    #[arg(short, long, default_value_t = 7)]
    rounds: u32,

    /// Probability of a drawn game between even opponents (0-1)
    #[arg(long = "draw", default_value_t = 0.1)]
    draw_probability: f64,

    /// Rating system
    #[arg(long = "rating", value_enum, default_value = "elo")]
    rating_system: RatingSystem,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Log per-iteration progress
    #[arg(long)]
    progress: bool,

    /// Emit the summary as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TournamentConfig {
        players: PlayerConfig {
            count: cli.players,
            distribution: cli.distribution,
            min_rating: cli.min_rating,
            max_rating: cli.max_rating,
        },
        simulation: SimulationConfig {
            format: cli.format,
            iterations: cli.iterations,
            rounds: cli.rounds,
            show_progress: cli.progress,
            draw_probability: cli.draw_probability,
            rating_system: cli.rating_system,
        },
    };
    config.validate()?;

    let report = run_simulation(&config, cli.seed);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}
