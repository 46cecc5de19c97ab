//! Monte Carlo Swiss-tournament simulator.
//!
//! Repeatedly simulates a multi-round Swiss tournament among rated players
//! and aggregates per-player statistics (mean score, placement variance,
//! win streaks) plus tournament-wide accuracy metrics (how often the top
//! rated player wins, how well the standings predict a top-8 cut). Useful
//! for validating pairing systems and rating models before running them on
//! real events.

pub mod pairing;
pub mod probability;
pub mod report;
pub mod resolver;
pub mod simulation;
pub mod stats;
pub mod types;

pub use pairing::create_pairings;
pub use probability::win_probability;
pub use report::render_report;
pub use resolver::resolve_match;
pub use simulation::{generate_players, run_round, run_simulation, SimulationReport};
pub use stats::{PlayerSummary, SimulationStats, TournamentSummary};
pub use types::{
    ConfigError, Distribution, MatchFormat, MatchOutcome, Pairing, Player, PlayerConfig,
    RatingSystem, SimulationConfig, TournamentConfig,
};
