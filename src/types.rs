use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A rated competitor in the simulated field
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier, stable across iterations
    pub id: String,
    /// Rating is fixed for the whole run; only counters change
    pub rating: f64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Player {
    pub fn new(id: impl Into<String>, rating: f64) -> Self {
        Self {
            id: id.into(),
            rating,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    /// Swiss score for the current iteration: one point per win, half per draw
    pub fn score(&self) -> f64 {
        self.wins as f64 + 0.5 * self.draws as f64
    }

    /// Clear per-iteration counters before a fresh tournament
    pub fn reset_counters(&mut self) {
        self.wins = 0;
        self.losses = 0;
        self.draws = 0;
    }
}

/// Two roster indices meeting in one round. Within a round every player
/// appears in at most one pairing; an odd field leaves one index out.
pub type Pairing = (usize, usize);

/// Definitive result of one match. Indices refer to the roster slice the
/// resolver was given. Exactly one of "decided" or "drawn" holds by
/// construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win { winner: usize, loser: usize },
    Draw,
}

/// Match formats recognized by the simulator.
///
/// The set is closed: unknown tags are rejected when configuration is
/// built, never silently mapped to a default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatchFormat {
    /// Single game decides the match
    Bo1,
    /// Three games, most wins takes it; an undecided set is a drawn match
    Bo3,
    /// Three games, undecided sets settled by a fair coin flip
    #[serde(alias = "bo3-no-tiebreak", alias = "bo3-double-loss")]
    #[value(alias = "bo3-no-tiebreak", alias = "bo3-double-loss")]
    Bo3NoDraws,
}

impl FromStr for MatchFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bo1" => Ok(MatchFormat::Bo1),
            "bo3" => Ok(MatchFormat::Bo3),
            // Older configs used a few spellings for the coin-flip variant
            "bo3-no-draws" | "bo3-no-tiebreak" | "bo3-double-loss" => Ok(MatchFormat::Bo3NoDraws),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

/// Which rating-difference model converts ratings to win probability
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RatingSystem {
    Elo,
    Trueskill,
}

impl FromStr for RatingSystem {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "elo" => Ok(RatingSystem::Elo),
            "trueskill" => Ok(RatingSystem::Trueskill),
            other => Err(ConfigError::UnknownRatingSystem(other.to_string())),
        }
    }
}

/// How the player factory spreads ratings across the configured range
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Evenly spaced, both endpoints included
    Linear,
    /// Gaussian around the range midpoint, clamped into range
    Normal,
}

impl FromStr for Distribution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Distribution::Linear),
            "normal" => Ok(Distribution::Normal),
            other => Err(ConfigError::UnknownDistribution(other.to_string())),
        }
    }
}

/// Player-pool parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub count: usize,
    pub distribution: Distribution,
    pub min_rating: f64,
    pub max_rating: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            count: 100,
            distribution: Distribution::Linear,
            min_rating: 1000.0,
            max_rating: 2000.0,
        }
    }
}

/// Parameters for one Monte Carlo study
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub format: MatchFormat,
    /// Independent tournaments to simulate
    pub iterations: u32,
    /// Swiss rounds per tournament
    pub rounds: u32,
    /// Log per-iteration progress
    pub show_progress: bool,
    /// Base probability of a drawn game between even opponents
    pub draw_probability: f64,
    pub rating_system: RatingSystem,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            format: MatchFormat::Bo1,
            iterations: 100,
            rounds: 7,
            show_progress: false,
            draw_probability: 0.1,
            rating_system: RatingSystem::Elo,
        }
    }
}

/// Full run configuration: player pool plus simulation parameters
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub players: PlayerConfig,
    pub simulation: SimulationConfig,
}

impl TournamentConfig {
    /// Check the invariants the simulation core assumes on entry.
    /// Everything downstream trusts a validated config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.count < 2 {
            return Err(ConfigError::TooFewPlayers(self.players.count));
        }
        if self.players.min_rating >= self.players.max_rating {
            return Err(ConfigError::InvalidRatingRange {
                min: self.players.min_rating,
                max: self.players.max_rating,
            });
        }
        if self.simulation.iterations < 1 {
            return Err(ConfigError::NoIterations);
        }
        if !(0.0..=1.0).contains(&self.simulation.draw_probability) {
            return Err(ConfigError::DrawProbabilityOutOfRange(
                self.simulation.draw_probability,
            ));
        }
        if self.players.distribution == Distribution::Normal
            && self.players.max_rating - self.players.min_rating < 400.0
        {
            return Err(ConfigError::RatingRangeTooNarrow(
                self.players.max_rating - self.players.min_rating,
            ));
        }
        Ok(())
    }
}

/// Configuration rejected before any simulation runs
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("at least 2 players are required (got {0})")]
    TooFewPlayers(usize),
    #[error("min rating {min} must be below max rating {max}")]
    InvalidRatingRange { min: f64, max: f64 },
    #[error("at least 1 iteration is required")]
    NoIterations,
    #[error("draw probability {0} is outside [0, 1]")]
    DrawProbabilityOutOfRange(f64),
    #[error("normal distribution needs a rating range of at least 400 (got {0})")]
    RatingRangeTooNarrow(f64),
    #[error("unknown match format `{0}`")]
    UnknownFormat(String),
    #[error("unknown rating system `{0}`")]
    UnknownRatingSystem(String),
    #[error("unknown rating distribution `{0}`")]
    UnknownDistribution(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(TournamentConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_too_few_players() {
        let mut config = TournamentConfig::default();
        config.players.count = 1;
        assert_eq!(config.validate(), Err(ConfigError::TooFewPlayers(1)));
    }

    #[test]
    fn rejects_inverted_rating_range() {
        let mut config = TournamentConfig::default();
        config.players.min_rating = 2000.0;
        config.players.max_rating = 1000.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRatingRange { .. })
        ));
    }

    #[test]
    fn rejects_zero_iterations() {
        let mut config = TournamentConfig::default();
        config.simulation.iterations = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoIterations));
    }

    #[test]
    fn rejects_out_of_range_draw_probability() {
        let mut config = TournamentConfig::default();
        config.simulation.draw_probability = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::DrawProbabilityOutOfRange(1.5))
        );
    }

    #[test]
    fn normal_distribution_needs_wide_range() {
        let mut config = TournamentConfig::default();
        config.players.distribution = Distribution::Normal;
        config.players.min_rating = 1000.0;
        config.players.max_rating = 1300.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::RatingRangeTooNarrow(300.0))
        );
    }

    #[test]
    fn parses_known_formats() {
        assert_eq!("bo1".parse::<MatchFormat>(), Ok(MatchFormat::Bo1));
        assert_eq!("bo3".parse::<MatchFormat>(), Ok(MatchFormat::Bo3));
        assert_eq!(
            "bo3-no-draws".parse::<MatchFormat>(),
            Ok(MatchFormat::Bo3NoDraws)
        );
    }

    #[test]
    fn legacy_format_spellings_map_to_coin_flip_variant() {
        assert_eq!(
            "bo3-no-tiebreak".parse::<MatchFormat>(),
            Ok(MatchFormat::Bo3NoDraws)
        );
        assert_eq!(
            "bo3-double-loss".parse::<MatchFormat>(),
            Ok(MatchFormat::Bo3NoDraws)
        );
    }

    #[test]
    fn rejects_unknown_format() {
        assert_eq!(
            "bo5".parse::<MatchFormat>(),
            Err(ConfigError::UnknownFormat("bo5".to_string()))
        );
    }

    #[test]
    fn score_counts_draws_as_half() {
        let mut player = Player::new("player-1", 1500.0);
        player.wins = 3;
        player.draws = 1;
        assert_eq!(player.score(), 3.5);
    }

    #[test]
    fn reset_clears_all_counters() {
        let mut player = Player::new("player-1", 1500.0);
        player.wins = 2;
        player.losses = 1;
        player.draws = 4;
        player.reset_counters();
        assert_eq!((player.wins, player.losses, player.draws), (0, 0, 0));
    }
}
