use crate::types::RatingSystem;

/// Fixed beta for the static TrueSkill curve (the reference default, 25/6)
const TRUESKILL_BETA: f64 = 25.0 / 6.0;

/// Probability that the first player beats the second in a single game.
///
/// Elo uses the standard 400-point logistic curve. Trueskill here is the
/// static pairwise formula with a fixed beta, not the full Bayesian update.
/// Equal ratings give exactly 0.5 under both systems.
pub fn win_probability(rating_a: f64, rating_b: f64, system: RatingSystem) -> f64 {
    let diff = rating_a - rating_b;
    match system {
        RatingSystem::Elo => 1.0 / (1.0 + 10f64.powf(-diff / 400.0)),
        RatingSystem::Trueskill => {
            1.0 / (1.0 + (-diff / (2f64.sqrt() * TRUESKILL_BETA)).exp())
        }
    }
}
