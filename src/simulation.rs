use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution as _, Normal};
use serde::Serialize;
use std::time::Instant;
use tracing::info;

use crate::pairing::create_pairings;
use crate::resolver::resolve_match;
use crate::stats::{PlayerSummary, SimulationStats, TournamentSummary};
use crate::types::{
    Distribution, MatchOutcome, Pairing, Player, PlayerConfig, SimulationConfig, TournamentConfig,
};

/// Generate the player pool for a run.
///
/// Linear spacing covers the configured range evenly, both endpoints
/// included. Normal draws center on the range midpoint with a quarter of
/// the range as standard deviation, clamped into range. Either way ratings
/// are rounded to whole points and ids run `player-1` through `player-N`.
pub fn generate_players(config: &PlayerConfig, rng: &mut impl Rng) -> Vec<Player> {
    let mut players = Vec::with_capacity(config.count);

    match config.distribution {
        Distribution::Linear => {
            let step = if config.count > 1 {
                (config.max_rating - config.min_rating) / (config.count - 1) as f64
            } else {
                0.0
            };
            for i in 0..config.count {
                let rating = (config.min_rating + i as f64 * step).round();
                players.push(Player::new(format!("player-{}", i + 1), rating));
            }
        }
        Distribution::Normal => {
            let mean = (config.min_rating + config.max_rating) / 2.0;
            let std_dev = (config.max_rating - config.min_rating) / 4.0;
            let normal = Normal::new(mean, std_dev)
                .unwrap_or_else(|_| Normal::new(mean, 1.0).expect("unit std dev is valid"));
            for i in 0..config.count {
                let rating = normal
                    .sample(rng)
                    .clamp(config.min_rating, config.max_rating)
                    .round();
                players.push(Player::new(format!("player-{}", i + 1), rating));
            }
        }
    }

    players
}

/// Execute one round: pair the field, resolve every pairing, apply the
/// results. Counters are mutated here and nowhere else; each match updates
/// them exactly once.
pub fn run_round(
    players: &mut [Player],
    round_number: u32,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) {
    let pairings = create_pairings(players, round_number, rng);
    for pairing in pairings {
        let outcome = resolve_match(players, pairing, config, rng);
        apply_outcome(players, pairing, outcome);
    }
}

fn apply_outcome(players: &mut [Player], pairing: Pairing, outcome: MatchOutcome) {
    match outcome {
        MatchOutcome::Win { winner, loser } => {
            players[winner].wins += 1;
            players[loser].losses += 1;
        }
        MatchOutcome::Draw => {
            players[pairing.0].draws += 1;
            players[pairing.1].draws += 1;
        }
    }
}

/// Everything a run produces: final standings, accuracy metrics, timing
#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport {
    pub standings: Vec<PlayerSummary>,
    pub tournament: TournamentSummary,
    pub elapsed_ms: u128,
}

/// Run the full Monte Carlo study described by `config`.
///
/// One rng drives the whole run: the roster draw, every shuffle, every
/// game, every coin flip. A fixed `seed` therefore reproduces a run
/// exactly; `None` seeds from entropy.
pub fn run_simulation(config: &TournamentConfig, seed: Option<u64>) -> SimulationReport {
    let start = Instant::now();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut players = generate_players(&config.players, &mut rng);
    let mut stats = SimulationStats::new(&players, config.simulation.iterations);

    for iteration in 0..config.simulation.iterations {
        for player in players.iter_mut() {
            player.reset_counters();
        }
        for round in 1..=config.simulation.rounds {
            run_round(&mut players, round, &config.simulation, &mut rng);
        }
        stats.record_iteration_results(&players);

        if config.simulation.show_progress {
            info!(
                iteration = iteration + 1,
                total = config.simulation.iterations,
                "iteration complete"
            );
        }
    }

    SimulationReport {
        standings: stats.overall_results(),
        tournament: stats.tournament_summary(),
        elapsed_ms: start.elapsed().as_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchFormat;
    use pretty_assertions::assert_eq;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn linear_ratings_are_evenly_spaced() {
        let config = PlayerConfig {
            count: 10,
            distribution: Distribution::Linear,
            min_rating: 1000.0,
            max_rating: 2000.0,
        };
        let players = generate_players(&config, &mut seeded());

        let ratings: Vec<f64> = players.iter().map(|p| p.rating).collect();
        assert_eq!(
            ratings,
            vec![1000.0, 1111.0, 1222.0, 1333.0, 1444.0, 1556.0, 1667.0, 1778.0, 1889.0, 2000.0]
        );
        assert_eq!(players[4].rating, 1444.0);
        assert_eq!(players[0].id, "player-1");
        assert_eq!(players[9].id, "player-10");
    }

    #[test]
    fn normal_ratings_stay_in_range_and_are_whole_points() {
        let config = PlayerConfig {
            count: 200,
            distribution: Distribution::Normal,
            min_rating: 1000.0,
            max_rating: 2000.0,
        };
        let players = generate_players(&config, &mut seeded());

        assert_eq!(players.len(), 200);
        for player in &players {
            assert!((1000.0..=2000.0).contains(&player.rating));
            assert_eq!(player.rating.fract(), 0.0);
        }
    }

    #[test]
    fn even_field_plays_every_round() {
        let mut players = generate_players(
            &PlayerConfig {
                count: 8,
                ..PlayerConfig::default()
            },
            &mut seeded(),
        );
        let config = SimulationConfig::default();
        let mut rng = seeded();

        let rounds = 5;
        for round in 1..=rounds {
            run_round(&mut players, round, &config, &mut rng);
        }

        for player in &players {
            assert_eq!(player.wins + player.losses + player.draws, rounds);
        }
        let total_wins: u32 = players.iter().map(|p| p.wins).sum();
        let total_losses: u32 = players.iter().map(|p| p.losses).sum();
        assert_eq!(total_wins, total_losses);
    }

    #[test]
    fn odd_field_sits_one_player_per_round() {
        let mut players = generate_players(
            &PlayerConfig {
                count: 7,
                ..PlayerConfig::default()
            },
            &mut seeded(),
        );
        let config = SimulationConfig::default();
        let mut rng = seeded();

        let rounds = 3;
        for round in 1..=rounds {
            run_round(&mut players, round, &config, &mut rng);
        }

        // Three pairings per round, so six results per round land somewhere
        let total_results: u32 = players
            .iter()
            .map(|p| p.wins + p.losses + p.draws)
            .sum();
        assert_eq!(total_results, rounds * 6);
        for player in &players {
            assert!(player.wins + player.losses + player.draws <= rounds);
        }
    }

    #[test]
    fn bo3_counts_one_result_per_match() {
        let mut players = generate_players(
            &PlayerConfig {
                count: 4,
                ..PlayerConfig::default()
            },
            &mut seeded(),
        );
        let config = SimulationConfig {
            format: MatchFormat::Bo3,
            ..SimulationConfig::default()
        };
        let mut rng = seeded();

        run_round(&mut players, 1, &config, &mut rng);

        // Sub-games must not leak into the counters
        for player in &players {
            assert_eq!(player.wins + player.losses + player.draws, 1);
        }
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let config = TournamentConfig {
            players: PlayerConfig {
                count: 16,
                ..PlayerConfig::default()
            },
            simulation: SimulationConfig {
                iterations: 5,
                rounds: 4,
                ..SimulationConfig::default()
            },
        };

        let a = run_simulation(&config, Some(99));
        let b = run_simulation(&config, Some(99));
        assert_eq!(a.standings, b.standings);
        assert_eq!(a.tournament, b.tournament);
    }

    #[test]
    fn report_covers_the_whole_roster() {
        let config = TournamentConfig {
            players: PlayerConfig {
                count: 10,
                ..PlayerConfig::default()
            },
            simulation: SimulationConfig {
                iterations: 3,
                rounds: 3,
                ..SimulationConfig::default()
            },
        };

        let report = run_simulation(&config, Some(5));
        assert_eq!(report.standings.len(), 10);
        assert_eq!(report.tournament.iterations, 3);
        // Even field: every player has a result per round per iteration
        for summary in &report.standings {
            assert!(summary.mean_score <= 3.0);
            assert!(summary.mean_placement >= 1.0 && summary.mean_placement <= 10.0);
        }
    }

    #[test]
    fn stronger_field_half_outscores_the_weaker_half() {
        // With a 1000-point spread and enough iterations the rating model
        // should separate the field clearly.
        let config = TournamentConfig {
            players: PlayerConfig {
                count: 8,
                ..PlayerConfig::default()
            },
            simulation: SimulationConfig {
                iterations: 50,
                rounds: 7,
                ..SimulationConfig::default()
            },
        };

        let report = run_simulation(&config, Some(7));
        let top: Vec<&str> = report.standings[..4].iter().map(|s| s.id.as_str()).collect();
        // The four highest rated are player-5..player-8
        let strong = ["player-5", "player-6", "player-7", "player-8"];
        let overlap = top.iter().filter(|id| strong.contains(id)).count();
        assert!(overlap >= 3, "standings {:?}", top);
    }
}
