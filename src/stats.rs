use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::types::Player;

/// Size of the cut compared against the top rated players, capped at the
/// field size
const TOP_CUT: usize = 8;

/// Running per-player aggregates across iterations
#[derive(Clone, Debug)]
struct PlayerStats {
    id: String,
    rating: f64,
    total_wins: u32,
    total_losses: u32,
    total_draws: u32,
    win_streak: u32,
    max_win_streak: u32,
    /// One score per recorded iteration, in iteration order
    scores: Vec<f64>,
    /// One 1-based placement per recorded iteration
    placements: Vec<u32>,
}

impl PlayerStats {
    fn new(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            rating: player.rating,
            total_wins: 0,
            total_losses: 0,
            total_draws: 0,
            win_streak: 0,
            max_win_streak: 0,
            scores: Vec::new(),
            placements: Vec::new(),
        }
    }
}

/// Per-player summary over a whole run, ordered by mean score when
/// returned from [`SimulationStats::overall_results`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub id: String,
    pub rating: f64,
    pub mean_score: f64,
    pub score_variance: f64,
    pub mean_placement: f64,
    pub placement_variance: f64,
    pub max_win_streak: u32,
}

/// Tournament-wide accuracy metrics over a whole run
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub iterations: u32,
    /// Fraction of iterations the highest-rated player finished first
    pub top_player_win_rate: f64,
    /// Mean overlap between the top rated and top placed players
    pub top_cut_accuracy: f64,
}

/// Accumulates statistics across independent tournament iterations.
///
/// Constructed once per run from the initial roster; the driver feeds it a
/// read-only counter snapshot at every iteration boundary.
pub struct SimulationStats {
    iterations: u32,
    /// Stats slot per player, in roster order
    players: Vec<PlayerStats>,
    /// Roster index per id, for snapshot lookup
    index: HashMap<String, usize>,
    /// Roster indices sorted by rating descending (stable)
    rating_order: Vec<usize>,
    top_player_wins: u32,
    top_cut_overlap: f64,
}

impl SimulationStats {
    pub fn new(roster: &[Player], iterations: u32) -> Self {
        let players: Vec<PlayerStats> = roster.iter().map(PlayerStats::new).collect();
        let index = roster
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        let mut rating_order: Vec<usize> = (0..roster.len()).collect();
        rating_order.sort_by(|&i, &j| {
            roster[j]
                .rating
                .partial_cmp(&roster[i].rating)
                .unwrap_or(Ordering::Equal)
        });

        Self {
            iterations,
            players,
            index,
            rating_order,
            top_player_wins: 0,
            top_cut_overlap: 0.0,
        }
    }

    /// Fold one finished iteration into the running aggregates.
    ///
    /// `snapshot` carries the final counters of every player. Placements
    /// come from a stable score-descending sort, so snapshot order breaks
    /// ties, including for the "top player also placed first" counter.
    pub fn record_iteration_results(&mut self, snapshot: &[Player]) {
        let standings = Self::standings(snapshot);

        let mut placement_of = vec![0u32; snapshot.len()];
        for (rank, &idx) in standings.iter().enumerate() {
            placement_of[idx] = rank as u32 + 1;
        }

        for (idx, player) in snapshot.iter().enumerate() {
            // An unknown id means the driver handed us a foreign roster
            let slot = self.index[player.id.as_str()];
            let stats = &mut self.players[slot];

            stats.total_wins += player.wins;
            stats.total_losses += player.losses;
            stats.total_draws += player.draws;
            stats.scores.push(player.score());
            stats.placements.push(placement_of[idx]);

            // Streaks are iteration-granular: any winless iteration resets
            if player.wins > 0 {
                stats.win_streak += player.wins;
                stats.max_win_streak = stats.max_win_streak.max(stats.win_streak);
            } else {
                stats.win_streak = 0;
            }
        }

        self.record_accuracy(snapshot, &standings);
    }

    /// Score-descending standings as snapshot indices, stable on ties
    fn standings(snapshot: &[Player]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..snapshot.len()).collect();
        order.sort_by(|&i, &j| {
            snapshot[j]
                .score()
                .partial_cmp(&snapshot[i].score())
                .unwrap_or(Ordering::Equal)
        });
        order
    }

    fn record_accuracy(&mut self, snapshot: &[Player], standings: &[usize]) {
        let Some(&top_placed) = standings.first() else {
            return;
        };
        let top_rated = self.rating_order[0];
        if self.players[top_rated].id == snapshot[top_placed].id {
            self.top_player_wins += 1;
        }

        let top_n = TOP_CUT.min(snapshot.len());
        let rated_cut: HashSet<&str> = self.rating_order[..top_n]
            .iter()
            .map(|&i| self.players[i].id.as_str())
            .collect();
        let overlap = standings[..top_n]
            .iter()
            .filter(|&&i| rated_cut.contains(snapshot[i].id.as_str()))
            .count();
        self.top_cut_overlap += overlap as f64 / top_n as f64;
    }

    /// Per-player summaries ordered by mean score descending.
    ///
    /// Every metric with a zero denominator (no iterations recorded, or a
    /// player with zero games) reports 0 rather than NaN.
    pub fn overall_results(&self) -> Vec<PlayerSummary> {
        let mut results: Vec<PlayerSummary> = self
            .players
            .iter()
            .map(|stats| {
                let total_games = stats.total_wins + stats.total_losses + stats.total_draws;
                let mean_score = if self.iterations > 0 {
                    stats.scores.iter().sum::<f64>() / self.iterations as f64
                } else {
                    0.0
                };
                let placements: Vec<f64> =
                    stats.placements.iter().map(|&p| p as f64).collect();
                let (score_variance, mean_placement, placement_variance) = if total_games > 0 {
                    let mean_placement = mean(&placements);
                    (
                        variance(&stats.scores, mean_score),
                        mean_placement,
                        variance(&placements, mean_placement),
                    )
                } else {
                    (0.0, 0.0, 0.0)
                };

                PlayerSummary {
                    id: stats.id.clone(),
                    rating: stats.rating,
                    mean_score,
                    score_variance,
                    mean_placement,
                    placement_variance,
                    max_win_streak: stats.max_win_streak,
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.mean_score
                .partial_cmp(&a.mean_score)
                .unwrap_or(Ordering::Equal)
        });
        results
    }

    /// Tournament-wide accuracy, averaged over the recorded iterations
    pub fn tournament_summary(&self) -> TournamentSummary {
        let (top_player_win_rate, top_cut_accuracy) = if self.iterations > 0 {
            (
                self.top_player_wins as f64 / self.iterations as f64,
                self.top_cut_overlap / self.iterations as f64,
            )
        } else {
            (0.0, 0.0)
        };
        TournamentSummary {
            iterations: self.iterations,
            top_player_win_rate,
            top_cut_accuracy,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance: mean of squared deviations
fn variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}
