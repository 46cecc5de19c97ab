use rand::Rng;

use crate::probability::win_probability;
use crate::types::{MatchFormat, MatchOutcome, Pairing, Player, SimulationConfig};

/// Outcome of one game inside a match, relative to the pairing's first player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GameResult {
    WinA,
    WinB,
    Draw,
}

/// Draw chance for a specific matchup. Even games keep the full configured
/// probability; the chance falls off linearly and reaches zero for a
/// completely one-sided game.
fn adjusted_draw_probability(draw_probability: f64, p_win: f64) -> f64 {
    draw_probability * (1.0 - (p_win - 0.5).abs() * 2.0)
}

/// Sample one game. The unit interval is split into a win zone for the
/// first player, a draw zone, and the remainder for the second player.
fn play_game(p_win: f64, draw_probability: f64, rng: &mut impl Rng) -> GameResult {
    // Forced-draw configurations skip sampling entirely
    if draw_probability == 1.0 {
        return GameResult::Draw;
    }

    let adjusted = adjusted_draw_probability(draw_probability, p_win);
    let win_zone = p_win * (1.0 - adjusted);
    let r: f64 = rng.gen();

    if r < win_zone {
        GameResult::WinA
    } else if r < win_zone + adjusted {
        GameResult::Draw
    } else {
        GameResult::WinB
    }
}

/// Resolve one full match between the two players of `pairing`.
///
/// Pure apart from the injected rng: counters are never touched here, the
/// round runner applies the returned outcome exactly once per match.
/// Best-of-three always plays all three games; a side with two game wins
/// takes the match, an undecided set is a draw under `Bo3` and a fair coin
/// flip under `Bo3NoDraws`.
pub fn resolve_match(
    roster: &[Player],
    pairing: Pairing,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> MatchOutcome {
    let (a, b) = pairing;
    let p_win = win_probability(roster[a].rating, roster[b].rating, config.rating_system);

    match config.format {
        MatchFormat::Bo1 => match play_game(p_win, config.draw_probability, rng) {
            GameResult::WinA => MatchOutcome::Win { winner: a, loser: b },
            GameResult::WinB => MatchOutcome::Win { winner: b, loser: a },
            GameResult::Draw => MatchOutcome::Draw,
        },
        MatchFormat::Bo3 | MatchFormat::Bo3NoDraws => {
            let mut wins_a = 0;
            let mut wins_b = 0;
            // No early stop at 2-0; drawn games count for neither side
            for _ in 0..3 {
                match play_game(p_win, config.draw_probability, rng) {
                    GameResult::WinA => wins_a += 1,
                    GameResult::WinB => wins_b += 1,
                    GameResult::Draw => {}
                }
            }

            if wins_a >= 2 {
                MatchOutcome::Win { winner: a, loser: b }
            } else if wins_b >= 2 {
                MatchOutcome::Win { winner: b, loser: a }
            } else if config.format == MatchFormat::Bo3NoDraws {
                // Undecided set: settle with a fair coin flip
                if rng.gen_bool(0.5) {
                    MatchOutcome::Win { winner: a, loser: b }
                } else {
                    MatchOutcome::Win { winner: b, loser: a }
                }
            } else {
                MatchOutcome::Draw
            }
        }
    }
}
