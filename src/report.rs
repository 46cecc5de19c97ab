use std::fmt::Write;

use crate::simulation::SimulationReport;

/// Render the run summary as the classic box-drawing console table,
/// followed by the tournament-wide accuracy figures.
pub fn render_report(report: &SimulationReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\nOverall Performance Summary:");
    let _ = writeln!(
        out,
        "┌───────────┬──────────┬──────────────┬──────────────┬──────────────┬──────────────┬──────────────┐"
    );
    let _ = writeln!(
        out,
        "│ Player ID │ Rating   │ Mean Score   │ Score Var    │ Mean Place   │ Place Var    │ Max Streak   │"
    );
    let _ = writeln!(
        out,
        "├───────────┼──────────┼──────────────┼──────────────┼──────────────┼──────────────┼──────────────┤"
    );
    for player in &report.standings {
        let _ = writeln!(
            out,
            "│ {:<9} │ {:<8} │ {:>12.2} │ {:>12.2} │ {:>12.1} │ {:>12.1} │ {:>12} │",
            player.id,
            player.rating,
            player.mean_score,
            player.score_variance,
            player.mean_placement,
            player.placement_variance,
            player.max_win_streak,
        );
    }
    let _ = writeln!(
        out,
        "└───────────┴──────────┴──────────────┴──────────────┴──────────────┴──────────────┴──────────────┘"
    );

    let _ = writeln!(out, "\nTournament Statistics:");
    let _ = writeln!(
        out,
        "Top Player Win Rate: {:.1}%",
        report.tournament.top_player_win_rate * 100.0
    );
    let _ = writeln!(
        out,
        "Average Top 8 Accuracy: {:.1}%",
        report.tournament.top_cut_accuracy * 100.0
    );

    let seconds = report.elapsed_ms / 1000;
    let millis = report.elapsed_ms % 1000;
    let _ = writeln!(out, "\nSimulation completed in {}.{:03} seconds", seconds, millis);

    out
}
