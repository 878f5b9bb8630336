use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::models::{FeedTotals, LeaderboardTable};

pub fn build_report(
    window: Option<NaiveDateTime>,
    generated_at: NaiveDateTime,
    totals: &FeedTotals,
    leaderboard: &LeaderboardTable,
    limit: usize,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Hall of Fame Report");
    match window {
        Some(cutoff) => {
            let _ = writeln!(
                output,
                "Generated {} (posts since {})",
                generated_at.format("%Y-%m-%d %H:%M"),
                cutoff.format("%Y-%m-%d")
            );
        }
        None => {
            let _ = writeln!(
                output,
                "Generated {} (all posts)",
                generated_at.format("%Y-%m-%d %H:%M")
            );
        }
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "## Activity");
    let _ = writeln!(output, "- Posts: {}", totals.posts);
    let _ = writeln!(output, "- Comments: {}", totals.comments);
    let _ = writeln!(output, "- Replies: {}", totals.replies);
    let _ = writeln!(output, "- Reactions: {}", totals.reactions);

    for (metric, entries) in leaderboard {
        let _ = writeln!(output);
        let _ = writeln!(output, "## {metric}");

        if entries.is_empty() {
            let _ = writeln!(output, "No entries for this window.");
            continue;
        }
        for (index, entry) in entries.iter().take(limit).enumerate() {
            let _ = writeln!(output, "{}. {} ({})", index + 1, entry.user, entry.count);
        }
    }

    output
}
