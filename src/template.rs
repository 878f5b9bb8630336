use chrono::{Local, NaiveDateTime};

use crate::fonts;
use crate::models::LeaderboardTable;
use crate::stats::METRICS;

/// Placeholder replaced with the render time.
pub const DATE_NOW: &str = "<<DATE-NOW>>";

/// Ranks exposed to templates as `<<TOP1-...>>` through `<<TOP3-...>>`.
const PODIUM: usize = 3;

const MISSING_ENTRY: &str = "None";

pub fn leaderboard_token(rank: usize, metric: &str) -> String {
    format!("<<TOP{rank}-{metric}>>")
}

/// Fills every `<<TOPn-METRIC>>` token with the ranked user's name, or `None`
/// when the board has fewer than `n` entries.
pub fn substitute_leaderboard(template: &str, leaderboard: &LeaderboardTable) -> String {
    let mut rendered = template.to_string();

    for metric in METRICS {
        let entries = leaderboard.get(metric).map(Vec::as_slice).unwrap_or_default();
        for position in 0..PODIUM {
            let token = leaderboard_token(position + 1, metric);
            if !rendered.contains(&token) {
                continue;
            }
            let user = entries
                .get(position)
                .map_or(MISSING_ENTRY, |entry| entry.user.as_str());
            rendered = rendered.replace(&token, user);
        }
    }

    rendered
}

pub fn substitute_timestamp(template: &str, now: NaiveDateTime) -> String {
    let stamp = now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
    template.replace(DATE_NOW, &stamp)
}

/// Renders `template` with `now` as the timestamp.
///
/// Leaderboard tokens are filled first, then the timestamp, and style spans
/// are expanded last so names and dates can sit inside them.
pub fn render_at(template: &str, leaderboard: &LeaderboardTable, now: NaiveDateTime) -> String {
    let rendered = substitute_leaderboard(template, leaderboard);
    let rendered = substitute_timestamp(&rendered, now);
    fonts::expand_fonts(&rendered)
}

pub fn render(template: &str, leaderboard: &LeaderboardTable) -> String {
    render_at(template, leaderboard, Local::now().naive_local())
}
