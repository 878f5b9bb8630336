use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

use crate::error::{HallOfFameError, Result};
use crate::models::{LeaderboardTable, Post, UserStatsTable};

pub fn parse_posts(json: &str, context: &str) -> Result<Vec<Post>> {
    serde_json::from_str(json).map_err(|source| HallOfFameError::Structural {
        context: context.to_string(),
        source,
    })
}

pub fn load_posts(path: &Path) -> Result<Vec<Post>> {
    let raw = read_text(path)?;
    let posts = parse_posts(&raw, &path.display().to_string())?;
    tracing::debug!(path = %path.display(), posts = posts.len(), "loaded post feed");
    Ok(posts)
}

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| HallOfFameError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| HallOfFameError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn cutoff_datetime(since_days: i64) -> Result<NaiveDateTime> {
    Duration::try_days(since_days.max(1))
        .and_then(|window| Local::now().naive_local().checked_sub_signed(window))
        .ok_or(HallOfFameError::WindowOutOfRange { since_days })
}

/// Accepts the ISO-8601 shapes the scraper emits: naive timestamps, timestamps
/// with an offset, and bare dates.
pub fn parse_feed_date(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Keeps posts dated at or after `cutoff`. Comments and replies stay with
/// their post regardless of their own dates.
pub fn filter_since(posts: Vec<Post>, cutoff: NaiveDateTime) -> Result<Vec<Post>> {
    let total = posts.len();
    let mut kept = Vec::with_capacity(total);

    for post in posts {
        let posted_at =
            parse_feed_date(&post.date).ok_or_else(|| HallOfFameError::InvalidDate {
                post_id: post.post_id.clone(),
                value: post.date.clone(),
            })?;
        if posted_at >= cutoff {
            kept.push(post);
        }
    }

    tracing::debug!(total, kept = kept.len(), %cutoff, "applied date window");
    Ok(kept)
}

pub fn stats_to_json(stats: &UserStatsTable) -> Result<String> {
    serde_json::to_string_pretty(stats).map_err(HallOfFameError::Serialize)
}

pub fn write_leaderboard_csv(path: &Path, leaderboard: &LeaderboardTable) -> Result<usize> {
    #[derive(serde::Serialize)]
    struct CsvRow<'a> {
        metric: &'a str,
        rank: usize,
        user: &'a str,
        count: i64,
    }

    let mut writer = csv::Writer::from_path(path)?;
    let mut written = 0usize;

    for (metric, entries) in leaderboard {
        for (index, entry) in entries.iter().enumerate() {
            writer.serialize(CsvRow {
                metric,
                rank: index + 1,
                user: &entry.user,
                count: entry.count,
            })?;
            written += 1;
        }
    }

    writer.flush().map_err(|source| HallOfFameError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(written)
}
