use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Emoji-style reaction tag as reported by the scraper (`LIKE`, `AHAH`, ...).
///
/// The set is open: any tag is accepted and gets its own `REACTION-<KIND>` metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionKind(pub String);

impl ReactionKind {
    pub fn metric_key(&self) -> String {
        format!("REACTION-{}", self.0.to_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub user: String,
    pub user_id: String,
    pub reaction: ReactionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub comment_id: String,
    pub text: String,
    pub user: String,
    pub user_id: String,
    pub date: String,
    pub reactions: Vec<Reaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: String,
    pub text: String,
    pub user: String,
    pub user_id: String,
    pub date: String,
    pub reactions: Vec<Reaction>,
    pub replies: Vec<Reply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    pub group_id: String,
    pub user: String,
    pub user_id: String,
    pub date: String,
    pub text: String,
    pub comments: Vec<Comment>,
    pub reactions: Vec<Reaction>,
}

/// Per-user metric counters, keyed by metric name in first-touch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserStats {
    metrics: IndexMap<String, i64>,
}

impl UserStats {
    /// Returns the counter for `metric`, inserting zero on first touch.
    pub fn counter_mut(&mut self, metric: &str) -> &mut i64 {
        self.metrics.entry(metric.to_string()).or_insert(0)
    }

    pub fn get(&self, metric: &str) -> Option<i64> {
        self.metrics.get(metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.metrics.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// User display name to stats, in the order users were first seen.
pub type UserStatsTable = IndexMap<String, UserStats>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub user: String,
    pub count: i64,
}

/// Metric name to entries sorted by count, highest first.
pub type LeaderboardTable = IndexMap<String, Vec<RankedEntry>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedTotals {
    pub posts: usize,
    pub comments: usize,
    pub replies: usize,
    pub reactions: usize,
}
