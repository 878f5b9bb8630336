use crate::models::{
    FeedTotals, LeaderboardTable, Post, RankedEntry, Reaction, UserStats, UserStatsTable,
};

pub const POST_COUNT: &str = "POST-COUNT";
pub const POST_REACTION_COUNT: &str = "POST-REACTION-COUNT";
pub const BEST_POST_REACTION: &str = "BEST-POST-REACTION";
pub const COMMENT_COUNT: &str = "COMMENT-COUNT";
pub const COMMENT_REACTION_COUNT: &str = "COMMENT-REACTION-COUNT";
pub const BEST_COMMENT_REACTION: &str = "BEST-COMMENT-REACTION";
pub const REPLY_COUNT: &str = "REPLY-COUNT";
pub const REPLY_REACTION_COUNT: &str = "REPLY-REACTION-COUNT";
pub const BEST_REPLY_REACTION: &str = "BEST-REPLY-REACTION";
pub const COMMENT_REPLY_COUNT: &str = "COMMENT-REPLY-COUNT";
pub const REACTION_COUNT: &str = "REACTION-COUNT";

/// Metrics that get a leaderboard, in display order.
pub const METRICS: [&str; 18] = [
    POST_COUNT,
    POST_REACTION_COUNT,
    BEST_POST_REACTION,
    COMMENT_COUNT,
    COMMENT_REACTION_COUNT,
    BEST_COMMENT_REACTION,
    REPLY_COUNT,
    REPLY_REACTION_COUNT,
    BEST_REPLY_REACTION,
    COMMENT_REPLY_COUNT,
    REACTION_COUNT,
    "REACTION-AHAH",
    "REACTION-LOVE",
    "REACTION-CARE",
    "REACTION-WOW",
    "REACTION-SAD",
    "REACTION-ANGER",
    "REACTION-LIKE",
];

#[derive(Debug, Default)]
struct StatsBuilder {
    users: UserStatsTable,
}

impl StatsBuilder {
    fn user(&mut self, user: &str) -> &mut UserStats {
        if !self.users.contains_key(user) {
            self.users.insert(user.to_string(), UserStats::default());
        }
        &mut self.users[user]
    }

    fn bump(&mut self, user: &str, metric: &str) {
        *self.user(user).counter_mut(metric) += 1;
    }

    fn raise_best(&mut self, user: &str, metric: &str, candidate: usize) {
        let best = self.user(user).counter_mut(metric);
        *best = (*best).max(candidate as i64);
    }

    /// Credits `credited` with one reaction received and the reacting user with
    /// one reaction given.
    fn record_reaction(&mut self, credited: &str, received_metric: &str, reaction: &Reaction) {
        self.bump(credited, received_metric);
        self.bump(&reaction.user, REACTION_COUNT);
        self.bump(&reaction.user, &reaction.reaction.metric_key());
    }
}

/// Folds the post tree into per-user counters keyed by display name.
///
/// Replies and the reactions they collect are credited to the author of the
/// parent comment rather than to the reply's own author.
pub fn aggregate(posts: &[Post]) -> UserStatsTable {
    let mut stats = StatsBuilder::default();

    for post in posts {
        let post_author = post.user.as_str();
        stats.bump(post_author, POST_COUNT);
        for reaction in &post.reactions {
            stats.record_reaction(post_author, POST_REACTION_COUNT, reaction);
        }
        stats.raise_best(post_author, BEST_POST_REACTION, post.reactions.len());

        for comment in &post.comments {
            let comment_author = comment.user.as_str();
            stats.bump(comment_author, COMMENT_COUNT);
            stats.bump(comment_author, COMMENT_REPLY_COUNT);
            for reaction in &comment.reactions {
                stats.record_reaction(comment_author, COMMENT_REACTION_COUNT, reaction);
            }

            for reply in &comment.replies {
                stats.bump(comment_author, REPLY_COUNT);
                stats.bump(comment_author, COMMENT_REPLY_COUNT);
                for reaction in &reply.reactions {
                    stats.record_reaction(comment_author, REPLY_REACTION_COUNT, reaction);
                }
                stats.raise_best(comment_author, BEST_REPLY_REACTION, reply.reactions.len());
            }

            stats.raise_best(
                comment_author,
                BEST_COMMENT_REACTION,
                comment.reactions.len(),
            );
        }
    }

    tracing::debug!(
        posts = posts.len(),
        users = stats.users.len(),
        "aggregated engagement stats"
    );
    stats.users
}

/// Builds a leaderboard per known metric. Users without a value for a metric
/// are left out of that metric's board; equal counts keep first-seen order.
pub fn rank(user_stats: &UserStatsTable) -> LeaderboardTable {
    let mut leaderboard = LeaderboardTable::new();

    for metric in METRICS {
        let mut entries: Vec<RankedEntry> = user_stats
            .iter()
            .filter_map(|(user, stats)| {
                stats.get(metric).map(|count| RankedEntry {
                    user: user.clone(),
                    count,
                })
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        leaderboard.insert(metric.to_string(), entries);
    }

    tracing::debug!(
        users = user_stats.len(),
        metrics = leaderboard.len(),
        "ranked leaderboards"
    );
    leaderboard
}

pub fn feed_totals(posts: &[Post]) -> FeedTotals {
    let mut totals = FeedTotals::default();

    for post in posts {
        totals.posts += 1;
        totals.reactions += post.reactions.len();
        for comment in &post.comments {
            totals.comments += 1;
            totals.reactions += comment.reactions.len();
            for reply in &comment.replies {
                totals.replies += 1;
                totals.reactions += reply.reactions.len();
            }
        }
    }

    totals
}
