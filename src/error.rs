use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HallOfFameError {
    /// A feed record is missing a required field or has the wrong shape.
    #[error("malformed post feed ({context}): {source}")]
    Structural {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("post {post_id} has an unparseable date: {value:?}")]
    InvalidDate { post_id: String, value: String },

    #[error("--since-days {since_days} reaches past the earliest representable date")]
    WindowOutOfRange { since_days: i64 },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HallOfFameError>;
