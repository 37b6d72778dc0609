//! Error taxonomy for the tracker library.
//!
//! Every variant is terminal for the current invocation: nothing here is
//! retried internally. The binary prints the message as a single `mbta:` line
//! on stderr and exits non-zero.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The feed flagged the request itself as bad (`shouldRetry="false"`).
    #[error("feed rejected the request: {0}")]
    FeedRejected(String),

    /// The feed flagged a transient server condition. Retrying a few seconds
    /// later usually works; no retry happens here.
    #[error("feed temporarily unavailable: {0} (try again in a few seconds)")]
    FeedUnavailable(String),

    #[error("unknown alias '{0}'")]
    UnknownAlias(String),

    /// An alias chain exceeded the resolution depth bound.
    #[error("alias '{0}' expands too deeply (do your aliases form a cycle?)")]
    AliasLoop(String),

    #[error("{0}")]
    BadUsage(String),

    #[error("faves file {path:?}: {source}")]
    Persistence { path: PathBuf, source: io::Error },

    /// A response that parsed but is missing the structure we rely on.
    #[error("malformed feed response: {0}")]
    Malformed(String),

    #[error("unreadable feed response: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("unreadable feed response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
