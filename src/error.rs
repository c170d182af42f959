//! Error types for the query pipeline and index directory validation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single cscope query.
///
/// The interactive front end collapses every variant into one
/// "cscope query failed" status line; the variants exist for logging and
/// for the non-interactive `find` command.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("error reading query output: {0}")]
    StreamRead(#[source] io::Error),

    #[error("out of memory while buffering query output")]
    OutOfMemory,

    #[error("query produced no output")]
    EmptyResult,

    #[error("no symbol directory set")]
    NoIndexDirectory,
}

/// Why a candidate index directory was rejected.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Please provide absolute path.")]
    NotAbsolute(String),

    #[error("Could not determine home directory")]
    HomeUnavailable,

    #[error("Symbol directory doesn't exist")]
    NotFound(PathBuf),

    #[error("Symbol path is not a directory")]
    NotADirectory(PathBuf),

    #[error("No cscope database found at: {}", .0.display())]
    DatabaseMissing(PathBuf),

    #[error("{} is not a regular file", .0.display())]
    DatabaseNotRegularFile(PathBuf),

    #[error("Unknown error checking {}: {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
