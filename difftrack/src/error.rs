//! this is the error taxonomy the older `libbit` error module sketched and then
//! abandoned in favour of `anyhow` (see its commented-out `BitError` enum). we
//! finish that conversion here: every fallible operation in this crate returns
//! a value drawn from a closed set of variants rather than an opaque boxed error.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open file at `{0}`")]
    InvalidFilePath(PathBuf),

    #[error("a required reference was absent: {0}")]
    NullReference(&'static str),

    #[error("document root at `{0}` could not tokenize: {1}")]
    InvalidSyntax(PathBuf, String),

    #[error("document at `{0}` contained an invalid escape sequence: {1}")]
    InvalidEscape(PathBuf, String),

    #[error("document at `{0}` ended before a value was complete")]
    UnexpectedEndOfInput(PathBuf),

    #[error("document at `{0}` contained a value this crate cannot represent: {1}")]
    InvalidType(PathBuf, String),

    #[error("index {0} is out of bounds for a buffer of length {1}")]
    IndexOutOfBounds(usize, usize),
}

impl Error {
    /// local recovery in the watcher tick (§7) treats a parse failure as
    /// "skip this file, retry next tick" rather than a fatal error.
    pub fn is_recoverable_parse_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidSyntax(..)
                | Error::InvalidEscape(..)
                | Error::UnexpectedEndOfInput(..)
                | Error::InvalidType(..)
        )
    }
}
