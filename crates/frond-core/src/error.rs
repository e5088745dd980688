#![forbid(unsafe_code)]

//! Configuration and lifecycle errors.
//!
//! Most argument validation from the original duck-typed design moves to
//! compile time in Rust (a missing backend or non-function reducer does
//! not type-check). What remains is lifecycle enforcement — `start` and
//! `render` are one-shot — plus residual dynamic checks such as selector
//! parsing in reference backends.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised synchronously during app construction or startup.
///
/// Reducer and subscriber runtime failures are deliberately absent: a
/// panic inside either propagates uncaught out of the triggering
/// `dispatch` call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `start` was called a second time on the same app instance.
    #[error("application already started; start is one-shot per app instance")]
    AlreadyStarted,

    /// `render` was called a second time on the same started app.
    #[error("render target already initialized; render is one-shot")]
    AlreadyRendered,

    /// A dynamically validated argument was malformed.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl ConfigError {
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
