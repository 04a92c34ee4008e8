//! Application-wide session state.
//!
//! Holds the signed-in user, mirrors it into the local cache, and notifies
//! subscribers when it changes.

mod store;

pub use store::*;

use thiserror::Error;

use crate::db::DbError;

/// Session errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for SessionError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        SessionError::LockPoisoned(e.to_string())
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
