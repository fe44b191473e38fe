//! Repository layer: persistence contracts and SQLite implementations.
//!
//! # Responsibility
//! - Keep SQL inside the core persistence boundary.
//! - Scope every note read and write by the acting author.
//!
//! # Invariants
//! - Write paths validate models before SQL mutations.
//! - A note owned by someone else is reported as `NotFound`, same as a
//!   missing one.

pub mod note_repo;
pub mod user_repo;

use crate::db::{is_unique_violation, DbError};
use crate::model::note::NoteValidationError;
use crate::model::user::UserValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error shared by note and user repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(NoteValidationError),
    UserValidation(UserValidationError),
    Db(DbError),
    /// No note with this slug is visible to the acting author.
    NotFound(String),
    DuplicateSlug(String),
    DuplicateUsername(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UserValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(slug) => write!(f, "note not found: {slug}"),
            Self::DuplicateSlug(slug) => write!(f, "slug already taken: {slug}"),
            Self::DuplicateUsername(name) => write!(f, "username already taken: {name}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::UserValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::UserValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps a failed write to `conflict` when SQLite reports a `UNIQUE` hit.
pub(crate) fn map_unique_violation(err: rusqlite::Error, conflict: RepoError) -> RepoError {
    if is_unique_violation(&err) {
        conflict
    } else {
        RepoError::from(err)
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
