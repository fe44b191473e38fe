//! Core domain logic for notekeeper.
//! This crate owns note ownership and slug invariants; hosts only render.

pub mod access;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod web;

pub use access::guard::{AccessGuard, GuardOutcome, DEFAULT_LOGIN_URL};
pub use access::route::{Route, RouteAccess};
pub use config::{ConfigError, NotekeeperConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteDraft, NoteId, NoteValidationError, SLUG_MAX_CHARS};
pub use model::user::{Actor, User, UserId};
pub use repo::note_repo::{NoteChanges, NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::note_service::{
    duplicate_slug_message, NoteService, NoteServiceError, DUPLICATE_SLUG_WARNING,
};
pub use service::slug::slugify;
pub use web::app::NotesApp;
pub use web::http::{Context, Method, NoteForm, Request, Response, Status};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
