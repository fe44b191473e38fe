//! Framework-agnostic request boundary.
//!
//! # Responsibility
//! - Resolve a path to a route, run the access guard, call the note service.
//! - Recover every service error here and translate it into a status.
//!
//! # Invariants
//! - `NotFound` and "owned by someone else" both answer `404`.
//! - Anonymous requests to protected routes never touch the store.

pub mod app;
pub mod http;
