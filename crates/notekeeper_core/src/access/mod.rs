//! Request-level access control.
//!
//! # Responsibility
//! - Name the routes of the notes surface and how they map to paths.
//! - Decide per route whether an actor is let through, redirected to login,
//!   or handed to the owner check.
//!
//! # Invariants
//! - Owner-only routes never answer "forbidden"; a foreign note is reported
//!   as not found by the store lookup.

pub mod guard;
pub mod route;
