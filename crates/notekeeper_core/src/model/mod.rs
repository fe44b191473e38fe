//! Domain model for notes and their owners.
//!
//! # Invariants
//! - Every note has exactly one author, fixed at creation.
//! - Slugs are the only key accepted in request paths; ids and author ids
//!   are storage keys and reach hosts only inside rendered note context.

pub mod note;
pub mod user;
