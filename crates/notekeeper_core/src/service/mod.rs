//! Core use-case services.
//!
//! # Responsibility
//! - Turn submitted drafts into persisted notes (slug derivation included).
//! - Keep callers decoupled from storage details.

pub mod note_service;
pub mod slug;
