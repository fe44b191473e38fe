//! Note use-case service.
//!
//! # Responsibility
//! - Provide author-scoped create/list/get/update/delete for notes.
//! - Derive a slug from the title when the submitted slug is blank.
//! - Collapse "missing" and "owned by someone else" into one `NotFound`.
//!
//! # Invariants
//! - Every call takes the acting user explicitly; there is no ambient user.
//! - A failed write leaves the store unchanged.

use crate::model::note::{Note, NoteDraft, NoteValidationError};
use crate::model::user::User;
use crate::repo::note_repo::{NoteChanges, NoteRepository};
use crate::repo::RepoError;
use crate::service::slug::slugify;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Suffix appended to a conflicting slug in the form-level error message.
pub const DUPLICATE_SLUG_WARNING: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Submitted fields break a note invariant.
    Validation(NoteValidationError),
    /// Another note already uses this slug.
    DuplicateSlug(String),
    /// No note with this slug is visible to the acting user.
    NotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl NoteServiceError {
    /// Form field and message for errors a user can fix by resubmitting.
    pub fn field_error(&self) -> Option<(&'static str, String)> {
        match self {
            Self::DuplicateSlug(slug) => Some(("slug", duplicate_slug_message(slug))),
            Self::Validation(err) => Some((err.field(), err.to_string())),
            _ => None,
        }
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateSlug(slug) => write!(f, "{}", duplicate_slug_message(slug)),
            Self::NotFound(slug) => write!(f, "note not found: {slug}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::DuplicateSlug(slug) => Self::DuplicateSlug(slug),
            RepoError::NotFound(slug) => Self::NotFound(slug),
            other => Self::Repo(other),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Message shown on the `slug` field when the slug is already taken.
pub fn duplicate_slug_message(slug: &str) -> String {
    format!("{slug}{DUPLICATE_SLUG_WARNING}")
}

/// Returns the submitted slug, or one derived from `title` when blank.
pub fn resolve_slug(title: &str, slug: &str) -> String {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        slugify(title)
    } else {
        trimmed.to_string()
    }
}

/// Strips surrounding whitespace from every submitted field.
pub fn clean_draft(draft: &NoteDraft) -> NoteDraft {
    NoteDraft::new(draft.title.trim(), draft.text.trim(), draft.slug.trim())
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note owned by `author`.
    pub fn create(&mut self, author: &User, draft: &NoteDraft) -> Result<Note, NoteServiceError> {
        let draft = clean_draft(draft);
        let slug = resolve_slug(&draft.title, &draft.slug);
        let note = Note::new(author.id, draft.title.as_str(), draft.text.as_str(), slug);

        match self.repo.create_note(&note) {
            Ok(_) => {
                info!(
                    "event=note_create module=service status=ok note_id={} slug={}",
                    note.id, note.slug
                );
            }
            Err(err) => {
                warn!(
                    "event=note_create module=service status=error slug={} error={}",
                    note.slug, err
                );
                return Err(err.into());
            }
        }

        self.repo
            .get_note_for(author.id, &note.slug)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Lists exactly the notes authored by `user`.
    pub fn list_for(&self, user: &User) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.repo.list_notes_for(user.id)?)
    }

    /// Gets the note addressed by `slug` if `user` authored it.
    pub fn get_by_slug_for(&self, user: &User, slug: &str) -> Result<Note, NoteServiceError> {
        self.repo
            .get_note_for(user.id, slug)?
            .ok_or_else(|| NoteServiceError::NotFound(slug.to_string()))
    }

    /// Replaces title/text/slug of the user's note addressed by `slug`.
    ///
    /// A blank slug in `draft` is derived from the new title.
    pub fn update(
        &mut self,
        user: &User,
        slug: &str,
        draft: &NoteDraft,
    ) -> Result<Note, NoteServiceError> {
        let draft = clean_draft(draft);
        let new_slug = resolve_slug(&draft.title, &draft.slug);
        let changes = NoteChanges {
            title: &draft.title,
            text: &draft.text,
            slug: &new_slug,
        };

        match self.repo.update_note_for(user.id, slug, changes) {
            Ok(note) => {
                info!(
                    "event=note_update module=service status=ok note_id={} slug={}",
                    note.id, note.slug
                );
                Ok(note)
            }
            Err(err) => {
                warn!(
                    "event=note_update module=service status=error slug={} error={}",
                    slug, err
                );
                Err(err.into())
            }
        }
    }

    /// Deletes the user's note addressed by `slug`.
    pub fn delete(&mut self, user: &User, slug: &str) -> Result<(), NoteServiceError> {
        self.repo.delete_note_for(user.id, slug)?;
        info!("event=note_delete module=service status=ok slug={slug}");
        Ok(())
    }

    /// Total number of notes in the store, across all authors.
    pub fn count(&self) -> Result<u64, NoteServiceError> {
        Ok(self.repo.count_notes()?)
    }
}
