//! Note domain model.
//!
//! # Invariants
//! - `title` is non-empty and at most [`TITLE_MAX_CHARS`] characters.
//! - `slug` is non-empty, at most [`SLUG_MAX_CHARS`] characters and made of
//!   ASCII letters, digits, `-` and `_`.
//! - `author` is set once by [`Note::new`] and never reassigned by the store.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type NoteId = Uuid;

pub const TITLE_MAX_CHARS: usize = 100;
pub const SLUG_MAX_CHARS: usize = 100;

/// A titled text record owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author: UserId,
}

impl Note {
    pub fn new(
        author: UserId,
        title: impl Into<String>,
        text: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            text: text.into(),
            slug: slug.into(),
            author,
        }
    }

    /// Checks field-level invariants. Uniqueness is a store concern.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_title(&self.title)?;
        validate_slug(&self.slug)
    }
}

/// User-submitted note fields, before slug resolution.
///
/// A blank `slug` means "derive from title".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            slug: slug.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptySlug,
    SlugTooLong { max: usize },
    InvalidSlug(String),
}

impl NoteValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptySlug | Self::SlugTooLong { .. } | Self::InvalidSlug(_) => "slug",
        }
    }
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptySlug => write!(f, "slug must not be empty"),
            Self::SlugTooLong { max } => write!(f, "slug must be at most {max} characters"),
            Self::InvalidSlug(slug) => write!(
                f,
                "slug `{slug}` may only contain latin letters, digits, `-` and `_`"
            ),
        }
    }
}

impl Error for NoteValidationError {}

pub fn validate_title(title: &str) -> Result<(), NoteValidationError> {
    if title.trim().is_empty() {
        return Err(NoteValidationError::EmptyTitle);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(NoteValidationError::TitleTooLong {
            max: TITLE_MAX_CHARS,
        });
    }
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<(), NoteValidationError> {
    if slug.is_empty() {
        return Err(NoteValidationError::EmptySlug);
    }
    if slug.chars().count() > SLUG_MAX_CHARS {
        return Err(NoteValidationError::SlugTooLong {
            max: SLUG_MAX_CHARS,
        });
    }
    if !slug
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Err(NoteValidationError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_slug, validate_title, Note, NoteValidationError, SLUG_MAX_CHARS};
    use uuid::Uuid;

    #[test]
    fn note_with_title_and_slug_is_valid() {
        let note = Note::new(Uuid::new_v4(), "Заголовок", "", "Test");
        note.validate().expect("note should be valid");
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(validate_title(" \n"), Err(NoteValidationError::EmptyTitle));
    }

    #[test]
    fn slug_longer_than_limit_is_rejected() {
        let slug = "a".repeat(SLUG_MAX_CHARS + 1);
        let err = validate_slug(&slug).unwrap_err();
        assert_eq!(err, NoteValidationError::SlugTooLong { max: SLUG_MAX_CHARS });
        assert_eq!(err.field(), "slug");
    }

    #[test]
    fn slug_with_spaces_or_cyrillic_is_rejected() {
        assert!(matches!(
            validate_slug("two words"),
            Err(NoteValidationError::InvalidSlug(_))
        ));
        assert!(matches!(
            validate_slug("слаг"),
            Err(NoteValidationError::InvalidSlug(_))
        ));
    }
}
