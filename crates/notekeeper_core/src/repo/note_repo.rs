//! Note repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist notes and enforce store-wide slug uniqueness.
//! - Answer every lookup relative to one author.
//!
//! # Invariants
//! - Every read/update/delete filters on `author_uuid`; callers cannot reach
//!   another author's note through this API.
//! - Slug checks and the write they guard share one immediate transaction;
//!   the `UNIQUE` index catches anything that slips past the check.
//! - `author_uuid` is never part of an `UPDATE`.

use crate::model::note::{Note, NoteId};
use crate::model::user::UserId;
use crate::repo::{map_unique_violation, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const NOTE_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    text,
    slug,
    author_uuid
FROM notes";

/// Field values applied by [`NoteRepository::update_note_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteChanges<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub slug: &'a str,
}

/// Author-scoped note persistence.
pub trait NoteRepository {
    /// Inserts one note; fails with `DuplicateSlug` if the slug is taken.
    fn create_note(&mut self, note: &Note) -> RepoResult<NoteId>;
    /// Returns the author's notes, oldest first.
    fn list_notes_for(&self, author: UserId) -> RepoResult<Vec<Note>>;
    /// Gets one note by slug if it belongs to `author`.
    fn get_note_for(&self, author: UserId, slug: &str) -> RepoResult<Option<Note>>;
    /// Replaces title/text/slug of the author's note addressed by `slug`.
    fn update_note_for(
        &mut self,
        author: UserId,
        slug: &str,
        changes: NoteChanges<'_>,
    ) -> RepoResult<Note>;
    /// Hard-deletes the author's note addressed by `slug`.
    fn delete_note_for(&mut self, author: UserId, slug: &str) -> RepoResult<()>;
    /// Total number of notes across all authors.
    fn count_notes(&self) -> RepoResult<u64>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        let has_notes: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'notes'
            );",
            [],
            |row| row.get(0),
        )?;
        if !has_notes {
            return Err(RepoError::InvalidData(
                "missing required table `notes`; was the connection migrated?".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&mut self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if slug_taken_in_tx(&tx, &note.slug, None)? {
            return Err(RepoError::DuplicateSlug(note.slug.clone()));
        }

        tx.execute(
            "INSERT INTO notes (uuid, title, text, slug, author_uuid)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.text.as_str(),
                note.slug.as_str(),
                note.author.to_string(),
            ],
        )
        .map_err(|err| map_unique_violation(err, RepoError::DuplicateSlug(note.slug.clone())))?;
        tx.commit()?;

        Ok(note.id)
    }

    fn list_notes_for(&self, author: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE author_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([author.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn get_note_for(&self, author: UserId, slug: &str) -> RepoResult<Option<Note>> {
        find_owned(self.conn, author, slug)
    }

    fn update_note_for(
        &mut self,
        author: UserId,
        slug: &str,
        changes: NoteChanges<'_>,
    ) -> RepoResult<Note> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let current =
            find_owned(&tx, author, slug)?.ok_or_else(|| RepoError::NotFound(slug.to_string()))?;

        let updated = Note {
            title: changes.title.to_string(),
            text: changes.text.to_string(),
            slug: changes.slug.to_string(),
            ..current
        };
        updated.validate()?;
        if slug_taken_in_tx(&tx, &updated.slug, Some(updated.id))? {
            return Err(RepoError::DuplicateSlug(updated.slug));
        }

        tx.execute(
            "UPDATE notes
             SET
                title = ?1,
                text = ?2,
                slug = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?4
               AND author_uuid = ?5;",
            params![
                updated.title.as_str(),
                updated.text.as_str(),
                updated.slug.as_str(),
                updated.id.to_string(),
                author.to_string(),
            ],
        )
        .map_err(|err| map_unique_violation(err, RepoError::DuplicateSlug(updated.slug.clone())))?;
        tx.commit()?;

        Ok(updated)
    }

    fn delete_note_for(&mut self, author: UserId, slug: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE slug = ?1 AND author_uuid = ?2;",
            params![slug, author.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(slug.to_string()));
        }
        Ok(())
    }

    fn count_notes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative note count `{count}`")))
    }
}

fn find_owned(conn: &Connection, author: UserId, slug: &str) -> RepoResult<Option<Note>> {
    let mut stmt = conn.prepare(&format!(
        "{NOTE_SELECT_SQL}
         WHERE slug = ?1
           AND author_uuid = ?2;"
    ))?;
    let note = stmt
        .query_row(params![slug, author.to_string()], |row| {
            Ok(parse_note_row(row))
        })
        .optional()?;
    note.transpose()
}

/// Whether `slug` belongs to any note other than `except`.
fn slug_taken_in_tx(tx: &Transaction<'_>, slug: &str, except: Option<NoteId>) -> RepoResult<bool> {
    let except = except.map(|id| id.to_string());
    let taken: bool = tx.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM notes
            WHERE slug = ?1
              AND (?2 IS NULL OR uuid <> ?2)
        );",
        params![slug, except],
        |row| row.get(0),
    )?;
    Ok(taken)
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let uuid_text: String = row.get("uuid")?;
    let author_text: String = row.get("author_uuid")?;
    let note = Note {
        id: parse_uuid(&uuid_text, "notes.uuid")?,
        title: row.get("title")?,
        text: row.get("text")?,
        slug: row.get("slug")?,
        author: parse_uuid(&author_text, "notes.author_uuid")?,
    };
    note.validate()?;
    Ok(note)
}
