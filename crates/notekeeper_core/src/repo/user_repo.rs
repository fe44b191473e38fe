//! User repository contracts and SQLite implementation.
//!
//! Users are only ownership keys here; credentials live elsewhere.

use crate::model::user::{User, UserId};
use crate::repo::{map_unique_violation, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for user identities.
pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<()>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        user.validate()?;
        self.conn
            .execute(
                "INSERT INTO users (uuid, username) VALUES (?1, ?2);",
                params![user.id.to_string(), user.username.as_str()],
            )
            .map_err(|err| {
                map_unique_violation(err, RepoError::DuplicateUsername(user.username.clone()))
            })?;
        Ok(())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                "SELECT uuid, username FROM users WHERE uuid = ?1;",
                [id.to_string()],
                read_user_columns,
            )
            .optional()?;
        row.map(parse_user).transpose()
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                "SELECT uuid, username FROM users WHERE username = ?1;",
                [username],
                read_user_columns,
            )
            .optional()?;
        row.map(parse_user).transpose()
    }
}

fn read_user_columns(row: &Row<'_>) -> rusqlite::Result<(String, String)> {
    Ok((row.get("uuid")?, row.get("username")?))
}

fn parse_user((uuid, username): (String, String)) -> RepoResult<User> {
    Ok(User {
        id: parse_uuid(&uuid, "users.uuid")?,
        username,
    })
}
