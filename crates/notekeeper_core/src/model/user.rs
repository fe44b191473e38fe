//! User identity and acting-user model.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type UserId = Uuid;

const USERNAME_MAX_CHARS: usize = 150;

/// Minimal identity used as the ownership key of notes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
        }
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        let trimmed = self.username.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if self.username.chars().count() > USERNAME_MAX_CHARS {
            return Err(UserValidationError::UsernameTooLong {
                max: USERNAME_MAX_CHARS,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
        }
    }
}

impl Error for UserValidationError {}

/// Identity attached to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    Authenticated(User),
}

impl Actor {
    /// Returns the authenticated user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

impl From<User> for Actor {
    fn from(value: User) -> Self {
        Self::Authenticated(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Actor, User, UserValidationError};

    #[test]
    fn blank_username_is_rejected() {
        let user = User::new("   ");
        assert_eq!(user.validate(), Err(UserValidationError::EmptyUsername));
    }

    #[test]
    fn cyrillic_username_is_accepted() {
        User::new("Алёша").validate().expect("cyrillic names are valid");
    }

    #[test]
    fn anonymous_actor_has_no_user() {
        assert!(Actor::Anonymous.user().is_none());
        assert!(Actor::from(User::new("reader")).is_authenticated());
    }
}
