//! Authentication gate in front of the notes routes.
//!
//! Two states only: anonymous and authenticated. Ownership is not decided
//! here; owner-only routes come back as [`GuardOutcome::OwnerCheck`] and the
//! caller resolves the note through the author-scoped store lookup.

use crate::access::route::{Route, RouteAccess};
use crate::model::note::Note;
use crate::model::user::{Actor, User};
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{NoteService, NoteServiceError};
use log::debug;

/// Default login page used for anonymous redirects.
pub const DEFAULT_LOGIN_URL: &str = "/auth/login/";

/// Guard decision for one actor/route pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<'a> {
    /// Public route; no identity needed.
    Public,
    /// Authenticated route reached by a signed-in user.
    Granted(&'a User),
    /// Owner-only route; `slug` must resolve to a note authored by `user`.
    OwnerCheck { user: &'a User, slug: &'a str },
    /// Anonymous actor on a protected route.
    RedirectToLogin { location: String },
}

/// Decides route access for the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGuard {
    login_url: String,
}

impl Default for AccessGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_URL)
    }
}

impl AccessGuard {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
        }
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Runs the authentication gate.
    ///
    /// `path` is the originally requested path, echoed back in `next`.
    pub fn check<'a>(&self, actor: &'a Actor, route: &'a Route, path: &str) -> GuardOutcome<'a> {
        let access = route.access();
        if access == RouteAccess::Public {
            return GuardOutcome::Public;
        }

        let Some(user) = actor.user() else {
            debug!(
                "event=access_check module=access status=redirect route={}",
                route.name()
            );
            return GuardOutcome::RedirectToLogin {
                location: self.login_redirect(path),
            };
        };

        match route.slug() {
            Some(slug) if access == RouteAccess::Owner => GuardOutcome::OwnerCheck { user, slug },
            _ => GuardOutcome::Granted(user),
        }
    }

    /// Login location carrying `next` back to `path`.
    pub fn login_redirect(&self, path: &str) -> String {
        format!("{}?next={}", self.login_url, encode_next(path))
    }
}

/// Resolves an owner check to the note, or `NotFound`.
///
/// Missing and foreign notes fail the same way.
pub fn resolve_owned<R: NoteRepository>(
    service: &NoteService<R>,
    user: &User,
    slug: &str,
) -> Result<Note, NoteServiceError> {
    service.get_by_slug_for(user, slug)
}

/// Percent-encodes a path for a query value, keeping `/` readable.
fn encode_next(path: &str) -> String {
    let mut encoded = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(char::from(byte))
            }
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}
