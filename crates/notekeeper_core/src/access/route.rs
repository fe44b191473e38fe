//! Route table for the notes surface.

use std::fmt::{Display, Formatter};

/// Who may reach a route before any ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Authenticated,
    /// Authenticated, and the addressed note must belong to the actor.
    Owner,
}

/// One addressable page of the notes surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Logout,
    Signup,
    List,
    Add,
    Success,
    Detail(String),
    Edit(String),
    Delete(String),
}

impl Route {
    /// Stable route name, e.g. `notes:detail`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "notes:home",
            Self::Login => "users:login",
            Self::Logout => "users:logout",
            Self::Signup => "users:signup",
            Self::List => "notes:list",
            Self::Add => "notes:add",
            Self::Success => "notes:success",
            Self::Detail(_) => "notes:detail",
            Self::Edit(_) => "notes:edit",
            Self::Delete(_) => "notes:delete",
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Home | Self::Login | Self::Logout | Self::Signup => RouteAccess::Public,
            Self::List | Self::Add | Self::Success => RouteAccess::Authenticated,
            Self::Detail(_) | Self::Edit(_) | Self::Delete(_) => RouteAccess::Owner,
        }
    }

    /// Slug addressed by owner-only routes.
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Detail(slug) | Self::Edit(slug) | Self::Delete(slug) => Some(slug),
            _ => None,
        }
    }

    /// Path for this route (reverse lookup).
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/auth/login/".to_string(),
            Self::Logout => "/auth/logout/".to_string(),
            Self::Signup => "/auth/signup/".to_string(),
            Self::List => "/notes/".to_string(),
            Self::Add => "/add/".to_string(),
            Self::Success => "/done/".to_string(),
            Self::Detail(slug) => format!("/note/{slug}/"),
            Self::Edit(slug) => format!("/edit/{slug}/"),
            Self::Delete(slug) => format!("/delete/{slug}/"),
        }
    }

    /// Resolves a request path; a query string is ignored.
    ///
    /// Returns `None` for unknown paths and malformed slug segments.
    pub fn resolve(path: &str) -> Option<Self> {
        let path = path.split_once('?').map_or(path, |(head, _)| head);
        let route = match path {
            "/" => Self::Home,
            "/auth/login/" => Self::Login,
            "/auth/logout/" => Self::Logout,
            "/auth/signup/" => Self::Signup,
            "/notes/" => Self::List,
            "/add/" => Self::Add,
            "/done/" => Self::Success,
            _ => {
                let trimmed = path.strip_prefix('/')?.strip_suffix('/')?;
                let (prefix, slug) = trimmed.split_once('/')?;
                if !is_slug_segment(slug) {
                    return None;
                }
                let slug = slug.to_string();
                match prefix {
                    "note" => Self::Detail(slug),
                    "edit" => Self::Edit(slug),
                    "delete" => Self::Delete(slug),
                    _ => return None,
                }
            }
        };
        Some(route)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn is_slug_segment(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::{Route, RouteAccess};

    #[test]
    fn resolves_every_reversed_path() {
        let routes = [
            Route::Home,
            Route::Login,
            Route::Logout,
            Route::Signup,
            Route::List,
            Route::Add,
            Route::Success,
            Route::Detail("Test".to_string()),
            Route::Edit("note_2".to_string()),
            Route::Delete("a-b".to_string()),
        ];
        for route in routes {
            assert_eq!(Route::resolve(&route.path()), Some(route.clone()), "{route}");
        }
    }

    #[test]
    fn ignores_query_string() {
        assert_eq!(Route::resolve("/notes/?page=2"), Some(Route::List));
    }

    #[test]
    fn rejects_unknown_and_malformed_paths() {
        assert_eq!(Route::resolve("/missing/"), None);
        assert_eq!(Route::resolve("/note/"), None);
        assert_eq!(Route::resolve("/note/a/b/"), None);
        assert_eq!(Route::resolve("/note/Test"), None);
        assert_eq!(Route::resolve("note/Test/"), None);
    }

    #[test]
    fn owner_routes_carry_their_slug() {
        let route = Route::Edit("Test".to_string());
        assert_eq!(route.access(), RouteAccess::Owner);
        assert_eq!(route.slug(), Some("Test"));
        assert_eq!(Route::List.slug(), None);
        assert_eq!(Route::Signup.access(), RouteAccess::Public);
    }
}
