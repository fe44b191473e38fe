//! Request dispatcher for the notes surface.

use crate::access::guard::{resolve_owned, AccessGuard, GuardOutcome};
use crate::access::route::Route;
use crate::config::NotekeeperConfig;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::note::{Note, NoteDraft};
use crate::model::user::{Actor, User};
use crate::repo::note_repo::SqliteNoteRepository;
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::{RepoError, RepoResult};
use crate::service::note_service::{NoteService, NoteServiceError};
use crate::web::http::{Context, Method, NoteForm, Request, Response, Status};
use log::{error, info};
use rusqlite::Connection;

type SqliteNoteService<'conn> = NoteService<SqliteNoteRepository<'conn>>;

/// Owns the store connection and answers requests against it.
pub struct NotesApp {
    conn: Connection,
    guard: AccessGuard,
}

impl NotesApp {
    pub fn new(conn: Connection, guard: AccessGuard) -> Self {
        Self { conn, guard }
    }

    /// Opens the configured database file.
    pub fn open(config: &NotekeeperConfig) -> Result<Self, DbError> {
        let conn = open_db(&config.db_path)?;
        Ok(Self::new(conn, AccessGuard::new(config.login_url.as_str())))
    }

    /// Fresh in-memory store with the default login URL.
    pub fn in_memory() -> Result<Self, DbError> {
        Ok(Self::new(open_db_in_memory()?, AccessGuard::default()))
    }

    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    /// Registers an ownership identity.
    pub fn create_user(&self, username: &str) -> RepoResult<User> {
        let users = SqliteUserRepository::new(&self.conn);
        let user = User::new(username);
        users.create_user(&user)?;
        info!("event=user_create module=web status=ok user_id={}", user.id);
        users.get_user(user.id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created user {} not found in read-back", user.id))
        })
    }

    pub fn find_user(&self, username: &str) -> RepoResult<Option<User>> {
        SqliteUserRepository::new(&self.conn).find_by_username(username)
    }

    /// Direct access to the note service for non-request callers.
    pub fn notes(&mut self) -> Result<SqliteNoteService<'_>, NoteServiceError> {
        let repo = SqliteNoteRepository::try_new(&mut self.conn)?;
        Ok(NoteService::new(repo))
    }

    /// Handles one request on behalf of `actor`.
    pub fn handle(&mut self, actor: &Actor, request: &Request) -> Response {
        let Some(route) = Route::resolve(&request.path) else {
            return Response::status(Status::NotFound);
        };

        let outcome = self.guard.check(actor, &route, &request.path);
        let response = match outcome {
            GuardOutcome::RedirectToLogin { location } => Ok(Response::redirect(location)),
            GuardOutcome::Public => public_page(request.method),
            GuardOutcome::Granted(user) => self
                .notes()
                .and_then(|mut service| authenticated_page(&mut service, user, &route, request)),
            GuardOutcome::OwnerCheck { user, slug } => self
                .notes()
                .and_then(|mut service| owner_page(&mut service, user, slug, &route, request)),
        };

        let response = response.unwrap_or_else(|err| error_response(&route, err));
        info!(
            "event=request module=web status={} route={} method={:?}",
            response.status.code(),
            route.name(),
            request.method
        );
        response
    }
}

fn public_page(method: Method) -> Result<Response, NoteServiceError> {
    match method {
        Method::Get | Method::Post => Ok(Response::ok(Context::default())),
        Method::Delete => Ok(Response::status(Status::MethodNotAllowed)),
    }
}

fn authenticated_page(
    service: &mut SqliteNoteService<'_>,
    user: &User,
    route: &Route,
    request: &Request,
) -> Result<Response, NoteServiceError> {
    match (route, request.method) {
        (Route::List, Method::Get) => Ok(Response::ok(Context {
            object_list: Some(service.list_for(user)?),
            ..Context::default()
        })),
        (Route::Add, Method::Get) => Ok(form_page(NoteForm::unbound(), None)),
        (Route::Add, Method::Post) => {
            let draft = submitted(request);
            match service.create(user, &draft) {
                Ok(_) => Ok(Response::redirect(Route::Success.path())),
                Err(err) => rerender_form(draft, None, err),
            }
        }
        (Route::Success, Method::Get) => Ok(Response::ok(Context::default())),
        _ => Ok(Response::status(Status::MethodNotAllowed)),
    }
}

fn owner_page(
    service: &mut SqliteNoteService<'_>,
    user: &User,
    slug: &str,
    route: &Route,
    request: &Request,
) -> Result<Response, NoteServiceError> {
    match (route, request.method) {
        (Route::Detail(_), Method::Get) | (Route::Delete(_), Method::Get) => {
            let note = resolve_owned(service, user, slug)?;
            Ok(Response::ok(Context {
                note: Some(note),
                ..Context::default()
            }))
        }
        (Route::Edit(_), Method::Get) => {
            let note = resolve_owned(service, user, slug)?;
            let form = NoteForm::with_data(NoteDraft::new(
                note.title.as_str(),
                note.text.as_str(),
                note.slug.as_str(),
            ));
            Ok(form_page(form, Some(note)))
        }
        (Route::Edit(_), Method::Post) => {
            let note = resolve_owned(service, user, slug)?;
            let draft = submitted(request);
            match service.update(user, slug, &draft) {
                Ok(_) => Ok(Response::redirect(Route::Success.path())),
                Err(err) => rerender_form(draft, Some(note), err),
            }
        }
        (Route::Delete(_), Method::Post) | (Route::Delete(_), Method::Delete) => {
            service.delete(user, slug)?;
            Ok(Response::redirect(Route::Success.path()))
        }
        _ => Ok(Response::status(Status::MethodNotAllowed)),
    }
}

fn submitted(request: &Request) -> NoteDraft {
    request.form.clone().unwrap_or_default()
}

fn form_page(form: NoteForm, note: Option<Note>) -> Response {
    Response::ok(Context {
        note,
        form: Some(form),
        ..Context::default()
    })
}

/// Field errors re-render the form; anything else propagates.
fn rerender_form(
    draft: NoteDraft,
    note: Option<Note>,
    err: NoteServiceError,
) -> Result<Response, NoteServiceError> {
    let Some((field, message)) = err.field_error() else {
        return Err(err);
    };
    let mut form = NoteForm::with_data(draft);
    form.add_error(field, message);
    Ok(form_page(form, note))
}

fn error_response(route: &Route, err: NoteServiceError) -> Response {
    match err {
        NoteServiceError::NotFound(_) => Response::status(Status::NotFound),
        other => {
            error!(
                "event=request module=web status=error route={} error={}",
                route.name(),
                other
            );
            Response::status(Status::InternalServerError)
        }
    }
}
