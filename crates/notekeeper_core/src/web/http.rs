//! Request/response shapes exchanged with the hosting server.

use crate::model::note::{Note, NoteDraft};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Ok,
    Found,
    NotFound,
    MethodNotAllowed,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Found => 302,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::InternalServerError => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    /// Submitted form fields for `POST` requests.
    pub form: Option<NoteDraft>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            form: None,
        }
    }

    pub fn post(path: impl Into<String>, form: NoteDraft) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            form: Some(form),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            form: None,
        }
    }
}

/// Bound form: submitted values plus per-field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteForm {
    pub data: NoteDraft,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl NoteForm {
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn with_data(data: NoteDraft) -> Self {
        Self {
            data,
            errors: BTreeMap::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Template context handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_list: Option<Vec<Note>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<NoteForm>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    /// Redirect target for `302` responses.
    pub location: Option<String>,
    pub context: Context,
}

impl Response {
    pub fn ok(context: Context) -> Self {
        Self {
            status: Status::Ok,
            location: None,
            context,
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: Status::Found,
            location: Some(location.into()),
            context: Context::default(),
        }
    }

    pub fn status(status: Status) -> Self {
        Self {
            status,
            location: None,
            context: Context::default(),
        }
    }
}
