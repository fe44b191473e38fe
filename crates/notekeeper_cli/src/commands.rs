use crate::args::{Args, Command};
use anyhow::{anyhow, bail, Context as _, Result};
use log::debug;
use notekeeper_core::{
    init_logging, Actor, Note, NoteDraft, NotekeeperConfig, NotesApp, Request, Response, Route,
    Status,
};

/// Optional field replacements for `edit`; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditFields {
    pub title: Option<String>,
    pub text: Option<String>,
    pub slug: Option<String>,
}

pub fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        let level = match args.verbose {
            0 => config.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        };
        init_logging(level, log_dir).map_err(|err| anyhow!("{err}"))?;
    }

    let mut app = NotesApp::open(&config)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let actor = resolve_actor(&app, args.user.as_deref())?;
    debug!(
        "event=cli_command module=cli status=start authenticated={}",
        actor.is_authenticated()
    );

    match args.command {
        Command::AddUser { username } => {
            let user = app.create_user(&username)?;
            println!("created user {} ({})", user.username, user.id);
        }
        Command::Add { title, text, slug } => {
            add_note(&mut app, &actor, NoteDraft::new(title, text, slug))?;
            println!("note saved");
        }
        Command::List => {
            for note in list_notes(&mut app, &actor)? {
                println!("{}\t{}", note.slug, note.title);
            }
        }
        Command::Show { slug } => print_note(&show_note(&mut app, &actor, slug)?),
        Command::Edit {
            slug,
            title,
            text,
            new_slug,
        } => {
            let fields = EditFields {
                title,
                text,
                slug: new_slug,
            };
            edit_note(&mut app, &actor, slug, fields)?;
            println!("note updated");
        }
        Command::Delete { slug } => {
            delete_note(&mut app, &actor, slug)?;
            println!("note deleted");
        }
        Command::Stats => {
            let count = app.notes()?.count()?;
            println!("notes: {count}");
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<NotekeeperConfig> {
    let mut config = match args.config.as_ref() {
        Some(path) => NotekeeperConfig::load(path)?,
        None => NotekeeperConfig::default(),
    };
    if let Some(db) = args.db.clone() {
        config.db_path = db;
    }
    Ok(config)
}

fn resolve_actor(app: &NotesApp, username: Option<&str>) -> Result<Actor> {
    let Some(username) = username else {
        return Ok(Actor::Anonymous);
    };
    match app.find_user(username)? {
        Some(user) => Ok(Actor::Authenticated(user)),
        None => bail!("unknown user `{username}`; create it with `add-user`"),
    }
}

pub fn add_note(app: &mut NotesApp, actor: &Actor, draft: NoteDraft) -> Result<()> {
    send(app, actor, Request::post(Route::Add.path(), draft))?;
    Ok(())
}

pub fn list_notes(app: &mut NotesApp, actor: &Actor) -> Result<Vec<Note>> {
    let response = send(app, actor, Request::get(Route::List.path()))?;
    Ok(response.context.object_list.unwrap_or_default())
}

pub fn show_note(app: &mut NotesApp, actor: &Actor, slug: String) -> Result<Note> {
    let response = send(app, actor, Request::get(Route::Detail(slug).path()))?;
    response
        .context
        .note
        .ok_or_else(|| anyhow!("detail page returned no note"))
}

/// Loads the edit form, applies `fields` on top of it, and submits it.
pub fn edit_note(app: &mut NotesApp, actor: &Actor, slug: String, fields: EditFields) -> Result<()> {
    let path = Route::Edit(slug).path();
    let current = send(app, actor, Request::get(path.as_str()))?;
    let draft = current
        .context
        .form
        .map(|form| form.data)
        .ok_or_else(|| anyhow!("edit page returned no form"))?;
    send(app, actor, Request::post(path, merge_edit(draft, fields)))?;
    Ok(())
}

pub fn delete_note(app: &mut NotesApp, actor: &Actor, slug: String) -> Result<()> {
    send(app, actor, Request::delete(Route::Delete(slug).path()))?;
    Ok(())
}

pub fn merge_edit(mut draft: NoteDraft, fields: EditFields) -> NoteDraft {
    if let Some(title) = fields.title {
        draft.title = title;
    }
    if let Some(text) = fields.text {
        draft.text = text;
    }
    if let Some(slug) = fields.slug {
        draft.slug = slug;
    }
    draft
}

/// Sends a request and turns non-success responses into errors.
pub fn send(app: &mut NotesApp, actor: &Actor, request: Request) -> Result<Response> {
    let response = app.handle(actor, &request);
    match response.status {
        Status::Ok => {
            if let Some(form) = response.context.form.as_ref() {
                if !form.is_valid() {
                    let messages: Vec<String> = form
                        .errors
                        .iter()
                        .flat_map(|(field, errors)| {
                            errors.iter().map(move |error| format!("{field}: {error}"))
                        })
                        .collect();
                    bail!("{}", messages.join("\n"));
                }
            }
            Ok(response)
        }
        Status::Found => {
            let location = response.location.as_deref().unwrap_or_default();
            if location.starts_with(app.guard().login_url()) {
                bail!("login required for `{}`; pass --user", request.path);
            }
            Ok(response)
        }
        Status::NotFound => bail!("note not found"),
        Status::MethodNotAllowed => bail!("`{}` does not accept this method", request.path),
        Status::InternalServerError => bail!("request failed; see the log for details"),
    }
}

fn print_note(note: &Note) {
    println!("{}", note.title);
    println!("slug: {}", note.slug);
    println!();
    println!("{}", note.text);
}
