use notekeeper_core::{Actor, NoteDraft, NotesApp, Request, Route, User};

fn seeded() -> (NotesApp, User, User) {
    let mut app = NotesApp::in_memory().unwrap();
    let author = app.create_user("Норм чел").unwrap();
    let reader = app.create_user("Алёша").unwrap();
    {
        let mut notes = app.notes().unwrap();
        notes
            .create(
                &author,
                &NoteDraft::new("Тестовый заголовок", "Кокой-то текст", "Test"),
            )
            .unwrap();
        notes
            .create(
                &reader,
                &NoteDraft::new("Тестовый заголовок_2", "Кокой-то текст_2", "Test2"),
            )
            .unwrap();
    }
    (app, author, reader)
}

#[test]
fn list_excludes_notes_of_other_users() {
    let (mut app, author, reader) = seeded();
    let response = app.handle(&Actor::from(author), &Request::get(Route::List.path()));

    let object_list = response.context.object_list.expect("list page has object_list");
    let foreign = app.notes().unwrap().list_for(&reader).unwrap();
    assert!(!object_list.contains(&foreign[0]));
}

#[test]
fn list_includes_own_note() {
    let (mut app, author, _) = seeded();
    let own = app.notes().unwrap().list_for(&author).unwrap();
    let response = app.handle(&Actor::from(author), &Request::get(Route::List.path()));

    let object_list = response.context.object_list.expect("list page has object_list");
    assert!(object_list.contains(&own[0]));
    assert_eq!(object_list.len(), 1);
}

#[test]
fn add_and_edit_pages_carry_a_form() {
    let (mut app, author, _) = seeded();
    let actor = Actor::from(author);
    for route in [Route::Add, Route::Edit("Test".to_string())] {
        let response = app.handle(&actor, &Request::get(route.path()));
        assert!(response.context.form.is_some(), "{route}");
    }
}

#[test]
fn edit_form_is_prefilled_with_current_values() {
    let (mut app, author, _) = seeded();
    let response = app.handle(
        &Actor::from(author),
        &Request::get(Route::Edit("Test".to_string()).path()),
    );
    let form = response.context.form.expect("edit page has a form");
    assert_eq!(form.data.title, "Тестовый заголовок");
    assert_eq!(form.data.slug, "Test");
    assert!(form.is_valid());
}

#[test]
fn detail_page_exposes_note_in_context() {
    let (mut app, author, _) = seeded();
    let response = app.handle(
        &Actor::from(author),
        &Request::get(Route::Detail("Test".to_string()).path()),
    );

    let json = serde_json::to_value(&response.context).unwrap();
    assert_eq!(json["note"]["slug"], "Test");
    assert_eq!(json["note"]["text"], "Кокой-то текст");
    assert!(json.get("object_list").is_none());
    assert!(json.get("form").is_none());
}
