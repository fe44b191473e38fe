use notekeeper_core::db::open_db_in_memory;
use notekeeper_core::{
    duplicate_slug_message, slugify, NoteDraft, NoteService, NoteServiceError,
    NoteValidationError, NotesApp, SqliteNoteRepository, SqliteUserRepository, User, UserRepository,
    SLUG_MAX_CHARS,
};
use rusqlite::Connection;

fn seed_users(conn: &Connection) -> (User, User) {
    let users = SqliteUserRepository::new(conn);
    let author = User::new("Норм чел");
    let reader = User::new("Алёша");
    users.create_user(&author).unwrap();
    users.create_user(&reader).unwrap();
    (author, reader)
}

fn draft(title: &str, text: &str, slug: &str) -> NoteDraft {
    NoteDraft::new(title, text, slug)
}

#[test]
fn list_for_returns_only_own_notes() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, reader) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());

    let own = service
        .create(&author, &draft("Тестовый заголовок", "Кокой-то текст", "Test"))
        .unwrap();
    let foreign = service
        .create(&reader, &draft("Тестовый заголовок_2", "Кокой-то текст_2", "Test2"))
        .unwrap();

    let listed = service.list_for(&author).unwrap();
    assert!(listed.contains(&own));
    assert!(!listed.contains(&foreign));
    assert!(listed.iter().all(|note| note.author == author.id));
}

#[test]
fn blank_slug_is_derived_from_title() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, _) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());

    let title = "Тестовый заголовок";
    let created = service.create(&author, &draft(title, "Кокой-то текст", "")).unwrap();

    let expected: String = slugify(title).chars().take(SLUG_MAX_CHARS).collect();
    assert_eq!(created.slug, expected);
    assert_eq!(created.slug, "testovyij-zagolovok");
}

#[test]
fn derived_slug_of_long_title_is_truncated() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, _) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());

    let title = "Щщщщщщщщщщ".repeat(10);
    let created = service.create(&author, &draft(&title, "", "")).unwrap();
    assert_eq!(created.slug.chars().count(), SLUG_MAX_CHARS);
}

#[test]
fn create_adds_exactly_one_note() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, _) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());

    assert_eq!(service.count().unwrap(), 0);
    service.create(&author, &draft("Заголовок", "Текст", "")).unwrap();
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn duplicate_slug_is_rejected_without_writing() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, reader) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());
    service.create(&author, &draft("Заголовок", "Текст", "Test")).unwrap();

    for user in [&author, &reader] {
        let err = service
            .create(user, &draft("Новый заголовок", "Новый текст", "Test"))
            .unwrap_err();
        assert!(matches!(&err, NoteServiceError::DuplicateSlug(slug) if slug == "Test"));
        assert_eq!(err.to_string(), duplicate_slug_message("Test"));
    }
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn derived_slug_collision_is_a_duplicate() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, _) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());
    service.create(&author, &draft("Заголовок", "", "")).unwrap();

    let err = service.create(&author, &draft("Заголовок", "", "")).unwrap_err();
    assert!(matches!(err, NoteServiceError::DuplicateSlug(slug) if slug == "zagolovok"));
}

#[test]
fn get_by_slug_hides_foreign_notes() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, reader) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());
    let note = service.create(&author, &draft("Заголовок", "Текст", "Test")).unwrap();

    assert_eq!(service.get_by_slug_for(&author, "Test").unwrap(), note);
    let foreign = service.get_by_slug_for(&reader, "Test").unwrap_err();
    let missing = service.get_by_slug_for(&author, "missing").unwrap_err();
    assert!(matches!(foreign, NoteServiceError::NotFound(_)));
    assert!(matches!(missing, NoteServiceError::NotFound(_)));
}

#[test]
fn author_can_update_and_other_user_cannot() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, reader) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());
    let original = service
        .create(&author, &draft("Тестовый заголовок", "Кокой-то текст", "Test"))
        .unwrap();

    let changes = draft("Тестовый заголовок", "Новый какой-то текст", "Test");
    let err = service.update(&reader, "Test", &changes).unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(_)));
    assert_eq!(service.get_by_slug_for(&author, "Test").unwrap(), original);

    let updated = service.update(&author, "Test", &changes).unwrap();
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.author, author.id);
    assert_eq!(updated.text, "Новый какой-то текст");
    assert_eq!(service.get_by_slug_for(&author, "Test").unwrap(), updated);
}

#[test]
fn update_can_rename_slug_but_not_onto_another_note() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, reader) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());
    service.create(&author, &draft("Первая", "", "first")).unwrap();
    service.create(&reader, &draft("Чужая", "", "taken")).unwrap();

    let err = service
        .update(&author, "first", &draft("Первая", "", "taken"))
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::DuplicateSlug(slug) if slug == "taken"));
    assert!(service.get_by_slug_for(&author, "first").is_ok());

    let renamed = service
        .update(&author, "first", &draft("Первая", "", "renamed"))
        .unwrap();
    assert_eq!(renamed.slug, "renamed");
    assert!(service.get_by_slug_for(&author, "first").is_err());

    let derived = service.update(&author, "renamed", &draft("Вторая", "", "")).unwrap();
    assert_eq!(derived.slug, "vtoraya");
}

#[test]
fn update_rejects_blank_title() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, _) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());
    service.create(&author, &draft("Заголовок", "", "Test")).unwrap();

    let err = service.update(&author, "Test", &draft("  ", "", "Test")).unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Validation(NoteValidationError::EmptyTitle)
    ));
}

#[test]
fn delete_is_limited_to_the_author() {
    let mut conn = open_db_in_memory().unwrap();
    let (author, reader) = seed_users(&conn);
    let mut service = NoteService::new(SqliteNoteRepository::try_new(&mut conn).unwrap());
    service.create(&author, &draft("Заголовок", "Текст", "Test")).unwrap();

    let err = service.delete(&reader, "Test").unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(_)));
    assert_eq!(service.count().unwrap(), 1);

    service.delete(&author, "Test").unwrap();
    assert_eq!(service.count().unwrap(), 0);
}

#[test]
fn duplicate_username_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::new(&conn);
    users.create_user(&User::new("Алёша")).unwrap();

    let err = users.create_user(&User::new("Алёша")).unwrap_err();
    assert!(err.to_string().contains("already taken"));
    assert!(users.find_by_username("Алёша").unwrap().is_some());
}

#[test]
fn users_are_found_by_id_and_by_username() {
    let conn = open_db_in_memory().unwrap();
    let (author, reader) = seed_users(&conn);
    let users = SqliteUserRepository::new(&conn);

    assert_eq!(users.get_user(author.id).unwrap(), Some(author.clone()));
    assert_eq!(users.find_by_username("Алёша").unwrap(), Some(reader));
    assert_eq!(users.get_user(uuid::Uuid::new_v4()).unwrap(), None);
}

#[test]
fn created_user_is_read_back_through_the_app() {
    let app = NotesApp::in_memory().unwrap();
    let created = app.create_user("Норм чел").unwrap();
    assert_eq!(created.username, "Норм чел");
    assert_eq!(app.find_user("Норм чел").unwrap(), Some(created));
}
