use mymedia::{
    http::ApiError,
    session::{MemoryStore, SessionStore},
    shell::{Screen, Shell},
};

#[test]
fn loading_until_welcome_arrives() {
    let shell = Shell::new();
    let session = SessionStore::new(MemoryStore::new());
    assert!(shell.is_loading());
    assert_eq!(shell.screen(&session), Screen::Loading);
}

#[test]
fn token_decides_between_forms_and_table() {
    let mut shell = Shell::new();
    shell.finish_welcome(Ok("Welcome to My Media".into()));
    assert_eq!(shell.welcome(), Some("Welcome to My Media"));

    let mut session = SessionStore::new(MemoryStore::new());
    assert_eq!(shell.screen(&session), Screen::SignIn);

    session.set_token(Some("abc".into()));
    assert_eq!(shell.screen(&session), Screen::Library);

    session.set_token(None);
    assert_eq!(shell.screen(&session), Screen::SignIn);
}

#[test]
fn welcome_failure_is_page_level() {
    let session = SessionStore::new(MemoryStore::new());

    let mut shell = Shell::new();
    shell.finish_welcome(Err(ApiError::Network("refused".into())));
    assert_eq!(
        shell.screen(&session),
        Screen::Failed("Failed to fetch welcome message".into())
    );

    let mut shell = Shell::new();
    shell.finish_welcome(Err(ApiError::Status {
        status: 503,
        detail: Some("Maintenance".into()),
    }));
    assert_eq!(shell.screen(&session), Screen::Failed("Maintenance".into()));
}

#[test]
fn screen_kinds_ignore_messages() {
    assert!(Screen::Failed("a".into()).is_same_kind(&Screen::Failed("b".into())));
    assert!(!Screen::SignIn.is_same_kind(&Screen::Library));
}
