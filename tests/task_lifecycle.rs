use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use todo_dapp::{
    app::{App, Focus, Status},
    build_store,
    config::Config,
    store::WalletStatus,
};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn test_create_edit_delete_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("tasks.json");
    let data_arg = data_file.to_str().unwrap();
    let config = Config::try_parse_from(["todo-dapp", "--data-file", data_arg]).unwrap();

    // Create
    let mut app = App::new(build_store(&config).unwrap());
    assert_eq!(app.tasks.len(), 2);
    type_text(&mut app, "Pay rent");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Before the 1st");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.tasks.len(), 3);
    assert_eq!(app.status, Some(Status::Info("Task created".to_string())));

    // Edit the new task in place
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.focus, Focus::List);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('e'));
    type_text(&mut app, " today");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.tasks[2].title, "Pay rent today");

    // Delete the first sample task
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.tasks.len(), 2);

    app.store().persist().unwrap();

    let reopened = App::new(build_store(&config).unwrap());
    let titles: Vec<&str> = reopened.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Sample Task 2", "Pay rent today"]);
}

#[test]
fn test_solana_backend_starts_disconnected() {
    let program_id = "11111111111111111111111111111111";
    let config = Config::try_parse_from([
        "todo-dapp",
        "--backend",
        "solana",
        "--program-id",
        program_id,
        "--rpc-url",
        "http://127.0.0.1:1",
    ])
    .unwrap();

    let mut app = App::new(build_store(&config).unwrap());
    assert_eq!(app.wallet_status(), WalletStatus::Disconnected);
    assert!(app.tasks.is_empty());
    assert!(!app.form_available());

    // No keypair or address configured.
    press(&mut app, KeyCode::Char('w'));
    assert!(matches!(app.status, Some(Status::Error(_))));
    assert_eq!(app.wallet_status(), WalletStatus::Disconnected);
}
