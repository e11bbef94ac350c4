use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use todo_dapp::{app::App, build_store, config::Config, logging, shutdown, ui};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init(&config.log_file)?;
    info!(backend = ?config.backend, "Starting");

    let store = build_store(&config)?;
    let mut app = App::new(store);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut app);

    let closed = shutdown(app.store(), || restore_terminal(&mut terminal));

    if let Err(err) = result {
        error!(%err, "UI loop failed");
        eprintln!("{:?}", err);
    }
    closed
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}
