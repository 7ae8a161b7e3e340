use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod form;
mod handler;
mod login;
mod notify;
mod overview;
mod project;
mod tui;
mod ui;

use app::App;
use config::Config;

const TICK_RATE: Duration = Duration::from_millis(300);

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    tracing::info!("scivid starting");

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!("could not load config, using defaults: {err:#}");
        Config::new()
    });

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new(TICK_RATE);
    let mut app = App::new(config);

    let result = run(&mut terminal, &mut events, &mut app).await;

    // Nothing in flight may outlive the terminal session
    app.abort_tasks();
    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut tui::EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }

        // Completions are applied here, on the loop that owns the state;
        // the tick bounds how long a finished task can sit unapplied.
        app.drain_tasks().await;
    }
    Ok(())
}

/// Log to a file: stdout and stderr belong to the terminal UI.
fn init_tracing() {
    let filter = std::env::var("SCIVID_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("scivid");
    let _ = std::fs::create_dir_all(&log_dir);

    // No log file, no logging; the UI must still come up either way.
    if let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("scivid.log"))
    {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }
}
