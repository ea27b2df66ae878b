//! shoplist - Terminal Shopping List
//!
//! A terminal shopping list: add, edit, delete and tick off items, search
//! and filter them, and have the list saved automatically between runs.

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use shoplist::application::{restore, save_if_dirty, App, AppMode};
use shoplist::infrastructure::{init_tracing, AppConfig, FileStore, KeyValueStore, ListRepository};
use shoplist::presentation::{render_ui, InputHandler};

/// Entry point for the shoplist terminal application.
///
/// Loads configuration, restores the saved list, sets up the terminal and
/// runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if configuration is invalid, if the saved list exists
/// but cannot be read, or if terminal setup fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_file)?;
    tracing::info!(data_dir = %config.data_dir.display(), "starting shoplist");

    let repository = ListRepository::new(FileStore::new(&config.data_dir));
    let mut app = App::new(config.export_file.clone());
    // A corrupt list stops startup so the next save cannot overwrite it
    restore(&mut app, &repository).await.map_err(|error| {
        tracing::error!(%error, "cannot load saved shopping list");
        format!(
            "Saved shopping list in {} cannot be read: {error}",
            config.data_dir.display()
        )
    })?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &repository).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(%err, "terminal error");
        println!("{err:?}");
    }

    tracing::info!("shoplist exited");
    Ok(())
}

/// Main application event loop.
///
/// Renders, handles one key press, then saves the whole list if that key
/// changed it. Save failures are logged and the loop carries on; the next
/// successful save brings storage back in sync.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
async fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    repository: &ListRepository<S>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }

        save_if_dirty(app, repository).await;
    }
}
