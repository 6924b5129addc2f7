//! gridfm: a keyboard-driven grid directory browser for the terminal.

mod icons;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gridfm_core::{BrowserSession, Config, Intent, LocalFileSystem};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use crate::input::key_to_intent;
use crate::render::render;

/// Environment variable holding the log filter, e.g. `GRIDFM_LOG=debug`.
const LOG_ENV: &str = "GRIDFM_LOG";

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs go to a file so they never draw over the alternate screen.
fn init_tracing() -> anyhow::Result<()> {
    let log_path = std::env::temp_dir().join("gridfm.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    install_panic_hook();

    let config = Config::load_or_default(&Config::default_locations());
    let start_dir = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => std::env::current_dir()?,
    };
    tracing::info!(dir = %start_dir.display(), "starting gridfm");

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &start_dir, &config);
    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        tracing::error!("gridfm exited with error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    start_dir: &Path,
    config: &Config,
) -> anyhow::Result<()> {
    let fs = LocalFileSystem::new(config.general.date_format.clone());
    let size = terminal.size()?;
    let mut session = BrowserSession::open(start_dir.to_path_buf(), config, &fs)
        .with_terminal_size(size.width, size.height);

    loop {
        let frame = session.frame();
        terminal.draw(|f| render(f, &frame, &config.theme))?;

        let intent = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                key_to_intent(key, session.dialog())
            }
            Event::Resize(cols, rows) => Some(Intent::Resize { cols, rows }),
            _ => None,
        };

        if let Some(intent) = intent {
            session = session.handle(intent, &fs);
        }
        if session.should_quit() {
            break;
        }
    }

    Ok(())
}
