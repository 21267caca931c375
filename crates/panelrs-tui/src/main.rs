//! Panelrs TUI - Terminal admin console for the dashboard API
//!
//! Built with Ratatui and crossterm.

mod app;
mod config;
mod handlers;
mod toast;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Config;

/// Panelrs TUI - admin console for themes and user access types
#[derive(Parser, Debug)]
#[command(name = "panelrs-tui")]
#[command(about = "A terminal admin console for the dashboard API")]
struct Args {
    /// Path to the config file (defaults to the XDG config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the API base URL from the config file
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> Result<()> {
    // Env vars from a local .env, if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("panelrs_tui=info".parse()?))
        .with_writer(std::io::stderr) // Write logs to stderr to not interfere with TUI
        .init();

    let args = Args::parse();
    let mut config = Config::load(args.config)?;
    if let Some(api_url) = args.api_url.or_else(|| std::env::var("PANELRS_API_URL").ok()) {
        config.api_url = api_url;
    }
    tracing::info!("Starting Panelrs TUI against {}", config.api_url);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and load the first page
    let mut app = App::new(&config)?;
    app.ensure_loaded();

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout for smooth updates
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if handlers::handle_key(app, key) {
                    break;
                }
            }
        }

        // Expire toasts and unmount modals whose exit transition is done
        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
