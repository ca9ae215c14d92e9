//! Jellyfindarr - search and request TV shows and movies from the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! jellyfindarr
//!
//! # CLI mode (for automation)
//! jellyfindarr search "the expanse" -t tv
//! jellyfindarr request 438631 --title Dune --year 2021
//! ```

use std::fs::OpenOptions;
use std::io::{stdout, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jellyfindarr::api::BackendClient;
use jellyfindarr::app::{App, Focus};
use jellyfindarr::cli::{Cli, Command, ExitCode, Output};
use jellyfindarr::commands;
use jellyfindarr::config::Config;
use jellyfindarr::controller::{Completion, Effect, SearchController};
use jellyfindarr::models::MediaType;
use jellyfindarr::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// CLI mode logs to stderr
fn init_tracing_stderr(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("warn")
    } else {
        env_filter()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// TUI mode logs to a file so the terminal stays clean
fn init_tracing_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<std::process::ExitCode> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load_or_init(),
    };
    let client = BackendClient::new(config.resolve_base_url(cli.url.as_deref()));
    let default_type = config.default_type.unwrap_or_default();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        init_tracing_stderr(cli.quiet);
        let exit_code = run_cli(cli, client, default_type).await;
        return Ok(exit_code.into());
    }

    // TUI mode: logging is best effort
    if let Some(log_path) = Config::log_path(cli.config.as_deref()) {
        let _ = init_tracing_file(&log_path);
    }
    run_tui(client, default_type).await?;
    Ok(std::process::ExitCode::SUCCESS)
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, client: BackendClient, default_type: MediaType) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Search(cmd)) => {
            commands::search_cmd(cmd, client, default_type, &output).await
        }
        Some(Command::Request(cmd)) => {
            commands::request_cmd(cmd, client, default_type, &output).await
        }
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(client: BackendClient, default_type: MediaType) -> Result<()> {
    info!(base_url = client.base_url(), "starting TUI");

    let mut terminal = init_terminal()?;

    let mut app = App::new(SearchController::new(client));
    app.focus = Focus::Input(default_type);

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Run an effect's HTTP call on its own task
fn spawn_effect(effect: Effect, client: BackendClient, tx: mpsc::UnboundedSender<Completion>) {
    tokio::spawn(async move {
        let completion = effect.execute(&client).await;
        if tx.send(completion).is_err() {
            warn!("event loop gone; dropping completion");
        }
    });
}

/// Main event loop - handles input, applies finished HTTP calls, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();

    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    if let Some(effect) = app.handle_key(key) {
                        spawn_effect(effect, app.controller.client().clone(), tx.clone());
                    }
                }
            }
        }

        while let Ok(completion) = rx.try_recv() {
            app.complete(completion);
        }
    }

    Ok(())
}
