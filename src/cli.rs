//! CLI - Command Line Interface for Jellyfindarr
//!
//! Every search and request the TUI can make is scriptable.
//! Output is plain text, or JSON with `--json` (default when stdout is not a TTY).
//!
//! # Examples
//!
//! ```bash
//! # Search for a show
//! jellyfindarr search "the expanse" -t tv
//!
//! # Request two seasons of it
//! jellyfindarr request 63639 --title "The Expanse" -t tv --season 1 --season 2
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::{MediaId, MediaType, MediaYear};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error, including errors reported by the backend
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Backend unreachable or sent something unreadable
    NetworkError = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Jellyfindarr - search and request media from the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "jellyfindarr",
    version,
    about = "Search and request TV shows and movies",
    long_about = "A terminal front end for a Sonarr/Radarr request backend.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  jellyfindarr                                  Launch interactive TUI\n\
                  jellyfindarr search dune                      Search movies\n\
                  jellyfindarr search lost -t tv -p 2           Second page of TV results\n\
                  jellyfindarr request 438631 --title Dune      Request a movie"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Backend base URL (overrides JELLYFINDARR_URL and the config file)
    #[arg(long, short = 'u', global = true)]
    pub url: Option<String>,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for TV shows or movies
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Ask the backend to acquire a show or movie
    #[command(visible_alias = "r")]
    Request(RequestCmd),
}

/// Media type argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaTypeArg {
    /// TV shows
    Tv,
    /// Movies (default)
    #[default]
    Movie,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Tv => MediaType::Tv,
            MediaTypeArg::Movie => MediaType::Movie,
        }
    }
}

// =============================================================================
// Search Command
// =============================================================================

/// Search the backend by name
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Title to search for
    #[arg(required = true)]
    pub query: String,

    /// Media type (defaults to the config's default_type, then movie)
    #[arg(long = "type", short = 't', value_enum)]
    pub media_type: Option<MediaTypeArg>,

    /// Result page, starting at 1
    #[arg(long, short = 'p', default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

// =============================================================================
// Request Command
// =============================================================================

/// Request a show or movie by backend id
#[derive(Args, Debug)]
pub struct RequestCmd {
    /// Backend id (TVDB id for shows, TMDB id for movies)
    #[arg(required = true)]
    pub id: String,

    /// Title sent along with the request
    #[arg(long, required = true)]
    pub title: String,

    /// Release year
    #[arg(long, short = 'y')]
    pub year: Option<i64>,

    /// Media type (defaults to the config's default_type, then movie)
    #[arg(long = "type", short = 't', value_enum)]
    pub media_type: Option<MediaTypeArg>,

    /// Season to request (TV only, repeatable)
    #[arg(long = "season", short = 's')]
    pub seasons: Vec<u32>,
}

impl RequestCmd {
    /// Numeric ids are sent as numbers, anything else as text
    pub fn media_id(&self) -> MediaId {
        match self.id.trim().parse::<u64>() {
            Ok(n) => MediaId::from(n),
            Err(_) => MediaId::from(self.id.trim()),
        }
    }

    pub fn media_year(&self) -> Option<MediaYear> {
        self.year.map(MediaYear::from)
    }

    /// Season values as the backend expects them
    pub fn season_values(&self) -> Option<Vec<String>> {
        if self.seasons.is_empty() {
            None
        } else {
            Some(self.seasons.iter().map(u32::to_string).collect())
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Search results as printed by `search --json`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub page: u32,
    pub has_next_page: bool,
    pub items: Vec<crate::models::MediaItem>,
}

/// Request outcome as printed by `request --json`
#[derive(Debug, Serialize, Deserialize)]
pub struct RequestOutput {
    pub message: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print a line of plain output
    pub fn line(&self, text: impl std::fmt::Display) {
        println!("{}", text);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["jellyfindarr"]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["jellyfindarr", "search", "dune"]);
        assert!(cli.is_cli_mode());
        if let Some(Command::Search(cmd)) = cli.command {
            assert_eq!(cmd.query, "dune");
            assert_eq!(cmd.page, 1);
            assert!(cmd.media_type.is_none());
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_search_type_and_page() {
        let cli = Cli::parse_from(["jellyfindarr", "s", "lost", "-t", "tv", "-p", "3"]);
        if let Some(Command::Search(cmd)) = cli.command {
            assert_eq!(cmd.media_type, Some(MediaTypeArg::Tv));
            assert_eq!(cmd.page, 3);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_search_page_zero_rejected() {
        assert!(Cli::try_parse_from(["jellyfindarr", "search", "x", "-p", "0"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "jellyfindarr",
            "--json",
            "--quiet",
            "--url",
            "http://nas:5505",
            "search",
            "test",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.url.as_deref(), Some("http://nas:5505"));
    }

    #[test]
    fn test_request_with_seasons() {
        let cli = Cli::parse_from([
            "jellyfindarr",
            "request",
            "63639",
            "--title",
            "The Expanse",
            "-y",
            "2015",
            "-t",
            "tv",
            "--season",
            "1",
            "-s",
            "3",
        ]);
        if let Some(Command::Request(cmd)) = cli.command {
            assert_eq!(cmd.media_id(), MediaId::from(63639));
            assert_eq!(cmd.title, "The Expanse");
            assert_eq!(cmd.media_year(), Some(MediaYear::from(2015)));
            assert_eq!(cmd.media_type, Some(MediaTypeArg::Tv));
            assert_eq!(cmd.season_values(), Some(vec!["1".to_string(), "3".to_string()]));
        } else {
            panic!("Expected Request command");
        }
    }

    #[test]
    fn test_request_requires_title() {
        assert!(Cli::try_parse_from(["jellyfindarr", "request", "1"]).is_err());
    }

    #[test]
    fn test_request_text_id_and_no_seasons() {
        let cli = Cli::parse_from(["jellyfindarr", "request", "abc", "--title", "X"]);
        if let Some(Command::Request(cmd)) = cli.command {
            assert_eq!(cmd.media_id(), MediaId::from("abc"));
            assert!(cmd.season_values().is_none());
            assert!(cmd.media_year().is_none());
        } else {
            panic!("Expected Request command");
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(
            std::process::ExitCode::from(ExitCode::Success),
            std::process::ExitCode::SUCCESS
        );
        assert_eq!(
            std::process::ExitCode::from(ExitCode::InvalidArgs),
            std::process::ExitCode::from(2)
        );
    }

    #[test]
    fn test_json_error_output_shape() {
        let out = JsonOutput::<()>::error_msg("boom", ExitCode::NetworkError);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["error"], "boom");
        assert_eq!(json["exit_code"], 3);
        assert!(json.get("data").is_none());
    }
}
