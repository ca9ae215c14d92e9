//! Jellyfindarr - search and request TV shows and movies from the terminal
//!
//! A keyboard-driven front end for a Sonarr/Radarr request backend: search
//! both catalogues side by side, page through results, inspect details, and
//! send requests (whole movies, or selected seasons of a show).
//!
//! # Modules
//!
//! - `models` - Search results, request payloads and replies
//! - `api` - HTTP client for the backend
//! - `view` - In-memory view model: panels, buttons, modal, alerts
//! - `controller` - Search/request controller driving the view model
//! - `app` - TUI state and key handling
//! - `ui` - ratatui rendering
//! - `cli` / `commands` - Scriptable subcommands
//! - `config` - Config file and base URL resolution

pub mod models;
pub mod api;
pub mod view;
pub mod controller;
pub mod app;
pub mod ui;
pub mod config;
pub mod cli;
pub mod commands;

// Re-export commonly used types
pub use models::{
    MediaId, MediaItem, MediaType, MediaYear, RequestPayload, RequestReply, SearchResponse,
};

pub use api::{BackendClient, BackendError};
pub use app::App;
pub use controller::{Completion, Effect, SearchController};
