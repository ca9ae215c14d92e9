//! HTTP client for the media-request backend
//!
//! - `/search`: paged lookups against Sonarr (tv) or Radarr (movie)
//! - `/request`: ask the backend to add a show or movie

pub mod backend;

pub use backend::{BackendClient, BackendError};
