//! Integration tests for Jellyfindarr
//!
//! Tests are organized by component:
//! - backend_test: HTTP client against a mocked backend
//! - controller_test: Search/request controller flows (search -> details -> request)
//! - ui_test: Whole-screen rendering into a TestBackend
//! - cli_test: Argument parsing and command handlers

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
