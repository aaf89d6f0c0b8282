//! Application layer logic for taskdeck.
//!
//! This crate provides configuration, persisted preferences, sign-in
//! validation and the session view state shared by front ends.

/// Sign-in form validation.
pub mod auth;
/// TOML configuration loading.
pub mod config;
/// Persisted auth flag and theme.
pub mod preferences;
/// View state and multi-step flows over a board.
pub mod session;

// Re-exports for convenience
pub use auth::{SignInForm, is_valid_email};
pub use config::{AppConfig, PaletteConfig};
pub use preferences::{ColorScheme, PreferenceError, PreferenceStore, Preferences, ThemePreference};
pub use session::{Session, SessionError};
