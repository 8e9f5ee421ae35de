//! theme-sync - dark/light theme state for web UIs
//!
//! Keeps one binary theme mode consistent with:
//! - the user's explicit choice, persisted in key-value storage
//! - the system `prefers-color-scheme` signal, followed live
//! - a class on the document root element
//!
//! The core ([`theme::ThemeController`]) is framework independent and talks
//! to the platform through injected capabilities. [`app`] wires it into
//! Dioxus as a `[mode, set_mode]` hook.

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app (hook, switcher component, layout)
pub mod app;

pub mod config;
pub mod error;
pub mod platform;
pub mod theme;

pub use config::ThemeConfig;
pub use error::ThemeError;
pub use theme::{ThemeController, ThemeMode};
