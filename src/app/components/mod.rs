//! Shared UI components for the Dioxus web UI.

pub mod layout;
pub mod theme;

pub use layout::Layout;
pub use theme::{
    theme_script, use_theme_provider, use_theme_provider_with, use_theme_switcher, ThemeSwitcher,
    UseThemeSwitcher,
};
