//! Dioxus application entry point.
//!
//! A single page hosting the theme switcher. The root owns the one theme
//! controller and provides it as context, so every `use_theme_switcher`
//! below reads and writes the same state.

use dioxus::prelude::*;

pub mod components;

use crate::config::ThemeConfig;
use components::{use_theme_provider, use_theme_switcher, Layout};

/// Root app component
#[component]
pub fn App() -> Element {
    use_context_provider(ThemeConfig::default);
    use_theme_provider();

    rsx! {
        Layout { title: "Theme",
            ThemeStatus {}
        }
    }
}

/// Shows the active mode and a quick toggle.
#[component]
fn ThemeStatus() -> Element {
    let theme = use_theme_switcher();
    let label = theme
        .mode()
        .map_or("resolving...", |mode| mode.as_str());

    rsx! {
        article {
            p { "Active theme: " strong { "{label}" } }
            button { onclick: move |_| { theme.toggle(); }, "Toggle" }
        }
    }
}
