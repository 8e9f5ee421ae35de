//! Layout component wrapping pages with the theme script and switcher.

use dioxus::prelude::*;

use super::theme::{theme_script, ThemeSwitcher};
use crate::config::ThemeConfig;

/// Base styles. The dark palette hangs off the root class toggled by the
/// theme controller.
const BASE_STYLES: &str = r#"
:root { color-scheme: light; --bg: #fff; --fg: #1b1b1b; --muted: #6b6b6b; }
:root.dark { color-scheme: dark; --bg: #121212; --fg: #e8e8e8; --muted: #9a9a9a; }
body { background: var(--bg); color: var(--fg); font-family: system-ui, sans-serif; margin: 0; }
.container { max-width: 720px; margin: 0 auto; padding: 1rem; }
small { color: var(--muted); }
/* Theme switcher */
.theme-switcher { display: flex; gap: 0.25rem; }
.theme-switcher button { padding: 0.25rem 0.5rem; font-size: 0.8rem; margin: 0; }
.theme-switcher button.active { background: var(--fg); color: var(--bg); }
"#;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// Page content
    pub children: Element,
}

/// Main layout component wrapping all pages.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("CARGO_PKG_VERSION");
    let script = use_hook(|| {
        let config = try_consume_context::<ThemeConfig>().unwrap_or_default();
        theme_script(&config)
    });

    rsx! {
        // Head elements - Dioxus hoists these to the real <head>
        document::Title { "{props.title}" }
        document::Style { {BASE_STYLES} }
        // Theme init runs immediately (no DOM needed) to prevent flash
        document::Script { {script} }

        main { class: "container",
            {props.children}
        }
        footer {
            class: "container",
            style: "display:flex;justify-content:space-between;align-items:center;",
            small { "theme-sync v{version}" }
            ThemeSwitcher {}
        }
    }
}
