//! Theme switcher hook and component for light/dark modes.

use dioxus::prelude::*;

use crate::config::ThemeConfig;
use crate::platform::default_controller;
use crate::theme::{ThemeController, ThemeMode};

/// The `[mode, set_mode]` pair handed to components.
#[derive(Clone, Copy)]
pub struct UseThemeSwitcher {
    mode: Signal<Option<ThemeMode>>,
    controller: Signal<ThemeController>,
}

impl UseThemeSwitcher {
    /// Current mode (reactive). `None` until the controller has mounted.
    pub fn mode(&self) -> Option<ThemeMode> {
        (self.mode)()
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        self.controller.peek().set_mode(mode);
    }

    pub fn toggle(&self) -> ThemeMode {
        self.controller.peek().toggle()
    }
}

/// Theme state for this component and everything below it.
///
/// Builds the platform controller (localStorage, `<html>` classes and
/// `prefers-color-scheme` in the browser), mounts it and provides the handle
/// as context. Call once near the root; descendants use
/// [`use_theme_switcher`]. Reads [`ThemeConfig`] from context if an ancestor
/// provided one.
pub fn use_theme_provider() -> UseThemeSwitcher {
    use_theme_provider_with(|| {
        let config = try_consume_context::<ThemeConfig>().unwrap_or_default();
        default_controller(&config)
    })
}

/// [`use_theme_provider`] over a caller-built controller.
pub fn use_theme_provider_with(build: impl FnOnce() -> ThemeController) -> UseThemeSwitcher {
    // Mount with the component so the first render already has a mode
    let mut controller = use_signal(move || {
        let mut controller = build();
        controller.mount();
        controller
    });

    let mut mode = use_signal(|| controller.peek().mode());
    use_hook(move || {
        controller
            .peek()
            .on_change(move |next| mode.set(Some(next)));
    });

    // Release the media query listener with the component
    use_drop(move || {
        if let Ok(mut controller) = controller.try_write() {
            controller.unmount();
        }
    });

    use_context_provider(|| UseThemeSwitcher { mode, controller })
}

/// The `[mode, set_mode]` pair from the nearest [`use_theme_provider`].
///
/// Without a provider above, this component becomes the provider.
pub fn use_theme_switcher() -> UseThemeSwitcher {
    match try_use_context::<UseThemeSwitcher>() {
        Some(theme) => theme,
        None => use_theme_provider(),
    }
}

/// Theme switcher with light and dark options.
#[component]
pub fn ThemeSwitcher() -> Element {
    let theme = use_theme_switcher();
    let current = theme.mode();

    rsx! {
        div { class: "theme-switcher",
            button {
                id: "theme-light",
                class: if current == Some(ThemeMode::Light) { "active" } else { "" },
                onclick: move |_| theme.set_mode(ThemeMode::Light),
                "Light"
            }
            button {
                id: "theme-dark",
                class: if current == Some(ThemeMode::Dark) { "active" } else { "" },
                onclick: move |_| theme.set_mode(ThemeMode::Dark),
                "Dark"
            }
        }
    }
}

fn js_string(value: &str) -> String {
    // JSON string literals are valid JS; keep "</script>" from closing the tag
    serde_json::Value::from(value).to_string().replace("</", "<\\/")
}

/// Client-side JavaScript for initial theme setup (included in head).
/// Runs immediately to prevent flash of wrong theme.
pub fn theme_script(config: &ThemeConfig) -> String {
    format!(
        r#"
(function(){{
    const t = localStorage.getItem({key});
    const dark = t ? t === 'dark' : window.matchMedia({query}).matches;
    document.documentElement.classList.toggle({class}, dark);
}})();
"#,
        key = js_string(&config.storage_key),
        query = js_string(&config.media_query),
        class = js_string(&config.dark_class),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_script_defaults() {
        let script = theme_script(&ThemeConfig::default());
        assert!(script.contains(r#"localStorage.getItem("theme")"#));
        assert!(script.contains(r#"window.matchMedia("(prefers-color-scheme: dark)")"#));
        assert!(script.contains(r#"classList.toggle("dark", dark)"#));
    }

    #[test]
    fn test_theme_script_escapes_config() {
        let config = ThemeConfig {
            storage_key: "it's \"mine\"".to_string(),
            dark_class: "</script><b>".to_string(),
            ..ThemeConfig::default()
        };
        let script = theme_script(&config);
        assert!(script.contains(r#"getItem("it's \"mine\"")"#));
        assert!(!script.contains("</script>"));
        assert!(script.contains(r#"toggle("<\/script><b>", dark)"#));
    }

    mod hooks {
        use super::*;
        use std::cell::RefCell;
        use std::rc::Rc;
        use crate::theme::StylingTarget;

        use crate::theme::{ClassList, ManualPreference, MemoryStore};

        #[derive(Clone, Default)]
        struct Platform {
            store: MemoryStore,
            root: ClassList,
            system: ManualPreference,
            handles: Rc<RefCell<Vec<UseThemeSwitcher>>>,
        }

        fn record_handle(theme: UseThemeSwitcher) {
            consume_context::<Platform>().handles.borrow_mut().push(theme);
        }

        #[component]
        fn Consumer() -> Element {
            let theme = use_theme_switcher();
            use_hook(move || record_handle(theme));
            let label = theme.mode().map_or("unset", |mode| mode.as_str());
            rsx! { span { "{label}" } }
        }

        #[component]
        fn Root() -> Element {
            let theme = use_theme_provider_with(|| {
                let platform = consume_context::<Platform>();
                ThemeController::new(
                    &ThemeConfig::default(),
                    platform.store,
                    platform.root,
                    platform.system,
                )
            });
            use_hook(move || record_handle(theme));

            rsx! {
                Consumer {}
                Consumer {}
            }
        }

        fn launch(platform: &Platform) -> VirtualDom {
            let mut dom = VirtualDom::new(Root).with_root_context(platform.clone());
            dom.rebuild_in_place();
            dom
        }

        #[test]
        fn test_provider_mounts_and_resolves() {
            let platform = Platform {
                system: ManualPreference::new(true),
                ..Platform::default()
            };
            let dom = launch(&platform);

            assert_eq!(platform.system.listener_count(), 1);
            assert!(platform.root.has_class("dark"));
            assert_eq!(platform.store.peek("theme"), Some("dark".to_string()));

            let handles = platform.handles.borrow().clone();
            assert_eq!(handles.len(), 3);
            dom.in_runtime(|| {
                for theme in &handles {
                    assert_eq!(theme.mode(), Some(ThemeMode::Dark));
                }
            });
        }

        #[test]
        fn test_consumers_share_one_controller() {
            let platform = Platform::default();
            let dom = launch(&platform);
            assert_eq!(platform.system.listener_count(), 1);

            let handles = platform.handles.borrow().clone();
            let (switcher, status) = (handles[1], handles[2]);

            dom.in_runtime(|| {
                switcher.set_mode(ThemeMode::Dark);
                assert_eq!(status.mode(), Some(ThemeMode::Dark));

                // Explicit choice holds through system flips
                platform.system.set(true);
                platform.system.set(false);
                assert_eq!(switcher.mode(), Some(ThemeMode::Dark));
                assert_eq!(status.mode(), Some(ThemeMode::Dark));
            });

            assert!(platform.root.has_class("dark"));
            assert_eq!(platform.store.peek("theme"), Some("dark".to_string()));
        }

        #[test]
        fn test_system_change_reaches_signal() {
            let platform = Platform::default();
            let dom = launch(&platform);
            let status = platform.handles.borrow()[2];

            dom.in_runtime(|| {
                assert_eq!(status.mode(), Some(ThemeMode::Light));
                platform.system.set(true);
                assert_eq!(status.mode(), Some(ThemeMode::Dark));
            });
            assert!(platform.root.has_class("dark"));
        }

        #[test]
        fn test_drop_releases_subscription() {
            let platform = Platform::default();
            let dom = launch(&platform);
            assert_eq!(platform.system.listener_count(), 1);

            platform.handles.borrow_mut().clear();
            drop(dom);
            assert_eq!(platform.system.listener_count(), 0);

            platform.system.set(true);
            assert!(!platform.root.has_class("dark"));
        }
    }
}
