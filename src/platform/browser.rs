//! Browser capabilities over web-sys: localStorage, `<html>` class list,
//! and `matchMedia` change events.

use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::{Result, ThemeError};
use crate::theme::{KeyValueStore, Listener, StylingTarget, Subscription, SystemPreference};

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or(ThemeError::Unavailable("window"))
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage> {
        window()?
            .local_storage()
            .map_err(|e| ThemeError::Storage(describe(&e)))?
            .ok_or(ThemeError::Unavailable("localStorage"))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ThemeError::Storage(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ThemeError::Storage(describe(&e)))
    }
}

/// `document.documentElement`
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRoot;

impl DocumentRoot {
    fn element() -> Result<web_sys::Element> {
        window()?
            .document()
            .ok_or(ThemeError::Unavailable("document"))?
            .document_element()
            .ok_or(ThemeError::Unavailable("document element"))
    }
}

impl StylingTarget for DocumentRoot {
    fn toggle_class(&self, name: &str, present: bool) -> Result<()> {
        Self::element()?
            .class_list()
            .toggle_with_force(name, present)
            .map(|_| ())
            .map_err(|e| ThemeError::Styling(describe(&e)))
    }

    fn has_class(&self, name: &str) -> bool {
        Self::element()
            .map(|root| root.class_list().contains(name))
            .unwrap_or(false)
    }
}

/// `window.matchMedia(query)`
pub struct MediaQuery {
    list: Option<web_sys::MediaQueryList>,
}

impl MediaQuery {
    pub fn new(query: &str) -> Self {
        let list = window()
            .ok()
            .and_then(|w| w.match_media(query).ok().flatten());
        if list.is_none() {
            warn!("matchMedia('{}') unavailable, assuming light preference", query);
        }
        Self { list }
    }
}

impl SystemPreference for MediaQuery {
    fn prefers_dark(&self) -> bool {
        self.list.as_ref().map_or(false, |list| list.matches())
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let Some(list) = self.list.clone() else {
            return Subscription::inert();
        };

        let closure = Closure::<dyn FnMut(web_sys::MediaQueryListEvent)>::new(
            move |event: web_sys::MediaQueryListEvent| listener(event.matches()),
        );

        if let Err(e) =
            list.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
        {
            warn!("Failed to listen for theme changes: {}", describe(&e));
            return Subscription::inert();
        }

        Subscription::new(move || {
            if let Err(e) = list
                .remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            {
                warn!("Failed to stop listening for theme changes: {}", describe(&e));
            }
            drop(closure);
        })
    }
}
