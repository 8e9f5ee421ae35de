//! ThemeController - keeps theme mode, persisted choice and root styling in sync
//!
//! Lifecycle:
//! - `new`: mode is unset, nothing is read or written yet
//! - `mount`: read the stored choice once, resolve, apply, subscribe to
//!   system preference changes
//! - `set_mode` / `toggle`: explicit override, wins over system events until
//!   unmount
//! - `unmount`: release the subscription, mode goes back to unset
//!
//! Resolution: stored choice if there is one, else the system signal.
//! Side effects run on every mode change: toggle the dark class on the
//! styling target, then write the mode to storage.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::mode::ThemeMode;
use super::preference::{Subscription, SystemPreference};
use super::store::KeyValueStore;
use super::styling::StylingTarget;
use crate::config::ThemeConfig;

type Observer = Box<dyn FnMut(ThemeMode)>;

struct State {
    storage_key: String,
    dark_class: String,
    store: Box<dyn KeyValueStore>,
    target: Box<dyn StylingTarget>,
    mode: Option<ThemeMode>,
    /// Stored choice captured at mount
    stored: Option<ThemeMode>,
    /// An explicit set_mode happened during this mount
    overridden: bool,
}

/// State reachable from the system preference listener.
struct Shared {
    state: RefCell<State>,
    observers: RefCell<Vec<Observer>>,
}

impl Shared {
    fn resolve(&self, prefers_dark: bool) {
        let mode = {
            let state = self.state.borrow();
            if state.overridden {
                debug!(
                    "Ignoring system preference (prefers_dark={}): explicit mode is active",
                    prefers_dark
                );
                return;
            }
            state
                .stored
                .unwrap_or_else(|| ThemeMode::from_system(prefers_dark))
        };
        self.apply(mode);
    }

    fn apply(&self, mode: ThemeMode) {
        {
            let mut state = self.state.borrow_mut();
            if state.mode == Some(mode) {
                return;
            }
            state.mode = Some(mode);

            if let Err(e) = state.target.toggle_class(&state.dark_class, mode.is_dark()) {
                warn!("Failed to toggle '{}' class: {}", state.dark_class, e);
            }
            if let Err(e) = state.store.set(&state.storage_key, mode.as_str()) {
                warn!("Failed to persist theme '{}': {}", mode, e);
            }
        }

        info!("Theme mode is now {}", mode);
        self.notify(mode);
    }

    fn notify(&self, mode: ThemeMode) {
        let mut observers = std::mem::take(&mut *self.observers.borrow_mut());
        for observer in observers.iter_mut() {
            observer(mode);
        }
        // Keep anything registered while we were notifying
        let mut slot = self.observers.borrow_mut();
        observers.append(&mut slot);
        *slot = observers;
    }
}

/// Reactive dark/light theme cell bound to injected platform capabilities.
pub struct ThemeController {
    shared: Rc<Shared>,
    preference: Box<dyn SystemPreference>,
    subscription: Option<Subscription>,
}

impl ThemeController {
    pub fn new(
        config: &ThemeConfig,
        store: impl KeyValueStore + 'static,
        target: impl StylingTarget + 'static,
        preference: impl SystemPreference + 'static,
    ) -> Self {
        let state = State {
            storage_key: config.storage_key.clone(),
            dark_class: config.dark_class.clone(),
            store: Box::new(store),
            target: Box::new(target),
            mode: None,
            stored: None,
            overridden: false,
        };

        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(state),
                observers: RefCell::new(Vec::new()),
            }),
            preference: Box::new(preference),
            subscription: None,
        }
    }

    /// Current mode, `None` until the first resolution.
    pub fn mode(&self) -> Option<ThemeMode> {
        self.shared.state.borrow().mode
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Explicitly choose a mode. System preference changes are ignored for
    /// the rest of this mount.
    pub fn set_mode(&self, mode: ThemeMode) {
        self.shared.state.borrow_mut().overridden = true;
        self.shared.apply(mode);
    }

    /// Flip between dark and light. An unset mode becomes dark.
    pub fn toggle(&self) -> ThemeMode {
        let next = self.mode().map_or(ThemeMode::Dark, ThemeMode::opposite);
        self.set_mode(next);
        next
    }

    /// Register a callback run after each mode change.
    ///
    /// Observers run after side effects; they must not register further
    /// observers expecting to see the same change.
    pub fn on_change(&self, observer: impl FnMut(ThemeMode) + 'static) {
        self.shared.observers.borrow_mut().push(Box::new(observer));
    }

    /// Resolve the initial mode and start following the system preference.
    ///
    /// A second call while mounted does nothing.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            debug!("Theme controller already mounted");
            return;
        }

        let stored = {
            let mut state = self.shared.state.borrow_mut();
            let stored = match state.store.get(&state.storage_key) {
                Ok(value) => value.as_deref().and_then(ThemeMode::from_stored),
                Err(e) => {
                    warn!("Failed to read stored theme: {}", e);
                    None
                }
            };
            state.stored = stored;
            state.overridden = false;
            stored
        };

        let prefers_dark = self.preference.prefers_dark();
        debug!(
            "Mounting theme controller (stored={:?}, prefers_dark={})",
            stored, prefers_dark
        );
        self.shared.resolve(prefers_dark);

        let weak = Rc::downgrade(&self.shared);
        self.subscription = Some(self.preference.subscribe(Rc::new(move |prefers_dark| {
            if let Some(shared) = weak.upgrade() {
                shared.resolve(prefers_dark);
            }
        })));
    }

    /// Stop following the system preference. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        let Some(mut subscription) = self.subscription.take() else {
            return;
        };
        subscription.release();

        let mut state = self.shared.state.borrow_mut();
        state.mode = None;
        state.overridden = false;
        debug!("Theme controller unmounted");
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("ThemeController")
            .field("mode", &state.mode)
            .field("stored", &state.stored)
            .field("overridden", &state.overridden)
            .field("mounted", &self.subscription.is_some())
            .finish()
    }
}
