//! System theme preference observation.
//!
//! The platform owns the "prefers dark" signal; we only read it and listen
//! for changes. Every listener registration hands back a [`Subscription`]
//! that unregisters it when released or dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

/// Callback invoked with the new "prefers dark" value.
pub type Listener = Rc<dyn Fn(bool)>;

/// Live system dark-mode signal (media query, OS setting, ...).
pub trait SystemPreference {
    fn prefers_dark(&self) -> bool;

    /// Register `listener` for change notifications.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

/// Handle to a registered listener.
///
/// Releasing is idempotent. Dropping an active subscription releases it.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release (platform has no change events).
    pub fn inert() -> Self {
        Self { release: None }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[derive(Default)]
struct ManualInner {
    prefers_dark: bool,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Host-driven preference signal. Clones share state.
///
/// Used in tests, and as the building block for backends that learn about
/// changes by polling.
#[derive(Clone, Default)]
pub struct ManualPreference {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualPreference {
    pub fn new(prefers_dark: bool) -> Self {
        let preference = Self::default();
        preference.inner.borrow_mut().prefers_dark = prefers_dark;
        preference
    }

    /// Update the signal. Listeners are notified only on an actual change.
    pub fn set(&self, prefers_dark: bool) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            if inner.prefers_dark == prefers_dark {
                return;
            }
            inner.prefers_dark = prefers_dark;
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };

        trace!(
            "System preference changed (prefers_dark={}), notifying {} listener(s)",
            prefers_dark,
            listeners.len()
        );
        for listener in listeners {
            listener(prefers_dark);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl SystemPreference for ManualPreference {
    fn prefers_dark(&self) -> bool {
        self.inner.borrow().prefers_dark
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener));
            id
        };

        let weak: Weak<RefCell<ManualInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }
}

impl std::fmt::Debug for ManualPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualPreference")
            .field("prefers_dark", &inner.prefers_dark)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use os::OsPreference;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
mod os {
    use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

    use super::{Listener, ManualPreference, Subscription, SystemPreference};

    type ThemeDetector = fn() -> bool;

    /// OS-level light/dark setting.
    ///
    /// Operating systems don't push change events through `dark-light`, so
    /// callers drive [`OsPreference::poll`] from their own loop.
    #[derive(Debug, Clone)]
    pub struct OsPreference {
        signal: ManualPreference,
        detector: ThemeDetector,
    }

    impl OsPreference {
        pub fn new() -> Self {
            Self::with_detector(os_prefers_dark)
        }

        /// Use a custom detector instead of querying the OS.
        pub fn with_detector(detector: ThemeDetector) -> Self {
            Self {
                signal: ManualPreference::new(detector()),
                detector,
            }
        }

        /// Re-detect and notify listeners if the setting changed.
        pub fn poll(&self) {
            self.signal.set((self.detector)());
        }
    }

    impl Default for OsPreference {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SystemPreference for OsPreference {
        fn prefers_dark(&self) -> bool {
            self.signal.prefers_dark()
        }

        fn subscribe(&self, listener: Listener) -> Subscription {
            self.signal.subscribe(listener)
        }
    }

    fn os_prefers_dark() -> bool {
        matches!(detect_os_theme(), OsThemeMode::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recording_listener() -> (Listener, Rc<RefCell<Vec<bool>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let listener: Listener = Rc::new(move |dark| sink.borrow_mut().push(dark));
        (listener, seen)
    }

    #[test]
    fn test_manual_preference_notifies_on_change_only() {
        let pref = ManualPreference::new(false);
        let (listener, seen) = recording_listener();
        let _sub = pref.subscribe(listener);

        pref.set(false);
        pref.set(true);
        pref.set(true);
        pref.set(false);

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert!(!pref.prefers_dark());
    }

    #[test]
    fn test_release_stops_notifications() {
        let pref = ManualPreference::new(false);
        let (listener, seen) = recording_listener();
        let mut sub = pref.subscribe(listener);
        assert_eq!(pref.listener_count(), 1);

        sub.release();
        assert!(!sub.is_active());
        assert_eq!(pref.listener_count(), 0);

        pref.set(true);
        assert!(seen.borrow().is_empty());

        // Second release is a no-op
        sub.release();
    }

    #[test]
    fn test_drop_releases() {
        let pref = ManualPreference::new(true);
        {
            let (listener, _) = recording_listener();
            let _sub = pref.subscribe(listener);
            assert_eq!(pref.listener_count(), 1);
        }
        assert_eq!(pref.listener_count(), 0);
    }

    #[test]
    fn test_release_after_source_dropped() {
        let pref = ManualPreference::new(false);
        let (listener, _) = recording_listener();
        let mut sub = pref.subscribe(listener);
        drop(pref);
        sub.release();
    }

    #[test]
    fn test_inert_subscription() {
        let released = Rc::new(Cell::new(false));
        let mut inert = Subscription::inert();
        assert!(!inert.is_active());
        inert.release();

        let flag = released.clone();
        let sub = Subscription::new(move || flag.set(true));
        drop(sub);
        assert!(released.get());
    }

    #[cfg(all(feature = "native", not(target_arch = "wasm32")))]
    #[test]
    fn test_os_preference_poll_uses_detector() {
        let pref = OsPreference::with_detector(|| true);
        assert!(pref.prefers_dark());

        let (listener, seen) = recording_listener();
        let _sub = pref.subscribe(listener);
        pref.poll();
        // Detector still reports dark, so nothing changed
        assert!(seen.borrow().is_empty());
    }
}
