//! Dark/light theme state and the platform capabilities it drives.
//!
//! - [`ThemeController`]: the reactive mode cell and its lifecycle
//! - [`ThemeMode`]: dark or light
//! - [`KeyValueStore`], [`StylingTarget`], [`SystemPreference`]: injected
//!   capabilities, with in-memory and native implementations

mod controller;
mod mode;
mod preference;
mod store;
mod styling;

pub use controller::ThemeController;
pub use mode::ThemeMode;
pub use preference::{Listener, ManualPreference, Subscription, SystemPreference};
pub use store::{KeyValueStore, MemoryStore};
pub use styling::{ClassList, StylingTarget};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use preference::OsPreference;
