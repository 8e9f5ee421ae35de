//! Platform backends and the controller wired to them.
//!
//! - wasm32: localStorage, `<html>` class list, `matchMedia`
//! - native: state file, in-memory class list, OS setting via `dark-light`

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{DocumentRoot, LocalStorage, MediaQuery};

use crate::config::ThemeConfig;
use crate::theme::ThemeController;

/// Controller bound to the current target's capabilities (unmounted).
#[cfg(target_arch = "wasm32")]
pub fn default_controller(config: &ThemeConfig) -> ThemeController {
    ThemeController::new(
        config,
        LocalStorage,
        DocumentRoot,
        MediaQuery::new(&config.media_query),
    )
}

/// Controller bound to the current target's capabilities (unmounted).
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub fn default_controller(config: &ThemeConfig) -> ThemeController {
    use crate::theme::{ClassList, FileStore, OsPreference};

    ThemeController::new(
        config,
        FileStore::new(&config.state_file),
        ClassList::new(),
        OsPreference::new(),
    )
}

/// Controller bound to the current target's capabilities (unmounted).
#[cfg(all(not(feature = "native"), not(target_arch = "wasm32")))]
pub fn default_controller(config: &ThemeConfig) -> ThemeController {
    use crate::theme::{ClassList, ManualPreference, MemoryStore};

    ThemeController::new(
        config,
        MemoryStore::new(),
        ClassList::new(),
        ManualPreference::new(false),
    )
}
