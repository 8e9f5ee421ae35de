//! Configuration management

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeConfig {
    /// Storage key holding the explicit choice
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Class put on the document root while dark
    #[serde(default = "default_dark_class")]
    pub dark_class: String,

    /// Media query observed for the system preference (browser only)
    #[serde(default = "default_media_query")]
    pub media_query: String,

    /// State file used instead of localStorage on native hosts
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// How often the native watcher re-checks the OS setting
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_storage_key() -> String {
    "theme".to_string()
}

fn default_dark_class() -> String {
    "dark".to_string()
}

fn default_media_query() -> String {
    "(prefers-color-scheme: dark)".to_string()
}

fn default_state_file() -> PathBuf {
    PathBuf::from("theme-state.json")
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            dark_class: default_dark_class(),
            media_query: default_media_query(),
            state_file: default_state_file(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ThemeConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// Load config from `theme-sync.{toml,json,...}` in the working directory
/// and `THEME_SYNC_*` environment variables.
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub fn load_config() -> anyhow::Result<ThemeConfig> {
    load_config_from(std::path::Path::new("theme-sync"))
}

/// Same as [`load_config`] with an explicit file stem.
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub fn load_config_from(file_stem: &std::path::Path) -> anyhow::Result<ThemeConfig> {
    let config = ::config::Config::builder()
        // Load from config file if it exists
        .add_source(::config::File::with_name(&file_stem.to_string_lossy()).required(false))
        // Override with environment variables (THEME_SYNC_STORAGE_KEY, THEME_SYNC_DARK_CLASS, etc.)
        .add_source(::config::Environment::with_prefix("THEME_SYNC").try_parsing(true))
        .build()?;

    Ok(config.try_deserialize()?)
}
