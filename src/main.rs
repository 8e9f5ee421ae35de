//! theme-sync binary
//!
//! In the browser this launches the Dioxus app. On native hosts it is a small
//! CLI over the same controller, with a state file standing in for
//! localStorage and the OS setting standing in for `prefers-color-scheme`.

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    dioxus::launch(theme_sync::app::App);
}

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
mod native {
    use anyhow::Result;
    use clap::Parser;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    use theme_sync::config::load_config;
    use theme_sync::theme::{ClassList, FileStore, OsPreference, ThemeController, ThemeMode};

    #[derive(Debug, Parser)]
    #[command(name = "theme-sync", version, about = "Resolve, set or follow the dark/light theme")]
    struct Cli {
        /// Explicitly choose a mode (dark or light)
        mode: Option<ThemeMode>,

        /// Flip the current mode
        #[arg(long, conflicts_with = "mode")]
        toggle: bool,

        /// Keep running and follow OS theme changes
        #[arg(long)]
        watch: bool,
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        // Initialize logging (stderr, so stdout only carries modes)
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "theme_sync=warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        let config = load_config()?;
        tracing::debug!(?config, "Configuration loaded");

        let preference = OsPreference::new();
        let mut controller = ThemeController::new(
            &config,
            FileStore::new(&config.state_file),
            ClassList::new(),
            preference.clone(),
        );
        controller.on_change(|mode| println!("{}", mode));
        controller.mount();

        if let Some(mode) = cli.mode {
            controller.set_mode(mode);
        } else if cli.toggle {
            controller.toggle();
        }

        if !cli.watch {
            return Ok(());
        }

        tracing::info!(
            "Watching OS theme every {}ms (state in {})",
            config.poll_interval_ms,
            config.state_file.display()
        );
        loop {
            std::thread::sleep(config.poll_interval());
            preference.poll();
        }
    }
}
