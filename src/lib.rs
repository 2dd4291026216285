//! Menu Locale
//!
//! A translation cache for multi-process desktop applications. One process
//! (the coordinator) resolves a fixed set of menu identifiers for the active
//! language and caches them; any code in that process reads them
//! synchronously, and peer processes fetch the whole mapping over IPC.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use menu_locale::cache::{CacheSettings, TranslationCache};
//! use menu_locale::ipc::{install_responder, IpcMain, ProcessRole};
//! use menu_locale::loader::FluentLoader;
//!
//! let cache = TranslationCache::new(FluentLoader::new(), CacheSettings::default());
//! cache.init_with_callback("nl-NL", |t| println!("{} translations", t.len()));
//!
//! // Never blocks: "[ABOUT]" until the batch above completes.
//! let label = cache.translation("about");
//!
//! let mut ipc = IpcMain::new();
//! install_responder(ProcessRole::Coordinator, &mut ipc, cache.clone());
//! ```
//!
//! The `menu-locale` binary wraps the same pieces:
//!
//! ```bash
//! menu-locale --language nl-NL lookup about quit
//! menu-locale serve                      # coordinator
//! menu-locale query                      # peer
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod ipc;
pub mod loader;
pub mod locales;
pub mod output;

pub use cache::{TranslationCache, Translations};
pub use cli::Cli;
pub use error::{Error, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the command-line front end with the given arguments.
pub async fn run(args: Vec<String>) -> Result<()> {
    use clap::Parser;

    let cli_args = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            use clap::error::ErrorKind;
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => return Ok(()),
                _ => return Err(Error::other("")),
            }
        },
    };

    if cli_args.debug {
        init_logging();
    }

    let mut config = config::Config::load(cli_args.config.as_deref())?;
    if let Some(language) = cli_args.language {
        config.language = locales::normalize_language(&language);
    }
    if let Some(dir) = cli_args.locales_dir {
        config.locales.dir = dir;
    }

    let output = output::Output::from_cli(&cli_args.output, cli_args.quiet)?;
    let ctx = commands::Context::new(config, output);

    commands::execute(&ctx, &cli_args.command).await
}

/// Initialize tracing/logging for debug mode.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("menu_locale=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
