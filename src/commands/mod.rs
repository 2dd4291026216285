//! Command implementations.

mod lookup;
mod serve;

pub use lookup::{dump, identifiers, lookup};
pub use serve::{query, serve};

use clap::CommandFactory;

use crate::cache::TranslationCache;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::loader::FluentLoader;
use crate::output::Output;

/// Everything a command needs.
#[derive(Debug)]
pub struct Context {
    /// Effective configuration after CLI overrides.
    pub config: Config,
    /// Output writer.
    pub output: Output,
}

impl Context {
    /// Create a context.
    pub const fn new(config: Config, output: Output) -> Self {
        Self { config, output }
    }

    /// Build a Fluent-backed cache from the configuration.
    pub fn cache(&self) -> TranslationCache {
        TranslationCache::new(FluentLoader::new(), self.config.cache_settings())
    }
}

/// Execute a command.
pub async fn execute(ctx: &Context, command: &Commands) -> Result<()> {
    match command {
        Commands::Serve { address, peer } => serve(ctx, address.as_deref(), *peer).await,
        Commands::Lookup { tokens } => lookup(ctx, tokens).await,
        Commands::Dump => dump(ctx).await,
        Commands::Query { address } => query(ctx, address.as_deref()).await,
        Commands::Identifiers => identifiers(ctx),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "menu-locale", &mut std::io::stdout());
            Ok(())
        },
    }
}
