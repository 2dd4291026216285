//! One-shot resolution commands.

use super::Context;
use crate::cache::TranslationCache;
use crate::error::Result;
use crate::output::TranslationRow;

/// Resolve the configured language and wait for the batch to land.
async fn resolved_cache(ctx: &Context) -> Result<TranslationCache> {
    let cache = ctx.cache();
    let report = cache.init(&ctx.config.language).wait().await?;

    if !report.unresolved.is_empty() {
        ctx.output.warn(&format!(
            "{} of {} identifiers have no {} translation",
            report.unresolved.len(),
            cache.identifiers().len(),
            report.language
        ));
    }
    Ok(cache)
}

/// Print the translation (or placeholder) for each token.
pub async fn lookup(ctx: &Context, tokens: &[String]) -> Result<()> {
    let cache = resolved_cache(ctx).await?;
    let rows: Vec<TranslationRow> = tokens
        .iter()
        .map(|token| TranslationRow { token: token.clone(), translation: cache.translation(token) })
        .collect();
    ctx.output.rows(&rows)
}

/// Print every cached translation.
pub async fn dump(ctx: &Context) -> Result<()> {
    let cache = resolved_cache(ctx).await?;
    ctx.output.mapping(&cache.snapshot())
}

/// Print the identifier set.
pub fn identifiers(ctx: &Context) -> Result<()> {
    let settings = ctx.config.cache_settings();
    let tokens: Vec<&str> = settings.identifiers.iter().collect();
    ctx.output.list(&tokens)
}
