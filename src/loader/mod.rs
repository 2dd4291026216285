//! Resource loaders: turn a language list and resource locations into
//! resolved strings.
//!
//! A [`ResourceLoader`] creates one [`LoaderContext`] per `init` call. The
//! context owns whatever it needs to answer a single batch request and is
//! dropped once that batch completes. Loaders never report failure: a token
//! that cannot be resolved comes back as `None`.

mod fluent;

pub use fluent::FluentLoader;

use std::collections::HashMap;
use std::path::PathBuf;

use futures::future::BoxFuture;

/// Factory for resolution sessions.
pub trait ResourceLoader: Send + Sync {
    /// Create a context bound to `languages` (requested language first) and
    /// the resource files to read.
    fn create_context(&self, languages: &[String], resources: &[PathBuf]) -> Box<dyn LoaderContext>;
}

/// A single resolution session.
pub trait LoaderContext: Send + Sync {
    /// Resolve `ids` in order. The returned vector has one entry per id;
    /// `None` marks a token that could not be resolved.
    fn format_values<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, Vec<Option<String>>>;
}

/// In-memory loader keyed by language.
///
/// Resolves from the first candidate language only, the same way the file
/// based loader only reads the requested language's directory.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    languages: HashMap<String, HashMap<String, String>>,
}

impl StaticLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) the messages for a language.
    pub fn with_language<I, K, V>(mut self, language: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.languages
            .entry(language.into())
            .or_default()
            .extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl ResourceLoader for StaticLoader {
    fn create_context(&self, languages: &[String], _resources: &[PathBuf]) -> Box<dyn LoaderContext> {
        let messages = languages
            .first()
            .and_then(|language| self.languages.get(language))
            .cloned()
            .unwrap_or_default();
        Box::new(StaticContext { messages })
    }
}

struct StaticContext {
    messages: HashMap<String, String>,
}

impl LoaderContext for StaticContext {
    fn format_values<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, Vec<Option<String>>> {
        Box::pin(async move { ids.iter().map(|id| self.messages.get(id).cloned()).collect() })
    }
}
