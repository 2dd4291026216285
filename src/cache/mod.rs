//! The translation cache.
//!
//! A [`TranslationCache`] resolves every identifier of its
//! [`IdentifierSet`](crate::identifiers::IdentifierSet) through a
//! [`ResourceLoader`] when [`init`](TranslationCache::init) is called, and
//! serves the results synchronously afterwards.
//!
//! # Invariants
//!
//! 1. **Lookups never block or fail**: [`translation`](TranslationCache::translation)
//!    returns the cached value, or `[TOKEN]` when there is none.
//!
//! 2. **Batches apply atomically**: the mapping lives behind a single
//!    `Arc` that is swapped once per completed batch, so readers see either
//!    all of a batch or none of it.
//!
//! 3. **Merging, not replacing**: a batch overwrites only the tokens it
//!    resolved. Unresolved tokens are never written.
//!
//! 4. **No cancellation**: a new `init` does not stop an in-flight one. Under
//!    [`UpdatePolicy::LastCompletion`] the batch completing last wins.

mod report;
mod settings;

pub use report::{InitHandle, ResolutionReport};
pub use settings::{CacheSettings, UpdatePolicy};

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;

use crate::identifiers::IdentifierSet;
use crate::loader::ResourceLoader;
use crate::locales::{candidate_languages, resource_locations};

/// Token to resolved display string.
pub type Translations = BTreeMap<String, String>;

/// Capacity of the diagnostic report channel.
const REPORT_CHANNEL_CAPACITY: usize = 16;

/// Placeholder rendered for a token without a cached translation.
///
/// Upper-casing makes untranslated menu entries easy to spot.
pub fn placeholder(token: &str) -> String {
    format!("[{}]", token.to_uppercase())
}

/// Cheaply cloneable handle to a translation cache.
///
/// All clones share the same state; pass clones to whatever needs lookups
/// (menus, the IPC responder).
#[derive(Clone)]
pub struct TranslationCache {
    inner: Arc<Inner>,
}

struct Inner {
    settings: CacheSettings,
    loader: Arc<dyn ResourceLoader>,
    language: RwLock<String>,
    translations: RwLock<Arc<Translations>>,
    generation: AtomicU64,
    reports: broadcast::Sender<ResolutionReport>,
}

impl TranslationCache {
    /// Create an empty cache using `loader`.
    pub fn new(loader: impl ResourceLoader + 'static, settings: CacheSettings) -> Self {
        Self::with_loader(Arc::new(loader), settings)
    }

    /// Create an empty cache sharing an existing loader.
    pub fn with_loader(loader: Arc<dyn ResourceLoader>, settings: CacheSettings) -> Self {
        let (reports, _) = broadcast::channel(REPORT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                language: RwLock::new(settings.default_language.clone()),
                translations: RwLock::new(Arc::new(Translations::new())),
                generation: AtomicU64::new(0),
                settings,
                loader,
                reports,
            }),
        }
    }

    /// Resolve all identifiers for `language`.
    ///
    /// The active language changes immediately; translations follow when the
    /// returned handle completes.
    pub fn init(&self, language: &str) -> InitHandle {
        self.init_with_callback(language, |_| {})
    }

    /// Resolve all identifiers for `language`, then call `callback` once with
    /// the full mapping as it stands after this batch was applied.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn init_with_callback<F>(&self, language: &str, callback: F) -> InitHandle
    where
        F: FnOnce(&Translations) + Send + 'static,
    {
        let settings = &self.inner.settings;

        // The newest generation always belongs to the active language.
        let generation = {
            let mut active = self.inner.language.write().unwrap_or_else(PoisonError::into_inner);
            *active = language.to_string();
            self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let languages = candidate_languages(language, &settings.candidate_languages);
        let resources = resource_locations(&settings.locales_dir, language, &settings.resource_files);
        tracing::debug!(
            generation,
            language = %language,
            candidates = ?languages,
            resources = ?resources,
            "Resolving translations"
        );

        let context = self.inner.loader.create_context(&languages, &resources);
        let inner = Arc::clone(&self.inner);
        let language = language.to_string();

        let task = tokio::spawn(async move {
            let identifiers = inner.settings.identifiers.clone();
            let values = context.format_values(identifiers.as_slice()).await;
            drop(context);
            inner.apply(generation, language, &identifiers, values, callback)
        });

        InitHandle::new(task)
    }

    /// Cached translation for `token`, or its placeholder.
    pub fn translation(&self, token: &str) -> String {
        let translations = self.inner.translations.read().unwrap_or_else(PoisonError::into_inner);
        match translations.get(token) {
            Some(value) => value.clone(),
            None => placeholder(token),
        }
    }

    /// The full current mapping.
    pub fn snapshot(&self) -> Arc<Translations> {
        Arc::clone(&self.inner.translations.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// The active language.
    pub fn language(&self) -> String {
        self.inner.language.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Tokens resolved on every `init`.
    pub fn identifiers(&self) -> &IdentifierSet {
        &self.inner.settings.identifiers
    }

    /// Subscribe to a report for every completed batch.
    pub fn subscribe(&self) -> broadcast::Receiver<ResolutionReport> {
        self.inner.reports.subscribe()
    }
}

impl Inner {
    fn apply<F>(
        &self,
        generation: u64,
        language: String,
        identifiers: &IdentifierSet,
        values: Vec<Option<String>>,
        callback: F,
    ) -> ResolutionReport
    where
        F: FnOnce(&Translations),
    {
        let mut batch = Vec::with_capacity(identifiers.len());
        let mut unresolved = Vec::new();
        let mut values = values.into_iter();
        for token in identifiers.iter() {
            match values.next().flatten() {
                Some(value) => batch.push((token.to_string(), value)),
                None => unresolved.push(token.to_string()),
            }
        }
        let resolved = batch.len();

        let (snapshot, discarded) = {
            let mut current = self.translations.write().unwrap_or_else(PoisonError::into_inner);
            let stale = self.settings.policy == UpdatePolicy::LatestCall
                && self.generation.load(Ordering::SeqCst) != generation;

            if stale {
                (Arc::clone(&current), true)
            } else {
                let mut next = Translations::clone(&current);
                next.extend(batch);
                *current = Arc::new(next);
                (Arc::clone(&current), false)
            }
        };

        if discarded {
            tracing::debug!(generation, language = %language, "Discarding superseded batch");
        } else if !unresolved.is_empty() {
            tracing::warn!(
                generation,
                language = %language,
                count = unresolved.len(),
                tokens = ?unresolved,
                "Unresolved translations"
            );
        }

        let report = ResolutionReport {
            generation,
            language,
            resolved,
            unresolved,
            discarded,
            completed_at: chrono::Utc::now(),
        };
        // No subscribers is fine.
        let _ = self.reports.send(report.clone());

        callback(&snapshot);
        report
    }
}

impl std::fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCache")
            .field("language", &self.language())
            .field("cached", &self.snapshot().len())
            .field("policy", &self.inner.settings.policy)
            .finish()
    }
}
