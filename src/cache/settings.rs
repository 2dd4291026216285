//! Static inputs for a [`TranslationCache`](super::TranslationCache).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::identifiers::IdentifierSet;
use crate::locales::{CANDIDATE_LANGUAGES, DEFAULT_LANGUAGE, DEFAULT_LOCALES_DIR, RESOURCE_FILES};

/// How overlapping `init` batches are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdatePolicy {
    /// Every completed batch is merged; the batch finishing last wins.
    #[default]
    LastCompletion,
    /// A batch is merged only if no newer `init` call was made before it
    /// completed.
    LatestCall,
}

/// Everything a cache needs besides its loader.
#[derive(Debug, Clone, bon::Builder)]
pub struct CacheSettings {
    /// Directory with one subdirectory per language.
    #[builder(into, default = PathBuf::from(DEFAULT_LOCALES_DIR))]
    pub locales_dir: PathBuf,

    /// Configured candidate languages, in preference order.
    #[builder(default = CANDIDATE_LANGUAGES.iter().map(ToString::to_string).collect())]
    pub candidate_languages: Vec<String>,

    /// Resource file names read from each language directory.
    #[builder(default = RESOURCE_FILES.iter().map(ToString::to_string).collect())]
    pub resource_files: Vec<String>,

    /// Active language before the first `init`.
    #[builder(into, default = DEFAULT_LANGUAGE.to_string())]
    pub default_language: String,

    /// Tokens resolved on every `init`.
    #[builder(default)]
    pub identifiers: IdentifierSet,

    /// Overlapping batch policy.
    #[builder(default)]
    pub policy: UpdatePolicy,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
