//! Language normalization, candidate lists and resource locations.

use std::path::{Path, PathBuf};

/// Language used until the first `init` call.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Languages shipped with the application, in fallback preference order.
pub const CANDIDATE_LANGUAGES: &[&str] = &["en-US", "nl-NL", "pt-BR", "bn-BD"];

/// Resource files containing menu identifiers, looked up per language.
pub const RESOURCE_FILES: &[&str] = &["menu.ftl", "app.ftl", "password.ftl"];

/// Default directory holding one subdirectory per language.
pub const DEFAULT_LOCALES_DIR: &str = "locales";

/// Normalize a POSIX locale string to BCP 47 form.
///
/// - "en_US.UTF-8" -> "en-US"
/// - "nl_NL" -> "nl-NL"
/// - "en" -> "en"
pub fn normalize_language(locale: &str) -> String {
    let locale = locale.split('.').next().unwrap_or(locale);
    let locale = locale.split('@').next().unwrap_or(locale);
    locale.replace('_', "-")
}

/// Build the ordered candidate list handed to the resource loader.
///
/// The requested language always comes first, followed by the configured
/// candidates in their configured order, without repeats.
pub fn candidate_languages<S: AsRef<str>>(requested: &str, configured: &[S]) -> Vec<String> {
    let mut languages = vec![requested.to_string()];
    for candidate in configured {
        let candidate = candidate.as_ref();
        if !languages.iter().any(|l| l == candidate) {
            languages.push(candidate.to_string());
        }
    }
    languages
}

/// Build resource locations as `<base>/<language>/<file>` for each file.
pub fn resource_locations<S: AsRef<str>>(base: &Path, language: &str, files: &[S]) -> Vec<PathBuf> {
    let dir = base.join(language);
    files.iter().map(|file| dir.join(file.as_ref())).collect()
}
