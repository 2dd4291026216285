//! Loader backed by Project Fluent `.ftl` resources on disk.

use std::path::PathBuf;

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use futures::future::BoxFuture;
use unic_langid::LanguageIdentifier;

use super::{LoaderContext, ResourceLoader};

/// Reads `.ftl` files and resolves messages through a `FluentBundle`.
///
/// Nothing is read when the context is created; files are loaded and parsed
/// inside [`LoaderContext::format_values`], which is the only point where
/// resolution suspends.
#[derive(Debug, Clone, Copy, Default)]
pub struct FluentLoader;

impl FluentLoader {
    /// Create a new loader.
    pub const fn new() -> Self {
        Self
    }
}

impl ResourceLoader for FluentLoader {
    fn create_context(&self, languages: &[String], resources: &[PathBuf]) -> Box<dyn LoaderContext> {
        Box::new(FluentContext {
            locales: parse_languages(languages),
            resources: resources.to_vec(),
        })
    }
}

fn parse_languages(languages: &[String]) -> Vec<LanguageIdentifier> {
    let mut locales: Vec<LanguageIdentifier> = languages
        .iter()
        .filter_map(|language| match language.parse::<LanguageIdentifier>() {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(language = %language, error = %e, "Ignoring invalid language identifier");
                None
            },
        })
        .collect();

    if locales.is_empty() {
        locales.push(LanguageIdentifier::default());
    }
    locales
}

struct FluentContext {
    locales: Vec<LanguageIdentifier>,
    resources: Vec<PathBuf>,
}

impl FluentContext {
    async fn load_bundle(&self) -> FluentBundle<FluentResource> {
        let mut bundle = FluentBundle::new_concurrent(self.locales.clone());
        bundle.set_use_isolating(false);

        for path in &self.resources {
            let source = match tokio::fs::read_to_string(path).await {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable resource");
                    continue;
                },
            };

            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((resource, errors)) => {
                    tracing::warn!(
                        path = %path.display(),
                        errors = ?errors,
                        "Resource has syntax errors, keeping valid entries"
                    );
                    resource
                },
            };

            if let Err(errors) = bundle.add_resource(resource) {
                tracing::warn!(
                    path = %path.display(),
                    errors = ?errors,
                    "Duplicate message ids, first definition wins"
                );
            }
        }

        bundle
    }
}

fn format_message(bundle: &FluentBundle<FluentResource>, id: &str) -> Option<String> {
    let pattern = bundle.get_message(id)?.value()?;

    let mut errors = vec![];
    let value = bundle.format_pattern(pattern, None, &mut errors);
    if !errors.is_empty() {
        tracing::warn!(id = id, errors = ?errors, "Translation errors");
    }

    Some(value.into_owned())
}

impl LoaderContext for FluentContext {
    fn format_values<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, Vec<Option<String>>> {
        Box::pin(async move {
            let bundle = self.load_bundle().await;
            ids.iter().map(|id| format_message(&bundle, id)).collect()
        })
    }
}
