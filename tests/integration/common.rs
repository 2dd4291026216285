//! Common test utilities.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use futures::future::BoxFuture;
use menu_locale::loader::{LoaderContext, ResourceLoader};
use tempfile::TempDir;
use tokio::sync::oneshot;

/// Create a locales tree: `files` are `(language, file name, contents)`.
pub fn locales_dir(files: &[(&str, &str, &str)]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join("locales");
    for (language, name, contents) in files {
        let dir = root.join(language);
        std::fs::create_dir_all(&dir).expect("Failed to create language dir");
        std::fs::write(dir.join(name), contents).expect("Failed to write resource");
    }
    (temp_dir, root)
}

/// Write a YAML config file into `dir`.
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(&path, yaml).expect("Failed to write config");
    path
}

/// Loader whose batches complete only when the test releases them.
///
/// Each language gets one gate; the context created for that language waits
/// on it before answering.
#[derive(Default)]
pub struct GatedLoader {
    messages: HashMap<String, HashMap<String, String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl GatedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add messages for `language`; returns the sender releasing its batch.
    pub fn language(&mut self, language: &str, messages: &[(&str, &str)]) -> oneshot::Sender<()> {
        self.messages.insert(
            language.to_string(),
            messages.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
        );
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(language.to_string(), rx);
        tx
    }
}

impl ResourceLoader for GatedLoader {
    fn create_context(&self, languages: &[String], _resources: &[PathBuf]) -> Box<dyn LoaderContext> {
        let language = languages.first().cloned().unwrap_or_default();
        Box::new(GatedContext {
            messages: self.messages.get(&language).cloned().unwrap_or_default(),
            gate: Mutex::new(self.gates.lock().unwrap().remove(&language)),
        })
    }
}

struct GatedContext {
    messages: HashMap<String, String>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl LoaderContext for GatedContext {
    fn format_values<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, Vec<Option<String>>> {
        Box::pin(async move {
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            ids.iter().map(|id| self.messages.get(id).cloned()).collect()
        })
    }
}
