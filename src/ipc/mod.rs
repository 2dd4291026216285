//! Cross-process lookup.
//!
//! Processes that cannot load resources themselves ask the coordinator
//! process for its translations over a request/response channel. Handlers
//! are synchronous: the requester waits for the reply, so a handler may only
//! read state that is already in memory.
//!
//! Frames are newline-delimited JSON:
//!
//! ```text
//! -> {"channel":"translations","payload":null}
//! <- {"value":{"about":"About","quit":"Quit"}}
//! ```
//!
//! Request lines are capped at [`MAX_FRAME_BYTES`].

mod client;
mod server;

pub use client::IpcClient;
pub use server::{IpcServer, MAX_FRAME_BYTES};

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::TranslationCache;

/// Channel answering with the full translation mapping.
pub const TRANSLATIONS_CHANNEL: &str = "translations";

/// Default loopback address for the coordinator.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:47820";

/// Role of the current process in the IPC topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessRole {
    /// Owns the cache and answers requests from peers.
    #[default]
    Coordinator,
    /// Asks the coordinator; installs no responders.
    Peer,
}

/// A request frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Channel name.
    pub channel: String,
    /// Request argument; ignored by the translations channel.
    #[serde(default)]
    pub payload: Value,
}

impl Request {
    /// Request on `channel` with no payload.
    pub fn new(channel: impl Into<String>) -> Self {
        Self { channel: channel.into(), payload: Value::Null }
    }
}

/// A response frame: either `value` or `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Handler return value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Transport-level failure (unknown channel, malformed frame).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Successful response.
    pub const fn value(value: Value) -> Self {
        Self { value: Some(value), error: None }
    }

    /// Error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self { value: None, error: Some(message.into()) }
    }
}

type Handler = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Registry of synchronous channel handlers.
#[derive(Clone, Default)]
pub struct IpcMain {
    handlers: HashMap<String, Handler>,
}

impl IpcMain {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `channel`, replacing any previous one.
    pub fn on<F>(&mut self, channel: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.handlers.insert(channel.into(), Arc::new(handler));
        self
    }

    /// Whether a handler is registered for `channel`.
    pub fn has_handler(&self, channel: &str) -> bool {
        self.handlers.contains_key(channel)
    }

    /// Invoke the handler for `channel`. `None` if nothing is registered.
    pub fn handle(&self, channel: &str, payload: &Value) -> Option<Value> {
        self.handlers.get(channel).map(|handler| handler(payload))
    }

    /// Answer a raw request line.
    pub fn respond(&self, line: &str) -> Response {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => return Response::error(format!("malformed request: {e}")),
        };

        match self.handle(&request.channel, &request.payload) {
            Some(value) => Response::value(value),
            None => Response::error(format!("no handler registered for channel '{}'", request.channel)),
        }
    }
}

impl std::fmt::Debug for IpcMain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut channels: Vec<_> = self.handlers.keys().collect();
        channels.sort();
        f.debug_struct("IpcMain").field("channels", &channels).finish()
    }
}

/// Install the `translations` responder if this process is the coordinator.
///
/// Returns whether the responder was installed.
pub fn install_responder(role: ProcessRole, ipc: &mut IpcMain, cache: TranslationCache) -> bool {
    if role != ProcessRole::Coordinator {
        tracing::debug!("Peer process, translations responder not installed");
        return false;
    }

    ipc.on(TRANSLATIONS_CHANNEL, move |_payload| translations_value(&cache));
    true
}

fn translations_value(cache: &TranslationCache) -> Value {
    let snapshot = cache.snapshot();
    Value::Object(
        snapshot
            .iter()
            .map(|(token, text)| (token.clone(), Value::String(text.clone())))
            .collect(),
    )
}
