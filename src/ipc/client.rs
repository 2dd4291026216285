//! Requester side of the IPC channel.

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use super::{Request, Response, TRANSLATIONS_CHANNEL};
use crate::cache::Translations;
use crate::error::{Error, Result};

/// Sends one request per connection to a coordinator.
#[derive(Debug, Clone)]
pub struct IpcClient {
    address: String,
}

impl IpcClient {
    /// Client for the coordinator at `address`.
    pub fn new(address: impl Into<String>) -> Self {
        Self { address: address.into() }
    }

    /// Coordinator address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Send a request on `channel` and wait for its reply.
    pub async fn request(&self, channel: &str) -> Result<Value> {
        let stream = TcpStream::connect(&self.address).await?;
        let (reader, mut writer) = stream.into_split();

        let mut frame = serde_json::to_string(&Request::new(channel))?;
        frame.push('\n');
        writer.write_all(frame.as_bytes()).await?;

        let line = BufReader::new(reader)
            .lines()
            .next_line()
            .await?
            .ok_or_else(|| Error::ipc("connection closed before a response was received"))?;

        let response: Response = serde_json::from_str(&line)?;
        match (response.value, response.error) {
            (_, Some(error)) => Err(Error::ipc(error)),
            (Some(value), None) => Ok(value),
            (None, None) => Err(Error::ipc("empty response")),
        }
    }

    /// Fetch the coordinator's full translation mapping.
    pub async fn translations(&self) -> Result<Translations> {
        let value = self.request(TRANSLATIONS_CHANNEL).await?;
        Ok(serde_json::from_value(value)?)
    }
}
