//! Loopback socket transport for [`IpcMain`].

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use super::{IpcMain, Response};
use crate::error::Result;

/// Longest request line accepted, newline excluded.
pub const MAX_FRAME_BYTES: usize = 64 * 1024;

/// Serves registered channels to peer processes.
#[derive(Debug)]
pub struct IpcServer {
    listener: TcpListener,
    ipc: Arc<IpcMain>,
}

impl IpcServer {
    /// Bind to `address` (use port 0 for an ephemeral port).
    pub async fn bind(address: &str, ipc: IpcMain) -> Result<Self> {
        let listener = TcpListener::bind(address).await?;
        Ok(Self { listener, ipc: Arc::new(ipc) })
    }

    /// Address the server is listening on.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until `shutdown` resolves.
    pub async fn serve_until(self, shutdown: impl Future<Output = ()>) -> Result<()> {
        tokio::pin!(shutdown);
        tracing::info!(address = ?self.listener.local_addr().ok(), "IPC server listening");

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("IPC server shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            tracing::warn!(error = %e, "IPC accept failed");
                            continue;
                        }
                    };
                    let ipc = Arc::clone(&self.ipc);
                    tokio::spawn(async move {
                        let (reader, writer) = stream.into_split();
                        if let Err(e) = handle_connection(reader, writer, &ipc).await {
                            tracing::debug!(peer = %peer, error = %e, "IPC connection closed with error");
                        }
                    });
                }
            }
        }
    }
}

/// Answer newline-delimited requests until the peer hangs up.
///
/// A request longer than [`MAX_FRAME_BYTES`] gets an error response and the
/// connection is closed.
pub(crate) async fn handle_connection<R, W>(reader: R, mut writer: W, ipc: &IpcMain) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        let limit = (MAX_FRAME_BYTES + 1) as u64;
        let read = (&mut reader).take(limit).read_until(b'\n', &mut line).await?;
        if read == 0 {
            return Ok(());
        }

        if line.last() != Some(&b'\n') && line.len() > MAX_FRAME_BYTES {
            tracing::warn!(limit = MAX_FRAME_BYTES, "IPC request too large, closing connection");
            let response =
                Response::error(format!("request exceeds {MAX_FRAME_BYTES} bytes"));
            write_frame(&mut writer, &response).await?;
            return Ok(());
        }

        let request = String::from_utf8_lossy(&line);
        if request.trim().is_empty() {
            continue;
        }

        write_frame(&mut writer, &ipc.respond(&request)).await?;
    }
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> Result<()> {
    let mut frame = serde_json::to_string(response)?;
    frame.push('\n');
    writer.write_all(frame.as_bytes()).await?;
    Ok(())
}
