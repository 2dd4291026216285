//! Coordinator and peer commands.

use super::Context;
use crate::error::Result;
use crate::ipc::{IpcClient, IpcMain, IpcServer, ProcessRole, install_responder};

/// Resolve translations and serve the IPC channel until Ctrl-C.
pub async fn serve(ctx: &Context, address: Option<&str>, peer: bool) -> Result<()> {
    let address = address.unwrap_or(&ctx.config.ipc.address);
    let role = if peer { ProcessRole::Peer } else { ProcessRole::Coordinator };

    let cache = ctx.cache();
    let mut ipc = IpcMain::new();
    if !install_responder(role, &mut ipc, cache.clone()) {
        ctx.output.warn("Running as a peer: the translations channel is not served");
    }

    // Peers connecting before resolution completes get whatever is cached.
    let server = IpcServer::bind(address, ipc).await?;
    ctx.output.info(&format!("Listening on {}", server.local_addr()?));

    let language = ctx.config.language.clone();
    let _pending = cache.init_with_callback(&ctx.config.language, move |translations| {
        tracing::info!(language = %language, cached = translations.len(), "Translations cached");
    });

    server
        .serve_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}

/// Fetch and print a coordinator's translations.
pub async fn query(ctx: &Context, address: Option<&str>) -> Result<()> {
    let client = IpcClient::new(address.unwrap_or(&ctx.config.ipc.address));
    let translations = client.translations().await?;
    if translations.is_empty() {
        ctx.output.warn(&format!("{} has no cached translations yet", client.address()));
    }
    ctx.output.mapping(&translations)
}
