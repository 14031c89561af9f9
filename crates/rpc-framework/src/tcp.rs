//! # TCP Transport
//!
//! Carries calls between processes as newline-delimited JSON. One connection carries one call:
//!
//! ```text
//! client -> server   {"ChangeQuantity":{"product_id":1,"delta":-3}}\n
//! server -> client   {"Ok":{"ChangeQuantity":7}}\n
//! ```
//!
//! The reply line is a serialized `Result<S::Reply, String>`. `Err` only ever carries a
//! framework failure on the server side (the hosted service had already shut down, for
//! example); business outcomes are inside `Ok`.
//!
//! [`serve`] bridges accepted connections into a local [`RpcClient`], so remote calls are
//! subject to the same worker pool as in-process ones.

use crate::client::RpcClient;
use crate::error::FrameworkError;
use crate::service::RpcService;
use crate::shutdown::ShutdownSignal;
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Accepts connections on `listener` and forwards each call to `client` until `shutdown` is
/// raised.
///
/// After shutdown, connections whose call has already been read are allowed to finish. Those
/// still waiting for a request line are closed without a reply.
pub async fn serve<S: RpcService>(
    listener: TcpListener,
    client: RpcClient<S>,
    shutdown: ShutdownSignal,
) -> std::io::Result<()> {
    let service = S::NAME;
    let local_addr = listener.local_addr()?;
    info!(service, %local_addr, "Listening");

    let mut connections = JoinSet::new();
    loop {
        let accepted = tokio::select! {
            biased;
            _ = shutdown.raised() => break,
            accepted = listener.accept() => accepted,
        };
        match accepted {
            Ok((stream, peer)) => {
                let client = client.clone();
                let shutdown = shutdown.clone();
                connections.spawn(async move {
                    if let Err(e) = handle_connection(stream, client, shutdown).await {
                        warn!(service, %peer, error = %e, "Connection failed");
                    }
                });
            }
            Err(e) => warn!(service, error = %e, "Accept failed"),
        }
        while connections.try_join_next().is_some() {}
    }

    drop(listener);
    while connections.join_next().await.is_some() {}
    info!(service, %local_addr, "Listener closed");
    Ok(())
}

async fn handle_connection<S: RpcService>(
    stream: TcpStream,
    client: RpcClient<S>,
    shutdown: ShutdownSignal,
) -> Result<(), FrameworkError> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    let read = tokio::select! {
        biased;
        read = reader.read_line(&mut line) => read?,
        _ = shutdown.raised() => {
            debug!(service = S::NAME, "Closing idle connection");
            return Ok(());
        }
    };
    if read == 0 {
        return Ok(());
    }

    let reply: Result<S::Reply, String> = match serde_json::from_str::<S::Call>(&line) {
        Ok(call) => {
            debug!(service = S::NAME, ?call, "Remote call");
            client.call(call).await.map_err(|e| e.to_string())
        }
        Err(e) => Err(FrameworkError::from(e).to_string()),
    };

    let mut frame = serde_json::to_string(&reply)?;
    frame.push('\n');
    write_half.write_all(frame.as_bytes()).await?;
    write_half.shutdown().await?;
    Ok(())
}

/// Performs one call against a remote service: connect, send one line, read one line.
pub(crate) async fn round_trip<S: RpcService>(
    addr: SocketAddr,
    call: &S::Call,
) -> Result<S::Reply, FrameworkError> {
    let stream = TcpStream::connect(addr).await?;
    let (read_half, mut write_half) = stream.into_split();

    let mut frame = serde_json::to_string(call)?;
    frame.push('\n');
    write_half.write_all(frame.as_bytes()).await?;

    let mut line = String::new();
    let read = BufReader::new(read_half).read_line(&mut line).await?;
    if read == 0 {
        return Err(FrameworkError::Transport(format!(
            "{addr} closed the connection without replying"
        )));
    }

    let reply: Result<S::Reply, String> = serde_json::from_str(&line)?;
    reply.map_err(FrameworkError::Remote)
}
