//! Puts a service on the network.

use rpc_framework::{tcp, RpcClient, RpcServer, RpcService, ShutdownSignal};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Runs `server` and forwards connections from `listener` to it until `shutdown` is raised,
/// then waits for in-flight calls to finish.
pub async fn host<S: RpcService>(
    listener: TcpListener,
    server: RpcServer<S>,
    client: RpcClient<S>,
    shutdown: ShutdownSignal,
) -> std::io::Result<()> {
    let server_task = tokio::spawn(server.run());
    let served = tcp::serve(listener, client, shutdown).await;

    if let Err(e) = server_task.await {
        error!(service = S::NAME, error = %e, "Server task failed");
        return Err(std::io::Error::other(e));
    }
    info!(service = S::NAME, "Stopped");
    served
}
