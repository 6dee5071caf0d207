mod cli;
mod logging;
mod ping_handler;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use dht_peer::{DhtClient, Dispatcher, MAX_DATAGRAM_SIZE};
use message_framing::messages::PingRequest;
use message_framing::registry::reference_registry;
use message_framing::Message;
use node_id::NodeId;
use parking_lot::Mutex;
use routing_table::RoutingTable;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::cli::Opts;
use crate::ping_handler::PingHandler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let opts = Opts::parse();
    let bind_addr = format!("{}:{}", opts.address, opts.port);

    if let Some(message) = opts.message {
        return send_message(&bind_addr, message).await;
    }

    let node_id = NodeId::generate();
    info!(%node_id, "starting up");

    for entry in &opts.bootstrap {
        // Recorded as a future network entry point; joining the overlay
        // through it is not implemented.
        info!(bootstrap = %entry, "accepted bootstrap node, not yet used");
    }

    let socket = match UdpSocket::bind(&bind_addr).await {
        Ok(socket) => socket,
        Err(err) => {
            error!(address = %bind_addr, error = %err, "failed to bind");
            std::process::exit(1);
        }
    };
    info!(address = %bind_addr, "listening");

    let routing_table = Arc::new(Mutex::new(RoutingTable::new(node_id)));
    let mut dispatcher = Dispatcher::new(reference_registry(), routing_table);
    dispatcher.register(100, Arc::new(PingHandler))?;

    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received interrupt, stopping");
            shutdown_signal.cancel();
        }
    });

    let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut buf) => {
                match received {
                    Ok((len, from)) => {
                        dispatcher.handle_datagram(&buf[..len], from, &socket).await;
                    }
                    Err(err) => warn!(error = %err, "failed to receive datagram"),
                }
            }
        }
    }

    // Bounded grace period for any work already in flight, mirroring the
    // reference implementation's `peer.stop(timeout=1)`.
    tokio::time::sleep(Duration::from_secs(1)).await;
    info!("stopped");

    Ok(())
}

/// One-shot client mode: connects to `target`, sends a message, and
/// prints the response, without binding a listening socket or joining
/// the network. Mirrors the reference implementation's standalone
/// `send` script.
async fn send_message(target: &str, message: String) -> anyhow::Result<()> {
    let target: SocketAddr = target
        .parse()
        .with_context(|| format!("invalid target address {target}"))?;

    // TODO: safely parse `message` into a request object; the reference
    // CLI carries the same TODO and always sends a ping regardless.
    let request = PingRequest::new(0);
    info!(%message, ?request, "sending message");

    let client = DhtClient::connect(target).await?;
    let response = client.send(&request, &reference_registry()).await?;
    info!(type_tag = response.type_tag(), "received response");

    Ok(())
}
