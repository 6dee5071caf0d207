//! Datagram transport as an external collaborator: a sink/source of
//! opaque byte buffers with `(addr, port)` endpoints. Binding a concrete
//! socket is out of scope for this crate (it's the binary's job); this
//! trait is the seam the dispatcher and client are built against.

use std::io;
use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::net::UdpSocket;

/// Maximum UDP payload this peer accepts, per the wire-format spec.
pub const MAX_DATAGRAM_SIZE: usize = 8192;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)>;

    async fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize>;
}

#[async_trait]
impl Transport for UdpSocket {
    async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        UdpSocket::recv_from(self, buf).await
    }

    async fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        UdpSocket::send_to(self, buf, target).await
    }
}
