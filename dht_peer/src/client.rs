//! Synchronous client for talking to a peer without joining the network,
//! mirroring the reference implementation's `DhtClient`: connect, send,
//! wait up to a fixed deadline for a response.

use std::net::SocketAddr;
use std::time::Duration;

use message_framing::{decode, encode, Message, Registry};
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::info;

use crate::errors::Timeout;

const RECV_BUFFER_SIZE: usize = 8192;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DhtClient {
    socket: UdpSocket,
    timeout: Duration,
}

impl DhtClient {
    /// Binds an ephemeral local socket and connects it to `target`, with
    /// the reference implementation's 10-second response deadline.
    pub async fn connect(target: SocketAddr) -> std::io::Result<DhtClient> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(target).await?;
        Ok(DhtClient {
            socket,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> DhtClient {
        self.timeout = timeout;
        self
    }

    /// Sends `message` and waits for a single datagram response, decoding
    /// it against `registry`. Times out after the configured deadline.
    pub async fn send(
        &self,
        message: &dyn Message,
        registry: &Registry,
    ) -> Result<Box<dyn Message>, ClientError> {
        let bytes = encode(message);
        self.socket.send(&bytes).await.map_err(ClientError::Io)?;

        let mut buf = vec![0u8; RECV_BUFFER_SIZE];
        let received = timeout(self.timeout, self.socket.recv(&mut buf))
            .await
            .map_err(|_| ClientError::Timeout(Timeout(self.timeout)))?
            .map_err(ClientError::Io)?;

        info!(bytes = received, "received response");
        decode(&buf[..received], registry).map_err(ClientError::Decode)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("no response received within deadline: {0}")]
    Timeout(#[from] Timeout),

    #[error("socket I/O error: {0}")]
    Io(std::io::Error),

    #[error("failed to decode response: {0}")]
    Decode(message_framing::FramingError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use message_framing::messages::{PingRequest, PongResponse};
    use message_framing::registry::reference_registry;
    use message_framing::Respond;

    #[tokio::test]
    async fn send_times_out_with_no_listener() {
        // A bound-but-silent peer socket never answers, so the client's
        // bounded wait below the default 10s should trip.
        let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = listener.local_addr().unwrap();

        let client = DhtClient::connect(target)
            .await
            .unwrap()
            .with_timeout(Duration::from_millis(50));

        let ping = PingRequest::new(1);
        let registry = reference_registry();
        let result = client.send(&ping, &registry).await;

        assert!(matches!(result, Err(ClientError::Timeout(_))));
    }

    #[tokio::test]
    async fn send_receives_echoed_response() {
        let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = listener.local_addr().unwrap();

        let client = DhtClient::connect(target)
            .await
            .unwrap()
            .with_timeout(Duration::from_secs(1));

        let ping = PingRequest::new(7);
        let registry = reference_registry();

        let responder = tokio::spawn(async move {
            let mut buf = vec![0u8; RECV_BUFFER_SIZE];
            let (len, from) = listener.recv_from(&mut buf).await.unwrap();
            let registry = reference_registry();
            let request = decode(&buf[..len], &registry).unwrap();
            let request = request.as_any().downcast_ref::<PingRequest>().unwrap();
            let pong: PongResponse = request.respond(&registry, Some(request.value)).unwrap();
            listener.send_to(&encode(&pong), from).await.unwrap();
        });

        let response = client.send(&ping, &registry).await.unwrap();
        responder.await.unwrap();

        assert_eq!(response.type_tag(), 101);
    }
}
