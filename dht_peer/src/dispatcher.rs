//! Peer dispatcher state machine: `Received -> Decoding -> Dispatching ->
//! Responding? -> Done|Errored`. Every inbound datagram is decoded,
//! routed to a registered handler, and optionally answered; failures at
//! any phase are logged and dropped rather than propagated, so a single
//! malformed or unroutable datagram can never take down the serving
//! loop.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use message_framing::{decode, encode, Message, Registry};
use parking_lot::Mutex;
use routing_table::RoutingTable;
use tracing::{debug, warn};

use crate::context::Context;
use crate::errors::{DispatchError, PeerHandleError};
use crate::handler::Handler;
use crate::transport::Transport;

/// Where a single datagram's handling ended up. Exposed mainly for tests
/// and tracing; dispatch never returns this to a caller that would act on
/// it beyond logging.
#[derive(Debug)]
pub enum Outcome {
    /// Handled with no response to send.
    Done,
    /// Handled and a response was sent to the sender.
    Responded,
    /// Handling failed; the error was logged and the datagram dropped.
    Errored,
}

pub struct Dispatcher {
    registry: Registry,
    handlers: HashMap<u32, Arc<dyn Handler>>,
    routing_table: Arc<Mutex<RoutingTable>>,
}

impl Dispatcher {
    pub fn new(registry: Registry, routing_table: Arc<Mutex<RoutingTable>>) -> Dispatcher {
        Dispatcher {
            registry,
            handlers: HashMap::new(),
            routing_table,
        }
    }

    /// Registers `handler` for `type_tag`. Rejects double-registration
    /// for the same message type.
    pub fn register(&mut self, type_tag: u32, handler: Arc<dyn Handler>) -> Result<(), PeerHandleError> {
        if self.handlers.contains_key(&type_tag) {
            return Err(PeerHandleError(type_tag));
        }
        self.handlers.insert(type_tag, handler);
        Ok(())
    }

    /// Runs one datagram through `Received -> Decoding -> Dispatching ->
    /// Responding? -> Done|Errored`, sending any response through
    /// `transport`. Never returns an error to the caller — failures are
    /// logged here, matching the spec's dispatcher-boundary error policy.
    pub async fn handle_datagram(
        &self,
        bytes: &[u8],
        sender: SocketAddr,
        transport: &dyn Transport,
    ) -> Outcome {
        match self.dispatch(bytes, sender, transport).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    sender = %sender,
                    bytes = bytes.len(),
                    error = %err,
                    "dropping datagram"
                );
                Outcome::Errored
            }
        }
    }

    async fn dispatch(
        &self,
        bytes: &[u8],
        sender: SocketAddr,
        transport: &dyn Transport,
    ) -> Result<Outcome, DispatchError> {
        // Decoding: type tag lookup and field decode both happen inside
        // message_framing::decode; distinguish UnknownType from other
        // decode failures for the caller's benefit.
        let message = decode(bytes, &self.registry).map_err(|err| match err {
            message_framing::FramingError::UnknownType(tag) => DispatchError::UnknownType(tag),
            other => DispatchError::Decode(other),
        })?;

        if let Some(sender_node_id) = message.header().sender_node_id {
            self.routing_table
                .lock()
                .insert(Some(sender.ip().to_string()), Some(sender.port()), sender_node_id);
        }

        // Dispatching: look up the handler registered for this type.
        let handler = self
            .handlers
            .get(&message.type_tag())
            .ok_or(DispatchError::NoHandler(message.type_tag()))?;

        let ctx = Context {
            routing_table: Arc::clone(&self.routing_table),
            sender,
            registry: &self.registry,
        };

        let response = handler.handle(message.as_ref(), &ctx);

        // Responding: encode and send, or silently finish.
        match response {
            Some(response_message) => {
                let bytes = encode(response_message.as_ref());
                transport.send_to(&bytes, sender).await?;
                debug!(sender = %sender, "responded");
                Ok(Outcome::Responded)
            }
            None => Ok(Outcome::Done),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use message_framing::messages::{PingRequest, PongResponse};
    use message_framing::registry::reference_registry;
    use message_framing::Respond;
    use node_id::NodeId;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::sync::Mutex as AsyncMutex;

    struct PingHandler;

    impl Handler for PingHandler {
        fn handle(&self, message: &dyn Message, ctx: &Context<'_>) -> Option<Box<dyn Message>> {
            let ping = message.as_any().downcast_ref::<PingRequest>()?;
            let pong: PongResponse = ping.respond(ctx.registry, Some(ping.value)).ok()?;
            Some(Box::new(pong))
        }
    }

    struct RecordingTransport {
        sent: AsyncMutex<Vec<Vec<u8>>>,
    }

    #[async_trait::async_trait]
    impl Transport for RecordingTransport {
        async fn recv_from(&self, _buf: &mut [u8]) -> std::io::Result<(usize, SocketAddr)> {
            unimplemented!("not exercised by these tests")
        }

        async fn send_to(&self, buf: &[u8], _target: SocketAddr) -> std::io::Result<usize> {
            self.sent.lock().await.push(buf.to_vec());
            Ok(buf.len())
        }
    }

    fn addr() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 9000)
    }

    #[tokio::test]
    async fn ping_gets_a_pong_response() {
        let owner = NodeId::generate();
        let routing_table = Arc::new(Mutex::new(RoutingTable::new(owner)));
        let mut dispatcher = Dispatcher::new(reference_registry(), routing_table);
        dispatcher.register(100, Arc::new(PingHandler)).unwrap();

        let ping = PingRequest::new(42);
        let bytes = message_framing::encode(&ping);

        let transport = RecordingTransport {
            sent: AsyncMutex::new(Vec::new()),
        };

        let outcome = dispatcher.handle_datagram(&bytes, addr(), &transport).await;
        assert!(matches!(outcome, Outcome::Responded));
        assert_eq!(transport.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn double_registration_is_rejected() {
        let owner = NodeId::generate();
        let routing_table = Arc::new(Mutex::new(RoutingTable::new(owner)));
        let mut dispatcher = Dispatcher::new(reference_registry(), routing_table);
        dispatcher.register(100, Arc::new(PingHandler)).unwrap();
        assert!(dispatcher.register(100, Arc::new(PingHandler)).is_err());
    }

    #[tokio::test]
    async fn unknown_type_is_dropped_not_panicked() {
        let owner = NodeId::generate();
        let routing_table = Arc::new(Mutex::new(RoutingTable::new(owner)));
        let dispatcher = Dispatcher::new(Registry::new(), routing_table);

        let ping = PingRequest::new(1);
        let bytes = message_framing::encode(&ping);

        let transport = RecordingTransport {
            sent: AsyncMutex::new(Vec::new()),
        };
        let outcome = dispatcher.handle_datagram(&bytes, addr(), &transport).await;
        assert!(matches!(outcome, Outcome::Errored));
    }

    #[tokio::test]
    async fn no_handler_is_dropped_not_panicked() {
        let owner = NodeId::generate();
        let routing_table = Arc::new(Mutex::new(RoutingTable::new(owner)));
        let dispatcher = Dispatcher::new(reference_registry(), routing_table);

        let ping = PingRequest::new(1);
        let bytes = message_framing::encode(&ping);

        let transport = RecordingTransport {
            sent: AsyncMutex::new(Vec::new()),
        };
        let outcome = dispatcher.handle_datagram(&bytes, addr(), &transport).await;
        assert!(matches!(outcome, Outcome::Errored));
    }
}
