//! Peer-facing runtime built on `tokio`: a dispatcher that decodes inbound
//! datagrams, routes them to registered handlers, and optionally answers
//! them, plus a synchronous client for one-off requests against a peer.
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use node_id::NodeId;
//! use routing_table::RoutingTable;
//! use message_framing::registry::reference_registry;
//! use dht_peer::Dispatcher;
//!
//! let owner = NodeId::generate();
//! let routing_table = Arc::new(Mutex::new(RoutingTable::new(owner)));
//! let dispatcher = Dispatcher::new(reference_registry(), routing_table);
//! ```

pub mod client;
pub mod context;
pub mod dispatcher;
pub mod errors;
pub mod handler;
pub mod transport;

pub use self::{
    client::{ClientError, DhtClient},
    context::Context,
    dispatcher::{Dispatcher, Outcome},
    errors::{DispatchError, PeerHandleError, Timeout},
    handler::Handler,
    transport::{Transport, MAX_DATAGRAM_SIZE},
};
