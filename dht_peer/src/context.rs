use std::net::SocketAddr;
use std::sync::Arc;

use message_framing::Registry;
use parking_lot::Mutex;
use routing_table::RoutingTable;

/// The context a handler runs with: shared access to the routing table,
/// the endpoint the inbound message arrived from, and the registry a
/// handler needs to build a generic `respond` response.
pub struct Context<'a> {
    pub routing_table: Arc<Mutex<RoutingTable>>,
    pub sender: SocketAddr,
    pub registry: &'a Registry,
}
