use chrono::{DateTime, Utc};
use node_id::NodeId;

/// This peer's knowledge of another peer.
///
/// `address`/`port` are `None` only for the self-contact installed at
/// table construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub address: Option<String>,
    pub port: Option<u16>,
    pub node_id: NodeId,
    pub last_seen: DateTime<Utc>,
}

impl Contact {
    pub fn new(address: Option<String>, port: Option<u16>, node_id: NodeId) -> Contact {
        let mut contact = Contact {
            address,
            port,
            node_id,
            last_seen: Utc::now(),
        };
        contact.touch();
        contact
    }

    /// Refreshes `last_seen` to now. Called both on first insertion and
    /// on every subsequent re-observation of an already-known contact.
    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}
