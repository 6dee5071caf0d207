//! Split-on-insert binary trie of k-buckets holding peer contacts, indexed
//! by XOR distance from a routing table's owner id.
//!
//! ```
//! use node_id::NodeId;
//! use routing_table::RoutingTable;
//!
//! let owner = NodeId::parse("0x3").unwrap();
//! let mut table = RoutingTable::new(owner);
//! table.insert(None, Some(9001), NodeId::parse("0x2").unwrap());
//! assert_eq!(table.find(&NodeId::parse("0x2").unwrap()).unwrap().port, Some(9001));
//! ```

pub mod contact;
pub mod errors;
pub mod k_bucket;
mod table;
pub mod tree;

pub use self::{
    contact::Contact,
    errors::BinaryTreeError,
    k_bucket::{KBucket, K},
    table::RoutingTable,
    tree::Tree,
};
