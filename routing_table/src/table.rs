use node_id::NodeId;
use tracing::{debug, trace};

use crate::contact::Contact;
use crate::k_bucket::K;
use crate::tree::Tree;

/// Split-on-insert binary trie of k-buckets, indexed by XOR distance from
/// the table's owner.
///
/// Parameters: `K` (bucket capacity, 20) and `DEPTH` (relaxed-split
/// policy, declared but not enforced — see the module doc comment on
/// [`RoutingTable::insert`]).
pub struct RoutingTable {
    owner_id: NodeId,
    root: Tree,
    /// Maximum shared-prefix depth a non-owner bucket is allowed before a
    /// full bucket is split rather than left alone. Declared for parity
    /// with the reference implementation; not read by `insert` (see the
    /// open-question note on `insert`).
    depth: usize,
}

impl RoutingTable {
    /// Constructs a table for `owner_id`. Installs a root leaf covering
    /// the full id range, seeded with a contact for the owner itself
    /// (address/port absent).
    pub fn new(owner_id: NodeId) -> RoutingTable {
        let mut root = Tree::root();
        if let Some(bucket) = root.bucket_mut() {
            bucket.add(Contact::new(None, None, owner_id));
        }

        RoutingTable {
            owner_id,
            root,
            depth: 5,
        }
    }

    pub fn owner_id(&self) -> NodeId {
        self.owner_id
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Inserts a contact into the routing table.
    ///
    /// Open question (spec §9): the reference `DEPTH` parameter is never
    /// enforced by the source, so this implementation matches that
    /// behaviour literally — a full non-owner bucket is always split
    /// rather than conditionally dropping the new contact. A stricter
    /// policy would additionally check `shared_prefix_depth(contact,
    /// owner) < self.depth` before splitting. See DESIGN.md.
    pub fn insert(&mut self, address: Option<String>, port: Option<u16>, node_id: NodeId) {
        let contact = Contact::new(address, port, node_id);
        Self::insert_at(&mut self.root, contact, 0, self.owner_id);
    }

    fn insert_at(node: &mut Tree, contact: Contact, level: usize, owner_id: NodeId) {
        if node.is_branch() {
            if let Tree::Branch { left, right, .. } = node {
                if left.in_range(&contact.node_id) {
                    Self::insert_at(left, contact, level + 1, owner_id);
                } else if right.in_range(&contact.node_id) {
                    Self::insert_at(right, contact, level + 1, owner_id);
                }
            }
            return;
        }

        if let Some(existing) = node.bucket_mut().and_then(|b| b.get_mut(&contact.node_id)) {
            existing.touch();
            return;
        }

        let bucket_has_owner = node.bucket().map_or(false, |b| b.contains(&owner_id));
        if bucket_has_owner {
            trace!(level, "splitting bucket containing owner id");
            node.split(level).expect("node was checked to be a leaf");
            Self::insert_at(node, contact, level, owner_id);
            return;
        }

        let bucket = node.bucket_mut().expect("checked to be a leaf above");

        if bucket.len() < K {
            bucket.add(contact);
            bucket.sort();
            return;
        }

        debug!(level, "bucket full, splitting");
        node.split(level).expect("node was checked to be a leaf");
        Self::insert_at(node, contact, level, owner_id);
    }

    /// Searches for a contact that matches `node_id` exactly.
    pub fn find(&self, node_id: &NodeId) -> Option<&Contact> {
        Self::find_at(&self.root, node_id)
    }

    fn find_at<'a>(node: &'a Tree, node_id: &NodeId) -> Option<&'a Contact> {
        match node {
            Tree::Leaf { bucket, .. } => bucket.get(node_id),
            Tree::Branch { left, right, .. } => {
                if left.in_range(node_id) {
                    Self::find_at(left, node_id)
                } else if right.in_range(node_id) {
                    Self::find_at(right, node_id)
                } else {
                    None
                }
            }
        }
    }

    /// Collects up to `k` contacts in ascending XOR distance from
    /// `target`, widening outward from the target's own leaf. Read-only
    /// traversal over the same tree `find` uses; no network iteration —
    /// an iterative k-closest lookup remains a non-goal.
    pub fn k_closest(&self, target: &NodeId, k: usize) -> Vec<Contact> {
        let mut collected: Vec<Contact> = Vec::new();
        Self::collect_all(&self.root, &mut collected);

        collected.sort_by_key(|c| c.node_id.xor(target));
        collected.truncate(k);
        collected
    }

    fn collect_all(node: &Tree, out: &mut Vec<Contact>) {
        match node {
            Tree::Leaf { bucket, .. } => out.extend(bucket.contacts().iter().cloned()),
            Tree::Branch { left, right, .. } => {
                Self::collect_all(left, out);
                Self::collect_all(right, out);
            }
        }
    }
}
