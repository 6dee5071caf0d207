use node_id::NodeId;

use crate::contact::Contact;

/// Maximum number of contacts allowed in a k-bucket.
pub const K: usize = 20;

/// Container of node contacts; the leaf payload of the routing table's
/// binary trie.
#[derive(Debug, Default)]
pub struct KBucket {
    contacts: Vec<Contact>,
}

impl KBucket {
    pub fn new() -> KBucket {
        KBucket::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Returns true if this bucket contains an exact match of the given
    /// node id.
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.contacts.iter().any(|c| &c.node_id == node_id)
    }

    pub fn get(&self, node_id: &NodeId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.node_id == node_id)
    }

    pub fn get_mut(&mut self, node_id: &NodeId) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| &c.node_id == node_id)
    }

    pub fn add(&mut self, mut contact: Contact) {
        contact.touch();
        self.contacts.push(contact);
    }

    /// Sorts the bucket by `last_seen`, ascending — the reference
    /// implementation's eviction order (oldest contacts sort first).
    pub fn sort(&mut self) {
        self.contacts.sort_by_key(|c| c.last_seen);
    }

    /// Drains every contact, for distribution into the two new leaves a
    /// split produces.
    pub(crate) fn take_contacts(&mut self) -> Vec<Contact> {
        std::mem::take(&mut self.contacts)
    }
}
