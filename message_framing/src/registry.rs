//! Process-wide mapping from wire type tag to decoder, populated by
//! explicit `register::<M>()` calls rather than class-declaration-time
//! introspection (see design notes on translating the reference
//! metaclass registry into Rust).

use std::collections::HashMap;

use crate::errors::{DeclareError, DecodeError};
use crate::header::MessageHeader;
use crate::message::{Decodable, Message};

type DecodeFn = fn(MessageHeader, &[u8]) -> Result<Box<dyn Message>, DecodeError>;

#[derive(Default)]
pub struct Registry {
    decoders: HashMap<u32, DecodeFn>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Registers `M`'s decoder under its type tag. Rejects a duplicate
    /// registration for the same tag with `DeclareError`, per the spec's
    /// "production implementations SHOULD reject duplicates" guidance.
    pub fn register<M: Decodable + 'static>(&mut self) -> Result<(), DeclareError> {
        if self.decoders.contains_key(&M::TYPE_TAG) {
            return Err(DeclareError::DuplicateTypeTag(M::TYPE_TAG));
        }

        self.decoders.insert(M::TYPE_TAG, |header, body| {
            M::decode_body(header, body).map(|m| Box::new(m) as Box<dyn Message>)
        });

        Ok(())
    }

    pub fn lookup(&self, tag: u32) -> Option<DecodeFn> {
        self.decoders.get(&tag).copied()
    }

    /// Clears every registration. Used to isolate test fixtures from each
    /// other, mirroring the reference implementation's per-test registry
    /// reset.
    pub fn flush(&mut self) {
        self.decoders.clear();
    }
}

/// Builds a registry pre-populated with the three reference message
/// types (`PingRequest`, `PongResponse`, `FindClosestRequest`).
pub fn reference_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register::<crate::messages::PingRequest>()
        .expect("reference registration cannot collide");
    registry
        .register::<crate::messages::PongResponse>()
        .expect("reference registration cannot collide");
    registry
        .register::<crate::messages::FindClosestRequest>()
        .expect("reference registration cannot collide");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::PingRequest;

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry.register::<PingRequest>().unwrap();
        assert!(registry.register::<PingRequest>().is_err());
    }

    #[test]
    fn flush_clears_registrations() {
        let mut registry = Registry::new();
        registry.register::<PingRequest>().unwrap();
        registry.flush();
        assert!(registry.lookup(PingRequest::TYPE_TAG).is_none());
    }
}
