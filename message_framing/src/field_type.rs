//! Fixed-width codecs for message body fields.
//!
//! Each concrete field type encodes to, and decodes from, a fixed number
//! of bytes, big-endian throughout. `decode` returns the value together
//! with the number of bytes it consumed, so callers can walk a declared
//! field list in order.

use byteorder::{BigEndian, ByteOrder};
use chrono::{DateTime, TimeZone, Utc};
use node_id::NodeId;
use uuid::Uuid;

use crate::errors::DecodeError;

pub trait FieldType: Sized {
    const WIDTH: usize;

    /// The value a field of this type takes when a message is constructed
    /// without it. May be a fixed constant or, like `Uuid`'s, freshly
    /// produced per call.
    fn default_value() -> Self;

    fn encode(&self, out: &mut Vec<u8>);
    fn decode(bytes: &[u8]) -> Result<(Self, usize), DecodeError>;
}

fn require(bytes: &[u8], needed: usize) -> Result<(), DecodeError> {
    if bytes.len() < needed {
        Err(DecodeError::Truncated {
            needed,
            got: bytes.len(),
        })
    } else {
        Ok(())
    }
}

/// `Integer` field type: 4 bytes, big-endian.
impl FieldType for u32 {
    const WIDTH: usize = 4;

    fn default_value() -> Self {
        0
    }

    fn encode(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, *self);
        out.extend_from_slice(&buf);
    }

    fn decode(bytes: &[u8]) -> Result<(Self, usize), DecodeError> {
        require(bytes, Self::WIDTH)?;
        Ok((BigEndian::read_u32(&bytes[..Self::WIDTH]), Self::WIDTH))
    }
}

/// `Guid` field type: 16 raw bytes.
impl FieldType for Uuid {
    const WIDTH: usize = 16;

    /// uuid4 is evaluated per instance: each missing `Guid` field gets its
    /// own fresh random value, not a shared constant.
    fn default_value() -> Self {
        Uuid::new_v4()
    }

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    fn decode(bytes: &[u8]) -> Result<(Self, usize), DecodeError> {
        require(bytes, Self::WIDTH)?;
        let mut raw = [0u8; 16];
        raw.copy_from_slice(&bytes[..Self::WIDTH]);
        Ok((Uuid::from_bytes(raw), Self::WIDTH))
    }
}

/// `DateTime` field type: 8 bytes, signed Unix seconds, big-endian.
impl FieldType for DateTime<Utc> {
    const WIDTH: usize = 8;

    fn default_value() -> Self {
        Utc::now()
    }

    fn encode(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 8];
        BigEndian::write_i64(&mut buf, self.timestamp());
        out.extend_from_slice(&buf);
    }

    fn decode(bytes: &[u8]) -> Result<(Self, usize), DecodeError> {
        require(bytes, Self::WIDTH)?;
        let secs = BigEndian::read_i64(&bytes[..Self::WIDTH]);
        let dt = Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| DecodeError::Field(format!("invalid timestamp {}", secs)))?;
        Ok((dt, Self::WIDTH))
    }
}

/// `NodeIdField` field type: 20 bytes, big-endian; all-zero bytes decode
/// to `NodeId::ZERO`, the empty sentinel.
impl FieldType for NodeId {
    const WIDTH: usize = 20;

    fn default_value() -> Self {
        NodeId::ZERO
    }

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    fn decode(bytes: &[u8]) -> Result<(Self, usize), DecodeError> {
        require(bytes, Self::WIDTH)?;
        let mut raw = [0u8; 20];
        raw.copy_from_slice(&bytes[..Self::WIDTH]);
        Ok((NodeId::from_bytes(raw), Self::WIDTH))
    }
}
