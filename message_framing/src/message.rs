//! Polymorphic message capability set and the encode/decode entry points.
//!
//! Concrete message types are modelled as a capability set
//! (`encode`/`header`), matching the spec's note that handler dispatch
//! keys off a type tag, not a concrete class.

use std::any::Any;
use std::fmt;

use crate::errors::{CreateError, DecodeError, FramingError};
use crate::field_type::FieldType;
use crate::header::MessageHeader;
use crate::registry::Registry;

/// Object-safe capability every message type exposes: its wire type tag,
/// its header, and an encoder for its body fields. `as_any` lets a
/// handler recover the concrete type behind a `&dyn Message` it was
/// dispatched with.
pub trait Message: fmt::Debug + Any {
    fn type_tag(&self) -> u32;
    fn header(&self) -> &MessageHeader;
    fn encode_body(&self, out: &mut Vec<u8>);
    fn as_any(&self) -> &dyn Any;
}

/// Implemented by concrete message types so they can be registered with a
/// [`Registry`] and decoded generically.
pub trait Decodable: Message + Sized {
    const TYPE_TAG: u32;

    /// The single body field this message type carries. The reference
    /// implementation's messages each declare one typed field; `respond`
    /// constructs a response from an optional value of this type, falling
    /// back to `FieldType::default_value` when the caller omits it.
    type Fields: FieldType;

    fn decode_body(header: MessageHeader, body: &[u8]) -> Result<Self, DecodeError>;

    /// Builds an instance from a header already correlated by the caller,
    /// taking `fields` verbatim or, when absent, `Fields::default_value()`.
    fn from_fields(header: MessageHeader, fields: Option<Self::Fields>) -> Self;
}

/// Blanket capability letting any message answer with any registered
/// response type, matching the spec's `respond(response_class, **fields)`
/// operation on "any message `m`".
pub trait Respond: Message {
    /// Constructs a `response_class` instance correlated to this message
    /// via `request_guid`, using `fields` or `R::Fields::default_value()`
    /// when omitted. Fails with [`CreateError::NotAMessage`] when `R` is
    /// not registered in `registry` — the closest runtime-checkable proxy,
    /// in a statically typed rewrite, for the reference implementation's
    /// "response_class does not derive from the message base" check.
    fn respond<R: Decodable>(
        &self,
        registry: &Registry,
        fields: Option<R::Fields>,
    ) -> Result<R, CreateError> {
        if registry.lookup(R::TYPE_TAG).is_none() {
            return Err(CreateError::NotAMessage);
        }

        let header = MessageHeader::new_response(R::TYPE_TAG, self.header());
        Ok(R::from_fields(header, fields))
    }
}

impl<T: Message + ?Sized> Respond for T {}

/// Encodes a message as `4-byte type tag | header | body`, per the wire
/// layout in the spec's external-interfaces section. The leading tag
/// duplicates `header.message_type_id` by design.
pub fn encode(message: &dyn Message) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&message.type_tag().to_be_bytes());
    message.header().encode(&mut out);
    message.encode_body(&mut out);
    out
}

/// Decodes a raw datagram payload into a boxed message, using `registry`
/// to resolve the type tag to a decoder.
pub fn decode(bytes: &[u8], registry: &Registry) -> Result<Box<dyn Message>, FramingError> {
    if bytes.len() < 4 {
        return Err(DecodeError::Truncated {
            needed: 4,
            got: bytes.len(),
        }
        .into());
    }

    let tag = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let decoder = registry.lookup(tag).ok_or(FramingError::UnknownType(tag))?;

    let (header, header_len) = MessageHeader::decode(&bytes[4..])?;
    let body = &bytes[4 + header_len..];

    decoder(header, body).map_err(FramingError::from)
}
