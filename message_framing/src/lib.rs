//! Self-describing binary framing for request/response messages: a
//! per-message integer type tag, a fixed header, and an ordered list of
//! fixed-width typed fields, with a process-wide registry mapping type
//! tags to decoders.
//!
//! ```
//! use message_framing::messages::PingRequest;
//! use message_framing::message::{decode, encode};
//! use message_framing::registry::reference_registry;
//! use message_framing::Message;
//!
//! let ping = PingRequest::new(42);
//! let bytes = encode(&ping);
//!
//! let registry = reference_registry();
//! let decoded = decode(&bytes, &registry).unwrap();
//! assert_eq!(decoded.type_tag(), 100);
//! ```

pub mod errors;
pub mod field_type;
pub mod header;
pub mod message;
pub mod messages;
pub mod registry;

pub use self::{
    errors::{CreateError, DeclareError, DecodeError, FramingError},
    field_type::FieldType,
    header::MessageHeader,
    message::{decode, encode, Decodable, Message, Respond},
    registry::Registry,
};
