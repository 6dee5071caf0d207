use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by [`crate::Dispatcher::handle_datagram`]. Every
/// variant here is caught at the dispatcher boundary, logged with
/// endpoint and byte-length context, and never propagated out of the
/// serving loop.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("unknown message type tag {0}")]
    UnknownType(u32),

    #[error("failed to decode message: {0}")]
    Decode(#[from] message_framing::FramingError),

    #[error("no handler registered for message type {0}")]
    NoHandler(u32),

    #[error("transport I/O error: {0}")]
    Transport(#[from] std::io::Error),
}

/// Failure registering a handler for a message type that already has one.
/// Corresponds to the reference implementation's handler-registration
/// rejection (spec's error taxonomy names this scenario `RoutingTableError`
/// in one place and `PeerHandleError` in another; this crate uses the
/// latter, more specific name — see DESIGN.md).
#[derive(Error, Debug, PartialEq, Eq)]
#[error("a handler is already registered for message type {0}")]
pub struct PeerHandleError(pub u32);

/// The synchronous client's `recv` did not complete within the deadline.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("no response received within {0:?}")]
pub struct Timeout(pub Duration);
