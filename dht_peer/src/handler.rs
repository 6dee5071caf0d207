use message_framing::Message;

use crate::context::Context;

/// A handler answers exactly one message type. Spec's per-dispatch
/// instance-construct/populate-context/invoke/discard lifecycle is
/// replaced here by a stateless call taking `(message, context)` — the
/// translation the spec's own design notes recommend in place of the
/// reference implementation's per-dispatch object construction.
///
/// Returning `Some(response)` causes the dispatcher to encode and send it
/// back to `ctx.sender`; `None` means the request is silently `Done`.
pub trait Handler: Send + Sync {
    fn handle(&self, message: &dyn Message, ctx: &Context<'_>) -> Option<Box<dyn Message>>;
}
