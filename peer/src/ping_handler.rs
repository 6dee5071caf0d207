use dht_peer::{Context, Handler};
use message_framing::messages::{PingRequest, PongResponse};
use message_framing::{Message, Respond};
use tracing::debug;

/// Answers `PingRequest` with a `PongResponse` echoing the same value.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, message: &dyn Message, ctx: &Context<'_>) -> Option<Box<dyn Message>> {
        let ping = message.as_any().downcast_ref::<PingRequest>()?;
        debug!(sender = %ctx.sender, value = ping.value, "answering ping");
        let pong: PongResponse = ping.respond(ctx.registry, Some(ping.value)).ok()?;
        Some(Box::new(pong))
    }
}
