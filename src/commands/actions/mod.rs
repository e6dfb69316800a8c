//! Command action handlers.
//!
//! One module per command. Each handler receives the
//! [`CommandContext`](crate::commands::CommandContext) and the
//! [`Sender`](crate::commands::Sender), performs its own validation (the
//! authorization gate first for privileged commands) and emits zero or
//! more replies through the messenger. Handlers return nothing: their only
//! observable effects are outbound messages and supervisor calls.

mod maplist;
mod start;
mod status;
mod stop;

pub use crate::commands::actions::{
    maplist::handle_maplist, start::handle_start, status::handle_status, stop::handle_stop,
};

use log::error;

use crate::messenger::Messenger;

/// Sends one reply, logging delivery failures instead of propagating them.
///
/// A reply that cannot be delivered must not abort command processing.
pub(crate) async fn send<M: Messenger>(messenger: &M, room_id: &str, text: &str) {
    if let Err(e) = messenger.send(room_id, text).await {
        error!("failed to send message to {}: {:?}", room_id, e);
    }
}
