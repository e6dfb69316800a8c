//! Command parsing and dispatch.
//!
//! This module is the bot's command engine. A raw line of chat text goes
//! through four gates, each of which short-circuits the rest:
//!
//! 1. **Length gate** - input at or above [`tokenizer::MAX_COMMAND_LENGTH`]
//!    bytes is rejected before parsing.
//! 2. **Tokenizer** - the line is split into at most
//!    [`tokenizer::MAX_NUM_ARGS`] arguments, honoring quoted spans.
//! 3. **Registry** - the first argument is matched against the fixed
//!    command table.
//! 4. **Handler** - the matched handler validates its own arguments, checks
//!    the authorization gate if the command is privileged, and emits its
//!    replies through the [`Messenger`](crate::messenger::Messenger)
//!    collaborator.
//!
//! The first three gates fail silently: no reply is sent for oversized
//! input, malformed quoting or an unknown command. Only the handlers talk
//! back to the sender. The asymmetry is deliberate, the bot does not
//! advertise its command surface to strangers, and the dispatcher tests
//! pin it.
//!
//! # Architecture
//!
//! ```text
//! Matrix Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: execute()
//! └─────────────┘
//!      │
//!      ├── length gate ──── too long ──────────▶ dropped
//!      │
//!      ├── tokenize() ───── bad quoting ───────▶ dropped
//!      │
//!      ├── registry lookup ─ unknown command ──▶ dropped
//!      │
//!      ▼
//! ┌─────────────────────┐
//! │ Action Handlers     │
//! │  - handle_start     │
//! │  - handle_stop      │
//! │  - handle_status    │
//! │  - handle_maplist   │
//! └─────────────────────┘
//!      │
//!      ▼
//! Messenger::send / Supervisor calls
//! ```
//!
//! # Command Surface
//!
//! | command | privileged | arguments |
//! |---------|------------|-----------|
//! | `start` | yes | map name |
//! | `stop` | yes | none |
//! | `status` | no | none |
//! | `maplist` | no | none |
//!
//! # Module Organization
//!
//! - [`commander`] - dispatcher walking the gates above
//! - [`tokenizer`] - command line splitting
//! - [`registry`] - the fixed command table
//! - [`actions`] - one handler per command
//! - [`responses`] - every user-visible reply string

mod actions;
mod commander;
mod registry;
mod responses;
mod tokenizer;

pub use crate::commands::commander::Commander;

use crate::auth::Authorizer;

/// Where a command came from: the room to reply into and the user to hold
/// accountable.
#[derive(Debug, Clone)]
pub struct Sender {
    /// Room the command was posted in; replies go back there
    pub room_id: String,
    /// User who posted the command; checked against the master identity
    pub user_id: String,
}

/// Collaborators a command handler may talk to.
///
/// Built fresh for each dispatched command; handlers borrow the
/// collaborators and never own state themselves.
pub struct CommandContext<'a, M, S, I> {
    /// Chat transport for replies and broadcasts
    pub messenger: &'a M,
    /// Game server process lifecycle
    pub supervisor: &'a S,
    /// Map directory queries
    pub maps: &'a I,
    /// Gate for privileged commands
    pub authorizer: &'a Authorizer,
}

/// What became of one raw input line.
///
/// Every variant except [`DispatchOutcome::Handled`] is silent: the sender
/// gets no reply and no collaborator is touched.
#[derive(Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran; any replies were sent by the handler itself
    Handled,
    /// Input at or above the maximum command length, dropped before parsing
    InputTooLong,
    /// The tokenizer rejected the input
    ParseFailed,
    /// The first argument matched no registered command
    UnknownCommand,
}
