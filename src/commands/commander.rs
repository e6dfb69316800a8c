//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, the entry point for
//! processing one raw command line: length gate, tokenize, registry lookup,
//! handler dispatch. Whatever the outcome, processing one line never
//! produces more than the handler's own replies; the failure gates are
//! silent by contract.

use log::debug;

use crate::commands::{
    CommandContext, DispatchOutcome, Sender,
    actions::{handle_maplist, handle_start, handle_status, handle_stop},
    registry::{self, CommandKind},
    tokenizer::{MAX_COMMAND_LENGTH, ParseError, tokenize},
};
use crate::maps::MapInventory;
use crate::messenger::Messenger;
use crate::server::Supervisor;

/// Dispatches raw command lines to their handlers.
///
/// The Commander itself is stateless; everything a handler needs arrives
/// through the [`CommandContext`].
pub struct Commander;

impl Commander {
    /// Creates a new Commander.
    pub fn new() -> Self {
        Commander
    }

    /// Processes one raw command line from a sender.
    ///
    /// Walks the dispatch gates in order and stops at the first failure:
    ///
    /// 1. Input at or above [`MAX_COMMAND_LENGTH`] bytes is dropped.
    /// 2. Input the tokenizer rejects is dropped.
    /// 3. Input whose first argument matches no registered command is
    ///    dropped.
    /// 4. Otherwise the handler runs with the arguments after the command
    ///    name. Argument validation and the authorization check belong to
    ///    the handler.
    ///
    /// Dropped input is logged at debug level and produces no reply.
    ///
    /// # Arguments
    ///
    /// * `context` - The collaborators handlers may talk to
    /// * `sender` - The room the line was posted in and the user who posted it
    /// * `raw` - The raw command line
    ///
    /// # Returns
    ///
    /// The [`DispatchOutcome`] describing which gate the input stopped at,
    /// or [`DispatchOutcome::Handled`] when a handler ran.
    pub async fn execute<M, S, I>(
        &self,
        context: &CommandContext<'_, M, S, I>,
        sender: &Sender,
        raw: &str,
    ) -> DispatchOutcome
    where
        M: Messenger,
        S: Supervisor,
        I: MapInventory,
    {
        if raw.len() >= MAX_COMMAND_LENGTH {
            debug!("dropping oversized input from {} ({} bytes)", sender.user_id, raw.len());
            return DispatchOutcome::InputTooLong;
        }

        let args = match tokenize(raw) {
            Ok(args) => args,
            Err(ParseError::UnterminatedQuote) => {
                debug!("dropping input with unterminated quote from {}", sender.user_id);
                return DispatchOutcome::ParseFailed;
            }
        };

        let Some(descriptor) = args.first().and_then(|name| registry::lookup(name)) else {
            debug!("ignoring unknown command from {}", sender.user_id);
            return DispatchOutcome::UnknownCommand;
        };

        debug!("dispatching {} for {}", descriptor.name, sender.user_id);

        match descriptor.kind {
            CommandKind::Start => handle_start(context, sender, &args[1..]).await,
            CommandKind::Stop => handle_stop(context, sender).await,
            CommandKind::Status => handle_status(context, sender).await,
            CommandKind::Maplist => handle_maplist(context, sender).await,
        }

        DispatchOutcome::Handled
    }
}
