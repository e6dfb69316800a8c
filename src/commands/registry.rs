//! Command registry.
//!
//! Static table mapping a command name to its handler kind and privilege
//! level. The table is fixed at compile time; there is no dynamic
//! registration.

/// Handler bound to a registered command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Launch the game server on a given map
    Start,
    /// Terminate the running game server
    Stop,
    /// Report whether the game server is running
    Status,
    /// List the available maps
    Maplist,
}

/// A registered command: its name, handler kind and whether it requires the
/// authorization gate before running.
#[derive(Debug)]
pub struct CommandDescriptor {
    /// Name matched against the first argument of a command line
    pub name: &'static str,
    /// Handler invoked when the name matches
    pub kind: CommandKind,
    /// Whether the handler checks the sender against the master identity
    pub privileged: bool,
}

/// All registered commands. Names are unique by construction.
const COMMANDS: [CommandDescriptor; 4] = [
    CommandDescriptor { name: "start", kind: CommandKind::Start, privileged: true },
    CommandDescriptor { name: "stop", kind: CommandKind::Stop, privileged: true },
    CommandDescriptor { name: "status", kind: CommandKind::Status, privileged: false },
    CommandDescriptor { name: "maplist", kind: CommandKind::Maplist, privileged: false },
];

/// Looks up a command by name.
///
/// The match is exact and case-sensitive. The table is small enough that a
/// linear scan is as good as anything.
///
/// # Arguments
///
/// * `name` - The first argument of a tokenized command line
///
/// # Returns
///
/// The matching descriptor, or `None` for an unknown command.
pub fn lookup(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|descriptor| descriptor.name == name)
}
