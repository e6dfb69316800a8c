//! Command line tokenizer.
//!
//! Splits one raw line of text into a bounded list of argument strings.
//! Double-quoted spans count as a single argument and keep their quote
//! characters; an unterminated quote fails the whole parse.

/// Upper bound on a single inbound command line, in bytes.
///
/// The dispatcher rejects (does not truncate) any input at or above this
/// length before tokenizing.
pub const MAX_COMMAND_LENGTH: usize = 1024;

/// Maximum number of arguments extracted from a command line, command name
/// included. Text after the last argument is discarded.
pub const MAX_NUM_ARGS: usize = 4;

/// Errors that can occur while tokenizing a command line.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A double quote opened an argument but no closing quote followed
    UnterminatedQuote,
}

/// Splits a raw command line into its arguments.
///
/// The scan runs left to right and stops after [`MAX_NUM_ARGS`] arguments;
/// any remaining text is dropped. An argument starting with `"` extends up
/// to and including the next `"`, with both quote characters kept in the
/// result. Any other argument runs to the next space, or to the end of the
/// input.
///
/// Scanning resumes at the character following the argument boundary: the
/// space for a plain argument, the character after the closing quote for a
/// quoted one. A space right after a quoted span therefore produces an
/// empty argument, as does a line ending on a boundary. Empty input yields
/// a single empty argument, which no registry entry matches.
///
/// # Arguments
///
/// * `raw` - The raw command line, already length-gated by the dispatcher
///
/// # Returns
///
/// The argument list, with the command name at index 0.
///
/// # Errors
///
/// Returns [`ParseError::UnterminatedQuote`] if an opening quote has no
/// closing quote in the remaining input.
///
/// # Examples
///
/// ```
/// # use fragbot::commands::tokenizer::tokenize;
/// assert_eq!(tokenize("start de_dust2").unwrap(), vec!["start", "de_dust2"]);
/// // A quoted span at end of input leaves a trailing empty argument
/// assert_eq!(tokenize("\"start\"").unwrap(), vec!["\"start\"", ""]);
/// assert!(tokenize("start \"de_dust2").is_err());
/// ```
pub fn tokenize(raw: &str) -> Result<Vec<String>, ParseError> {
    let mut args = Vec::with_capacity(MAX_NUM_ARGS);
    let mut rest = raw;

    while args.len() < MAX_NUM_ARGS {
        if rest.starts_with('"') {
            // Closing quote search starts after the opening one
            let Some(position) = rest[1..].find('"') else {
                return Err(ParseError::UnterminatedQuote);
            };
            let closing = 1 + position;
            args.push(rest[..=closing].to_owned());
            rest = &rest[closing + 1..];
        } else {
            match rest.find(' ') {
                None => {
                    // Last argument, nothing left to scan
                    args.push(rest.to_owned());
                    break;
                }
                Some(space) => {
                    args.push(rest[..space].to_owned());
                    rest = &rest[space + 1..];
                }
            }
        }
    }

    Ok(args)
}
