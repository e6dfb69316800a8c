//! Authorization gate for privileged commands.
//!
//! The bot obeys a single master: the Matrix account configured as
//! `matrix.master_id`. Privileged handlers consult the gate before doing
//! anything else, argument validation included.

/// Decides whether a sender may run privileged commands.
///
/// # Examples
///
/// ```
/// use fragbot::auth::Authorizer;
///
/// let authorizer = Authorizer::new("@admin:example.com");
/// assert!(authorizer.is_authorized("@admin:example.com"));
/// assert!(!authorizer.is_authorized("@guest:example.com"));
/// ```
pub struct Authorizer {
    /// User id of the bot's master
    master_id: String,
}

impl Authorizer {
    /// Creates a gate for the given master user id.
    pub fn new(master_id: &str) -> Self {
        Authorizer { master_id: master_id.to_owned() }
    }

    /// Returns `true` if the sender is the configured master.
    ///
    /// The comparison is exact and case-sensitive, like Matrix user ids
    /// themselves.
    pub fn is_authorized(&self, user_id: &str) -> bool {
        user_id == self.master_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_is_authorized() {
        let authorizer = Authorizer::new("@admin:example.com");
        assert!(authorizer.is_authorized("@admin:example.com"));
    }

    #[test]
    fn test_other_user_is_not_authorized() {
        let authorizer = Authorizer::new("@admin:example.com");
        assert!(!authorizer.is_authorized("@someone:example.com"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let authorizer = Authorizer::new("@admin:example.com");
        assert!(!authorizer.is_authorized("@Admin:example.com"));
    }

    #[test]
    fn test_partial_match_is_not_authorized() {
        let authorizer = Authorizer::new("@admin:example.com");
        assert!(!authorizer.is_authorized("@admin:example.com.evil.org"));
        assert!(!authorizer.is_authorized("@admin"));
    }
}
