//! How the signed-in user is named on the board.
//!
//! The identity provider hands over optional metadata; this projection fixes
//! the fallback order once instead of at every call site.

use serde::{Deserialize, Serialize};

/// Name shown when the user has neither a full name nor an email.
pub const ANONYMOUS_NAME: &str = "User";

/// The two bits of identity metadata the board uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Name from the profile, if the user set one.
    pub full_name: Option<String>,
    /// Sign-in address.
    pub email: Option<String>,
}

impl UserIdentity {
    /// Builds an identity from raw profile metadata.
    pub fn new(full_name: Option<String>, email: Option<String>) -> Self {
        Self { full_name, email }
    }

    /// Full name, else the email local part, else `"User"`.
    pub fn display_name(&self) -> &str {
        self.full_name()
            .or_else(|| self.email_local_part())
            .unwrap_or(ANONYMOUS_NAME)
    }

    /// Avatar letter: first letter of the full name, else of the email,
    /// uppercased; `'U'` when neither is known.
    pub fn initial(&self) -> char {
        self.full_name()
            .or_else(|| non_blank(self.email.as_deref()))
            .and_then(|s| s.chars().next())
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }

    fn full_name(&self) -> Option<&str> {
        non_blank(self.full_name.as_deref())
    }

    fn email_local_part(&self) -> Option<&str> {
        let email = non_blank(self.email.as_deref())?;
        let local = email.split('@').next().unwrap_or(email);
        non_blank(Some(local))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(full_name: Option<&str>, email: Option<&str>) -> UserIdentity {
        UserIdentity::new(full_name.map(Into::into), email.map(Into::into))
    }

    #[test]
    fn prefers_full_name() {
        let u = user(Some("Ada Lovelace"), Some("ada@example.com"));
        assert_eq!(u.display_name(), "Ada Lovelace");
        assert_eq!(u.initial(), 'A');
    }

    #[test]
    fn falls_back_to_email_local_part() {
        let u = user(None, Some("grace.hopper@example.com"));
        assert_eq!(u.display_name(), "grace.hopper");
        assert_eq!(u.initial(), 'G');

        let blank_name = user(Some("  "), Some("linus@example.com"));
        assert_eq!(blank_name.display_name(), "linus");
    }

    #[test]
    fn anonymous_when_nothing_is_known() {
        let u = UserIdentity::default();
        assert_eq!(u.display_name(), "User");
        assert_eq!(u.initial(), 'U');

        // an address with an empty local part says nothing either
        assert_eq!(user(None, Some("@example.com")).display_name(), "User");
    }
}
