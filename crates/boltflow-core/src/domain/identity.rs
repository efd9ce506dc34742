//! Identity and Session
//!
//! The authenticated account and the tokens that prove it.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Minimum password length enforced before calling the backend
pub const MIN_PASSWORD_LEN: usize = 6;

/// Opaque account identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(pub String);

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub email: String,
    pub name: Option<String>,
}

impl Identity {
    /// Name, else the local part of the email, else "User"
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match self.email.split('@').next() {
            Some(local) if !local.is_empty() => local.to_string(),
            _ => "User".to_string(),
        }
    }

    /// Up to two uppercase initials of the display name
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Tokens for an established identity
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: Identity,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |at| at <= now)
    }

    /// Expired, or will be within `margin` of `now`
    pub fn expires_within(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.is_expired(now + margin)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Profile form input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl ProfileUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>, confirmation: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self.password_confirmation = Some(confirmation.into());
        self
    }

    /// Reduce the form to the changes worth sending for `current`.
    pub fn into_changes(self, current: &Identity) -> Result<ProfileChanges, DomainError> {
        let password = match self.password.filter(|p| !p.is_empty()) {
            Some(password) => {
                if self.password_confirmation.as_deref() != Some(password.as_str()) {
                    return Err(DomainError::validation("Passwords do not match"));
                }
                check_password_policy(&password)?;
                Some(password)
            }
            None => None,
        };

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty() && current.name.as_deref() != Some(n.as_str()));

        let changes = ProfileChanges { name, password };
        if changes.is_empty() {
            return Err(DomainError::validation("No changes to save"));
        }
        Ok(changes)
    }
}

/// Validated profile changes sent to the auth backend
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password.is_none()
    }
}

pub(crate) fn check_password_policy(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::auth(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: Option<&str>) -> Identity {
        Identity {
            id: IdentityId("u1".into()),
            email: "ada.lovelace@example.com".into(),
            name: name.map(String::from),
        }
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(identity(Some("Ada Lovelace")).display_name(), "Ada Lovelace");
        assert_eq!(identity(Some("  ")).display_name(), "ada.lovelace");
        let mut anonymous = identity(None);
        anonymous.email = String::new();
        assert_eq!(anonymous.display_name(), "User");
    }

    #[test]
    fn test_initials() {
        assert_eq!(identity(Some("ada byron lovelace")).initials(), "AB");
        assert_eq!(identity(None).initials(), "A");
    }

    #[test]
    fn test_profile_password_mismatch() {
        let err = ProfileUpdate::default()
            .password("secret1", "secret2")
            .into_changes(&identity(None))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_profile_short_password() {
        let err = ProfileUpdate::default()
            .password("abc", "abc")
            .into_changes(&identity(None))
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(_)));
    }

    #[test]
    fn test_profile_unchanged_name_is_no_change() {
        let err = ProfileUpdate::default()
            .name(" Ada ")
            .into_changes(&identity(Some("Ada")))
            .unwrap_err();
        assert_eq!(err, DomainError::validation("No changes to save"));
    }

    #[test]
    fn test_profile_changes() {
        let changes = ProfileUpdate::default()
            .name(" Grace ")
            .password("hopper", "hopper")
            .into_changes(&identity(Some("Ada")))
            .unwrap();
        assert_eq!(changes.name.as_deref(), Some("Grace"));
        assert_eq!(changes.password.as_deref(), Some("hopper"));
    }

    #[test]
    fn test_session_debug_hides_tokens() {
        let session = Session {
            access_token: "secret-access".into(),
            refresh_token: "secret-refresh".into(),
            expires_at: None,
            user: identity(None),
        };
        let printed = format!("{:?}", session);
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_session_expiry_margin() {
        let now = Utc::now();
        let mut session = Session {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: Some(now + Duration::seconds(30)),
            user: identity(None),
        };
        assert!(!session.is_expired(now));
        assert!(session.expires_within(now, Duration::seconds(60)));

        session.expires_at = None;
        assert!(!session.expires_within(now, Duration::seconds(60)));
    }
}
