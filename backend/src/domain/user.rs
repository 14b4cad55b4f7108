//! User identity referenced by articles and comments.
//!
//! The identity store (credential hashes, uniqueness) is owned by the
//! [`crate::domain::ports::IdentityService`] collaborator; the domain only
//! carries the public identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors for user identity components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was not a valid UUID.
    InvalidId,
    /// The username was blank once trimmed.
    EmptyUsername,
    /// The username was shorter than the minimum.
    UsernameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// The username was longer than the maximum.
    UsernameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The username contained characters outside the allowed set.
    UsernameInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, or underscores",
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID already known to identify a user.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

/// Unique login name chosen at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from raw input.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public identity of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    /// Build a [`User`] from validated components.
    #[must_use]
    pub const fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name shown to other users.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyUsername)]
    #[case("   ", UserValidationError::EmptyUsername)]
    #[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
    #[case(
        "a_very_long_username_that_goes_past_the_limit",
        UserValidationError::UsernameTooLong { max: USERNAME_MAX }
    )]
    #[case("space inside", UserValidationError::UsernameInvalidCharacters)]
    #[case("émile", UserValidationError::UsernameInvalidCharacters)]
    fn invalid_usernames_are_rejected(
        #[case] raw: &str,
        #[case] expected: UserValidationError,
    ) {
        let err = Username::new(raw).expect_err("invalid username must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("alice")]
    #[case("  bob_42  ")]
    #[case("XYZ")]
    fn valid_usernames_are_trimmed(#[case] raw: &str) {
        let username = Username::new(raw).expect("valid username");
        assert_eq!(username.as_ref(), raw.trim());
    }

    #[test]
    fn user_id_parses_and_round_trips() {
        let id = UserId::random();
        let parsed = UserId::parse(&id.to_string()).expect("round trip");
        assert_eq!(parsed, id);
    }

    #[test]
    fn malformed_user_id_is_rejected() {
        assert_eq!(UserId::parse("not-a-uuid"), Err(UserValidationError::InvalidId));
    }

    #[test]
    fn username_serde_validates_on_deserialize() {
        let ok: Username = serde_json::from_str("\"alice\"").expect("valid username");
        assert_eq!(ok.as_ref(), "alice");
        let err = serde_json::from_str::<Username>("\"a\"");
        assert!(err.is_err());
    }
}
