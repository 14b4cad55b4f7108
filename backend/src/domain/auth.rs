//! Authentication primitives: login credentials and registrations.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to the identity port.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{UserValidationError, Username};

/// Minimum accepted password length at registration.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the identity port.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// The requested username failed identity validation.
    Username(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password was shorter than [`PASSWORD_MIN`].
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// The confirmation did not match the password.
    PasswordMismatch,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordMismatch => write!(f, "passwords do not match"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(err: UserValidationError) -> Self {
        Self::Username(err)
    }
}

/// Validated registration request handed to the identity port.
///
/// Username uniqueness is the identity store's responsibility; this type
/// only enforces the shape of the submitted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw form inputs.
    ///
    /// The password and its confirmation must match exactly, including
    /// whitespace.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username)?;

        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if password != password_confirm {
            return Err(RegistrationValidationError::PasswordMismatch);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Plain-text password to be hashed by the identity store.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_login_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin  ", "secret")]
    #[case("alice", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("alice", "", "", RegistrationValidationError::EmptyPassword)]
    #[case(
        "alice",
        "short",
        "short",
        RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN }
    )]
    #[case(
        "alice",
        "long enough password",
        "different password",
        RegistrationValidationError::PasswordMismatch
    )]
    fn invalid_registrations(
        #[case] username: &str,
        #[case] password: &str,
        #[case] confirm: &str,
        #[case] expected: RegistrationValidationError,
    ) {
        let err = Registration::try_from_parts(username, password, confirm)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn bad_username_surfaces_identity_validation() {
        let err = Registration::try_from_parts("a b", "long enough password", "long enough password")
            .expect_err("invalid username must fail");
        assert!(matches!(err, RegistrationValidationError::Username(_)));
    }

    #[test]
    fn valid_registration_keeps_parts() {
        let registration =
            Registration::try_from_parts(" alice ", "long enough password", "long enough password")
                .expect("valid registration");
        assert_eq!(registration.username().as_ref(), "alice");
        assert_eq!(registration.password(), "long enough password");
    }
}
