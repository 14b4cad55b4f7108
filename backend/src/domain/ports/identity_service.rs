//! Driving port for the identity collaborator.
//!
//! In hexagonal terms the identity store is an external collaborator: it
//! owns credential hashes and username uniqueness. Inbound adapters call
//! this port to register and authenticate without knowing the backing
//! infrastructure, which keeps handler tests deterministic.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::user::{User, UserId, Username};

/// Errors raised by identity adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The requested username is already registered.
    #[error("username is already taken")]
    UsernameTaken,
    /// The supplied credentials did not match a registered user.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Identity store connection could not be established.
    #[error("identity store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("identity store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl IdentityError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<IdentityError> for Error {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::UsernameTaken => Self::invalid_request("username is already taken")
                .with_details(json!({ "fields": { "username": "already taken" } })),
            IdentityError::InvalidCredentials => Self::unauthorized("invalid credentials"),
            IdentityError::Connection { .. } => {
                Self::service_unavailable("identity store is unavailable")
            }
            IdentityError::Query { message } => {
                Self::internal(format!("identity store failed: {message}"))
            }
        }
    }
}

/// Domain use-case port for registration, authentication, and user lookup.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Register a new user, hashing the password and enforcing username
    /// uniqueness.
    async fn register(&self, registration: &Registration) -> Result<User, IdentityError>;

    /// Validate credentials and return the authenticated user.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, IdentityError>;

    /// Fetch a user by login name.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, IdentityError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityError>;
}
