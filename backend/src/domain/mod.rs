//! Domain primitives, aggregates, and ports.
//!
//! Purpose: define strongly typed blog entities used by the inbound and
//! outbound adapters. Types are immutable; each documents its invariants
//! and serde contract in its own Rustdoc.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic failure payload.
//! - [`User`], [`UserId`], [`Username`] — identity referenced by content.
//! - [`Article`], [`Comment`] and their drafts — blog content.
//! - [`authorization`] — pure ownership/self-comment predicates.
//! - [`ports`] — async traits the adapters implement.

pub mod article;
pub mod auth;
pub mod authorization;
pub mod comment;
pub mod error;
pub mod ports;
pub mod user;

pub use self::article::{
    Article, ArticleBody, ArticleChanges, ArticleDraft, ArticleId, ArticleTitle,
    ArticleValidationError, TITLE_MAX,
};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Registration,
    RegistrationValidationError,
};
pub use self::comment::{
    Comment, CommentBody, CommentDraft, CommentId, CommentValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username};
