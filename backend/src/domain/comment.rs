//! Comment entity: reader responses attached to an article.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::article::ArticleId;
use crate::domain::user::UserId;

/// Validation errors for comment fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    /// The body was blank once trimmed.
    EmptyBody,
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBody => write!(f, "comment body must not be empty"),
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// Stable comment identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Generate a new random [`CommentId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID already known to identify a comment.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Comment body text, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentBody(String);

impl CommentBody {
    /// Validate and construct a body from raw input.
    pub fn new(body: impl AsRef<str>) -> Result<Self, CommentValidationError> {
        let trimmed = body.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CommentValidationError::EmptyBody);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CommentBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CommentBody> for String {
    fn from(value: CommentBody) -> Self {
        value.0
    }
}

impl TryFrom<String> for CommentBody {
    type Error = CommentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A reader comment on an article.
///
/// ## Invariants
/// - `author` is never the parent article's author.
/// - Comments are immutable; they disappear only when the parent article
///   is deleted (cascade).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: CommentId,
    article: ArticleId,
    author: UserId,
    body: CommentBody,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Materialize a comment from store-assigned parts.
    #[must_use]
    pub const fn new(
        id: CommentId,
        article: ArticleId,
        author: UserId,
        body: CommentBody,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            article,
            author,
            body,
            created_at,
        }
    }

    /// Stable comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Parent article.
    #[must_use]
    pub const fn article(&self) -> &ArticleId {
        &self.article
    }

    /// Comment author.
    #[must_use]
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Comment body text.
    #[must_use]
    pub const fn body(&self) -> &CommentBody {
        &self.body
    }

    /// Creation timestamp assigned by the store.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Validated input for creating a comment; the store assigns id and
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    /// Parent article receiving the comment.
    pub article: ArticleId,
    /// Authenticated commenter.
    pub author: UserId,
    /// Comment body text.
    pub body: CommentBody,
}
