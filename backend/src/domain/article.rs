//! Article aggregate: the unit of authorship on the blog.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Maximum allowed length for an article title.
pub const TITLE_MAX: usize = 200;

/// Validation errors for article fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleValidationError {
    /// The identifier was not a valid UUID.
    InvalidId,
    /// The title was blank once trimmed.
    EmptyTitle,
    /// The title was longer than [`TITLE_MAX`].
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The body was blank once trimmed.
    EmptyBody,
}

impl fmt::Display for ArticleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "article id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "title must be at most {max} characters")
            }
            Self::EmptyBody => write!(f, "body must not be empty"),
        }
    }
}

impl std::error::Error for ArticleValidationError {}

/// Stable article identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(Uuid);

impl ArticleId {
    /// Generate a new random [`ArticleId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID already known to identify an article.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, ArticleValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ArticleValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Article headline, trimmed and bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArticleTitle(String);

impl ArticleTitle {
    /// Validate and construct a title from raw input.
    pub fn new(title: impl AsRef<str>) -> Result<Self, ArticleValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ArticleValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(ArticleValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ArticleTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ArticleTitle> for String {
    fn from(value: ArticleTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for ArticleTitle {
    type Error = ArticleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Article body text, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArticleBody(String);

impl ArticleBody {
    /// Validate and construct a body from raw input.
    pub fn new(body: impl AsRef<str>) -> Result<Self, ArticleValidationError> {
        let trimmed = body.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ArticleValidationError::EmptyBody);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ArticleBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ArticleBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ArticleBody> for String {
    fn from(value: ArticleBody) -> Self {
        value.0
    }
}

impl TryFrom<String> for ArticleBody {
    type Error = ArticleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A published article.
///
/// ## Invariants
/// - `author` never changes after creation.
/// - `created_at <= updated_at`; edits refresh `updated_at` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    id: ArticleId,
    title: ArticleTitle,
    body: ArticleBody,
    author: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Article {
    /// Materialize an article from store-assigned parts.
    #[must_use]
    pub const fn new(
        id: ArticleId,
        title: ArticleTitle,
        body: ArticleBody,
        author: UserId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            body,
            author,
            created_at,
            updated_at,
        }
    }

    /// Stable article identifier.
    #[must_use]
    pub const fn id(&self) -> &ArticleId {
        &self.id
    }

    /// Article headline.
    #[must_use]
    pub const fn title(&self) -> &ArticleTitle {
        &self.title
    }

    /// Article body text.
    #[must_use]
    pub const fn body(&self) -> &ArticleBody {
        &self.body
    }

    /// Owning author; immutable for the article's lifetime.
    #[must_use]
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Creation timestamp assigned by the store.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last-modification timestamp assigned by the store.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Validated input for creating an article; the store assigns id and
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    /// Article headline.
    pub title: ArticleTitle,
    /// Article body text.
    pub body: ArticleBody,
    /// Authenticated author creating the article.
    pub author: UserId,
}

/// Validated replacement values for an article edit.
///
/// The author is deliberately absent: authorship never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleChanges {
    /// Replacement headline.
    pub title: ArticleTitle,
    /// Replacement body text.
    pub body: ArticleBody,
}
