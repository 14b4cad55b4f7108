//! Port abstraction for article persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::article::{Article, ArticleChanges, ArticleDraft, ArticleId};
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Persistence errors raised by article repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticlePersistenceError {
    /// Repository connection could not be established.
    #[error("article repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("article repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl ArticlePersistenceError {
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

impl From<ArticlePersistenceError> for Error {
    fn from(err: ArticlePersistenceError) -> Self {
        match err {
            ArticlePersistenceError::Connection { .. } => {
                Self::service_unavailable("article storage is unavailable")
            }
            ArticlePersistenceError::Query { message } => {
                Self::internal(format!("article storage failed: {message}"))
            }
        }
    }
}

/// Driven port for article storage.
///
/// Adapters assign identifiers and timestamps, keep listings ordered by
/// recency, and delete an article's comments together with the article.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Persist a new article, assigning its id and timestamps.
    async fn create(&self, draft: &ArticleDraft) -> Result<Article, ArticlePersistenceError>;

    /// Fetch an article by identifier.
    async fn find_by_id(
        &self,
        id: &ArticleId,
    ) -> Result<Option<Article>, ArticlePersistenceError>;

    /// All articles, newest first.
    async fn list_recent(&self) -> Result<Vec<Article>, ArticlePersistenceError>;

    /// A single author's articles, newest first.
    async fn list_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Article>, ArticlePersistenceError>;

    /// Replace an article's title and body, refreshing `updated_at`.
    ///
    /// Returns `None` when no article has the given id.
    async fn update(
        &self,
        id: &ArticleId,
        changes: &ArticleChanges,
    ) -> Result<Option<Article>, ArticlePersistenceError>;

    /// Delete an article and, by cascade, all of its comments.
    ///
    /// Returns `false` when no article had the given id.
    async fn delete(&self, id: &ArticleId) -> Result<bool, ArticlePersistenceError>;
}
