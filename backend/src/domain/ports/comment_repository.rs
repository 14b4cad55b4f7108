//! Port abstraction for comment persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::article::ArticleId;
use crate::domain::comment::{Comment, CommentDraft};
use crate::domain::error::Error;

/// Persistence errors raised by comment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentPersistenceError {
    /// Repository connection could not be established.
    #[error("comment repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("comment repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The parent article vanished between the handler's check and the
    /// insert (foreign-key violation).
    #[error("parent article not found")]
    ArticleNotFound,
}

impl CommentPersistenceError {
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

impl From<CommentPersistenceError> for Error {
    fn from(err: CommentPersistenceError) -> Self {
        match err {
            CommentPersistenceError::Connection { .. } => {
                Self::service_unavailable("comment storage is unavailable")
            }
            CommentPersistenceError::Query { message } => {
                Self::internal(format!("comment storage failed: {message}"))
            }
            CommentPersistenceError::ArticleNotFound => Self::not_found("article not found"),
        }
    }
}

/// Driven port for comment storage.
///
/// Comments are write-once; deletion happens only as a cascade of the
/// parent article's deletion, which the article repository owns.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment, assigning its id and timestamp.
    async fn create(&self, draft: &CommentDraft) -> Result<Comment, CommentPersistenceError>;

    /// An article's comments in ascending creation-time order.
    async fn list_for_article(
        &self,
        article: &ArticleId,
    ) -> Result<Vec<Comment>, CommentPersistenceError>;
}
