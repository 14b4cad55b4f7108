//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ArticleRepository, CommentRepository, IdentityService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, authentication, and user lookup.
    pub identity: Arc<dyn IdentityService>,
    /// Article storage.
    pub articles: Arc<dyn ArticleRepository>,
    /// Comment storage.
    pub comments: Arc<dyn CommentRepository>,
}

impl HttpState {
    /// Construct state from port implementations.
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityService>,
        articles: Arc<dyn ArticleRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            identity,
            articles,
            comments,
        }
    }
}
