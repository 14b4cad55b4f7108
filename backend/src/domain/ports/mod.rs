//! Domain ports and supporting types for the hexagonal boundary.

mod article_repository;
mod comment_repository;
mod identity_service;

pub use article_repository::{ArticlePersistenceError, ArticleRepository};
pub use comment_repository::{CommentPersistenceError, CommentRepository};
pub use identity_service::{IdentityError, IdentityService};
