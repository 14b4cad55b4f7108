//! Pure authorization predicates evaluated before any mutation.
//!
//! Failures are *silent denials*: handlers redirect to the article's
//! detail view instead of surfacing an error payload.

use crate::domain::article::Article;
use crate::domain::user::UserId;

/// Only the article's author may edit or delete it.
#[must_use]
pub fn can_edit_or_delete(article: &Article, actor: &UserId) -> bool {
    article.author() == actor
}

/// An article's author may not comment on their own article.
#[must_use]
pub fn can_comment(article: &Article, actor: &UserId) -> bool {
    article.author() != actor
}
