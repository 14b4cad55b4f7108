//! In-memory article and comment store.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::article::{Article, ArticleChanges, ArticleDraft, ArticleId};
use crate::domain::comment::{Comment, CommentDraft, CommentId};
use crate::domain::ports::{
    ArticlePersistenceError, ArticleRepository, CommentPersistenceError, CommentRepository,
};
use crate::domain::user::UserId;

#[derive(Default)]
struct StoreState {
    // Insertion order doubles as creation order.
    articles: Vec<Article>,
    comments: Vec<Comment>,
}

/// Shared in-memory store implementing both content repositories.
///
/// A single state block keeps the cascade atomic: deleting an article
/// removes its comments under the same lock.
#[derive(Clone, Default)]
pub struct InMemoryBlogStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryBlogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut StoreState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

#[async_trait]
impl ArticleRepository for InMemoryBlogStore {
    async fn create(&self, draft: &ArticleDraft) -> Result<Article, ArticlePersistenceError> {
        let now = Utc::now();
        let article = Article::new(
            ArticleId::random(),
            draft.title.clone(),
            draft.body.clone(),
            draft.author,
            now,
            now,
        );
        self.with_state(|state| state.articles.push(article.clone()));
        Ok(article)
    }

    async fn find_by_id(
        &self,
        id: &ArticleId,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        Ok(self.with_state(|state| {
            state
                .articles
                .iter()
                .find(|article| article.id() == id)
                .cloned()
        }))
    }

    async fn list_recent(&self) -> Result<Vec<Article>, ArticlePersistenceError> {
        Ok(self.with_state(|state| {
            // Insertion order is creation order; reverse it for recency.
            state.articles.iter().rev().cloned().collect()
        }))
    }

    async fn list_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        Ok(self.with_state(|state| {
            state
                .articles
                .iter()
                .rev()
                .filter(|article| article.author() == author)
                .cloned()
                .collect()
        }))
    }

    async fn update(
        &self,
        id: &ArticleId,
        changes: &ArticleChanges,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        Ok(self.with_state(|state| {
            let slot = state.articles.iter_mut().find(|article| article.id() == id)?;
            let updated = Article::new(
                *slot.id(),
                changes.title.clone(),
                changes.body.clone(),
                *slot.author(),
                slot.created_at(),
                Utc::now(),
            );
            *slot = updated.clone();
            Some(updated)
        }))
    }

    async fn delete(&self, id: &ArticleId) -> Result<bool, ArticlePersistenceError> {
        Ok(self.with_state(|state| {
            let before = state.articles.len();
            state.articles.retain(|article| article.id() != id);
            let removed = state.articles.len() < before;
            if removed {
                // Cascade: an article owns its comments.
                state.comments.retain(|comment| comment.article() != id);
            }
            removed
        }))
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn create(&self, draft: &CommentDraft) -> Result<Comment, CommentPersistenceError> {
        self.with_state(|state| {
            if !state
                .articles
                .iter()
                .any(|article| article.id() == &draft.article)
            {
                return Err(CommentPersistenceError::ArticleNotFound);
            }
            let comment = Comment::new(
                CommentId::random(),
                draft.article,
                draft.author,
                draft.body.clone(),
                Utc::now(),
            );
            state.comments.push(comment.clone());
            Ok(comment)
        })
    }

    async fn list_for_article(
        &self,
        article: &ArticleId,
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        Ok(self.with_state(|state| {
            let mut comments: Vec<Comment> = state
                .comments
                .iter()
                .filter(|comment| comment.article() == article)
                .cloned()
                .collect();
            // Stable sort: equal timestamps keep insertion order.
            comments.sort_by_key(Comment::created_at);
            comments
        }))
    }
}
