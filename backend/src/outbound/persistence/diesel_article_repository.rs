//! PostgreSQL-backed `ArticleRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ArticlePersistenceError, ArticleRepository};
use crate::domain::{Article, ArticleChanges, ArticleDraft, ArticleId, UserId};

use super::models::{ArticleRow, ArticleUpdate, NewArticleRow};
use super::pool::{DbPool, PoolError};
use super::schema::articles;

/// Diesel-backed implementation of the `ArticleRepository` port.
///
/// Deleting an article relies on the `ON DELETE CASCADE` constraint on
/// `comments.article_id`, so the cascade happens inside PostgreSQL.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ArticlePersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ArticlePersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ArticlePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ArticlePersistenceError::connection("database connection error")
        }
        _ => ArticlePersistenceError::query("database error"),
    }
}

fn row_to_article(row: ArticleRow) -> Result<Article, ArticlePersistenceError> {
    row.into_article().map_err(ArticlePersistenceError::query)
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn create(&self, draft: &ArticleDraft) -> Result<Article, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = Utc::now();
        let new_row = NewArticleRow {
            id: Uuid::new_v4(),
            title: draft.title.as_ref(),
            body: draft.body.as_ref(),
            author_id: *draft.author.as_uuid(),
            created_at: now,
            updated_at: now,
        };

        let row: ArticleRow = diesel::insert_into(articles::table)
            .values(&new_row)
            .returning(ArticleRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_article(row)
    }

    async fn find_by_id(
        &self,
        id: &ArticleId,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ArticleRow> = articles::table
            .filter(articles::id.eq(id.as_uuid()))
            .select(ArticleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_article).transpose()
    }

    async fn list_recent(&self) -> Result<Vec<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ArticleRow> = articles::table
            .select(ArticleRow::as_select())
            .order_by(articles::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_article).collect()
    }

    async fn list_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ArticleRow> = articles::table
            .filter(articles::author_id.eq(author.as_uuid()))
            .select(ArticleRow::as_select())
            .order_by(articles::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_article).collect()
    }

    async fn update(
        &self,
        id: &ArticleId,
        changes: &ArticleChanges,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = ArticleUpdate {
            title: changes.title.as_ref(),
            body: changes.body.as_ref(),
            updated_at: Utc::now(),
        };

        let row: Option<ArticleRow> = diesel::update(articles::table)
            .filter(articles::id.eq(id.as_uuid()))
            .set(&changeset)
            .returning(ArticleRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_article).transpose()
    }

    async fn delete(&self, id: &ArticleId) -> Result<bool, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(articles::table)
            .filter(articles::id.eq(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
