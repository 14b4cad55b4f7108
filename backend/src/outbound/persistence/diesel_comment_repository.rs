//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{CommentPersistenceError, CommentRepository};
use crate::domain::{ArticleId, Comment, CommentDraft};

use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::comments;

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CommentPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CommentPersistenceError {
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
        // The parent article was deleted between the handler's lookup and
        // this insert.
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            CommentPersistenceError::ArticleNotFound
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CommentPersistenceError::connection("database connection error")
        }
        _ => CommentPersistenceError::query("database error"),
    }
}

fn row_to_comment(row: CommentRow) -> Result<Comment, CommentPersistenceError> {
    row.into_comment().map_err(CommentPersistenceError::query)
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(&self, draft: &CommentDraft) -> Result<Comment, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCommentRow {
            id: Uuid::new_v4(),
            article_id: *draft.article.as_uuid(),
            author_id: *draft.author.as_uuid(),
            body: draft.body.as_ref(),
            created_at: Utc::now(),
        };

        let row: CommentRow = diesel::insert_into(comments::table)
            .values(&new_row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_comment(row)
    }

    async fn list_for_article(
        &self,
        article: &ArticleId,
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CommentRow> = comments::table
            .filter(comments::article_id.eq(article.as_uuid()))
            .select(CommentRow::as_select())
            .order_by(comments::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_comment).collect()
    }
}
