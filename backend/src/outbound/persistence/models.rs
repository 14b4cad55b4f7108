//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and
//! never cross into the domain. Conversions back to domain types go
//! through the validating constructors, so a corrupted row surfaces as a
//! query error instead of an invalid domain value.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Article, ArticleBody, ArticleId, ArticleTitle, Comment, CommentBody, CommentId, User, UserId,
    Username,
};

use super::schema::{articles, comments, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

impl UserRow {
    /// Convert to the public domain identity, dropping the hash.
    pub fn into_user(self) -> Result<User, String> {
        let username = Username::new(&self.username)
            .map_err(|err| format!("stored username is invalid: {err}"))?;
        Ok(User::new(UserId::from_uuid(self.id), username))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the articles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleRow {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleRow {
    /// Convert to the domain article, re-validating stored text.
    pub fn into_article(self) -> Result<Article, String> {
        let title = ArticleTitle::new(&self.title)
            .map_err(|err| format!("stored title is invalid: {err}"))?;
        let body = ArticleBody::new(&self.body)
            .map_err(|err| format!("stored body is invalid: {err}"))?;
        Ok(Article::new(
            ArticleId::from_uuid(self.id),
            title,
            body,
            UserId::from_uuid(self.author_id),
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Insertable struct for creating new article records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub(crate) struct NewArticleRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub body: &'a str,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for editing existing article records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = articles)]
pub(crate) struct ArticleUpdate<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub article_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl CommentRow {
    /// Convert to the domain comment, re-validating stored text.
    pub fn into_comment(self) -> Result<Comment, String> {
        let body = CommentBody::new(&self.body)
            .map_err(|err| format!("stored body is invalid: {err}"))?;
        Ok(Comment::new(
            CommentId::from_uuid(self.id),
            ArticleId::from_uuid(self.article_id),
            UserId::from_uuid(self.author_id),
            body,
            self.created_at,
        ))
    }
}

/// Insertable struct for creating new comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub id: Uuid,
    pub article_id: Uuid,
    pub author_id: Uuid,
    pub body: &'a str,
    pub created_at: DateTime<Utc>,
}
