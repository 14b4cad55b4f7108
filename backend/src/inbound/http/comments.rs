//! Comment endpoint.
//!
//! ```text
//! POST /articles/{id}/comments  Add a comment (not the article's author)
//! ```
//!
//! The article's own author is denied silently: the submission answers
//! with the same `303 See Other` to the detail page as a success, and no
//! comment is stored. A malformed body takes the same redirect, matching
//! a form resubmission flow rather than an API error.

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::{authorization, ArticleId, CommentBody, CommentDraft, Error};
use crate::inbound::http::articles::article_detail_path;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{see_other, ApiResult};

/// Comment form body.
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    /// Comment text.
    #[serde(default)]
    pub body: String,
}

/// Attach a comment to an article.
#[post("/articles/{id}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<CommentForm>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let id = ArticleId::parse(&path).map_err(|_| Error::not_found("article not found"))?;
    let article = state
        .articles
        .find_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found("article not found"))?;

    let detail = article_detail_path(&id);
    if !authorization::can_comment(&article, &user) {
        return Ok(see_other(&detail));
    }

    let Ok(body) = CommentBody::new(&form.body) else {
        return Ok(see_other(&detail));
    };

    let draft = CommentDraft {
        article: id,
        author: user,
        body,
    };
    let comment = state.comments.create(&draft).await?;
    tracing::info!(comment = %comment.id(), article = %id, author = %user, "comment created");

    Ok(see_other(&detail))
}
