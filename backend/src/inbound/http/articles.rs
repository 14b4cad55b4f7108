//! Article endpoints: home feed, detail, and the authoring flows.
//!
//! ```text
//! GET  /                      Paginated feed, newest first (?page=N)
//! GET  /articles/new          Authoring form descriptor
//! POST /articles/new          Create an article
//! GET  /articles/{id}         Article detail with its comments
//! GET  /articles/{id}/edit    Edit form, prefilled (author only)
//! POST /articles/{id}/edit    Update title and body (author only)
//! GET  /articles/{id}/delete  Delete confirmation (author only)
//! POST /articles/{id}/delete  Delete the article and its comments
//! ```
//!
//! Ownership violations are denied silently: the response is the same
//! `303 See Other` to the article detail that a successful submission
//! would produce, so the endpoints do not advertise who owns what.

use std::collections::HashMap;

use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use pagination::{PageMeta, Paginator, FEED_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    authorization, Article, ArticleBody, ArticleChanges, ArticleDraft, ArticleId, ArticleTitle,
    Comment, Error, UserId, TITLE_MAX,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_article_error;
use crate::inbound::http::{see_other, ApiResult};

/// Feed query parameters.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Page token; non-numeric values fall back to the first page.
    #[serde(default)]
    pub page: Option<String>,
}

/// Article form body for create and edit submissions.
#[derive(Debug, Deserialize)]
pub struct ArticleForm {
    /// Article headline.
    #[serde(default)]
    pub title: String,
    /// Article body text.
    #[serde(default)]
    pub body: String,
}

/// Article rendered for responses, with the author's username resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub id: ArticleId,
    pub title: String,
    pub body: String,
    pub author: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleView {
    pub(crate) fn from_article(article: &Article, author: &str) -> Self {
        Self {
            id: *article.id(),
            title: article.title().to_string(),
            body: article.body().to_string(),
            author: author.to_owned(),
            author_id: *article.author(),
            created_at: article.created_at(),
            updated_at: article.updated_at(),
        }
    }
}

/// Comment rendered for the article detail response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: crate::domain::CommentId,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Home feed response: one page of articles plus pagination metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub articles: Vec<ArticleView>,
    pub pagination: PageMeta,
}

/// Article detail response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetailResponse {
    pub article: ArticleView,
    pub comments: Vec<CommentView>,
}

pub(crate) fn article_detail_path(id: &ArticleId) -> String {
    format!("/articles/{id}")
}

fn parse_article_id(raw: &str) -> Result<ArticleId, Error> {
    // An unparseable id is indistinguishable from an unknown one.
    ArticleId::parse(raw).map_err(|_| Error::not_found("article not found"))
}

async fn find_article_or_404(state: &HttpState, id: &ArticleId) -> Result<Article, Error> {
    state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found("article not found"))
}

/// Resolve usernames for every distinct author in `articles`.
pub(crate) async fn author_usernames(
    state: &HttpState,
    articles: &[Article],
) -> ApiResult<HashMap<UserId, String>> {
    let mut names = HashMap::new();
    for article in articles {
        let author = *article.author();
        if names.contains_key(&author) {
            continue;
        }
        let user = state
            .identity
            .find_by_id(&author)
            .await?
            .ok_or_else(|| Error::internal(format!("article author {author} is missing")))?;
        names.insert(author, user.username().to_string());
    }
    Ok(names)
}

pub(crate) fn render_articles(
    articles: &[Article],
    names: &HashMap<UserId, String>,
) -> ApiResult<Vec<ArticleView>> {
    articles
        .iter()
        .map(|article| {
            let author = names
                .get(article.author())
                .ok_or_else(|| Error::internal("unresolved article author"))?;
            Ok(ArticleView::from_article(article, author))
        })
        .collect()
}

/// Home feed: all articles, newest first, five per page.
#[get("/")]
pub async fn home(
    state: web::Data<HttpState>,
    query: web::Query<FeedQuery>,
) -> ApiResult<HttpResponse> {
    let articles = state.articles.list_recent().await?;

    let paginator = Paginator::new(FEED_PAGE_SIZE)
        .map_err(|err| Error::internal(format!("invalid feed page size: {err}")))?;
    let page = paginator.paginate(articles, query.page.as_deref());
    let meta = page.meta();

    let items = page.into_items();
    let names = author_usernames(&state, &items).await?;
    let body = FeedResponse {
        articles: render_articles(&items, &names)?,
        pagination: meta,
    };
    Ok(HttpResponse::Ok().json(body))
}

/// Describe the authoring form for clients rendering it.
#[get("/articles/new")]
pub async fn new_article_form(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    Ok(HttpResponse::Ok().json(json!({
        "fields": {
            "title": { "required": true, "maxLength": TITLE_MAX },
            "body": { "required": true },
        }
    })))
}

/// Create an article owned by the session user.
#[post("/articles/new")]
pub async fn create_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ArticleForm>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;

    let title = ArticleTitle::new(&form.title).map_err(|err| map_article_error(&err))?;
    let body = ArticleBody::new(&form.body).map_err(|err| map_article_error(&err))?;

    let draft = ArticleDraft {
        title,
        body,
        author,
    };
    let article = state.articles.create(&draft).await?;
    tracing::info!(article = %article.id(), author = %author, "article created");

    Ok(see_other(&article_detail_path(article.id())))
}

/// Article detail with comments in ascending creation order.
#[get("/articles/{id}")]
pub async fn article_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_article_id(&path)?;
    let article = find_article_or_404(&state, &id).await?;
    let comments = state.comments.list_for_article(&id).await?;

    let names = comment_author_usernames(&state, &article, &comments).await?;
    let article_author = names
        .get(article.author())
        .ok_or_else(|| Error::internal("unresolved article author"))?;

    let comment_views = comments
        .iter()
        .map(|comment| {
            let author = names
                .get(comment.author())
                .ok_or_else(|| Error::internal("unresolved comment author"))?;
            Ok(CommentView {
                id: *comment.id(),
                author: author.clone(),
                body: comment.body().as_ref().to_owned(),
                created_at: comment.created_at(),
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;

    let body = ArticleDetailResponse {
        article: ArticleView::from_article(&article, article_author),
        comments: comment_views,
    };
    Ok(HttpResponse::Ok().json(body))
}

async fn comment_author_usernames(
    state: &HttpState,
    article: &Article,
    comments: &[Comment],
) -> ApiResult<HashMap<UserId, String>> {
    let mut names = HashMap::new();
    let mut ids: Vec<UserId> = vec![*article.author()];
    ids.extend(comments.iter().map(|comment| *comment.author()));
    for id in ids {
        if names.contains_key(&id) {
            continue;
        }
        let user = state
            .identity
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Error::internal(format!("user {id} is missing")))?;
        names.insert(id, user.username().to_string());
    }
    Ok(names)
}

/// Edit form, prefilled with the current content. Author only.
#[get("/articles/{id}/edit")]
pub async fn edit_article_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let id = parse_article_id(&path)?;
    let article = find_article_or_404(&state, &id).await?;

    if !authorization::can_edit_or_delete(&article, &user) {
        return Ok(see_other(&article_detail_path(&id)));
    }

    Ok(HttpResponse::Ok().json(json!({
        "fields": {
            "title": { "required": true, "maxLength": TITLE_MAX },
            "body": { "required": true },
        },
        "values": {
            "title": article.title().as_ref(),
            "body": article.body().as_ref(),
        }
    })))
}

/// Replace an article's title and body. Author only.
#[post("/articles/{id}/edit")]
pub async fn update_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<ArticleForm>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let id = parse_article_id(&path)?;
    let article = find_article_or_404(&state, &id).await?;

    if !authorization::can_edit_or_delete(&article, &user) {
        return Ok(see_other(&article_detail_path(&id)));
    }

    let title = ArticleTitle::new(&form.title).map_err(|err| map_article_error(&err))?;
    let body = ArticleBody::new(&form.body).map_err(|err| map_article_error(&err))?;
    let changes = ArticleChanges { title, body };

    state
        .articles
        .update(&id, &changes)
        .await?
        .ok_or_else(|| Error::not_found("article not found"))?;
    tracing::info!(article = %id, author = %user, "article updated");

    Ok(see_other(&article_detail_path(&id)))
}

/// Delete confirmation. Author only.
#[get("/articles/{id}/delete")]
pub async fn delete_article_confirm(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let id = parse_article_id(&path)?;
    let article = find_article_or_404(&state, &id).await?;

    if !authorization::can_edit_or_delete(&article, &user) {
        return Ok(see_other(&article_detail_path(&id)));
    }

    Ok(HttpResponse::Ok().json(json!({
        "article": {
            "id": article.id(),
            "title": article.title().as_ref(),
        }
    })))
}

/// Delete an article and, by cascade, its comments. Author only.
#[post("/articles/{id}/delete")]
pub async fn delete_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let id = parse_article_id(&path)?;
    let article = find_article_or_404(&state, &id).await?;

    if !authorization::can_edit_or_delete(&article, &user) {
        return Ok(see_other(&article_detail_path(&id)));
    }

    state.articles.delete(&id).await?;
    tracing::info!(article = %id, author = %user, "article deleted");

    Ok(see_other("/"))
}
