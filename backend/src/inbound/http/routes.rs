//! Route registration for the HTTP adapter.

use actix_web::web;

use crate::inbound::http::{articles, comments, users};

/// Register every blog endpoint on the given service config.
///
/// `/articles/new` is registered before `/articles/{id}` so the literal
/// segment wins over the id capture.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(articles::home)
        .service(users::register_form)
        .service(users::register)
        .service(users::login_form)
        .service(users::login)
        .service(users::logout)
        .service(users::profile)
        .service(articles::new_article_form)
        .service(articles::create_article)
        .service(articles::edit_article_form)
        .service(articles::update_article)
        .service(articles::delete_article_confirm)
        .service(articles::delete_article)
        .service(comments::create_comment)
        .service(articles::article_detail);
}
