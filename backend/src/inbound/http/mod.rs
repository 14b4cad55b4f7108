//! HTTP inbound adapter exposing the blog endpoints.
//!
//! Mutating endpoints accept `application/x-www-form-urlencoded` bodies and
//! answer with `303 See Other` redirects; read endpoints answer JSON.

use actix_web::{http::header, HttpResponse};

pub mod articles;
pub mod comments;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Respond with `303 See Other` pointing at `location`.
#[must_use]
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}
