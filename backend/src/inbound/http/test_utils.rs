//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::{test as actix_test, web, App};

use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryBlogStore, InMemoryIdentityService};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build handler state over fresh in-memory adapters.
pub fn in_memory_state() -> HttpState {
    let store = InMemoryBlogStore::new();
    HttpState::new(
        Arc::new(InMemoryIdentityService::new()),
        Arc::new(store.clone()),
        Arc::new(store),
    )
}

/// Build the full application over in-memory adapters.
pub fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(in_memory_state()))
        .wrap(test_session_middleware())
        .configure(routes::configure)
}

/// Register a fresh user and return their session cookie.
pub async fn register_and_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    username: &str,
) -> Cookie<'static> {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_form([
                ("username", username),
                ("password", "long enough password"),
                ("password_confirm", "long enough password"),
            ])
            .to_request(),
    )
    .await;
    assert!(
        res.status().is_redirection(),
        "registration failed: {}",
        res.status()
    );
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Create an article through the HTTP surface; returns its detail path.
pub async fn create_article_as(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    cookie: &Cookie<'static>,
    title: &str,
    body: &str,
) -> String {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/articles/new")
            .cookie(cookie.clone())
            .set_form([("title", title), ("body", body)])
            .to_request(),
    )
    .await;
    assert!(
        res.status().is_redirection(),
        "article creation failed: {}",
        res.status()
    );
    res.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned()
}
