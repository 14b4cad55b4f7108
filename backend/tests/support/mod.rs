//! Shared harness for integration tests: the full application over
//! in-memory adapters.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::{test as actix_test, web, App};

use backend::inbound::http::routes;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{InMemoryBlogStore, InMemoryIdentityService};

/// Service bound expected by the request helpers.
pub trait TestService:
    actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
>
{
}

impl<S> TestService for S where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >
{
}

/// Build the full application over fresh in-memory adapters.
pub fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let store = InMemoryBlogStore::new();
    let state = HttpState::new(
        Arc::new(InMemoryIdentityService::new()),
        Arc::new(store.clone()),
        Arc::new(store),
    );
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(state))
        .wrap(session)
        .configure(routes::configure)
}

/// Register a fresh user and return their session cookie.
pub async fn register_and_login(app: &impl TestService, username: &str) -> Cookie<'static> {
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
    app: &impl TestService,
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

/// Fetch an article detail page as JSON.
pub async fn fetch_detail(app: &impl TestService, location: &str) -> serde_json::Value {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::get().uri(location).to_request(),
    )
    .await;
    assert!(res.status().is_success(), "detail fetch failed: {}", res.status());
    actix_test::read_body_json(res).await
}
