//! Registration, login, logout, and profile endpoints.
//!
//! ```text
//! GET  /register          Registration form descriptor
//! POST /register          Create an account and log it in
//! GET  /login             Login form descriptor
//! POST /login             Authenticate and establish a session
//! GET  /logout            Destroy the session
//! POST /logout            Destroy the session
//! GET  /users/{username}  Public profile with the user's articles
//! ```
//!
//! Logout accepts GET as well as POST so plain links keep working.

use actix_web::{get, post, route, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, LoginCredentials, Registration, UserId, Username, PASSWORD_MIN, USERNAME_MAX,
    USERNAME_MIN,
};
use crate::inbound::http::articles::{author_usernames, render_articles, ArticleView};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_login_error, map_registration_error};
use crate::inbound::http::{see_other, ApiResult};

/// Registration form body.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// Requested login name.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
    /// Password confirmation; must match exactly.
    #[serde(default)]
    pub password_confirm: String,
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// Public profile response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: UserId,
    pub username: String,
    pub articles: Vec<ArticleView>,
}

/// Describe the registration form for clients rendering it.
#[get("/register")]
pub async fn register_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "fields": {
            "username": {
                "required": true,
                "minLength": USERNAME_MIN,
                "maxLength": USERNAME_MAX,
            },
            "password": { "required": true, "minLength": PASSWORD_MIN },
            "password_confirm": { "required": true },
        }
    }))
}

/// Create an account and log the new user in.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from_parts(&form.username, &form.password, &form.password_confirm)
            .map_err(|err| map_registration_error(&err))?;

    let user = state.identity.register(&registration).await?;
    session.persist_user(user.id())?;
    tracing::info!(user = %user.id(), username = %user.username(), "user registered");

    Ok(see_other("/"))
}

/// Describe the login form for clients rendering it.
#[get("/login")]
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "fields": {
            "username": { "required": true },
            "password": { "required": true },
        }
    }))
}

/// Authenticate and establish a session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&form.username, &form.password)
        .map_err(|err| map_login_error(&err))?;

    let user = state.identity.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    tracing::info!(user = %user.id(), "user logged in");

    Ok(see_other("/"))
}

/// Destroy the session and return to the feed.
#[route("/logout", method = "GET", method = "POST")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    see_other("/")
}

/// Public profile: the user's identity and their articles, newest first.
#[get("/users/{username}")]
pub async fn profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let username =
        Username::new(path.as_str()).map_err(|_| Error::not_found("user not found"))?;
    let user = state
        .identity
        .find_by_username(&username)
        .await?
        .ok_or_else(|| Error::not_found("user not found"))?;

    let articles = state.articles.list_by_author(user.id()).await?;
    let names = author_usernames(&state, &articles).await?;

    let body = ProfileResponse {
        id: *user.id(),
        username: user.username().to_string(),
        articles: render_articles(&articles, &names)?,
    };
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    use crate::inbound::http::test_utils::{
        create_article_as, register_and_login, test_app,
    };

    #[actix_web::test]
    async fn registration_logs_the_user_in() {
        let app = actix_test::init_service(test_app()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_form([
                    ("username", "alice"),
                    ("password", "long enough password"),
                    ("password_confirm", "long enough password"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/")
        );
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        // The fresh session can reach an authenticated endpoint.
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/articles/new")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn duplicate_username_is_rejected_with_field_details() {
        let app = actix_test::init_service(test_app()).await;
        let _ = register_and_login(&app, "alice").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_form([
                    ("username", "alice"),
                    ("password", "long enough password"),
                    ("password_confirm", "long enough password"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert!(body["details"]["fields"]["username"].is_string());
    }

    #[actix_web::test]
    async fn mismatched_confirmation_is_rejected() {
        let app = actix_test::init_service(test_app()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_form([
                    ("username", "alice"),
                    ("password", "long enough password"),
                    ("password_confirm", "something different"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert!(body["details"]["fields"]["password_confirm"].is_string());
    }

    #[actix_web::test]
    async fn login_with_wrong_password_is_unauthorised() {
        let app = actix_test::init_service(test_app()).await;
        let _ = register_and_login(&app, "alice").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_form([("username", "alice"), ("password", "not the password")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn logout_invalidates_the_session() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = register_and_login(&app, "alice").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let cleared = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("cleared session cookie")
            .into_owned();

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/articles/new")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_accepts_plain_get_links() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = register_and_login(&app, "alice").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn profile_lists_only_that_users_articles() {
        let app = actix_test::init_service(test_app()).await;
        let alice_cookie = register_and_login(&app, "alice").await;
        let bob_cookie = register_and_login(&app, "bob").await;
        create_article_as(&app, &alice_cookie, "Alice writes", "body text").await;
        create_article_as(&app, &bob_cookie, "Bob writes", "body text").await;
        create_article_as(&app, &alice_cookie, "Alice again", "body text").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users/alice").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["username"], "alice");
        let titles: Vec<&str> = body["articles"]
            .as_array()
            .expect("articles array")
            .iter()
            .map(|a| a["title"].as_str().expect("title"))
            .collect();
        assert_eq!(titles, vec!["Alice again", "Alice writes"]);
    }

    #[actix_web::test]
    async fn unknown_profile_is_not_found() {
        let app = actix_test::init_service(test_app()).await;

        for uri in ["/users/ghost", "/users/bad%20name"] {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::get().uri(uri).to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "uri: {uri}");
        }
    }
}
