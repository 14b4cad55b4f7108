//! Home feed pagination over the full application.

mod support;

use actix_web::test as actix_test;
use rstest::rstest;

use support::{create_article_as, register_and_login, test_app};

async fn fetch_feed(
    app: &impl support::TestService,
    query: &str,
) -> serde_json::Value {
    let uri = if query.is_empty() {
        "/".to_owned()
    } else {
        format!("/?page={query}")
    };
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::get().uri(&uri).to_request(),
    )
    .await;
    assert!(res.status().is_success(), "feed fetch failed: {}", res.status());
    actix_test::read_body_json(res).await
}

#[actix_web::test]
async fn feed_pages_hold_five_articles_newest_first() {
    let app = actix_test::init_service(test_app()).await;
    let alice = register_and_login(&app, "alice").await;
    for n in 1..=7 {
        create_article_as(&app, &alice, &format!("Post {n}"), "Body.").await;
    }

    let feed = fetch_feed(&app, "").await;
    let articles = feed["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 5);
    assert_eq!(articles[0]["title"], "Post 7");
    assert_eq!(articles[4]["title"], "Post 3");
    assert_eq!(feed["pagination"]["number"], 1);
    assert_eq!(feed["pagination"]["totalPages"], 2);
    assert_eq!(feed["pagination"]["totalItems"], 7);
    assert_eq!(feed["pagination"]["hasNext"], true);
    assert_eq!(feed["pagination"]["hasPrevious"], false);

    let feed = fetch_feed(&app, "2").await;
    let articles = feed["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["title"], "Post 2");
    assert_eq!(articles[1]["title"], "Post 1");
    assert_eq!(feed["pagination"]["hasNext"], false);
    assert_eq!(feed["pagination"]["hasPrevious"], true);
}

#[rstest]
#[case::not_a_number("abc", 1)]
#[case::zero("0", 1)]
#[case::negative("-3", 1)]
#[case::past_the_end("99", 2)]
#[case::past_integer_range("18446744073709551616", 2)]
#[actix_web::test]
async fn malformed_page_tokens_are_forgiven(#[case] token: &str, #[case] expected_page: u64) {
    let app = actix_test::init_service(test_app()).await;
    let alice = register_and_login(&app, "alice").await;
    for n in 1..=6 {
        create_article_as(&app, &alice, &format!("Post {n}"), "Body.").await;
    }

    let feed = fetch_feed(&app, token).await;
    assert_eq!(feed["pagination"]["number"], expected_page);
}

#[actix_web::test]
async fn empty_feed_renders_a_single_empty_page() {
    let app = actix_test::init_service(test_app()).await;

    let feed = fetch_feed(&app, "").await;
    assert!(feed["articles"].as_array().unwrap().is_empty());
    assert_eq!(feed["pagination"]["number"], 1);
    assert_eq!(feed["pagination"]["totalPages"], 1);
    assert_eq!(feed["pagination"]["totalItems"], 0);
}
