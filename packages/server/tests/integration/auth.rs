use crate::common::{TestApp, admin_token, routes, token_for};

#[tokio::test]
async fn request_without_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::LIST_CATEGORIES).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
    assert!(res.body["message"].is_string());
    assert!(res.body.get("data").is_none());
    assert!(res.body.get("metadata").is_none());
}

#[tokio::test]
async fn request_with_garbage_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let res = app
        .get_with_token(routes::LIST_CATEGORIES, "not-a-jwt")
        .await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn valid_token_for_unlisted_email_is_forbidden() {
    let app = TestApp::spawn().await;

    let res = app
        .get_with_token(routes::LIST_CATEGORIES, &token_for("intruder@example.com"))
        .await;

    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "EMAIL_NOT_ALLOWED");
}

#[tokio::test]
async fn allow_list_comparison_is_case_insensitive() {
    let app = TestApp::spawn().await;

    let res = app
        .get_with_token(routes::LIST_CATEGORIES, &token_for("Admin@Example.COM"))
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
}

#[tokio::test]
async fn writes_are_gated_too() {
    let app = TestApp::spawn().await;

    let res = app
        .post_with_token(
            routes::CREATE_CATEGORY,
            &serde_json::json!({ "name": "Football" }),
            &token_for("intruder@example.com"),
        )
        .await;

    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "EMAIL_NOT_ALLOWED");

    // Nothing was created.
    let list = app
        .get_with_token(routes::LIST_CATEGORIES, &admin_token())
        .await;
    assert_eq!(list.body["metadata"]["totalItems"], 0);
}
