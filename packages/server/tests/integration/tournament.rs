use crate::common::{TestApp, admin_token, routes};

#[tokio::test]
async fn create_requires_an_existing_category() {
    let app = TestApp::spawn().await;

    let res = app
        .post_with_token(
            routes::CREATE_TOURNAMENT,
            &serde_json::json!({ "name": "Champions League", "categoryId": 42 }),
            &admin_token(),
        )
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn list_projects_the_joined_category_name() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    let football = app.create_category(&token, "Football").await;
    app.create_tournament(&token, football, "Champions League")
        .await;

    let res = app.get_with_token(routes::LIST_TOURNAMENTS, &token).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["data"][0]["name"], "Champions League");
    assert_eq!(res.body["data"][0]["category"], "Football");
    assert_eq!(res.body["data"][0]["categoryId"], football);
}

#[tokio::test]
async fn list_filters_by_category_and_search() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    let football = app.create_category(&token, "Football").await;
    let tennis = app.create_category(&token, "Tennis").await;
    app.create_tournament(&token, football, "Champions League")
        .await;
    app.create_tournament(&token, football, "Europa League")
        .await;
    app.create_tournament(&token, tennis, "Wimbledon").await;

    let res = app
        .get_with_token(
            &format!("{}?categoryId={football}", routes::LIST_TOURNAMENTS),
            &token,
        )
        .await;
    assert_eq!(res.body["metadata"]["totalItems"], 2);

    let res = app
        .get_with_token(
            &format!("{}?categoryId={football}&search=champions", routes::LIST_TOURNAMENTS),
            &token,
        )
        .await;
    assert_eq!(res.body["metadata"]["totalItems"], 1);
    assert_eq!(res.body["data"][0]["name"], "Champions League");
}

#[tokio::test]
async fn update_moves_tournament_between_categories() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    let football = app.create_category(&token, "Football").await;
    let esports = app.create_category(&token, "Esports").await;
    let id = app.create_tournament(&token, football, "The Finals").await;

    let res = app
        .put_with_token(
            routes::UPDATE_TOURNAMENT,
            &serde_json::json!({ "id": id, "categoryId": esports }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["categoryId"], esports);

    // Moving to a missing category is rejected.
    let res = app
        .put_with_token(
            routes::UPDATE_TOURNAMENT,
            &serde_json::json!({ "id": id, "categoryId": 999_999 }),
            &token,
        )
        .await;
    assert_eq!(res.status, 404);
}
