use std::collections::BTreeSet;

use sea_orm::EntityTrait;

use crate::common::{TestApp, admin_token, routes};

#[tokio::test]
async fn create_and_list_categories() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    let res = app
        .post_with_token(
            routes::CREATE_CATEGORY,
            &serde_json::json!({ "name": "Football", "imageUrl": "https://img.example/f.png" }),
            &token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["name"], "Football");
    assert_eq!(res.body["imageUrl"], "https://img.example/f.png");

    let list = app.get_with_token(routes::LIST_CATEGORIES, &token).await;
    assert_eq!(list.status, 200);
    assert_eq!(list.body["metadata"]["totalItems"], 1);
    assert_eq!(list.body["metadata"]["totalPages"], 1);
    assert_eq!(list.body["metadata"]["currentPage"], 1);
    assert_eq!(list.body["data"][0]["name"], "Football");
}

#[tokio::test]
async fn create_rejects_blank_name() {
    let app = TestApp::spawn().await;

    let res = app
        .post_with_token(
            routes::CREATE_CATEGORY,
            &serde_json::json!({ "name": "   " }),
            &admin_token(),
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_changes_name_and_unknown_id_is_404() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    let id = app.create_category(&token, "Footbal").await;

    let res = app
        .put_with_token(
            routes::UPDATE_CATEGORY,
            &serde_json::json!({ "id": id, "name": "Football" }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["name"], "Football");

    // The rename is durable, not just echoed.
    let row = server::entity::category::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .expect("DB query failed")
        .expect("Category missing after update");
    assert_eq!(row.name, "Football");

    let res = app
        .put_with_token(
            routes::UPDATE_CATEGORY,
            &serde_json::json!({ "id": 999_999, "name": "Ghost" }),
            &token,
        )
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn update_can_clear_image_url_with_null() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    let res = app
        .post_with_token(
            routes::CREATE_CATEGORY,
            &serde_json::json!({ "name": "Esports", "imageUrl": "https://img.example/e.png" }),
            &token,
        )
        .await;
    let id = res.id();

    let res = app
        .put_with_token(
            routes::UPDATE_CATEGORY,
            &serde_json::json!({ "id": id, "imageUrl": null }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.body["imageUrl"].is_null());
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    app.create_category(&token, "FC Example").await;
    app.create_category(&token, "Basketball").await;

    let res = app
        .get_with_token(
            &format!("{}?search=example", routes::LIST_CATEGORIES),
            &token,
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["metadata"]["totalItems"], 1);
    assert_eq!(res.body["data"][0]["name"], "FC Example");
}

#[tokio::test]
async fn no_params_equals_noop_params() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    for name in ["Football", "Tennis", "Cricket"] {
        app.create_category(&token, name).await;
    }

    let bare = app.get_with_token(routes::LIST_CATEGORIES, &token).await;
    let noop = app
        .get_with_token(
            &format!("{}?search=&limit=&page=", routes::LIST_CATEGORIES),
            &token,
        )
        .await;

    assert_eq!(bare.status, 200);
    assert_eq!(noop.status, 200);
    assert_eq!(bare.body, noop.body);
}

#[tokio::test]
async fn pages_partition_the_filtered_row_set() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    for i in 0..7 {
        app.create_category(&token, &format!("Category {i}")).await;
    }

    let first = app
        .get_with_token(&format!("{}?limit=3&page=1", routes::LIST_CATEGORIES), &token)
        .await;
    assert_eq!(first.body["metadata"]["totalItems"], 7);
    assert_eq!(first.body["metadata"]["totalPages"], 3);
    assert_eq!(first.body["metadata"]["itemsPerPage"], 3);

    let mut seen: Vec<i64> = Vec::new();
    let total_pages = first.body["metadata"]["totalPages"].as_u64().unwrap();
    for p in 1..=total_pages {
        let res = app
            .get_with_token(
                &format!("{}?limit=3&page={p}", routes::LIST_CATEGORIES),
                &token,
            )
            .await;
        seen.extend(res.data_ids("id"));
    }

    // Page lengths sum to totalItems and no row repeats.
    assert_eq!(seen.len(), 7);
    let unique: BTreeSet<i64> = seen.iter().copied().collect();
    assert_eq!(unique.len(), 7);

    // Concatenating all pages equals the one-shot query with limit=totalItems.
    let all = app
        .get_with_token(&format!("{}?limit=7", routes::LIST_CATEGORIES), &token)
        .await;
    assert_eq!(seen, all.data_ids("id"));
}

#[tokio::test]
async fn zero_and_negative_pagination_inputs_clamp() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    app.create_category(&token, "Solo").await;

    let res = app
        .get_with_token(&format!("{}?limit=0&page=0", routes::LIST_CATEGORIES), &token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["metadata"]["itemsPerPage"], 1);
    assert_eq!(res.body["metadata"]["currentPage"], 1);
    assert_eq!(res.body["data"].as_array().unwrap().len(), 1);

    let res = app
        .get_with_token(
            &format!("{}?limit=-5&page=-2", routes::LIST_CATEGORIES),
            &token,
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["metadata"]["itemsPerPage"], 1);
    assert_eq!(res.body["metadata"]["currentPage"], 1);
}

#[tokio::test]
async fn unparseable_pagination_inputs_fall_back_to_defaults() {
    let app = TestApp::spawn().await;
    let token = admin_token();

    app.create_category(&token, "Solo").await;

    let res = app
        .get_with_token(
            &format!("{}?limit=NaN&page=abc", routes::LIST_CATEGORIES),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["metadata"]["itemsPerPage"], 20);
    assert_eq!(res.body["metadata"]["currentPage"], 1);
}
