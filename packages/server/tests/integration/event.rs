use std::collections::BTreeSet;

use serde_json::json;

use crate::common::{TestApp, admin_token, routes};

/// Reference rows most event tests need.
struct Fixture {
    chain_id: i64,
    category_id: i32,
    team_a: i32,
    team_b: i32,
    token_id: i32,
    now: i64,
}

async fn seed(app: &TestApp, token: &str) -> Fixture {
    let chain_id = app.create_chain(token, 40, "Telos").await;
    let category_id = app.create_category(token, "Football").await;
    let team_a = app.create_player(token, category_id, "Real Madrid", "RMA").await;
    let team_b = app.create_player(token, category_id, "Barcelona", "BAR").await;
    let token_id = app.create_token(token, chain_id, "USDT").await;
    Fixture {
        chain_id,
        category_id,
        team_a,
        team_b,
        token_id,
        now: chrono::Utc::now().timestamp(),
    }
}

#[tokio::test]
async fn paginated_listing_matches_the_documented_scenario() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    // Five matching events with distinct sale ends, plus one on another
    // chain that must not leak into the filtered listing.
    for i in 0..5 {
        app.create_event(
            &token,
            &format!("CLASICO-{i}"),
            f.chain_id,
            f.category_id,
            f.team_a,
            f.team_b,
            f.token_id,
            f.now + 1000 * (i + 1),
        )
        .await;
    }
    let other_chain = app.create_chain(&token, 5000, "Mantle").await;
    let other_token = app.create_token(&token, other_chain, "MNT").await;
    app.create_event(
        &token,
        "OFF-CHAIN",
        other_chain,
        f.category_id,
        f.team_a,
        f.team_b,
        other_token,
        f.now + 50,
    )
    .await;

    let res = app
        .get_with_token(
            &format!(
                "{}?chainId={}&categoryId={}&limit=2&page=1",
                routes::LIST_EVENTS,
                f.chain_id,
                f.category_id
            ),
            &token,
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["metadata"]["totalItems"], 5);
    assert_eq!(res.body["metadata"]["totalPages"], 3);
    assert_eq!(res.body["metadata"]["currentPage"], 1);
    assert_eq!(res.body["metadata"]["itemsPerPage"], 2);

    // Default order is sale end descending: the two latest come first.
    let rows = res.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["code"], "CLASICO-4");
    assert_eq!(rows[1]["code"], "CLASICO-3");
}

#[tokio::test]
async fn pages_partition_the_filtered_events() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    for i in 0..5 {
        app.create_event(
            &token,
            &format!("EV-{i}"),
            f.chain_id,
            f.category_id,
            f.team_a,
            f.team_b,
            f.token_id,
            f.now + 100 * (i + 1),
        )
        .await;
    }

    let mut seen: Vec<i64> = Vec::new();
    for p in 1..=3 {
        let res = app
            .get_with_token(&format!("{}?limit=2&page={p}", routes::LIST_EVENTS), &token)
            .await;
        seen.extend(res.data_ids("id"));
    }
    assert_eq!(seen.len(), 5);
    let unique: BTreeSet<i64> = seen.iter().copied().collect();
    assert_eq!(unique.len(), 5);

    let all = app
        .get_with_token(&format!("{}?limit=5", routes::LIST_EVENTS), &token)
        .await;
    assert_eq!(seen, all.data_ids("id"));
}

#[tokio::test]
async fn both_sides_resolve_independently_from_the_aliased_joins() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    app.create_event(
        &token,
        "CLASICO",
        f.chain_id,
        f.category_id,
        f.team_a,
        f.team_b,
        f.token_id,
        f.now + 100,
    )
    .await;

    let res = app.get_with_token(routes::LIST_EVENTS, &token).await;
    let row = &res.body["data"][0];

    assert_eq!(row["teamA"]["id"], f.team_a);
    assert_eq!(row["teamA"]["symbol"], "RMA");
    assert_eq!(row["teamB"]["id"], f.team_b);
    assert_eq!(row["teamB"]["symbol"], "BAR");
    assert_ne!(row["teamA"]["id"], row["teamB"]["id"]);

    // Joined reference data rides along.
    assert_eq!(row["category"], "Football");
    assert_eq!(row["chainName"], "Telos");
    assert_eq!(row["token"]["symbol"], "USDT");
    assert!(row["tournament"].is_null());
    assert_eq!(row["conditions"], json!(["Yes", "No"]));
}

#[tokio::test]
async fn side_labels_include_handicaps_even_zero() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    let res = app
        .post_with_token(
            routes::CREATE_EVENT,
            &json!({
                "code": "HANDICAP",
                "saleEnd": f.now + 100,
                "categoryId": f.category_id,
                "teamA": f.team_a,
                "teamB": f.team_b,
                "tokenId": f.token_id,
                "chainId": f.chain_id,
                "conditions": ["Yes", "No"],
                "handicapTeamA": "-1.5",
                "handicapTeamB": "0",
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app.get_with_token(routes::LIST_EVENTS, &token).await;
    let row = &res.body["data"][0];

    assert_eq!(row["teamA"]["name"], "RMA -1.5");
    // "0" is a real handicap, not an absent one.
    assert_eq!(row["teamB"]["name"], "BAR 0");
    assert_eq!(row["teamA"]["symbol"], "RMA");
}

#[tokio::test]
async fn side_label_without_handicap_is_just_the_symbol() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    app.create_event(
        &token,
        "PLAIN",
        f.chain_id,
        f.category_id,
        f.team_a,
        f.team_b,
        f.token_id,
        f.now + 100,
    )
    .await;

    let res = app.get_with_token(routes::LIST_EVENTS, &token).await;
    let row = &res.body["data"][0];
    assert_eq!(row["teamA"]["name"], "RMA");
    assert_eq!(row["teamB"]["name"], "BAR");
}

#[tokio::test]
async fn soft_deleted_events_are_hidden_until_requested() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    let id = app
        .create_event(
            &token,
            "DOOMED",
            f.chain_id,
            f.category_id,
            f.team_a,
            f.team_b,
            f.token_id,
            f.now + 100,
        )
        .await;

    let res = app
        .put_with_token(
            routes::UPDATE_EVENT,
            &json!({ "id": id, "isDeleted": true }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["isDeleted"], true);

    let res = app.get_with_token(routes::LIST_EVENTS, &token).await;
    assert_eq!(res.body["metadata"]["totalItems"], 0);

    let res = app
        .get_with_token(
            &format!("{}?includeDeleted=true", routes::LIST_EVENTS),
            &token,
        )
        .await;
    assert_eq!(res.body["metadata"]["totalItems"], 1);
    assert_eq!(res.body["data"][0]["isDeleted"], true);

    // Restore through the same update surface.
    let res = app
        .put_with_token(
            routes::UPDATE_EVENT,
            &json!({ "id": id, "isDeleted": false }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200);

    let res = app.get_with_token(routes::LIST_EVENTS, &token).await;
    assert_eq!(res.body["metadata"]["totalItems"], 1);
}

#[tokio::test]
async fn featured_filter_is_asymmetric() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    app.create_event(
        &token,
        "ORDINARY",
        f.chain_id,
        f.category_id,
        f.team_a,
        f.team_b,
        f.token_id,
        f.now + 100,
    )
    .await;
    let res = app
        .post_with_token(
            routes::CREATE_EVENT,
            &json!({
                "code": "HEADLINER",
                "saleEnd": f.now + 200,
                "isFeatured": true,
                "categoryId": f.category_id,
                "teamA": f.team_a,
                "teamB": f.team_b,
                "tokenId": f.token_id,
                "chainId": f.chain_id,
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app
        .get_with_token(&format!("{}?featured=true", routes::LIST_EVENTS), &token)
        .await;
    assert_eq!(res.body["metadata"]["totalItems"], 1);
    assert_eq!(res.body["data"][0]["code"], "HEADLINER");

    // featured=false does not mean "not featured"; it applies no filter.
    let res = app
        .get_with_token(&format!("{}?featured=false", routes::LIST_EVENTS), &token)
        .await;
    assert_eq!(res.body["metadata"]["totalItems"], 2);
}

#[tokio::test]
async fn search_matches_event_codes_case_insensitively() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    app.create_event(
        &token,
        "FC Example Derby",
        f.chain_id,
        f.category_id,
        f.team_a,
        f.team_b,
        f.token_id,
        f.now + 100,
    )
    .await;
    app.create_event(
        &token,
        "Other Match",
        f.chain_id,
        f.category_id,
        f.team_a,
        f.team_b,
        f.token_id,
        f.now + 200,
    )
    .await;

    let res = app
        .get_with_token(&format!("{}?search=example", routes::LIST_EVENTS), &token)
        .await;
    assert_eq!(res.body["metadata"]["totalItems"], 1);
    assert_eq!(res.body["data"][0]["code"], "FC Example Derby");
}

#[tokio::test]
async fn sale_end_window_defaults_to_ninety_days() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    let far_future = f.now + 120 * 24 * 60 * 60;
    app.create_event(
        &token,
        "NEARBY",
        f.chain_id,
        f.category_id,
        f.team_a,
        f.team_b,
        f.token_id,
        f.now + 100,
    )
    .await;
    app.create_event(
        &token,
        "DISTANT",
        f.chain_id,
        f.category_id,
        f.team_a,
        f.team_b,
        f.token_id,
        far_future,
    )
    .await;

    let res = app.get_with_token(routes::LIST_EVENTS, &token).await;
    assert_eq!(res.body["metadata"]["totalItems"], 1);
    assert_eq!(res.body["data"][0]["code"], "NEARBY");

    // An explicit window widens the view.
    let res = app
        .get_with_token(
            &format!(
                "{}?fromTime=0&toTime={}",
                routes::LIST_EVENTS,
                far_future + 1
            ),
            &token,
        )
        .await;
    assert_eq!(res.body["metadata"]["totalItems"], 2);
}

#[tokio::test]
async fn sorting_uses_the_allow_list_and_falls_back() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    for (code, end) in [("B", f.now + 300), ("A", f.now + 100), ("C", f.now + 200)] {
        app.create_event(
            &token,
            code,
            f.chain_id,
            f.category_id,
            f.team_a,
            f.team_b,
            f.token_id,
            end,
        )
        .await;
    }

    let res = app
        .get_with_token(
            &format!("{}?sortBy=code&sortDir=asc", routes::LIST_EVENTS),
            &token,
        )
        .await;
    let codes: Vec<&str> = res.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["A", "B", "C"]);

    // Unknown sort columns fall back to the default sale-end ordering
    // instead of reaching the database.
    let res = app
        .get_with_token(
            &format!("{}?sortBy=drop%20table%20events", routes::LIST_EVENTS),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let codes: Vec<&str> = res.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["B", "C", "A"]);
}

#[tokio::test]
async fn create_rejects_identical_sides_and_missing_references() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    let res = app
        .post_with_token(
            routes::CREATE_EVENT,
            &json!({
                "code": "MIRROR",
                "saleEnd": f.now + 100,
                "categoryId": f.category_id,
                "teamA": f.team_a,
                "teamB": f.team_a,
                "tokenId": f.token_id,
                "chainId": f.chain_id,
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");

    let res = app
        .post_with_token(
            routes::CREATE_EVENT,
            &json!({
                "code": "GHOST-TOKEN",
                "saleEnd": f.now + 100,
                "categoryId": f.category_id,
                "teamA": f.team_a,
                "teamB": f.team_b,
                "tokenId": 999_999,
                "chainId": f.chain_id,
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn update_enforces_cross_field_invariants() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    let id = app
        .create_event(
            &token,
            "WINDOW",
            f.chain_id,
            f.category_id,
            f.team_a,
            f.team_b,
            f.token_id,
            f.now + 1000,
        )
        .await;

    // Making both sides the same player is rejected even though only one
    // side changes in this request.
    let res = app
        .put_with_token(
            routes::UPDATE_EVENT,
            &json!({ "id": id, "teamB": f.team_a }),
            &token,
        )
        .await;
    assert_eq!(res.status, 400);

    // A sale window that ends before it starts is rejected.
    let res = app
        .put_with_token(
            routes::UPDATE_EVENT,
            &json!({ "id": id, "saleStart": f.now + 2000 }),
            &token,
        )
        .await;
    assert_eq!(res.status, 400);

    // A valid start (before the end) is accepted.
    let res = app
        .put_with_token(
            routes::UPDATE_EVENT,
            &json!({ "id": id, "saleStart": f.now + 500 }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["saleStart"], f.now + 500);
}

#[tokio::test]
async fn update_clears_handicaps_with_null() {
    let app = TestApp::spawn().await;
    let token = admin_token();
    let f = seed(&app, &token).await;

    let res = app
        .post_with_token(
            routes::CREATE_EVENT,
            &json!({
                "code": "HCP",
                "saleEnd": f.now + 100,
                "categoryId": f.category_id,
                "teamA": f.team_a,
                "teamB": f.team_b,
                "tokenId": f.token_id,
                "chainId": f.chain_id,
                "handicapTeamA": "-0.5",
            }),
            &token,
        )
        .await;
    let id = res.id();
    assert_eq!(res.body["handicapTeamA"], "-0.5");

    let res = app
        .put_with_token(
            routes::UPDATE_EVENT,
            &json!({ "id": id, "handicapTeamA": null }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.body["handicapTeamA"].is_null());
}
