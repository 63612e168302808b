mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn register_returns_account_with_assigned_id() {
    let app = TestApp::new().await;

    let response = app
        .post("/register", json!({ "username": "alice", "password": "secret" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let account = response.json();
    assert!(account["id"].is_i64());
    assert_eq!(account["username"], "alice");
    assert_eq!(account["password"], "secret");
}

#[tokio::test]
async fn registering_the_same_username_twice_conflicts() {
    let app = TestApp::new().await;
    app.register("alice", "secret").await;

    let response = app
        .post("/register", json!({ "username": "alice", "password": "other" }))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let accounts = app.get("/accounts").await.json();
    assert_eq!(accounts.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn register_rejects_blank_fields() {
    let app = TestApp::new().await;

    let response = app
        .post("/register", json!({ "username": "", "password": "secret" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_matches_username_and_password() {
    let app = TestApp::new().await;
    let id = app.register("alice", "secret").await;

    let response = app
        .post("/login", json!({ "username": "alice", "password": "secret" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["id"], id);

    let wrong_password = app
        .post("/login", json!({ "username": "alice", "password": "nope" }))
        .await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);

    let unknown_user = app
        .post("/login", json!({ "username": "bob", "password": "secret" }))
        .await;
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn accounts_can_be_listed_and_fetched() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "a").await;
    app.register("bob", "b").await;

    let listed = app.get("/accounts").await;
    assert_eq!(listed.status, StatusCode::OK);
    let usernames: Vec<_> = listed
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|account| account["username"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(usernames, ["alice", "bob"]);

    let fetched = app.get(&format!("/accounts/{alice}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json()["username"], "alice");

    let missing = app.get("/accounts/9999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_replaces_username_and_password() {
    let app = TestApp::new().await;
    let id = app.register("alice", "old").await;

    let body = json!({ "username": "alicia", "password": "new" });
    let response = app
        .request(Method::PUT, &format!("/accounts/{id}"), Some(body))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({ "id": id, "username": "alicia", "password": "new" })
    );

    let login = app
        .post("/login", json!({ "username": "alicia", "password": "new" }))
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn put_on_missing_account_is_not_found() {
    let app = TestApp::new().await;

    let body = json!({ "username": "ghost", "password": "pw" });
    let response = app.request(Method::PUT, "/accounts/42", Some(body)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
