use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use todo_api::{routes::API_PREFIX, test_helpers::test_app};

fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

fn json_request(method: &str, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(api_path(path))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(api_path(path))
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn json_response(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request).await;
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn create(app: &Router, title: &str) -> Value {
    let (status, todo) = json_response(
        app,
        json_request("POST", "/todos/create/", json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    todo
}

fn id_of(todo: &Value) -> i64 {
    todo["id"].as_i64().unwrap()
}

fn timestamp(todo: &Value, field: &str) -> chrono::DateTime<chrono::FixedOffset> {
    chrono::DateTime::parse_from_rfc3339(todo[field].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn create_defaults_to_incomplete_with_matching_timestamps() {
    let app = test_app();

    let todo = create(&app, "Buy milk").await;

    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["status"], false);
    assert!(todo["id"].is_i64());
    assert_eq!(todo["created"], todo["updated"]);
    let keys: Vec<&str> = todo.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 5, "unexpected keys: {keys:?}");
}

#[tokio::test]
async fn create_accepts_explicit_status() {
    let app = test_app();

    let (status, todo) = json_response(
        &app,
        json_request(
            "POST",
            "/todos/create/",
            json!({ "title": "Walk dog", "status": true }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(todo["status"], true);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = test_app();

    let (status, empty) = json_response(&app, empty_request("GET", "/todos/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!([]));

    let first = create(&app, "A").await;
    let second = create(&app, "B").await;

    let (status, todos) = json_response(&app, empty_request("GET", "/todos/")).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = todos
        .as_array()
        .unwrap()
        .iter()
        .map(|todo| todo["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "A"]);
    assert_eq!(todos[0]["id"], second["id"]);
    assert_eq!(todos[1]["id"], first["id"]);
}

#[tokio::test]
async fn get_returns_the_stored_todo() {
    let app = test_app();
    let todo = create(&app, "Buy milk").await;

    let (status, fetched) = json_response(
        &app,
        empty_request("GET", &format!("/todos/{}/", id_of(&todo))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, todo);
}

#[tokio::test]
async fn put_replaces_fields_and_advances_updated() {
    let app = test_app();
    let todo = create(&app, "Buy milk").await;
    let path = format!("/todos/{}/update/", id_of(&todo));

    let (status, updated) = json_response(
        &app,
        json_request("PUT", &path, json!({ "title": "Buy oat milk", "status": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], todo["id"]);
    assert_eq!(updated["title"], "Buy oat milk");
    assert_eq!(updated["status"], true);
    assert_eq!(updated["created"], todo["created"]);
    assert!(timestamp(&updated, "updated") > timestamp(&todo, "updated"));

    let (_, again) = json_response(
        &app,
        json_request("PUT", &path, json!({ "title": "Buy oat milk", "status": true })),
    )
    .await;
    assert!(timestamp(&again, "updated") > timestamp(&updated, "updated"));
}

#[tokio::test]
async fn put_accepts_the_object_it_was_given() {
    let app = test_app();
    let mut todo = create(&app, "Buy milk").await;
    todo["status"] = json!(true);
    todo["created"] = json!("2000-01-01T00:00:00Z");

    let (status, updated) = json_response(
        &app,
        json_request("PUT", &format!("/todos/{}/update/", id_of(&todo)), todo.clone()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], true);
    assert_ne!(updated["created"], json!("2000-01-01T00:00:00Z"));
}

#[tokio::test]
async fn put_requires_every_field() {
    let app = test_app();
    let todo = create(&app, "Buy milk").await;

    let (status, body) = json_response(
        &app,
        json_request(
            "PUT",
            &format!("/todos/{}/update/", id_of(&todo)),
            json!({ "status": true }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["title"], json!(["This field is required."]));
}

#[tokio::test]
async fn patch_changes_only_the_given_fields() {
    let app = test_app();
    let todo = create(&app, "Buy milk").await;

    let (status, updated) = json_response(
        &app,
        json_request(
            "PATCH",
            &format!("/todos/{}/update/", id_of(&todo)),
            json!({ "status": true }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Buy milk");
    assert_eq!(updated["status"], true);
    assert_eq!(updated["created"], todo["created"]);
    assert!(timestamp(&updated, "updated") > timestamp(&todo, "updated"));
}

#[tokio::test]
async fn invalid_titles_are_rejected_with_field_messages() {
    let app = test_app();

    let (status, body) = json_response(
        &app,
        json_request("POST", "/todos/create/", json!({ "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["data"]["title"], json!(["This field may not be blank."]));

    let (status, body) = json_response(
        &app,
        json_request("POST", "/todos/create/", json!({ "title": "x".repeat(201) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["title"],
        json!(["Ensure this field has no more than 200 characters."])
    );

    let (status, _) = json_response(
        &app,
        json_request("POST", "/todos/create/", json!({ "title": "x".repeat(200) })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = json_response(&app, json_request("POST", "/todos/create/", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["title"], json!(["This field is required."]));
}

#[tokio::test]
async fn invalid_update_leaves_the_todo_untouched() {
    let app = test_app();
    let todo = create(&app, "Buy milk").await;
    let id = id_of(&todo);

    let (status, _) = json_response(
        &app,
        json_request(
            "PATCH",
            &format!("/todos/{id}/update/"),
            json!({ "title": "", "status": true }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = json_response(&app, empty_request("GET", &format!("/todos/{id}/"))).await;
    assert_eq!(stored, todo);
}

#[tokio::test]
async fn unknown_ids_are_not_found_everywhere() {
    let app = test_app();
    create(&app, "Buy milk").await;

    let requests = [
        empty_request("GET", "/todos/999/"),
        json_request(
            "PUT",
            "/todos/999/update/",
            json!({ "title": "x", "status": false }),
        ),
        json_request("PATCH", "/todos/999/update/", json!({ "title": "" })),
        empty_request("DELETE", "/todos/999/delete/"),
    ];

    for request in requests {
        let (status, body) = json_response(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Not found.");
    }
}

#[tokio::test]
async fn delete_removes_the_todo() {
    let app = test_app();
    let keep = create(&app, "Keep").await;
    let todo = create(&app, "Buy milk").await;
    let id = id_of(&todo);

    let (status, body) = send(&app, empty_request("DELETE", &format!("/todos/{id}/delete/"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = json_response(&app, empty_request("GET", &format!("/todos/{id}/"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = json_response(
        &app,
        json_request("PATCH", &format!("/todos/{id}/update/"), json!({ "status": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = json_response(&app, empty_request("DELETE", &format!("/todos/{id}/delete/"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, todos) = json_response(&app, empty_request("GET", "/todos/")).await;
    assert_eq!(todos, json!([keep]));
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let app = test_app();
    let first = create(&app, "First").await;
    send(
        &app,
        empty_request("DELETE", &format!("/todos/{}/delete/", id_of(&first))),
    )
    .await;

    let second = create(&app, "Second").await;
    assert_ne!(second["id"], first["id"]);
}
