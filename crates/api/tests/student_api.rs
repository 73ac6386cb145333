//! HTTP-level integration tests for the student record endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener, backed by the in-memory store.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use gradebook_db::store::{MemoryStudentStore, StudentStore};
use serde_json::{json, Value};

fn asha(marks: Value) -> Value {
    json!({
        "name": "Asha",
        "rollNo": 101,
        "department": "CS",
        "subject": "Math",
        "marks": marks,
    })
}

// ---------------------------------------------------------------------------
// End-to-end lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_update_list_delete_lifecycle() {
    let app = common::build_test_app();

    let response = post_json(&app, "/api/students", asha(json!(92))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["grade"], "A+");
    assert_eq!(created["name"], "Asha");
    assert!(created["id"].is_number());
    let id = created["id"].as_i64().unwrap();

    let response = put_json(&app, &format!("/api/students/{id}"), asha(json!(45))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["grade"], "D");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let response = get(&app, "/api/students").await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["grade"], "D");

    let response = delete(&app, &format!("/api/students/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Deleted successfully");

    let list = body_json(get(&app, "/api/students").await).await;
    assert_eq!(list, json!([]));
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_ignores_client_supplied_grade() {
    let app = common::build_test_app();
    let mut body = asha(json!(30));
    body["grade"] = json!("S");

    let created = body_json(post_json(&app, "/api/students", body).await).await;
    assert_eq!(created["grade"], "F");
}

#[tokio::test]
async fn create_with_zero_marks_succeeds() {
    let app = common::build_test_app();
    let response = post_json(&app, "/api/students", asha(json!(0))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["marks"], 0.0);
    assert_eq!(created["grade"], "F");
}

#[tokio::test]
async fn create_accepts_form_strings() {
    let app = common::build_test_app();
    let body = json!({
        "name": "Ravi",
        "rollNo": "12",
        "department": "EE",
        "subject": "Circuits",
        "marks": "71",
    });

    let response = post_json(&app, "/api/students", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["rollNo"], 12);
    assert_eq!(created["grade"], "B+");
}

#[tokio::test]
async fn create_with_out_of_range_marks_rejected_and_store_unchanged() {
    let app = common::build_test_app();

    for marks in [json!(-1), json!(101)] {
        let response = post_json(&app, "/api/students", asha(marks)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Marks must be between 0 and 100");
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    let list = body_json(get(&app, "/api/students").await).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn create_with_missing_field_rejected() {
    let app = common::build_test_app();
    let body = json!({ "name": "Asha", "rollNo": 101, "subject": "Math", "marks": 80 });

    let response = post_json(&app, "/api/students", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "All fields are required");
}

#[tokio::test]
async fn create_with_null_marks_rejected() {
    let app = common::build_test_app();
    let response = post_json(&app, "/api/students", asha(Value::Null)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "All fields are required");
}

#[tokio::test]
async fn duplicate_roll_no_returns_409_and_keeps_first() {
    let app = common::build_test_app();
    let first = body_json(post_json(&app, "/api/students", asha(json!(92))).await).await;

    let mut second = asha(json!(55));
    second["name"] = json!("Imposter");
    let response = post_json(&app, "/api/students", second).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Roll number 101 already exists");

    let list = body_json(get(&app, "/api/students").await).await;
    assert_eq!(list, json!([first]));
}

#[tokio::test]
async fn malformed_json_body_uses_error_envelope() {
    let app = common::build_test_app();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/students")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn wrong_typed_fields_rejected_with_400() {
    let app = common::build_test_app();

    let mut bad_marks = asha(json!(true));
    bad_marks["rollNo"] = json!(301);
    let mut bad_name = asha(json!(70));
    bad_name["name"] = json!(123);

    for body in [bad_marks, bad_name] {
        let response = post_json(&app, "/api/students", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["error"].is_string());
    }

    let list = body_json(get(&app, "/api/students").await).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn update_with_wrong_typed_field_rejected_with_400() {
    let app = common::build_test_app();
    let created = body_json(post_json(&app, "/api/students", asha(json!(92))).await).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(&app, &format!("/api/students/{id}"), asha(json!(true))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_unknown_id_returns_404() {
    let app = common::build_test_app();
    let response = put_json(&app, "/api/students/999", asha(json!(50))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn update_with_invalid_marks_leaves_record_untouched() {
    let app = common::build_test_app();
    let created = body_json(post_json(&app, "/api/students", asha(json!(92))).await).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(&app, &format!("/api/students/{id}"), asha(json!(101))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let list = body_json(get(&app, "/api/students").await).await;
    assert_eq!(list, json!([created]));
}

#[tokio::test]
async fn update_with_zero_marks_succeeds() {
    let app = common::build_test_app();
    let created = body_json(post_json(&app, "/api/students", asha(json!(92))).await).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(&app, &format!("/api/students/{id}"), asha(json!(0))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["grade"], "F");
}

#[tokio::test]
async fn update_unrelated_field_keeps_grade() {
    let app = common::build_test_app();
    let created = body_json(post_json(&app, "/api/students", asha(json!(83))).await).await;
    let id = created["id"].as_i64().unwrap();

    let mut body = asha(json!(83));
    body["subject"] = json!("Physics");
    let updated = body_json(put_json(&app, &format!("/api/students/{id}"), body).await).await;

    assert_eq!(updated["subject"], "Physics");
    assert_eq!(updated["grade"], "A");
}

#[tokio::test]
async fn update_to_taken_roll_no_returns_409() {
    let app = common::build_test_app();
    post_json(&app, "/api/students", asha(json!(92))).await;

    let mut other = asha(json!(60));
    other["rollNo"] = json!(202);
    let other = body_json(post_json(&app, "/api/students", other).await).await;
    let id = other["id"].as_i64().unwrap();

    let response = put_json(&app, &format!("/api/students/{id}"), asha(json!(60))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn non_numeric_id_uses_error_envelope() {
    let app = common::build_test_app();
    let response = put_json(&app, "/api/students/abc", asha(json!(50))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_unknown_id_still_confirms() {
    let app = common::build_test_app();
    let response = delete(&app, "/api/students/424242").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Deleted successfully");
}

// ---------------------------------------------------------------------------
// Shared store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn handlers_write_through_the_injected_store() {
    let store = Arc::new(MemoryStudentStore::new());
    let app = common::build_test_app_with(store.clone());

    post_json(&app, "/api/students", asha(json!(77))).await;

    let rows = store.list().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].grade.as_str(), "B+");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_same_roll_no_admit_one() {
    let app = common::build_test_app();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                post_json(&app, "/api/students", asha(json!(40 + i))).await.status()
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(),
        15
    );
    let list = body_json(get(&app, "/api/students").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}
