//! Supabase client against a mock HTTP server

use std::rc::Rc;

use boltflow_core::backend::{AuthBackend, SignUp, SupabaseClient, TaskTable};
use boltflow_core::config::BackendConfig;
use boltflow_core::domain::{Identity, IdentityId, NewTask, Priority, ProfileChanges, Session, Status, TaskId, TaskPatch};
use boltflow_core::error::DomainError;
use boltflow_core::{MemorySessionStorage, SessionStorage, SessionStore, TaskRepository};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON: &str = "anon-key";

async fn setup() -> (MockServer, SupabaseClient) {
    let server = MockServer::start().await;
    let client = SupabaseClient::new(&BackendConfig::new(server.uri(), ANON)).expect("Failed to build client");
    (server, client)
}

fn session() -> Session {
    Session {
        access_token: "user-jwt".into(),
        refresh_token: "refresh".into(),
        expires_at: None,
        user: Identity {
            id: IdentityId("user-1".into()),
            email: "ada@example.com".into(),
            name: Some("Ada".into()),
        },
    }
}

fn user_json() -> Value {
    json!({
        "id": "user-1",
        "email": "ada@example.com",
        "user_metadata": { "name": "Ada" },
        "identities": [{ "provider": "email" }]
    })
}

fn token_json() -> Value {
    json!({
        "access_token": "user-jwt",
        "refresh_token": "refresh",
        "expires_in": 3600,
        "expires_at": 1_900_000_000,
        "token_type": "bearer",
        "user": user_json()
    })
}

fn task_json(id: &str, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "priority": "high",
        "status": status,
        "user_id": "user-1",
        "created_at": "2024-03-01T10:00:00.123456+00:00",
        "updated_at": "2024-03-01T10:00:00.123456+00:00"
    })
}

#[tokio::test]
async fn test_sign_in_parses_session() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", ANON))
        .and(body_json(json!({ "email": "ada@example.com", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json()))
        .expect(1)
        .mount(&server)
        .await;

    let session = client.sign_in("ada@example.com", "secret1").await.unwrap();

    assert_eq!(session.access_token, "user-jwt");
    assert_eq!(session.user.id, IdentityId("user-1".into()));
    assert_eq!(session.user.display_name(), "Ada");
    assert_eq!(session.expires_at.map(|t| t.timestamp()), Some(1_900_000_000));
}

#[tokio::test]
async fn test_sign_in_rejection_is_auth_error() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let err = client.sign_in("ada@example.com", "wrong").await.unwrap_err();

    assert_eq!(err, DomainError::Auth("Invalid login credentials".into()));
}

#[tokio::test]
async fn test_server_error_is_service_error() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.sign_in("ada@example.com", "secret1").await.unwrap_err();

    assert!(matches!(err, DomainError::Service { status: 503, .. }));
}

#[tokio::test]
async fn test_sign_up_pending_confirmation() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(body_json(json!({
            "email": "new@example.com",
            "password": "secret1",
            "data": { "name": "New" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&server)
        .await;

    let outcome = client.sign_up("new@example.com", "secret1", "New").await.unwrap();

    assert!(matches!(outcome, SignUp::Pending(identity) if identity.id.0 == "user-1"));
}

#[tokio::test]
async fn test_sign_up_with_session() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json()))
        .mount(&server)
        .await;

    let outcome = client.sign_up("ada@example.com", "secret1", "Ada").await.unwrap();

    assert!(matches!(outcome, SignUp::Session(_)));
}

#[tokio::test]
async fn test_sign_up_existing_address() {
    let (server, client) = setup().await;
    let mut user = user_json();
    user["identities"] = json!([]);
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user))
        .mount(&server)
        .await;

    let err = client.sign_up("ada@example.com", "secret1", "Ada").await.unwrap_err();

    assert_eq!(err, DomainError::auth("User already registered"));
}

#[tokio::test]
async fn test_update_user_sends_only_changes() {
    let (server, client) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer user-jwt"))
        .and(body_json(json!({ "data": { "name": "Ada L" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "email": "ada@example.com",
            "user_metadata": { "name": "Ada L" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let changes = ProfileChanges {
        name: Some("Ada L".into()),
        password: None,
    };
    let identity = client.update_user(&session(), &changes).await.unwrap();

    assert_eq!(identity.name.as_deref(), Some("Ada L"));
}

#[tokio::test]
async fn test_password_reset_redirect() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/recover"))
        .and(query_param("redirect_to", "https://app.test/reset-password"))
        .and(body_json(json!({ "email": "ada@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .request_password_reset("ada@example.com", Some("https://app.test/reset-password"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_select_owned_query() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("select", "*"))
        .and(query_param("user_id", "eq.user-1"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", ANON))
        .and(header("authorization", "Bearer user-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("b", "Second", "in_progress"),
            task_json("a", "First", "to_do"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = client.select_owned(&session()).await.unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].status, Status::InProgress);
    assert_eq!(tasks[1].priority, Priority::High);
}

#[tokio::test]
async fn test_expired_token_is_auth_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "JWT expired" })))
        .mount(&server)
        .await;

    let err = client.select_owned(&session()).await.unwrap_err();

    assert_eq!(err, DomainError::Auth("JWT expired".into()));
}

#[tokio::test]
async fn test_repository_refreshes_expired_session() {
    let (server, client) = setup().await;
    let mut stale = token_json();
    stale["access_token"] = json!("stale-jwt");
    stale["expires_at"] = json!(1);
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stale))
        .mount(&server)
        .await;

    let mut fresh = token_json();
    fresh["access_token"] = json!("fresh-jwt");
    fresh["refresh_token"] = json!("refresh-2");
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({ "refresh_token": "refresh" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fresh))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .and(header("authorization", "Bearer fresh-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json("t1", "Ship it", "to_do")])))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "JWT expired" })))
        .mount(&server)
        .await;

    let client = Rc::new(client);
    let storage = Rc::new(MemorySessionStorage::new());
    let session = Rc::new(SessionStore::new(client.clone(), storage.clone()));
    let repo = TaskRepository::new(client, session.clone());
    session.sign_in("ada@example.com", "secret1").await.unwrap();

    let tasks = repo.list().await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Ship it");
    assert_eq!(storage.load().map(|s| s.access_token), Some("fresh-jwt".to_string()));
}

#[tokio::test]
async fn test_insert_returns_representation() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/tasks"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!({
            "title": "Write report",
            "description": null,
            "priority": "high",
            "status": "to_do",
            "user_id": "user-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([task_json("t1", "Write report", "to_do")])))
        .expect(1)
        .mount(&server)
        .await;

    let row = NewTask::new("  Write report ")
        .with_priority(Priority::High)
        .into_row(IdentityId("user-1".into()))
        .unwrap();
    let task = client.insert(&session(), &row).await.unwrap();

    assert_eq!(task.id, TaskId::from("t1"));
    assert_eq!(task.status, Status::ToDo);
}

#[tokio::test]
async fn test_update_patch_body() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("id", "eq.t1"))
        .and(body_json(json!({ "status": "completed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json("t1", "Write report", "completed")])))
        .mount(&server)
        .await;

    let task = client
        .update(&session(), &TaskId::from("t1"), &TaskPatch::status(Status::Completed))
        .await
        .unwrap();

    assert_eq!(task.map(|t| t.status), Some(Status::Completed));
}

#[tokio::test]
async fn test_update_no_rows_is_none() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let task = client
        .update(&session(), &TaskId::from("gone"), &TaskPatch::status(Status::Completed))
        .await
        .unwrap();

    assert!(task.is_none());
}

#[tokio::test]
async fn test_delete_reports_whether_a_row_went_away() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("id", "eq.t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json("t1", "x", "to_do")])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("id", "eq.t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.delete(&session(), &TaskId::from("t1")).await.unwrap());
    assert!(!client.delete(&session(), &TaskId::from("t2")).await.unwrap());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = SupabaseClient::new(&BackendConfig::new("http://127.0.0.1:1", ANON)).unwrap();

    let err = client.select_owned(&session()).await.unwrap_err();

    assert!(err.is_transport());
}
