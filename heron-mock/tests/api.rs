//! Mock server endpoint tests, driven through the router with oneshot
//! requests.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use heron_mock::router;
use shared::Envelope;
use shared::models::{AuditLog, LoginResponse, Permission, UserInfo, UserPermissions};
use shared::Page;

async fn body_json<T: DeserializeOwned>(response: axum::response::Response) -> Envelope<T> {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &axum::Router, username: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!(
            r#"{{"username":"{username}","password":"{password}"}}"#
        )))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let envelope: Envelope<LoginResponse> = body_json(response).await;
    assert!(envelope.is_success());
    envelope.data.unwrap().token
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn login_returns_token_and_profile() {
    let app = router();
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"username":"admin","password":"123456"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let envelope: Envelope<LoginResponse> = body_json(response).await;
    assert!(envelope.is_success());
    let data = envelope.data.unwrap();
    assert!(!data.token.is_empty());
    assert_eq!(data.user_info.username, "admin");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = router();
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"username":"admin","password":"wrong"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let envelope: Envelope<serde_json::Value> = body_json(response).await;
    assert!(!envelope.is_success());
    assert_eq!(envelope.code, 401);
}

#[tokio::test]
async fn userinfo_rejects_missing_and_garbage_tokens() {
    let app = router();

    let response = app.clone().oneshot(get("/api/auth/userinfo", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(get("/api/auth/userinfo", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn userinfo_returns_profile_for_valid_token() {
    let app = router();
    let token = login(&app, "user1", "123456").await;

    let response = app
        .oneshot(get("/api/auth/userinfo", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let envelope: Envelope<UserInfo> = body_json(response).await;
    let info = envelope.data.unwrap();
    assert_eq!(info.username, "user1");
    assert_eq!(info.id, 2);
}

#[tokio::test]
async fn user_permission_bundle_aggregates_roles() {
    let app = router();
    let token = login(&app, "user1", "123456").await;

    let response = app
        .oneshot(get("/api/permission/user", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let envelope: Envelope<UserPermissions> = body_json(response).await;
    let bundle = envelope.data.unwrap();

    assert_eq!(bundle.roles.len(), 1);
    assert_eq!(bundle.roles[0].code, "user");

    let codes: Vec<&str> = bundle.permissions.iter().map(|p| p.code.as_str()).collect();
    assert!(codes.contains(&"dashboard"));
    assert!(codes.contains(&"user:view"));
    assert!(!codes.contains(&"user:delete"));

    // menu tree only carries menu-kind nodes; user:view is a button
    assert_eq!(bundle.menus.len(), 1);
    assert_eq!(bundle.menus[0].permission.code, "dashboard");
    assert!(bundle.menus[0].children.is_empty());
}

#[tokio::test]
async fn admin_bundle_contains_nested_system_menu() {
    let app = router();
    let token = login(&app, "admin", "123456").await;

    let response = app
        .oneshot(get("/api/permission/user", Some(&token)))
        .await
        .unwrap();
    let envelope: Envelope<UserPermissions> = body_json(response).await;
    let bundle = envelope.data.unwrap();

    // dashboard sorts before system (sort 0 vs 1)
    assert_eq!(bundle.menus.len(), 2);
    assert_eq!(bundle.menus[0].permission.code, "dashboard");
    assert_eq!(bundle.menus[1].permission.code, "system");
    assert_eq!(bundle.menus[1].children.len(), 7);
}

#[tokio::test]
async fn permission_list_is_public_catalog() {
    let app = router();
    let response = app.oneshot(get("/api/permission/list", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let envelope: Envelope<Vec<Permission>> = body_json(response).await;
    assert_eq!(envelope.data.unwrap().len(), 13);
}

#[tokio::test]
async fn log_list_paginates() {
    let app = router();

    let response = app
        .clone()
        .oneshot(get("/api/log/list?page=1&pageSize=10", None))
        .await
        .unwrap();
    let envelope: Envelope<Page<AuditLog>> = body_json(response).await;
    let page = envelope.data.unwrap();
    assert_eq!(page.total, 60);
    assert_eq!(page.list.len(), 10);

    // last page carries the remainder
    let response = app
        .oneshot(get("/api/log/list?page=7&pageSize=9", None))
        .await
        .unwrap();
    let envelope: Envelope<Page<AuditLog>> = body_json(response).await;
    let page = envelope.data.unwrap();
    assert_eq!(page.total, 60);
    assert_eq!(page.list.len(), 6);
}

#[tokio::test]
async fn log_list_filters_by_username_and_status() {
    let app = router();

    let response = app
        .clone()
        .oneshot(get("/api/log/list?username=ADMIN&pageSize=100", None))
        .await
        .unwrap();
    let envelope: Envelope<Page<AuditLog>> = body_json(response).await;
    let page = envelope.data.unwrap();
    assert!(page.total > 0);
    assert!(page.list.iter().all(|l| l.username == "admin"));

    let response = app
        .oneshot(get("/api/log/list?status=fail&pageSize=100", None))
        .await
        .unwrap();
    let envelope: Envelope<Page<AuditLog>> = body_json(response).await;
    let page = envelope.data.unwrap();
    assert!(page.total > 0);
    assert!(page.list.iter().all(|l| l.status == shared::models::LogStatus::Fail));
}

#[tokio::test]
async fn department_delete_prunes_the_tree() {
    let app = router();

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/department/4")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/department/list", None)).await.unwrap();
    let envelope: Envelope<Vec<shared::models::Department>> = body_json(response).await;
    let flat = shared::models::flatten_departments(&envelope.data.unwrap());
    assert!(flat.iter().all(|d| d.id != 4));
    assert_eq!(flat.len(), 4);
}

#[tokio::test]
async fn dict_items_filter_by_type_code() {
    let app = router();

    let response = app
        .clone()
        .oneshot(get("/api/dict/item/list?typeCode=gender", None))
        .await
        .unwrap();
    let envelope: Envelope<Vec<shared::models::DictItem>> = body_json(response).await;
    assert_eq!(envelope.data.unwrap().len(), 3);

    // unknown type code yields an empty list, not an error
    let response = app
        .oneshot(get("/api/dict/item/list?typeCode=nope", None))
        .await
        .unwrap();
    let envelope: Envelope<Vec<shared::models::DictItem>> = body_json(response).await;
    assert!(envelope.data.unwrap().is_empty());
}
