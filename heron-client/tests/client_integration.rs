//! End-to-end client tests against an in-process mock server.

use heron_client::{AdminClient, ClientConfig, ClientError, TokenStorage};

/// Spawn a fresh mock server on an ephemeral port, return its base URL
async fn spawn_mock() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, heron_mock::router()).await.unwrap();
    });
    format!("http://{addr}/api")
}

#[tokio::test]
async fn login_bootstraps_permissions() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));

    assert!(client.login("admin", "123456").await.unwrap());
    assert!(client.session().is_authenticated());
    let profile = client.session().user_info().expect("profile cached");
    assert_eq!(profile.username, "admin");

    // super admin holds the full permission set
    assert!(client.permissions().menus_loaded());
    assert!(client.has_permission("user:delete"));
    assert!(client.has_role("super_admin"));
    assert!(client.permissions().has_all_permissions(["user:view", "user:edit"]));

    // catalog slices load alongside the user bundle
    assert_eq!(client.permissions().all_permissions().len(), 13);
    assert_eq!(client.permissions().all_roles().len(), 3);
    assert!(!client.permissions().permission_tree().is_empty());
}

#[tokio::test]
async fn rejected_login_returns_false_without_state_change() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));

    // bad credentials are a non-fatal outcome, not an error
    assert!(!client.login("admin", "wrong").await.unwrap());
    assert!(!client.session().is_authenticated());
    assert!(client.session().user_info().is_none());
    assert!(!client.permissions().menus_loaded());
}

#[tokio::test]
async fn login_transport_fault_is_an_error() {
    // nothing listens on the discard port
    let mut client = AdminClient::new(ClientConfig::new("http://127.0.0.1:9/api"));
    let err = client.login("admin", "123456").await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn basic_user_scope_is_limited() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));
    client.login("user1", "123456").await.unwrap();

    assert!(client.has_role("user"));
    assert!(!client.has_role("super_admin"));
    assert!(client.has_permission("user:view"));
    assert!(!client.has_permission("user:delete"));
    assert!(client.permissions().has_any_permission(["user:delete", "dashboard"]));
    assert!(!client.permissions().has_all_permissions(["user:view", "user:delete"]));
}

#[tokio::test]
async fn unauthenticated_navigation_redirects_to_login() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));

    let landed = client.navigate("/dashboard").await.unwrap();
    assert_eq!(landed, "/login");
    // redirect happens without touching the permission endpoints
    assert!(!client.permissions().menus_loaded());
    assert!(client.permissions().all_permissions().is_empty());
}

#[tokio::test]
async fn restored_session_loads_permissions_on_first_navigation() {
    let base = spawn_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::new(&base).with_storage_dir(dir.path());

    // first client logs in and persists the token
    let mut first = AdminClient::new(config.clone());
    first.login("admin", "123456").await.unwrap();

    // second client restores the token but has no permission state yet
    let mut second = AdminClient::new(config);
    assert!(second.session().is_authenticated());
    assert!(!second.permissions().menus_loaded());

    let landed = second.navigate("/dashboard").await.unwrap();
    assert_eq!(landed, "/dashboard");
    assert!(second.permissions().menus_loaded());
}

#[tokio::test]
async fn bootstrap_failure_logs_out_and_redirects() {
    let base = spawn_mock().await;
    let dir = tempfile::tempdir().unwrap();

    // a stale token that the server will reject
    TokenStorage::new(dir.path()).save("expired-token").unwrap();

    let config = ClientConfig::new(&base).with_storage_dir(dir.path());
    let mut client = AdminClient::new(config);
    assert!(client.session().is_authenticated());

    let landed = client.navigate("/dashboard").await.unwrap();
    assert_eq!(landed, "/login");
    assert!(!client.session().is_authenticated());
    // the persisted copy is gone too
    assert!(!TokenStorage::new(dir.path()).exists());
}

#[tokio::test]
async fn invalid_token_fails_auth_check_and_clears_session() {
    let base = spawn_mock().await;
    let dir = tempfile::tempdir().unwrap();
    TokenStorage::new(dir.path()).save("expired-token").unwrap();

    let config = ClientConfig::new(&base).with_storage_dir(dir.path());
    let mut client = AdminClient::new(config);

    assert!(!client.check_auth_status().await);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn failed_auth_check_performs_full_logout() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));
    assert!(client.login("admin", "123456").await.unwrap());
    client.navigate("/system/user").await.unwrap();
    assert!(!client.tags().visited_views().is_empty());

    // the account vanishes server-side; the next check must tear everything down
    client.http().delete_user(1).await.unwrap();

    assert!(!client.check_auth_status().await);
    assert!(!client.session().is_authenticated());
    assert!(!client.has_permission("user:view"));
    assert!(client.tags().visited_views().is_empty());
    assert_eq!(client.current_path(), "/login");
}

#[tokio::test]
async fn token_persists_byte_identical() {
    let base = spawn_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::new(&base).with_storage_dir(dir.path());

    let mut client = AdminClient::new(config);
    client.login("admin", "123456").await.unwrap();

    let live = client.http().token().unwrap();
    let stored = TokenStorage::new(dir.path()).load().unwrap();
    assert_eq!(live, stored);
}

#[tokio::test]
async fn logout_clears_everything() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));
    client.login("admin", "123456").await.unwrap();
    client.navigate("/system/user").await.unwrap();
    assert!(!client.tags().visited_views().is_empty());

    client.logout().await;
    assert!(!client.session().is_authenticated());
    assert!(!client.permissions().menus_loaded());
    assert!(!client.has_permission("user:view"));
    assert!(client.tags().visited_views().is_empty());
    assert_eq!(client.current_path(), "/login");
}

#[tokio::test]
async fn navigation_records_tag_views() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));
    client.login("admin", "123456").await.unwrap();

    client.navigate("/dashboard").await.unwrap();
    client.navigate("/system/user").await.unwrap();
    // log page is not keep-alive, no tab recorded
    client.navigate("/system/log").await.unwrap();

    let paths: Vec<&str> = client
        .tags()
        .visited_views()
        .iter()
        .map(|v| v.path.as_str())
        .collect();
    assert_eq!(paths, ["/dashboard", "/system/user"]);
    assert_eq!(client.current_path(), "/system/log");
}

#[tokio::test]
async fn authenticated_login_page_bounces_home() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));
    client.login("admin", "123456").await.unwrap();

    let landed = client.navigate("/login").await.unwrap();
    assert_eq!(landed, "/dashboard");
}

#[tokio::test]
async fn change_password_takes_effect() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));
    client.login("user1", "123456").await.unwrap();

    client
        .session()
        .change_password("123456", "new-secret")
        .await
        .unwrap();
    client.logout().await;

    assert!(!client.login("user1", "123456").await.unwrap());
    assert!(client.login("user1", "new-secret").await.unwrap());
}

#[tokio::test]
async fn crud_round_trip_through_typed_api() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));
    client.login("admin", "123456").await.unwrap();
    let http = client.http().clone();

    // create a user carrying the admin role
    let created = http
        .create_user(&shared::models::UserCreate {
            username: "newbie".to_string(),
            password: "changeme".to_string(),
            email: "newbie@example.com".to_string(),
            phone: None,
            avatar: None,
            status: None,
            dept_id: Some(3),
            role_ids: vec![2],
            permission_ids: vec![],
        })
        .await
        .unwrap();
    assert_eq!(created.role, "admin");
    assert_eq!(created.roles.len(), 1);

    // the list reflects the insert
    let users = http.list_users().await.unwrap();
    assert!(users.iter().any(|u| u.username == "newbie"));

    // reassign roles and verify
    http.assign_user_roles(created.id, vec![3]).await.unwrap();
    let roles = http.user_roles(created.id).await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].code, "user");

    // delete removes the row
    http.delete_user(created.id).await.unwrap();
    let users = http.list_users().await.unwrap();
    assert!(users.iter().all(|u| u.username != "newbie"));
}

#[tokio::test]
async fn dictionary_store_memoizes() {
    let base = spawn_mock().await;
    let mut client = AdminClient::new(ClientConfig::new(&base));
    client.login("admin", "123456").await.unwrap();
    let http = client.http().clone();

    let items = client.dict_mut().fetch_dict(&http, "gender").await.unwrap();
    assert_eq!(items.len(), 3);

    // cached read without a request
    assert_eq!(client.dict_mut().get_dict("gender").len(), 3);
    assert_eq!(client.dict_mut().get_label("gender", "1"), "Male");

    client.dict_mut().clear_cache("gender");
    assert!(client.dict_mut().get_dict("gender").is_empty());
}
