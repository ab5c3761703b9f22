#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Fetch → edit → save flow against the mock transport.

use std::sync::Arc;

use adminkit::testing::MockRestService;
use adminkit::{EnvironmentConfig, RestError, ServiceHub};
use http::Method;
use permission_management_sdk::{
    PermissionManagementClient, PermissionManagementError, PermissionManagementState,
    ProviderRef, SaveOutcome, register_services,
};
use serde_json::{Value, json};

const PERMISSIONS: &str = "/api/permission-management/permissions";

fn users_group() -> Value {
    json!({
        "entityDisplayName": "admin",
        "groups": [{
            "name": "Identity",
            "displayName": "Identity management",
            "permissions": [
                {
                    "name": "Users",
                    "displayName": "Users",
                    "parentName": null,
                    "isGranted": true,
                    "allowedProviders": [],
                    "grantedProviders": [{ "providerName": "R", "providerKey": "admin" }]
                },
                {
                    "name": "Users.Create",
                    "displayName": "Create",
                    "parentName": "Users",
                    "isGranted": false,
                    "allowedProviders": [],
                    "grantedProviders": []
                }
            ]
        }]
    })
}

fn setup() -> (Arc<MockRestService>, ServiceHub) {
    let mock = Arc::new(MockRestService::new());
    mock.on(Method::GET, PERMISSIONS, users_group());
    mock.on(Method::PUT, PERMISSIONS, Value::Null);

    let hub = ServiceHub::new();
    let env = EnvironmentConfig::with_default_api("https://admin.example.com/");
    register_services(&hub, mock.clone(), &env).unwrap();
    (mock, hub)
}

#[tokio::test]
async fn edit_and_save_sends_only_changes() {
    let (mock, hub) = setup();
    let state = hub.get::<PermissionManagementState>().unwrap();

    let mut session = state.open(ProviderRef::role("admin")).await.unwrap();
    let indents: Vec<u32> = session.rows().iter().map(|r| r.indent).collect();
    assert_eq!(indents, vec![0, 20]);

    session.toggle("Users").unwrap();
    assert!(!session.permission("Users.Create").unwrap().is_granted);

    let outcome = state.save(&mut session).await.unwrap();
    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            changed: 1,
            refresh_current_user: false
        }
    );

    let puts = mock.requests_to(&Method::PUT, PERMISSIONS);
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].query("providerName"), Some("R"));
    assert_eq!(puts[0].query("providerKey"), Some("admin"));
    assert_eq!(
        puts[0].body,
        Some(json!({ "permissions": [{ "name": "Users", "isGranted": false }] }))
    );
    assert_eq!(
        puts[0].full_url().unwrap().as_str(),
        "https://admin.example.com/api/permission-management/permissions?providerName=R&providerKey=admin"
    );
}

#[tokio::test]
async fn cascade_that_changes_children_sends_both() {
    let (mock, hub) = setup();
    let state = hub.get::<PermissionManagementState>().unwrap();

    let mut session = state.open(ProviderRef::role("admin")).await.unwrap();
    session.toggle("Users.Create").unwrap();
    session.toggle("Users").unwrap();
    session.toggle("Users.Create").unwrap();

    state.save(&mut session).await.unwrap();

    let puts = mock.requests_to(&Method::PUT, PERMISSIONS);
    assert_eq!(
        puts[0].body,
        Some(json!({ "permissions": [{ "name": "Users.Create", "isGranted": true }] }))
    );
}

#[tokio::test]
async fn unchanged_save_sends_nothing() {
    let (mock, hub) = setup();
    let state = hub.get::<PermissionManagementState>().unwrap();

    let mut session = state.open(ProviderRef::role("admin")).await.unwrap();
    session.toggle("Users").unwrap();
    session.reset();

    assert_eq!(state.save(&mut session).await.unwrap(), SaveOutcome::Skipped);
    assert!(mock.requests_to(&Method::PUT, PERMISSIONS).is_empty());
}

#[tokio::test]
async fn failed_save_keeps_edits() {
    let (mock, hub) = setup();
    mock.on_error(
        Method::PUT,
        PERMISSIONS,
        403,
        json!({ "error": { "code": "Forbidden", "message": "Not allowed" } }),
    );
    let state = hub.get::<PermissionManagementState>().unwrap();

    let mut session = state.open(ProviderRef::role("admin")).await.unwrap();
    session.toggle("Users").unwrap();

    let err = state.save(&mut session).await.unwrap_err();
    assert!(matches!(
        err,
        PermissionManagementError::Rest(RestError::Remote { status: 403, .. })
    ));
    assert_eq!(err.message(), "Not allowed");
    assert!(session.is_dirty());
}

#[tokio::test]
async fn client_is_registered_for_direct_use() {
    let (mock, hub) = setup();
    let client = hub.get::<dyn PermissionManagementClient>().unwrap();

    let result = client.get(&ProviderRef::user("42")).await.unwrap();

    assert_eq!(result.groups[0].permissions.len(), 2);
    let gets = mock.requests_to(&Method::GET, PERMISSIONS);
    assert_eq!(gets[0].query("providerName"), Some("U"));
    assert_eq!(gets[0].query("providerKey"), Some("42"));
}

#[test]
fn missing_api_fails_registration() {
    let hub = ServiceHub::new();
    let err = register_services(
        &hub,
        Arc::new(MockRestService::new()),
        &EnvironmentConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PermissionManagementError::Config(_)));
    assert!(hub.is_empty());
}
