#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Tenant state service against the mock transport.

use std::sync::Arc;

use adminkit::testing::MockRestService;
use adminkit::{EnvironmentConfig, PagedAndSortedResultRequestDto, ServiceHub};
use http::Method;
use serde_json::{Value, json};
use tenant_management_sdk::{
    GetTenantsInput, TenantCreateDto, TenantManagementError, TenantStateService,
    register_services,
};
use uuid::Uuid;

const TENANTS: &str = "/api/multi-tenancy/tenants";
const ACME: &str = "1b4e28ba-2fa1-11d2-883f-0016d3cca427";

fn acme_id() -> Uuid {
    Uuid::parse_str(ACME).unwrap()
}

fn setup() -> (Arc<MockRestService>, Arc<TenantStateService>) {
    let mock = Arc::new(MockRestService::new());
    mock.on(
        Method::GET,
        TENANTS,
        json!({
            "items": [{ "id": ACME, "name": "acme", "concurrencyStamp": "s1" }],
            "totalCount": 1
        }),
    );

    let hub = ServiceHub::new();
    let env = EnvironmentConfig::with_default_api("https://host.example.com");
    register_services(&hub, mock.clone(), &env).unwrap();
    (mock, hub.get::<TenantStateService>().unwrap())
}

#[tokio::test]
async fn fetch_caches_page() {
    let (mock, state) = setup();

    state
        .fetch(GetTenantsInput {
            filter: Some("ac".to_owned()),
            paging: PagedAndSortedResultRequestDto::page(5).sorted_by("name"),
        })
        .await
        .unwrap();

    assert_eq!(state.total_count(), 1);
    assert_eq!(state.tenants()[0].id, acme_id());

    let gets = mock.requests_to(&Method::GET, TENANTS);
    assert_eq!(gets[0].query("filter"), Some("ac"));
    assert_eq!(gets[0].query("sorting"), Some("name"));
    assert_eq!(gets[0].query("skipCount"), Some("0"));
    assert_eq!(gets[0].query("maxResultCount"), Some("5"));
}

#[tokio::test]
async fn create_refreshes_with_last_query() {
    let (mock, state) = setup();
    mock.on(
        Method::POST,
        TENANTS,
        json!({ "id": ACME, "name": "acme" }),
    );
    state.fetch(GetTenantsInput::filtered("ac")).await.unwrap();

    let created = state
        .create(&TenantCreateDto {
            name: "acme".to_owned(),
            admin_email_address: "admin@acme.test".to_owned(),
            admin_password: "1q2w3E*".to_owned(),
            ..TenantCreateDto::default()
        })
        .await
        .unwrap();

    assert_eq!(created.name, "acme");
    let posts = mock.requests_to(&Method::POST, TENANTS);
    assert_eq!(
        posts[0].body.as_ref().unwrap()["adminEmailAddress"],
        "admin@acme.test"
    );
    let gets = mock.requests_to(&Method::GET, TENANTS);
    assert_eq!(gets.len(), 2);
    assert_eq!(gets[1].query("filter"), Some("ac"));
}

#[tokio::test]
async fn first_refresh_uses_configured_page_size() {
    let (mock, state) = setup();
    let path = format!("{TENANTS}/{ACME}");
    mock.on(Method::DELETE, &path, Value::Null);

    state.delete(acme_id()).await.unwrap();

    assert_eq!(mock.requests_to(&Method::DELETE, &path).len(), 1);
    let gets = mock.requests_to(&Method::GET, TENANTS);
    assert_eq!(gets[0].query("maxResultCount"), Some("10"));
    assert_eq!(gets[0].query("filter"), None);
}

#[tokio::test]
async fn failed_delete_keeps_cache() {
    let (mock, state) = setup();
    state.refresh().await.unwrap();
    mock.on_error(
        Method::DELETE,
        &format!("{TENANTS}/{ACME}"),
        400,
        json!({ "error": { "message": "Tenant has active users" } }),
    );
    mock.clear_requests();

    let err = state.delete(acme_id()).await.unwrap_err();

    assert_eq!(err.message(), "Tenant has active users");
    assert_eq!(state.total_count(), 1);
    assert!(mock.requests_to(&Method::GET, TENANTS).is_empty());
}

#[tokio::test]
async fn connection_string_is_read_as_text() {
    let (mock, state) = setup();
    let path = format!("{TENANTS}/{ACME}/default-connection-string");

    mock.on(Method::GET, &path, json!("Server=db;Database=acme"));
    assert_eq!(
        state.connection_string(acme_id()).await.unwrap().as_deref(),
        Some("Server=db;Database=acme")
    );

    mock.on(Method::GET, &path, Value::Null);
    assert_eq!(state.connection_string(acme_id()).await.unwrap(), None);
}

#[tokio::test]
async fn shared_database_deletes_connection_string() {
    let (mock, state) = setup();
    let path = format!("{TENANTS}/{ACME}/default-connection-string");
    mock.on(Method::DELETE, &path, Value::Null);

    state
        .save_connection_string(acme_id(), true, "ignored")
        .await
        .unwrap();

    assert_eq!(mock.requests_to(&Method::DELETE, &path).len(), 1);
    assert!(mock.requests_to(&Method::PUT, &path).is_empty());
}

#[tokio::test]
async fn dedicated_connection_string_is_sent_as_typed() {
    let (mock, state) = setup();
    let path = format!("{TENANTS}/{ACME}/default-connection-string");
    mock.on(Method::PUT, &path, Value::Null);

    state
        .save_connection_string(acme_id(), false, " Server=db2 ")
        .await
        .unwrap();

    let puts = mock.requests_to(&Method::PUT, &path);
    assert_eq!(puts[0].query("defaultConnectionString"), Some(" Server=db2 "));
    assert_eq!(puts[0].body, None);
}

#[tokio::test]
async fn empty_dedicated_connection_string_is_rejected() {
    let (mock, state) = setup();

    let err = state
        .save_connection_string(acme_id(), false, "  ")
        .await
        .unwrap_err();

    assert!(matches!(err, TenantManagementError::InvalidConnectionString));
    assert!(mock.requests().is_empty());
}
