//! Integration tests for `NetboxClient` against an in-process fake NetBox.
//!
//! The fake serves `/api/dcim/devices/` and `/api/dcim/interfaces/` with
//! limit/offset pagination. Its `next` links point at a host that does not
//! exist, so every test also exercises rebasing onto the configured URL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use netcheck_core::config::NetboxConfig;
use netcheck_inventory::{FetchError, InventorySource, NetboxClient};

const ADVERTISED_HOST: &str = "http://netbox.internal:8000";

// ── Fake NetBox ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct FakeNetbox {
    devices: Arc<Vec<Value>>,
    interfaces: Arc<HashMap<u64, Vec<&'static str>>>,
    fail_interfaces_for: Option<u64>,
    /// (path and query, Authorization header) per request, in arrival order.
    seen: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl FakeNetbox {
    fn record(&self, uri: &Uri, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default();
        self.seen.lock().unwrap().push((path, auth));
    }

    fn paths(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }
}

fn paginate(path: &str, filter: &str, items: &[Value], q: &HashMap<String, String>) -> Value {
    let limit: usize = q.get("limit").and_then(|v| v.parse().ok()).unwrap_or(50);
    let offset: usize = q.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let results: Vec<Value> = items.iter().skip(offset).take(limit).cloned().collect();
    let next = (offset + limit < items.len()).then(|| {
        format!(
            "{ADVERTISED_HOST}{path}?{filter}limit={limit}&offset={}",
            offset + limit
        )
    });
    json!({ "count": items.len(), "next": next, "previous": null, "results": results })
}

async fn list_devices(
    State(fake): State<FakeNetbox>,
    uri: Uri,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    fake.record(&uri, &headers);
    Json(paginate("/api/dcim/devices/", "", &fake.devices, &q))
}

async fn list_interfaces(
    State(fake): State<FakeNetbox>,
    uri: Uri,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    fake.record(&uri, &headers);
    let device_id: u64 = q
        .get("device_id")
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();

    if fake.fail_interfaces_for == Some(device_id) {
        return (StatusCode::FORBIDDEN, r#"{"detail":"forbidden"}"#).into_response();
    }

    let items: Vec<Value> = fake
        .interfaces
        .get(&device_id)
        .map(|names| names.iter().map(|n| json!({ "id": 1, "name": n })).collect())
        .unwrap_or_default();
    let filter = format!("device_id={device_id}&");
    Json(paginate("/api/dcim/interfaces/", &filter, &items, &q)).into_response()
}

fn fleet() -> FakeNetbox {
    let devices = vec![
        json!({
            "id": 1,
            "name": "sw1",
            "primary_ip4": { "address": "10.0.0.1/24" },
            "device_role": { "name": "access" },
            "site": { "name": "dc1" },
            "rack": { "name": "r1" },
            "tags": [ { "name": "compliant" } ]
        }),
        json!({
            "id": 2,
            "name": "sw2",
            "primary_ip4": null,
            "device_role": null,
            "site": { "name": "dc2" },
            "rack": null,
            "tags": []
        }),
        json!({
            "id": 3,
            "name": "rtr1",
            "role": { "name": "router" },
            "tags": [ { "name": "core" }, { "name": "compliant" } ]
        }),
    ];
    let interfaces = HashMap::from([
        (1, vec!["eth0", "eth1", "eth2"]),
        (3, vec!["ens3"]),
    ]);
    FakeNetbox {
        devices: Arc::new(devices),
        interfaces: Arc::new(interfaces),
        ..FakeNetbox::default()
    }
}

fn router(fake: FakeNetbox) -> Router {
    Router::new()
        .route("/api/dcim/devices/", get(list_devices))
        .route("/api/dcim/interfaces/", get(list_interfaces))
        .with_state(fake)
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str, token: Option<&str>) -> NetboxClient {
    NetboxClient::new(&NetboxConfig {
        url: Some(base_url.to_string()),
        token: token.map(str::to_string),
        timeout_secs: 5,
        page_size: 2,
    })
    .unwrap()
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_follows_device_and_interface_pagination() {
    let fake = fleet();
    let base = spawn(router(fake.clone())).await;

    let devices = client(&base, Some("secret")).fetch_devices().await.unwrap();

    let names: Vec<_> = devices.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["sw1", "sw2", "rtr1"]);
    assert_eq!(devices[0].interfaces, vec!["eth0", "eth1", "eth2"]);
    assert!(devices[1].interfaces.is_empty());
    assert_eq!(devices[2].interfaces, vec!["ens3"]);

    // Strictly serial: a device's interfaces are read before the next device page.
    assert_eq!(
        fake.paths(),
        vec![
            "/api/dcim/devices/?limit=2",
            "/api/dcim/interfaces/?device_id=1&limit=2",
            "/api/dcim/interfaces/?device_id=1&limit=2&offset=2",
            "/api/dcim/interfaces/?device_id=2&limit=2",
            "/api/dcim/devices/?limit=2&offset=2",
            "/api/dcim/interfaces/?device_id=3&limit=2",
        ]
    );
}

#[tokio::test]
async fn fetched_devices_are_mapped() {
    let base = spawn(router(fleet())).await;
    let devices = client(&base, None).fetch_devices().await.unwrap();

    let sw1 = &devices[0];
    assert_eq!(sw1.tags, vec!["compliant"]);
    assert_eq!(sw1.primary_ip.as_deref(), Some("10.0.0.1/24"));
    assert_eq!(sw1.role.as_deref(), Some("access"));
    assert_eq!(sw1.field_value("rack"), "r1");

    let sw2 = &devices[1];
    assert_eq!(sw2.primary_ip, None);
    assert_eq!(sw2.role, None);
    assert_eq!(sw2.field_value("site"), "dc2");
    assert_eq!(sw2.field_value("rack"), "");

    assert_eq!(devices[2].role.as_deref(), Some("router"));
}

#[tokio::test]
async fn token_is_sent_on_every_request() {
    let fake = fleet();
    let base = spawn(router(fake.clone())).await;

    client(&base, Some("secret")).fetch_devices().await.unwrap();

    let seen = fake.seen.lock().unwrap();
    assert!(!seen.is_empty());
    assert!(seen
        .iter()
        .all(|(_, auth)| auth.as_deref() == Some("Token secret")));
}

#[tokio::test]
async fn no_authorization_header_without_token() {
    let fake = fleet();
    let base = spawn(router(fake.clone())).await;

    client(&base, None).fetch_devices().await.unwrap();

    assert!(fake.seen.lock().unwrap().iter().all(|(_, auth)| auth.is_none()));
}

#[tokio::test]
async fn works_through_trait_object() {
    let base = spawn(router(fleet())).await;
    let source: Box<dyn InventorySource> = Box::new(client(&base, None));
    assert_eq!(source.fetch_devices().await.unwrap().len(), 3);
}

#[tokio::test]
async fn path_prefixed_base_url_survives_pagination() {
    // The fake's `next` links omit the `/netbox` prefix, like a NetBox
    // that does not know it sits behind a path-routing proxy.
    let fake = fleet();
    let app = Router::new().nest("/netbox", router(fake.clone()));
    let base = spawn(app).await;

    let devices = client(&format!("{base}/netbox"), None)
        .fetch_devices()
        .await
        .unwrap();

    let names: Vec<_> = devices.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["sw1", "sw2", "rtr1"]);
    assert_eq!(devices[0].interfaces, vec!["eth0", "eth1", "eth2"]);
    assert_eq!(fake.paths().len(), 6);
}

#[tokio::test]
async fn empty_inventory_yields_no_devices() {
    let base = spawn(router(FakeNetbox::default())).await;
    assert!(client(&base, None).fetch_devices().await.unwrap().is_empty());
}

#[tokio::test]
async fn device_page_error_aborts_fetch() {
    let app = Router::new().route(
        "/api/dcim/devices/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn(app).await;

    match client(&base, None).fetch_devices().await {
        Err(FetchError::Status { status, body, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn interface_error_aborts_whole_fetch_and_names_device() {
    let fake = FakeNetbox {
        fail_interfaces_for: Some(2),
        ..fleet()
    };
    let base = spawn(router(fake.clone())).await;

    match client(&base, None).fetch_devices().await {
        Err(FetchError::Interfaces { device, source }) => {
            assert_eq!(device, "sw2");
            assert!(matches!(*source, FetchError::Status { status: 403, .. }));
        }
        other => panic!("expected interfaces error, got {other:?}"),
    }

    // Nothing past the failing lookup was requested.
    assert!(!fake.paths().iter().any(|p| p.contains("offset=2") && p.contains("devices")));
}

#[tokio::test]
async fn malformed_page_is_decode_error() {
    let app = Router::new().route("/api/dcim/devices/", get(|| async { "<html>login</html>" }));
    let base = spawn(app).await;

    let err = client(&base, None).fetch_devices().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"), None)
        .fetch_devices()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Http(_)), "got {err:?}");
}
