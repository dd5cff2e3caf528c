#![allow(clippy::unwrap_used)]
// End-to-end tests for `MutationCoordinator` over `HttpGateway`, with
// wiremock standing in for the item server.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use larder_api::ItemsClient;
use larder_core::{
    CoordinatorConfig, EditFocusPolicy, GatewayConfig, HttpGateway, ItemDraft, ItemId, ItemPatch,
    MutationCoordinator, MutationKind,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(resource: &str) -> (MockServer, MutationCoordinator<HttpGateway>) {
    let server = MockServer::start().await;
    let mut gateway = GatewayConfig::new(Url::parse(&server.uri()).unwrap());
    gateway.resource = resource.into();
    let coord = MutationCoordinator::from_config(&CoordinatorConfig::new(gateway)).unwrap();
    (server, coord)
}

async fn mount_list(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn pasta() -> serde_json::Value {
    json!({
        "id": 7,
        "name": "Pasta",
        "description": "Penne",
        "price": "4.20",
        "available": false,
        "image": "p.png"
    })
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn load_create_update_remove_round() {
    let (server, coord) = setup("foods").await;
    mount_list(&server, "/foods", json!([pasta()])).await;

    Mock::given(method("POST"))
        .and(path("/foods"))
        .and(body_json(json!({
            "name": "Rice",
            "description": "",
            "price": "10.00",
            "available": true,
            "image": "r.png"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 8,
            "name": "Rice",
            "description": "",
            "price": "10.00",
            "available": true,
            "image": "r.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/foods/7"))
        .and(body_json(json!({
            "id": 7,
            "name": "Pasta",
            "description": "Penne",
            "price": "3.99",
            "available": false,
            "image": "p.png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Pasta",
            "description": "Penne",
            "price": "3.99",
            "available": false,
            "image": "p.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/foods/8"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let loaded = coord.load_all().await.unwrap();
    assert_eq!(loaded.len(), 1);

    let created = coord
        .create(ItemDraft {
            name: "Rice".into(),
            description: String::new(),
            price: "10.00".into(),
            image: "r.png".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, ItemId::new(8));

    let target = coord.list_snapshot()[0].clone();
    coord.request_edit(target);
    let updated = coord.update(ItemPatch::new().price("3.99")).await.unwrap();
    assert_eq!(updated.price, "3.99");
    assert_eq!(coord.current_edit_focus(), Some(updated));

    coord.remove(ItemId::new(8)).await.unwrap();

    let ids: Vec<u64> = coord.list_snapshot().iter().map(|i| i.id.get()).collect();
    assert_eq!(ids, vec![7]);
}

#[tokio::test]
async fn server_error_is_published_and_list_kept() {
    let (server, coord) = setup("items").await;
    mount_list(&server, "/items", json!([pasta()])).await;

    Mock::given(method("DELETE"))
        .and(path("/items/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    coord.load_all().await.unwrap();
    let mut failures = coord.failures();

    let err = coord.remove(ItemId::new(7)).await.unwrap_err();

    assert!(err.is_transport_failure());
    assert_eq!(coord.list_snapshot().len(), 1);

    let failure = failures.recv().await.unwrap();
    assert_eq!(failure.kind, MutationKind::Remove);
    assert_eq!(failure.item_id, Some(ItemId::new(7)));
}

#[tokio::test]
async fn update_without_focus_sends_nothing() {
    let (server, coord) = setup("items").await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = coord.update(ItemPatch::new().name("x")).await.unwrap_err();
    assert!(err.is_contract_violation());
}

#[tokio::test]
async fn malformed_list_is_an_invalid_response() {
    let (server, coord) = setup("items").await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = coord.load_all().await.unwrap_err();
    assert!(matches!(err, larder_core::CoreError::InvalidResponse { .. }));
    assert!(coord.list_snapshot().is_empty());
}

#[tokio::test]
async fn gateway_wraps_a_preconfigured_client() {
    let server = MockServer::start().await;
    mount_list(&server, "/api/foods", json!([pasta()])).await;

    let client =
        ItemsClient::from_reqwest(&format!("{}/api", server.uri()), "foods", reqwest::Client::new())
            .unwrap();
    let gateway = HttpGateway::from_client(client);
    assert_eq!(gateway.client().resource(), "foods");

    let coord = MutationCoordinator::new(gateway, EditFocusPolicy::default());
    let items = coord.load_all().await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Pasta");
    assert!(!items[0].available);
}
