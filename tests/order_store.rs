//! Integration tests for `OrderStoreClient` using wiremock HTTP mocks.

use walkinit_storefront::domain::aggregates::OrderRecord;
use walkinit_storefront::domain::value_objects::Money;
use walkinit_storefront::services::orders::{OrderStoreClient, OrderStoreError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_record() -> OrderRecord {
    OrderRecord::paid(
        "Ada Lovelace",
        "ada@example.com",
        "12 Analytical Way",
        "London",
        "N1 9GU",
        vec![],
        Money::from_dollars(75),
    )
}

#[tokio::test]
async fn insert_posts_one_authenticated_row() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/orders"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .and(header("prefer", "return=minimal"))
        .and(body_partial_json(serde_json::json!([{
            "customer_name": "Ada Lovelace",
            "customer_email": "ada@example.com",
            "city": "London",
            "total_amount": 75.0,
            "status": "Paid"
        }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = OrderStoreClient::new(&server.uri(), "anon-key").expect("client should build");
    client
        .insert_order(&sample_record())
        .await
        .expect("insert should succeed");
}

#[tokio::test]
async fn non_success_status_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("storage quota exceeded"))
        .mount(&server)
        .await;

    let client = OrderStoreClient::new(&server.uri(), "anon-key").expect("client should build");
    let err = client.insert_order(&sample_record()).await.unwrap_err();
    match err {
        OrderStoreError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "storage quota exceeded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_store_surfaces_as_http_error() {
    // nothing listens on this port
    let client = OrderStoreClient::new("http://127.0.0.1:9", "anon-key").expect("client should build");
    let err = client.insert_order(&sample_record()).await.unwrap_err();
    assert!(matches!(err, OrderStoreError::Http(_)));
}
