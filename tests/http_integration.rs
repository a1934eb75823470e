//! Integration tests for the HTTP sub-clients against a mock backend.

use std::time::Duration;

use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use salon_orders::auth::{MemorySessionStore, Session, SessionStore};
use salon_orders::client::SalonClient;
use salon_orders::domain::order::OrderStatus;
use salon_orders::domain::product::{DiscountRule, ProductDraft, ProductLookup};
use salon_orders::domain::salon::SalonDraft;
use salon_orders::error::{AuthError, HttpError, SdkError};
use salon_orders::http::RetryConfig;
use salon_orders::shared::{OrderId, ProductId, SalonId};

async fn setup() -> (MockServer, SalonClient) {
    let server = MockServer::start().await;
    let client = SalonClient::builder()
        .base_url(&format!("{}/api", server.uri()))
        .retry(
            RetryConfig::idempotent()
                .with_initial_delay(Duration::from_millis(1))
                .with_jitter(false),
        )
        .build()
        .unwrap();
    (server, client)
}

async fn login_admin(server: &MockServer, client: &SalonClient) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "admin", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "token": "jwt-1"})),
        )
        .mount(server)
        .await;
    client.auth().admin_login("admin", "pw").await.unwrap();
}

#[tokio::test]
async fn test_product_list_resolves_prices_locally() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "products": [
                {"_id": "p1", "name": "Hair Serum", "price": 1000,
                 "discountType": "percentage", "discountValue": 20, "finalPrice": 800},
                {"_id": "p2", "name": "Argan Oil", "price": 500,
                 "discountType": "fixed", "discountValue": 100, "finalPrice": 450},
                {"_id": "p3", "name": "Broken", "price": 100,
                 "discountType": "percentage", "discountValue": 140}
            ]
        })))
        .mount(&server)
        .await;

    let catalog = client.products().list().await.unwrap();

    assert_eq!(catalog.len(), 2);
    let serum = catalog.product(&ProductId::from("p1")).unwrap();
    assert_eq!(serum.discount, DiscountRule::Percentage(dec!(20)));
    assert_eq!(serum.effective_price().unwrap(), dec!(800));
    // Server disagreed; the local resolver wins.
    let oil = catalog.product(&ProductId::from("p2")).unwrap();
    assert_eq!(oil.effective_price().unwrap(), dec!(400));
    assert_eq!(oil.server_final_price, Some(dec!(450)));
    assert!(catalog.product(&ProductId::from("p3")).is_none());
}

#[tokio::test]
async fn test_reads_retry_gateway_errors() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/salons/s1"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/salons/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "salon": {"_id": "s1", "name": "Glow Studio", "location": "Kandy", "contactNumber": "077"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let salon = client.salons().get(&SalonId::from("s1")).await.unwrap();
    assert_eq!(salon.name, "Glow Studio");
}

#[tokio::test]
async fn test_reads_give_up_after_max_retries() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/salons"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&server)
        .await;

    let err = client.salons().list().await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::Http(HttpError::MaxRetriesExceeded { attempts: 4, .. })
    ));
}

#[tokio::test]
async fn test_writes_are_never_retried() {
    let (server, client) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/o1/status"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "asleep"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .orders()
        .update_status(&OrderId::from("o1"), OrderStatus::Shipped)
        .await
        .unwrap_err();
    match err {
        SdkError::Http(HttpError::ServerError { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "asleep");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_an_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/salons/gone"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Salon not found"})),
        )
        .mount(&server)
        .await;

    let err = client.salons().get(&SalonId::from("gone")).await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::Http(HttpError::Api { ref message }) if message == "Salon not found"
    ));
}

#[tokio::test]
async fn test_admin_token_is_sent_on_writes() {
    let (server, client) = setup().await;
    login_admin(&server, &client).await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(header("authorization", "Bearer jwt-1"))
        .and(body_json(json!({
            "name": "Hair Serum",
            "price": 1000,
            "discountType": "percentage",
            "discountValue": 20
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "product": {"_id": "p1", "name": "Hair Serum", "price": 1000,
                        "discountType": "percentage", "discountValue": 20, "finalPrice": 800}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = ProductDraft {
        name: " Hair Serum ".to_string(),
        price: dec!(1000),
        discount: DiscountRule::Percentage(dec!(20)),
    };
    let product = client.products().create(&draft).await.unwrap();
    assert_eq!(product.effective_price().unwrap(), dec!(800));
}

#[tokio::test]
async fn test_admin_writes_require_admin_session() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .products()
        .delete(&ProductId::from("p1"))
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Auth(AuthError::NotAuthenticated)));
}

#[tokio::test]
async fn test_invalid_drafts_are_rejected_locally() {
    let (server, client) = setup().await;
    login_admin(&server, &client).await;

    let draft = ProductDraft {
        name: "Oil".to_string(),
        price: dec!(100),
        discount: DiscountRule::FixedAmount(dec!(150)),
    };
    assert!(matches!(
        client.products().create(&draft).await,
        Err(SdkError::Pricing(_))
    ));
    assert!(matches!(
        client.salons().create(&SalonDraft::new("Glow", "", "077")).await,
        Err(SdkError::Validation(_))
    ));
    // Only the login reached the backend.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_salon_create_returns_credentials() {
    let (server, client) = setup().await;
    login_admin(&server, &client).await;

    Mock::given(method("POST"))
        .and(path("/api/salons"))
        .and(body_json(json!({"name": "Glow", "location": "Kandy", "contactNumber": "077"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "salon": {"_id": "s1", "name": "Glow", "location": "Kandy",
                      "contactNumber": "077", "username": "glow4821"},
            "qrCode": "data:image/png;base64,AAAA",
            "credentials": {"username": "glow4821", "password": "k2Jd9a"}
        })))
        .mount(&server)
        .await;

    let created = client
        .salons()
        .create(&SalonDraft::new("Glow", "Kandy", "077"))
        .await
        .unwrap();
    assert_eq!(created.credentials.unwrap().password, "k2Jd9a");
    assert_eq!(
        client.order_page_url(&created.salon.id),
        "https://fadna-salon.onrender.com/order/s1"
    );
}

#[tokio::test]
async fn test_salon_login_and_session_persistence() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/salons/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "salon": {"_id": "s1", "name": "Glow", "location": "Kandy", "username": "glow"}
        })))
        .mount(&server)
        .await;

    let session = client.auth().salon_login("glow", "pw").await.unwrap();
    assert_eq!(session.salon_id().unwrap().as_str(), "s1");
    assert!(!client.auth().is_admin().await);

    let store = MemorySessionStore::new();
    client.auth().persist(&store).await.unwrap();
    client.auth().logout().await;
    assert!(client.auth().session().await.is_none());

    let restored = client.auth().restore(&store).await.unwrap();
    assert_eq!(restored, Some(session));
    assert!(matches!(
        client.auth().session().await,
        Some(Session::Salon { .. })
    ));

    client.auth().logout().await;
    client.auth().persist(&store).await.unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_bad_login_is_login_failed() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = client.auth().admin_login("admin", "nope").await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::Auth(AuthError::LoginFailed(ref m)) if m == "Invalid credentials"
    ));
    assert!(client.auth().session().await.is_none());
}

#[tokio::test]
async fn test_orders_list_filters_by_salon() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(query_param("salonId", "s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "orders": [
                {"_id": "o1", "salonId": {"_id": "s1", "name": "Glow"},
                 "customerName": "Nimali", "customerPhone": "077", "address": "x", "city": "Kandy",
                 "items": [{"productId": "p1", "productName": "Hair Serum", "quantity": 3, "price": 800}],
                 "totalAmount": 2400, "paymentMethod": "Online", "status": "Paid"},
                {"_id": "o2", "status": "Teleported"}
            ]
        })))
        .mount(&server)
        .await;

    let orders = client.orders().list(Some(&SalonId::from("s1"))).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Paid);
    assert_eq!(orders[0].total_amount, dec!(2400));
    assert!(orders[0].matches_search("serum"));
}

#[tokio::test]
async fn test_analytics() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics/salon-performance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "stats": [{"_id": "s1", "salonName": "Glow", "totalOrders": 10,
                       "returnedOrders": 1, "cancelledOrders": 2,
                       "totalItemsSold": 31, "totalRevenue": 24800}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/analytics/item-performance"))
        .and(query_param("salonId", "s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "stats": [{"_id": "Hair Serum", "totalQuantity": 31, "totalRevenue": 24800}]
        })))
        .mount(&server)
        .await;

    let salons = client.analytics().salon_performance(None).await.unwrap();
    assert_eq!(salons[0].fulfilled_orders(), 7);
    assert_eq!(salons[0].total_revenue, dec!(24800));

    let items = client
        .analytics()
        .item_performance(Some(&SalonId::from("s1")))
        .await
        .unwrap();
    assert_eq!(items[0].product_name, "Hair Serum");
    assert_eq!(items[0].total_quantity, 31);
}

#[tokio::test]
async fn test_password_recovery() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/forgot-password"))
        .and(body_json(json!({"email": "owner@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/auth/reset-password/tok123"))
        .and(body_json(json!({"password": "n3w"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .auth()
        .forgot_password(" owner@example.com ")
        .await
        .unwrap();
    client.auth().reset_password("tok123", "n3w").await.unwrap();
    assert!(matches!(
        client.auth().forgot_password("  ").await,
        Err(SdkError::Validation(_))
    ));
}
