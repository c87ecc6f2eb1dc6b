//! Integration tests for the webhook server.

use std::net::SocketAddr;
use std::sync::Arc;

use sms_transport::bus::BusMessage;
use sms_transport::{InMemoryBus, Shutdown, WebhookServer};

mod common;

async fn start_server(bus: Arc<InMemoryBus>) -> SocketAddr {
    let config = Arc::new(common::test_config("http://127.0.0.1:9/".to_string()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = WebhookServer::new(config, bus);
    tokio::spawn(async move {
        // Keep the shutdown coordinator alive for the whole test.
        let _shutdown = shutdown;
        server.run(listener, receiver).await.unwrap();
    });
    // Wait until the listener answers.
    let client = reqwest::Client::new();
    for _ in 0..50 {
        if client
            .get(format!("http://{addr}/health"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    addr
}

#[tokio::test]
async fn test_inbound_sms_published_and_acknowledged_with_200() {
    let bus = Arc::new(InMemoryBus::new());
    let addr = start_server(bus.clone()).await;

    let response = reqwest::get(format!(
        "http://{addr}/receive?messageid=mid-1&time=2010.11.06%2007%3A42%3A51\
         &provider=provider1&keyword=HELLO&destination=0027831234567\
         &sender=%2B27829876543&text=hello%20world"
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "");

    let published = bus.published("sms.inbound.testnet.0027831234567").await;
    assert_eq!(published.len(), 1);
    let event: &BusMessage = &published[0];
    assert_eq!(event.get_str("transport_message_id"), Some("mid-1"));
    assert_eq!(event.get_str("transport_timestamp"), Some("2010-11-06T07:42:51"));
    assert_eq!(event.get_str("transport_network_id"), Some("provider1"));
    assert_eq!(event.get_str("transport_keyword"), Some("HELLO"));
    assert_eq!(event.get_str("to_msisdn"), Some("+27831234567"));
    assert_eq!(event.get_str("from_msisdn"), Some("+27829876543"));
    assert_eq!(event.get_str("message"), Some("hello world"));
}

#[tokio::test]
async fn test_inbound_missing_text_is_400() {
    let bus = Arc::new(InMemoryBus::new());
    let addr = start_server(bus.clone()).await;

    let response = reqwest::get(format!(
        "http://{addr}/receive?messageid=mid-1&time=2010.11.06%2007%3A42%3A51\
         &provider=provider1&keyword=HELLO&destination=27831234567&sender=27829876543"
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), 400);
    let body = response.text().await.unwrap();
    assert!(body.contains("Missing request key: text"), "body: {body}");
    assert!(body.starts_with("Need more request keys to complete this request."));
    assert!(bus.published("sms.inbound.testnet.27831234567").await.is_empty());
}

#[tokio::test]
async fn test_inbound_malformed_timestamp_is_value_error() {
    let bus = Arc::new(InMemoryBus::new());
    let addr = start_server(bus).await;

    let response = reqwest::get(format!(
        "http://{addr}/receive?messageid=mid-1&time=garbage&provider=provider1\
         &keyword=HELLO&destination=27831234567&sender=27829876543&text=hi"
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), 400);
    let body = response.text().await.unwrap();
    assert!(body.starts_with("ValueError:"), "body: {body}");
}

#[tokio::test]
async fn test_inbound_accepts_form_encoded_post() {
    let bus = Arc::new(InMemoryBus::new());
    let addr = start_server(bus.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/receive"))
        .form(&[
            ("messageid", "mid-2"),
            ("time", "2010.11.06 07:42:51"),
            ("provider", "provider1"),
            ("keyword", "HELLO"),
            ("destination", "27831234567"),
            ("sender", "27829876543"),
            ("text", "posted body"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let published = bus.published("sms.inbound.testnet.27831234567").await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].get_str("message"), Some("posted body"));
}

#[tokio::test]
async fn test_post_with_disallowed_content_type_is_400() {
    let bus = Arc::new(InMemoryBus::new());
    let addr = start_server(bus).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/receive"))
        .header("content-type", "application/json")
        .body("{\"text\": \"hi\"}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(
        response.text().await.unwrap(),
        "Bad Request, only 'application/x-www-form-urlencoded' allowed"
    );
}

#[tokio::test]
async fn test_delivery_receipt_published() {
    let bus = Arc::new(InMemoryBus::new());
    let addr = start_server(bus.clone()).await;

    let response = reqwest::get(format!(
        "http://{addr}/receipt?smsid=carrier-77&status=2&text=Delivered\
         &time=2010.11.06%2007%3A42%3A51&provider=provider1&sender=%2B27829876543\
         &messageid=mid-9"
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), 200);
    let published = bus.published("sms.receipt.testnet").await;
    assert_eq!(published.len(), 1);
    let event = &published[0];
    assert_eq!(event.get_str("transport_message_id"), Some("carrier-77"));
    assert_eq!(event.get_str("transport_status"), Some("2"));
    assert_eq!(event.get_str("transport_status_message"), Some("Delivered"));
    assert_eq!(event.get_str("to_msisdn"), Some("+27829876543"));
    assert_eq!(event.get_str("id"), Some("mid-9"));
}

#[tokio::test]
async fn test_receipt_missing_smsid_is_400() {
    let bus = Arc::new(InMemoryBus::new());
    let addr = start_server(bus.clone()).await;

    let response = reqwest::get(format!(
        "http://{addr}/receipt?status=2&text=Delivered&time=&provider=provider1\
         &sender=27829876543&messageid=mid-9"
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), 400);
    let body = response.text().await.unwrap();
    assert!(body.contains("Missing request key: smsid"), "body: {body}");
    assert!(bus.published("sms.receipt.testnet").await.is_empty());
}

#[tokio::test]
async fn test_health_always_ok() {
    let bus = Arc::new(InMemoryBus::new());
    let addr = start_server(bus).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/health?junk=1&more=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");

    let response = client
        .post(format!("http://{addr}/health"))
        .header("content-type", "application/json")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}
