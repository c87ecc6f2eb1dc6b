//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use sms_transport::TransportConfig;

/// Canned response returned by the mock carrier gateway.
pub struct CarrierResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CarrierResponse {
    /// Successful carrier response carrying a correlation id header.
    #[allow(dead_code)]
    pub fn with_smsid(smsid: &str) -> Self {
        Self {
            status: 200,
            headers: vec![("X-Nth-Smsid".to_string(), smsid.to_string())],
            body: String::new(),
        }
    }

    /// Response missing the correlation header.
    #[allow(dead_code)]
    pub fn without_smsid(body: &str) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }
}

/// Start a programmable mock carrier gateway. The handler receives the raw
/// form-encoded request body and produces the response.
#[allow(dead_code)]
pub async fn start_mock_carrier<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CarrierResponse> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let handler = handler.clone();
            tokio::spawn(async move {
                let Some(request_body) = read_request_body(&mut socket).await else {
                    return;
                };
                let response = handler(request_body).await;
                let mut out = format!(
                    "HTTP/1.1 {} MOCK\r\nContent-Length: {}\r\nConnection: close\r\n",
                    response.status,
                    response.body.len()
                );
                for (name, value) in &response.headers {
                    out.push_str(&format!("{name}: {value}\r\n"));
                }
                out.push_str("\r\n");
                out.push_str(&response.body);
                let _ = socket.write_all(out.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

/// Read one HTTP request off the socket and return its body.
async fn read_request_body(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(split) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..split]).to_string();
            let content_length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let mut body = buf[split + 4..].to_vec();
            while body.len() < content_length {
                let n = socket.read(&mut chunk).await.ok()?;
                if n == 0 {
                    break;
                }
                body.extend_from_slice(&chunk[..n]);
            }
            return Some(String::from_utf8_lossy(&body).to_string());
        }
    }
}

/// Worker configuration pointed at a (possibly mock) carrier URL.
pub fn test_config(url: String) -> TransportConfig {
    TransportConfig {
        transport_name: "testnet".to_string(),
        url,
        username: "user".to_string(),
        password: "pass".to_string(),
        owner: "owner".to_string(),
        service: "service".to_string(),
        subservice: "default-sub".to_string(),
        web_port: 0,
        web_receive_path: "receive".to_string(),
        web_receipt_path: "receipt".to_string(),
        header: "X-Nth-Smsid".to_string(),
        throttle: 1,
        http_timeout_secs: 5,
    }
}
