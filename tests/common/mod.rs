//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use ai_proxy::{GatewayConfig, HttpServer, Shutdown};

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Echo what the upstream received: method, path with query, headers, body.
async fn echo(request: Request<Body>) -> Json<Value> {
    let (parts, body) = request.into_parts();
    let mut headers = serde_json::Map::new();
    for name in parts.headers.keys() {
        let values: Vec<Value> = parts
            .headers
            .get_all(name)
            .iter()
            .map(|v| Value::from(v.to_str().unwrap_or_default()))
            .collect();
        headers.insert(name.to_string(), Value::Array(values));
    }
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    Json(json!({
        "method": parts.method.as_str(),
        "uri": parts.uri.to_string(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

/// Start an upstream that answers every request with a JSON echo of it.
pub async fn start_echo_upstream() -> SocketAddr {
    serve(Router::new().fallback(echo)).await
}

/// Start an upstream that waits `delay` before echoing.
pub async fn start_slow_upstream(delay: Duration) -> SocketAddr {
    serve(Router::new().fallback(move |request: Request<Body>| async move {
        tokio::time::sleep(delay).await;
        echo(request).await
    }))
    .await
}

/// Start an upstream that answers with a fixed status, header and body.
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> SocketAddr {
    serve(Router::new().fallback(move || async move {
        (
            StatusCode::from_u16(status).unwrap(),
            [("x-upstream", "fixed")],
            body,
        )
            .into_response()
    }))
    .await
}

/// Start an upstream whose response carries connection-scoped headers,
/// including one nominated through `Connection`.
pub async fn start_hop_by_hop_upstream() -> SocketAddr {
    serve(Router::new().fallback(|| async {
        (
            [
                ("connection", "x-upstream-hop"),
                ("keep-alive", "timeout=5"),
                ("x-upstream-hop", "1"),
                ("x-upstream", "hop"),
            ],
            "relayed",
        )
            .into_response()
    }))
    .await
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let signal = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Header values as the echo upstream reported them.
pub fn echoed<'a>(echo: &'a Value, header: &str) -> Vec<&'a str> {
    echo["headers"][header]
        .as_array()
        .map(|values| values.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
