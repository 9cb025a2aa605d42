#![allow(dead_code)]
use std::{collections::BTreeMap, net::SocketAddr};

use axum::{
    extract::OriginalUri,
    http::{HeaderMap, Method},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// What the echo upstream saw.
#[derive(Debug, Deserialize)]
pub struct Echo {
    pub method: String,
    pub uri: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

async fn echo(
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(json!({
        "method": method.as_str(),
        "uri": uri.to_string(),
        "headers": headers,
        "body": body,
    }))
}

pub async fn spawn(app: Router) -> SocketAddr {
    let server =
        axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(async move { server.await.unwrap() });
    addr
}

/// Upstream that answers every request with a JSON description of it.
pub async fn spawn_echo() -> SocketAddr {
    spawn(Router::new().fallback(echo)).await
}

/// Client that never routes local test traffic through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// An address nothing listens on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
