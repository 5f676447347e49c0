//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use openapi_gateway::config::GatewayConfig;
use openapi_gateway::document::{parse_document, DocumentSlot, SpecDocument};
use openapi_gateway::http::HttpServer;
use openapi_gateway::lifecycle::Shutdown;
use openapi_gateway::negotiation::Format;

/// A gateway running on an ephemeral loopback port.
pub struct TestGateway {
    pub addr: SocketAddr,
    #[allow(dead_code)]
    pub documents: Arc<DocumentSlot>,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a gateway. `document` receives the bound port.
pub async fn start_gateway(
    config: GatewayConfig,
    document: impl FnOnce(u16) -> Option<SpecDocument>,
) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let documents = Arc::new(match document(addr.port()) {
        Some(doc) => DocumentSlot::with_document(doc),
        None => DocumentSlot::new(),
    });

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::clone(&documents));
    let server_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    wait_until_listening(addr).await;

    TestGateway {
        addr,
        documents,
        shutdown,
    }
}

/// JSON document with the given server URLs.
#[allow(dead_code)]
pub fn document_with_servers(servers: &[&str]) -> SpecDocument {
    let servers: Vec<_> = servers
        .iter()
        .map(|url| serde_json::json!({ "url": url }))
        .collect();
    let body = serde_json::json!({
        "openapi": "3.0.1",
        "info": { "title": "Petstore", "version": "1.0.0" },
        "servers": servers,
        "paths": {}
    });
    parse_document(&body.to_string(), Format::Json).unwrap()
}

/// Client that never follows redirects or uses a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

async fn wait_until_listening(addr: SocketAddr) {
    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("gateway did not start on {addr}");
}
