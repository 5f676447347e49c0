//! End-to-end tests for the specification endpoint and the UI gateway.

use openapi_gateway::config::GatewayConfig;
use openapi_gateway::document::AUTO_CONFIGURED_DESCRIPTION;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HOST, LOCATION};
use reqwest::StatusCode;

mod common;

use common::{client, document_with_servers, start_gateway};

fn auto_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.ui.server_auto_config.enabled = true;
    config
}

async fn servers_json(gateway: &common::TestGateway) -> Vec<serde_json::Value> {
    let res = client()
        .get(gateway.url("/openapi?format=json"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    body["servers"].as_array().cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_spec_accept_json() {
    let gateway = start_gateway(GatewayConfig::default(), |_| {
        Some(document_with_servers(&["http://kube-server:1234"]))
    })
    .await;

    let res = client()
        .get(gateway.url("/openapi"))
        .header(ACCEPT, "application/json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["info"]["title"], "Petstore");
}

#[tokio::test]
async fn test_spec_format_override_beats_accept() {
    let gateway = start_gateway(GatewayConfig::default(), |_| {
        Some(document_with_servers(&[]))
    })
    .await;

    let res = client()
        .get(gateway.url("/openapi?format=yml"))
        .header(ACCEPT, "application/json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/yaml");
    assert!(res.text().await.unwrap().contains("openapi: 3.0.1"));
}

#[tokio::test]
async fn test_spec_quality_and_tie() {
    let gateway = start_gateway(GatewayConfig::default(), |_| {
        Some(document_with_servers(&[]))
    })
    .await;

    let res = client()
        .get(gateway.url("/openapi"))
        .header(ACCEPT, "text/yaml;q=0.5, application/json;q=0.9")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()[CONTENT_TYPE], "application/json");

    let res = client()
        .get(gateway.url("/openapi"))
        .header(ACCEPT, "application/json, text/yaml")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()[CONTENT_TYPE], "text/yaml");

    let res = client()
        .get(gateway.url("/openapi"))
        .header(ACCEPT, "text/html")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()[CONTENT_TYPE], "text/yaml");
}

#[tokio::test]
async fn test_spec_without_document_is_500() {
    let gateway = start_gateway(GatewayConfig::default(), |_| None).await;

    let res = client().get(gateway.url("/openapi")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.text().await.unwrap(),
        openapi_gateway::document::DOCUMENT_UNAVAILABLE_MESSAGE
    );
}

#[tokio::test]
async fn test_static_redirect_uses_document_server() {
    let gateway = start_gateway(GatewayConfig::default(), |_| {
        Some(document_with_servers(&["http://kube-server:1234/v1"]))
    })
    .await;

    let res = client().get(gateway.url("/api-specs/ui")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers()[LOCATION],
        "/api-specs/ui/?url=http://kube-server:1234/openapi&oauth2RedirectUrl=http://kube-server:1234/api-specs/ui/oauth2-redirect.html"
    );
    assert_eq!(servers_json(&gateway).await.len(), 1);
}

#[tokio::test]
async fn test_static_redirect_specification_server_override() {
    let mut config = GatewayConfig::default();
    config.server.base_url = Some("https://base.example.com".to_string());
    config.ui.specification_server = Some("https://docs.example.com/".to_string());
    let gateway = start_gateway(config, |_| None).await;

    let res = client().get(gateway.url("/api-specs/ui")).send().await.unwrap();

    assert_eq!(
        res.headers()[LOCATION],
        "/api-specs/ui/?url=https://docs.example.com/openapi&oauth2RedirectUrl=https://docs.example.com/api-specs/ui/oauth2-redirect.html"
    );
}

#[tokio::test]
async fn test_auto_config_prepends_caller_origin() {
    let gateway = start_gateway(auto_config(), |_| {
        Some(document_with_servers(&["http://kube-server:1234"]))
    })
    .await;
    let origin = gateway.origin();

    let res = client().get(gateway.url("/api-specs/ui")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers()[LOCATION].to_str().unwrap(),
        format!(
            "/api-specs/ui/?url={origin}/openapi&oauth2RedirectUrl={origin}/api-specs/ui/oauth2-redirect.html"
        )
    );

    let servers = servers_json(&gateway).await;
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0]["url"], origin.as_str());
    assert_eq!(servers[0]["description"], AUTO_CONFIGURED_DESCRIPTION);
    assert_eq!(servers[1]["url"], "http://kube-server:1234");
}

#[tokio::test]
async fn test_auto_config_loopback_alias_is_not_duplicated() {
    let gateway = start_gateway(auto_config(), |port| {
        Some(document_with_servers(&[&format!("http://localhost:{port}")]))
    })
    .await;

    for _ in 0..3 {
        let res = client().get(gateway.url("/api-specs/ui")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
    }

    let servers = servers_json(&gateway).await;
    assert_eq!(servers.len(), 1);
    assert_eq!(
        servers[0]["url"],
        format!("http://localhost:{}", gateway.addr.port()).as_str()
    );
}

#[tokio::test]
async fn test_auto_config_moves_known_origin_to_front() {
    let gateway = start_gateway(auto_config(), |_| {
        Some(document_with_servers(&[
            "http://kube-server:1234",
            "http://external-server.org:8090",
        ]))
    })
    .await;

    let res = client()
        .get(gateway.url("/api-specs/ui"))
        .header(HOST, "external-server.org:8090")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers()[LOCATION],
        "/api-specs/ui/?url=http://external-server.org:8090/openapi&oauth2RedirectUrl=http://external-server.org:8090/api-specs/ui/oauth2-redirect.html"
    );

    let servers = servers_json(&gateway).await;
    let urls: Vec<_> = servers.iter().map(|s| s["url"].as_str().unwrap()).collect();
    assert_eq!(urls, ["http://external-server.org:8090", "http://kube-server:1234"]);
}

#[tokio::test]
async fn test_auto_config_with_original_uri() {
    let mut config = auto_config();
    config.ui.server_auto_config.original_uri_check = true;
    let gateway = start_gateway(config, |_| Some(document_with_servers(&[]))).await;
    let origin = gateway.origin();

    let res = client()
        .get(gateway.url("/api-specs/ui"))
        .header("X-Original-URI", "/ingress-path/api-specs/ui?tab=1")
        .send()
        .await
        .unwrap();

    assert_eq!(
        res.headers()[LOCATION].to_str().unwrap(),
        format!(
            "/ingress-path/api-specs/ui/?url={origin}/ingress-path/openapi&oauth2RedirectUrl={origin}/ingress-path/api-specs/ui/oauth2-redirect.html"
        )
    );

    let servers = servers_json(&gateway).await;
    assert_eq!(servers[0]["url"], format!("{origin}/ingress-path").as_str());
}

#[tokio::test]
async fn test_concurrent_auto_config_adds_origin_once() {
    let gateway = start_gateway(auto_config(), |_| {
        Some(document_with_servers(&["http://kube-server:1234"]))
    })
    .await;

    let client = client();
    let mut tasks = Vec::new();
    for _ in 0..16 {
        let client = client.clone();
        let url = gateway.url("/api-specs/ui");
        tasks.push(tokio::spawn(async move {
            client.get(url).send().await.unwrap().status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::FOUND);
    }

    let servers = servers_json(&gateway).await;
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0]["url"], gateway.origin().as_str());
}

#[tokio::test]
async fn test_static_assets_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>ui</html>").unwrap();
    std::fs::write(dir.path().join("swagger-ui-bundle.js"), "bundle()").unwrap();

    let mut config = auto_config();
    config.ui.static_dir = Some(dir.path().to_path_buf());
    let gateway = start_gateway(config, |_| Some(document_with_servers(&[]))).await;

    let res = client()
        .get(gateway.url("/api-specs/ui/swagger-ui-bundle.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "bundle()");

    let res = client()
        .get(gateway.url("/api-specs/ui/?url=http://x/openapi"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "<html>ui</html>");

    // Asset requests never touch the server list.
    assert!(servers_json(&gateway).await.is_empty());
}

#[tokio::test]
async fn test_unrelated_paths_are_not_redirected() {
    let gateway = start_gateway(auto_config(), |_| Some(document_with_servers(&[]))).await;

    let res = client().get(gateway.url("/health")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().get(LOCATION).is_none());
}
