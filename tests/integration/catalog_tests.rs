use crate::{models_source, test_client};
use gallery_catalog::browse::{group_by_category, related};
use gallery_catalog::catalog::{
    fetch_all, CatalogCache, CatalogResolver, CatalogSource, Collection, RemoteCatalog,
};
use gallery_catalog::config::{ApiConfig, Config, PresentationConfig, UserAgentConfig};
use gallery_catalog::CatalogError;
use reqwest::header::HeaderMap;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ids(entities: &[gallery_catalog::Entity]) -> Vec<&str> {
    entities.iter().map(|e| e.id_str()).collect()
}

fn config_for(server: &MockServer, headers: BTreeMap<String, String>) -> Config {
    Config {
        api: ApiConfig {
            base_url: format!("{}/v0", server.uri()),
            models_path: "web/models".to_string(),
            maps_path: "maps".to_string(),
            page_delay_ms: 0,
            timeout_secs: 5,
            headers,
        },
        user_agent: UserAgentConfig {
            client_name: "TestClient".to_string(),
            client_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        analytics: None,
        presentation: PresentationConfig::default(),
    }
}

/// Mounts a page at `page_path` returning `results` and an optional next path
async fn mount_page(
    server: &MockServer,
    page_path: &str,
    results: serde_json::Value,
    next: Option<&str>,
) {
    let next = next.map(|n| format!("{}{}", server.uri(), n));
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": results,
            "next": next,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_all_drains_every_page() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/web/models",
        json!([{"id": "1", "name": "One"}, {"id": "2", "name": "Two"}]),
        Some("/pages/2"),
    )
    .await;
    mount_page(&server, "/pages/2", json!([{"id": "3"}]), Some("/pages/3")).await;
    mount_page(&server, "/pages/3", json!([{"id": "4"}]), None).await;

    let outcome = models_source(&server).fetch_all().await;

    assert_eq!(ids(&outcome.entities), vec!["1", "2", "3", "4"]);
    assert_eq!(outcome.batches, 3);
    assert!(!outcome.possibly_incomplete);
}

#[tokio::test]
async fn test_fetch_all_returns_partial_on_server_error() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/web/models",
        json!([{"id": "1"}, {"id": "2"}]),
        Some("/pages/2"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/pages/2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [{"id": "9"}]})))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = models_source(&server).fetch_all().await;

    assert_eq!(ids(&outcome.entities), vec!["1", "2"]);
    assert_eq!(outcome.batches, 1);
    assert!(outcome.possibly_incomplete);
}

#[tokio::test]
async fn test_fetch_all_returns_partial_on_bad_json() {
    let server = MockServer::start().await;

    mount_page(&server, "/web/models", json!([{"id": "1"}]), Some("/pages/2")).await;
    Mock::given(method("GET"))
        .and(path("/pages/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let outcome = models_source(&server).fetch_all().await;

    assert_eq!(ids(&outcome.entities), vec!["1"]);
    assert!(outcome.possibly_incomplete);
}

#[tokio::test]
async fn test_fetch_all_first_page_failure_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/web/models"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let outcome = models_source(&server).fetch_all().await;

    assert!(outcome.entities.is_empty());
    assert_eq!(outcome.batches, 0);
    assert!(outcome.possibly_incomplete);
}

#[tokio::test]
async fn test_fetch_all_sends_custom_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/web/models"))
        .and(header("accept", "application/json"))
        .and(header("x-csrftoken", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [{"id": "1"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("accept", "application/json".parse().unwrap());
    headers.insert("x-csrftoken", "abc".parse().unwrap());

    let outcome = fetch_all(
        &test_client(),
        &format!("{}/web/models", server.uri()),
        &headers,
        Duration::ZERO,
    )
    .await;

    assert_eq!(ids(&outcome.entities), vec!["1"]);
}

#[tokio::test]
async fn test_concurrent_get_all_issues_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/web/models"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [{"id": "1"}, {"id": "2"}], "next": null}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache = Arc::new(CatalogCache::new(models_source(&server)));

    let mut tasks = JoinSet::new();
    for _ in 0..10 {
        let cache = Arc::clone(&cache);
        tasks.spawn(async move { cache.get_all().await });
    }

    let mut snapshots = Vec::new();
    while let Some(result) = tasks.join_next().await {
        snapshots.push(result.expect("task panicked"));
    }

    assert_eq!(snapshots.len(), 10);
    assert_eq!(cache.fetch_count(), 1);
    for snapshot in &snapshots {
        assert!(Arc::ptr_eq(snapshot, &snapshots[0]));
        assert_eq!(ids(&snapshot.entities), vec!["1", "2"]);
    }

    // Later calls are served from memory as well
    cache.get_all().await;
    assert_eq!(cache.fetch_count(), 1);
}

#[tokio::test]
async fn test_route_id_falls_back_to_direct_fetch() {
    let server = MockServer::start().await;

    mount_page(&server, "/web/models", json!([{"id": "1", "name": "Red Car"}]), None).await;
    Mock::given(method("GET"))
        .and(path("/web/models/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "77",
            "name": "Brand New Plane",
            "category": "Air"
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/web/models/404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = CatalogResolver::new(Arc::new(CatalogCache::new(models_source(&server))));

    let cached = resolver.by_route_id("1_red-car").await.expect("cached model");
    assert_eq!(cached.name_str(), "Red Car");

    let fresh = resolver
        .by_route_id("77_brand-new-plane")
        .await
        .expect("fallback model");
    assert_eq!(fresh.category_or_default(), "Air");

    // Not merged into the snapshot: the next lookup fetches again
    assert!(resolver.by_id("77").await.is_none());
    assert!(resolver.by_route_id("77_brand-new-plane").await.is_some());

    assert!(resolver.by_route_id("404_gone").await.is_none());
    assert_eq!(resolver.cache().fetch_count(), 1);
}

#[tokio::test]
async fn test_grid_and_related_from_one_snapshot() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/web/models",
        json!([
            {"id": "a", "name": "Car", "category": "Land"},
            {"id": "b", "name": "Boat", "category": "Sea"},
            {"id": "c", "name": "Jeep", "category": "Land"}
        ]),
        Some("/pages/2"),
    )
    .await;
    mount_page(
        &server,
        "/pages/2",
        json!([
            {"id": "d", "name": "Ship", "category": "Sea"},
            {"id": "e", "name": "Mystery"}
        ]),
        None,
    )
    .await;

    let resolver = CatalogResolver::new(Arc::new(CatalogCache::new(models_source(&server))));
    let snapshot = resolver.cache().get_all().await;

    let groups = group_by_category(&snapshot.entities);
    assert_eq!(
        groups.categories().collect::<Vec<_>>(),
        vec!["Land", "Sea", "Uncategorized"]
    );
    assert_eq!(ids(groups.get("Sea").unwrap()), vec!["b", "d"]);

    let focal = resolver.by_slug("ship").await.expect("ship");
    let picked: Vec<&str> = related(&focal, &snapshot.entities, 3)
        .iter()
        .map(|e| e.id_str())
        .collect();
    assert_eq!(picked, vec!["e", "a", "b"]);
}

#[tokio::test]
async fn test_maps_collection_from_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/maps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {
                    "id": 1,
                    "name": "Alps",
                    "thumbnail": "alps.png",
                    "map_url": "mapbox://alps",
                    "premium": false,
                    "free_for": null
                },
                {
                    "id": 2,
                    "name": "Sahara",
                    "thumbnail": "sahara.png",
                    "map_url": "mapbox://sahara",
                    "premium": true,
                    "free_for": 3
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, BTreeMap::new());
    let source = RemoteCatalog::from_config(&config, test_client(), Collection::Maps)
        .expect("maps source");
    let snapshot = CatalogCache::new(source).get_all().await;

    assert_eq!(ids(&snapshot.entities), vec!["1", "2"]);
    assert_eq!(snapshot.entities[1].free_for, Some(3));
    assert_eq!(snapshot.entities[0].preview_image(), "alps.png");
}

#[tokio::test]
async fn test_configured_headers_reach_the_api() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/web/models"))
        .and(header("x-csrftoken", "from-config"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [{"id": "1"}]})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/web/models/1"))
        .and(header("x-csrftoken", "from-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let headers = BTreeMap::from([("X-CSRFTOKEN".to_string(), "from-config".to_string())]);
    let config = config_for(&server, headers);
    let source = RemoteCatalog::from_config(&config, test_client(), Collection::Models)
        .expect("models source");

    let outcome = source.fetch_all().await;
    assert_eq!(ids(&outcome.entities), vec!["1"]);
    assert!(!outcome.possibly_incomplete);

    let fetched = source.fetch_by_id("1").await.expect("direct fetch");
    assert_eq!(fetched.id_str(), "1");

    // The snapshot path uses the same headers
    let snapshot = CatalogCache::new(source).get_all().await;
    assert_eq!(snapshot.len(), 1);
}

#[tokio::test]
async fn test_invalid_configured_header_is_rejected() {
    let server = MockServer::start().await;
    let headers = BTreeMap::from([("bad header".to_string(), "x".to_string())]);
    let config = config_for(&server, headers);

    let result = RemoteCatalog::from_config(&config, test_client(), Collection::Models);
    assert!(matches!(result, Err(CatalogError::InvalidHeader { .. })));
}

#[tokio::test]
async fn test_mistyped_fields_do_not_cost_the_page() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/web/models",
        json!([
            {"id": "1", "name": "A"},
            {"id": "2", "name": "B", "free_for": 2.5}
        ]),
        Some("/pages/2"),
    )
    .await;
    mount_page(
        &server,
        "/pages/2",
        json!([
            {"id": "3", "name": "C", "premium": 1},
            {"id": 4, "name": "D", "textures": "none", "category": 7}
        ]),
        None,
    )
    .await;

    let outcome = models_source(&server).fetch_all().await;

    assert_eq!(ids(&outcome.entities), vec!["1", "2", "3", "4"]);
    assert_eq!(outcome.batches, 2);
    assert!(!outcome.possibly_incomplete);
    assert_eq!(outcome.entities[1].free_for, None);
    assert_eq!(outcome.entities[2].premium, None);
    assert_eq!(outcome.entities[3].category_or_default(), "Uncategorized");
}
