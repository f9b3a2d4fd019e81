use crate::test_client;
use gallery_catalog::browse::group_by_category;
use gallery_catalog::catalog::Entity;
use gallery_catalog::config::AnalyticsConfig;
use gallery_catalog::ranking::{apply_ranking, UsageRanker};
use gallery_catalog::ConfigError;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ranker(server: &MockServer) -> UsageRanker {
    let url = Url::parse(&format!("{}/api/projects/1/insights/?short_id=abc", server.uri()))
        .expect("Invalid mock URL");
    UsageRanker::new(test_client(), url, "secret-key")
}

fn ids(entities: &[Entity]) -> Vec<&str> {
    entities.iter().map(|e| e.id_str()).collect()
}

#[tokio::test]
async fn test_ranking_reorders_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/1/insights/"))
        .and(query_param("short_id", "abc"))
        .and(header("authorization", "Bearer secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"result": [["7", "Balloon", 42]]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ranks = ranker(&server).fetch_rank_map().await;
    assert_eq!(ranks.get("7"), Some(&0));

    let mut entities = vec![Entity::new("3", "Car"), Entity::new("7", "Balloon")];
    apply_ranking(&mut entities, &ranks);
    assert_eq!(ids(&entities), vec!["7", "3"]);
}

#[tokio::test]
async fn test_failed_ranking_preserves_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/1/insights/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let ranks = ranker(&server).fetch_rank_map().await;
    assert!(ranks.is_empty());

    let mut entities = vec![Entity::new("3", "Car"), Entity::new("7", "Balloon")];
    apply_ranking(&mut entities, &ranks);
    assert_eq!(ids(&entities), vec!["3", "7"]);
}

#[tokio::test]
async fn test_malformed_ranking_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/1/insights/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(ranker(&server).fetch_rank_map().await.is_empty());
}

#[tokio::test]
async fn test_ranking_happens_before_grouping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/1/insights/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"result": [["d"], ["b"]]}]
        })))
        .mount(&server)
        .await;

    let mut entities = vec![
        Entity::new("a", "A").with_category("Land"),
        Entity::new("b", "B").with_category("Sea"),
        Entity::new("c", "C").with_category("Land"),
        Entity::new("d", "D").with_category("Land"),
    ];
    apply_ranking(&mut entities, &ranker(&server).fetch_rank_map().await);

    let groups = group_by_category(&entities);
    assert_eq!(groups.categories().collect::<Vec<_>>(), vec!["Land", "Sea"]);
    assert_eq!(ids(groups.get("Land").unwrap()), vec!["d", "a", "c"]);
}

#[test]
fn test_ranker_requires_api_key_variable() {
    let config = AnalyticsConfig {
        base_url: "https://analytics.example.com/api/projects/1".to_string(),
        short_id: "abc".to_string(),
        api_key_env: "GALLERY_CATALOG_TEST_UNSET_KEY".to_string(),
    };

    let result = UsageRanker::from_config(&config, test_client());
    assert!(matches!(result, Err(ConfigError::MissingEnv(_))));
}
