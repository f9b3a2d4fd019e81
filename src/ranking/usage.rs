use crate::catalog::Entity;
use crate::config::AnalyticsConfig;
use crate::ConfigError;
use reqwest::{header::AUTHORIZATION, Client};
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

/// Entity id -> rank, where 0 is the most used
pub type RankMap = HashMap<String, usize>;

/// Fetches the usage ranking from an analytics insight
#[derive(Debug, Clone)]
pub struct UsageRanker {
    client: Client,
    insights_url: Url,
    api_key: String,
}

impl UsageRanker {
    pub fn new(client: Client, insights_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            client,
            insights_url,
            api_key: api_key.into(),
        }
    }

    /// Builds a ranker, reading the bearer token from the configured
    /// environment variable
    pub fn from_config(config: &AnalyticsConfig, client: Client) -> Result<Self, ConfigError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| ConfigError::MissingEnv(config.api_key_env.clone()))?;
        let insights_url = config
            .insights_url()
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid analytics URL: {}", e)))?;
        Ok(Self::new(client, insights_url, api_key))
    }

    /// Fetches the ranking, returning an empty map on any failure
    pub async fn fetch_rank_map(&self) -> RankMap {
        let response = match self
            .client
            .get(self.insights_url.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Error fetching usage ranking: {}", e);
                return RankMap::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Analytics API error: HTTP {}", status);
            return RankMap::new();
        }

        match response.json::<Value>().await {
            Ok(body) => {
                let ranks = parse_rank_map(&body);
                tracing::info!("Loaded usage ranking for {} entities", ranks.len());
                ranks
            }
            Err(e) => {
                tracing::warn!("Invalid analytics response: {}", e);
                RankMap::new()
            }
        }
    }
}

/// Extracts the ranking from `{results: [{result: [[id, ...], ...]}]}`
///
/// Only the first column of each row is read and the row index is the rank.
/// Rows whose first column is not a string or number are skipped but still
/// consume their rank. When an id repeats, its last row decides the rank.
pub fn parse_rank_map(body: &Value) -> RankMap {
    let rows = body
        .get("results")
        .and_then(|results| results.get(0))
        .and_then(|first| first.get("result"))
        .and_then(Value::as_array);

    let mut ranks = RankMap::new();
    for (rank, row) in rows.into_iter().flatten().enumerate() {
        let id = match row.get(0) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => continue,
        };
        ranks.insert(id, rank);
    }
    ranks
}

/// Stably sorts entities by rank, unranked entities last
///
/// Entities without an id or without a rank keep their relative order after
/// every ranked entity.
pub fn apply_ranking(entities: &mut [Entity], ranks: &RankMap) {
    if ranks.is_empty() {
        return;
    }
    entities.sort_by_key(|e| {
        e.id
            .as_deref()
            .and_then(|id| ranks.get(id).copied())
            .unwrap_or(usize::MAX)
    });
}
