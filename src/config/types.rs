use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

/// Main configuration structure for Gallery Catalog
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub analytics: Option<AnalyticsConfig>,
    #[serde(default)]
    pub presentation: PresentationConfig,
}

/// Dashboard API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the dashboard API (e.g. "https://dashboard.example.com/v0")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the models collection, relative to `base_url`
    #[serde(rename = "models-path", default = "default_models_path")]
    pub models_path: String,

    /// Path of the maps collection, relative to `base_url`
    #[serde(rename = "maps-path", default = "default_maps_path")]
    pub maps_path: String,

    /// Delay between pagination batches (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra headers sent with every catalog request (e.g. a CSRF token)
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ApiConfig {
    /// Full URL of the models collection
    pub fn models_url(&self) -> Result<Url, url::ParseError> {
        join_path(&self.base_url, &self.models_path)
    }

    /// Full URL of the maps collection
    pub fn maps_url(&self) -> Result<Url, url::ParseError> {
        join_path(&self.base_url, &self.maps_path)
    }
}

/// Client identification sent with every request
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(rename = "client-name")]
    pub client_name: String,

    #[serde(rename = "client-version")]
    pub client_version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.client_name, self.client_version, self.contact_url
        )
    }
}

/// Usage analytics configuration, used to rank the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Project API base (e.g. "https://us.posthog.com/api/projects/107752")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Short id of the saved insight holding the usage ranking
    #[serde(rename = "short-id")]
    pub short_id: String,

    /// Name of the environment variable holding the bearer token
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,
}

impl AnalyticsConfig {
    /// URL of the insight query: `{base}/insights/?short_id={id}`
    pub fn insights_url(&self) -> Result<Url, url::ParseError> {
        let mut url = join_path(&self.base_url, "insights/")?;
        url.query_pairs_mut().append_pair("short_id", &self.short_id);
        Ok(url)
    }
}

/// Presentation policy threaded into the browse operations
#[derive(Debug, Clone, Deserialize)]
pub struct PresentationConfig {
    /// Related items shown on wide viewports
    #[serde(rename = "related-wide", default = "default_related_wide")]
    pub related_wide: usize,

    /// Related items shown on narrow viewports
    #[serde(rename = "related-narrow", default = "default_related_narrow")]
    pub related_narrow: usize,

    /// Word limit for descriptions in detail views
    #[serde(rename = "description-words", default = "default_description_words")]
    pub description_words: usize,
}

impl PresentationConfig {
    /// Picks the related-item count for a viewport
    pub fn related_count(&self, narrow: bool) -> usize {
        if narrow {
            self.related_narrow
        } else {
            self.related_wide
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            related_wide: default_related_wide(),
            related_narrow: default_related_narrow(),
            description_words: default_description_words(),
        }
    }
}

fn join_path(base: &str, path: &str) -> Result<Url, url::ParseError> {
    // Url::join drops the last segment unless the base ends with a slash
    let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))?;
    base.join(path.trim_start_matches('/'))
}

fn default_models_path() -> String {
    "web/models".to_string()
}

fn default_maps_path() -> String {
    "maps".to_string()
}

fn default_page_delay_ms() -> u64 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_related_wide() -> usize {
    5
}

fn default_related_narrow() -> usize {
    6
}

fn default_description_words() -> usize {
    100
}
