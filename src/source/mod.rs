use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, Semaphore};

/// Page size the upstream API serves for list endpoints.
pub const PAGE_SIZE: usize = 25;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CACHE_TTL: Duration = Duration::from_secs(15 * 60);
const MAX_REQUESTS_PER_MINUTE: u64 = 100;

pub type SourceResult<T> = Result<T, SourceError>;

/// Typed failure surface of the external cricket data API.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("source returned {status} for {url}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Transport-level failures are worth retrying on the next sweep;
    /// malformed payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Network { .. } => true,
            SourceError::Status { status, .. } => status.is_server_error(),
            SourceError::Decode { .. } => false,
        }
    }
}

/// Wire envelope the third party wraps every response in.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    info: Option<PageInfo>,
}

/// Envelope variant for detail-by-id endpoints, where `data` is one object.
#[derive(Debug, Deserialize)]
struct DetailEnvelope<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(rename = "totalRows")]
    total_rows: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCountry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSeries {
    pub id: String,
    pub name: String,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub odi: i64,
    #[serde(default)]
    pub t20: i64,
    #[serde(default)]
    pub test: i64,
    #[serde(default)]
    pub squads: i64,
    #[serde(default)]
    pub matches: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPlayer {
    pub id: Option<String>,
    pub name: String,
    pub country: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "battingStyle")]
    pub batting_style: Option<String>,
    #[serde(rename = "bowlingStyle")]
    pub bowling_style: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiInningsScore {
    #[serde(default)]
    pub r: i64,
    #[serde(default)]
    pub w: i64,
    #[serde(default)]
    pub o: f64,
    #[serde(default)]
    pub inning: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMatch {
    pub id: String,
    pub name: String,
    #[serde(rename = "matchType")]
    pub match_type: Option<String>,
    pub status: Option<String>,
    pub venue: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "dateTimeGMT")]
    pub date_time_gmt: Option<String>,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub score: Vec<ApiInningsScore>,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub has_more: bool,
}

/// Seam between the sync orchestrator and the third-party API, so sweeps can
/// run against a fake source in tests.
#[async_trait]
pub trait CricketSource: Send + Sync {
    async fn countries(&self, offset: u64) -> SourceResult<Page<ApiCountry>>;
    async fn series_list(&self, offset: u64) -> SourceResult<Page<ApiSeries>>;
    async fn players(&self, offset: u64) -> SourceResult<Page<ApiPlayer>>;
    async fn matches(&self, offset: u64) -> SourceResult<Page<ApiMatch>>;
    async fn search_players(&self, term: &str) -> SourceResult<Vec<ApiPlayer>>;
    async fn player_info(&self, external_id: &str) -> SourceResult<Option<ApiPlayer>>;
    async fn match_info(&self, external_id: &str) -> SourceResult<Option<ApiMatch>>;
}

/// Minimum-spacing rate limiter: one in-flight request at a time, with a
/// fixed interval between consecutive requests.
struct RateLimiter {
    semaphore: Arc<Semaphore>,
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn per_minute(max_per_minute: u64) -> Self {
        let min_interval = if max_per_minute > 0 {
            Duration::from_secs_f64(60.0 / max_per_minute as f64)
        } else {
            Duration::ZERO
        };
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    async fn acquire(&self) -> tokio::sync::OwnedSemaphorePermit {
        // The semaphore is never closed, so acquire cannot fail.
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("rate limiter semaphore closed");

        if !self.min_interval.is_zero() {
            let mut last = self.last_request.lock().await;
            if let Some(last_time) = *last {
                let elapsed = last_time.elapsed();
                if elapsed < self.min_interval {
                    tokio::time::sleep(self.min_interval - elapsed).await;
                }
            }
            *last = Some(Instant::now());
        }

        permit
    }
}

/// Short-TTL response cache keyed by request path + query, to absorb bursts
/// without re-hitting the source.
struct ResponseCache {
    entries: Mutex<HashMap<String, (Instant, serde_json::Value)>>,
    ttl: Duration,
}

impl ResponseCache {
    fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn put(&self, key: String, value: serde_json::Value) {
        let mut entries = self.entries.lock().await;
        entries.insert(key, (Instant::now(), value));
    }
}

/// HTTP client for the third-party cricket data API. Injects the API key on
/// every request, enforces request spacing and caches GET responses for a
/// short TTL.
pub struct CricApiClient {
    http: Client,
    base_url: String,
    api_key: String,
    limiter: RateLimiter,
    cache: ResponseCache,
}

impl CricApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            limiter: RateLimiter::per_minute(MAX_REQUESTS_PER_MINUTE),
            cache: ResponseCache::new(CACHE_TTL),
        }
    }

    /// GET a JSON document, going through the cache and the rate limiter.
    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> SourceResult<serde_json::Value> {
        let mut cache_key = path.to_string();
        for (k, v) in params {
            cache_key.push_str(&format!("&{k}={v}"));
        }

        if let Some(cached) = self.cache.get(&cache_key).await {
            tracing::debug!(path, "cricket api cache hit");
            return Ok(cached);
        }

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let _permit = self.limiter.acquire().await;

        let response = self
            .http
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|source| SourceError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { url, status });
        }

        let body = response.text().await.map_err(|source| SourceError::Network {
            url: url.clone(),
            source,
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|source| SourceError::Decode {
                url: url.clone(),
                source,
            })?;

        self.cache.put(cache_key, value.clone()).await;
        Ok(value)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        offset: u64,
        extra: &[(&str, &str)],
    ) -> SourceResult<Page<T>> {
        let offset_param = offset.to_string();
        let mut params = vec![("offset", offset_param.as_str())];
        params.extend_from_slice(extra);

        let value = self.get_json(path, &params).await?;
        let url = format!("{}/{}", self.base_url, path);
        let envelope: Envelope<T> =
            serde_json::from_value(value).map_err(|source| SourceError::Decode { url, source })?;

        let fetched = envelope.data.len();
        // Trust the pagination metadata when present; otherwise assume a full
        // page means more rows exist.
        let has_more = match envelope.info.and_then(|i| i.total_rows) {
            Some(total) => fetched > 0 && offset + (fetched as u64) < total,
            None => fetched == PAGE_SIZE,
        };

        Ok(Page {
            data: envelope.data,
            has_more,
        })
    }

    async fn fetch_detail<T: DeserializeOwned>(
        &self,
        path: &str,
        external_id: &str,
    ) -> SourceResult<Option<T>> {
        let value = self.get_json(path, &[("id", external_id)]).await?;
        let url = format!("{}/{}", self.base_url, path);
        let envelope: DetailEnvelope<T> =
            serde_json::from_value(value).map_err(|source| SourceError::Decode { url, source })?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl CricketSource for CricApiClient {
    async fn countries(&self, offset: u64) -> SourceResult<Page<ApiCountry>> {
        self.fetch_page("countries", offset, &[]).await
    }

    async fn series_list(&self, offset: u64) -> SourceResult<Page<ApiSeries>> {
        self.fetch_page("series", offset, &[]).await
    }

    async fn players(&self, offset: u64) -> SourceResult<Page<ApiPlayer>> {
        self.fetch_page("players", offset, &[]).await
    }

    async fn matches(&self, offset: u64) -> SourceResult<Page<ApiMatch>> {
        self.fetch_page("matches", offset, &[]).await
    }

    async fn search_players(&self, term: &str) -> SourceResult<Vec<ApiPlayer>> {
        let page = self.fetch_page("players", 0, &[("search", term)]).await?;
        Ok(page.data)
    }

    async fn player_info(&self, external_id: &str) -> SourceResult<Option<ApiPlayer>> {
        self.fetch_detail("players_info", external_id).await
    }

    async fn match_info(&self, external_id: &str) -> SourceResult<Option<ApiMatch>> {
        self.fetch_detail("match_info", external_id).await
    }
}
