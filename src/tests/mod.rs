//! Integration-style tests: the sync and scoring pipelines are driven end to
//! end against an in-memory database and a scripted source.

mod fantasy;

use async_trait::async_trait;
use reqwest::StatusCode;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::db;
use crate::source::{
    ApiCountry, ApiMatch, ApiPlayer, ApiSeries, CricketSource, Page, SourceError, SourceResult,
};

/// An in-memory pool must stay on a single connection; every extra pooled
/// connection would open its own empty database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init_schema(&pool).await.unwrap();
    pool
}

pub fn api_player(id: &str, name: &str, country: &str) -> ApiPlayer {
    ApiPlayer {
        id: Some(id.to_string()),
        name: name.to_string(),
        country: Some(country.to_string()),
        role: Some("Batsman".to_string()),
        batting_style: None,
        bowling_style: None,
    }
}

pub fn api_match(id: &str, name: &str, teams: &[&str], status: &str) -> ApiMatch {
    ApiMatch {
        id: id.to_string(),
        name: name.to_string(),
        match_type: Some("t20".to_string()),
        status: Some(status.to_string()),
        venue: Some("Eden Gardens".to_string()),
        date: Some("2026-08-01".to_string()),
        date_time_gmt: Some("2026-08-01T14:00:00".to_string()),
        teams: teams.iter().map(|t| t.to_string()).collect(),
        score: Vec::new(),
    }
}

/// Scripted source that serves fixed record sets in pages. Set `failing` to
/// make every call return a server error.
pub struct FakeSource {
    pub countries: Vec<ApiCountry>,
    pub series: Vec<ApiSeries>,
    pub players: Vec<ApiPlayer>,
    pub matches: Vec<ApiMatch>,
    pub search_results: Vec<ApiPlayer>,
    pub page_size: usize,
    pub failing: bool,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            countries: Vec::new(),
            series: Vec::new(),
            players: Vec::new(),
            matches: Vec::new(),
            search_results: Vec::new(),
            page_size: 25,
            failing: false,
        }
    }
}

fn page_of<T: Clone>(items: &[T], offset: u64, page_size: usize) -> Page<T> {
    let start = (offset as usize).min(items.len());
    let end = (start + page_size).min(items.len());
    Page {
        data: items[start..end].to_vec(),
        has_more: end < items.len(),
    }
}

fn unavailable(path: &str) -> SourceError {
    SourceError::Status {
        url: format!("fake/{path}"),
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[async_trait]
impl CricketSource for FakeSource {
    async fn countries(&self, offset: u64) -> SourceResult<Page<ApiCountry>> {
        if self.failing {
            return Err(unavailable("countries"));
        }
        Ok(page_of(&self.countries, offset, self.page_size))
    }

    async fn series_list(&self, offset: u64) -> SourceResult<Page<ApiSeries>> {
        if self.failing {
            return Err(unavailable("series"));
        }
        Ok(page_of(&self.series, offset, self.page_size))
    }

    async fn players(&self, offset: u64) -> SourceResult<Page<ApiPlayer>> {
        if self.failing {
            return Err(unavailable("players"));
        }
        Ok(page_of(&self.players, offset, self.page_size))
    }

    async fn matches(&self, offset: u64) -> SourceResult<Page<ApiMatch>> {
        if self.failing {
            return Err(unavailable("matches"));
        }
        Ok(page_of(&self.matches, offset, self.page_size))
    }

    async fn search_players(&self, _term: &str) -> SourceResult<Vec<ApiPlayer>> {
        if self.failing {
            return Err(unavailable("players"));
        }
        Ok(self.search_results.clone())
    }

    async fn player_info(&self, external_id: &str) -> SourceResult<Option<ApiPlayer>> {
        if self.failing {
            return Err(unavailable("players_info"));
        }
        Ok(self
            .players
            .iter()
            .find(|p| p.id.as_deref() == Some(external_id))
            .cloned())
    }

    async fn match_info(&self, external_id: &str) -> SourceResult<Option<ApiMatch>> {
        if self.failing {
            return Err(unavailable("match_info"));
        }
        Ok(self.matches.iter().find(|m| m.id == external_id).cloned())
    }
}
