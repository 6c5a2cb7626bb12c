//! Sync orchestration: paginated sweeps that pull countries, series, players
//! and matches from the external source and upsert them locally, plus the
//! recurring schedules that keep them fresh.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::db;
use crate::models::Player;
use crate::source::{CricketSource, SourceError};

/// Courtesy pause between pages so a sweep does not hammer the source.
const PAGE_DELAY: Duration = Duration::from_millis(100);

/// Internal caps for the reference-data sweeps, which take no caller limit
/// but must still terminate against a misbehaving source.
const COUNTRY_SWEEP_CAP: u64 = 500;
const SERIES_SWEEP_CAP: u64 = 1000;

const HOUR: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Entity type selector for on-demand re-sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncTarget {
    All,
    Countries,
    Series,
    Players,
    Matches,
}

/// Orchestrates sweeps against an injected source, writing through the upsert
/// layer. Constructed once at startup and shared behind an `Arc`.
pub struct SyncService<S> {
    pool: SqlitePool,
    source: Arc<S>,
    player_sync_limit: u64,
    match_sync_limit: u64,
}

impl<S: CricketSource> SyncService<S> {
    pub fn new(pool: SqlitePool, source: Arc<S>, player_sync_limit: u64, match_sync_limit: u64) -> Self {
        Self {
            pool,
            source,
            player_sync_limit,
            match_sync_limit,
        }
    }

    /// Run every sweep once at process startup. Individual failures are
    /// logged and tolerated; startup never fails because the source is down.
    pub async fn initialize(&self) {
        info!("starting initial data synchronization");

        if let Err(err) = self.sync_countries().await {
            warn!(error = %err, "initial country sync failed");
        }
        if let Err(err) = self.sync_series().await {
            warn!(error = %err, "initial series sync failed");
        }
        if let Err(err) = self.sync_players(self.player_sync_limit).await {
            warn!(error = %err, "initial player sync failed");
        }
        if let Err(err) = self.sync_matches(self.match_sync_limit).await {
            warn!(error = %err, "initial match sync failed");
        }

        info!("initial data synchronization completed");
    }

    /// Sweep all countries. Returns the number of records synced.
    pub async fn sync_countries(&self) -> Result<u64, SyncError> {
        info!("syncing countries");
        let mut offset = 0u64;
        let mut synced = 0u64;

        loop {
            let page = match self.source.countries(offset).await {
                Ok(page) => page,
                Err(err) if offset == 0 => return Err(err.into()),
                Err(err) => {
                    warn!(offset, error = %err, retryable = err.is_retryable(), "country page fetch failed, ending sweep");
                    break;
                }
            };
            if page.data.is_empty() {
                break;
            }

            for record in &page.data {
                if let Err(err) = db::upsert_country(&self.pool, record).await {
                    warn!(external_id = %record.id, error = %err, "skipping country record");
                    continue;
                }
                synced += 1;
            }

            offset += page.data.len() as u64;
            if !page.has_more || synced >= COUNTRY_SWEEP_CAP {
                break;
            }
            tokio::time::sleep(PAGE_DELAY).await;
        }

        info!(synced, "country sync complete");
        Ok(synced)
    }

    pub async fn sync_series(&self) -> Result<u64, SyncError> {
        info!("syncing series");
        let mut offset = 0u64;
        let mut synced = 0u64;

        loop {
            let page = match self.source.series_list(offset).await {
                Ok(page) => page,
                Err(err) if offset == 0 => return Err(err.into()),
                Err(err) => {
                    warn!(offset, error = %err, retryable = err.is_retryable(), "series page fetch failed, ending sweep");
                    break;
                }
            };
            if page.data.is_empty() {
                break;
            }

            for record in &page.data {
                if let Err(err) = db::upsert_series(&self.pool, record).await {
                    warn!(external_id = %record.id, error = %err, "skipping series record");
                    continue;
                }
                synced += 1;
            }

            offset += page.data.len() as u64;
            if !page.has_more || synced >= SERIES_SWEEP_CAP {
                break;
            }
            tokio::time::sleep(PAGE_DELAY).await;
        }

        info!(synced, "series sync complete");
        Ok(synced)
    }

    /// Sweep players up to `limit` records.
    pub async fn sync_players(&self, limit: u64) -> Result<u64, SyncError> {
        info!(limit, "syncing players");
        let mut offset = 0u64;
        let mut synced = 0u64;

        while synced < limit {
            let page = match self.source.players(offset).await {
                Ok(page) => page,
                Err(err) if offset == 0 => return Err(err.into()),
                Err(err) => {
                    warn!(offset, error = %err, retryable = err.is_retryable(), "player page fetch failed, ending sweep");
                    break;
                }
            };
            if page.data.is_empty() {
                break;
            }

            for record in &page.data {
                if synced >= limit {
                    break;
                }
                if record.name.trim().is_empty() {
                    warn!("skipping player record without a name");
                    continue;
                }
                if let Err(err) = db::upsert_player(&self.pool, record).await {
                    warn!(player = %record.name, error = %err, "skipping player record");
                    continue;
                }
                synced += 1;
            }

            offset += page.data.len() as u64;
            if !page.has_more {
                break;
            }
            tokio::time::sleep(PAGE_DELAY).await;
        }

        info!(synced, "player sync complete");
        Ok(synced)
    }

    /// Sweep matches up to `limit` records.
    pub async fn sync_matches(&self, limit: u64) -> Result<u64, SyncError> {
        info!(limit, "syncing matches");
        let mut offset = 0u64;
        let mut synced = 0u64;

        while synced < limit {
            let page = match self.source.matches(offset).await {
                Ok(page) => page,
                Err(err) if offset == 0 => return Err(err.into()),
                Err(err) => {
                    warn!(offset, error = %err, retryable = err.is_retryable(), "match page fetch failed, ending sweep");
                    break;
                }
            };
            if page.data.is_empty() {
                break;
            }

            for record in &page.data {
                if synced >= limit {
                    break;
                }
                if record.teams.len() < 2 {
                    warn!(external_id = %record.id, "skipping match record without two teams");
                    continue;
                }
                if let Err(err) = db::upsert_match(&self.pool, record).await {
                    warn!(external_id = %record.id, error = %err, "skipping match record");
                    continue;
                }
                synced += 1;
            }

            offset += page.data.len() as u64;
            if !page.has_more {
                break;
            }
            tokio::time::sleep(PAGE_DELAY).await;
        }

        info!(synced, "match sync complete");
        Ok(synced)
    }

    /// On-demand re-sync for the admin trigger. Returns total records synced.
    pub async fn force_sync(&self, target: SyncTarget) -> Result<u64, SyncError> {
        info!(?target, "force sync requested");
        let synced = match target {
            SyncTarget::Countries => self.sync_countries().await?,
            SyncTarget::Series => self.sync_series().await?,
            SyncTarget::Players => self.sync_players(self.player_sync_limit).await?,
            SyncTarget::Matches => self.sync_matches(self.match_sync_limit).await?,
            SyncTarget::All => {
                self.sync_countries().await?
                    + self.sync_series().await?
                    + self.sync_players(self.player_sync_limit).await?
                    + self.sync_matches(self.match_sync_limit).await?
            }
        };
        info!(?target, synced, "force sync completed");
        Ok(synced)
    }

    /// Fetch a filtered player page from the source and upsert just those
    /// records. Backfill path for user-driven lookups.
    pub async fn search_and_sync(&self, term: &str) -> Result<u64, SyncError> {
        info!(term, "searching source for players");
        let players = self.source.search_players(term).await?;
        let mut synced = 0u64;

        for record in &players {
            if record.name.trim().is_empty() {
                continue;
            }
            if let Err(err) = db::upsert_player(&self.pool, record).await {
                warn!(player = %record.name, error = %err, "skipping searched player record");
                continue;
            }
            synced += 1;
        }

        info!(term, synced, "search sync complete");
        Ok(synced)
    }

    /// Fetch one player by external id and upsert it, returning the local row.
    pub async fn refresh_player(&self, external_id: &str) -> Result<Option<Player>, SyncError> {
        let Some(record) = self.source.player_info(external_id).await? else {
            return Ok(None);
        };
        db::upsert_player(&self.pool, &record).await?;
        let player = match record.id.as_deref() {
            Some(id) => db::get_player_by_external_id(&self.pool, id).await?,
            None => None,
        };
        Ok(player)
    }

    /// Fetch one match by external id and upsert it.
    pub async fn refresh_match(&self, external_id: &str) -> Result<Option<crate::models::Match>, SyncError> {
        let Some(record) = self.source.match_info(external_id).await? else {
            return Ok(None);
        };
        if record.teams.len() < 2 {
            warn!(external_id, "fetched match record lacks two teams, not storing");
            return Ok(None);
        }
        db::upsert_match(&self.pool, &record).await?;
        Ok(db::get_match_by_external_id(&self.pool, &record.id).await?)
    }
}

/// Start the recurring sweeps: matches hourly, players every six hours,
/// series daily, countries weekly. A missed tick is skipped, not caught up.
pub fn spawn_schedules<S: CricketSource + 'static>(service: Arc<SyncService<S>>) {
    let svc = service.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(HOUR);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await; // startup sync already covered the first run
        loop {
            ticker.tick().await;
            if let Err(err) = svc.sync_matches(svc.match_sync_limit).await {
                warn!(error = %err, "scheduled match sync failed");
            }
        }
    });

    let svc = service.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(6 * HOUR);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(err) = svc.sync_players(svc.player_sync_limit).await {
                warn!(error = %err, "scheduled player sync failed");
            }
        }
    });

    let svc = service.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(24 * HOUR);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(err) = svc.sync_series().await {
                warn!(error = %err, "scheduled series sync failed");
            }
        }
    });

    let svc = service;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(7 * 24 * HOUR);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(err) = svc.sync_countries().await {
                warn!(error = %err, "scheduled country sync failed");
            }
        }
    });
}
