//! Tracker session — the single owner of user state.
//!
//! Every mutation is applied in memory first and then written through to the
//! store. A failed write leaves the in-memory state authoritative for the rest
//! of the process lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::matching::{generate_digest, Digest, MatchScorer, ScoredJob};
use crate::models::{Job, Preferences};
use crate::storage::{
    digest_key, read_json, remove_key, write_json, KvStore, PREFERENCES_KEY, SAVED_KEY,
};

/// What the digest view should show for a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DigestState {
    Ready { digest: Digest },
    NotGenerated { date: NaiveDate },
    PreferencesRequired,
}

#[derive(Debug, Default)]
struct Session {
    saved: Vec<String>,
    preferences: Option<Preferences>,
    /// `None` records a day known to have no snapshot.
    digests: HashMap<NaiveDate, Option<Vec<ScoredJob>>>,
}

pub struct Tracker {
    store: Arc<dyn KvStore>,
    session: Mutex<Session>,
}

impl Tracker {
    /// Loads saved ids and preferences from the store. Missing or malformed
    /// values start out empty.
    pub async fn load(store: Arc<dyn KvStore>) -> Self {
        let saved: Vec<String> = read_json(store.as_ref(), SAVED_KEY)
            .await
            .unwrap_or_default();
        let preferences: Option<Preferences> = read_json(store.as_ref(), PREFERENCES_KEY).await;

        info!(
            "Tracker loaded: {} saved job(s), preferences {}",
            saved.len(),
            if preferences.is_some() { "set" } else { "unset" }
        );

        Self {
            store,
            session: Mutex::new(Session {
                saved,
                preferences,
                digests: HashMap::new(),
            }),
        }
    }

    // ── Saved set ─────────────────────────────────────────────────────────

    pub async fn saved_ids(&self) -> Vec<String> {
        self.session.lock().await.saved.clone()
    }

    pub async fn is_saved(&self, job_id: &str) -> bool {
        self.session.lock().await.saved.iter().any(|id| id == job_id)
    }

    /// Adds the id if absent, removes it if present. Returns whether it is now saved.
    pub async fn toggle_saved(&self, job_id: &str) -> bool {
        let mut session = self.session.lock().await;
        let now_saved = match session.saved.iter().position(|id| id == job_id) {
            Some(i) => {
                session.saved.remove(i);
                false
            }
            None => {
                session.saved.push(job_id.to_string());
                true
            }
        };
        write_json(self.store.as_ref(), SAVED_KEY, &session.saved).await;
        debug!("Job {job_id} saved={now_saved}");
        now_saved
    }

    // ── Preferences ───────────────────────────────────────────────────────

    pub async fn preferences(&self) -> Option<Preferences> {
        self.session.lock().await.preferences.clone()
    }

    /// Replaces preferences wholesale. Existing digests are snapshots and stay as they are.
    pub async fn set_preferences(&self, preferences: Preferences) {
        let mut session = self.session.lock().await;
        write_json(self.store.as_ref(), PREFERENCES_KEY, &preferences).await;
        session.preferences = Some(preferences);
        info!("Preferences updated");
    }

    // ── Digest ────────────────────────────────────────────────────────────

    pub async fn digest_state(&self, date: NaiveDate) -> DigestState {
        let mut session = self.session.lock().await;
        if let Some(jobs) = self.snapshot(&mut session, date).await {
            return DigestState::Ready {
                digest: Digest { date, jobs },
            };
        }
        if session.preferences.is_none() {
            DigestState::PreferencesRequired
        } else {
            DigestState::NotGenerated { date }
        }
    }

    /// Generates the day's digest, or returns the existing snapshot unchanged.
    pub async fn generate_digest(
        &self,
        date: NaiveDate,
        jobs: &[Job],
        scorer: &dyn MatchScorer,
    ) -> DigestState {
        let mut session = self.session.lock().await;
        if let Some(jobs) = self.snapshot(&mut session, date).await {
            debug!("Digest for {date} already exists");
            return DigestState::Ready {
                digest: Digest { date, jobs },
            };
        }
        let Some(preferences) = session.preferences.as_ref() else {
            return DigestState::PreferencesRequired;
        };

        let picked = generate_digest(jobs, preferences, scorer);
        info!("Generated digest for {date} with {} job(s)", picked.len());

        write_json(self.store.as_ref(), &digest_key(date), &picked).await;
        session.digests.insert(date, Some(picked.clone()));

        DigestState::Ready {
            digest: Digest { date, jobs: picked },
        }
    }

    pub async fn clear_digest(&self, date: NaiveDate) {
        let mut session = self.session.lock().await;
        remove_key(self.store.as_ref(), &digest_key(date)).await;
        session.digests.insert(date, None);
        info!("Cleared digest for {date}");
    }

    async fn snapshot(&self, session: &mut Session, date: NaiveDate) -> Option<Vec<ScoredJob>> {
        if let Some(cached) = session.digests.get(&date) {
            return cached.clone();
        }
        let stored: Option<Vec<ScoredJob>> =
            read_json(self.store.as_ref(), &digest_key(date)).await;
        session.digests.insert(date, stored.clone());
        stored
    }
}
