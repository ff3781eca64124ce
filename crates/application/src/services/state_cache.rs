//! Single-slot display state cache
//!
//! Holds at most one `DisplayState`. Readers never block: the slot is an
//! atomically swapped `Arc`, so a request either sees the previous state or
//! the fully built new one. Refreshes are serialized through a gate so that
//! concurrent misses trigger exactly one upstream fetch, and callers that
//! queued behind a failed refresh receive its error instead of fetching again.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use chrono::TimeDelta;
use domain::{DisplayState, RawSnapshot, Staleness};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::WeatherTransformer;
use crate::error::ApplicationError;
use crate::ports::Clock;

/// Counters describing cache behaviour since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Requests served from the cached state
    pub hits: u64,
    /// Requests that required a refresh
    pub misses: u64,
    /// Successful refreshes
    pub refreshes: u64,
    /// Refreshes that failed while fetching or transforming
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Last refresh that failed, handed to callers that queued behind it
struct FailedRefresh {
    source_id: String,
    error: ApplicationError,
}

enum Lookup {
    Fresh(Arc<DisplayState>),
    Stale(Staleness),
    Empty,
}

/// Cache for the most recently built display state
pub struct StateCache {
    state: ArcSwapOption<DisplayState>,
    refresh_gate: Mutex<Option<FailedRefresh>>,
    /// Completed refresh attempts, bumped while holding the gate
    attempts: AtomicU64,
    transformer: WeatherTransformer,
    clock: Arc<dyn Clock>,
    counters: Counters,
}

impl StateCache {
    /// Create an empty cache
    #[must_use]
    pub fn new(transformer: WeatherTransformer, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: ArcSwapOption::empty(),
            refresh_gate: Mutex::new(None),
            attempts: AtomicU64::new(0),
            transformer,
            clock,
            counters: Counters::default(),
        }
    }

    /// Return the cached state for `source_id`, refreshing it if needed
    ///
    /// `fetch` is only invoked when the cached state is missing, expired, or
    /// was produced by a different source. A new state expires `max_age`
    /// after the fetch completed. When the refresh fails the cached state is
    /// left exactly as it was, and every caller for the same source that
    /// queued while it ran gets the same error.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error, the transform error, or
    /// `ApplicationError::Internal` when the snapshot belongs to another source.
    pub async fn get_or_refresh<F, Fut>(
        &self,
        source_id: &str,
        max_age: Duration,
        fetch: F,
    ) -> Result<Arc<DisplayState>, ApplicationError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<RawSnapshot, ApplicationError>> + Send,
    {
        if let Lookup::Fresh(state) = self.lookup(source_id) {
            return Ok(self.hit(state));
        }

        let seen = self.attempts.load(Ordering::Acquire);
        let mut gate = self.refresh_gate.lock().await;

        // Another caller may have refreshed while we waited
        let reason = match self.lookup(source_id) {
            Lookup::Fresh(state) => return Ok(self.hit(state)),
            Lookup::Stale(staleness) => staleness.to_string(),
            Lookup::Empty => "empty".to_string(),
        };
        self.counters.misses.fetch_add(1, Ordering::Relaxed);

        if self.attempts.load(Ordering::Acquire) != seen
            && let Some(failed) = gate.as_ref().filter(|f| f.source_id == source_id)
        {
            debug!(error = %failed.error, "Refresh failed while queued, sharing its error");
            return Err(failed.error.clone());
        }

        debug!(reason = %reason, "Refreshing display state");
        let started = Instant::now();
        let result = self.refresh(source_id, max_age, fetch).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.attempts.fetch_add(1, Ordering::Release);

        match result {
            Ok(state) => {
                *gate = None;
                self.counters.refreshes.fetch_add(1, Ordering::Relaxed);
                debug!(expires_at = %state.expires_at, elapsed_ms, "Display state refreshed");
                Ok(state)
            },
            Err(e) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                warn!(
                    error = %e,
                    retryable = e.is_retryable(),
                    bad_payload = e.is_data_error(),
                    elapsed_ms,
                    "Display state refresh failed, keeping previous state"
                );
                *gate = Some(FailedRefresh {
                    source_id: source_id.to_string(),
                    error: e.clone(),
                });
                Err(e)
            },
        }
    }

    fn hit(&self, state: Arc<DisplayState>) -> Arc<DisplayState> {
        self.counters.hits.fetch_add(1, Ordering::Relaxed);
        debug!(expires_at = %state.expires_at, "Serving cached display state");
        state
    }

    async fn refresh<F, Fut>(
        &self,
        source_id: &str,
        max_age: Duration,
        fetch: F,
    ) -> Result<Arc<DisplayState>, ApplicationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RawSnapshot, ApplicationError>>,
    {
        let snapshot = fetch().await?;
        if snapshot.source_id != source_id {
            return Err(ApplicationError::Internal(
                "snapshot does not belong to the requested source".to_string(),
            ));
        }

        let max_age = TimeDelta::from_std(max_age)
            .map_err(|e| ApplicationError::Configuration(format!("max age out of range: {e}")))?;
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(max_age)
            .ok_or_else(|| ApplicationError::Configuration("max age out of range".to_string()))?;

        let state = Arc::new(self.transformer.transform(&snapshot, expires_at)?);
        self.state.store(Some(Arc::clone(&state)));
        Ok(state)
    }

    fn lookup(&self, source_id: &str) -> Lookup {
        let Some(state) = self.state.load_full() else {
            return Lookup::Empty;
        };
        match state.staleness(source_id, self.clock.now()) {
            None => Lookup::Fresh(state),
            Some(staleness) => Lookup::Stale(staleness),
        }
    }

    /// Currently cached state, valid or not
    #[must_use]
    pub fn peek(&self) -> Option<Arc<DisplayState>> {
        self.state.load_full()
    }

    /// Whether `state` could still be served for the source that built it
    #[must_use]
    pub fn is_valid(&self, state: &DisplayState) -> bool {
        state.is_valid_for(&state.source_id, self.clock.now())
    }

    /// Drop the cached state so the next request refreshes
    pub fn invalidate(&self) {
        self.state.store(None);
    }

    /// Counters since startup
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}

impl fmt::Debug for StateCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.state.load();
        f.debug_struct("StateCache")
            .field("expires_at", &current.as_ref().map(|s| s.expires_at))
            .field("transformer", &self.transformer)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
