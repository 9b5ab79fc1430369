//! Failed-login counters keyed by username.
//!
//! Each record lives for `attempt_ttl` after its latest failure. Expired
//! records never count toward the threshold: reads treat them as absent and
//! remove them, and a background sweep purges the rest. The number of tracked
//! usernames is capped; when a new failure exceeds the cap, a batch of the
//! records with the oldest latest failure is evicted.
//!
//! Records are stored in a sharded [`DashMap`], so updates to one username are
//! atomic while updates to different usernames rarely contend.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, instrument};

use supportportal_config::LoginAttemptConfig;

#[derive(Debug, Clone, Copy)]
struct AttemptRecord {
    failures: u32,
    window_start: Instant,
    last_failure_at: Instant,
}

impl AttemptRecord {
    fn new(now: Instant) -> Self {
        Self {
            failures: 0,
            window_start: now,
            last_failure_at: now,
        }
    }

    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_failure_at) >= ttl
    }
}

#[derive(Debug)]
pub struct LoginAttemptTracker {
    records: DashMap<String, AttemptRecord>,
    config: LoginAttemptConfig,
}

impl Default for LoginAttemptTracker {
    fn default() -> Self {
        Self::new(LoginAttemptConfig::default())
    }
}

impl LoginAttemptTracker {
    pub fn new(config: LoginAttemptConfig) -> Self {
        Self {
            records: DashMap::new(),
            config,
        }
    }

    /// Failures at which [`exceeded_max`](Self::exceeded_max) turns true.
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    /// Records one failed login and returns the updated failure count.
    ///
    /// An expired record restarts at one. Concurrent calls for the same
    /// username each count exactly once.
    #[instrument(skip_all, fields(login.username = %username))]
    pub fn record_failure(&self, username: &str) -> u32 {
        let now = Instant::now();
        let ttl = self.config.attempt_ttl;

        let failures = {
            let mut record = self
                .records
                .entry(username.to_string())
                .or_insert_with(|| AttemptRecord::new(now));
            if record.is_expired(now, ttl) {
                *record = AttemptRecord::new(now);
            }
            record.failures = record.failures.saturating_add(1);
            record.last_failure_at = now;
            record.failures
        };

        debug!(login.failures = failures, "Login failure recorded");

        self.enforce_capacity(username);
        failures
    }

    /// Whether `username` has reached the failure threshold within the TTL.
    pub fn exceeded_max(&self, username: &str) -> bool {
        let now = Instant::now();
        let ttl = self.config.attempt_ttl;

        let expired = match self.records.get(username) {
            None => return false,
            Some(record) if record.is_expired(now, ttl) => true,
            Some(record) => return record.failures >= self.config.max_attempts,
        };

        if expired {
            self.records
                .remove_if(username, |_, record| record.is_expired(now, ttl));
        }
        false
    }

    /// Current failure count, zero when absent or expired.
    pub fn failure_count(&self, username: &str) -> u32 {
        let now = Instant::now();
        self.records
            .get(username)
            .filter(|record| !record.is_expired(now, self.config.attempt_ttl))
            .map(|record| record.failures)
            .unwrap_or(0)
    }

    /// When the current failure window for `username` opened.
    pub fn window_start(&self, username: &str) -> Option<Instant> {
        let now = Instant::now();
        self.records
            .get(username)
            .filter(|record| !record.is_expired(now, self.config.attempt_ttl))
            .map(|record| record.window_start)
    }

    /// Forgets every failure for `username`. Returns whether a record existed.
    pub fn evict(&self, username: &str) -> bool {
        self.records.remove(username).is_some()
    }

    /// Removes all expired records and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let ttl = self.config.attempt_ttl;
        let mut purged = 0;

        self.records.retain(|_, record| {
            let keep = !record.is_expired(now, ttl);
            if !keep {
                purged += 1;
            }
            keep
        });

        purged
    }

    /// Number of tracked usernames, expired records included until purged.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Spawns a task that calls [`purge_expired`](Self::purge_expired) every
    /// `purge_interval`. Abort the handle to stop it.
    pub fn spawn_purge_task(self: Arc<Self>) -> JoinHandle<()> {
        let period = self.config.purge_interval.max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let purged = self.purge_expired();
                if purged > 0 {
                    debug!(login.purged = purged, "Purged expired login attempt records");
                }
            }
        })
    }

    /// Evicts the records with the oldest latest failure once the cap is
    /// exceeded. Expired records are always among the oldest, so they go
    /// first. A tenth of the cap is shed per pass so the scan runs once per
    /// `cap / 10` new usernames rather than on every one.
    fn enforce_capacity(&self, keep: &str) {
        let cap = self.config.max_tracked_users;
        let len = self.records.len();
        if len <= cap {
            return;
        }

        let target = cap - cap / 10;
        let mut candidates: Vec<(String, Instant)> = self
            .records
            .iter()
            .filter(|entry| entry.key() != keep)
            .map(|entry| (entry.key().clone(), entry.value().last_failure_at))
            .collect();

        let excess = (len - target).min(candidates.len());
        if excess == 0 {
            return;
        }
        if excess < candidates.len() {
            candidates.select_nth_unstable_by_key(excess - 1, |(_, last_failure_at)| *last_failure_at);
        }

        let mut evicted = 0;
        for (username, last_failure_at) in candidates.into_iter().take(excess) {
            // Skip records refreshed since the scan.
            if self
                .records
                .remove_if(&username, |_, record| record.last_failure_at == last_failure_at)
                .is_some()
            {
                evicted += 1;
            }
        }
        debug!(login.evicted = evicted, "Evicted login attempt records at capacity");
    }
}
