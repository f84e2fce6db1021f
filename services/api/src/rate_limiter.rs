//! Rate limiter for throttling repeated failed logins

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Rate limiter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Maximum number of failed attempts allowed within the window
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds
    pub ban_duration_seconds: u64,
    /// Upper bound on keys held in memory at once
    pub max_tracked_keys: usize,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300,        // 5 minutes
            ban_duration_seconds: 3600, // 1 hour
            max_tracked_keys: 10_000,
        }
    }
}

/// Rate limiter entry
#[derive(Debug)]
struct RateLimiterEntry {
    /// Failed attempts in the current window
    failures: u32,
    /// Start of the current window
    window_start: Instant,
    /// Ban expiration time
    ban_expires: Option<Instant>,
}

impl RateLimiterEntry {
    /// Whether the entry no longer affects any decision
    fn is_stale(&self, now: Instant, window: Duration) -> bool {
        match self.ban_expires {
            Some(ban_expires) => now >= ban_expires,
            None => now.duration_since(self.window_start) >= window,
        }
    }
}

/// Rate limiter keyed by an arbitrary string
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    entries: Arc<Mutex<HashMap<String, RateLimiterEntry>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check whether a key may attempt a login
    pub async fn is_allowed(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let window = Duration::from_secs(self.config.window_seconds);

        let (allowed, stale) = match entries.get(key) {
            None => (true, false),
            Some(entry) if entry.is_stale(now, window) => (true, true),
            Some(entry) => (entry.ban_expires.is_none(), false),
        };

        if stale {
            entries.remove(key);
        }

        allowed
    }

    /// Record a failed attempt, banning the key once the limit is reached
    pub async fn record_failure(&self, key: &str) {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let window = Duration::from_secs(self.config.window_seconds);

        if !entries.contains_key(key) {
            entries.retain(|_, entry| !entry.is_stale(now, window));

            if entries.len() >= self.config.max_tracked_keys {
                // Unbanned keys go first, oldest window first
                let evicted = entries
                    .iter()
                    .min_by_key(|(_, entry)| (entry.ban_expires.is_some(), entry.window_start))
                    .map(|(evicted, _)| evicted.clone());

                if let Some(evicted) = evicted {
                    warn!("Rate limiter full, evicting key {}", evicted);
                    entries.remove(&evicted);
                }
            }
        }

        let entry = entries
            .entry(key.to_string())
            .or_insert(RateLimiterEntry {
                failures: 0,
                window_start: now,
                ban_expires: None,
            });

        if now.duration_since(entry.window_start) >= window {
            entry.failures = 0;
            entry.window_start = now;
        }

        entry.failures += 1;

        if entry.failures >= self.config.max_attempts && entry.ban_expires.is_none() {
            entry.ban_expires = Some(now + Duration::from_secs(self.config.ban_duration_seconds));
            info!(
                "Banned key {} for {} seconds",
                key, self.config.ban_duration_seconds
            );
        }
    }

    /// Forget a key after a successful attempt
    pub async fn reset(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_attempts: u32, ban_duration_seconds: u64) -> RateLimiter {
        RateLimiter::new(RateLimiterConfig {
            max_attempts,
            window_seconds: 300,
            ban_duration_seconds,
            ..RateLimiterConfig::default()
        })
    }

    #[tokio::test]
    async fn test_unknown_key_is_allowed() {
        let limiter = limiter(3, 60);
        assert!(limiter.is_allowed("customer:a@x.com").await);
    }

    #[tokio::test]
    async fn test_key_is_banned_after_max_failures() {
        let limiter = limiter(3, 60);
        let key = "customer:a@x.com";

        for _ in 0..2 {
            limiter.record_failure(key).await;
            assert!(limiter.is_allowed(key).await);
        }

        limiter.record_failure(key).await;
        assert!(!limiter.is_allowed(key).await);
        assert!(limiter.is_allowed("customer:b@x.com").await);
    }

    #[tokio::test]
    async fn test_reset_clears_failures() {
        let limiter = limiter(2, 60);
        let key = "farmer:a@x.com";

        limiter.record_failure(key).await;
        limiter.reset(key).await;
        limiter.record_failure(key).await;

        assert!(limiter.is_allowed(key).await);
    }

    #[tokio::test]
    async fn test_expired_ban_is_lifted() {
        let limiter = limiter(1, 0);
        let key = "farmer:a@x.com";

        limiter.record_failure(key).await;
        assert!(limiter.is_allowed(key).await);
        assert!(limiter.is_allowed(key).await);
    }

    #[tokio::test]
    async fn test_stale_keys_are_dropped_on_insert() {
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_attempts: 5,
            window_seconds: 0,
            ban_duration_seconds: 60,
            ..RateLimiterConfig::default()
        });

        for n in 0..100 {
            limiter.record_failure(&format!("customer:ghost{n}@x.com")).await;
        }

        assert_eq!(limiter.entries.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_tracked_keys_are_bounded() {
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_tracked_keys: 50,
            ..RateLimiterConfig::default()
        });
        let banned = "customer:a@x.com";
        for _ in 0..5 {
            limiter.record_failure(banned).await;
        }

        for n in 0..10_000 {
            limiter.record_failure(&format!("customer:ghost{n}@x.com")).await;
        }

        assert!(limiter.entries.lock().await.len() <= 50);
        // Bans outlive the flood of unknown keys
        assert!(!limiter.is_allowed(banned).await);
    }

    #[test]
    fn test_default_config() {
        let config = RateLimiterConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.window_seconds, 300);
        assert_eq!(config.ban_duration_seconds, 3600);
        assert_eq!(config.max_tracked_keys, 10_000);
    }
}
