use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::dao::score_store::ScoreStore;

/// Exponential backoff between schema bootstrap attempts.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    /// Wait after the first failure.
    pub initial: Duration,
    /// Upper bound the doubling delay is clamped to.
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(1),
            max: Duration::from_secs(10),
        }
    }
}

/// Keep trying to create the `scores` table until the store accepts it.
///
/// Spawned at startup so the server can come up before the database does;
/// requests in the meantime report their own store errors. Returns the number
/// of attempts it took.
pub async fn run_schema_supervisor(store: Arc<dyn ScoreStore>, backoff: Backoff) -> u32 {
    let mut delay = backoff.initial;
    let mut attempts = 0;

    loop {
        attempts += 1;
        match store.ensure_schema().await {
            Ok(()) => {
                info!(attempts, "scores table ready");
                return attempts;
            }
            Err(err) => {
                warn!(error = %err, retry_in = ?delay, "could not ensure scores table; retrying");
                sleep(delay).await;
                delay = (delay * 2).min(backoff.max);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use futures::future::BoxFuture;

    use super::*;
    use crate::dao::{
        models::{NewScoreEntity, RankedScoreEntity},
        storage::{StorageError, StorageResult},
    };

    /// Store whose schema bootstrap fails a fixed number of times.
    struct FlakyStore {
        failures_left: AtomicU32,
        calls: AtomicU32,
    }

    impl ScoreStore for FlakyStore {
        fn insert_score(&self, _score: NewScoreEntity) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }

        fn ranked_scores(
            &self,
            _game: String,
            _limit: Option<u32>,
        ) -> BoxFuture<'static, StorageResult<Vec<RankedScoreEntity>>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn ensure_schema(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let failing = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
                .is_ok();
            Box::pin(async move {
                if failing {
                    Err(StorageError::unavailable(
                        "down".into(),
                        std::io::Error::other("connection refused"),
                    ))
                } else {
                    Ok(())
                }
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retries_with_capped_backoff_until_schema_exists() {
        let store = Arc::new(FlakyStore {
            failures_left: AtomicU32::new(5),
            calls: AtomicU32::new(0),
        });
        let started = tokio::time::Instant::now();

        let attempts = run_schema_supervisor(store.clone(), Backoff::default()).await;

        assert_eq!(attempts, 6);
        assert_eq!(store.calls.load(Ordering::SeqCst), 6);
        // 1s + 2s + 4s + 8s, then clamped to 10s before the sixth attempt.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(25), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(26), "{elapsed:?}");
    }

    #[test]
    fn default_backoff_doubles_from_one_to_ten_seconds() {
        let backoff = Backoff::default();
        assert_eq!(backoff.initial, Duration::from_secs(1));
        assert_eq!(backoff.max, Duration::from_secs(10));
    }
}
