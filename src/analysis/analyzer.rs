use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, warn};

use super::model::{AnalyzedFood, ApiKey, ImageUpload};
use crate::config::AnalysisConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("analysis timed out after {0:?}")]
    Timeout(Duration),
    #[error("analysis service error: {0}")]
    Service(String),
    #[error("credential rejected by analysis service")]
    Unauthorized,
    #[error("invalid analysis payload: {0}")]
    InvalidPayload(String),
}

impl AnalyzerError {
    fn is_retryable(&self) -> bool {
        matches!(self, AnalyzerError::Timeout(_) | AnalyzerError::Service(_))
    }
}

/// Turns a food photo into a nutrition estimate.
#[async_trait]
pub trait FoodAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        image: &ImageUpload,
        credential: &ApiKey,
    ) -> Result<AnalyzedFood, AnalyzerError>;
}

/// Waits a fixed delay, then answers with the same estimate every time.
#[derive(Debug, Clone)]
pub struct StubAnalyzer {
    delay: Duration,
}

impl StubAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl FoodAnalyzer for StubAnalyzer {
    async fn analyze(
        &self,
        image: &ImageUpload,
        _credential: &ApiKey,
    ) -> Result<AnalyzedFood, AnalyzerError> {
        debug!(size = image.body.len(), content_type = %image.content_type, "stub analysis");
        tokio::time::sleep(self.delay).await;
        Ok(AnalyzedFood::grilled_salmon())
    }
}

/// Calls the analyzer with a per-attempt timeout, retrying transient failures
/// with exponential backoff.
pub async fn analyze_with_retry(
    analyzer: &dyn FoodAnalyzer,
    image: &ImageUpload,
    credential: &ApiKey,
    cfg: &AnalysisConfig,
) -> AppResult<AnalyzedFood> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let result = match tokio::time::timeout(cfg.timeout(), analyzer.analyze(image, credential)).await
        {
            Ok(r) => r,
            Err(_) => Err(AnalyzerError::Timeout(cfg.timeout())),
        };

        match result.and_then(|food| food.validate().map(|_| food)) {
            Ok(food) => return Ok(food),
            Err(e) if e.is_retryable() && attempt < cfg.max_attempts => {
                let delay = backoff_delay(cfg.backoff(), attempt);
                warn!(error = %e, attempt, ?delay, "analysis attempt failed; retrying");
                tokio::time::sleep(delay).await;
            }
            Err(e) if e.is_retryable() => {
                warn!(error = %e, attempt, "analysis retries exhausted");
                return Err(AppError::AnalysisUnavailable { attempts: attempt });
            }
            Err(e) => return Err(AppError::Analysis(e.to_string())),
        }
    }
}

fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let exp = base.saturating_mul(1 << (attempt - 1).min(16));
    let jitter_ms = base.as_millis() as u64 / 2;
    let jitter = if jitter_ms == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..=jitter_ms)
    };
    exp + Duration::from_millis(jitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` calls with the given error kind.
    struct FlakyAnalyzer {
        failures: u32,
        calls: AtomicU32,
        unauthorized: bool,
    }

    #[async_trait]
    impl FoodAnalyzer for FlakyAnalyzer {
        async fn analyze(
            &self,
            _image: &ImageUpload,
            _credential: &ApiKey,
        ) -> Result<AnalyzedFood, AnalyzerError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unauthorized {
                return Err(AnalyzerError::Unauthorized);
            }
            if n < self.failures {
                return Err(AnalyzerError::Service("upstream 503".into()));
            }
            Ok(AnalyzedFood::grilled_salmon())
        }
    }

    fn cfg(max_attempts: u32) -> AnalysisConfig {
        AnalysisConfig {
            delay_ms: 0,
            timeout_ms: 1_000,
            max_attempts,
            backoff_ms: 0,
        }
    }

    fn image() -> ImageUpload {
        ImageUpload::new(Bytes::from_static(b"jpeg"), "image/jpeg", None).unwrap()
    }

    #[tokio::test]
    async fn stub_returns_fixed_estimate() {
        let stub = StubAnalyzer::new(Duration::ZERO);
        let food = analyze_with_retry(&stub, &image(), &ApiKey::new("k"), &cfg(1))
            .await
            .unwrap();
        assert_eq!(food, AnalyzedFood::grilled_salmon());
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let flaky = FlakyAnalyzer {
            failures: 2,
            calls: AtomicU32::new(0),
            unauthorized: false,
        };
        let food = analyze_with_retry(&flaky, &image(), &ApiKey::new("k"), &cfg(3))
            .await
            .unwrap();
        assert_eq!(food.name, "Grilled salmon with vegetables");
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_retries_report_unavailable() {
        let flaky = FlakyAnalyzer {
            failures: 10,
            calls: AtomicU32::new(0),
            unauthorized: false,
        };
        let err = analyze_with_retry(&flaky, &image(), &ApiKey::new("k"), &cfg(2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AnalysisUnavailable { attempts: 2 }));
    }

    #[tokio::test]
    async fn permanent_failures_are_not_retried() {
        let flaky = FlakyAnalyzer {
            failures: 0,
            calls: AtomicU32::new(0),
            unauthorized: true,
        };
        let err = analyze_with_retry(&flaky, &image(), &ApiKey::new("k"), &cfg(3))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Analysis(_)));
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_analyzer_times_out() {
        let slow = StubAnalyzer::new(Duration::from_secs(60));
        let err = analyze_with_retry(&slow, &image(), &ApiKey::new("k"), &cfg(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AnalysisUnavailable { attempts: 1 }));
    }

    #[test]
    fn backoff_grows_exponentially() {
        let base = Duration::from_millis(100);
        let first = backoff_delay(base, 1);
        let third = backoff_delay(base, 3);
        assert!(first >= base && first <= base + base / 2);
        assert!(third >= base * 4 && third <= base * 4 + base / 2);
    }
}
