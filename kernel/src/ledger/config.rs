use std::time::Duration;

use destructure::Mutation;
use vodca::References;

/// Bounds on re-running compensations and stock restocks after a
/// transient storage failure.
#[derive(Debug, Clone, References, Mutation)]
pub struct RetryConfig {
    max_retry: u32,
    retry_delay: Duration,
}

impl RetryConfig {
    pub fn new(max_retry: u32, retry_delay: Duration) -> Self {
        Self {
            max_retry,
            retry_delay,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retry: 3,
            retry_delay: Duration::from_millis(50),
        }
    }
}

pub trait DependOnRetryConfig: Sync + Send + 'static {
    fn retry_config(&self) -> &RetryConfig;
}
