//! Shared state handed to every request handler

use std::sync::Arc;

use codebox_core::Runner;
use tokio::sync::Semaphore;

/// State cloned into each handler: the selected execution backend and the
/// deployment-wide concurrency cap.
#[derive(Clone)]
pub struct GatewayState {
    pub runner: Arc<dyn Runner>,
    pub limiter: Arc<Semaphore>,
}

impl GatewayState {
    pub fn new(runner: Arc<dyn Runner>, max_concurrent_executions: usize) -> Self {
        Self {
            runner,
            limiter: Arc::new(Semaphore::new(max_concurrent_executions)),
        }
    }
}
