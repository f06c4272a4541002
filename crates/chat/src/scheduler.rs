use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;

pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(1_500);

/// Source of the "thinking" pause before a reply is emitted.
pub trait ResponseDelay: Send + Sync {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Waits on the tokio timer, so paused-clock tests control it too.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl ResponseDelay for TokioDelay {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed()
    }
}

/// Runs reply emissions after a fixed delay on the tokio runtime.
///
/// The delay does not depend on the reply. Scheduled emissions are never
/// cancelled.
#[derive(Clone)]
pub struct ReplyScheduler {
    delay: Duration,
    clock: Arc<dyn ResponseDelay>,
}

impl Default for ReplyScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_RESPONSE_DELAY)
    }
}

impl ReplyScheduler {
    pub fn new(delay: Duration) -> Self {
        Self::with_clock(delay, Arc::new(TokioDelay))
    }

    pub fn with_clock(delay: Duration, clock: Arc<dyn ResponseDelay>) -> Self {
        Self { delay, clock }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Spawns `emit` to run once the delay has elapsed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, emit: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let wait = self.clock.sleep(self.delay);
        tokio::spawn(async move {
            wait.await;
            emit.await
        })
    }
}
