//! Scheduling seam between the simulator and the timer it dwells on.

use std::time::Duration;

use async_trait::async_trait;

/// Source of the dwell suspension between node transitions.
///
/// The simulator never calls `tokio::time::sleep` directly; it goes through
/// this trait so tests can drive time deterministically (for example with a
/// paused tokio runtime, or a clock that resolves instantly).
#[async_trait]
pub trait SimulatorClock: Send + Sync {
    /// Suspend the calling task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Default clock backed by the tokio timer.
///
/// Under `#[tokio::test(start_paused = true)]` these sleeps auto-advance,
/// so simulator tests run in microseconds of wall time.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

#[async_trait]
impl SimulatorClock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
