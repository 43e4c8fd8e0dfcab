use async_trait::async_trait;

/// Cooperative suspension point honored by the long-running batch loops.
///
/// The generator and the fallback emitter call [`Pacer::breathe`] once per
/// batch so the host scheduler can interleave other work between batches.
/// Yielding is the only concession to fairness these loops make; nothing
/// else about them is incremental.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn breathe(&self);
}

/// Yields to the tokio scheduler at every batch boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerYield;

#[async_trait]
impl Pacer for SchedulerYield {
    async fn breathe(&self) {
        tokio::task::yield_now().await;
    }
}

/// No-op pacer for callers without a scheduler to cooperate with.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced;

#[async_trait]
impl Pacer for Unpaced {
    async fn breathe(&self) {}
}
