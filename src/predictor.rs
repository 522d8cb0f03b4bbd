//! Pluggable prediction capability.
//!
//! The risk model and the text-completion model are consumed as opaque
//! scoring functions. Abstracting them behind one trait keeps the
//! pipeline testable with deterministic stubs instead of loading real
//! model weights.

use anyhow::Result;
use async_trait::async_trait;

/// An opaque model that maps an input to an output, possibly over the
/// network. Implementations must be stateless after construction and
/// safe for concurrent reuse.
#[async_trait]
pub trait Predictor<In, Out>: Send + Sync
where
    In: Send + 'static,
{
    async fn predict(&self, input: In) -> Result<Out>;
}
