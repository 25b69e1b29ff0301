/// HTTP inference backend.
pub mod http;

use async_trait::async_trait;
use doctalk_core::{DoctalkResult, Fragment};

/// Trait for inference backends.
///
/// The remote service is opaque to doctalk: one prompt plus the document
/// context goes in, one reply comes out. Implementations map transport and
/// payload failures to [`doctalk_core::DoctalkError::Inference`].
///
/// To add a new backend:
/// 1. Create a new module in `backends/`
/// 2. Implement `InferenceBackend` for your struct
/// 3. Wire it up where the orchestrator is built
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Single non-streaming completion: full request in, full reply out.
    async fn complete(&self, prompt: &str, context: &[Fragment]) -> DoctalkResult<String>;
}
