//! Chat orchestration for doctalk.
//!
//! The [`ChatOrchestrator`] coordinates one discrete user action at a time:
//! attaching an uploaded document (staged, extracted, cached) or running a
//! conversation turn against an [`InferenceBackend`]. It owns no state of its
//! own; sessions and the document cache are passed in.

/// Inference backends.
pub mod backends;
/// Inference endpoint configuration.
pub mod config;
/// The chat orchestrator.
pub mod orchestrator;

pub use backends::http::HttpInferenceClient;
pub use backends::InferenceBackend;
pub use config::InferenceConfig;
pub use orchestrator::{AttachedDocument, ChatOrchestrator};
