//! Document text extraction for doctalk.
//!
//! Extraction is a collaborator: callers stage uploaded files in a directory
//! and hand it to a [`DocumentExtractor`], which returns the ordered
//! [`Fragment`]s found there. The rest of the system never parses document
//! bytes itself.

/// PDF extraction backed by the `pdf-extract` crate.
pub mod pdf;

pub use pdf::PdfTextExtractor;

use async_trait::async_trait;
use doctalk_core::{DoctalkResult, Fragment};
use std::path::Path;

/// Trait for document extraction backends.
///
/// Each supported format implements this trait to turn staged files into
/// text fragments.
///
/// To add a new format:
/// 1. Create a new module in this crate
/// 2. Implement `DocumentExtractor` for your struct
/// 3. Wire it up where the orchestrator is built
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extracts ordered text fragments from the documents under `dir`.
    ///
    /// The directory is walked recursively; files the backend does not
    /// recognize are ignored. Finding no recognizable document at all is an
    /// extraction error, not an empty result.
    async fn extract(&self, dir: &Path) -> DoctalkResult<Vec<Fragment>>;
}
