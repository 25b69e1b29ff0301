//! Extracted document fragments.
//!
//! These types live in `doctalk-core` so that both `doctalk-extract` (which
//! produces fragments) and `doctalk-chat` (which ships them as inference
//! context) can share them without circular deps.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The immutable result of extracting one upload, shared between the cache
/// and every conversation turn that uses it as context.
pub type DocumentFragments = Arc<Vec<Fragment>>;

/// One unit of text extracted from a document (typically a single page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// The extracted text.
    pub text: String,
    /// File name of the document this fragment came from.
    pub source: String,
    /// Position of this fragment within the extraction, starting at 0.
    pub index: usize,
}

impl Fragment {
    /// Creates a new fragment.
    pub fn new(text: impl Into<String>, source: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            index,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_preserves_text_and_order() {
        let fragments = vec![
            Fragment::new("Intro text", "report.pdf", 0),
            Fragment::new("Second page", "report.pdf", 1),
        ];

        assert_eq!(fragments[0].text, "Intro text");
        assert_eq!(fragments[1].index, 1);
    }

    #[test]
    fn test_fragment_serializes_all_fields() {
        let fragment = Fragment::new("body", "doc.pdf", 3);
        let json = serde_json::to_value(&fragment).unwrap();

        assert_eq!(json["text"], "body");
        assert_eq!(json["source"], "doc.pdf");
        assert_eq!(json["index"], 3);
    }
}
