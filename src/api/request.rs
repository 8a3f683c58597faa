//! Request types for the shift report API.

use serde::{Deserialize, Serialize};

/// Default document name when a request does not supply one.
pub(crate) const UNNAMED_DOCUMENT: &str = "upload";

/// `?document=` query parameter naming the source document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentQuery {
    /// Source document identifier, usually the original file name.
    #[serde(default)]
    pub document: Option<String>,
}

impl DocumentQuery {
    /// The document name, or a placeholder when none was given.
    pub fn name(&self) -> &str {
        self.document.as_deref().unwrap_or(UNNAMED_DOCUMENT)
    }
}

/// Request body for `POST /import`: already-extracted report lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Source document identifier.
    pub document: String,
    /// Report lines in page order.
    pub lines: Vec<String>,
}
