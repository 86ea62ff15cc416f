//! Citation Extractor: deduplicated, first-seen-ordered source locations.

use kbbot_llm::{Citation, ReferenceLocation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A distinct source a retrieval-augmented answer drew from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "location", rename_all = "snake_case")]
pub enum CitationLocation {
    /// Storage-object URI (e.g. `s3://bucket/key`)
    StorageObject(String),
    /// Web page URL
    Web(String),
}

impl CitationLocation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::StorageObject(uri) => uri,
            Self::Web(url) => url,
        }
    }
}

impl fmt::Display for CitationLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collect the distinct locations referenced by raw citation records.
///
/// Records are walked in response order and references in record order;
/// each location string is emitted once, at its first occurrence.
pub fn extract_citations(citations: &[Citation]) -> Vec<CitationLocation> {
    let mut seen = HashSet::new();
    let mut locations = Vec::new();

    for citation in citations {
        for reference in citation.references() {
            let Some(location) = reference.location.as_ref() else {
                continue;
            };

            for candidate in classify(location) {
                if seen.insert(candidate.as_str().to_string()) {
                    locations.push(candidate);
                }
            }
        }
    }

    tracing::debug!(
        "Extracted {} distinct locations from {} citations",
        locations.len(),
        citations.len()
    );

    locations
}

/// Classify a location by which field is populated.
fn classify(location: &ReferenceLocation) -> Vec<CitationLocation> {
    let mut found = Vec::with_capacity(1);

    if let Some(uri) = location
        .s3_location
        .as_ref()
        .and_then(|s3| s3.uri.as_deref())
        .filter(|uri| !uri.is_empty())
    {
        found.push(CitationLocation::StorageObject(uri.to_string()));
    }

    if let Some(url) = location
        .web_location
        .as_ref()
        .and_then(|web| web.url.as_deref())
        .filter(|url| !url.is_empty())
    {
        found.push(CitationLocation::Web(url.to_string()));
    }

    found
}
