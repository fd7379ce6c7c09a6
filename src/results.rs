use crate::parsers::TextNormalizer;
use crate::similarity::SimilarityMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Features extracted from one fetched page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFeatures {
    /// Text of the first title element
    pub title: String,

    /// Content of the description meta element
    pub meta_description: String,

    /// Text of every level-1 heading, in document order
    pub headings: Vec<String>,

    /// Visible text, whitespace-joined
    pub raw_text: String,

    /// `raw_text` without stopwords
    normalized_text: String,
}

impl PageFeatures {
    /// Create a feature set, deriving the normalized text from `raw_text`
    pub fn new(
        title: String,
        meta_description: String,
        headings: Vec<String>,
        raw_text: String,
        normalizer: &TextNormalizer,
    ) -> Self {
        let normalized_text = normalizer.normalize(&raw_text);
        Self {
            title,
            meta_description,
            headings,
            raw_text,
            normalized_text,
        }
    }

    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }
}

/// Whether the robots policy resource could be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotsStatus {
    Reachable,
    Unreachable,
}

impl fmt::Display for RobotsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobotsStatus::Reachable => write!(f, "OK"),
            RobotsStatus::Unreachable => write!(f, "Error"),
        }
    }
}

/// Yes/No marker used by the per-page heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    No,
    Yes,
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value { Flag::Yes } else { Flag::No }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::No => write!(f, "No"),
            Flag::Yes => write!(f, "Yes"),
        }
    }
}

/// Best-effort image payload total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetWeight {
    /// Sum of every declared Content-Length
    pub total_bytes: u64,

    /// Images whose size was read
    pub measured: usize,

    /// Images that contributed nothing (bad URL, failed request, no header)
    pub skipped: usize,
}

impl AssetWeight {
    /// Adds one image with a declared size
    pub fn record(&mut self, bytes: u64) {
        self.total_bytes = self.total_bytes.saturating_add(bytes);
        self.measured += 1;
    }

    /// Counts one image that could not be sized
    pub fn skip(&mut self) {
        self.skipped += 1;
    }
}

/// Everything measured for a single URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    /// URL as given, trimmed
    pub url: String,

    #[serde(flatten)]
    pub features: PageFeatures,

    pub robots_status: RobotsStatus,

    /// Yes when the markup has zero or several `<html>` elements
    pub code_error: Flag,

    pub internal_link_count: usize,

    pub image_weight: AssetWeight,

    pub load_time_seconds: f64,

    /// Filled in by the comparator once similarity is known
    pub duplicate_content: Option<Flag>,
}

/// Outcome of a comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonStatus {
    /// Similarity was computed over every analyzed page
    Complete,
    /// Fewer than two pages could be analyzed; no similarity score
    InsufficientPages,
}

/// A URL dropped from the comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedUrl {
    pub url: String,
    pub reason: String,
}

/// Per-page reports plus the similarity across them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub pages: Vec<PageReport>,
    pub skipped: Vec<SkippedUrl>,
    pub status: ComparisonStatus,
    pub similarity: Option<SimilarityMatrix>,
}

impl ComparisonRecord {
    /// Similarity of the two pages as a percentage, two decimals
    ///
    /// Only defined when exactly two pages were analyzed.
    pub fn similarity_percentage(&self) -> Option<f64> {
        let matrix = self.similarity.as_ref()?;
        if matrix.len() != 2 {
            return None;
        }
        Some(crate::utils::round2(matrix.get(0, 1) * 100.0))
    }

    pub fn is_complete(&self) -> bool {
        self.status == ComparisonStatus::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_derive_normalized_text() {
        let features = PageFeatures::new(
            String::new(),
            String::new(),
            Vec::new(),
            "The quick fox and the lazy dog".to_string(),
            &TextNormalizer::english(),
        );
        assert_eq!(features.normalized_text(), "quick fox lazy dog");
    }

    #[test]
    fn test_asset_weight_accumulator() {
        let mut weight = AssetWeight::default();
        weight.record(100);
        weight.skip();
        weight.record(50);
        assert_eq!(weight.total_bytes, 150);
        assert_eq!(weight.measured, 2);
        assert_eq!(weight.skipped, 1);
    }

    #[test]
    fn test_flag_display() {
        assert_eq!(Flag::from(true).to_string(), "Yes");
        assert_eq!(Flag::from(false).to_string(), "No");
        assert_eq!(RobotsStatus::Reachable.to_string(), "OK");
        assert_eq!(RobotsStatus::Unreachable.to_string(), "Error");
    }
}
