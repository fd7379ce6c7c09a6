use crate::parsers::stopwords::StopwordSet;

/// Removes stopwords from free text ahead of similarity scoring
///
/// The stopword set is fixed when the normalizer is built, so the same
/// normalizer always produces the same output for the same input:
/// - Text is split on any whitespace
/// - Tokens whose lowercase form is a stopword are dropped
/// - Remaining tokens are joined with single spaces, order preserved
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: StopwordSet,
}

impl TextNormalizer {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    /// Normalizer using the built-in English stopwords
    pub fn english() -> Self {
        Self::new(StopwordSet::english())
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Drops stopwords from `text`
    pub fn normalize(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|word| !self.stopwords.contains(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::english()
    }
}

/// Collapses every run of whitespace into a single space and trims the ends
pub fn collapse_whitespace(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Joins text fragments with spaces and collapses the result
pub fn join_fragments<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    fragments
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
