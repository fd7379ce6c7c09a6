use thiserror::Error;

/// Errors raised by a [`Transport`](crate::transport::Transport) request
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors raised by the similarity engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimilarityError {
    /// No document contributed a single term to the vocabulary
    #[error("empty vocabulary: every document is empty after normalization")]
    DegenerateCorpus,

    #[error("similarity needs at least two documents, got {0}")]
    TooFewDocuments(usize),
}

/// Errors raised while analyzing a single page
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to fetch {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("invalid page URL: {0}")]
    InvalidUrl(String),
}

/// Hard failures of a comparison run
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("no URLs to compare")]
    EmptyInput,

    #[error("none of the {0} URLs could be analyzed")]
    NoPagesAnalyzed(usize),

    #[error("similarity computation failed: {0}")]
    Similarity(#[from] SimilarityError),
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while discovering URLs from a sitemap
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("failed to fetch sitemap: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed sitemap XML: {0}")]
    Xml(String),
}
