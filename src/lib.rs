// Re-export modules
pub mod analyzer;
pub mod checks;
pub mod comparator;
pub mod config;
pub mod error;
pub mod links;
pub mod parsers;
pub mod report;
pub mod results;
pub mod similarity;
pub mod sitemap;
pub mod transport;
pub mod utils;

// Re-export commonly used types for convenience
pub use comparator::{Comparator, parse_url_list};
pub use config::{CompareConfig, LinkResolution};
pub use error::{AnalyzeError, CompareError, SimilarityError, TransportError};
pub use results::{ComparisonRecord, ComparisonStatus, PageFeatures, PageReport};
pub use transport::{HttpTransport, Transport};

/// Compares the pages of a comma-separated URL list
///
/// Convenience wrapper around [`Comparator`] for callers that only need a
/// single run.
pub async fn compare_pages<T: Transport>(
    transport: T,
    config: CompareConfig,
    url_list: &str,
) -> Result<ComparisonRecord, CompareError> {
    Comparator::new(transport, config)
        .compare_list(url_list)
        .await
}
