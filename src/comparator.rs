use crate::analyzer::PageAnalyzer;
use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::parsers::{StopwordSet, TextNormalizer};
use crate::results::{ComparisonRecord, ComparisonStatus, Flag, PageReport, SkippedUrl};
use crate::similarity::similarity_matrix;
use crate::transport::Transport;

/// Splits a comma- or newline-delimited URL list, trimming every entry
pub fn parse_url_list(input: &str) -> Vec<String> {
    input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// Analyzes a set of pages and scores their textual similarity
pub struct Comparator<T: Transport> {
    transport: T,
    config: CompareConfig,
    normalizer: TextNormalizer,
}

impl<T: Transport> Comparator<T> {
    /// Create a comparator using the English stopwords plus any configured extras
    pub fn new(transport: T, config: CompareConfig) -> Self {
        let stopwords = StopwordSet::english().with_extra(&config.extra_stopwords);
        Self {
            transport,
            config,
            normalizer: TextNormalizer::new(stopwords),
        }
    }

    /// Compares the pages of a delimited URL list
    pub async fn compare_list(&self, input: &str) -> Result<ComparisonRecord, CompareError> {
        self.compare(&parse_url_list(input)).await
    }

    /// Compares `urls`, one page at a time in input order
    ///
    /// Pages that fail to fetch are skipped and listed in the record. With a
    /// single surviving page the record is marked as having insufficient
    /// pages and carries no similarity. Hard failures are an empty input, no
    /// page analyzed at all, or a corpus without any vocabulary.
    pub async fn compare<S: AsRef<str>>(
        &self,
        urls: &[S],
    ) -> Result<ComparisonRecord, CompareError> {
        if urls.is_empty() {
            return Err(CompareError::EmptyInput);
        }

        let analyzer = PageAnalyzer::new(&self.transport, &self.config, &self.normalizer);
        let mut pages: Vec<PageReport> = Vec::with_capacity(urls.len());
        let mut skipped = Vec::new();

        for url in urls {
            let url = url.as_ref().trim();
            match analyzer.analyze(url).await {
                Ok(report) => pages.push(report),
                Err(e) => {
                    ::log::warn!("Skipping {}: {}", url, e);
                    skipped.push(SkippedUrl {
                        url: url.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if pages.is_empty() {
            return Err(CompareError::NoPagesAnalyzed(urls.len()));
        }

        if pages.len() < 2 {
            ::log::warn!(
                "Only {} of {} pages analyzed, similarity needs at least two",
                pages.len(),
                urls.len()
            );
            return Ok(ComparisonRecord {
                pages,
                skipped,
                status: ComparisonStatus::InsufficientPages,
                similarity: None,
            });
        }

        let texts: Vec<&str> = pages
            .iter()
            .map(|page| page.features.normalized_text())
            .collect();
        let matrix = similarity_matrix(&texts)?;

        for (i, page) in pages.iter_mut().enumerate() {
            page.duplicate_content = Some(Flag::from(matrix.get(i, i) != 1.0));
        }

        ::log::info!("Compared {} pages", pages.len());

        Ok(ComparisonRecord {
            pages,
            skipped,
            status: ComparisonStatus::Complete,
            similarity: Some(matrix),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimilarityError;
    use crate::transport::fake::FakeTransport;

    const ARTICLE: &str = r#"<html><head><title>Cost of living</title></head>
        <body><h1>Cost of living</h1><p>Prices for groceries and energy keep rising.</p>
        <a href="/trust">Trust</a></body></html>"#;

    const OTHER_ARTICLE: &str = r#"<html><head><title>Fake reviews</title></head>
        <body><h1>Combating fake reviews</h1><p>Detection models flag suspicious reviews
        before they are published.</p></body></html>"#;

    fn comparator(transport: FakeTransport) -> Comparator<FakeTransport> {
        let config = CompareConfig {
            measure_latency: false,
            ..CompareConfig::default()
        };
        Comparator::new(transport, config)
    }

    #[test]
    fn test_parse_url_list() {
        assert_eq!(
            parse_url_list(" https://a.com/x , https://b.com/y,,\nhttps://c.com/z \n"),
            vec!["https://a.com/x", "https://b.com/y", "https://c.com/z"]
        );
        assert!(parse_url_list(" , \n ").is_empty());
    }

    #[tokio::test]
    async fn test_identical_pages_are_fully_similar() {
        let transport = FakeTransport::new()
            .page("https://a.example/post", 200, ARTICLE)
            .page("https://b.example/post", 200, ARTICLE);

        let record = comparator(transport)
            .compare_list("https://a.example/post, https://b.example/post")
            .await
            .unwrap();

        assert!(record.is_complete());
        assert_eq!(record.pages.len(), 2);
        assert_eq!(
            record.pages[0].features.normalized_text(),
            record.pages[1].features.normalized_text()
        );
        assert_eq!(record.similarity_percentage(), Some(100.0));
        for page in &record.pages {
            assert_eq!(page.duplicate_content, Some(Flag::No));
        }
    }

    #[tokio::test]
    async fn test_different_pages() {
        let transport = FakeTransport::new()
            .page("https://a.example/post", 200, ARTICLE)
            .page("https://b.example/post", 200, OTHER_ARTICLE);

        let record = comparator(transport)
            .compare(&["https://a.example/post", "https://b.example/post"])
            .await
            .unwrap();

        let percentage = record.similarity_percentage().unwrap();
        assert!((0.0..100.0).contains(&percentage), "got {}", percentage);
        assert_eq!(record.pages[0].url, "https://a.example/post");
        assert_eq!(record.pages[1].url, "https://b.example/post");
    }

    #[tokio::test]
    async fn test_single_url_is_insufficient() {
        let transport = FakeTransport::new()
            .page("https://a.example/post", 200, ARTICLE)
            .page("https://a.example/robots.txt", 200, "");

        let record = comparator(transport)
            .compare(&["https://a.example/post"])
            .await
            .unwrap();

        assert_eq!(record.status, ComparisonStatus::InsufficientPages);
        assert!(record.similarity.is_none());
        assert!(record.similarity_percentage().is_none());
        assert_eq!(record.pages.len(), 1);

        let page = &record.pages[0];
        assert_eq!(page.features.title, "Cost of living");
        assert_eq!(page.internal_link_count, 1);
        assert_eq!(page.robots_status, crate::results::RobotsStatus::Reachable);
        assert!(page.duplicate_content.is_none());
    }

    #[tokio::test]
    async fn test_failed_url_is_skipped() {
        let transport = FakeTransport::new()
            .page("https://a.example/post", 200, ARTICLE)
            .page("https://b.example/post", 500, "Internal Server Error");

        let record = comparator(transport)
            .compare(&["https://a.example/post", "https://b.example/post"])
            .await
            .unwrap();

        assert_eq!(record.status, ComparisonStatus::InsufficientPages);
        assert_eq!(record.pages.len(), 1);
        assert_eq!(record.pages[0].url, "https://a.example/post");
        assert_eq!(record.skipped.len(), 1);
        assert_eq!(record.skipped[0].url, "https://b.example/post");
        assert!(record.skipped[0].reason.contains("500"));
    }

    #[tokio::test]
    async fn test_three_pages_produce_matrix() {
        let transport = FakeTransport::new()
            .page("https://a.example/1", 200, ARTICLE)
            .page("https://a.example/2", 200, OTHER_ARTICLE)
            .page("https://a.example/3", 200, ARTICLE);

        let record = comparator(transport)
            .compare(&["https://a.example/1", "https://a.example/2", "https://a.example/3"])
            .await
            .unwrap();

        let matrix = record.similarity.as_ref().unwrap();
        assert_eq!(matrix.len(), 3);
        assert!((matrix.get(0, 2) - 1.0).abs() < 1e-9);
        assert!(matrix.get(0, 1) < matrix.get(0, 2));
        assert!(record.similarity_percentage().is_none());
    }

    #[tokio::test]
    async fn test_all_stopword_pages_are_degenerate() {
        let body = "<html><body><p>The and of it is a</p></body></html>";
        let transport = FakeTransport::new()
            .page("https://a.example/1", 200, body)
            .page("https://a.example/2", 200, body);

        let result = comparator(transport)
            .compare(&["https://a.example/1", "https://a.example/2"])
            .await;

        assert!(matches!(
            result,
            Err(CompareError::Similarity(SimilarityError::DegenerateCorpus))
        ));
    }

    #[tokio::test]
    async fn test_every_url_failing_is_hard_failure() {
        let result = comparator(FakeTransport::new())
            .compare(&["https://a.example/1", "https://a.example/2"])
            .await;
        assert!(matches!(result, Err(CompareError::NoPagesAnalyzed(2))));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let result = comparator(FakeTransport::new()).compare_list(" , ").await;
        assert!(matches!(result, Err(CompareError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_extra_stopwords_from_config() {
        let transport = FakeTransport::new()
            .page("https://a.example/1", 200, "<body><p>acme rockets</p></body>")
            .page("https://a.example/2", 200, "<body><p>acme anvils</p></body>");
        let config = CompareConfig {
            measure_latency: false,
            check_images: false,
            extra_stopwords: vec!["ACME".to_string()],
            ..CompareConfig::default()
        };

        let record = Comparator::new(transport, config)
            .compare(&["https://a.example/1", "https://a.example/2"])
            .await
            .unwrap();

        assert_eq!(record.pages[0].features.normalized_text(), "rockets");
        assert_eq!(record.similarity_percentage(), Some(0.0));
    }
}
