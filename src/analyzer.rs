use crate::checks::{check_robots, estimate_image_weight, image_sources, measure_load_time};
use crate::config::CompareConfig;
use crate::error::AnalyzeError;
use crate::links::LinkCounter;
use crate::parsers::{self, TextNormalizer};
use crate::results::{AssetWeight, Flag, PageReport};
use crate::transport::Transport;
use crate::utils::origin_of;
use url::Url;

/// Runs every per-page check for one URL
pub struct PageAnalyzer<'a, T: Transport> {
    transport: &'a T,
    config: &'a CompareConfig,
    normalizer: &'a TextNormalizer,
}

impl<'a, T: Transport> PageAnalyzer<'a, T> {
    pub fn new(
        transport: &'a T,
        config: &'a CompareConfig,
        normalizer: &'a TextNormalizer,
    ) -> Self {
        Self {
            transport,
            config,
            normalizer,
        }
    }

    /// Fetches `url` and builds its report
    ///
    /// Content, code-error and link checks share the fetched document. Robots,
    /// images and latency issue their own requests. Fails only when the page
    /// itself cannot be fetched with a success status.
    pub async fn analyze(&self, url: &str) -> Result<PageReport, AnalyzeError> {
        let url = url.trim();
        let page_url =
            Url::parse(url).map_err(|e| AnalyzeError::InvalidUrl(format!("{}: {}", url, e)))?;

        ::log::info!("Analyzing {}", url);

        let response = self
            .transport
            .fetch_success(page_url.as_str())
            .await
            .map_err(|source| AnalyzeError::FetchFailed {
                url: url.to_string(),
                source,
            })?;

        // The parsed DOM is dropped before any further request is made
        let (features, code_error, internal_link_count, sources) = {
            let page = parsers::parse(&response.body);
            let links = LinkCounter::new(&page_url, self.config.link_resolution);
            (
                page.features(self.normalizer),
                Flag::from(page.html_element_count() != 1),
                links.count_internal(page.document()),
                image_sources(page.document()),
            )
        };

        let origin = origin_of(&page_url);
        let robots_status = check_robots(self.transport, &origin, &self.config.robots_path).await;

        let image_weight = if self.config.check_images {
            estimate_image_weight(self.transport, &page_url, &sources).await
        } else {
            AssetWeight::default()
        };

        let load_time_seconds = if self.config.measure_latency {
            measure_load_time(self.transport, page_url.as_str()).await
        } else {
            0.0
        };

        ::log::info!(
            "Analyzed {}: {} internal links, {} image bytes, {:.2}s",
            url,
            internal_link_count,
            image_weight.total_bytes,
            load_time_seconds
        );

        Ok(PageReport {
            url: url.to_string(),
            features,
            robots_status,
            code_error,
            internal_link_count,
            image_weight,
            load_time_seconds,
            duplicate_content: None,
        })
    }
}
