use crate::config::LinkResolution;
use crate::utils::origin_of;
use scraper::{Html, Selector};
use url::Url;

/// Counts anchors that stay within the page's own origin
#[derive(Debug, Clone)]
pub struct LinkCounter {
    page_url: Url,
    origin: String,
    resolution: LinkResolution,
}

impl LinkCounter {
    pub fn new(page_url: &Url, resolution: LinkResolution) -> Self {
        Self {
            page_url: page_url.clone(),
            origin: origin_of(page_url),
            resolution,
        }
    }

    /// Turns an href into an absolute URL, if the resolution mode allows it
    ///
    /// In root-relative mode `/path` is prefixed with the origin, `//host/path`
    /// takes the page scheme and absolute hrefs pass through; `page.html`,
    /// `#top` and the like are not resolved.
    pub fn resolve(&self, href: &str) -> Option<Url> {
        let href = href.trim();
        match self.resolution {
            LinkResolution::RootRelative => {
                if href.starts_with("//") {
                    Url::parse(&format!("{}:{}", self.page_url.scheme(), href)).ok()
                } else if href.starts_with('/') {
                    Url::parse(&format!("{}{}", self.origin, href)).ok()
                } else {
                    Url::parse(href).ok()
                }
            }
            LinkResolution::Full => self.page_url.join(href).ok(),
        }
    }

    /// Whether an absolute URL shares the page origin
    pub fn is_internal(&self, url: &Url) -> bool {
        origin_of(url) == self.origin
    }

    /// Number of `a[href]` elements resolving to the page origin
    pub fn count_internal(&self, document: &Html) -> usize {
        let selector = Selector::parse("a[href]").unwrap();
        let count = document
            .select(&selector)
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| self.resolve(href))
            .filter(|url| self.is_internal(url))
            .count();

        ::log::debug!("Found {} internal links on {}", count, self.page_url);
        count
    }
}
