use crate::results::AssetWeight;
use crate::transport::Transport;
use scraper::{Html, Selector};
use url::Url;

/// `src` of every `<img>` in document order
pub fn image_sources(document: &Html) -> Vec<String> {
    let selector = Selector::parse("img[src]").unwrap();
    document
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .map(|src| src.trim().to_string())
        .collect()
}

/// Sums the declared `Content-Length` of every image source
///
/// Each source gets one HEAD request. Sources that cannot be resolved,
/// requests that fail, non-2xx answers and missing headers are counted as
/// skipped and add nothing; this never fails.
pub async fn estimate_image_weight<T: Transport>(
    transport: &T,
    page_url: &Url,
    sources: &[String],
) -> AssetWeight {
    let mut weight = AssetWeight::default();

    for src in sources {
        let Some(url) = resolve_source(page_url, src) else {
            ::log::debug!("Skipping unresolvable image source {:?}", src);
            weight.skip();
            continue;
        };

        match transport.head(url.as_str()).await {
            Ok(response) if response.is_success() => match response.content_length() {
                Some(bytes) => weight.record(bytes),
                None => {
                    ::log::debug!("No content length declared for {}", url);
                    weight.skip();
                }
            },
            Ok(response) => {
                ::log::debug!("Image {} answered {}", url, response.status);
                weight.skip();
            }
            Err(e) => {
                ::log::debug!("Image {} failed: {}", url, e);
                weight.skip();
            }
        }
    }

    ::log::debug!(
        "Image weight for {}: {} bytes ({} measured, {} skipped)",
        page_url,
        weight.total_bytes,
        weight.measured,
        weight.skipped
    );

    weight
}

/// Resolves a source against the page URL; only http(s) targets qualify
fn resolve_source(page_url: &Url, src: &str) -> Option<Url> {
    if src.is_empty() {
        return None;
    }
    let url = page_url.join(src).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}
