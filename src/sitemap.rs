//! URL discovery from sitemap documents.

use crate::error::SitemapError;
use crate::transport::Transport;
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::{Deserialize, Serialize};

/// A page location listed in a sitemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub location: String,
    pub last_modified: Option<String>,
}

/// Fetches a sitemap and returns its entries in document order
pub async fn fetch_sitemap<T: Transport>(
    transport: &T,
    url: &str,
) -> Result<Vec<SitemapEntry>, SitemapError> {
    ::log::info!("Fetching sitemap {}", url);
    let response = transport.fetch_success(url).await?;
    let entries = parse_sitemap(&response.body)?;
    ::log::info!("Sitemap {} lists {} locations", url, entries.len());
    Ok(entries)
}

/// Parses a `urlset` or `sitemapindex` document
///
/// Elements are matched by local name, so any namespace prefix works.
/// Index entries are returned like page entries; they are not followed.
pub fn parse_sitemap(xml: &str) -> Result<Vec<SitemapEntry>, SitemapError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut in_entry = false;
    let mut current_tag = String::new();
    let mut location = String::new();
    let mut last_modified = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "url" | "sitemap" => {
                        in_entry = true;
                        location.clear();
                        last_modified.clear();
                    }
                    _ => current_tag = name,
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "url" | "sitemap" if in_entry => {
                        if !location.is_empty() {
                            entries.push(SitemapEntry {
                                location: location.clone(),
                                last_modified: (!last_modified.is_empty())
                                    .then(|| last_modified.clone()),
                            });
                        }
                        in_entry = false;
                    }
                    _ => current_tag.clear(),
                }
            }
            Ok(Event::Text(e)) if in_entry => {
                let text = e
                    .unescape()
                    .map_err(|err| SitemapError::Xml(err.to_string()))?;
                match current_tag.as_str() {
                    "loc" => location.push_str(text.trim()),
                    "lastmod" => last_modified.push_str(text.trim()),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SitemapError::Xml(format!(
                    "at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::transport::fake::FakeTransport;

    const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/trust/the-cost-of-living/</loc>
    <lastmod>2024-03-01</lastmod>
  </url>
  <url>
    <loc>https://example.com/trust/combating-fake-reviews?a=1&amp;b=2</loc>
  </url>
  <url>
    <lastmod>2024-01-01</lastmod>
  </url>
</urlset>"#;

    #[test]
    fn test_parse_urlset() {
        let entries = parse_sitemap(URLSET).unwrap();
        assert_eq!(
            entries,
            vec![
                SitemapEntry {
                    location: "https://example.com/trust/the-cost-of-living/".to_string(),
                    last_modified: Some("2024-03-01".to_string()),
                },
                SitemapEntry {
                    location: "https://example.com/trust/combating-fake-reviews?a=1&b=2"
                        .to_string(),
                    last_modified: None,
                },
            ]
        );
    }

    #[test]
    fn test_parse_sitemap_index() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <sitemap><loc>https://example.com/sitemap-1.xml</loc></sitemap>
            <sitemap><loc>https://example.com/sitemap-2.xml</loc><lastmod>2024-05-05</lastmod></sitemap>
        </sitemapindex>"#;
        let entries = parse_sitemap(xml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].location, "https://example.com/sitemap-1.xml");
        assert_eq!(entries[1].last_modified.as_deref(), Some("2024-05-05"));
    }

    #[test]
    fn test_prefixed_namespace() {
        let xml = r#"<ns:urlset xmlns:ns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <ns:url><ns:loc>https://example.com/a</ns:loc></ns:url>
        </ns:urlset>"#;
        let entries = parse_sitemap(xml).unwrap();
        assert_eq!(entries[0].location, "https://example.com/a");
    }

    #[test]
    fn test_malformed_xml() {
        let result = parse_sitemap("<urlset><url><loc>x</lo></url></urlset>");
        assert!(matches!(result, Err(SitemapError::Xml(_))));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_sitemap("").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_sitemap() {
        let transport = FakeTransport::new().page("https://example.com/sitemap.xml", 200, URLSET);
        let entries = fetch_sitemap(&transport, "https://example.com/sitemap.xml")
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);

        let result = fetch_sitemap(&transport, "https://example.com/missing.xml").await;
        assert!(matches!(
            result,
            Err(SitemapError::Transport(TransportError::Status(404)))
        ));
    }
}
