use crate::config::CompareConfig;
use crate::error::TransportError;
use std::time::Duration;
use url::Url;

/// Response to a GET request
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Final URL after redirects
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Response to a HEAD request
#[derive(Debug, Clone)]
pub struct HeadResponse {
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl HeadResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Declared `Content-Length`, if present and numeric
    pub fn content_length(&self) -> Option<u64> {
        self.header("content-length")?.trim().parse().ok()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Fetch capability the analysis pipeline runs on
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// GET a resource; any HTTP status is returned as a response
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError>;

    /// HEAD a resource; any HTTP status is returned as a response
    async fn head(&self, url: &str) -> Result<HeadResponse, TransportError>;

    /// GET a resource, treating non-2xx statuses as failures
    async fn fetch_success(&self, url: &str) -> Result<FetchResponse, TransportError> {
        let response = self.fetch(url).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(TransportError::Status(response.status))
        }
    }
}

/// Transport over a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client honoring the configured timeout, redirects and user agent
    pub fn new(config: &CompareConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client })
    }
}

fn parse_url(url: &str) -> Result<Url, TransportError> {
    Url::parse(url).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", url, e)))
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError> {
        ::log::trace!("GET {}", url);
        let response = self.client.get(parse_url(url)?).send().await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = collect_headers(response.headers());
        let body = response.text().await?;

        ::log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(FetchResponse {
            url: final_url,
            status,
            headers,
            body,
        })
    }

    async fn head(&self, url: &str) -> Result<HeadResponse, TransportError> {
        ::log::trace!("HEAD {}", url);
        let response = self.client.head(parse_url(url)?).send().await?;

        let status = response.status().as_u16();
        ::log::debug!("HEAD {} -> {}", url, status);

        Ok(HeadResponse {
            url: response.url().to_string(),
            status,
            headers: collect_headers(response.headers()),
        })
    }
}
