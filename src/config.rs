use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How anchor hrefs are turned into absolute URLs before the origin check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkResolution {
    /// Only `/path` and absolute hrefs are resolved; `page.html` is ignored
    #[default]
    RootRelative,
    /// Every href is joined against the page URL
    Full,
}

/// Configuration for a comparison run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of redirects followed per request
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Path of the robots policy resource, relative to the page origin
    #[serde(default = "default_robots_path")]
    pub robots_path: String,

    /// Link resolution mode for the internal link count
    #[serde(default)]
    pub link_resolution: LinkResolution,

    /// Words dropped in addition to the built-in English stopwords
    #[serde(default)]
    pub extra_stopwords: Vec<String>,

    /// Whether to issue HEAD requests for images
    #[serde(default = "default_true")]
    pub check_images: bool,

    /// Whether to time a second fetch of every page
    #[serde(default = "default_true")]
    pub measure_latency: bool,
}

impl CompareConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            robots_path: default_robots_path(),
            link_resolution: LinkResolution::default(),
            extra_stopwords: Vec::new(),
            check_images: true,
            measure_latency: true,
        }
    }
}

/// Default value for user_agent
fn default_user_agent() -> String {
    concat!("page-compare/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Default value for timeout_secs
fn default_timeout_secs() -> u64 {
    30
}

/// Default value for max_redirects
fn default_max_redirects() -> usize {
    10
}

/// Default value for robots_path
fn default_robots_path() -> String {
    "/robots.txt".to_string()
}

fn default_true() -> bool {
    true
}
