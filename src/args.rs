use clap::{Parser, ValueEnum};
use page_compare::{CompareConfig, LinkResolution};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-compare")]
#[command(about = "Compare web pages for content similarity and SEO quality signals")]
#[command(version)]
pub struct Args {
    /// Comma-separated URLs to compare
    #[arg(required_unless_present = "sitemap")]
    pub urls: Option<String>,

    /// Discover the URLs to compare from this sitemap instead
    #[arg(long, conflicts_with = "urls")]
    pub sitemap: Option<String>,

    /// Maximum number of sitemap locations to compare
    #[arg(long, default_value_t = 2)]
    pub limit: usize,

    /// Output layout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Rows)]
    pub format: OutputFormat,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Resolve every relative href when counting internal links
    #[arg(long)]
    pub full_link_resolution: bool,

    /// Skip HEAD requests for images
    #[arg(long)]
    pub skip_images: bool,

    /// Skip the load-time probe
    #[arg(long)]
    pub skip_latency: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One row per page
    Rows,
    /// One row per metric, one column per page
    Wide,
    Json,
}

impl Args {
    /// Apply command-line overrides on top of file or default configuration
    pub fn apply_overrides(&self, config: &mut CompareConfig) {
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.full_link_resolution {
            config.link_resolution = LinkResolution::Full;
        }
        if self.skip_images {
            config.check_images = false;
        }
        if self.skip_latency {
            config.measure_latency = false;
        }
    }
}
