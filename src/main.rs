use clap::Parser;
use page_compare::sitemap::fetch_sitemap;
use page_compare::{Comparator, CompareConfig, HttpTransport, parse_url_list, report};
use std::process::ExitCode;

mod args;
use args::{Args, OutputFormat};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match CompareConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => CompareConfig::default(),
    };
    args.apply_overrides(&mut config);

    let transport = match HttpTransport::new(&config) {
        Ok(transport) => transport,
        Err(e) => {
            ::log::error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let urls = match &args.sitemap {
        Some(sitemap_url) => match fetch_sitemap(&transport, sitemap_url).await {
            Ok(entries) => entries
                .into_iter()
                .take(args.limit)
                .map(|entry| entry.location)
                .collect(),
            Err(e) => {
                ::log::error!("Failed to read sitemap {}: {}", sitemap_url, e);
                return ExitCode::FAILURE;
            }
        },
        None => parse_url_list(args.urls.as_deref().unwrap_or_default()),
    };

    ::log::info!("Comparing {} pages", urls.len());
    let start_time = std::time::Instant::now();

    let comparator = Comparator::new(transport, config);
    let record = match comparator.compare(&urls).await {
        Ok(record) => record,
        Err(e) => {
            ::log::error!("Comparison failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Comparison complete - analyzed {} pages in {:.2} seconds",
        record.pages.len(),
        start_time.elapsed().as_secs_f64()
    );

    match args.format {
        OutputFormat::Rows => print!("{}", report::render_rows(&record)),
        OutputFormat::Wide => print!("{}", report::render_wide(&record)),
        OutputFormat::Json => match report::render_json(&record) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                ::log::error!("Failed to serialize result: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
