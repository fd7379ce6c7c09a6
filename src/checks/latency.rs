use crate::transport::Transport;
use std::time::Instant;

/// Times a single fresh fetch of `url`, headers and body, in seconds
///
/// One sample, no retries. A failed probe still reports the time spent
/// before the failure.
pub async fn measure_load_time<T: Transport>(transport: &T, url: &str) -> f64 {
    let start = Instant::now();
    let result = transport.fetch(url).await;
    let elapsed = start.elapsed().as_secs_f64();

    match result {
        Ok(response) => {
            ::log::debug!(
                "Loaded {} ({}) in {:.3} seconds",
                url,
                response.status,
                elapsed
            );
        }
        Err(e) => {
            ::log::warn!(
                "Latency probe for {} failed after {:.3} seconds: {}",
                url,
                elapsed,
                e
            );
        }
    }

    elapsed
}
