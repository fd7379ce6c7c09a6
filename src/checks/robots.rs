use crate::results::RobotsStatus;
use crate::transport::Transport;

/// URL of the robots policy resource at `origin`
pub fn robots_url(origin: &str, robots_path: &str) -> String {
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        robots_path.trim_start_matches('/')
    )
}

/// Classifies whether the robots policy at `origin` can be fetched
///
/// The policy content is not parsed; a success status is the whole signal.
pub async fn check_robots<T: Transport>(
    transport: &T,
    origin: &str,
    robots_path: &str,
) -> RobotsStatus {
    let url = robots_url(origin, robots_path);

    match transport.fetch_success(&url).await {
        Ok(_) => {
            ::log::debug!("Robots policy reachable at {}", url);
            RobotsStatus::Reachable
        }
        Err(e) => {
            ::log::info!("Robots policy unreachable at {}: {}", url, e);
            RobotsStatus::Unreachable
        }
    }
}
