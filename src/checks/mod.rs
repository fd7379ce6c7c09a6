//! Page checks that issue requests of their own: robots policy reachability,
//! image payload weight and load latency.

pub mod assets;
pub mod latency;
pub mod robots;

pub use assets::{estimate_image_weight, image_sources};
pub use latency::measure_load_time;
pub use robots::check_robots;
