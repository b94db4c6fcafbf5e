pub use core::time::Duration;

// Snake pacing reads a monotonic clock. On `wasm32-unknown-unknown`,
// `std::time::Instant::now()` panics; `web-time` backs it with
// `performance.now()` instead.
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
