// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-specific time types for cross-platform compatibility.
//!
//! On native platforms these come from `std::time`; on WebAssembly, where
//! `std::time::SystemTime::now` panics, they come from `web_time`.
//!
//! [`Duration`] is re-exported at the crate root because request latency is
//! attached to a [`Context`](crate::context::Context) as a `Duration`.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Duration;
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, FixedOffset};

/// Wall-clock "now" with the local UTC offset.
///
/// This is the default [`Clock`](crate::Clock) of a [`Logger`](crate::Logger).
#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> DateTime<FixedOffset> {
    chrono::Local::now().fixed_offset()
}

/// Wall-clock "now".  The browser does not expose a timezone offset we can
/// cheaply rely on, so this is always UTC.
#[cfg(target_arch = "wasm32")]
pub fn now() -> DateTime<FixedOffset> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    DateTime::from_timestamp(since_epoch.as_secs() as i64, since_epoch.subsec_nanos())
        .unwrap_or_default()
        .fixed_offset()
}
