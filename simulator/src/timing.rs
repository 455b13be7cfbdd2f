//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Main loop period. The face only changes once a minute, so this just
/// bounds input latency.
pub const FRAME_TIME: Duration = Duration::from_millis(50);
