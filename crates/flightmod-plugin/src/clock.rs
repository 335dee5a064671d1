//! Monotonic microsecond time source used to stamp snapshots.

use std::sync::OnceLock;
use std::time::Instant;

/// Monotonic microsecond clock.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Microseconds since an arbitrary fixed epoch.
    fn micros64(&self) -> u64;
}

/// Clock counting microseconds since its first use in the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn micros64(&self) -> u64 {
        static EPOCH: OnceLock<Instant> = OnceLock::new();
        let epoch = EPOCH.get_or_init(Instant::now);
        u64::try_from(epoch.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}
