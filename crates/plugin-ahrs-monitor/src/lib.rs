//! Sample external module: tracks attitude estimate health.
//!
//! Build as a `cdylib` and drop the resulting library into the host's module
//! directory. Counters are kept in atomics because the host may call hooks
//! from more than one flight-control thread.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use flightmod_plugin_sdk::export_hook;
use flightmod_plugin_sdk::prelude::*;

static SETUP_STARTED_US: AtomicU64 = AtomicU64::new(0);
static SETUP_COMPLETE: AtomicBool = AtomicBool::new(false);
static UPDATES: AtomicU64 = AtomicU64::new(0);
static UNHEALTHY_UPDATES: AtomicU64 = AtomicU64::new(0);
static LAST_UPDATE_US: AtomicU64 = AtomicU64::new(0);
static LAST_STATUS: AtomicU32 = AtomicU32::new(AhrsStatus::Initialising as u32);

fn on_setup_start(time_us: u64) {
    SETUP_STARTED_US.store(time_us, Ordering::Relaxed);
}

fn on_setup_complete(_time_us: u64) {
    SETUP_COMPLETE.store(true, Ordering::Relaxed);
}

fn on_ahrs_update(state: &AhrsState) {
    UPDATES.fetch_add(1, Ordering::Relaxed);
    if state.status == AhrsStatus::Unhealthy {
        UNHEALTHY_UPDATES.fetch_add(1, Ordering::Relaxed);
    }
    LAST_UPDATE_US.store(state.time_us, Ordering::Relaxed);
    LAST_STATUS.store(state.status as u32, Ordering::Relaxed);
}

export_hook!(setup_start => on_setup_start);
export_hook!(setup_complete => on_setup_complete);
export_hook!(ahrs_update => on_ahrs_update);

/// Point-in-time view of the module's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorStats {
    pub setup_started_us: u64,
    pub setup_complete: bool,
    pub updates: u64,
    pub unhealthy_updates: u64,
    pub last_update_us: u64,
    pub last_status: AhrsStatus,
}

/// Reads the current counters.
pub fn stats() -> MonitorStats {
    let last_status = match LAST_STATUS.load(Ordering::Relaxed) {
        2 => AhrsStatus::Healthy,
        1 => AhrsStatus::Unhealthy,
        _ => AhrsStatus::Initialising,
    };

    MonitorStats {
        setup_started_us: SETUP_STARTED_US.load(Ordering::Relaxed),
        setup_complete: SETUP_COMPLETE.load(Ordering::Relaxed),
        updates: UPDATES.load(Ordering::Relaxed),
        unhealthy_updates: UNHEALTHY_UPDATES.load(Ordering::Relaxed),
        last_update_us: LAST_UPDATE_US.load(Ordering::Relaxed),
        last_status,
    }
}
