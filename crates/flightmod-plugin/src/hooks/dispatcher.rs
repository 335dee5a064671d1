//! Hook dispatcher: builds one snapshot per event and fans it out.
//!
//! Every entry point follows the same sequence:
//! - If no handler is registered for the kind, return before touching the
//!   clock or the estimator.
//! - Otherwise build the snapshot once, then call each handler in registry
//!   order with a pointer to that same snapshot.
//!
//! Handlers run synchronously on the calling thread. Nothing a handler does
//! is caught or contained, and nothing is retained once the call returns.

use std::sync::Arc;

use tracing::trace;

use super::definitions::{HookFn, HookKind};
use super::registry::HookRegistry;
use super::snapshot;
use crate::clock::{Clock, MonotonicClock};
use crate::estimator::AttitudeEstimator;
use crate::math::Vector3;

/// Dispatches events to every handler registered for their kind.
#[derive(Debug)]
pub struct HookDispatcher {
    /// Frozen hook registry.
    registry: HookRegistry,
    /// Time source for snapshot stamps.
    clock: Arc<dyn Clock>,
}

impl HookDispatcher {
    /// Creates a dispatcher using the process monotonic clock.
    pub fn new(registry: HookRegistry) -> Self {
        Self::with_clock(registry, Arc::new(MonotonicClock))
    }

    /// Creates a dispatcher with an explicit time source.
    pub fn with_clock(registry: HookRegistry, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Calls every `hook_setup_start` handler.
    pub fn call_setup_start(&self) {
        let hooks = self.registry.list(HookKind::SetupStart);
        if hooks.is_empty() {
            return;
        }

        let now = self.clock.micros64();
        trace!(hook = %HookKind::SetupStart, handlers = hooks.len(), "Dispatching hook");

        for hook in hooks {
            if let HookFn::SetupStart(f) = *hook {
                // SAFETY: resolved under the exported name whose contract is `fn(u64)`.
                unsafe { f(now) };
            }
        }
    }

    /// Calls every `hook_setup_complete` handler.
    pub fn call_setup_complete(&self) {
        let hooks = self.registry.list(HookKind::SetupComplete);
        if hooks.is_empty() {
            return;
        }

        let now = self.clock.micros64();
        trace!(hook = %HookKind::SetupComplete, handlers = hooks.len(), "Dispatching hook");

        for hook in hooks {
            if let HookFn::SetupComplete(f) = *hook {
                // SAFETY: resolved under the exported name whose contract is `fn(u64)`.
                unsafe { f(now) };
            }
        }
    }

    /// Calls every `hook_AHRS_update` handler with the current attitude.
    pub fn call_ahrs_update(&self, estimator: &dyn AttitudeEstimator) {
        let hooks = self.registry.list(HookKind::AhrsUpdate);
        if hooks.is_empty() {
            return;
        }

        let state = snapshot::ahrs_state(estimator, self.clock.micros64());
        trace!(hook = %HookKind::AhrsUpdate, handlers = hooks.len(), status = ?state.status, "Dispatching hook");

        for hook in hooks {
            if let HookFn::AhrsUpdate(f) = *hook {
                // SAFETY: `state` outlives the call and matches `AhrsUpdateHookFn`.
                unsafe { f(&state) };
            }
        }
    }

    /// Calls every `hook_gyro_sample` handler with one raw sample.
    pub fn call_gyro_sample(&self, instance: u8, delta_time: f32, gyro: Vector3) {
        let hooks = self.registry.list(HookKind::GyroSample);
        if hooks.is_empty() {
            return;
        }

        let sample = snapshot::gyro_sample(instance, delta_time, gyro, self.clock.micros64());
        trace!(hook = %HookKind::GyroSample, handlers = hooks.len(), instance, "Dispatching hook");

        for hook in hooks {
            if let HookFn::GyroSample(f) = *hook {
                // SAFETY: `sample` outlives the call and matches `GyroSampleHookFn`.
                unsafe { f(&sample) };
            }
        }
    }

    /// Calls every `hook_accel_sample` handler with one raw sample.
    pub fn call_accel_sample(&self, instance: u8, delta_time: f32, accel: Vector3) {
        let hooks = self.registry.list(HookKind::AccelSample);
        if hooks.is_empty() {
            return;
        }

        let sample = snapshot::accel_sample(instance, delta_time, accel, self.clock.micros64());
        trace!(hook = %HookKind::AccelSample, handlers = hooks.len(), instance, "Dispatching hook");

        for hook in hooks {
            if let HookFn::AccelSample(f) = *hook {
                // SAFETY: `sample` outlives the call and matches `AccelSampleHookFn`.
                unsafe { f(&sample) };
            }
        }
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }
}
