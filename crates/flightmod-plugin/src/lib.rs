//! # flightmod-plugin
//!
//! External hook modules for a flight-control host. Provides:
//!
//! - Discovery of module files in a configured directory
//! - Binding of well-known hook symbols through `libloading`
//! - An append-only hook registry, frozen before dispatch begins
//! - Versioned `#[repr(C)]` snapshots and a synchronous dispatcher
//!
//! Loaded modules are trusted native code: nothing here isolates the host
//! from a module that misbehaves.

pub mod binder;
pub mod clock;
pub mod discovery;
pub mod estimator;
pub mod ffi;
pub mod hooks;
pub mod loader;
pub mod manager;
pub mod math;
pub mod prelude;

pub use binder::{BindOutcome, BoundModule, ModuleBinder};
pub use estimator::AttitudeEstimator;
pub use hooks::definitions::{HookFn, HookKind};
pub use hooks::dispatcher::HookDispatcher;
pub use hooks::registry::{HookRegistry, RegistryBuilder};
pub use loader::{LibraryLoader, LoadedModule, ModuleLoader, StaticModuleLoader};
pub use manager::{BindReport, ModuleHost, ModuleManager};
