//! Hook system: kinds, registry, snapshot builders, and dispatcher.

pub mod definitions;
pub mod dispatcher;
pub mod registry;
pub mod snapshot;

pub use definitions::{HookFn, HookKind};
pub use dispatcher::HookDispatcher;
pub use registry::{HookRegistry, RegistryBuilder};
