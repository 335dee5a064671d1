//! Hook registry: append-only handler lists, one per hook kind.
//!
//! Registration happens on a [`RegistryBuilder`] during the bind phase.
//! [`RegistryBuilder::freeze`] consumes the builder and yields a read-only
//! [`HookRegistry`], so the dispatch side can never observe a list that is
//! still being appended to.

use tracing::trace;

use super::definitions::{HookFn, HookKind};

/// Mutable registry used while modules are being bound.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Hook kind index → handlers in registration order.
    hooks: [Vec<HookFn>; HookKind::COUNT],
}

impl RegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to its kind's list.
    ///
    /// # Panics
    ///
    /// Panics if the list cannot grow. A partially populated registry cannot
    /// be trusted, and this only happens during the startup scan before any
    /// event has been dispatched.
    pub fn register(&mut self, hook: HookFn) {
        let kind = hook.kind();
        let entries = &mut self.hooks[kind.index()];

        if entries.try_reserve(1).is_err() {
            panic!("Failed to allocate hook for {kind}");
        }
        entries.push(hook);

        trace!(hook = %kind, address = hook.address(), "Hook handler registered");
    }

    /// Number of handlers registered for a kind so far.
    pub fn len(&self, kind: HookKind) -> usize {
        self.hooks[kind.index()].len()
    }

    /// Whether no handler of any kind has been registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.iter().all(Vec::is_empty)
    }

    /// Ends the bind phase.
    ///
    /// Each list is reversed so that the most recently registered handler
    /// runs first.
    pub fn freeze(self) -> HookRegistry {
        let hooks = self.hooks.map(|mut entries| {
            entries.reverse();
            entries.into_boxed_slice()
        });
        HookRegistry { hooks }
    }
}

/// Read-only registry used during dispatch.
#[derive(Debug, Default)]
pub struct HookRegistry {
    /// Hook kind index → handlers, most recently registered first.
    hooks: [Box<[HookFn]>; HookKind::COUNT],
}

impl HookRegistry {
    /// An empty registry with no handlers for any kind.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Handlers for a kind, in dispatch order.
    pub fn list(&self, kind: HookKind) -> &[HookFn] {
        &self.hooks[kind.index()]
    }

    /// Whether no handler is registered for a kind.
    pub fn is_empty(&self, kind: HookKind) -> bool {
        self.hooks[kind.index()].is_empty()
    }

    /// Number of handlers registered for a kind.
    pub fn len(&self, kind: HookKind) -> usize {
        self.hooks[kind.index()].len()
    }

    /// Total number of handlers across all kinds.
    pub fn total(&self) -> usize {
        self.hooks.iter().map(|entries| entries.len()).sum()
    }

    /// Kinds with at least one handler.
    pub fn kinds(&self) -> Vec<HookKind> {
        HookKind::ALL
            .into_iter()
            .filter(|kind| !self.is_empty(*kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn first(_time_us: u64) {}
    unsafe extern "C" fn second(_time_us: u64) {
        std::hint::black_box(2);
    }
    unsafe extern "C" fn third(_time_us: u64) {
        std::hint::black_box(3);
    }

    #[test]
    fn test_empty_registry_has_no_handlers() {
        let registry = RegistryBuilder::new().freeze();
        for kind in HookKind::ALL {
            assert!(registry.is_empty(kind));
            assert!(registry.list(kind).is_empty());
        }
        assert_eq!(registry.total(), 0);
        assert!(registry.kinds().is_empty());
    }

    #[test]
    fn test_entries_land_under_their_own_kind() {
        let mut builder = RegistryBuilder::new();
        builder.register(HookFn::SetupStart(first));
        builder.register(HookFn::SetupComplete(second));
        assert_eq!(builder.len(HookKind::SetupStart), 1);
        assert_eq!(builder.len(HookKind::SetupComplete), 1);
        assert!(!builder.is_empty());

        let registry = builder.freeze();
        assert_eq!(
            registry.kinds(),
            vec![HookKind::SetupStart, HookKind::SetupComplete]
        );
        assert_eq!(registry.len(HookKind::AhrsUpdate), 0);
        assert_eq!(registry.total(), 2);
    }

    #[test]
    fn test_most_recent_registration_runs_first() {
        let mut builder = RegistryBuilder::new();
        builder.register(HookFn::SetupStart(first));
        builder.register(HookFn::SetupStart(second));
        builder.register(HookFn::SetupStart(third));

        let registry = builder.freeze();
        let addresses: Vec<usize> = registry
            .list(HookKind::SetupStart)
            .iter()
            .map(HookFn::address)
            .collect();
        assert_eq!(
            addresses,
            vec![third as usize, second as usize, first as usize]
        );
    }
}
