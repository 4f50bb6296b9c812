//! Routing table shared between the control and audio threads.
//!
//! The control thread rebuilds the table from settings and publishes a new
//! copy; the audio thread loads whichever copy is current at the start of a
//! tick. Each table is immutable once published, so a reader sees either
//! the old routes or the new ones for all outputs, never a mix.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rematrix_config::{RouteConfig, Settings};
use rematrix_core::{MAX_CHANNELS, RoutingTable};

/// Lock-free handle to the currently published [`RoutingTable`].
///
/// Cloning shares the same slot.
///
/// # Thread Safety
///
/// - **Readers**: `ArcSwap::load()`, wait-free.
/// - **Writers**: `ArcSwap::rcu()`/`swap()`, lock-free; concurrent writers retry.
/// - **Retired table**: `Mutex`, locked by writers only.
///
/// The table a writer replaces is held until the next publish, so it is
/// freed on a writer thread. A reader only drops the last reference if its
/// snapshot outlives two publishes.
#[derive(Clone, Debug)]
pub struct SharedRoutes {
    inner: Arc<RoutesInner>,
}

#[derive(Debug)]
struct RoutesInner {
    table: ArcSwap<RoutingTable>,
    retired: Mutex<Option<Arc<RoutingTable>>>,
}

impl SharedRoutes {
    /// Publish `table` as the initial routing.
    pub fn new(table: RoutingTable) -> Self {
        Self {
            inner: Arc::new(RoutesInner {
                table: ArcSwap::from_pointee(table),
                retired: Mutex::new(None),
            }),
        }
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> RoutingTable {
        **self.inner.table.load()
    }

    /// Publish `table` unconditionally. Returns whether it differs from the
    /// previously published one.
    pub fn store(&self, table: RoutingTable) -> bool {
        let previous = self.inner.table.swap(Arc::new(table));
        let changed = *previous != table;
        self.retire(previous);
        changed
    }

    /// Rebuild the published table from raw route values.
    ///
    /// Returns whether any route changed.
    pub fn rebuild(&self, values: &[i64; MAX_CHANNELS]) -> bool {
        let mut changed = false;
        let previous = self.inner.table.rcu(|current| {
            let mut next = **current;
            changed = next.rebuild(values);
            next
        });
        self.retire(previous);
        changed
    }

    /// Number of references to the table replaced by the last publish.
    #[cfg(test)]
    fn retired_refs(&self) -> Option<usize> {
        self.inner.retired.lock().as_ref().map(Arc::strong_count)
    }

    fn retire(&self, previous: Arc<RoutingTable>) {
        // The older retired table, if any, drops here.
        *self.inner.retired.lock() = Some(previous);
    }
}

impl Default for SharedRoutes {
    fn default() -> Self {
        Self::new(RoutingTable::identity())
    }
}

/// Settings-driven writer for a filter's routes.
///
/// Obtained from [`RematrixFilter::controller`](crate::RematrixFilter::controller).
/// A controller can be moved to a UI or automation thread and applied while
/// the filter keeps processing; it does not touch scratch buffers, so it
/// never picks up a changed channel layout.
#[derive(Clone, Debug)]
pub struct RouteController {
    routes: SharedRoutes,
}

impl RouteController {
    pub(crate) fn new(routes: SharedRoutes) -> Self {
        Self { routes }
    }

    /// Read routes from `settings` and publish them. Returns whether any
    /// route changed.
    pub fn apply(&self, settings: &Settings) -> bool {
        self.routes
            .rebuild(&RouteConfig::from_settings(settings).routes)
    }

    /// Publish a complete table. Returns whether any route changed.
    pub fn set_table(&self, table: RoutingTable) -> bool {
        self.routes.store(table)
    }

    /// The routes the next tick will use.
    pub fn current(&self) -> RoutingTable {
        self.routes.snapshot()
    }
}
