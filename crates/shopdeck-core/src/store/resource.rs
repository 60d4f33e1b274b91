// ── Reactive per-resource cell ──
//
// Tri-state load tracking plus last-issued-wins sequencing, broadcast
// via `watch` channels. Each dashboard resource (orders, products,
// search results, index stats) owns one cell; payloads are replaced
// wholesale on every successful load.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// Load phase of a resource. Exactly one phase is active at any time —
/// never "loading" and "error" simultaneously.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// A load is in flight. Also the initial state before first data.
    #[default]
    Loading,
    /// The most recent load succeeded.
    Loaded,
    /// The most recent load failed, with a human-readable message.
    Failed(String),
}

/// Snapshot of one resource: its phase plus the last good payload.
#[derive(Debug)]
pub struct ResourceState<T> {
    pub phase: LoadPhase,
    /// Last successful payload. Retained across failures so a failed
    /// refresh never blanks already-displayed data (stale-while-error).
    pub data: Option<Arc<T>>,
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// The failure message, if the most recent load failed.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// Manual impls: the derives would demand `T: Clone` / `T: Default`,
// but the payload only ever moves behind an `Arc`.
impl<T> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            phase: self.phase.clone(),
            data: self.data.clone(),
        }
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            phase: LoadPhase::default(),
            data: None,
        }
    }
}

/// Handle for one issued load. Only the most recently issued ticket may
/// publish a result (last-issued-wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// A reactive cell for a single resource.
///
/// `begin()` flips the phase to `Loading` and hands out a monotonically
/// increasing ticket; `finish()`/`fail()` apply only while that ticket
/// is still the newest issued. A response from a superseded load is
/// dropped on the floor regardless of completion order, so an old
/// in-flight response can never overwrite a newer one. Cancelled loads
/// simply never call back.
pub struct ResourceCell<T> {
    state: watch::Sender<ResourceState<T>>,
    issued: AtomicU64,
}

impl<T: Send + Sync + 'static> ResourceCell<T> {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            state,
            issued: AtomicU64::new(0),
        }
    }

    /// Start a load: mark the resource loading and issue a ticket.
    pub fn begin(&self) -> LoadTicket {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .send_modify(|s| s.phase = LoadPhase::Loading);
        LoadTicket(seq)
    }

    /// Publish a successful payload. Returns `false` (and changes
    /// nothing) when the ticket has been superseded.
    pub fn finish(&self, ticket: LoadTicket, data: T) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state.send_modify(|s| {
            s.phase = LoadPhase::Loaded;
            s.data = Some(Arc::new(data));
        });
        true
    }

    /// Publish a failure. Prior data is left untouched. Returns `false`
    /// (and changes nothing) when the ticket has been superseded.
    pub fn fail(&self, ticket: LoadTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state
            .send_modify(|s| s.phase = LoadPhase::Failed(message.into()));
        true
    }

    /// Get the current state (cheap clone — payload is `Arc`-shared).
    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn begin_marks_loading_and_finish_publishes() {
        let cell: ResourceCell<Vec<u32>> = ResourceCell::new();
        assert!(cell.snapshot().is_loading());

        let ticket = cell.begin();
        assert!(cell.snapshot().is_loading());

        assert!(cell.finish(ticket, vec![1, 2, 3]));
        let state = cell.snapshot();
        assert_eq!(state.phase, LoadPhase::Loaded);
        assert_eq!(state.data.unwrap().len(), 3);
    }

    #[test]
    fn superseded_success_is_dropped() {
        let cell: ResourceCell<&'static str> = ResourceCell::new();
        let first = cell.begin();
        let second = cell.begin();

        // Newer load resolves first; the older response must not win.
        assert!(cell.finish(second, "new"));
        assert!(!cell.finish(first, "old"));

        assert_eq!(*cell.snapshot().data.unwrap(), "new");
        assert_eq!(cell.snapshot().phase, LoadPhase::Loaded);
    }

    #[test]
    fn superseded_failure_is_dropped() {
        let cell: ResourceCell<&'static str> = ResourceCell::new();
        let first = cell.begin();
        let second = cell.begin();

        assert!(cell.finish(second, "fresh"));
        assert!(!cell.fail(first, "stale failure"));

        let state = cell.snapshot();
        assert_eq!(state.phase, LoadPhase::Loaded);
        assert_eq!(*state.data.unwrap(), "fresh");
    }

    #[test]
    fn failure_retains_prior_data() {
        let cell: ResourceCell<&'static str> = ResourceCell::new();
        let ticket = cell.begin();
        cell.finish(ticket, "good");

        let retry = cell.begin();
        assert!(cell.fail(retry, "gateway unreachable"));

        let state = cell.snapshot();
        assert_eq!(state.error(), Some("gateway unreachable"));
        assert_eq!(*state.data.unwrap(), "good");
    }

    #[test]
    fn exactly_one_phase_is_active() {
        let cell: ResourceCell<()> = ResourceCell::new();
        let ticket = cell.begin();
        cell.fail(ticket, "boom");

        let state = cell.snapshot();
        assert!(!state.is_loading());
        assert!(state.error().is_some());

        cell.begin();
        let state = cell.snapshot();
        assert!(state.is_loading());
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let cell: ResourceCell<u32> = ResourceCell::new();
        let mut rx = cell.subscribe();

        let ticket = cell.begin();
        cell.finish(ticket, 7);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update().data.clone().unwrap(), 7);
    }
}
