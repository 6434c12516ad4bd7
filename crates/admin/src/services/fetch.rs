//! Loading state for asynchronously fetched data.
//!
//! A [`Resource`] wraps one accessor of the data source and tracks
//! `{data, loading, error}` for the view that renders it. Each fetch takes a
//! [`Ticket`] stamped with a generation number; only the ticket of the latest
//! fetch may write its result back, so an older call that resolves late never
//! overwrites a newer one. Tickets hold a weak reference, which makes results
//! that arrive after the resource was closed or dropped a no-op.

use std::future::Future;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::api::ApiError;

/// What a view sees of a resource at one instant.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    /// Last successfully fetched value. Kept when a later fetch fails.
    pub data: Option<T>,
    /// A fetch is in flight.
    pub loading: bool,
    /// Error of the most recent fetch, cleared when a new fetch starts.
    pub error: Option<ApiError>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    /// Whether there is nothing to render yet.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.data.is_none()
    }
}

/// How a [`Ticket`] was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The result was written into the resource.
    Applied,
    /// A newer fetch started; the result was discarded.
    Stale,
    /// The resource was closed or dropped; the result was discarded.
    Detached,
}

struct Slot<T, D> {
    state: FetchState<T>,
    generation: u64,
    deps: Option<D>,
    closed: bool,
}

/// A fetched value plus its loading state.
///
/// `D` is the dependency value. [`Resource::fetch_if_changed`] only invokes
/// the accessor when the dependency differs from the one of the previous
/// fetch.
pub struct Resource<T, D = ()> {
    name: &'static str,
    slot: Arc<Mutex<Slot<T, D>>>,
}

impl<T, D> std::fmt::Debug for Resource<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("Resource")
            .field("name", &self.name)
            .field("generation", &slot.generation)
            .field("loading", &slot.state.loading)
            .field("closed", &slot.closed)
            .finish_non_exhaustive()
    }
}

impl<T, D> Resource<T, D>
where
    T: Clone,
    D: PartialEq,
{
    /// Create an empty resource. Its state is pending until the first fetch
    /// settles.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Arc::new(Mutex::new(Slot {
                state: FetchState::default(),
                generation: 0,
                deps: None,
                closed: false,
            })),
        }
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> FetchState<T> {
        self.slot.lock().state.clone()
    }

    /// Mark a fetch as started and hand out the ticket that may settle it.
    ///
    /// Returns `None` once the resource is closed.
    pub fn begin(&self, deps: D) -> Option<Ticket<T, D>> {
        let mut slot = self.slot.lock();
        if slot.closed {
            return None;
        }

        slot.generation += 1;
        slot.deps = Some(deps);
        slot.state.loading = true;
        slot.state.error = None;

        Some(Ticket {
            name: self.name,
            generation: slot.generation,
            slot: Arc::downgrade(&self.slot),
        })
    }

    /// Invoke `accessor` and settle the result, returning the state after.
    ///
    /// When a newer fetch took over the resource meanwhile, the caller still
    /// gets its own result; it is just not written back.
    pub async fn fetch<F, Fut>(&self, deps: D, accessor: F) -> FetchState<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let Some(ticket) = self.begin(deps) else {
            return self.snapshot();
        };

        let (settlement, unused) = ticket.try_settle(accessor().await);
        let Some(result) = unused else {
            return self.snapshot();
        };
        tracing::debug!(resource = self.name, ?settlement, "fetch result discarded");

        let mut state = self.snapshot();
        match result {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
            }
            Err(e) => state.error = Some(e),
        }
        state.loading = false;
        state
    }

    /// Like [`Resource::fetch`], but only when `deps` changed since the last
    /// fetch (or nothing was fetched yet).
    pub async fn fetch_if_changed<F, Fut>(&self, deps: D, accessor: F) -> FetchState<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let unchanged = {
            let slot = self.slot.lock();
            slot.deps.as_ref() == Some(&deps)
        };

        if unchanged {
            return self.snapshot();
        }

        self.fetch(deps, accessor).await
    }

    /// Stop accepting results. Any in-flight ticket settles as detached.
    pub fn close(&self) {
        self.slot.lock().closed = true;
    }
}

impl<T: Clone> Resource<T, ()> {
    /// Fetch with no dependency: every call invokes the accessor.
    pub async fn load<F, Fut>(&self, accessor: F) -> FetchState<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.fetch((), accessor).await
    }

    /// Current state when it already holds data, otherwise [`Resource::load`].
    pub async fn load_if_empty<F, Fut>(&self, accessor: F) -> FetchState<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let current = self.snapshot();
        if current.data.is_some() {
            return current;
        }
        self.load(accessor).await
    }
}

/// Permission to write one fetch result back into its resource.
pub struct Ticket<T, D> {
    name: &'static str,
    generation: u64,
    slot: Weak<Mutex<Slot<T, D>>>,
}

impl<T, D> Ticket<T, D> {
    /// Generation this ticket was issued for.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Write `result` back if this ticket still belongs to the latest fetch.
    ///
    /// On failure the previous data is kept and the error is recorded.
    pub fn settle(self, result: Result<T, ApiError>) -> Settlement {
        self.try_settle(result).0
    }

    /// [`Ticket::settle`], handing the result back when it was discarded.
    fn try_settle(
        self,
        result: Result<T, ApiError>,
    ) -> (Settlement, Option<Result<T, ApiError>>) {
        let Some(slot) = self.slot.upgrade() else {
            return (Settlement::Detached, Some(result));
        };
        let mut slot = slot.lock();

        if slot.closed {
            return (Settlement::Detached, Some(result));
        }
        if slot.generation != self.generation {
            return (Settlement::Stale, Some(result));
        }

        match result {
            Ok(data) => {
                slot.state.data = Some(data);
                slot.state.error = None;
            }
            Err(e) => {
                tracing::error!(resource = self.name, "Failed to fetch {}: {e}", self.name);
                slot.state.error = Some(e);
            }
        }
        slot.state.loading = false;

        (Settlement::Applied, None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn offline() -> ApiError {
        ApiError::Unavailable { resource: "test" }
    }

    #[test]
    fn test_initial_state_is_loading_without_data() {
        let resource: Resource<u32> = Resource::new("numbers");
        let state = resource.snapshot();
        assert!(state.loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
        assert!(state.is_pending());
    }

    #[tokio::test]
    async fn test_load_success() {
        let resource: Resource<u32> = Resource::new("numbers");
        let state = resource.load(|| async { Ok(7) }).await;
        assert_eq!(state.data, Some(7));
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let resource: Resource<u32> = Resource::new("numbers");
        resource.load(|| async { Ok(7) }).await;

        let state = resource.load(|| async { Err(offline()) }).await;
        assert_eq!(state.data, Some(7));
        assert!(!state.loading);
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn test_new_fetch_clears_error() {
        let resource: Resource<u32> = Resource::new("numbers");
        resource.load(|| async { Err(offline()) }).await;

        let ticket = resource.begin(()).unwrap();
        let state = resource.snapshot();
        assert!(state.loading);
        assert!(state.error.is_none());

        ticket.settle(Ok(1));
        assert_eq!(resource.snapshot().data, Some(1));
    }

    #[test]
    fn test_stale_ticket_cannot_overwrite_newer_result() {
        let resource: Resource<&'static str> = Resource::new("words");
        let older = resource.begin(()).unwrap();
        let newer = resource.begin(()).unwrap();
        assert!(newer.generation() > older.generation());

        assert_eq!(newer.settle(Ok("new")), Settlement::Applied);
        assert_eq!(older.settle(Ok("old")), Settlement::Stale);

        let state = resource.snapshot();
        assert_eq!(state.data, Some("new"));
        assert!(!state.loading);
    }

    #[test]
    fn test_stale_ticket_settling_first_leaves_loading() {
        let resource: Resource<&'static str> = Resource::new("words");
        let older = resource.begin(()).unwrap();
        let _newer = resource.begin(()).unwrap();

        assert_eq!(older.settle(Ok("old")), Settlement::Stale);
        let state = resource.snapshot();
        assert!(state.loading);
        assert!(state.data.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_loads_each_see_their_own_result() {
        use std::time::Duration;

        let resource: Resource<&'static str> = Resource::new("words");
        let slow = resource.load(|| async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok("first")
        });
        let fast = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            resource
                .load(|| async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    Ok("second")
                })
                .await
        };

        let (first, second) = tokio::join!(slow, fast);
        assert_eq!(first.data, Some("first"));
        assert!(!first.loading);
        assert_eq!(second.data, Some("second"));
        assert!(!second.loading);
        assert_eq!(resource.snapshot().data, Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_failure_keeps_resource_data() {
        use std::time::Duration;

        let resource: Resource<u32> = Resource::new("numbers");
        resource.load(|| async { Ok(1) }).await;

        let failing = resource.load(|| async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Err(offline())
        });
        let newer = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            resource.load(|| async { Ok(2) }).await
        };

        let (failed, loaded) = tokio::join!(failing, newer);
        assert_eq!(failed.data, Some(2));
        assert!(failed.error.is_some());
        assert!(!failed.loading);
        assert_eq!(loaded.data, Some(2));
        assert!(resource.snapshot().error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_after_close_returns_snapshot() {
        let resource: Resource<u32> = Resource::new("numbers");
        resource.close();
        let state = resource.load(|| async { Ok(5) }).await;
        assert!(state.data.is_none());
    }

    #[test]
    fn test_closed_resource_ignores_late_results() {
        let resource: Resource<u32> = Resource::new("numbers");
        let ticket = resource.begin(()).unwrap();
        resource.close();

        assert_eq!(ticket.settle(Ok(3)), Settlement::Detached);
        assert!(resource.snapshot().data.is_none());
        assert!(resource.begin(()).is_none());
    }

    #[test]
    fn test_dropped_resource_detaches_ticket() {
        let resource: Resource<u32> = Resource::new("numbers");
        let ticket = resource.begin(()).unwrap();
        drop(resource);
        assert_eq!(ticket.settle(Ok(3)), Settlement::Detached);
    }

    #[tokio::test]
    async fn test_fetch_if_changed_skips_same_dependency() {
        let resource: Resource<u32, u32> = Resource::new("ranged");
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let accessor = move || async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1) };

        assert_eq!(resource.fetch_if_changed(30, accessor).await.data, Some(1));
        assert_eq!(resource.fetch_if_changed(30, accessor).await.data, Some(1));
        assert_eq!(resource.fetch_if_changed(90, accessor).await.data, Some(2));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_load_if_empty_reuses_data() {
        let resource: Resource<u32> = Resource::new("numbers");
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let accessor = move || async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1) };

        assert_eq!(resource.load_if_empty(accessor).await.data, Some(1));
        assert_eq!(resource.load_if_empty(accessor).await.data, Some(1));
        assert_eq!(resource.load(accessor).await.data, Some(2));
    }
}
