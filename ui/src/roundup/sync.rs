//! Activity sync with a single in-flight slot.
//!
//! A second trigger for the same athlete while a sync is pending gets the
//! pending future back instead of issuing another request. Nothing is queued.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use api::{ApiError, RoundupClient, SyncSummary};
use dioxus::prelude::*;
use futures::future::{self, FutureExt, LocalBoxFuture, Shared};

pub const MISSING_ATHLETE_MESSAGE: &str = "Athlete not available for sync";
pub const SYNC_FAILED_MESSAGE: &str = "Failed to sync activities";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivitySyncState {
    pub status: SyncStatus,
    pub summary: Option<SyncSummary>,
    pub error: Option<String>,
}

impl ActivitySyncState {
    pub fn is_loading(&self) -> bool {
        self.status == SyncStatus::Loading
    }
}

pub type SyncResult = Result<SyncSummary, String>;

pub trait SyncBackend {
    fn sync(&self, athlete_id: String) -> LocalBoxFuture<'static, Result<SyncSummary, ApiError>>;
}

impl SyncBackend for RoundupClient {
    fn sync(&self, athlete_id: String) -> LocalBoxFuture<'static, Result<SyncSummary, ApiError>> {
        let client = self.clone();
        async move { client.sync_athlete_activities(&athlete_id, None).await }.boxed_local()
    }
}

struct InFlight {
    generation: u64,
    athlete_id: String,
    future: Shared<LocalBoxFuture<'static, SyncResult>>,
}

/// Sync coordinator. Cloning shares the slot and the published state.
#[derive(Clone)]
pub struct ActivitySync {
    backend: Rc<dyn SyncBackend>,
    in_flight: Rc<RefCell<Option<InFlight>>>,
    generation: Rc<Cell<u64>>,
    state: Rc<RefCell<ActivitySyncState>>,
    publish: Rc<dyn Fn(ActivitySyncState)>,
}

impl ActivitySync {
    pub fn new(backend: Rc<dyn SyncBackend>, publish: impl Fn(ActivitySyncState) + 'static) -> Self {
        Self {
            backend,
            in_flight: Rc::new(RefCell::new(None)),
            generation: Rc::new(Cell::new(0)),
            state: Rc::new(RefCell::new(ActivitySyncState::default())),
            publish: Rc::new(publish),
        }
    }

    pub fn state(&self) -> ActivitySyncState {
        self.state.borrow().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.borrow().is_some()
    }

    /// Start a sync for `athlete_id`, or join the one already running for it.
    pub fn trigger(&self, athlete_id: Option<&str>) -> LocalBoxFuture<'static, SyncResult> {
        let Some(athlete_id) = athlete_id.map(str::trim).filter(|id| !id.is_empty()) else {
            update(&self.state, &*self.publish, |state| {
                state.status = SyncStatus::Error;
                state.error = Some(MISSING_ATHLETE_MESSAGE.to_string());
            });
            return future::ready(Err(MISSING_ATHLETE_MESSAGE.to_string())).boxed_local();
        };

        if let Some(pending) = self.in_flight.borrow().as_ref() {
            if pending.athlete_id == athlete_id {
                tracing::debug!(athlete_id, "sync already in flight; joining");
                return pending.future.clone().boxed_local();
            }
        }

        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        update(&self.state, &*self.publish, |state| {
            state.status = SyncStatus::Loading;
            state.error = None;
        });
        tracing::info!(athlete_id, "activity sync started");

        let request = self.backend.sync(athlete_id.to_string());
        let slot = Rc::clone(&self.in_flight);
        let current = Rc::clone(&self.generation);
        let state = Rc::clone(&self.state);
        let publish = Rc::clone(&self.publish);

        let shared = async move {
            let result = request.await.map_err(|err| {
                let message = err.to_string();
                if message.trim().is_empty() {
                    SYNC_FAILED_MESSAGE.to_string()
                } else {
                    message
                }
            });

            {
                let mut slot = slot.borrow_mut();
                if slot.as_ref().is_some_and(|pending| pending.generation == generation) {
                    *slot = None;
                }
            }

            // Superseded by reset or another athlete: result goes to the caller only.
            if current.get() == generation {
                match &result {
                    Ok(summary) => update(&state, &*publish, |state| {
                        state.status = SyncStatus::Success;
                        state.summary = Some(summary.clone());
                        state.error = None;
                    }),
                    Err(message) => {
                        tracing::warn!(%message, "activity sync failed");
                        update(&state, &*publish, |state| {
                            state.status = SyncStatus::Error;
                            state.error = Some(message.clone());
                        })
                    }
                }
            }
            result
        }
        .boxed_local()
        .shared();

        *self.in_flight.borrow_mut() = Some(InFlight {
            generation,
            athlete_id: athlete_id.to_string(),
            future: shared.clone(),
        });
        shared.boxed_local()
    }

    /// Back to idle. A sync still running finishes but publishes nothing.
    pub fn reset(&self) {
        self.generation.set(self.generation.get() + 1);
        self.in_flight.borrow_mut().take();
        update(&self.state, &*self.publish, |state| {
            *state = ActivitySyncState::default();
        });
    }
}

fn update(
    state: &RefCell<ActivitySyncState>,
    publish: &dyn Fn(ActivitySyncState),
    change: impl FnOnce(&mut ActivitySyncState),
) {
    let next = {
        let mut state = state.borrow_mut();
        change(&mut state);
        state.clone()
    };
    publish(next);
}

/// Handle returned by [`use_activity_sync`].
#[derive(Clone)]
pub struct UseActivitySync {
    pub state: Signal<ActivitySyncState>,
    /// `synced_at` of the last successful sync. Roundup fetches key off this.
    pub last_synced_at: Signal<Option<String>>,
    sync: ActivitySync,
}

impl UseActivitySync {
    /// Fire and forget; progress shows up in `state`.
    pub fn trigger(&self, athlete_id: Option<String>) {
        let pending = self.sync.trigger(athlete_id.as_deref());
        spawn(async move {
            let _ = pending.await;
        });
    }

    pub fn reset(&self) {
        self.sync.reset();
    }
}

/// Whether an auto-sync should fire for `next`, given the id the last auto-sync
/// fired for. Blank ids never fire and an unchanged id fires only once.
pub fn should_auto_trigger(previous: Option<&str>, next: Option<&str>, auto: bool) -> bool {
    if !auto {
        return false;
    }
    match next.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => previous.map(str::trim) != Some(id),
        None => false,
    }
}

/// Sync state for a component. With `auto` set, a sync fires once whenever a
/// non-empty athlete id appears or changes.
pub fn use_activity_sync(
    client: RoundupClient,
    athlete_id: Option<String>,
    auto: bool,
) -> UseActivitySync {
    let state = use_signal(ActivitySyncState::default);
    let last_synced_at = use_signal(|| None::<String>);
    let active = use_hook(|| Rc::new(Cell::new(true)));
    let auto_fired_for = use_hook(|| Rc::new(RefCell::new(None::<String>)));

    let sync = use_hook({
        let active = Rc::clone(&active);
        move || {
            let backend: Rc<dyn SyncBackend> = Rc::new(client);
            ActivitySync::new(backend, move |next: ActivitySyncState| {
                if !active.get() {
                    return;
                }
                let mut state = state;
                let mut last_synced_at = last_synced_at;
                if next.status == SyncStatus::Success {
                    if let Some(summary) = &next.summary {
                        last_synced_at.set(Some(summary.synced_at.clone()));
                    }
                }
                state.set(next);
            })
        }
    });

    use_drop({
        let active = Rc::clone(&active);
        move || active.set(false)
    });

    let handle = UseActivitySync {
        state,
        last_synced_at,
        sync,
    };

    use_effect(use_reactive((&athlete_id, &auto), {
        let handle = handle.clone();
        move |(athlete_id, auto)| {
            let previous = auto_fired_for.borrow().clone();
            if !should_auto_trigger(previous.as_deref(), athlete_id.as_deref(), auto) {
                return;
            }
            auto_fired_for.replace(athlete_id.clone());
            handle.trigger(athlete_id);
        }
    }));

    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;

    #[derive(Default)]
    struct GatedBackend {
        calls: Cell<u32>,
        gates: RefCell<Vec<oneshot::Sender<Result<SyncSummary, ApiError>>>>,
    }

    impl GatedBackend {
        fn release(&self, result: Result<SyncSummary, ApiError>) {
            let gate = self.gates.borrow_mut().remove(0);
            let _ = gate.send(result);
        }
    }

    impl SyncBackend for GatedBackend {
        fn sync(&self, _athlete_id: String) -> LocalBoxFuture<'static, Result<SyncSummary, ApiError>> {
            self.calls.set(self.calls.get() + 1);
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push(tx);
            async move { rx.await.unwrap_or(Err(ApiError::Network("gate dropped".into()))) }.boxed_local()
        }
    }

    fn summary() -> SyncSummary {
        SyncSummary {
            fetched: 4,
            created: 3,
            updated: 1,
            latest_activity: None,
            synced_at: "2025-10-01T08:00:00Z".into(),
        }
    }

    fn setup() -> (Rc<GatedBackend>, ActivitySync, Rc<RefCell<Vec<ActivitySyncState>>>) {
        let backend = Rc::new(GatedBackend::default());
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&published);
        let sync = ActivitySync::new(backend.clone(), move |state| sink.borrow_mut().push(state));
        (backend, sync, published)
    }

    #[test]
    fn concurrent_triggers_share_one_request() {
        let (backend, sync, published) = setup();
        let mut pool = LocalPool::new();
        let results = Rc::new(RefCell::new(Vec::new()));

        for _ in 0..2 {
            let pending = sync.trigger(Some("42"));
            let results = Rc::clone(&results);
            pool.spawner()
                .spawn_local(async move { results.borrow_mut().push(pending.await) })
                .unwrap();
        }
        pool.run_until_stalled();

        assert_eq!(backend.calls.get(), 1);
        assert!(sync.is_in_flight());
        assert_eq!(published.borrow().last().unwrap().status, SyncStatus::Loading);

        backend.release(Ok(summary()));
        pool.run_until_stalled();

        assert_eq!(*results.borrow(), vec![Ok(summary()), Ok(summary())]);
        assert!(!sync.is_in_flight());
        let last = published.borrow().last().cloned().unwrap();
        assert_eq!(last.status, SyncStatus::Success);
        assert_eq!(last.summary, Some(summary()));

        // Settled: the next trigger is a fresh request.
        let _ = sync.trigger(Some("42"));
        assert_eq!(backend.calls.get(), 2);
    }

    #[test]
    fn missing_athlete_never_reaches_the_backend() {
        let (backend, sync, _) = setup();
        let result = futures::executor::block_on(sync.trigger(None));
        assert_eq!(result, Err(MISSING_ATHLETE_MESSAGE.to_string()));
        assert_eq!(sync.state().status, SyncStatus::Error);
        assert_eq!(sync.state().error.as_deref(), Some(MISSING_ATHLETE_MESSAGE));

        let _ = sync.trigger(Some("  "));
        assert_eq!(backend.calls.get(), 0);
    }

    #[test]
    fn failures_keep_the_previous_summary() {
        let (backend, sync, _) = setup();
        let mut pool = LocalPool::new();

        let first = sync.trigger(Some("7"));
        backend.release(Ok(summary()));
        assert_eq!(pool.run_until(first), Ok(summary()));

        let second = sync.trigger(Some("7"));
        assert!(sync.state().is_loading());
        backend.release(Err(ApiError::Http {
            action: "Sync",
            status: 500,
            body: "boom".into(),
        }));
        assert_eq!(pool.run_until(second), Err("Sync failed (500): boom".to_string()));

        let state = sync.state();
        assert_eq!(state.status, SyncStatus::Error);
        assert_eq!(state.error.as_deref(), Some("Sync failed (500): boom"));
        assert_eq!(state.summary, Some(summary()));
    }

    #[test]
    fn reset_discards_a_late_result() {
        let (backend, sync, _) = setup();
        let mut pool = LocalPool::new();

        let pending = sync.trigger(Some("7"));
        sync.reset();
        assert!(!sync.is_in_flight());

        backend.release(Ok(summary()));
        assert_eq!(pool.run_until(pending), Ok(summary()));
        assert_eq!(sync.state(), ActivitySyncState::default());
    }

    #[test]
    fn auto_sync_fires_when_an_id_first_appears() {
        assert!(should_auto_trigger(None, Some("42"), true));
    }

    #[test]
    fn auto_sync_fires_again_only_for_a_new_id() {
        assert!(!should_auto_trigger(Some("42"), Some("42"), true));
        assert!(!should_auto_trigger(Some("42"), Some(" 42 "), true));
        assert!(should_auto_trigger(Some("42"), Some("43"), true));
    }

    #[test]
    fn auto_sync_ignores_blank_ids() {
        assert!(!should_auto_trigger(None, None, true));
        assert!(!should_auto_trigger(None, Some(""), true));
        assert!(!should_auto_trigger(Some("42"), Some("   "), true));
    }

    #[test]
    fn auto_sync_stays_off_without_the_flag() {
        assert!(!should_auto_trigger(None, Some("42"), false));
        assert!(!should_auto_trigger(Some("41"), Some("42"), false));
    }
}
