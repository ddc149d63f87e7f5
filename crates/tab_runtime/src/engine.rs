//! Settings engine: hydration, in-memory state, subscriptions, and debounced
//! durable writes.

use std::cell::RefCell;
use std::rc::Rc;

use tab_host::{KvStore, SETTINGS_KEY};

use crate::model::{SettingsPatch, SettingsRecord, SETTINGS_WRITE_DEBOUNCE_MS};

/// Hydration status of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Persisted settings have not been read yet; updates are refused.
    Loading,
    /// The canonical record is live and accepting updates.
    Ready,
}

/// Identifier handed out by [`SettingsEngine::subscribe`].
pub type SubscriptionId = u64;

/// Cancellation handle for a deferred write; dropping it cancels the task.
pub struct ScheduledWrite {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl ScheduledWrite {
    /// Wraps a cancellation closure; it runs at most once.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for ScheduledWrite {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for ScheduledWrite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledWrite")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}

/// Defers a task by a wall-clock delay, with cancellation.
///
/// The engine never times writes itself; it hands the closure to a scheduler
/// so tests can drive firing deterministically.
pub trait WriteScheduler {
    /// Schedules `task` to run once after `delay_ms` milliseconds.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledWrite;
}

/// Test scheduler that holds tasks until the caller fires them.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    pending: Rc<RefCell<Vec<ManualTask>>>,
}

struct ManualTask {
    id: u64,
    delay_ms: u32,
    task: Option<Box<dyn FnOnce()>>,
}

impl ManualScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled tasks that are neither fired nor cancelled.
    pub fn live_count(&self) -> usize {
        self.pending
            .borrow()
            .iter()
            .filter(|entry| entry.task.is_some())
            .count()
    }

    /// Delay of the most recently scheduled live task, if any.
    pub fn last_delay_ms(&self) -> Option<u32> {
        self.pending
            .borrow()
            .iter()
            .rev()
            .find(|entry| entry.task.is_some())
            .map(|entry| entry.delay_ms)
    }

    /// Runs every live task in scheduling order.
    pub fn fire_all(&self) {
        loop {
            let next = self
                .pending
                .borrow_mut()
                .iter_mut()
                .find_map(|entry| entry.task.take());
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl WriteScheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledWrite {
        let mut pending = self.pending.borrow_mut();
        let id = pending.last().map(|entry| entry.id + 1).unwrap_or(0);
        pending.push(ManualTask {
            id,
            delay_ms,
            task: Some(task),
        });

        let slots = Rc::clone(&self.pending);
        ScheduledWrite::new(move || {
            if let Some(entry) = slots.borrow_mut().iter_mut().find(|entry| entry.id == id) {
                entry.task = None;
            }
        })
    }
}

/// Browser scheduler backed by `setTimeout`/`clearTimeout`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct TimeoutScheduler;

#[cfg(target_arch = "wasm32")]
impl TimeoutScheduler {
    /// Creates the scheduler.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl WriteScheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledWrite {
        use wasm_bindgen::prelude::Closure;
        use wasm_bindgen::JsCast;

        let Some(window) = web_sys::window() else {
            // No window means no event loop to defer on; run inline.
            task();
            return ScheduledWrite::new(|| {});
        };

        let callback = Closure::once(task);
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms as i32,
        );
        match handle {
            Ok(timer_id) => ScheduledWrite::new(move || {
                // Keeps the closure alive until the timer settles.
                let _callback = callback;
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(timer_id);
                }
            }),
            Err(_) => {
                leptos::logging::warn!("settings write timer could not be scheduled");
                ScheduledWrite::new(|| {})
            }
        }
    }
}

struct EngineState {
    status: EngineStatus,
    record: SettingsRecord,
    pending_write: Option<ScheduledWrite>,
    subscribers: Vec<(SubscriptionId, Rc<dyn Fn(&SettingsRecord)>)>,
    next_subscriber: SubscriptionId,
}

/// Owner of the canonical [`SettingsRecord`].
///
/// Clones share one state cell. The lifecycle is `Loading` until
/// [`hydrate`](Self::hydrate) resolves, then `Ready` for good; updates made
/// while loading are dropped so defaults can never clobber persisted data.
/// Durable writes trail the last update by [`SETTINGS_WRITE_DEBOUNCE_MS`],
/// and a pending write still unfired when the engine is torn down is lost.
#[derive(Clone)]
pub struct SettingsEngine {
    store: Rc<dyn KvStore>,
    scheduler: Rc<dyn WriteScheduler>,
    state: Rc<RefCell<EngineState>>,
}

impl SettingsEngine {
    /// Creates an engine in the `Loading` state over the given store.
    pub fn new(store: Rc<dyn KvStore>, scheduler: Rc<dyn WriteScheduler>) -> Self {
        Self {
            store,
            scheduler,
            state: Rc::new(RefCell::new(EngineState {
                status: EngineStatus::Loading,
                record: SettingsRecord::default(),
                pending_write: None,
                subscribers: Vec::new(),
                next_subscriber: 0,
            })),
        }
    }

    /// Current hydration status.
    pub fn status(&self) -> EngineStatus {
        self.state.borrow().status
    }

    /// Snapshot of the canonical record.
    pub fn record(&self) -> SettingsRecord {
        self.state.borrow().record.clone()
    }

    /// Reads persisted settings once and transitions to `Ready`.
    ///
    /// A missing key and an unreadable record both resolve to defaults; the
    /// unreadable case is logged. Calling again after `Ready` is a no-op.
    pub async fn hydrate(&self) {
        if self.state.borrow().status == EngineStatus::Ready {
            return;
        }

        let record = match self.store.load_value(SETTINGS_KEY).await {
            Ok(Some(raw)) => match SettingsRecord::from_persisted_json(&raw) {
                Ok(record) => record,
                Err(err) => {
                    leptos::logging::warn!("persisted settings were unreadable: {err}");
                    SettingsRecord::default()
                }
            },
            Ok(None) => SettingsRecord::default(),
            Err(err) => {
                leptos::logging::warn!("settings load failed: {err}");
                SettingsRecord::default()
            }
        };

        {
            let mut state = self.state.borrow_mut();
            state.record = record;
            state.status = EngineStatus::Ready;
        }
        self.notify();
    }

    /// Applies a patch to the canonical record and schedules a durable write.
    ///
    /// Subscribers see the new record immediately; the write trails by the
    /// debounce window and is restarted by every further update, so only the
    /// final state of a burst reaches storage. Updates before hydration are
    /// dropped.
    pub fn update(&self, patch: SettingsPatch) {
        {
            let mut state = self.state.borrow_mut();
            if state.status != EngineStatus::Ready {
                leptos::logging::warn!("settings update ignored before hydration");
                return;
            }
            state.record = state.record.apply(patch);
        }
        self.notify();
        self.schedule_write();
    }

    fn schedule_write(&self) {
        let store = Rc::clone(&self.store);
        // Weak so an unfired task cannot keep a torn-down engine alive.
        let state = Rc::downgrade(&self.state);
        let task = Box::new(move || {
            let Some(state) = state.upgrade() else {
                return;
            };
            // Serialize at fire time so a coalesced burst writes its final state.
            let raw = {
                let state = state.borrow();
                serde_json::to_string(&state.record)
            };
            match raw {
                Ok(raw) => spawn_save(store, raw),
                Err(err) => leptos::logging::warn!("settings serialization failed: {err}"),
            }
        });

        let write = self.scheduler.schedule(SETTINGS_WRITE_DEBOUNCE_MS, task);
        // Replacing the handle cancels any write still pending.
        self.state.borrow_mut().pending_write = Some(write);
    }

    /// Registers a callback invoked on every record change.
    pub fn subscribe(&self, callback: impl Fn(&SettingsRecord) + 'static) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        let id = state.next_subscriber;
        state.next_subscriber += 1;
        state.subscribers.push((id, Rc::new(callback)));
        id
    }

    /// Removes a subscription; unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.state
            .borrow_mut()
            .subscribers
            .retain(|(existing, _)| *existing != id);
    }

    fn notify(&self) {
        // Callbacks run outside the borrow so they may re-enter the engine.
        let (record, callbacks) = {
            let state = self.state.borrow();
            let callbacks: Vec<_> = state
                .subscribers
                .iter()
                .map(|(_, callback)| Rc::clone(callback))
                .collect();
            (state.record.clone(), callbacks)
        };
        for callback in callbacks {
            callback(&record);
        }
    }
}

fn spawn_save(store: Rc<dyn KvStore>, raw: String) {
    crate::task::spawn_detached(async move {
        if let Err(err) = store.save_value(SETTINGS_KEY, &raw).await {
            leptos::logging::warn!("settings write failed: {err}");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;
    use tab_host::{KvStoreFuture, MemoryKvStore};

    use super::*;
    use crate::model::ClockFormat;

    fn ready_engine(store: &MemoryKvStore, scheduler: &ManualScheduler) -> SettingsEngine {
        let engine = SettingsEngine::new(Rc::new(store.clone()), Rc::new(scheduler.clone()));
        block_on(engine.hydrate());
        engine
    }

    fn stored_settings(store: &MemoryKvStore) -> Option<SettingsRecord> {
        block_on(store.load_value(SETTINGS_KEY))
            .expect("load")
            .map(|raw| SettingsRecord::from_persisted_json(&raw).expect("parse"))
    }

    #[test]
    fn hydration_of_an_empty_store_yields_defaults() {
        let store = MemoryKvStore::default();
        let engine = ready_engine(&store, &ManualScheduler::new());

        assert_eq!(engine.status(), EngineStatus::Ready);
        assert_eq!(engine.record(), SettingsRecord::default());
    }

    #[test]
    fn hydration_merges_persisted_fields_over_defaults() {
        let store = MemoryKvStore::default();
        block_on(store.save_value(SETTINGS_KEY, r#"{"blurLevel": 3, "clockFormat": "24h"}"#))
            .expect("seed");
        let engine = ready_engine(&store, &ManualScheduler::new());

        let record = engine.record();
        assert_eq!(record.blur_level, 3);
        assert_eq!(record.clock_format, ClockFormat::TwentyFourHour);
        assert_eq!(record.clock_size, 150);
    }

    #[test]
    fn corrupt_persisted_settings_fall_back_to_defaults() {
        let store = MemoryKvStore::default();
        block_on(store.save_value(SETTINGS_KEY, "{not json")).expect("seed");
        let engine = ready_engine(&store, &ManualScheduler::new());

        assert_eq!(engine.status(), EngineStatus::Ready);
        assert_eq!(engine.record(), SettingsRecord::default());
    }

    #[test]
    fn updates_before_hydration_are_dropped() {
        let store = MemoryKvStore::default();
        let scheduler = ManualScheduler::new();
        let engine = SettingsEngine::new(Rc::new(store.clone()), Rc::new(scheduler.clone()));

        engine.update(SettingsPatch {
            blur_level: Some(9),
            ..SettingsPatch::default()
        });

        assert_eq!(engine.status(), EngineStatus::Loading);
        assert_eq!(engine.record().blur_level, 20);
        assert_eq!(scheduler.live_count(), 0);
    }

    #[test]
    fn update_is_visible_immediately_but_written_only_on_fire() {
        let store = MemoryKvStore::default();
        let scheduler = ManualScheduler::new();
        let engine = ready_engine(&store, &scheduler);

        engine.update(SettingsPatch {
            blur_level: Some(42),
            ..SettingsPatch::default()
        });

        assert_eq!(engine.record().blur_level, 42);
        assert_eq!(scheduler.last_delay_ms(), Some(SETTINGS_WRITE_DEBOUNCE_MS));
        assert_eq!(stored_settings(&store), None, "write must wait for the timer");

        scheduler.fire_all();
        let stored = stored_settings(&store).expect("stored record");
        assert_eq!(stored.blur_level, 42);
    }

    #[test]
    fn a_burst_of_updates_coalesces_into_one_final_write() {
        let store = MemoryKvStore::default();
        let scheduler = ManualScheduler::new();
        let engine = ready_engine(&store, &scheduler);

        for blur in 1..=10 {
            engine.update(SettingsPatch {
                blur_level: Some(blur),
                ..SettingsPatch::default()
            });
        }

        // Each update cancels the previous timer; only one write is live.
        assert_eq!(scheduler.live_count(), 1);

        scheduler.fire_all();
        let stored = stored_settings(&store).expect("stored record");
        assert_eq!(stored.blur_level, 10);
    }

    #[test]
    fn subscribers_observe_every_change_until_unsubscribed() {
        let store = MemoryKvStore::default();
        let engine = ready_engine(&store, &ManualScheduler::new());

        let seen = Rc::new(Cell::new(0u32));
        let seen_in_callback = Rc::clone(&seen);
        let id = engine.subscribe(move |record| {
            seen_in_callback.set(record.blur_level);
        });

        engine.update(SettingsPatch {
            blur_level: Some(7),
            ..SettingsPatch::default()
        });
        assert_eq!(seen.get(), 7);

        engine.unsubscribe(id);
        engine.update(SettingsPatch {
            blur_level: Some(31),
            ..SettingsPatch::default()
        });
        assert_eq!(seen.get(), 7, "unsubscribed callback must not fire");
    }

    #[test]
    fn write_failures_do_not_disturb_in_memory_state() {
        struct FailingKvStore;

        impl KvStore for FailingKvStore {
            fn load_value<'a>(
                &'a self,
                _key: &'a str,
            ) -> KvStoreFuture<'a, Result<Option<String>, String>> {
                Box::pin(async { Ok(None) })
            }

            fn save_value<'a>(
                &'a self,
                _key: &'a str,
                _raw: &'a str,
            ) -> KvStoreFuture<'a, Result<(), String>> {
                Box::pin(async { Err("disk full".to_string()) })
            }

            fn delete_value<'a>(&'a self, _key: &'a str) -> KvStoreFuture<'a, Result<(), String>> {
                Box::pin(async { Ok(()) })
            }
        }

        let scheduler = ManualScheduler::new();
        let engine = SettingsEngine::new(Rc::new(FailingKvStore), Rc::new(scheduler.clone()));
        block_on(engine.hydrate());

        engine.update(SettingsPatch {
            focus_mode: Some(false),
            ..SettingsPatch::default()
        });
        scheduler.fire_all();

        assert!(!engine.record().focus_mode);
        assert_eq!(engine.status(), EngineStatus::Ready);
    }

    #[test]
    fn teardown_with_a_pending_write_leaves_storage_untouched() {
        let store = MemoryKvStore::default();
        let scheduler = ManualScheduler::new();
        let engine = ready_engine(&store, &scheduler);

        engine.update(SettingsPatch {
            blur_level: Some(11),
            ..SettingsPatch::default()
        });
        drop(engine);

        assert_eq!(scheduler.live_count(), 0, "drop cancels the pending write");
        scheduler.fire_all();
        assert_eq!(stored_settings(&store), None);
    }

    #[test]
    fn hydrate_after_ready_is_a_no_op() {
        let store = MemoryKvStore::default();
        let scheduler = ManualScheduler::new();
        let engine = ready_engine(&store, &scheduler);

        engine.update(SettingsPatch {
            blur_level: Some(2),
            ..SettingsPatch::default()
        });
        block_on(engine.hydrate());

        assert_eq!(engine.record().blur_level, 2);
    }
}
