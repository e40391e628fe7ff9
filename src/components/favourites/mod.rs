// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Favourites view controller.
//!
//! This module owns the asynchronous load lifecycle of the signed-in user's
//! favourites and exposes the resulting [`ViewState`] to the renderer.
//!
//! Loads are sent to the task worker tagged with a [`RequestToken`]; only the
//! result of the most recently issued load is applied, so a slow response can
//! never overwrite a newer one. After a favourite is changed, a reload is
//! scheduled after a settling delay to give the store time to reflect the
//! write. Tearing the view down cancels scheduled reloads and invalidates
//! in-flight loads, so nothing arriving afterwards changes its state.

mod event;
mod render;

use std::{collections::HashMap, sync::mpsc::Sender, time::Duration};

use ratatui::widgets::ListState;

use crate::{
    components::{FavouriteChangeDelegate, FavouriteToggle},
    diagnostics::{Diagnostics, SyncError},
    events::AppEvent,
    model::{FavouriteRecord, LOAD_ERROR_MESSAGE, RequestToken, UserId, ViewState},
    store::StoreError,
    tasks::{AppTask, schedule::ScheduledTask},
};

/// Reloads waiting for their settling delay to elapse.
pub(crate) struct PendingReloads {
    delay: Duration,
    event_tx: Sender<AppEvent>,
    next_id: u64,
    pending: Vec<ScheduledTask>,
}

impl PendingReloads {
    fn new(delay: Duration, event_tx: Sender<AppEvent>) -> Self {
        Self {
            delay,
            event_tx,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Claims the reload with `id`, returning false if it is unknown or was
    /// cancelled.
    fn take(&mut self, id: u64) -> bool {
        match self.pending.iter().position(|task| task.id() == id) {
            Some(pos) => {
                self.pending.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    fn cancel_all(&mut self) {
        for task in self.pending.drain(..) {
            task.cancel();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}

impl FavouriteChangeDelegate for PendingReloads {
    fn on_favourite_changed(&mut self) {
        self.next_id += 1;
        let id = self.next_id;
        tracing::debug!(id, delay = ?self.delay, "favourites reload scheduled");

        let task = ScheduledTask::spawn(
            id,
            self.delay,
            self.event_tx.clone(),
            AppEvent::FavouritesReloadDue(id),
        );
        self.pending.push(task);
    }
}

pub(crate) struct FavouritesView {
    pub(crate) is_active: bool,
    mounted: bool,
    identity: Option<UserId>,
    state: ViewState,
    latest_request: RequestToken,
    /// The load still awaiting its result, cleared once it is applied.
    pending_request: Option<RequestToken>,
    toggles: HashMap<String, FavouriteToggle>,
    reloads: PendingReloads,
    pub(crate) list_state: ListState,
    task_tx: Sender<AppTask>,
    diagnostics: Box<dyn Diagnostics>,
}

impl FavouritesView {
    pub(crate) fn new(
        task_tx: Sender<AppTask>,
        event_tx: Sender<AppEvent>,
        settle_delay: Duration,
        diagnostics: Box<dyn Diagnostics>,
    ) -> Self {
        Self {
            is_active: false,
            mounted: false,
            identity: None,
            state: ViewState::Unauthenticated,
            latest_request: RequestToken::default(),
            pending_request: None,
            toggles: HashMap::new(),
            reloads: PendingReloads::new(settle_delay, event_tx),
            list_state: ListState::default(),
            task_tx,
            diagnostics,
        }
    }

    pub(crate) fn state(&self) -> &ViewState {
        &self.state
    }

    pub(crate) fn identity(&self) -> Option<&UserId> {
        self.identity.as_ref()
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub(crate) fn pending_reloads(&self) -> usize {
        self.reloads.len()
    }

    pub(crate) fn toggle_for(&self, key: &str) -> Option<&FavouriteToggle> {
        self.toggles.get(key)
    }

    /// Mounts the view for `identity`, or applies an identity change to a
    /// mounted view.
    ///
    /// Without an identity the view is `Unauthenticated` and the store is not
    /// contacted. With one, a single load is issued. Delivering the identity
    /// the view already holds is a no-op.
    pub(crate) fn initialize(&mut self, identity: Option<UserId>) {
        let was_mounted = std::mem::replace(&mut self.mounted, true);

        let Some(user) = identity else {
            self.invalidate();
            self.identity = None;
            self.toggles.clear();
            self.list_state.select(None);
            self.state = ViewState::Unauthenticated;
            return;
        };

        if was_mounted && self.identity.as_ref() == Some(&user) {
            tracing::debug!(%user, "identity unchanged, not reloading favourites");
            return;
        }

        if self.identity.as_ref() != Some(&user) {
            self.invalidate();
            self.toggles.clear();
            self.list_state.select(None);
        }

        self.identity = Some(user);
        self.reload();
    }

    /// Requests every favourite for the current identity.
    ///
    /// The view is `Loading` until the matching [`Self::complete_load`]
    /// arrives. If the worker cannot be reached the load fails immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::AuthAbsent`] when nobody is signed in, after
    /// moving the view to `Unauthenticated`.
    pub(crate) fn load(&mut self) -> Result<(), SyncError> {
        let Some(user) = self.identity.clone() else {
            self.state = ViewState::Unauthenticated;
            return Err(SyncError::AuthAbsent);
        };

        self.latest_request = self.latest_request.next();
        let token = self.latest_request;
        self.pending_request = Some(token);
        self.state = ViewState::Loading;

        let task = AppTask::FetchFavourites {
            token,
            user: user.clone(),
        };
        if let Err(e) = self.task_tx.send(task) {
            self.pending_request = None;
            self.finish_load(Err(SyncError::Read {
                user,
                source: StoreError::Unavailable(e.to_string()),
            }));
        }

        Ok(())
    }

    /// Applies the result of the load tagged with `token`.
    ///
    /// Returns false, leaving the view untouched, when the load has been
    /// superseded, was already applied, or the view was torn down since it was
    /// issued.
    pub(crate) fn complete_load(
        &mut self,
        token: RequestToken,
        result: Result<Vec<FavouriteRecord>, StoreError>,
    ) -> bool {
        if !self.mounted || self.pending_request != Some(token) {
            tracing::debug!(?token, pending = ?self.pending_request, "discarding stale favourites load");
            return false;
        }
        self.pending_request = None;

        let Some(user) = self.identity.clone() else {
            return false;
        };

        self.finish_load(result.map_err(|source| SyncError::Read { user, source }));
        true
    }

    /// Schedules one reload after the settling delay.
    pub(crate) fn on_favourite_changed(&mut self) {
        if self.mounted {
            self.reloads.on_favourite_changed();
        }
    }

    /// Runs the scheduled reload `id`, unless it was cancelled.
    pub(crate) fn handle_reload_due(&mut self, id: u64) {
        if !self.mounted || !self.reloads.take(id) {
            tracing::debug!(id, "ignoring cancelled favourites reload");
            return;
        }

        self.reload();
    }

    /// Explicit user retry. Also refreshes an already loaded list.
    pub(crate) fn retry(&mut self) {
        match self.state {
            ViewState::LoadError(_) | ViewState::Loaded(_) => self.reload(),
            ViewState::Loading | ViewState::Unauthenticated => {}
        }
    }

    /// Unmounts the view. Pending reloads are cancelled and any load still in
    /// flight will be ignored when it completes.
    pub(crate) fn teardown(&mut self) {
        if self.mounted {
            tracing::debug!(pending = self.reloads.len(), "favourites view torn down");
        }
        self.mounted = false;
        self.invalidate();
    }

    /// Toggles the favourite under the list selection.
    pub(crate) fn toggle_selected(&mut self) {
        let (Some(user), Some(index)) = (self.identity.as_ref(), self.list_state.selected()) else {
            return;
        };

        let Some(record) = self.state.items().get(index) else {
            return;
        };

        self.toggles
            .entry(record.key.clone())
            .or_default()
            .toggle(record, user, &self.task_tx, self.diagnostics.as_ref());
    }

    /// Applies the outcome of a toggle request issued by one of this view's
    /// toggles.
    pub(crate) fn complete_toggle(&mut self, user: UserId, key: String, result: Result<bool, StoreError>) {
        if !self.mounted || self.identity.as_ref() != Some(&user) {
            tracing::debug!(%user, key = %key, "ignoring toggle result for inactive view");
            return;
        }

        let toggle = self.toggles.entry(key.clone()).or_default();
        toggle.complete(user, key, result, &mut self.reloads, self.diagnostics.as_ref());
    }

    /// Applies the outcome of a plain add requested outside the list.
    ///
    /// # Errors
    ///
    /// Returns the reported [`SyncError::Write`] so the caller can tell the
    /// user.
    pub(crate) fn complete_add(
        &mut self,
        user: UserId,
        key: String,
        result: Result<(), StoreError>,
    ) -> Result<(), SyncError> {
        match result {
            Ok(()) => {
                if self.identity.as_ref() == Some(&user) {
                    self.on_favourite_changed();
                }
                Ok(())
            }
            Err(source) => {
                let error = SyncError::Write { user, key, source };
                self.diagnostics.report(&error);
                Err(error)
            }
        }
    }

    fn reload(&mut self) {
        if let Err(e) = self.load() {
            self.diagnostics.report(&e);
        }
    }

    fn finish_load(&mut self, result: Result<Vec<FavouriteRecord>, SyncError>) {
        match result {
            Ok(items) => {
                // Idle toggles are re-derived from the store; in-flight and
                // failed ones keep their indicator while the record is listed.
                self.toggles.retain(|key, toggle| {
                    !toggle.is_idle() && items.iter().any(|record| &record.key == key)
                });
                self.clamp_selection(items.len());
                self.state = ViewState::Loaded(items);
            }
            Err(e) => {
                self.diagnostics.report(&e);
                self.state = ViewState::LoadError(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    fn invalidate(&mut self) {
        self.reloads.cancel_all();
        self.latest_request = self.latest_request.next();
        self.pending_request = None;
    }

    fn clamp_selection(&mut self, len: usize) {
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use super::*;
    use crate::{
        diagnostics::testing::RecordingDiagnostics,
        store::memory::MemoryStore,
        tasks::{TaskContext, handle_task},
    };

    const SHORT_DELAY: Duration = Duration::from_millis(10);
    const WAIT: Duration = Duration::from_secs(2);

    struct Harness {
        view: FavouritesView,
        task_rx: Receiver<AppTask>,
        event_rx: Receiver<AppEvent>,
        diagnostics: RecordingDiagnostics,
    }

    fn harness(settle_delay: Duration) -> Harness {
        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let diagnostics = RecordingDiagnostics::default();
        let view = FavouritesView::new(
            task_tx,
            event_tx,
            settle_delay,
            Box::new(diagnostics.clone()),
        );

        Harness {
            view,
            task_rx,
            event_rx,
            diagnostics,
        }
    }

    impl Harness {
        fn fetches(&self) -> Vec<(RequestToken, UserId)> {
            self.task_rx
                .try_iter()
                .filter_map(|task| match task {
                    AppTask::FetchFavourites { token, user } => Some((token, user)),
                    _ => None,
                })
                .collect()
        }

        /// Runs queued tasks against `store` and feeds the results back into
        /// the view, as the worker and event loop would.
        fn pump(&mut self, store: &MemoryStore) {
            let (worker_tx, worker_rx) = mpsc::channel();
            let tasks: Vec<AppTask> = self.task_rx.try_iter().collect();
            for task in tasks {
                let mut ctx = TaskContext {
                    event_tx: &worker_tx,
                    store,
                };
                handle_task(task, &mut ctx).unwrap();
            }

            for event in worker_rx.try_iter() {
                match event {
                    AppEvent::FavouritesLoaded { token, result, .. } => {
                        self.view.complete_load(token, result);
                    }
                    AppEvent::FavouriteToggled { user, key, result } => {
                        self.view.complete_toggle(user, key, result);
                    }
                    other => panic!("unexpected worker event {:?}", other),
                }
            }
        }

        fn await_reload(&mut self) {
            match self.event_rx.recv_timeout(WAIT) {
                Ok(AppEvent::FavouritesReloadDue(id)) => self.view.handle_reload_due(id),
                other => panic!("expected reload, got {:?}", other),
            }
        }
    }

    fn u1() -> UserId {
        UserId::new("u1")
    }

    fn dune() -> FavouriteRecord {
        FavouriteRecord {
            author_name: Some("Frank Herbert".into()),
            ..FavouriteRecord::new("/works/OL1W", "Dune")
        }
    }

    fn emma() -> FavouriteRecord {
        FavouriteRecord::new("/works/OL2W", "Emma")
    }

    #[test]
    fn absent_identity_is_unauthenticated_without_store_requests() {
        let mut h = harness(SHORT_DELAY);

        h.view.initialize(None);

        assert_eq!(h.view.state(), &ViewState::Unauthenticated);
        assert!(h.task_rx.try_recv().is_err());
    }

    #[test]
    fn present_identity_loads_records_unmodified() {
        let mut h = harness(SHORT_DELAY);
        let store = MemoryStore::with_favourites(&u1(), vec![emma(), dune()]);

        h.view.initialize(Some(u1()));
        assert!(h.view.state().is_loading());

        h.pump(&store);

        assert_eq!(h.view.state(), &ViewState::Loaded(vec![emma(), dune()]));
        assert_eq!(store.reads(), 1);
    }

    #[test]
    fn empty_collection_is_loaded_not_error() {
        let mut h = harness(SHORT_DELAY);
        let store = MemoryStore::default();

        h.view.initialize(Some(u1()));
        h.pump(&store);

        assert_eq!(h.view.state(), &ViewState::Loaded(vec![]));
        assert!(h.diagnostics.reports().is_empty());
    }

    #[test]
    fn fetch_failure_shows_generic_message_and_reports_once() {
        let mut h = harness(SHORT_DELAY);
        let store = MemoryStore::default();
        store.set_fail_reads(true);

        h.view.initialize(Some(u1()));
        h.pump(&store);

        assert_eq!(
            h.view.state(),
            &ViewState::LoadError(LOAD_ERROR_MESSAGE.to_string())
        );
        let reports = h.diagnostics.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("connection refused"));
    }

    #[test]
    fn repeated_loads_are_idempotent() {
        let mut h = harness(SHORT_DELAY);
        let store = MemoryStore::with_favourites(&u1(), vec![dune()]);

        h.view.initialize(Some(u1()));
        h.pump(&store);
        let first = h.view.state().clone();

        h.view.load().unwrap();
        h.pump(&store);

        assert_eq!(h.view.state(), &first);
    }

    #[test]
    fn stale_load_result_is_discarded() {
        let mut h = harness(SHORT_DELAY);

        h.view.initialize(Some(u1()));
        h.view.load().unwrap();
        let fetches = h.fetches();
        assert_eq!(fetches.len(), 2);
        let (older, newer) = (fetches[0].0, fetches[1].0);

        assert!(h.view.complete_load(newer, Ok(vec![])));
        assert!(!h.view.complete_load(older, Ok(vec![dune()])));

        assert_eq!(h.view.state(), &ViewState::Loaded(vec![]));
    }

    #[test]
    fn loading_is_exited_exactly_once() {
        let mut h = harness(SHORT_DELAY);

        h.view.initialize(Some(u1()));
        let (token, _) = h.fetches()[0].clone();

        assert!(h.view.complete_load(token, Ok(vec![dune()])));
        assert!(!h.view.complete_load(
            token,
            Err(StoreError::Unavailable("late".into()))
        ));

        assert_eq!(h.view.state(), &ViewState::Loaded(vec![dune()]));
        assert!(h.diagnostics.reports().is_empty());
    }

    #[test]
    fn repeated_failure_for_one_load_is_reported_once() {
        let mut h = harness(SHORT_DELAY);

        h.view.initialize(Some(u1()));
        let (token, _) = h.fetches()[0].clone();

        assert!(h.view.complete_load(token, Err(StoreError::Unavailable("down".into()))));
        assert!(!h.view.complete_load(token, Err(StoreError::Unavailable("down".into()))));
        assert!(!h.view.complete_load(token, Ok(vec![dune()])));

        assert_eq!(
            h.view.state(),
            &ViewState::LoadError(LOAD_ERROR_MESSAGE.to_string())
        );
        assert_eq!(h.diagnostics.reports().len(), 1);
    }

    #[test]
    fn identity_flips_load_once_per_transition_to_present() {
        let mut h = harness(SHORT_DELAY);

        h.view.initialize(None);
        h.view.initialize(Some(u1()));
        h.view.initialize(Some(u1()));
        assert_eq!(h.fetches().len(), 1);

        h.view.initialize(None);
        assert_eq!(h.view.state(), &ViewState::Unauthenticated);
        assert!(h.fetches().is_empty());

        h.view.initialize(Some(u1()));
        h.view.initialize(Some(UserId::new("u2")));
        let fetches = h.fetches();
        assert_eq!(fetches.len(), 2);
        assert_eq!(fetches[1].1, UserId::new("u2"));
    }

    #[test]
    fn load_after_sign_out_resolves_previous_user_as_stale() {
        let mut h = harness(SHORT_DELAY);

        h.view.initialize(Some(u1()));
        let (token, _) = h.fetches()[0].clone();
        h.view.initialize(None);

        assert!(!h.view.complete_load(token, Ok(vec![dune()])));
        assert_eq!(h.view.state(), &ViewState::Unauthenticated);
    }

    #[test]
    fn closed_worker_resolves_to_load_error() {
        let mut h = harness(SHORT_DELAY);
        drop(std::mem::replace(&mut h.task_rx, mpsc::channel().1));

        h.view.initialize(Some(u1()));

        assert!(matches!(h.view.state(), ViewState::LoadError(_)));
        assert_eq!(h.diagnostics.reports().len(), 1);
    }

    #[test]
    fn load_error_only_leaves_via_retry() {
        let mut h = harness(SHORT_DELAY);
        let store = MemoryStore::default();
        store.set_fail_reads(true);

        h.view.initialize(Some(u1()));
        h.pump(&store);
        h.view.initialize(Some(u1()));
        assert!(h.task_rx.try_recv().is_err());

        store.set_fail_reads(false);
        h.view.retry();
        assert!(h.view.state().is_loading());
        h.pump(&store);

        assert_eq!(h.view.state(), &ViewState::Loaded(vec![]));
    }

    #[test]
    fn removing_a_favourite_reloads_after_settling_delay() {
        let mut h = harness(SHORT_DELAY);
        let store = MemoryStore::with_favourites(&u1(), vec![dune()]);

        h.view.initialize(Some(u1()));
        h.pump(&store);
        assert_eq!(h.view.state(), &ViewState::Loaded(vec![dune()]));

        h.view.toggle_selected();
        h.pump(&store);
        assert_eq!(store.writes(), 1);
        assert_eq!(h.view.pending_reloads(), 1);
        assert_eq!(h.view.state(), &ViewState::Loaded(vec![dune()]));

        h.await_reload();
        assert!(h.view.state().is_loading());

        h.pump(&store);
        assert_eq!(h.view.state(), &ViewState::Loaded(vec![]));
        assert_eq!(h.view.pending_reloads(), 0);
    }

    #[test]
    fn failed_toggle_does_not_reload_or_change_list() {
        let mut h = harness(SHORT_DELAY);
        let store = MemoryStore::with_favourites(&u1(), vec![dune()]);

        h.view.initialize(Some(u1()));
        h.pump(&store);

        store.set_fail_writes(true);
        h.view.toggle_selected();
        h.pump(&store);

        assert_eq!(h.view.pending_reloads(), 0);
        assert_eq!(h.view.state(), &ViewState::Loaded(vec![dune()]));
        assert!(matches!(
            h.view.toggle_for(&dune().key).map(FavouriteToggle::status),
            Some(crate::components::ToggleStatus::Failed(_))
        ));
        assert!(h.event_rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn each_change_schedules_its_own_reload_and_converges() {
        let mut h = harness(SHORT_DELAY);
        let store = MemoryStore::with_favourites(&u1(), vec![dune(), emma()]);

        h.view.initialize(Some(u1()));
        h.pump(&store);

        h.view.toggle_selected();
        h.view.list_state.select(Some(1));
        h.view.toggle_selected();
        h.pump(&store);
        assert_eq!(h.view.pending_reloads(), 2);

        h.await_reload();
        h.await_reload();
        h.pump(&store);

        assert_eq!(h.view.state(), &ViewState::Loaded(vec![]));
        assert_eq!(h.view.pending_reloads(), 0);
    }

    #[test]
    fn teardown_makes_pending_work_inert() {
        let mut h = harness(Duration::from_millis(50));
        let store = MemoryStore::with_favourites(&u1(), vec![dune()]);

        h.view.initialize(Some(u1()));
        h.pump(&store);
        h.view.on_favourite_changed();
        h.view.load().unwrap();
        let (in_flight, _) = h.fetches()[0].clone();

        h.view.teardown();

        assert_eq!(h.view.pending_reloads(), 0);
        assert!(!h.view.complete_load(in_flight, Ok(vec![])));
        assert!(h.event_rx.recv_timeout(Duration::from_millis(200)).is_err());
        h.view.handle_reload_due(1);
        assert!(h.task_rx.try_recv().is_err());
    }

    #[test]
    fn remount_after_teardown_loads_again() {
        let mut h = harness(SHORT_DELAY);
        let store = MemoryStore::with_favourites(&u1(), vec![dune()]);

        h.view.initialize(Some(u1()));
        h.pump(&store);
        h.view.teardown();
        assert!(!h.view.is_mounted());

        h.view.initialize(Some(u1()));
        assert!(h.view.state().is_loading());
        h.pump(&store);

        assert_eq!(h.view.state(), &ViewState::Loaded(vec![dune()]));
        assert_eq!(store.reads(), 2);
    }

    #[test]
    fn successful_add_schedules_reload() {
        let mut h = harness(SHORT_DELAY);
        let store = MemoryStore::default();

        h.view.initialize(Some(u1()));
        h.pump(&store);

        h.view.complete_add(u1(), dune().key, Ok(())).unwrap();
        assert_eq!(h.view.pending_reloads(), 1);

        let failed = h.view.complete_add(
            u1(),
            emma().key,
            Err(StoreError::Unavailable("down".into())),
        );
        assert!(matches!(failed, Err(SyncError::Write { .. })));
        assert_eq!(h.view.pending_reloads(), 1);
        assert_eq!(h.diagnostics.reports().len(), 1);
    }
}
