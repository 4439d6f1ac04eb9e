//! Data loader — the three-state load cycle behind the dashboard.
//!
//! ```text
//!   Loading ──fetch ok──▶ Loaded(assets)
//!      │
//!      └──fetch err─────▶ Error(failure)
//! ```
//!
//! The loader starts in [`LoadState::Loading`]. Each load cycle calls the
//! [`AssetSource`] exactly once and replaces the published state wholesale.
//! At most one cycle is in flight at a time; a new cycle may start once the
//! previous one settled, re-entering `Loading`.
//!
//! Every write is preceded by a cancellation check, both against the
//! cycle's own [`CancelFlag`] and against the loader-wide flag raised by
//! [`DataLoader::close`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use assetdash_domain::asset::Asset;
use assetdash_domain::error::{LoadErrorKind, LoadFailure};

use crate::ports::AssetSource;

/// Immutable asset collection shared between readers.
pub type AssetSnapshot = Arc<[Asset]>;

/// Observable state of the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// A load cycle is running (or has not started yet).
    Loading,
    /// The last cycle failed.
    Error(LoadFailure),
    /// The last cycle succeeded.
    Loaded(AssetSnapshot),
}

impl LoadState {
    /// Whether a cycle has produced an outcome.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// What a single [`DataLoader::load`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Published `Loaded` with this many assets.
    Loaded(usize),
    /// Published `Error`.
    Failed(LoadErrorKind),
    /// Cancelled before publishing; the outcome was discarded.
    Cancelled,
    /// Another cycle was already in flight; nothing happened.
    AlreadyInFlight,
}

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Handle to a spawned load cycle.
///
/// Dropping the handle cancels the cycle: the fetch may still complete, but
/// its outcome is never published. Use [`detach`](Self::detach) to let the
/// cycle run unattended.
#[derive(Debug)]
pub struct LoadTask {
    handle: Option<JoinHandle<LoadOutcome>>,
    cancel: CancelFlag,
}

impl LoadTask {
    /// Discard this cycle's outcome.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the cycle to finish.
    pub async fn join(mut self) -> LoadOutcome {
        let Some(handle) = self.handle.take() else {
            return LoadOutcome::Cancelled;
        };
        match handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "load task did not complete");
                LoadOutcome::Cancelled
            }
        }
    }

    /// Let the cycle run to completion without holding the handle.
    pub fn detach(mut self) {
        self.handle.take();
    }
}

impl Drop for LoadTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel.cancel();
        }
    }
}

/// Runs load cycles against an [`AssetSource`] and publishes [`LoadState`].
pub struct DataLoader<S> {
    source: S,
    state: watch::Sender<LoadState>,
    in_flight: AtomicBool,
    closed: CancelFlag,
}

impl<S: AssetSource> DataLoader<S> {
    /// Create a loader in the `Loading` state. No request is made yet.
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(LoadState::Loading);
        Self {
            source,
            state,
            in_flight: AtomicBool::new(false),
            closed: CancelFlag::new(),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Observe every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Whether a cycle is currently running.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Tear the loader down: no further state is published and no new cycle
    /// starts. A cycle already in flight finishes without publishing.
    pub fn close(&self) {
        self.closed.cancel();
    }

    /// Start one load cycle on the tokio runtime.
    ///
    /// Returns `None` when the loader is closed or a cycle is already in
    /// flight.
    pub fn activate(self: &Arc<Self>) -> Option<LoadTask>
    where
        S: 'static,
    {
        if self.is_closed() || !self.try_claim() {
            tracing::debug!("load cycle not started: loader busy or closed");
            return None;
        }

        let cancel = CancelFlag::new();
        let loader = Arc::clone(self);
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move { loader.run_claimed(&task_cancel).await });

        Some(LoadTask {
            handle: Some(handle),
            cancel,
        })
    }

    /// Run one load cycle in the current task.
    pub async fn load(&self, cancel: &CancelFlag) -> LoadOutcome {
        if !self.try_claim() {
            return LoadOutcome::AlreadyInFlight;
        }
        self.run_claimed(cancel).await
    }

    fn try_claim(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    async fn run_claimed(&self, cancel: &CancelFlag) -> LoadOutcome {
        let _claim = InFlight(&self.in_flight);

        if !self.publish(cancel, LoadState::Loading) {
            return LoadOutcome::Cancelled;
        }
        tracing::info!("loading assets");

        let result = self.source.fetch().await;

        let (next, outcome) = match result {
            Ok(assets) => {
                let count = assets.len();
                tracing::info!(count, "assets loaded");
                (LoadState::Loaded(assets.into()), LoadOutcome::Loaded(count))
            }
            Err(err) => {
                let failure = LoadFailure::from(&err);
                tracing::warn!(kind = ?failure.kind, error = %failure.message, "asset load failed");
                let kind = failure.kind;
                (LoadState::Error(failure), LoadOutcome::Failed(kind))
            }
        };

        if self.publish(cancel, next) {
            outcome
        } else {
            tracing::debug!("load cycle cancelled; outcome discarded");
            LoadOutcome::Cancelled
        }
    }

    fn publish(&self, cancel: &CancelFlag, state: LoadState) -> bool {
        if cancel.is_cancelled() || self.closed.is_cancelled() {
            return false;
        }
        self.state.send_replace(state);
        true
    }
}

/// Releases the in-flight claim when the cycle ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdash_domain::error::{LoadError, SchemaViolation};
    use std::future::Future;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Source whose response is produced by a closure, counting calls.
    struct FnSource<F> {
        respond: F,
        calls: AtomicUsize,
    }

    impl<F> FnSource<F>
    where
        F: Fn() -> Result<Vec<Asset>, LoadError> + Send + Sync,
    {
        fn new(respond: F) -> Self {
            Self {
                respond,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl<F> AssetSource for FnSource<F>
    where
        F: Fn() -> Result<Vec<Asset>, LoadError> + Send + Sync,
    {
        fn fetch(&self) -> impl Future<Output = Result<Vec<Asset>, LoadError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = (self.respond)();
            async move { result }
        }
    }

    /// Source that blocks until released, so tests can act mid-flight.
    #[derive(Default)]
    struct GatedSource {
        entered: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    impl AssetSource for GatedSource {
        async fn fetch(&self) -> Result<Vec<Asset>, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(vec![Asset::new("late")])
        }
    }

    fn sample() -> Vec<Asset> {
        vec![Asset::new("a"), Asset::new("b"), Asset::new("c")]
    }

    #[tokio::test]
    async fn should_start_in_loading_state() {
        let loader = DataLoader::new(FnSource::new(|| Ok(sample())));
        assert_eq!(loader.state(), LoadState::Loading);
        assert!(!loader.state().is_settled());
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_publish_loaded_assets_in_source_order() {
        let loader = DataLoader::new(FnSource::new(|| Ok(sample())));

        let outcome = loader.load(&CancelFlag::new()).await;

        assert_eq!(outcome, LoadOutcome::Loaded(3));
        let LoadState::Loaded(assets) = loader.state() else {
            panic!("expected loaded state");
        };
        let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_publish_error_with_status_code() {
        let loader = DataLoader::new(FnSource::new(|| {
            Err(LoadError::HttpStatus {
                status: 401,
                reason: "Unauthorized".to_string(),
            })
        }));

        let outcome = loader.load(&CancelFlag::new()).await;

        assert_eq!(outcome, LoadOutcome::Failed(LoadErrorKind::HttpStatus));
        let LoadState::Error(failure) = loader.state() else {
            panic!("expected error state");
        };
        assert!(failure.message.contains("401"));
    }

    #[tokio::test]
    async fn should_publish_schema_violation_as_error() {
        let loader = DataLoader::new(FnSource::new(|| {
            Err(SchemaViolation::MissingTools.into())
        }));

        loader.load(&CancelFlag::new()).await;

        let LoadState::Error(failure) = loader.state() else {
            panic!("expected error state");
        };
        assert_eq!(failure.kind, LoadErrorKind::SchemaViolation);
        assert!(failure.message.contains("tools"));
    }

    #[tokio::test]
    async fn should_not_publish_when_cancelled_before_start() {
        let loader = DataLoader::new(FnSource::new(|| Ok(sample())));
        let cancel = CancelFlag::new();
        cancel.cancel();

        let outcome = loader.load(&cancel).await;

        assert_eq!(outcome, LoadOutcome::Cancelled);
        assert_eq!(loader.state(), LoadState::Loading);
        assert!(!loader.is_in_flight());
    }

    #[tokio::test]
    async fn should_run_spawned_cycle_to_completion() {
        let loader = Arc::new(DataLoader::new(FnSource::new(|| Ok(sample()))));
        let mut rx = loader.subscribe();

        let task = loader.activate().unwrap();
        assert_eq!(task.join().await, LoadOutcome::Loaded(3));

        let settled = rx.wait_for(LoadState::is_settled).await.unwrap().clone();
        assert!(matches!(settled, LoadState::Loaded(ref assets) if assets.len() == 3));
    }

    #[tokio::test]
    async fn should_refuse_second_activation_while_in_flight() {
        let loader = Arc::new(DataLoader::new(GatedSource::default()));

        let first = loader.activate().unwrap();
        assert!(loader.is_in_flight());
        assert!(loader.activate().is_none());
        assert_eq!(
            loader.load(&CancelFlag::new()).await,
            LoadOutcome::AlreadyInFlight
        );

        loader.source.release.notify_one();
        assert_eq!(first.join().await, LoadOutcome::Loaded(1));
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_discard_outcome_when_task_cancelled_mid_flight() {
        let loader = Arc::new(DataLoader::new(GatedSource::default()));

        let task = loader.activate().unwrap();
        loader.source.entered.notified().await;
        task.cancel();
        loader.source.release.notify_one();

        assert_eq!(task.join().await, LoadOutcome::Cancelled);
        assert_eq!(loader.state(), LoadState::Loading);
        assert!(!loader.is_in_flight());
    }

    #[tokio::test]
    async fn should_discard_outcome_when_task_dropped() {
        let loader = Arc::new(DataLoader::new(GatedSource::default()));

        let task = loader.activate().unwrap();
        loader.source.entered.notified().await;
        drop(task);
        loader.source.release.notify_one();

        while loader.is_in_flight() {
            tokio::task::yield_now().await;
        }
        assert_eq!(loader.state(), LoadState::Loading);
    }

    #[tokio::test]
    async fn should_publish_when_detached() {
        let loader = Arc::new(DataLoader::new(FnSource::new(|| Ok(sample()))));
        let mut rx = loader.subscribe();

        loader.activate().unwrap().detach();

        let settled = rx.wait_for(LoadState::is_settled).await.unwrap().clone();
        assert!(matches!(settled, LoadState::Loaded(_)));
    }

    #[tokio::test]
    async fn should_not_publish_after_close() {
        let loader = Arc::new(DataLoader::new(GatedSource::default()));

        let task = loader.activate().unwrap();
        loader.source.entered.notified().await;
        loader.close();
        loader.source.release.notify_one();

        assert_eq!(task.join().await, LoadOutcome::Cancelled);
        assert_eq!(loader.state(), LoadState::Loading);
        assert!(loader.activate().is_none());
    }

    #[tokio::test]
    async fn should_reenter_loading_on_reactivation() {
        let loader = Arc::new(DataLoader::new(GatedSource::default()));

        let first = loader.activate().unwrap();
        loader.source.release.notify_one();
        assert_eq!(first.join().await, LoadOutcome::Loaded(1));
        assert!(loader.state().is_settled());

        let second = loader.activate().unwrap();
        loader.source.entered.notified().await;
        loader.source.entered.notified().await;
        assert_eq!(loader.state(), LoadState::Loading);

        loader.source.release.notify_one();
        assert_eq!(second.join().await, LoadOutcome::Loaded(1));
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn should_replace_snapshot_wholesale() {
        let loader = DataLoader::new(FnSource::new(|| Ok(sample())));

        loader.load(&CancelFlag::new()).await;
        let LoadState::Loaded(first) = loader.state() else {
            panic!("expected loaded state");
        };
        loader.load(&CancelFlag::new()).await;
        let LoadState::Loaded(second) = loader.state() else {
            panic!("expected loaded state");
        };

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }
}
