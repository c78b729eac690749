//! Per-principal project watch stream.
//!
//! One [`UserProjectWatcher`] exists per active subscription. It maintains the
//! principal's known visible set incrementally and never re-scans the full
//! namespace universe on a membership change.
//!
//! # Architecture
//!
//! ```text
//! membership cache fan-out:
//!   membership_changed() -> diff against known set -> send_timeout(incoming)
//!                                                           ↓
//! run loop (one task per watcher):
//!   select!(cancel, fatal, bootstrap, incoming) -> outgoing channel
//!                                                           ↓
//! consumer:
//!   ReceiverStream -> drained until closed
//! ```
//!
//! # Backpressure
//!
//! The notification entry point must return within a bounded, short time
//! regardless of consumer speed. When the incoming queue cannot accept an
//! event within the configured grace window the watcher deregisters itself
//! from the membership cache, records a terminal error, and its run loop
//! closes the stream after emitting a single `Error` event. The consumer must
//! re-subscribe if it wants a fresh stream.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::trace;
use tracing::warn;

use super::ProjectEvent;
use super::WatchScope;
use crate::convert_and_filter;
use crate::AccessCache;
use crate::CacheWatcher;
use crate::Identity;
use crate::NamespaceStore;
use crate::Project;
use crate::ProjectSelector;
use crate::Result;
use crate::WatchConfig;
use crate::WatchError;
use crate::ACTIVE_PROJECT_WATCHERS;
use crate::PROJECT_WATCH_EVENTS;
use crate::SLOW_WATCHER_TERMINATIONS;

pub struct UserProjectWatcher {
    watcher_id: u64,
    identity: Identity,
    scope: WatchScope,
    selector: ProjectSelector,

    namespace_store: Arc<dyn NamespaceStore>,
    access_cache: Arc<dyn AccessCache>,

    /// Grace window for buffering a change into the incoming queue
    grace: Duration,

    /// Namespaces currently visible to the identity and passing the selector,
    /// keyed by name, holding the last representation handed to the consumer.
    /// Guarded across diff and enqueue so successive transitions for one
    /// namespace are never reordered.
    known: tokio::sync::Mutex<HashMap<String, Project>>,

    /// Diff engine output, drained by the run loop
    incoming_tx: mpsc::Sender<ProjectEvent>,
    incoming_rx: Mutex<Option<mpsc::Receiver<ProjectEvent>>>,

    /// Bootstrap/resync events, independent of membership diffing
    bootstrap_tx: mpsc::Sender<ProjectEvent>,
    bootstrap_rx: Mutex<Option<mpsc::Receiver<ProjectEvent>>>,

    /// Terminal error slot, written at most once
    fatal_tx: mpsc::Sender<WatchError>,
    fatal_rx: Mutex<Option<mpsc::Receiver<WatchError>>>,

    /// Externally observable event stream
    outgoing_tx: Mutex<Option<mpsc::Sender<ProjectEvent>>>,
    outgoing_rx: Mutex<Option<mpsc::Receiver<ProjectEvent>>>,

    cancel: CancellationToken,
    started: AtomicBool,
    removed: AtomicBool,
}

impl UserProjectWatcher {
    /// Construct a watcher and seed its known visible set from the access
    /// cache, so the first membership notification is diffed against ground
    /// truth rather than an empty state.
    ///
    /// With `include_existing`, an `Added` event for every seeded project is
    /// queued on the bootstrap source and delivered once the run loop starts.
    ///
    /// A failed seed listing propagates to the caller; the watcher is never
    /// started.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        watcher_id: u64,
        identity: Identity,
        scope: WatchScope,
        selector: ProjectSelector,
        namespace_store: Arc<dyn NamespaceStore>,
        access_cache: Arc<dyn AccessCache>,
        include_existing: bool,
        config: &WatchConfig,
    ) -> Result<Arc<Self>> {
        config.validate()?;

        let seeded = access_cache.list_visible(&identity, &selector)?;

        let mut known = HashMap::new();
        let mut initial_events = Vec::new();
        for namespace in &seeded {
            if !scope.allows(&namespace.name) {
                continue;
            }
            if let Some(project) = convert_and_filter(namespace, &selector) {
                if include_existing {
                    initial_events.push(ProjectEvent::Added(project.clone()));
                }
                known.insert(namespace.name.clone(), project);
            }
        }

        let (incoming_tx, incoming_rx) = mpsc::channel(config.incoming_queue_capacity);
        let (bootstrap_tx, bootstrap_rx) = mpsc::channel(initial_events.len().max(1));
        let (fatal_tx, fatal_rx) = mpsc::channel(1);
        let (outgoing_tx, outgoing_rx) = mpsc::channel(config.outgoing_queue_capacity);

        // capacity is sized to the seed set, every send fits
        for event in initial_events {
            let _ = bootstrap_tx.try_send(event);
        }

        debug!(
            watcher_id,
            principal = identity.name(),
            seeded = known.len(),
            "project watcher constructed"
        );

        Ok(Arc::new(Self {
            watcher_id,
            identity,
            scope,
            selector,
            namespace_store,
            access_cache,
            grace: config.enqueue_grace(),
            known: tokio::sync::Mutex::new(known),
            incoming_tx,
            incoming_rx: Mutex::new(Some(incoming_rx)),
            bootstrap_tx,
            bootstrap_rx: Mutex::new(Some(bootstrap_rx)),
            fatal_tx,
            fatal_rx: Mutex::new(Some(fatal_rx)),
            outgoing_tx: Mutex::new(Some(outgoing_tx)),
            outgoing_rx: Mutex::new(Some(outgoing_rx)),
            cancel: CancellationToken::new(),
            started: AtomicBool::new(false),
            removed: AtomicBool::new(false),
        }))
    }

    /// Begin the run loop. Single-use.
    pub fn start(self: &Arc<Self>) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(WatchError::AlreadyStarted.into());
        }

        let watcher = Arc::clone(self);
        tokio::spawn(async move {
            watcher.run().await;
        });

        Ok(())
    }

    /// Claim the event stream consumers drain until it closes. Single-use.
    pub fn output_stream(&self) -> Result<ReceiverStream<ProjectEvent>> {
        match self.outgoing_rx.lock().take() {
            Some(receiver) => Ok(ReceiverStream::new(receiver)),
            None => Err(WatchError::StreamClaimed.into()),
        }
    }

    /// Request cancellation. The run loop exits promptly even with events
    /// still pending; repeated calls are safe.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn watcher_id(&self) -> u64 {
        self.watcher_id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Inject a recovery event on the bootstrap source, e.g. after a
    /// namespace-cache level resync. Waits for queue space; fails once the
    /// watcher is cancelled.
    pub async fn push_resync(
        &self,
        event: ProjectEvent,
    ) -> Result<()> {
        tokio::select! {
            _ = self.cancel.cancelled() => Err(WatchError::Stopped.into()),
            sent = self.bootstrap_tx.send(event) => sent.map_err(|_| WatchError::Stopped.into()),
        }
    }

    /// Snapshot of the known visible set, sorted by name.
    /// Primarily for testing and monitoring purposes.
    pub async fn visible_namespaces(&self) -> Vec<String> {
        let known = self.known.lock().await;
        let mut names: Vec<String> = known.keys().cloned().collect();
        names.sort();
        names
    }

    /// Multiplex the bootstrap source and the diff engine queue onto the
    /// outgoing stream until cancelled or a terminal error is recorded.
    /// FIFO order holds within each source; no ordering is guaranteed between
    /// them.
    async fn run(self: Arc<Self>) {
        let mut incoming = self.incoming_rx.lock().take().expect("run() is entered once");
        let mut bootstrap = self.bootstrap_rx.lock().take().expect("run() is entered once");
        let mut fatal = self.fatal_rx.lock().take().expect("run() is entered once");
        let outgoing = self.outgoing_tx.lock().take().expect("run() is entered once");

        ACTIVE_PROJECT_WATCHERS.inc();
        info!(
            watcher_id = self.watcher_id,
            principal = self.identity.name(),
            "project watch stream started"
        );

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    debug!(watcher_id = self.watcher_id, "project watch stream cancelled");
                    break;
                }

                Some(error) = fatal.recv() => {
                    let _ = self.forward(&outgoing, ProjectEvent::Error(error)).await;
                    break;
                }

                Some(event) = bootstrap.recv() => {
                    if !self.forward(&outgoing, event).await {
                        break;
                    }
                }

                Some(event) = incoming.recv() => {
                    if !self.forward(&outgoing, event).await {
                        break;
                    }
                }
            }
        }

        // every exit path deregisters; the guard makes repeated closes safe
        self.deregister();
        ACTIVE_PROJECT_WATCHERS.dec();
        info!(watcher_id = self.watcher_id, "project watch stream ended");
        // outgoing sender drops here, the consumer observes end-of-stream
    }

    /// Forward one event to the consumer, aborting on cancellation or a
    /// dropped stream. Returns whether the run loop should keep going.
    async fn forward(
        &self,
        outgoing: &mpsc::Sender<ProjectEvent>,
        event: ProjectEvent,
    ) -> bool {
        let kind = event.kind();

        tokio::select! {
            _ = self.cancel.cancelled() => false,
            sent = outgoing.send(event) => match sent {
                Ok(()) => {
                    PROJECT_WATCH_EVENTS.with_label_values(&[kind.as_str()]).inc();
                    trace!(
                        watcher_id = self.watcher_id,
                        kind = kind.as_str(),
                        "event forwarded"
                    );
                    true
                }
                Err(_) => {
                    debug!(watcher_id = self.watcher_id, "watch consumer dropped the stream");
                    false
                }
            }
        }
    }

    /// Buffer a diffed event for the run loop within the grace window.
    /// Failure to buffer is fatal for this watcher, never for the caller.
    async fn enqueue(
        &self,
        namespace_name: &str,
        event: ProjectEvent,
    ) {
        let accepted = if self.grace.is_zero() {
            self.incoming_tx.try_send(event).is_ok()
        } else {
            self.incoming_tx.send_timeout(event, self.grace).await.is_ok()
        };

        if !accepted {
            self.overflow(namespace_name);
        }
    }

    /// Backpressure overflow: deregister first so the membership cache stops
    /// dispatching to this watcher, then record the terminal error. The
    /// capacity-1 slot keeps the error single-shot.
    fn overflow(
        &self,
        namespace_name: &str,
    ) {
        warn!(
            watcher_id = self.watcher_id,
            principal = self.identity.name(),
            namespace = namespace_name,
            "slow watcher, unable to buffer change, terminating stream"
        );
        SLOW_WATCHER_TERMINATIONS
            .with_label_values(&[self.identity.name()])
            .inc();

        self.deregister();
        let _ = self.fatal_tx.try_send(WatchError::SlowWatcher {
            namespace: namespace_name.to_string(),
        });
    }

    /// At most one removal call over the watcher's lifetime
    fn deregister(&self) {
        if !self.removed.swap(true, Ordering::SeqCst) {
            self.access_cache.remove_watcher(self.watcher_id);
        }
    }
}

#[async_trait]
impl CacheWatcher for UserProjectWatcher {
    fn watcher_id(&self) -> u64 {
        self.watcher_id
    }

    /// Diff a full membership snapshot for one namespace against the known
    /// visible set and buffer the resulting transition, if any.
    ///
    /// Redundant notifications are idempotent: an unchanged resource version
    /// for an already-known namespace produces no event.
    async fn membership_changed(
        &self,
        namespace_name: &str,
        users: &HashSet<String>,
        groups: &HashSet<String>,
    ) {
        let visible =
            self.scope.allows(namespace_name) && self.identity.has_access(users, groups);

        // Diff and enqueue under one guard: transitions for a namespace must
        // reach the queue in the order they were computed.
        let mut known = self.known.lock().await;

        let event = if visible {
            let Some(namespace) = self.namespace_store.get(namespace_name) else {
                // concurrently deleted; the eviction notification reconciles the entry
                debug!(
                    watcher_id = self.watcher_id,
                    namespace = namespace_name,
                    "visible namespace missing from store, no event"
                );
                return;
            };

            let converted = convert_and_filter(&namespace, &self.selector);
            let previous_version = known.get(namespace_name).map(|p| p.resource_version);

            match (previous_version, converted) {
                (None, Some(project)) => {
                    known.insert(namespace_name.to_string(), project.clone());
                    ProjectEvent::Added(project)
                }
                (Some(version), Some(project)) if version == project.resource_version => {
                    return;
                }
                (Some(_), Some(project)) => {
                    known.insert(namespace_name.to_string(), project.clone());
                    ProjectEvent::Modified(project)
                }
                (Some(_), None) => match known.remove(namespace_name) {
                    Some(previous) => ProjectEvent::Deleted(previous),
                    None => return,
                },
                (None, None) => return,
            }
        } else {
            match known.remove(namespace_name) {
                Some(previous) => ProjectEvent::Deleted(previous),
                None => return,
            }
        };

        self.enqueue(namespace_name, event).await;
    }
}
