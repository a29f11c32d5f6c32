//! The event coordinator.
//!
//! Single coherent API for mutating events under an offline-first policy.
//! Every mutation goes Local-Pending -> Local-Committed ->
//! Remote-Attempted(Success|Failure): the local store write and the
//! in-memory mirror refresh gate the caller-visible result, and the remote
//! push is a detached best-effort task whose failure is logged, never
//! surfaced, never rolled back.

use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assistant::{Assistant, AssistantAction};
use crate::connectivity::ConnectivityMonitor;
use crate::conflict;
use crate::error::{DaybookError, DaybookResult};
use crate::event::{Event, EventDraft, EventPatch};
use crate::remote::RemoteStore;
use crate::store::{ChatLog, ChatMessage, EventTable};

/// What an assistant-driven request ended up doing.
#[derive(Debug, Clone)]
pub enum AssistantOutcome {
    Created(Event),
    Updated(Event),
    Deleted(Uuid),
    Queried(Vec<Event>),
    /// No mutation; the assistant's chat reply, if it gave one.
    Answer(Option<String>),
}

enum RemoteOp {
    Create(Event),
    Update(Uuid, EventPatch),
    Delete(Uuid),
}

/// Orchestrates the local store, the in-memory mirror, and the opportunistic
/// remote sync. Constructed once by the composition root; every collaborator
/// is injected.
pub struct EventCoordinator {
    store: EventTable,
    chat: ChatLog,
    mirror: RwLock<Vec<Event>>,
    remote: Option<Arc<dyn RemoteStore>>,
    assistant: Option<Arc<dyn Assistant>>,
    connectivity: ConnectivityMonitor,
    /// Detached push tasks, kept only so shutdown (and tests) can drain them.
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl EventCoordinator {
    pub fn new(
        store: EventTable,
        chat: ChatLog,
        remote: Option<Arc<dyn RemoteStore>>,
        assistant: Option<Arc<dyn Assistant>>,
        connectivity: ConnectivityMonitor,
    ) -> DaybookResult<Self> {
        let mirror = RwLock::new(store.get_all()?);
        Ok(EventCoordinator {
            store,
            chat,
            mirror,
            remote,
            assistant,
            connectivity,
            pending: Mutex::new(Vec::new()),
        })
    }

    pub fn connectivity(&self) -> &ConnectivityMonitor {
        &self.connectivity
    }

    // =========================================================================
    // Reads (mirror snapshots)
    // =========================================================================

    /// All events, sorted by start. Readers must re-fetch after each
    /// mutation rather than caching independently.
    pub fn events(&self) -> Vec<Event> {
        self.mirror.read().expect("mirror lock").clone()
    }

    pub fn event(&self, id: Uuid) -> Option<Event> {
        self.mirror
            .read()
            .expect("mirror lock")
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    /// Events intersecting `[start, end]`, inclusive on both ends.
    pub fn events_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Event> {
        self.mirror
            .read()
            .expect("mirror lock")
            .iter()
            .filter(|e| e.start <= end && e.end >= start)
            .cloned()
            .collect()
    }

    /// Non-cancelled events overlapping the candidate range, excluding the
    /// event being edited.
    pub fn detect_conflicts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Vec<Event> {
        let mirror = self.mirror.read().expect("mirror lock");
        conflict::detect_conflicts(&mirror, start, end, exclude)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn has_conflict(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> bool {
        !self.detect_conflicts(start, end, exclude).is_empty()
    }

    pub fn chat_history(&self) -> DaybookResult<Vec<ChatMessage>> {
        self.chat.all()
    }

    pub fn clear_chat(&self) -> DaybookResult<()> {
        self.chat.clear()
    }

    // =========================================================================
    // Mutations (local-first)
    // =========================================================================

    /// Create an event. The returned record is the Local-Committed state;
    /// the remote push, if any, happens after and cannot fail this call.
    pub fn create(&self, draft: EventDraft) -> DaybookResult<Event> {
        draft.validate()?;
        let event = self.store.create(&draft)?;
        self.mirror_upsert(event.clone());
        self.push_remote(RemoteOp::Create(event.clone()));
        Ok(event)
    }

    /// Merge partial fields into an existing event.
    pub fn update(&self, id: Uuid, patch: EventPatch) -> DaybookResult<Event> {
        let event = self.store.update(id, &patch)?;
        self.mirror_upsert(event.clone());
        self.push_remote(RemoteOp::Update(id, patch));
        Ok(event)
    }

    /// Delete an event. Unknown ids are an error (see `EventTable::delete`).
    pub fn delete(&self, id: Uuid) -> DaybookResult<()> {
        self.store.delete(id)?;
        self.mirror.write().expect("mirror lock").retain(|e| e.id != id);
        self.push_remote(RemoteOp::Delete(id));
        Ok(())
    }

    fn mirror_upsert(&self, event: Event) {
        let mut mirror = self.mirror.write().expect("mirror lock");
        match mirror.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => mirror.push(event),
        }
        mirror.sort_by_key(|e| e.start);
    }

    /// Dispatch the best-effort remote push. Only entered when the monitor
    /// currently believes we are online; failures are logged and absorbed.
    fn push_remote(&self, op: RemoteOp) {
        if !self.connectivity.is_online() {
            return;
        }
        let Some(remote) = self.remote.clone() else {
            return;
        };

        let handle = tokio::spawn(async move {
            let (kind, id, result) = match op {
                RemoteOp::Create(event) => {
                    let id = event.id;
                    ("create", id, remote.create_event(&event).await.map(|_| ()))
                }
                RemoteOp::Update(id, patch) => {
                    ("update", id, remote.update_event(id, &patch).await.map(|_| ()))
                }
                RemoteOp::Delete(id) => ("delete", id, remote.delete_event(id).await),
            };

            match result {
                Ok(()) => debug!(op = kind, event_id = %id, "remote sync ok"),
                Err(e) => {
                    warn!(op = kind, event_id = %id, error = %e, "remote sync failed, local state stands")
                }
            }
        });

        self.pending.lock().expect("pending lock").push(handle);
    }

    /// Wait for in-flight remote pushes. Mutation callers never join these
    /// tasks; this exists for orderly shutdown (and deterministic tests).
    pub async fn flush_remote(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut pending = self.pending.lock().expect("pending lock");
            pending.drain(..).collect()
        };
        for handle in handles {
            let _ = handle.await;
        }
    }

    // =========================================================================
    // Assistant path
    // =========================================================================

    /// Drive a calendar action from free-form text.
    ///
    /// Unlike `create`, this requires the network up front: without the
    /// remote parse there is no draft to commit, so it fails fast with
    /// `Offline` instead of attempting a local-only fallback. Once the
    /// assistant returns, the mutating variants follow the identical
    /// local-first path as ordinary mutations.
    pub async fn create_from_prompt(&self, text: &str) -> DaybookResult<AssistantOutcome> {
        if !self.connectivity.is_online() {
            return Err(DaybookError::Offline);
        }
        let assistant = self
            .assistant
            .clone()
            .ok_or_else(|| DaybookError::Assistant("no assistant configured".to_string()))?;

        let reply = assistant.interpret(text).await?;
        let kind = reply.action.kind();

        let outcome = match reply.action {
            AssistantAction::CreateEvent { payload } => {
                AssistantOutcome::Created(self.create(payload)?)
            }
            AssistantAction::UpdateEvent { id, payload } => {
                AssistantOutcome::Updated(self.update(id, payload)?)
            }
            AssistantAction::DeleteEvent { id } => {
                self.delete(id)?;
                AssistantOutcome::Deleted(id)
            }
            AssistantAction::QueryEvents { filter } => {
                AssistantOutcome::Queried(self.store.query(&filter)?)
            }
            AssistantAction::NoAction => AssistantOutcome::Answer(reply.message.clone()),
        };

        self.chat.append(text, reply.message, Some(kind))?;
        Ok(outcome)
    }

    // =========================================================================
    // Connectivity transitions
    // =========================================================================

    /// Spawn the reconnect watcher. On every offline->online transition a
    /// best-effort health probe runs against the remote; its outcome is only
    /// logged. Bidirectional diff/merge is not attempted.
    pub fn watch_connectivity(self: &Arc<Self>) -> JoinHandle<()> {
        let coordinator = Arc::clone(self);
        let mut rx = self.connectivity.subscribe();
        // Read synchronously so the baseline is the state at install time,
        // not whatever the channel holds once the task first runs
        let mut was_online = *rx.borrow();

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let online = *rx.borrow_and_update();
                if online && !was_online {
                    coordinator.reconcile().await;
                }
                was_online = online;
            }
        })
    }

    /// Best-effort reconciliation after regaining connectivity.
    async fn reconcile(&self) {
        let Some(remote) = &self.remote else {
            return;
        };
        match remote.health().await {
            Ok(()) => info!("back online, remote reachable"),
            Err(e) => warn!(error = %e, "back online but remote probe failed"),
        }
    }
}
