//! Live room cache backed by the durable room store.
//!
//! Every room lives in a [`RoomSlot`] behind a tokio mutex. Callers resolve a
//! [`RoomHandle`] once and lock it for each mutation, so all changes to one
//! room (and the writes and broadcasts that follow them) are serialized while
//! different rooms proceed independently.
//!
//! Rooms that nobody holds a handle to, that have no unsaved changes and
//! that have been idle past the timeout are dropped by [`SessionStore::evict_idle`].
//! The next lookup rehydrates them from the durable store.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::{Mutex, MutexGuard};

use richup_domain::{Room, RoomId, RoomSummary};

use crate::infrastructure::ports::{ClockPort, RepoError, RoomRepo};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Room not found: {0}")]
    NotFound(RoomId),
    #[error("Room already exists: {0}")]
    AlreadyExists(RoomId),
}

struct SlotState {
    room: Room,
    last_activity: DateTime<Utc>,
    /// Mutated since the last successful durable write.
    dirty: bool,
}

struct RoomSlot {
    state: Mutex<SlotState>,
    clock: Arc<dyn ClockPort>,
}

/// Shared reference to one live room.
#[derive(Clone)]
pub struct RoomHandle(Arc<RoomSlot>);

impl RoomHandle {
    fn new(room: Room, dirty: bool, clock: Arc<dyn ClockPort>) -> Self {
        let state = SlotState {
            room,
            last_activity: clock.now(),
            dirty,
        };
        Self(Arc::new(RoomSlot {
            state: Mutex::new(state),
            clock,
        }))
    }

    /// Take the room's exclusive lock. Counts as activity.
    pub async fn lock(&self) -> RoomGuard<'_> {
        let mut inner = self.0.state.lock().await;
        inner.last_activity = self.0.clock.now();
        RoomGuard { inner }
    }

    /// Copy of the current room without counting as activity.
    pub async fn peek(&self) -> Room {
        self.0.state.lock().await.room.clone()
    }
}

/// Exclusive access to a live room.
///
/// Mutable access marks the room as having unsaved changes until
/// [`SessionStore::persist`] succeeds.
pub struct RoomGuard<'a> {
    inner: MutexGuard<'a, SlotState>,
}

impl Deref for RoomGuard<'_> {
    type Target = Room;

    fn deref(&self) -> &Room {
        &self.inner.room
    }
}

impl DerefMut for RoomGuard<'_> {
    fn deref_mut(&mut self) -> &mut Room {
        self.inner.dirty = true;
        &mut self.inner.room
    }
}

/// Process-wide room cache.
pub struct SessionStore {
    rooms: DashMap<RoomId, RoomHandle>,
    repo: Option<Arc<dyn RoomRepo>>,
    clock: Arc<dyn ClockPort>,
    idle_timeout: chrono::Duration,
}

impl SessionStore {
    /// `repo = None` keeps rooms in memory only; they are then never evicted.
    pub fn new(
        repo: Option<Arc<dyn RoomRepo>>,
        clock: Arc<dyn ClockPort>,
        idle_timeout: Duration,
    ) -> Self {
        let idle_timeout =
            chrono::Duration::from_std(idle_timeout).unwrap_or_else(|_| chrono::Duration::days(365));
        Self {
            rooms: DashMap::new(),
            repo,
            clock,
            idle_timeout,
        }
    }

    pub fn is_durable(&self) -> bool {
        self.repo.is_some()
    }

    /// Resolve a room, loading it from durable storage on a cache miss.
    ///
    /// Storage failures are logged and reported as `NotFound`.
    pub async fn get(&self, room_id: &RoomId) -> Result<RoomHandle, SessionError> {
        if let Some(handle) = self.rooms.get(room_id) {
            return Ok(handle.clone());
        }
        let Some(repo) = &self.repo else {
            return Err(SessionError::NotFound(room_id.clone()));
        };

        match repo.get(room_id).await {
            Ok(Some(room)) => {
                tracing::debug!(room_id = %room_id, "Rehydrated room from storage");
                let handle = self
                    .rooms
                    .entry(room_id.clone())
                    .or_insert_with(|| RoomHandle::new(room, false, self.clock.clone()))
                    .clone();
                Ok(handle)
            }
            Ok(None) => Err(SessionError::NotFound(room_id.clone())),
            Err(e) => {
                tracing::warn!(room_id = %room_id, error = %e, "Failed to load room");
                Err(SessionError::NotFound(room_id.clone()))
            }
        }
    }

    /// Register a new room and write it through, best effort.
    pub async fn create(&self, room: Room) -> Result<RoomHandle, SessionError> {
        let room_id = room.room_id().clone();
        if self.rooms.contains_key(&room_id) {
            return Err(SessionError::AlreadyExists(room_id));
        }
        if let Some(repo) = &self.repo {
            match repo.get(&room_id).await {
                Ok(Some(_)) => return Err(SessionError::AlreadyExists(room_id)),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(room_id = %room_id, error = %e, "Could not check storage for room id");
                }
            }
        }

        let handle = match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(_) => return Err(SessionError::AlreadyExists(room_id)),
            Entry::Vacant(slot) => slot
                .insert(RoomHandle::new(room, true, self.clock.clone()))
                .clone(),
        };

        {
            let mut guard = handle.lock().await;
            if let Err(e) = self.persist(&mut guard).await {
                tracing::warn!(room_id = %room_id, error = %e, "Failed to persist new room");
            }
        }
        tracing::info!(room_id = %room_id, "Room created");
        Ok(handle)
    }

    /// Write the locked room to durable storage.
    ///
    /// On failure the in-memory room stays authoritative and keeps its
    /// unsaved mark, which also protects it from eviction.
    pub async fn persist(&self, guard: &mut RoomGuard<'_>) -> Result<(), RepoError> {
        if let Some(repo) = &self.repo {
            repo.save(&guard.inner.room).await?;
        }
        guard.inner.dirty = false;
        Ok(())
    }

    /// Summaries of the rooms currently in memory, ordered by room id.
    pub async fn list(&self) -> Vec<RoomSummary> {
        let handles: Vec<RoomHandle> = self.rooms.iter().map(|entry| entry.value().clone()).collect();
        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            summaries.push(handle.peek().await.summary());
        }
        summaries.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        summaries
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Drop idle rooms from memory. Returns how many were evicted.
    ///
    /// A room stays if anyone holds its handle, if it is locked, if it has
    /// unsaved changes, or if the store has no durable backing.
    pub fn evict_idle(&self) -> usize {
        if self.repo.is_none() {
            return 0;
        }
        let now = self.clock.now();
        let mut evicted = 0;

        self.rooms.retain(|room_id, handle| {
            if Arc::strong_count(&handle.0) > 1 {
                return true;
            }
            let Ok(state) = handle.0.state.try_lock() else {
                return true;
            };
            if state.dirty || now - state.last_activity < self.idle_timeout {
                return true;
            }
            tracing::debug!(room_id = %room_id, "Evicting idle room");
            evicted += 1;
            false
        });

        if evicted > 0 {
            tracing::info!(evicted, remaining = self.rooms.len(), "Evicted idle rooms");
        }
        evicted
    }
}
