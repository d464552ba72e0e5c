//! Room aggregate.
//!
//! A `RoomState` owns everything whose lifetime is tied to one room: the
//! `Room` entity itself, its Message Log, the leave markers of departed
//! members and the fan-out group of subscribed connections. The registry
//! hands it out behind a per-room mutex, so every method here runs
//! linearized with respect to other events of the same room.

use std::collections::HashSet;

use tokio::sync::OwnedMutexGuard;

use super::{
    entity::{ChatMessage, Room},
    message_log::MessageLog,
    value_object::{ConnectionId, DisplayName, Username},
};

/// Exclusive access to one room for the duration of an event.
pub type RoomLock = OwnedMutexGuard<RoomState>;

#[derive(Debug)]
pub struct RoomState {
    room: Room,
    log: MessageLog,
    /// Users whose departure has already been announced
    leave_markers: HashSet<Username>,
    /// Connections receiving this room's broadcasts, in subscription order
    subscribers: Vec<ConnectionId>,
    destroyed: bool,
}

impl RoomState {
    pub fn new(room: Room) -> Self {
        Self {
            room,
            log: MessageLog::new(),
            leave_markers: HashSet::new(),
            subscribers: Vec::new(),
            destroyed: false,
        }
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn members(&self) -> &[Username] {
        &self.room.members
    }

    pub fn is_empty(&self) -> bool {
        self.room.members.is_empty()
    }

    pub fn rename(&mut self, display_name: DisplayName) {
        self.room.display_name = display_name;
    }

    // ----- Message Log -----

    pub fn append_message(&mut self, message: ChatMessage) {
        self.log.append(message);
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        self.log.snapshot()
    }

    pub fn message_count(&self) -> usize {
        self.log.len()
    }

    // ----- fan-out group -----

    /// Add a connection to the fan-out group (no-op if already subscribed)
    pub fn subscribe(&mut self, connection_id: ConnectionId) {
        if !self.subscribers.contains(&connection_id) {
            self.subscribers.push(connection_id);
        }
    }

    pub fn unsubscribe(&mut self, connection_id: &ConnectionId) {
        self.subscribers.retain(|id| id != connection_id);
    }

    pub fn subscribers(&self) -> Vec<ConnectionId> {
        self.subscribers.clone()
    }

    // ----- lifecycle -----

    /// True once the registry has dropped this room. A destroyed state is
    /// never handed out again.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
        self.subscribers.clear();
        self.leave_markers.clear();
    }

    pub(super) fn leave_markers_mut(&mut self) -> &mut HashSet<Username> {
        &mut self.leave_markers
    }

    pub(super) fn room_mut(&mut self) -> &mut Room {
        &mut self.room
    }

    #[cfg(test)]
    pub(crate) fn has_leave_marker(&self, username: &Username) -> bool {
        self.leave_markers.contains(username)
    }
}
