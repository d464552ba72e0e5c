//! Presence Tracker: membership changes and leave-notification dedup.
//!
//! A departure can be reported twice (an explicit `leave_room` followed by
//! the transport's disconnect). Only the first removal since the last join
//! is announced.

use super::{room_state::RoomState, value_object::Username};

impl RoomState {
    /// Add `username` to the member list (no-op if present) and clear its leave marker.
    pub fn join(&mut self, username: &Username) {
        if !self.room().is_member(username) {
            self.room_mut().members.push(username.clone());
        }
        self.leave_markers_mut().remove(username);
    }

    /// Remove `username` from the member list.
    ///
    /// Returns whether a leave notification must be emitted. Removing a
    /// user who is not a member changes nothing and is never announced.
    pub fn leave(&mut self, username: &Username) -> bool {
        let members = &mut self.room_mut().members;
        let Some(position) = members.iter().position(|m| m == username) else {
            return false;
        };
        members.remove(position);

        self.leave_markers_mut().insert(username.clone())
    }
}
