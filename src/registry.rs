//! Process-wide mapping from room name to room.
//!
//! Owned by the server and mutated only under its state lock; the
//! registry itself is a plain synchronous service so it can be tested
//! in isolation.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::error::RoomError;
use crate::room::Room;

#[derive(Debug, Default)]
pub struct Registry {
    rooms: HashMap<String, Room>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// NFKC-fold and trim a raw room name so visually identical names
    /// collide. Applied before every lookup and insert.
    pub fn normalize(name: &str) -> String {
        name.trim().nfkc().collect()
    }

    /// Create a room with `occupant` in the cross seat.
    ///
    /// Returns the normalized name under which the room was keyed.
    pub fn create(&mut self, name: &str, occupant: Uuid) -> Result<String, RoomError> {
        let key = Self::normalize(name);
        if self.rooms.contains_key(&key) {
            return Err(RoomError::AlreadyExists);
        }
        self.rooms.insert(key.clone(), Room::new(key.clone(), occupant));
        Ok(key)
    }

    /// Seat `occupant` as nought in an existing, waiting room.
    pub fn join(&mut self, name: &str, occupant: Uuid) -> Result<String, RoomError> {
        let key = Self::normalize(name);
        let room = self.rooms.get_mut(&key).ok_or(RoomError::NotExists)?;
        if !room.is_waiting() {
            return Err(RoomError::AlreadyFull);
        }
        room.seat_nought(occupant);
        Ok(key)
    }

    /// Delete a room, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Room> {
        self.rooms.remove(&Self::normalize(name))
    }

    pub fn get(&self, name: &str) -> Option<&Room> {
        self.rooms.get(&Self::normalize(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Room> {
        self.rooms.get_mut(&Self::normalize(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rooms.contains_key(&Self::normalize(name))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
