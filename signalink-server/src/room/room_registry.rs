use dashmap::DashMap;
use signalink_core::utils::DEFAULT_ROOM_CAPACITY;
use signalink_core::{ParticipantId, RoomId};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("room '{room}' is full ({capacity} participants)")]
    RoomFull { room: RoomId, capacity: usize },
}

/// Result of a successful join, captured under the same lock as the insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Members other than the joiner, oldest first.
    pub others: Vec<ParticipantId>,
    pub created: bool,
    pub already_member: bool,
}

/// A participant removed from one room, and who is still in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room: RoomId,
    pub remaining: Vec<ParticipantId>,
}

/// In-memory room membership.
///
/// A room is present iff it has at least one member. Each room's member list
/// lives in a single DashMap entry, so creating, mutating and deleting it all
/// happen under that entry's shard lock.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Vec<ParticipantId>>,
    capacity: usize,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ROOM_CAPACITY)
    }
}

impl RoomRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            rooms: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn join(
        &self,
        room: &RoomId,
        participant: ParticipantId,
    ) -> Result<JoinOutcome, RegistryError> {
        let mut members = self.rooms.entry(room.clone()).or_default();

        let already_member = members.contains(&participant);
        let mut created = false;

        if !already_member {
            // capacity >= 1, so a freshly created (empty) entry never lands here
            if members.len() >= self.capacity {
                return Err(RegistryError::RoomFull {
                    room: room.clone(),
                    capacity: self.capacity,
                });
            }
            created = members.is_empty();
            members.push(participant);
        }

        let others = members
            .iter()
            .filter(|p| **p != participant)
            .copied()
            .collect();

        debug!(
            "Registry: {} in room '{}' ({} members)",
            participant,
            room,
            members.len()
        );

        Ok(JoinOutcome {
            others,
            created,
            already_member,
        })
    }

    /// Removes `participant` from every room it belongs to.
    pub fn leave(&self, participant: &ParticipantId) -> Vec<Departure> {
        let mut departures = Vec::new();

        self.rooms.retain(|room, members| {
            if let Some(pos) = members.iter().position(|p| p == participant) {
                members.remove(pos);
                departures.push(Departure {
                    room: room.clone(),
                    remaining: members.clone(),
                });
            }
            !members.is_empty()
        });

        departures
    }

    /// Removes `participant` from a single room.
    pub fn leave_room(&self, room: &RoomId, participant: &ParticipantId) -> Option<Departure> {
        let mut departure = None;

        self.rooms.remove_if_mut(room, |room, members| {
            if let Some(pos) = members.iter().position(|p| p == participant) {
                members.remove(pos);
                departure = Some(Departure {
                    room: room.clone(),
                    remaining: members.clone(),
                });
            }
            members.is_empty()
        });

        departure
    }

    pub fn other_members(&self, room: &RoomId, participant: &ParticipantId) -> Vec<ParticipantId> {
        self.rooms
            .get(room)
            .map(|members| {
                members
                    .iter()
                    .filter(|p| *p != participant)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn members(&self, room: &RoomId) -> Vec<ParticipantId> {
        self.rooms
            .get(room)
            .map(|members| members.clone())
            .unwrap_or_default()
    }

    pub fn contains_room(&self, room: &RoomId) -> bool {
        self.rooms.contains_key(room)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn snapshot(&self) -> HashMap<RoomId, Vec<ParticipantId>> {
        self.rooms
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
