//! Classroom model.
//!
//! Classrooms are the physical resources sessions are placed in. Each has
//! a capacity and a type; lab sessions must land in lab rooms, every other
//! session kind in lecture or seminar rooms.

use serde::{Deserialize, Serialize};

use super::SessionType;

/// Classroom type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// General-purpose lecture hall.
    Lecture,
    /// Laboratory with specialized equipment.
    Lab,
    /// Small discussion room.
    Seminar,
}

/// A schedulable classroom.
///
/// Read-only during scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique room identifier.
    pub id: String,
    /// Seats available (>= 1).
    pub capacity: u32,
    /// Room classification.
    pub room_type: RoomType,
}

impl Classroom {
    /// Creates a classroom.
    pub fn new(id: impl Into<String>, capacity: u32, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            capacity,
            room_type,
        }
    }

    /// Creates a lecture hall.
    pub fn lecture(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, capacity, RoomType::Lecture)
    }

    /// Creates a lab.
    pub fn lab(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, capacity, RoomType::Lab)
    }

    /// Creates a seminar room.
    pub fn seminar(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, capacity, RoomType::Seminar)
    }

    /// Whether this room's type suits a session kind.
    ///
    /// Lab sessions need lab rooms; lectures, seminars, and practicals go
    /// to lecture or seminar rooms.
    pub fn suits(&self, session_type: SessionType) -> bool {
        if session_type.is_lab() {
            self.room_type == RoomType::Lab
        } else {
            matches!(self.room_type, RoomType::Lecture | RoomType::Seminar)
        }
    }
}

/// Rooms usable for a session kind, in input order.
pub fn room_pool(rooms: &[Classroom], session_type: SessionType) -> Vec<&Classroom> {
    rooms.iter().filter(|r| r.suits(session_type)).collect()
}
