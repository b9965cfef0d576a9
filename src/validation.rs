//! Input validation and post-hoc week validation.
//!
//! Two independent checks bracket a scheduling run:
//!
//! - [`validate_input`] inspects a batch and room set before scheduling:
//!   duplicate IDs, zero quantities, and session kinds with no usable
//!   room pool. Advisory only; the schedulers themselves never fail.
//! - [`validate_week`] walks a produced session list once and flags any
//!   faculty or classroom double-booking. It deliberately does not trust
//!   the engine's fitness number; the two are independent cross-checks.

use serde::Serialize;
use std::collections::HashSet;

use crate::models::{room_pool, Batch, Classroom, Day, Session};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A quantity that must be positive is zero.
    ZeroQuantity,
    /// A required session kind has no usable rooms at all.
    NoRoomPool,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a batch and room set before scheduling.
///
/// Checks:
/// 1. No duplicate subject IDs within the batch
/// 2. No duplicate room IDs
/// 3. Batch strength, weekly hours, and room capacities are positive
/// 4. Every required session kind has at least one type-matching room
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(batch: &Batch, rooms: &[Classroom]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut subject_ids = HashSet::new();
    for requirement in &batch.subjects {
        if !subject_ids.insert(requirement.subject_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject ID: {}", requirement.subject_id),
            ));
        }
        if requirement.weekly_hours == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroQuantity,
                format!("Subject '{}' requires zero weekly hours", requirement.subject_id),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for room in rooms {
        if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }
        if room.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroQuantity,
                format!("Room '{}' has zero capacity", room.id),
            ));
        }
    }

    if batch.strength == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroQuantity,
            format!("Batch '{}' has zero strength", batch.id),
        ));
    }

    let mut checked_kinds = HashSet::new();
    for requirement in &batch.subjects {
        if checked_kinds.insert(requirement.session_type) && room_pool(rooms, requirement.session_type).is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoRoomPool,
                format!(
                    "No rooms usable for {:?} sessions (required by '{}')",
                    requirement.session_type, requirement.subject_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// One double-booked (resource, day, start) key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotConflict {
    /// Faculty or room identifier.
    pub resource_id: String,
    /// Day of the collision.
    pub day: Day,
    /// Slot start (minutes since midnight).
    pub start_min: u32,
}

/// Double-bookings found in a produced week.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeekConflicts {
    /// Faculty booked twice at the same (day, start).
    pub faculty_overlaps: Vec<SlotConflict>,
    /// Rooms booked twice at the same (day, start).
    pub classroom_overlaps: Vec<SlotConflict>,
}

/// Outcome of the post-hoc week check.
#[derive(Debug, Clone, Serialize)]
pub struct WeekValidation {
    /// Whether no double-booking was found.
    pub is_valid: bool,
    /// The collisions, when any.
    pub conflicts: WeekConflicts,
}

/// Checks a produced week for faculty and classroom double-bookings.
///
/// Single pass tracking (faculty, day, start) and (room, day, start)
/// keys; every repeat becomes a conflict entry.
pub fn validate_week(sessions: &[Session]) -> WeekValidation {
    let mut faculty_seen: HashSet<(&str, Day, u32)> = HashSet::new();
    let mut room_seen: HashSet<(&str, Day, u32)> = HashSet::new();
    let mut conflicts = WeekConflicts::default();

    for session in sessions {
        if !faculty_seen.insert((session.faculty_id.as_str(), session.day, session.start_min)) {
            conflicts.faculty_overlaps.push(SlotConflict {
                resource_id: session.faculty_id.clone(),
                day: session.day,
                start_min: session.start_min,
            });
        }
        if !room_seen.insert((session.room_id.as_str(), session.day, session.start_min)) {
            conflicts.classroom_overlaps.push(SlotConflict {
                resource_id: session.room_id.clone(),
                day: session.day,
                start_min: session.start_min,
            });
        }
    }

    WeekValidation {
        is_valid: conflicts.faculty_overlaps.is_empty() && conflicts.classroom_overlaps.is_empty(),
        conflicts,
    }
}
