//! Subject requirements and batches.
//!
//! A batch is the unit a timetable is generated for: a student group with
//! a headcount and a list of subject requirements. Each requirement pairs
//! a subject with its assigned faculty member and a weekly-hour quota.

use serde::{Deserialize, Serialize};

/// Kind of teaching session a subject needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// Standard theory lecture.
    Lecture,
    /// Hands-on laboratory session.
    Lab,
    /// Discussion-oriented seminar.
    Seminar,
    /// Supervised practical work.
    Practical,
}

impl SessionType {
    /// Whether this session kind requires laboratory infrastructure.
    #[inline]
    pub fn is_lab(self) -> bool {
        matches!(self, SessionType::Lab)
    }
}

/// One subject a batch must attend, with its teaching assignment.
///
/// Immutable for the duration of a scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRequirement {
    /// Subject identifier.
    pub subject_id: String,
    /// Assigned faculty identifier.
    pub faculty_id: String,
    /// Hours to schedule per week (>= 1).
    pub weekly_hours: u32,
    /// Session kind, drives room selection and block splitting.
    pub session_type: SessionType,
    /// Whether students opt into this subject.
    pub is_elective: bool,
}

impl SubjectRequirement {
    /// Creates a requirement with the given teaching assignment.
    pub fn new(
        subject_id: impl Into<String>,
        faculty_id: impl Into<String>,
        weekly_hours: u32,
        session_type: SessionType,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            faculty_id: faculty_id.into(),
            weekly_hours,
            session_type,
            is_elective: false,
        }
    }

    /// Marks the subject as elective.
    pub fn elective(mut self) -> Self {
        self.is_elective = true;
        self
    }
}

/// A student group to schedule a week for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Number of enrolled students.
    pub strength: u32,
    /// Subjects the batch must attend.
    pub subjects: Vec<SubjectRequirement>,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new(id: impl Into<String>, strength: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            strength,
            subjects: Vec::new(),
        }
    }

    /// Sets the batch name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a subject requirement.
    pub fn with_subject(mut self, requirement: SubjectRequirement) -> Self {
        self.subjects.push(requirement);
        self
    }

    /// Total weekly hours across all requirements.
    pub fn total_weekly_hours(&self) -> u32 {
        self.subjects.iter().map(|s| s.weekly_hours).sum()
    }

    /// Looks up a requirement by subject ID.
    pub fn requirement(&self, subject_id: &str) -> Option<&SubjectRequirement> {
        self.subjects.iter().find(|s| s.subject_id == subject_id)
    }
}
