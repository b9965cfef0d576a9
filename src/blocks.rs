//! Block splitting policy.
//!
//! Converts a subject's weekly hour quota into the block durations that
//! actually get placed. Both generation paths (greedy and genetic) share
//! one policy so lab blocking stays consistent between them.

use serde::{Deserialize, Serialize};

use crate::models::SubjectRequirement;

/// Policy for splitting weekly hours into placement blocks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlockPolicy {
    /// Largest block (hours) a lab subject may occupy in one sitting.
    pub max_lab_block_hours: u32,
}

impl Default for BlockPolicy {
    fn default() -> Self {
        Self {
            max_lab_block_hours: 2,
        }
    }
}

impl BlockPolicy {
    /// Policy that splits every subject into 1-hour blocks, labs included.
    pub fn uniform() -> Self {
        Self {
            max_lab_block_hours: 1,
        }
    }

    /// Block durations for a requirement, largest first.
    ///
    /// Lab subjects fill blocks of up to `max_lab_block_hours` (3h lab with
    /// the default policy gives `[2, 1]`); every other session kind uses
    /// 1-hour blocks.
    pub fn block_durations(&self, requirement: &SubjectRequirement) -> Vec<u32> {
        let block_size = if requirement.session_type.is_lab() {
            self.max_lab_block_hours.max(1)
        } else {
            1
        };

        let mut remaining = requirement.weekly_hours;
        let mut blocks = Vec::new();
        while remaining > 0 {
            let duration = remaining.min(block_size);
            blocks.push(duration);
            remaining -= duration;
        }
        blocks
    }

    /// Largest single block a requirement will produce.
    ///
    /// Used as the primary sort key when ordering requirements for
    /// placement (big blocks fragment the week fastest).
    pub fn largest_block(&self, requirement: &SubjectRequirement) -> u32 {
        self.block_durations(requirement)
            .first()
            .copied()
            .unwrap_or(0)
    }
}
