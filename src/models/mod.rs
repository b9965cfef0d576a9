//! Timetabling domain models.
//!
//! Provides the core data types for representing weekly timetable
//! problems and solutions: the time grid, batches and their subject
//! requirements, classrooms, and placed sessions.
//!
//! | Type | Role |
//! |------|------|
//! | `Day`, `TimeSlot` | The fixed Monday..Saturday hourly grid |
//! | `Batch`, `SubjectRequirement` | What must be scheduled |
//! | `Classroom` | Where sessions can be placed |
//! | `Session` | One placed teaching block (and GA gene) |
//! | `BatchSchedule` | Another batch's committed week |

mod grid;
mod room;
mod session;
mod subject;

pub use grid::{
    block_end_min, format_hhmm, parse_hhmm, ranges_overlap, slot_index, Day, TimeSlot,
    DAY_END_MIN, DAY_START_MIN, LUNCH_END_MIN, LUNCH_START_MIN, SLOTS,
};
pub use room::{room_pool, Classroom, RoomType};
pub use session::{sort_week, BatchSchedule, ScheduleStatus, Session};
pub use subject::{Batch, SessionType, SubjectRequirement};
