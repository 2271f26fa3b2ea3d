pub mod types;
pub mod error;
pub mod workload;
pub mod assign;

pub use types::{total_slots, Assignment, Game, GameId, Judge, JudgeId, Schedule, WorkloadEntry};
pub use error::{AssignmentError, InputKind};
pub use workload::WorkloadTracker;
pub use assign::schedule_judges;
