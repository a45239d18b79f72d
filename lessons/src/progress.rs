//! Per-user lesson completion record.

use serde::{Deserialize, Serialize};
use skillmint_types::{BlockHeight, LessonId, Principal};

/// One logical record per (user, lesson); re-completion overwrites it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProgress {
    pub user: Principal,
    pub lesson_id: LessonId,
    pub completed: bool,
    /// Completion score, 1 through 100.
    pub score: u32,
    pub completed_at: BlockHeight,
}

impl UserProgress {
    pub const MIN_SCORE: u32 = 1;
    pub const MAX_SCORE: u32 = 100;
}
