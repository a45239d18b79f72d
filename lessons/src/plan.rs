//! Lesson plan record.

use serde::{Deserialize, Serialize};
use skillmint_types::{Amount, BlockHeight, LessonId, Principal};

/// A published lesson plan.
///
/// Immutable after creation except for `completion_count`; never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonPlan {
    pub id: LessonId,
    pub creator: Principal,
    pub title: String,
    pub description: String,
    pub skill_category: String,
    /// Difficulty rating, 1 (beginner) through 5 (master).
    pub difficulty: u32,
    /// Price in the smallest currency unit.
    pub price: Amount,
    /// Number of distinct principals that have completed this lesson.
    pub completion_count: u64,
    pub created_at: BlockHeight,
}

impl LessonPlan {
    pub const MIN_DIFFICULTY: u32 = 1;
    pub const MAX_DIFFICULTY: u32 = 5;
}
