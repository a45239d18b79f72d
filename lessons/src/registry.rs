//! The lesson registry — plan creation and completion tracking.

use crate::plan::LessonPlan;
use crate::progress::UserProgress;
use serde::{Deserialize, Serialize};
use skillmint_types::{Amount, BlockHeight, EngineError, LessonId, Principal, ProtocolParams};
use std::collections::BTreeMap;

/// Owns every lesson plan and every (user, lesson) progress record.
///
/// Ordered maps keep iteration and serialization deterministic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonRegistry {
    plans: BTreeMap<LessonId, LessonPlan>,
    progress: BTreeMap<(Principal, LessonId), UserProgress>,
    next_id: u64,
}

impl LessonRegistry {
    pub fn new() -> Self {
        Self {
            plans: BTreeMap::new(),
            progress: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Publish a new lesson plan and return its id.
    pub fn create_plan(
        &mut self,
        creator: Principal,
        title: &str,
        description: &str,
        skill_category: &str,
        difficulty: u32,
        price: Amount,
        now: BlockHeight,
        params: &ProtocolParams,
    ) -> Result<LessonId, EngineError> {
        if title.is_empty() || title.len() > params.max_title_len {
            return Err(EngineError::InvalidInput(
                "title must be non-empty and within bounds".into(),
            ));
        }
        if skill_category.is_empty() || skill_category.len() > params.max_category_len {
            return Err(EngineError::InvalidInput(
                "skill category must be non-empty and within bounds".into(),
            ));
        }
        if description.len() > params.max_description_len {
            return Err(EngineError::InvalidInput("description too long".into()));
        }
        if !(LessonPlan::MIN_DIFFICULTY..=LessonPlan::MAX_DIFFICULTY).contains(&difficulty) {
            return Err(EngineError::InvalidSkillLevel {
                value: difficulty,
                min: LessonPlan::MIN_DIFFICULTY,
                max: LessonPlan::MAX_DIFFICULTY,
            });
        }

        let id = LessonId::new(self.next_id);
        self.next_id += 1;
        self.plans.insert(
            id,
            LessonPlan {
                id,
                creator,
                title: title.to_owned(),
                description: description.to_owned(),
                skill_category: skill_category.to_owned(),
                difficulty,
                price,
                completion_count: 0,
                created_at: now,
            },
        );
        Ok(id)
    }

    /// Record a completion for `user`. Anyone may complete any lesson,
    /// including its creator. Re-completion overwrites the progress record
    /// without growing the lesson's completion count.
    pub fn complete(
        &mut self,
        user: Principal,
        lesson_id: LessonId,
        score: u32,
        now: BlockHeight,
    ) -> Result<(), EngineError> {
        if !self.plans.contains_key(&lesson_id) {
            return Err(EngineError::NotFound(lesson_id.to_string()));
        }
        if !(UserProgress::MIN_SCORE..=UserProgress::MAX_SCORE).contains(&score) {
            return Err(EngineError::InvalidSkillLevel {
                value: score,
                min: UserProgress::MIN_SCORE,
                max: UserProgress::MAX_SCORE,
            });
        }

        let key = (user.clone(), lesson_id);
        let first_completion = !self.progress.contains_key(&key);
        self.progress.insert(
            key,
            UserProgress {
                user,
                lesson_id,
                completed: true,
                score,
                completed_at: now,
            },
        );
        if first_completion {
            if let Some(plan) = self.plans.get_mut(&lesson_id) {
                plan.completion_count += 1;
            }
        }
        Ok(())
    }

    pub fn get(&self, lesson_id: LessonId) -> Option<&LessonPlan> {
        self.plans.get(&lesson_id)
    }

    pub fn progress(&self, user: &Principal, lesson_id: LessonId) -> Option<&UserProgress> {
        self.progress.get(&(user.clone(), lesson_id))
    }

    /// Whether `user` holds a completed progress record for `lesson_id`.
    pub fn has_completed(&self, user: &Principal, lesson_id: LessonId) -> bool {
        self.progress(user, lesson_id).map_or(false, |p| p.completed)
    }

    pub fn plan_count(&self) -> u64 {
        self.plans.len() as u64
    }
}

impl Default for LessonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ProtocolParams {
        ProtocolParams::default()
    }

    fn creator() -> Principal {
        Principal::new("creator")
    }

    fn student() -> Principal {
        Principal::new("student")
    }

    fn create_valid_plan(registry: &mut LessonRegistry) -> LessonId {
        registry
            .create_plan(
                creator(),
                "Advanced React Development",
                "Learn advanced React patterns and hooks",
                "Programming",
                4,
                Amount::new(5000),
                BlockHeight::new(1),
                &params(),
            )
            .expect("valid plan should be created")
    }

    #[test]
    fn test_create_plan_allocates_monotonic_ids() {
        let mut registry = LessonRegistry::new();
        let first = create_valid_plan(&mut registry);
        let second = create_valid_plan(&mut registry);
        assert_eq!(first.value(), 1);
        assert_eq!(second.value(), 2);
        assert_eq!(registry.plan_count(), 2);
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut registry = LessonRegistry::new();
        let result = registry.create_plan(
            creator(),
            "",
            "Valid description",
            "Programming",
            3,
            Amount::new(1000),
            BlockHeight::new(1),
            &params(),
        );
        assert!(matches!(result.unwrap_err(), EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_category_rejected() {
        let mut registry = LessonRegistry::new();
        let result = registry.create_plan(
            creator(),
            "Valid Title",
            "Valid description",
            "",
            3,
            Amount::new(1000),
            BlockHeight::new(1),
            &params(),
        );
        assert!(matches!(result.unwrap_err(), EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_difficulty_bounds() {
        let mut registry = LessonRegistry::new();
        for difficulty in [0, 6] {
            let result = registry.create_plan(
                creator(),
                "Valid Title",
                "Valid description",
                "Programming",
                difficulty,
                Amount::new(1000),
                BlockHeight::new(1),
                &params(),
            );
            assert!(matches!(
                result.unwrap_err(),
                EngineError::InvalidSkillLevel { min: 1, max: 5, .. }
            ));
        }
        for difficulty in 1..=5 {
            registry
                .create_plan(
                    creator(),
                    "Valid Title",
                    "Valid description",
                    "Programming",
                    difficulty,
                    Amount::new(1000),
                    BlockHeight::new(1),
                    &params(),
                )
                .expect("in-range difficulty should be accepted");
        }
    }

    #[test]
    fn test_complete_unknown_lesson() {
        let mut registry = LessonRegistry::new();
        let result = registry.complete(student(), LessonId::new(999_999), 85, BlockHeight::new(2));
        assert!(matches!(result.unwrap_err(), EngineError::NotFound(_)));
    }

    #[test]
    fn test_completion_score_bounds() {
        let mut registry = LessonRegistry::new();
        let lesson = create_valid_plan(&mut registry);
        for score in [0, 101] {
            let result = registry.complete(student(), lesson, score, BlockHeight::new(2));
            assert!(matches!(
                result.unwrap_err(),
                EngineError::InvalidSkillLevel { min: 1, max: 100, .. }
            ));
        }
        registry
            .complete(student(), lesson, 85, BlockHeight::new(2))
            .expect("in-range score should be accepted");
    }

    #[test]
    fn test_completion_count_tracks_distinct_completers() {
        let mut registry = LessonRegistry::new();
        let lesson = create_valid_plan(&mut registry);

        registry.complete(student(), lesson, 90, BlockHeight::new(2)).unwrap();
        registry
            .complete(Principal::new("other"), lesson, 75, BlockHeight::new(2))
            .unwrap();
        assert_eq!(registry.get(lesson).unwrap().completion_count, 2);

        // Re-completion by the same user overwrites the record only.
        registry.complete(student(), lesson, 95, BlockHeight::new(3)).unwrap();
        assert_eq!(registry.get(lesson).unwrap().completion_count, 2);
        let progress = registry.progress(&student(), lesson).unwrap();
        assert_eq!(progress.score, 95);
        assert_eq!(progress.completed_at, BlockHeight::new(3));
    }

    #[test]
    fn test_creator_may_complete_own_lesson() {
        let mut registry = LessonRegistry::new();
        let lesson = create_valid_plan(&mut registry);
        registry
            .complete(creator(), lesson, 100, BlockHeight::new(2))
            .expect("no ownership restriction on completion");
        assert!(registry.has_completed(&creator(), lesson));
    }
}
