// repository.rs — GoalRepository: the goal collection behind the backend.
//
// The collection is instantiated once per process and injected into the
// backend; nothing reaches it as ambient state. Every method takes the
// lock once, so a single logical update is never observed half-applied.

use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::catalog;
use crate::error::BackendError;
use crate::model::{Goal, NewGoal};

/// Storage for the user's goals.
///
/// Implementations must keep ids unique and preserve insertion order in
/// `list()`.
pub trait GoalRepository: Send + Sync {
    /// All goals, oldest first.
    fn list(&self) -> Result<Vec<Goal>, BackendError>;

    fn get(&self, goal_id: Uuid) -> Result<Option<Goal>, BackendError>;

    /// Create a goal with a fresh id and 0% progress.
    fn add(&self, request: NewGoal) -> Result<Goal, BackendError>;

    /// Replace an existing goal in place.
    fn update(&self, goal: &Goal) -> Result<(), BackendError>;

    /// Delete a goal. Returns `false` if it was not present.
    fn remove(&self, goal_id: Uuid) -> Result<bool, BackendError>;
}

/// Goal collection held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryGoalRepository {
    goals: Mutex<Vec<Goal>>,
}

impl InMemoryGoalRepository {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection pre-populated with the scripted starter goals.
    pub fn seeded() -> Self {
        let goals = catalog::seed_goals()
            .into_iter()
            .map(|(request, progress)| {
                let mut goal = Goal::new(request);
                // Seed progress values are all within range.
                goal.progress = progress.min(100);
                goal
            })
            .collect();
        Self {
            goals: Mutex::new(goals),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Goal>>, BackendError> {
        self.goals
            .lock()
            .map_err(|_| BackendError::Persistence("goal collection lock poisoned".into()))
    }
}

impl GoalRepository for InMemoryGoalRepository {
    fn list(&self) -> Result<Vec<Goal>, BackendError> {
        Ok(self.lock()?.clone())
    }

    fn get(&self, goal_id: Uuid) -> Result<Option<Goal>, BackendError> {
        Ok(self.lock()?.iter().find(|g| g.id == goal_id).cloned())
    }

    fn add(&self, request: NewGoal) -> Result<Goal, BackendError> {
        if request.title.trim().is_empty() {
            return Err(BackendError::Validation("goal title is empty".into()));
        }
        let goal = Goal::new(request);
        self.lock()?.push(goal.clone());
        tracing::debug!(goal_id = %goal.id, title = %goal.title, "goal added");
        Ok(goal)
    }

    fn update(&self, goal: &Goal) -> Result<(), BackendError> {
        if goal.progress > 100 {
            return Err(BackendError::Validation(format!(
                "progress must be within 0..=100, got {}",
                goal.progress
            )));
        }
        let mut goals = self.lock()?;
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal.id)
            .ok_or(BackendError::GoalNotFound(goal.id))?;
        *slot = goal.clone();
        Ok(())
    }

    fn remove(&self, goal_id: Uuid) -> Result<bool, BackendError> {
        let mut goals = self.lock()?;
        let before = goals.len();
        goals.retain(|g| g.id != goal_id);
        Ok(goals.len() != before)
    }
}
