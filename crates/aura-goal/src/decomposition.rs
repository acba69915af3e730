// decomposition.rs — A goal's action plan, as shown under the goal form.

use std::collections::HashSet;

use aura_backend::GoalStep;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered steps for one goal. Toggling a step is purely local; nothing is
/// written back to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Decomposition {
    goal_title: String,
    steps: Vec<GoalStep>,
}

impl Decomposition {
    /// Build a plan from freshly decomposed steps. Every step starts
    /// incomplete and duplicate ids are reissued.
    pub fn new(goal_title: impl Into<String>, steps: Vec<GoalStep>) -> Self {
        let mut seen = HashSet::new();
        let steps = steps
            .into_iter()
            .map(|mut step| {
                step.completed = false;
                if !seen.insert(step.id) {
                    step.id = Uuid::new_v4();
                    seen.insert(step.id);
                }
                step
            })
            .collect();

        Self {
            goal_title: goal_title.into(),
            steps,
        }
    }

    pub fn goal_title(&self) -> &str {
        &self.goal_title
    }

    pub fn steps(&self) -> &[GoalStep] {
        &self.steps
    }

    /// Flip one step's completion. Returns `false` for an unknown id.
    pub fn toggle_step(&mut self, id: Uuid) -> bool {
        match self.steps.iter_mut().find(|step| step.id == id) {
            Some(step) => {
                step.completed = !step.completed;
                true
            }
            None => false,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|step| step.completed).count()
    }

    /// Learning goals get a course suggestion alongside the plan.
    pub fn learning_track(&self) -> bool {
        self.goal_title.to_lowercase().contains("learn")
    }
}
