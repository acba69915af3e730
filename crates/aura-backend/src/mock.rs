// mock.rs — MockBackend: scripted content behind simulated latency.
//
// Each call sleeps for the operation's configured latency, consults the
// FaultPlan, and then serves a fresh copy of the catalog content. Goals are
// the only mutable data and live in the injected GoalRepository.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::backend::{Backend, Operation};
use crate::catalog;
use crate::error::BackendError;
use crate::latency::LatencyProfile;
use crate::model::{
    Automation, FinancialSnapshot, Goal, GoalStep, NewGoal, RelationshipContact, ScheduleItem,
    Suggestion, WellnessSnapshot,
};
use crate::repository::{GoalRepository, InMemoryGoalRepository};

/// How an operation misbehaves under a [`FaultPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultMode {
    /// Every call fails.
    Always,
    /// The next `n` calls fail, then the operation recovers.
    Times(u32),
}

/// Injected failures, keyed by operation.
///
/// Shared by reference so a test can arm or clear faults while a backend is
/// already in use.
#[derive(Debug, Default)]
pub struct FaultPlan {
    faults: Mutex<HashMap<Operation, FaultMode>>,
}

impl FaultPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`FaultPlan::arm`].
    pub fn with(self, operation: Operation, mode: FaultMode) -> Self {
        self.arm(operation, mode);
        self
    }

    /// Make `operation` fail according to `mode`, replacing any earlier fault.
    pub fn arm(&self, operation: Operation, mode: FaultMode) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.insert(operation, mode);
        }
    }

    /// Remove any fault for `operation`.
    pub fn clear(&self, operation: Operation) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.remove(&operation);
        }
    }

    /// Consume one failure for `operation`, if armed.
    pub fn check(&self, operation: Operation) -> Result<(), BackendError> {
        let mut faults = self
            .faults
            .lock()
            .map_err(|_| BackendError::Persistence("fault plan lock poisoned".into()))?;

        let fail = match faults.get_mut(&operation) {
            None => false,
            Some(FaultMode::Always) => true,
            Some(FaultMode::Times(0)) => false,
            Some(FaultMode::Times(remaining)) => {
                *remaining -= 1;
                true
            }
        };
        if matches!(faults.get(&operation), Some(FaultMode::Times(0))) {
            faults.remove(&operation);
        }

        if fail {
            return Err(BackendError::Unavailable {
                operation,
                reason: "injected fault".into(),
            });
        }
        Ok(())
    }
}

/// A [`Backend`] serving scripted content after a simulated delay.
pub struct MockBackend {
    goals: Arc<dyn GoalRepository>,
    latency: LatencyProfile,
    faults: Arc<FaultPlan>,
}

impl MockBackend {
    /// Create a backend over an injected goal collection.
    pub fn new(goals: Arc<dyn GoalRepository>, latency: LatencyProfile) -> Self {
        Self {
            goals,
            latency,
            faults: Arc::new(FaultPlan::new()),
        }
    }

    /// A backend over the scripted starter goals.
    pub fn seeded(latency: LatencyProfile) -> Self {
        Self::new(Arc::new(InMemoryGoalRepository::seeded()), latency)
    }

    /// Attach a fault plan (replaces the empty default).
    pub fn with_faults(mut self, faults: Arc<FaultPlan>) -> Self {
        self.faults = faults;
        self
    }

    pub fn faults(&self) -> &Arc<FaultPlan> {
        &self.faults
    }

    pub fn goal_repository(&self) -> &Arc<dyn GoalRepository> {
        &self.goals
    }

    /// Sleep for the operation's latency, then apply any injected fault.
    async fn simulate(&self, operation: Operation) -> Result<(), BackendError> {
        let delay = self.latency.delay_for(operation);
        tracing::debug!(%operation, delay_ms = delay.as_millis() as u64, "backend call");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.faults.check(operation).inspect_err(|e| {
            tracing::warn!(%operation, error = %e, "backend call failed");
        })
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn fetch_suggestions(&self) -> Result<Vec<Suggestion>, BackendError> {
        self.simulate(Operation::Suggestions).await?;
        let mut pool = catalog::suggestions();
        pool.shuffle(&mut rand::thread_rng());
        pool.truncate(catalog::SUGGESTION_LIMIT);
        Ok(pool)
    }

    async fn fetch_goals(&self) -> Result<Vec<Goal>, BackendError> {
        self.simulate(Operation::Goals).await?;
        self.goals.list()
    }

    async fn add_goal(&self, goal: NewGoal) -> Result<Goal, BackendError> {
        self.simulate(Operation::AddGoal).await?;
        self.goals.add(goal)
    }

    async fn remove_goal(&self, goal_id: Uuid) -> Result<bool, BackendError> {
        self.simulate(Operation::RemoveGoal).await?;
        self.goals.remove(goal_id)
    }

    async fn decompose_goal(&self, title: &str) -> Result<Vec<GoalStep>, BackendError> {
        if title.trim().is_empty() {
            return Err(BackendError::Validation("goal title is empty".into()));
        }
        tracing::info!(title, "decomposing goal");
        self.simulate(Operation::Decompose).await?;
        Ok(catalog::DECOMPOSITION_STEPS
            .iter()
            .map(|description| GoalStep::new(*description))
            .collect())
    }

    async fn fetch_schedule(&self) -> Result<Vec<ScheduleItem>, BackendError> {
        self.simulate(Operation::Schedule).await?;
        Ok(catalog::schedule())
    }

    async fn fetch_wellness_insight(&self) -> Result<String, BackendError> {
        self.simulate(Operation::WellnessInsight).await?;
        Ok(catalog::WELLNESS_INSIGHT.to_string())
    }

    async fn fetch_financial_snapshot(&self) -> Result<FinancialSnapshot, BackendError> {
        self.simulate(Operation::FinancialSnapshot).await?;
        Ok(catalog::financial_snapshot())
    }

    async fn fetch_wellness_snapshot(&self) -> Result<WellnessSnapshot, BackendError> {
        self.simulate(Operation::WellnessSnapshot).await?;
        Ok(catalog::wellness_snapshot())
    }

    async fn fetch_automations(&self) -> Result<Vec<Automation>, BackendError> {
        self.simulate(Operation::Automations).await?;
        Ok(catalog::automations())
    }

    async fn fetch_relationships(&self) -> Result<Vec<RelationshipContact>, BackendError> {
        self.simulate(Operation::Relationships).await?;
        Ok(catalog::relationships())
    }
}
