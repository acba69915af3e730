// backend.rs — The Backend trait: Aura's only data-provisioning boundary.
//
// Every method is a suspension point. Implementations are shared across
// concurrent callers behind an `Arc<dyn Backend>`, so they must be
// Send + Sync and keep their own state consistent.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BackendError;
use crate::model::{
    Automation, FinancialSnapshot, Goal, GoalStep, NewGoal, RelationshipContact, ScheduleItem,
    Suggestion, WellnessSnapshot,
};

/// Identifies one backend operation (for latency, faults, and logging).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Suggestions,
    Goals,
    AddGoal,
    RemoveGoal,
    Decompose,
    Schedule,
    WellnessInsight,
    FinancialSnapshot,
    WellnessSnapshot,
    Automations,
    Relationships,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::Suggestions,
        Operation::Goals,
        Operation::AddGoal,
        Operation::RemoveGoal,
        Operation::Decompose,
        Operation::Schedule,
        Operation::WellnessInsight,
        Operation::FinancialSnapshot,
        Operation::WellnessSnapshot,
        Operation::Automations,
        Operation::Relationships,
    ];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Suggestions => "fetch_suggestions",
            Operation::Goals => "fetch_goals",
            Operation::AddGoal => "add_goal",
            Operation::RemoveGoal => "remove_goal",
            Operation::Decompose => "decompose_goal",
            Operation::Schedule => "fetch_schedule",
            Operation::WellnessInsight => "fetch_wellness_insight",
            Operation::FinancialSnapshot => "fetch_financial_snapshot",
            Operation::WellnessSnapshot => "fetch_wellness_snapshot",
            Operation::Automations => "fetch_automations",
            Operation::Relationships => "fetch_relationships",
        };
        f.write_str(name)
    }
}

/// Asynchronous data provider behind the dashboard, goals, and settings views.
///
/// Results are owned copies: mutating a returned `Vec<Goal>` never affects
/// the backend's collection.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Up to three proactive suggestions, in display order.
    async fn fetch_suggestions(&self) -> Result<Vec<Suggestion>, BackendError>;

    async fn fetch_goals(&self) -> Result<Vec<Goal>, BackendError>;

    /// Add a goal; the backend assigns the id and starts progress at 0.
    async fn add_goal(&self, goal: NewGoal) -> Result<Goal, BackendError>;

    /// Remove a goal. Returns `false` if it was not present.
    ///
    /// Only used to compensate a partially completed goal pipeline.
    async fn remove_goal(&self, goal_id: Uuid) -> Result<bool, BackendError>;

    /// Break a goal title into an ordered list of fresh, incomplete steps.
    async fn decompose_goal(&self, title: &str) -> Result<Vec<GoalStep>, BackendError>;

    async fn fetch_schedule(&self) -> Result<Vec<ScheduleItem>, BackendError>;

    async fn fetch_wellness_insight(&self) -> Result<String, BackendError>;

    async fn fetch_financial_snapshot(&self) -> Result<FinancialSnapshot, BackendError>;

    async fn fetch_wellness_snapshot(&self) -> Result<WellnessSnapshot, BackendError>;

    async fn fetch_automations(&self) -> Result<Vec<Automation>, BackendError>;

    async fn fetch_relationships(&self) -> Result<Vec<RelationshipContact>, BackendError>;
}
