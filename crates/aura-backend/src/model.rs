// model.rs — The "life data" records served by the backend.
//
// These are plain data carriers. The only record with behavior is Goal,
// whose progress is bounded to 0..=100 and is only moved through
// `set_progress`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BackendError;

/// Category a goal belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GoalCategory {
    Financial,
    Fitness,
    Skills,
    Wellness,
    Career,
    Personal,
}

impl GoalCategory {
    /// Category assigned to goals created by decomposition.
    pub const DEFAULT: GoalCategory = GoalCategory::Skills;
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GoalCategory::Financial => "Financial",
            GoalCategory::Fitness => "Fitness",
            GoalCategory::Skills => "Skills",
            GoalCategory::Wellness => "Wellness",
            GoalCategory::Career => "Career",
            GoalCategory::Personal => "Personal",
        };
        f.write_str(name)
    }
}

/// A long-running ambition the user is tracking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Unique within the goal collection.
    pub id: Uuid,

    /// Human-readable title (e.g., "Run a Half-Marathon").
    pub title: String,

    pub category: GoalCategory,

    /// Completion percentage, always within 0..=100.
    pub progress: u8,

    pub description: String,

    /// When this goal entered the collection.
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Create a goal from a request. New goals always start at 0% progress.
    pub fn new(request: NewGoal) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: request.title,
            category: request.category,
            progress: 0,
            description: request.description,
            created_at: Utc::now(),
        }
    }

    /// Move progress, rejecting values outside 0..=100.
    pub fn set_progress(&mut self, progress: u8) -> Result<(), BackendError> {
        if progress > 100 {
            return Err(BackendError::Validation(format!(
                "progress must be within 0..=100, got {}",
                progress
            )));
        }
        self.progress = progress;
        Ok(())
    }
}

/// Input to `add_goal`: everything but the id and progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewGoal {
    pub title: String,
    pub category: GoalCategory,
    pub description: String,
}

impl NewGoal {
    /// Description given to goals created from a bare title.
    pub const DEFAULT_DESCRIPTION: &'static str = "A newly set ambition, ready to be tackled.";

    /// A goal request with the default category and description.
    pub fn from_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: GoalCategory::DEFAULT,
            description: Self::DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

/// One actionable step produced by decomposing a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalStep {
    pub id: Uuid,
    pub description: String,
    pub completed: bool,
}

impl GoalStep {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            completed: false,
        }
    }
}

/// Icon tag rendered next to a proactive suggestion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionIcon {
    Calendar,
    Meditation,
    Budget,
    Task,
    User,
    Briefcase,
}

/// A proactive, AI-style nudge shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Label of the call-to-action button (e.g., "Start Review").
    pub action: String,
    pub icon: SuggestionIcon,
    /// Color tag (e.g., "orange").
    pub color: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScheduleCategory {
    Work,
    Personal,
    Wellness,
}

/// One entry of today's agenda.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleItem {
    /// Display time (e.g., "10:00 AM").
    pub time: String,
    pub title: String,
    pub category: ScheduleCategory,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountType {
    Checking,
    Savings,
    Investment,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialAccount {
    pub id: String,
    pub name: String,
    pub account_type: AccountType,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionCategory {
    Income,
    Housing,
    Food,
    Utilities,
    Entertainment,
    Shopping,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    /// Positive for income, negative for spending.
    pub amount: f64,
    /// Relative date (e.g., "2 days ago").
    pub date: String,
    pub category: TransactionCategory,
}

/// Point-in-time view of the user's finances.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialSnapshot {
    pub net_worth: f64,
    /// Percentage of income saved.
    pub savings_rate: u8,
    pub credit_score: u16,
    pub accounts: Vec<FinancialAccount>,
    pub transactions: Vec<Transaction>,
    pub insight: String,
}

impl FinancialSnapshot {
    /// Sum of all account balances.
    pub fn total_balance(&self) -> f64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StressTrend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleepMetrics {
    pub hours: f32,
    /// Sleep quality score, 0..=100.
    pub quality: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityMetrics {
    pub steps: u32,
    pub goal: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StressMetrics {
    pub level: u8,
    pub trend: StressTrend,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySleep {
    pub day: String,
    pub hours: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailySteps {
    pub day: String,
    pub steps: u32,
}

/// Sleep, activity, and stress metrics plus a 7-day series of each.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellnessSnapshot {
    pub sleep: SleepMetrics,
    pub activity: ActivityMetrics,
    pub stress: StressMetrics,
    pub weekly_sleep: Vec<DailySleep>,
    pub weekly_activity: Vec<DailySteps>,
}

impl WellnessSnapshot {
    /// Mean nightly sleep over the weekly series, if any.
    pub fn average_sleep(&self) -> Option<f32> {
        if self.weekly_sleep.is_empty() {
            return None;
        }
        let total: f32 = self.weekly_sleep.iter().map(|d| d.hours).sum();
        Some(total / self.weekly_sleep.len() as f32)
    }

    /// Today's steps as a percentage of the step goal, capped at 100.
    pub fn activity_percent(&self) -> u8 {
        if self.activity.goal == 0 {
            return 100;
        }
        let pct = (self.activity.steps as u64 * 100) / self.activity.goal as u64;
        pct.min(100) as u8
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AutomationCategory {
    Finance,
    Productivity,
    Wellness,
}

/// A background routine the assistant runs on the user's behalf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Automation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub enabled: bool,
    pub category: AutomationCategory,
}

/// Someone in the user's network, with a suggested next touchpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationshipContact {
    pub id: String,
    pub name: String,
    pub role: String,
    /// Relative time of last contact (e.g., "3 months ago").
    pub last_contact: String,
    pub suggestion: String,
    pub avatar_url: String,
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Agent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_goal_starts_at_zero_progress() {
        let goal = Goal::new(NewGoal::from_title("Learn Spanish"));
        assert_eq!(goal.title, "Learn Spanish");
        assert_eq!(goal.progress, 0);
        assert_eq!(goal.category, GoalCategory::Skills);
        assert_eq!(goal.description, NewGoal::DEFAULT_DESCRIPTION);
    }

    #[test]
    fn set_progress_rejects_out_of_range() {
        let mut goal = Goal::new(NewGoal::from_title("Run"));
        goal.set_progress(100).unwrap();
        assert_eq!(goal.progress, 100);

        let result = goal.set_progress(101);
        assert!(matches!(result, Err(BackendError::Validation(_))));
        assert_eq!(goal.progress, 100);
    }

    #[test]
    fn goal_step_starts_incomplete_with_unique_id() {
        let a = GoalStep::new("one");
        let b = GoalStep::new("two");
        assert!(!a.completed);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn activity_percent_caps_at_hundred() {
        let mut snapshot = crate::catalog::wellness_snapshot();
        assert_eq!(snapshot.activity_percent(), 82);
        snapshot.activity.steps = 25_000;
        assert_eq!(snapshot.activity_percent(), 100);
        snapshot.activity.goal = 0;
        assert_eq!(snapshot.activity_percent(), 100);
    }

    #[test]
    fn suggestion_icon_serializes_snake_case() {
        let json = serde_json::to_string(&SuggestionIcon::Briefcase).unwrap();
        assert_eq!(json, "\"briefcase\"");
    }
}
