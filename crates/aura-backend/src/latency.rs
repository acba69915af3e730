// latency.rs — Simulated per-operation latency for the mock backend.
//
// Defaults reproduce the response times the product was designed against
// (300 ms to 1500 ms). Values are milliseconds so the profile can live in
// `.aura/config.toml` under `[latency]`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::Operation;

/// Milliseconds of simulated latency per backend operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatencyProfile {
    #[serde(default = "default_suggestions_ms")]
    pub suggestions_ms: u64,
    #[serde(default = "default_goals_ms")]
    pub goals_ms: u64,
    #[serde(default = "default_add_goal_ms")]
    pub add_goal_ms: u64,
    #[serde(default = "default_decompose_ms")]
    pub decompose_ms: u64,
    #[serde(default = "default_schedule_ms")]
    pub schedule_ms: u64,
    #[serde(default = "default_wellness_insight_ms")]
    pub wellness_insight_ms: u64,
    #[serde(default = "default_financial_ms")]
    pub financial_ms: u64,
    #[serde(default = "default_wellness_ms")]
    pub wellness_ms: u64,
    #[serde(default = "default_automations_ms")]
    pub automations_ms: u64,
    #[serde(default = "default_relationships_ms")]
    pub relationships_ms: u64,
}

fn default_suggestions_ms() -> u64 {
    800
}

fn default_goals_ms() -> u64 {
    500
}

fn default_add_goal_ms() -> u64 {
    400
}

fn default_decompose_ms() -> u64 {
    1500
}

fn default_schedule_ms() -> u64 {
    300
}

fn default_wellness_insight_ms() -> u64 {
    1200
}

fn default_financial_ms() -> u64 {
    1000
}

fn default_wellness_ms() -> u64 {
    900
}

fn default_automations_ms() -> u64 {
    600
}

fn default_relationships_ms() -> u64 {
    700
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            suggestions_ms: default_suggestions_ms(),
            goals_ms: default_goals_ms(),
            add_goal_ms: default_add_goal_ms(),
            decompose_ms: default_decompose_ms(),
            schedule_ms: default_schedule_ms(),
            wellness_insight_ms: default_wellness_insight_ms(),
            financial_ms: default_financial_ms(),
            wellness_ms: default_wellness_ms(),
            automations_ms: default_automations_ms(),
            relationships_ms: default_relationships_ms(),
        }
    }
}

impl LatencyProfile {
    /// A profile where every operation completes without sleeping.
    pub fn instant() -> Self {
        Self {
            suggestions_ms: 0,
            goals_ms: 0,
            add_goal_ms: 0,
            decompose_ms: 0,
            schedule_ms: 0,
            wellness_insight_ms: 0,
            financial_ms: 0,
            wellness_ms: 0,
            automations_ms: 0,
            relationships_ms: 0,
        }
    }

    /// Simulated latency for one operation.
    pub fn delay_for(&self, operation: Operation) -> Duration {
        let ms = match operation {
            Operation::Suggestions => self.suggestions_ms,
            Operation::Goals => self.goals_ms,
            // Removal piggybacks on the write path.
            Operation::AddGoal | Operation::RemoveGoal => self.add_goal_ms,
            Operation::Decompose => self.decompose_ms,
            Operation::Schedule => self.schedule_ms,
            Operation::WellnessInsight => self.wellness_insight_ms,
            Operation::FinancialSnapshot => self.financial_ms,
            Operation::WellnessSnapshot => self.wellness_ms,
            Operation::Automations => self.automations_ms,
            Operation::Relationships => self.relationships_ms,
        };
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_stay_within_product_bounds() {
        let profile = LatencyProfile::default();
        for op in Operation::ALL {
            let delay = profile.delay_for(op);
            assert!(delay >= Duration::from_millis(300), "{} too fast", op);
            assert!(delay <= Duration::from_millis(1500), "{} too slow", op);
        }
    }

    #[test]
    fn instant_profile_has_no_delay() {
        let profile = LatencyProfile::instant();
        assert!(Operation::ALL
            .iter()
            .all(|op| profile.delay_for(*op).is_zero()));
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let profile: LatencyProfile = serde_json::from_str("{\"decompose_ms\": 10}").unwrap();
        assert_eq!(profile.decompose_ms, 10);
        assert_eq!(profile.goals_ms, 500);
    }
}
