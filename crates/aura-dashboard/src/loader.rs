// loader.rs — DashboardLoader: the dashboard and wellness views' data loads.
//
// The dashboard issues four independent backend calls through the
// aggregator. The default load renders whatever arrived and raises one
// error toast naming the sources that did not, so the view never stays in
// its loading state.

use std::sync::Arc;

use aura_backend::{Backend, Goal, ScheduleItem, Suggestion, WellnessSnapshot};
use aura_notify::NotificationCenter;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::aggregator::DataAggregator;
use crate::error::{AggregateError, FailureCause, SourceFailure};
use crate::source::Source;

/// Source keys, in declaration order.
pub const SUGGESTIONS: &str = "suggestions";
pub const GOALS: &str = "goals";
pub const WELLNESS_INSIGHT: &str = "wellness_insight";
pub const SCHEDULE: &str = "schedule";
pub const WELLNESS_SNAPSHOT: &str = "wellness_snapshot";

/// One source's payload. Sources of a single aggregation must share a type,
/// so the dashboard's heterogeneous results are wrapped here.
#[derive(Debug, Clone)]
pub enum DashboardPart {
    Suggestions(Vec<Suggestion>),
    Goals(Vec<Goal>),
    WellnessInsight(String),
    Schedule(Vec<ScheduleItem>),
    WellnessSnapshot(WellnessSnapshot),
}

/// What the dashboard renders. A `None` section failed to load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardView {
    pub suggestions: Option<Vec<Suggestion>>,
    pub goals: Option<Vec<Goal>>,
    pub wellness_insight: Option<String>,
    pub schedule: Option<Vec<ScheduleItem>>,
}

impl DashboardView {
    fn apply(&mut self, part: DashboardPart) {
        match part {
            DashboardPart::Suggestions(v) => self.suggestions = Some(v),
            DashboardPart::Goals(v) => self.goals = Some(v),
            DashboardPart::WellnessInsight(v) => self.wellness_insight = Some(v),
            DashboardPart::Schedule(v) => self.schedule = Some(v),
            DashboardPart::WellnessSnapshot(_) => {}
        }
    }

    /// True when every section loaded.
    pub fn is_complete(&self) -> bool {
        self.suggestions.is_some()
            && self.goals.is_some()
            && self.wellness_insight.is_some()
            && self.schedule.is_some()
    }
}

/// A partial-rendering load result.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub view: DashboardView,
    pub failed: Vec<SourceFailure>,
}

/// The wellness view: metrics plus the agent's insight.
#[derive(Debug, Clone, Serialize)]
pub struct WellnessView {
    pub snapshot: WellnessSnapshot,
    pub insight: String,
}

pub struct DashboardLoader {
    backend: Arc<dyn Backend>,
    aggregator: DataAggregator,
    notifications: NotificationCenter,
}

impl DashboardLoader {
    pub fn new(
        backend: Arc<dyn Backend>,
        aggregator: DataAggregator,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            backend,
            aggregator,
            notifications,
        }
    }

    /// The four dashboard sources: suggestions, goals, wellness insight,
    /// schedule.
    pub fn sources(&self) -> Vec<Source<DashboardPart>> {
        let suggestions = self.backend.clone();
        let goals = self.backend.clone();
        let insight = self.backend.clone();
        let schedule = self.backend.clone();

        vec![
            Source::new(SUGGESTIONS, move || {
                let backend = suggestions.clone();
                async move { backend.fetch_suggestions().await.map(DashboardPart::Suggestions) }
            }),
            Source::new(GOALS, move || {
                let backend = goals.clone();
                async move { backend.fetch_goals().await.map(DashboardPart::Goals) }
            }),
            Source::new(WELLNESS_INSIGHT, move || {
                let backend = insight.clone();
                async move {
                    backend
                        .fetch_wellness_insight()
                        .await
                        .map(DashboardPart::WellnessInsight)
                }
            }),
            Source::new(SCHEDULE, move || {
                let backend = schedule.clone();
                async move { backend.fetch_schedule().await.map(DashboardPart::Schedule) }
            }),
        ]
    }

    /// Load every section that can be loaded. Failed sections stay `None`
    /// and are listed in the report; one error toast names them.
    pub async fn load(&self, cancel: &CancellationToken) -> DashboardReport {
        let settled = self.aggregator.aggregate_settled(self.sources(), cancel).await;
        let (ready, failed) = settled.partition();

        let loaded = ready.len();
        let mut view = DashboardView::default();
        for (_, part) in ready {
            view.apply(part);
        }

        let unavailable: Vec<&str> = failed
            .iter()
            .filter(|f| !matches!(f.cause, FailureCause::Cancelled))
            .map(|f| f.key.as_str())
            .collect();
        if !unavailable.is_empty() {
            self.notifications.error(format!(
                "Some dashboard data could not be loaded: {}.",
                unavailable.join(", ")
            ));
        }
        tracing::info!(loaded, failed = failed.len(), "dashboard loaded");

        DashboardReport { view, failed }
    }

    /// All-or-nothing load: either every section, or an error naming the
    /// first failed source.
    pub async fn load_strict(
        &self,
        cancel: &CancellationToken,
    ) -> Result<DashboardView, AggregateError> {
        match self.aggregator.aggregate_all(self.sources(), cancel).await {
            Ok(parts) => {
                let mut view = DashboardView::default();
                for (_, part) in parts {
                    view.apply(part);
                }
                Ok(view)
            }
            Err(e) => {
                if let Some(key) = e.failed_key() {
                    self.notifications
                        .error(format!("Dashboard could not be loaded: {} failed.", key));
                }
                Err(e)
            }
        }
    }

    /// Load the wellness view's snapshot and insight together.
    pub async fn load_wellness(
        &self,
        cancel: &CancellationToken,
    ) -> Result<WellnessView, AggregateError> {
        let snapshot = self.backend.clone();
        let insight = self.backend.clone();
        let sources = vec![
            Source::new(WELLNESS_SNAPSHOT, move || {
                let backend = snapshot.clone();
                async move {
                    backend
                        .fetch_wellness_snapshot()
                        .await
                        .map(DashboardPart::WellnessSnapshot)
                }
            }),
            Source::new(WELLNESS_INSIGHT, move || {
                let backend = insight.clone();
                async move {
                    backend
                        .fetch_wellness_insight()
                        .await
                        .map(DashboardPart::WellnessInsight)
                }
            }),
        ];

        let parts = self
            .aggregator
            .aggregate_all(sources, cancel)
            .await
            .inspect_err(|e| {
                if let Some(key) = e.failed_key() {
                    self.notifications
                        .error(format!("Wellness data could not be loaded: {} failed.", key));
                }
            })?;

        let mut snapshot = None;
        let mut insight = None;
        for (key, part) in parts {
            match part {
                DashboardPart::WellnessSnapshot(s) => snapshot = Some(s),
                DashboardPart::WellnessInsight(i) => insight = Some(i),
                _ => return Err(AggregateError::UnexpectedPayload(key)),
            }
        }
        match (snapshot, insight) {
            (Some(snapshot), Some(insight)) => Ok(WellnessView { snapshot, insight }),
            (None, _) => Err(AggregateError::UnexpectedPayload(WELLNESS_SNAPSHOT.into())),
            (_, None) => Err(AggregateError::UnexpectedPayload(WELLNESS_INSIGHT.into())),
        }
    }
}
