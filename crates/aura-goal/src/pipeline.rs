// pipeline.rs — GoalDecompositionPipeline: turn a title into a planned goal.
//
// One run is strictly sequential: decompose the title, add the goal, re-read
// the collection. Every state change goes through `transition`, which
// validates it against the lifecycle graph and dispatches an event. A
// failed refresh removes the goal the run added, so a failed run leaves
// the collection as it found it. The same holds for a run whose future was
// dropped after the goal was added: the goal stays recorded as pending
// until the run reaches Done, and `reset` removes it.

use std::sync::Arc;

use aura_backend::{Backend, Goal, NewGoal};
use aura_notify::NotificationCenter;
use uuid::Uuid;

use crate::decomposition::Decomposition;
use crate::error::PipelineError;
use crate::events::{EventDispatcher, PipelineEvent};
use crate::state::PipelineState;

/// Toast raised when the user takes the course suggested for a learning goal.
pub const COURSE_ENROLL_MESSAGE: &str = "Enrolling you in the top-rated Python course!";

pub struct GoalDecompositionPipeline {
    backend: Arc<dyn Backend>,
    notifications: NotificationCenter,
    dispatcher: EventDispatcher,
    state: PipelineState,
    run_id: Uuid,
    decomposition: Option<Decomposition>,
    goals: Vec<Goal>,
    last_error: Option<PipelineError>,
    /// Goal added by the current run that the run has not yet finished with.
    pending_goal: Option<Uuid>,
}

impl GoalDecompositionPipeline {
    pub fn new(
        backend: Arc<dyn Backend>,
        notifications: NotificationCenter,
        dispatcher: EventDispatcher,
    ) -> Self {
        Self {
            backend,
            notifications,
            dispatcher,
            state: PipelineState::Idle,
            run_id: Uuid::new_v4(),
            decomposition: None,
            goals: Vec::new(),
            last_error: None,
            pending_goal: None,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The plan from the latest run that got past decomposition.
    pub fn decomposition(&self) -> Option<&Decomposition> {
        self.decomposition.as_ref()
    }

    /// The goal collection as last refreshed.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn last_error(&self) -> Option<&PipelineError> {
        self.last_error.as_ref()
    }

    /// Id shared by every event of the current run.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Flip one step of the current plan. Independent of pipeline state.
    pub fn toggle_step(&mut self, step_id: Uuid) -> bool {
        self.decomposition
            .as_mut()
            .is_some_and(|plan| plan.toggle_step(step_id))
    }

    /// Accept the course suggestion shown for learning goals.
    pub fn enroll_in_course(&self) -> Option<Uuid> {
        self.decomposition
            .as_ref()
            .filter(|plan| plan.learning_track())
            .map(|_| self.notifications.success(COURSE_ENROLL_MESSAGE))
    }

    /// Goal added by a run that has not reached Done.
    pub fn pending_goal(&self) -> Option<Uuid> {
        self.pending_goal
    }

    /// Return to Idle after a finished run, clearing its plan and error.
    ///
    /// A run whose future was dropped part-way is marked failed first, and
    /// the goal it already added is removed.
    pub async fn reset(&mut self) -> Result<(), PipelineError> {
        if self.state == PipelineState::Idle {
            return Ok(());
        }
        if self.state.is_busy() {
            if let Some(goal_id) = self.pending_goal.take() {
                let rolled_back = self.roll_back(goal_id).await;
                tracing::info!(run_id = %self.run_id, %goal_id, rolled_back, "abandoned run cleaned up");
            }
            self.transition(PipelineState::Error)?;
        }
        self.transition(PipelineState::Idle)?;
        self.run_id = Uuid::new_v4();
        self.decomposition = None;
        self.last_error = None;
        Ok(())
    }

    /// Decompose, persist, and refresh one goal.
    ///
    /// A blank title is rejected without leaving the current state. A
    /// pipeline sitting in Done or Error is re-armed before the run starts.
    pub async fn run(&mut self, title: &str) -> Result<Goal, PipelineError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PipelineError::Validation("goal title is empty".into()));
        }
        self.reset().await?;

        self.transition(PipelineState::Decomposing)?;
        let steps = match self.backend.decompose_goal(title).await {
            Ok(steps) if steps.is_empty() => {
                return Err(self.fail(PipelineError::EmptyDecomposition))
            }
            Ok(steps) => steps,
            Err(e) => return Err(self.fail(PipelineError::Decomposition(e))),
        };
        self.decomposition = Some(Decomposition::new(title, steps));

        self.transition(PipelineState::Persisting)?;
        let goal = match self.backend.add_goal(NewGoal::from_title(title)).await {
            Ok(goal) => goal,
            Err(e) => return Err(self.fail(PipelineError::Persistence(e))),
        };
        self.pending_goal = Some(goal.id);
        self.dispatcher
            .dispatch(&PipelineEvent::goal_added(self.run_id, goal.id, &goal.title));

        self.transition(PipelineState::Refreshing)?;
        match self.backend.fetch_goals().await {
            Ok(goals) => self.goals = goals,
            Err(source) => {
                self.pending_goal = None;
                let rolled_back = self.roll_back(goal.id).await;
                return Err(self.fail(PipelineError::Refresh {
                    source,
                    rolled_back,
                }));
            }
        }

        self.transition(PipelineState::Done)?;
        self.pending_goal = None;
        self.notifications
            .success(format!("New goal \"{}\" has been added!", title));
        Ok(goal)
    }

    fn transition(&mut self, next: PipelineState) -> Result<(), PipelineError> {
        if !self.state.can_transition_to(next) {
            return Err(PipelineError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        let from = std::mem::replace(&mut self.state, next);
        self.dispatcher
            .dispatch(&PipelineEvent::state_changed(self.run_id, from, next));
        Ok(())
    }

    /// Move to Error, raise one error toast, and hand the error back.
    fn fail(&mut self, error: PipelineError) -> PipelineError {
        if let Err(e) = self.transition(PipelineState::Error) {
            tracing::warn!(error = %e, "goal pipeline could not enter error state");
        }
        tracing::warn!(
            run_id = %self.run_id,
            failed_in = %error.failed_in(),
            error = %error,
            "goal pipeline failed"
        );
        self.notifications
            .error(format!("Could not add your goal: {}", error));
        self.last_error = Some(error.clone());
        error
    }

    /// Remove the goal this run added. Returns whether it is gone.
    async fn roll_back(&mut self, goal_id: Uuid) -> bool {
        match self.backend.remove_goal(goal_id).await {
            Ok(removed) => {
                if removed {
                    self.dispatcher
                        .dispatch(&PipelineEvent::goal_rolled_back(self.run_id, goal_id));
                }
                removed
            }
            Err(e) => {
                tracing::error!(%goal_id, error = %e, "could not roll back goal");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use aura_backend::{
        FaultMode, FaultPlan, GoalRepository, LatencyProfile, MockBackend, Operation,
    };
    use aura_notify::{ToastConfig, ToastKind};

    struct Harness {
        pipeline: GoalDecompositionPipeline,
        backend: Arc<MockBackend>,
        notifications: NotificationCenter,
        events: RecordingSink,
    }

    fn harness(faults: FaultPlan) -> Harness {
        let backend =
            Arc::new(MockBackend::seeded(LatencyProfile::instant()).with_faults(Arc::new(faults)));
        let notifications = NotificationCenter::new(&ToastConfig::default());
        let events = RecordingSink::new();
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(events.clone()));
        let pipeline =
            GoalDecompositionPipeline::new(backend.clone(), notifications.clone(), dispatcher);
        Harness {
            pipeline,
            backend,
            notifications,
            events,
        }
    }

    fn goal_count(h: &Harness) -> usize {
        h.backend.goal_repository().list().unwrap().len()
    }

    #[tokio::test]
    async fn successful_run_walks_every_state() {
        let mut h = harness(FaultPlan::new());
        let goal = h.pipeline.run("Learn Spanish").await.unwrap();

        assert_eq!(goal.title, "Learn Spanish");
        assert_eq!(goal.progress, 0);
        assert_eq!(h.pipeline.state(), PipelineState::Done);
        assert_eq!(
            h.events.states(),
            vec![
                PipelineState::Decomposing,
                PipelineState::Persisting,
                PipelineState::Refreshing,
                PipelineState::Done,
            ]
        );
        assert_eq!(h.pipeline.goals().len(), 3);
        assert_eq!(h.pipeline.decomposition().unwrap().steps().len(), 6);
    }

    #[tokio::test]
    async fn title_is_trimmed() {
        let mut h = harness(FaultPlan::new());
        let goal = h.pipeline.run("  Run a marathon  ").await.unwrap();
        assert_eq!(goal.title, "Run a marathon");
    }

    #[tokio::test]
    async fn blank_title_stays_idle() {
        let mut h = harness(FaultPlan::new());
        let err = h.pipeline.run("   ").await.unwrap_err();

        assert!(matches!(err, PipelineError::Validation(_)));
        assert_eq!(h.pipeline.state(), PipelineState::Idle);
        assert!(h.events.events().is_empty());
        assert_eq!(goal_count(&h), 2);
    }

    #[tokio::test]
    async fn decomposition_failure_adds_nothing() {
        let mut h = harness(FaultPlan::new().with(Operation::Decompose, FaultMode::Always));
        let err = h.pipeline.run("Learn Spanish").await.unwrap_err();

        assert_eq!(err.failed_in(), PipelineState::Decomposing);
        assert_eq!(h.pipeline.state(), PipelineState::Error);
        assert_eq!(goal_count(&h), 2);
        assert!(h.pipeline.decomposition().is_none());
    }

    #[tokio::test]
    async fn persistence_failure_keeps_plan() {
        let mut h = harness(FaultPlan::new().with(Operation::AddGoal, FaultMode::Always));
        let err = h.pipeline.run("Learn Spanish").await.unwrap_err();

        assert_eq!(err.failed_in(), PipelineState::Persisting);
        assert!(h.pipeline.decomposition().is_some());
        assert_eq!(goal_count(&h), 2);
    }

    #[tokio::test]
    async fn refresh_failure_rolls_back_added_goal() {
        let mut h = harness(FaultPlan::new().with(Operation::Goals, FaultMode::Always));
        let err = h.pipeline.run("Learn Spanish").await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Refresh {
                rolled_back: true,
                ..
            }
        ));
        assert_eq!(h.pipeline.state(), PipelineState::Error);
        assert_eq!(goal_count(&h), 2);
        assert!(h
            .events
            .events()
            .iter()
            .any(|e| e.event_type() == "goal_rolled_back"));
    }

    #[tokio::test]
    async fn failure_raises_exactly_one_error_toast() {
        let mut h = harness(FaultPlan::new().with(Operation::Goals, FaultMode::Always));
        let _ = h.pipeline.run("Learn Spanish").await;

        let toasts = h.notifications.active();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
    }

    #[tokio::test]
    async fn run_rearms_after_error() {
        let mut h = harness(FaultPlan::new().with(Operation::Decompose, FaultMode::Times(1)));
        assert!(h.pipeline.run("Learn Spanish").await.is_err());
        let failed_run = h.pipeline.run_id();

        h.pipeline.run("Learn Spanish").await.unwrap();
        assert_eq!(h.pipeline.state(), PipelineState::Done);
        assert_ne!(h.pipeline.run_id(), failed_run);
        assert!(h.pipeline.last_error().is_none());
    }

    #[tokio::test]
    async fn blank_title_after_done_keeps_result() {
        let mut h = harness(FaultPlan::new());
        h.pipeline.run("Learn Spanish").await.unwrap();

        assert!(h.pipeline.run("").await.is_err());
        assert_eq!(h.pipeline.state(), PipelineState::Done);
        assert!(h.pipeline.decomposition().is_some());
    }

    #[tokio::test]
    async fn abandoned_run_can_be_reset() {
        let mut h = harness(FaultPlan::new());
        h.pipeline.transition(PipelineState::Decomposing).unwrap();

        h.pipeline.reset().await.unwrap();
        assert_eq!(h.pipeline.state(), PipelineState::Idle);
        assert_eq!(
            h.events.states(),
            vec![
                PipelineState::Decomposing,
                PipelineState::Error,
                PipelineState::Idle,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_run_during_refresh_removes_its_goal() {
        let backend = Arc::new(MockBackend::seeded(LatencyProfile::default()));
        let notifications = NotificationCenter::new(&ToastConfig::default());
        let events = RecordingSink::new();
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(events.clone()));
        let mut pipeline =
            GoalDecompositionPipeline::new(backend.clone(), notifications, dispatcher);

        // Decompose (1500 ms) and add (400 ms) finish; refresh (500 ms) does not.
        let dropped = tokio::time::timeout(
            std::time::Duration::from_millis(2100),
            pipeline.run("Learn Spanish"),
        )
        .await;
        assert!(dropped.is_err());
        assert_eq!(pipeline.state(), PipelineState::Refreshing);
        assert!(pipeline.pending_goal().is_some());
        assert_eq!(backend.goal_repository().list().unwrap().len(), 3);

        pipeline.reset().await.unwrap();
        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert!(pipeline.pending_goal().is_none());
        assert_eq!(backend.goal_repository().list().unwrap().len(), 2);
        assert!(events
            .events()
            .iter()
            .any(|e| e.event_type() == "goal_rolled_back"));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_run_before_persisting_removes_nothing() {
        let backend = Arc::new(MockBackend::seeded(LatencyProfile::default()));
        let notifications = NotificationCenter::new(&ToastConfig::default());
        let mut pipeline =
            GoalDecompositionPipeline::new(backend.clone(), notifications, EventDispatcher::new());

        let dropped = tokio::time::timeout(
            std::time::Duration::from_millis(1000),
            pipeline.run("Learn Spanish"),
        )
        .await;
        assert!(dropped.is_err());
        assert!(pipeline.pending_goal().is_none());

        pipeline.reset().await.unwrap();
        assert_eq!(backend.goal_repository().list().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn successful_run_clears_pending_goal() {
        let mut h = harness(FaultPlan::new());
        h.pipeline.run("Learn Spanish").await.unwrap();
        assert!(h.pipeline.pending_goal().is_none());
        h.pipeline.reset().await.unwrap();
        assert_eq!(goal_count(&h), 3);
    }

    #[tokio::test]
    async fn toggle_step_is_local() {
        let mut h = harness(FaultPlan::new());
        h.pipeline.run("Learn Spanish").await.unwrap();
        let step = h.pipeline.decomposition().unwrap().steps()[0].id;

        assert!(h.pipeline.toggle_step(step));
        assert_eq!(h.pipeline.decomposition().unwrap().completed_count(), 1);
        assert_eq!(h.pipeline.state(), PipelineState::Done);
    }

    #[tokio::test]
    async fn course_offer_only_for_learning_goals() {
        let mut h = harness(FaultPlan::new());
        h.pipeline.run("Buy a house").await.unwrap();
        assert!(h.pipeline.enroll_in_course().is_none());

        h.pipeline.run("Learn Spanish").await.unwrap();
        let id = h.pipeline.enroll_in_course().unwrap();
        assert_eq!(h.notifications.get(id).unwrap().message, COURSE_ENROLL_MESSAGE);
    }
}
