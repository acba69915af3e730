//! # aura-backend
//!
//! The data-provisioning boundary for Aura.
//!
//! Everything the orchestration crates consume flows through the
//! [`Backend`] trait. The only implementation shipped here is
//! [`MockBackend`], which serves the scripted catalog after a simulated
//! latency and can be told to fail on chosen operations.
//!
//! ## Key components
//!
//! - [`model`] — goals, steps, suggestions, schedule, finance, wellness,
//!   automations, relationships
//! - [`Backend`] — async trait with one method per backend operation
//! - [`MockBackend`] — latency-simulating implementation backed by [`catalog`]
//! - [`GoalRepository`] — injected goal collection (`list/add/update/remove`)
//! - [`BackendError`] / [`ErrorKind`] — error taxonomy shared by the workspace

pub mod backend;
pub mod catalog;
pub mod error;
pub mod latency;
pub mod mock;
pub mod model;
pub mod repository;

pub use backend::{Backend, Operation};
pub use error::{BackendError, ErrorKind};
pub use latency::LatencyProfile;
pub use mock::{FaultMode, FaultPlan, MockBackend};
pub use model::{
    AccountType, ActivityMetrics, Automation, AutomationCategory, ChatRole, DailySleep,
    DailySteps, FinancialAccount, FinancialSnapshot, Goal, GoalCategory, GoalStep, NewGoal,
    RelationshipContact, ScheduleCategory, ScheduleItem, SleepMetrics, StressMetrics,
    StressTrend, Suggestion, SuggestionIcon, Transaction, TransactionCategory,
    WellnessSnapshot,
};
pub use repository::{GoalRepository, InMemoryGoalRepository};
