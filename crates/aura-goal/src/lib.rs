//! # aura-goal
//!
//! The goal decomposition pipeline.
//!
//! A [`GoalDecompositionPipeline`] takes a goal title through
//! `Idle → Decomposing → Persisting → Refreshing → Done` (or `Error`),
//! validating every transition against [`PipelineState::can_transition_to`]
//! and dispatching a [`PipelineEvent`] for it. Sinks ([`TracingSink`],
//! [`LogSink`], [`RecordingSink`]) observe the run without affecting it.

pub mod decomposition;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod state;

pub use decomposition::Decomposition;
pub use error::{PipelineError, SinkError};
pub use events::{EventDispatcher, LogSink, PipelineEvent, PipelineSink, RecordingSink, TracingSink};
pub use pipeline::{GoalDecompositionPipeline, COURSE_ENROLL_MESSAGE};
pub use state::PipelineState;
