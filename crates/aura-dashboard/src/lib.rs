//! # aura-dashboard
//!
//! Concurrent loading for views that need several independent backend
//! calls at once.
//!
//! [`DataAggregator`] runs a set of [`Source`]s concurrently with a
//! per-source timeout and bounded retry, and reports either all-or-nothing
//! ([`DataAggregator::aggregate_all`]) or per source
//! ([`DataAggregator::aggregate_settled`]). [`DashboardLoader`] wires the
//! dashboard's and wellness view's sources to a [`aura_backend::Backend`].

pub mod actions;
pub mod aggregator;
pub mod error;
pub mod loader;
pub mod source;

pub use actions::QuickActions;
pub use aggregator::{AggregatorPolicy, DataAggregator, Settled, SourceOutcome};
pub use error::{AggregateError, FailureCause, SourceFailure};
pub use loader::{DashboardLoader, DashboardPart, DashboardReport, DashboardView, WellnessView};
pub use source::Source;
