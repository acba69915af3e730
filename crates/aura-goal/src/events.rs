// events.rs — Pipeline events and sink dispatch.
//
// The pipeline emits an event for every state change and for the goal it
// adds or rolls back. Sinks observe; a failing sink is logged and never
// stops the run or the other sinks.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SinkError;
use crate::state::PipelineState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PipelineEvent {
    StateChanged {
        run_id: Uuid,
        from: PipelineState,
        to: PipelineState,
        timestamp: DateTime<Utc>,
    },

    /// The run's goal entered the collection.
    GoalAdded {
        run_id: Uuid,
        goal_id: Uuid,
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// A failed refresh removed the goal this run had added.
    GoalRolledBack {
        run_id: Uuid,
        goal_id: Uuid,
        timestamp: DateTime<Utc>,
    },
}

impl PipelineEvent {
    pub fn event_type(&self) -> &str {
        match self {
            PipelineEvent::StateChanged { .. } => "state_changed",
            PipelineEvent::GoalAdded { .. } => "goal_added",
            PipelineEvent::GoalRolledBack { .. } => "goal_rolled_back",
        }
    }

    pub fn run_id(&self) -> Uuid {
        match self {
            PipelineEvent::StateChanged { run_id, .. }
            | PipelineEvent::GoalAdded { run_id, .. }
            | PipelineEvent::GoalRolledBack { run_id, .. } => *run_id,
        }
    }

    pub fn state_changed(run_id: Uuid, from: PipelineState, to: PipelineState) -> Self {
        PipelineEvent::StateChanged {
            run_id,
            from,
            to,
            timestamp: Utc::now(),
        }
    }

    pub fn goal_added(run_id: Uuid, goal_id: Uuid, title: &str) -> Self {
        PipelineEvent::GoalAdded {
            run_id,
            goal_id,
            title: title.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_rolled_back(run_id: Uuid, goal_id: Uuid) -> Self {
        PipelineEvent::GoalRolledBack {
            run_id,
            goal_id,
            timestamp: Utc::now(),
        }
    }
}

/// Receives pipeline events.
pub trait PipelineSink: Send + Sync {
    fn send(&self, event: &PipelineEvent) -> Result<(), SinkError>;
}

/// Writes every event to the `tracing` log.
#[derive(Debug, Default)]
pub struct TracingSink;

impl PipelineSink for TracingSink {
    fn send(&self, event: &PipelineEvent) -> Result<(), SinkError> {
        match event {
            PipelineEvent::StateChanged { run_id, from, to, .. } => {
                tracing::info!(%run_id, %from, %to, "goal pipeline state changed");
            }
            PipelineEvent::GoalAdded { run_id, goal_id, title, .. } => {
                tracing::info!(%run_id, %goal_id, %title, "goal added");
            }
            PipelineEvent::GoalRolledBack { run_id, goal_id, .. } => {
                tracing::warn!(%run_id, %goal_id, "goal rolled back");
            }
        }
        Ok(())
    }
}

/// Keeps every event in memory. Clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<PipelineEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// The `to` state of every recorded state change, in order.
    pub fn states(&self) -> Vec<PipelineState> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PipelineEvent::StateChanged { to, .. } => Some(to),
                _ => None,
            })
            .collect()
    }
}

impl PipelineSink for RecordingSink {
    fn send(&self, event: &PipelineEvent) -> Result<(), SinkError> {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
        Ok(())
    }
}

/// Appends events as JSONL to a file (`.aura/events.jsonl`).
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PipelineSink for LogSink {
    fn send(&self, event: &PipelineEvent) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SinkError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| SinkError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| SinkError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// Fans events out to every registered sink.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn PipelineSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher that logs through `tracing`.
    pub fn with_tracing() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.add_sink(Box::new(TracingSink));
        dispatcher
    }

    pub fn add_sink(&mut self, sink: Box<dyn PipelineSink>) {
        self.sinks.push(sink);
    }

    pub fn dispatch(&self, event: &PipelineEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!(event = event.event_type(), "pipeline sink error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn event_serialization_is_tagged() {
        let event = PipelineEvent::state_changed(
            Uuid::new_v4(),
            PipelineState::Idle,
            PipelineState::Decomposing,
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event_type\":\"state_changed\""));
        assert!(json.contains("\"to\":\"decomposing\""));

        let restored: PipelineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, event);
    }

    #[test]
    fn log_sink_appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");
        let sink = LogSink::new(&path);
        let run_id = Uuid::new_v4();

        sink.send(&PipelineEvent::goal_added(run_id, Uuid::new_v4(), "Learn Spanish"))
            .unwrap();
        sink.send(&PipelineEvent::goal_rolled_back(run_id, Uuid::new_v4()))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("goal_added"));
        assert!(lines[1].contains("goal_rolled_back"));
    }

    #[test]
    fn dispatcher_reaches_every_sink() {
        let first = RecordingSink::new();
        let second = RecordingSink::new();
        let mut dispatcher = EventDispatcher::with_tracing();
        dispatcher.add_sink(Box::new(first.clone()));
        dispatcher.add_sink(Box::new(second.clone()));

        dispatcher.dispatch(&PipelineEvent::state_changed(
            Uuid::new_v4(),
            PipelineState::Refreshing,
            PipelineState::Done,
        ));

        assert_eq!(first.states(), vec![PipelineState::Done]);
        assert_eq!(second.events().len(), 1);
    }

    #[test]
    fn failing_sink_does_not_block_others() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened for appending.
        let broken = LogSink::new(dir.path());
        let recorder = RecordingSink::new();

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(broken));
        dispatcher.add_sink(Box::new(recorder.clone()));
        dispatcher.dispatch(&PipelineEvent::goal_rolled_back(Uuid::new_v4(), Uuid::new_v4()));

        assert_eq!(recorder.events().len(), 1);
    }
}
