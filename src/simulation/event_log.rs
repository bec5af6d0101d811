//! Notable moments of a training run, newest first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of events the log keeps.
pub const EVENT_LOG_CAPACITY: usize = 20;

/// One notable moment of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Generation the event belongs to.
    pub generation: u32,
    /// Category, used for coloring.
    pub kind: EventKind,
    /// Text shown in the viewer.
    pub description: String,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A generation beat the best score announced so far.
    NewBest,
    /// Nobody scored and the population was drawn from scratch.
    Reinitialized,
    /// An episode reached the success score.
    Success,
}

/// Bounded log of recent events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: VecDeque<LoggedEvent>,
}

impl EventLog {
    /// Records an event, forgetting the oldest one once the log is full.
    pub fn log(&mut self, generation: u32, kind: EventKind, description: impl Into<String>) {
        self.events.push_front(LoggedEvent {
            generation,
            kind,
            description: description.into(),
        });
        self.events.truncate(EVENT_LOG_CAPACITY);
    }

    /// Recent events, newest first.
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }
}
