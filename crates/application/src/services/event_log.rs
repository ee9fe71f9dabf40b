use arpscope_domain::{Event, EventKind};
use std::collections::VecDeque;
use tracing::{info, warn};

/// Append-only record of host cache transitions.
///
/// Every recorded event is also emitted on the `arpscope::events` tracing
/// target so it can be followed live.
#[derive(Debug, Default)]
pub struct EventLog {
    events: VecDeque<Event>,
    max_events: Option<usize>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max_events`, dropping the oldest first.
    pub fn with_max_events(max_events: usize) -> Self {
        Self {
            events: VecDeque::new(),
            max_events: Some(max_events.max(1)),
        }
    }

    pub fn record(&mut self, event: Event) {
        match &event.kind {
            EventKind::MacChanged { ip, old, new } => warn!(
                target: "arpscope::events",
                ip = %ip,
                old_mac = %old,
                new_mac = %new,
                at = %event.timestamp.to_rfc3339(),
                "{}",
                event.description
            ),
            EventKind::Expired { key } => info!(
                target: "arpscope::events",
                ip = %key,
                at = %event.timestamp.to_rfc3339(),
                "{}",
                event.description
            ),
        }

        self.events.push_back(event);
        if let Some(max) = self.max_events {
            while self.events.len() > max {
                self.events.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}
