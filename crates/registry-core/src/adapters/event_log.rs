//! # In-Memory Event Log
//!
//! Reference `EventSink`: an append-only, queryable record log, the
//! shape external indexers expect. Production hosts would adapt the
//! port to a durable bus instead.

use crate::events::{EventPayload, EventRecord};
use crate::ports::outbound::EventSink;

/// Append-only in-memory record log.
#[derive(Clone, Debug, Default)]
pub struct InMemoryEventLog {
    records: Vec<EventRecord>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, in emission order.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Number of records emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records on a given topic, in emission order.
    pub fn on_topic<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a EventRecord> {
        self.records
            .iter()
            .filter(move |record| record.topic() == topic)
    }

    /// The most recently emitted payload, if any.
    #[must_use]
    pub fn last(&self) -> Option<&EventPayload> {
        self.records.last().map(|record| &record.payload)
    }
}

impl EventSink for InMemoryEventLog {
    fn record(&mut self, record: EventRecord) {
        self.records.push(record);
    }
}

// =============================================================================
// TESTS
// =============================================================================
