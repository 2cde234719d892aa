use std::sync::atomic::{AtomicU64, Ordering};

/// Fields whose contents come from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Department,
    Doctor,
    Time,
    Availability,
}

impl Field {
    const ALL: [Field; 4] = [Field::Department, Field::Doctor, Field::Time, Field::Availability];

    fn index(self) -> usize {
        match self {
            Field::Department => 0,
            Field::Doctor => 1,
            Field::Time => 2,
            Field::Availability => 3,
        }
    }

    /// This field and every field fed by it.
    pub fn with_downstream(self) -> &'static [Field] {
        &Self::ALL[self.index()..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub field: Field,
    pub generation: u64,
}

/// Per-field request counters. A response may only be applied while the
/// ticket it was issued with is still the field's latest generation.
#[derive(Debug, Default)]
pub struct RequestGenerations {
    counters: [AtomicU64; 4],
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards in-flight responses for `field` and everything downstream.
    pub fn invalidate(&self, field: Field) {
        for f in field.with_downstream() {
            self.counters[f.index()].fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn issue(&self, field: Field) -> Ticket {
        self.invalidate(field);
        Ticket {
            field,
            generation: self.counters[field.index()].load(Ordering::SeqCst),
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.counters[ticket.field.index()].load(Ordering::SeqCst) == ticket.generation
    }
}
