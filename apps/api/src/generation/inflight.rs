use std::collections::HashMap;

/// Tracks the newest generation request per field so that a slow response for
/// an older request cannot overwrite the result of a newer one.
#[derive(Debug, Default)]
pub struct InFlight {
    latest: HashMap<String, u64>,
    next_seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    field: String,
    seq: u64,
}

impl Ticket {
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl InFlight {
    pub fn begin(&mut self, field: impl Into<String>) -> Ticket {
        self.next_seq += 1;
        let field = field.into();
        self.latest.insert(field.clone(), self.next_seq);
        Ticket {
            field,
            seq: self.next_seq,
        }
    }

    pub fn is_latest(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.field) == Some(&ticket.seq)
    }

    /// Completes a request. Returns true when its result should be applied.
    pub fn finish(&mut self, ticket: &Ticket) -> bool {
        if self.is_latest(ticket) {
            self.latest.remove(&ticket.field);
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> usize {
        self.latest.len()
    }
}
