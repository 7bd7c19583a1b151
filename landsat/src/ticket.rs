//! Request sequencing.
//!
//! Every search or load takes a [`Ticket`] when it is issued. Its
//! response may only be applied while that ticket is still the most
//! recently issued one, so a slow response can never clobber the
//! result of a request made after it.

use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    latest: Cell<u64>,
}

impl Sequencer {
    pub(crate) fn issue(&self) -> Ticket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Ticket(next)
    }

    pub(crate) fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }
}

/// How an issued request ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<T> {
    /// The response was applied to the component's state.
    Applied(T),

    /// A newer request was issued before this one resolved; its
    /// response was discarded.
    Superseded,
}

impl<T> Completion<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Completion::Applied(value) => Some(value),
            Completion::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Completion::Superseded)
    }
}
