use std::collections::VecDeque;

use super::types::SessionEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct PendingEvent {
    pub tick: u32,
    pub sequence: u32,
    pub event: SessionEvent,
}

/// Bounded FIFO of session events waiting to be drained by the caller.
pub struct EventQueue {
    pending: VecDeque<PendingEvent>,
    next_sequence: u32,
    max_pending: usize,
}

impl EventQueue {
    pub fn new(max_pending: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(max_pending),
            next_sequence: 0,
            max_pending,
        }
    }

    pub fn push(&mut self, tick: u32, event: SessionEvent) -> u32 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);

        if self.pending.len() >= self.max_pending && !self.evict_oldest_routine() {
            self.pending.pop_front();
        }

        self.pending.push_back(PendingEvent {
            tick,
            sequence,
            event,
        });

        sequence
    }

    pub fn drain(&mut self) -> Vec<PendingEvent> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn evict_oldest_routine(&mut self) -> bool {
        match self.pending.iter().position(|e| !e.event.is_lifecycle()) {
            Some(idx) => self.pending.remove(idx).is_some(),
            None => false,
        }
    }
}
