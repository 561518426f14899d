use crate::entity::{PlayerColor, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    pub player_id: PlayerId,
    pub color: PlayerColor,
    pub host: bool,
}

/// Players that joined a session, in join order.
#[derive(Debug, Clone)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    capacity: usize,
    next_id: PlayerId,
}

impl Roster {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn has_host(&self) -> bool {
        self.entries.iter().any(|e| e.host)
    }

    pub fn host(&self) -> Option<PlayerId> {
        self.entries.iter().find(|e| e.host).map(|e| e.player_id)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Adds a player and returns its entry, or `None` when full.
    pub fn add(&mut self, host: bool) -> Option<RosterEntry> {
        if self.is_full() {
            return None;
        }
        let player_id = self.next_id;
        self.next_id += 1;
        let entry = RosterEntry {
            player_id,
            color: PlayerColor::for_player(self.entries.len() as PlayerId),
            host,
        };
        self.entries.push(entry);
        Some(entry)
    }
}
