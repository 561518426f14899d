use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use rkyv::util::AlignedVec;

use super::protocol::{Packet, PacketError};
use super::stats::ChannelStats;

/// One-directional message pipe with delayed delivery.
///
/// Time is driven by the caller through `advance`, so the same channel works
/// under a simulated clock and a wall clock.
pub trait Channel {
    fn send(&mut self, packet: &Packet, delay: Duration) -> Result<(), PacketError>;

    fn advance(&mut self, elapsed: Duration);

    /// Drains every packet whose delay has elapsed, in delivery order.
    fn poll(&mut self) -> Vec<Packet>;

    fn clear(&mut self);

    fn stats(&self) -> &ChannelStats;
}

#[derive(Debug)]
struct DelayedPacket {
    release_time: Duration,
    sequence: u64,
    bytes: AlignedVec,
}

impl PartialEq for DelayedPacket {
    fn eq(&self, other: &Self) -> bool {
        self.release_time == other.release_time && self.sequence == other.sequence
    }
}

impl Eq for DelayedPacket {}

impl PartialOrd for DelayedPacket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DelayedPacket {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; enqueue order breaks ties.
        other
            .release_time
            .cmp(&self.release_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// In-process channel that holds encoded packets until their release time.
///
/// Packets are stored as bytes, so every delivery decodes a fresh copy that
/// shares nothing with the sender's data.
#[derive(Debug, Default)]
pub struct DelayedChannel {
    now: Duration,
    next_sequence: u64,
    queue: BinaryHeap<DelayedPacket>,
    stats: ChannelStats,
}

impl DelayedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Channel for DelayedChannel {
    fn send(&mut self, packet: &Packet, delay: Duration) -> Result<(), PacketError> {
        let bytes = packet.encode()?;
        self.stats.packets_sent += 1;
        self.stats.bytes_sent += bytes.len() as u64;

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(DelayedPacket {
            release_time: self.now + delay,
            sequence,
            bytes,
        });
        Ok(())
    }

    fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    fn poll(&mut self) -> Vec<Packet> {
        let mut packets = Vec::new();
        while let Some(delayed) = self.queue.peek() {
            if delayed.release_time > self.now {
                break;
            }
            let Some(delayed) = self.queue.pop() else {
                break;
            };
            match Packet::decode(&delayed.bytes) {
                Ok(packet) => {
                    self.stats.packets_delivered += 1;
                    self.stats.bytes_delivered += delayed.bytes.len() as u64;
                    packets.push(packet);
                }
                Err(e) => {
                    self.stats.packets_dropped += 1;
                    log::warn!("Dropping undecodable packet: {}", e);
                }
            }
        }
        packets
    }

    fn clear(&mut self) {
        self.stats.packets_dropped += self.queue.len() as u64;
        self.queue.clear();
    }

    fn stats(&self) -> &ChannelStats {
        &self.stats
    }
}
