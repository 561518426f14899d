#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    pub packets_sent: u64,
    pub packets_delivered: u64,
    pub packets_dropped: u64,
    pub bytes_sent: u64,
    pub bytes_delivered: u64,
}

impl ChannelStats {
    pub fn in_flight(&self) -> u64 {
        self.packets_sent
            .saturating_sub(self.packets_delivered)
            .saturating_sub(self.packets_dropped)
    }

    pub fn merge(&mut self, other: &ChannelStats) {
        self.packets_sent += other.packets_sent;
        self.packets_delivered += other.packets_delivered;
        self.packets_dropped += other.packets_dropped;
        self.bytes_sent += other.bytes_sent;
        self.bytes_delivered += other.bytes_delivered;
    }
}
