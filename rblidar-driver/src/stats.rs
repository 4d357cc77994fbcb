use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by the receiver and decoder threads.
/// Each counter sits on its own cache line.
#[derive(Debug, Default)]
pub struct DriverStats {
    datagrams_received: CachePadded<AtomicU64>,
    datagrams_rejected: CachePadded<AtomicU64>,
    padding_skipped: CachePadded<AtomicU64>,
    sub_packets_dropped: CachePadded<AtomicU64>,
    revolutions_completed: CachePadded<AtomicU64>,
    revolutions_dropped: CachePadded<AtomicU64>,
    revolutions_decoded: CachePadded<AtomicU64>,
    points_emitted: CachePadded<AtomicU64>,
}

/// Point-in-time copy of [`DriverStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub datagrams_received: u64,
    /// Datagrams with a length other than the wire size.
    pub datagrams_rejected: u64,
    pub padding_skipped: u64,
    /// Sub-packets lost to buffer overflow, either rejected or evicted.
    pub sub_packets_dropped: u64,
    pub revolutions_completed: u64,
    /// Completed revolutions discarded because the decoder was still busy.
    pub revolutions_dropped: u64,
    pub revolutions_decoded: u64,
    pub points_emitted: u64,
}

fn add(counter: &AtomicU64, n: u64) {
    counter.fetch_add(n, Ordering::Relaxed);
}

impl DriverStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            datagrams_received: self.datagrams_received.load(Ordering::Relaxed),
            datagrams_rejected: self.datagrams_rejected.load(Ordering::Relaxed),
            padding_skipped: self.padding_skipped.load(Ordering::Relaxed),
            sub_packets_dropped: self.sub_packets_dropped.load(Ordering::Relaxed),
            revolutions_completed: self.revolutions_completed.load(Ordering::Relaxed),
            revolutions_dropped: self.revolutions_dropped.load(Ordering::Relaxed),
            revolutions_decoded: self.revolutions_decoded.load(Ordering::Relaxed),
            points_emitted: self.points_emitted.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn record_datagram(&self) {
        add(&self.datagrams_received, 1);
    }

    pub(crate) fn record_rejected_datagram(&self) {
        add(&self.datagrams_rejected, 1);
    }

    pub(crate) fn record_padding(&self) {
        add(&self.padding_skipped, 1);
    }

    pub(crate) fn record_dropped_sub_packet(&self) {
        add(&self.sub_packets_dropped, 1);
    }

    pub(crate) fn record_completed_revolution(&self) {
        add(&self.revolutions_completed, 1);
    }

    pub(crate) fn record_dropped_revolution(&self) {
        add(&self.revolutions_dropped, 1);
    }

    pub(crate) fn record_decoded_revolution(&self, n_points: usize) {
        add(&self.revolutions_decoded, 1);
        add(&self.points_emitted, n_points as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot() {
        let stats = DriverStats::default();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());

        stats.record_datagram();
        stats.record_datagram();
        stats.record_rejected_datagram();
        stats.record_padding();
        stats.record_dropped_sub_packet();
        stats.record_completed_revolution();
        stats.record_dropped_revolution();
        stats.record_decoded_revolution(32);

        assert_eq!(
            stats.snapshot(),
            StatsSnapshot {
                datagrams_received: 2,
                datagrams_rejected: 1,
                padding_skipped: 1,
                sub_packets_dropped: 1,
                revolutions_completed: 1,
                revolutions_dropped: 1,
                revolutions_decoded: 1,
                points_emitted: 32,
            }
        );
    }
}
