use crate::config::OverflowPolicy;
use crate::constants::SUBPACKETS_PER_DATAGRAM;
use crate::packet::RawDatagram;
use crate::scan_buffer::{PushOutcome, ScanBuffer, ScanEntry};
use crate::stats::DriverStats;
use log::{debug, trace, warn};
use std::sync::Arc;

/// Resolves per-sub-packet timestamps from the per-datagram device clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimestampTracker {
    last: u32,
    increment: u32,
}

impl Default for TimestampTracker {
    fn default() -> Self {
        TimestampTracker {
            last: 0,
            increment: 1,
        }
    }
}

impl TimestampTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reference timestamp of a datagram.
    ///
    /// A raw value of zero means the sensor has no timestamp for this
    /// datagram: the previous reference and increment are reused unchanged.
    pub fn resolve(&mut self, raw: u32) -> u32 {
        if raw == 0 {
            return self.last;
        }
        self.increment = raw.wrapping_sub(self.last) / SUBPACKETS_PER_DATAGRAM as u32;
        self.last = raw;
        raw
    }

    pub fn sub_packet_timestamp(&self, reference: u32, index: usize) -> u32 {
        reference.wrapping_add((index as u32).wrapping_mul(self.increment))
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    pub fn increment(&self) -> u32 {
        self.increment
    }
}

/// Collects sub-packets into revolutions.
///
/// The assembler owns the buffer being filled. A completed buffer is returned
/// to the caller by value, so no other thread can observe it while it is
/// still being written.
pub struct ScanAssembler {
    active: ScanBuffer,
    spare: Vec<ScanBuffer>,
    capacity: usize,
    policy: OverflowPolicy,
    timestamps: TimestampTracker,
    overflow_reported: bool,
    stats: Arc<DriverStats>,
}

impl ScanAssembler {
    pub fn new(capacity: usize, policy: OverflowPolicy, stats: Arc<DriverStats>) -> Self {
        ScanAssembler {
            active: ScanBuffer::with_capacity(capacity),
            spare: Vec::new(),
            capacity,
            policy,
            timestamps: TimestampTracker::new(),
            overflow_reported: false,
            stats,
        }
    }

    /// Buffer currently being filled.
    pub fn active(&self) -> &ScanBuffer {
        &self.active
    }

    /// Gives back a buffer whose revolution has been consumed.
    pub fn recycle(&mut self, buffer: ScanBuffer) {
        self.spare.push(buffer);
    }

    /// Appends the sub-packets of one datagram and returns the revolutions it
    /// completed, oldest first.
    ///
    /// A sub-packet at azimuth zero closes the current revolution: it is
    /// appended as the last entry of the completed buffer and again as the
    /// first entry of the next one.
    pub fn push_datagram(&mut self, datagram: &RawDatagram) -> Vec<ScanBuffer> {
        let reference = self.timestamps.resolve(datagram.timestamp);
        let mut completed = Vec::new();

        for (i, sub_packet) in datagram.sub_packets.iter().enumerate() {
            if sub_packet.is_padding() {
                self.stats.record_padding();
                continue;
            }

            let entry = ScanEntry {
                sub_packet: *sub_packet,
                timestamp: self.timestamps.sub_packet_timestamp(reference, i),
            };
            self.append(entry);

            if sub_packet.is_revolution_start() {
                let next = self.take_spare();
                let done = std::mem::replace(&mut self.active, next);
                self.overflow_reported = false;
                self.append(entry);
                self.stats.record_completed_revolution();
                trace!("Revolution completed with {} sub-packets", done.len());
                completed.push(done);
            }
        }
        completed
    }

    fn take_spare(&mut self) -> ScanBuffer {
        match self.spare.pop() {
            Some(mut buffer) => {
                buffer.clear();
                buffer
            }
            None => {
                debug!("Allocating scan buffer for {} sub-packets", self.capacity);
                ScanBuffer::with_capacity(self.capacity)
            }
        }
    }

    fn append(&mut self, entry: ScanEntry) {
        match self.active.push(entry, self.policy) {
            Ok(PushOutcome::Appended) => {}
            Ok(PushOutcome::EvictedOldest) => {
                self.stats.record_dropped_sub_packet();
                self.report_overflow("evicting the oldest sub-packets");
            }
            Ok(PushOutcome::Grew) => {
                self.report_overflow("growing beyond nominal capacity");
            }
            Err(e) => {
                self.stats.record_dropped_sub_packet();
                self.report_overflow(&e.to_string());
            }
        }
    }

    // At most once per revolution
    fn report_overflow(&mut self, action: &str) {
        if self.overflow_reported {
            return;
        }
        self.overflow_reported = true;
        warn!(
            "Revolution exceeds {} sub-packets: {}",
            self.active.capacity(),
            action
        );
    }
}
