use crate::config::OverflowPolicy;
use crate::error::RBLidarError;
use crate::packet::RawSubPacket;
use std::collections::VecDeque;

/// A sub-packet together with its resolved timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanEntry {
    pub sub_packet: RawSubPacket,
    pub timestamp: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushOutcome {
    Appended,
    /// The oldest entry was evicted to make room.
    EvictedOldest,
    /// The entry was appended beyond the nominal capacity.
    Grew,
}

/// Sub-packets collected since the last revolution boundary.
///
/// The allocation survives `clear`, so a buffer handed back and forth between
/// the receiver and the decoder is reused every revolution.
#[derive(Clone, Debug)]
pub struct ScanBuffer {
    entries: VecDeque<ScanEntry>,
    capacity: usize,
}

impl ScanBuffer {
    pub fn with_capacity(capacity: usize) -> ScanBuffer {
        ScanBuffer {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Nominal capacity, not the allocation size.
    pub fn capacity(&self) -> usize {
        self.capacity
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

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&ScanEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanEntry> {
        self.entries.iter()
    }

    /// Consecutive `(i, i + 1)` entry pairs in arrival order.
    pub fn pairs(&self) -> impl Iterator<Item = (&ScanEntry, &ScanEntry)> {
        self.entries.iter().zip(self.entries.iter().skip(1))
    }

    pub fn push(
        &mut self,
        entry: ScanEntry,
        policy: OverflowPolicy,
    ) -> Result<PushOutcome, RBLidarError> {
        if !self.is_full() {
            self.entries.push_back(entry);
            return Ok(PushOutcome::Appended);
        }
        match policy {
            OverflowPolicy::Reject => Err(RBLidarError::BufferOverflow(self.capacity)),
            OverflowPolicy::DropOldest => {
                self.entries.pop_front();
                self.entries.push_back(entry);
                Ok(PushOutcome::EvictedOldest)
            }
            OverflowPolicy::Grow => {
                self.entries.push_back(entry);
                Ok(PushOutcome::Grew)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(azimuth: u16, timestamp: u32) -> ScanEntry {
        ScanEntry {
            sub_packet: RawSubPacket {
                azimuth,
                ..Default::default()
            },
            timestamp,
        }
    }

    fn azimuths(buffer: &ScanBuffer) -> Vec<u16> {
        buffer.iter().map(|e| e.sub_packet.azimuth).collect()
    }

    #[test]
    fn test_push_within_capacity() {
        let mut buffer = ScanBuffer::with_capacity(3);
        assert!(buffer.is_empty());
        for i in 0..3 {
            let outcome = buffer.push(entry(i * 100, i as u32), OverflowPolicy::Reject);
            assert_eq!(outcome.unwrap(), PushOutcome::Appended);
        }
        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());
        assert_eq!(buffer.get(1).unwrap().timestamp, 1);
        assert!(buffer.get(3).is_none());
    }

    #[test]
    fn test_reject_policy() {
        let mut buffer = ScanBuffer::with_capacity(2);
        buffer.push(entry(100, 0), OverflowPolicy::Reject).unwrap();
        buffer.push(entry(200, 0), OverflowPolicy::Reject).unwrap();
        assert!(matches!(
            buffer.push(entry(300, 0), OverflowPolicy::Reject),
            Err(RBLidarError::BufferOverflow(2))
        ));
        assert_eq!(azimuths(&buffer), vec![100, 200]);
    }

    #[test]
    fn test_drop_oldest_policy() {
        let mut buffer = ScanBuffer::with_capacity(2);
        buffer.push(entry(100, 0), OverflowPolicy::DropOldest).unwrap();
        buffer.push(entry(200, 0), OverflowPolicy::DropOldest).unwrap();
        let outcome = buffer.push(entry(300, 0), OverflowPolicy::DropOldest);
        assert_eq!(outcome.unwrap(), PushOutcome::EvictedOldest);
        assert_eq!(azimuths(&buffer), vec![200, 300]);
        assert_eq!(buffer.len(), buffer.capacity());
    }

    #[test]
    fn test_grow_policy() {
        let mut buffer = ScanBuffer::with_capacity(1);
        buffer.push(entry(100, 0), OverflowPolicy::Grow).unwrap();
        let outcome = buffer.push(entry(200, 0), OverflowPolicy::Grow);
        assert_eq!(outcome.unwrap(), PushOutcome::Grew);
        assert_eq!(azimuths(&buffer), vec![100, 200]);
    }

    #[test]
    fn test_clear_and_pairs() {
        let mut buffer = ScanBuffer::with_capacity(4);
        for azimuth in [0, 100, 200] {
            buffer.push(entry(azimuth, 0), OverflowPolicy::Reject).unwrap();
        }
        let pairs = buffer
            .pairs()
            .map(|(a, b)| (a.sub_packet.azimuth, b.sub_packet.azimuth))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![(0, 100), (100, 200)]);

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(buffer.pairs().count(), 0);
    }
}
