/// Size in bytes of every datagram the sensor emits.
pub const DATAGRAM_SIZE: usize = 1206;
pub const SUBPACKETS_PER_DATAGRAM: usize = 12;
pub const POINTS_PER_SUBPACKET: usize = 16;
pub(crate) const SUBPACKET_SIZE: usize = 100;
pub(crate) const SUBPACKET_HEADER_SIZE: usize = 4;
pub(crate) const RAW_POINT_SIZE: usize = 6;
pub(crate) const TIMESTAMP_OFFSET: usize = SUBPACKETS_PER_DATAGRAM * SUBPACKET_SIZE;
pub(crate) const FACTORY_OFFSET: usize = TIMESTAMP_OFFSET + 4;
/// Azimuth marking a padding sub-packet.
pub const AZIMUTH_PADDING: u16 = 0xFFFF;
/// Azimuth marking the first sub-packet of a revolution.
pub const AZIMUTH_REVOLUTION_START: u16 = 0;
pub(crate) const AZIMUTH_FULL_TURN: u32 = 36000;
pub(crate) const DEFAULT_SCAN_CAPACITY: usize = 300;
pub(crate) const DEFAULT_IP: &str = "0.0.0.0";
pub(crate) const DEFAULT_PORT: u16 = 2368;
pub(crate) const DEFAULT_READ_TIMEOUT_MS: u64 = 100;
// Larger than a datagram so oversized payloads are seen as such
pub(crate) const RECV_BUFFER_SIZE: usize = 2048;
pub(crate) const TERMINATOR_CAPACITY: usize = 10;
pub(crate) const SCAN_CHANNEL_CAPACITY: usize = 10;
