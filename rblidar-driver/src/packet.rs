use crate::constants::{
    AZIMUTH_PADDING, AZIMUTH_REVOLUTION_START, DATAGRAM_SIZE, FACTORY_OFFSET,
    POINTS_PER_SUBPACKET, RAW_POINT_SIZE, SUBPACKETS_PER_DATAGRAM, SUBPACKET_HEADER_SIZE,
    SUBPACKET_SIZE, TIMESTAMP_OFFSET,
};
use crate::error::RBLidarError;
use crate::numeric::{to_u16, to_u32};

/// Two distance/intensity readings of one laser firing.
/// Only the first reading is decoded into points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawPoint {
    pub dist_0: u16,
    pub rssi_0: u8,
    pub dist_1: u16,
    pub rssi_1: u8,
}

impl RawPoint {
    fn parse(bytes: &[u8]) -> RawPoint {
        RawPoint {
            dist_0: to_u16(bytes[0], bytes[1]),
            rssi_0: bytes[2],
            dist_1: to_u16(bytes[3], bytes[4]),
            rssi_1: bytes[5],
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.dist_0.to_le_bytes());
        out.push(self.rssi_0);
        out.extend_from_slice(&self.dist_1.to_le_bytes());
        out.push(self.rssi_1);
    }
}

/// Sixteen points sampled at one reported azimuth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawSubPacket {
    pub header: u16,
    /// Hundredths of a degree.
    pub azimuth: u16,
    pub points: [RawPoint; POINTS_PER_SUBPACKET],
}

impl RawSubPacket {
    pub fn is_padding(&self) -> bool {
        self.azimuth == AZIMUTH_PADDING
    }

    pub fn is_revolution_start(&self) -> bool {
        self.azimuth == AZIMUTH_REVOLUTION_START
    }

    fn parse(bytes: &[u8]) -> RawSubPacket {
        let points = std::array::from_fn(|j| {
            let offset = SUBPACKET_HEADER_SIZE + j * RAW_POINT_SIZE;
            RawPoint::parse(&bytes[offset..offset + RAW_POINT_SIZE])
        });
        RawSubPacket {
            header: to_u16(bytes[0], bytes[1]),
            azimuth: to_u16(bytes[2], bytes[3]),
            points,
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header.to_le_bytes());
        out.extend_from_slice(&self.azimuth.to_le_bytes());
        for point in &self.points {
            point.write(out);
        }
    }
}

/// One UDP payload as sent by the sensor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawDatagram {
    pub sub_packets: [RawSubPacket; SUBPACKETS_PER_DATAGRAM],
    /// Device clock ticks. Zero means the sensor did not provide one.
    pub timestamp: u32,
    pub factory: u16,
}

impl RawDatagram {
    /// Serializes the datagram in wire order. Used to replay or simulate a sensor.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(DATAGRAM_SIZE);
        for sub_packet in &self.sub_packets {
            sub_packet.write(&mut out);
        }
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(&self.factory.to_le_bytes());
        out
    }
}

/// Decodes a datagram. All multi-byte fields are little-endian on the wire.
pub fn parse_datagram(data: &[u8]) -> Result<RawDatagram, RBLidarError> {
    if data.len() != DATAGRAM_SIZE {
        return Err(RBLidarError::InvalidDatagramLength(data.len()));
    }
    let sub_packets = std::array::from_fn(|i| {
        let offset = i * SUBPACKET_SIZE;
        RawSubPacket::parse(&data[offset..offset + SUBPACKET_SIZE])
    });
    Ok(RawDatagram {
        sub_packets,
        timestamp: to_u32(&data[TIMESTAMP_OFFSET..FACTORY_OFFSET]),
        factory: to_u16(data[FACTORY_OFFSET], data[FACTORY_OFFSET + 1]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_datagram_bytes() -> Vec<u8> {
        let mut data = vec![0u8; DATAGRAM_SIZE];
        // sub-packet 0
        data[0..4].copy_from_slice(&[0xEE, 0xFF, 0x10, 0x27]); // header, azimuth 10000
        data[4..10].copy_from_slice(&[0xE8, 0x03, 0x64, 0xD0, 0x07, 0x32]);
        // last point of sub-packet 0
        data[94..100].copy_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        // sub-packet 1 is padding
        data[102..104].copy_from_slice(&[0xFF, 0xFF]);
        // sub-packet 11
        data[1102..1104].copy_from_slice(&[0x9F, 0x8C]); // azimuth 35999
        data[1200..1204].copy_from_slice(&[0x78, 0x56, 0x34, 0x12]);
        data[1204..1206].copy_from_slice(&[0x37, 0x10]);
        data
    }

    #[test]
    fn test_parse_datagram() {
        let datagram = parse_datagram(&raw_datagram_bytes()).unwrap();

        let first = &datagram.sub_packets[0];
        assert_eq!(first.header, 0xFFEE);
        assert_eq!(first.azimuth, 10000);
        assert_eq!(
            first.points[0],
            RawPoint {
                dist_0: 1000,
                rssi_0: 100,
                dist_1: 2000,
                rssi_1: 50,
            }
        );
        assert_eq!(
            first.points[15],
            RawPoint {
                dist_0: 0x0201,
                rssi_0: 0x03,
                dist_1: 0x0504,
                rssi_1: 0x06,
            }
        );
        assert!(!first.is_padding());
        assert!(!first.is_revolution_start());

        assert!(datagram.sub_packets[1].is_padding());
        assert!(datagram.sub_packets[2].is_revolution_start());
        assert_eq!(datagram.sub_packets[11].azimuth, 35999);
        assert_eq!(datagram.timestamp, 0x12345678);
        assert_eq!(datagram.factory, 0x1037);
    }

    #[test]
    fn test_parse_datagram_rejects_wrong_length() {
        let data = raw_datagram_bytes();
        assert!(matches!(
            parse_datagram(&data[..DATAGRAM_SIZE - 1]),
            Err(RBLidarError::InvalidDatagramLength(1205))
        ));
        assert!(matches!(
            parse_datagram(&[]),
            Err(RBLidarError::InvalidDatagramLength(0))
        ));

        let mut longer = data.clone();
        longer.push(0);
        assert!(matches!(
            parse_datagram(&longer),
            Err(RBLidarError::InvalidDatagramLength(1207))
        ));
    }

    #[test]
    fn test_to_bytes_matches_wire_layout() {
        let data = raw_datagram_bytes();
        let datagram = parse_datagram(&data).unwrap();
        assert_eq!(datagram.to_bytes(), data);
    }

    #[test]
    fn test_out_of_range_azimuth_is_kept() {
        let mut data = vec![0u8; DATAGRAM_SIZE];
        data[2..4].copy_from_slice(&40000u16.to_le_bytes());
        let datagram = parse_datagram(&data).unwrap();
        assert_eq!(datagram.sub_packets[0].azimuth, 40000);
        assert!(!datagram.sub_packets[0].is_padding());
    }
}
