#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Full turn in hundredths of a degree.
const AZIMUTH_FULL_TURN: u16 = 36000;

/// One decoded measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointRecord {
    /// Interpolated horizontal angle in hundredths of a degree, in `[0, 36000)`.
    pub azimuth: u16,
    /// Raw distance reported by the sensor.
    pub distance: u16,
    /// Return strength of the first reading.
    pub intensity: u16,
    /// Interpolated timestamp in device clock ticks.
    pub timestamp: u32,
}

impl PointRecord {
    /// Size of one point in the packed byte form produced by [`encode_points`].
    pub const SIZE: usize = 10;

    pub fn azimuth_degree(&self) -> f64 {
        (self.azimuth % AZIMUTH_FULL_TURN) as f64 / 100.
    }

    pub fn azimuth_radian(&self) -> f64 {
        self.azimuth_degree().to_radians()
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.azimuth.to_le_bytes());
        out.extend_from_slice(&self.distance.to_le_bytes());
        out.extend_from_slice(&self.intensity.to_le_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
    }

    fn read_le(chunk: &[u8]) -> PointRecord {
        PointRecord {
            azimuth: u16::from_le_bytes([chunk[0], chunk[1]]),
            distance: u16::from_le_bytes([chunk[2], chunk[3]]),
            intensity: u16::from_le_bytes([chunk[4], chunk[5]]),
            timestamp: u32::from_le_bytes([chunk[6], chunk[7], chunk[8], chunk[9]]),
        }
    }
}

/// Packs points back to back, little-endian, no padding.
/// The byte length of the result is always `points.len() * PointRecord::SIZE`.
pub fn encode_points(points: &[PointRecord]) -> Vec<u8> {
    let mut out = Vec::with_capacity(points.len() * PointRecord::SIZE);
    for point in points {
        point.write_le(&mut out);
    }
    out
}

/// Inverse of [`encode_points`]. Returns `None` when `bytes` is not a whole
/// number of points.
pub fn decode_points(bytes: &[u8]) -> Option<Vec<PointRecord>> {
    if bytes.len() % PointRecord::SIZE != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(PointRecord::SIZE)
            .map(PointRecord::read_le)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_points_layout() {
        let points = [PointRecord {
            azimuth: 0x1234,
            distance: 0x0102,
            intensity: 0x00FF,
            timestamp: 0xAABBCCDD,
        }];
        let bytes = encode_points(&points);
        assert_eq!(bytes.len(), PointRecord::SIZE);
        assert_eq!(
            bytes,
            vec![0x34, 0x12, 0x02, 0x01, 0xFF, 0x00, 0xDD, 0xCC, 0xBB, 0xAA]
        );
    }

    #[test]
    fn test_decode_points() {
        let points = vec![
            PointRecord {
                azimuth: 100,
                distance: 2000,
                intensity: 37,
                timestamp: 1000,
            },
            PointRecord {
                azimuth: 35999,
                distance: 0,
                intensity: 255,
                timestamp: u32::MAX,
            },
        ];
        let bytes = encode_points(&points);
        assert_eq!(bytes.len(), 20);
        assert_eq!(decode_points(&bytes), Some(points));
        assert_eq!(decode_points(&bytes[..19]), None);
        assert_eq!(decode_points(&[]), Some(Vec::new()));
    }

    #[test]
    fn test_azimuth_degree() {
        let point = PointRecord {
            azimuth: 9000,
            ..Default::default()
        };
        assert!(f64::abs(point.azimuth_degree() - 90.) < 1e-9);
        assert!(f64::abs(point.azimuth_radian() - std::f64::consts::FRAC_PI_2) < 1e-9);
    }
}
