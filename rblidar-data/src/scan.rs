use crate::point::PointRecord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Struct to hold one revolution of lidar points, owned by the consumer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scan {
    /// Points in traversal order.
    pub points: Vec<PointRecord>,
}

impl Scan {
    pub fn new() -> Scan {
        Scan { points: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scan angles in degree.
    pub fn angles_degree(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(PointRecord::azimuth_degree)
    }

    pub fn distances(&self) -> impl Iterator<Item = u16> + '_ {
        self.points.iter().map(|p| p.distance)
    }
}

impl From<&[PointRecord]> for Scan {
    fn from(points: &[PointRecord]) -> Scan {
        Scan {
            points: points.to_vec(),
        }
    }
}
