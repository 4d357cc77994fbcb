pub mod point;
pub mod scan;

pub use point::{decode_points, encode_points, PointRecord};
pub use scan::Scan;
