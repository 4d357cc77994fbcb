use crate::constants::POINTS_PER_SUBPACKET;
use crate::numeric::{angle_delta, wrap_azimuth};
use crate::scan_buffer::{ScanBuffer, ScanEntry};
use rblidar_data::PointRecord;

/// Expands a completed revolution into points, replacing the contents of
/// `points`.
///
/// Each sub-packet is interpolated towards its successor, so the last entry
/// of the buffer contributes no points and a buffer of `n` entries yields
/// `(n - 1) * 16` points.
pub fn decode_scan(scan: &ScanBuffer, points: &mut Vec<PointRecord>) {
    points.clear();
    points.reserve(scan.len().saturating_sub(1) * POINTS_PER_SUBPACKET);
    for (start, end) in scan.pairs() {
        interpolate(start, end, points);
    }
}

fn interpolate(start: &ScanEntry, end: &ScanEntry, points: &mut Vec<PointRecord>) {
    let n = POINTS_PER_SUBPACKET as u32;
    let start_angle = wrap_azimuth(start.sub_packet.azimuth.into());
    let end_angle = wrap_azimuth(end.sub_packet.azimuth.into());
    let angle_rate = angle_delta(start_angle, end_angle) / n;
    // A successor stamped earlier than its predecessor gives a flat block
    let time_rate = end.timestamp.saturating_sub(start.timestamp) / n;

    points.extend(
        start
            .sub_packet
            .points
            .iter()
            .zip(0u32..)
            .map(|(raw, j)| PointRecord {
                // start_angle + 15 * angle_rate stays far below u32::MAX
                azimuth: wrap_azimuth(start_angle + j * angle_rate) as u16,
                distance: raw.dist_0,
                intensity: raw.rssi_0.into(),
                timestamp: start.timestamp.wrapping_add(j * time_rate),
            }),
    );
}
