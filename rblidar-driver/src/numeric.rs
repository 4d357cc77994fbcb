use crate::constants::AZIMUTH_FULL_TURN;

pub(crate) fn to_u16(lo: u8, hi: u8) -> u16 {
    u16::from_le_bytes([lo, hi])
}

pub(crate) fn to_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

pub(crate) fn wrap_azimuth(azimuth: u32) -> u32 {
    azimuth % AZIMUTH_FULL_TURN
}

/// Angular distance travelled from `start` to `end`, both already wrapped.
/// Crossing the zero seam counts forward through 36000.
pub(crate) fn angle_delta(start: u32, end: u32) -> u32 {
    if end >= start {
        end - start
    } else {
        AZIMUTH_FULL_TURN - start + end
    }
}

pub(crate) fn to_string(data: &[u8]) -> String {
    data.iter()
        .map(|e| format!("{:02X}", e))
        .collect::<Vec<_>>()
        .join(" ")
}
