//! Decoder for the encoded polyline format.
//!
//! Each coordinate is stored as a zigzag-signed delta from the previous point,
//! scaled by 1e5, split into 5-bit groups (least significant first) with 0x20
//! as the continuation bit, and offset by 63 into printable ASCII.

use crate::constants::POLYLINE_PRECISION;
use crate::error::DecodeError;
use crate::models::Coordinates;

const CHAR_OFFSET: u8 = 63;
const CONTINUATION_BIT: u8 = 0x20;
const GROUP_MASK: u8 = 0x1f;
/// Zigzag value of a 360 degree delta at 1e5 precision.
const MAX_ZIGZAG_VALUE: u64 = 2 * 36_000_000 + 1;
/// Groups needed to hold `MAX_ZIGZAG_VALUE`.
const MAX_GROUPS: u32 = 6;

/// Decode an encoded polyline into coordinates, in encoding order.
///
/// An empty string decodes to an empty path.
pub fn decode(encoded: &str) -> Result<Vec<Coordinates>, DecodeError> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }

    check_framing(encoded)?;

    let line = polyline::decode_polyline(encoded, POLYLINE_PRECISION)
        .map_err(|e| DecodeError::Invalid(e.to_string()))?;

    Ok(line
        .0
        .into_iter()
        .map(|c| Coordinates { lat: c.y, lng: c.x })
        .collect())
}

/// Walks the varint framing so malformed input is reported with a byte
/// position: every character printable, every value terminated, values in
/// lat/lng pairs, and no value larger than a real coordinate delta.
fn check_framing(encoded: &str) -> Result<(), DecodeError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;

    while index < bytes.len() {
        // latitude, then longitude
        for _ in 0..2 {
            let start = index;
            let mut value: u64 = 0;
            let mut groups: u32 = 0;

            loop {
                let position = index;
                let byte = *bytes
                    .get(position)
                    .ok_or(DecodeError::Truncated { position })?;

                if !(CHAR_OFFSET..=b'~').contains(&byte) {
                    let character = encoded[position..].chars().next().unwrap_or('\u{FFFD}');
                    return Err(DecodeError::InvalidCharacter {
                        character,
                        position,
                    });
                }
                if groups == MAX_GROUPS {
                    return Err(DecodeError::Overflow { position: start });
                }

                let chunk = byte - CHAR_OFFSET;
                value |= u64::from(chunk & GROUP_MASK) << (5 * groups);
                groups += 1;
                index += 1;

                if value > MAX_ZIGZAG_VALUE {
                    return Err(DecodeError::Overflow { position: start });
                }
                if chunk & CONTINUATION_BIT == 0 {
                    break;
                }
            }
        }
    }

    Ok(())
}
