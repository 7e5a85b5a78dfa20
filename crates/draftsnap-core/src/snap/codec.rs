//! Compact integer encoding of a [`SnapMode`] for persistence.
//!
//! Bit layout, most significant first: restriction (2 bits), free, grid,
//! endpoint, middle, distance, center, on_entity, intersection. Bit 0 is
//! intersection and bits 8-9 hold the restriction. The distance value is
//! not encoded.

use super::{Restriction, SnapMode};

/// Number of flag bits below the restriction.
const FLAG_COUNT: u32 = 8;

fn restriction_bits(restriction: Restriction) -> u32 {
    match restriction {
        Restriction::None => 0,
        Restriction::Horizontal => 1,
        Restriction::Vertical => 2,
        Restriction::Orthogonal => 3,
    }
}

/// Encode a snap mode as an integer.
pub fn encode(mode: &SnapMode) -> u32 {
    let flags = [
        mode.free,
        mode.grid,
        mode.endpoint,
        mode.middle,
        mode.distance,
        mode.center,
        mode.on_entity,
        mode.intersection,
    ];
    flags
        .iter()
        .fold(restriction_bits(mode.restriction), |acc, &flag| (acc << 1) | u32::from(flag))
}

/// Decode an integer produced by [`encode`].
///
/// Whatever remains above the flag bits selects the restriction; values
/// other than 1, 2 and 3 give [`Restriction::None`].
pub fn decode(bits: u32) -> SnapMode {
    let bit = |n: u32| bits & (1 << n) != 0;
    let restriction = match bits >> FLAG_COUNT {
        1 => Restriction::Horizontal,
        2 => Restriction::Vertical,
        3 => Restriction::Orthogonal,
        _ => Restriction::None,
    };
    SnapMode {
        intersection: bit(0),
        on_entity: bit(1),
        center: bit(2),
        distance: bit(3),
        middle: bit(4),
        endpoint: bit(5),
        grid: bit(6),
        free: bit(7),
        restriction,
        ..SnapMode::default()
    }
}

impl SnapMode {
    /// Encode this mode, see [`encode`].
    pub fn to_bits(&self) -> u32 {
        encode(self)
    }

    /// Decode a mode, see [`decode`].
    pub fn from_bits(bits: u32) -> Self {
        decode(bits)
    }
}

/// Serde adapter storing a [`SnapMode`] as its encoded integer.
///
/// Use with `#[serde(with = "draftsnap_core::snap::codec::as_bits")]`.
pub mod as_bits {
    use super::{decode, encode};
    use crate::snap::SnapMode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(mode: &SnapMode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(encode(mode))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SnapMode, D::Error> {
        u32::deserialize(deserializer).map(decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flag_positions() {
        let intersection = SnapMode {
            intersection: true,
            ..SnapMode::default()
        };
        assert_eq!(encode(&intersection), 0b1);

        let free = SnapMode {
            free: true,
            ..SnapMode::default()
        };
        assert_eq!(encode(&free), 0b1000_0000);

        let endpoint_grid = SnapMode {
            grid: true,
            endpoint: true,
            ..SnapMode::default()
        };
        assert_eq!(encode(&endpoint_grid), 0b0110_0000);
    }

    #[test]
    fn test_restriction_in_high_bits() {
        let mode = SnapMode {
            restriction: Restriction::Orthogonal,
            ..SnapMode::default()
        };
        assert_eq!(encode(&mode), 3 << 8);
        assert_eq!(decode(2 << 8).restriction, Restriction::Vertical);
        assert_eq!(decode(1 << 8).restriction, Restriction::Horizontal);
    }

    #[test]
    fn test_roundtrip_preserves_flags_and_restriction() {
        let mode = SnapMode {
            free: true,
            middle: true,
            center: true,
            intersection: true,
            restriction: Restriction::Horizontal,
            ..SnapMode::default()
        };
        assert_eq!(decode(encode(&mode)), mode);
        assert_eq!(SnapMode::from_bits(mode.to_bits()), mode);
    }

    #[test]
    fn test_out_of_range_high_value_is_no_restriction() {
        let mode = decode((7 << 8) | 0b0100_0001);
        assert_eq!(mode.restriction, Restriction::None);
        assert!(mode.grid);
        assert!(mode.intersection);
        assert!(!mode.endpoint);
    }

    #[test]
    fn test_decode_resets_distance_value() {
        let mode = SnapMode {
            distance: true,
            distance_value: 25.0,
            ..SnapMode::default()
        };
        let decoded = decode(encode(&mode));
        assert!(decoded.distance);
        assert!((decoded.distance_value - crate::snap::DEFAULT_SNAP_DISTANCE).abs() < f64::EPSILON);
    }
}
