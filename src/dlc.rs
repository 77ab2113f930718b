//!# DLC Codec
//! Bidirectional map between the 4-bit Data Length Code nibble carried by a CAN frame header
//! and the number of data bytes it represents. Classic CAN only ever uses nibbles 0..=8
//! (byte-for-byte); CAN FD reuses nibbles 9..=15 for the larger, unevenly-spaced frame sizes.
use crate::error::Error;

/// Data Length Code: a total bijection between nibble values `0..=15` and the legal CAN/CAN FD
/// byte counts `{0..=8, 12, 16, 20, 24, 32, 48, 64}`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Dlc {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Twelve = 9,
    Sixteen = 10,
    Twenty = 11,
    TwentyFour = 12,
    ThirtyTwo = 13,
    FortyEight = 14,
    SixtyFour = 15,
}

/// Largest payload a classic (non-FD) CAN frame can carry.
pub const MAX_CLASSIC_BYTES: usize = 8;

/// Largest payload a CAN FD frame can carry.
pub const MAX_FD_BYTES: usize = 64;

impl Dlc {
    /// Number of data bytes this DLC nibble represents.
    pub fn byte_count(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Twelve => 12,
            Self::Sixteen => 16,
            Self::Twenty => 20,
            Self::TwentyFour => 24,
            Self::ThirtyTwo => 32,
            Self::FortyEight => 48,
            Self::SixtyFour => 64,
        }
    }

    /// Raw 4-bit nibble value of this DLC.
    pub fn nibble(self) -> u8 {
        self as u8
    }

    /// Recovers a [Dlc] from its raw nibble value (`0..=15`, total).
    pub fn from_nibble(nibble: u8) -> Result<Self, Error> {
        match nibble {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            6 => Ok(Self::Six),
            7 => Ok(Self::Seven),
            8 => Ok(Self::Eight),
            9 => Ok(Self::Twelve),
            10 => Ok(Self::Sixteen),
            11 => Ok(Self::Twenty),
            12 => Ok(Self::TwentyFour),
            13 => Ok(Self::ThirtyTwo),
            14 => Ok(Self::FortyEight),
            15 => Ok(Self::SixtyFour),
            other => Err(Error::InvalidDlcNibble(other)),
        }
    }

    /// Smallest DLC whose byte count is greater than or equal to `byte_count`.
    ///
    /// Fails if `byte_count` exceeds [MAX_FD_BYTES].
    pub fn encode(byte_count: usize) -> Result<Self, Error> {
        let nibble = match byte_count {
            0..=8 => byte_count as u8,
            9..=12 => 9,
            13..=16 => 10,
            17..=20 => 11,
            21..=24 => 12,
            25..=32 => 13,
            33..=48 => 14,
            49..=64 => 15,
            _ => return Err(Error::PayloadTooLong(byte_count)),
        };
        Self::from_nibble(nibble)
    }

    /// Byte count encoded by a raw DLC nibble. Equivalent to
    /// `Dlc::from_nibble(nibble).map(Dlc::byte_count)`.
    pub fn decode(nibble: u8) -> Result<usize, Error> {
        Self::from_nibble(nibble).map(Self::byte_count)
    }
}

/// Succeeds iff `byte_count` is exactly a legal CAN/CAN FD frame length.
pub fn validate_data_bytes_number(byte_count: usize) -> Result<(), Error> {
    match Dlc::encode(byte_count) {
        Ok(dlc) if dlc.byte_count() == byte_count => Ok(()),
        Ok(_) => Err(Error::InvalidByteCount(byte_count)),
        Err(_) => Err(Error::InvalidByteCount(byte_count)),
    }
}
