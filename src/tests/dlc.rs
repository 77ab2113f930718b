use proptest::prelude::*;

use crate::dlc::{validate_data_bytes_number, Dlc, MAX_FD_BYTES};
use crate::error::Error;

#[test]
fn test_classic_round_trip() {
    for n in 0..=8usize {
        let dlc = Dlc::encode(n).unwrap();
        assert_eq!(dlc.byte_count(), n);
        assert_eq!(Dlc::decode(dlc.nibble()).unwrap(), n);
    }
}

#[test]
fn test_fd_byte_counts() {
    let table = [(9, 12), (10, 16), (11, 20), (12, 24), (13, 32), (14, 48), (15, 64)];
    for (nibble, byte_count) in table {
        let dlc = Dlc::from_nibble(nibble).unwrap();
        assert_eq!(dlc.byte_count(), byte_count);
        assert_eq!(dlc.nibble(), nibble);
    }
}

#[test]
fn test_encode_rounds_up() {
    assert_eq!(Dlc::encode(9).unwrap().byte_count(), 12);
    assert_eq!(Dlc::encode(13).unwrap().byte_count(), 16);
    assert_eq!(Dlc::encode(64).unwrap().byte_count(), 64);
}

#[test]
fn test_encode_rejects_too_large() {
    assert_eq!(Dlc::encode(MAX_FD_BYTES + 1).unwrap_err(), Error::PayloadTooLong(65));
}

#[test]
fn test_from_nibble_rejects_out_of_range() {
    assert_eq!(Dlc::from_nibble(16).unwrap_err(), Error::InvalidDlcNibble(16));
}

#[test]
fn test_validate_data_bytes_number() {
    assert!(validate_data_bytes_number(8).is_ok());
    assert!(validate_data_bytes_number(16).is_ok());
    assert_eq!(validate_data_bytes_number(9).unwrap_err(), Error::InvalidByteCount(9));
    assert_eq!(validate_data_bytes_number(100).unwrap_err(), Error::InvalidByteCount(100));
}

proptest! {
    /// Every nibble 0..=15 round-trips through `byte_count` and back to the same nibble: the
    /// map is a total bijection, not just correct on the classic-CAN subset.
    #[test]
    fn prop_nibble_byte_count_round_trip(nibble in 0u8..=15) {
        let dlc = Dlc::from_nibble(nibble).unwrap();
        prop_assert_eq!(Dlc::encode(dlc.byte_count()).unwrap(), dlc);
    }

    /// `encode` never returns a DLC smaller than what was asked for.
    #[test]
    fn prop_encode_never_shrinks(n in 0usize..=MAX_FD_BYTES) {
        let dlc = Dlc::encode(n).unwrap();
        prop_assert!(dlc.byte_count() >= n);
    }

    /// Anything past the largest CAN FD frame is rejected, never silently truncated.
    #[test]
    fn prop_encode_rejects_above_max(n in (MAX_FD_BYTES + 1)..10_000usize) {
        prop_assert!(Dlc::encode(n).is_err());
    }
}
