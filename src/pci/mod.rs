//!# PCI-frame handlers
//! One submodule per packet kind (`single_frame`, `first_frame`, `consecutive_frame`,
//! `flow_control`). Each knows the Addressing Information prefix from [crate::addressing], the
//! PCI nibble(s) for its kind, and how to fill the remainder of a DLC-sized frame.
use alloc::vec::Vec;

use crate::dlc::Dlc;
use crate::error::Error;

pub mod consecutive_frame;
pub mod first_frame;
pub mod flow_control;
pub mod single_frame;

/// Padding byte used when a caller does not override it.
pub const DEFAULT_FILLER_BYTE: u8 = 0xCC;

/// Picks the smallest DLC that can hold `needed_bytes`, defaulting to a full 8-byte classic
/// frame when `needed_bytes` would otherwise fit a shorter one.
///
/// Classic CAN frames are conventionally sent at their maximum length regardless of how much of
/// it carries real data; this only steps past 8 bytes when `needed_bytes` itself demands it.
pub(crate) fn default_dlc(needed_bytes: usize) -> Result<Dlc, Error> {
    Dlc::encode(needed_bytes.max(crate::dlc::MAX_CLASSIC_BYTES))
}

pub(crate) fn pad_to(buf: &mut Vec<u8>, total_len: usize, filler: u8) {
    buf.resize(total_len, filler);
}
