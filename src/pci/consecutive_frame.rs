//!# Consecutive Frame
//! A continuation frame of a segmented message. Carries a 4-bit sequence number (wrapping
//! 15 → 0) and as much of the remaining payload as the chosen DLC allows, padded like a Single
//! Frame.
use alloc::vec::Vec;

use bytes::Bytes;

use crate::addressing::{self, AddressingFormat};
use crate::dlc::Dlc;
use crate::error::Error;
use crate::pci;
use crate::types::PacketType;

const HEADER_LEN: usize = 1;

/// Builds a fully padded Consecutive Frame.
pub fn create_valid_frame_data(
    format: AddressingFormat,
    target_address: Option<u8>,
    address_extension: Option<u8>,
    dlc: Option<Dlc>,
    sequence_number: u8,
    payload: &[u8],
    filler: u8,
) -> Result<(Dlc, Bytes), Error> {
    if sequence_number > 0x0F {
        return Err(Error::InvalidSequenceNumber(sequence_number));
    }
    let ai = addressing::encode_ai_data_bytes(format, target_address, address_extension)?;
    let ai_len = ai.len();

    let total_needed = ai_len + HEADER_LEN + payload.len();
    let chosen = match dlc {
        Some(d) => {
            if d.byte_count() < total_needed {
                return Err(Error::PayloadTooLong(payload.len()));
            }
            d
        }
        None => pci::default_dlc(total_needed)?,
    };

    let mut buf = Vec::with_capacity(chosen.byte_count());
    buf.extend_from_slice(&ai);
    buf.push((PacketType::ConsecutiveFrame.nibble() << 4) | sequence_number);
    buf.extend_from_slice(payload);
    pci::pad_to(&mut buf, chosen.byte_count(), filler);
    Ok((chosen, Bytes::from(buf)))
}

/// Recovers the sequence number from `raw`, or `None` if `raw` is not a Consecutive Frame.
pub fn decode_sequence_number(ai_bytes: usize, raw: &[u8]) -> Option<u8> {
    let pci_byte = *raw.get(ai_bytes)?;
    if pci_byte >> 4 != PacketType::ConsecutiveFrame.nibble() {
        return None;
    }
    Some(pci_byte & 0x0F)
}

/// Recovers everything after the PCI byte. The caller (not this module) knows, from FF_DL
/// tracked elsewhere, how many of these bytes are real payload versus padding.
pub fn decode_payload(ai_bytes: usize, raw: &[u8]) -> Option<Bytes> {
    let pci_idx = ai_bytes;
    let pci_byte = *raw.get(pci_idx)?;
    if pci_byte >> 4 != PacketType::ConsecutiveFrame.nibble() {
        return None;
    }
    let start = pci_idx + HEADER_LEN;
    if start > raw.len() {
        return None;
    }
    Some(Bytes::copy_from_slice(&raw[start..]))
}
