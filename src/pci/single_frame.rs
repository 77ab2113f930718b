//!# Single Frame
//! A whole diagnostic message that fits in one CAN frame. Short form spends a single nibble on
//! the length; escape form (CAN FD only) spends a whole byte, trading one payload byte for a
//! larger range.
use alloc::vec::Vec;

use bytes::Bytes;

use crate::addressing::{self, AddressingFormat};
use crate::dlc::{Dlc, MAX_CLASSIC_BYTES};
use crate::error::Error;
use crate::pci::{self, DEFAULT_FILLER_BYTE};
use crate::types::PacketType;

const SHORT_FORM_HEADER_LEN: usize = 1;
const ESCAPE_FORM_HEADER_LEN: usize = 2;

/// Builds a fully padded Single Frame, choosing short or escape PCI form and, when `dlc` is
/// `None`, the smallest DLC that can carry it.
///
/// The escape form is only considered when `dlc` already calls for a CAN FD frame (> 8 bytes);
/// otherwise a payload too long for the short form's nibble is rejected rather than silently
/// escalated to CAN FD on the caller's behalf.
pub fn create_valid_frame_data(
    format: AddressingFormat,
    target_address: Option<u8>,
    address_extension: Option<u8>,
    dlc: Option<Dlc>,
    payload: &[u8],
    filler: u8,
) -> Result<(Dlc, Bytes), Error> {
    let ai = addressing::encode_ai_data_bytes(format, target_address, address_extension)?;
    let ai_len = ai.len();

    let short_capacity = 7usize.saturating_sub(ai_len);
    let fits_short = payload.len() <= short_capacity;

    let prefers_escape = match dlc {
        Some(d) => d.byte_count() > MAX_CLASSIC_BYTES,
        None => !fits_short,
    };

    if !prefers_escape {
        if !fits_short {
            return Err(Error::PayloadTooLong(payload.len()));
        }
        let total_needed = ai_len + SHORT_FORM_HEADER_LEN + payload.len();
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
        buf.push((PacketType::SingleFrame.nibble() << 4) | payload.len() as u8);
        buf.extend_from_slice(payload);
        pci::pad_to(&mut buf, chosen.byte_count(), filler);
        return Ok((chosen, Bytes::from(buf)));
    }

    let escape_capacity = 62usize.saturating_sub(ai_len);
    if payload.len() > escape_capacity {
        return Err(Error::PayloadTooLong(payload.len()));
    }
    let total_needed = ai_len + ESCAPE_FORM_HEADER_LEN + payload.len();
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
    buf.push(PacketType::SingleFrame.nibble() << 4);
    buf.push(payload.len() as u8);
    buf.extend_from_slice(payload);
    pci::pad_to(&mut buf, chosen.byte_count(), filler);
    Ok((chosen, Bytes::from(buf)))
}

/// Recovers SF_DL (the declared payload length) from `raw`, or `None` if `raw` is not a Single
/// Frame or is too short to carry the form its own PCI nibble claims.
pub fn decode_sf_dl(ai_bytes: usize, raw: &[u8]) -> Option<usize> {
    let pci_idx = ai_bytes;
    let pci_byte = *raw.get(pci_idx)?;
    if pci_byte >> 4 != PacketType::SingleFrame.nibble() {
        return None;
    }
    let low = pci_byte & 0x0F;
    if low != 0 {
        return Some(low as usize);
    }
    Some(usize::from(*raw.get(pci_idx + 1)?))
}

/// Recovers the payload from `raw`, or `None` if `raw` is not a well-formed Single Frame.
pub fn decode_payload(ai_bytes: usize, raw: &[u8]) -> Option<Bytes> {
    let pci_idx = ai_bytes;
    let pci_byte = *raw.get(pci_idx)?;
    if pci_byte >> 4 != PacketType::SingleFrame.nibble() {
        return None;
    }
    let low = pci_byte & 0x0F;
    let (header_len, sf_dl) = if low != 0 {
        (SHORT_FORM_HEADER_LEN, low as usize)
    } else {
        (ESCAPE_FORM_HEADER_LEN, usize::from(*raw.get(pci_idx + 1)?))
    };
    let start = pci_idx + header_len;
    let end = start.checked_add(sf_dl)?;
    if end > raw.len() {
        return None;
    }
    Some(Bytes::copy_from_slice(&raw[start..end]))
}
