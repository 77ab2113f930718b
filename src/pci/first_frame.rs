//!# First Frame
//! Opens a segmented diagnostic message: declares the total length (FF_DL) of the message the
//! following Consecutive Frames will complete, and carries as much payload as the chosen DLC
//! leaves room for — no more, no less, and no padding.
use alloc::vec::Vec;

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::addressing::{self, AddressingFormat};
use crate::dlc::Dlc;
use crate::error::Error;
use crate::types::PacketType;

const SHORT_FORM_HEADER_LEN: usize = 2;
const ESCAPE_FORM_HEADER_LEN: usize = 6;
const SHORT_FORM_MAX_FF_DL: u32 = 4095;

/// Builds a First Frame. `dlc` is mandatory: a First Frame's whole purpose is to fully occupy a
/// frame, so there is no "smallest DLC" to infer.
///
/// `payload` must exactly fill the bytes the chosen DLC leaves after the header; the declared
/// `ff_dl` may exceed `payload.len()` (the remainder arrives over Consecutive Frames) but never
/// fall short of it.
pub fn create_valid_frame_data(
    format: AddressingFormat,
    target_address: Option<u8>,
    address_extension: Option<u8>,
    dlc: Dlc,
    ff_dl: u32,
    payload: &[u8],
) -> Result<Bytes, Error> {
    let ai = addressing::encode_ai_data_bytes(format, target_address, address_extension)?;
    let ai_len = ai.len();

    let minimum_ff_dl = (crate::dlc::MAX_CLASSIC_BYTES - ai_len) as u32;
    if ff_dl < minimum_ff_dl {
        return Err(Error::FirstFrameDlTooSmall { ff_dl, minimum: minimum_ff_dl });
    }
    if ff_dl < payload.len() as u32 {
        return Err(Error::FirstFrameDlTooSmall { ff_dl, minimum: payload.len() as u32 });
    }

    let use_escape = ff_dl > SHORT_FORM_MAX_FF_DL;
    let header_len = if use_escape { ESCAPE_FORM_HEADER_LEN } else { SHORT_FORM_HEADER_LEN };

    if dlc.byte_count() < ai_len + header_len {
        return Err(Error::PayloadTooLong(payload.len()));
    }
    let capacity = dlc.byte_count() - ai_len - header_len;
    if payload.len() != capacity {
        return Err(Error::FirstFramePayloadSize { expected: capacity, actual: payload.len() });
    }

    let mut buf = Vec::with_capacity(dlc.byte_count());
    buf.extend_from_slice(&ai);
    if use_escape {
        buf.push(PacketType::FirstFrame.nibble() << 4);
        buf.push(0x00);
        let mut ff_dl_bytes = [0u8; 4];
        BigEndian::write_u32(&mut ff_dl_bytes, ff_dl);
        buf.extend_from_slice(&ff_dl_bytes);
    } else {
        buf.push((PacketType::FirstFrame.nibble() << 4) | ((ff_dl >> 8) as u8 & 0x0F));
        buf.push(ff_dl as u8);
    }
    buf.extend_from_slice(payload);
    Ok(Bytes::from(buf))
}

/// Recovers FF_DL from `raw`, or `None` if `raw` is not a well-formed First Frame.
pub fn decode_ff_dl(ai_bytes: usize, raw: &[u8]) -> Option<u32> {
    let pci_idx = ai_bytes;
    let pci_byte = *raw.get(pci_idx)?;
    if pci_byte >> 4 != PacketType::FirstFrame.nibble() {
        return None;
    }
    let low = pci_byte & 0x0F;
    if low == 0 {
        if *raw.get(pci_idx + 1)? != 0x00 {
            return None;
        }
        let bytes = raw.get(pci_idx + 2..pci_idx + 6)?;
        Some(BigEndian::read_u32(bytes))
    } else {
        let next = *raw.get(pci_idx + 1)?;
        Some((u32::from(low) << 8) | u32::from(next))
    }
}

/// Recovers the payload carried by this First Frame, or `None` if `raw` is not well-formed.
pub fn decode_payload(ai_bytes: usize, raw: &[u8]) -> Option<Bytes> {
    let pci_idx = ai_bytes;
    let pci_byte = *raw.get(pci_idx)?;
    if pci_byte >> 4 != PacketType::FirstFrame.nibble() {
        return None;
    }
    let low = pci_byte & 0x0F;
    let header_len = if low == 0 { ESCAPE_FORM_HEADER_LEN } else { SHORT_FORM_HEADER_LEN };
    let start = pci_idx + header_len;
    if start > raw.len() {
        return None;
    }
    Some(Bytes::copy_from_slice(&raw[start..]))
}
