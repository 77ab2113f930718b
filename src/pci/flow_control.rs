//!# Flow Control
//! A receiver-to-sender frame regulating how fast the sender may emit Consecutive Frames:
//! `CONTINUE_TO_SEND` names a block size and minimum separation time, `WAIT` asks the sender to
//! pause, `OVERFLOW` tells it to abandon the message.
use alloc::vec::Vec;

use bytes::Bytes;

use crate::addressing::{self, AddressingFormat};
use crate::dlc::Dlc;
use crate::error::Error;
use crate::pci;
use crate::types::{FlowStatus, PacketType};

const HEADER_LEN: usize = 3;

/// Builds a fully padded Flow Control frame.
///
/// `block_size`/`st_min` are mandatory for [FlowStatus::ContinueToSend]. For `Wait`/`Overflow`
/// they are optional: supplied values are transmitted verbatim, otherwise `filler` takes their
/// place, consistent with how padding works for every other frame kind.
pub fn create_valid_frame_data(
    format: AddressingFormat,
    target_address: Option<u8>,
    address_extension: Option<u8>,
    dlc: Option<Dlc>,
    flow_status: FlowStatus,
    block_size: Option<u8>,
    st_min: Option<u8>,
    filler: u8,
) -> Result<(Dlc, Bytes), Error> {
    let (bs, st) = match flow_status {
        FlowStatus::ContinueToSend => (
            block_size.ok_or(Error::MissingFlowControlParameter("block_size"))?,
            st_min.ok_or(Error::MissingFlowControlParameter("st_min"))?,
        ),
        FlowStatus::Wait | FlowStatus::Overflow => (block_size.unwrap_or(filler), st_min.unwrap_or(filler)),
    };

    let ai = addressing::encode_ai_data_bytes(format, target_address, address_extension)?;
    let ai_len = ai.len();
    let total_needed = ai_len + HEADER_LEN;

    let chosen = match dlc {
        Some(d) => {
            if d.byte_count() < total_needed {
                return Err(Error::PayloadTooLong(0));
            }
            d
        }
        None => pci::default_dlc(total_needed)?,
    };

    let mut buf = Vec::with_capacity(chosen.byte_count());
    buf.extend_from_slice(&ai);
    buf.push((PacketType::FlowControl.nibble() << 4) | flow_status.nibble());
    buf.push(bs);
    buf.push(st);
    pci::pad_to(&mut buf, chosen.byte_count(), filler);
    Ok((chosen, Bytes::from(buf)))
}

/// Recovers the raw flow status nibble from `raw`, or `None` if `raw` is not a Flow Control
/// frame. Reserved nibble values (`0x3..=0xF`) are returned as-is; only the encoder rejects them.
pub fn decode_flow_status(ai_bytes: usize, raw: &[u8]) -> Option<u8> {
    let pci_byte = *raw.get(ai_bytes)?;
    if pci_byte >> 4 != PacketType::FlowControl.nibble() {
        return None;
    }
    Some(pci_byte & 0x0F)
}

/// Recovers the block size byte, or `None` if `raw` is not a well-formed Flow Control frame.
pub fn decode_block_size(ai_bytes: usize, raw: &[u8]) -> Option<u8> {
    decode_flow_status(ai_bytes, raw)?;
    raw.get(ai_bytes + 1).copied()
}

/// Recovers the STmin byte, or `None` if `raw` is not a well-formed Flow Control frame.
pub fn decode_st_min(ai_bytes: usize, raw: &[u8]) -> Option<u8> {
    decode_flow_status(ai_bytes, raw)?;
    raw.get(ai_bytes + 2).copied()
}
