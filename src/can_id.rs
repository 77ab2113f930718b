//!# CAN-ID Codec
//! Validates 11/29-bit CAN Identifiers and implements the two fixed-addressing schemes
//! ISO 15765-2 §10 defines on top of a 29-bit ID: Normal Fixed and Mixed 29-bit addressing.
//! Both pack a fixed priority, a format byte identifying physical vs. functional addressing,
//! and the Target/Source Address into the identifier itself.
use embedded_can::{ExtendedId, Id, StandardId};

use crate::error::Error;
use crate::types::AddressingType;

/// Largest legal 11-bit CAN Identifier.
pub const CAN_ID_11BIT_MAX: u32 = 0x7FF;

/// Largest legal 29-bit CAN Identifier.
pub const CAN_ID_29BIT_MAX: u32 = 0x1FFF_FFFF;

const PRIORITY: u32 = 0x18;
const NORMAL_FIXED_PHYSICAL: u8 = 0xDA;
const NORMAL_FIXED_FUNCTIONAL: u8 = 0xDB;
const MIXED_29BIT_PHYSICAL: u8 = 0xCE;
const MIXED_29BIT_FUNCTIONAL: u8 = 0xCD;

fn build(format: u8, target_address: u8, source_address: u8) -> u32 {
    (PRIORITY << 24) | (u32::from(format) << 16) | (u32::from(target_address) << 8) | u32::from(source_address)
}

fn split(can_id: u32) -> (u16, u8, u8) {
    let prefix = (can_id >> 16) as u16;
    let target_address = (can_id >> 8) as u8;
    let source_address = can_id as u8;
    (prefix, target_address, source_address)
}

/// Validates that `can_id` fits in the 29-bit CAN Identifier space.
pub fn validate_can_id(can_id: u32) -> Result<(), Error> {
    if can_id > CAN_ID_29BIT_MAX {
        Err(Error::InvalidCanId(can_id))
    } else {
        Ok(())
    }
}

/// True if `can_id` fits in an 11-bit (standard) CAN Identifier.
pub fn is_11bit(can_id: u32) -> bool {
    can_id <= CAN_ID_11BIT_MAX
}

/// Converts a raw numeric CAN ID to an [embedded_can::Id], choosing [StandardId] when it fits
/// and [ExtendedId] otherwise.
///
/// Panics if `can_id` exceeds the 29-bit address space; callers should [validate_can_id] first.
pub fn to_embedded_id(can_id: u32) -> Id {
    if is_11bit(can_id) {
        Id::Standard(StandardId::new(can_id as u16).expect("validated by is_11bit"))
    } else {
        Id::Extended(ExtendedId::new(can_id).expect("caller must validate_can_id before calling to_embedded_id"))
    }
}

/// Recovers the raw numeric CAN ID carried by an [embedded_can::Id].
pub fn from_embedded_id(id: Id) -> u32 {
    match id {
        Id::Standard(id) => u32::from(id.as_raw()),
        Id::Extended(id) => id.as_raw(),
    }
}

/// Encodes a Normal Fixed addressed 29-bit CAN Identifier: `0x18{DA|DB} TA SA`.
pub fn encode_normal_fixed(addressing_type: AddressingType, target_address: u8, source_address: u8) -> u32 {
    let format = match addressing_type {
        AddressingType::Physical => NORMAL_FIXED_PHYSICAL,
        AddressingType::Functional => NORMAL_FIXED_FUNCTIONAL,
    };
    build(format, target_address, source_address)
}

/// Decodes a Normal Fixed addressed 29-bit CAN Identifier.
///
/// Fails if the two most significant bytes are not `0x18DA` or `0x18DB`.
pub fn decode_normal_fixed(can_id: u32) -> Result<(AddressingType, u8, u8), Error> {
    let (prefix, target_address, source_address) = split(can_id);
    match prefix {
        0x18DA => Ok((AddressingType::Physical, target_address, source_address)),
        0x18DB => Ok((AddressingType::Functional, target_address, source_address)),
        _ => Err(Error::UnrecognizedFixedAddressingPrefix(can_id)),
    }
}

/// Encodes a Mixed 29-bit addressed CAN Identifier: `0x18{CE|CD} TA SA`.
pub fn encode_mixed_29bit(addressing_type: AddressingType, target_address: u8, source_address: u8) -> u32 {
    let format = match addressing_type {
        AddressingType::Physical => MIXED_29BIT_PHYSICAL,
        AddressingType::Functional => MIXED_29BIT_FUNCTIONAL,
    };
    build(format, target_address, source_address)
}

/// Decodes a Mixed 29-bit addressed CAN Identifier.
///
/// Fails if the two most significant bytes are not `0x18CE` or `0x18CD`.
pub fn decode_mixed_29bit(can_id: u32) -> Result<(AddressingType, u8, u8), Error> {
    let (prefix, target_address, source_address) = split(can_id);
    match prefix {
        0x18CE => Ok((AddressingType::Physical, target_address, source_address)),
        0x18CD => Ok((AddressingType::Functional, target_address, source_address)),
        _ => Err(Error::UnrecognizedFixedAddressingPrefix(can_id)),
    }
}
