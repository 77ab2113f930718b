//!# Addressing-Information Codec
//! For each [AddressingFormat] this reports how many leading CAN frame data bytes carry
//! Addressing Information, encodes/decodes those bytes, and validates the combination of
//! CAN ID / Target Address / Source Address / Address Extension a caller supplies.
use bytes::Bytes;

use crate::can_id::{self, CAN_ID_11BIT_MAX};
use crate::error::Error;
pub use crate::types::AddressingFormat;
use crate::types::AddressingType;

/// Addressing Information decoded from, or destined for, a CAN packet.
///
/// Fields absent for the current [AddressingFormat] are `None`, not zero.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct AddressingInfo {
    /// Target Address, present for [AddressingFormat::NormalFixed], [AddressingFormat::Extended]
    /// and [AddressingFormat::Mixed29Bit].
    pub target_address: Option<u8>,
    /// Source Address, present for [AddressingFormat::NormalFixed] and [AddressingFormat::Mixed29Bit].
    pub source_address: Option<u8>,
    /// Address Extension, present for [AddressingFormat::Mixed11Bit] and [AddressingFormat::Mixed29Bit].
    pub address_extension: Option<u8>,
}

/// Number of leading CAN frame data bytes consumed by Addressing Information.
pub fn ai_bytes(format: AddressingFormat) -> usize {
    format.ai_bytes()
}

/// Encodes the leading AI data bytes for `format`.
///
/// Returns an empty sequence for formats that carry no AI data byte (Normal 11-bit, Normal Fixed).
pub fn encode_ai_data_bytes(format: AddressingFormat, target_address: Option<u8>, address_extension: Option<u8>) -> Result<Bytes, Error> {
    match format {
        AddressingFormat::Normal11Bit | AddressingFormat::NormalFixed => Ok(Bytes::new()),
        AddressingFormat::Extended => {
            let ta = target_address.ok_or(Error::MissingAddress("target_address"))?;
            Ok(Bytes::copy_from_slice(&[ta]))
        }
        AddressingFormat::Mixed11Bit | AddressingFormat::Mixed29Bit => {
            let ae = address_extension.ok_or(Error::MissingAddress("address_extension"))?;
            Ok(Bytes::copy_from_slice(&[ae]))
        }
    }
}

/// Decodes Addressing Information from a CAN ID and the leading AI data bytes.
///
/// `ai_data_bytes` must already be exactly [ai_bytes] long for `format`.
pub fn decode_ai(format: AddressingFormat, can_id: u32, ai_data_bytes: &[u8]) -> Result<AddressingInfo, Error> {
    match format {
        AddressingFormat::Normal11Bit => {
            validate_ai_normal_11bit(can_id)?;
            Ok(AddressingInfo::default())
        }
        AddressingFormat::NormalFixed => {
            let (_, target_address, source_address) = can_id::decode_normal_fixed(can_id)?;
            Ok(AddressingInfo {
                target_address: Some(target_address),
                source_address: Some(source_address),
                address_extension: None,
            })
        }
        AddressingFormat::Extended => Ok(AddressingInfo {
            target_address: ai_data_bytes.first().copied(),
            source_address: None,
            address_extension: None,
        }),
        AddressingFormat::Mixed11Bit => {
            validate_ai_normal_11bit(can_id)?;
            Ok(AddressingInfo {
                target_address: None,
                source_address: None,
                address_extension: ai_data_bytes.first().copied(),
            })
        }
        AddressingFormat::Mixed29Bit => {
            let (_, target_address, source_address) = can_id::decode_mixed_29bit(can_id)?;
            Ok(AddressingInfo {
                target_address: Some(target_address),
                source_address: Some(source_address),
                address_extension: ai_data_bytes.first().copied(),
            })
        }
    }
}

/// Validates that `can_id` is a legal 11-bit identifier, as required by Normal 11-bit and
/// Mixed 11-bit addressing.
pub fn validate_ai_normal_11bit(can_id: u32) -> Result<(), Error> {
    if can_id > CAN_ID_11BIT_MAX {
        Err(Error::CanIdNot11Bit(can_id))
    } else {
        Ok(())
    }
}

/// Validates Normal Fixed addressing parameters.
///
/// Either `can_id` alone (a well-formed fixed-addressed ID) or `target_address`+`source_address`
/// alone must be supplied; when both are supplied they must agree.
pub fn validate_ai_normal_fixed(
    can_id: Option<u32>,
    target_address: Option<u8>,
    source_address: Option<u8>,
) -> Result<(), Error> {
    match (can_id, target_address, source_address) {
        (Some(id), None, None) => {
            let (decoded_type, _, _) = can_id::decode_normal_fixed(id)?;
            let _ = decoded_type;
            Ok(())
        }
        (None, Some(_), Some(_)) => Ok(()),
        (Some(id), Some(ta), Some(sa)) => {
            let (_, decoded_ta, decoded_sa) = can_id::decode_normal_fixed(id)?;
            if decoded_ta != ta {
                return Err(Error::AddressMismatch { expected: decoded_ta, actual: ta });
            }
            if decoded_sa != sa {
                return Err(Error::AddressMismatch { expected: decoded_sa, actual: sa });
            }
            Ok(())
        }
        (None, None, None) => Err(Error::AmbiguousAddressInformation),
        (Some(id), Some(ta), None) => {
            let (_, decoded_ta, _) = can_id::decode_normal_fixed(id)?;
            if decoded_ta != ta {
                return Err(Error::AddressMismatch { expected: decoded_ta, actual: ta });
            }
            Ok(())
        }
        (Some(id), None, Some(sa)) => {
            let (_, _, decoded_sa) = can_id::decode_normal_fixed(id)?;
            if decoded_sa != sa {
                return Err(Error::AddressMismatch { expected: decoded_sa, actual: sa });
            }
            Ok(())
        }
        (None, Some(_), None) => Err(Error::MissingAddress("source_address")),
        (None, None, Some(_)) => Err(Error::MissingAddress("target_address")),
    }
}

/// Validates Extended addressing parameters: `target_address` is mandatory.
pub fn validate_ai_extended(target_address: Option<u8>) -> Result<(), Error> {
    if target_address.is_none() {
        return Err(Error::MissingAddress("target_address"));
    }
    Ok(())
}

/// Validates Mixed 11-bit addressing parameters: `can_id` must be 11-bit and `address_extension`
/// mandatory.
pub fn validate_ai_mixed_11bit(can_id: u32, address_extension: Option<u8>) -> Result<(), Error> {
    validate_ai_normal_11bit(can_id)?;
    if address_extension.is_none() {
        return Err(Error::MissingAddress("address_extension"));
    }
    Ok(())
}

/// Validates Mixed 29-bit addressing parameters: same TA/SA rules as [validate_ai_normal_fixed],
/// plus a mandatory `address_extension`.
pub fn validate_ai_mixed_29bit(
    can_id: Option<u32>,
    target_address: Option<u8>,
    source_address: Option<u8>,
    address_extension: Option<u8>,
) -> Result<(), Error> {
    if address_extension.is_none() {
        return Err(Error::MissingAddress("address_extension"));
    }
    match (can_id, target_address, source_address) {
        (Some(id), None, None) => {
            can_id::decode_mixed_29bit(id)?;
            Ok(())
        }
        (None, Some(_), Some(_)) => Ok(()),
        (Some(id), Some(ta), Some(sa)) => {
            let (_, decoded_ta, decoded_sa) = can_id::decode_mixed_29bit(id)?;
            if decoded_ta != ta {
                return Err(Error::AddressMismatch { expected: decoded_ta, actual: ta });
            }
            if decoded_sa != sa {
                return Err(Error::AddressMismatch { expected: decoded_sa, actual: sa });
            }
            Ok(())
        }
        (None, None, None) => Err(Error::AmbiguousAddressInformation),
        (Some(id), Some(ta), None) => {
            let (_, decoded_ta, _) = can_id::decode_mixed_29bit(id)?;
            if decoded_ta != ta {
                return Err(Error::AddressMismatch { expected: decoded_ta, actual: ta });
            }
            Ok(())
        }
        (Some(id), None, Some(sa)) => {
            let (_, _, decoded_sa) = can_id::decode_mixed_29bit(id)?;
            if decoded_sa != sa {
                return Err(Error::AddressMismatch { expected: decoded_sa, actual: sa });
            }
            Ok(())
        }
        (None, Some(_), None) => Err(Error::MissingAddress("source_address")),
        (None, None, Some(_)) => Err(Error::MissingAddress("target_address")),
    }
}
