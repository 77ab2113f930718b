//!# Permissive CAN packet
//! [AnyCanPacket] wraps raw frame bytes with only sanity checks (DLC-legal byte count, CAN ID in
//! range), so traffic that does not conform to ISO 15765-2 can still be round-tripped. Every
//! accessor derives its value lazily and returns `None` instead of failing when the bytes don't
//! match the interpretation being asked for.
use bytes::Bytes;

use embedded_can::Frame;

use crate::addressing::{self, AddressingFormat, AddressingInfo};
use crate::can_id;
use crate::dlc::{self, Dlc};
use crate::error::Error;
use crate::frame::RawCanFrame;
use crate::pci::{consecutive_frame, first_frame, flow_control, single_frame};
use crate::types::{AddressingType, PacketType};

/// A CAN packet accepted with only sanity checks, for traffic that may not conform to
/// ISO 15765-2.
///
/// Prefer [crate::packet::CanPacket] unless you specifically need to carry non-conformant
/// frames: this type skips nearly all of ISO 15765-2's own validation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AnyCanPacket {
    raw_frame_data: Bytes,
    addressing_format: AddressingFormat,
    addressing_type: AddressingType,
    can_id: u32,
}

impl AnyCanPacket {
    /// Wraps `raw_frame_data` as a packet, checking only that its length is DLC-legal and that
    /// `can_id` fits the 29-bit CAN identifier space.
    pub fn new(raw_frame_data: Bytes, addressing_format: AddressingFormat, addressing_type: AddressingType, can_id: u32) -> Result<Self, Error> {
        dlc::validate_data_bytes_number(raw_frame_data.len())?;
        can_id::validate_can_id(can_id)?;
        Ok(Self { raw_frame_data, addressing_format, addressing_type, can_id })
    }

    pub fn raw_frame_data(&self) -> &Bytes {
        &self.raw_frame_data
    }

    pub fn addressing_format(&self) -> AddressingFormat {
        self.addressing_format
    }

    pub fn addressing_type(&self) -> AddressingType {
        self.addressing_type
    }

    pub fn can_id(&self) -> u32 {
        self.can_id
    }

    /// DLC corresponding to `raw_frame_data`'s length. Always `Some` since [Self::new] already
    /// required a DLC-legal length.
    pub fn dlc(&self) -> Dlc {
        Dlc::encode(self.raw_frame_data.len()).expect("validated in AnyCanPacket::new")
    }

    /// PCI high nibble, or `None` if `raw_frame_data` is too short to carry a PCI byte for this
    /// addressing format.
    pub fn packet_type(&self) -> Option<PacketType> {
        let idx = self.ai_bytes();
        let byte = *self.raw_frame_data.get(idx)?;
        PacketType::from_nibble(byte >> 4).ok()
    }

    /// The wire-format `(can_id, raw_frame_data)` pair this packet wraps.
    pub fn as_raw_frame(&self) -> RawCanFrame {
        RawCanFrame::from_can_id(self.can_id, &self.raw_frame_data).expect("AnyCanPacket::new already validated a DLC-legal length")
    }

    /// Wraps a [RawCanFrame] as a permissive packet under the given addressing interpretation.
    ///
    /// The addressing format/type cannot be recovered from the frame itself — the same bytes are
    /// ambiguous across formats — so the caller supplies them.
    pub fn from_raw_frame(frame: &RawCanFrame, addressing_format: AddressingFormat, addressing_type: AddressingType) -> Result<Self, Error> {
        Self::new(Bytes::copy_from_slice(frame.data()), addressing_format, addressing_type, frame.can_id_value())
    }

    fn ai_bytes(&self) -> usize {
        self.addressing_format.ai_bytes()
    }

    fn addressing_info(&self) -> Option<AddressingInfo> {
        let ai_bytes = self.ai_bytes();
        if ai_bytes > self.raw_frame_data.len() {
            return None;
        }
        addressing::decode_ai(self.addressing_format, self.can_id, &self.raw_frame_data[..ai_bytes]).ok()
    }

    pub fn target_address(&self) -> Option<u8> {
        self.addressing_info()?.target_address
    }

    pub fn source_address(&self) -> Option<u8> {
        self.addressing_info()?.source_address
    }

    pub fn address_extension(&self) -> Option<u8> {
        self.addressing_info()?.address_extension
    }

    pub fn payload(&self) -> Option<Bytes> {
        match self.packet_type()? {
            PacketType::SingleFrame => single_frame::decode_payload(self.ai_bytes(), &self.raw_frame_data),
            PacketType::FirstFrame => first_frame::decode_payload(self.ai_bytes(), &self.raw_frame_data),
            PacketType::ConsecutiveFrame => consecutive_frame::decode_payload(self.ai_bytes(), &self.raw_frame_data),
            PacketType::FlowControl => None,
        }
    }

    pub fn data_length(&self) -> Option<u32> {
        match self.packet_type()? {
            PacketType::SingleFrame => single_frame::decode_sf_dl(self.ai_bytes(), &self.raw_frame_data).map(|n| n as u32),
            PacketType::FirstFrame => first_frame::decode_ff_dl(self.ai_bytes(), &self.raw_frame_data),
            _ => None,
        }
    }

    pub fn sequence_number(&self) -> Option<u8> {
        match self.packet_type()? {
            PacketType::ConsecutiveFrame => consecutive_frame::decode_sequence_number(self.ai_bytes(), &self.raw_frame_data),
            _ => None,
        }
    }

    /// Raw flow status nibble, or `None` if this is not a Flow Control frame.
    ///
    /// Unlike [crate::packet::CanPacket::flow_status], this returns the nibble as-is rather than
    /// a closed [crate::types::FlowStatus]: reserved values (`0x3..=0xF`) are tolerated on decode,
    /// not converted away, since this type exists to round-trip non-conformant traffic unchanged.
    pub fn flow_status(&self) -> Option<u8> {
        flow_control::decode_flow_status(self.ai_bytes(), &self.raw_frame_data)
    }

    pub fn block_size(&self) -> Option<u8> {
        match self.packet_type()? {
            PacketType::FlowControl => flow_control::decode_block_size(self.ai_bytes(), &self.raw_frame_data),
            _ => None,
        }
    }

    pub fn st_min(&self) -> Option<u8> {
        match self.packet_type()? {
            PacketType::FlowControl => flow_control::decode_st_min(self.ai_bytes(), &self.raw_frame_data),
            _ => None,
        }
    }

    /// Snapshots every lazily-derived field of this packet into a plain, serializable value.
    ///
    /// Useful for logging or transmitting the decoded view of a frame without carrying the
    /// [AnyCanPacket] type itself (and its borrowed addressing context) across a serialization
    /// boundary.
    pub fn decoded_fields(&self) -> DecodedFields {
        DecodedFields {
            addressing_type: self.addressing_type,
            addressing_format: self.addressing_format,
            can_id: self.can_id,
            dlc: self.dlc(),
            packet_type: self.packet_type(),
            target_address: self.target_address(),
            source_address: self.source_address(),
            address_extension: self.address_extension(),
            payload: self.payload(),
            data_length: self.data_length(),
            sequence_number: self.sequence_number(),
            flow_status: self.flow_status(),
            block_size: self.block_size(),
            st_min: self.st_min(),
        }
    }
}

/// A plain-data snapshot of every field [AnyCanPacket] can derive from a frame, for callers that
/// want to serialize or log the decoded view rather than the packet itself.
///
/// `flow_status` is the raw PCI low nibble rather than [crate::types::FlowStatus], consistent with
/// [AnyCanPacket::flow_status]: reserved values are carried through unchanged instead of being
/// lost to a failed enum conversion.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedFields {
    pub addressing_type: AddressingType,
    pub addressing_format: AddressingFormat,
    pub can_id: u32,
    pub dlc: Dlc,
    pub packet_type: Option<PacketType>,
    pub target_address: Option<u8>,
    pub source_address: Option<u8>,
    pub address_extension: Option<u8>,
    pub payload: Option<Bytes>,
    pub data_length: Option<u32>,
    pub sequence_number: Option<u8>,
    pub flow_status: Option<u8>,
    pub block_size: Option<u8>,
    pub st_min: Option<u8>,
}
