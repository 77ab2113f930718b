//!# Validated CAN packet
//! [CanPacket] is the strongly-validated aggregate: construct one from logical fields and it
//! either holds a fully ISO 15765-2 compliant frame or it does not exist. Accessors for fields
//! that do not apply to the packet's current kind return `None` rather than panicking.
use alloc::vec::Vec;

use bytes::Bytes;

use crate::addressing::{self, AddressingFormat};
use crate::can_id;
use crate::dlc::Dlc;
use crate::error::Error;
use crate::frame::RawCanFrame;
use crate::notice::{NoticeSink, UnusedArgumentNotice};
use crate::pci::{consecutive_frame, first_frame, flow_control, single_frame};
use crate::types::{AddressingType, FlowStatus, PacketType};

/// Addressing parameters accepted by [CanPacket::new] and [CanPacket::set_address_information].
///
/// Fields that the chosen `addressing_format` does not use are ignored, not rejected: a
/// [UnusedArgumentNotice] is raised for them via the caller's [NoticeSink].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AddressingParams {
    pub addressing_type: AddressingType,
    pub addressing_format: AddressingFormat,
    /// Leave `None` if `target_address`/`source_address` unambiguously determine it.
    pub can_id: Option<u32>,
    pub target_address: Option<u8>,
    pub source_address: Option<u8>,
    pub address_extension: Option<u8>,
}

/// Packet-kind-specific fields, supplied to [CanPacket::new] and [CanPacket::set_packet_data].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PacketKindData<'a> {
    SingleFrame { payload: &'a [u8] },
    FirstFrame { payload: &'a [u8], data_length: u32 },
    ConsecutiveFrame { payload: &'a [u8], sequence_number: u8 },
    FlowControl { flow_status: FlowStatus, block_size: Option<u8>, st_min: Option<u8> },
}

/// A CAN packet whose framing has been fully validated against ISO 15765-2.
///
/// ```
/// use uds_can_transport::notice::DiscardNotices;
/// use uds_can_transport::packet::{AddressingParams, CanPacket, PacketKindData};
/// use uds_can_transport::types::{AddressingFormat, AddressingType};
///
/// let packet = CanPacket::new(
///     AddressingParams {
///         addressing_type: AddressingType::Physical,
///         addressing_format: AddressingFormat::Normal11Bit,
///         can_id: Some(0x7E0),
///         target_address: None,
///         source_address: None,
///         address_extension: None,
///     },
///     PacketKindData::SingleFrame { payload: &[0x22, 0xF1, 0x90] },
///     None,
///     0xCC,
///     &DiscardNotices,
/// ).unwrap();
/// assert_eq!(packet.raw_frame_data().as_ref(), &[0x03, 0x22, 0xF1, 0x90, 0xCC, 0xCC, 0xCC, 0xCC]);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CanPacket {
    addressing_type: AddressingType,
    addressing_format: AddressingFormat,
    can_id: u32,
    dlc: Dlc,
    packet_type: PacketType,
    target_address: Option<u8>,
    source_address: Option<u8>,
    address_extension: Option<u8>,
    raw_frame_data: Bytes,
}

impl CanPacket {
    /// Builds a new validated CAN packet.
    pub fn new(
        addressing: AddressingParams,
        kind: PacketKindData<'_>,
        dlc: Option<Dlc>,
        filler_byte: u8,
        notices: &dyn NoticeSink,
    ) -> Result<Self, Error> {
        let resolved = resolve_addressing(addressing, notices)?;
        let (chosen_dlc, packet_type, raw_frame_data) =
            build_frame(resolved.addressing_format, resolved.target_address, resolved.address_extension, kind, dlc, filler_byte)?;
        Ok(Self {
            addressing_type: resolved.addressing_type,
            addressing_format: resolved.addressing_format,
            can_id: resolved.can_id,
            dlc: chosen_dlc,
            packet_type,
            target_address: resolved.target_address,
            source_address: resolved.source_address,
            address_extension: resolved.address_extension,
            raw_frame_data,
        })
    }

    /// Atomically replaces the Addressing Information of this packet, re-emitting the AI bytes
    /// at the head of `raw_frame_data` without disturbing the PCI/payload tail.
    ///
    /// Fails with [Error::AmbiguousAddressingChange] when the new addressing format would change
    /// the number of AI bytes: the existing frame's PCI offset would no longer be correct, so a
    /// new packet must be built instead.
    pub fn set_address_information(&mut self, addressing: AddressingParams, notices: &dyn NoticeSink) -> Result<(), Error> {
        if addressing.addressing_format.ai_bytes() != self.addressing_format.ai_bytes() {
            return Err(Error::AmbiguousAddressingChange);
        }
        let resolved = resolve_addressing(addressing, notices)?;
        let ai = addressing::encode_ai_data_bytes(resolved.addressing_format, resolved.target_address, resolved.address_extension)?;
        let mut buf = Vec::with_capacity(self.raw_frame_data.len());
        buf.extend_from_slice(&ai);
        buf.extend_from_slice(&self.raw_frame_data[ai.len()..]);

        self.addressing_type = resolved.addressing_type;
        self.addressing_format = resolved.addressing_format;
        self.can_id = resolved.can_id;
        self.target_address = resolved.target_address;
        self.source_address = resolved.source_address;
        self.address_extension = resolved.address_extension;
        self.raw_frame_data = Bytes::from(buf);
        Ok(())
    }

    /// Atomically replaces the PCI and payload region of this packet, keeping its Addressing
    /// Information.
    pub fn set_packet_data(&mut self, kind: PacketKindData<'_>, dlc: Option<Dlc>, filler_byte: u8) -> Result<(), Error> {
        let (chosen_dlc, packet_type, raw_frame_data) =
            build_frame(self.addressing_format, self.target_address, self.address_extension, kind, dlc, filler_byte)?;
        self.dlc = chosen_dlc;
        self.packet_type = packet_type;
        self.raw_frame_data = raw_frame_data;
        Ok(())
    }

    /// Equivalent to `set_packet_data` for a Single Frame.
    pub fn set_single_frame_data(&mut self, dlc: Option<Dlc>, payload: &[u8], filler_byte: u8) -> Result<(), Error> {
        self.set_packet_data(PacketKindData::SingleFrame { payload }, dlc, filler_byte)
    }

    /// Equivalent to `set_packet_data` for a First Frame. `dlc` is mandatory.
    pub fn set_first_frame_data(&mut self, dlc: Dlc, payload: &[u8], data_length: u32) -> Result<(), Error> {
        self.set_packet_data(PacketKindData::FirstFrame { payload, data_length }, Some(dlc), 0)
    }

    /// Equivalent to `set_packet_data` for a Consecutive Frame.
    pub fn set_consecutive_frame_data(&mut self, dlc: Option<Dlc>, payload: &[u8], sequence_number: u8, filler_byte: u8) -> Result<(), Error> {
        self.set_packet_data(PacketKindData::ConsecutiveFrame { payload, sequence_number }, dlc, filler_byte)
    }

    /// Equivalent to `set_packet_data` for a Flow Control frame.
    pub fn set_flow_control_data(
        &mut self,
        dlc: Option<Dlc>,
        flow_status: FlowStatus,
        block_size: Option<u8>,
        st_min: Option<u8>,
        filler_byte: u8,
    ) -> Result<(), Error> {
        self.set_packet_data(PacketKindData::FlowControl { flow_status, block_size, st_min }, dlc, filler_byte)
    }

    pub fn addressing_type(&self) -> AddressingType {
        self.addressing_type
    }

    pub fn addressing_format(&self) -> AddressingFormat {
        self.addressing_format
    }

    pub fn can_id(&self) -> u32 {
        self.can_id
    }

    pub fn dlc(&self) -> Dlc {
        self.dlc
    }

    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    /// Present for [AddressingFormat::NormalFixed], [AddressingFormat::Extended] and
    /// [AddressingFormat::Mixed29Bit].
    pub fn target_address(&self) -> Option<u8> {
        self.target_address
    }

    /// Present for [AddressingFormat::NormalFixed] and [AddressingFormat::Mixed29Bit].
    pub fn source_address(&self) -> Option<u8> {
        self.source_address
    }

    /// Present for [AddressingFormat::Mixed11Bit] and [AddressingFormat::Mixed29Bit].
    pub fn address_extension(&self) -> Option<u8> {
        self.address_extension
    }

    /// Raw data bytes of the CAN frame that carries this packet.
    pub fn raw_frame_data(&self) -> &Bytes {
        &self.raw_frame_data
    }

    /// The wire-format `(can_id, raw_frame_data)` pair this packet maps onto.
    pub fn as_raw_frame(&self) -> RawCanFrame {
        RawCanFrame::from_can_id(self.can_id, &self.raw_frame_data).expect("CanPacket invariants guarantee a DLC-legal frame")
    }

    fn ai_bytes(&self) -> usize {
        self.addressing_format.ai_bytes()
    }

    /// Payload carried by this packet. Present only for SF, FF and CF; `None` otherwise.
    ///
    /// For Consecutive Frames this may include trailing filler bytes: whether they are genuine
    /// payload can only be known from the First Frame's declared length, which this crate does
    /// not track.
    pub fn payload(&self) -> Option<Bytes> {
        match self.packet_type {
            PacketType::SingleFrame => single_frame::decode_payload(self.ai_bytes(), &self.raw_frame_data),
            PacketType::FirstFrame => first_frame::decode_payload(self.ai_bytes(), &self.raw_frame_data),
            PacketType::ConsecutiveFrame => consecutive_frame::decode_payload(self.ai_bytes(), &self.raw_frame_data),
            PacketType::FlowControl => None,
        }
    }

    /// Diagnostic message length declared by this packet. Present only for SF and FF.
    pub fn data_length(&self) -> Option<u32> {
        match self.packet_type {
            PacketType::SingleFrame => single_frame::decode_sf_dl(self.ai_bytes(), &self.raw_frame_data).map(|n| n as u32),
            PacketType::FirstFrame => first_frame::decode_ff_dl(self.ai_bytes(), &self.raw_frame_data),
            _ => None,
        }
    }

    /// Sequence number carried by this packet. Present only for CF.
    pub fn sequence_number(&self) -> Option<u8> {
        match self.packet_type {
            PacketType::ConsecutiveFrame => consecutive_frame::decode_sequence_number(self.ai_bytes(), &self.raw_frame_data),
            _ => None,
        }
    }

    /// Flow status carried by this packet. Present only for FC.
    pub fn flow_status(&self) -> Option<FlowStatus> {
        match self.packet_type {
            PacketType::FlowControl => {
                flow_control::decode_flow_status(self.ai_bytes(), &self.raw_frame_data).and_then(|n| FlowStatus::from_nibble(n).ok())
            }
            _ => None,
        }
    }

    /// Block size carried by this packet. Present only for FC.
    pub fn block_size(&self) -> Option<u8> {
        match self.packet_type {
            PacketType::FlowControl => flow_control::decode_block_size(self.ai_bytes(), &self.raw_frame_data),
            _ => None,
        }
    }

    /// STmin carried by this packet. Present only for FC.
    pub fn st_min(&self) -> Option<u8> {
        match self.packet_type {
            PacketType::FlowControl => flow_control::decode_st_min(self.ai_bytes(), &self.raw_frame_data),
            _ => None,
        }
    }
}

struct ResolvedAddressing {
    addressing_type: AddressingType,
    addressing_format: AddressingFormat,
    can_id: u32,
    target_address: Option<u8>,
    source_address: Option<u8>,
    address_extension: Option<u8>,
}

fn resolve_addressing(params: AddressingParams, notices: &dyn NoticeSink) -> Result<ResolvedAddressing, Error> {
    let AddressingParams { addressing_type, addressing_format, can_id, target_address, source_address, address_extension } = params;
    match addressing_format {
        AddressingFormat::Normal11Bit => {
            let id = can_id.ok_or(Error::MissingAddress("can_id"))?;
            addressing::validate_ai_normal_11bit(id)?;
            if target_address.is_some() || source_address.is_some() || address_extension.is_some() {
                notices.unused_argument(UnusedArgumentNotice {
                    setter: "set_address_information",
                    fields: &["target_address", "source_address", "address_extension"],
                });
            }
            Ok(ResolvedAddressing { addressing_type, addressing_format, can_id: id, target_address: None, source_address: None, address_extension: None })
        }
        AddressingFormat::NormalFixed => {
            addressing::validate_ai_normal_fixed(can_id, target_address, source_address)?;
            if address_extension.is_some() {
                notices.unused_argument(UnusedArgumentNotice { setter: "set_address_information", fields: &["address_extension"] });
            }
            let (resolved_id, ta, sa) = match can_id {
                Some(id) => {
                    let (_, ta, sa) = can_id::decode_normal_fixed(id)?;
                    (id, ta, sa)
                }
                None => {
                    let ta = target_address.expect("validated by validate_ai_normal_fixed");
                    let sa = source_address.expect("validated by validate_ai_normal_fixed");
                    (can_id::encode_normal_fixed(addressing_type, ta, sa), ta, sa)
                }
            };
            Ok(ResolvedAddressing {
                addressing_type,
                addressing_format,
                can_id: resolved_id,
                target_address: Some(ta),
                source_address: Some(sa),
                address_extension: None,
            })
        }
        AddressingFormat::Extended => {
            let id = can_id.ok_or(Error::MissingAddress("can_id"))?;
            addressing::validate_ai_extended(target_address)?;
            if source_address.is_some() || address_extension.is_some() {
                notices.unused_argument(UnusedArgumentNotice { setter: "set_address_information", fields: &["source_address", "address_extension"] });
            }
            Ok(ResolvedAddressing { addressing_type, addressing_format, can_id: id, target_address, source_address: None, address_extension: None })
        }
        AddressingFormat::Mixed11Bit => {
            let id = can_id.ok_or(Error::MissingAddress("can_id"))?;
            addressing::validate_ai_mixed_11bit(id, address_extension)?;
            if target_address.is_some() || source_address.is_some() {
                notices.unused_argument(UnusedArgumentNotice { setter: "set_address_information", fields: &["target_address", "source_address"] });
            }
            Ok(ResolvedAddressing { addressing_type, addressing_format, can_id: id, target_address: None, source_address: None, address_extension })
        }
        AddressingFormat::Mixed29Bit => {
            addressing::validate_ai_mixed_29bit(can_id, target_address, source_address, address_extension)?;
            let (resolved_id, ta, sa) = match can_id {
                Some(id) => {
                    let (_, ta, sa) = can_id::decode_mixed_29bit(id)?;
                    (id, ta, sa)
                }
                None => {
                    let ta = target_address.expect("validated by validate_ai_mixed_29bit");
                    let sa = source_address.expect("validated by validate_ai_mixed_29bit");
                    (can_id::encode_mixed_29bit(addressing_type, ta, sa), ta, sa)
                }
            };
            Ok(ResolvedAddressing {
                addressing_type,
                addressing_format,
                can_id: resolved_id,
                target_address: Some(ta),
                source_address: Some(sa),
                address_extension,
            })
        }
    }
}

fn build_frame(
    format: AddressingFormat,
    target_address: Option<u8>,
    address_extension: Option<u8>,
    kind: PacketKindData<'_>,
    dlc: Option<Dlc>,
    filler_byte: u8,
) -> Result<(Dlc, PacketType, Bytes), Error> {
    match kind {
        PacketKindData::SingleFrame { payload } => {
            let (chosen, frame) = single_frame::create_valid_frame_data(format, target_address, address_extension, dlc, payload, filler_byte)?;
            Ok((chosen, PacketType::SingleFrame, frame))
        }
        PacketKindData::FirstFrame { payload, data_length } => {
            let dlc = dlc.ok_or(Error::MissingDlc)?;
            let frame = first_frame::create_valid_frame_data(format, target_address, address_extension, dlc, data_length, payload)?;
            Ok((dlc, PacketType::FirstFrame, frame))
        }
        PacketKindData::ConsecutiveFrame { payload, sequence_number } => {
            let (chosen, frame) =
                consecutive_frame::create_valid_frame_data(format, target_address, address_extension, dlc, sequence_number, payload, filler_byte)?;
            Ok((chosen, PacketType::ConsecutiveFrame, frame))
        }
        PacketKindData::FlowControl { flow_status, block_size, st_min } => {
            let (chosen, frame) =
                flow_control::create_valid_frame_data(format, target_address, address_extension, dlc, flow_status, block_size, st_min, filler_byte)?;
            Ok((chosen, PacketType::FlowControl, frame))
        }
    }
}
