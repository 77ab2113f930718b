use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;

use proptest::prelude::*;

use crate::dlc::Dlc;
use crate::error::Error;
use crate::notice::{DiscardNotices, NoticeSink, UnusedArgumentNotice};
use crate::packet::{AddressingParams, CanPacket, PacketKindData};
use crate::types::{AddressingFormat, AddressingType, FlowStatus, PacketType};

fn normal_11bit(can_id: u32) -> AddressingParams {
    AddressingParams {
        addressing_type: AddressingType::Physical,
        addressing_format: AddressingFormat::Normal11Bit,
        can_id: Some(can_id),
        target_address: None,
        source_address: None,
        address_extension: None,
    }
}

#[test]
fn test_scenario_1_single_frame() {
    let packet =
        CanPacket::new(normal_11bit(0x7E0), PacketKindData::SingleFrame { payload: &[0x22, 0xF1, 0x90] }, None, 0xCC, &DiscardNotices).unwrap();
    assert_eq!(packet.can_id(), 0x7E0);
    assert_eq!(packet.packet_type(), PacketType::SingleFrame);
    assert_eq!(packet.raw_frame_data().as_ref(), &[0x03, 0x22, 0xF1, 0x90, 0xCC, 0xCC, 0xCC, 0xCC]);
    assert_eq!(packet.payload().unwrap().as_ref(), &[0x22, 0xF1, 0x90]);
    assert_eq!(packet.data_length(), Some(3));
}

#[test]
fn test_scenario_2_extended_addressing() {
    let addressing = AddressingParams {
        addressing_type: AddressingType::Physical,
        addressing_format: AddressingFormat::Extended,
        can_id: Some(0x7E0),
        target_address: Some(0x1A),
        source_address: None,
        address_extension: None,
    };
    let packet = CanPacket::new(addressing, PacketKindData::SingleFrame { payload: &[0x3E, 0x00] }, None, 0xCC, &DiscardNotices).unwrap();
    assert_eq!(packet.target_address(), Some(0x1A));
    assert_eq!(packet.raw_frame_data().as_ref(), &[0x1A, 0x02, 0x3E, 0x00, 0xCC, 0xCC, 0xCC, 0xCC]);
}

#[test]
fn test_scenario_4_consecutive_frame() {
    let packet = CanPacket::new(
        normal_11bit(0x7E0),
        PacketKindData::ConsecutiveFrame { payload: &[0xAA; 7], sequence_number: 5 },
        None,
        0xCC,
        &DiscardNotices,
    )
    .unwrap();
    assert_eq!(packet.raw_frame_data().as_ref(), &[0x25, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA]);
    assert_eq!(packet.sequence_number(), Some(5));
    assert_eq!(packet.payload().unwrap().as_ref(), &[0xAA; 7]);
}

#[test]
fn test_scenario_5_flow_control() {
    let addressing = AddressingParams {
        addressing_type: AddressingType::Physical,
        addressing_format: AddressingFormat::Normal11Bit,
        can_id: Some(0x7E8),
        target_address: None,
        source_address: None,
        address_extension: None,
    };
    let packet = CanPacket::new(
        addressing,
        PacketKindData::FlowControl { flow_status: FlowStatus::ContinueToSend, block_size: Some(0x0F), st_min: Some(0x14) },
        None,
        0xCC,
        &DiscardNotices,
    )
    .unwrap();
    assert_eq!(packet.raw_frame_data().as_ref(), &[0x30, 0x0F, 0x14, 0xCC, 0xCC, 0xCC, 0xCC, 0xCC]);
    assert_eq!(packet.flow_status(), Some(FlowStatus::ContinueToSend));
    assert_eq!(packet.block_size(), Some(0x0F));
    assert_eq!(packet.st_min(), Some(0x14));
    assert_eq!(packet.payload(), None);
}

#[test]
fn test_rejects_first_frame_without_dlc() {
    let err = CanPacket::new(normal_11bit(0x7E0), PacketKindData::FirstFrame { payload: &[0u8; 6], data_length: 100 }, None, 0xCC, &DiscardNotices)
        .unwrap_err();
    assert_eq!(err, Error::MissingDlc);
}

#[test]
fn test_scenario_3_first_frame_payload_does_not_fit_dlc() {
    let addressing = AddressingParams {
        addressing_type: AddressingType::Physical,
        addressing_format: AddressingFormat::NormalFixed,
        can_id: None,
        target_address: Some(0xF1),
        source_address: Some(0x00),
        address_extension: None,
    };
    let payload: Vec<u8> = (0x10..=0x16).collect();
    let err = CanPacket::new(addressing, PacketKindData::FirstFrame { payload: &payload, data_length: 100 }, Some(Dlc::Eight), 0xCC, &DiscardNotices)
        .unwrap_err();
    assert_eq!(err, Error::FirstFramePayloadSize { expected: 6, actual: 7 });
}

#[test]
fn test_first_frame_with_exact_capacity_succeeds() {
    let packet = CanPacket::new(
        normal_11bit(0x7E0),
        PacketKindData::FirstFrame { payload: &[0u8; 6], data_length: 100 },
        Some(Dlc::Eight),
        0xCC,
        &DiscardNotices,
    )
    .unwrap();
    assert_eq!(packet.raw_frame_data().len(), 8);
    assert_eq!(packet.data_length(), Some(100));
}

#[test]
fn test_set_address_information_rejects_ambiguous_change() {
    let mut packet =
        CanPacket::new(normal_11bit(0x7E0), PacketKindData::SingleFrame { payload: &[0x01] }, None, 0xCC, &DiscardNotices).unwrap();
    let extended = AddressingParams {
        addressing_type: AddressingType::Physical,
        addressing_format: AddressingFormat::Extended,
        can_id: Some(0x7E0),
        target_address: Some(0x1A),
        source_address: None,
        address_extension: None,
    };
    let err = packet.set_address_information(extended, &DiscardNotices).unwrap_err();
    assert_eq!(err, Error::AmbiguousAddressingChange);
}

#[test]
fn test_set_address_information_preserves_payload_tail() {
    let mut packet =
        CanPacket::new(normal_11bit(0x7E0), PacketKindData::SingleFrame { payload: &[0x22, 0xF1, 0x90] }, None, 0xCC, &DiscardNotices).unwrap();
    packet.set_address_information(normal_11bit(0x7E1), &DiscardNotices).unwrap();
    assert_eq!(packet.can_id(), 0x7E1);
    assert_eq!(packet.payload().unwrap().as_ref(), &[0x22, 0xF1, 0x90]);
}

#[test]
fn test_set_packet_data_keeps_addressing() {
    let mut packet =
        CanPacket::new(normal_11bit(0x7E0), PacketKindData::SingleFrame { payload: &[0x22, 0xF1, 0x90] }, None, 0xCC, &DiscardNotices).unwrap();
    packet.set_single_frame_data(None, &[0x01, 0x02], 0xCC).unwrap();
    assert_eq!(packet.can_id(), 0x7E0);
    assert_eq!(packet.payload().unwrap().as_ref(), &[0x01, 0x02]);
}

#[derive(Default)]
struct RecordingNoticeSink {
    notices: RefCell<Vec<&'static str>>,
}

impl NoticeSink for RecordingNoticeSink {
    fn unused_argument(&self, notice: UnusedArgumentNotice) {
        self.notices.borrow_mut().push(notice.setter);
    }
}

#[test]
fn test_normal_11bit_reports_unused_target_address() {
    let sink = Arc::new(RecordingNoticeSink::default());
    let addressing = AddressingParams {
        addressing_type: AddressingType::Physical,
        addressing_format: AddressingFormat::Normal11Bit,
        can_id: Some(0x7E0),
        target_address: Some(0x1A),
        source_address: None,
        address_extension: None,
    };
    CanPacket::new(addressing, PacketKindData::SingleFrame { payload: &[0x01] }, None, 0xCC, sink.as_ref()).unwrap();
    assert_eq!(sink.notices.borrow().len(), 1);
}

#[test]
fn test_missing_can_id_is_rejected() {
    let addressing = AddressingParams {
        addressing_type: AddressingType::Physical,
        addressing_format: AddressingFormat::Normal11Bit,
        can_id: None,
        target_address: None,
        source_address: None,
        address_extension: None,
    };
    let err = CanPacket::new(addressing, PacketKindData::SingleFrame { payload: &[0x01] }, None, 0xCC, &DiscardNotices).unwrap_err();
    assert_eq!(err, Error::MissingAddress("can_id"));
}

proptest! {
    /// Any payload that fits a Single Frame round-trips through construction and `payload()`
    /// unchanged, regardless of which 11-bit CAN ID carries it.
    #[test]
    fn prop_single_frame_payload_round_trips(can_id in 0u32..=0x7FF, len in 0usize..=7) {
        let payload: Vec<u8> = (0..len as u8).collect();
        let packet = CanPacket::new(normal_11bit(can_id), PacketKindData::SingleFrame { payload: &payload }, None, 0xCC, &DiscardNotices).unwrap();
        prop_assert_eq!(packet.payload().unwrap().as_ref(), payload.as_slice());
        prop_assert_eq!(packet.can_id(), can_id);
    }

    /// Re-applying the same addressing a packet already has is always a no-op success, never an
    /// ambiguous-change error.
    #[test]
    fn prop_reapplying_same_addressing_is_idempotent(can_id in 0u32..=0x7FF, other_id in 0u32..=0x7FF) {
        let mut packet = CanPacket::new(normal_11bit(can_id), PacketKindData::SingleFrame { payload: &[0x01] }, None, 0xCC, &DiscardNotices).unwrap();
        prop_assert!(packet.set_address_information(normal_11bit(other_id), &DiscardNotices).is_ok());
        prop_assert_eq!(packet.can_id(), other_id);
        prop_assert_eq!(packet.payload().unwrap().as_ref(), &[0x01]);
    }
}
