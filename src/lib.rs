//!# uds-can-transport
//! A codec for the CAN transport layer of Unified Diagnostic Services (UDS, ISO 14229), as
//! defined by ISO 15765-2. Converts between logical diagnostic packets (Single Frame, First
//! Frame, Consecutive Frame, Flow Control) and the byte layout of a CAN or CAN FD data frame,
//! across all five addressing formats ISO 15765-2 defines.
//!
//! This crate is a pure data-transformation library: no bus I/O, no transport-layer state
//! machine (segmentation, flow-control timing, retransmission), no UDS service encoding. It
//! only builds and parses frames.
//!
//! ```
//! use uds_can_transport::notice::DiscardNotices;
//! use uds_can_transport::packet::{AddressingParams, CanPacket, PacketKindData};
//! use uds_can_transport::types::{AddressingFormat, AddressingType};
//!
//! let packet = CanPacket::new(
//!     AddressingParams {
//!         addressing_type: AddressingType::Physical,
//!         addressing_format: AddressingFormat::Normal11Bit,
//!         can_id: Some(0x7E0),
//!         target_address: None,
//!         source_address: None,
//!         address_extension: None,
//!     },
//!     PacketKindData::SingleFrame { payload: &[0x22, 0xF1, 0x90] },
//!     None,
//!     0xCC,
//!     &DiscardNotices,
//! ).unwrap();
//!
//! assert_eq!(packet.can_id(), 0x7E0);
//! assert_eq!(packet.payload().unwrap().as_ref(), &[0x22, 0xF1, 0x90]);
//! ```
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod addressing;
pub mod any_packet;
pub mod can_id;
pub mod dlc;
pub mod error;
pub mod frame;
pub mod notice;
pub mod packet;
mod pci;
pub mod types;

#[cfg(test)]
mod tests;
