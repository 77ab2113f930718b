//!# Raw CAN frame
//! A minimal `(Id, data)` wire-format value generalized from a fixed 8-byte frame type to the
//! CAN FD lengths this crate's DLC codec supports (0..=8, 12, 16, 20, 24, 32, 48, 64 bytes).
use bytes::Bytes;
use embedded_can::{Frame, Id};

use crate::can_id;
use crate::dlc::{self, Dlc};

/// A CAN or CAN FD data frame: an identifier, a DLC-legal data length, and (for non-remote
/// frames) exactly that many data bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCanFrame {
    id: Id,
    rtr: bool,
    len: usize,
    data: Bytes,
}

impl RawCanFrame {
    /// DLC nibble corresponding to this frame's announced length.
    pub fn dlc_value(&self) -> Dlc {
        Dlc::encode(self.len).expect("RawCanFrame only ever holds a DLC-legal length")
    }

    /// Builds a non-remote frame from a raw numeric CAN ID, choosing [embedded_can::StandardId]
    /// or [embedded_can::ExtendedId] automatically.
    pub fn from_can_id(can_id: u32, data: &[u8]) -> Option<Self> {
        Frame::new(can_id::to_embedded_id(can_id), data)
    }

    /// Raw numeric CAN ID carried by this frame's identifier.
    pub fn can_id_value(&self) -> u32 {
        can_id::from_embedded_id(self.id)
    }
}

impl Frame for RawCanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        dlc::validate_data_bytes_number(data.len()).ok()?;
        Some(Self { id: id.into(), rtr: false, len: data.len(), data: Bytes::copy_from_slice(data) })
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        dlc::validate_data_bytes_number(dlc).ok()?;
        Some(Self { id: id.into(), rtr: true, len: dlc, data: Bytes::new() })
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.rtr
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
