//! Internal backup model.
//!
//! What the extractor produces and the loader reconstructs. Conversion
//! to and from the portable document lives in [`crate::unified`]; this
//! model itself never touches serde.

use ezsp_session::{EmberKeyData, Eui64, ExtendedPanId};

// ── Constants ────────────────────────────────────────────────────────────

/// Security level this adapter family runs at (standard security).
pub const SECURITY_LEVEL: u8 = 5;

// ── Types ────────────────────────────────────────────────────────────────

/// Snapshot of everything needed to rebuild the coordinator's network.
///
/// Produced whole by [`crate::BackupAdapter::create_backup`] or the
/// loader; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorBackup {
    /// Protocol version in effect when the snapshot was taken.
    pub protocol_version: u8,
    /// Trust-center link key material (hashed from version 13 on).
    pub trust_center_link_key_hash: EmberKeyData,
    pub network_key: EmberKeyData,
    pub network_key_sequence_number: u8,
    pub network_key_frame_counter: u32,
    pub pan_id: u16,
    pub extended_pan_id: ExtendedPanId,
    /// Channels the network may operate on, ascending, never empty.
    pub channel_list: Vec<u8>,
    /// Channel in use when the snapshot was taken.
    pub logical_channel: u8,
    pub network_update_id: u8,
    pub security_level: u8,
    /// Whether the network key is handed to joining devices. True on a
    /// fresh capture; false after a reload, since the portable document
    /// does not carry it.
    pub network_key_distribute: bool,
    pub coordinator_ieee: Eui64,
    /// Known devices. Empty on a fresh capture; populated when a stored
    /// document carries a device table.
    pub devices: Vec<DeviceEntry>,
}

/// One device record carried by a stored backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    /// Short address, if the document recorded one.
    pub network_address: Option<u16>,
    pub ieee_address: Eui64,
    /// Whether the device joined directly through the coordinator.
    pub is_direct_child: bool,
    pub link_key: Option<DeviceLinkKey>,
}

/// Per-device link key with its frame counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceLinkKey {
    pub key: EmberKeyData,
    pub rx_counter: u32,
    pub tx_counter: u32,
}
