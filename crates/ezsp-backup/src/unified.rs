//! The `zigpy/open-coordinator-backup` document, version 1.
//!
//! Field names and encodings follow the format as the other coordinator
//! tools write it, so backup files travel between ecosystems unchanged.
//! Key and address material is hex-encoded; `pan_id` is 4 big-endian
//! hex digits.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use ezsp_session::{EmberKeyData, Eui64, ExtendedPanId};

use crate::model::{CoordinatorBackup, DeviceEntry, DeviceLinkKey};

// ── Format tags ──────────────────────────────────────────────────────────

/// Value of `metadata.format` identifying the portable backup format.
pub const FORMAT_TAG: &str = "zigpy/open-coordinator-backup";

/// The only revision of the format this crate reads and writes.
pub const FORMAT_VERSION: u32 = 1;

// ── Document schema ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedBackup {
    pub metadata: UnifiedMetadata,
    #[serde(default)]
    pub stack_specific: UnifiedStackSpecific,
    pub coordinator_ieee: String,
    /// 4 hex digits, big-endian.
    pub pan_id: String,
    pub extended_pan_id: String,
    pub nwk_update_id: u8,
    pub security_level: u8,
    pub channel: u8,
    /// Explicit channel list, not a bitmask.
    pub channel_mask: Vec<u8>,
    pub network_key: UnifiedNetworkKey,
    pub devices: Vec<UnifiedDevice>,
}

/// Document tags: who wrote the file and in which format revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedMetadata {
    pub format: String,
    pub version: u32,
    pub source: String,
    pub internal: UnifiedInternal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedInternal {
    /// Capture date, RFC 3339. Informational only; tolerated absent.
    #[serde(default)]
    pub date: String,
    #[serde(rename = "ezspVersion", skip_serializing_if = "Option::is_none")]
    pub ezsp_version: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnifiedStackSpecific {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ezsp: Option<UnifiedEzsp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedEzsp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashed_tclk: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedNetworkKey {
    pub key: String,
    pub sequence_number: u8,
    pub frame_counter: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedDevice {
    /// 4-digit hex short address, or null when unknown.
    #[serde(default)]
    pub nwk_address: Option<String>,
    pub ieee_address: String,
    /// Documents from before the field existed mean "direct child".
    #[serde(default = "child_default")]
    pub is_child: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_key: Option<UnifiedDeviceKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedDeviceKey {
    pub key: String,
    pub rx_counter: u32,
    pub tx_counter: u32,
}

fn child_default() -> bool {
    true
}

// ── Errors ───────────────────────────────────────────────────────────────

/// Failures converting between the portable document and the model.
#[derive(Debug, thiserror::Error)]
pub enum UnifiedError {
    /// The document does not match the schema at all.
    #[error("document does not match open-coordinator-backup schema: {0}")]
    Schema(String),

    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("field {field} is not valid hex: {source}")]
    BadHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("field {field} must be {expected} bytes, got {actual}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("field channel_mask lists no channels")]
    EmptyChannelMask,
}

impl From<serde_json::Error> for UnifiedError {
    fn from(e: serde_json::Error) -> Self {
        UnifiedError::Schema(e.to_string())
    }
}

/// Decode a hex field into exactly N bytes.
fn hex_field<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N], UnifiedError> {
    let bytes = hex::decode(value).map_err(|source| UnifiedError::BadHex { field, source })?;
    <[u8; N]>::try_from(bytes).map_err(|v| UnifiedError::WrongLength {
        field,
        expected: N,
        actual: v.len(),
    })
}

// ── Document -> model ────────────────────────────────────────────────────

/// Convert a parsed document into the internal model.
///
/// The caller has already checked the format tags; this validates
/// content only (schema shape, hex fields, lengths, required key
/// material, a non-empty channel list).
pub fn from_document(document: serde_json::Value) -> Result<CoordinatorBackup, UnifiedError> {
    let unified: UnifiedBackup = serde_json::from_value(document)?;
    from_unified(&unified)
}

/// Convert the typed document into the internal model.
pub fn from_unified(unified: &UnifiedBackup) -> Result<CoordinatorBackup, UnifiedError> {
    let ezsp = unified
        .stack_specific
        .ezsp
        .as_ref()
        .ok_or(UnifiedError::MissingField("stack_specific.ezsp"))?;
    let tclk = ezsp
        .hashed_tclk
        .as_deref()
        .ok_or(UnifiedError::MissingField("stack_specific.ezsp.hashed_tclk"))?;
    let protocol_version = unified
        .metadata
        .internal
        .ezsp_version
        .ok_or(UnifiedError::MissingField("metadata.internal.ezspVersion"))?;
    // channel_list is never empty in the model
    if unified.channel_mask.is_empty() {
        return Err(UnifiedError::EmptyChannelMask);
    }

    let devices = unified
        .devices
        .iter()
        .map(device_from_unified)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CoordinatorBackup {
        protocol_version,
        trust_center_link_key_hash: EmberKeyData::new(hex_field::<16>(
            "stack_specific.ezsp.hashed_tclk",
            tclk,
        )?),
        network_key: EmberKeyData::new(hex_field::<16>(
            "network_key.key",
            &unified.network_key.key,
        )?),
        network_key_sequence_number: unified.network_key.sequence_number,
        network_key_frame_counter: unified.network_key.frame_counter,
        pan_id: u16::from_be_bytes(hex_field::<2>("pan_id", &unified.pan_id)?),
        extended_pan_id: ExtendedPanId::new(hex_field::<8>(
            "extended_pan_id",
            &unified.extended_pan_id,
        )?),
        channel_list: unified.channel_mask.clone(),
        logical_channel: unified.channel,
        network_update_id: unified.nwk_update_id,
        security_level: unified.security_level,
        // A reloaded backup never re-enables key distribution.
        network_key_distribute: false,
        coordinator_ieee: Eui64::new(hex_field::<8>(
            "coordinator_ieee",
            &unified.coordinator_ieee,
        )?),
        devices,
    })
}

fn device_from_unified(device: &UnifiedDevice) -> Result<DeviceEntry, UnifiedError> {
    let network_address = match device.nwk_address.as_deref() {
        Some(raw) => Some(u16::from_be_bytes(hex_field::<2>(
            "devices.nwk_address",
            raw,
        )?)),
        None => None,
    };
    let link_key = match &device.link_key {
        Some(lk) => Some(DeviceLinkKey {
            key: EmberKeyData::new(hex_field::<16>("devices.link_key.key", &lk.key)?),
            rx_counter: lk.rx_counter,
            tx_counter: lk.tx_counter,
        }),
        None => None,
    };
    Ok(DeviceEntry {
        network_address,
        ieee_address: Eui64::new(hex_field::<8>("devices.ieee_address", &device.ieee_address)?),
        is_direct_child: device.is_child,
        link_key,
    })
}

// ── Model -> document ────────────────────────────────────────────────────

/// Render the internal model as a portable document.
pub fn to_unified(backup: &CoordinatorBackup) -> UnifiedBackup {
    UnifiedBackup {
        metadata: UnifiedMetadata {
            format: FORMAT_TAG.to_string(),
            version: FORMAT_VERSION,
            source: format!("{}@{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            internal: UnifiedInternal {
                date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                ezsp_version: Some(backup.protocol_version),
            },
        },
        stack_specific: UnifiedStackSpecific {
            ezsp: Some(UnifiedEzsp {
                hashed_tclk: Some(hex::encode(backup.trust_center_link_key_hash.as_bytes())),
            }),
        },
        coordinator_ieee: backup.coordinator_ieee.to_string(),
        pan_id: hex::encode(backup.pan_id.to_be_bytes()),
        extended_pan_id: backup.extended_pan_id.to_string(),
        nwk_update_id: backup.network_update_id,
        security_level: backup.security_level,
        channel: backup.logical_channel,
        channel_mask: backup.channel_list.clone(),
        network_key: UnifiedNetworkKey {
            key: hex::encode(backup.network_key.as_bytes()),
            sequence_number: backup.network_key_sequence_number,
            frame_counter: backup.network_key_frame_counter,
        },
        devices: backup.devices.iter().map(device_to_unified).collect(),
    }
}

fn device_to_unified(device: &DeviceEntry) -> UnifiedDevice {
    UnifiedDevice {
        nwk_address: device
            .network_address
            .map(|addr| hex::encode(addr.to_be_bytes())),
        ieee_address: device.ieee_address.to_string(),
        is_child: device.is_direct_child,
        link_key: device.link_key.as_ref().map(|lk| UnifiedDeviceKey {
            key: hex::encode(lk.key.as_bytes()),
            rx_counter: lk.rx_counter,
            tx_counter: lk.tx_counter,
        }),
    }
}
