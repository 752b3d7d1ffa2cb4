use std::path::{Path, PathBuf};

use ezsp_session::{
    mask_to_channel_list, DeviceSession, EmberKeyData, EmberKeyStruct, EmberKeyType, KeyExport,
    SECURITY_MANAGER_MIN_VERSION,
};

use crate::error::BackupError;
use crate::model::{CoordinatorBackup, SECURITY_LEVEL};
use crate::storage;

/// Backup operations for one adapter.
///
/// Holds the session and the path where this network's backup lives.
pub struct BackupAdapter<S> {
    session: S,
    backup_path: PathBuf,
}

impl<S: DeviceSession> BackupAdapter<S> {
    pub fn new(session: S, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            session,
            backup_path: backup_path.into(),
        }
    }

    /// Path this adapter reads and writes its backup at.
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Snapshot the coordinator's network state.
    ///
    /// Queries run strictly in order; the first failure abandons the
    /// whole capture. Firmware from version 13 on exports bare key
    /// material and keeps the metadata behind a separate query; older
    /// firmware returns everything in one key-table entry, and the
    /// metadata query is never issued for it.
    pub async fn create_backup(&self) -> Result<CoordinatorBackup, BackupError> {
        let version = self.session.protocol_version().await?;
        let tclk_export = self
            .session
            .get_key(EmberKeyType::TrustCenterLinkKey)
            .await?;
        let parameters = self.session.network_parameters().await?;
        let network_export = self
            .session
            .get_key(EmberKeyType::CurrentNetworkKey)
            .await?;

        let (trust_center_link_key_hash, network_key, sequence_number, frame_counter) =
            if version < SECURITY_MANAGER_MIN_VERSION {
                let tclk = expect_legacy(tclk_export)?;
                let network = expect_legacy(network_export)?;
                let sequence = network.sequence_number;
                let counter = network.outgoing_frame_counter;
                (tclk.key, network.key, sequence, counter)
            } else {
                let tclk = expect_sec_man(tclk_export)?;
                let network = expect_sec_man(network_export)?;
                let info = self.session.network_key_info().await?;
                (
                    tclk,
                    network,
                    info.network_key_sequence_number,
                    info.network_key_frame_counter,
                )
            };

        let coordinator_ieee = self.session.coordinator_eui64().await?;

        let channel_list = mask_to_channel_list(parameters.channels);
        if channel_list.is_empty() {
            return Err(BackupError::MalformedResponse {
                detail: format!(
                    "channel mask {:#010x} decodes to no channels",
                    parameters.channels
                ),
            });
        }

        tracing::debug!(
            "captured coordinator backup: version {version}, channel {}, pan 0x{:04x}",
            parameters.radio_channel,
            parameters.pan_id
        );

        Ok(CoordinatorBackup {
            protocol_version: version,
            trust_center_link_key_hash,
            network_key,
            network_key_sequence_number: sequence_number,
            network_key_frame_counter: frame_counter,
            pan_id: parameters.pan_id,
            extended_pan_id: parameters.extended_pan_id,
            channel_list,
            logical_channel: parameters.radio_channel,
            network_update_id: parameters.nwk_update_id,
            security_level: SECURITY_LEVEL,
            network_key_distribute: true,
            coordinator_ieee,
            devices: Vec::new(),
        })
    }

    /// Load and validate the stored backup, if any.
    pub async fn stored_backup(&self) -> Result<Option<CoordinatorBackup>, BackupError> {
        storage::read_stored_backup(&self.backup_path).await
    }

    /// Persist a backup at this adapter's path.
    pub async fn save_backup(&self, backup: &CoordinatorBackup) -> Result<(), BackupError> {
        storage::write_stored_backup(&self.backup_path, backup).await
    }
}

fn expect_legacy(export: KeyExport) -> Result<EmberKeyStruct, BackupError> {
    match export {
        KeyExport::Legacy(entry) => Ok(entry),
        other => Err(BackupError::MalformedResponse {
            detail: format!(
                "expected legacy key struct, adapter sent {}",
                other.layout_name()
            ),
        }),
    }
}

fn expect_sec_man(export: KeyExport) -> Result<EmberKeyData, BackupError> {
    match export {
        KeyExport::SecMan(key) => Ok(key),
        other => Err(BackupError::MalformedResponse {
            detail: format!(
                "expected security-manager key data, adapter sent {}",
                other.layout_name()
            ),
        }),
    }
}
