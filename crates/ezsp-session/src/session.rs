use crate::error::SessionError;
use crate::key::{EmberKeyType, KeyExport, NetworkKeyInfo};
use crate::parameters::EmberNetworkParameters;
use crate::types::Eui64;

/// Commands the backup layer issues against a live adapter.
///
/// En production : impl par le driver serie (UART + ASH).
/// En test : impl par un MockSession (reponses pre-enregistrees).
#[async_trait::async_trait]
pub trait DeviceSession: Send + Sync {
    /// Protocol version negotiated with the adapter firmware.
    async fn protocol_version(&self) -> Result<u8, SessionError>;

    /// Export a key. Which [`KeyExport`] variant comes back depends on
    /// the firmware generation, not on the requested key type.
    async fn get_key(&self, key_type: EmberKeyType) -> Result<KeyExport, SessionError>;

    /// Current network parameters.
    async fn network_parameters(&self) -> Result<EmberNetworkParameters, SessionError>;

    /// Network-key metadata. Only meaningful from protocol version 13
    /// on; older firmware carries the metadata inside the key-table
    /// entry instead.
    async fn network_key_info(&self) -> Result<NetworkKeyInfo, SessionError>;

    /// EUI64 of the local coordinator.
    async fn coordinator_eui64(&self) -> Result<Eui64, SessionError>;
}
