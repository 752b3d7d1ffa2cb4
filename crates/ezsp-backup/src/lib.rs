//! Coordinator backup core for EZSP adapters.
//!
//! Captures the security-critical network state of a coordinator
//! (trust-center link key, network key and its metadata, network
//! identity) through an [`ezsp_session::DeviceSession`], and reads and
//! writes the portable `zigpy/open-coordinator-backup` document so the
//! network can be rebuilt on another stick.
//!
//! Both firmware generations are handled: the legacy key-table commands
//! (protocol versions below 13) and the security-manager API (13 and
//! later).

pub mod adapter;
pub mod error;
pub mod model;
pub mod storage;
pub mod unified;

pub use adapter::BackupAdapter;
pub use error::BackupError;
pub use model::{CoordinatorBackup, DeviceEntry, DeviceLinkKey, SECURITY_LEVEL};
pub use unified::{UnifiedBackup, UnifiedError};

// Session-side types, re-exported so consumers only need this crate.
pub use ezsp_session::{
    mask_to_channel_list, DeviceSession, EmberKeyData, EmberKeyStruct, EmberKeyType,
    EmberNetworkParameters, Eui64, ExtendedPanId, KeyExport, NetworkKeyInfo, SessionError,
    SECURITY_MANAGER_MIN_VERSION,
};
