//! EZSP session seam.
//!
//! Typed results for the EmberZNet Serial Protocol commands the backup
//! layer issues, plus the [`DeviceSession`] trait that hides the serial
//! adapter behind a stable async API.
//!
//! The UART/ASH framing and command encoding belong to whatever
//! implements [`DeviceSession`]; this crate only defines the contract
//! and the data that crosses it.

mod channels;
mod error;
mod key;
mod parameters;
mod session;
mod types;

pub use channels::mask_to_channel_list;
pub use error::SessionError;
pub use key::{
    EmberKeyData, EmberKeyStruct, EmberKeyType, KeyExport, NetworkKeyInfo,
    SECURITY_MANAGER_MIN_VERSION,
};
pub use parameters::EmberNetworkParameters;
pub use session::DeviceSession;
pub use types::{Eui64, ExtendedPanId, ParseAddrError};
