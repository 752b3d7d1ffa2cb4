use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::Eui64;

/// First protocol version whose key material flows through the
/// security-manager API instead of the legacy key table.
pub const SECURITY_MANAGER_MIN_VERSION: u8 = 13;

/// 16 bytes of AES-128 key material.
///
/// Wiped on drop. `Debug` never prints the contents.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EmberKeyData([u8; 16]);

impl EmberKeyData {
    pub fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Debug for EmberKeyData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EmberKeyData(..)")
    }
}

/// Key slots addressable through the key-export commands.
///
/// Discriminants match the wire encoding of `EmberKeyType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EmberKeyType {
    TrustCenterLinkKey = 1,
    CurrentNetworkKey = 3,
    NextNetworkKey = 4,
    ApplicationLinkKey = 5,
}

/// Key-table entry as the legacy `getKey` command returns it
/// (protocol versions below [`SECURITY_MANAGER_MIN_VERSION`]).
#[derive(Debug, Clone)]
pub struct EmberKeyStruct {
    /// Which of the optional fields the adapter filled in.
    pub bitmask: u16,
    pub key_type: EmberKeyType,
    pub key: EmberKeyData,
    pub outgoing_frame_counter: u32,
    pub incoming_frame_counter: u32,
    pub sequence_number: u8,
    pub partner_eui64: Eui64,
}

/// Network-key metadata from the security-manager query
/// (protocol versions from [`SECURITY_MANAGER_MIN_VERSION`] on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkKeyInfo {
    pub network_key_set: bool,
    pub alternate_network_key_set: bool,
    pub network_key_sequence_number: u8,
    pub alt_network_key_sequence_number: u8,
    pub network_key_frame_counter: u32,
}

/// Result of a key export, tagged by the firmware API that produced it.
///
/// Old firmware answers with a full key-table entry; new firmware hands
/// out bare key material and keeps the metadata behind a separate query.
/// The caller decides once, from the negotiated protocol version, which
/// variant it will accept and refuses the other.
#[derive(Debug, Clone)]
pub enum KeyExport {
    Legacy(EmberKeyStruct),
    SecMan(EmberKeyData),
}

impl KeyExport {
    /// Human label for the layout, used in mismatch diagnostics.
    pub fn layout_name(&self) -> &'static str {
        match self {
            KeyExport::Legacy(_) => "legacy key struct",
            KeyExport::SecMan(_) => "security-manager key data",
        }
    }
}
