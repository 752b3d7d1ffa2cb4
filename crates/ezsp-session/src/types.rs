use std::fmt;
use std::str::FromStr;

/// Parse failure for an 8-byte hex identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid 8-byte hex identifier: {input}")]
pub struct ParseAddrError {
    pub input: String,
}

fn parse_8_bytes(s: &str) -> Result<[u8; 8], ParseAddrError> {
    let err = || ParseAddrError {
        input: s.to_string(),
    };
    let bytes = hex::decode(s).map_err(|_| err())?;
    bytes.try_into().map_err(|_| err())
}

/// 64-bit MAC address of a radio device.
///
/// Displayed and parsed as 16 lowercase hex digits, the byte order the
/// adapter reports it in.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Eui64([u8; 8]);

impl Eui64 {
    pub fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl fmt::Display for Eui64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Eui64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Eui64({self})")
    }
}

impl FromStr for Eui64 {
    type Err = ParseAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_8_bytes(s).map(Self)
    }
}

/// 64-bit extended PAN identifier of a network.
///
/// Same shape as [`Eui64`] but a different concept: this names the
/// network, not a device on it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtendedPanId([u8; 8]);

impl ExtendedPanId {
    pub fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl fmt::Display for ExtendedPanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for ExtendedPanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtendedPanId({self})")
    }
}

impl FromStr for ExtendedPanId {
    type Err = ParseAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_8_bytes(s).map(Self)
    }
}
