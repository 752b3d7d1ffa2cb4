use crate::types::ExtendedPanId;

/// Network parameters as the adapter reports them.
///
/// Field layout follows the `EmberNetworkParameters` frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmberNetworkParameters {
    pub extended_pan_id: ExtendedPanId,
    pub pan_id: u16,
    /// Transmit power in dBm.
    pub radio_tx_power: i8,
    /// Channel the network currently operates on.
    pub radio_channel: u8,
    pub nwk_manager_id: u16,
    pub nwk_update_id: u8,
    /// Bitmask of channels the network may use. Bit n set means
    /// channel n is allowed.
    pub channels: u32,
}
