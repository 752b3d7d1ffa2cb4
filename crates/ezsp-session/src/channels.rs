/// Expand a 32-bit channel bitmask into the list of set channels,
/// ascending. Bit n set means channel n is in the mask.
pub fn mask_to_channel_list(mask: u32) -> Vec<u8> {
    (0u8..32).filter(|bit| mask & (1u32 << bit) != 0).collect()
}
