use proptest::prelude::*;

use ezsp_backup::unified::{from_document, to_unified};
use ezsp_backup::{
    mask_to_channel_list, CoordinatorBackup, DeviceEntry, DeviceLinkKey, EmberKeyData, Eui64,
    ExtendedPanId,
};

/// Strategy for generating device table entries.
fn arb_device() -> impl Strategy<Value = DeviceEntry> {
    (
        prop::option::of(any::<u16>()),
        any::<[u8; 8]>(),
        any::<bool>(),
        prop::option::of((any::<[u8; 16]>(), any::<u32>(), any::<u32>())),
    )
        .prop_map(|(network_address, ieee, is_direct_child, link_key)| DeviceEntry {
            network_address,
            ieee_address: Eui64::new(ieee),
            is_direct_child,
            link_key: link_key.map(|(key, rx_counter, tx_counter)| DeviceLinkKey {
                key: EmberKeyData::new(key),
                rx_counter,
                tx_counter,
            }),
        })
}

proptest! {
    /// Any captured backup should survive a document roundtrip.
    #[test]
    fn roundtrip_backup(
        tclk in any::<[u8; 16]>(),
        net_key in any::<[u8; 16]>(),
        pan_id in any::<u16>(),
        frame_counter in any::<u32>(),
        mask in 1u32..,
    ) {
        let channel_list = mask_to_channel_list(mask);
        let logical_channel = channel_list[0];

        let backup = CoordinatorBackup {
            protocol_version: 13,
            trust_center_link_key_hash: EmberKeyData::new(tclk),
            network_key: EmberKeyData::new(net_key),
            network_key_sequence_number: 1,
            network_key_frame_counter: frame_counter,
            pan_id,
            extended_pan_id: ExtendedPanId::new([0xdd; 8]),
            channel_list,
            logical_channel,
            network_update_id: 0,
            security_level: 5,
            network_key_distribute: false,
            coordinator_ieee: Eui64::new([0xb0; 8]),
            devices: Vec::new(),
        };

        let doc = serde_json::to_value(to_unified(&backup)).expect("render");
        let reloaded = from_document(doc).expect("reload");

        prop_assert_eq!(&reloaded, &backup);
    }

    /// Device tables of any shape should survive the roundtrip.
    #[test]
    fn roundtrip_device_table(
        devices in prop::collection::vec(arb_device(), 0..5),
    ) {
        let backup = CoordinatorBackup {
            protocol_version: 8,
            trust_center_link_key_hash: EmberKeyData::new([0x30; 16]),
            network_key: EmberKeyData::new([0x7a; 16]),
            network_key_sequence_number: 1,
            network_key_frame_counter: 10_000,
            pan_id: 0x1a62,
            extended_pan_id: ExtendedPanId::new([0xdd; 8]),
            channel_list: vec![11, 15, 20, 25],
            logical_channel: 15,
            network_update_id: 0,
            security_level: 5,
            network_key_distribute: false,
            coordinator_ieee: Eui64::new([0xb0; 8]),
            devices,
        };

        let doc = serde_json::to_value(to_unified(&backup)).expect("render");
        let reloaded = from_document(doc).expect("reload");

        prop_assert_eq!(&reloaded.devices, &backup.devices);
    }

    /// A reload must never re-enable key distribution, whatever was captured.
    #[test]
    fn reload_never_redistributes(distribute in any::<bool>()) {
        let backup = CoordinatorBackup {
            protocol_version: 13,
            trust_center_link_key_hash: EmberKeyData::new([0x30; 16]),
            network_key: EmberKeyData::new([0x7a; 16]),
            network_key_sequence_number: 1,
            network_key_frame_counter: 10_000,
            pan_id: 0x1a62,
            extended_pan_id: ExtendedPanId::new([0xdd; 8]),
            channel_list: vec![11],
            logical_channel: 11,
            network_update_id: 0,
            security_level: 5,
            network_key_distribute: distribute,
            coordinator_ieee: Eui64::new([0xb0; 8]),
            devices: Vec::new(),
        };

        let doc = serde_json::to_value(to_unified(&backup)).expect("render");
        let reloaded = from_document(doc).expect("reload");

        prop_assert!(!reloaded.network_key_distribute);
    }

    /// The channel list is exactly the set bits of the mask, ascending.
    #[test]
    fn channel_list_matches_mask(mask in any::<u32>()) {
        let channels = mask_to_channel_list(mask);

        prop_assert_eq!(channels.len() as u32, mask.count_ones());
        for pair in channels.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for channel in channels.iter().copied() {
            prop_assert!(mask & (1u32 << channel) != 0);
        }
    }
}
