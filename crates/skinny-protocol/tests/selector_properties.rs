use bytes::BytesMut;
use proptest::prelude::*;
use skinny_protocol::{
    device_protocol, CallDetails, ForwardState, ProtocolError, ProtocolFamily, SCCP_MIN_VERSION,
};
use skinny_wire::{decode_message, encode_message, lookup, MAX_PACKET_SIZE};

proptest! {
    #[test]
    fn selected_descriptor_never_exceeds_negotiated(version in any::<u8>()) {
        match device_protocol(ProtocolFamily::Sccp, version) {
            Ok(descriptor) => {
                prop_assert!(version >= SCCP_MIN_VERSION);
                prop_assert!(descriptor.version <= version);
            }
            Err(ProtocolError::VersionTooLow { min, .. }) => {
                prop_assert!(version < min);
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    #[test]
    fn built_messages_decode_at_the_negotiated_version(
        version in SCCP_MIN_VERSION..=22u8,
        number in "[0-9]{1,20}",
        name in "[A-Za-z]{1,30}",
    ) {
        let descriptor = device_protocol(ProtocolFamily::Sccp, version).unwrap();
        let call = CallDetails {
            calling_number: number.clone(),
            calling_name: name.clone(),
            ..CallDetails::default()
        };
        let forward = ForwardState {
            line_instance: 1,
            all: Some(number.clone()),
            ..ForwardState::default()
        };

        for message in [
            descriptor.call_info(&call),
            descriptor.dialed_number(&number, 1, 7),
            descriptor.forward_status(&forward),
            descriptor.display_prompt(1, 7, 10, &name),
        ] {
            // The layout a phone at this version expects for the id.
            let entry = lookup(message.id(), version).unwrap();
            prop_assert_eq!(entry.variant, message.variant_name());

            let mut buf = BytesMut::new();
            encode_message(&message, &mut buf).unwrap();
            let decoded = decode_message(&mut buf, version, MAX_PACKET_SIZE).unwrap().unwrap();
            prop_assert_eq!(decoded, message);
        }
    }
}
