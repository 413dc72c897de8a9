//! Property tests for the envelope codec and catalogue.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::{BufMut, BytesMut};
use proptest::prelude::*;
use skinny_wire::messages::*;
use skinny_wire::{
    decode_message, encode_message, lookup, Blob, FixedStr, IpAddr16, Ipv4Be, Message, WireError,
    MAX_PACKET_SIZE,
};

fn roundtrip(message: &Message, version: u8) -> Message {
    let mut buf = BytesMut::new();
    encode_message(message, &mut buf).unwrap();
    let decoded = decode_message(&mut buf, version, MAX_PACKET_SIZE)
        .unwrap()
        .unwrap();
    assert!(buf.is_empty());
    decoded
}

fn dirnum() -> impl Strategy<Value = String> {
    "[0-9*#]{0,23}"
}

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z ]{0,39}"
}

fn ipv6() -> impl Strategy<Value = IpAddr> {
    (1u16..=0xffff, 1u16..=0xffff, any::<u64>()).prop_map(|(head, mid, tail)| {
        IpAddr::V6(Ipv6Addr::new(
            head,
            0,
            mid,
            0,
            (tail >> 48) as u16,
            (tail >> 32) as u16,
            (tail >> 16) as u16,
            tail as u16,
        ))
    })
}

proptest! {
    #[test]
    fn base_call_info_roundtrip(
        calling in dirnum(),
        calling_name in name(),
        called in dirnum(),
        line_id in any::<u32>(),
        call_ref in any::<u32>(),
    ) {
        let msg = Message::CallInfo(CallInfo {
            calling_party: FixedStr::new(&calling),
            calling_party_name: FixedStr::new(&calling_name),
            called_party: FixedStr::new(&called),
            line_id,
            call_ref,
            call_type: 1,
            ..CallInfo::default()
        });
        prop_assert_eq!(roundtrip(&msg, 11), msg);
    }

    #[test]
    fn v17_start_media_roundtrip(
        v4 in any::<[u8; 4]>(),
        port in any::<u32>(),
        party in any::<u32>(),
    ) {
        let v4 = Ipv4Addr::from(v4);
        let msg = Message::StartMediaTransmissionV17(StartMediaTransmissionV17 {
            pass_thru_party_id: party,
            remote_ip: IpAddr16(IpAddr::V4(v4)),
            remote_port: port,
            packet_size_ms: 20,
            ..StartMediaTransmissionV17::default()
        });
        prop_assert_eq!(roundtrip(&msg, 17), msg);
    }

    #[test]
    fn v17_open_receive_ack_ipv6_roundtrip(addr in ipv6(), port in any::<u32>()) {
        let msg = Message::OpenReceiveChannelAckV17(OpenReceiveChannelAckV17 {
            ip_addr: IpAddr16(addr),
            port,
            ..OpenReceiveChannelAckV17::default()
        });
        prop_assert_eq!(roundtrip(&msg, 18), msg);
    }

    #[test]
    fn v19_forward_stat_roundtrip(number in dirnum(), line in 1u32..64, unknown in any::<u32>()) {
        let msg = Message::ForwardStatV19(ForwardStatV19 {
            line_number: line,
            cfwd_all_status: 1,
            cfwd_all_number: FixedStr::new(&number),
            unknown,
            ..ForwardStatV19::default()
        });
        prop_assert_eq!(roundtrip(&msg, 20), msg);
    }

    #[test]
    fn v19_dialed_number_roundtrip(number in "[0-9]{0,24}", line in any::<u32>(), call in any::<u32>()) {
        let msg = Message::DialedNumberV19(DialedNumberV19 {
            called_party: FixedStr::new(&number),
            line_instance: line,
            call_reference: call,
            padding: [0; 3],
        });
        prop_assert_eq!(roundtrip(&msg, 19), msg);
    }

    #[test]
    fn spcp_register_roundtrip(device in "[A-Z0-9]{0,15}", ip in any::<[u8; 4]>(), device_type in any::<u32>()) {
        let msg = Message::SpcpRegisterTokenReq(SpcpRegisterTokenReq {
            station: StationIdentifier {
                device_name: FixedStr::new(&device),
                user_id: 0,
                instance: 1,
            },
            station_ip: Ipv4Be(Ipv4Addr::from(ip)),
            device_type,
            max_streams: 5,
        });
        prop_assert_eq!(roundtrip(&msg, 0), msg);
    }

    #[test]
    fn user_data_payload_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..MAX_XML_MESSAGE)) {
        let msg = Message::UserToDeviceData(UserData {
            app_id: 1,
            line_instance: 1,
            call_reference: 2,
            transaction_id: 3,
            data_length: data.len() as u32,
            data: Blob::new(data),
        });
        prop_assert_eq!(roundtrip(&msg, 11), msg);
    }

    #[test]
    fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..512), version in 0u8..=22) {
        let mut buf = BytesMut::from(bytes.as_slice());
        loop {
            match decode_message(&mut buf, version, MAX_PACKET_SIZE) {
                Ok(Some(_)) => continue,
                Ok(None) | Err(_) => break,
            }
        }
    }

    #[test]
    fn declared_length_bounds_are_enforced(length in any::<u32>()) {
        let mut buf = BytesMut::new();
        buf.put_u32_le(length);
        buf.put_u32_le(0);
        buf.put_u32_le(0);
        match decode_message(&mut buf, 11, MAX_PACKET_SIZE) {
            Err(WireError::InvalidLength(_)) => prop_assert!(length < 4),
            Err(WireError::PacketTooLarge { .. }) => {
                prop_assert!(length as usize + 8 > MAX_PACKET_SIZE)
            }
            Ok(Some(_)) => prop_assert_eq!(length, 4),
            Ok(None) => prop_assert!(length > 4),
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    #[test]
    fn lookup_never_picks_a_higher_band(id in 0u32..0x0200, version in 0u8..=30) {
        if let Some(entry) = lookup(id, version) {
            prop_assert!(entry.band <= skinny_wire::VersionBand::from_version(version));
        }
    }
}
