use bytes::{Buf, BufMut, BytesMut};
use tracing::debug;

use crate::catalogue::{lookup, Message, RawMessage, MAX_PAYLOAD_SIZE};
use crate::error::{Result, WireError};

/// Envelope header: length (4) + reserved (4) + message id (4) = 12 bytes.
pub const HEADER_SIZE: usize = 12;

/// Largest packet any catalogued message produces, header included.
pub const MAX_PACKET_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE;

/// Bytes on the wire before the part counted by the length field.
const LENGTH_PREFIX: usize = 8;

/// Encode a message into the wire envelope.
///
/// Wire format:
/// ```text
/// ┌────────────┬────────────┬────────────┬──────────────────┐
/// │ Length     │ Reserved   │ Message id │ Payload          │
/// │ (4B LE)    │ (4B, zero) │ (4B LE)    │ (Length - 4 B)   │
/// └────────────┴────────────┴────────────┴──────────────────┘
/// ```
///
/// `Length` counts the message id word plus the payload.
pub fn encode_message(message: &Message, dst: &mut BytesMut) -> Result<()> {
    let start = dst.len();
    dst.reserve(HEADER_SIZE);
    dst.put_u32_le(0);
    dst.put_u32_le(0);
    dst.put_u32_le(message.id());
    message.put_payload(dst);

    let payload_len = dst.len() - start - HEADER_SIZE;
    if payload_len > MAX_PAYLOAD_SIZE {
        dst.truncate(start);
        return Err(WireError::PayloadTooLarge {
            id: message.id(),
            size: payload_len,
            max: MAX_PAYLOAD_SIZE,
        });
    }

    let length = (payload_len + 4) as u32;
    dst[start..start + 4].copy_from_slice(&length.to_le_bytes());
    Ok(())
}

/// Decode one message from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete packet yet.
/// On success, consumes the packet bytes from the buffer. The layout is
/// chosen from the message id and the band of `protocol_version`.
pub fn decode_message(
    src: &mut BytesMut,
    protocol_version: u8,
    max_packet_size: usize,
) -> Result<Option<Message>> {
    if src.len() < 4 {
        return Ok(None);
    }

    let length = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
    if length < 4 {
        return Err(WireError::InvalidLength(length));
    }

    let total = length as usize + LENGTH_PREFIX;
    if total > max_packet_size {
        return Err(WireError::PacketTooLarge {
            size: total,
            max: max_packet_size,
        });
    }

    if src.len() < total {
        return Ok(None);
    }

    src.advance(LENGTH_PREFIX);
    let id = src.get_u32_le();
    let payload = src.split_to(length as usize - 4).freeze();

    let Some(entry) = lookup(id, protocol_version) else {
        debug!(id = format_args!("{id:#06x}"), len = payload.len(), "unhandled message");
        return Ok(Some(Message::Unhandled(RawMessage { id, payload })));
    };

    if payload.len() < entry.size {
        debug!(
            id = format_args!("{id:#06x}"),
            name = entry.name(),
            expected = entry.size,
            received = payload.len(),
            "short payload, zero-extending"
        );
        let mut padded = BytesMut::with_capacity(entry.size);
        padded.extend_from_slice(&payload);
        padded.resize(entry.size, 0);
        return Ok(Some(entry.decode(&padded)));
    }

    if payload.len() > entry.max_size {
        debug!(
            id = format_args!("{id:#06x}"),
            name = entry.name(),
            extra = payload.len() - entry.max_size,
            "ignoring trailing bytes"
        );
    }

    Ok(Some(entry.decode(&payload)))
}

/// Configuration for the envelope codec.
#[derive(Debug, Clone)]
pub struct EnvelopeConfig {
    /// Largest accepted packet, header included. Default: [`MAX_PACKET_SIZE`].
    pub max_packet_size: usize,
    /// Protocol version used to pick layouts when decoding. Default: 0.
    pub protocol_version: u8,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            max_packet_size: MAX_PACKET_SIZE,
            protocol_version: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::field::{FixedStr, Ipv4Be, WireField};
    use crate::ids;
    use crate::messages::*;

    fn encode(message: &Message) -> BytesMut {
        let mut buf = BytesMut::new();
        encode_message(message, &mut buf).unwrap();
        buf
    }

    #[test]
    fn test_keep_alive_wire_bytes() {
        let buf = encode(&Message::KeepAlive(Empty::default()));
        assert_eq!(buf.as_ref(), &[4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let msg = Message::KeypadButton(KeypadButton {
            button: 5,
            line_instance: 1,
            call_reference: 0x1234,
        });
        let mut buf = encode(&msg);
        assert_eq!(buf.len(), HEADER_SIZE + KeypadButton::SIZE);
        assert_eq!(&buf[0..4], &16u32.to_le_bytes());

        let decoded = decode_message(&mut buf, 11, MAX_PACKET_SIZE).unwrap().unwrap();
        assert_eq!(decoded, msg);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_multimedia_transmission_v17_roundtrip() {
        let mut video = VideoParameter {
            bit_rate: 384,
            picture_format_count: 1,
            ..VideoParameter::default()
        };
        video.picture_format[0] = PictureFormat { format: 2, mpi: 1 };
        let msg = Message::StartMultiMediaTransmissionV17(StartMultiMediaTransmissionV17 {
            conference_id: 7,
            pass_thru_party_id: 0x0100_0001,
            payload_capability: 103,
            remote_ip: crate::field::IpAddr16(Ipv4Addr::new(10, 0, 0, 5).into()),
            remote_port: 20_000,
            call_reference: 42,
            payload_type: 97,
            video_parameter: video,
            ..StartMultiMediaTransmissionV17::default()
        });
        let mut buf = encode(&msg);
        assert_eq!(buf.len(), HEADER_SIZE + StartMultiMediaTransmissionV17::SIZE);

        let decoded = decode_message(&mut buf, 17, MAX_PACKET_SIZE).unwrap().unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_decode_incomplete_header() {
        let mut buf = BytesMut::from(&[0x10, 0x00][..]);
        assert!(decode_message(&mut buf, 11, MAX_PACKET_SIZE).unwrap().is_none());
    }

    #[test]
    fn test_decode_incomplete_payload() {
        let mut buf = encode(&Message::SetLamp(SetLamp {
            stimulus: 9,
            stimulus_instance: 1,
            lamp_mode: 2,
        }));
        buf.truncate(buf.len() - 3);
        assert!(decode_message(&mut buf, 11, MAX_PACKET_SIZE).unwrap().is_none());
        assert_eq!(buf.len(), HEADER_SIZE + SetLamp::SIZE - 3);
    }

    #[test]
    fn test_oversized_rejected_before_body() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(10_000);
        let result = decode_message(&mut buf, 11, MAX_PACKET_SIZE);
        assert!(matches!(result, Err(WireError::PacketTooLarge { size: 10_008, .. })));
    }

    #[test]
    fn test_invalid_length() {
        let mut buf = BytesMut::from(&[2u8, 0, 0, 0, 0, 0, 0, 0, 0, 0][..]);
        let result = decode_message(&mut buf, 11, MAX_PACKET_SIZE);
        assert!(matches!(result, Err(WireError::InvalidLength(2))));
    }

    #[test]
    fn test_unknown_id_kept_raw() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(8);
        buf.put_u32_le(0);
        buf.put_u32_le(0x0084);
        buf.put_u32_le(0xdead_beef);

        let decoded = decode_message(&mut buf, 11, MAX_PACKET_SIZE).unwrap().unwrap();
        match decoded {
            Message::Unhandled(raw) => {
                assert_eq!(raw.id, 0x0084);
                assert_eq!(raw.payload.as_ref(), &0xdead_beefu32.to_le_bytes());
            }
            other => panic!("expected unhandled, got {other:?}"),
        }
    }

    #[test]
    fn test_unhandled_reencodes_verbatim() {
        let raw = Message::Unhandled(RawMessage {
            id: 0x0127,
            payload: bytes::Bytes::from_static(&[1, 2, 3, 4]),
        });
        let buf = encode(&raw);
        assert_eq!(&buf[8..12], &0x0127u32.to_le_bytes());
        assert_eq!(&buf[12..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_short_payload_zero_extended() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(4 + 4);
        buf.put_u32_le(0);
        buf.put_u32_le(ids::SET_LAMP);
        buf.put_u32_le(9);

        let decoded = decode_message(&mut buf, 11, MAX_PACKET_SIZE).unwrap().unwrap();
        assert_eq!(
            decoded,
            Message::SetLamp(SetLamp {
                stimulus: 9,
                stimulus_instance: 0,
                lamp_mode: 0,
            })
        );
    }

    #[test]
    fn test_version_selects_layout() {
        let v17 = Message::OpenReceiveChannelAckV17(OpenReceiveChannelAckV17 {
            status: 0,
            unknown1: 0,
            ip_addr: crate::field::IpAddr16(Ipv4Addr::new(192, 168, 9, 36).into()),
            port: 20000,
            pass_thru_party_id: 7,
            call_reference: 3,
        });
        let mut buf = encode(&v17);
        let decoded = decode_message(&mut buf, 17, MAX_PACKET_SIZE).unwrap().unwrap();
        assert_eq!(decoded, v17);

        let base = Message::OpenReceiveChannelAck(OpenReceiveChannelAck {
            status: 0,
            ip_addr: Ipv4Be(Ipv4Addr::new(192, 168, 9, 36)),
            port: 20000,
            pass_thru_party_id: 7,
            call_reference: 3,
        });
        let mut buf = encode(&base);
        let decoded = decode_message(&mut buf, 11, MAX_PACKET_SIZE).unwrap().unwrap();
        assert_eq!(decoded, base);
    }

    #[test]
    fn test_trailing_text_roundtrip() {
        let msg = Message::DisplayDynamicNotify(DisplayDynamicNotify {
            timeout: 10,
            text: crate::field::Blob::text("Call forwarded"),
        });
        let mut buf = encode(&msg);
        assert_eq!(buf.len(), HEADER_SIZE + 4 + 16);
        let decoded = decode_message(&mut buf, 17, MAX_PACKET_SIZE).unwrap().unwrap();
        match decoded {
            Message::DisplayDynamicNotify(notify) => {
                assert_eq!(notify.timeout, 10);
                assert_eq!(notify.text.as_text(), "Call forwarded");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_multiple_messages_in_buffer() {
        let mut buf = BytesMut::new();
        encode_message(&Message::KeepAlive(Empty::default()), &mut buf).unwrap();
        encode_message(
            &Message::DisplayText(DisplayText {
                text: FixedStr::new("Hello"),
            }),
            &mut buf,
        )
        .unwrap();

        let first = decode_message(&mut buf, 11, MAX_PACKET_SIZE).unwrap().unwrap();
        let second = decode_message(&mut buf, 11, MAX_PACKET_SIZE).unwrap().unwrap();
        assert_eq!(first.id(), ids::KEEP_ALIVE);
        assert!(matches!(second, Message::DisplayText(ref d) if d.text.as_str() == "Hello"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_max_packet_bounds_largest_message() {
        let msg = Message::UserToDeviceDataVersion1(UserDataVersion1::new(
            1,
            1,
            1,
            1,
            &"x".repeat(MAX_XML_MESSAGE + 10),
        ));
        let buf = encode(&msg);
        assert!(buf.len() <= MAX_PACKET_SIZE);
    }
}
