use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::catalogue::Message;
use crate::codec::{decode_message, EnvelopeConfig};
use crate::error::{Result, WireError};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete messages from any `Read` stream.
///
/// Handles partial reads internally; callers always get complete messages.
/// Layouts are chosen for the configured protocol version, which callers
/// update once registration has negotiated it.
pub struct MessageReader<T> {
    inner: T,
    buf: BytesMut,
    config: EnvelopeConfig,
}

impl<T: Read> MessageReader<T> {
    /// Create a new message reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, EnvelopeConfig::default())
    }

    /// Create a new message reader with explicit configuration.
    pub fn with_config(inner: T, config: EnvelopeConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete message (blocking).
    ///
    /// Returns `Err(WireError::ConnectionClosed)` when EOF is reached.
    pub fn read_message(&mut self) -> Result<Message> {
        loop {
            if let Some(message) = decode_message(
                &mut self.buf,
                self.config.protocol_version,
                self.config.max_packet_size,
            )? {
                return Ok(message);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(WireError::Io(err)),
            };

            if read == 0 {
                return Err(WireError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Switch layouts for subsequent messages.
    pub fn set_protocol_version(&mut self, version: u8) {
        self.config.protocol_version = version;
    }

    pub fn set_max_packet_size(&mut self, max_packet_size: usize) {
        self.config.max_packet_size = max_packet_size;
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::{BufMut, BytesMut};

    use super::*;
    use crate::codec::encode_message;
    use crate::field::FixedStr;
    use crate::ids;
    use crate::messages::*;

    fn wire(messages: &[Message]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        for message in messages {
            encode_message(message, &mut buf).unwrap();
        }
        buf.to_vec()
    }

    fn stimulus(instance: u32) -> Message {
        Message::Stimulus(Stimulus {
            stimulus: 9,
            instance,
        })
    }

    #[test]
    fn read_single_message() {
        let mut reader = MessageReader::new(Cursor::new(wire(&[stimulus(1)])));
        assert_eq!(reader.read_message().unwrap(), stimulus(1));
    }

    #[test]
    fn read_multiple_messages() {
        let bytes = wire(&[
            Message::KeepAlive(Empty::default()),
            stimulus(2),
            Message::EnblocCall(EnblocCall {
                called_party: FixedStr::new("5551234"),
            }),
        ]);
        let mut reader = MessageReader::new(Cursor::new(bytes));

        assert_eq!(reader.read_message().unwrap().id(), ids::KEEP_ALIVE);
        assert_eq!(reader.read_message().unwrap(), stimulus(2));
        let third = reader.read_message().unwrap();
        assert!(matches!(third, Message::EnblocCall(ref e) if e.called_party.as_str() == "5551234"));
    }

    #[test]
    fn partial_read_handling() {
        let byte_reader = ByteByByteReader {
            bytes: wire(&[stimulus(3)]),
            pos: 0,
        };
        let mut reader = MessageReader::new(byte_reader);
        assert_eq!(reader.read_message().unwrap(), stimulus(3));
    }

    #[test]
    fn connection_closed_cleanly() {
        let mut reader = MessageReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_message().unwrap_err();
        assert!(matches!(err, WireError::ConnectionClosed));
    }

    #[test]
    fn connection_closed_mid_message() {
        let mut partial = BytesMut::new();
        partial.put_u32_le(16);
        partial.put_u32_le(0);
        partial.put_u32_le(ids::KEYPAD_BUTTON);
        partial.put_u32_le(1);

        let mut reader = MessageReader::new(Cursor::new(partial.to_vec()));
        let err = reader.read_message().unwrap_err();
        assert!(matches!(err, WireError::ConnectionClosed));
    }

    #[test]
    fn oversized_packet_in_stream() {
        let mut bytes = BytesMut::new();
        bytes.put_u32_le(1024);

        let cfg = EnvelopeConfig {
            max_packet_size: 64,
            ..EnvelopeConfig::default()
        };
        let mut reader = MessageReader::with_config(Cursor::new(bytes.to_vec()), cfg);
        let err = reader.read_message().unwrap_err();
        assert!(matches!(err, WireError::PacketTooLarge { size: 1032, max: 64 }));
    }

    #[test]
    fn protocol_version_switches_layout() {
        let v19 = Message::ForwardStatV19(ForwardStatV19 {
            line_number: 1,
            cfwd_all_status: 1,
            cfwd_all_number: FixedStr::new("200"),
            ..ForwardStatV19::default()
        });
        let mut reader = MessageReader::new(Cursor::new(wire(&[v19.clone(), v19.clone()])));

        let first = reader.read_message().unwrap();
        assert!(matches!(first, Message::ForwardStat(_)));

        reader.set_protocol_version(19);
        assert_eq!(reader.config().protocol_version, 19);
        assert_eq!(reader.read_message().unwrap(), v19);
    }

    #[test]
    fn interrupted_read_retries() {
        let reader = InterruptedThenData {
            interrupted: false,
            inner: Cursor::new(wire(&[stimulus(4)])),
        };
        let mut framed = MessageReader::new(reader);
        assert_eq!(framed.read_message().unwrap(), stimulus(4));
    }

    #[test]
    fn roundtrip_over_pipe() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut writer = crate::writer::MessageWriter::new(left);
        let mut reader = MessageReader::new(right);

        writer.send(&stimulus(5)).unwrap();
        assert_eq!(reader.read_message().unwrap(), stimulus(5));
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut reader = MessageReader::new(Cursor::new(Vec::<u8>::new()));
        reader.set_max_packet_size(128);
        assert_eq!(reader.config().max_packet_size, 128);
        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }
}
