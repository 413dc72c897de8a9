//! Skinny (SCCP/SPCP) wire format.
//!
//! Every packet is a 12-byte little-endian envelope followed by a
//! fixed-layout payload:
//! - A 4-byte length covering the message id and the payload
//! - A 4-byte reserved word, always zero
//! - A 4-byte message id
//!
//! The payload layout depends on the message id and, for a handful of
//! messages, on the protocol version the phone registered with. Decoding
//! yields a typed [`Message`]; ids without a layout come back as
//! [`Message::Unhandled`] with the raw bytes intact.

pub mod catalogue;
pub mod codec;
pub mod error;
pub mod field;
pub mod ids;
pub mod messages;
pub mod reader;
pub mod writer;

pub use catalogue::{
    base_size, bands, entries, lookup, CatalogueEntry, Message, RawMessage, VersionBand,
    MAX_PAYLOAD_SIZE,
};
pub use codec::{decode_message, encode_message, EnvelopeConfig, HEADER_SIZE, MAX_PACKET_SIZE};
pub use error::{Result, WireError};
pub use field::{Blob, FixedStr, IpAddr16, Ipv4Be, WireField};
pub use ids::{direction, message_name, Direction};
pub use reader::MessageReader;
pub use writer::MessageWriter;
