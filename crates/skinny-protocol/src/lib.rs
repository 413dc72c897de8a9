//! Protocol version selection for Skinny phones.
//!
//! A phone announces the highest protocol version it speaks when it
//! registers. [`device_protocol`] maps that to the newest descriptor not
//! above it; the descriptor then builds every version-sensitive outbound
//! message in the matching layout.

pub mod builders;
pub mod descriptor;
pub mod error;
pub mod version;

pub use builders::{CallDetails, ForwardState, RegisterAckParams, UserDataRequest};
pub use descriptor::{descriptors, device_protocol, device_protocol_for, DeviceProtocol, ProtocolDevice};
pub use error::{ProtocolError, Result};
pub use version::{max_supported_version, ProtocolFamily, SCCP_MAX_VERSION, SCCP_MIN_VERSION, SPCP_VERSION};
