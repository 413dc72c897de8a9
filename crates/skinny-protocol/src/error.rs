use crate::version::ProtocolFamily;

/// Errors raised while selecting a device protocol.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The phone negotiated a version below the supported minimum.
    ///
    /// Fatal for the registration attempt; not retried.
    #[error("{family} protocol version {version} is below the minimum {min}")]
    VersionTooLow {
        family: ProtocolFamily,
        version: u8,
        min: u8,
    },

    /// The protocol family name is not recognised.
    #[error("unknown protocol family: {0}")]
    UnknownFamily(String),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
