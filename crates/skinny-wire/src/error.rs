/// Errors that can occur during envelope encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The declared packet length exceeds the configured maximum.
    ///
    /// Fatal for the connection: the stream can no longer be trusted.
    #[error("packet too large ({size} bytes, max {max})")]
    PacketTooLarge { size: usize, max: usize },

    /// The declared length cannot even hold the message id.
    #[error("invalid envelope length {0} (must be at least 4)")]
    InvalidLength(u32),

    /// An encoded payload does not fit the declared field widths.
    #[error("payload for message 0x{id:04X} too large ({size} bytes, max {max})")]
    PayloadTooLarge { id: u32, size: usize, max: usize },

    /// An I/O error occurred while reading or writing messages.
    #[error("wire I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete message was received.
    #[error("connection closed (incomplete message)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, WireError>;
