use std::fmt;
use std::io;

use skinny_config::ConfigError;
use skinny_protocol::ProtocolError;
use skinny_wire::WireError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const NOT_FOUND: i32 = 66;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => NOT_FOUND,
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn wire_error(context: &str, err: WireError) -> CliError {
    match err {
        WireError::Io(source) => io_error(context, source),
        WireError::PacketTooLarge { .. }
        | WireError::InvalidLength(_)
        | WireError::PayloadTooLarge { .. }
        | WireError::ConnectionClosed => CliError::new(DATA_INVALID, format!("{context}: {err}")),
    }
}

pub fn protocol_error(context: &str, err: ProtocolError) -> CliError {
    match err {
        ProtocolError::UnknownFamily(_) => CliError::new(USAGE, format!("{context}: {err}")),
        ProtocolError::VersionTooLow { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn config_error(context: &str, err: ConfigError) -> CliError {
    match err {
        ConfigError::Io(source) => io_error(context, source),
        ConfigError::UnknownSegment(_) => CliError::new(USAGE, format!("{context}: {err}")),
        ConfigError::Parse { .. }
        | ConfigError::MissingGeneralSection
        | ConfigError::UnresolvableBindAddress(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_map_to_exit_codes() {
        assert_eq!(config_error("load", ConfigError::MissingGeneralSection).code, DATA_INVALID);
        assert_eq!(config_error("options", ConfigError::UnknownSegment("x".into())).code, USAGE);
        let missing = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(config_error("load", ConfigError::Io(missing)).code, NOT_FOUND);
    }

    #[test]
    fn wire_errors_are_data_errors() {
        let err = wire_error("decode", WireError::InvalidLength(2));
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("decode: "));
    }
}
