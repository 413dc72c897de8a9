/// Errors that stop configuration loading altogether.
///
/// Bad option values are not errors: they are reported as invalid outcomes
/// in the per-section apply report and loading continues.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A line of the configuration text could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The configuration has no `[general]` section.
    #[error("configuration has no [general] section")]
    MissingGeneralSection,

    /// `bindaddr` did not name a usable IPv4 address.
    #[error("cannot resolve bind address '{0}'")]
    UnresolvableBindAddress(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// No option segment with the given name.
    #[error("unknown option segment '{0}'")]
    UnknownSegment(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
