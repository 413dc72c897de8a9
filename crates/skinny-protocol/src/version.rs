use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ProtocolError;

/// Lowest SCCP version a phone may register with.
pub const SCCP_MIN_VERSION: u8 = 3;

/// Highest SCCP version advertised in the register acknowledgement.
pub const SCCP_MAX_VERSION: u8 = 20;

/// SPCP (SPA phones) only knows a single version.
pub const SPCP_VERSION: u8 = 0;

/// Protocol family a device registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolFamily {
    Sccp,
    Spcp,
}

impl ProtocolFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolFamily::Sccp => "sccp",
            ProtocolFamily::Spcp => "spcp",
        }
    }

    pub fn min_version(self) -> u8 {
        match self {
            ProtocolFamily::Sccp => SCCP_MIN_VERSION,
            ProtocolFamily::Spcp => SPCP_VERSION,
        }
    }
}

impl fmt::Display for ProtocolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for ProtocolFamily {
    type Err = ProtocolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "sccp" | "skinny" => Ok(ProtocolFamily::Sccp),
            "spcp" | "spa" => Ok(ProtocolFamily::Spcp),
            _ => Err(ProtocolError::UnknownFamily(value.to_string())),
        }
    }
}

/// Highest version this implementation advertises for `family`.
pub fn max_supported_version(family: ProtocolFamily) -> u8 {
    match family {
        ProtocolFamily::Sccp => SCCP_MAX_VERSION,
        ProtocolFamily::Spcp => SPCP_VERSION,
    }
}
