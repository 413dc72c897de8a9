//! Skinny (SCCP/SPCP) server core.
//!
//! # Crate Structure
//!
//! - [`wire`]: envelope codec and the versioned message catalogue
//! - [`protocol`]: per-version outbound message descriptors
//! - [`config`]: option registry, reconciliation engine, softkey sets and reload

/// Re-export wire types.
pub mod wire {
    pub use skinny_wire::*;
}

/// Re-export protocol selection types.
pub mod protocol {
    pub use skinny_protocol::*;
}

/// Re-export configuration types.
pub mod config {
    pub use skinny_config::*;
}
