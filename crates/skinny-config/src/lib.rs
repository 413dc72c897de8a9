//! Skinny server configuration.
//!
//! Every configurable object (the `[general]` settings, devices, lines and
//! softkey sets) is described by a static table of [`ConfigOption`]s. Each
//! option names a typed accessor into the object plus its flags, default
//! and change kind. The [`engine`] applies a section of a
//! [`ConfigSource`] to an object through that table, resolving inherited
//! defaults and reporting what changed. [`LiveRegistry`] keeps the running
//! configuration and swaps in reloads.
//!
//! ```
//! use skinny_config::{ConfigStore, LiveRegistry};
//!
//! let source = ConfigStore::parse("[general]\nservername = Lab\n").unwrap();
//! let registry = LiveRegistry::new();
//! registry.load(&source).unwrap();
//! assert_eq!(registry.global().read().servername, "Lab");
//! ```

pub mod option;

pub mod convert;
pub mod engine;
pub mod error;
pub mod feature;
pub mod list;
pub mod model;
pub mod registry;
pub mod reload;
pub mod softkey;
pub mod source;
mod tables;

pub use engine::{
    apply_configuration, apply_value, apply_values, ApplyContext, ApplyReport, Disposition,
    OptionOutcome, ValueOrigin,
};
pub use error::{ConfigError, Result};
pub use feature::{FeatureStatus, FeatureStore, MemoryFeatureStore, SystemMessage};
pub use list::LockedList;
pub use model::{ButtonConfig, ButtonKind, Device, GlobalConfig, Line};
pub use option::{
    Access, ChangeKind, ConfigOption, DataType, OptionFlags, OptionInfo, SegmentId, ValueChange,
};
pub use registry::{find_option, find_segment, find_typed, segments, Configurable, SegmentDescriptor};
pub use reload::{LiveRegistry, ReloadOutcome, ReloadPlan, Snapshot, Transition};
pub use softkey::{
    soft_key_template_response, KeyMode, SoftKeyLabel, SoftKeyMode, SoftKeySetBuilder,
    SoftKeySetConfiguration, SoftKeySetUpdate,
};
pub use source::{ConfigEntry, ConfigSource, ConfigStore, GENERAL_SECTION};
