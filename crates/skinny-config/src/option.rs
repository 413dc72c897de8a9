use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::error::ConfigError;

/// Option segments, one per kind of configurable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentId {
    Global,
    Device,
    Line,
    SoftKey,
}

impl SegmentId {
    pub const ALL: [SegmentId; 4] = [
        SegmentId::Global,
        SegmentId::Device,
        SegmentId::Line,
        SegmentId::SoftKey,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SegmentId::Global => "global",
            SegmentId::Device => "device",
            SegmentId::Line => "line",
            SegmentId::SoftKey => "softkey",
        }
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentId {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "global" | "general" => Ok(SegmentId::Global),
            "device" => Ok(SegmentId::Device),
            "line" => Ok(SegmentId::Line),
            "softkey" | "softkeyset" => Ok(SegmentId::SoftKey),
            _ => Err(ConfigError::UnknownSegment(value.to_string())),
        }
    }
}

/// Handling flags of a configuration option.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionFlags(u16);

impl OptionFlags {
    pub const NONE: Self = Self(0);
    /// Accepted and skipped.
    pub const IGNORE: Self = Self(1 << 0);
    /// Still applied, with a notice.
    pub const DEPRECATED: Self = Self(1 << 1);
    /// Skipped with a warning.
    pub const OBSOLETE: Self = Self(1 << 2);
    /// Semantics changed between releases; applied with a notice.
    pub const CHANGED: Self = Self(1 << 3);
    /// Must resolve to a non-empty value.
    pub const REQUIRED: Self = Self(1 << 4);
    /// Default comes from the owning device first.
    pub const DEVICE_DEFAULT: Self = Self(1 << 5);
    /// Default comes from `[general]` first.
    pub const GLOBAL_DEFAULT: Self = Self(1 << 6);

    const NAMES: [(Self, &'static str); 7] = [
        (Self::IGNORE, "ignore"),
        (Self::DEPRECATED, "deprecated"),
        (Self::OBSOLETE, "obsolete"),
        (Self::CHANGED, "changed"),
        (Self::REQUIRED, "required"),
        (Self::DEVICE_DEFAULT, "device-default"),
        (Self::GLOBAL_DEFAULT, "global-default"),
    ];

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn names(self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for OptionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for OptionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        f.write_str(&self.names().join("|"))
    }
}

impl Serialize for OptionFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names = self.names();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

/// What a changed value means for a registered device.
///
/// Combining kinds with `|` keeps the strongest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    #[default]
    NoUpdateNeeded,
    NeedsDeviceReset,
}

impl ChangeKind {
    pub fn needs_reset(self) -> bool {
        self == ChangeKind::NeedsDeviceReset
    }
}

impl BitOr for ChangeKind {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.max(rhs)
    }
}

impl BitOrAssign for ChangeKind {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Result of applying one value to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueChange {
    NoChange,
    Changed,
    Invalid,
}

impl ValueChange {
    /// `Changed` when `changed` holds, `NoChange` otherwise.
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            ValueChange::Changed
        } else {
            ValueChange::NoChange
        }
    }
}

/// Storage kind of an option, as exposed by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataType {
    Boolean,
    Int,
    Char,
    String { size: usize },
    StringPtr,
    Generic,
    List { group: &'static str },
    None,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => f.write_str("boolean"),
            DataType::Int => f.write_str("int"),
            DataType::Char => f.write_str("char"),
            DataType::String { size } => write!(f, "string({size})"),
            DataType::StringPtr => f.write_str("string-ptr"),
            DataType::Generic => f.write_str("generic"),
            DataType::List { group } => write!(f, "list({group})"),
            DataType::None => f.write_str("none"),
        }
    }
}

/// Integer field of either signedness.
pub enum IntRef<'a> {
    I32(&'a mut i32),
    U32(&'a mut u32),
}

/// One supplied or defaulted value handed to a list rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub value: String,
    pub lineno: usize,
}

/// Outcome of rebuilding a list field from the values of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOutcome {
    pub changed: bool,
    /// Positions of entries that could not be applied.
    pub invalid: Vec<usize>,
}

/// Typed accessor from a configurable object to the field an option sets.
pub enum Access<T: 'static> {
    Bool(fn(&mut T) -> &mut bool),
    Int(fn(&mut T) -> IntRef<'_>),
    Char(fn(&mut T) -> &mut char),
    Str {
        field: fn(&mut T) -> &mut String,
        size: usize,
    },
    StrPtr(fn(&mut T) -> &mut Option<String>),
    /// Field-specific converter.
    Generic(fn(&mut T, &str) -> ValueChange),
    /// Options sharing a `group` feed one list, rebuilt once per pass.
    List {
        group: &'static str,
        rebuild: fn(&mut T, &[ListEntry]) -> ListOutcome,
    },
    /// Accepted but stored nowhere.
    None,
}

impl<T> Access<T> {
    pub fn data_type(&self) -> DataType {
        match self {
            Access::Bool(_) => DataType::Boolean,
            Access::Int(_) => DataType::Int,
            Access::Char(_) => DataType::Char,
            Access::Str { size, .. } => DataType::String { size: *size },
            Access::StrPtr(_) => DataType::StringPtr,
            Access::Generic(_) => DataType::Generic,
            Access::List { group, .. } => DataType::List { group },
            Access::None => DataType::None,
        }
    }
}

/// A named, typed, flagged setting of one segment.
pub struct ConfigOption<T: 'static> {
    pub name: &'static str,
    pub access: Access<T>,
    pub flags: OptionFlags,
    pub change: ChangeKind,
    /// Compiled default; empty means none.
    pub default: &'static str,
    pub description: &'static str,
}

impl<T> ConfigOption<T> {
    pub const fn new(
        name: &'static str,
        access: Access<T>,
        flags: OptionFlags,
        change: ChangeKind,
        default: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            access,
            flags,
            change,
            default,
            description,
        }
    }

    pub fn info(&self) -> OptionInfo {
        OptionInfo {
            name: self.name,
            data_type: self.access.data_type(),
            flags: self.flags,
            change: self.change,
            default: self.default,
            description: self.description,
        }
    }

    pub fn list_group(&self) -> Option<&'static str> {
        match self.access {
            Access::List { group, .. } => Some(group),
            _ => None,
        }
    }
}

/// Type-erased description of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionInfo {
    pub name: &'static str,
    pub data_type: DataType,
    pub flags: OptionFlags,
    pub change: ChangeKind,
    pub default: &'static str,
    pub description: &'static str,
}

/// Build an [`Access`] for a field path of a configurable type.
///
/// Each arm defines a small named function so the accessor coerces to a
/// plain `fn` pointer usable in `static` option tables.
#[macro_export]
macro_rules! access {
    (bool, $ty:ty, $($field:ident).+) => {
        $crate::option::Access::Bool({
            fn field(object: &mut $ty) -> &mut bool {
                &mut object.$($field).+
            }
            field
        })
    };
    (char, $ty:ty, $($field:ident).+) => {
        $crate::option::Access::Char({
            fn field(object: &mut $ty) -> &mut char {
                &mut object.$($field).+
            }
            field
        })
    };
    (i32, $ty:ty, $($field:ident).+) => {
        $crate::option::Access::Int({
            fn field(object: &mut $ty) -> $crate::option::IntRef<'_> {
                $crate::option::IntRef::I32(&mut object.$($field).+)
            }
            field
        })
    };
    (u32, $ty:ty, $($field:ident).+) => {
        $crate::option::Access::Int({
            fn field(object: &mut $ty) -> $crate::option::IntRef<'_> {
                $crate::option::IntRef::U32(&mut object.$($field).+)
            }
            field
        })
    };
    (str $size:expr, $ty:ty, $($field:ident).+) => {
        $crate::option::Access::Str {
            field: {
                fn field(object: &mut $ty) -> &mut String {
                    &mut object.$($field).+
                }
                field
            },
            size: $size,
        }
    };
    (strptr, $ty:ty, $($field:ident).+) => {
        $crate::option::Access::StrPtr({
            fn field(object: &mut $ty) -> &mut Option<String> {
                &mut object.$($field).+
            }
            field
        })
    };
    (generic $convert:path, $ty:ty, $($field:ident).+) => {
        $crate::option::Access::Generic({
            fn apply(object: &mut $ty, value: &str) -> $crate::option::ValueChange {
                $convert(&mut object.$($field).+, value)
            }
            apply
        })
    };
    (list $group:literal $rebuild:path, $ty:ty, $($field:ident).+) => {
        $crate::option::Access::List {
            group: $group,
            rebuild: {
                fn rebuild(
                    object: &mut $ty,
                    entries: &[$crate::option::ListEntry],
                ) -> $crate::option::ListOutcome {
                    $rebuild(&object.$($field).+, entries)
                }
                rebuild
            },
        }
    };
}
