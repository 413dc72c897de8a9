use std::fmt;

use crate::model::{Device, GlobalConfig, Line};
use crate::option::{ConfigOption, OptionInfo, SegmentId};
use crate::softkey::SoftKeySetConfiguration;

/// An object configured through a static option table.
pub trait Configurable: Sized + 'static {
    const SEGMENT: SegmentId;

    fn options() -> &'static [ConfigOption<Self>];
}

/// Read-only view of one segment's option table.
#[derive(Clone, Copy)]
pub struct SegmentDescriptor {
    pub id: SegmentId,
    /// Section name or `type` value the segment is configured from.
    pub section: &'static str,
    options: fn() -> Vec<OptionInfo>,
    find: fn(&str) -> Option<OptionInfo>,
}

impl SegmentDescriptor {
    pub fn options(&self) -> Vec<OptionInfo> {
        (self.options)()
    }

    pub fn find(&self, name: &str) -> Option<OptionInfo> {
        (self.find)(name)
    }
}

impl fmt::Debug for SegmentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentDescriptor")
            .field("id", &self.id)
            .field("section", &self.section)
            .finish()
    }
}

fn infos_of<T: Configurable>() -> Vec<OptionInfo> {
    T::options().iter().map(ConfigOption::info).collect()
}

fn find_info_of<T: Configurable>(name: &str) -> Option<OptionInfo> {
    find_typed::<T>(name).map(ConfigOption::info)
}

static SEGMENTS: [SegmentDescriptor; 4] = [
    SegmentDescriptor {
        id: SegmentId::Global,
        section: "general",
        options: infos_of::<GlobalConfig>,
        find: find_info_of::<GlobalConfig>,
    },
    SegmentDescriptor {
        id: SegmentId::Device,
        section: "device",
        options: infos_of::<Device>,
        find: find_info_of::<Device>,
    },
    SegmentDescriptor {
        id: SegmentId::Line,
        section: "line",
        options: infos_of::<Line>,
        find: find_info_of::<Line>,
    },
    SegmentDescriptor {
        id: SegmentId::SoftKey,
        section: "softkeyset",
        options: infos_of::<SoftKeySetConfiguration>,
        find: find_info_of::<SoftKeySetConfiguration>,
    },
];

pub fn segments() -> &'static [SegmentDescriptor] {
    &SEGMENTS
}

pub fn find_segment(id: SegmentId) -> &'static SegmentDescriptor {
    match id {
        SegmentId::Global => &SEGMENTS[0],
        SegmentId::Device => &SEGMENTS[1],
        SegmentId::Line => &SEGMENTS[2],
        SegmentId::SoftKey => &SEGMENTS[3],
    }
}

/// Option `name` of a segment, case-insensitive.
///
/// When a table lists a name twice the first entry wins.
pub fn find_option(segment: SegmentId, name: &str) -> Option<OptionInfo> {
    find_segment(segment).find(name)
}

/// Typed option of `T`, for callers that apply values.
pub fn find_typed<T: Configurable>(name: &str) -> Option<&'static ConfigOption<T>> {
    T::options()
        .iter()
        .find(|option| option.name.eq_ignore_ascii_case(name))
}
