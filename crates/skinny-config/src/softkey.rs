//! Softkey sets: which labelled keys a phone shows in each call state.

use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use skinny_wire::messages::{
    SoftKeySetRes, SoftKeyTemplateRes, StationSoftKeyDefinition, StationSoftKeySetDefinition,
    MAX_SOFT_KEY_DEFINITION, MAX_SOFT_KEY_INDEX,
};
use skinny_wire::FixedStr;
use tracing::debug;

use crate::engine::{apply_values, ApplyReport};
use crate::option::ValueChange;
use crate::source::ConfigEntry;

/// Keys one mode can hold, the slot count of a `SoftKeySetRes` entry.
pub const MAX_KEYS_PER_MODE: usize = MAX_SOFT_KEY_INDEX;

/// First info index the phones expect for template entries.
const INFO_INDEX_BASE: u16 = 301;

macro_rules! labels {
    ($($variant:ident = $id:literal, $config:literal, $text:literal;)+) => {
        /// Softkey labels, by their wire event id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(u8)]
        pub enum SoftKeyLabel {
            #[default]
            Empty = 0,
            $($variant = $id,)+
        }

        impl SoftKeyLabel {
            const NAMED: &'static [SoftKeyLabel] = &[$(SoftKeyLabel::$variant),+];

            /// Name used in softkey set configuration.
            pub fn config_name(self) -> &'static str {
                match self {
                    SoftKeyLabel::Empty => "empty",
                    $(SoftKeyLabel::$variant => $config,)+
                }
            }

            pub fn text(self) -> &'static str {
                match self {
                    SoftKeyLabel::Empty => "",
                    $(SoftKeyLabel::$variant => $text,)+
                }
            }
        }
    };
}

labels! {
    Redial = 1, "redial", "Redial";
    NewCall = 2, "newcall", "NewCall";
    Hold = 3, "hold", "Hold";
    Transfer = 4, "transfer", "Transfer";
    CfwdAll = 5, "cfwdall", "CFwdALL";
    CfwdBusy = 6, "cfwdbusy", "CFwdBusy";
    CfwdNoAnswer = 7, "cfwdnoanswer", "CFwdNoAnswer";
    Backspace = 8, "back", "<<";
    EndCall = 9, "endcall", "EndCall";
    Resume = 10, "resume", "Resume";
    Answer = 11, "answer", "Answer";
    Info = 12, "info", "Info";
    Confrn = 13, "conf", "Confrn";
    Park = 14, "park", "Park";
    Join = 15, "join", "Join";
    MeetMe = 16, "meetme", "MeetMe";
    Pickup = 17, "pickup", "PickUp";
    GPickup = 18, "gpickup", "GPickUp";
    RmLstC = 19, "rmlstc", "RmLstC";
    Callback = 20, "callback", "CallBack";
    Barge = 21, "barge", "Barge";
    Dnd = 22, "dnd", "DND";
    ConfList = 23, "conflist", "ConfList";
    Select = 24, "select", "Select";
    Private = 25, "private", "Private";
    TransferVm = 26, "transvm", "TrnsfVM";
    DirTrfr = 27, "dirtrfr", "DirTrfr";
    IDivert = 28, "idivert", "iDivert";
    VideoMode = 29, "vidmode", "VideoMode";
    Intercept = 30, "intrcpt", "Intrcpt";
    Dial = 31, "dial", "Dial";
}

/// Order of labels in the softkey template sent to phones.
pub const TEMPLATE: [SoftKeyLabel; MAX_SOFT_KEY_DEFINITION] = [
    SoftKeyLabel::Redial,
    SoftKeyLabel::NewCall,
    SoftKeyLabel::Hold,
    SoftKeyLabel::Transfer,
    SoftKeyLabel::CfwdAll,
    SoftKeyLabel::CfwdBusy,
    SoftKeyLabel::CfwdNoAnswer,
    SoftKeyLabel::Backspace,
    SoftKeyLabel::EndCall,
    SoftKeyLabel::Resume,
    SoftKeyLabel::Answer,
    SoftKeyLabel::Info,
    SoftKeyLabel::Confrn,
    SoftKeyLabel::Park,
    SoftKeyLabel::Join,
    SoftKeyLabel::MeetMe,
    SoftKeyLabel::Pickup,
    SoftKeyLabel::GPickup,
    SoftKeyLabel::RmLstC,
    SoftKeyLabel::Callback,
    SoftKeyLabel::Barge,
    SoftKeyLabel::Dnd,
    SoftKeyLabel::ConfList,
    SoftKeyLabel::Select,
    SoftKeyLabel::Private,
    SoftKeyLabel::TransferVm,
    SoftKeyLabel::DirTrfr,
    SoftKeyLabel::IDivert,
    SoftKeyLabel::VideoMode,
    SoftKeyLabel::Intercept,
    SoftKeyLabel::Empty,
    SoftKeyLabel::Dial,
];

impl SoftKeyLabel {
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Case-insensitive lookup by configuration name.
    pub fn from_config_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("empty") {
            return Some(SoftKeyLabel::Empty);
        }
        Self::NAMED
            .iter()
            .copied()
            .find(|label| label.config_name().eq_ignore_ascii_case(name))
    }

    /// Zero-based slot of the label in [`TEMPLATE`].
    pub fn template_position(self) -> usize {
        TEMPLATE
            .iter()
            .position(|label| *label == self)
            .unwrap_or(TEMPLATE.len() - 1)
    }
}

impl fmt::Display for SoftKeyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

/// Call states a phone selects a softkey row for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    OnHook = 0,
    Connected = 1,
    OnHold = 2,
    RingIn = 3,
    OffHook = 4,
    ConnTrans = 5,
    DigitsFollowing = 6,
    ConnConf = 7,
    RingOut = 8,
    OffHookFeatures = 9,
    InUseHint = 10,
    OnHookStealable = 11,
}

pub const KEY_MODE_COUNT: usize = 12;

impl KeyMode {
    pub const ALL: [KeyMode; KEY_MODE_COUNT] = [
        KeyMode::OnHook,
        KeyMode::Connected,
        KeyMode::OnHold,
        KeyMode::RingIn,
        KeyMode::OffHook,
        KeyMode::ConnTrans,
        KeyMode::DigitsFollowing,
        KeyMode::ConnConf,
        KeyMode::RingOut,
        KeyMode::OffHookFeatures,
        KeyMode::InUseHint,
        KeyMode::OnHookStealable,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub const fn config_name(self) -> &'static str {
        match self {
            KeyMode::OnHook => "onhook",
            KeyMode::Connected => "connected",
            KeyMode::OnHold => "onhold",
            KeyMode::RingIn => "ringin",
            KeyMode::OffHook => "offhook",
            KeyMode::ConnTrans => "conntrans",
            KeyMode::DigitsFollowing => "digitsfoll",
            KeyMode::ConnConf => "connconf",
            KeyMode::RingOut => "ringout",
            KeyMode::OffHookFeatures => "offhookfeat",
            KeyMode::InUseHint => "onhint",
            KeyMode::OnHookStealable => "onstealable",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            KeyMode::OnHook => "On Hook",
            KeyMode::Connected => "Connected",
            KeyMode::OnHold => "On Hold",
            KeyMode::RingIn => "Ringin",
            KeyMode::OffHook => "Off Hook",
            KeyMode::ConnTrans => "Connected with Transfer",
            KeyMode::DigitsFollowing => "Digits after dialing first digit",
            KeyMode::ConnConf => "Connected with Conference",
            KeyMode::RingOut => "Ring Out",
            KeyMode::OffHookFeatures => "Off Hook with Features",
            KeyMode::InUseHint => "In Use Hint",
            KeyMode::OnHookStealable => "On Hook with Stealable Remote Call",
        }
    }

    /// Key modes a softkey set section may define. The stealable row only
    /// comes from the built-in set.
    pub const CONFIGURABLE: [KeyMode; KEY_MODE_COUNT - 1] = [
        KeyMode::OnHook,
        KeyMode::Connected,
        KeyMode::OnHold,
        KeyMode::RingIn,
        KeyMode::OffHook,
        KeyMode::ConnTrans,
        KeyMode::DigitsFollowing,
        KeyMode::ConnConf,
        KeyMode::RingOut,
        KeyMode::OffHookFeatures,
        KeyMode::InUseHint,
    ];

    pub fn from_config_name(name: &str) -> Option<Self> {
        Self::CONFIGURABLE
            .iter()
            .copied()
            .find(|mode| mode.config_name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Labels of one key mode, at most [`MAX_KEYS_PER_MODE`].
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct SoftKeyMode {
    labels: [SoftKeyLabel; MAX_KEYS_PER_MODE],
    count: usize,
}

impl SoftKeyMode {
    /// Keys past the capacity are dropped.
    pub fn from_labels(labels: &[SoftKeyLabel]) -> Self {
        let mut mode = Self::default();
        for label in labels.iter().take(MAX_KEYS_PER_MODE) {
            mode.labels[mode.count] = *label;
            mode.count += 1;
        }
        mode
    }

    /// Comma-separated configuration names. Unknown and blank names become
    /// empty keys so the remaining keys keep their positions.
    pub fn parse(value: &str) -> Self {
        if value.trim().is_empty() {
            return Self::default();
        }
        let labels: Vec<SoftKeyLabel> = value
            .split(',')
            .map(str::trim)
            .map(|name| SoftKeyLabel::from_config_name(name).unwrap_or(SoftKeyLabel::Empty))
            .collect();
        Self::from_labels(&labels)
    }

    pub fn labels(&self) -> &[SoftKeyLabel] {
        &self.labels[..self.count]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl fmt::Debug for SoftKeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.labels()).finish()
    }
}

impl Serialize for SoftKeyMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.count))?;
        for label in self.labels() {
            seq.serialize_element(label.config_name())?;
        }
        seq.end()
    }
}

/// A named softkey set: one label row per key mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftKeySetConfiguration {
    pub name: String,
    pub modes: [SoftKeyMode; KEY_MODE_COUNT],
}

impl SoftKeySetConfiguration {
    /// Name of the compiled default set.
    pub const DEFAULT_NAME: &'static str = "default";

    /// A set with every mode empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modes: [SoftKeyMode::default(); KEY_MODE_COUNT],
        }
    }

    /// The set used by devices that do not name one.
    pub fn builtin_default() -> Self {
        use SoftKeyLabel::*;

        let mut set = Self::new(Self::DEFAULT_NAME);
        let rows: [(KeyMode, &[SoftKeyLabel]); KEY_MODE_COUNT] = [
            (KeyMode::OnHook, &[Redial, NewCall, CfwdAll, Dnd, Pickup, GPickup]),
            (KeyMode::Connected, &[Hold, EndCall, Park, Select, CfwdAll, CfwdBusy, IDivert]),
            (
                KeyMode::OnHold,
                &[Resume, EndCall, NewCall, Transfer, ConfList, Select, DirTrfr, IDivert],
            ),
            (KeyMode::RingIn, &[Answer, EndCall, TransferVm, IDivert]),
            (
                KeyMode::OffHook,
                &[Redial, EndCall, Private, CfwdAll, CfwdBusy, Pickup, GPickup, MeetMe, Barge],
            ),
            (
                KeyMode::ConnTrans,
                &[
                    Hold, EndCall, Transfer, Confrn, Park, Select, DirTrfr, CfwdAll, CfwdBusy,
                    VideoMode,
                ],
            ),
            (KeyMode::DigitsFollowing, &[Backspace, EndCall, Dial]),
            (KeyMode::ConnConf, &[Hold, EndCall, Join]),
            (KeyMode::RingOut, &[Empty, EndCall, Transfer, CfwdAll, IDivert]),
            (KeyMode::OffHookFeatures, &[Redial, EndCall]),
            (KeyMode::InUseHint, &[NewCall, Pickup, Barge]),
            (
                KeyMode::OnHookStealable,
                &[Redial, NewCall, CfwdAll, Pickup, GPickup, Dnd, Intercept],
            ),
        ];
        for (mode, labels) in rows {
            set.modes[mode.index()] = SoftKeyMode::from_labels(labels);
        }
        set
    }

    pub fn mode(&self, mode: KeyMode) -> &SoftKeyMode {
        &self.modes[mode.index()]
    }

    /// Replace one mode from its configuration value.
    pub fn assign_mode(&mut self, mode: KeyMode, value: &str) -> ValueChange {
        let parsed = SoftKeyMode::parse(value);
        let slot = &mut self.modes[mode.index()];
        if *slot == parsed {
            return ValueChange::NoChange;
        }
        *slot = parsed;
        ValueChange::Changed
    }

    /// The `SoftKeySetRes` describing this set.
    ///
    /// Each key refers to its label's slot in [`TEMPLATE`].
    pub fn soft_key_set_response(&self) -> SoftKeySetRes {
        let mut response = SoftKeySetRes {
            offset: 0,
            count: KEY_MODE_COUNT as u32,
            total: KEY_MODE_COUNT as u32,
            ..SoftKeySetRes::default()
        };
        for (mode, definition) in self.modes.iter().zip(response.definition.iter_mut()) {
            *definition = StationSoftKeySetDefinition::default();
            for (slot, label) in mode.labels().iter().enumerate() {
                let position = label.template_position();
                definition.template_index[slot] = (position + 1) as u8;
                definition.info_index[slot] = INFO_INDEX_BASE + position as u16;
            }
        }
        response
    }
}

impl Default for SoftKeySetConfiguration {
    fn default() -> Self {
        Self::builtin_default()
    }
}

impl Serialize for SoftKeySetConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(KEY_MODE_COUNT + 1))?;
        map.serialize_entry("name", &self.name)?;
        for mode in KeyMode::ALL {
            map.serialize_entry(mode.config_name(), self.mode(mode))?;
        }
        map.end()
    }
}

/// The `SoftKeyTemplateRes` listing every label in template order.
pub fn soft_key_template_response() -> SoftKeyTemplateRes {
    let mut response = SoftKeyTemplateRes {
        offset: 0,
        count: TEMPLATE.len() as u32,
        total: TEMPLATE.len() as u32,
        ..SoftKeyTemplateRes::default()
    };
    for (label, definition) in TEMPLATE.iter().zip(response.definition.iter_mut()) {
        *definition = StationSoftKeyDefinition {
            label: FixedStr::new(label.text()),
            event: u32::from(label.id()),
        };
    }
    response
}

/// Result of building one softkey set section.
#[derive(Debug, Clone)]
pub struct SoftKeySetUpdate {
    pub name: String,
    /// No set with this name existed before.
    pub created: bool,
    pub report: ApplyReport,
}

impl SoftKeySetUpdate {
    pub fn changed(&self) -> bool {
        self.created || self.report.changed()
    }
}

/// Builds softkey sets from `type = softkeyset` sections.
///
/// A section naming an existing set (case-insensitive) updates it in place:
/// only the modes present in the section are replaced.
#[derive(Debug, Clone, Default)]
pub struct SoftKeySetBuilder {
    sets: Vec<SoftKeySetConfiguration>,
}

impl SoftKeySetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sets(sets: Vec<SoftKeySetConfiguration>) -> Self {
        Self { sets }
    }

    pub fn build_set(&mut self, name: &str, entries: &[ConfigEntry]) -> SoftKeySetUpdate {
        let existing = self
            .sets
            .iter()
            .position(|set| set.name.eq_ignore_ascii_case(name));
        let created = existing.is_none();
        let index = match existing {
            Some(index) => index,
            None => {
                self.sets.push(SoftKeySetConfiguration::new(name));
                self.sets.len() - 1
            }
        };

        let report = apply_values(&mut self.sets[index], name, entries);
        debug!(set = name, created, changed = report.changed(), "built softkey set");
        SoftKeySetUpdate {
            name: self.sets[index].name.clone(),
            created,
            report,
        }
    }

    pub fn find(&self, name: &str) -> Option<&SoftKeySetConfiguration> {
        self.sets.iter().find(|set| set.name.eq_ignore_ascii_case(name))
    }

    pub fn sets(&self) -> &[SoftKeySetConfiguration] {
        &self.sets
    }

    pub fn into_sets(self) -> Vec<SoftKeySetConfiguration> {
        self.sets
    }
}
