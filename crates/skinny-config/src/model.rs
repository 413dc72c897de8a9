//! Configurable objects and the value types their options store.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

use serde::Serialize;

use crate::feature::FeatureStatus;
use crate::list::LockedList;

/// Port the server listens on when `port` is not configured.
pub const DEFAULT_PORT: u16 = 2000;

/// Server-wide settings from the `[general]` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalConfig {
    pub servername: String,
    pub keepalive: u32,
    pub debug: DebugCategories,
    pub context: String,
    pub dateformat: String,
    pub bindaddr: SocketAddrV4,
    pub codecs: LockedList<Codec>,
    pub ha: LockedList<AclRule>,
    pub localnet: LockedList<AclRule>,
    pub quality_over_size: bool,
    pub externip: Option<Ipv4Addr>,
    pub externhost: String,
    pub externrefresh: u8,
    pub firstdigittimeout: u8,
    pub digittimeout: u8,
    pub digittimeoutchar: char,
    pub recorddigittimeoutchar: bool,
    pub simulate_enbloc: bool,
    pub autoanswer_ring_time: u8,
    pub autoanswer_tone: u8,
    pub remotehangup_tone: u8,
    pub transfer_tone: u8,
    pub callwaiting_tone: u8,
    pub musicclass: String,
    pub language: String,
    pub callevents: bool,
    pub accountcode: String,
    pub sccp_tos: u8,
    pub sccp_cos: u8,
    pub audio_tos: u8,
    pub audio_cos: u8,
    pub video_tos: u8,
    pub video_cos: u8,
    pub echocancel: bool,
    pub silencesuppression: bool,
    pub trustphoneip: bool,
    pub earlyrtp: EarlyRtp,
    pub dnd: DndMode,
    pub private: bool,
    pub mwilamp: LampMode,
    pub mwioncall: bool,
    pub blindtransferindication: BlindTransferIndication,
    pub cfwdall: bool,
    pub cfwdbusy: bool,
    pub cfwdnoanswer: bool,
    pub nat: bool,
    pub directrtp: bool,
    pub allowoverlap: bool,
    pub callgroup: u64,
    pub pickupgroup: u64,
    pub pickupmodeanswer: bool,
    pub amaflags: AmaFlags,
    pub callanswerorder: CallAnswerOrder,
    pub regcontext: String,
    pub devicetable: String,
    pub linetable: String,
    pub meetme: bool,
    pub meetmeopts: String,
    pub hotline_enabled: bool,
    pub fallback: String,
    pub backoff_time: u32,
}

impl Default for GlobalConfig {
    /// The compiled defaults of the global option table.
    fn default() -> Self {
        Self {
            servername: "Asterisk".to_string(),
            keepalive: 60,
            debug: DebugCategories::CORE,
            context: "sccp".to_string(),
            dateformat: "D.M.Y".to_string(),
            bindaddr: SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_PORT),
            codecs: LockedList::new(),
            ha: LockedList::from_vec(default_acl()),
            localnet: LockedList::new(),
            quality_over_size: true,
            externip: None,
            externhost: String::new(),
            externrefresh: 60,
            firstdigittimeout: 16,
            digittimeout: 8,
            digittimeoutchar: '#',
            recorddigittimeoutchar: false,
            simulate_enbloc: true,
            autoanswer_ring_time: 1,
            autoanswer_tone: 0x32,
            remotehangup_tone: 0x32,
            transfer_tone: 0,
            callwaiting_tone: 0x2d,
            musicclass: "default".to_string(),
            language: "en".to_string(),
            callevents: true,
            accountcode: "skinny".to_string(),
            sccp_tos: 0x68,
            sccp_cos: 4,
            audio_tos: 0xB8,
            audio_cos: 6,
            video_tos: 0x88,
            video_cos: 5,
            echocancel: true,
            silencesuppression: false,
            trustphoneip: false,
            earlyrtp: EarlyRtp::Progress,
            dnd: DndMode::Reject,
            private: true,
            mwilamp: LampMode::On,
            mwioncall: false,
            blindtransferindication: BlindTransferIndication::Ring,
            cfwdall: true,
            cfwdbusy: true,
            cfwdnoanswer: true,
            nat: false,
            directrtp: false,
            allowoverlap: false,
            callgroup: 0,
            pickupgroup: 0,
            pickupmodeanswer: false,
            amaflags: AmaFlags::Default,
            callanswerorder: CallAnswerOrder::OldestFirst,
            regcontext: "sccpregistration".to_string(),
            devicetable: "sccpdevice".to_string(),
            linetable: "sccpline".to_string(),
            meetme: true,
            meetmeopts: "qxd".to_string(),
            hotline_enabled: false,
            fallback: "false".to_string(),
            backoff_time: 60,
        }
    }
}

/// `deny = 0.0.0.0/0.0.0.0` followed by `permit = internal`.
fn default_acl() -> Vec<AclRule> {
    let mut rules = vec![AclRule::deny_all()];
    rules.extend(AclRule::internal());
    rules
}

/// A phone, from a `type = device` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Device {
    /// Section name, usually `SEP` + MAC address.
    pub id: String,
    pub description: String,
    pub devicetype: String,
    pub keepalive: u32,
    pub tzoffset: i32,
    pub codecs: LockedList<Codec>,
    pub transfer: bool,
    pub park: bool,
    pub cfwdall: bool,
    pub cfwdbusy: bool,
    pub cfwdnoanswer: bool,
    pub dnd_feature: bool,
    pub dtmfmode: DtmfMode,
    pub imageversion: String,
    pub ha: LockedList<AclRule>,
    pub audio_tos: u8,
    pub audio_cos: u8,
    pub video_tos: u8,
    pub video_cos: u8,
    pub trustphoneip: bool,
    pub nat: bool,
    pub directrtp: bool,
    pub earlyrtp: EarlyRtp,
    pub private: bool,
    pub privacy: PrivacyFeature,
    pub mwilamp: LampMode,
    pub mwioncall: bool,
    pub meetme: bool,
    pub meetmeopts: String,
    pub softkeyset: String,
    pub use_redial_menu: bool,
    pub pickupexten: bool,
    pub pickupcontext: String,
    pub pickupmodeanswer: bool,
    pub monitor: bool,
    pub allowoverlap: bool,
    pub variables: LockedList<Variable>,
    pub permithosts: LockedList<String>,
    pub addons: LockedList<Addon>,
    pub buttons: LockedList<ButtonConfig>,
    pub digittimeout: u8,
    /// Runtime feature state, restored from the feature store.
    #[serde(skip)]
    pub status: FeatureStatus,
}

impl Device {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Names of the lines this device's buttons are bound to.
    pub fn line_names(&self) -> Vec<String> {
        self.buttons.read(|buttons| {
            buttons
                .iter()
                .filter_map(|button| button.line_name().map(str::to_string))
                .collect()
        })
    }
}

/// A directory number, from a `type = line` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    /// Section name.
    pub name: String,
    pub id: String,
    pub pin: String,
    pub label: String,
    pub description: String,
    pub context: String,
    pub cid_name: String,
    pub cid_num: String,
    pub default_subscription_name: String,
    pub default_subscription_number: String,
    pub mailboxes: LockedList<Mailbox>,
    pub vmnum: String,
    pub adhoc_number: String,
    pub meetme: bool,
    pub meetmenum: String,
    pub meetmeopts: String,
    pub transfer: bool,
    pub incominglimit: u32,
    pub echocancel: bool,
    pub silencesuppression: bool,
    pub language: String,
    pub musicclass: String,
    pub accountcode: String,
    pub amaflags: AmaFlags,
    pub callgroup: u64,
    pub pickupgroup: u64,
    pub trnsfvm: Option<String>,
    pub secondary_dialtone_digits: String,
    pub secondary_dialtone_tone: u32,
    pub variables: LockedList<Variable>,
    pub dnd: DndMode,
    pub regexten: String,
}

impl Line {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Case-insensitive keyword lookup.
            pub fn from_keyword(value: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value.trim()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Do-not-disturb behaviour.
    pub enum DndMode {
        Off => "off",
        Reject => "reject",
        Silent => "silent",
        User => "user",
    }
    default = Off;
}

keyword_enum! {
    /// When the media path is opened before answer.
    pub enum EarlyRtp {
        None => "none",
        Offhook => "offhook",
        Dial => "dial",
        Ringout => "ringout",
        Progress => "progress",
    }
    default = None;
}

keyword_enum! {
    pub enum DtmfMode {
        Inband => "inband",
        OutOfBand => "outofband",
    }
    default = Inband;
}

keyword_enum! {
    /// Message-waiting lamp pattern.
    pub enum LampMode {
        Off => "off",
        On => "on",
        Wink => "wink",
        Flash => "flash",
        Blink => "blink",
    }
    default = Off;
}

keyword_enum! {
    pub enum BlindTransferIndication {
        Moh => "moh",
        Ring => "ring",
    }
    default = Moh;
}

keyword_enum! {
    pub enum CallAnswerOrder {
        OldestFirst => "oldestfirst",
        LastFirst => "lastfirst",
    }
    default = OldestFirst;
}

keyword_enum! {
    /// CDR account flags.
    pub enum AmaFlags {
        Default => "default",
        Omit => "omit",
        Billing => "billing",
        Documentation => "documentation",
    }
    default = Default;
}

keyword_enum! {
    /// Expansion modules a device can carry.
    pub enum Addon {
        Addon7914 => "7914",
        Addon7915 => "7915",
        Addon7916 => "7916",
    }
    default = Addon7914;
}

keyword_enum! {
    pub enum Codec {
        Alaw => "alaw",
        Ulaw => "ulaw",
        G722 => "g722",
        G723 => "g723",
        G726 => "g726",
        G729 => "g729",
        Gsm => "gsm",
        Ilbc => "ilbc",
        Speex => "speex",
        Slin => "slin",
        H261 => "h261",
        H263 => "h263",
        H264 => "h264",
    }
    default = Ulaw;
}

/// Privacy feature: `enabled` offers the softkey, `status` is the
/// permanent setting (`full` privacy).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrivacyFeature {
    pub enabled: bool,
    pub status: u32,
}

/// Bitmask of enabled debug categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DebugCategories(pub u32);

impl DebugCategories {
    pub const NONE: Self = Self(0);
    pub const CORE: Self = Self(1);

    pub const NAMES: [&'static str; 20] = [
        "core",
        "sccp",
        "hint",
        "rtp",
        "device",
        "line",
        "action",
        "channel",
        "cli",
        "config",
        "feature",
        "feature_button",
        "softkey",
        "indicate",
        "pbx",
        "socket",
        "mwi",
        "event",
        "conference",
        "buttontemplate",
    ];

    pub const ALL: Self = Self((1 << Self::NAMES.len()) - 1);

    pub fn category(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
            .map(|bit| Self(1 << bit))
    }

    pub fn names(self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .enumerate()
            .filter(|(bit, _)| self.0 & (1 << bit) != 0)
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Serialize for DebugCategories {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names().serialize(serializer)
    }
}

/// One `permit`/`deny` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AclRule {
    pub permit: bool,
    pub network: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

impl AclRule {
    pub fn deny_all() -> Self {
        Self {
            permit: false,
            network: Ipv4Addr::UNSPECIFIED,
            netmask: Ipv4Addr::UNSPECIFIED,
        }
    }

    /// Private address ranges granted by `permit = internal`.
    pub fn internal() -> [AclRule; 3] {
        let rule = |network: [u8; 4], netmask: [u8; 4]| AclRule {
            permit: true,
            network: Ipv4Addr::from(network),
            netmask: Ipv4Addr::from(netmask),
        };
        [
            rule([10, 0, 0, 0], [255, 0, 0, 0]),
            rule([172, 16, 0, 0], [255, 224, 0, 0]),
            rule([192, 168, 1, 0], [255, 255, 255, 0]),
        ]
    }

    pub fn matches(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & u32::from(self.netmask) == u32::from(self.network) & u32::from(self.netmask)
    }
}

/// Whether `addr` passes `rules`: the last matching rule decides, no match
/// permits.
pub fn acl_permits(rules: &[AclRule], addr: Ipv4Addr) -> bool {
    rules
        .iter()
        .rev()
        .find(|rule| rule.matches(addr))
        .map_or(true, |rule| rule.permit)
}

/// A voicemail box watched for message-waiting indication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mailbox {
    pub mailbox: String,
    pub context: Option<String>,
}

/// A channel variable from `setvar = name=value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

/// A configured button at its 1-based position on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonConfig {
    pub index: usize,
    pub kind: ButtonKind,
}

impl ButtonConfig {
    pub fn line_name(&self) -> Option<&str> {
        match &self.kind {
            ButtonKind::Line { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ButtonKind {
    /// Placeholder for an unused or rejected position.
    Empty,
    Line {
        name: String,
        subscription_id: Option<String>,
        subscription_name: Option<String>,
        options: String,
    },
    SpeedDial {
        label: String,
        extension: String,
        hint: String,
    },
    Service {
        label: String,
        url: String,
    },
    Feature {
        label: String,
        feature: String,
        args: String,
    },
}

impl ButtonKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ButtonKind::Empty => "empty",
            ButtonKind::Line { .. } => "line",
            ButtonKind::SpeedDial { .. } => "speeddial",
            ButtonKind::Service { .. } => "service",
            ButtonKind::Feature { .. } => "feature",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(DndMode::from_keyword("Silent"), Some(DndMode::Silent));
        assert_eq!(EarlyRtp::from_keyword(" progress "), Some(EarlyRtp::Progress));
        assert_eq!(Addon::from_keyword("7915"), Some(Addon::Addon7915));
        assert_eq!(LampMode::from_keyword("strobe"), None);
        assert_eq!(DtmfMode::default(), DtmfMode::Inband);
    }

    #[test]
    fn internal_acl() {
        let mut rules = vec![AclRule::deny_all()];
        rules.extend(AclRule::internal());
        assert!(acl_permits(&rules, Ipv4Addr::new(10, 1, 2, 3)));
        assert!(acl_permits(&rules, Ipv4Addr::new(172, 20, 0, 1)));
        assert!(acl_permits(&rules, Ipv4Addr::new(192, 168, 1, 40)));
        assert!(!acl_permits(&rules, Ipv4Addr::new(192, 168, 2, 40)));
        assert!(!acl_permits(&rules, Ipv4Addr::new(8, 8, 8, 8)));
    }

    #[test]
    fn global_defaults() {
        let global = GlobalConfig::default();
        assert_eq!(global.bindaddr.port(), DEFAULT_PORT);
        assert_eq!(global.ha.len(), 4);
        assert_eq!(global.debug.names(), vec!["core"]);
    }

    #[test]
    fn debug_categories() {
        assert_eq!(DebugCategories::category("RTP"), Some(DebugCategories(1 << 3)));
        assert_eq!(DebugCategories::ALL.names().len(), DebugCategories::NAMES.len());
    }
}
