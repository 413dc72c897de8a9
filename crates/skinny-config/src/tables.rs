//! Static option tables of the four segments.

use crate::access;
use crate::convert;
use crate::model::{Device, GlobalConfig, Line};
use crate::option::{Access, ChangeKind, ConfigOption, OptionFlags, SegmentId, ValueChange};
use crate::registry::Configurable;
use crate::softkey::{KeyMode, SoftKeySetConfiguration};

type Opt<T> = ConfigOption<T>;

const NONE: OptionFlags = OptionFlags::NONE;
const IGNORE: OptionFlags = OptionFlags::IGNORE;
const OBSOLETE: OptionFlags = OptionFlags::OBSOLETE;
const REQUIRED: OptionFlags = OptionFlags::REQUIRED;
const DEVICE_DEFAULT: OptionFlags = OptionFlags::DEVICE_DEFAULT;
const GLOBAL_DEFAULT: OptionFlags = OptionFlags::GLOBAL_DEFAULT;

const NOUPD: ChangeKind = ChangeKind::NoUpdateNeeded;
const RESET: ChangeKind = ChangeKind::NeedsDeviceReset;

static GLOBAL_OPTIONS: &[Opt<GlobalConfig>] = &[
    Opt::new("servername", access!(str 40, GlobalConfig, servername), NONE, NOUPD, "Asterisk", "Server name shown on the phones"),
    Opt::new("keepalive", access!(u32, GlobalConfig, keepalive), NONE, RESET, "60", "Keepalive interval in seconds"),
    Opt::new("debug", access!(generic convert::debug_categories, GlobalConfig, debug), NONE, NOUPD, "core", "Comma-separated debug categories"),
    Opt::new("context", access!(str 80, GlobalConfig, context), NONE, RESET, "sccp", "Dialplan context for incoming calls"),
    Opt::new("dateformat", access!(str 6, GlobalConfig, dateformat), NONE, RESET, "D.M.Y", "Date template sent in the register acknowledgement"),
    Opt::new("bindaddr", access!(generic convert::bind_address, GlobalConfig, bindaddr), NONE, RESET, "0.0.0.0", "Address to listen on"),
    Opt::new("port", access!(generic convert::port, GlobalConfig, bindaddr), NONE, RESET, "2000", "Port to listen on"),
    Opt::new("disallow", access!(list "codec" convert::codecs, GlobalConfig, codecs), NONE, RESET, "", "Codecs removed from the preference list"),
    Opt::new("allow", access!(list "codec" convert::codecs, GlobalConfig, codecs), NONE, RESET, "", "Codecs appended to the preference list"),
    Opt::new("deny", access!(list "acl" convert::acl, GlobalConfig, ha), NONE, RESET, "0.0.0.0/0.0.0.0", "Networks refused registration"),
    Opt::new("permit", access!(list "acl" convert::acl, GlobalConfig, ha), NONE, RESET, "internal", "Networks allowed to register"),
    Opt::new("localnet", access!(list "localnet" convert::acl, GlobalConfig, localnet), NONE, RESET, "", "Networks considered local for NAT"),
    Opt::new("quality_over_size", access!(bool, GlobalConfig, quality_over_size), NONE, NOUPD, "true", "Prefer codec quality over packet size"),
    Opt::new("externip", access!(generic convert::optional_ipv4, GlobalConfig, externip), NONE, RESET, "", "External address announced behind NAT"),
    Opt::new("externhost", access!(str 256, GlobalConfig, externhost), NONE, RESET, "", "External host name announced behind NAT"),
    Opt::new("externrefresh", access!(generic convert::smallint, GlobalConfig, externrefresh), NONE, RESET, "60", "Seconds between externhost lookups"),
    Opt::new("firstdigittimeout", access!(generic convert::smallint, GlobalConfig, firstdigittimeout), NONE, NOUPD, "16", "Seconds to wait for the first digit"),
    Opt::new("digittimeout", access!(generic convert::smallint, GlobalConfig, digittimeout), NONE, NOUPD, "8", "Seconds to wait for further digits"),
    Opt::new("digittimeoutchar", access!(char, GlobalConfig, digittimeoutchar), NONE, NOUPD, "#", "Digit that ends dialing at once"),
    Opt::new("recorddigittimeoutchar", access!(bool, GlobalConfig, recorddigittimeoutchar), NONE, NOUPD, "false", "Keep the end-of-dialing digit in the number"),
    Opt::new("simulate_enbloc", access!(bool, GlobalConfig, simulate_enbloc), NONE, NOUPD, "true", "Treat fast digit bursts as enbloc dialing"),
    Opt::new("autoanswer_ring_time", access!(generic convert::smallint, GlobalConfig, autoanswer_ring_time), NONE, NOUPD, "1", "Ring seconds before auto answer"),
    Opt::new("autoanswer_tone", access!(generic convert::smallint, GlobalConfig, autoanswer_tone), NONE, NOUPD, "0x32", "Tone played on auto answer"),
    Opt::new("remotehangup_tone", access!(generic convert::smallint, GlobalConfig, remotehangup_tone), NONE, NOUPD, "0x32", "Tone played when the far end hangs up"),
    Opt::new("transfer_tone", access!(generic convert::smallint, GlobalConfig, transfer_tone), NONE, NOUPD, "0", "Tone played on transfer"),
    Opt::new("callwaiting_tone", access!(generic convert::smallint, GlobalConfig, callwaiting_tone), NONE, NOUPD, "0x2d", "Call waiting tone"),
    Opt::new("musicclass", access!(str 80, GlobalConfig, musicclass), NONE, NOUPD, "default", "Music on hold class"),
    Opt::new("language", access!(str 20, GlobalConfig, language), NONE, RESET, "en", "Default channel language"),
    Opt::new("callevents", access!(bool, GlobalConfig, callevents), NONE, NOUPD, "on", "Emit call events"),
    Opt::new("accountcode", access!(str 20, GlobalConfig, accountcode), NONE, NOUPD, "skinny", "Default CDR account code"),
    Opt::new("sccp_tos", access!(generic convert::tos, GlobalConfig, sccp_tos), NONE, RESET, "0x68", "Type of service for signalling"),
    Opt::new("sccp_cos", access!(generic convert::cos, GlobalConfig, sccp_cos), NONE, RESET, "4", "Class of service for signalling"),
    Opt::new("audio_tos", access!(generic convert::tos, GlobalConfig, audio_tos), NONE, RESET, "0xB8", "Type of service for audio"),
    Opt::new("audio_cos", access!(generic convert::cos, GlobalConfig, audio_cos), NONE, RESET, "6", "Class of service for audio"),
    Opt::new("video_tos", access!(generic convert::tos, GlobalConfig, video_tos), NONE, RESET, "0x88", "Type of service for video"),
    Opt::new("video_cos", access!(generic convert::cos, GlobalConfig, video_cos), NONE, RESET, "5", "Class of service for video"),
    Opt::new("echocancel", access!(bool, GlobalConfig, echocancel), NONE, NOUPD, "on", "Echo cancellation"),
    Opt::new("silencesuppression", access!(bool, GlobalConfig, silencesuppression), NONE, NOUPD, "off", "Silence suppression"),
    Opt::new("trustphoneip", access!(bool, GlobalConfig, trustphoneip), NONE, NOUPD, "no", "Trust the address the phone reports"),
    Opt::new("earlyrtp", access!(generic convert::early_rtp, GlobalConfig, earlyrtp), NONE, NOUPD, "progress", "Call state that opens the media path"),
    Opt::new("dnd", access!(generic convert::dnd, GlobalConfig, dnd), NONE, NOUPD, "reject", "Do-not-disturb behaviour"),
    Opt::new("private", access!(bool, GlobalConfig, private), NONE, NOUPD, "on", "Offer private calls"),
    Opt::new("mwilamp", access!(generic convert::mwi_lamp, GlobalConfig, mwilamp), NONE, NOUPD, "on", "Message waiting lamp pattern"),
    Opt::new("mwioncall", access!(bool, GlobalConfig, mwioncall), NONE, NOUPD, "off", "Show message waiting during calls"),
    Opt::new("blindtransferindication", access!(generic convert::blind_transfer_indication, GlobalConfig, blindtransferindication), NONE, NOUPD, "ring", "What a blind transfer target hears"),
    Opt::new("cfwdall", access!(bool, GlobalConfig, cfwdall), NONE, RESET, "on", "Offer call forward all"),
    Opt::new("cfwdbusy", access!(bool, GlobalConfig, cfwdbusy), NONE, RESET, "on", "Offer call forward on busy"),
    Opt::new("cfwdnoanswer", access!(bool, GlobalConfig, cfwdnoanswer), NONE, RESET, "on", "Offer call forward on no answer"),
    Opt::new("nat", access!(bool, GlobalConfig, nat), NONE, RESET, "off", "Devices sit behind NAT"),
    Opt::new("directrtp", access!(bool, GlobalConfig, directrtp), NONE, NOUPD, "off", "Send media directly between phones"),
    Opt::new("allowoverlap", access!(bool, GlobalConfig, allowoverlap), NONE, NOUPD, "off", "Allow overlap dialing"),
    Opt::new("callgroup", access!(generic convert::group, GlobalConfig, callgroup), NONE, NOUPD, "", "Call groups"),
    Opt::new("pickupgroup", access!(generic convert::group, GlobalConfig, pickupgroup), NONE, NOUPD, "", "Pickup groups"),
    Opt::new("pickupmodeanswer", access!(bool, GlobalConfig, pickupmodeanswer), NONE, NOUPD, "", "Answer picked up calls at once"),
    Opt::new("amaflags", access!(generic convert::amaflags, GlobalConfig, amaflags), NONE, NOUPD, "", "CDR account flags"),
    Opt::new("protocolversion", Access::None, OBSOLETE, NOUPD, "20", "Negotiated per device"),
    Opt::new("callanswerorder", access!(generic convert::call_answer_order, GlobalConfig, callanswerorder), NONE, NOUPD, "oldestfirst", "Which ringing call answer picks"),
    Opt::new("regcontext", access!(str 80, GlobalConfig, regcontext), NONE, RESET, "sccpregistration", "Context for registration extensions"),
    Opt::new("devicetable", access!(str 45, GlobalConfig, devicetable), NONE, NOUPD, "sccpdevice", "Realtime device table"),
    Opt::new("linetable", access!(str 45, GlobalConfig, linetable), NONE, NOUPD, "sccpline", "Realtime line table"),
    Opt::new("meetme", access!(bool, GlobalConfig, meetme), NONE, NOUPD, "on", "Offer meetme conferences"),
    Opt::new("meetmeopts", access!(str 80, GlobalConfig, meetmeopts), NONE, NOUPD, "qxd", "Meetme options"),
    Opt::new("hotline_enabled", access!(bool, GlobalConfig, hotline_enabled), NONE, NOUPD, "no", "Register unknown phones as hotline"),
    Opt::new("fallback", access!(str 16, GlobalConfig, fallback), NONE, NOUPD, "false", "Fallback behaviour for clustered servers"),
    Opt::new("backoff_time", access!(u32, GlobalConfig, backoff_time), NONE, NOUPD, "60", "Seconds a phone waits before reconnecting"),
];

static DEVICE_OPTIONS: &[Opt<Device>] = &[
    Opt::new("name", Access::None, IGNORE, NOUPD, "", "Taken from the section name"),
    Opt::new("type", Access::None, IGNORE, NOUPD, "", "Section type"),
    Opt::new("devicetype", access!(str 16, Device, devicetype), NONE, RESET, "", "Phone model, for example 7960"),
    Opt::new("type", access!(str 16, Device, devicetype), NONE, RESET, "", "Shadowed by the section type"),
    Opt::new("description", access!(str 40, Device, description), NONE, RESET, "", "Description shown on the phone"),
    Opt::new("keepalive", access!(u32, Device, keepalive), GLOBAL_DEFAULT, RESET, "", "Keepalive interval in seconds"),
    Opt::new("tzoffset", access!(i32, Device, tzoffset), NONE, RESET, "0", "Hours added to the server time"),
    Opt::new("disallow", access!(list "codec" convert::codecs, Device, codecs), GLOBAL_DEFAULT, RESET, "", "Codecs removed from the preference list"),
    Opt::new("allow", access!(list "codec" convert::codecs, Device, codecs), GLOBAL_DEFAULT, RESET, "", "Codecs appended to the preference list"),
    Opt::new("transfer", access!(bool, Device, transfer), NONE, NOUPD, "on", "Offer transfer"),
    Opt::new("park", access!(bool, Device, park), NONE, NOUPD, "on", "Offer call park"),
    Opt::new("cfwdall", access!(bool, Device, cfwdall), GLOBAL_DEFAULT, RESET, "off", "Offer call forward all"),
    Opt::new("cfwdbusy", access!(bool, Device, cfwdbusy), GLOBAL_DEFAULT, RESET, "off", "Offer call forward on busy"),
    Opt::new("cfwdnoanswer", access!(bool, Device, cfwdnoanswer), GLOBAL_DEFAULT, RESET, "off", "Offer call forward on no answer"),
    Opt::new("dnd", Access::None, OBSOLETE, NOUPD, "", "Replaced by dndFeature"),
    Opt::new("dndFeature", access!(bool, Device, dnd_feature), NONE, NOUPD, "on", "Offer do-not-disturb"),
    Opt::new("dtmfmode", access!(generic convert::dtmf_mode, Device, dtmfmode), GLOBAL_DEFAULT, RESET, "inband", "How digits are sent"),
    Opt::new("imageversion", access!(str 32, Device, imageversion), GLOBAL_DEFAULT, RESET, "", "Firmware image to load"),
    Opt::new("deny", access!(list "acl" convert::acl, Device, ha), GLOBAL_DEFAULT, RESET, "", "Networks refused registration"),
    Opt::new("permit", access!(list "acl" convert::acl, Device, ha), GLOBAL_DEFAULT, RESET, "", "Networks allowed to register"),
    Opt::new("audio_tos", access!(generic convert::tos, Device, audio_tos), GLOBAL_DEFAULT, RESET, "", "Type of service for audio"),
    Opt::new("audio_cos", access!(generic convert::cos, Device, audio_cos), GLOBAL_DEFAULT, RESET, "", "Class of service for audio"),
    Opt::new("video_tos", access!(generic convert::tos, Device, video_tos), GLOBAL_DEFAULT, RESET, "", "Type of service for video"),
    Opt::new("video_cos", access!(generic convert::cos, Device, video_cos), GLOBAL_DEFAULT, RESET, "", "Class of service for video"),
    Opt::new("trustphoneip", access!(bool, Device, trustphoneip), GLOBAL_DEFAULT, RESET, "", "Trust the address the phone reports"),
    Opt::new("nat", access!(bool, Device, nat), OptionFlags::DEPRECATED.union(GLOBAL_DEFAULT), NOUPD, "", "Device sits behind NAT"),
    Opt::new("directrtp", access!(bool, Device, directrtp), GLOBAL_DEFAULT, NOUPD, "", "Send media directly between phones"),
    Opt::new("earlyrtp", access!(generic convert::early_rtp, Device, earlyrtp), GLOBAL_DEFAULT, NOUPD, "", "Call state that opens the media path"),
    Opt::new("private", access!(bool, Device, private), GLOBAL_DEFAULT, NOUPD, "", "Offer private calls"),
    Opt::new("privacy", access!(generic convert::privacy, Device, privacy), NONE, NOUPD, "on", "Privacy feature, 'full' keeps it on"),
    Opt::new("mwilamp", access!(generic convert::mwi_lamp, Device, mwilamp), GLOBAL_DEFAULT, NOUPD, "", "Message waiting lamp pattern"),
    Opt::new("mwioncall", access!(bool, Device, mwioncall), GLOBAL_DEFAULT, NOUPD, "", "Show message waiting during calls"),
    Opt::new("meetme", access!(bool, Device, meetme), GLOBAL_DEFAULT, NOUPD, "", "Offer meetme conferences"),
    Opt::new("meetmeopts", access!(str 80, Device, meetmeopts), GLOBAL_DEFAULT, NOUPD, "", "Meetme options"),
    Opt::new("softkeyset", access!(str 40, Device, softkeyset), NONE, RESET, "", "Softkey set to use"),
    Opt::new("useRedialMenu", access!(bool, Device, use_redial_menu), NONE, NOUPD, "off", "Show the redial menu instead of redialing"),
    Opt::new("pickupexten", access!(bool, Device, pickupexten), NONE, NOUPD, "off", "Offer pickup by extension"),
    Opt::new("pickupcontext", access!(str 80, Device, pickupcontext), NONE, NOUPD, "sccp", "Context for pickup by extension"),
    Opt::new("pickupmodeanswer", access!(bool, Device, pickupmodeanswer), NONE, NOUPD, "on", "Answer picked up calls at once"),
    Opt::new("monitor", access!(bool, Device, monitor), NONE, NOUPD, "off", "Offer call recording"),
    Opt::new("allowoverlap", access!(bool, Device, allowoverlap), GLOBAL_DEFAULT, NOUPD, "", "Allow overlap dialing"),
    Opt::new("setvar", access!(list "setvar" convert::variables, Device, variables), NONE, NOUPD, "", "Channel variable as name=value"),
    Opt::new("permithost", access!(list "permithost" convert::permit_hosts, Device, permithosts), NONE, RESET, "", "Host allowed to register as this device"),
    Opt::new("addon", access!(list "addon" convert::addons, Device, addons), NONE, RESET, "", "Expansion module: 7914, 7915 or 7916"),
    Opt::new("button", access!(list "button" convert::buttons, Device, buttons), NONE, RESET, "", "type,label,options,args"),
    Opt::new("digittimeout", access!(generic convert::smallint, Device, digittimeout), GLOBAL_DEFAULT, NOUPD, "8", "Seconds to wait for further digits"),
];

static LINE_OPTIONS: &[Opt<Line>] = &[
    Opt::new("name", Access::None, IGNORE, NOUPD, "", "Taken from the section name"),
    Opt::new("type", Access::None, IGNORE, NOUPD, "", "Section type"),
    Opt::new("id", access!(str 8, Line, id), NONE, NOUPD, "", "Line id for voicemail and CDR"),
    Opt::new("pin", access!(str 8, Line, pin), NONE, NOUPD, "", "Pin for hotdesking"),
    Opt::new("label", access!(str 40, Line, label), REQUIRED, RESET, "", "Text next to the line button"),
    Opt::new("description", access!(str 40, Line, description), NONE, RESET, "", "Description shown on the phone"),
    Opt::new("context", access!(str 80, Line, context), GLOBAL_DEFAULT, NOUPD, "", "Dialplan context for calls from this line"),
    Opt::new("cid_name", access!(str 40, Line, cid_name), REQUIRED, RESET, "", "Caller id name"),
    Opt::new("cid_num", access!(str 24, Line, cid_num), REQUIRED, RESET, "", "Caller id number"),
    Opt::new("defaultSubscriptionId_name", access!(str 40, Line, default_subscription_name), NONE, RESET, "", "Subscription name for shared lines"),
    Opt::new("defaultSubscriptionId_number", access!(str 24, Line, default_subscription_number), NONE, RESET, "", "Subscription number for shared lines"),
    Opt::new("callerid", Access::None, OBSOLETE, NOUPD, "", "Use cid_name and cid_num"),
    Opt::new("mailbox", access!(list "mailbox" convert::mailboxes, Line, mailboxes), NONE, NOUPD, "", "Voicemail box as box@context"),
    Opt::new("vmnum", access!(str 24, Line, vmnum), NONE, RESET, "", "Number dialed by the messages button"),
    Opt::new("adhocNumber", access!(str 24, Line, adhoc_number), NONE, NOUPD, "", "Number dialed on offhook"),
    Opt::new("meetme", access!(bool, Line, meetme), DEVICE_DEFAULT, NOUPD, "", "Offer meetme conferences"),
    Opt::new("meetmenum", access!(str 24, Line, meetmenum), GLOBAL_DEFAULT, NOUPD, "", "Meetme extension"),
    Opt::new("meetmeopts", access!(str 80, Line, meetmeopts), DEVICE_DEFAULT, NOUPD, "", "Meetme options"),
    Opt::new("transfer", access!(bool, Line, transfer), DEVICE_DEFAULT, NOUPD, "", "Offer transfer"),
    Opt::new("incominglimit", access!(u32, Line, incominglimit), NONE, NOUPD, "6", "Concurrent incoming calls"),
    Opt::new("echocancel", access!(bool, Line, echocancel), GLOBAL_DEFAULT, NOUPD, "", "Echo cancellation"),
    Opt::new("silencesuppression", access!(bool, Line, silencesuppression), GLOBAL_DEFAULT, NOUPD, "", "Silence suppression"),
    Opt::new("language", access!(str 20, Line, language), GLOBAL_DEFAULT, NOUPD, "", "Channel language"),
    Opt::new("musicclass", access!(str 80, Line, musicclass), GLOBAL_DEFAULT, NOUPD, "", "Music on hold class"),
    Opt::new("accountcode", access!(str 20, Line, accountcode), NONE, NOUPD, "", "CDR account code"),
    Opt::new("amaflags", access!(generic convert::amaflags, Line, amaflags), NONE, NOUPD, "", "CDR account flags"),
    Opt::new("callgroup", access!(generic convert::group, Line, callgroup), NONE, NOUPD, "", "Call groups"),
    Opt::new("pickupgroup", access!(generic convert::group, Line, pickupgroup), NONE, NOUPD, "", "Pickup groups"),
    Opt::new("trnsfvm", access!(strptr, Line, trnsfvm), NONE, NOUPD, "", "Extension the transfer-to-voicemail key dials"),
    Opt::new("secondary_dialtone_digits", access!(generic convert::secondary_dialtone_digits, Line, secondary_dialtone_digits), NONE, NOUPD, "9", "Digits that trigger the secondary dial tone"),
    Opt::new("secondary_dialtone_tone", access!(u32, Line, secondary_dialtone_tone), NONE, NOUPD, "0x22", "Secondary dial tone"),
    Opt::new("setvar", access!(list "setvar" convert::variables, Line, variables), NONE, NOUPD, "", "Channel variable as name=value"),
    Opt::new("dnd", access!(generic convert::dnd, Line, dnd), GLOBAL_DEFAULT, NOUPD, "reject", "Do-not-disturb behaviour"),
    Opt::new("regexten", access!(str 24, Line, regexten), NONE, NOUPD, "", "Extension registered while the line is up"),
];

macro_rules! key_mode {
    ($mode:ident, $default:literal, $description:literal) => {
        Opt::new(
            KeyMode::$mode.config_name(),
            Access::Generic({
                fn apply(set: &mut SoftKeySetConfiguration, value: &str) -> ValueChange {
                    set.assign_mode(KeyMode::$mode, value)
                }
                apply
            }),
            NONE,
            RESET,
            $default,
            $description,
        )
    };
}

static SOFTKEY_OPTIONS: &[Opt<SoftKeySetConfiguration>] = &[
    Opt::new("type", Access::None, IGNORE, NOUPD, "softkeyset", "Section type"),
    Opt::new("name", Access::None, IGNORE, NOUPD, "", "Taken from the section name"),
    key_mode!(OnHook, "redial,newcall,cfwdall,dnd,pickup,gpickup", "Keys while on hook"),
    key_mode!(Connected, "hold,endcall,park,select,cfwdall,cfwdbusy,idivert", "Keys while connected"),
    key_mode!(OnHold, "resume,endcall,newcall,transfer,conflist,select,dirtrfr,idivert", "Keys while on hold"),
    key_mode!(RingIn, "answer,endcall,transvm,idivert", "Keys while ringing"),
    key_mode!(OffHook, "redial,endcall,private,cfwdall,cfwdbusy,pickup,gpickup,meetme,barge", "Keys while off hook"),
    key_mode!(ConnTrans, "hold,endcall,transfer,conf,park,select,dirtrfr,cfwdall,cfwdbusy,vidmode", "Keys while connected with transfer"),
    key_mode!(DigitsFollowing, "back,endcall,dial", "Keys after the first digit"),
    key_mode!(ConnConf, "hold,endcall,join", "Keys while in a conference"),
    key_mode!(RingOut, "empty,endcall,transfer,cfwdall,idivert", "Keys while ringing out"),
    key_mode!(OffHookFeatures, "redial,endcall", "Keys while off hook with features"),
    key_mode!(InUseHint, "newcall,pickup,barge", "Keys while a watched line is in use"),
];

impl Configurable for GlobalConfig {
    const SEGMENT: SegmentId = SegmentId::Global;

    fn options() -> &'static [ConfigOption<Self>] {
        GLOBAL_OPTIONS
    }
}

impl Configurable for Device {
    const SEGMENT: SegmentId = SegmentId::Device;

    fn options() -> &'static [ConfigOption<Self>] {
        DEVICE_OPTIONS
    }
}

impl Configurable for Line {
    const SEGMENT: SegmentId = SegmentId::Line;

    fn options() -> &'static [ConfigOption<Self>] {
        LINE_OPTIONS
    }
}

impl Configurable for SoftKeySetConfiguration {
    const SEGMENT: SegmentId = SegmentId::SoftKey;

    fn options() -> &'static [ConfigOption<Self>] {
        SOFTKEY_OPTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::softkey::SoftKeyMode;

    #[test]
    fn softkey_defaults_match_builtin_set() {
        let builtin = SoftKeySetConfiguration::builtin_default();
        for mode in KeyMode::CONFIGURABLE {
            let option = SOFTKEY_OPTIONS
                .iter()
                .find(|option| option.name == mode.config_name())
                .unwrap();
            assert_eq!(&SoftKeyMode::parse(option.default), builtin.mode(mode), "{mode:?}");
        }
    }

    #[test]
    fn stealable_row_is_not_configurable() {
        let name = KeyMode::OnHookStealable.config_name();
        assert!(SOFTKEY_OPTIONS.iter().all(|option| option.name != name));
        assert_eq!(KeyMode::from_config_name(name), None);
        assert_eq!(KeyMode::from_config_name(" RingOut "), Some(KeyMode::RingOut));
    }

    #[test]
    fn list_groups_share_rebuilds() {
        let groups: Vec<_> = DEVICE_OPTIONS.iter().filter_map(ConfigOption::list_group).collect();
        assert!(groups.contains(&"button"));
        assert_eq!(groups.iter().filter(|group| **group == "acl").count(), 2);
    }
}
