//! The message catalogue: every known layout keyed by `(id, VersionBand)`.

use std::fmt;

use bytes::{Bytes, BytesMut};
use serde::{Serialize, Serializer};

use crate::field::WireField;
use crate::ids::{self, Direction};
use crate::messages::*;

/// Protocol version range sharing one set of layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBand {
    /// Versions below 17.
    Base,
    /// Versions 17 and 18.
    V17,
    /// Version 19 and later.
    V19,
}

impl VersionBand {
    pub fn from_version(version: u8) -> Self {
        match version {
            0..=16 => VersionBand::Base,
            17 | 18 => VersionBand::V17,
            _ => VersionBand::V19,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VersionBand::Base => "base",
            VersionBand::V17 => "v17",
            VersionBand::V19 => "v19",
        }
    }
}

impl fmt::Display for VersionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message whose id has no layout in the catalogue.
///
/// The payload is kept untouched so callers can log or forward it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawMessage {
    pub id: u32,
    #[serde(serialize_with = "serialize_payload")]
    pub payload: Bytes,
}

fn serialize_payload<S: Serializer>(payload: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(payload))
}

/// One row of the catalogue.
#[derive(Clone, Copy)]
pub struct CatalogueEntry {
    pub id: u32,
    pub band: VersionBand,
    /// Rust variant name of the layout.
    pub variant: &'static str,
    /// Width of the fixed part.
    pub size: usize,
    /// Upper bound including trailing data.
    pub max_size: usize,
    decode: fn(&mut &[u8]) -> Message,
}

impl CatalogueEntry {
    pub fn name(&self) -> &'static str {
        ids::message_name(self.id)
    }

    pub fn direction(&self) -> Direction {
        ids::direction(self.id)
    }

    /// Decode `payload`, which must hold at least `size` bytes.
    pub(crate) fn decode(&self, payload: &[u8]) -> Message {
        let mut src = payload;
        (self.decode)(&mut src)
    }
}

impl fmt::Debug for CatalogueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogueEntry")
            .field("id", &format_args!("{:#06x}", self.id))
            .field("band", &self.band)
            .field("variant", &self.variant)
            .field("size", &self.size)
            .finish()
    }
}

const fn max_of(sizes: &[usize]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < sizes.len() {
        if sizes[i] > max {
            max = sizes[i];
        }
        i += 1;
    }
    max
}

macro_rules! catalogue {
    ($( $variant:ident($ty:ty) = $id:path, $band:ident; )*) => {
        /// A decoded Skinny message.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        #[serde(tag = "message", content = "payload")]
        pub enum Message {
            $( $variant($ty), )*
            Unhandled(RawMessage),
        }

        impl Message {
            /// Wire id of the message.
            pub fn id(&self) -> u32 {
                match self {
                    $( Message::$variant(_) => $id, )*
                    Message::Unhandled(raw) => raw.id,
                }
            }

            /// Band of the layout, `None` for unhandled messages.
            pub fn band(&self) -> Option<VersionBand> {
                match self {
                    $( Message::$variant(_) => Some(VersionBand::$band), )*
                    Message::Unhandled(_) => None,
                }
            }

            pub fn variant_name(&self) -> &'static str {
                match self {
                    $( Message::$variant(_) => stringify!($variant), )*
                    Message::Unhandled(_) => "Unhandled",
                }
            }

            pub(crate) fn put_payload(&self, dst: &mut BytesMut) {
                match self {
                    $( Message::$variant(msg) => msg.put(dst), )*
                    Message::Unhandled(raw) => dst.extend_from_slice(&raw.payload),
                }
            }
        }

        static ENTRIES: &[CatalogueEntry] = &[
            $(
                CatalogueEntry {
                    id: $id,
                    band: VersionBand::$band,
                    variant: stringify!($variant),
                    size: <$ty as WireField>::SIZE,
                    max_size: <$ty as WireField>::MAX_SIZE,
                    decode: |src| Message::$variant(<$ty as WireField>::get(src)),
                },
            )*
        ];

        /// Largest payload any catalogued layout can carry.
        pub const MAX_PAYLOAD_SIZE: usize = max_of(&[ $( <$ty as WireField>::MAX_SIZE, )* ]);
    };
}

catalogue! {
    KeepAlive(Empty) = ids::KEEP_ALIVE, Base;
    Register(Register) = ids::REGISTER, Base;
    IpPort(IpPort) = ids::IP_PORT, Base;
    KeypadButton(KeypadButton) = ids::KEYPAD_BUTTON, Base;
    EnblocCall(EnblocCall) = ids::ENBLOC_CALL, Base;
    Stimulus(Stimulus) = ids::STIMULUS, Base;
    OffHook(Empty) = ids::OFF_HOOK, Base;
    OnHook(Empty) = ids::ON_HOOK, Base;
    HookFlash(Empty) = ids::HOOK_FLASH, Base;
    ForwardStatReq(ForwardStatReq) = ids::FORWARD_STAT_REQ, Base;
    SpeedDialStatReq(SpeedDialStatReq) = ids::SPEED_DIAL_STAT_REQ, Base;
    LineStatReq(LineStatReq) = ids::LINE_STAT_REQ, Base;
    ConfigStatReq(Empty) = ids::CONFIG_STAT_REQ, Base;
    TimeDateReq(Empty) = ids::TIME_DATE_REQ, Base;
    ButtonTemplateReq(ButtonTemplateReq) = ids::BUTTON_TEMPLATE_REQ, Base;
    VersionReq(Empty) = ids::VERSION_REQ, Base;
    CapabilitiesRes(CapabilitiesRes) = ids::CAPABILITIES_RES, Base;
    MediaPortList(MediaPortList) = ids::MEDIA_PORT_LIST, Base;
    ServerReq(Empty) = ids::SERVER_REQ, Base;
    Alarm(Alarm) = ids::ALARM, Base;
    MulticastMediaReceptionAck(MulticastMediaReceptionAck) = ids::MULTICAST_MEDIA_RECEPTION_ACK, Base;
    OpenReceiveChannelAck(OpenReceiveChannelAck) = ids::OPEN_RECEIVE_CHANNEL_ACK, Base;
    OpenReceiveChannelAckV17(OpenReceiveChannelAckV17) = ids::OPEN_RECEIVE_CHANNEL_ACK, V17;
    ConnectionStatisticsRes(ConnectionStatisticsRes) = ids::CONNECTION_STATISTICS_RES, Base;
    ConnectionStatisticsResV19(ConnectionStatisticsResV19) = ids::CONNECTION_STATISTICS_RES, V19;
    OffHookWithCgpn(OffHookWithCgpn) = ids::OFF_HOOK_WITH_CGPN, Base;
    SoftKeySetReq(Empty) = ids::SOFT_KEY_SET_REQ, Base;
    SoftKeyEvent(SoftKeyEvent) = ids::SOFT_KEY_EVENT, Base;
    Unregister(Empty) = ids::UNREGISTER, Base;
    SoftKeyTemplateReq(Empty) = ids::SOFT_KEY_TEMPLATE_REQ, Base;
    RegisterTokenReq(RegisterTokenReq) = ids::REGISTER_TOKEN_REQ, Base;
    HeadsetStatus(HeadsetStatus) = ids::HEADSET_STATUS, Base;
    MediaResourceNotification(MediaResourceNotification) = ids::MEDIA_RESOURCE_NOTIFICATION, Base;
    RegisterAvailableLines(RegisterAvailableLines) = ids::REGISTER_AVAILABLE_LINES, Base;
    DeviceToUserData(UserData) = ids::DEVICE_TO_USER_DATA, Base;
    DeviceToUserDataResponse(UserData) = ids::DEVICE_TO_USER_DATA_RESPONSE, Base;
    UpdateCapabilities(OpaqueBody) = ids::UPDATE_CAPABILITIES, Base;
    OpenMultiMediaReceiveChannelAck(OpenReceiveChannelAck) = ids::OPEN_MULTI_MEDIA_RECEIVE_CHANNEL_ACK, Base;
    OpenMultiMediaReceiveChannelAckV17(OpenReceiveChannelAckV17) = ids::OPEN_MULTI_MEDIA_RECEIVE_CHANNEL_ACK, V17;
    ClearConference(ClearConference) = ids::CLEAR_CONFERENCE, Base;
    ServiceUrlStatReq(ServiceUrlStatReq) = ids::SERVICE_URL_STAT_REQ, Base;
    FeatureStatReq(FeatureStatReq) = ids::FEATURE_STAT_REQ, Base;
    DeviceToUserDataVersion1(UserDataVersion1) = ids::DEVICE_TO_USER_DATA_VERSION1, Base;
    DeviceToUserDataResponseVersion1(UserDataVersion1) = ids::DEVICE_TO_USER_DATA_RESPONSE_VERSION1, Base;
    DialedPhoneBook(DialedPhoneBook) = ids::DIALED_PHONE_BOOK, Base;
    AccessoryStatus(AccessoryStatus) = ids::ACCESSORY_STATUS, Base;
    Unknown004A(Unknown004A) = ids::UNKNOWN_0X004A, Base;

    RegisterAck(RegisterAck) = ids::REGISTER_ACK, Base;
    StartTone(StartTone) = ids::START_TONE, Base;
    StopTone(StopTone) = ids::STOP_TONE, Base;
    SetRinger(SetRinger) = ids::SET_RINGER, Base;
    SetLamp(SetLamp) = ids::SET_LAMP, Base;
    SetHkfDetect(Empty) = ids::SET_HKF_DETECT, Base;
    SetSpeakerMode(SetSpeakerMode) = ids::SET_SPEAKER_MODE, Base;
    SetMicroMode(SetMicroMode) = ids::SET_MICRO_MODE, Base;
    StartMediaTransmission(StartMediaTransmission) = ids::START_MEDIA_TRANSMISSION, Base;
    StartMediaTransmissionV17(StartMediaTransmissionV17) = ids::START_MEDIA_TRANSMISSION, V17;
    StopMediaTransmission(StopMediaTransmission) = ids::STOP_MEDIA_TRANSMISSION, Base;
    StartMediaReception(Empty) = ids::START_MEDIA_RECEPTION, Base;
    StopMediaReception(StopMediaReception) = ids::STOP_MEDIA_RECEPTION, Base;
    CallInfo(CallInfo) = ids::CALL_INFO, Base;
    ForwardStat(ForwardStat) = ids::FORWARD_STAT, Base;
    ForwardStatV19(ForwardStatV19) = ids::FORWARD_STAT, V19;
    SpeedDialStat(SpeedDialStat) = ids::SPEED_DIAL_STAT, Base;
    LineStat(LineStat) = ids::LINE_STAT, Base;
    ConfigStat(ConfigStat) = ids::CONFIG_STAT, Base;
    DefineTimeDate(DefineTimeDate) = ids::DEFINE_TIME_DATE, Base;
    StartSessionTransmission(Empty) = ids::START_SESSION_TRANSMISSION, Base;
    StopSessionTransmission(Empty) = ids::STOP_SESSION_TRANSMISSION, Base;
    ButtonTemplate(ButtonTemplate) = ids::BUTTON_TEMPLATE, Base;
    Version(Version) = ids::VERSION, Base;
    DisplayText(DisplayText) = ids::DISPLAY_TEXT, Base;
    ClearDisplay(ClearDisplay) = ids::CLEAR_DISPLAY, Base;
    CapabilitiesReq(Empty) = ids::CAPABILITIES_REQ, Base;
    EnunciatorCommand(Empty) = ids::ENUNCIATOR_COMMAND, Base;
    RegisterReject(RegisterReject) = ids::REGISTER_REJECT, Base;
    ServerRes(ServerRes) = ids::SERVER_RES, Base;
    Reset(Reset) = ids::RESET, Base;
    KeepAliveAck(Empty) = ids::KEEP_ALIVE_ACK, Base;
    StartMulticastMediaReception(StartMulticastMediaReception) = ids::START_MULTICAST_MEDIA_RECEPTION, Base;
    StartMulticastMediaTransmission(StartMulticastMediaTransmission) = ids::START_MULTICAST_MEDIA_TRANSMISSION, Base;
    StopMulticastMediaReception(StopMulticastMedia) = ids::STOP_MULTICAST_MEDIA_RECEPTION, Base;
    StopMulticastMediaTransmission(StopMulticastMedia) = ids::STOP_MULTICAST_MEDIA_TRANSMISSION, Base;
    OpenReceiveChannel(OpenReceiveChannel) = ids::OPEN_RECEIVE_CHANNEL, Base;
    OpenReceiveChannelV17(OpenReceiveChannelV17) = ids::OPEN_RECEIVE_CHANNEL, V17;
    CloseReceiveChannel(CloseReceiveChannel) = ids::CLOSE_RECEIVE_CHANNEL, Base;
    ConnectionStatisticsReq(ConnectionStatisticsReq) = ids::CONNECTION_STATISTICS_REQ, Base;
    ConnectionStatisticsReqV19(ConnectionStatisticsReqV19) = ids::CONNECTION_STATISTICS_REQ, V19;
    SoftKeyTemplateRes(SoftKeyTemplateRes) = ids::SOFT_KEY_TEMPLATE_RES, Base;
    SoftKeySetRes(SoftKeySetRes) = ids::SOFT_KEY_SET_RES, Base;
    SelectSoftKeys(SelectSoftKeys) = ids::SELECT_SOFT_KEYS, Base;
    CallState(CallState) = ids::CALL_STATE, Base;
    DisplayPromptStatus(DisplayPromptStatus) = ids::DISPLAY_PROMPT_STATUS, Base;
    ClearPromptStatus(ClearPromptStatus) = ids::CLEAR_PROMPT_STATUS, Base;
    DisplayNotify(DisplayNotify) = ids::DISPLAY_NOTIFY, Base;
    ClearNotify(Empty) = ids::CLEAR_NOTIFY, Base;
    ActivateCallPlane(ActivateCallPlane) = ids::ACTIVATE_CALL_PLANE, Base;
    DeactivateCallPlane(Empty) = ids::DEACTIVATE_CALL_PLANE, Base;
    UnregisterAck(UnregisterAck) = ids::UNREGISTER_ACK, Base;
    BackSpaceReq(BackSpaceReq) = ids::BACK_SPACE_REQ, Base;
    RegisterTokenAck(Empty) = ids::REGISTER_TOKEN_ACK, Base;
    RegisterTokenReject(RegisterTokenReject) = ids::REGISTER_TOKEN_REJECT, Base;
    DialedNumber(DialedNumber) = ids::DIALED_NUMBER, Base;
    DialedNumberV19(DialedNumberV19) = ids::DIALED_NUMBER, V19;
    UserToDeviceData(UserData) = ids::USER_TO_DEVICE_DATA, Base;
    FeatureStat(FeatureStat) = ids::FEATURE_STAT, Base;
    DisplayPriNotify(DisplayPriNotify) = ids::DISPLAY_PRI_NOTIFY, Base;
    ClearPriNotify(Empty) = ids::CLEAR_PRI_NOTIFY, Base;
    ServiceUrlStat(ServiceUrlStat) = ids::SERVICE_URL_STAT, Base;
    CallSelectStat(CallSelectStat) = ids::CALL_SELECT_STAT, Base;
    OpenMultiMediaChannel(OpenMultiMediaChannel) = ids::OPEN_MULTI_MEDIA_CHANNEL, Base;
    OpenMultiMediaChannelV17(OpenMultiMediaChannel) = ids::OPEN_MULTI_MEDIA_CHANNEL, V17;
    StartMultiMediaTransmission(StartMultiMediaTransmission) = ids::START_MULTI_MEDIA_TRANSMISSION, Base;
    StartMultiMediaTransmissionV17(StartMultiMediaTransmissionV17) = ids::START_MULTI_MEDIA_TRANSMISSION, V17;
    StopMultiMediaTransmission(StopMediaTransmission) = ids::STOP_MULTI_MEDIA_TRANSMISSION, Base;
    MiscellaneousCommand(MiscellaneousCommand) = ids::MISCELLANEOUS_COMMAND, Base;
    FlowControlCommand(FlowControlCommand) = ids::FLOW_CONTROL_COMMAND, Base;
    CloseMultiMediaReceiveChannel(CloseReceiveChannel) = ids::CLOSE_MULTI_MEDIA_RECEIVE_CHANNEL, Base;
    CreateConferenceReq(CreateConferenceReq) = ids::CREATE_CONFERENCE_REQ, Base;
    DeleteConferenceReq(DeleteConferenceReq) = ids::DELETE_CONFERENCE_REQ, Base;
    UserToDeviceDataVersion1(UserDataVersion1) = ids::USER_TO_DEVICE_DATA_VERSION1, Base;
    Unknown0141(FlowControlCommand) = ids::UNKNOWN_0X0141, Base;
    DisplayDynamicNotify(DisplayDynamicNotify) = ids::DISPLAY_DYNAMIC_NOTIFY, Base;
    DisplayDynamicPriNotify(DisplayDynamicPriNotify) = ids::DISPLAY_DYNAMIC_PRI_NOTIFY, Base;
    DisplayDynamicPromptStatus(DisplayDynamicPromptStatus) = ids::DISPLAY_DYNAMIC_PROMPT_STATUS, Base;
    FeatureStatDynamic(FeatureStatDynamic) = ids::FEATURE_STAT_DYNAMIC, Base;
    LineStatDynamic(LineStatDynamic) = ids::LINE_STAT_DYNAMIC, Base;
    ServiceUrlStatDynamic(ServiceUrlStatDynamic) = ids::SERVICE_URL_STAT_DYNAMIC, Base;
    SpeedDialStatDynamic(SpeedDialStatDynamic) = ids::SPEED_DIAL_STAT_DYNAMIC, Base;
    CallInfoDynamic(CallInfoDynamic) = ids::CALL_INFO_DYNAMIC, Base;

    DialedPhoneBookAck(DialedPhoneBookAck) = ids::DIALED_PHONE_BOOK_ACK, Base;
    StartMediaTransmissionAck(StartMediaTransmissionAck) = ids::START_MEDIA_TRANSMISSION_ACK, Base;
    ExtensionDeviceCaps(ExtensionDeviceCaps) = ids::EXTENSION_DEVICE_CAPS, Base;
    XmlAlarm(XmlAlarm) = ids::XML_ALARM, Base;

    SpcpRegisterTokenReq(SpcpRegisterTokenReq) = ids::SPCP_REGISTER_TOKEN_REQ, Base;
    SpcpRegisterTokenAck(SpcpRegisterTokenResult) = ids::SPCP_REGISTER_TOKEN_ACK, Base;
    SpcpRegisterTokenReject(SpcpRegisterTokenResult) = ids::SPCP_REGISTER_TOKEN_REJECT, Base;
}

impl Message {
    /// Human-readable name of the message id.
    pub fn name(&self) -> &'static str {
        ids::message_name(self.id())
    }

    pub fn direction(&self) -> Direction {
        ids::direction(self.id())
    }

    /// Encoded payload length in bytes.
    pub fn payload_len(&self) -> usize {
        let mut buf = BytesMut::new();
        self.put_payload(&mut buf);
        buf.len()
    }
}

/// All catalogue rows, in id order per band.
pub fn entries() -> &'static [CatalogueEntry] {
    ENTRIES
}

/// The layout for `id` at protocol `version`.
///
/// Falls back to the nearest lower band when the id has no layout for the
/// version's own band.
pub fn lookup(id: u32, version: u8) -> Option<&'static CatalogueEntry> {
    let band = VersionBand::from_version(version);
    ENTRIES
        .iter()
        .filter(|entry| entry.id == id && entry.band <= band)
        .max_by_key(|entry| entry.band)
}

/// Expected decoded size of the lowest-band layout of `id`.
pub fn base_size(id: u32) -> Option<usize> {
    ENTRIES
        .iter()
        .filter(|entry| entry.id == id)
        .min_by_key(|entry| entry.band)
        .map(|entry| entry.size)
}

/// Bands for which `id` has a dedicated layout.
pub fn bands(id: u32) -> Vec<VersionBand> {
    let mut bands: Vec<VersionBand> = ENTRIES
        .iter()
        .filter(|entry| entry.id == id)
        .map(|entry| entry.band)
        .collect();
    bands.sort();
    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn band_boundaries() {
        assert_eq!(VersionBand::from_version(3), VersionBand::Base);
        assert_eq!(VersionBand::from_version(16), VersionBand::Base);
        assert_eq!(VersionBand::from_version(17), VersionBand::V17);
        assert_eq!(VersionBand::from_version(18), VersionBand::V17);
        assert_eq!(VersionBand::from_version(19), VersionBand::V19);
        assert_eq!(VersionBand::from_version(22), VersionBand::V19);
    }

    #[test]
    fn lookup_picks_band_variant() {
        let base = lookup(ids::OPEN_RECEIVE_CHANNEL_ACK, 11).unwrap();
        assert_eq!(base.variant, "OpenReceiveChannelAck");
        let v17 = lookup(ids::OPEN_RECEIVE_CHANNEL_ACK, 17).unwrap();
        assert_eq!(v17.variant, "OpenReceiveChannelAckV17");
    }

    #[test]
    fn lookup_falls_back_to_lower_band() {
        let entry = lookup(ids::OPEN_RECEIVE_CHANNEL_ACK, 20).unwrap();
        assert_eq!(entry.band, VersionBand::V17);

        let entry = lookup(ids::FORWARD_STAT, 18).unwrap();
        assert_eq!(entry.band, VersionBand::Base);

        let entry = lookup(ids::FORWARD_STAT, 19).unwrap();
        assert_eq!(entry.variant, "ForwardStatV19");
    }

    #[test]
    fn lookup_unknown_id() {
        assert!(lookup(0x0084, 17).is_none());
        assert!(base_size(0x0084).is_none());
    }

    #[test]
    fn base_size_uses_lowest_band() {
        assert_eq!(base_size(ids::OPEN_RECEIVE_CHANNEL_ACK), Some(20));
        assert_eq!(base_size(ids::KEEP_ALIVE), Some(0));
        assert_eq!(base_size(ids::KEYPAD_BUTTON), Some(12));
    }

    #[test]
    fn multimedia_channel_layouts_are_typed() {
        assert_eq!(VideoParameter::SIZE, 104);
        assert_eq!(base_size(ids::OPEN_MULTI_MEDIA_CHANNEL), Some(136));
        assert_eq!(base_size(ids::START_MULTI_MEDIA_TRANSMISSION), Some(140));

        let v17 = lookup(ids::START_MULTI_MEDIA_TRANSMISSION, 17).unwrap();
        assert_eq!(v17.variant, "StartMultiMediaTransmissionV17");
        assert_eq!(v17.size, 156);
        let v17 = lookup(ids::OPEN_MULTI_MEDIA_CHANNEL, 20).unwrap();
        assert_eq!(v17.band, VersionBand::V17);
    }

    #[test]
    fn entries_are_unique_per_band() {
        let mut seen = HashSet::new();
        for entry in entries() {
            assert!(seen.insert((entry.id, entry.band)), "duplicate {entry:?}");
            assert!(ids::is_known(entry.id), "unnamed id {:#06x}", entry.id);
        }
    }

    #[test]
    fn max_payload_covers_user_data() {
        assert!(MAX_PAYLOAD_SIZE >= UserDataVersion1::MAX_SIZE);
        assert!(entries().iter().all(|entry| entry.max_size <= MAX_PAYLOAD_SIZE));
    }

    #[test]
    fn message_reports_identity() {
        let msg = Message::ForwardStatV19(ForwardStatV19::default());
        assert_eq!(msg.id(), ids::FORWARD_STAT);
        assert_eq!(msg.band(), Some(VersionBand::V19));
        assert_eq!(msg.name(), "Forward State Message");
        assert_eq!(msg.variant_name(), "ForwardStatV19");
        assert_eq!(msg.direction(), Direction::ServerToPhone);
    }
}
