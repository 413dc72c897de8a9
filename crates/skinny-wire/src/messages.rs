//! Message payload layouts.
//!
//! One struct per layout. Layouts that differ between protocol bands carry a
//! `V17`/`V19` suffix; the catalogue binds each to its id and band.

use std::net::{IpAddr, Ipv4Addr};

use bytes::BytesMut;
use serde::Serialize;

use crate::field::{serialize_array, Blob, FixedStr, IpAddr16, Ipv4Be, WireField};

pub const DEVICE_NAME_SIZE: usize = 16;
pub const DIRNUM_SIZE: usize = 24;
pub const NAME_SIZE: usize = 40;
pub const BUTTON_TEMPLATE_NAME_SIZE: usize = 44;
pub const DISPLAY_TEXT_SIZE: usize = 32;
pub const DISPLAY_NOTIFY_SIZE: usize = 32;
pub const SERVICE_URL_SIZE: usize = 256;
pub const MAX_SERVERS: usize = 5;
pub const SERVER_NAME_SIZE: usize = 48;
pub const MAX_PORTS: usize = 16;
pub const MAX_XML_MESSAGE: usize = 2048;
pub const SOFT_KEY_LABEL_SIZE: usize = 16;
pub const MAX_SOFT_KEY_DEFINITION: usize = 32;
pub const MAX_SOFT_KEY_SET_DEFINITION: usize = 16;
pub const MAX_SOFT_KEY_INDEX: usize = 16;
pub const VERSION_SIZE: usize = 16;
pub const DATE_TEMPLATE_SIZE: usize = 6;
pub const MAX_BUTTON_TEMPLATE_SIZE: usize = 56;
pub const MAX_CAPABILITIES: usize = 18;
pub const MAX_DYNAMIC_TEXT: usize = 256;
pub const MAX_OPAQUE_BODY: usize = 1024;
pub const MAX_PICTURE_FORMATS: usize = 5;

/// Generates a payload struct with its field-by-field `WireField` impl.
macro_rules! wire_struct {
    ($(
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty ),* $(,)?
        }
    )*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl WireField for $name {
            const SIZE: usize = 0 $( + <$ty as WireField>::SIZE )*;
            const MAX_SIZE: usize = 0 $( + <$ty as WireField>::MAX_SIZE )*;

            #[allow(unused_variables)]
            fn put(&self, dst: &mut BytesMut) {
                $( self.$field.put(dst); )*
            }

            #[allow(unused_variables)]
            fn get(src: &mut &[u8]) -> Self {
                Self { $( $field: <$ty as WireField>::get(src), )* }
            }

            fn zeroed() -> Self {
                Self { $( $field: <$ty as WireField>::zeroed(), )* }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as WireField>::zeroed()
            }
        }
    )*};
}

// Shared sub-records.
wire_struct! {
    pub struct StationIdentifier {
        pub device_name: FixedStr<DEVICE_NAME_SIZE>,
        pub user_id: u32,
        pub instance: u32,
    }

    pub struct StationButtonDefinition {
        pub instance: u8,
        pub definition: u8,
    }

    pub struct MediaCapability {
        pub payload_capability: u32,
        pub max_frames_per_packet: u32,
        pub payload_params: [u8; 8],
    }

    pub struct StationSoftKeyDefinition {
        pub label: FixedStr<SOFT_KEY_LABEL_SIZE>,
        pub event: u32,
    }

    pub struct StationSoftKeySetDefinition {
        pub template_index: [u8; MAX_SOFT_KEY_INDEX],
        pub info_index: [u16; MAX_SOFT_KEY_INDEX],
    }

    pub struct ServerIdentifier {
        pub name: FixedStr<SERVER_NAME_SIZE>,
    }
}

// Payload-less messages share one layout.
wire_struct! {
    pub struct Empty {}
}

// Phone -> server.
wire_struct! {
    pub struct Register {
        pub station: StationIdentifier,
        pub station_ip: Ipv4Be,
        pub device_type: u32,
        pub max_streams: u32,
        pub active_streams: u32,
        /// Low byte carries the protocol version the phone speaks.
        pub phone_features: u32,
        pub socket_type: u32,
        pub unknown1: u32,
        pub bytes1: [u8; 12],
        pub unknown2: u32,
        pub max_buttons: u32,
        pub ipv6_address: IpAddr16,
        pub unknown3: u32,
        pub load_info: FixedStr<32>,
    }

    pub struct IpPort {
        pub rtp_media_port: u32,
    }

    pub struct KeypadButton {
        pub button: u32,
        pub line_instance: u32,
        pub call_reference: u32,
    }

    pub struct EnblocCall {
        pub called_party: FixedStr<DIRNUM_SIZE>,
    }

    pub struct Stimulus {
        pub stimulus: u32,
        pub instance: u32,
    }

    pub struct OffHookWithCgpn {
        pub calling_party_number: FixedStr<DIRNUM_SIZE>,
    }

    pub struct MediaResourceNotification {
        pub device_type: u32,
        pub number_of_in_service_streams: u32,
        pub max_streams_per_conf: u32,
        pub number_of_out_of_service_streams: u32,
    }

    pub struct ForwardStatReq {
        pub line_number: u32,
    }

    pub struct SpeedDialStatReq {
        pub number: u32,
    }

    pub struct LineStatReq {
        pub line_number: u32,
    }

    pub struct ButtonTemplateReq {
        pub total_button_count: u32,
    }

    pub struct CapabilitiesRes {
        pub count: u32,
        pub caps: [MediaCapability; MAX_CAPABILITIES],
    }

    pub struct MediaPortList {
        pub port_count: u32,
        pub ports: [u32; MAX_PORTS],
    }

    pub struct Alarm {
        pub severity: u32,
        pub text: FixedStr<80>,
        pub parm1: u32,
        pub parm2: u32,
    }

    pub struct MulticastMediaReceptionAck {
        pub reception_status: u32,
        pub pass_thru_party_id: u32,
    }

    pub struct OpenReceiveChannelAck {
        pub status: u32,
        pub ip_addr: Ipv4Be,
        pub port: u32,
        pub pass_thru_party_id: u32,
        pub call_reference: u32,
    }

    pub struct OpenReceiveChannelAckV17 {
        pub status: u32,
        pub unknown1: u32,
        pub ip_addr: IpAddr16,
        pub port: u32,
        pub pass_thru_party_id: u32,
        pub call_reference: u32,
    }

    pub struct ConnectionStatisticsRes {
        pub dirnum: FixedStr<DIRNUM_SIZE>,
        pub call_identifier: u32,
        pub stats_processing_type: u32,
        pub packets_sent: u32,
        pub octets_sent: u32,
        pub packets_received: u32,
        pub octets_received: u32,
        pub packets_lost: u32,
        pub jitter: u32,
        pub latency: u32,
    }

    pub struct ConnectionStatisticsResV19 {
        pub dirnum: FixedStr<28>,
        pub call_identifier: u32,
        pub packets_sent: u32,
        pub octets_sent: u32,
        pub packets_received: u32,
        pub octets_received: u32,
        pub packets_lost: u32,
        pub jitter: u32,
        pub latency: u32,
        pub trailer: [u8; 2],
    }

    pub struct SoftKeyEvent {
        pub event: u32,
        pub line_instance: u32,
        pub call_reference: u32,
    }

    pub struct RegisterTokenReq {
        pub station: StationIdentifier,
        pub station_ip: Ipv4Be,
        pub device_type: u32,
        pub ipv6_address: IpAddr16,
        pub unknown: u32,
    }

    pub struct HeadsetStatus {
        pub mode: u32,
    }

    pub struct RegisterAvailableLines {
        pub max_lines: u32,
    }

    pub struct ClearConference {
        pub conference_id: u32,
        pub service_num: u32,
    }

    pub struct ServiceUrlStatReq {
        pub index: u32,
    }

    pub struct FeatureStatReq {
        pub instance: u32,
        pub unknown: u32,
    }

    pub struct DialedPhoneBook {
        pub index: u32,
        pub line_instance: u32,
        pub unknown: u32,
        pub phone_number: FixedStr<260>,
    }

    pub struct AccessoryStatus {
        pub accessory: u32,
        pub status: u32,
        pub unknown: u32,
    }

    pub struct Unknown004A {
        pub unknown1: u32,
        pub unknown2: u32,
        pub unknown3: u32,
    }

    pub struct DialedPhoneBookAck {
        pub index: u32,
        pub line_instance: u32,
        pub unknown: u32,
        pub unknown2: u32,
    }

    pub struct StartMediaTransmissionAck {
        pub call_reference: u32,
        pub pass_thru_party_id: u32,
        pub call_reference1: u32,
        pub unknown1: u32,
        pub ip_addr: IpAddr16,
        pub port: u32,
        pub status: u32,
        pub unknown2: u32,
    }

    pub struct ExtensionDeviceCaps {
        #[serde(serialize_with = "serialize_array")]
        pub data: [u8; 168],
    }

    pub struct XmlAlarm {
        pub data: Blob<2004>,
    }
}

// Application data carried in both directions.
wire_struct! {
    pub struct UserData {
        pub app_id: u32,
        pub line_instance: u32,
        pub call_reference: u32,
        pub transaction_id: u32,
        pub data_length: u32,
        pub data: Blob<MAX_XML_MESSAGE>,
    }

    pub struct UserDataVersion1 {
        pub app_id: u32,
        pub line_instance: u32,
        pub call_reference: u32,
        pub transaction_id: u32,
        pub data_length: u32,
        pub sequence_flag: u32,
        pub display_priority: u32,
        pub conference_id: u32,
        pub app_instance_id: u32,
        pub routing: u32,
        pub data: Blob<MAX_XML_MESSAGE>,
    }

    pub struct PictureFormat {
        pub format: u32,
        pub mpi: u32,
    }

    /// Video negotiation block shared by the multimedia channel messages.
    pub struct VideoParameter {
        pub bit_rate: u32,
        pub picture_format_count: u32,
        pub picture_format: [PictureFormat; MAX_PICTURE_FORMATS],
        pub conf_service_num: u32,
        pub profile: u32,
        pub level: u32,
        pub macroblocks_per_sec: u32,
        pub macroblocks_per_frame: u32,
        pub dec_pic_buf: u32,
        pub br_and_cpb: u32,
        pub dummy1: u16,
        pub dummy2: u16,
        pub reserved: [u32; 6],
    }

    pub struct OpenMultiMediaChannel {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub payload_capability: u32,
        pub line_instance: u32,
        pub call_reference: u32,
        pub payload_rfc_number: u32,
        pub payload_type: u32,
        /// Zero unless the phone hosts the conference.
        pub is_conference_creator: u32,
        pub video_parameter: VideoParameter,
    }

    pub struct StartMultiMediaTransmission {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub payload_capability: u32,
        pub remote_ip: Ipv4Be,
        pub remote_port: u32,
        pub call_reference: u32,
        pub payload_rfc_number: u32,
        pub payload_type: u32,
        pub dscp_value: u32,
        pub video_parameter: VideoParameter,
    }

    pub struct StartMultiMediaTransmissionV17 {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub payload_capability: u32,
        pub unknown1: u32,
        pub remote_ip: IpAddr16,
        pub remote_port: u32,
        pub call_reference: u32,
        pub payload_rfc_number: u32,
        pub payload_type: u32,
        pub dscp_value: u32,
        pub video_parameter: VideoParameter,
    }

    /// Capability payloads kept as raw bytes.
    pub struct OpaqueBody {
        pub data: Blob<MAX_OPAQUE_BODY>,
    }
}

impl UserData {
    pub fn new(app_id: u32, line_instance: u32, call_reference: u32, transaction_id: u32, data: &str) -> Self {
        let data = Blob::new(data.as_bytes().to_vec());
        Self {
            app_id,
            line_instance,
            call_reference,
            transaction_id,
            data_length: data.len() as u32,
            data,
        }
    }
}

impl UserDataVersion1 {
    pub fn new(app_id: u32, line_instance: u32, call_reference: u32, transaction_id: u32, data: &str) -> Self {
        let data = Blob::new(data.as_bytes().to_vec());
        Self {
            app_id,
            line_instance,
            call_reference,
            transaction_id,
            data_length: data.len() as u32,
            data,
            ..Self::default()
        }
    }
}

// Server -> phone.
wire_struct! {
    pub struct RegisterAck {
        pub keep_alive_interval: u32,
        pub date_template: FixedStr<DATE_TEMPLATE_SIZE>,
        pub filler1: u8,
        pub filler2: u8,
        pub secondary_keep_alive_interval: u32,
        pub protocol_version: u8,
        pub unknown1: u8,
        pub unknown2: u8,
        pub unknown3: u8,
    }

    pub struct StartTone {
        pub tone: u32,
        pub timeout: u32,
        pub line_instance: u32,
        pub call_reference: u32,
    }

    pub struct StopTone {
        pub line_instance: u32,
        pub call_reference: u32,
        pub unknown1: u32,
    }

    pub struct SetRinger {
        pub ring_mode: u32,
        pub unknown1: u32,
        pub line_instance: u32,
        pub call_reference: u32,
    }

    pub struct SetLamp {
        pub stimulus: u32,
        pub stimulus_instance: u32,
        pub lamp_mode: u32,
    }

    pub struct SetSpeakerMode {
        pub mode: u32,
    }

    pub struct SetMicroMode {
        pub mode: u32,
    }

    pub struct StartMediaTransmission {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub remote_ip: Ipv4Be,
        pub remote_port: u32,
        pub packet_size_ms: u32,
        pub payload_type: u32,
        pub precedence: u32,
        pub ss_value: u32,
        pub max_frames_per_packet: u32,
        pub g723_bit_rate: u32,
        pub conference_id1: u32,
        pub reserved: [u32; 14],
        pub rtp_dtmf_payload: u32,
        pub rtp_timeout: u32,
        pub trailer: [u32; 2],
    }

    pub struct StartMediaTransmissionV17 {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub unknown1: u32,
        pub remote_ip: IpAddr16,
        pub remote_port: u32,
        pub packet_size_ms: u32,
        pub payload_type: u32,
        pub precedence: u32,
        pub ss_value: u32,
        pub max_frames_per_packet: u32,
        pub g723_bit_rate: u32,
        pub conference_id1: u32,
        pub reserved: [u32; 14],
        pub rtp_dtmf_payload: u32,
        pub rtp_timeout: u32,
        pub trailer: [u32; 2],
    }

    pub struct StopMediaTransmission {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub conference_id1: u32,
        pub unknown1: u32,
    }

    pub struct StopMediaReception {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
    }

    pub struct CallInfo {
        pub calling_party_name: FixedStr<NAME_SIZE>,
        pub calling_party: FixedStr<DIRNUM_SIZE>,
        pub called_party_name: FixedStr<NAME_SIZE>,
        pub called_party: FixedStr<DIRNUM_SIZE>,
        pub line_id: u32,
        pub call_ref: u32,
        pub call_type: u32,
        pub original_called_party_name: FixedStr<NAME_SIZE>,
        pub original_called_party: FixedStr<DIRNUM_SIZE>,
        pub last_redirecting_party_name: FixedStr<NAME_SIZE>,
        pub last_redirecting_party: FixedStr<DIRNUM_SIZE>,
        pub original_cdpn_redirect_reason: u32,
        pub last_redirecting_reason: u32,
        pub cgpn_voice_mailbox: FixedStr<DIRNUM_SIZE>,
        pub cdpn_voice_mailbox: FixedStr<DIRNUM_SIZE>,
        pub original_cdpn_voice_mailbox: FixedStr<DIRNUM_SIZE>,
        pub last_redirecting_voice_mailbox: FixedStr<DIRNUM_SIZE>,
        pub call_instance: u32,
        pub call_security_status: u32,
        pub party_pi_restriction_bits: u32,
    }

    /// Call information with the party strings packed NUL-separated after the
    /// fixed header.
    pub struct CallInfoDynamic {
        pub line_id: u32,
        pub call_ref: u32,
        pub call_type: u32,
        pub original_cdpn_redirect_reason: u32,
        pub last_redirecting_reason: u32,
        pub call_instance: u32,
        pub call_security_status: u32,
        pub party_pi_restriction_bits: u32,
        pub strings: Blob<{ 8 * DIRNUM_SIZE + 4 * NAME_SIZE }>,
    }

    pub struct ForwardStat {
        pub status: u32,
        pub line_number: u32,
        pub cfwd_all_status: u32,
        pub cfwd_all_number: FixedStr<DIRNUM_SIZE>,
        pub cfwd_busy_status: u32,
        pub cfwd_busy_number: FixedStr<DIRNUM_SIZE>,
        pub cfwd_no_answer_status: u32,
        pub cfwd_no_answer_number: FixedStr<DIRNUM_SIZE>,
    }

    pub struct ForwardStatV19 {
        pub status: u32,
        pub line_number: u32,
        pub cfwd_all_status: u32,
        pub cfwd_all_number: FixedStr<DIRNUM_SIZE>,
        pub cfwd_busy_status: u32,
        pub cfwd_busy_number: FixedStr<DIRNUM_SIZE>,
        pub cfwd_no_answer_status: u32,
        pub cfwd_no_answer_number: FixedStr<DIRNUM_SIZE>,
        pub unknown: u32,
    }

    pub struct SpeedDialStat {
        pub number: u32,
        pub dir_number: FixedStr<DIRNUM_SIZE>,
        pub display_name: FixedStr<NAME_SIZE>,
    }

    pub struct LineStat {
        pub line_number: u32,
        pub dir_number: FixedStr<DIRNUM_SIZE>,
        pub fully_qualified_display_name: FixedStr<NAME_SIZE>,
        pub display_name: FixedStr<BUTTON_TEMPLATE_NAME_SIZE>,
    }

    pub struct ConfigStat {
        pub station: StationIdentifier,
        pub user_name: FixedStr<NAME_SIZE>,
        pub server_name: FixedStr<NAME_SIZE>,
        pub number_lines: u32,
        pub number_speed_dials: u32,
    }

    pub struct DefineTimeDate {
        pub year: u32,
        pub month: u32,
        pub day_of_week: u32,
        pub day: u32,
        pub hour: u32,
        pub minute: u32,
        pub seconds: u32,
        pub milliseconds: u32,
        pub system_time: u32,
    }

    pub struct ButtonTemplate {
        pub offset: u32,
        pub count: u32,
        pub total: u32,
        #[serde(serialize_with = "serialize_array")]
        pub definition: [StationButtonDefinition; MAX_BUTTON_TEMPLATE_SIZE],
    }

    pub struct Version {
        pub required_version: FixedStr<VERSION_SIZE>,
    }

    pub struct DisplayText {
        pub text: FixedStr<DISPLAY_TEXT_SIZE>,
    }

    pub struct ClearDisplay {
        pub unknown: u32,
    }

    pub struct RegisterReject {
        pub text: FixedStr<DISPLAY_TEXT_SIZE>,
    }

    pub struct ServerRes {
        pub servers: [ServerIdentifier; MAX_SERVERS],
        pub listen_ports: [u32; MAX_SERVERS],
        pub ip_addrs: [Ipv4Be; MAX_SERVERS],
    }

    pub struct Reset {
        pub reset_type: u32,
    }

    pub struct StartMulticastMediaReception {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub multicast_ip: Ipv4Be,
        pub multicast_port: u32,
        pub packet_size_ms: u32,
        pub payload_capability: u32,
        pub echo_cancel_type: u32,
        pub g723_bit_rate: u32,
    }

    pub struct StartMulticastMediaTransmission {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub multicast_ip: Ipv4Be,
        pub multicast_port: u32,
        pub packet_size_ms: u32,
        pub payload_capability: u32,
        pub precedence: u32,
        pub silence_suppression: u32,
        pub max_frames_per_packet: u32,
        pub g723_bit_rate: u32,
    }

    pub struct StopMulticastMedia {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
    }

    pub struct OpenReceiveChannel {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub packet_size_ms: u32,
        pub payload_type: u32,
        pub vad_value: u32,
        pub g723_bit_rate: u32,
        pub conference_id1: u32,
        pub reserved: [u32; 14],
        pub rtp_dtmf_payload: u32,
        pub rtp_timeout: u32,
        pub unknown: [u32; 2],
        pub remote_ip: IpAddr16,
        pub trailer: u32,
    }

    pub struct OpenReceiveChannelV17 {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub packet_size_ms: u32,
        pub payload_type: u32,
        pub vad_value: u32,
        pub g723_bit_rate: u32,
        pub conference_id1: u32,
        pub reserved: [u32; 14],
        pub rtp_dtmf_payload: u32,
        pub rtp_timeout: u32,
        pub unknown: [u32; 3],
        pub remote_ip: IpAddr16,
        pub trailer: [u32; 2],
    }

    pub struct CloseReceiveChannel {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub conference_id1: u32,
    }

    pub struct ConnectionStatisticsReq {
        pub dirnum: FixedStr<DIRNUM_SIZE>,
        pub call_reference: u32,
        pub stats_processing: u32,
    }

    pub struct ConnectionStatisticsReqV19 {
        pub dirnum: FixedStr<DIRNUM_SIZE>,
        pub pad: u8,
        pub call_reference: u32,
        pub stats_processing: u32,
    }

    pub struct SoftKeyTemplateRes {
        pub offset: u32,
        pub count: u32,
        pub total: u32,
        pub definition: [StationSoftKeyDefinition; MAX_SOFT_KEY_DEFINITION],
    }

    pub struct SoftKeySetRes {
        pub offset: u32,
        pub count: u32,
        pub total: u32,
        pub definition: [StationSoftKeySetDefinition; MAX_SOFT_KEY_SET_DEFINITION],
    }

    pub struct SelectSoftKeys {
        pub line_instance: u32,
        pub call_reference: u32,
        pub soft_key_set_index: u32,
        pub valid_key_mask: u32,
    }

    pub struct CallState {
        pub call_state: u32,
        pub line_instance: u32,
        pub call_reference: u32,
        pub visibility: u32,
        pub priority: u32,
        pub unknown3: u32,
    }

    pub struct DisplayPromptStatus {
        pub timeout: u32,
        pub prompt: FixedStr<DISPLAY_TEXT_SIZE>,
        pub line_instance: u32,
        pub call_reference: u32,
    }

    pub struct ClearPromptStatus {
        pub line_instance: u32,
        pub call_reference: u32,
    }

    pub struct DisplayNotify {
        pub timeout: u32,
        pub message: FixedStr<DISPLAY_NOTIFY_SIZE>,
    }

    pub struct DisplayPriNotify {
        pub timeout: u32,
        pub priority: u32,
        pub message: FixedStr<DISPLAY_NOTIFY_SIZE>,
    }

    pub struct ActivateCallPlane {
        pub line_instance: u32,
    }

    pub struct UnregisterAck {
        pub status: u32,
    }

    pub struct BackSpaceReq {
        pub line_instance: u32,
        pub call_reference: u32,
    }

    pub struct RegisterTokenReject {
        pub wait_time: u32,
    }

    pub struct DialedNumber {
        pub called_party: FixedStr<DIRNUM_SIZE>,
        pub line_instance: u32,
        pub call_reference: u32,
    }

    pub struct DialedNumberV19 {
        pub called_party: FixedStr<25>,
        pub line_instance: u32,
        pub call_reference: u32,
        pub padding: [u8; 3],
    }

    pub struct FeatureStat {
        pub instance: u32,
        pub feature_id: u32,
        pub label: FixedStr<NAME_SIZE>,
        pub status: u32,
    }

    pub struct ServiceUrlStat {
        pub index: u32,
        pub url: FixedStr<SERVICE_URL_SIZE>,
        pub label: FixedStr<NAME_SIZE>,
    }

    pub struct CallSelectStat {
        pub status: u32,
        pub call_reference: u32,
        pub line_instance: u32,
    }

    pub struct MiscellaneousCommand {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub call_reference: u32,
        pub command_type: u32,
        pub unknown: [u32; 10],
    }

    pub struct FlowControlCommand {
        pub conference_id: u32,
        pub pass_thru_party_id: u32,
        pub call_reference: u32,
        pub max_bit_rate: u32,
    }

    pub struct CreateConferenceReq {
        pub conference_id: u32,
        pub number_of_reserved_participants: u32,
        pub resource_types_list: u32,
        pub app_id: u32,
        pub app_conference_id: u8,
        pub unknown: FixedStr<31>,
        pub app_data: FixedStr<DIRNUM_SIZE>,
        pub data_length: u32,
        pub pass_thru_data: u8,
    }

    pub struct DeleteConferenceReq {
        pub conference_id: u32,
    }

    pub struct DisplayDynamicNotify {
        pub timeout: u32,
        pub text: Blob<MAX_DYNAMIC_TEXT>,
    }

    pub struct DisplayDynamicPriNotify {
        pub timeout: u32,
        pub priority: u32,
        pub text: Blob<MAX_DYNAMIC_TEXT>,
    }

    pub struct DisplayDynamicPromptStatus {
        pub timeout: u32,
        pub line_instance: u32,
        pub call_reference: u32,
        pub text: Blob<MAX_DYNAMIC_TEXT>,
    }

    pub struct FeatureStatDynamic {
        pub instance: u32,
        pub feature_type: u32,
        pub status: u32,
        pub display_name: FixedStr<NAME_SIZE>,
    }

    pub struct LineStatDynamic {
        pub line_number: u32,
        pub line_type: u32,
        pub strings: Blob<{ DIRNUM_SIZE + NAME_SIZE + BUTTON_TEMPLATE_NAME_SIZE }>,
    }

    pub struct ServiceUrlStatDynamic {
        pub index: u32,
        pub strings: Blob<{ SERVICE_URL_SIZE + NAME_SIZE }>,
    }

    pub struct SpeedDialStatDynamic {
        pub number: u32,
        pub strings: Blob<{ DIRNUM_SIZE + NAME_SIZE }>,
    }
}

// SPCP registration handshake.
wire_struct! {
    pub struct SpcpRegisterTokenReq {
        pub station: StationIdentifier,
        pub station_ip: Ipv4Be,
        pub device_type: u32,
        pub max_streams: u32,
    }

    pub struct SpcpRegisterTokenResult {
        pub features: u32,
    }
}

impl Register {
    /// Protocol version advertised by the phone.
    pub fn protocol_version(&self) -> u8 {
        (self.phone_features & 0xFF) as u8
    }

    /// Address the phone registered from, preferring IPv4.
    pub fn address(&self) -> IpAddr {
        if self.station_ip.0 != Ipv4Addr::UNSPECIFIED {
            IpAddr::V4(self.station_ip.0)
        } else {
            self.ipv6_address.0
        }
    }
}

impl CallInfoDynamic {
    /// Party strings in wire order: calling, called, original called, last
    /// redirecting, then the four voice mailboxes, then the four names.
    pub fn parts(&self) -> Vec<String> {
        self.strings.split_strings(12)
    }

    pub fn set_parts(&mut self, parts: &[&str]) {
        self.strings = Blob::strings(parts);
    }
}
