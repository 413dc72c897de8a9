//! Message ids, human-readable names and direction.
//!
//! The id space is partitioned by direction:
//! - `0x0000..=0x007F` phone to server
//! - `0x0080..=0x014F` server to phone
//! - `0x0150..=0x01FF` phone to server (later extensions)
//! - `0x8000..` SPCP registration handshake

use serde::Serialize;

// Phone -> server.
pub const KEEP_ALIVE: u32 = 0x0000;
pub const REGISTER: u32 = 0x0001;
pub const IP_PORT: u32 = 0x0002;
pub const KEYPAD_BUTTON: u32 = 0x0003;
pub const ENBLOC_CALL: u32 = 0x0004;
pub const STIMULUS: u32 = 0x0005;
pub const OFF_HOOK: u32 = 0x0006;
pub const ON_HOOK: u32 = 0x0007;
pub const HOOK_FLASH: u32 = 0x0008;
pub const FORWARD_STAT_REQ: u32 = 0x0009;
pub const SPEED_DIAL_STAT_REQ: u32 = 0x000A;
pub const LINE_STAT_REQ: u32 = 0x000B;
pub const CONFIG_STAT_REQ: u32 = 0x000C;
pub const TIME_DATE_REQ: u32 = 0x000D;
pub const BUTTON_TEMPLATE_REQ: u32 = 0x000E;
pub const VERSION_REQ: u32 = 0x000F;
pub const CAPABILITIES_RES: u32 = 0x0010;
pub const MEDIA_PORT_LIST: u32 = 0x0011;
pub const SERVER_REQ: u32 = 0x0012;
pub const ALARM: u32 = 0x0020;
pub const MULTICAST_MEDIA_RECEPTION_ACK: u32 = 0x0021;
pub const OPEN_RECEIVE_CHANNEL_ACK: u32 = 0x0022;
pub const CONNECTION_STATISTICS_RES: u32 = 0x0023;
pub const OFF_HOOK_WITH_CGPN: u32 = 0x0024;
pub const SOFT_KEY_SET_REQ: u32 = 0x0025;
pub const SOFT_KEY_EVENT: u32 = 0x0026;
pub const UNREGISTER: u32 = 0x0027;
pub const SOFT_KEY_TEMPLATE_REQ: u32 = 0x0028;
pub const REGISTER_TOKEN_REQ: u32 = 0x0029;
pub const HEADSET_STATUS: u32 = 0x002B;
pub const MEDIA_RESOURCE_NOTIFICATION: u32 = 0x002C;
pub const REGISTER_AVAILABLE_LINES: u32 = 0x002D;
pub const DEVICE_TO_USER_DATA: u32 = 0x002E;
pub const DEVICE_TO_USER_DATA_RESPONSE: u32 = 0x002F;
pub const UPDATE_CAPABILITIES: u32 = 0x0030;
pub const OPEN_MULTI_MEDIA_RECEIVE_CHANNEL_ACK: u32 = 0x0031;
pub const CLEAR_CONFERENCE: u32 = 0x0032;
pub const SERVICE_URL_STAT_REQ: u32 = 0x0033;
pub const FEATURE_STAT_REQ: u32 = 0x0034;
pub const CREATE_CONFERENCE_RES: u32 = 0x0035;
pub const DELETE_CONFERENCE_RES: u32 = 0x0036;
pub const MODIFY_CONFERENCE_RES: u32 = 0x0037;
pub const ADD_PARTICIPANT_RES: u32 = 0x0038;
pub const AUDIT_CONFERENCE_RES: u32 = 0x0039;
pub const AUDIT_PARTICIPANT_RES: u32 = 0x0040;
pub const DEVICE_TO_USER_DATA_VERSION1: u32 = 0x0041;
pub const DEVICE_TO_USER_DATA_RESPONSE_VERSION1: u32 = 0x0042;
pub const DIALED_PHONE_BOOK: u32 = 0x0048;
pub const ACCESSORY_STATUS: u32 = 0x0049;
pub const UNKNOWN_0X004A: u32 = 0x004A;

// Server -> phone.
pub const REGISTER_ACK: u32 = 0x0081;
pub const START_TONE: u32 = 0x0082;
pub const STOP_TONE: u32 = 0x0083;
pub const SET_RINGER: u32 = 0x0085;
pub const SET_LAMP: u32 = 0x0086;
pub const SET_HKF_DETECT: u32 = 0x0087;
pub const SET_SPEAKER_MODE: u32 = 0x0088;
pub const SET_MICRO_MODE: u32 = 0x0089;
pub const START_MEDIA_TRANSMISSION: u32 = 0x008A;
pub const STOP_MEDIA_TRANSMISSION: u32 = 0x008B;
pub const START_MEDIA_RECEPTION: u32 = 0x008C;
pub const STOP_MEDIA_RECEPTION: u32 = 0x008D;
pub const CALL_INFO: u32 = 0x008F;
pub const FORWARD_STAT: u32 = 0x0090;
pub const SPEED_DIAL_STAT: u32 = 0x0091;
pub const LINE_STAT: u32 = 0x0092;
pub const CONFIG_STAT: u32 = 0x0093;
pub const DEFINE_TIME_DATE: u32 = 0x0094;
pub const START_SESSION_TRANSMISSION: u32 = 0x0095;
pub const STOP_SESSION_TRANSMISSION: u32 = 0x0096;
pub const BUTTON_TEMPLATE: u32 = 0x0097;
pub const VERSION: u32 = 0x0098;
pub const DISPLAY_TEXT: u32 = 0x0099;
pub const CLEAR_DISPLAY: u32 = 0x009A;
pub const CAPABILITIES_REQ: u32 = 0x009B;
pub const ENUNCIATOR_COMMAND: u32 = 0x009C;
pub const REGISTER_REJECT: u32 = 0x009D;
pub const SERVER_RES: u32 = 0x009E;
pub const RESET: u32 = 0x009F;
pub const KEEP_ALIVE_ACK: u32 = 0x0100;
pub const START_MULTICAST_MEDIA_RECEPTION: u32 = 0x0101;
pub const START_MULTICAST_MEDIA_TRANSMISSION: u32 = 0x0102;
pub const STOP_MULTICAST_MEDIA_RECEPTION: u32 = 0x0103;
pub const STOP_MULTICAST_MEDIA_TRANSMISSION: u32 = 0x0104;
pub const OPEN_RECEIVE_CHANNEL: u32 = 0x0105;
pub const CLOSE_RECEIVE_CHANNEL: u32 = 0x0106;
pub const CONNECTION_STATISTICS_REQ: u32 = 0x0107;
pub const SOFT_KEY_TEMPLATE_RES: u32 = 0x0108;
pub const SOFT_KEY_SET_RES: u32 = 0x0109;
pub const SELECT_SOFT_KEYS: u32 = 0x0110;
pub const CALL_STATE: u32 = 0x0111;
pub const DISPLAY_PROMPT_STATUS: u32 = 0x0112;
pub const CLEAR_PROMPT_STATUS: u32 = 0x0113;
pub const DISPLAY_NOTIFY: u32 = 0x0114;
pub const CLEAR_NOTIFY: u32 = 0x0115;
pub const ACTIVATE_CALL_PLANE: u32 = 0x0116;
pub const DEACTIVATE_CALL_PLANE: u32 = 0x0117;
pub const UNREGISTER_ACK: u32 = 0x0118;
pub const BACK_SPACE_REQ: u32 = 0x0119;
pub const REGISTER_TOKEN_ACK: u32 = 0x011A;
pub const REGISTER_TOKEN_REJECT: u32 = 0x011B;
pub const START_MEDIA_FAILURE_DETECTION: u32 = 0x011C;
pub const DIALED_NUMBER: u32 = 0x011D;
pub const USER_TO_DEVICE_DATA: u32 = 0x011E;
pub const FEATURE_STAT: u32 = 0x011F;
pub const DISPLAY_PRI_NOTIFY: u32 = 0x0120;
pub const CLEAR_PRI_NOTIFY: u32 = 0x0121;
pub const START_ANNOUNCEMENT: u32 = 0x0122;
pub const STOP_ANNOUNCEMENT: u32 = 0x0123;
pub const ANNOUNCEMENT_FINISH: u32 = 0x0124;
pub const NOTIFY_DTMF_TONE: u32 = 0x0127;
pub const SEND_DTMF_TONE: u32 = 0x0128;
pub const SUBSCRIBE_DTMF_PAYLOAD_REQ: u32 = 0x0129;
pub const SUBSCRIBE_DTMF_PAYLOAD_RES: u32 = 0x012A;
pub const SUBSCRIBE_DTMF_PAYLOAD_ERR: u32 = 0x012B;
pub const UNSUBSCRIBE_DTMF_PAYLOAD_REQ: u32 = 0x012C;
pub const UNSUBSCRIBE_DTMF_PAYLOAD_RES: u32 = 0x012D;
pub const UNSUBSCRIBE_DTMF_PAYLOAD_ERR: u32 = 0x012E;
pub const SERVICE_URL_STAT: u32 = 0x012F;
pub const CALL_SELECT_STAT: u32 = 0x0130;
pub const OPEN_MULTI_MEDIA_CHANNEL: u32 = 0x0131;
pub const START_MULTI_MEDIA_TRANSMISSION: u32 = 0x0132;
pub const STOP_MULTI_MEDIA_TRANSMISSION: u32 = 0x0133;
pub const MISCELLANEOUS_COMMAND: u32 = 0x0134;
pub const FLOW_CONTROL_COMMAND: u32 = 0x0135;
pub const CLOSE_MULTI_MEDIA_RECEIVE_CHANNEL: u32 = 0x0136;
pub const CREATE_CONFERENCE_REQ: u32 = 0x0137;
pub const DELETE_CONFERENCE_REQ: u32 = 0x0138;
pub const MODIFY_CONFERENCE_REQ: u32 = 0x0139;
pub const ADD_PARTICIPANT_REQ: u32 = 0x013A;
pub const DROP_PARTICIPANT_REQ: u32 = 0x013B;
pub const AUDIT_CONFERENCE_REQ: u32 = 0x013C;
pub const AUDIT_PARTICIPANT_REQ: u32 = 0x013D;
pub const USER_TO_DEVICE_DATA_VERSION1: u32 = 0x013F;
pub const UNKNOWN_0X0141: u32 = 0x0141;
pub const DISPLAY_DYNAMIC_NOTIFY: u32 = 0x0143;
pub const DISPLAY_DYNAMIC_PRI_NOTIFY: u32 = 0x0144;
pub const DISPLAY_DYNAMIC_PROMPT_STATUS: u32 = 0x0145;
pub const FEATURE_STAT_DYNAMIC: u32 = 0x0146;
pub const LINE_STAT_DYNAMIC: u32 = 0x0147;
pub const SERVICE_URL_STAT_DYNAMIC: u32 = 0x0148;
pub const SPEED_DIAL_STAT_DYNAMIC: u32 = 0x0149;
pub const CALL_INFO_DYNAMIC: u32 = 0x014A;

// Phone -> server, later extensions.
pub const DIALED_PHONE_BOOK_ACK: u32 = 0x0152;
pub const UNKNOWN_0X0153: u32 = 0x0153;
pub const START_MEDIA_TRANSMISSION_ACK: u32 = 0x0154;
pub const EXTENSION_DEVICE_CAPS: u32 = 0x0159;
pub const XML_ALARM: u32 = 0x015A;

// SPCP.
pub const SPCP_REGISTER_TOKEN_REQ: u32 = 0x8000;
pub const SPCP_REGISTER_TOKEN_ACK: u32 = 0x8100;
pub const SPCP_REGISTER_TOKEN_REJECT: u32 = 0x8101;

/// Which side of the connection sends a message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    PhoneToServer,
    ServerToPhone,
    Spcp,
    Unknown,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::PhoneToServer => "phone->server",
            Direction::ServerToPhone => "server->phone",
            Direction::Spcp => "spcp",
            Direction::Unknown => "unknown",
        }
    }
}

/// Direction implied by the id range.
pub fn direction(id: u32) -> Direction {
    match id {
        0x0000..=0x007F => Direction::PhoneToServer,
        0x0080..=0x014F => Direction::ServerToPhone,
        0x0150..=0x01FF => Direction::PhoneToServer,
        0x8000..=0x81FF => Direction::Spcp,
        _ => Direction::Unknown,
    }
}

/// Returns the human-readable name for a message id.
pub fn message_name(id: u32) -> &'static str {
    match id {
        KEEP_ALIVE => "Keep Alive Message",
        REGISTER => "Register Message",
        IP_PORT => "Ip-Port Message",
        KEYPAD_BUTTON => "Keypad Button Message",
        ENBLOC_CALL => "Enbloc Call Message",
        STIMULUS => "Stimulus Message",
        OFF_HOOK => "Off-Hook Message",
        ON_HOOK => "On-Hook Message",
        HOOK_FLASH => "Hook-Flash Message",
        FORWARD_STAT_REQ => "Forward State Request",
        SPEED_DIAL_STAT_REQ => "Speed-Dial State Request",
        LINE_STAT_REQ => "Line State Request",
        CONFIG_STAT_REQ => "Config State Request",
        TIME_DATE_REQ => "Time Date Request",
        BUTTON_TEMPLATE_REQ => "Button Template Request",
        VERSION_REQ => "Version Request",
        CAPABILITIES_RES => "Capabilities Response Message",
        MEDIA_PORT_LIST => "Media Port List Message",
        SERVER_REQ => "Server Request",
        ALARM => "Alarm Message",
        MULTICAST_MEDIA_RECEPTION_ACK => "Multicast Media Reception Acknowledge",
        OPEN_RECEIVE_CHANNEL_ACK => "Open Receive Channel Acknowledge",
        CONNECTION_STATISTICS_RES => "Connection Statistics Response",
        OFF_HOOK_WITH_CGPN => "Off-Hook With Cgpn Message",
        SOFT_KEY_SET_REQ => "SoftKey Set Request",
        SOFT_KEY_EVENT => "SoftKey Event Message",
        UNREGISTER => "Unregister Message",
        SOFT_KEY_TEMPLATE_REQ => "SoftKey Template Request",
        REGISTER_TOKEN_REQ => "Register Token Request",
        HEADSET_STATUS => "Headset Status Message",
        MEDIA_RESOURCE_NOTIFICATION => "Media Resource Notification",
        REGISTER_AVAILABLE_LINES => "Register Available Lines Message",
        DEVICE_TO_USER_DATA => "Device To User Data Message",
        DEVICE_TO_USER_DATA_RESPONSE => "Device To User Data Response",
        UPDATE_CAPABILITIES => "Update Capabilities Message",
        OPEN_MULTI_MEDIA_RECEIVE_CHANNEL_ACK => "Open MultiMedia Receive Channel Acknowledge",
        CLEAR_CONFERENCE => "Clear Conference Message",
        SERVICE_URL_STAT_REQ => "Service URL State Request",
        FEATURE_STAT_REQ => "Feature State Request",
        CREATE_CONFERENCE_RES => "Create Conference Response",
        DELETE_CONFERENCE_RES => "Delete Conference Response",
        MODIFY_CONFERENCE_RES => "Modify Conference Response",
        ADD_PARTICIPANT_RES => "Add Participant Response",
        AUDIT_CONFERENCE_RES => "Audit Conference Response",
        AUDIT_PARTICIPANT_RES => "Audit Participant Response",
        DEVICE_TO_USER_DATA_VERSION1 => "Device To User Data Version1 Message",
        DEVICE_TO_USER_DATA_RESPONSE_VERSION1 => "Device To User Data Version1 Response",
        DIALED_PHONE_BOOK => "Dialed PhoneBook Message",
        ACCESSORY_STATUS => "Accessory Status Message",
        UNKNOWN_0X004A => "Undefined 0x004A Message",
        REGISTER_ACK => "Register Acknowledge",
        START_TONE => "Start Tone Message",
        STOP_TONE => "Stop Tone Message",
        SET_RINGER => "Set Ringer Message",
        SET_LAMP => "Set Lamp Message",
        SET_HKF_DETECT => "Set HkF Detect Message",
        SET_SPEAKER_MODE => "Set Speaker Mode Message",
        SET_MICRO_MODE => "Set Micro Mode Message",
        START_MEDIA_TRANSMISSION => "Start Media Transmission",
        STOP_MEDIA_TRANSMISSION => "Stop Media Transmission",
        START_MEDIA_RECEPTION => "Start Media Reception",
        STOP_MEDIA_RECEPTION => "Stop Media Reception",
        CALL_INFO => "Call Information Message",
        FORWARD_STAT => "Forward State Message",
        SPEED_DIAL_STAT => "SpeedDial State Message",
        LINE_STAT => "Line State Message",
        CONFIG_STAT => "Config State Message",
        DEFINE_TIME_DATE => "Define Time Date",
        START_SESSION_TRANSMISSION => "Start Session Transmission",
        STOP_SESSION_TRANSMISSION => "Stop Session Transmission",
        BUTTON_TEMPLATE => "Button Template Message",
        VERSION => "Version Message",
        DISPLAY_TEXT => "Display Text Message",
        CLEAR_DISPLAY => "Clear Display",
        CAPABILITIES_REQ => "Capabilities Request",
        ENUNCIATOR_COMMAND => "Enunciator Command Message",
        REGISTER_REJECT => "Register Reject Message",
        SERVER_RES => "Server Response",
        RESET => "Reset",
        KEEP_ALIVE_ACK => "Keep Alive Acknowledge",
        START_MULTICAST_MEDIA_RECEPTION => "Start MulticastMedia Reception",
        START_MULTICAST_MEDIA_TRANSMISSION => "Start MulticastMedia Transmission",
        STOP_MULTICAST_MEDIA_RECEPTION => "Stop MulticastMedia Reception",
        STOP_MULTICAST_MEDIA_TRANSMISSION => "Stop MulticastMedia Transmission",
        OPEN_RECEIVE_CHANNEL => "Open Receive Channel",
        CLOSE_RECEIVE_CHANNEL => "Close Receive Channel",
        CONNECTION_STATISTICS_REQ => "Connection Statistics Request",
        SOFT_KEY_TEMPLATE_RES => "SoftKey Template Response",
        SOFT_KEY_SET_RES => "SoftKey Set Response",
        SELECT_SOFT_KEYS => "Select SoftKeys Message",
        CALL_STATE => "Call State Message",
        DISPLAY_PROMPT_STATUS => "Display Prompt Status Message",
        CLEAR_PROMPT_STATUS => "Clear Prompt Status Message",
        DISPLAY_NOTIFY => "Display Notify Message",
        CLEAR_NOTIFY => "Clear Notify Message",
        ACTIVATE_CALL_PLANE => "Activate Call Plane Message",
        DEACTIVATE_CALL_PLANE => "Deactivate Call Plane Message",
        UNREGISTER_ACK => "Unregister Acknowledge",
        BACK_SPACE_REQ => "Back Space Request",
        REGISTER_TOKEN_ACK => "Register Token Acknowledge",
        REGISTER_TOKEN_REJECT => "Register Token Reject",
        START_MEDIA_FAILURE_DETECTION => "Start Media Failure Detection",
        DIALED_NUMBER => "Dialed Number Message",
        USER_TO_DEVICE_DATA => "User To Device Data Message",
        FEATURE_STAT => "Feature State Message",
        DISPLAY_PRI_NOTIFY => "Display Pri Notify Message",
        CLEAR_PRI_NOTIFY => "Clear Pri Notify Message",
        START_ANNOUNCEMENT => "Start Announcement Message",
        STOP_ANNOUNCEMENT => "Stop Announcement Message",
        ANNOUNCEMENT_FINISH => "Announcement Finish Message",
        NOTIFY_DTMF_TONE => "Notify DTMF Tone Message",
        SEND_DTMF_TONE => "Send DTMF Tone Message",
        SUBSCRIBE_DTMF_PAYLOAD_REQ => "Subscribe DTMF Payload Request",
        SUBSCRIBE_DTMF_PAYLOAD_RES => "Subscribe DTMF Payload Response",
        SUBSCRIBE_DTMF_PAYLOAD_ERR => "Subscribe DTMF Payload Error Message",
        UNSUBSCRIBE_DTMF_PAYLOAD_REQ => "UnSubscribe DTMF Payload Request",
        UNSUBSCRIBE_DTMF_PAYLOAD_RES => "UnSubscribe DTMF Payload Response",
        UNSUBSCRIBE_DTMF_PAYLOAD_ERR => "UnSubscribe DTMF Payload Error Message",
        SERVICE_URL_STAT => "ServiceURL State Message",
        CALL_SELECT_STAT => "Call Select State Message",
        OPEN_MULTI_MEDIA_CHANNEL => "Open MultiMedia Channel Message",
        START_MULTI_MEDIA_TRANSMISSION => "Start MultiMedia Transmission",
        STOP_MULTI_MEDIA_TRANSMISSION => "Stop MultiMedia Transmission",
        MISCELLANEOUS_COMMAND => "Miscellaneous Command Message",
        FLOW_CONTROL_COMMAND => "Flow Control Command Message",
        CLOSE_MULTI_MEDIA_RECEIVE_CHANNEL => "Close MultiMedia Receive Channel",
        CREATE_CONFERENCE_REQ => "Create Conference Request",
        DELETE_CONFERENCE_REQ => "Delete Conference Request",
        MODIFY_CONFERENCE_REQ => "Modify Conference Request",
        ADD_PARTICIPANT_REQ => "Add Participant Request",
        DROP_PARTICIPANT_REQ => "Drop Participant Request",
        AUDIT_CONFERENCE_REQ => "Audit Conference Request",
        AUDIT_PARTICIPANT_REQ => "Audit Participant Request",
        USER_TO_DEVICE_DATA_VERSION1 => "User To Device Data Version1 Message",
        UNKNOWN_0X0141 => "Undefined 0x0141 Message",
        DISPLAY_DYNAMIC_NOTIFY => "Display Dynamic Notify Message",
        DISPLAY_DYNAMIC_PRI_NOTIFY => "Display Dynamic Priority Notify Message",
        DISPLAY_DYNAMIC_PROMPT_STATUS => "Display Dynamic Prompt Status Message",
        FEATURE_STAT_DYNAMIC => "SpeedDial State Dynamic Message",
        LINE_STAT_DYNAMIC => "Line State Dynamic Message",
        SERVICE_URL_STAT_DYNAMIC => "Service URL Stat Dynamic Messages",
        SPEED_DIAL_STAT_DYNAMIC => "SpeedDial Stat Dynamic Message",
        CALL_INFO_DYNAMIC => "Call Information Dynamic Message",
        DIALED_PHONE_BOOK_ACK => "Dialed PhoneBook Ack Message",
        UNKNOWN_0X0153 => "Undefined 0x0153 Message",
        START_MEDIA_TRANSMISSION_ACK => "Start Media Transmission Acknowledge",
        EXTENSION_DEVICE_CAPS => "Extension Device Capabilities Message",
        XML_ALARM => "XML-AlarmMessage",
        SPCP_REGISTER_TOKEN_REQ => "SPCP Register Token RequestCODEC",
        SPCP_REGISTER_TOKEN_ACK => "SCPA RegisterMessageACK",
        SPCP_REGISTER_TOKEN_REJECT => "SCPA RegisterMessageReject",
        _ => "unknownMessage",
    }
}

/// Returns true if the id has an entry in the name table.
pub fn is_known(id: u32) -> bool {
    message_name(id) != "unknownMessage"
}
