//! Outbound message builders, one per layout generation.
//!
//! Descriptors bind a set of these to a protocol version; callers normally go
//! through [`DeviceProtocol`](crate::DeviceProtocol) instead of calling them
//! directly.

use skinny_wire::messages::{
    CallInfo, CallInfoDynamic, DialedNumber, DialedNumberV19, DisplayDynamicNotify,
    DisplayDynamicPriNotify, DisplayDynamicPromptStatus, DisplayNotify, DisplayPriNotify,
    DisplayPromptStatus, ForwardStat, ForwardStatV19, RegisterAck, UserData, UserDataVersion1,
};
use skinny_wire::{Blob, FixedStr, Message};

/// Party information for a call-info message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallDetails {
    pub line_instance: u32,
    pub call_reference: u32,
    /// 1 inbound, 2 outbound, 3 forward.
    pub call_type: u32,
    pub calling_name: String,
    pub calling_number: String,
    pub called_name: String,
    pub called_number: String,
    pub original_called_name: String,
    pub original_called_number: String,
    pub last_redirecting_name: String,
    pub last_redirecting_number: String,
    pub original_cdpn_redirect_reason: u32,
    pub last_redirecting_reason: u32,
    pub cgpn_voice_mailbox: String,
    pub cdpn_voice_mailbox: String,
    pub original_cdpn_voice_mailbox: String,
    pub last_redirecting_voice_mailbox: String,
    pub call_instance: u32,
    pub security_status: u32,
    /// Presentation restriction bits, calling name at bit 0.
    pub presentation_restrictions: u32,
}

/// Registration parameters echoed back to the phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAckParams {
    pub keep_alive: u32,
    pub secondary_keep_alive: u32,
    pub date_format: String,
}

impl Default for RegisterAckParams {
    fn default() -> Self {
        Self {
            keep_alive: 60,
            secondary_keep_alive: 60,
            date_format: "D.M.Y".to_string(),
        }
    }
}

/// Call-forward state of one line as shown on the phone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardState {
    pub line_instance: u32,
    pub all: Option<String>,
    pub busy: Option<String>,
    pub no_answer: Option<String>,
}

impl ForwardState {
    fn active(&self) -> bool {
        self.all.is_some() || self.busy.is_some() || self.no_answer.is_some()
    }
}

/// Application data pushed to the phone (XML services).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDataRequest {
    pub app_id: u32,
    pub line_instance: u32,
    pub call_reference: u32,
    pub transaction_id: u32,
    pub priority: u32,
    pub data: String,
}

fn flag(set: bool) -> u32 {
    u32::from(set)
}

fn forward_number(number: &Option<String>) -> FixedStr<24> {
    FixedStr::new(number.as_deref().unwrap_or_default())
}

pub fn call_info_static(call: &CallDetails) -> Message {
    Message::CallInfo(CallInfo {
        calling_party_name: FixedStr::new(&call.calling_name),
        calling_party: FixedStr::new(&call.calling_number),
        called_party_name: FixedStr::new(&call.called_name),
        called_party: FixedStr::new(&call.called_number),
        line_id: call.line_instance,
        call_ref: call.call_reference,
        call_type: call.call_type,
        original_called_party_name: FixedStr::new(&call.original_called_name),
        original_called_party: FixedStr::new(&call.original_called_number),
        last_redirecting_party_name: FixedStr::new(&call.last_redirecting_name),
        last_redirecting_party: FixedStr::new(&call.last_redirecting_number),
        original_cdpn_redirect_reason: call.original_cdpn_redirect_reason,
        last_redirecting_reason: call.last_redirecting_reason,
        cgpn_voice_mailbox: FixedStr::new(&call.cgpn_voice_mailbox),
        cdpn_voice_mailbox: FixedStr::new(&call.cdpn_voice_mailbox),
        original_cdpn_voice_mailbox: FixedStr::new(&call.original_cdpn_voice_mailbox),
        last_redirecting_voice_mailbox: FixedStr::new(&call.last_redirecting_voice_mailbox),
        call_instance: call.call_instance,
        call_security_status: call.security_status,
        party_pi_restriction_bits: call.presentation_restrictions,
    })
}

pub fn call_info_dynamic(call: &CallDetails) -> Message {
    let mut msg = CallInfoDynamic {
        line_id: call.line_instance,
        call_ref: call.call_reference,
        call_type: call.call_type,
        original_cdpn_redirect_reason: call.original_cdpn_redirect_reason,
        last_redirecting_reason: call.last_redirecting_reason,
        call_instance: call.call_instance,
        call_security_status: call.security_status,
        party_pi_restriction_bits: call.presentation_restrictions,
        ..CallInfoDynamic::default()
    };
    msg.set_parts(&[
        call.calling_number.as_str(),
        call.called_number.as_str(),
        call.original_called_number.as_str(),
        call.last_redirecting_number.as_str(),
        call.cgpn_voice_mailbox.as_str(),
        call.cdpn_voice_mailbox.as_str(),
        call.original_cdpn_voice_mailbox.as_str(),
        call.last_redirecting_voice_mailbox.as_str(),
        call.calling_name.as_str(),
        call.called_name.as_str(),
        call.original_called_name.as_str(),
        call.last_redirecting_name.as_str(),
    ]);
    Message::CallInfoDynamic(msg)
}

pub fn dialed_number_static(number: &str, line_instance: u32, call_reference: u32) -> Message {
    Message::DialedNumber(DialedNumber {
        called_party: FixedStr::new(number),
        line_instance,
        call_reference,
    })
}

pub fn dialed_number_v19(number: &str, line_instance: u32, call_reference: u32) -> Message {
    Message::DialedNumberV19(DialedNumberV19 {
        called_party: FixedStr::new(number),
        line_instance,
        call_reference,
        padding: [0; 3],
    })
}

pub fn register_ack_legacy(version: u8, params: &RegisterAckParams) -> Message {
    Message::RegisterAck(RegisterAck {
        keep_alive_interval: params.keep_alive,
        date_template: FixedStr::new(&params.date_format),
        secondary_keep_alive_interval: params.secondary_keep_alive,
        protocol_version: version,
        ..RegisterAck::default()
    })
}

/// Version 17 phones expect feature flags in the trailing bytes.
pub fn register_ack_v17(version: u8, params: &RegisterAckParams) -> Message {
    Message::RegisterAck(RegisterAck {
        keep_alive_interval: params.keep_alive,
        date_template: FixedStr::new(&params.date_format),
        secondary_keep_alive_interval: params.secondary_keep_alive,
        protocol_version: version,
        unknown1: 0x20,
        unknown2: 0xF1,
        unknown3: 0xFF,
        ..RegisterAck::default()
    })
}

pub fn display_prompt_static(line_instance: u32, call_reference: u32, timeout: u32, text: &str) -> Message {
    Message::DisplayPromptStatus(DisplayPromptStatus {
        timeout,
        prompt: FixedStr::new(text),
        line_instance,
        call_reference,
    })
}

pub fn display_prompt_dynamic(line_instance: u32, call_reference: u32, timeout: u32, text: &str) -> Message {
    Message::DisplayDynamicPromptStatus(DisplayDynamicPromptStatus {
        timeout,
        line_instance,
        call_reference,
        text: Blob::text(text),
    })
}

pub fn display_notify_static(timeout: u32, text: &str) -> Message {
    Message::DisplayNotify(DisplayNotify {
        timeout,
        message: FixedStr::new(text),
    })
}

pub fn display_notify_dynamic(timeout: u32, text: &str) -> Message {
    Message::DisplayDynamicNotify(DisplayDynamicNotify {
        timeout,
        text: Blob::text(text),
    })
}

pub fn display_pri_notify_static(priority: u32, timeout: u32, text: &str) -> Message {
    Message::DisplayPriNotify(DisplayPriNotify {
        timeout,
        priority,
        message: FixedStr::new(text),
    })
}

pub fn display_pri_notify_dynamic(priority: u32, timeout: u32, text: &str) -> Message {
    Message::DisplayDynamicPriNotify(DisplayDynamicPriNotify {
        timeout,
        priority,
        text: Blob::text(text),
    })
}

pub fn forward_status_static(state: &ForwardState) -> Message {
    Message::ForwardStat(ForwardStat {
        status: flag(state.active()),
        line_number: state.line_instance,
        cfwd_all_status: flag(state.all.is_some()),
        cfwd_all_number: forward_number(&state.all),
        cfwd_busy_status: flag(state.busy.is_some()),
        cfwd_busy_number: forward_number(&state.busy),
        cfwd_no_answer_status: flag(state.no_answer.is_some()),
        cfwd_no_answer_number: forward_number(&state.no_answer),
    })
}

pub fn forward_status_v19(state: &ForwardState) -> Message {
    Message::ForwardStatV19(ForwardStatV19 {
        status: flag(state.active()),
        line_number: state.line_instance,
        cfwd_all_status: flag(state.all.is_some()),
        cfwd_all_number: forward_number(&state.all),
        cfwd_busy_status: flag(state.busy.is_some()),
        cfwd_busy_number: forward_number(&state.busy),
        cfwd_no_answer_status: flag(state.no_answer.is_some()),
        cfwd_no_answer_number: forward_number(&state.no_answer),
        unknown: 0x000000FF,
    })
}

pub fn user_data_plain(request: &UserDataRequest) -> Message {
    Message::UserToDeviceData(UserData::new(
        request.app_id,
        request.line_instance,
        request.call_reference,
        request.transaction_id,
        &request.data,
    ))
}

pub fn user_data_version1(request: &UserDataRequest) -> Message {
    let mut msg = UserDataVersion1::new(
        request.app_id,
        request.line_instance,
        request.call_reference,
        request.transaction_id,
        &request.data,
    );
    msg.sequence_flag = 0x0002;
    msg.display_priority = request.priority;
    msg.routing = 0x0001;
    Message::UserToDeviceDataVersion1(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_state_flags() {
        let state = ForwardState {
            line_instance: 2,
            busy: Some("300".to_string()),
            ..ForwardState::default()
        };
        match forward_status_static(&state) {
            Message::ForwardStat(msg) => {
                assert_eq!(msg.status, 1);
                assert_eq!(msg.cfwd_all_status, 0);
                assert_eq!(msg.cfwd_busy_status, 1);
                assert_eq!(msg.cfwd_busy_number.as_str(), "300");
                assert_eq!(msg.line_number, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn dynamic_call_info_orders_numbers_before_names() {
        let call = CallDetails {
            calling_number: "100".to_string(),
            calling_name: "Alice".to_string(),
            called_number: "200".to_string(),
            called_name: "Bob".to_string(),
            ..CallDetails::default()
        };
        match call_info_dynamic(&call) {
            Message::CallInfoDynamic(msg) => {
                let parts = msg.parts();
                assert_eq!(parts[0], "100");
                assert_eq!(parts[1], "200");
                assert_eq!(parts[8], "Alice");
                assert_eq!(parts[9], "Bob");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn long_prompt_truncated_on_static_layout() {
        let text = "A very long prompt that does not fit into thirty-two bytes";
        match display_prompt_static(1, 2, 0, text) {
            Message::DisplayPromptStatus(msg) => assert_eq!(msg.prompt.as_str().len(), 31),
            other => panic!("unexpected {other:?}"),
        }
        match display_prompt_dynamic(1, 2, 0, text) {
            Message::DisplayDynamicPromptStatus(msg) => assert_eq!(msg.text.as_text(), text),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn user_data_version1_carries_priority() {
        let request = UserDataRequest {
            priority: 2,
            data: "<CiscoIPPhoneText/>".to_string(),
            ..UserDataRequest::default()
        };
        match user_data_version1(&request) {
            Message::UserToDeviceDataVersion1(msg) => {
                assert_eq!(msg.display_priority, 2);
                assert_eq!(msg.data_length, 19);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
