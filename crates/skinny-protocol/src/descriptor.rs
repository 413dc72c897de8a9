use std::fmt;

use skinny_wire::messages::Register;
use skinny_wire::{Message, VersionBand};
use tracing::debug;

use crate::builders::{self, CallDetails, ForwardState, RegisterAckParams, UserDataRequest};
use crate::error::{ProtocolError, Result};
use crate::version::ProtocolFamily;

type CallInfoFn = fn(&CallDetails) -> Message;
type DialedNumberFn = fn(&str, u32, u32) -> Message;
type RegisterAckFn = fn(u8, &RegisterAckParams) -> Message;
type PromptFn = fn(u32, u32, u32, &str) -> Message;
type NotifyFn = fn(u32, &str) -> Message;
type PriNotifyFn = fn(u32, u32, &str) -> Message;
type ForwardFn = fn(&ForwardState) -> Message;
type UserDataFn = fn(&UserDataRequest) -> Message;

/// Outbound message behaviour bound to one protocol version.
///
/// Descriptors are static and shared by every device that negotiated a
/// version in their range.
pub struct DeviceProtocol {
    pub name: &'static str,
    pub family: ProtocolFamily,
    pub version: u8,
    call_info: CallInfoFn,
    dialed_number: DialedNumberFn,
    register_ack: RegisterAckFn,
    display_prompt: PromptFn,
    display_notify: NotifyFn,
    display_pri_notify: PriNotifyFn,
    forward_status: ForwardFn,
    user_to_device_data: UserDataFn,
}

impl DeviceProtocol {
    /// Layout band the descriptor's version falls into.
    pub fn band(&self) -> VersionBand {
        VersionBand::from_version(self.version)
    }

    pub fn call_info(&self, call: &CallDetails) -> Message {
        (self.call_info)(call)
    }

    pub fn dialed_number(&self, number: &str, line_instance: u32, call_reference: u32) -> Message {
        (self.dialed_number)(number, line_instance, call_reference)
    }

    /// The acknowledgement advertises the descriptor's own version.
    pub fn register_ack(&self, params: &RegisterAckParams) -> Message {
        (self.register_ack)(self.version, params)
    }

    pub fn display_prompt(&self, line_instance: u32, call_reference: u32, timeout: u32, text: &str) -> Message {
        (self.display_prompt)(line_instance, call_reference, timeout, text)
    }

    pub fn display_notify(&self, timeout: u32, text: &str) -> Message {
        (self.display_notify)(timeout, text)
    }

    pub fn display_pri_notify(&self, priority: u32, timeout: u32, text: &str) -> Message {
        (self.display_pri_notify)(priority, timeout, text)
    }

    pub fn forward_status(&self, state: &ForwardState) -> Message {
        (self.forward_status)(state)
    }

    pub fn user_to_device_data(&self, request: &UserDataRequest) -> Message {
        (self.user_to_device_data)(request)
    }
}

impl fmt::Debug for DeviceProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceProtocol")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("version", &self.version)
            .finish()
    }
}

const SCCP_V3: DeviceProtocol = DeviceProtocol {
    name: "SCCP",
    family: ProtocolFamily::Sccp,
    version: 3,
    call_info: builders::call_info_static,
    dialed_number: builders::dialed_number_static,
    register_ack: builders::register_ack_legacy,
    display_prompt: builders::display_prompt_static,
    display_notify: builders::display_notify_static,
    display_pri_notify: builders::display_pri_notify_static,
    forward_status: builders::forward_status_static,
    user_to_device_data: builders::user_data_plain,
};

const SCCP_V11: DeviceProtocol = DeviceProtocol {
    version: 11,
    ..SCCP_V3
};

const SCCP_V15: DeviceProtocol = DeviceProtocol {
    version: 15,
    user_to_device_data: builders::user_data_version1,
    ..SCCP_V11
};

const SCCP_V17: DeviceProtocol = DeviceProtocol {
    version: 17,
    register_ack: builders::register_ack_v17,
    display_prompt: builders::display_prompt_dynamic,
    display_notify: builders::display_notify_dynamic,
    display_pri_notify: builders::display_pri_notify_dynamic,
    ..SCCP_V15
};

const SCCP_V19: DeviceProtocol = DeviceProtocol {
    version: 19,
    call_info: builders::call_info_dynamic,
    dialed_number: builders::dialed_number_v19,
    forward_status: builders::forward_status_v19,
    ..SCCP_V17
};

const SCCP_V20: DeviceProtocol = DeviceProtocol {
    version: 20,
    ..SCCP_V19
};

const SPCP_V0: DeviceProtocol = DeviceProtocol {
    name: "SPCP",
    family: ProtocolFamily::Spcp,
    version: 0,
    ..SCCP_V3
};

static SCCP_DESCRIPTORS: [DeviceProtocol; 6] = [SCCP_V3, SCCP_V11, SCCP_V15, SCCP_V17, SCCP_V19, SCCP_V20];

static SPCP_DESCRIPTORS: [DeviceProtocol; 1] = [SPCP_V0];

/// All descriptors of `family`, ascending by version.
pub fn descriptors(family: ProtocolFamily) -> &'static [DeviceProtocol] {
    match family {
        ProtocolFamily::Sccp => &SCCP_DESCRIPTORS,
        ProtocolFamily::Spcp => &SPCP_DESCRIPTORS,
    }
}

/// Descriptor for a negotiated version: the exact one, or the nearest lower.
///
/// Never returns a descriptor newer than `negotiated`. Versions below the
/// family minimum have no descriptor and the registration must be rejected.
pub fn device_protocol(family: ProtocolFamily, negotiated: u8) -> Result<&'static DeviceProtocol> {
    let found = descriptors(family)
        .iter()
        .rev()
        .find(|descriptor| descriptor.version <= negotiated);

    match found {
        Some(descriptor) => {
            debug!(
                family = %family,
                negotiated,
                selected = descriptor.version,
                "selected device protocol"
            );
            Ok(descriptor)
        }
        None => Err(ProtocolError::VersionTooLow {
            family,
            version: negotiated,
            min: family.min_version(),
        }),
    }
}

/// Anything that knows the protocol version it negotiated.
pub trait ProtocolDevice {
    fn protocol_version(&self) -> u8;
}

impl ProtocolDevice for Register {
    fn protocol_version(&self) -> u8 {
        Register::protocol_version(self)
    }
}

impl ProtocolDevice for u8 {
    fn protocol_version(&self) -> u8 {
        *self
    }
}

pub fn device_protocol_for<D: ProtocolDevice + ?Sized>(
    device: &D,
    family: ProtocolFamily,
) -> Result<&'static DeviceProtocol> {
    device_protocol(family, device.protocol_version())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_nearest_lower() {
        assert_eq!(device_protocol(ProtocolFamily::Sccp, 17).unwrap().version, 17);
        assert_eq!(device_protocol(ProtocolFamily::Sccp, 18).unwrap().version, 17);
        assert_eq!(device_protocol(ProtocolFamily::Sccp, 14).unwrap().version, 11);
        assert_eq!(device_protocol(ProtocolFamily::Sccp, 22).unwrap().version, 20);
        assert_eq!(device_protocol(ProtocolFamily::Spcp, 0).unwrap().name, "SPCP");
    }

    #[test]
    fn below_minimum_rejected() {
        let err = device_protocol(ProtocolFamily::Sccp, 2).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::VersionTooLow { version: 2, min: 3, .. }
        ));
    }

    #[test]
    fn descriptors_ascend() {
        for family in [ProtocolFamily::Sccp, ProtocolFamily::Spcp] {
            let versions: Vec<u8> = descriptors(family).iter().map(|d| d.version).collect();
            let mut sorted = versions.clone();
            sorted.sort_unstable();
            assert_eq!(versions, sorted);
        }
    }

    #[test]
    fn layouts_follow_version() {
        let v11 = device_protocol(ProtocolFamily::Sccp, 11).unwrap();
        let v15 = device_protocol(ProtocolFamily::Sccp, 16).unwrap();
        let v17 = device_protocol(ProtocolFamily::Sccp, 17).unwrap();
        let v19 = device_protocol(ProtocolFamily::Sccp, 19).unwrap();

        assert!(matches!(v11.display_notify(5, "hi"), Message::DisplayNotify(_)));
        assert!(matches!(v17.display_notify(5, "hi"), Message::DisplayDynamicNotify(_)));

        let request = UserDataRequest::default();
        assert!(matches!(v11.user_to_device_data(&request), Message::UserToDeviceData(_)));
        assert!(matches!(
            v15.user_to_device_data(&request),
            Message::UserToDeviceDataVersion1(_)
        ));

        let call = CallDetails::default();
        assert!(matches!(v17.call_info(&call), Message::CallInfo(_)));
        assert!(matches!(v19.call_info(&call), Message::CallInfoDynamic(_)));
        assert!(matches!(v17.dialed_number("1", 1, 1), Message::DialedNumber(_)));
        assert!(matches!(v19.dialed_number("1", 1, 1), Message::DialedNumberV19(_)));
        assert!(matches!(
            v19.forward_status(&ForwardState::default()),
            Message::ForwardStatV19(_)
        ));
    }

    #[test]
    fn register_ack_advertises_descriptor_version() {
        let params = RegisterAckParams::default();
        match device_protocol(ProtocolFamily::Sccp, 18).unwrap().register_ack(&params) {
            Message::RegisterAck(ack) => {
                assert_eq!(ack.protocol_version, 17);
                assert_eq!((ack.unknown1, ack.unknown2, ack.unknown3), (0x20, 0xF1, 0xFF));
                assert_eq!(ack.date_template.as_str(), "D.M.Y");
            }
            other => panic!("unexpected {other:?}"),
        }
        match device_protocol(ProtocolFamily::Sccp, 11).unwrap().register_ack(&params) {
            Message::RegisterAck(ack) => {
                assert_eq!(ack.protocol_version, 11);
                assert_eq!(ack.unknown1, 0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn register_message_selects_protocol() {
        let register = Register {
            phone_features: 0x8500_0013,
            ..Register::default()
        };
        let protocol = device_protocol_for(&register, ProtocolFamily::Sccp).unwrap();
        assert_eq!(protocol.version, 19);
    }
}
