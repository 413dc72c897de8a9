//! Value converters for generic and list options.
//!
//! Scalar converters take the target field and the raw value and report a
//! [`ValueChange`]. List rebuilds take every value of one pass and replace
//! the whole list at once.

use std::net::{Ipv4Addr, SocketAddrV4, ToSocketAddrs};

use crate::list::LockedList;
use crate::model::{
    Addon, AclRule, AmaFlags, BlindTransferIndication, ButtonConfig, ButtonKind, CallAnswerOrder,
    Codec, DebugCategories, DndMode, DtmfMode, EarlyRtp, LampMode, Mailbox, PrivacyFeature,
    Variable,
};
use crate::option::{ListEntry, ListOutcome, ValueChange};

/// Longest accepted secondary dial-tone digit string.
pub const MAX_SECONDARY_DIALTONE_DIGITS: usize = 9;

/// Highest call/pickup group number.
pub const MAX_GROUP: u32 = 63;

pub(crate) fn assign<V: PartialEq>(field: &mut V, value: V) -> ValueChange {
    if *field == value {
        return ValueChange::NoChange;
    }
    *field = value;
    ValueChange::Changed
}

/// Truthy keywords: `yes`, `true`, `y`, `t`, `1`, `on`. Anything else is false.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "y" | "t" | "1" | "on"
    )
}

/// Decimal, `0x` hex or leading-zero octal integer.
pub fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn keyword<V: PartialEq>(field: &mut V, parsed: Option<V>) -> ValueChange {
    match parsed {
        Some(value) => assign(field, value),
        None => ValueChange::Invalid,
    }
}

/// Type-of-service byte: a number, a DSCP class name or a legacy name.
pub fn tos(field: &mut u8, value: &str) -> ValueChange {
    keyword(field, parse_tos(value))
}

fn parse_tos(value: &str) -> Option<u8> {
    if let Some(number) = parse_int(value) {
        return Some((number & 0xff) as u8);
    }
    let name = value.trim().to_ascii_lowercase();
    let dscp = match name.as_str() {
        "lowdelay" => return Some(0x10),
        "throughput" => return Some(0x08),
        "reliability" => return Some(0x04),
        "mincost" => return Some(0x02),
        "none" => return Some(0),
        "ef" => 46,
        _ => {
            if let Some(class) = name.strip_prefix("cs") {
                let class: u8 = class.parse().ok().filter(|class| *class <= 7)?;
                class << 3
            } else if let Some(af) = name.strip_prefix("af") {
                let mut digits = af.chars();
                let class = digits.next()?.to_digit(10).filter(|d| (1..=4).contains(d))?;
                let drop = digits.next()?.to_digit(10).filter(|d| (1..=3).contains(d))?;
                if digits.next().is_some() {
                    return None;
                }
                (class * 8 + drop * 2) as u8
            } else {
                return None;
            }
        }
    };
    Some(dscp << 2)
}

/// 802.1p class of service, 0 to 7.
pub fn cos(field: &mut u8, value: &str) -> ValueChange {
    let parsed = parse_int(value)
        .filter(|cos| (0..=7).contains(cos))
        .map(|cos| cos as u8);
    keyword(field, parsed)
}

/// Small unsigned integer, 0 to 255.
pub fn smallint(field: &mut u8, value: &str) -> ValueChange {
    let parsed = parse_int(value)
        .filter(|number| (0..=255).contains(number))
        .map(|number| number as u8);
    keyword(field, parsed)
}

/// Call or pickup group list such as `1,3-5`.
pub fn group(field: &mut u64, value: &str) -> ValueChange {
    keyword(field, parse_group(value))
}

fn parse_group(value: &str) -> Option<u64> {
    let mut bits = 0u64;
    for piece in value.split(',').map(str::trim).filter(|piece| !piece.is_empty()) {
        let (start, end) = match piece.split_once('-') {
            Some((start, end)) => (start.trim().parse::<u32>().ok()?, end.trim().parse::<u32>().ok()?),
            None => {
                let single = piece.parse::<u32>().ok()?;
                (single, single)
            }
        };
        if start > end || end > MAX_GROUP {
            return None;
        }
        for bit in start..=end {
            bits |= 1 << bit;
        }
    }
    Some(bits)
}

/// `reject`, `silent`, `user`, empty for off, or a boolean meaning reject/off.
pub fn dnd(field: &mut DndMode, value: &str) -> ValueChange {
    let trimmed = value.trim();
    let mode = if trimmed.is_empty() {
        DndMode::Off
    } else if let Some(mode) = DndMode::from_keyword(trimmed) {
        mode
    } else if parse_bool(trimmed) {
        DndMode::Reject
    } else {
        DndMode::Off
    };
    assign(field, mode)
}

pub fn early_rtp(field: &mut EarlyRtp, value: &str) -> ValueChange {
    keyword(field, EarlyRtp::from_keyword(value))
}

pub fn dtmf_mode(field: &mut DtmfMode, value: &str) -> ValueChange {
    keyword(field, DtmfMode::from_keyword(value))
}

pub fn mwi_lamp(field: &mut LampMode, value: &str) -> ValueChange {
    keyword(field, LampMode::from_keyword(value))
}

pub fn blind_transfer_indication(field: &mut BlindTransferIndication, value: &str) -> ValueChange {
    keyword(field, BlindTransferIndication::from_keyword(value))
}

pub fn call_answer_order(field: &mut CallAnswerOrder, value: &str) -> ValueChange {
    keyword(field, CallAnswerOrder::from_keyword(value))
}

pub fn amaflags(field: &mut AmaFlags, value: &str) -> ValueChange {
    if value.trim().is_empty() {
        return assign(field, AmaFlags::Default);
    }
    keyword(field, AmaFlags::from_keyword(value))
}

/// `full` enables privacy permanently, otherwise a boolean enabling the key.
pub fn privacy(field: &mut PrivacyFeature, value: &str) -> ValueChange {
    let feature = if value.trim().eq_ignore_ascii_case("full") {
        PrivacyFeature {
            enabled: true,
            status: !0,
        }
    } else {
        PrivacyFeature {
            enabled: parse_bool(value),
            status: 0,
        }
    };
    assign(field, feature)
}

pub fn secondary_dialtone_digits(field: &mut String, value: &str) -> ValueChange {
    let digits = value.trim();
    if digits.len() > MAX_SECONDARY_DIALTONE_DIGITS {
        return ValueChange::Invalid;
    }
    assign(field, digits.to_string())
}

/// Comma-separated debug categories; `all` and `none` are accepted.
pub fn debug_categories(field: &mut DebugCategories, value: &str) -> ValueChange {
    let mut mask = DebugCategories::NONE;
    for name in value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        match name.to_ascii_lowercase().as_str() {
            "none" => mask = DebugCategories::NONE,
            "all" => mask = DebugCategories::ALL,
            _ => match DebugCategories::category(name) {
                Some(category) => mask.0 |= category.0,
                None => return ValueChange::Invalid,
            },
        }
    }
    assign(field, mask)
}

fn is_hostname(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

/// IPv4 literal, or a host name resolved to its first IPv4 address.
pub fn resolve_ipv4(value: &str) -> Option<Ipv4Addr> {
    let value = value.trim();
    if let Ok(addr) = value.parse::<Ipv4Addr>() {
        return Some(addr);
    }
    if !is_hostname(value) || value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    (value, 0)
        .to_socket_addrs()
        .ok()?
        .find_map(|addr| match addr.ip() {
            std::net::IpAddr::V4(v4) => Some(v4),
            std::net::IpAddr::V6(_) => None,
        })
}

/// Address part of the listening socket; the port is kept.
pub fn bind_address(field: &mut SocketAddrV4, value: &str) -> ValueChange {
    match resolve_ipv4(value) {
        Some(ip) => assign(field, SocketAddrV4::new(ip, field.port())),
        None => ValueChange::Invalid,
    }
}

/// Port part of the listening socket; the address is kept.
pub fn port(field: &mut SocketAddrV4, value: &str) -> ValueChange {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => assign(field, SocketAddrV4::new(*field.ip(), port)),
        _ => ValueChange::Invalid,
    }
}

/// Optional address, cleared by an empty value.
pub fn optional_ipv4(field: &mut Option<Ipv4Addr>, value: &str) -> ValueChange {
    if value.trim().is_empty() {
        return assign(field, None);
    }
    match resolve_ipv4(value) {
        Some(ip) => assign(field, Some(ip)),
        None => ValueChange::Invalid,
    }
}

/// Parse each entry, collecting the valid items and the failing positions.
fn collect<V>(
    entries: &[ListEntry],
    mut parse: impl FnMut(&ListEntry, &mut Vec<V>) -> bool,
) -> (Vec<V>, Vec<usize>) {
    let mut items = Vec::new();
    let mut invalid = Vec::new();
    for (position, entry) in entries.iter().enumerate() {
        if !parse(entry, &mut items) {
            invalid.push(position);
        }
    }
    (items, invalid)
}

fn rebuild<V: PartialEq>(list: &LockedList<V>, (items, invalid): (Vec<V>, Vec<usize>)) -> ListOutcome {
    ListOutcome {
        changed: list.replace_if_changed(items),
        invalid,
    }
}

/// `allow`/`disallow` entries applied in order to an empty preference list.
pub fn codecs(list: &LockedList<Codec>, entries: &[ListEntry]) -> ListOutcome {
    let parsed = collect(entries, |entry, codecs: &mut Vec<Codec>| {
        let allow = entry.name.eq_ignore_ascii_case("allow");
        let mut valid = true;
        for name in entry.value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let selected: Vec<Codec> = if name.eq_ignore_ascii_case("all") {
                Codec::ALL.to_vec()
            } else if let Some(codec) = Codec::from_keyword(name) {
                vec![codec]
            } else {
                valid = false;
                continue;
            };
            for codec in selected {
                if allow {
                    if !codecs.contains(&codec) {
                        codecs.push(codec);
                    }
                } else {
                    codecs.retain(|existing| *existing != codec);
                }
            }
        }
        valid
    });
    rebuild(list, parsed)
}

fn parse_acl_rule(permit: bool, value: &str) -> Option<Vec<AclRule>> {
    let value = value.trim();
    if permit && value.eq_ignore_ascii_case("internal") {
        return Some(AclRule::internal().to_vec());
    }
    let (network, netmask) = match value.split_once('/') {
        Some((network, mask)) => {
            let mask = mask.trim();
            let netmask = match mask.parse::<u8>() {
                Ok(bits) if bits <= 32 => {
                    let bits = u32::from(bits);
                    Ipv4Addr::from(u32::MAX.checked_shl(32 - bits).unwrap_or(0))
                }
                Ok(_) => return None,
                Err(_) => mask.parse::<Ipv4Addr>().ok()?,
            };
            (network.trim().parse::<Ipv4Addr>().ok()?, netmask)
        }
        None => (value.parse::<Ipv4Addr>().ok()?, Ipv4Addr::BROADCAST),
    };
    Some(vec![AclRule {
        permit,
        network: Ipv4Addr::from(u32::from(network) & u32::from(netmask)),
        netmask,
    }])
}

/// `deny`/`permit` (and `localnet`) rules in source order.
pub fn acl(list: &LockedList<AclRule>, entries: &[ListEntry]) -> ListOutcome {
    let parsed = collect(entries, |entry, rules: &mut Vec<AclRule>| {
        let permit = !entry.name.eq_ignore_ascii_case("deny");
        match parse_acl_rule(permit, &entry.value) {
            Some(parsed) => {
                rules.extend(parsed);
                true
            }
            None => false,
        }
    });
    rebuild(list, parsed)
}

pub fn addons(list: &LockedList<Addon>, entries: &[ListEntry]) -> ListOutcome {
    let parsed = collect(entries, |entry, addons: &mut Vec<Addon>| {
        match Addon::from_keyword(&entry.value) {
            Some(addon) => {
                addons.push(addon);
                true
            }
            None => false,
        }
    });
    rebuild(list, parsed)
}

pub fn permit_hosts(list: &LockedList<String>, entries: &[ListEntry]) -> ListOutcome {
    let parsed = collect(entries, |entry, hosts: &mut Vec<String>| {
        let host = entry.value.trim();
        if !is_hostname(host) {
            return false;
        }
        if !hosts.iter().any(|existing| existing.eq_ignore_ascii_case(host)) {
            hosts.push(host.to_string());
        }
        true
    });
    rebuild(list, parsed)
}

/// `setvar = name=value` channel variables.
pub fn variables(list: &LockedList<Variable>, entries: &[ListEntry]) -> ListOutcome {
    let parsed = collect(entries, |entry, variables: &mut Vec<Variable>| {
        match entry.value.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                variables.push(Variable {
                    name: name.trim().to_string(),
                    value: value.trim().to_string(),
                });
                true
            }
            _ => false,
        }
    });
    rebuild(list, parsed)
}

/// `mailbox = box[@context]`, comma lists allowed, duplicates dropped.
pub fn mailboxes(list: &LockedList<Mailbox>, entries: &[ListEntry]) -> ListOutcome {
    let parsed = collect(entries, |entry, mailboxes: &mut Vec<Mailbox>| {
        let mut valid = true;
        for spec in entry.value.split(',').map(str::trim).filter(|spec| !spec.is_empty()) {
            let mailbox = match spec.split_once('@') {
                Some((mailbox, context)) => Mailbox {
                    mailbox: mailbox.trim().to_string(),
                    context: Some(context.trim().to_string()).filter(|context| !context.is_empty()),
                },
                None => Mailbox {
                    mailbox: spec.to_string(),
                    context: None,
                },
            };
            if mailbox.mailbox.is_empty() {
                valid = false;
                continue;
            }
            if !mailboxes.contains(&mailbox) {
                mailboxes.push(mailbox);
            }
        }
        valid
    });
    rebuild(list, parsed)
}

/// Parsed `button` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonParse {
    Valid(ButtonKind),
    /// Recognised type with unusable fields; stored as an empty slot.
    Tombstone,
    UnknownType,
}

/// Parse `type,label,options,args`.
pub fn parse_button(value: &str) -> ButtonParse {
    let mut parts = value.splitn(4, ',').map(str::trim);
    let kind = parts.next().unwrap_or_default().to_ascii_lowercase();
    let label = parts.next().unwrap_or_default();
    let options = parts.next().unwrap_or_default();
    let args = parts.next().unwrap_or_default();

    if kind == "empty" {
        return ButtonParse::Valid(ButtonKind::Empty);
    }
    if !matches!(kind.as_str(), "line" | "speeddial" | "service" | "feature") {
        return ButtonParse::UnknownType;
    }
    if label.is_empty() || (kind != "line" && options.is_empty()) {
        return ButtonParse::Tombstone;
    }

    let parsed = match kind.as_str() {
        "line" => {
            let (name, subscription) = match label.split_once('@') {
                Some((name, subscription)) => (name, Some(subscription)),
                None => (label, None),
            };
            let (subscription_id, subscription_name) = match subscription {
                Some(subscription) => match subscription.split_once(':') {
                    Some((id, name)) => (Some(id.to_string()), Some(name.to_string())),
                    None => (Some(subscription.to_string()), None),
                },
                None => (None, None),
            };
            ButtonKind::Line {
                name: name.to_string(),
                subscription_id,
                subscription_name,
                options: options.to_string(),
            }
        }
        "speeddial" => ButtonKind::SpeedDial {
            label: label.to_string(),
            extension: options.to_string(),
            hint: args.to_string(),
        },
        "service" => ButtonKind::Service {
            label: label.to_string(),
            url: options.to_string(),
        },
        _ => ButtonKind::Feature {
            label: label.to_string(),
            feature: options.to_string(),
            args: args.to_string(),
        },
    };
    ButtonParse::Valid(parsed)
}

/// Merge the `button` values of one pass by position.
///
/// The n-th value configures button n. An unknown type leaves whatever
/// button was at that position untouched; positions beyond the last value
/// are dropped.
pub fn buttons(list: &LockedList<ButtonConfig>, entries: &[ListEntry]) -> ListOutcome {
    let existing = list.snapshot();
    let mut merged = Vec::with_capacity(entries.len());
    let mut invalid = Vec::new();

    for (position, entry) in entries.iter().enumerate() {
        let index = position + 1;
        let kind = match parse_button(&entry.value) {
            ButtonParse::Valid(kind) => kind,
            ButtonParse::Tombstone => {
                invalid.push(position);
                ButtonKind::Empty
            }
            ButtonParse::UnknownType => {
                invalid.push(position);
                if let Some(kept) = existing.iter().find(|button| button.index == index) {
                    merged.push(kept.clone());
                }
                continue;
            }
        };
        merged.push(ButtonConfig { index, kind });
    }

    rebuild(list, (merged, invalid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(name: &str, values: &[&str]) -> Vec<ListEntry> {
        values
            .iter()
            .enumerate()
            .map(|(position, value)| ListEntry {
                name: name.to_string(),
                value: value.to_string(),
                lineno: position + 1,
            })
            .collect()
    }

    #[test]
    fn integers() {
        assert_eq!(parse_int("0x22"), Some(0x22));
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("010"), Some(8));
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("ten"), None);
    }

    #[test]
    fn tos_names_and_numbers() {
        let mut field = 0u8;
        assert_eq!(tos(&mut field, "0xB8"), ValueChange::Changed);
        assert_eq!(field, 0xB8);
        assert_eq!(tos(&mut field, "EF"), ValueChange::NoChange);
        assert_eq!(tos(&mut field, "cs3"), ValueChange::Changed);
        assert_eq!(field, 0x60);
        assert_eq!(tos(&mut field, "af41"), ValueChange::Changed);
        assert_eq!(field, 0x88);
        assert_eq!(tos(&mut field, "lowdelay"), ValueChange::Changed);
        assert_eq!(tos(&mut field, "bogus"), ValueChange::Invalid);
        assert_eq!(field, 0x10);
    }

    #[test]
    fn cos_and_smallint_ranges() {
        let mut field = 0u8;
        assert_eq!(cos(&mut field, "7"), ValueChange::Changed);
        assert_eq!(cos(&mut field, "8"), ValueChange::Invalid);
        assert_eq!(smallint(&mut field, "0x32"), ValueChange::Changed);
        assert_eq!(field, 0x32);
        assert_eq!(smallint(&mut field, "256"), ValueChange::Invalid);
    }

    #[test]
    fn groups() {
        let mut field = 0u64;
        assert_eq!(group(&mut field, "1,3-5"), ValueChange::Changed);
        assert_eq!(field, 0b11_1010);
        assert_eq!(group(&mut field, "64"), ValueChange::Invalid);
        assert_eq!(group(&mut field, "5-3"), ValueChange::Invalid);
        assert_eq!(group(&mut field, ""), ValueChange::Changed);
        assert_eq!(field, 0);
    }

    #[test]
    fn dnd_modes() {
        let mut field = DndMode::Off;
        assert_eq!(dnd(&mut field, "silent"), ValueChange::Changed);
        assert_eq!(dnd(&mut field, "yes"), ValueChange::Changed);
        assert_eq!(field, DndMode::Reject);
        assert_eq!(dnd(&mut field, ""), ValueChange::Changed);
        assert_eq!(field, DndMode::Off);
    }

    #[test]
    fn privacy_full() {
        let mut field = PrivacyFeature::default();
        privacy(&mut field, "full");
        assert!(field.enabled);
        assert_ne!(field.status, 0);
        privacy(&mut field, "on");
        assert_eq!(field, PrivacyFeature { enabled: true, status: 0 });
    }

    #[test]
    fn bind_address_and_port_share_the_socket() {
        let mut socket = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 2000);
        assert_eq!(bind_address(&mut socket, "192.168.1.10"), ValueChange::Changed);
        assert_eq!(port(&mut socket, "2001"), ValueChange::Changed);
        assert_eq!(socket, "192.168.1.10:2001".parse().unwrap());
        assert_eq!(port(&mut socket, "0"), ValueChange::Invalid);
        assert_eq!(bind_address(&mut socket, "not an address!"), ValueChange::Invalid);
        assert_eq!(bind_address(&mut socket, "300.1.1.1"), ValueChange::Invalid);
    }

    #[test]
    fn secondary_digits_limit() {
        let mut field = String::new();
        assert_eq!(secondary_dialtone_digits(&mut field, "123456789"), ValueChange::Changed);
        assert_eq!(secondary_dialtone_digits(&mut field, "1234567890"), ValueChange::Invalid);
    }

    #[test]
    fn debug_list() {
        let mut field = DebugCategories::NONE;
        assert_eq!(debug_categories(&mut field, "core, rtp"), ValueChange::Changed);
        assert_eq!(field.names(), vec!["core", "rtp"]);
        assert_eq!(debug_categories(&mut field, "core,warp"), ValueChange::Invalid);
    }

    #[test]
    fn codec_preferences_follow_order() {
        let list = LockedList::new();
        let mut values = entries("disallow", &["all"]);
        values.extend(entries("allow", &["ulaw,alaw", "opus"]));
        let outcome = codecs(&list, &values);
        assert!(outcome.changed);
        assert_eq!(outcome.invalid, vec![2]);
        assert_eq!(list.snapshot(), vec![Codec::Ulaw, Codec::Alaw]);

        let again = codecs(&list, &values);
        assert!(!again.changed);
    }

    #[test]
    fn acl_rules() {
        let list = LockedList::new();
        let mut values = entries("deny", &["0.0.0.0/0.0.0.0"]);
        values.extend(entries("permit", &["internal", "10.1.0.0/16", "nonsense"]));
        let outcome = acl(&list, &values);
        assert_eq!(outcome.invalid, vec![3]);
        let rules = list.snapshot();
        assert_eq!(rules.len(), 5);
        assert_eq!(rules[4].netmask, Ipv4Addr::new(255, 255, 0, 0));
        assert!(!rules[0].permit);
    }

    #[test]
    fn mailboxes_are_deduplicated() {
        let list = LockedList::new();
        let outcome = mailboxes(&list, &entries("mailbox", &["100@default,200", "100@default"]));
        assert!(outcome.invalid.is_empty());
        assert_eq!(list.len(), 2);
        assert_eq!(list.snapshot()[0].context.as_deref(), Some("default"));
    }

    #[test]
    fn variables_need_a_name() {
        let list = LockedList::new();
        let outcome = variables(&list, &entries("setvar", &["a=1", "=2", "b"]));
        assert_eq!(outcome.invalid, vec![1, 2]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn button_parsing() {
        assert_eq!(
            parse_button("line, 100@2:Office, default"),
            ButtonParse::Valid(ButtonKind::Line {
                name: "100".to_string(),
                subscription_id: Some("2".to_string()),
                subscription_name: Some("Office".to_string()),
                options: "default".to_string(),
            })
        );
        assert_eq!(parse_button("speeddial,Home"), ButtonParse::Tombstone);
        assert_eq!(parse_button("line,"), ButtonParse::Tombstone);
        assert_eq!(parse_button("bogus,Label"), ButtonParse::UnknownType);
        assert_eq!(parse_button("empty"), ButtonParse::Valid(ButtonKind::Empty));
    }

    #[test]
    fn button_merge_by_position() {
        let list = LockedList::new();
        let first = entries("button", &["line,100", "speeddial,Home,200"]);
        assert!(buttons(&list, &first).changed);
        assert!(!buttons(&list, &first).changed);

        let changed = entries("button", &["line,100", "speeddial,Home,201"]);
        assert!(buttons(&list, &changed).changed);

        let unknown = entries("button", &["line,100", "weird,Home,300"]);
        let outcome = buttons(&list, &unknown);
        assert_eq!(outcome.invalid, vec![1]);
        assert!(!outcome.changed);
        assert_eq!(
            list.snapshot()[1].kind,
            ButtonKind::SpeedDial {
                label: "Home".to_string(),
                extension: "201".to_string(),
                hint: String::new(),
            }
        );
    }
}
