//! Applies one configuration section to a configurable object.
//!
//! A pass runs in three steps:
//! - Supplied values are applied in source order
//! - Options the section did not mention are resolved through their
//!   default chain and applied the same way
//! - List options are rebuilt once from every value the pass collected
//!
//! Bad values never abort a pass. Every option touched ends up as an
//! [`OptionOutcome`] in the returned [`ApplyReport`], and the change kinds of
//! changed options are OR-ed into [`ApplyReport::change`].

use serde::Serialize;
use skinny_wire::field::truncate_str;
use tracing::{debug, info, warn};

use crate::convert::{assign, parse_bool, parse_int};
use crate::model::{Device, GlobalConfig};
use crate::option::{
    Access, ChangeKind, ConfigOption, IntRef, ListEntry, ListOutcome, OptionFlags, SegmentId,
    ValueChange,
};
use crate::registry::{find_typed, Configurable};
use crate::source::{ConfigEntry, ConfigSource, GENERAL_SECTION};

/// Where a pass reads its section and its inherited defaults from.
#[derive(Clone, Copy)]
pub struct ApplyContext<'a> {
    pub source: &'a dyn ConfigSource,
    pub section: &'a str,
    /// Device section consulted first by device-default options.
    pub parent_device: Option<&'a str>,
}

impl<'a> ApplyContext<'a> {
    pub fn new(source: &'a dyn ConfigSource, section: &'a str) -> Self {
        Self {
            source,
            section,
            parent_device: None,
        }
    }

    pub fn with_parent_device(mut self, device: Option<&'a str>) -> Self {
        self.parent_device = device;
        self
    }
}

/// Where an applied value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrigin {
    Supplied,
    DeviceSection,
    DeviceDefault,
    GeneralSection,
    GlobalDefault,
    Default,
}

/// What happened to one option during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Unchanged,
    Changed,
    Invalid,
    /// Required option without any value.
    Missing,
    Unknown,
    Ignored,
    Obsolete,
}

impl From<ValueChange> for Disposition {
    fn from(change: ValueChange) -> Self {
        match change {
            ValueChange::NoChange => Disposition::Unchanged,
            ValueChange::Changed => Disposition::Changed,
            ValueChange::Invalid => Disposition::Invalid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionOutcome {
    pub name: String,
    pub value: String,
    pub lineno: Option<usize>,
    pub origin: ValueOrigin,
    pub disposition: Disposition,
}

/// Per-section result of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub section: String,
    pub segment: SegmentId,
    pub change: ChangeKind,
    pub outcomes: Vec<OptionOutcome>,
}

impl ApplyReport {
    fn new(section: &str, segment: SegmentId) -> Self {
        Self {
            section: section.to_string(),
            segment,
            change: ChangeKind::NoUpdateNeeded,
            outcomes: Vec::new(),
        }
    }

    /// Whether any option changed the object.
    pub fn changed(&self) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| outcome.disposition == Disposition::Changed)
    }

    /// Whether the changes require the device to re-register.
    pub fn needs_reset(&self) -> bool {
        self.changed() && self.change.needs_reset()
    }

    /// Invalid values and missing required options.
    pub fn invalid(&self) -> impl Iterator<Item = &OptionOutcome> {
        self.outcomes.iter().filter(|outcome| {
            matches!(outcome.disposition, Disposition::Invalid | Disposition::Missing)
        })
    }

    pub fn unknown(&self) -> impl Iterator<Item = &OptionOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.disposition == Disposition::Unknown)
    }

    pub fn has_invalid(&self) -> bool {
        self.invalid().next().is_some()
    }

    /// First outcome recorded for `name`.
    pub fn outcome(&self, name: &str) -> Option<&OptionOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.name.eq_ignore_ascii_case(name))
    }

    fn push(
        &mut self,
        name: &str,
        value: &str,
        lineno: Option<usize>,
        origin: ValueOrigin,
        disposition: Disposition,
    ) {
        self.outcomes.push(OptionOutcome {
            name: name.to_string(),
            value: value.to_string(),
            lineno,
            origin,
            disposition,
        });
    }
}

/// Apply `ctx.section` of `ctx.source` to `object`, resolving defaults for
/// every option the section does not mention.
pub fn apply_configuration<T: Configurable>(object: &mut T, ctx: &ApplyContext<'_>) -> ApplyReport {
    let entries = ctx.source.entries(ctx.section).unwrap_or_default();
    apply(object, ctx.section, entries, Some(ctx))
}

/// Apply only the given values; nothing is defaulted.
pub fn apply_values<T: Configurable>(object: &mut T, section: &str, entries: &[ConfigEntry]) -> ApplyReport {
    apply(object, section, entries, None)
}

/// Convert and store one value through an option's accessor.
pub fn apply_value<T>(object: &mut T, option: &ConfigOption<T>, value: &str) -> ValueChange {
    match &option.access {
        Access::Bool(field) => assign(field(object), parse_bool(value)),
        Access::Int(field) => {
            if value.trim().is_empty() {
                return ValueChange::NoChange;
            }
            let Some(number) = parse_int(value) else {
                return ValueChange::Invalid;
            };
            match field(object) {
                IntRef::I32(target) => {
                    i32::try_from(number).map_or(ValueChange::Invalid, |number| assign(target, number))
                }
                IntRef::U32(target) => {
                    u32::try_from(number).map_or(ValueChange::Invalid, |number| assign(target, number))
                }
            }
        }
        Access::Char(field) => match value.trim().chars().next() {
            Some(first) => assign(field(object), first),
            None => ValueChange::NoChange,
        },
        Access::Str { field, size } => {
            let target = field(object);
            let value = truncate_str(value, size.saturating_sub(1));
            if target.eq_ignore_ascii_case(value) {
                return ValueChange::NoChange;
            }
            *target = value.to_string();
            ValueChange::Changed
        }
        Access::StrPtr(field) => {
            let target = field(object);
            if value.is_empty() {
                return ValueChange::from_changed(target.take().is_some());
            }
            if target
                .as_deref()
                .is_some_and(|current| current.eq_ignore_ascii_case(value))
            {
                return ValueChange::NoChange;
            }
            *target = Some(value.to_string());
            ValueChange::Changed
        }
        Access::Generic(convert) => convert(object, value),
        Access::List { .. } | Access::None => ValueChange::NoChange,
    }
}

/// Values collected for one list group during a pass.
struct PendingList<T: 'static> {
    group: &'static str,
    rebuild: fn(&mut T, &[ListEntry]) -> ListOutcome,
    change: ChangeKind,
    entries: Vec<ListEntry>,
    origins: Vec<ValueOrigin>,
}

impl<T> PendingList<T> {
    fn push(&mut self, entry: ListEntry, origin: ValueOrigin) {
        self.entries.push(entry);
        self.origins.push(origin);
    }
}

fn pending_list<'p, T>(
    lists: &'p mut Vec<PendingList<T>>,
    option: &ConfigOption<T>,
) -> Option<&'p mut PendingList<T>> {
    let Access::List { group, rebuild } = option.access else {
        return None;
    };
    let index = match lists.iter().position(|list| list.group == group) {
        Some(index) => index,
        None => {
            lists.push(PendingList {
                group,
                rebuild,
                change: option.change,
                entries: Vec::new(),
                origins: Vec::new(),
            });
            lists.len() - 1
        }
    };
    Some(&mut lists[index])
}

fn apply<T: Configurable>(
    object: &mut T,
    section: &str,
    entries: &[ConfigEntry],
    ctx: Option<&ApplyContext<'_>>,
) -> ApplyReport {
    let options = T::options();
    let mut report = ApplyReport::new(section, T::SEGMENT);
    let mut supplied = vec![false; options.len()];
    let mut lists: Vec<PendingList<T>> = Vec::new();

    for entry in entries {
        let mut matched = None;
        for (index, option) in options.iter().enumerate() {
            if option.name.eq_ignore_ascii_case(&entry.name) {
                supplied[index] = true;
                matched.get_or_insert(index);
            }
        }
        let Some(index) = matched else {
            warn!(section, lineno = entry.lineno, option = %entry.name, "unknown option");
            report.push(&entry.name, &entry.value, Some(entry.lineno), ValueOrigin::Supplied, Disposition::Unknown);
            continue;
        };

        let option = &options[index];
        if let Some(disposition) = check_flags(option, section, entry) {
            report.push(&entry.name, &entry.value, Some(entry.lineno), ValueOrigin::Supplied, disposition);
            continue;
        }

        let list_entry = ListEntry {
            name: option.name.to_string(),
            value: entry.value.clone(),
            lineno: entry.lineno,
        };
        if let Some(list) = pending_list(&mut lists, option) {
            list.push(list_entry, ValueOrigin::Supplied);
            continue;
        }

        let change = apply_value(object, option, &entry.value);
        record(&mut report, option, section, &entry.value, Some(entry.lineno), ValueOrigin::Supplied, change);
    }

    if let Some(ctx) = ctx {
        apply_defaults(object, options, &supplied, ctx, &mut report, &mut lists);
    }

    for list in lists {
        let outcome = (list.rebuild)(object, &list.entries);
        if outcome.changed {
            report.change |= list.change;
        }
        if list.entries.is_empty() && outcome.changed {
            report.push(list.group, "", None, ValueOrigin::Default, Disposition::Changed);
        }
        for (position, (entry, origin)) in list.entries.iter().zip(&list.origins).enumerate() {
            let disposition = if outcome.invalid.contains(&position) {
                warn!(section, lineno = entry.lineno, option = %entry.name, value = %entry.value, "invalid list value");
                Disposition::Invalid
            } else if outcome.changed {
                Disposition::Changed
            } else {
                Disposition::Unchanged
            };
            let lineno = (*origin != ValueOrigin::Default
                && *origin != ValueOrigin::DeviceDefault
                && *origin != ValueOrigin::GlobalDefault)
                .then_some(entry.lineno);
            report.push(&entry.name, &entry.value, lineno, *origin, disposition);
        }
    }

    debug!(section, segment = %T::SEGMENT, change = ?report.change, changed = report.changed(), "applied section");
    report
}

/// Skip handling for ignored, obsolete and empty required options.
fn check_flags<T>(option: &ConfigOption<T>, section: &str, entry: &ConfigEntry) -> Option<Disposition> {
    let flags = option.flags;
    if flags.contains(OptionFlags::IGNORE) {
        debug!(section, lineno = entry.lineno, option = option.name, "ignored option");
        return Some(Disposition::Ignored);
    }
    if flags.contains(OptionFlags::OBSOLETE) {
        warn!(section, lineno = entry.lineno, option = option.name, help = option.description, "obsolete option skipped");
        return Some(Disposition::Obsolete);
    }
    if flags.contains(OptionFlags::DEPRECATED) {
        info!(section, lineno = entry.lineno, option = option.name, "deprecated option, still applied");
    }
    if flags.contains(OptionFlags::CHANGED) {
        info!(section, lineno = entry.lineno, option = option.name, help = option.description, "option changed meaning");
    }
    if flags.contains(OptionFlags::REQUIRED) && entry.value.trim().is_empty() {
        warn!(section, lineno = entry.lineno, option = option.name, "required option has no value");
        return Some(Disposition::Missing);
    }
    None
}

fn record<T>(
    report: &mut ApplyReport,
    option: &ConfigOption<T>,
    section: &str,
    value: &str,
    lineno: Option<usize>,
    origin: ValueOrigin,
    change: ValueChange,
) {
    match change {
        ValueChange::Changed => report.change |= option.change,
        ValueChange::Invalid => {
            warn!(section, lineno = ?lineno, option = option.name, value, ?origin, "invalid value");
        }
        ValueChange::NoChange => {}
    }
    report.push(option.name, value, lineno, origin, change.into());
}

fn apply_defaults<T: Configurable>(
    object: &mut T,
    options: &'static [ConfigOption<T>],
    supplied: &[bool],
    ctx: &ApplyContext<'_>,
    report: &mut ApplyReport,
    lists: &mut Vec<PendingList<T>>,
) {
    for (index, option) in options.iter().enumerate() {
        if supplied[index]
            || option.flags.contains(OptionFlags::IGNORE)
            || option.flags.contains(OptionFlags::OBSOLETE)
            || matches!(option.access, Access::None)
            || options[..index]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_ascii_case(option.name))
        {
            continue;
        }

        if let Some(group) = option.list_group() {
            // supplied or already defaulted
            if lists.iter().any(|list| list.group == group) {
                continue;
            }
            let members: Vec<&ConfigOption<T>> = options
                .iter()
                .filter(|candidate| candidate.list_group() == Some(group))
                .collect();
            let defaults = resolve_group(&members, ctx);
            if let Some(list) = pending_list(lists, option) {
                for (entry, origin) in defaults {
                    list.push(entry, origin);
                }
            }
            continue;
        }

        match resolve(option.name, option.flags, option.default, ctx) {
            Some(resolved) => {
                let change = apply_value(object, option, &resolved.value);
                record(report, option, ctx.section, &resolved.value, resolved.lineno, resolved.origin, change);
            }
            None if option.flags.contains(OptionFlags::REQUIRED) => {
                warn!(section = ctx.section, option = option.name, "required option missing");
                report.push(option.name, "", None, ValueOrigin::Default, Disposition::Missing);
            }
            None => {}
        }
    }
}

struct Resolved {
    value: String,
    origin: ValueOrigin,
    lineno: Option<usize>,
}

fn from_entry(entry: &ConfigEntry, origin: ValueOrigin) -> Resolved {
    Resolved {
        value: entry.value.clone(),
        origin,
        lineno: Some(entry.lineno),
    }
}

fn from_default(default: &str, origin: ValueOrigin) -> Option<Resolved> {
    (!default.is_empty()).then(|| Resolved {
        value: default.to_string(),
        origin,
        lineno: None,
    })
}

/// Default chain: the owning device, then `[general]`, then the option's
/// own compiled default. The first non-empty value wins.
fn resolve(name: &str, flags: OptionFlags, default: &str, ctx: &ApplyContext<'_>) -> Option<Resolved> {
    let non_empty = |section: &str| {
        ctx.source
            .get(section, name)
            .filter(|entry| !entry.value.trim().is_empty())
    };

    if flags.contains(OptionFlags::DEVICE_DEFAULT) {
        if let Some(entry) = ctx.parent_device.and_then(non_empty) {
            return Some(from_entry(entry, ValueOrigin::DeviceSection));
        }
        if let Some(resolved) = find_typed::<Device>(name)
            .and_then(|device| from_default(device.default, ValueOrigin::DeviceDefault))
        {
            return Some(resolved);
        }
    }
    if flags.contains(OptionFlags::DEVICE_DEFAULT) || flags.contains(OptionFlags::GLOBAL_DEFAULT) {
        if let Some(entry) = non_empty(GENERAL_SECTION) {
            return Some(from_entry(entry, ValueOrigin::GeneralSection));
        }
        if let Some(resolved) = find_typed::<GlobalConfig>(name)
            .and_then(|global| from_default(global.default, ValueOrigin::GlobalDefault))
        {
            return Some(resolved);
        }
    }
    from_default(default, ValueOrigin::Default)
}

/// Default values of a whole list group, taken from the first level of the
/// chain that has any.
fn resolve_group<T>(members: &[&ConfigOption<T>], ctx: &ApplyContext<'_>) -> Vec<(ListEntry, ValueOrigin)> {
    let Some(first) = members.first() else {
        return Vec::new();
    };
    let device_default = first.flags.contains(OptionFlags::DEVICE_DEFAULT);
    let global_default = device_default || first.flags.contains(OptionFlags::GLOBAL_DEFAULT);

    if device_default {
        if let Some(parent) = ctx.parent_device {
            let values = section_values(members, ctx.source, parent, ValueOrigin::DeviceSection);
            if !values.is_empty() {
                return values;
            }
        }
        let values = default_values(members, ValueOrigin::DeviceDefault, |name| {
            find_typed::<Device>(name).map(|option| option.default)
        });
        if !values.is_empty() {
            return values;
        }
    }
    if global_default {
        let values = section_values(members, ctx.source, GENERAL_SECTION, ValueOrigin::GeneralSection);
        if !values.is_empty() {
            return values;
        }
        let values = default_values(members, ValueOrigin::GlobalDefault, |name| {
            find_typed::<GlobalConfig>(name).map(|option| option.default)
        });
        if !values.is_empty() {
            return values;
        }
    }
    members
        .iter()
        .filter(|member| !member.default.is_empty())
        .map(|member| (list_default(member.name, member.default), ValueOrigin::Default))
        .collect()
}

fn section_values<T>(
    members: &[&ConfigOption<T>],
    source: &dyn ConfigSource,
    section: &str,
    origin: ValueOrigin,
) -> Vec<(ListEntry, ValueOrigin)> {
    source
        .entries(section)
        .unwrap_or_default()
        .iter()
        .filter(|entry| members.iter().any(|member| member.name.eq_ignore_ascii_case(&entry.name)))
        .map(|entry| {
            let list_entry = ListEntry {
                name: entry.name.clone(),
                value: entry.value.clone(),
                lineno: entry.lineno,
            };
            (list_entry, origin)
        })
        .collect()
}

fn default_values<T>(
    members: &[&ConfigOption<T>],
    origin: ValueOrigin,
    lookup: impl Fn(&str) -> Option<&'static str>,
) -> Vec<(ListEntry, ValueOrigin)> {
    members
        .iter()
        .filter_map(|member| {
            let default = lookup(member.name).filter(|default| !default.is_empty())?;
            Some((list_default(member.name, default), origin))
        })
        .collect()
}

fn list_default(name: &str, value: &str) -> ListEntry {
    ListEntry {
        name: name.to_string(),
        value: value.to_string(),
        lineno: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ButtonKind, Codec, Line};
    use crate::source::ConfigStore;

    fn store(text: &str) -> ConfigStore {
        ConfigStore::parse(text).unwrap()
    }

    #[test]
    fn defaults_reproduce_global_default() {
        let source = store("[general]\n");
        let mut global = GlobalConfig::default();
        let report = apply_configuration(&mut global, &ApplyContext::new(&source, "general"));
        assert!(!report.changed(), "{:?}", report.outcomes.iter().filter(|o| o.disposition == Disposition::Changed).collect::<Vec<_>>());
        assert!(!report.has_invalid());
        assert_eq!(global, GlobalConfig::default());
    }

    #[test]
    fn second_pass_reports_no_change() {
        let source = store("[general]\nkeepalive = 30\ncontext = office\nallow = ulaw\n");
        let mut global = GlobalConfig::default();
        let ctx = ApplyContext::new(&source, "general");

        let first = apply_configuration(&mut global, &ctx);
        assert!(first.changed());
        assert_eq!(global.keepalive, 30);
        assert_eq!(global.codecs.snapshot(), vec![Codec::Ulaw]);

        let second = apply_configuration(&mut global, &ctx);
        assert!(!second.changed());
        assert_eq!(second.change, ChangeKind::NoUpdateNeeded);
    }

    #[test]
    fn required_missing_keeps_applying_others() {
        let source = store("[100]\ntype = line\nlabel = Office\ncid_num = 100\ndescription = Desk\n");
        let mut line = Line::new("100");
        let report = apply_configuration(&mut line, &ApplyContext::new(&source, "100"));

        let missing = report.outcome("cid_name").unwrap();
        assert_eq!(missing.disposition, Disposition::Missing);
        assert_eq!(line.label, "Office");
        assert_eq!(line.description, "Desk");
        assert_eq!(line.cid_num, "100");
    }

    #[test]
    fn empty_required_value_is_reported() {
        let source = store("[100]\nlabel =\ncid_name = A\ncid_num = 1\n");
        let mut line = Line::new("100");
        let report = apply_configuration(&mut line, &ApplyContext::new(&source, "100"));
        assert_eq!(report.outcome("label").unwrap().disposition, Disposition::Missing);
        assert!(report.has_invalid());
    }

    #[test]
    fn general_section_beats_compiled_default() {
        let source = store("[general]\nkeepalive = 45\n[SEP0001]\ntype = device\ndevicetype = 7960\n");
        let mut device = Device::new("SEP0001");
        let report = apply_configuration(&mut device, &ApplyContext::new(&source, "SEP0001"));

        assert_eq!(device.devicetype, "7960");
        assert_eq!(device.keepalive, 45);
        let outcome = report.outcome("keepalive").unwrap();
        assert_eq!(outcome.origin, ValueOrigin::GeneralSection);
        assert_eq!(outcome.lineno, Some(2));
    }

    #[test]
    fn global_compiled_default_used_without_general_value() {
        let source = store("[general]\n[SEP0001]\ndevicetype = 7940\n");
        let mut device = Device::new("SEP0001");
        let report = apply_configuration(&mut device, &ApplyContext::new(&source, "SEP0001"));
        assert_eq!(device.keepalive, 60);
        assert_eq!(report.outcome("keepalive").unwrap().origin, ValueOrigin::GlobalDefault);
        // global table says "on", the device's own "off" is never reached
        assert!(device.cfwdall);
        // dtmfmode only exists on devices
        assert_eq!(report.outcome("dtmfmode").unwrap().origin, ValueOrigin::Default);
    }

    #[test]
    fn device_default_reads_parent_section() {
        let source = store(
            "[general]\nmeetme = on\n[SEP0001]\ndevicetype = 7960\nmeetme = off\nbutton = line, 100\n[100]\nlabel = L\ncid_name = A\ncid_num = 100\n",
        );
        let mut line = Line::new("100");
        let ctx = ApplyContext::new(&source, "100").with_parent_device(Some("SEP0001"));
        let report = apply_configuration(&mut line, &ctx);
        assert!(!line.meetme);
        assert_eq!(report.outcome("meetme").unwrap().origin, ValueOrigin::DeviceSection);

        let mut orphan = Line::new("100");
        apply_configuration(&mut orphan, &ApplyContext::new(&source, "100"));
        assert!(orphan.meetme);
    }

    #[test]
    fn port_change_needs_reset_once() {
        let source = store("[general]\nport = 2001\nservername = Lab\n");
        let mut global = GlobalConfig::default();
        let report = apply_configuration(&mut global, &ApplyContext::new(&source, "general"));
        assert_eq!(global.bindaddr.port(), 2001);
        assert_eq!(report.change, ChangeKind::NeedsDeviceReset);
        let changed: Vec<_> = report
            .outcomes
            .iter()
            .filter(|outcome| outcome.disposition == Disposition::Changed)
            .map(|outcome| outcome.name.as_str())
            .collect();
        assert_eq!(changed, vec!["port", "servername"]);
    }

    #[test]
    fn unknown_obsolete_and_ignored() {
        let source = store("[general]\nprotocolversion = 17\nfrobnicate = yes\n[SEP1]\ntype = device\ndevicetype = 7960\n");
        let mut global = GlobalConfig::default();
        let report = apply_configuration(&mut global, &ApplyContext::new(&source, "general"));
        assert_eq!(report.outcome("protocolversion").unwrap().disposition, Disposition::Obsolete);
        assert_eq!(report.unknown().count(), 1);

        let mut device = Device::new("SEP1");
        let report = apply_configuration(&mut device, &ApplyContext::new(&source, "SEP1"));
        assert_eq!(report.outcome("type").unwrap().disposition, Disposition::Ignored);
        assert_eq!(device.devicetype, "7960");
    }

    #[test]
    fn strings_truncate_and_compare_case_insensitively() {
        let mut global = GlobalConfig::default();
        let long = "x".repeat(100);
        let entries = [ConfigEntry::new("servername", long.as_str(), 1)];
        apply_values(&mut global, "general", &entries);
        assert_eq!(global.servername.len(), 39);

        let entries = [ConfigEntry::new("context", "SCCP", 1)];
        let report = apply_values(&mut global, "general", &entries);
        assert_eq!(report.outcome("context").unwrap().disposition, Disposition::Unchanged);
    }

    #[test]
    fn string_pointer_clears_on_empty() {
        let mut line = Line::new("100");
        let set = [ConfigEntry::new("trnsfvm", "800", 1)];
        apply_values(&mut line, "100", &set);
        assert_eq!(line.trnsfvm.as_deref(), Some("800"));
        let clear = [ConfigEntry::new("trnsfvm", "", 2)];
        let report = apply_values(&mut line, "100", &clear);
        assert_eq!(line.trnsfvm, None);
        assert!(report.changed());
    }

    #[test]
    fn string_pointer_compares_case_insensitively() {
        let mut line = Line::new("100");
        apply_values(&mut line, "100", &[ConfigEntry::new("trnsfvm", "VoiceMail", 1)]);
        let report = apply_values(&mut line, "100", &[ConfigEntry::new("trnsfvm", "voicemail", 2)]);
        assert_eq!(report.outcome("trnsfvm").unwrap().disposition, Disposition::Unchanged);
        assert_eq!(line.trnsfvm.as_deref(), Some("VoiceMail"));
    }

    #[test]
    fn deprecated_option_is_still_applied() {
        let source = store("[general]
[SEP1]
devicetype = 7960
nat = on
");
        let mut device = Device::new("SEP1");
        let report = apply_configuration(&mut device, &ApplyContext::new(&source, "SEP1"));

        assert!(device.nat);
        let outcome = report.outcome("nat").unwrap();
        assert_eq!(outcome.disposition, Disposition::Changed);
        assert_eq!(outcome.origin, ValueOrigin::Supplied);

        let off = store("[general]
[SEP1]
devicetype = 7960
nat = off
");
        let report = apply_configuration(&mut device, &ApplyContext::new(&off, "SEP1"));
        assert!(!device.nat);
        assert!(report.changed());
        assert!(!report.needs_reset());
    }

    #[test]
    fn integers_accept_hex_and_reject_garbage() {
        let mut line = Line::new("100");
        let report = apply_values(
            &mut line,
            "100",
            &[
                ConfigEntry::new("secondary_dialtone_tone", "0x21", 1),
                ConfigEntry::new("incominglimit", "many", 2),
            ],
        );
        assert_eq!(line.secondary_dialtone_tone, 0x21);
        assert_eq!(report.outcome("incominglimit").unwrap().disposition, Disposition::Invalid);
    }

    #[test]
    fn lists_are_replaced_not_appended() {
        let source = store("[general]\n[SEP1]\ndevicetype = 7960\nbutton = line, 100\nbutton = speeddial, Home, 200\n");
        let mut device = Device::new("SEP1");
        let ctx = ApplyContext::new(&source, "SEP1");
        apply_configuration(&mut device, &ctx);
        apply_configuration(&mut device, &ctx);
        assert_eq!(device.buttons.len(), 2);
        // acl inherited from the global compiled defaults
        assert_eq!(device.ha.len(), 4);
    }

    #[test]
    fn button_merge_reports() {
        let first = store("[general]\n[SEP1]\ndevicetype = 7960\nbutton = speeddial, Home, 200\n");
        let same = first.clone();
        let changed = store("[general]\n[SEP1]\ndevicetype = 7960\nbutton = speeddial, Home, 201\n");
        let unknown = store("[general]\n[SEP1]\ndevicetype = 7960\nbutton = unknowntype, Label\n");

        let mut device = Device::new("SEP1");
        apply_configuration(&mut device, &ApplyContext::new(&first, "SEP1"));

        let report = apply_configuration(&mut device, &ApplyContext::new(&same, "SEP1"));
        assert_eq!(report.outcome("button").unwrap().disposition, Disposition::Unchanged);

        let report = apply_configuration(&mut device, &ApplyContext::new(&changed, "SEP1"));
        assert_eq!(report.outcome("button").unwrap().disposition, Disposition::Changed);
        assert!(report.needs_reset());

        let report = apply_configuration(&mut device, &ApplyContext::new(&unknown, "SEP1"));
        assert_eq!(report.outcome("button").unwrap().disposition, Disposition::Invalid);
        assert!(!report.changed());
        assert!(matches!(
            &device.buttons.snapshot()[0].kind,
            ButtonKind::SpeedDial { extension, .. } if extension == "201"
        ));
    }

    #[test]
    fn line_button_options_change_is_reported() {
        let first = store("[general]\n[SEP1]\ndevicetype = 7960\nbutton = line, 100, default\n");
        let other = store("[general]\n[SEP1]\ndevicetype = 7960\nbutton = line, 100, other\n");

        let mut device = Device::new("SEP1");
        apply_configuration(&mut device, &ApplyContext::new(&first, "SEP1"));
        let report = apply_configuration(&mut device, &ApplyContext::new(&first, "SEP1"));
        assert_eq!(report.outcome("button").unwrap().disposition, Disposition::Unchanged);

        let report = apply_configuration(&mut device, &ApplyContext::new(&other, "SEP1"));
        assert_eq!(report.outcome("button").unwrap().disposition, Disposition::Changed);
        assert!(matches!(
            &device.buttons.snapshot()[0].kind,
            ButtonKind::Line { name, options, .. } if name == "100" && options == "other"
        ));
    }

    #[test]
    fn removed_list_values_clear_the_list() {
        let with = store("[general]\n[SEP1]\ndevicetype = 7960\naddon = 7914\n");
        let without = store("[general]\n[SEP1]\ndevicetype = 7960\n");
        let mut device = Device::new("SEP1");
        apply_configuration(&mut device, &ApplyContext::new(&with, "SEP1"));
        assert_eq!(device.addons.len(), 1);

        let report = apply_configuration(&mut device, &ApplyContext::new(&without, "SEP1"));
        assert!(device.addons.is_empty());
        assert!(report.needs_reset());
    }
}
