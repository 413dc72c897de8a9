//! Live configuration and reload.
//!
//! A reload runs in three phases. [`LiveRegistry::snapshot`] copies the
//! live objects, [`plan`] applies the new source to the copies without
//! touching shared state, and [`LiveRegistry::commit`] swaps the results in
//! and returns the devices that must re-register. A failed plan leaves the
//! live configuration untouched.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::convert::{parse_button, ButtonParse};
use crate::engine::{apply_configuration, ApplyContext, ApplyReport, Disposition};
use crate::error::{ConfigError, Result};
use crate::feature::{persist_features, restore_features, FeatureStore};
use crate::model::{ButtonKind, Device, GlobalConfig, Line};
use crate::softkey::{SoftKeySetBuilder, SoftKeySetConfiguration};
use crate::source::{ConfigSource, GENERAL_SECTION};

/// Options a line section must carry to be loaded.
const LINE_MINIMUM: [&str; 3] = ["label", "cid_name", "cid_num"];

/// What a reload does to one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    Added,
    Changed { reset: bool },
    Unchanged,
    Removed,
}

impl Transition {
    fn from_report(report: &ApplyReport) -> Self {
        if report.changed() {
            Transition::Changed {
                reset: report.needs_reset(),
            }
        } else {
            Transition::Unchanged
        }
    }

    pub fn needs_reset(self) -> bool {
        matches!(self, Transition::Changed { reset: true })
    }
}

/// Planned state of one object.
#[derive(Debug, Clone)]
pub struct ObjectPlan<T> {
    pub name: String,
    pub transition: Transition,
    /// New state, `None` for removed objects.
    pub object: Option<T>,
    pub report: Option<ApplyReport>,
}

/// A section that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSection {
    pub name: String,
    pub reason: String,
}

/// Result of the planning phase.
#[derive(Debug, Clone)]
pub struct ReloadPlan {
    pub global: ObjectPlan<GlobalConfig>,
    pub devices: Vec<ObjectPlan<Device>>,
    pub lines: Vec<ObjectPlan<Line>>,
    pub softkey_sets: Vec<ObjectPlan<SoftKeySetConfiguration>>,
    pub skipped: Vec<SkippedSection>,
}

impl ReloadPlan {
    /// Existing devices that must re-register once the plan is committed.
    ///
    /// A device is listed when the global change needs a reset, when its
    /// own change does, when one of its lines changed with reset, or when
    /// the softkey set it uses changed. Each device appears once.
    pub fn devices_to_reset(&self) -> Vec<String> {
        let global_reset = self.global.transition.needs_reset();
        let reset_lines: Vec<&str> = self
            .lines
            .iter()
            .filter(|line| line.transition.needs_reset())
            .map(|line| line.name.as_str())
            .collect();
        let changed_sets: Vec<&str> = self
            .softkey_sets
            .iter()
            .filter(|set| matches!(set.transition, Transition::Changed { .. } | Transition::Removed))
            .map(|set| set.name.as_str())
            .collect();

        self.devices
            .iter()
            .filter(|plan| !matches!(plan.transition, Transition::Added | Transition::Removed))
            .filter_map(|plan| {
                let device = plan.object.as_ref()?;
                let set_name = if device.softkeyset.is_empty() {
                    SoftKeySetConfiguration::DEFAULT_NAME
                } else {
                    device.softkeyset.as_str()
                };
                let reset = global_reset
                    || plan.transition.needs_reset()
                    || device
                        .line_names()
                        .iter()
                        .any(|line| reset_lines.contains(&line.as_str()))
                    || changed_sets.iter().any(|set| set.eq_ignore_ascii_case(set_name));
                reset.then(|| plan.name.clone())
            })
            .collect()
    }
}

/// Per-object summary of a committed reload.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSummary {
    pub name: String,
    pub transition: Transition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ApplyReport>,
}

impl<T> From<ObjectPlan<T>> for ObjectSummary {
    fn from(plan: ObjectPlan<T>) -> Self {
        Self {
            name: plan.name,
            transition: plan.transition,
            report: plan.report,
        }
    }
}

/// Result of a committed reload.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadOutcome {
    pub global: ObjectSummary,
    pub devices: Vec<ObjectSummary>,
    pub lines: Vec<ObjectSummary>,
    pub softkey_sets: Vec<ObjectSummary>,
    pub skipped: Vec<SkippedSection>,
    pub devices_to_reset: Vec<String>,
}

impl ReloadOutcome {
    fn summaries(&self) -> impl Iterator<Item = &ObjectSummary> {
        std::iter::once(&self.global)
            .chain(&self.devices)
            .chain(&self.lines)
            .chain(&self.softkey_sets)
    }

    pub fn count(&self, transition: fn(&Transition) -> bool) -> usize {
        self.summaries()
            .filter(|summary| transition(&summary.transition))
            .count()
    }

    /// Whether any section reported invalid or missing values.
    pub fn has_invalid(&self) -> bool {
        self.summaries()
            .filter_map(|summary| summary.report.as_ref())
            .any(ApplyReport::has_invalid)
    }
}

/// Copies of the live objects a plan is computed from.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub global: GlobalConfig,
    pub devices: Vec<Device>,
    pub lines: Vec<Line>,
    pub softkey_sets: Vec<SoftKeySetConfiguration>,
}

/// Apply `source` to a snapshot.
///
/// Fails when `[general]` is missing or `bindaddr` cannot be resolved;
/// section-level problems are reported in the plan instead.
pub fn plan(snapshot: &Snapshot, source: &dyn ConfigSource) -> Result<ReloadPlan> {
    if !source.has_section(GENERAL_SECTION) {
        return Err(ConfigError::MissingGeneralSection);
    }

    let mut global = snapshot.global.clone();
    let report = apply_configuration(&mut global, &ApplyContext::new(source, GENERAL_SECTION));
    if let Some(outcome) = report
        .outcomes
        .iter()
        .find(|outcome| outcome.name == "bindaddr" && outcome.disposition == Disposition::Invalid)
    {
        return Err(ConfigError::UnresolvableBindAddress(outcome.value.clone()));
    }
    let global = ObjectPlan {
        name: GENERAL_SECTION.to_string(),
        transition: Transition::from_report(&report),
        object: Some(global),
        report: Some(report),
    };

    let parents = line_parents(source);
    let mut devices = Vec::new();
    let mut lines = Vec::new();
    let mut softkey_sets = Vec::new();
    let mut skipped = Vec::new();
    let mut builder = SoftKeySetBuilder::with_sets(snapshot.softkey_sets.clone());
    let mut skip = |name: &str, reason: String| {
        warn!(section = name, %reason, "section skipped");
        skipped.push(SkippedSection {
            name: name.to_string(),
            reason,
        });
    };

    for name in source.section_names() {
        if name.eq_ignore_ascii_case(GENERAL_SECTION) {
            continue;
        }
        let Some(kind) = source.get(name, "type") else {
            skip(name, "no type".to_string());
            continue;
        };
        match kind.value.to_ascii_lowercase().as_str() {
            "device" => {
                if !has_value(source, name, "devicetype") {
                    skip(name, "missing devicetype".to_string());
                    continue;
                }
                let existing = snapshot.devices.iter().find(|device| device.id == name);
                let mut device = existing.cloned().unwrap_or_else(|| Device::new(name));
                let report = apply_configuration(&mut device, &ApplyContext::new(source, name));
                devices.push(ObjectPlan {
                    name: name.to_string(),
                    transition: existing.map_or(Transition::Added, |_| Transition::from_report(&report)),
                    object: Some(device),
                    report: Some(report),
                });
            }
            "line" => {
                if let Some(missing) = LINE_MINIMUM.iter().find(|key| !has_value(source, name, key)) {
                    skip(name, format!("missing {missing}"));
                    continue;
                }
                let existing = snapshot.lines.iter().find(|line| line.name == name);
                let mut line = existing.cloned().unwrap_or_else(|| Line::new(name));
                let ctx = ApplyContext::new(source, name)
                    .with_parent_device(parents.get(name).map(String::as_str));
                let report = apply_configuration(&mut line, &ctx);
                lines.push(ObjectPlan {
                    name: name.to_string(),
                    transition: existing.map_or(Transition::Added, |_| Transition::from_report(&report)),
                    object: Some(line),
                    report: Some(report),
                });
            }
            "softkeyset" => {
                let entries = source.entries(name).unwrap_or_default();
                let update = builder.build_set(name, entries);
                let transition = if update.created {
                    Transition::Added
                } else if update.changed() {
                    Transition::Changed { reset: true }
                } else {
                    Transition::Unchanged
                };
                softkey_sets.push(ObjectPlan {
                    name: update.name,
                    transition,
                    object: builder.find(name).cloned(),
                    report: Some(update.report),
                });
            }
            other => skip(name, format!("unknown type '{other}'")),
        }
    }

    for device in &snapshot.devices {
        if !devices.iter().any(|plan| plan.name == device.id) {
            devices.push(removed(&device.id, device.clone()));
        }
    }
    for line in &snapshot.lines {
        if !lines.iter().any(|plan| plan.name == line.name) {
            lines.push(removed(&line.name, line.clone()));
        }
    }
    for set in &snapshot.softkey_sets {
        if !softkey_sets.iter().any(|plan| plan.name.eq_ignore_ascii_case(&set.name)) {
            softkey_sets.push(removed::<SoftKeySetConfiguration>(&set.name, set.clone()));
        }
    }

    Ok(ReloadPlan {
        global,
        devices,
        lines,
        softkey_sets,
        skipped,
    })
}

fn removed<T>(name: &str, object: T) -> ObjectPlan<T> {
    ObjectPlan {
        name: name.to_string(),
        transition: Transition::Removed,
        // kept so reset planning can still see the old buttons
        object: Some(object),
        report: None,
    }
}

fn has_value(source: &dyn ConfigSource, section: &str, key: &str) -> bool {
    source
        .get(section, key)
        .is_some_and(|entry| !entry.value.trim().is_empty())
}

/// Line name to the first device section whose buttons reference it.
fn line_parents(source: &dyn ConfigSource) -> HashMap<String, String> {
    let mut parents = HashMap::new();
    for section in source.section_names() {
        let is_device = source
            .get(section, "type")
            .is_some_and(|kind| kind.value.eq_ignore_ascii_case("device"));
        if !is_device {
            continue;
        }
        for entry in source.get_all(section, "button") {
            if let ButtonParse::Valid(ButtonKind::Line { name, .. }) = parse_button(&entry.value) {
                parents.entry(name).or_insert_with(|| section.to_string());
            }
        }
    }
    parents
}

type Shared<T> = Arc<RwLock<T>>;

/// The configuration the server runs with.
///
/// Objects are shared as `Arc<RwLock<_>>` so sessions can hold on to the
/// device or line they serve while a reload swaps in new values.
#[derive(Default)]
pub struct LiveRegistry {
    global: Shared<GlobalConfig>,
    devices: RwLock<Vec<Shared<Device>>>,
    lines: RwLock<Vec<Shared<Line>>>,
    softkey_sets: RwLock<Vec<Shared<SoftKeySetConfiguration>>>,
    store: Option<Arc<dyn FeatureStore>>,
}

impl LiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that restores and persists device features through `store`.
    pub fn with_feature_store(store: Arc<dyn FeatureStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::default()
        }
    }

    /// Initial load; equivalent to a reload of an empty registry.
    pub fn load(&self, source: &dyn ConfigSource) -> Result<ReloadOutcome> {
        self.reload(source)
    }

    pub fn reload(&self, source: &dyn ConfigSource) -> Result<ReloadOutcome> {
        let plan = plan(&self.snapshot(), source)?;
        Ok(self.commit(plan))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            global: self.global.read().clone(),
            devices: self.devices.read().iter().map(|device| device.read().clone()).collect(),
            lines: self.lines.read().iter().map(|line| line.read().clone()).collect(),
            softkey_sets: self.softkey_sets.read().iter().map(|set| set.read().clone()).collect(),
        }
    }

    /// Swap a plan into the live configuration.
    pub fn commit(&self, plan: ReloadPlan) -> ReloadOutcome {
        let devices_to_reset = plan.devices_to_reset();
        let ReloadPlan {
            mut global,
            devices,
            lines,
            softkey_sets,
            skipped,
        } = plan;

        if let Some(config) = global.object.take() {
            if global.transition != Transition::Unchanged {
                *self.global.write() = config;
            }
        }

        let devices = {
            let mut live = self.devices.write();
            devices
                .into_iter()
                .map(|mut plan| {
                    self.commit_device(&mut live, &mut plan);
                    ObjectSummary::from(plan)
                })
                .collect()
        };
        let lines = {
            let mut live = self.lines.write();
            lines
                .into_iter()
                .map(|mut plan| {
                    commit_object(&mut live, &mut plan, |line: &Line| line.name.as_str());
                    ObjectSummary::from(plan)
                })
                .collect()
        };
        let softkey_sets = {
            let mut live = self.softkey_sets.write();
            softkey_sets
                .into_iter()
                .map(|mut plan| {
                    commit_object(&mut live, &mut plan, |set: &SoftKeySetConfiguration| set.name.as_str());
                    ObjectSummary::from(plan)
                })
                .collect()
        };

        let outcome = ReloadOutcome {
            global: ObjectSummary::from(global),
            devices,
            lines,
            softkey_sets,
            skipped,
            devices_to_reset,
        };
        info!(
            added = outcome.count(|t| *t == Transition::Added),
            changed = outcome.count(|t| matches!(t, Transition::Changed { .. })),
            removed = outcome.count(|t| *t == Transition::Removed),
            skipped = outcome.skipped.len(),
            resets = outcome.devices_to_reset.len(),
            "configuration committed"
        );
        outcome
    }

    fn commit_device(&self, live: &mut Vec<Shared<Device>>, plan: &mut ObjectPlan<Device>) {
        let position = live.iter().position(|device| device.read().id == plan.name);
        match (plan.transition, position) {
            (Transition::Added, _) => {
                if let Some(mut device) = plan.object.clone() {
                    if let Some(store) = &self.store {
                        restore_features(store.as_ref(), &mut device);
                    }
                    live.push(Arc::new(RwLock::new(device)));
                }
            }
            (Transition::Changed { .. }, Some(index)) => {
                if let Some(device) = plan.object.clone() {
                    let mut current = live[index].write();
                    let status = std::mem::take(&mut current.status);
                    *current = device;
                    current.status = status;
                }
            }
            (Transition::Removed, Some(index)) => {
                let device = live.remove(index);
                if let Some(store) = &self.store {
                    persist_features(store.as_ref(), &device.read());
                }
                debug!(device = %plan.name, "device removed");
            }
            _ => {}
        }
    }

    pub fn global(&self) -> Shared<GlobalConfig> {
        Arc::clone(&self.global)
    }

    pub fn device(&self, id: &str) -> Option<Shared<Device>> {
        self.devices
            .read()
            .iter()
            .find(|device| device.read().id == id)
            .cloned()
    }

    pub fn line(&self, name: &str) -> Option<Shared<Line>> {
        self.lines
            .read()
            .iter()
            .find(|line| line.read().name == name)
            .cloned()
    }

    pub fn softkey_set(&self, name: &str) -> Option<Shared<SoftKeySetConfiguration>> {
        self.softkey_sets
            .read()
            .iter()
            .find(|set| set.read().name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// The softkey set a device uses, falling back to the built-in set.
    pub fn softkey_set_for(&self, device: &Device) -> SoftKeySetConfiguration {
        let name = if device.softkeyset.is_empty() {
            SoftKeySetConfiguration::DEFAULT_NAME
        } else {
            device.softkeyset.as_str()
        };
        self.softkey_set(name)
            .map(|set| set.read().clone())
            .unwrap_or_else(SoftKeySetConfiguration::builtin_default)
    }

    pub fn device_ids(&self) -> Vec<String> {
        self.devices.read().iter().map(|device| device.read().id.clone()).collect()
    }

    pub fn line_names(&self) -> Vec<String> {
        self.lines.read().iter().map(|line| line.read().name.clone()).collect()
    }

    /// Configured softkey sets, without the built-in one.
    pub fn softkey_sets(&self) -> Vec<SoftKeySetConfiguration> {
        self.softkey_sets.read().iter().map(|set| set.read().clone()).collect()
    }
}

impl std::fmt::Debug for LiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveRegistry")
            .field("devices", &self.devices.read().len())
            .field("lines", &self.lines.read().len())
            .field("softkey_sets", &self.softkey_sets.read().len())
            .field("feature_store", &self.store.is_some())
            .finish()
    }
}

fn commit_object<T: Clone>(live: &mut Vec<Shared<T>>, plan: &mut ObjectPlan<T>, name: fn(&T) -> &str) {
    let position = live
        .iter()
        .position(|object| name(&object.read()).eq_ignore_ascii_case(&plan.name));
    match (plan.transition, position) {
        (Transition::Added, None) => {
            if let Some(object) = plan.object.clone() {
                live.push(Arc::new(RwLock::new(object)));
            }
        }
        (Transition::Added | Transition::Changed { .. }, Some(index)) => {
            if let Some(object) = plan.object.clone() {
                *live[index].write() = object;
            }
        }
        (Transition::Removed, Some(index)) => {
            live.remove(index);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{device_family, MemoryFeatureStore, KEY_DND};
    use crate::model::DndMode;
    use crate::source::ConfigStore;

    const BASE: &str = "\
[general]
servername = Lab
keepalive = 60

[SEP001122334455]
type = device
devicetype = 7960
dndFeature = on
button = line, 100
button = speeddial, Home, 200

[100]
type = line
label = Office
cid_name = Alice
cid_num = 100
";

    fn store(text: &str) -> ConfigStore {
        ConfigStore::parse(text).unwrap()
    }

    #[test]
    fn initial_load_adds_everything() {
        let registry = LiveRegistry::new();
        let outcome = registry.load(&store(BASE)).unwrap();

        assert_eq!(outcome.devices.len(), 1);
        assert_eq!(outcome.devices[0].transition, Transition::Added);
        assert_eq!(outcome.lines[0].transition, Transition::Added);
        assert!(outcome.devices_to_reset.is_empty());
        assert_eq!(registry.global().read().servername, "Lab");
        assert_eq!(registry.device_ids(), vec!["SEP001122334455"]);
        assert_eq!(registry.line("100").unwrap().read().cid_name, "Alice");
    }

    #[test]
    fn reloading_same_source_changes_nothing() {
        let registry = LiveRegistry::new();
        registry.load(&store(BASE)).unwrap();
        let outcome = registry.reload(&store(BASE)).unwrap();

        assert_eq!(outcome.global.transition, Transition::Unchanged);
        assert_eq!(outcome.devices[0].transition, Transition::Unchanged);
        assert_eq!(outcome.lines[0].transition, Transition::Unchanged);
        assert!(outcome.devices_to_reset.is_empty());
    }

    #[test]
    fn global_reset_resets_every_device_once() {
        let registry = LiveRegistry::new();
        registry.load(&store(BASE)).unwrap();
        let changed = BASE.replace("keepalive = 60", "keepalive = 30\nport = 2001");
        let outcome = registry.reload(&store(&changed)).unwrap();

        assert!(outcome.global.transition.needs_reset());
        assert_eq!(outcome.devices_to_reset, vec!["SEP001122334455"]);
        assert_eq!(registry.global().read().bindaddr.port(), 2001);
    }

    #[test]
    fn line_reset_propagates_to_device() {
        let registry = LiveRegistry::new();
        registry.load(&store(BASE)).unwrap();
        let changed = BASE.replace("label = Office", "label = Front desk");
        let outcome = registry.reload(&store(&changed)).unwrap();

        assert!(outcome.lines[0].transition.needs_reset());
        assert_eq!(outcome.devices[0].transition, Transition::Unchanged);
        assert_eq!(outcome.devices_to_reset, vec!["SEP001122334455"]);
    }

    #[test]
    fn changed_softkey_set_resets_its_users() {
        let with_set = format!("{BASE}\n[default]\ntype = softkeyset\nonhook = redial,newcall\n");
        let registry = LiveRegistry::new();
        registry.load(&store(&with_set)).unwrap();

        let changed = with_set.replace("onhook = redial,newcall", "onhook = newcall");
        let outcome = registry.reload(&store(&changed)).unwrap();
        assert!(outcome.softkey_sets[0].transition.needs_reset());
        assert_eq!(outcome.devices_to_reset, vec!["SEP001122334455"]);

        let device = registry.device("SEP001122334455").unwrap();
        let set = registry.softkey_set_for(&device.read());
        assert_eq!(set.mode(crate::softkey::KeyMode::OnHook).count(), 1);
    }

    #[test]
    fn removed_sections_are_dropped() {
        let registry = LiveRegistry::new();
        registry.load(&store(BASE)).unwrap();
        let outcome = registry.reload(&store("[general]\nservername = Lab\n")).unwrap();

        assert_eq!(outcome.devices[0].transition, Transition::Removed);
        assert_eq!(outcome.lines[0].transition, Transition::Removed);
        assert!(outcome.devices_to_reset.is_empty());
        assert!(registry.device("SEP001122334455").is_none());
        assert!(registry.line_names().is_empty());
    }

    #[test]
    fn incomplete_sections_are_skipped() {
        let text = "[general]\n[SEP1]\ntype = device\n[200]\ntype = line\nlabel = x\n[orphan]\nfoo = bar\n[odd]\ntype = trunk\n";
        let outcome = LiveRegistry::new().load(&store(text)).unwrap();
        let names: Vec<_> = outcome.skipped.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["SEP1", "200", "orphan", "odd"]);
        assert_eq!(outcome.skipped[1].reason, "missing cid_name");
    }

    #[test]
    fn hard_errors_leave_live_state_alone() {
        let registry = LiveRegistry::new();
        registry.load(&store(BASE)).unwrap();

        let err = registry.reload(&store("[SEP1]\ntype = device\n")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingGeneralSection));

        let bad = BASE.replace("servername = Lab", "servername = Other\nbindaddr = 999.1.1.1");
        let err = registry.reload(&store(&bad)).unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvableBindAddress(value) if value == "999.1.1.1"));
        assert_eq!(registry.global().read().servername, "Lab");
    }

    #[test]
    fn features_survive_reload_and_restore_from_store() {
        let features = Arc::new(MemoryFeatureStore::new());
        features.put(&device_family("SEP001122334455"), KEY_DND, "silent");
        let registry = LiveRegistry::with_feature_store(features.clone());
        registry.load(&store(BASE)).unwrap();

        let device = registry.device("SEP001122334455").unwrap();
        assert_eq!(device.read().status.dnd, DndMode::Silent);

        let changed = BASE.replace("devicetype = 7960", "devicetype = 7960\ndescription = Lobby");
        let outcome = registry.reload(&store(&changed)).unwrap();
        assert_eq!(outcome.devices[0].transition, Transition::Changed { reset: true });
        assert_eq!(device.read().description, "Lobby");
        assert_eq!(device.read().status.dnd, DndMode::Silent);
    }

    #[test]
    fn line_inherits_from_referencing_device() {
        let text = BASE.replace("dndFeature = on", "dndFeature = on\ntransfer = off");
        let registry = LiveRegistry::new();
        registry.load(&store(&text)).unwrap();
        assert!(!registry.line("100").unwrap().read().transfer);
    }
}
