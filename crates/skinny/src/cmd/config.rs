use serde::Serialize;
use skinny_config::reload::{ObjectSummary, SkippedSection};
use skinny_config::{
    segments, ConfigStore, Disposition, KeyMode, LiveRegistry, OptionInfo,
    OptionOutcome, SegmentId, SoftKeySetConfiguration, Transition,
};

use crate::cmd::{CheckArgs, OptionsArgs, SoftkeysArgs};
use crate::exit::{config_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_json, schema_id, table, yes_no, OutputFormat};

#[derive(Serialize)]
struct SectionOutput<'a> {
    section: &'a str,
    transition: Transition,
    needs_reset: bool,
    issues: Vec<&'a OptionOutcome>,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    schema_id: String,
    file: String,
    valid: bool,
    devices: usize,
    lines: usize,
    softkey_sets: usize,
    sections: Vec<SectionOutput<'a>>,
    skipped: &'a [SkippedSection],
}

/// Load a configuration as a first load would and report its problems.
pub fn check(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let display = args.file.display().to_string();
    let store = ConfigStore::from_path(&args.file)
        .map_err(|err| config_error(&format!("load {display}"), err))?;
    let registry = LiveRegistry::new();
    let outcome = registry
        .load(&store)
        .map_err(|err| config_error(&format!("load {display}"), err))?;

    let valid = !outcome.has_invalid();
    let sections = std::iter::once(&outcome.global)
        .chain(&outcome.devices)
        .chain(&outcome.lines)
        .chain(&outcome.softkey_sets)
        .filter_map(|summary| section_output(summary, args.all))
        .collect();
    let out = CheckOutput {
        schema_id: schema_id("config-check"),
        file: display,
        valid,
        devices: outcome.devices.len(),
        lines: outcome.lines.len(),
        softkey_sets: outcome.softkey_sets.len(),
        sections,
        skipped: &outcome.skipped,
    };
    print_check(&out, format);

    Ok(if valid { SUCCESS } else { DATA_INVALID })
}

fn section_output(summary: &ObjectSummary, all: bool) -> Option<SectionOutput<'_>> {
    let report = summary.report.as_ref()?;
    let issues: Vec<&OptionOutcome> = report
        .outcomes
        .iter()
        .filter(|outcome| {
            matches!(
                outcome.disposition,
                Disposition::Invalid | Disposition::Missing | Disposition::Unknown | Disposition::Obsolete
            )
        })
        .collect();
    if issues.is_empty() && !all {
        return None;
    }
    Some(SectionOutput {
        section: &summary.name,
        transition: summary.transition,
        needs_reset: report.needs_reset(),
        issues,
    })
}

fn print_check(out: &CheckOutput<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = table(&["SECTION", "LINE", "OPTION", "VALUE", "PROBLEM"]);
            for section in &out.sections {
                for issue in &section.issues {
                    table.add_row(vec![
                        section.section.to_string(),
                        issue.lineno.map_or_else(|| "-".to_string(), |line| line.to_string()),
                        issue.name.clone(),
                        issue.value.clone(),
                        disposition_label(issue.disposition).to_string(),
                    ]);
                }
            }
            for skipped in out.skipped {
                table.add_row(vec![
                    skipped.name.clone(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    format!("skipped: {}", skipped.reason),
                ]);
            }
            println!("{table}");
            print_summary(out);
        }
        OutputFormat::Pretty => {
            for section in &out.sections {
                for issue in &section.issues {
                    let line = issue.lineno.map_or_else(String::new, |line| format!(":{line}"));
                    println!(
                        "{}{line}: {} = '{}' ({})",
                        section.section,
                        issue.name,
                        issue.value,
                        disposition_label(issue.disposition)
                    );
                }
            }
            for skipped in out.skipped {
                println!("{}: skipped, {}", skipped.name, skipped.reason);
            }
            print_summary(out);
        }
        OutputFormat::Raw => println!("{}", if out.valid { "valid" } else { "invalid" }),
    }
}

fn print_summary(out: &CheckOutput<'_>) {
    println!(
        "{}: {} devices, {} lines, {} softkey sets, valid: {}",
        out.file,
        out.devices,
        out.lines,
        out.softkey_sets,
        yes_no(out.valid)
    );
}

fn disposition_label(disposition: Disposition) -> &'static str {
    match disposition {
        Disposition::Unchanged => "unchanged",
        Disposition::Changed => "changed",
        Disposition::Invalid => "invalid value",
        Disposition::Missing => "required option missing",
        Disposition::Unknown => "unknown option",
        Disposition::Ignored => "ignored",
        Disposition::Obsolete => "obsolete option",
    }
}

#[derive(Serialize)]
struct OptionRow {
    segment: SegmentId,
    #[serde(flatten)]
    info: OptionInfo,
}

#[derive(Serialize)]
struct OptionsOutput {
    schema_id: String,
    options: Vec<OptionRow>,
}

pub fn options(args: OptionsArgs, format: OutputFormat) -> CliResult<i32> {
    let wanted = args
        .segment
        .as_deref()
        .map(str::parse::<SegmentId>)
        .transpose()
        .map_err(|err| config_error("invalid segment", err))?;

    let options = segments()
        .iter()
        .filter(|segment| wanted.map_or(true, |wanted| segment.id == wanted))
        .flat_map(|segment| {
            segment
                .options()
                .into_iter()
                .map(|info| OptionRow { segment: segment.id, info })
        })
        .collect();
    let out = OptionsOutput {
        schema_id: schema_id("config-options"),
        options,
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => {
            let mut table = table(&["SEGMENT", "OPTION", "TYPE", "FLAGS", "RESET", "DEFAULT", "DESCRIPTION"]);
            for row in &out.options {
                table.add_row(vec![
                    row.segment.to_string(),
                    row.info.name.to_string(),
                    row.info.data_type.to_string(),
                    format!("{:?}", row.info.flags),
                    yes_no(row.info.change.needs_reset()).to_string(),
                    row.info.default.to_string(),
                    row.info.description.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Raw => {
            for row in &out.options {
                println!("{}.{}", row.segment, row.info.name);
            }
        }
    }
    Ok(SUCCESS)
}

#[derive(Serialize)]
struct SoftkeysOutput {
    schema_id: String,
    sets: Vec<SoftKeySetConfiguration>,
}

pub fn softkeys(args: SoftkeysArgs, format: OutputFormat) -> CliResult<i32> {
    let mut sets = match &args.file {
        Some(path) => {
            let context = format!("load {}", path.display());
            let store = ConfigStore::from_path(path).map_err(|err| config_error(&context, err))?;
            let registry = LiveRegistry::new();
            registry.load(&store).map_err(|err| config_error(&context, err))?;
            registry.softkey_sets()
        }
        None => Vec::new(),
    };
    if !sets
        .iter()
        .any(|set| set.name.eq_ignore_ascii_case(SoftKeySetConfiguration::DEFAULT_NAME))
    {
        sets.insert(0, SoftKeySetConfiguration::builtin_default());
    }

    let out = SoftkeysOutput {
        schema_id: schema_id("softkey-sets"),
        sets,
    };
    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => {
            let mut table = table(&["SET", "MODE", "KEYS"]);
            for set in &out.sets {
                for mode in KeyMode::ALL {
                    let keys = set
                        .mode(mode)
                        .labels()
                        .iter()
                        .map(|label| label.config_name())
                        .collect::<Vec<_>>()
                        .join(",");
                    table.add_row(vec![set.name.clone(), mode.config_name().to_string(), keys]);
                }
            }
            println!("{table}");
        }
        OutputFormat::Raw => {
            for set in &out.sets {
                println!("{}", set.name);
            }
        }
    }
    Ok(SUCCESS)
}
