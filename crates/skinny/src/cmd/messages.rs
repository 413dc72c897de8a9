use serde::Serialize;
use skinny_wire::{entries, CatalogueEntry, VersionBand};

use crate::cmd::{BandArg, MessagesArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{hex_id, print_json, schema_id, table, OutputFormat};

#[derive(Serialize)]
struct CatalogueRow {
    id: String,
    name: &'static str,
    variant: &'static str,
    band: VersionBand,
    direction: &'static str,
    size: usize,
    max_size: usize,
}

#[derive(Serialize)]
struct MessagesOutput {
    schema_id: String,
    count: usize,
    messages: Vec<CatalogueRow>,
}

impl From<BandArg> for VersionBand {
    fn from(band: BandArg) -> Self {
        match band {
            BandArg::Base => VersionBand::Base,
            BandArg::V17 => VersionBand::V17,
            BandArg::V19 => VersionBand::V19,
        }
    }
}

pub fn run(args: MessagesArgs, format: OutputFormat) -> CliResult<i32> {
    let band = args.band.map(VersionBand::from);
    let search = args.search.map(|search| search.to_ascii_lowercase());

    let messages: Vec<CatalogueRow> = entries()
        .iter()
        .filter(|entry| band.map_or(true, |band| entry.band == band))
        .filter(|entry| search.as_deref().map_or(true, |search| matches_search(entry, search)))
        .map(|entry| CatalogueRow {
            id: hex_id(entry.id),
            name: entry.name(),
            variant: entry.variant,
            band: entry.band,
            direction: entry.direction().as_str(),
            size: entry.size,
            max_size: entry.max_size,
        })
        .collect();

    let out = MessagesOutput {
        schema_id: schema_id("message-catalogue"),
        count: messages.len(),
        messages,
    };
    print_messages(&out, format);
    Ok(SUCCESS)
}

fn matches_search(entry: &CatalogueEntry, search: &str) -> bool {
    entry.name().to_ascii_lowercase().contains(search)
        || entry.variant.to_ascii_lowercase().contains(search)
}

fn print_messages(out: &MessagesOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = table(&["ID", "NAME", "VARIANT", "BAND", "DIRECTION", "SIZE"]);
            for row in &out.messages {
                let size = if row.size == row.max_size {
                    row.size.to_string()
                } else {
                    format!("{}..{}", row.size, row.max_size)
                };
                table.add_row(vec![
                    row.id.clone(),
                    row.name.to_string(),
                    row.variant.to_string(),
                    row.band.to_string(),
                    row.direction.to_string(),
                    size,
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in &out.messages {
                println!("{} {:<4} {} ({})", row.id, row.band, row.name, row.variant);
            }
            println!("{} layouts", out.count);
        }
        OutputFormat::Raw => {
            for row in &out.messages {
                println!("{}", row.id);
            }
        }
    }
}
