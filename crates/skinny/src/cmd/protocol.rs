use serde::Serialize;
use skinny_protocol::{descriptors, device_protocol, max_supported_version, DeviceProtocol, ProtocolFamily};
use skinny_wire::VersionBand;

use crate::cmd::ProtocolArgs;
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_json, schema_id, OutputFormat};

#[derive(Serialize)]
struct DescriptorInfo {
    name: &'static str,
    family: ProtocolFamily,
    version: u8,
    band: VersionBand,
}

impl From<&DeviceProtocol> for DescriptorInfo {
    fn from(descriptor: &DeviceProtocol) -> Self {
        Self {
            name: descriptor.name,
            family: descriptor.family,
            version: descriptor.version,
            band: descriptor.band(),
        }
    }
}

#[derive(Serialize)]
struct ProtocolOutput {
    schema_id: String,
    family: ProtocolFamily,
    negotiated: u8,
    max_supported: u8,
    selected: DescriptorInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    descriptors: Vec<DescriptorInfo>,
}

pub fn run(args: ProtocolArgs, format: OutputFormat) -> CliResult<i32> {
    let family: ProtocolFamily = args
        .family
        .parse()
        .map_err(|err| protocol_error("invalid --family", err))?;
    let selected = device_protocol(family, args.version)
        .map_err(|err| protocol_error("no descriptor", err))?;

    let out = ProtocolOutput {
        schema_id: schema_id("protocol-descriptor"),
        family,
        negotiated: args.version,
        max_supported: max_supported_version(family),
        selected: DescriptorInfo::from(selected),
        descriptors: if args.all {
            descriptors(family).iter().map(DescriptorInfo::from).collect()
        } else {
            Vec::new()
        },
    };
    print_protocol(&out, format);
    Ok(SUCCESS)
}

fn print_protocol(out: &ProtocolOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("Protocol selection:");
            println!("  Family:        {}", out.family);
            println!("  Negotiated:    {}", out.negotiated);
            println!("  Max supported: {}", out.max_supported);
            println!(
                "  Selected:      {} (version {}, band {})",
                out.selected.name, out.selected.version, out.selected.band
            );
            for descriptor in &out.descriptors {
                println!(
                    "  available:     {} (version {}, band {})",
                    descriptor.name, descriptor.version, descriptor.band
                );
            }
        }
        OutputFormat::Raw => println!("{}", out.selected.name),
    }
}
