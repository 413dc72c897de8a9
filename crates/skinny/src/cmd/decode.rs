use bytes::BytesMut;
use serde::Serialize;
use skinny_wire::catalogue::VersionBand;
use skinny_wire::{decode_message, Message, MAX_PACKET_SIZE};

use crate::cmd::DecodeArgs;
use crate::exit::{io_error, wire_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{hex_id, print_json, schema_id, table, OutputFormat};

#[derive(Serialize)]
struct DecodedMessage<'a> {
    id: String,
    name: &'static str,
    variant: &'static str,
    band: Option<VersionBand>,
    direction: &'static str,
    payload_size: usize,
    message: &'a Message,
}

#[derive(Serialize)]
struct DecodeOutput<'a> {
    schema_id: String,
    protocol_version: u8,
    messages: Vec<DecodedMessage<'a>>,
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = match (&args.hex, &args.file) {
        (Some(text), _) => parse_hex(text)?,
        (None, Some(path)) => {
            std::fs::read(path).map_err(|err| io_error(&format!("read {}", path.display()), err))?
        }
        (None, None) => return Err(CliError::new(USAGE, "either --hex or --file is required")),
    };

    let messages = decode_all(&bytes, args.protocol_version)?;
    tracing::debug!(count = messages.len(), version = args.protocol_version, "decoded packets");

    let out = DecodeOutput {
        schema_id: schema_id("decoded-messages"),
        protocol_version: args.protocol_version,
        messages: messages
            .iter()
            .map(|message| DecodedMessage {
                id: hex_id(message.id()),
                name: message.name(),
                variant: message.variant_name(),
                band: message.band(),
                direction: message.direction().as_str(),
                payload_size: message.payload_len(),
                message,
            })
            .collect(),
    };
    print_decoded(&out, format);
    Ok(SUCCESS)
}

/// Decode every packet in `bytes`; a truncated trailing packet is an error.
fn decode_all(bytes: &[u8], version: u8) -> CliResult<Vec<Message>> {
    let mut buf = BytesMut::from(bytes);
    let mut messages = Vec::new();
    while !buf.is_empty() {
        let offset = bytes.len() - buf.len();
        match decode_message(&mut buf, version, MAX_PACKET_SIZE) {
            Ok(Some(message)) => messages.push(message),
            Ok(None) => {
                return Err(CliError::new(
                    DATA_INVALID,
                    format!("incomplete packet at offset {offset} ({} bytes left)", buf.len()),
                ))
            }
            Err(err) => return Err(wire_error(&format!("packet at offset {offset}"), err)),
        }
    }
    Ok(messages)
}

fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let digits: String = input
        .trim()
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':')
        .collect();
    hex::decode(&digits).map_err(|err| CliError::new(USAGE, format!("invalid hex input: {err}")))
}

fn print_decoded(out: &DecodeOutput<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = table(&["ID", "NAME", "VARIANT", "BAND", "SIZE"]);
            for message in &out.messages {
                table.add_row(vec![
                    message.id.clone(),
                    message.name.to_string(),
                    message.variant.to_string(),
                    message.band.map_or("-", VersionBand::as_str).to_string(),
                    message.payload_size.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for message in &out.messages {
                println!("{} {} ({} bytes)", message.id, message.name, message.payload_size);
                println!("{:#?}", message.message);
            }
        }
        OutputFormat::Raw => {
            for message in &out.messages {
                println!("{}", message.variant);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_accepts_separators() {
        assert_eq!(parse_hex("04 00:00 00").unwrap(), vec![4, 0, 0, 0]);
        assert_eq!(parse_hex("0x0a0B").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(parse_hex("abc").unwrap_err().code, USAGE);
        assert_eq!(parse_hex("zz").unwrap_err().code, USAGE);
    }

    #[test]
    fn decodes_concatenated_keepalives() {
        let packet = [4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let bytes = [packet, packet].concat();
        let messages = decode_all(&bytes, 0).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].variant_name(), "KeepAlive");
    }

    #[test]
    fn truncated_tail_is_reported() {
        let err = decode_all(&[4, 0, 0, 0, 0, 0], 0).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("offset 0"));
    }
}
