use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod config;
pub mod decode;
pub mod messages;
pub mod protocol;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode captured Skinny packets.
    Decode(DecodeArgs),
    /// List the message catalogue.
    Messages(MessagesArgs),
    /// Show the descriptor selected for a negotiated protocol version.
    Protocol(ProtocolArgs),
    /// Inspect sccp.conf files and the option registry.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Messages(args) => messages::run(args, format),
        Command::Protocol(args) => protocol::run(args, format),
        Command::Config(ConfigCommand::Check(args)) => config::check(args, format),
        Command::Config(ConfigCommand::Options(args)) => config::options(args, format),
        Command::Config(ConfigCommand::Softkeys(args)) => config::softkeys(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Packets as hex; whitespace and ':' separators are ignored.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub hex: Option<String>,
    /// Binary capture of concatenated packets.
    #[arg(long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Protocol version the packets were exchanged at.
    #[arg(long, short = 'p', default_value = "0")]
    pub protocol_version: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BandArg {
    Base,
    V17,
    V19,
}

#[derive(Args, Debug, Default)]
pub struct MessagesArgs {
    /// Only layouts of this band.
    #[arg(long)]
    pub band: Option<BandArg>,
    /// Case-insensitive filter on message or variant name.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProtocolArgs {
    /// Negotiated protocol version.
    #[arg(long)]
    pub version: u8,
    /// Protocol family: sccp or spcp.
    #[arg(long, default_value = "sccp")]
    pub family: String,
    /// List every descriptor of the family as well.
    #[arg(long)]
    pub all: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Load a configuration file and report problems per section.
    Check(CheckArgs),
    /// Dump the option registry.
    Options(OptionsArgs),
    /// Show softkey sets, built-in or from a configuration file.
    Softkeys(SoftkeysArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to sccp.conf.
    pub file: PathBuf,
    /// Include sections without problems in the output.
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug, Default)]
pub struct OptionsArgs {
    /// Segment to list: global, device, line or softkey.
    pub segment: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct SoftkeysArgs {
    /// Configuration file whose softkey sets to show.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
