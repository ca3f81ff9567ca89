#![doc = include_str!("../README.md")]

use std::{
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use dochtml::{
    Converter,
    config::Config,
    delivery::DirectoryTransport,
    model::Document,
};

/// Converts a JSON document tree into sanitized HTML plus its images.
#[derive(Debug, Clone, Parser, Default)]
#[clap(name = "dochtml", version, about)]
pub struct ConvertArgs {
    /// Path to the input document, in JSON
    #[clap(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory to deliver the HTML and images into, or `-` to print the
    /// HTML to stdout
    #[clap(value_name = "OUTPUT", default_value = None)]
    pub output: Option<String>,

    /// Configures the URL prefix of the emitted image links
    #[clap(long, default_value = None, value_name = "URL")]
    pub asset_base: Option<String>,

    /// Recipient recorded in the delivered message
    #[clap(long = "to", default_value = None, value_name = "EMAIL")]
    pub recipient: Option<String>,

    /// Path to a TOML configuration file
    #[clap(long, env = "DOCHTML_CONFIG", default_value = None, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skips the output cleanup pass
    #[clap(long)]
    pub no_sanitize: bool,
}

fn main() -> Result<()> {
    let _ = env_logger::builder()
        .filter_module("dochtml", log::LevelFilter::Info)
        .parse_default_env()
        .try_init();

    run(ConvertArgs::parse())
}

fn run(args: ConvertArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(asset_base) = args.asset_base {
        config.convert.asset_base = asset_base.into();
    }
    if let Some(recipient) = args.recipient {
        config.delivery.recipient = Some(recipient.into());
    }
    if args.no_sanitize {
        config.convert.sanitize = false;
    }

    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let doc = Document::from_reader(std::io::BufReader::new(file))?;

    let converter = Converter::new().with_feature(config.convert);

    if args.output.as_deref() == Some("-") {
        let conv = converter.convert(&doc)?;
        std::io::stdout()
            .write_all(conv.html.as_bytes())
            .context("failed to write to stdout")?;
        return Ok(());
    }

    let output = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_dir(&args.input));
    let transport = DirectoryTransport::new(output);
    let message = converter.deliver(&doc, &config.delivery, &transport)?;

    log::info!(
        "wrote {} ({} attachment(s)) to {}",
        message.subject,
        message.attachments.len(),
        transport.dir().display()
    );
    Ok(())
}

/// `report.json` is delivered into `report-html` next to it.
fn default_output_dir(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("document"));
    name.push("-html");
    input.with_file_name(name)
}
