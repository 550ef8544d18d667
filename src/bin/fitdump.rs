//! `fitdump` — CLI front-end for `fit_rs` (spec.md §6, external collaborator,
//! out of the core's scope but built here for a runnable crate).
//!
//! Grounded on `coursepointer-cli`'s `clap::Parser` derive layout
//! (`examples/mshroyer-coursepointer/coursepointer-cli/src/main.rs`) for the
//! argument shape, and on the teacher's division of labor between library
//! and binary (`geoelan`'s CLI calls into `fit-rs`, never duplicating parse
//! logic) for keeping all decoding in the library crate.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde_json::{json, Value};

use fit_rs::{message::FieldValue, DecodeOptions, Error, Message};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Readable,
    Json,
}

/// Decode a FIT file and print its messages.
#[derive(Parser)]
#[command(name = "fitdump")]
struct Args {
    /// FIT file to decode
    file: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short = 't', long, value_enum, default_value = "readable")]
    format: OutputFormat,

    /// Only print messages with this name (e.g. `record`) or global number
    #[arg(short, long)]
    name: Option<String>,

    /// Decode even if the trailing CRC doesn't match
    #[arg(long)]
    ignore_crc: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fitdump: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let options = DecodeOptions { verify_crc: !args.ignore_crc, ..DecodeOptions::default() };
    let decoder = fit_rs::open(fit_rs::Source::Path(args.file.clone()), options)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    let messages = decoder.messages();
    let filtered: Box<dyn Iterator<Item = Result<Message, Error>>> = match &args.name {
        Some(name) => Box::new(messages.named(name)),
        None => Box::new(messages),
    };

    match args.format {
        OutputFormat::Readable => {
            for message in filtered {
                let message = message?;
                write_readable(&mut out, &message)?;
            }
        }
        OutputFormat::Json => {
            let messages = filtered.collect::<Result<Vec<_>, _>>()?;
            let values: Vec<Value> = messages.iter().map(message_json).collect();
            serde_json::to_writer_pretty(&mut out, &values).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_readable(out: &mut dyn Write, message: &Message) -> std::io::Result<()> {
    writeln!(out, "{} (#{})", message.name, message.global_message_number)?;
    for field in &message.fields {
        let units = field.units.as_deref().unwrap_or("");
        writeln!(out, "  {}: {}{}", field.name, field_value_string(&field.value), units)?;
    }
    Ok(())
}

fn field_value_string(value: &FieldValue) -> String {
    match value {
        FieldValue::Base(base) => format!("{:?}", base),
        FieldValue::Scaled(v) => format!("{}", v),
        FieldValue::Enum { raw, name: Some(name) } => format!("{} ({})", name, raw),
        FieldValue::Enum { raw, name: None } => format!("{}", raw),
        FieldValue::Timestamp(dt) => dt.to_rfc3339(),
    }
}

fn message_json(message: &Message) -> Value {
    let fields: Vec<Value> = message
        .fields
        .iter()
        .map(|field| {
            json!({
                "name": field.name,
                "value": field_value_json(&field.value),
                "units": field.units,
            })
        })
        .collect();
    json!({
        "global_message_number": message.global_message_number,
        "name": message.name,
        "fields": fields,
    })
}

fn field_value_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Scaled(v) => json!(v),
        FieldValue::Enum { raw, name: Some(name) } => json!({ "raw": raw, "name": name }),
        FieldValue::Enum { raw, name: None } => json!(raw),
        FieldValue::Timestamp(dt) => json!(dt.to_rfc3339()),
        FieldValue::Base(base) => json!(format!("{:?}", base)),
    }
}
