use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use juror_core::{decode_literal, Config, SignalGroup};
use juror_runtime::Inspector;

mod cli;

use cli::{Cli, Commands, STDIN};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Literal { input } => {
            let text = read_input(&input)?;
            println!("{}", decode_literal(text.trim_end_matches(|c: char| c == '\n' || c == '\r')));
        }

        Commands::Probe { input } => {
            let text = read_input(&input)?;
            let inspector = Inspector::from_config(&config)?;
            match inspector.probe(&text) {
                Some(map) => emit(&Value::Object(map), cli.pretty)?,
                None => {
                    println!("null");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::Decode {
            input,
            hint,
            json_input,
        } => {
            let raw = read_raw(&input, json_input)?;
            let inspector = Inspector::from_config(&config)?;
            emit(&inspector.decode(&raw, hint.as_deref()), cli.pretty)?;
        }

        Commands::Signals {
            input,
            metric,
            ordered,
            json_input,
        } => {
            let raw = read_raw(&input, json_input)?;
            let inspector = Inspector::from_config(&config)?;
            let groups = inspector.signals(&raw, metric.as_deref());
            debug!(groups = groups.len(), "normalized signals");

            if ordered {
                let sorted: Vec<SignalGroup> = groups.iter().map(SignalGroup::ordered).collect();
                emit(&sorted, cli.pretty)?;
            } else {
                emit(&*groups, cli.pretty)?;
            }
        }

        Commands::Classify { input, json_input } => {
            let raw = read_raw(&input, json_input)?;
            let inspector = Inspector::from_config(&config)?;
            let value = inspector.decode(&raw, None).into_value();
            emit(&inspector.classify(&value), cli.pretty)?;
        }

        Commands::Record { input, reserved } => {
            if let Some(reserved) = reserved {
                config.record.reserved_fields = reserved;
            }
            let text = read_input(&input)?;
            let inspector = Inspector::from_config(&config)?;
            let Some(record) = inspector.probe(&text) else {
                bail!("input is not a mapping");
            };
            emit(&inspector.layout_record(&record), cli.pretty)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_input(input: &str) -> Result<String> {
    if input == STDIN {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("reading {}", input))
    }
}

/// Input as a raw value: a JSON value with `--json-input`, otherwise text.
fn read_raw(input: &str, json_input: bool) -> Result<Value> {
    let text = read_input(input)?;
    if json_input {
        serde_json::from_str(&text).context("parsing --json-input value")
    } else {
        Ok(Value::String(text))
    }
}

fn emit<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
