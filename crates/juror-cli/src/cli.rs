use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Read from stdin when given as INPUT.
pub const STDIN: &str = "-";

#[derive(Parser, Debug)]
#[command(
    name = "juror",
    version,
    about = "Decode, normalize and classify LLM-judge evaluation payloads"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Configuration file (YAML, or JSON with a .json extension)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Pretty-print JSON output")]
    pub pretty: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity (-v debug, -vv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite scripting-literal text as JSON text
    Literal {
        #[arg(default_value = STDIN)]
        input: String,
    },

    /// Print the mapping held by the input, or `null` (exit code 1)
    Probe {
        #[arg(default_value = STDIN)]
        input: String,
    },

    /// Decode a raw field value
    Decode {
        #[arg(default_value = STDIN)]
        input: String,
        #[arg(long, help = "Field name, used in diagnostics")]
        hint: Option<String>,
        #[arg(long, help = "Treat input as an already-parsed JSON value")]
        json_input: bool,
    },

    /// Normalize a judge signals payload into groups
    Signals {
        #[arg(default_value = STDIN)]
        input: String,
        #[arg(long, help = "Metric under evaluation, used to unwrap per-metric payloads")]
        metric: Option<String>,
        #[arg(long, help = "Sort signals within each group into display order")]
        ordered: bool,
        #[arg(long, help = "Treat input as an already-parsed JSON value")]
        json_input: bool,
    },

    /// Decode a value and derive its presentation tree
    Classify {
        #[arg(default_value = STDIN)]
        input: String,
        #[arg(long, help = "Treat input as an already-parsed JSON value")]
        json_input: bool,
    },

    /// Split a record's fields into grid and section layout
    Record {
        #[arg(default_value = STDIN)]
        input: String,
        #[arg(long, value_delimiter = ',', help = "Fields to skip (overrides config)")]
        reserved: Option<Vec<String>>,
    },
}
