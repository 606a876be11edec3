//! keysort cli interface

use clap::{Parser, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Sort key
    ///
    /// A field name, prefixed with `-` to sort descending or `+` to sort ascending (default).
    /// Can be specified multiple times or as a comma separated list, earlier keys take precedence.
    ///
    /// Example: { keysort -k -priority -k name } or { keysort -k=-priority,name }
    #[clap(
        short = 'k',
        long = "key",
        value_delimiter = ',',
        allow_hyphen_values(true)
    )]
    pub keys: Vec<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Load records from a yaml or json file
    ///
    /// The file must contain a list of records. Can be specified multiple
    /// times, records of all files are sorted together.
    ///
    /// Reads stdin unless a file is given.
    #[clap(short = 'f', long = "input-file")]
    pub files: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}
