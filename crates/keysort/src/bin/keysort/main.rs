mod cli;

use anyhow::Context;
use keysort::value::Value;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("KEYSORT_LOG"))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = sort(cli) {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn sort(cli: cli::Cli) -> anyhow::Result<()> {
    let spec = keysort::sorter::by_keys(&cli.keys).context("Invalid sort key")?;
    let mut records = load(&cli.input)?;

    tracing::info!(records = records.len(), keys = spec.len(), "sorting");
    spec.sort(&mut records).context("Unable to sort records")?;

    output(&cli.output, &records)
}

fn load(input: &cli::InputArgs) -> anyhow::Result<Vec<Value>> {
    if input.files.is_empty() {
        let stdin = std::io::read_to_string(std::io::stdin())?;
        return parse_records(&stdin).context("Unable to parse records from stdin");
    }

    let mut records = vec![];
    for file_path in &input.files {
        tracing::info!(path=%file_path.display(), "loading file");

        let file_contents = std::fs::read_to_string(file_path)
            .with_context(|| format!("Unable to read {}", file_path.display()))?;
        let file_records = parse_records(&file_contents)
            .with_context(|| format!("Unable to parse records from {}", file_path.display()))?;

        records.extend(file_records);
    }

    Ok(records)
}

/// Parses a list of records, json is read as yaml
fn parse_records(source: &str) -> anyhow::Result<Vec<Value>> {
    match serde_yaml::from_str::<Value>(source)? {
        Value::Array(records) => Ok(records),
        other => anyhow::bail!("Expected a list of records but found {}", other.type_name()),
    }
}

fn output(output: &cli::OutputArgs, records: &[Value]) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), records)?,
        cli::OutputFormat::Json => serde_json::to_writer_pretty(std::io::stdout(), records)?,
    };

    Ok(())
}
