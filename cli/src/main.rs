use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use svf_enrich_core::{enrich_report, BranchColumn, EnrichOptions, Report};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "svf-enrich")]
#[command(
    about = "Resolve file paths, infer variable names and excerpt code for SVF memory-safety reports"
)]
#[command(version)]
struct Cli {
    /// Input SVF report (JSON array of warnings)
    #[arg(long, alias = "input_file", default_value = "in.json")]
    input_file: PathBuf,

    /// Output file for the enriched report
    #[arg(long, alias = "output_file", default_value = "out.json")]
    output_file: PathBuf,

    /// Root directory of the analyzed source code
    #[arg(long, alias = "root_dir", default_value = "./")]
    root_dir: PathBuf,

    /// Lines copied on each side of the warning line
    #[arg(long, alias = "copy_range", default_value_t = 5)]
    copy_range: usize,

    /// Treat names without lowercase letters as constants or macros
    #[arg(long, alias = "cap_not_name", default_value_t = true, action = ArgAction::Set)]
    cap_not_name: bool,

    /// Column used to disambiguate conditional free path files
    #[arg(long, value_enum, default_value_t = BranchColumnArg::Primary)]
    branch_column: BranchColumnArg,

    /// Additional word never reported as a variable name (repeatable)
    #[arg(long = "extra-keyword", value_name = "WORD")]
    extra_keywords: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum BranchColumnArg {
    Primary,
    Ignore,
}

impl From<BranchColumnArg> for BranchColumn {
    fn from(val: BranchColumnArg) -> Self {
        match val {
            BranchColumnArg::Primary => BranchColumn::Primary,
            BranchColumnArg::Ignore => BranchColumn::Ignore,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; the report itself only ever goes to the output file
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let report: Report = {
        let file = File::open(&cli.input_file).with_context(|| {
            format!("Failed to open input file: {}", cli.input_file.display())
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).with_context(|| {
            format!("Failed to parse SVF report from: {}", cli.input_file.display())
        })?
    };
    tracing::info!(input = %cli.input_file.display(), "loaded SVF report");
    tracing::info!("There are {} warnings in this report", report.len());

    // All fields set explicitly; clippy enforces exhaustiveness
    let options = EnrichOptions {
        root_dir: cli.root_dir,
        copy_range: cli.copy_range,
        caps_as_constants: cli.cap_not_name,
        branch_column: cli.branch_column.into(),
        extra_keywords: cli.extra_keywords,
    };

    let enriched = enrich_report(report, &options)
        .map_err(|e| anyhow::Error::from(e).context("Enrichment failed"))?;

    write_json(&enriched.records, &cli.output_file, cli.format)?;
    tracing::info!(output = %cli.output_file.display(), "wrote enriched report");

    let summary = &enriched.summary;
    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        conditional = summary.conditional_failures,
        "enrichment finished"
    );
    for (reason, count) in &summary.by_reason {
        tracing::info!(%reason, count, "failed warnings");
    }

    Ok(())
}

fn write_json<T: serde::Serialize>(val: &T, path: &Path, format: OutputFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output file")?;

    Ok(())
}
