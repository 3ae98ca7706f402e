use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use bao::{FixReport, ScanOptions, fix_shebang, output};

use crate::logging;

#[derive(Parser, Debug)]
#[command(name = "bao", version)]
#[command(about = "Fix shebang lines in globally installed Bun scripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fix shebang lines from node to bun
    Fix(FixArgs),
}

#[derive(Args, Debug)]
pub struct FixArgs {
    /// Directory to process (default: ~/.bun/bin)
    pub directory: Option<PathBuf>,

    /// Process files recursively in subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip symlinks whose target lies outside the directory
    #[arg(long)]
    pub skip_outside: bool,

    /// Glob pattern of files to leave alone (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Summary format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

impl FixArgs {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions::default()
            .recursive(self.recursive)
            .verbose(self.verbose)
            .skip_outside(self.skip_outside)
            .exclude(self.exclude.clone())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Fix(args) => fix(&args),
    }
}

fn fix(args: &FixArgs) -> Result<()> {
    logging::init(args.verbose);

    let report = fix_shebang(args.directory.as_deref(), &args.scan_options())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => output::write_json(&report, &mut out)?,
        OutputFormat::Human => {
            output::write_human(&report, &mut out)?;
            writeln!(out)?;
            writeln!(out, "{}", status_line(&report))?;
        }
    }
    Ok(())
}

fn status_line(report: &FixReport) -> String {
    if !report.is_clean() {
        return format!(
            "\u{2717} {} problem(s) while fixing shebangs",
            report.failures.len()
        )
        .red()
        .to_string();
    }
    if report.changed_files == 0 {
        return format!(
            "\u{2713} Nothing to fix in {} file(s)",
            report.scanned_files
        )
        .normal()
        .to_string();
    }
    format!("\u{2713} Fixed {} file(s)", report.changed_files)
        .green()
        .to_string()
}
