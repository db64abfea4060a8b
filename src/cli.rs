use crate::model::{ReportKind, ScmKind};
use crate::report::ReportWriter;
use crate::scm::{self, AccessorOptions};
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "scmxls")]
#[command(about = "Export source-control history as commit-history or impact-statement spreadsheets")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, help = "Output file to write to")]
    pub outfile: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = ScmKind::Git, help = "Source control system to read")]
    pub scm: ScmKind,

    #[arg(short = 'I', long, help = "Generate an impact statement")]
    pub impact: bool,

    #[arg(short = 'H', long, help = "Export the commit history")]
    pub history: bool,

    #[arg(short, long, visible_alias = "repo", help = "Path to the repository (defaults to the current directory)")]
    pub directory: Option<PathBuf>,

    #[arg(short, long, help = "Stop at this revision, inclusive")]
    pub rev: Option<String>,

    #[arg(short, long, help = "Suppress progress and status output")]
    pub quiet: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// History wins when both report kinds are requested.
    pub fn report_kind(&self) -> Result<ReportKind> {
        if self.history {
            Ok(ReportKind::History)
        } else if self.impact {
            Ok(ReportKind::Impact)
        } else {
            Err(anyhow!(
                "Not sure what to do. Impact analysis (-I) or commit history (-H)?"
            ))
        }
    }

    pub fn execute(self) -> Result<()> {
        let kind = self.report_kind()?;
        let outfile = self
            .outfile
            .as_deref()
            .ok_or_else(|| anyhow!("Output filename missing (--outfile)"))?;
        let destination = output_path(outfile, kind);

        let directory = match &self.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let options = AccessorOptions {
            stop_revision: self.rev.clone(),
            show_progress: !self.quiet,
        };
        let accessor = scm::open(self.scm, &directory, options)
            .with_context(|| format!("Failed to open repository at {}", directory.display()))?;

        if !self.quiet {
            let what = match kind {
                ReportKind::History => "commit history",
                ReportKind::Impact => "impact statement",
            };
            println!("{}", style(format!("Generating {what}...")).bold());
        }

        let entries = accessor
            .get_log()
            .context("Failed to read repository history")?;
        let count = entries.len();
        log::info!("Collected {count} {} commits", accessor.kind());

        ReportWriter::new(kind)
            .write_header(Local::now())
            .write_data(entries)
            .save(&destination)
            .with_context(|| format!("Failed to save report to {}", destination.display()))?;

        if !self.quiet {
            println!(
                "...done. {} commits written to {}",
                style(count).cyan(),
                style(destination.display()).green()
            );
        }
        Ok(())
    }
}

/// `History-<name>.xlsx` or `Impacts-<name>.xlsx`, next to `outfile`.
pub fn output_path(outfile: &Path, kind: ReportKind) -> PathBuf {
    let name = outfile
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = if name.ends_with(".xlsx") {
        name
    } else {
        format!("{name}.xlsx")
    };
    outfile.with_file_name(format!("{}{name}", kind.file_prefix()))
}
