//! `fcore storage` command - Container free time and storage charges

use console::style;
use miette::Result;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::calc::storage::summarize_container_storage_with;
use crate::cli::helpers::{date_arg, format_money};
use crate::cli::output::{render, resolve_format, write_output};
use crate::cli::table::{CellValue, Table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::dates::today;
use crate::entities::container::{ContainerStorageSummary, ContainerTracking, FreeTimeStatus};

use super::read_records;

#[derive(clap::Args, Debug)]
pub struct StorageArgs {
    /// Container tracking file (YAML or JSON list)
    pub file: PathBuf,

    /// Evaluate as of this date (default: today)
    #[arg(long)]
    pub today: Option<String>,

    /// Only show containers that need attention (warning or critical)
    #[arg(long)]
    pub attention: bool,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: StorageArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let containers: Vec<ContainerTracking> = read_records(&args.file)?;
    let as_of = date_arg(args.today.as_deref(), today)?;
    let warning_days = config.free_time_warning_days();

    let mut summaries: Vec<ContainerStorageSummary> = containers
        .iter()
        .map(|c| summarize_container_storage_with(c, as_of, warning_days))
        .collect();
    if args.attention {
        summaries.retain(|s| s.free_time_status != FreeTimeStatus::Ok);
    }
    tracing::info!(containers = summaries.len(), %as_of, "storage summarized");

    let format = resolve_format(global, config);
    let content = render(&summaries, format, |format| {
        let mut table = Table::new(&["CONTAINER", "FREE TIME END", "STORAGE DAYS", "FEE", "STATUS"]);
        for s in &summaries {
            table.push(vec![
                CellValue::Id(s.container_number.clone()),
                CellValue::Date(s.free_time_end),
                CellValue::Number(s.storage_days),
                CellValue::Money(s.storage_fee),
                CellValue::FreeTime(s.free_time_status),
            ]);
        }
        let mut out = table.render(format)?;
        if format == OutputFormat::Csv || global.quiet {
            return Ok(out);
        }

        let total: Decimal = summaries.iter().map(|s| s.storage_fee).sum();
        let critical = summaries
            .iter()
            .filter(|s| s.free_time_status == FreeTimeStatus::Critical)
            .count();
        out.push_str(&format!(
            "\n{} container(s), storage {}",
            style(summaries.len()).cyan(),
            style(format_money(total)).bold()
        ));
        if critical > 0 {
            out.push_str(&format!(", {}", style(format!("{} past free time", critical)).red()));
        }
        out.push('\n');
        Ok(out)
    })?;

    write_output(&content, args.output, global.quiet)
}
