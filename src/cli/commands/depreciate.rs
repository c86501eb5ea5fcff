//! `fcore depreciate` command - Monthly depreciation runs

use clap::Subcommand;
use console::style;
use miette::{miette, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

use crate::calc::depreciation::{
    calculate_total_depreciation, current_period_date, get_monthly_period_date,
    process_depreciation_batch, project_depreciation_schedule, validate_depreciation_inputs,
};
use crate::cli::helpers::{date_arg, format_money};
use crate::cli::output::{render, resolve_format, write_output};
use crate::cli::table::{CellValue, Table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::dates::today;
use crate::entities::asset::{DepreciableAsset, DepreciationRecord, ScheduleEntry, SkippedAsset};

use super::read_records;

#[derive(Subcommand, Debug)]
pub enum DepreciateCommands {
    /// Depreciate every asset in a register file for one period
    Batch(BatchArgs),

    /// Project the month-by-month schedule for one asset
    Schedule(ScheduleArgs),
}

#[derive(clap::Args, Debug)]
pub struct BatchArgs {
    /// Asset register file (YAML or JSON list)
    pub file: PathBuf,

    /// Period to post (any date in the month; default: current month)
    #[arg(long, short = 'p')]
    pub period: Option<String>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ScheduleArgs {
    /// Asset register file (YAML or JSON list)
    pub file: PathBuf,

    /// Asset to project
    #[arg(long, short = 'a')]
    pub asset: String,

    /// Number of months to project
    #[arg(long, short = 'm', default_value = "12")]
    pub months: u32,

    /// First month of the projection (default: current month)
    #[arg(long)]
    pub start: Option<String>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Serialized result of a batch run
#[derive(Debug, Serialize)]
struct BatchReport {
    period_date: chrono::NaiveDate,
    records: Vec<DepreciationRecord>,
    skipped: Vec<SkippedAsset>,
    total_depreciation: Decimal,
}

pub fn run(cmd: DepreciateCommands, global: &GlobalOpts, config: &Config) -> Result<()> {
    match cmd {
        DepreciateCommands::Batch(args) => run_batch(args, global, config),
        DepreciateCommands::Schedule(args) => run_schedule(args, global, config),
    }
}

fn run_batch(args: BatchArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let assets: Vec<DepreciableAsset> = read_records(&args.file)?;
    let period_date = get_monthly_period_date(date_arg(args.period.as_deref(), current_period_date)?);

    // Invalid register entries are reported alongside the skipped assets
    let mut rejected = Vec::new();
    let valid: Vec<DepreciableAsset> = assets
        .into_iter()
        .filter(|asset| {
            let check = validate_depreciation_inputs(asset);
            match check.error {
                Some(reason) if !check.valid => {
                    tracing::warn!(asset = %asset.id, %reason, "asset rejected");
                    rejected.push(SkippedAsset {
                        asset_id: asset.id.clone(),
                        reason,
                    });
                    false
                }
                _ => true,
            }
        })
        .collect();

    let mut batch = process_depreciation_batch(&valid, period_date);
    batch.skipped.extend(rejected);

    let report = BatchReport {
        period_date,
        total_depreciation: calculate_total_depreciation(&batch.records),
        records: batch.records,
        skipped: batch.skipped,
    };

    let format = resolve_format(global, config);
    let content = render(&report, format, |format| {
        let mut table = Table::new(&["ASSET", "DEPRECIATION", "BOOK BEFORE", "BOOK AFTER", "ACCUMULATED"]);
        for r in &report.records {
            table.push(vec![
                CellValue::Id(r.asset_id.clone()),
                CellValue::Money(r.depreciation_amount),
                CellValue::Money(r.book_value_before),
                CellValue::Money(r.book_value_after),
                CellValue::Money(r.accumulated_depreciation_after),
            ]);
        }
        let mut out = table.render(format)?;
        if format == OutputFormat::Csv || global.quiet {
            return Ok(out);
        }

        out.push('\n');
        for skipped in &report.skipped {
            out.push_str(&format!(
                "{} {} ({})\n",
                style("skipped").yellow(),
                skipped.asset_id,
                skipped.reason
            ));
        }
        out.push_str(&format!(
            "{} record(s) for {}, total {}\n",
            style(report.records.len()).cyan(),
            report.period_date.format("%Y-%m"),
            style(format_money(report.total_depreciation)).bold()
        ));
        Ok(out)
    })?;

    write_output(&content, args.output, global.quiet)
}

fn run_schedule(args: ScheduleArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let assets: Vec<DepreciableAsset> = read_records(&args.file)?;
    let asset = assets
        .iter()
        .find(|a| a.id == args.asset)
        .ok_or_else(|| miette!("Asset '{}' not found in {}", args.asset, args.file.display()))?;

    let check = validate_depreciation_inputs(asset);
    if let Some(reason) = check.error {
        return Err(miette!("Asset '{}' is invalid: {}", asset.id, reason));
    }

    let start = date_arg(args.start.as_deref(), today)?;
    let schedule: Vec<ScheduleEntry> = project_depreciation_schedule(asset, start, args.months);

    let format = resolve_format(global, config);
    let content = render(&schedule, format, |format| {
        let mut table = Table::new(&["#", "PERIOD", "OPENING", "DEPRECIATION", "CLOSING"]);
        for entry in &schedule {
            table.push(vec![
                CellValue::Number(i64::from(entry.period)),
                CellValue::Text(entry.period_date.format("%Y-%m").to_string()),
                CellValue::Money(entry.opening_book_value),
                CellValue::Money(entry.depreciation_amount),
                CellValue::Money(entry.closing_book_value),
            ]);
        }
        let mut out = table.render(format)?;
        let reaches_salvage = schedule
            .last()
            .is_some_and(|last| last.closing_book_value == asset.salvage_value);
        if format != OutputFormat::Csv && !global.quiet && reaches_salvage {
            out.push_str(&format!(
                "\n{} reaches salvage value in month {}\n",
                style(&asset.id).cyan(),
                schedule.len()
            ));
        }
        Ok(out)
    })?;

    write_output(&content, args.output, global.quiet)
}
