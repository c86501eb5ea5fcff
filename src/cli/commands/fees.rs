//! `fcore fees` command - Customs and port fee totals and form checks

use clap::Subcommand;
use console::style;
use miette::{bail, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::calc::fees::{
    aggregate_fees_by_category, filter_fees, summarize_fees_by_payment_status,
    validate_container_form, validate_fee_form,
};
use crate::cli::helpers::format_money;
use crate::cli::output::{render, resolve_format, write_output};
use crate::cli::table::{CellValue, Table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::validation::{FieldError, FormValidation};
use crate::entities::container::ContainerForm;
use crate::entities::fee::{DocumentType, FeeCategory, FeeFilter, FeeForm, FeeRecord, PaymentStatus};

use super::read_records;

#[derive(Subcommand, Debug)]
pub enum FeesCommands {
    /// Fee totals by category and payment status
    Summary(SummaryArgs),

    /// Check fee (or container) forms before they are saved
    Validate(ValidateArgs),
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Fee list file (YAML or JSON)
    pub file: PathBuf,

    /// Only fees on this document type (pib, peb)
    #[arg(long = "type", short = 't')]
    pub document_type: Option<DocumentType>,

    /// Only fees on this import declaration
    #[arg(long)]
    pub pib: Option<String>,

    /// Only fees on this export declaration
    #[arg(long)]
    pub peb: Option<String>,

    /// Only fees in this category
    #[arg(long, short = 'c')]
    pub category: Option<FeeCategory>,

    /// Only fees with this payment status
    #[arg(long, short = 's')]
    pub status: Option<PaymentStatus>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Form list file (YAML or JSON)
    pub file: PathBuf,

    /// The file holds container forms instead of fee forms
    #[arg(long)]
    pub containers: bool,
}

#[derive(Debug, Serialize)]
struct FeeSummary {
    fee_count: usize,
    total: Decimal,
    by_category: BTreeMap<FeeCategory, Decimal>,
    by_payment_status: BTreeMap<PaymentStatus, Decimal>,
}

#[derive(Debug, Serialize)]
struct RowValidation {
    /// 1-based position in the input file
    row: usize,
    valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

pub fn run(cmd: FeesCommands, global: &GlobalOpts, config: &Config) -> Result<()> {
    match cmd {
        FeesCommands::Summary(args) => run_summary(args, global, config),
        FeesCommands::Validate(args) => run_validate(args, global, config),
    }
}

fn run_summary(args: SummaryArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let fees: Vec<FeeRecord> = read_records(&args.file)?;
    let criteria = FeeFilter {
        document_type: args.document_type,
        pib_id: args.pib,
        peb_id: args.peb,
        fee_category: args.category,
        payment_status: args.status,
    };
    let selected = filter_fees(&fees, &criteria);
    tracing::debug!(total = fees.len(), selected = selected.len(), "fees filtered");

    let by_category = aggregate_fees_by_category(selected.iter().copied());
    let summary = FeeSummary {
        fee_count: selected.len(),
        total: by_category.values().copied().sum(),
        by_category,
        by_payment_status: summarize_fees_by_payment_status(selected.iter().copied()),
    };

    let format = resolve_format(global, config);
    let content = render(&summary, format, |format| {
        if format == OutputFormat::Csv {
            let mut table = Table::new(&["GROUP", "KEY", "AMOUNT"]);
            for (category, amount) in &summary.by_category {
                table.push(vec![
                    CellValue::Text("category".to_string()),
                    CellValue::Text(category.to_string()),
                    CellValue::Money(*amount),
                ]);
            }
            for (status, amount) in &summary.by_payment_status {
                table.push(vec![
                    CellValue::Text("payment_status".to_string()),
                    CellValue::Text(status.to_string()),
                    CellValue::Money(*amount),
                ]);
            }
            return table.render(format);
        }

        let mut categories = Table::new(&["CATEGORY", "AMOUNT"]);
        for (category, amount) in &summary.by_category {
            categories.push(vec![CellValue::Text(category.to_string()), CellValue::Money(*amount)]);
        }
        let mut statuses = Table::new(&["PAYMENT STATUS", "AMOUNT"]);
        for (status, amount) in &summary.by_payment_status {
            statuses.push(vec![CellValue::Text(status.to_string()), CellValue::Money(*amount)]);
        }

        let mut out = String::new();
        out.push_str(&categories.render(format)?);
        out.push('\n');
        out.push_str(&statuses.render(format)?);
        if !global.quiet {
            out.push_str(&format!(
                "\n{} fee(s), total {}\n",
                style(summary.fee_count).cyan(),
                style(format_money(summary.total)).bold()
            ));
        }
        Ok(out)
    })?;

    write_output(&content, args.output, global.quiet)
}

fn run_validate(args: ValidateArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let outcomes: Vec<FormValidation> = if args.containers {
        let forms: Vec<ContainerForm> = read_records(&args.file)?;
        forms.iter().map(validate_container_form).collect()
    } else {
        let forms: Vec<FeeForm> = read_records(&args.file)?;
        forms.iter().map(validate_fee_form).collect()
    };

    let rows: Vec<RowValidation> = outcomes
        .into_iter()
        .enumerate()
        .map(|(i, outcome)| RowValidation {
            row: i + 1,
            valid: outcome.valid,
            errors: outcome.errors,
        })
        .collect();
    let invalid = rows.iter().filter(|r| !r.valid).count();

    let format = resolve_format(global, config);
    let content = render(&rows, format, |format| {
        let mut table = Table::new(&["ROW", "FIELD", "MESSAGE"]);
        for row in rows.iter().filter(|r| !r.valid) {
            for error in &row.errors {
                table.push(vec![
                    CellValue::Number(row.row as i64),
                    CellValue::Text(error.field.clone()),
                    CellValue::Text(error.message.clone()),
                ]);
            }
        }
        if table.is_empty() && format != OutputFormat::Csv {
            return Ok(if global.quiet {
                String::new()
            } else {
                format!("{} {} form(s) valid\n", style("✓").green(), rows.len())
            });
        }
        table.render(format)
    })?;
    write_output(&content, None, global.quiet)?;

    if invalid > 0 {
        bail!("{} of {} form(s) failed validation", invalid, rows.len());
    }
    Ok(())
}
