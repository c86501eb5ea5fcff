//! Customer payment report

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::calc::reports::{
    aggregate_payments_by_customer, bucket_payment_aging, calculate_average_days_to_pay,
    identify_slow_payers_with,
};
use crate::cli::helpers::format_money;
use crate::cli::output::{render, resolve_format, write_output};
use crate::cli::table::{CellValue, Table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::dates::today;
use crate::entities::payment::{AgingBucket, AgingSummary, CustomerPayment, CustomerPaymentSummary};

use crate::cli::commands::read_records;
use crate::cli::helpers::date_arg;

#[derive(clap::Args, Debug)]
pub struct PaymentsArgs {
    /// Invoice/payment file (YAML or JSON list)
    pub file: PathBuf,

    /// Age outstanding balances as of this date (default: today)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Only list slow payers
    #[arg(long)]
    pub slow_only: bool,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CustomerRow {
    #[serde(flatten)]
    summary: CustomerPaymentSummary,
    slow_payer: bool,
}

#[derive(Debug, Serialize)]
struct PaymentsReport {
    as_of: chrono::NaiveDate,
    slow_payer_threshold_days: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_days_to_pay: Option<f64>,
    customers: Vec<CustomerRow>,
    aging: AgingSummary,
}

pub fn run(args: PaymentsArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let payments: Vec<CustomerPayment> = read_records(&args.file)?;
    let as_of = date_arg(args.as_of.as_deref(), today)?;
    let threshold = config.slow_payer_days();

    let all_days: Vec<f64> = payments
        .iter()
        .filter_map(|p| p.days_to_pay.map(f64::from))
        .collect();

    let mut customers: Vec<CustomerRow> = aggregate_payments_by_customer(&payments)
        .into_iter()
        .map(|summary| CustomerRow {
            slow_payer: identify_slow_payers_with(summary.average_days_to_pay, threshold),
            summary,
        })
        .collect();
    if args.slow_only {
        customers.retain(|c| c.slow_payer);
    }

    let report = PaymentsReport {
        as_of,
        slow_payer_threshold_days: threshold,
        average_days_to_pay: calculate_average_days_to_pay(&all_days),
        customers,
        aging: bucket_payment_aging(&payments, as_of),
    };

    let format = resolve_format(global, config);
    let content = render(&report, format, |format| {
        let mut table = Table::new(&[
            "CUSTOMER", "NAME", "INVOICES", "INVOICED", "PAID", "OUTSTANDING", "AVG DAYS", "PAYER",
        ]);
        for row in &report.customers {
            let s = &row.summary;
            table.push(vec![
                CellValue::Id(s.customer_id.clone()),
                CellValue::Text(s.customer_name.clone()),
                CellValue::Number(s.invoice_count as i64),
                CellValue::Money(s.total_invoiced),
                CellValue::Money(s.total_paid),
                CellValue::Money(s.outstanding),
                s.average_days_to_pay
                    .map_or(CellValue::Empty, |d| CellValue::Float(d, 1)),
                CellValue::Check(!row.slow_payer, "ok", "slow"),
            ]);
        }
        let mut out = table.render(format)?;
        if format == OutputFormat::Csv {
            return Ok(out);
        }

        let mut aging = Table::new(&["AGING", "OUTSTANDING"]);
        for bucket in AgingBucket::ALL {
            aging.push(vec![
                CellValue::Text(bucket.label().to_string()),
                CellValue::Money(report.aging.get(bucket)),
            ]);
        }
        out.push('\n');
        out.push_str(&aging.render(format)?);

        if !global.quiet {
            let slow = report.customers.iter().filter(|c| c.slow_payer).count();
            out.push_str(&format!(
                "\n{} customer(s), {} slow payer(s) (> {} days), outstanding {}\n",
                style(report.customers.len()).cyan(),
                style(slow).yellow(),
                threshold,
                style(format_money(report.aging.total())).bold()
            ));
        }
        Ok(out)
    })?;

    write_output(&content, args.output, global.quiet)
}
