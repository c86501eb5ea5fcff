//! Dashboard report aggregators
//!
//! Counts, shares and payment roll-ups over lists of business records.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::core::dates::days_between;
use crate::core::money::percentage;
use crate::entities::payment::{AgingBucket, AgingSummary, CustomerPayment, CustomerPaymentSummary};
use crate::entities::pipeline::{PipelineRecord, PipelineStage, StatusCount};
use crate::entities::report::ReportDefinition;

/// Average days-to-pay above which a customer counts as a slow payer
pub const SLOW_PAYER_THRESHOLD_DAYS: f64 = 45.0;

/// Count records per stage, converted records under `converted` only
///
/// Every stage is listed, including empty ones. Percentages are rounded to 2
/// decimals and are all zero for an empty input.
pub fn count_by_status(records: &[PipelineRecord]) -> Vec<StatusCount> {
    let mut counts: HashMap<PipelineStage, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.stage()).or_insert(0) += 1;
    }

    let total = records.len() as f64;
    PipelineStage::ALL
        .iter()
        .map(|stage| {
            let count = counts.get(stage).copied().unwrap_or(0);
            StatusCount {
                status: *stage,
                count,
                percentage: percentage(count as f64, total),
            }
        })
        .collect()
}

/// Share of `from_count` that made it to `to_count`, as a percentage
///
/// Zero when there is nothing to convert from. Not clamped: inconsistent
/// upstream data can legitimately yield more than 100.
pub fn calculate_conversion_rate(from_count: usize, to_count: usize) -> f64 {
    percentage(to_count as f64, from_count as f64)
}

/// Roll invoices up per customer, in order of first appearance
pub fn aggregate_payments_by_customer(payments: &[CustomerPayment]) -> Vec<CustomerPaymentSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<CustomerPaymentSummary> = Vec::new();
    let mut days: Vec<Vec<f64>> = Vec::new();

    for payment in payments {
        let slot = *index.entry(payment.customer_id.as_str()).or_insert_with(|| {
            summaries.push(CustomerPaymentSummary {
                customer_id: payment.customer_id.clone(),
                customer_name: payment.customer_name.clone(),
                invoice_count: 0,
                total_invoiced: Default::default(),
                total_paid: Default::default(),
                outstanding: Default::default(),
                average_days_to_pay: None,
            });
            days.push(Vec::new());
            summaries.len() - 1
        });

        let summary = &mut summaries[slot];
        summary.invoice_count += 1;
        summary.total_invoiced = summary.total_invoiced.saturating_add(payment.invoiced);
        summary.total_paid = summary.total_paid.saturating_add(payment.paid);
        if let Some(d) = payment.days_to_pay {
            days[slot].push(f64::from(d));
        }
    }

    for (summary, customer_days) in summaries.iter_mut().zip(&days) {
        summary.outstanding = summary.total_invoiced.saturating_sub(summary.total_paid);
        summary.average_days_to_pay = calculate_average_days_to_pay(customer_days);
    }

    summaries
}

/// Mean of the given day counts; `None` when there is no data
pub fn calculate_average_days_to_pay(days: &[f64]) -> Option<f64> {
    if days.is_empty() {
        return None;
    }
    Some(days.iter().sum::<f64>() / days.len() as f64)
}

/// True when the average strictly exceeds 45 days
pub fn identify_slow_payers(average_days: Option<f64>) -> bool {
    identify_slow_payers_with(average_days, SLOW_PAYER_THRESHOLD_DAYS)
}

/// [`identify_slow_payers`] with a configurable threshold
pub fn identify_slow_payers_with(average_days: Option<f64>, threshold_days: f64) -> bool {
    average_days.is_some_and(|avg| avg > threshold_days)
}

/// Outstanding balances bucketed by days past due as of `as_of`
///
/// Only positive balances are aged. Invoices without a due date count as
/// current.
pub fn bucket_payment_aging(payments: &[CustomerPayment], as_of: NaiveDate) -> AgingSummary {
    let mut summary = AgingSummary::default();
    for payment in payments {
        let outstanding = payment.outstanding();
        if outstanding.is_sign_negative() || outstanding.is_zero() {
            continue;
        }
        let bucket = match payment.due_date {
            Some(due) => AgingBucket::for_days_overdue(days_between(due, as_of)),
            None => AgingBucket::Current,
        };
        summary.add(bucket, outstanding);
    }
    summary
}

/// Reports whose name or description contains `query`, ignoring case
///
/// A blank query returns every report in its original order.
pub fn filter_reports_by_search<'a>(
    reports: &'a [ReportDefinition],
    query: &str,
) -> Vec<&'a ReportDefinition> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return reports.iter().collect();
    }
    reports
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle)
                || r
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Copy of `reports` in ascending display order; ties keep their input order
pub fn sort_reports_by_display_order(reports: &[ReportDefinition]) -> Vec<ReportDefinition> {
    let mut sorted = reports.to_vec();
    sorted.sort_by_key(|r| r.display_order);
    sorted
}
