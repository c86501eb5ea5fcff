//! Customs fee validation and roll-ups

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::core::dates::parse_iso_date;
use crate::core::validation::{is_present, FormErrors, FormValidation};
use crate::entities::container::{ContainerForm, ContainerStatus};
use crate::entities::fee::{
    DocumentType, FeeCategory, FeeFilter, FeeForm, FeeRecord, PaymentStatus,
};

/// True if `value` is one of the fee categories
pub fn is_valid_fee_category(value: &str) -> bool {
    FeeCategory::ALL.iter().any(|c| c.as_str() == value)
}

/// True if `value` is one of the payment statuses
pub fn is_valid_payment_status(value: &str) -> bool {
    PaymentStatus::ALL.iter().any(|s| s.as_str() == value)
}

/// True if `value` is one of the container statuses
pub fn is_valid_container_status(value: &str) -> bool {
    ContainerStatus::ALL.iter().any(|s| s.as_str() == value)
}

/// A fee must reference the declaration matching its document type
pub fn is_valid_document_link(
    document_type: &str,
    pib_id: Option<&str>,
    peb_id: Option<&str>,
) -> bool {
    match document_type {
        "pib" => is_present(pib_id),
        "peb" => is_present(peb_id),
        _ => false,
    }
}

/// Amount must be a positive, finite number
pub fn is_valid_fee_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// ISO 6346 shape: owner code and category letter, then six digits and a check digit
pub fn is_valid_container_number(value: &str) -> bool {
    let value = value.trim();
    value.is_ascii()
        && value.len() == 11
        && value[..4].chars().all(|c| c.is_ascii_uppercase())
        && value[4..].chars().all(|c| c.is_ascii_digit())
}

/// Fees matching every filter that is set
pub fn filter_fees<'a>(fees: &'a [FeeRecord], criteria: &FeeFilter) -> Vec<&'a FeeRecord> {
    fees.iter().filter(|fee| matches_filter(fee, criteria)).collect()
}

fn matches_filter(fee: &FeeRecord, criteria: &FeeFilter) -> bool {
    criteria.document_type.map_or(true, |t| fee.document_type == t)
        && criteria.fee_category.map_or(true, |c| fee.fee_category == c)
        && criteria.payment_status.map_or(true, |s| fee.payment_status == s)
        && criteria
            .pib_id
            .as_deref()
            .map_or(true, |id| fee.pib_id.as_deref() == Some(id))
        && criteria
            .peb_id
            .as_deref()
            .map_or(true, |id| fee.peb_id.as_deref() == Some(id))
}

/// Total amount per fee category
///
/// Every category is present (zero when unused) and the buckets add up to the
/// input total exactly.
pub fn aggregate_fees_by_category<'a, I>(fees: I) -> BTreeMap<FeeCategory, Decimal>
where
    I: IntoIterator<Item = &'a FeeRecord>,
{
    let mut totals: BTreeMap<FeeCategory, Decimal> =
        FeeCategory::ALL.iter().map(|c| (*c, Decimal::ZERO)).collect();
    for fee in fees {
        let total = totals.entry(fee.fee_category).or_insert(Decimal::ZERO);
        *total = total.saturating_add(fee.amount);
    }
    totals
}

/// Total amount per payment status, with the same exactness as the category roll-up
pub fn summarize_fees_by_payment_status<'a, I>(fees: I) -> BTreeMap<PaymentStatus, Decimal>
where
    I: IntoIterator<Item = &'a FeeRecord>,
{
    let mut totals: BTreeMap<PaymentStatus, Decimal> =
        PaymentStatus::ALL.iter().map(|s| (*s, Decimal::ZERO)).collect();
    for fee in fees {
        let total = totals.entry(fee.payment_status).or_insert(Decimal::ZERO);
        *total = total.saturating_add(fee.amount);
    }
    totals
}

/// Check a fee form field by field
pub fn validate_fee_form(form: &FeeForm) -> FormValidation {
    let mut errors = FormErrors::new();

    if let Some(doc_type) = errors.require("document_type", "Document type", form.document_type.as_deref()) {
        if ![DocumentType::Pib, DocumentType::Peb].iter().any(|t| t.as_str() == doc_type) {
            errors.push("document_type", "Document type must be pib or peb");
        } else if !is_valid_document_link(doc_type, form.pib_id.as_deref(), form.peb_id.as_deref()) {
            let field = if doc_type == "pib" { "pib_id" } else { "peb_id" };
            errors.push(field, format!("{} document is required", doc_type.to_uppercase()));
        } else {
            reject_other_link(&mut errors, doc_type, form.pib_id.as_deref(), form.peb_id.as_deref(), "fee");
        }
    }

    if let Some(category) = errors.require("fee_category", "Fee category", form.fee_category.as_deref()) {
        if !is_valid_fee_category(category) {
            errors.push("fee_category", "Invalid fee category");
        }
    }

    match form.amount {
        None => errors.push("amount", "Amount is required"),
        Some(amount) if !is_valid_fee_amount(amount) => {
            errors.push("amount", "Amount must be greater than 0")
        }
        Some(_) => {}
    }

    let status = errors.require("payment_status", "Payment status", form.payment_status.as_deref());
    if let Some(status) = status {
        if !is_valid_payment_status(status) {
            errors.push("payment_status", "Invalid payment status");
        }
    }

    let paid = status == Some(PaymentStatus::Paid.as_str());
    match form.payment_date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => {
            if parse_iso_date(raw).is_err() {
                errors.push("payment_date", "Payment date must be YYYY-MM-DD");
            } else if !paid {
                errors.push("payment_date", "Payment date is only allowed for paid fees");
            }
        }
        None if paid => errors.push("payment_date", "Payment date is required for paid fees"),
        None => {}
    }

    errors.finish()
}

/// A record links to exactly one declaration, so the one not named by
/// `doc_type` must be blank
fn reject_other_link(
    errors: &mut FormErrors,
    doc_type: &str,
    pib_id: Option<&str>,
    peb_id: Option<&str>,
    record: &str,
) {
    let (field, other) = if doc_type == "pib" {
        ("peb_id", peb_id)
    } else {
        ("pib_id", pib_id)
    };
    if is_present(other) {
        let other_type = if doc_type == "pib" { "PEB" } else { "PIB" };
        errors.push(
            field,
            format!(
                "{} document must be empty for a {} {}",
                other_type,
                doc_type.to_uppercase(),
                record
            ),
        );
    }
}

/// Check a container tracking form field by field
pub fn validate_container_form(form: &ContainerForm) -> FormValidation {
    let mut errors = FormErrors::new();

    if let Some(number) =
        errors.require("container_number", "Container number", form.container_number.as_deref())
    {
        if !is_valid_container_number(number) {
            errors.push(
                "container_number",
                "Container number must be 4 letters followed by 7 digits",
            );
        }
    }

    if let Some(doc_type) = form.document_type.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        if !is_valid_document_link(doc_type, form.pib_id.as_deref(), form.peb_id.as_deref()) {
            errors.push("document_type", "Container must be linked to its PIB or PEB");
        } else {
            reject_other_link(
                &mut errors,
                doc_type,
                form.pib_id.as_deref(),
                form.peb_id.as_deref(),
                "container",
            );
        }
    }

    let arrival = errors
        .require("arrival_date", "Arrival date", form.arrival_date.as_deref())
        .and_then(|raw| match parse_iso_date(raw) {
            Ok(d) => Some(d),
            Err(_) => {
                errors.push("arrival_date", "Arrival date must be YYYY-MM-DD");
                None
            }
        });

    match form.free_time_days {
        Some(days) if days < 0 => errors.push("free_time_days", "Free time days cannot be negative"),
        _ => {}
    }

    if let Some(raw) = form.gate_out_date.as_deref().filter(|d| !d.trim().is_empty()) {
        match parse_iso_date(raw) {
            Err(_) => errors.push("gate_out_date", "Gate out date must be YYYY-MM-DD"),
            Ok(gate_out) if arrival.is_some_and(|a| gate_out < a) => {
                errors.push("gate_out_date", "Gate out date cannot be before arrival date")
            }
            Ok(_) => {}
        }
    }

    if let Some(rate) = form.daily_rate {
        if !rate.is_finite() || rate < 0.0 {
            errors.push("daily_rate", "Daily rate cannot be negative");
        }
    }

    if let Some(status) = form.status.as_deref().filter(|s| !s.trim().is_empty()) {
        if !is_valid_container_status(status) {
            errors.push("status", "Invalid container status");
        }
    }

    errors.finish()
}
