//! Integration tests for the fcore CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get an fcore command isolated from the caller's environment
fn fcore(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fcore").unwrap();
    cmd.current_dir(tmp.path())
        .env_remove("RUST_LOG")
        .env_remove("FCORE_CONFIG")
        .env_remove("FCORE_SLOW_PAYER_DAYS")
        .env_remove("FCORE_UTILIZATION_THRESHOLD")
        .env_remove("FCORE_FREE_TIME_WARNING_DAYS");
    cmd
}

/// Helper to write an input file into the temp directory
fn write_input(tmp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Run a command with `--format json` and parse stdout
fn run_json(tmp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = fcore(tmp)
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn decimal(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::String(s) => s.parse().unwrap(),
        other => other.to_string().parse().unwrap(),
    }
}

const ASSETS: &str = r#"
- id: TRK-01
  name: Prime mover
  purchase_cost: 120000
  salvage_value: 12000
  book_value: 120000
  useful_life_months: 60
  depreciation_method: straight_line
- id: FRK-02
  purchase_cost: 50000
  salvage_value: 5000
  book_value: 5000
  useful_life_months: 36
- id: CRN-03
  purchase_cost: 240000
  book_value: 240000
  useful_life_months: 120
  depreciation_method: declining_balance
- id: BAD-04
  purchase_cost: 100
  salvage_value: 200
  book_value: 100
  useful_life_months: 12
"#;

const CONTAINERS: &str = r#"
- container_number: MSCU1234567
  document_type: pib
  pib_id: PIB-001
  arrival_date: 2024-01-01
  free_time_days: 7
  gate_out_date: 2024-01-12
  daily_rate: 150000
  status: gate_out
- container_number: TGHU7654321
  arrival_date: 2024-01-01
  free_time_days: 3
  daily_rate: 100000
- container_number: CSQU3054383
  arrival_date: 2024-01-05
  free_time_days: 30
  daily_rate: 100000
"#;

const FEES: &str = r#"
- id: F-1
  document_type: pib
  pib_id: PIB-001
  fee_category: duty
  amount: 1500000.50
  payment_status: paid
  payment_date: 2024-02-01
- id: F-2
  document_type: pib
  pib_id: PIB-001
  fee_category: tax
  amount: 250000
- id: F-3
  document_type: peb
  peb_id: PEB-009
  fee_category: duty
  amount: 99.50
  payment_status: waived
"#;

const PAYMENTS: &str = r#"
- customer_id: C1
  customer_name: Samudra Logistik
  invoiced: 1000
  paid: 1000
  days_to_pay: 30
- customer_id: C2
  customer_name: Nusantara Cargo
  invoiced: 500
  paid: 0
  days_to_pay: 50
  due_date: 2024-06-20
- customer_id: C1
  customer_name: Samudra Logistik
  invoiced: 400
  paid: 250
  days_to_pay: 60
  due_date: 2024-03-01
"#;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    fcore(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("depreciate"))
        .stdout(predicate::str::contains("storage"))
        .stdout(predicate::str::contains("workflow"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    fcore(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fcore"));
}

#[test]
fn test_missing_input_file_fails() {
    let tmp = TempDir::new().unwrap();
    fcore(&tmp)
        .args(["storage", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn test_malformed_input_is_reported() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "bad.yaml", "- id: X\n  purchase_cost: [oops\n");
    fcore(&tmp)
        .args(["depreciate", "batch", "bad.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot parse"));
}

// ============================================================================
// Depreciation
// ============================================================================

#[test]
fn test_depreciate_batch_json() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "assets.yaml", ASSETS);

    let report = run_json(&tmp, &["depreciate", "batch", "assets.yaml", "--period", "2024-03-15"]);

    assert_eq!(report["period_date"], "2024-03-01");
    let records = report["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["asset_id"], "TRK-01");
    assert_eq!(decimal(&records[0]["depreciation_amount"]), dec!(1800));
    assert_eq!(decimal(&records[0]["book_value_after"]), dec!(118200));
    assert_eq!(records[1]["asset_id"], "CRN-03");
    assert_eq!(decimal(&records[1]["depreciation_amount"]), dec!(4000));
    assert_eq!(decimal(&report["total_depreciation"]), dec!(5800));

    let skipped = report["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[0]["asset_id"], "FRK-02");
    assert_eq!(skipped[0]["reason"], "Fully depreciated");
    assert_eq!(skipped[1]["asset_id"], "BAD-04");
    assert_eq!(skipped[1]["reason"], "Salvage value cannot exceed purchase cost");
}

#[test]
fn test_depreciate_batch_table() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "assets.yaml", ASSETS);
    fcore(&tmp)
        .args(["depreciate", "batch", "assets.yaml", "--period", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TRK-01"))
        .stdout(predicate::str::contains("118,200.00"))
        .stdout(predicate::str::contains("5,800.00"));
}

#[test]
fn test_depreciate_schedule_csv() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "assets.yaml", ASSETS);

    let output = fcore(&tmp)
        .args([
            "depreciate", "schedule", "assets.yaml", "--asset", "TRK-01", "--months", "3", "--start",
            "2024-01-10", "--format", "csv",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "#,PERIOD,OPENING,DEPRECIATION,CLOSING");
    assert_eq!(lines[1], "1,2024-01,120000.00,1800.00,118200.00");
    assert_eq!(lines[3], "3,2024-03,116400.00,1800.00,114600.00");
}

#[test]
fn test_depreciate_schedule_unknown_asset() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "assets.yaml", ASSETS);
    fcore(&tmp)
        .args(["depreciate", "schedule", "assets.yaml", "--asset", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_period_argument() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "assets.yaml", ASSETS);
    fcore(&tmp)
        .args(["depreciate", "batch", "assets.yaml", "--period", "03/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

// ============================================================================
// Storage and fees
// ============================================================================

#[test]
fn test_storage_summary_json() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "containers.yaml", CONTAINERS);

    let summaries = run_json(&tmp, &["storage", "containers.yaml", "--today", "2024-01-06"]);
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 3);

    assert_eq!(summaries[0]["free_time_end"], "2024-01-08");
    assert_eq!(summaries[0]["storage_days"], 4);
    assert_eq!(decimal(&summaries[0]["storage_fee"]), dec!(600000));
    assert_eq!(summaries[0]["free_time_status"], "ok");

    assert_eq!(summaries[1]["storage_days"], 2);
    assert_eq!(summaries[1]["free_time_status"], "critical");
    assert_eq!(summaries[2]["free_time_status"], "ok");
}

#[test]
fn test_storage_attention_filter() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "containers.yaml", CONTAINERS);

    let summaries = run_json(
        &tmp,
        &["storage", "containers.yaml", "--today", "2024-01-06", "--attention"],
    );
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["container_number"], "TGHU7654321");
}

#[test]
fn test_storage_warning_window_from_env() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "containers.yaml", CONTAINERS);

    // Third container's free time ends 2024-02-04: 29 days out
    let output = fcore(&tmp)
        .env("FCORE_FREE_TIME_WARNING_DAYS", "30")
        .args(["storage", "containers.yaml", "--today", "2024-01-06", "--format", "json"])
        .output()
        .unwrap();
    let summaries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summaries[2]["free_time_status"], "warning");
}

#[test]
fn test_fee_summary_totals() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "fees.yaml", FEES);

    let summary = run_json(&tmp, &["fees", "summary", "fees.yaml"]);
    assert_eq!(summary["fee_count"], 3);
    assert_eq!(decimal(&summary["by_category"]["duty"]), dec!(1500100.00));
    assert_eq!(decimal(&summary["by_category"]["tax"]), dec!(250000));
    assert_eq!(decimal(&summary["by_category"]["penalty"]), Decimal::ZERO);
    assert_eq!(decimal(&summary["by_payment_status"]["pending"]), dec!(250000));
    assert_eq!(decimal(&summary["total"]), dec!(1750100.00));
}

#[test]
fn test_fee_summary_filters() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "fees.yaml", FEES);

    let summary = run_json(&tmp, &["fees", "summary", "fees.yaml", "--pib", "PIB-001", "--category", "duty"]);
    assert_eq!(summary["fee_count"], 1);
    assert_eq!(decimal(&summary["total"]), dec!(1500000.50));
}

#[test]
fn test_fee_summary_rejects_unknown_category() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "fees.yaml", FEES);
    fcore(&tmp)
        .args(["fees", "summary", "fees.yaml", "--category", "bribe"])
        .assert()
        .failure();
}

#[test]
fn test_fee_validate_reports_errors() {
    let tmp = TempDir::new().unwrap();
    write_input(
        &tmp,
        "forms.yaml",
        r#"
- document_type: pib
  pib_id: PIB-001
  fee_category: duty
  amount: 100
  payment_status: pending
- document_type: pib
  fee_category: duty
  amount: 0
  payment_status: pending
"#,
    );
    fcore(&tmp)
        .args(["fees", "validate", "forms.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Amount must be greater than 0"))
        .stdout(predicate::str::contains("PIB/PEB document is required"))
        .stderr(predicate::str::contains("1 of 2 form(s) failed validation"));
}

#[test]
fn test_container_validate_success() {
    let tmp = TempDir::new().unwrap();
    write_input(
        &tmp,
        "forms.yaml",
        r#"
- container_number: MSCU1234567
  document_type: pib
  pib_id: PIB-001
  arrival_date: 2024-01-01
  free_time_days: 7
  daily_rate: 150000
  status: at_port
"#,
    );
    fcore(&tmp)
        .args(["fees", "validate", "--containers", "forms.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 form(s) valid"));
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn test_pipeline_report() {
    let tmp = TempDir::new().unwrap();
    write_input(
        &tmp,
        "pipeline.yaml",
        r#"
- id: Q1
  status: draft
- id: Q2
  status: approved
- id: Q3
  status: approved
  converted: true
- id: Q4
  status: approved
  converted: true
"#,
    );

    let report = run_json(&tmp, &["report", "pipeline", "pipeline.yaml"]);
    assert_eq!(report["total"], 4);
    let counts = report["counts"].as_array().unwrap();
    assert_eq!(counts.len(), 5);
    let converted = counts.iter().find(|c| c["status"] == "converted").unwrap();
    assert_eq!(converted["count"], 2);
    assert_eq!(converted["percentage"], 50.0);
    assert_eq!(report["conversion_rate"], 66.67);
}

#[test]
fn test_payments_report() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "payments.yaml", PAYMENTS);

    let report = run_json(&tmp, &["report", "payments", "payments.yaml", "--as-of", "2024-06-30"]);
    let customers = report["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 2);

    assert_eq!(customers[0]["customer_id"], "C1");
    assert_eq!(customers[0]["invoice_count"], 2);
    assert_eq!(decimal(&customers[0]["outstanding"]), dec!(150));
    assert_eq!(customers[0]["average_days_to_pay"], 45.0);
    assert_eq!(customers[0]["slow_payer"], false);
    assert_eq!(customers[1]["slow_payer"], true);

    assert_eq!(decimal(&report["aging"]["days_1_30"]), dec!(500));
    assert_eq!(decimal(&report["aging"]["over_90"]), dec!(150));
}

#[test]
fn test_payments_threshold_from_project_config() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "payments.yaml", PAYMENTS);
    write_input(&tmp, ".fcore.yaml", "slow_payer_days: 40\n");

    let report = run_json(&tmp, &["report", "payments", "payments.yaml", "--slow-only"]);
    assert_eq!(report["slow_payer_threshold_days"], 40.0);
    assert_eq!(report["customers"].as_array().unwrap().len(), 2);
}

#[test]
fn test_report_catalog_search_and_order() {
    let tmp = TempDir::new().unwrap();
    write_input(
        &tmp,
        "reports.yaml",
        r#"
- id: r1
  name: Revenue by Customer
  description: Monthly revenue per customer
  display_order: 3
- id: r2
  name: Payment Aging
  display_order: 1
- id: r3
  name: Customer Payments
  display_order: 2
- id: r4
  name: Shipment Volume
  display_order: 1
"#,
    );

    let output = fcore(&tmp)
        .args(["report", "catalog", "reports.yaml", "--format", "csv"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<&str> = stdout
        .lines()
        .skip(1)
        .filter_map(|l| l.split(',').nth(1))
        .collect();
    assert_eq!(ids, vec!["r2", "r4", "r3", "r1"]);

    let matched = run_json(&tmp, &["report", "catalog", "reports.yaml", "--search", "CUSTOMER"]);
    let ids: Vec<&str> = matched
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["r3", "r1"]);
}

// ============================================================================
// Engineering loads and workflow
// ============================================================================

#[test]
fn test_lift_assessment() {
    let tmp = TempDir::new().unwrap();
    write_input(
        &tmp,
        "lift.yaml",
        r#"
id: LP-7
load_weight_tons: 40
rigging_weight_tons: 2.5
crane_capacity_at_radius_tons: 50
outrigger_area_m2: 4
"#,
    );

    let assessment = run_json(&tmp, &["load", "lift", "lift.yaml"]);
    assert_eq!(assessment["utilization_pct"], 85.0);
    assert_eq!(assessment["safe"], false);
    assert_eq!(assessment["threshold_pct"], 80.0);

    let relaxed = run_json(&tmp, &["load", "lift", "lift.yaml", "--threshold", "90"]);
    assert_eq!(relaxed["safe"], true);
}

#[test]
fn test_lift_threshold_from_env() {
    let tmp = TempDir::new().unwrap();
    write_input(
        &tmp,
        "lift.yaml",
        "load_weight_tons: 40\nrigging_weight_tons: 2.5\ncrane_capacity_at_radius_tons: 50\n",
    );
    fcore(&tmp)
        .env("FCORE_UTILIZATION_THRESHOLD", "95")
        .args(["load", "lift", "lift.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("safe"))
        .stdout(predicate::str::contains("unsafe").not());
}

#[test]
fn test_axle_loads_permit() {
    let tmp = TempDir::new().unwrap();
    write_input(
        &tmp,
        "transport.yaml",
        r#"
cargo_weight_tons: 70
trailer_tare_tons: 10
prime_mover_weight_tons: 9
prime_mover_axles: 1
trailer_axles: 3
cog_longitudinal_m: 6.5
"#,
    );

    let report = run_json(&tmp, &["load", "axle", "transport.yaml"]);
    let axles = report["axles"].as_array().unwrap();
    assert_eq!(axles.len(), 4);
    assert_eq!(axles[0]["axle_type"], "single");
    assert_eq!(axles[1]["axle_type"], "tridem");
    assert_eq!(report["summary"]["permit_required"], true);
    assert_eq!(report["summary"]["overloaded_axles"], serde_json::json!([2, 3, 4]));
    assert_eq!(report["gross_weight_tons"], 89.0);
}

#[test]
fn test_axle_rejects_out_of_range_axle_count() {
    let tmp = TempDir::new().unwrap();
    write_input(
        &tmp,
        "transport.yaml",
        "cargo_weight_tons: 1\nprime_mover_axles: 4294967295\ntrailer_axles: 1\n",
    );
    fcore(&tmp)
        .args(["load", "axle", "transport.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Axle count cannot exceed"));
}

#[test]
fn test_workflow_check() {
    let tmp = TempDir::new().unwrap();
    fcore(&tmp)
        .args(["workflow", "check", "draft", "in_progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("allowed"));

    fcore(&tmp)
        .args(["workflow", "check", "draft", "approved"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("rejected"))
        .stderr(predicate::str::contains("Invalid status transition"));

    fcore(&tmp)
        .args(["workflow", "check", "superseded", "draft"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("terminal"));
}

#[test]
fn test_output_to_file() {
    let tmp = TempDir::new().unwrap();
    write_input(&tmp, "fees.yaml", FEES);
    fcore(&tmp)
        .args(["fees", "summary", "fees.yaml", "--format", "md", "-o", "summary.md"])
        .assert()
        .success();

    let written = fs::read_to_string(tmp.path().join("summary.md")).unwrap();
    assert!(written.contains("| CATEGORY"));
    assert!(written.contains("1,500,100.00"));
}
