//! `fcore load` command - Crane lift and axle load checks

use clap::Subcommand;
use console::style;
use miette::{bail, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::calc::loads::{
    assess_lift, calculate_axle_loads, summarize_axle_loads, validate_transport_configuration,
};
use crate::cli::helpers::format_pct;
use crate::cli::output::{render, resolve_format, write_output};
use crate::cli::table::{CellValue, Table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::entities::lifting::LiftingPlan;
use crate::entities::transport::{AxleLoadResult, AxleLoadSummary, TransportConfiguration};

use super::read_records;

#[derive(Subcommand, Debug)]
pub enum LoadCommands {
    /// Crane utilization and outrigger ground bearing for a lifting plan
    Lift(LiftArgs),

    /// Per-axle loads and permit check for a transport configuration
    Axle(AxleArgs),
}

#[derive(clap::Args, Debug)]
pub struct LiftArgs {
    /// Lifting plan file (single YAML or JSON record)
    pub file: PathBuf,

    /// Utilization threshold in percent (default: from config, else 80)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct AxleArgs {
    /// Transport configuration file (single YAML or JSON record)
    pub file: PathBuf,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct AxleReport {
    gross_weight_tons: f64,
    axles: Vec<AxleLoadResult>,
    summary: AxleLoadSummary,
}

pub fn run(cmd: LoadCommands, global: &GlobalOpts, config: &Config) -> Result<()> {
    match cmd {
        LoadCommands::Lift(args) => run_lift(args, global, config),
        LoadCommands::Axle(args) => run_axle(args, global, config),
    }
}

fn run_lift(args: LiftArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let plan: LiftingPlan = read_records(&args.file)?;
    let threshold = args.threshold.unwrap_or_else(|| config.utilization_threshold());
    let assessment = assess_lift(&plan, threshold);

    let format = resolve_format(global, config);
    let content = render(&assessment, format, |format| {
        let mut table = Table::new(&["MEASURE", "VALUE"]);
        table.push(vec![
            CellValue::Text("Total lifted (t)".to_string()),
            CellValue::Float(assessment.total_lifted_tons, 2),
        ]);
        table.push(vec![
            CellValue::Text("Capacity at radius (t)".to_string()),
            CellValue::Float(plan.crane_capacity_at_radius_tons, 2),
        ]);
        table.push(vec![
            CellValue::Text("Utilization".to_string()),
            CellValue::Pct(assessment.utilization_pct),
        ]);
        table.push(vec![
            CellValue::Text("Threshold".to_string()),
            CellValue::Pct(assessment.threshold_pct),
        ]);
        table.push(vec![
            CellValue::Text("Ground bearing (kN/m²)".to_string()),
            assessment
                .ground_bearing_kn_m2
                .map_or(CellValue::Empty, |p| CellValue::Float(p, 2)),
        ]);
        table.push(vec![
            CellValue::Text("Verdict".to_string()),
            CellValue::Check(assessment.safe, "safe", "unsafe"),
        ]);
        let mut out = table.render(format)?;
        if format != OutputFormat::Csv && !global.quiet && !assessment.safe {
            out.push_str(&format!(
                "\n{} utilization {} exceeds {}\n",
                style("!").red().bold(),
                format_pct(assessment.utilization_pct),
                format_pct(assessment.threshold_pct)
            ));
        }
        Ok(out)
    })?;

    write_output(&content, args.output, global.quiet)
}

fn run_axle(args: AxleArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let transport: TransportConfiguration = read_records(&args.file)?;
    let check = validate_transport_configuration(&transport);
    if let Some(message) = check.error {
        bail!("{}: {}", args.file.display(), message);
    }
    let axles = calculate_axle_loads(&transport);
    let report = AxleReport {
        gross_weight_tons: transport.gross_weight_tons(),
        summary: summarize_axle_loads(&axles),
        axles,
    };

    let format = resolve_format(global, config);
    let content = render(&report, format, |format| {
        let mut table = Table::new(&["AXLE", "GROUP", "TYPE", "LOAD (t)", "MAX (t)", "UTILIZATION", "CHECK"]);
        for axle in &report.axles {
            table.push(vec![
                CellValue::Number(i64::from(axle.axle_number)),
                CellValue::Text(axle.group.to_string()),
                CellValue::Text(axle.axle_type.to_string()),
                CellValue::Float(axle.load_tons, 2),
                CellValue::Float(axle.max_allowed_tons, 1),
                CellValue::Pct(axle.utilization_pct),
                CellValue::Check(!axle.is_overloaded(), "ok", "over"),
            ]);
        }
        let mut out = table.render(format)?;
        if format != OutputFormat::Csv && !global.quiet {
            let verdict = if report.summary.permit_required {
                style("permit required").red().bold()
            } else {
                style("within legal limits").green()
            };
            out.push_str(&format!(
                "\n{} axle(s), gross {:.2} t: {}\n",
                style(report.summary.axle_count).cyan(),
                report.gross_weight_tons,
                verdict
            ));
        }
        Ok(out)
    })?;

    write_output(&content, args.output, global.quiet)
}
