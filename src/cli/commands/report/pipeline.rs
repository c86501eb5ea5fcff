//! Pipeline status report

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::calc::reports::{calculate_conversion_rate, count_by_status};
use crate::cli::helpers::format_pct;
use crate::cli::output::{render, resolve_format, write_output};
use crate::cli::table::{CellValue, Table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::entities::pipeline::{PipelineRecord, PipelineStage, StatusCount};

use crate::cli::commands::read_records;

#[derive(clap::Args, Debug)]
pub struct PipelineArgs {
    /// Pipeline record file (YAML or JSON list)
    pub file: PathBuf,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct PipelineReport {
    total: usize,
    counts: Vec<StatusCount>,
    /// Share of approved records that were converted to job orders
    conversion_rate: f64,
}

pub fn run(args: PipelineArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let records: Vec<PipelineRecord> = read_records(&args.file)?;
    let counts = count_by_status(&records);

    let count_of = |stage: PipelineStage| {
        counts
            .iter()
            .find(|c| c.status == stage)
            .map_or(0, |c| c.count)
    };
    let converted = count_of(PipelineStage::Converted);
    let reached_approval = count_of(PipelineStage::Approved) + converted;

    let report = PipelineReport {
        total: records.len(),
        conversion_rate: calculate_conversion_rate(reached_approval, converted),
        counts,
    };

    let format = resolve_format(global, config);
    let content = render(&report, format, |format| {
        let mut table = Table::new(&["STATUS", "COUNT", "SHARE"]);
        for c in &report.counts {
            table.push(vec![
                CellValue::Text(c.status.to_string()),
                CellValue::Number(c.count as i64),
                CellValue::Pct(c.percentage),
            ]);
        }
        let mut out = table.render(format)?;
        if format != OutputFormat::Csv && !global.quiet {
            out.push_str(&format!(
                "\n{} record(s), conversion rate {}\n",
                style(report.total).cyan(),
                style(format_pct(report.conversion_rate)).bold()
            ));
        }
        Ok(out)
    })?;

    write_output(&content, args.output, global.quiet)
}
