//! Report catalogue listing

use miette::Result;
use std::path::PathBuf;

use crate::calc::reports::{filter_reports_by_search, sort_reports_by_display_order};
use crate::cli::helpers::truncate_str;
use crate::cli::output::{render, resolve_format, write_output};
use crate::cli::table::{CellValue, Table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::entities::report::ReportDefinition;

use crate::cli::commands::read_records;

#[derive(clap::Args, Debug)]
pub struct CatalogArgs {
    /// Report definition file (YAML or JSON list)
    pub file: PathBuf,

    /// Case-insensitive search on name and description
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Only reports in this category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: CatalogArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let reports: Vec<ReportDefinition> = read_records(&args.file)?;

    let matched: Vec<ReportDefinition> = filter_reports_by_search(&reports, &args.search)
        .into_iter()
        .filter(|r| {
            args.category
                .as_deref()
                .map_or(true, |c| r.category.as_deref().is_some_and(|rc| rc.eq_ignore_ascii_case(c)))
        })
        .cloned()
        .collect();
    let ordered = sort_reports_by_display_order(&matched);

    let format = resolve_format(global, config);
    let content = render(&ordered, format, |format| {
        let mut table = Table::new(&["ORDER", "ID", "NAME", "CATEGORY", "DESCRIPTION"]);
        for r in &ordered {
            let description = r.description.as_deref().unwrap_or_default();
            table.push(vec![
                CellValue::Number(i64::from(r.display_order)),
                CellValue::Id(r.id.clone()),
                CellValue::Text(r.name.clone()),
                r.category
                    .clone()
                    .map_or(CellValue::Empty, CellValue::Text),
                if format == OutputFormat::Csv {
                    CellValue::Text(description.to_string())
                } else if description.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(truncate_str(description, 50))
                },
            ]);
        }
        table.render(format)
    })?;

    write_output(&content, args.output, global.quiet)
}
