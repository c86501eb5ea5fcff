//! `fcore report` command - Dashboard reports

mod catalog;
mod payments;
mod pipeline;

use clap::Subcommand;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::config::Config;

pub use catalog::CatalogArgs;
pub use payments::PaymentsArgs;
pub use pipeline::PipelineArgs;

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Quotation / job order counts by status with conversion rate
    Pipeline(PipelineArgs),

    /// Customer payment roll-up, slow payers and aging
    Payments(PaymentsArgs),

    /// Search and order the report catalogue
    #[clap(alias = "list")]
    Catalog(CatalogArgs),
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts, config: &Config) -> Result<()> {
    match cmd {
        ReportCommands::Pipeline(args) => pipeline::run(args, global, config),
        ReportCommands::Payments(args) => payments::run(args, global, config),
        ReportCommands::Catalog(args) => catalog::run(args, global, config),
    }
}
