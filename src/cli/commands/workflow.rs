//! `fcore workflow` command - Assessment status transitions

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::output::{render, resolve_format, write_output};
use crate::cli::table::{CellValue, Table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::workflow::{allowed_transitions, transition, AssessmentStatus};

#[derive(Subcommand, Debug)]
pub enum WorkflowCommands {
    /// Check whether an assessment may move from one status to another
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Current status (draft, in_progress, pending_review, approved, rejected, superseded)
    pub from: AssessmentStatus,

    /// Requested status
    pub to: AssessmentStatus,
}

#[derive(Debug, Serialize)]
struct TransitionCheck {
    from: AssessmentStatus,
    to: AssessmentStatus,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    allowed_targets: Vec<AssessmentStatus>,
}

pub fn run(cmd: WorkflowCommands, global: &GlobalOpts, config: &Config) -> Result<()> {
    match cmd {
        WorkflowCommands::Check(args) => run_check(args, global, config),
    }
}

fn run_check(args: CheckArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let outcome = transition(args.from, args.to);
    let check = TransitionCheck {
        from: args.from,
        to: args.to,
        allowed: outcome.is_ok(),
        reason: outcome.as_ref().err().map(ToString::to_string),
        allowed_targets: allowed_transitions(args.from).to_vec(),
    };

    let format = resolve_format(global, config);
    let content = render(&check, format, |format| {
        if format == OutputFormat::Auto {
            let mut out = if check.allowed {
                format!("{} {} → {} allowed\n", style("✓").green(), check.from, check.to)
            } else {
                format!("{} {} → {} rejected\n", style("✗").red(), check.from, check.to)
            };
            if !global.quiet {
                let targets: Vec<&str> = check.allowed_targets.iter().map(|s| s.as_str()).collect();
                out.push_str(&format!(
                    "  allowed from {}: {}\n",
                    style(check.from).cyan(),
                    if targets.is_empty() {
                        "(none, terminal)".to_string()
                    } else {
                        targets.join(", ")
                    }
                ));
            }
            return Ok(out);
        }

        let mut table = Table::new(&["FROM", "TO", "RESULT"]);
        table.push(vec![
            CellValue::Text(check.from.to_string()),
            CellValue::Text(check.to.to_string()),
            CellValue::Check(check.allowed, "allowed", "rejected"),
        ]);
        table.render(format)
    })?;
    write_output(&content, None, global.quiet)?;

    outcome.into_diagnostic()?;
    Ok(())
}
