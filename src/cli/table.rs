//! Table formatting for command output
//!
//! One row model rendered three ways: aligned and coloured for the terminal,
//! markdown through `tabled`, and RFC 4180 CSV through the `csv` writer.

use chrono::NaiveDate;
use console::style;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_money, format_pct};
use crate::cli::OutputFormat;
use crate::core::dates::format_iso_date;
use crate::entities::container::FreeTimeStatus;

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Record identifier (cyan)
    Id(String),
    /// Plain text
    Text(String),
    /// Money amount, right aligned
    Money(Decimal),
    /// Whole number, right aligned
    Number(i64),
    /// Float with fixed precision, right aligned
    Float(f64, usize),
    /// Percentage; values over 100 are highlighted
    Pct(f64),
    Date(NaiveDate),
    /// Free-time urgency with color coding (ok=green, warning=yellow, critical=red)
    FreeTime(FreeTimeStatus),
    /// Check outcome (true=ok green, false=red bold)
    Check(bool, &'static str, &'static str),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Text without styling, as written to CSV
    pub fn plain(&self) -> String {
        match self {
            CellValue::Id(s) | CellValue::Text(s) => s.clone(),
            CellValue::Money(d) => format!("{:.2}", d),
            CellValue::Number(n) => n.to_string(),
            CellValue::Float(f, precision) => format!("{:.prec$}", f, prec = precision),
            CellValue::Pct(p) => format!("{:.2}", p),
            CellValue::Date(d) => format_iso_date(*d),
            CellValue::FreeTime(s) => s.to_string(),
            CellValue::Check(ok, yes, no) => {
                if *ok {
                    yes.to_string()
                } else {
                    no.to_string()
                }
            }
            CellValue::Empty => String::new(),
        }
    }

    /// Text as shown to a reader (grouped money, `%` suffix, `-` placeholder)
    pub fn display(&self) -> String {
        match self {
            CellValue::Money(d) => format_money(*d),
            CellValue::Pct(p) => format_pct(*p),
            CellValue::Empty => "-".to_string(),
            other => other.plain(),
        }
    }

    fn right_aligned(&self) -> bool {
        matches!(
            self,
            CellValue::Money(_) | CellValue::Number(_) | CellValue::Float(..) | CellValue::Pct(_)
        )
    }

    /// Format for terminal output, padded to `width`
    pub fn format_terminal(&self, width: usize) -> String {
        let text = self.display();
        let styled = match self {
            CellValue::Id(_) => style(text).cyan(),
            CellValue::Pct(p) if *p > 100.0 => style(text).red().bold(),
            CellValue::FreeTime(status) => match status {
                FreeTimeStatus::Ok => style(text).green(),
                FreeTimeStatus::Warning => style(text).yellow(),
                FreeTimeStatus::Critical => style(text).red().bold(),
            },
            CellValue::Check(true, ..) => style(text).green(),
            CellValue::Check(false, ..) => style(text).red().bold(),
            CellValue::Empty => style(text).dim(),
            _ => style(text),
        };
        if self.right_aligned() {
            format!("{:>width$}", styled, width = width)
        } else {
            format!("{:<width$}", styled, width = width)
        }
    }

    /// Format for Markdown output (escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Check(false, _, no) => format!("**{}**", no),
            other => other.display(),
        };
        raw.replace('|', "\\|")
    }
}

/// Rows of cells under a fixed header
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<CellValue>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render for the given format (`Auto`, `Md` or `Csv`)
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Csv => self.render_csv(),
            OutputFormat::Md => Ok(self.render_md()),
            _ => Ok(self.render_terminal()),
        }
    }

    fn render_terminal(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].display().chars().count())
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let header_line: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:<width$}", style(h).bold(), width = *w))
            .collect();
        out.push_str(header_line.join("  ").trim_end());
        out.push('\n');

        let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&style("─".repeat(total_width)).dim().to_string());
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| cell.format_terminal(*w))
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }

    fn render_md(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().copied());
        for row in &self.rows {
            builder.push_record(row.iter().map(CellValue::format_md));
        }
        let mut out = builder.build().with(Style::markdown()).to_string();
        out.push('\n');
        out
    }

    fn render_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers).into_diagnostic()?;
        for row in &self.rows {
            writer
                .write_record(row.iter().map(CellValue::plain))
                .into_diagnostic()?;
        }
        let bytes = writer.into_inner().into_diagnostic()?;
        String::from_utf8(bytes).into_diagnostic()
    }
}
