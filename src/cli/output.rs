//! Output dispatch shared by all commands

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;

/// Effective output format: an explicit `--format` wins over the config default
pub fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    config
        .default_format
        .as_deref()
        .and_then(|name| {
            let parsed = <OutputFormat as clap::ValueEnum>::from_str(name, true).ok();
            if parsed.is_none() {
                tracing::warn!(format = name, "ignoring unknown default_format in config");
            }
            parsed
        })
        .unwrap_or(OutputFormat::Auto)
}

/// Serialize `value` for the structured formats, or render it with `human`
/// for the table formats
pub fn render<T, F>(value: &T, format: OutputFormat, human: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(OutputFormat) -> Result<String>,
{
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => serde_yml::to_string(value).into_diagnostic(),
        other => human(other),
    }
}

/// Print `content`, or write it to `output_path` when one is given
pub fn write_output(content: &str, output_path: Option<PathBuf>, quiet: bool) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            if !quiet {
                eprintln!("Output written to: {}", path.display());
            }
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(format: OutputFormat) -> GlobalOpts {
        GlobalOpts {
            format,
            quiet: false,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn test_resolve_format_prefers_flag() {
        let config = Config {
            default_format: Some("json".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_format(&global(OutputFormat::Md), &config), OutputFormat::Md);
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &config), OutputFormat::Json);
    }

    #[test]
    fn test_resolve_format_ignores_unknown_default() {
        let config = Config {
            default_format: Some("xml".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &config), OutputFormat::Auto);
    }

    #[test]
    fn test_render_structured_formats() {
        let value = vec![1, 2];
        let json = render(&value, OutputFormat::Json, |_| Ok(String::new())).unwrap();
        assert!(json.contains("1,"));
        let yaml = render(&value, OutputFormat::Yaml, |_| Ok(String::new())).unwrap();
        assert!(yaml.contains("- 1"));
        let human = render(&value, OutputFormat::Md, |f| Ok(format!("{:?}", f))).unwrap();
        assert_eq!(human, "Md");
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output("hello\n", Some(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
    }
}
