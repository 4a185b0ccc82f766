/*!
 * Console reporting of validation results.
 *
 * Text reports list each file with problems, followed by a one-line summary.
 * JSON reports serialize the whole run summary for CI tooling.
 */

use anyhow::Result;
use serde::Serialize;
use std::io::{IsTerminal, Write};

use crate::app_config::{ColorChoice, OutputFormat};
use crate::app_controller::{FileReport, RunSummary};
use crate::validation::EntryFinding;

const RED: &str = "\x1B[1;31m";
const YELLOW: &str = "\x1B[1;33m";
const GREEN: &str = "\x1B[1;32m";
const DIM: &str = "\x1B[2m";
const RESET: &str = "\x1B[0m";

/// Decide whether ANSI colors should be emitted on stdout
pub fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success: bool,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

/// Writes a run summary in the configured format
pub struct Reporter {
    format: OutputFormat,
    color: bool,
}

impl Reporter {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    /// Write the report for `summary` to `out`
    pub fn write<W: Write>(&self, out: &mut W, summary: &RunSummary) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let report = JsonReport {
                    success: summary.success(),
                    summary,
                };
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                for file in summary.files.iter().filter(|f| !f.passed()) {
                    self.write_file(out, file)?;
                }
                self.write_summary(out, summary)?;
            }
        }
        Ok(())
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn write_file<W: Write>(&self, out: &mut W, file: &FileReport) -> Result<()> {
        writeln!(out, "{}", self.paint(RED, &file.path.display().to_string()))?;

        if let Some(error) = &file.error {
            writeln!(out, "  {} {}", self.paint(RED, "error:"), error)?;
        }

        for finding in &file.findings {
            self.write_finding(out, finding)?;
        }

        writeln!(out)?;
        Ok(())
    }

    fn write_finding<W: Write>(&self, out: &mut W, entry: &EntryFinding) -> Result<()> {
        let finding = &entry.finding;
        let side = self.paint(YELLOW, &format!("[{}]", finding.side));
        let line = entry
            .line
            .map(|line| format!("line {}", line))
            .unwrap_or_else(|| "line ?".to_string());

        match &entry.context {
            Some(context) => writeln!(
                out,
                "  {} {} {} {}",
                line,
                side,
                finding.reason,
                self.paint(DIM, &format!("(context: {})", context))
            )?,
            None => writeln!(out, "  {} {} {}", line, side, finding.reason)?,
        }

        writeln!(out, "    msgid:  {}", escape_newlines(&finding.source_text))?;
        writeln!(out, "    msgstr: {}", escape_newlines(&finding.translated_text))?;
        Ok(())
    }

    fn write_summary<W: Write>(&self, out: &mut W, summary: &RunSummary) -> Result<()> {
        let checked = format!(
            "{} file(s), {} entries checked",
            summary.files_checked, summary.entries_checked
        );

        if summary.success() {
            writeln!(out, "{} {}", self.paint(GREEN, "✓ No problems found:"), checked)?;
        } else {
            let mut problems = format!("✗ {} problem(s)", summary.findings);
            if summary.failed_files > 0 {
                problems.push_str(&format!(", {} unreadable file(s)", summary.failed_files));
            }
            writeln!(out, "{}: {}", self.paint(RED, &problems), checked)?;
        }
        Ok(())
    }
}

fn escape_newlines(text: &str) -> String {
    text.replace('\n', "\\n")
}
