//! Diagnostic output: terminal lines, miette reports and JSON.

use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Severity};
use serde::Serialize;
use wml_core::text::LineMap;
use wml_diagnostics::Diagnostic;

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// One diagnostic as written by `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDiagnostic {
    pub file: String,
    pub offset: u32,
    pub length: u32,
    /// 1-based.
    pub line: u32,
    /// 1-based, in bytes.
    pub column: u32,
    pub message: String,
    pub severity: String,
    pub code: String,
    pub kind: String,
}

impl JsonDiagnostic {
    pub fn new(file: &str, line_map: &LineMap, diag: &Diagnostic) -> Self {
        let offset = diag.offset();
        let position = line_map.line_and_column_of(offset);
        Self {
            file: file.to_string(),
            offset,
            length: diag.span.map(|s| s.length).unwrap_or(0),
            line: position.line + 1,
            column: position.character + 1,
            message: diag.message_text.clone(),
            severity: diag.category.to_string(),
            code: format!("WML{}", diag.code),
            kind: diag.kind.to_string(),
        }
    }
}

/// `file:line:col: error WML2001: message`
pub fn format_line(file: &str, line_map: &LineMap, diag: &Diagnostic, use_color: bool) -> String {
    let position = line_map.line_and_column_of(diag.offset());
    if use_color {
        let color = if diag.is_error() { RED } else { YELLOW };
        format!(
            "{}{}:{}{}: {}{}{}{} {}WML{}{}: {}",
            CYAN, file, position, RESET, BOLD, color, diag.category, RESET, CYAN, diag.code, RESET, diag.message_text
        )
    } else {
        format!("{}:{}: {} WML{}: {}", file, position, diag.category, diag.code, diag.message_text)
    }
}

/// A graphical report with the offending source lines.
pub fn format_pretty(file: &str, text: &str, diag: &Diagnostic) -> String {
    let severity = if diag.is_error() { Severity::Error } else { Severity::Warning };
    let mut report = MietteDiagnostic::new(diag.message_text.clone())
        .with_code(format!("WML{}", diag.code))
        .with_severity(severity);
    if let Some(span) = diag.span {
        report = report.with_label(LabeledSpan::at(span.to_range(), diag.kind.to_string()));
    }
    for related in &diag.related_information {
        if let Some(span) = related.span {
            report = report.with_label(LabeledSpan::at(span.to_range(), related.message_text.clone()));
        }
    }
    let report = miette::Report::new(report).with_source_code(NamedSource::new(file, text.to_string()));
    format!("{:?}", report)
}

pub fn format_error(msg: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}error{}: {}", BOLD, RED, RESET, msg)
    } else {
        format!("error: {}", msg)
    }
}

pub fn stderr_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
