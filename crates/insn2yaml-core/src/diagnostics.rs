use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Load,
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticCode {
    I2Y0001ParseError,
    I2Y0100EmptyScalar,
    I2Y0110EmptyEncodingVariable,
    I2Y0120EmptyHint,
    I2Y0130EmptyPseudoinstruction,
    I2Y0140EmptyDescription,
}

impl DiagnosticCode {
    pub fn code_str(self) -> &'static str {
        match self {
            DiagnosticCode::I2Y0001ParseError => "I2Y0001",
            DiagnosticCode::I2Y0100EmptyScalar => "I2Y0100",
            DiagnosticCode::I2Y0110EmptyEncodingVariable => "I2Y0110",
            DiagnosticCode::I2Y0120EmptyHint => "I2Y0120",
            DiagnosticCode::I2Y0130EmptyPseudoinstruction => "I2Y0130",
            DiagnosticCode::I2Y0140EmptyDescription => "I2Y0140",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            DiagnosticCode::I2Y0001ParseError => "failed to decode instruction record",
            DiagnosticCode::I2Y0100EmptyScalar => "required scalar field is empty",
            DiagnosticCode::I2Y0110EmptyEncodingVariable => "encoding variable field is empty",
            DiagnosticCode::I2Y0120EmptyHint => "hint reference is empty",
            DiagnosticCode::I2Y0130EmptyPseudoinstruction => "pseudoinstruction field is empty",
            DiagnosticCode::I2Y0140EmptyDescription => "description is empty",
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            DiagnosticCode::I2Y0001ParseError => Phase::Load,
            _ => Phase::Validate,
        }
    }

    pub fn default_help(self) -> Option<&'static str> {
        match self {
            DiagnosticCode::I2Y0001ParseError => {
                Some("The record must be a JSON object with the instruction keys.")
            }
            DiagnosticCode::I2Y0100EmptyScalar => Some(
                "$schema, kind, name, long_name, definedBy, assembly, encoding.match and all access modes must be non-empty.",
            ),
            DiagnosticCode::I2Y0140EmptyDescription => {
                Some("The document keeps an empty `description: |` block.")
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub phase: Phase,
    pub severity: Severity,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, message.into())
    }

    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, message.into())
    }

    fn new(code: DiagnosticCode, severity: Severity, message: String) -> Self {
        Diagnostic {
            code,
            phase: code.phase(),
            severity,
            message,
            help: code.default_help().map(|s| s.to_string()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {:?}: {}",
            self.code.code_str(),
            self.phase,
            self.severity,
            self.message
        )?;
        if let Some(help) = &self.help {
            write!(f, "\n  help: {help}")?;
        }
        Ok(())
    }
}

pub fn render_diagnostics_md() -> String {
    let mut rows: Vec<(&'static str, Phase, &'static str, &'static str)> = all_codes()
        .iter()
        .map(|code| {
            (
                code.code_str(),
                code.phase(),
                code.default_message(),
                code.default_help().unwrap_or(""),
            )
        })
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = String::new();
    out.push_str("# insn2yaml diagnostics catalog\n\n");
    out.push_str("This document is generated from `crates/insn2yaml-core/src/diagnostics.rs`.\n\n");
    out.push_str("| Code | Phase | Message | Help |\n");
    out.push_str("| ---- | ----- | ------- | ---- |\n");
    for (code, phase, msg, help) in rows {
        out.push_str(&format!("| {code} | {phase:?} | {msg} | {help} |\n"));
    }
    out
}

fn all_codes() -> &'static [DiagnosticCode] {
    &[
        DiagnosticCode::I2Y0001ParseError,
        DiagnosticCode::I2Y0100EmptyScalar,
        DiagnosticCode::I2Y0110EmptyEncodingVariable,
        DiagnosticCode::I2Y0120EmptyHint,
        DiagnosticCode::I2Y0130EmptyPseudoinstruction,
        DiagnosticCode::I2Y0140EmptyDescription,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_help() {
        let d = Diagnostic::error(DiagnosticCode::I2Y0100EmptyScalar, "kind is empty");
        let s = d.to_string();
        assert!(s.starts_with("I2Y0100 Validate Error: kind is empty"), "{s}");
        assert!(s.contains("\n  help: "), "{s}");
    }

    #[test]
    fn warning_display_names_severity() {
        let d = Diagnostic::warning(
            DiagnosticCode::I2Y0140EmptyDescription,
            "description is empty",
        );
        assert_eq!(d.severity, Severity::Warning);
        assert!(
            d.to_string().starts_with("I2Y0140 Validate Warning: description is empty"),
            "{d}"
        );
    }

    #[test]
    fn catalog_lists_every_code_once() {
        let md = render_diagnostics_md();
        for code in all_codes() {
            assert_eq!(md.matches(code.code_str()).count(), 1, "{}", code.code_str());
        }
    }
}
