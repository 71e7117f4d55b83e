//! Decoding and checking instruction records handed over by upstream tooling.

use anyhow::{Context, Result};

use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};
use crate::record::InstructionRecord;

pub fn parse_record_json(bytes: &[u8]) -> Result<InstructionRecord> {
    serde_json::from_slice(bytes).map_err(|err| {
        let code = DiagnosticCode::I2Y0001ParseError;
        let diag = Diagnostic::error(code, code.default_message());
        anyhow::Error::new(err).context(diag.to_string())
    })
}

/// Checks the by-contract invariants of `r`. Diagnostics come back in document
/// order; only error diagnostics make a record unusable.
pub fn validate_record(r: &InstructionRecord) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    let header = [
        ("$schema", r.schema.as_str()),
        ("kind", r.kind.as_str()),
        ("name", r.name.as_str()),
        ("long_name", r.long_name.as_str()),
    ];
    for (key, value) in header {
        require(&mut diags, DiagnosticCode::I2Y0100EmptyScalar, key, value);
    }

    if r.description.is_empty() {
        diags.push(Diagnostic::warning(
            DiagnosticCode::I2Y0140EmptyDescription,
            "description is empty",
        ));
    }

    let scalars = [
        ("definedBy", r.defined_by.as_str()),
        ("assembly", r.assembly.as_str()),
        ("encoding.match", r.encoding.match_pattern.as_str()),
    ];
    for (key, value) in scalars {
        require(&mut diags, DiagnosticCode::I2Y0100EmptyScalar, key, value);
    }

    for (idx, v) in r.encoding.variables.iter().enumerate() {
        let code = DiagnosticCode::I2Y0110EmptyEncodingVariable;
        require(&mut diags, code, &format!("encoding.variables[{idx}].name"), &v.name);
        require(
            &mut diags,
            code,
            &format!("encoding.variables[{idx}].location"),
            &v.location,
        );
    }

    let modes = [
        ("access.s", r.access.s.as_str()),
        ("access.u", r.access.u.as_str()),
        ("access.vs", r.access.vs.as_str()),
        ("access.vu", r.access.vu.as_str()),
    ];
    for (key, value) in modes {
        require(&mut diags, DiagnosticCode::I2Y0100EmptyScalar, key, value);
    }

    for (idx, h) in r.hints.iter().enumerate() {
        require(
            &mut diags,
            DiagnosticCode::I2Y0120EmptyHint,
            &format!("hints[{idx}]"),
            h,
        );
    }

    for (idx, p) in r.pseudoinstructions.iter().enumerate() {
        let code = DiagnosticCode::I2Y0130EmptyPseudoinstruction;
        require(&mut diags, code, &format!("pseudoinstructions[{idx}].when"), &p.when);
        require(&mut diags, code, &format!("pseudoinstructions[{idx}].to"), &p.to);
    }

    diags
}

/// Parses and validates a record; any error diagnostic fails the load.
pub fn load_record_json(bytes: &[u8]) -> Result<InstructionRecord> {
    let record = parse_record_json(bytes)?;
    let mut errors: Vec<String> = Vec::new();
    for d in validate_record(&record) {
        match d.severity {
            Severity::Error => errors.push(d.to_string()),
            Severity::Warning => tracing::warn!(name = %record.name, "{d}"),
        }
    }
    if !errors.is_empty() {
        anyhow::bail!(
            "instruction record {:?} is invalid:\n{}",
            record.name,
            errors.join("\n")
        );
    }
    tracing::debug!(name = %record.name, "loaded instruction record");
    Ok(record)
}

pub fn load_record_file(path: &std::path::Path) -> Result<InstructionRecord> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read instruction record: {}", path.display()))?;
    load_record_json(&bytes).with_context(|| format!("load {}", path.display()))
}

fn require(diags: &mut Vec<Diagnostic>, code: DiagnosticCode, key: &str, value: &str) {
    if value.is_empty() {
        diags.push(Diagnostic::error(code, format!("{key} is empty")));
    }
}
