use std::io::Write;

use anyhow::{Context, Result};

use crate::block::write_literal_block;
use crate::record::{Access, Encoding, InstructionRecord, Pseudoinstruction};

/// Indent applied to literal block bodies and to first-level nested keys.
pub const BLOCK_INDENT: &str = "  ";

/// When a literal block header is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Always,
    NonEmpty,
}

/// One entry of the emission plan. Steps are executed strictly in plan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Comments(&'a [String]),
    Scalar {
        key: &'static str,
        value: &'a str,
    },
    QuotedScalar {
        key: &'static str,
        value: &'a str,
    },
    Block {
        key: &'static str,
        body: &'a str,
        presence: Presence,
    },
    Encoding(&'a Encoding),
    Access(&'a Access),
    Flag {
        key: &'static str,
        value: bool,
    },
    Hints(&'a [String]),
    Pseudoinstructions(&'a [Pseudoinstruction]),
}

impl Step<'_> {
    /// Document key the step writes, used for logging and error context.
    pub fn key(&self) -> &'static str {
        match self {
            Step::Comments(_) => "comments",
            Step::Scalar { key, .. }
            | Step::QuotedScalar { key, .. }
            | Step::Block { key, .. }
            | Step::Flag { key, .. } => *key,
            Step::Encoding(_) => "encoding",
            Step::Access(_) => "access",
            Step::Hints(_) => "hints",
            Step::Pseudoinstructions(_) => "pseudoinstructions",
        }
    }
}

/// Builds the fixed emission plan for `r`.
///
/// The plan always has the same steps in the same order; content only decides
/// whether a conditional step writes anything.
pub fn plan(r: &InstructionRecord) -> Vec<Step<'_>> {
    vec![
        Step::Comments(&r.comments),
        Step::QuotedScalar {
            key: "$schema",
            value: &r.schema,
        },
        Step::Scalar {
            key: "kind",
            value: &r.kind,
        },
        Step::Scalar {
            key: "name",
            value: &r.name,
        },
        Step::Scalar {
            key: "long_name",
            value: &r.long_name,
        },
        Step::Block {
            key: "description",
            body: &r.description,
            presence: Presence::Always,
        },
        Step::Scalar {
            key: "definedBy",
            value: &r.defined_by,
        },
        Step::Scalar {
            key: "assembly",
            value: &r.assembly,
        },
        Step::Encoding(&r.encoding),
        Step::Access(&r.access),
        Step::Flag {
            key: "data_independent_timing",
            value: r.data_independent_timing,
        },
        Step::Hints(&r.hints),
        Step::Pseudoinstructions(&r.pseudoinstructions),
        Step::Block {
            key: "operation()",
            body: &r.operation,
            presence: Presence::NonEmpty,
        },
        Step::Block {
            key: "sail()",
            body: &r.sail,
            presence: Presence::NonEmpty,
        },
    ]
}

/// Streams the document for `r` into `out` and returns the number of bytes
/// written.
///
/// Aborts on the first failed write; the error names the key being written.
/// A buffered `out` may defer the failure to its own flush.
pub fn write_document<W: Write + ?Sized>(out: &mut W, r: &InstructionRecord) -> Result<u64> {
    let mut out = CountingWriter {
        inner: out,
        bytes: 0,
    };
    for step in plan(r) {
        tracing::debug!(key = step.key(), "emit step");
        emit_step(&mut out, &step).with_context(|| format!("write {}", step.key()))?;
    }
    tracing::info!(name = %r.name, bytes = out.bytes, "instruction document written");
    Ok(out.bytes)
}

struct CountingWriter<'a, W: ?Sized> {
    inner: &'a mut W,
    bytes: u64,
}

impl<W: Write + ?Sized> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Renders the document for `r` into a string.
pub fn emit_document(r: &InstructionRecord) -> Result<String> {
    let mut out = Vec::new();
    write_document(&mut out, r)?;
    Ok(String::from_utf8(out)?)
}

fn emit_step<W: Write + ?Sized>(out: &mut W, step: &Step<'_>) -> std::io::Result<()> {
    match *step {
        Step::Comments(comments) => {
            for c in comments {
                writeln!(out, "{c}")?;
            }
            if !comments.is_empty() {
                writeln!(out)?;
            }
        }
        Step::Scalar { key, value } => writeln!(out, "{key}: {value}")?,
        Step::QuotedScalar { key, value } => writeln!(out, "{key}: \"{value}\"")?,
        Step::Block {
            key,
            body,
            presence,
        } => {
            if presence == Presence::Always || !body.is_empty() {
                writeln!(out, "{key}: |")?;
                write_literal_block(out, BLOCK_INDENT, body)?;
            }
        }
        Step::Encoding(enc) => {
            writeln!(out, "encoding:")?;
            writeln!(out, "  match: {}", enc.match_pattern)?;
            writeln!(out, "  variables:")?;
            for v in &enc.variables {
                writeln!(out, "    - name: {}", v.name)?;
                writeln!(out, "      location: {}", v.location)?;
            }
        }
        Step::Access(a) => {
            writeln!(out, "access:")?;
            writeln!(out, "  s: {}", a.s)?;
            writeln!(out, "  u: {}", a.u)?;
            writeln!(out, "  vs: {}", a.vs)?;
            writeln!(out, "  vu: {}", a.vu)?;
        }
        Step::Flag { key, value } => {
            writeln!(out, "{key}: {}", if value { "true" } else { "false" })?
        }
        Step::Hints(hints) => {
            if !hints.is_empty() {
                writeln!(out, "hints:")?;
                for h in hints {
                    writeln!(out, "  - {{ $ref: {h} }}")?;
                }
            }
        }
        Step::Pseudoinstructions(ps) => {
            if !ps.is_empty() {
                writeln!(out, "pseudoinstructions:")?;
                for p in ps {
                    writeln!(out, "  - when: {}", p.when)?;
                    writeln!(out, "    to: {}", p.to)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EncodingVariable;

    fn minimal() -> InstructionRecord {
        InstructionRecord {
            comments: Vec::new(),
            schema: "inst_schema.json#".to_string(),
            kind: "instruction".to_string(),
            name: "nop".to_string(),
            long_name: "No operation".to_string(),
            description: String::new(),
            defined_by: "I".to_string(),
            assembly: "nop".to_string(),
            encoding: Encoding {
                match_pattern: "00000000000000000000000000010011".to_string(),
                variables: Vec::new(),
            },
            access: Access {
                s: "always".to_string(),
                u: "always".to_string(),
                vs: "always".to_string(),
                vu: "always".to_string(),
            },
            data_independent_timing: false,
            hints: Vec::new(),
            pseudoinstructions: Vec::new(),
            operation: String::new(),
            sail: String::new(),
        }
    }

    #[test]
    fn plan_has_fixed_shape() {
        let r = minimal();
        let keys: Vec<&str> = plan(&r).iter().map(Step::key).collect();
        assert_eq!(
            keys,
            vec![
                "comments",
                "$schema",
                "kind",
                "name",
                "long_name",
                "description",
                "definedBy",
                "assembly",
                "encoding",
                "access",
                "data_independent_timing",
                "hints",
                "pseudoinstructions",
                "operation()",
                "sail()",
            ]
        );
    }

    #[test]
    fn empty_description_keeps_header() {
        let doc = emit_document(&minimal()).expect("emit");
        assert!(doc.contains("long_name: No operation\ndescription: |\ndefinedBy: I\n"));
        assert!(!doc.contains("operation(): |"));
        assert!(!doc.contains("sail(): |"));
    }

    #[test]
    fn no_comments_means_no_separator() {
        let doc = emit_document(&minimal()).expect("emit");
        assert!(doc.starts_with("$schema: \"inst_schema.json#\"\n"));
    }

    #[test]
    fn variables_are_two_line_items() {
        let mut r = minimal();
        r.encoding.variables = vec![
            EncodingVariable {
                name: "rd".to_string(),
                location: "11-7".to_string(),
            },
            EncodingVariable {
                name: "rs1".to_string(),
                location: "19-15".to_string(),
            },
        ];
        let doc = emit_document(&r).expect("emit");
        assert!(doc.contains(
            "  variables:\n    - name: rd\n      location: 11-7\n    - name: rs1\n      location: 19-15\naccess:\n"
        ));
    }

    #[test]
    fn flag_renders_as_yaml_bool() {
        let mut r = minimal();
        assert!(emit_document(&r)
            .expect("emit")
            .contains("\ndata_independent_timing: false\n"));
        r.data_independent_timing = true;
        assert!(emit_document(&r)
            .expect("emit")
            .contains("\ndata_independent_timing: true\n"));
    }
}
