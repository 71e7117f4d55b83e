use std::io::{self, Write};

/// Writes `text` as the body of a YAML literal block scalar.
///
/// Every newline-terminated line is written as `indent + line`. Blank lines
/// are written bare, without the indent, so the block never carries trailing
/// whitespace. A final fragment with no terminating newline is indented like
/// any other line; an empty final fragment is dropped. An empty `text` writes
/// nothing; the caller decides whether the `key: |` header is emitted.
pub fn write_literal_block<W: Write + ?Sized>(
    out: &mut W,
    indent: &str,
    text: &str,
) -> io::Result<()> {
    let mut rest = text;
    while let Some((line, tail)) = rest.split_once('\n') {
        if line.is_empty() {
            out.write_all(b"\n")?;
        } else {
            writeln!(out, "{indent}{line}")?;
        }
        rest = tail;
    }
    if !rest.is_empty() {
        writeln!(out, "{indent}{rest}")?;
    }
    Ok(())
}
