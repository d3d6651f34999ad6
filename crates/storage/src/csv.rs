// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal CSV codec for ledger rows.
//!
//! Fields containing a comma, quote or line break are quoted, with embedded
//! quotes doubled. Parsing accepts `\n` and `\r\n` row terminators and line
//! breaks inside quoted fields.

/// Encode one row, terminated by `\n`
pub(crate) fn encode_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        let field = field.as_ref();
        if field.contains([',', '"', '\n', '\r']) {
            line.push('"');
            line.push_str(&field.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(field);
        }
    }
    line.push('\n');
    line
}

/// A parsed row with the line it started on (1-based)
#[derive(Debug, PartialEq)]
pub(crate) struct Row {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Unterminated quoted field starting at the given line
#[derive(Debug, PartialEq)]
pub(crate) struct Unterminated(pub usize);

/// Decode every non-empty row of `input`
pub(crate) fn decode(input: &str) -> Result<Vec<Row>, Unterminated> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                push_row(&mut rows, row_start, std::mem::take(&mut fields));
                line += 1;
                row_start = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Unterminated(row_start));
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_row(&mut rows, row_start, fields);
    }
    Ok(rows)
}

fn push_row(rows: &mut Vec<Row>, line: usize, fields: Vec<String>) {
    // blank lines carry no record
    if fields.len() == 1 && fields[0].is_empty() {
        return;
    }
    rows.push(Row { line, fields });
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;
