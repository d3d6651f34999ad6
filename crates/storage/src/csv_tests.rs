// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn fields(rows: &[Row]) -> Vec<Vec<&str>> {
    rows.iter()
        .map(|r| r.fields.iter().map(String::as_str).collect())
        .collect()
}

#[test]
fn plain_fields_are_not_quoted() {
    assert_eq!(encode_row(&["a", "b c", "d/e.ipynb"]), "a,b c,d/e.ipynb\n");
}

#[test]
fn special_fields_are_quoted() {
    assert_eq!(
        encode_row(&["x,y", "say \"hi\"", "two\nlines"]),
        "\"x,y\",\"say \"\"hi\"\"\",\"two\nlines\"\n"
    );
}

#[test]
fn decode_reads_quoted_fields_back() {
    let encoded = encode_row(&["x,y", "say \"hi\"", "two\nlines", ""]);
    let rows = decode(&encoded).unwrap();
    assert_eq!(fields(&rows), vec![vec!["x,y", "say \"hi\"", "two\nlines", ""]]);
}

#[test]
fn decode_accepts_crlf_and_missing_final_newline() {
    let rows = decode("a,b\r\nc,d").unwrap();
    assert_eq!(fields(&rows), vec![vec!["a", "b"], vec!["c", "d"]]);
}

#[test]
fn decode_skips_blank_lines_and_tracks_line_numbers() {
    let rows = decode("h1,h2\n\n\"multi\nline\",x\nlast,row\n").unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].line, 1);
    assert_eq!(rows[1].line, 3);
    assert_eq!(rows[2].line, 5);
}

#[test]
fn decode_rejects_unterminated_quote() {
    assert_eq!(decode("a,b\n\"open,c\n"), Err(Unterminated(2)));
}
