// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SXF/SFC record scanner using nom
//!
//! Zero-copy, line-oriented tokenization of the `DATA;`..`ENDSEC;` span.
//! SFC files wrap each feature record in comment marker lines (`/*SXF`,
//! `SXF*/`); those lines, like anything else that does not match the
//! `#<id> = <type>(<params>)` grammar, are skipped silently.

use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map, map_res},
    sequence::{delimited, preceded, tuple},
    IResult,
};

/// One data record scanned out of the DATA section.
///
/// All string fields borrow from the input buffer; `params` is the raw text
/// between the type name's opening and closing parenthesis, still quoted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedRecord<'a> {
    /// Record id: the `123` of `#123 = ...`
    pub id: u32,
    /// Record type name, e.g. `line_feature`
    pub type_name: &'a str,
    /// Raw parameter text, not yet split
    pub params: &'a str,
    /// Zero-based line index in the input buffer
    pub line_index: usize,
}

/// File header values extracted from the `HEADER;` section.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHeader {
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub schema: Option<String>,
}

/// Skip whitespace
fn ws(input: &str) -> IResult<&str, ()> {
    map(take_while(|c: char| c.is_whitespace()), |_| ())(input)
}

/// Parse the record prefix: `#123 = line_feature`
fn record_prefix(input: &str) -> IResult<&str, (u32, &str)> {
    tuple((
        // Record id: #123
        delimited(
            ws,
            preceded(char('#'), map_res(digit1, |s: &str| s.parse::<u32>())),
            ws,
        ),
        // Equals sign, then type name
        preceded(
            char('='),
            delimited(
                ws,
                take_while1(|c: char| c.is_alphanumeric() || c == '_'),
                ws,
            ),
        ),
    ))(input)
}

/// Parse a single line as a data record: `#123 = line_feature('1','2',...)`.
///
/// Returns `(id, type_name, params)` with `params` spanning everything
/// between the outermost parentheses. Non-matching lines yield `None`; they
/// are expected (comment wrappers, section keywords) and are not errors.
pub fn parse_record(line: &str) -> Option<(u32, &str, &str)> {
    let (rest, (id, type_name)) = record_prefix(line).ok()?;
    let rest = rest.strip_prefix('(')?;
    // Parameters may contain quoted ')' so the record closes at the last
    // ')' on the line (anything after it is the trailing ';').
    let close = rest.rfind(')')?;
    Some((id, type_name, &rest[..close]))
}

/// Line-oriented scanner over the DATA section of an SXF/SFC buffer.
///
/// Yields records in file order. The only state carried between lines is
/// whether the scanner is currently inside `DATA;`..`ENDSEC;`.
pub struct RecordScanner<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    in_data: bool,
}

impl<'a> RecordScanner<'a> {
    /// Create a new scanner
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().enumerate(),
            in_data: false,
        }
    }

    /// Count remaining records by type name.
    ///
    /// Quick summary without running the full interpretation pipeline.
    pub fn count_by_type(self) -> rustc_hash::FxHashMap<String, usize> {
        let mut counts = rustc_hash::FxHashMap::default();
        for record in self {
            *counts.entry(record.type_name.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = ScannedRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (line_index, line) in self.lines.by_ref() {
            let trimmed = line.trim();
            if !self.in_data {
                if trimmed == "DATA;" {
                    self.in_data = true;
                }
                continue;
            }
            if trimmed == "ENDSEC;" {
                self.in_data = false;
                continue;
            }
            // Fast rejection of wrapper/comment lines before running the grammar
            if memchr::memchr(b'#', trimmed.as_bytes()).is_none() {
                continue;
            }
            if let Some((id, type_name, params)) = parse_record(trimmed) {
                return Some(ScannedRecord {
                    id,
                    type_name,
                    params,
                    line_index,
                });
            }
        }
        None
    }
}

/// Extract the first quoted string from a header line.
fn first_quoted(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let open = memchr::memchr(b'\'', bytes)?;
    let close = memchr::memchr(b'\'', &bytes[open + 1..])?;
    Some(&line[open + 1..open + 1 + close])
}

/// Parse the `HEADER;` section of a buffer.
///
/// Pulls the description from `FILE_DESCRIPTION`, the original file name
/// from `FILE_NAME` and the schema identifier from `FILE_SCHEMA`. Missing
/// entries leave the corresponding field unset; a buffer without a header
/// section yields the empty default.
pub fn parse_header(content: &str) -> FileHeader {
    let mut header = FileHeader::default();
    let mut in_header = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if !in_header {
            if trimmed == "HEADER;" {
                in_header = true;
            }
            // Header precedes DATA; stop looking once data starts
            if trimmed == "DATA;" {
                break;
            }
            continue;
        }
        if trimmed == "ENDSEC;" {
            break;
        }
        if trimmed.starts_with("FILE_DESCRIPTION") {
            header.description = first_quoted(trimmed).map(str::to_string);
        } else if trimmed.starts_with("FILE_NAME") {
            header.file_name = first_quoted(trimmed).map(str::to_string);
        } else if trimmed.starts_with("FILE_SCHEMA") {
            header.schema = first_quoted(trimmed).map(str::to_string);
        }
    }

    header
}
