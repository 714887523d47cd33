// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document assembly pipeline
//!
//! Single-threaded and synchronous over one in-memory buffer: grouping
//! depends on strict file order and transform matching needs a second full
//! pass over the same records, so the unit of work is the whole buffer.
//! Every invocation starts from a fresh document; nothing persists between
//! files.

use tracing::debug;

use sxf_lite_core::{parse_header, Error, RecordScanner, Result, ScannedRecord};

use crate::document::ParsedDocument;
use crate::level::{collect_groups, collect_transforms, finalize_groups};
use crate::renumber::renumber_levels;
use crate::stats::Statistics;

/// Parse a decoded SXF/SFC text buffer into a [`ParsedDocument`].
///
/// The only hard failure is an empty (or whitespace-only) buffer. A buffer
/// without a `DATA;` section yields a well-formed empty document; malformed
/// records inside the data section are skipped or dropped per record,
/// never failing the parse.
pub fn parse_document(content: &str) -> Result<ParsedDocument> {
    if content.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let records: Vec<ScannedRecord<'_>> = RecordScanner::new(content).collect();
    let header = parse_header(content);

    let mut statistics = Statistics::new();
    let grouped = collect_groups(&records, &mut statistics);
    let transforms = collect_transforms(&records);
    let (mut elements, mut levels) = finalize_groups(grouped.groups, &transforms, &mut statistics);
    renumber_levels(&mut levels, &mut elements);

    debug!(
        records = records.len(),
        elements = elements.len(),
        levels = levels.len(),
        "parsed document"
    );

    Ok(ParsedDocument {
        header,
        sheet: grouped.sheet,
        elements,
        levels,
        statistics,
    })
}
