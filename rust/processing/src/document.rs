// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsed document aggregate

use serde::Serialize;
use sxf_lite_core::{FileHeader, SheetInfo};

use crate::level::{Element, Level};
use crate::stats::Statistics;

/// The aggregate result of parsing one SXF/SFC buffer.
///
/// Owns everything it contains; downstream consumers (renderers, summary
/// views) read it but never hand references back into the parser.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedDocument {
    /// Values from the `HEADER;` section
    pub header: FileHeader,
    /// Paper size from the first `drawing_sheet_feature`, when present
    pub sheet: Option<SheetInfo>,
    /// Drawable elements in file order, coordinates in drawing space
    pub elements: Vec<Element>,
    /// Levels sorted by level number (paper level first when present)
    pub levels: Vec<Level>,
    pub statistics: Statistics,
}

impl ParsedDocument {
    /// Serialize to JSON for UI/API consumers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
