// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # SXF-Lite Core Parser
//!
//! Record scanner and entity interpreter for SXF/SFC, the STEP-derived
//! (ISO-10303-21) text format used in Japanese cadastral/land-survey CAD
//! exchange. Built with [nom](https://docs.rs/nom) for the record grammar
//! and [memchr](https://docs.rs/memchr) for fast line rejection.
//!
//! ## Overview
//!
//! - **Record scanning**: zero-copy, line-oriented tokenization of the
//!   `DATA;`..`ENDSEC;` span, tolerant of SFC comment wrapper lines
//! - **Parameter splitting**: quote-aware top-level comma splitting
//! - **Entity interpretation**: typed elements with an explicit geometry
//!   sum type, plus extractors for group boundaries, transform
//!   declarations and the sheet record
//! - **Streaming**: batched record events with progress reporting
//!
//! Input is an already-decoded text buffer; character-set conversion
//! (SFC files are customarily Shift-JIS on disk) is the caller's concern.
//!
//! ## Quick Start
//!
//! ```
//! use sxf_lite_core::{interpret, RecordScanner};
//!
//! let content = "DATA;\n#10 = line_feature('1','1','2','2','0','10','0','0')\nENDSEC;\n";
//! for record in RecordScanner::new(content) {
//!     if let Some(element) = interpret(&record) {
//!         println!("element #{}: {}", element.id, element.type_name);
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for parsed data

pub mod entity;
pub mod error;
pub mod params;
pub mod scanner;
pub mod schema;
pub mod streaming;

pub use entity::{
    group_boundary, interpret, locate_declaration, normalize_level_name, sheet_info, Attributes,
    Geometry, GroupBoundary, LocateDeclaration, Point2, RawElement, SheetInfo, PAPER_LEVEL_NAME,
    UNNAMED_LEVEL_NAME,
};
pub use error::{Error, Result};
pub use params::{parse_f64_field, split_number_list, split_params, strip_quotes, ParamTokens};
pub use scanner::{parse_header, parse_record, FileHeader, RecordScanner, ScannedRecord};
pub use schema::SxfType;
pub use streaming::{parse_stream, ParseEvent, StreamConfig, StreamParser};
