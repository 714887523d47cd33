// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # SXF-Lite Processing
//!
//! Turns the record stream produced by `sxf-lite-core` into a drawable
//! document: elements grouped into named levels, per-level affine
//! transforms applied, statistics aggregated, level numbering normalized.
//!
//! The entry point is [`parse_document`]; everything else is exported for
//! consumers that need the individual pieces (e.g. applying a level's
//! transform to hit-test coordinates).

pub mod document;
pub mod level;
pub mod pipeline;
pub mod renumber;
pub mod stats;
pub mod transform;

pub use document::ParsedDocument;
pub use level::{Element, Level};
pub use pipeline::parse_document;
pub use renumber::renumber_levels;
pub use stats::{CoordinateRange, Statistics};
pub use transform::LevelTransform;
