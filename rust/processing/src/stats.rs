// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregate statistics over a parsed drawing
//!
//! Two intentionally separate update points: the per-type tally fires once
//! per matched record at interpretation time, while the bounding box folds
//! each element only after its group's transform has been applied, so the
//! reported range is always in drawing space.

use rustc_hash::FxHashMap;
use serde::Serialize;
use sxf_lite_core::Geometry;

use crate::level::Element;

/// Running bounding box over transformed coordinates.
///
/// Starts in the empty sentinel state (`min = +inf`, `max = -inf`); a
/// document with no coordinate-bearing elements leaves it there rather
/// than reporting a bogus zero box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateRange {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl CoordinateRange {
    /// Create a new range in the empty sentinel state
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Whether at least one point has been folded in
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Expand the range to include a point
    #[inline]
    pub fn expand(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Fold every coordinate a geometry carries into the range.
    pub fn expand_geometry(&mut self, geometry: &Geometry) {
        match geometry {
            Geometry::Line { start, end } => {
                self.expand(start.x, start.y);
                self.expand(end.x, end.y);
            }
            Geometry::Arc { center, .. } => self.expand(center.x, center.y),
            Geometry::Point { position } => self.expand(position.x, position.y),
            Geometry::Polyline { vertices } => {
                for v in vertices {
                    self.expand(v.x, v.y);
                }
            }
            Geometry::None => {}
        }
    }
}

impl Default for CoordinateRange {
    fn default() -> Self {
        Self::new()
    }
}

/// Document statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct Statistics {
    /// Number of finalized drawable elements
    pub total_elements: usize,
    /// Tally per record type name, one increment per matched record
    pub element_type_counts: FxHashMap<String, usize>,
    /// Bounding box over transformed coordinates
    pub coordinate_range: CoordinateRange,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one matched record. Fires for every `#id = TYPE(...)` record,
    /// including structural, unknown and geometrically rejected ones.
    #[inline]
    pub fn count_record(&mut self, type_name: &str) {
        *self
            .element_type_counts
            .entry(type_name.to_string())
            .or_insert(0) += 1;
    }

    /// Fold one finalized element into the totals and bounding box. Must be
    /// called only with transformed geometry.
    pub fn record_element(&mut self, element: &Element) {
        self.total_elements += 1;
        self.coordinate_range.expand_geometry(&element.geometry);
    }

    /// Sum of the per-type tallies, i.e. the number of matched records.
    pub fn matched_record_count(&self) -> usize {
        self.element_type_counts.values().sum()
    }
}
