// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Level resolution
//!
//! Groups the linear record stream into named levels and matches each
//! group with its transform declaration. Three passes over the same
//! immutable record list, in a fixed order that is part of the contract:
//!
//! 1. [`collect_groups`] buffers interpreted elements and closes a group at
//!    each `sfig_org_feature` boundary (boundaries trail their group);
//!    leftover elements become the implicit paper level.
//! 2. [`collect_transforms`] gathers `sfig_locate_feature` declarations by
//!    normalized name, last declaration wins. Declarations may appear
//!    anywhere in the stream, including after the groups they apply to,
//!    which is why this cannot be folded into pass 1.
//! 3. [`finalize_groups`] looks up each group's transform (identity when
//!    unmatched or invalid), assigns level ids and rewrites every element
//!    into drawing space.

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, warn};

use sxf_lite_core::{
    group_boundary, interpret, locate_declaration, sheet_info, Attributes, Geometry, RawElement,
    ScannedRecord, SheetInfo, PAPER_LEVEL_NAME,
};

use crate::stats::Statistics;
use crate::transform::LevelTransform;

/// One named drawing layer plus the affine transform mapping its native
/// coordinates into the shared drawing space. Frozen after finalization
/// except for the single id/number rewrite done by the renumberer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    pub id: String,
    pub name: String,
    pub level_number: u32,
    #[serde(flatten)]
    pub transform: LevelTransform,
}

/// A finalized element: transformed coordinates, assigned level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: u32,
    pub type_name: String,
    pub geometry: Geometry,
    pub attributes: Attributes,
    pub level_id: String,
}

/// One closed group of elements awaiting finalization.
#[derive(Debug)]
pub(crate) struct ElementGroup {
    /// Normalized level name
    pub name: String,
    pub elements: Vec<RawElement>,
}

/// Output of pass 1.
#[derive(Debug, Default)]
pub(crate) struct GroupedStream {
    /// Groups in close order; the implicit paper group, when present, is last
    pub groups: Vec<ElementGroup>,
    /// First `drawing_sheet_feature` seen
    pub sheet: Option<SheetInfo>,
}

/// Pass 1: walk records in file order and close element groups at
/// `sfig_org_feature` boundaries.
///
/// The per-type tally fires here, once per record, before any geometric
/// rejection. `sfig_locate_feature` records are deferred to pass 2 and do
/// not flush the pending buffer.
pub(crate) fn collect_groups(
    records: &[ScannedRecord<'_>],
    stats: &mut Statistics,
) -> GroupedStream {
    let mut out = GroupedStream::default();
    let mut pending: Vec<RawElement> = Vec::new();

    for record in records {
        stats.count_record(record.type_name);

        if let Some(boundary) = group_boundary(record) {
            // The boundary closes the buffer that precedes it; the new
            // marker itself starts nothing.
            if !pending.is_empty() {
                out.groups.push(ElementGroup {
                    name: boundary.name,
                    elements: std::mem::take(&mut pending),
                });
            }
            continue;
        }
        if locate_declaration(record).is_some() {
            continue;
        }
        if let Some(sheet) = sheet_info(record) {
            // First occurrence wins
            if out.sheet.is_none() {
                out.sheet = Some(sheet);
            }
            continue;
        }
        if let Some(element) = interpret(record) {
            pending.push(element);
        }
    }

    // Ungrouped leftovers form the implicit paper level
    if !pending.is_empty() {
        out.groups.push(ElementGroup {
            name: PAPER_LEVEL_NAME.to_string(),
            elements: pending,
        });
    }

    out
}

/// Pass 2: gather transform declarations by normalized level name.
///
/// Multiple declarations for one name overwrite (last wins); malformed
/// declarations were already rejected at interpretation and simply never
/// enter the map.
pub(crate) fn collect_transforms(records: &[ScannedRecord<'_>]) -> FxHashMap<String, LevelTransform> {
    let mut transforms: FxHashMap<String, LevelTransform> = FxHashMap::default();
    for record in records {
        if let Some(decl) = locate_declaration(record) {
            transforms.insert(decl.name.clone(), LevelTransform::from(&decl));
        }
    }
    transforms
}

/// Pass 3: finalize groups into levels and transformed elements.
///
/// Groups sharing a normalized name share one [`Level`], so a given level
/// id is registered at most once. The paper group always uses the identity
/// transform and is never looked up; unmatched or invalid transforms fall
/// back to the identity rather than failing. Bounding-box folds fire here,
/// strictly after each element's geometry is transformed.
pub(crate) fn finalize_groups(
    groups: Vec<ElementGroup>,
    transforms: &FxHashMap<String, LevelTransform>,
    stats: &mut Statistics,
) -> (Vec<Element>, Vec<Level>) {
    let mut elements: Vec<Element> = Vec::new();
    let mut levels: Vec<Level> = Vec::new();
    let mut level_index_by_name: FxHashMap<String, usize> = FxHashMap::default();

    for group in groups {
        let index = match level_index_by_name.get(&group.name) {
            Some(&index) => index,
            None => {
                let transform = if group.name == PAPER_LEVEL_NAME {
                    LevelTransform::identity()
                } else {
                    match transforms.get(&group.name) {
                        Some(t) if t.is_valid() => *t,
                        Some(_) => {
                            warn!(level = %group.name, "invalid transform, using identity");
                            LevelTransform::identity()
                        }
                        None => {
                            debug!(level = %group.name, "no transform declaration, using identity");
                            LevelTransform::identity()
                        }
                    }
                };
                let index = levels.len();
                levels.push(Level {
                    // Provisional id; the renumberer assigns the final one
                    id: format!("level_{}", index + 1),
                    name: group.name.clone(),
                    level_number: (index + 1) as u32,
                    transform,
                });
                level_index_by_name.insert(group.name.clone(), index);
                index
            }
        };

        let level = &levels[index];
        for raw in group.elements {
            let element = Element {
                id: raw.id,
                type_name: raw.type_name,
                geometry: level.transform.transform_geometry(&raw.geometry),
                attributes: raw.attributes,
                level_id: level.id.clone(),
            };
            stats.record_element(&element);
            elements.push(element);
        }
    }

    (elements, levels)
}
