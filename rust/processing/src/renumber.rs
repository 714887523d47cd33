// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Level renumbering
//!
//! Final normalization pass: the synthetic paper level becomes level 0 and
//! every other level is numbered 1.. in group-finalization order. Element
//! level references are remapped alongside so they stay consistent with
//! the rewritten ids.

use rustc_hash::FxHashMap;
use sxf_lite_core::PAPER_LEVEL_NAME;

use crate::level::{Element, Level};

/// Renumber levels in place and remap element level ids.
///
/// If no paper level exists, numbering starts at 1 for the first real
/// level; there is no level 0 in that case. The final list is sorted by
/// level number ascending (a stable sort, preserving finalization order
/// among equal keys, though numbers are unique by construction).
pub fn renumber_levels(levels: &mut Vec<Level>, elements: &mut [Element]) {
    let mut id_remap: FxHashMap<String, String> = FxHashMap::default();
    let mut next = 1u32;

    for level in levels.iter_mut() {
        let number = if level.name == PAPER_LEVEL_NAME {
            0
        } else {
            let n = next;
            next += 1;
            n
        };
        let new_id = format!("level_{}", number);
        id_remap.insert(std::mem::take(&mut level.id), new_id.clone());
        level.id = new_id;
        level.level_number = number;
    }

    levels.sort_by_key(|level| level.level_number);

    for element in elements {
        if let Some(new_id) = id_remap.get(&element.level_id) {
            element.level_id = new_id.clone();
        }
    }
}
