// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity interpretation
//!
//! Maps a scanned record's type name and token list onto a typed element
//! with decoded geometry and attributes. Geometry is an explicit sum type
//! keyed by entity kind, so downstream code pattern-matches instead of
//! probing optional property flags.
//!
//! Rejection is per-record: a recognized record whose required numeric
//! fields fail to parse yields `None` and processing continues. No partial
//! element is ever emitted.

use crate::params::{
    is_list_token, parse_f64_field, split_number_list, split_params, strip_quotes, ParamTokens,
};
use crate::scanner::ScannedRecord;
use crate::schema::SxfType;

/// Canonical name of the implicit paper level (entities never grouped by a
/// boundary marker, plus `$$ATRU$$`-prefixed assignment names).
pub const PAPER_LEVEL_NAME: &str = "Paper";

/// Canonical name substituted for empty or `"0"` level names.
pub const UNNAMED_LEVEL_NAME: &str = "Unnamed";

/// 2D point in drawing or native coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry carried by an element, one variant per entity kind.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Geometry {
    Line {
        start: Point2,
        end: Point2,
    },
    Arc {
        center: Point2,
        radius: Option<f64>,
    },
    Point {
        position: Point2,
    },
    Polyline {
        vertices: Vec<Point2>,
    },
    /// Attribute-only records carry no geometry
    #[default]
    None,
}

impl Geometry {
    /// Whether this geometry contributes coordinates to a bounding box.
    #[inline]
    pub fn has_coordinates(&self) -> bool {
        !matches!(self, Geometry::None)
    }
}

/// Non-geometric attributes decoded from a record.
///
/// The common layer/colour/line-type/pen quadruple leads every drawable
/// feature; the remaining fields are populated by the dedicated attribute
/// record types.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub layer: Option<String>,
    pub color: Option<String>,
    pub line_type: Option<String>,
    pub pen: Option<String>,
    /// From `width_feature`
    pub line_width: Option<f64>,
    /// From `text_font_feature`
    pub font_name: Option<String>,
    /// From `user_defined_colour_feature`
    pub rgb: Option<(u8, u8, u8)>,
}

/// An interpreted element in native (untransformed) coordinates.
///
/// This is deliberately a distinct type from the finalized, transformed
/// element produced by level resolution, so native-coordinate data can
/// never leak into drawing space.
#[derive(Debug, Clone, PartialEq)]
pub struct RawElement {
    pub id: u32,
    pub type_name: String,
    pub geometry: Geometry,
    pub attributes: Attributes,
}

/// Group boundary extracted from `sfig_org_feature`.
///
/// Boundaries trail their group: the marker closes the buffer of elements
/// that precede it in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBoundary {
    /// Normalized level name
    pub name: String,
    pub sequence: Option<u32>,
}

/// Transform declaration extracted from `sfig_locate_feature`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocateDeclaration {
    /// Normalized level name
    pub name: String,
    pub origin_x: f64,
    pub origin_y: f64,
    pub rotation_degrees: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Paper size from `drawing_sheet_feature`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetInfo {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

/// Normalize a level/layer name token.
///
/// Strips quotes and whitespace, canonicalizes the `$$ATRU$$` paper-level
/// sentinel and maps empty or the exact literal `"0"` to the unnamed-level
/// name. The `"0"` rule is matched against that literal only; it is not
/// generalized to other numeric names.
pub fn normalize_level_name(raw: &str) -> String {
    let name = strip_quotes(raw);
    if name.starts_with("$$ATRU$$") {
        return PAPER_LEVEL_NAME.to_string();
    }
    if name.is_empty() || name == "0" {
        return UNNAMED_LEVEL_NAME.to_string();
    }
    name.to_string()
}

/// Decode the leading layer/colour/line-type/pen attribute quadruple.
fn common_attributes(tokens: &ParamTokens<'_>) -> Attributes {
    let field = |i: usize| {
        tokens
            .get(i)
            .map(|t| strip_quotes(t))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    Attributes {
        layer: field(0),
        color: field(1),
        line_type: field(2),
        pen: field(3),
        ..Attributes::default()
    }
}

/// Tokens `[layer, color, line_type, pen, x1, x2, y1, y2]`: the source
/// format interleaves both x-coordinates before both y-coordinates.
fn line_geometry(tokens: &ParamTokens<'_>) -> Option<Geometry> {
    if tokens.len() < 8 {
        return None;
    }
    let x1 = parse_f64_field(tokens[4])?;
    let x2 = parse_f64_field(tokens[5])?;
    let y1 = parse_f64_field(tokens[6])?;
    let y2 = parse_f64_field(tokens[7])?;
    Some(Geometry::Line {
        start: Point2::new(x1, y1),
        end: Point2::new(x2, y2),
    })
}

/// Center at fixed positions 4/5, radius at 6 when present.
fn arc_geometry(tokens: &ParamTokens<'_>) -> Option<Geometry> {
    if tokens.len() < 6 {
        return None;
    }
    let cx = parse_f64_field(tokens[4])?;
    let cy = parse_f64_field(tokens[5])?;
    let radius = tokens.get(6).and_then(|t| parse_f64_field(t));
    Some(Geometry::Arc {
        center: Point2::new(cx, cy),
        radius,
    })
}

/// Two positional numeric tokens.
fn point_geometry(tokens: &ParamTokens<'_>) -> Option<Geometry> {
    let x = parse_f64_field(tokens.first()?)?;
    let y = parse_f64_field(tokens.get(1)?)?;
    Some(Geometry::Point {
        position: Point2::new(x, y),
    })
}

/// The two parenthesized list tokens are the X-list and Y-list. Vertices
/// pair element-wise up to the shorter list; pairs where either component
/// fails to parse are dropped.
fn polyline_geometry(tokens: &ParamTokens<'_>) -> Option<Geometry> {
    let mut lists = tokens.iter().filter(|t| is_list_token(t));
    let xs = split_number_list(lists.next()?);
    let ys = split_number_list(lists.next()?);

    let points: Vec<Point2> = xs
        .into_iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(Point2::new(x?, y?)))
        .collect();
    Some(Geometry::Polyline { vertices: points })
}

/// Interpret a scanned record into a typed element.
///
/// Returns `None` for structural records (`sfig_org_feature`,
/// `sfig_locate_feature`), the sheet declaration, unrecognized types, and
/// recognized records whose required numeric fields fail to parse. The
/// caller tallies every matched record regardless of this outcome.
pub fn interpret(record: &ScannedRecord<'_>) -> Option<RawElement> {
    let sxf_type = SxfType::from_type_name(record.type_name);
    let tokens = split_params(record.params);

    let (geometry, attributes) = match sxf_type {
        SxfType::LineFeature => (line_geometry(&tokens)?, common_attributes(&tokens)),
        SxfType::ArcFeature => (arc_geometry(&tokens)?, common_attributes(&tokens)),
        SxfType::CartesianPoint => (point_geometry(&tokens)?, Attributes::default()),
        SxfType::PolylineFeature => (polyline_geometry(&tokens)?, common_attributes(&tokens)),
        SxfType::WidthFeature => {
            let attrs = Attributes {
                line_width: tokens.first().and_then(|t| parse_f64_field(t)),
                ..Attributes::default()
            };
            (Geometry::None, attrs)
        }
        SxfType::TextFontFeature => {
            let attrs = Attributes {
                font_name: tokens
                    .first()
                    .map(|t| strip_quotes(t))
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
                ..Attributes::default()
            };
            (Geometry::None, attrs)
        }
        SxfType::UserDefinedColourFeature => {
            let channel = |i: usize| {
                tokens
                    .get(i)
                    .and_then(|t| strip_quotes(t).parse::<u8>().ok())
            };
            let rgb = match (channel(0), channel(1), channel(2)) {
                (Some(r), Some(g), Some(b)) => Some((r, g, b)),
                _ => None,
            };
            let attrs = Attributes {
                rgb,
                ..Attributes::default()
            };
            (Geometry::None, attrs)
        }
        // Structural and document-level records are extracted separately
        SxfType::SfigOrgFeature
        | SxfType::SfigLocateFeature
        | SxfType::DrawingSheetFeature
        | SxfType::Unknown => return None,
    };

    Some(RawElement {
        id: record.id,
        type_name: record.type_name.to_string(),
        geometry,
        attributes,
    })
}

/// Extract a group boundary from a `sfig_org_feature` record.
///
/// Token 0 is the candidate level name, token 1 a sequence id.
pub fn group_boundary(record: &ScannedRecord<'_>) -> Option<GroupBoundary> {
    if SxfType::from_type_name(record.type_name) != SxfType::SfigOrgFeature {
        return None;
    }
    let tokens = split_params(record.params);
    let name = normalize_level_name(tokens.first()?);
    let sequence = tokens
        .get(1)
        .and_then(|t| strip_quotes(t).parse::<u32>().ok());
    Some(GroupBoundary { name, sequence })
}

/// Extract a transform declaration from a `sfig_locate_feature` record.
///
/// Name at token 1, the five numeric fields at tokens 2-6. Any numeric
/// failure rejects the whole declaration.
pub fn locate_declaration(record: &ScannedRecord<'_>) -> Option<LocateDeclaration> {
    if SxfType::from_type_name(record.type_name) != SxfType::SfigLocateFeature {
        return None;
    }
    let tokens = split_params(record.params);
    if tokens.len() < 7 {
        return None;
    }
    Some(LocateDeclaration {
        name: normalize_level_name(tokens[1]),
        origin_x: parse_f64_field(tokens[2])?,
        origin_y: parse_f64_field(tokens[3])?,
        rotation_degrees: parse_f64_field(tokens[4])?,
        scale_x: parse_f64_field(tokens[5])?,
        scale_y: parse_f64_field(tokens[6])?,
    })
}

/// Extract paper size from a `drawing_sheet_feature` record.
///
/// The full five-token form carries width/height at tokens 3/4; a short
/// three-token form at 1/2 is tolerated. Non-numeric dimensions skip the
/// record.
pub fn sheet_info(record: &ScannedRecord<'_>) -> Option<SheetInfo> {
    if SxfType::from_type_name(record.type_name) != SxfType::DrawingSheetFeature {
        return None;
    }
    let tokens = split_params(record.params);
    let title = strip_quotes(tokens.first()?).to_string();
    let (w, h) = if tokens.len() >= 5 {
        (tokens[3], tokens[4])
    } else if tokens.len() >= 3 {
        (tokens[1], tokens[2])
    } else {
        return None;
    };
    Some(SheetInfo {
        title,
        width: parse_f64_field(w)?,
        height: parse_f64_field(h)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(id: u32, type_name: &'a str, params: &'a str) -> ScannedRecord<'a> {
        ScannedRecord {
            id,
            type_name,
            params,
            line_index: 0,
        }
    }

    #[test]
    fn test_line_feature_coordinate_interleaving() {
        // x1, x2 precede y1, y2 in token order
        let rec = record(1, "line_feature", "'1','1','2','2','0','10','5','7'");
        let element = interpret(&rec).unwrap();
        assert_eq!(
            element.geometry,
            Geometry::Line {
                start: Point2::new(0.0, 5.0),
                end: Point2::new(10.0, 7.0),
            }
        );
        assert_eq!(element.attributes.layer.as_deref(), Some("1"));
        assert_eq!(element.attributes.line_type.as_deref(), Some("2"));
    }

    #[test]
    fn test_line_feature_rejects_bad_coordinate() {
        let rec = record(1, "line_feature", "'1','1','2','2','0','x','5','7'");
        assert!(interpret(&rec).is_none());
    }

    #[test]
    fn test_arc_feature() {
        let rec = record(2, "arc_feature", "'1','1','1','1','50','60','12.5'");
        let element = interpret(&rec).unwrap();
        assert_eq!(
            element.geometry,
            Geometry::Arc {
                center: Point2::new(50.0, 60.0),
                radius: Some(12.5),
            }
        );
    }

    #[test]
    fn test_arc_feature_missing_radius() {
        let rec = record(2, "arc_feature", "'1','1','1','1','50','60'");
        let element = interpret(&rec).unwrap();
        assert_eq!(
            element.geometry,
            Geometry::Arc {
                center: Point2::new(50.0, 60.0),
                radius: None,
            }
        );
    }

    #[test]
    fn test_arc_feature_rejects_bad_center() {
        let rec = record(2, "arc_feature", "'1','1','1','1','x','60'");
        assert!(interpret(&rec).is_none());
    }

    #[test]
    fn test_cartesian_point() {
        let rec = record(3, "CARTESIAN_POINT", "'1.5','2.5'");
        let element = interpret(&rec).unwrap();
        assert_eq!(
            element.geometry,
            Geometry::Point {
                position: Point2::new(1.5, 2.5)
            }
        );
    }

    #[test]
    fn test_polyline_pairs_to_shorter_list() {
        let rec = record(4, "polyline_feature", "'1','1','1','1','(0,10,20)','(0,5)'");
        let element = interpret(&rec).unwrap();
        assert_eq!(
            element.geometry,
            Geometry::Polyline {
                vertices: vec![Point2::new(0.0, 0.0), Point2::new(10.0, 5.0)]
            }
        );
    }

    #[test]
    fn test_polyline_drops_broken_pairs() {
        let rec = record(
            4,
            "polyline_feature",
            "'1','1','1','1','(0,x,20)','(0,5,9)'",
        );
        let element = interpret(&rec).unwrap();
        assert_eq!(
            element.geometry,
            Geometry::Polyline {
                vertices: vec![Point2::new(0.0, 0.0), Point2::new(20.0, 9.0)]
            }
        );
    }

    #[test]
    fn test_width_feature() {
        let rec = record(5, "width_feature", "'0.25'");
        let element = interpret(&rec).unwrap();
        assert_eq!(element.geometry, Geometry::None);
        assert_eq!(element.attributes.line_width, Some(0.25));
    }

    #[test]
    fn test_colour_feature() {
        let rec = record(6, "user_defined_colour_feature", "'255','128','0'");
        let element = interpret(&rec).unwrap();
        assert_eq!(element.attributes.rgb, Some((255, 128, 0)));
    }

    #[test]
    fn test_structural_and_unknown_produce_no_element() {
        assert!(interpret(&record(7, "sfig_org_feature", "'L1','1'")).is_none());
        assert!(interpret(&record(8, "sfig_locate_feature", "'0','L1','0','0','0','1','1'")).is_none());
        assert!(interpret(&record(9, "mystery_feature", "'a','b'")).is_none());
    }

    #[test]
    fn test_group_boundary() {
        let boundary = group_boundary(&record(10, "sfig_org_feature", "'L1','3'")).unwrap();
        assert_eq!(boundary.name, "L1");
        assert_eq!(boundary.sequence, Some(3));
    }

    #[test]
    fn test_locate_declaration() {
        let rec = record(11, "sfig_locate_feature", "'0','L1','100','200','90','1','1'");
        let decl = locate_declaration(&rec).unwrap();
        assert_eq!(decl.name, "L1");
        assert_eq!(decl.origin_x, 100.0);
        assert_eq!(decl.origin_y, 200.0);
        assert_eq!(decl.rotation_degrees, 90.0);
        assert_eq!(decl.scale_x, 1.0);
        assert_eq!(decl.scale_y, 1.0);
    }

    #[test]
    fn test_locate_declaration_rejects_bad_numeric() {
        let rec = record(11, "sfig_locate_feature", "'0','L1','100','x','90','1','1'");
        assert!(locate_declaration(&rec).is_none());
    }

    #[test]
    fn test_sheet_info() {
        let rec = record(12, "drawing_sheet_feature", "'A3','3','1','420','297'");
        let sheet = sheet_info(&rec).unwrap();
        assert_eq!(sheet.title, "A3");
        assert_eq!(sheet.width, 420.0);
        assert_eq!(sheet.height, 297.0);
    }

    #[test]
    fn test_normalize_level_name() {
        assert_eq!(normalize_level_name("'L1'"), "L1");
        assert_eq!(normalize_level_name("' spaced '"), "spaced");
        assert_eq!(normalize_level_name("'$$ATRU$$sheet'"), PAPER_LEVEL_NAME);
        assert_eq!(normalize_level_name("''"), UNNAMED_LEVEL_NAME);
        assert_eq!(normalize_level_name("'0'"), UNNAMED_LEVEL_NAME);
        // Only the exact literal "0" maps to unnamed
        assert_eq!(normalize_level_name("'00'"), "00");
        assert_eq!(normalize_level_name("'0.0'"), "0.0");
    }
}
