//! SXF Entity Types
//!
//! Fast type dispatch using an enum instead of string comparison.

use std::fmt;

/// SXF feature record types recognized by the interpreter.
///
/// Feature names in SFC are lowercase (`line_feature`); the STEP-native
/// `CARTESIAN_POINT` keeps its upper-case spelling. Anything else maps to
/// `Unknown` and is tallied but carries no geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SxfType {
    /// Straight segment with start/end coordinates
    LineFeature,
    /// Circular arc with center and optional radius
    ArcFeature,
    /// Bare 2D point
    CartesianPoint,
    /// Vertex chain carried as parallel X/Y lists
    PolylineFeature,
    /// Group boundary: closes the preceding buffer of elements into a level
    SfigOrgFeature,
    /// Transform declaration for a named level
    SfigLocateFeature,
    /// Paper size declaration
    DrawingSheetFeature,
    /// Line width attribute
    WidthFeature,
    /// Text font attribute
    TextFontFeature,
    /// User-defined RGB colour attribute
    UserDefinedColourFeature,
    /// Any type this crate does not interpret
    Unknown,
}

impl SxfType {
    /// Map a record type name onto the enum.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "line_feature" => Self::LineFeature,
            "arc_feature" => Self::ArcFeature,
            "CARTESIAN_POINT" => Self::CartesianPoint,
            "polyline_feature" => Self::PolylineFeature,
            "sfig_org_feature" => Self::SfigOrgFeature,
            "sfig_locate_feature" => Self::SfigLocateFeature,
            "drawing_sheet_feature" => Self::DrawingSheetFeature,
            "width_feature" => Self::WidthFeature,
            "text_font_feature" => Self::TextFontFeature,
            "user_defined_colour_feature" => Self::UserDefinedColourFeature,
            _ => Self::Unknown,
        }
    }

    /// Structural records drive level grouping and are never emitted as
    /// drawable elements.
    #[inline]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::SfigOrgFeature | Self::SfigLocateFeature)
    }

    /// Canonical type name string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LineFeature => "line_feature",
            Self::ArcFeature => "arc_feature",
            Self::CartesianPoint => "CARTESIAN_POINT",
            Self::PolylineFeature => "polyline_feature",
            Self::SfigOrgFeature => "sfig_org_feature",
            Self::SfigLocateFeature => "sfig_locate_feature",
            Self::DrawingSheetFeature => "drawing_sheet_feature",
            Self::WidthFeature => "width_feature",
            Self::TextFontFeature => "text_font_feature",
            Self::UserDefinedColourFeature => "user_defined_colour_feature",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SxfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
