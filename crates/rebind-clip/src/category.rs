//! The fixed set of curve arrays a clip stores

use std::fmt;

/// One of the six curve arrays of a clip.
///
/// Every binding lives in exactly one of these; a scan that skips any of
/// them misses bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveCategory {
    Position,
    Scale,
    Float,
    /// Object-reference curves
    PPtr,
    Editor,
    EulerEditor,
}

impl CurveCategory {
    /// All categories, in scan order
    pub const ALL: [CurveCategory; 6] = [
        CurveCategory::Position,
        CurveCategory::Scale,
        CurveCategory::Float,
        CurveCategory::PPtr,
        CurveCategory::Editor,
        CurveCategory::EulerEditor,
    ];

    /// Key of the curve array in a clip document
    pub fn key(self) -> &'static str {
        match self {
            CurveCategory::Position => "position_curves",
            CurveCategory::Scale => "scale_curves",
            CurveCategory::Float => "float_curves",
            CurveCategory::PPtr => "pptr_curves",
            CurveCategory::Editor => "editor_curves",
            CurveCategory::EulerEditor => "euler_editor_curves",
        }
    }
}

impl fmt::Display for CurveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
