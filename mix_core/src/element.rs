//! # Structural Elements
//!
//! The two kinds of concrete pour the estimator handles, and their
//! rectangular dimensions. Both kinds use the same volume formula
//! (`d1 * d2 * d3`); the kind only changes how the three edges are labelled.
//!
//! ## Example
//!
//! ```rust
//! use mix_core::element::{Dimensions, StructureKind};
//!
//! let dims = Dimensions::new(10.0, 5.0, 0.2);
//! assert_eq!(dims.spec_string(), "10.0x5.0x0.2");
//! assert_eq!(StructureKind::Wall.dimension_labels()[1], "wall height (m)");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{CubicMeters, Meters};

/// Kind of structural element being poured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// Horizontal element: length x width x thickness
    Slab,
    /// Vertical element: length x height x thickness
    Wall,
}

impl StructureKind {
    /// Parse from common string representations (case-insensitive)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "slab" | "s" => Ok(StructureKind::Slab),
            "wall" | "w" => Ok(StructureKind::Wall),
            _ => Err(CalcError::invalid_input(
                "kind",
                s,
                "Structure kind must be 'slab' or 'wall'",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            StructureKind::Slab => "Slab",
            StructureKind::Wall => "Wall",
        }
    }

    /// Input labels for the three dimensions, in entry order
    pub fn dimension_labels(&self) -> [&'static str; 3] {
        match self {
            StructureKind::Slab => ["length (m)", "width (m)", "thickness (m)"],
            StructureKind::Wall => ["wall length (m)", "wall height (m)", "wall thickness (m)"],
        }
    }
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The three edge lengths of a rectangular pour, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub d1: Meters,
    pub d2: Meters,
    pub d3: Meters,
}

impl Dimensions {
    pub fn new(d1: f64, d2: f64, d3: f64) -> Self {
        Dimensions {
            d1: Meters(d1),
            d2: Meters(d2),
            d3: Meters(d3),
        }
    }

    /// Validate that every edge is strictly positive and finite.
    ///
    /// The error names the first offending edge using the kind's label.
    pub fn validate(&self, kind: StructureKind) -> CalcResult<()> {
        let labels = kind.dimension_labels();
        for (value, label) in [self.d1, self.d2, self.d3].iter().zip(labels) {
            // `!(x > 0)` also catches NaN
            if !(value.0 > 0.0) || !value.0.is_finite() {
                return Err(CalcError::invalid_input(
                    label,
                    value.0.to_string(),
                    "All dimensions must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Unrounded volume d1 * d2 * d3
    pub fn volume(&self) -> CubicMeters {
        self.d1.cube_with(self.d2, self.d3)
    }

    /// Dimension string as shown in the items table, e.g. `"10.0x5.0x0.2"`.
    pub fn spec_string(&self) -> String {
        // Debug formatting keeps a trailing ".0" on whole numbers
        format!("{:?}x{:?}x{:?}", self.d1.0, self.d2.0, self.d3.0)
    }
}
