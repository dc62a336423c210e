//! # Entry Accumulator
//!
//! Ordered list of pour entries for the current session. Entries are only
//! ever appended or cleared all at once; there is no edit or single-item
//! removal.
//!
//! ## Example
//!
//! ```rust
//! use mix_core::accumulator::EntryAccumulator;
//! use mix_core::element::StructureKind;
//!
//! let mut entries = EntryAccumulator::new();
//! let item = entries.append(StructureKind::Slab, "", 10.0, 5.0, 0.2).unwrap();
//! assert_eq!(item.label, "Slab-1");
//! assert_eq!(item.volume_m3, 10.0);
//!
//! // Non-positive dimensions are rejected and nothing is stored
//! assert!(entries.append(StructureKind::Wall, "W1", 3.0, 0.0, 0.2).is_err());
//! assert_eq!(entries.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::element::{Dimensions, StructureKind};
use crate::errors::{CalcError, CalcResult};
use crate::units::CubicMeters;

/// One accumulated pour entry.
///
/// `volume_m3` is rounded to two decimals when the item is created and
/// never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable identity for front ends
    pub id: Uuid,

    /// User label, or `"{kind}-{n}"` when left blank
    pub label: String,

    pub kind: StructureKind,

    pub dimensions: Dimensions,

    /// d1 * d2 * d3 rounded to 0.01 m³
    pub volume_m3: f64,
}

impl LineItem {
    /// Validate the dimensions and build an item.
    ///
    /// `label` must already be resolved; see [`EntryAccumulator::append`].
    fn new(kind: StructureKind, label: String, dimensions: Dimensions) -> CalcResult<Self> {
        dimensions.validate(kind)?;
        let volume = dimensions.volume();
        if !volume.value().is_finite() {
            return Err(CalcError::invalid_input(
                "volume_m3",
                volume.value().to_string(),
                "Dimensions are too large",
            ));
        }
        Ok(LineItem {
            id: Uuid::new_v4(),
            label,
            kind,
            dimensions,
            volume_m3: volume.rounded().value(),
        })
    }

    pub fn volume(&self) -> CubicMeters {
        CubicMeters(self.volume_m3)
    }
}

/// Insertion-ordered container of [`LineItem`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryAccumulator {
    items: Vec<LineItem>,
}

impl EntryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a new entry.
    ///
    /// # Returns
    ///
    /// * `Ok(LineItem)` - A copy of the stored entry
    /// * `Err(CalcError::InvalidInput)` - A dimension was zero, negative or
    ///   not finite, or their product overflows; the accumulator is unchanged
    pub fn append(
        &mut self,
        kind: StructureKind,
        label: &str,
        d1: f64,
        d2: f64,
        d3: f64,
    ) -> CalcResult<LineItem> {
        let label = match label.trim() {
            "" => format!("{}-{}", kind.display_name(), self.items.len() + 1),
            given => given.to_string(),
        };

        let item = LineItem::new(kind, label, Dimensions::new(d1, d2, d3))?;
        debug!(
            label = %item.label,
            kind = %item.kind,
            volume_m3 = item.volume_m3,
            "entry appended"
        );
        self.items.push(item.clone());
        Ok(item)
    }

    /// Remove every entry. Never fails.
    pub fn clear(&mut self) {
        debug!(count = self.items.len(), "entries cleared");
        self.items.clear();
    }

    /// Entries in insertion order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the (already rounded) entry volumes
    pub fn total_volume(&self) -> CubicMeters {
        self.items.iter().map(LineItem::volume).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_computes_rounded_volume() {
        let mut entries = EntryAccumulator::new();
        let item = entries
            .append(StructureKind::Slab, "1F floor", 7.3, 4.1, 0.18)
            .unwrap();
        // 7.3 * 4.1 * 0.18 = 5.3874
        assert_eq!(item.volume_m3, 5.39);
        assert_eq!(item.label, "1F floor");
        assert_eq!(entries.items()[0], item);
    }

    #[test]
    fn test_volume_ties_round_half_to_even() {
        let mut entries = EntryAccumulator::new();
        // 0.125 and 0.625 are exact binary halves
        let a = entries.append(StructureKind::Slab, "", 0.5, 0.5, 0.5).unwrap();
        let b = entries.append(StructureKind::Wall, "", 2.5, 0.5, 0.5).unwrap();
        let c = entries.append(StructureKind::Slab, "", 1.5, 0.5, 0.5).unwrap();
        assert_eq!(a.volume_m3, 0.12);
        assert_eq!(b.volume_m3, 0.62);
        assert_eq!(c.volume_m3, 0.38);
    }

    #[test]
    fn test_append_rejects_overflowing_volume() {
        let mut entries = EntryAccumulator::new();
        let err = entries
            .append(StructureKind::Slab, "", 1e200, 1e200, 1e200)
            .unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "volume_m3"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(entries.is_empty());
    }

    #[test]
    fn test_append_rejects_non_positive_dimensions() {
        let mut entries = EntryAccumulator::new();
        entries.append(StructureKind::Slab, "", 1.0, 1.0, 1.0).unwrap();

        for (d1, d2, d3) in [(0.0, 1.0, 1.0), (1.0, -2.0, 1.0), (1.0, 1.0, 0.0)] {
            let err = entries.append(StructureKind::Wall, "bad", d1, d2, d3).unwrap_err();
            assert!(matches!(err, CalcError::InvalidInput { .. }));
            assert_eq!(entries.len(), 1);
        }
    }

    #[test]
    fn test_auto_label_uses_next_index() {
        let mut entries = EntryAccumulator::new();
        let a = entries.append(StructureKind::Slab, "", 1.0, 1.0, 1.0).unwrap();
        let b = entries.append(StructureKind::Wall, "Stair wall", 1.0, 1.0, 1.0).unwrap();
        let c = entries.append(StructureKind::Wall, "   ", 1.0, 1.0, 1.0).unwrap();
        assert_eq!(a.label, "Slab-1");
        assert_eq!(b.label, "Stair wall");
        assert_eq!(c.label, "Wall-3");
    }

    #[test]
    fn test_failed_append_does_not_consume_index() {
        let mut entries = EntryAccumulator::new();
        assert!(entries.append(StructureKind::Slab, "", 0.0, 1.0, 1.0).is_err());
        let item = entries.append(StructureKind::Slab, "", 1.0, 1.0, 1.0).unwrap();
        assert_eq!(item.label, "Slab-1");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut entries = EntryAccumulator::new();
        for label in ["c", "a", "b", "a"] {
            entries.append(StructureKind::Slab, label, 1.0, 1.0, 1.0).unwrap();
        }
        let labels: Vec<_> = entries.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["c", "a", "b", "a"]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut entries = EntryAccumulator::new();
        entries.append(StructureKind::Slab, "", 2.0, 2.0, 2.0).unwrap();
        entries.clear();
        assert!(entries.is_empty());
        entries.clear();
        assert!(entries.is_empty());

        // Auto labels restart after a clear
        let item = entries.append(StructureKind::Wall, "", 1.0, 1.0, 1.0).unwrap();
        assert_eq!(item.label, "Wall-1");
    }

    #[test]
    fn test_total_volume() {
        let mut entries = EntryAccumulator::new();
        assert_eq!(entries.total_volume().value(), 0.0);
        entries.append(StructureKind::Slab, "", 10.0, 5.0, 0.2).unwrap();
        entries.append(StructureKind::Wall, "", 10.0, 2.5, 0.2).unwrap();
        assert!((entries.total_volume().value() - 15.0).abs() < 1e-9);
    }
}
