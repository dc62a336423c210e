//! # Aggregate Calculator
//!
//! Turns the accumulated entries into an order quantity: theoretical total,
//! total with the loss allowance applied, and how many ready-mix trucks are
//! needed to deliver it.
//!
//! ## Assumptions
//!
//! - Item volumes are already rounded to 0.01 m³; nothing here rounds again.
//!   Display code rounds to two decimals when printing.
//! - The last truck is never reported as empty: when the final volume is an
//!   exact multiple of the capacity, the last truck carries a full load.
//!
//! ## Example
//!
//! ```rust
//! use mix_core::accumulator::EntryAccumulator;
//! use mix_core::aggregate::calculate;
//! use mix_core::element::StructureKind;
//!
//! let mut entries = EntryAccumulator::new();
//! entries.append(StructureKind::Slab, "", 10.0, 1.0, 1.0).unwrap();
//! entries.append(StructureKind::Wall, "", 5.0, 1.0, 1.0).unwrap();
//!
//! let result = calculate(entries.items(), 3, 6.0).unwrap();
//! assert_eq!(result.trucks_needed, 3);
//! assert!((result.final_volume_m3 - 15.45).abs() < 1e-9);
//! assert!((result.last_truck_volume_m3 - 3.45).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::accumulator::LineItem;
use crate::errors::{CalcError, CalcResult};
use crate::units::CubicMeters;

/// Order quantity derived from the current entries.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_theoretical_m3": 15.0,
///   "loss_rate_percent": 3,
///   "final_volume_m3": 15.45,
///   "truck_capacity_m3": 6.0,
///   "trucks_needed": 3,
///   "last_truck_volume_m3": 3.45
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Sum of entry volumes before the loss allowance
    pub total_theoretical_m3: f64,

    /// Loss allowance applied, in percent
    pub loss_rate_percent: u8,

    /// total_theoretical * (1 + loss / 100)
    pub final_volume_m3: f64,

    /// Truck capacity used for the allocation
    pub truck_capacity_m3: f64,

    /// ceil(final_volume / capacity), 0 when nothing is ordered
    pub trucks_needed: u64,

    /// Load carried by the last truck
    pub last_truck_volume_m3: f64,
}

impl AggregateResult {
    /// Volume added on top of the theoretical total by the loss allowance
    pub fn loss_allowance_m3(&self) -> f64 {
        self.final_volume_m3 - self.total_theoretical_m3
    }
}

/// Compute the order quantity for a set of entries.
///
/// # Arguments
///
/// * `items` - Accumulated entries (order does not matter)
/// * `loss_rate_percent` - Waste allowance in percent
/// * `truck_capacity_m3` - Volume one truck carries per trip
///
/// # Returns
///
/// * `Ok(AggregateResult)` - The allocation
/// * `Err(CalcError::InvalidInput)` - Capacity is zero, negative or not finite,
///   or the volume is too large to allocate
pub fn calculate(
    items: &[LineItem],
    loss_rate_percent: u8,
    truck_capacity_m3: f64,
) -> CalcResult<AggregateResult> {
    if !(truck_capacity_m3 > 0.0) || !truck_capacity_m3.is_finite() {
        return Err(CalcError::invalid_input(
            "truck_capacity_m3",
            truck_capacity_m3.to_string(),
            "Truck capacity must be positive",
        ));
    }

    let total: CubicMeters = items.iter().map(LineItem::volume).sum();
    let final_volume = total * (1.0 + f64::from(loss_rate_percent) / 100.0);
    if !final_volume.value().is_finite() {
        return Err(CalcError::invalid_input(
            "final_volume_m3",
            final_volume.value().to_string(),
            "Total volume is too large",
        ));
    }

    let (trucks_needed, last_truck_volume_m3) = allocate_trucks(final_volume.value(), truck_capacity_m3)?;

    Ok(AggregateResult {
        total_theoretical_m3: total.value(),
        loss_rate_percent,
        final_volume_m3: final_volume.value(),
        truck_capacity_m3,
        trucks_needed,
        last_truck_volume_m3,
    })
}

/// Split a volume into truck loads. Capacity must already be validated.
fn allocate_trucks(final_volume_m3: f64, truck_capacity_m3: f64) -> CalcResult<(u64, f64)> {
    if final_volume_m3 == 0.0 {
        return Ok((0, 0.0));
    }

    let trucks = (final_volume_m3 / truck_capacity_m3).ceil();
    // u64::MAX as f64 rounds up to 2^64, which no u64 can hold
    if trucks >= u64::MAX as f64 {
        return Err(CalcError::invalid_input(
            "final_volume_m3",
            final_volume_m3.to_string(),
            "Too many truck loads for this capacity",
        ));
    }
    let remainder = final_volume_m3 % truck_capacity_m3;
    let last = if remainder == 0.0 {
        truck_capacity_m3
    } else {
        remainder
    };
    Ok((trucks as u64, last))
}
