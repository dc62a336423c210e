//! # Session State
//!
//! The `Session` is the single owner of everything a user builds up while
//! estimating: the entry list and the two calculator parameters. It lives in
//! memory only and is dropped when the front end exits.
//!
//! ## Structure
//!
//! ```text
//! Session
//! ├── meta: SessionMetadata (id, timestamps)
//! ├── settings: EstimateSettings (loss rate, truck capacity)
//! └── entries: EntryAccumulator (ordered pour entries)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mix_core::element::StructureKind;
//! use mix_core::session::Session;
//!
//! let mut session = Session::new();
//! session.add_item(StructureKind::Slab, "1F slab", 10.0, 6.0, 0.2).unwrap();
//!
//! let summary = session.summary().unwrap();
//! assert_eq!(summary.trucks_needed, 3);
//!
//! session.reset();
//! assert!(session.entries.is_empty());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::accumulator::{EntryAccumulator, LineItem};
use crate::aggregate::{self, AggregateResult};
use crate::element::StructureKind;
use crate::errors::{CalcError, CalcResult};

/// Default loss allowance in percent
pub const DEFAULT_LOSS_RATE_PERCENT: u8 = 3;

/// Largest accepted loss allowance in percent
pub const MAX_LOSS_RATE_PERCENT: u8 = 15;

/// Default truck capacity in m³ (a standard 6 m³ mixer)
pub const DEFAULT_TRUCK_CAPACITY_M3: f64 = 6.0;

/// Root session container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub meta: SessionMetadata,

    pub settings: EstimateSettings,

    pub entries: EntryAccumulator,
}

impl Session {
    /// Start an empty session with default settings.
    pub fn new() -> Self {
        Self::with_settings(EstimateSettings::default())
    }

    /// Start an empty session with the given settings.
    pub fn with_settings(settings: EstimateSettings) -> Self {
        let now = Utc::now();
        let session = Session {
            meta: SessionMetadata {
                id: Uuid::new_v4(),
                created: now,
                modified: now,
            },
            settings,
            entries: EntryAccumulator::new(),
        };
        info!(
            session = %session.meta.id,
            loss_rate_percent = session.settings.loss_rate_percent,
            truck_capacity_m3 = session.settings.truck_capacity_m3,
            "session started"
        );
        session
    }

    /// Add a pour entry (the "Add" command).
    ///
    /// On error nothing changes, including the modified timestamp.
    pub fn add_item(
        &mut self,
        kind: StructureKind,
        label: &str,
        d1: f64,
        d2: f64,
        d3: f64,
    ) -> CalcResult<LineItem> {
        let item = self.entries.append(kind, label, d1, d2, d3)?;
        self.touch();
        Ok(item)
    }

    /// Clear every entry (the "Reset" command). Settings are kept.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.touch();
        info!(session = %self.meta.id, "session reset");
    }

    /// Change the loss allowance. Out-of-range values leave it unchanged.
    pub fn set_loss_rate(&mut self, percent: i64) -> CalcResult<()> {
        self.settings.set_loss_rate(percent)?;
        self.touch();
        Ok(())
    }

    /// Change the truck capacity. Non-positive values leave it unchanged.
    pub fn set_truck_capacity(&mut self, capacity_m3: f64) -> CalcResult<()> {
        self.settings.set_truck_capacity(capacity_m3)?;
        self.touch();
        Ok(())
    }

    /// Recompute the order quantity from the current state.
    pub fn summary(&self) -> CalcResult<AggregateResult> {
        let result = aggregate::calculate(
            self.entries.items(),
            self.settings.loss_rate_percent,
            self.settings.truck_capacity_m3,
        )?;
        debug!(
            final_volume_m3 = result.final_volume_m3,
            trucks_needed = result.trucks_needed,
            "summary recomputed"
        );
        Ok(result)
    }

    /// Update the modified timestamp.
    fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

/// Session identity and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub id: Uuid,

    /// When the session was started
    pub created: DateTime<Utc>,

    /// When the session was last changed
    pub modified: DateTime<Utc>,
}

/// Calculator parameters chosen by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSettings {
    /// Loss allowance, 0..=15 percent
    pub loss_rate_percent: u8,

    /// Truck capacity in m³, strictly positive
    pub truck_capacity_m3: f64,
}

impl EstimateSettings {
    /// Build validated settings.
    pub fn new(loss_rate_percent: u8, truck_capacity_m3: f64) -> CalcResult<Self> {
        let mut settings = EstimateSettings::default();
        settings.set_loss_rate(loss_rate_percent.into())?;
        settings.set_truck_capacity(truck_capacity_m3)?;
        Ok(settings)
    }

    /// Accepts any integer so out-of-range input gets the range error.
    pub fn set_loss_rate(&mut self, percent: i64) -> CalcResult<()> {
        let Some(valid) = u8::try_from(percent)
            .ok()
            .filter(|p| *p <= MAX_LOSS_RATE_PERCENT)
        else {
            return Err(CalcError::invalid_input(
                "loss_rate_percent",
                percent.to_string(),
                format!("Loss rate must be between 0 and {MAX_LOSS_RATE_PERCENT}%"),
            ));
        };
        self.loss_rate_percent = valid;
        Ok(())
    }

    pub fn set_truck_capacity(&mut self, capacity_m3: f64) -> CalcResult<()> {
        if !(capacity_m3 > 0.0) || !capacity_m3.is_finite() {
            return Err(CalcError::invalid_input(
                "truck_capacity_m3",
                capacity_m3.to_string(),
                "Truck capacity must be positive",
            ));
        }
        self.truck_capacity_m3 = capacity_m3;
        Ok(())
    }
}

impl Default for EstimateSettings {
    fn default() -> Self {
        EstimateSettings {
            loss_rate_percent: DEFAULT_LOSS_RATE_PERCENT,
            truck_capacity_m3: DEFAULT_TRUCK_CAPACITY_M3,
        }
    }
}
