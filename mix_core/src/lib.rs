//! # mix_core - Ready-Mix Concrete Quantity Engine
//!
//! `mix_core` is the computational heart of Readymix: it collects slab and
//! wall pours, totals their volume, applies a loss allowance and works out
//! how many ready-mix trucks to order. All inputs and outputs are
//! JSON-serializable so any front end can drive it.
//!
//! ## Design Philosophy
//!
//! - **Explicit state**: one [`Session`] value owned by the front end, no globals
//! - **Pure math**: the aggregate is recomputed from scratch on every request
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use mix_core::element::StructureKind;
//! use mix_core::report::format_summary;
//! use mix_core::session::Session;
//!
//! let mut session = Session::new();
//! session.add_item(StructureKind::Slab, "1F slab", 10.0, 5.0, 0.2).unwrap();
//! session.add_item(StructureKind::Wall, "", 10.0, 2.5, 0.2).unwrap();
//!
//! let summary = session.summary().unwrap();
//! assert_eq!(summary.trucks_needed, 3);
//! println!("{}", format_summary(&summary));
//! ```
//!
//! ## Modules
//!
//! - [`element`] - Slab/wall kinds and dimensions
//! - [`accumulator`] - Ordered entry list
//! - [`aggregate`] - Loss allowance and truck allocation
//! - [`session`] - Session state and calculator settings
//! - [`report`] - Text and JSON output
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod accumulator;
pub mod aggregate;
pub mod element;
pub mod errors;
pub mod report;
pub mod session;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use accumulator::{EntryAccumulator, LineItem};
pub use aggregate::AggregateResult;
pub use element::{Dimensions, StructureKind};
pub use errors::{CalcError, CalcResult};
pub use session::{EstimateSettings, Session};
