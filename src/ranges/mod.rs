//! Clinical reference ranges
//! Static per-biomarker thresholds with severity tiers and rule weights

pub mod table;
pub mod types;

pub use table::ReferenceRangeTable;
pub use types::{Bound, Boundary, Classification, ReferenceRange, Tier, MAX_WEIGHT};
