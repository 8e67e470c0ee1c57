//! Precision constants shared by the primitives and the sweep.
//!
//! Policy
//! - Fixed constants, not knobs. The 6-decimal rounding feeds every turn test
//!   against π, so changing it changes which pivots are emitted.

/// Fractional digits kept after every derived coordinate or angle.
pub const DECIMALS: u32 = 6;
/// `10^DECIMALS`, the rounding scale.
pub(crate) const SCALE: f64 = 10u64.pow(DECIMALS) as f64;
/// Determinant magnitude at or below which two lines count as parallel.
pub const EPS_DET: f64 = 1e-12;
/// Slack allowed when the closing endpoint interval is (numerically) inverted.
pub const CLOSING_SLACK: f64 = 1e-6;
