//! # Shared Data Structures
//!
//! Plain value types shared between the `mapscope` library, its CLI, and
//! anything that consumes exported snapshots. Enable the `serde` feature to
//! get `Serialize`/`Deserialize` on every type.
//!
//! ## Key Types
//!
//! - [`CoordinatePair`] - A point `(x, y)` in some spatial reference system
//! - [`PerformanceSnapshot`] - One sample of frame rate, memory and layer count

// ============================================================================
// Coordinates
// ============================================================================

/// A point in some spatial reference system.
///
/// For geographic systems `x` is longitude and `y` is latitude, both in
/// degrees. For projected systems both are in the system's linear unit
/// (usually metres). The type carries no reference system of its own; bounds
/// are checked separately.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinatePair {
    pub x: f64,
    pub y: f64,
}

impl CoordinatePair {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components are finite (not NaN, not infinite).
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for CoordinatePair {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for CoordinatePair {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<CoordinatePair> for (f64, f64) {
    fn from(p: CoordinatePair) -> Self {
        (p.x, p.y)
    }
}

impl From<CoordinatePair> for [f64; 2] {
    fn from(p: CoordinatePair) -> Self {
        [p.x, p.y]
    }
}

// ============================================================================
// Performance Metrics
// ============================================================================

/// One published sample of render performance.
///
/// Produced once per sampling window and superseded (never merged) by the
/// next one. [`Default`] is the zeroed snapshot returned before the first
/// window completes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceSnapshot {
    /// Frames counted in the window, scaled to one second and rounded
    pub frames_per_second: u32,
    /// Resident memory in MiB, rounded to a whole number
    pub memory_megabytes: f64,
    /// Layers reported by the map at the end of the window
    pub layer_count: usize,
}

impl PerformanceSnapshot {
    /// True for the zeroed snapshot, i.e. nothing has been sampled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
