// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit behavior settings and tuning constants.
//!
//! These values stay fixed for the lifetime of the process. Gesture-level
//! state (modifier keys, deltas) is passed to the behaviors directly.

// ============================================================================
// GEOMETRY SETTINGS
// ============================================================================
/// Cross products below this magnitude count as parallel lines
const PARALLEL_EPSILON: f64 = 1e-9;

/// Reference distances below this are treated as degenerate (no chord)
const MIN_REFERENCE_DISTANCE: f64 = 0.0001;

// ============================================================================
// CONSTRAIN (SHIFT) SETTINGS
// ============================================================================
// A constrained vector snaps to 0, 45 or 90 degrees. The diagonal band is
// bounded by tan(22.5°) and tan(67.5°).

/// Lower slope bound of the diagonal snap band
const DIAGONAL_TAN_MIN: f64 = 0.414;

/// Upper slope bound of the diagonal snap band
const DIAGONAL_TAN_MAX: f64 = 2.414;

/// Horizontal components below this are treated as purely vertical
const VERTICAL_EPSILON: f64 = 0.001;

// ============================================================================
// RIB (STROKE WIDTH) SETTINGS
// ============================================================================
/// Minimum half-width for a regular two-sided rib
const RIB_MIN_HALF_WIDTH: f64 = 1.0;

/// Minimum width for a single-sided contour (total width on one side)
const RIB_SINGLE_SIDED_MIN_WIDTH: f64 = 2.0;

/// Stroke width used when neither the point nor the contour records one
const RIB_DEFAULT_WIDTH: f64 = 20.0;

// ============================================================================
// TUNNI SETTINGS
// ============================================================================
/// Two tensions closer than this are considered equalized
const TUNNI_EQUALIZED_TOLERANCE: f64 = 1e-2;

// ============================================================================
// OUTPUT SETTINGS
// ============================================================================
/// Grid unit that emitted coordinates are rounded to
const OUTPUT_GRID: f64 = 1.0;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Numeric thresholds for geometric constructions
pub mod geometry {
    /// Cross products below this magnitude count as parallel lines
    pub const PARALLEL_EPSILON: f64 = super::PARALLEL_EPSILON;

    /// Reference distances below this are treated as degenerate
    pub const MIN_REFERENCE_DISTANCE: f64 = super::MIN_REFERENCE_DISTANCE;
}

/// Shift-constrain snapping (0, 45 and 90 degrees)
pub mod constrain {
    pub const DIAGONAL_TAN_MIN: f64 = super::DIAGONAL_TAN_MIN;
    pub const DIAGONAL_TAN_MAX: f64 = super::DIAGONAL_TAN_MAX;
    pub const VERTICAL_EPSILON: f64 = super::VERTICAL_EPSILON;
}

/// Rib (stroke width) limits
pub mod rib {
    /// Floor for a regular half-width
    pub const MIN_HALF_WIDTH: f64 = super::RIB_MIN_HALF_WIDTH;

    /// Floor for the total width of a single-sided contour
    pub const SINGLE_SIDED_MIN_WIDTH: f64 = super::RIB_SINGLE_SIDED_MIN_WIDTH;

    /// Fallback stroke width
    pub const DEFAULT_WIDTH: f64 = super::RIB_DEFAULT_WIDTH;
}

/// Tunni point tension settings
pub mod tunni {
    /// Canonical tolerance for the "already equalized" test
    pub const EQUALIZED_TOLERANCE: f64 = super::TUNNI_EQUALIZED_TOLERANCE;
}

/// Emitted point updates
pub mod output {
    /// Grid unit for rounding emitted coordinates
    pub const GRID: f64 = super::OUTPUT_GRID;
}
