// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Points in an editable contour

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Which kind of Bézier segment an off-curve handle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    Cubic,
    Quadratic,
}

/// The role a point plays in its contour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointType {
    /// A point on the outline. `smooth` only has meaning when the point
    /// sits between two neighbors that define a tangent.
    OnCurve { smooth: bool },
    /// A Bézier control point
    OffCurve { kind: HandleKind },
}

/// A single point in a contour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub point: Point,
    pub typ: PointType,
}

impl PathPoint {
    pub fn on_curve(x: f64, y: f64, smooth: bool) -> Self {
        Self {
            point: Point::new(x, y),
            typ: PointType::OnCurve { smooth },
        }
    }

    pub fn corner(x: f64, y: f64) -> Self {
        Self::on_curve(x, y, false)
    }

    pub fn smooth(x: f64, y: f64) -> Self {
        Self::on_curve(x, y, true)
    }

    pub fn off_curve(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            typ: PointType::OffCurve {
                kind: HandleKind::Cubic,
            },
        }
    }

    pub fn quad_off_curve(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            typ: PointType::OffCurve {
                kind: HandleKind::Quadratic,
            },
        }
    }

    pub fn is_on_curve(&self) -> bool {
        matches!(self.typ, PointType::OnCurve { .. })
    }

    pub fn is_off_curve(&self) -> bool {
        matches!(self.typ, PointType::OffCurve { .. })
    }

    /// Smooth flag of an on-curve point; always false for handles
    pub fn is_smooth(&self) -> bool {
        matches!(self.typ, PointType::OnCurve { smooth: true })
    }
}
