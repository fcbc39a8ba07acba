// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Skeleton (centerline) data model.
//!
//! A skeleton contour is a centerline plus per-point stroke widths. The
//! outline is generated from it by an external stage; this module only
//! stores the data, applies edits in place and computes each point's local
//! tangent/normal frame.

pub mod edit;
pub mod rib;

pub use edit::{SkeletonEditBehavior, SkeletonPointPosition, SkeletonPointUpdate};
pub use rib::{RibBehavior, RibMode, RibSnapshot, RibUpdate, rib_point_position};

use crate::geom;
use crate::path::{Contour, PathPoint, PointType};
use crate::settings;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Which side of the centerline a rib sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RibSide {
    Left,
    Right,
}

/// Address of a point in a skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkeletonPointRef {
    pub contour_index: usize,
    pub point_index: usize,
}

impl SkeletonPointRef {
    pub fn new(contour_index: usize, point_index: usize) -> Self {
        Self {
            contour_index,
            point_index,
        }
    }
}

/// A centerline point with its stroke-width data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonPoint {
    pub point: Point,
    pub typ: PointType,
    /// Total stroke width when both sides are equal
    pub width: Option<f64>,
    /// Independent half-widths; either one present makes the point asymmetric
    pub left_width: Option<f64>,
    pub right_width: Option<f64>,
    /// Tangential offsets of the rib points
    pub left_nudge: Option<f64>,
    pub right_nudge: Option<f64>,
    pub left_editable: bool,
    pub right_editable: bool,
    /// Incoming handle, as an offset from `point`
    pub handle_in: Option<Vec2>,
    /// Outgoing handle, as an offset from `point`
    pub handle_out: Option<Vec2>,
}

impl SkeletonPoint {
    pub fn new(point: Point, typ: PointType) -> Self {
        Self {
            point,
            typ,
            width: None,
            left_width: None,
            right_width: None,
            left_nudge: None,
            right_nudge: None,
            left_editable: false,
            right_editable: false,
            handle_in: None,
            handle_out: None,
        }
    }

    pub fn corner(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), PointType::OnCurve { smooth: false })
    }

    pub fn smooth(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), PointType::OnCurve { smooth: true })
    }

    pub fn off_curve(x: f64, y: f64) -> Self {
        PathPoint::off_curve(x, y).into()
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn is_on_curve(&self) -> bool {
        matches!(self.typ, PointType::OnCurve { .. })
    }

    pub fn is_asymmetric(&self) -> bool {
        self.left_width.is_some() || self.right_width.is_some()
    }

    pub fn is_editable(&self, side: RibSide) -> bool {
        match side {
            RibSide::Left => self.left_editable,
            RibSide::Right => self.right_editable,
        }
    }

    /// Total width, falling back to the contour default
    pub fn total_width(&self, default_width: f64) -> f64 {
        self.width.unwrap_or(default_width)
    }

    /// Distance from the centerline to the rib point on `side`
    pub fn half_width(&self, side: RibSide, default_width: f64) -> f64 {
        let explicit = match side {
            RibSide::Left => self.left_width,
            RibSide::Right => self.right_width,
        };
        explicit.unwrap_or(self.total_width(default_width) / 2.0)
    }

    pub fn nudge(&self, side: RibSide) -> f64 {
        match side {
            RibSide::Left => self.left_nudge,
            RibSide::Right => self.right_nudge,
        }
        .unwrap_or(0.0)
    }

    fn side_width_mut(&mut self, side: RibSide) -> &mut Option<f64> {
        match side {
            RibSide::Left => &mut self.left_width,
            RibSide::Right => &mut self.right_width,
        }
    }

    fn side_nudge_mut(&mut self, side: RibSide) -> &mut Option<f64> {
        match side {
            RibSide::Left => &mut self.left_nudge,
            RibSide::Right => &mut self.right_nudge,
        }
    }

    pub fn to_path_point(&self) -> PathPoint {
        PathPoint {
            point: self.point,
            typ: self.typ,
        }
    }
}

impl From<PathPoint> for SkeletonPoint {
    fn from(p: PathPoint) -> Self {
        SkeletonPoint::new(p.point, p.typ)
    }
}

/// Tangent and left normal at a skeleton point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub tangent: Vec2,
    pub left: Vec2,
}

impl LocalFrame {
    pub fn from_tangent(tangent: Vec2) -> Self {
        Self {
            tangent,
            left: geom::rotate90_ccw(tangent),
        }
    }

    pub fn normal(&self, side: RibSide) -> Vec2 {
        match side {
            RibSide::Left => self.left,
            RibSide::Right => -self.left,
        }
    }
}

/// One centerline contour
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonContour {
    pub points: Vec<SkeletonPoint>,
    pub closed: bool,
    /// Width used by points that do not record one
    pub default_width: f64,
    /// Set when the stroke only extends to one side of the centerline
    pub single_sided: Option<RibSide>,
}

impl SkeletonContour {
    pub fn new(points: Vec<SkeletonPoint>, closed: bool) -> Self {
        Self {
            points,
            closed,
            default_width: settings::rib::DEFAULT_WIDTH,
            single_sided: None,
        }
    }

    /// The centerline as a plain contour, for the edit behaviors
    pub fn to_contour(&self) -> Contour {
        Contour::new(
            self.points.iter().map(SkeletonPoint::to_path_point).collect(),
            self.closed,
        )
    }

    /// Tangent frame at `index`
    ///
    /// The tangent is the normalized sum of the unit incoming and outgoing
    /// directions. Recorded handles take precedence over neighbor points.
    /// Returns `None` when no direction is defined.
    pub fn local_frame(&self, index: usize) -> Option<LocalFrame> {
        let point = self.points.get(index)?;
        let len = self.points.len();
        let neighbor = |offset: isize| -> Option<Point> {
            let target = index as isize + offset;
            let i = if self.closed {
                target.rem_euclid(len as isize) as usize
            } else if (0..len as isize).contains(&target) {
                target as usize
            } else {
                return None;
            };
            (i != index).then(|| self.points[i].point)
        };

        let incoming = point
            .handle_in
            .map(|h| -h)
            .or_else(|| neighbor(-1).map(|prev| point.point - prev))
            .map(geom::normalize)
            .filter(|v| *v != Vec2::ZERO);
        let outgoing = point
            .handle_out
            .or_else(|| neighbor(1).map(|next| next - point.point))
            .map(geom::normalize)
            .filter(|v| *v != Vec2::ZERO);

        let tangent = match (incoming, outgoing) {
            (Some(a), Some(b)) => {
                let sum = geom::normalize(a + b);
                // Cusp: fall back to the outgoing direction
                if sum == Vec2::ZERO { b } else { sum }
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => return None,
        };
        Some(LocalFrame::from_tangent(tangent))
    }
}

/// All skeleton contours of a glyph layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    pub contours: Vec<SkeletonContour>,
}

impl Skeleton {
    pub fn new(contours: Vec<SkeletonContour>) -> Self {
        Self { contours }
    }

    pub fn point(&self, at: SkeletonPointRef) -> Option<&SkeletonPoint> {
        self.contours.get(at.contour_index)?.points.get(at.point_index)
    }

    fn point_mut(&mut self, contour_index: usize, point_index: usize) -> Option<&mut SkeletonPoint> {
        self.contours.get_mut(contour_index)?.points.get_mut(point_index)
    }

    /// Write centerline position updates in place
    ///
    /// Updates addressing missing points are skipped.
    pub fn apply_point_updates(&mut self, updates: &[SkeletonPointUpdate]) {
        for u in updates {
            match self.point_mut(u.contour_index, u.point_index) {
                Some(p) => p.point = Point::new(u.x as f64, u.y as f64),
                None => tracing::warn!(
                    "Skipping update for unknown skeleton point {}:{}",
                    u.contour_index,
                    u.point_index
                ),
            }
        }
    }

    /// Restore positions captured by a skeleton edit's rollback
    pub fn apply_rollback(&mut self, positions: &[SkeletonPointPosition]) {
        for pos in positions {
            if let Some(p) = self.point_mut(pos.contour_index, pos.point_index) {
                p.point = Point::new(pos.x, pos.y);
            }
        }
    }

    /// Write a rib edit into the point's width data
    ///
    /// Returns `false` if the addressed point does not exist.
    pub fn apply_rib_update(&mut self, update: &RibUpdate) -> bool {
        let Some(contour) = self.contours.get_mut(update.contour_index) else {
            return false;
        };
        let single_sided = contour.single_sided.is_some();
        let default_width = contour.default_width;
        let Some(point) = contour.points.get_mut(update.point_index) else {
            return false;
        };

        if single_sided {
            point.width = Some(update.half_width);
        } else if update.is_asymmetric {
            let other = match update.side {
                RibSide::Left => RibSide::Right,
                RibSide::Right => RibSide::Left,
            };
            let other_width = point.half_width(other, default_width);
            *point.side_width_mut(other) = Some(other_width);
            *point.side_width_mut(update.side) = Some(update.half_width);
        } else {
            point.width = Some(update.half_width * 2.0);
            point.left_width = None;
            point.right_width = None;
        }
        if let Some(nudge) = update.nudge {
            *point.side_nudge_mut(update.side) = Some(nudge);
        }
        true
    }

    /// Put back the width data captured at the start of a rib drag
    ///
    /// Returns `false` if the addressed point does not exist.
    pub fn restore_rib(&mut self, snapshot: &RibSnapshot) -> bool {
        let Some(point) = self.point_mut(snapshot.contour_index, snapshot.point_index) else {
            tracing::warn!(
                "Skipping rib rollback for unknown skeleton point {}:{}",
                snapshot.contour_index,
                snapshot.point_index
            );
            return false;
        };
        point.width = snapshot.width;
        point.left_width = snapshot.left_width;
        point.right_width = snapshot.right_width;
        point.left_nudge = snapshot.left_nudge;
        point.right_nudge = snapshot.right_nudge;
        true
    }
}
