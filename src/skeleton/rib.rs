// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Rib (stroke width) dragging.
//!
//! A rib point sits at `point + normal * half_width + tangent * nudge` on
//! one side of a skeleton point. Dragging it turns the pointer delta into a
//! new half-width and/or nudge, depending on the point's structure and the
//! held modifiers. The behavior captures the original values once, so each
//! frame is computed from the same starting state.

use super::{LocalFrame, RibSide, Skeleton, SkeletonPoint, SkeletonPointRef};
use crate::editing::Modifiers;
use crate::geom;
use crate::settings;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Result of a rib drag, to be written back with `Skeleton::apply_rib_update`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RibUpdate {
    pub contour_index: usize,
    pub point_index: usize,
    pub side: RibSide,
    /// Half-width of `side`, or the total width on a single-sided contour
    pub half_width: f64,
    /// New nudge for `side`, if the mode changes it
    pub nudge: Option<f64>,
    pub is_asymmetric: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RibMode {
    /// Normal component of the drag sets the half-width
    Plain,
    /// Tangential component sets the nudge; asymmetric points also change
    /// their half-width
    Editable,
    /// Only one side exists, the width is the total stroke width
    SingleSided,
    /// Rib point slides along the chord between the two generated handles
    Interpolating { chord: (Point, Point) },
}

/// Stored width data of one skeleton point, captured when a rib drag
/// starts and written back with `Skeleton::restore_rib`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RibSnapshot {
    pub contour_index: usize,
    pub point_index: usize,
    pub width: Option<f64>,
    pub left_width: Option<f64>,
    pub right_width: Option<f64>,
    pub left_nudge: Option<f64>,
    pub right_nudge: Option<f64>,
}

impl RibSnapshot {
    pub fn capture(target: SkeletonPointRef, point: &SkeletonPoint) -> Self {
        Self {
            contour_index: target.contour_index,
            point_index: target.point_index,
            width: point.width,
            left_width: point.left_width,
            right_width: point.right_width,
            left_nudge: point.left_nudge,
            right_nudge: point.right_nudge,
        }
    }
}

/// Location of a rib point
pub fn rib_point_position(
    point: Point,
    frame: &LocalFrame,
    side: RibSide,
    half_width: f64,
    nudge: f64,
) -> Point {
    point + frame.normal(side) * half_width + frame.tangent * nudge
}

#[derive(Debug, Clone, PartialEq)]
pub struct RibBehavior {
    target: SkeletonPointRef,
    side: RibSide,
    mode: RibMode,
    frame: LocalFrame,
    single_sided: bool,
    floor: f64,
    original_width: f64,
    original_nudge: f64,
    asymmetric: bool,
    snapshot: RibSnapshot,
}

impl RibBehavior {
    /// Pick the mode for a rib drag and capture the starting state
    ///
    /// `chord` is the pair of generated handle points around the rib
    /// point; it is only used when `alt` is held. On a single-sided
    /// contour the drag acts on the contour's side whichever side was
    /// grabbed. Returns `None` if the point does not exist or has no
    /// defined tangent.
    pub fn for_point(
        skeleton: &Skeleton,
        target: SkeletonPointRef,
        side: RibSide,
        modifiers: Modifiers,
        chord: Option<(Point, Point)>,
    ) -> Option<Self> {
        let contour = skeleton.contours.get(target.contour_index)?;
        let point = contour.points.get(target.point_index)?;
        let frame = contour.local_frame(target.point_index)?;
        let single_sided = contour.single_sided.is_some();
        let side = contour.single_sided.unwrap_or(side);

        let mode = match chord {
            Some(chord) if modifiers.alt => RibMode::Interpolating { chord },
            _ if single_sided => RibMode::SingleSided,
            _ if point.is_editable(side) => RibMode::Editable,
            _ => RibMode::Plain,
        };
        let floor = if single_sided {
            settings::rib::SINGLE_SIDED_MIN_WIDTH
        } else {
            settings::rib::MIN_HALF_WIDTH
        };
        let original_width = if single_sided {
            point.total_width(contour.default_width)
        } else {
            point.half_width(side, contour.default_width)
        };
        tracing::debug!("Rib drag on {:?} {:?} in {:?} mode", target, side, mode);

        Some(Self {
            target,
            side,
            mode,
            frame,
            single_sided,
            floor,
            original_width,
            original_nudge: point.nudge(side),
            asymmetric: point.is_asymmetric(),
            snapshot: RibSnapshot::capture(target, point),
        })
    }

    pub fn mode(&self) -> RibMode {
        self.mode
    }

    pub fn frame(&self) -> LocalFrame {
        self.frame
    }

    fn update(&self, half_width: f64, nudge: Option<f64>, is_asymmetric: bool) -> RibUpdate {
        RibUpdate {
            contour_index: self.target.contour_index,
            point_index: self.target.point_index,
            side: self.side,
            half_width,
            nudge,
            is_asymmetric,
        }
    }

    fn clamp(&self, width: f64) -> f64 {
        width.max(self.floor)
    }

    /// New width data for a pointer delta measured from gesture start
    pub fn apply_delta(&self, delta: Vec2) -> RibUpdate {
        let normal = self.frame.normal(self.side);
        let tangent = self.frame.tangent;
        match self.mode {
            RibMode::Plain => {
                let width = self.clamp(self.original_width + delta.dot(normal));
                self.update(width, None, self.asymmetric)
            }
            RibMode::SingleSided => {
                let width = self.clamp(self.original_width + delta.dot(normal));
                self.update(width, None, false)
            }
            RibMode::Editable => {
                let nudge = self.original_nudge + delta.dot(tangent);
                if self.asymmetric {
                    let width = self.clamp(self.original_width + delta.dot(normal));
                    self.update(width, Some(nudge), true)
                } else {
                    self.update(self.original_width, Some(nudge), false)
                }
            }
            RibMode::Interpolating { chord } => {
                let along = geom::project(delta, chord.1 - chord.0);
                let width = self.clamp(self.original_width + along.dot(normal));
                if self.single_sided {
                    self.update(width, None, false)
                } else {
                    let nudge = self.original_nudge + along.dot(tangent);
                    self.update(width, Some(nudge), true)
                }
            }
        }
    }

    pub fn side(&self) -> RibSide {
        self.side
    }

    /// Width data as it was when the drag started
    pub fn rollback(&self) -> RibSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::{SkeletonContour, SkeletonPoint};
    use approx::assert_abs_diff_eq;

    fn skeleton() -> Skeleton {
        Skeleton::new(vec![SkeletonContour::new(
            vec![
                SkeletonPoint::corner(0.0, 0.0),
                SkeletonPoint::smooth(100.0, 0.0).with_width(20.0),
                SkeletonPoint::corner(200.0, 0.0),
            ],
            false,
        )])
    }

    const MIDDLE: SkeletonPointRef = SkeletonPointRef {
        contour_index: 0,
        point_index: 1,
    };

    fn behavior(skeleton: &Skeleton, side: RibSide) -> RibBehavior {
        RibBehavior::for_point(skeleton, MIDDLE, side, Modifiers::NONE, None).unwrap()
    }

    #[test]
    fn plain_drag_follows_normal() {
        let skeleton = skeleton();
        let left = behavior(&skeleton, RibSide::Left);
        assert_eq!(left.mode(), RibMode::Plain);
        assert_abs_diff_eq!(left.apply_delta(Vec2::new(30.0, 5.0)).half_width, 15.0);
        assert_eq!(left.apply_delta(Vec2::new(30.0, 5.0)).nudge, None);

        let right = behavior(&skeleton, RibSide::Right);
        assert_abs_diff_eq!(right.apply_delta(Vec2::new(0.0, 5.0)).half_width, 5.0);
    }

    #[test]
    fn half_width_never_below_floor() {
        let mut skeleton = skeleton();
        let left = behavior(&skeleton, RibSide::Left);
        for dy in [-9.5, -10.0, -50.0, -1e6] {
            assert!(left.apply_delta(Vec2::new(3.0, dy)).half_width >= 1.0);
        }

        skeleton.contours[0].single_sided = Some(RibSide::Left);
        let single = behavior(&skeleton, RibSide::Left);
        assert_eq!(single.mode(), RibMode::SingleSided);
        assert_abs_diff_eq!(single.apply_delta(Vec2::new(0.0, 5.0)).half_width, 25.0);
        for dy in [-17.0, -18.5, -30.0, -1e6] {
            assert!(single.apply_delta(Vec2::new(0.0, dy)).half_width >= 2.0);
        }
    }

    #[test]
    fn editable_symmetric_only_nudges() {
        let mut skeleton = skeleton();
        skeleton.contours[0].points[1].left_editable = true;
        let left = behavior(&skeleton, RibSide::Left);
        assert_eq!(left.mode(), RibMode::Editable);

        let update = left.apply_delta(Vec2::new(7.0, 3.0));
        assert_abs_diff_eq!(update.half_width, 10.0);
        assert_eq!(update.nudge, Some(7.0));
        assert!(!update.is_asymmetric);
    }

    #[test]
    fn editable_asymmetric_changes_both() {
        let mut skeleton = skeleton();
        let point = &mut skeleton.contours[0].points[1];
        point.left_editable = true;
        point.left_width = Some(12.0);
        let left = behavior(&skeleton, RibSide::Left);

        let update = left.apply_delta(Vec2::new(7.0, 3.0));
        assert_abs_diff_eq!(update.half_width, 15.0);
        assert_eq!(update.nudge, Some(7.0));
        assert!(update.is_asymmetric);
    }

    #[test]
    fn interpolating_rib_stays_on_chord() {
        let skeleton = skeleton();
        let chord = (Point::new(90.0, 5.0), Point::new(110.0, 15.0));
        let alt = Modifiers {
            shift: false,
            alt: true,
        };
        let left =
            RibBehavior::for_point(&skeleton, MIDDLE, RibSide::Left, alt, Some(chord)).unwrap();
        assert!(matches!(left.mode(), RibMode::Interpolating { .. }));

        let update = left.apply_delta(Vec2::new(10.0, 0.0));
        assert_abs_diff_eq!(update.half_width, 14.0, epsilon = 1e-9);
        assert_abs_diff_eq!(update.nudge.unwrap(), 8.0, epsilon = 1e-9);

        let rib = rib_point_position(
            Point::new(100.0, 0.0),
            &left.frame(),
            RibSide::Left,
            update.half_width,
            update.nudge.unwrap(),
        );
        let offset = rib - chord.0;
        assert_abs_diff_eq!(offset.cross(chord.1 - chord.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn alt_without_chord_is_plain() {
        let skeleton = skeleton();
        let alt = Modifiers {
            shift: false,
            alt: true,
        };
        let left = RibBehavior::for_point(&skeleton, MIDDLE, RibSide::Left, alt, None).unwrap();
        assert_eq!(left.mode(), RibMode::Plain);
    }

    #[test]
    fn rollback_restores_width_data() {
        let mut edited = skeleton();
        edited.contours[0].points[1].right_editable = true;
        edited.contours[0].points[1].right_width = Some(10.0);
        let start = edited.clone();

        let right = behavior(&edited, RibSide::Right);
        assert!(edited.apply_rib_update(&right.apply_delta(Vec2::new(4.0, -6.0))));
        let p = edited.contours[0].points[1];
        assert_eq!(p.right_width, Some(16.0));
        assert_eq!(p.right_nudge, Some(4.0));
        assert_eq!(p.left_width, Some(10.0));

        assert!(edited.restore_rib(&right.rollback()));
        assert_eq!(edited, start);
        assert_eq!(edited.contours[0].points[1].left_width, None);
        assert_eq!(edited.contours[0].points[1].right_nudge, None);
    }

    #[test]
    fn rollback_keeps_default_width_inherited() {
        let mut edited = skeleton();
        let start = edited.clone();
        let left = behavior(&edited, RibSide::Left);
        let at = SkeletonPointRef::new(0, 0);
        let end = RibBehavior::for_point(&edited, at, RibSide::Left, Modifiers::NONE, None).unwrap();

        assert!(edited.apply_rib_update(&left.apply_delta(Vec2::new(0.0, 8.0))));
        assert!(edited.apply_rib_update(&end.apply_delta(Vec2::new(0.0, 8.0))));
        assert!(edited.restore_rib(&end.rollback()));
        assert!(edited.restore_rib(&left.rollback()));
        assert_eq!(edited, start);

        // Points without their own width follow the contour default again
        edited.contours[0].default_width = 40.0;
        let p = edited.contours[0].points[0];
        assert_abs_diff_eq!(p.half_width(RibSide::Left, edited.contours[0].default_width), 20.0);
    }

    #[test]
    fn single_sided_drag_uses_contour_side() {
        let mut skeleton = skeleton();
        skeleton.contours[0].single_sided = Some(RibSide::Left);
        let grabbed_right = behavior(&skeleton, RibSide::Right);
        assert_eq!(grabbed_right.side(), RibSide::Left);

        let update = grabbed_right.apply_delta(Vec2::new(0.0, 5.0));
        assert_eq!(update.side, RibSide::Left);
        assert_abs_diff_eq!(update.half_width, 25.0);
        assert_eq!(update, behavior(&skeleton, RibSide::Left).apply_delta(Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn missing_point_has_no_behavior() {
        let skeleton = skeleton();
        let at = SkeletonPointRef::new(0, 7);
        assert!(RibBehavior::for_point(&skeleton, at, RibSide::Left, Modifiers::NONE, None).is_none());
    }
}
