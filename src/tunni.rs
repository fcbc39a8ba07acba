// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Tunni point geometry for cubic segments.
//!
//! The Tunni point is the midpoint of a cubic segment's two handles. The
//! "true" Tunni point is where the two handle lines cross. A handle's
//! tension is its length relative to the distance from its on-curve point
//! to the true Tunni point.
//!
//! Every query here needs a segment with exactly two control points and
//! returns `None` otherwise.

use crate::editing::{Modifiers, PointPosition, PointUpdate};
use crate::geom;
use crate::path::{Contour, SegmentInfo};
use crate::settings;
use kurbo::{Point, Vec2};

/// The four points of a cubic segment
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cubic {
    start: Point,
    cp1: Point,
    cp2: Point,
    end: Point,
}

impl Cubic {
    fn from_segment(segment: &SegmentInfo) -> Option<Self> {
        match *segment.control_points.as_slice() {
            [cp1, cp2] => Some(Self {
                start: segment.start_point,
                cp1,
                cp2,
                end: segment.end_point,
            }),
            _ => None,
        }
    }

    /// Unit handle directions, `None` if a handle has zero length
    fn directions(&self) -> Option<(Vec2, Vec2)> {
        let u1 = geom::normalize(self.cp1 - self.start);
        let u2 = geom::normalize(self.cp2 - self.end);
        (u1 != Vec2::ZERO && u2 != Vec2::ZERO).then_some((u1, u2))
    }

    fn true_tunni(&self) -> Option<Point> {
        geom::line_intersection(self.start, self.cp1, self.end, self.cp2)
    }
}

/// Midpoint of the two handles
pub fn calculate_tunni_point(segment: &SegmentInfo) -> Option<Point> {
    let c = Cubic::from_segment(segment)?;
    Some(c.cp1.midpoint(c.cp2))
}

/// Intersection of the two handle lines, `None` if they are parallel
pub fn calculate_true_tunni_point(segment: &SegmentInfo) -> Option<Point> {
    Cubic::from_segment(segment)?.true_tunni()
}

/// Handle length relative to the on-curve point's distance to the true
/// Tunni point
pub fn calculate_tension(on_curve: Point, handle: Point, true_tunni: Point) -> Option<f64> {
    let reach = geom::distance(on_curve, true_tunni);
    if reach < settings::geometry::MIN_REFERENCE_DISTANCE {
        return None;
    }
    Some(geom::distance(on_curve, handle) / reach)
}

/// Tensions of the start and end handles
pub fn segment_tensions(segment: &SegmentInfo) -> Option<(f64, f64)> {
    let c = Cubic::from_segment(segment)?;
    let tunni = c.true_tunni()?;
    Some((
        calculate_tension(c.start, c.cp1, tunni)?,
        calculate_tension(c.end, c.cp2, tunni)?,
    ))
}

/// New handle positions that put the Tunni point on `target`
///
/// Handles only move along their original directions. With `equalize`
/// both move by the same signed distance, taken from the drag projected
/// onto the mean direction, which keeps their tension difference.
/// Otherwise each moves by its own amount and the new midpoint lands
/// exactly on `target`.
pub fn calculate_control_points_from_tunni(
    target: Point,
    segment: &SegmentInfo,
    equalize: bool,
) -> Option<(Point, Point)> {
    let c = Cubic::from_segment(segment)?;
    let (u1, u2) = c.directions()?;
    let delta = (target - c.cp1.midpoint(c.cp2)) * 2.0;

    let (a, b) = if equalize {
        let sum = u1 + u2;
        let len2 = sum.hypot2();
        if len2 < settings::geometry::PARALLEL_EPSILON {
            return None;
        }
        let s = delta.dot(sum) / len2;
        (s, s)
    } else {
        let det = u1.cross(u2);
        if det.abs() < settings::geometry::PARALLEL_EPSILON {
            // Parallel handles: the midpoint can only move along them
            let s = delta.dot(u1) / 2.0;
            (s, s * u1.dot(u2))
        } else {
            (delta.cross(u2) / det, u1.cross(delta) / det)
        }
    };
    Some((c.cp1 + u1 * a, c.cp2 + u2 * b))
}

/// New on-curve positions that move the true Tunni point towards `target`
///
/// The endpoints slide along their fixed handle lines; the handles stay
/// put. With `equalize` both endpoints move by the same amount.
pub fn calculate_on_curve_points_from_true_tunni(
    target: Point,
    segment: &SegmentInfo,
    equalize: bool,
) -> Option<(Point, Point)> {
    let c = Cubic::from_segment(segment)?;
    let (u1, u2) = c.directions()?;
    let delta = target - c.true_tunni()?;

    let (a, b) = if equalize {
        let d = delta.dot(geom::normalize(u1 + u2));
        (d, d)
    } else {
        (delta.dot(u1), delta.dot(u2))
    };
    Some((c.start + u1 * a, c.end + u2 * b))
}

/// Handles with both tensions set to their mean, on their original lines
///
/// Parallel handles have no true Tunni point; they get the mean length.
pub fn calculate_equalized_control_points(segment: &SegmentInfo) -> Option<(Point, Point)> {
    let c = Cubic::from_segment(segment)?;
    let (u1, u2) = c.directions()?;
    match c.true_tunni() {
        Some(tunni) => {
            let t1 = calculate_tension(c.start, c.cp1, tunni)?;
            let t2 = calculate_tension(c.end, c.cp2, tunni)?;
            let tension = (t1 + t2) / 2.0;
            Some((
                c.start + u1 * (tension * geom::distance(c.start, tunni)),
                c.end + u2 * (tension * geom::distance(c.end, tunni)),
            ))
        }
        None => {
            let length = (geom::distance(c.start, c.cp1) + geom::distance(c.end, c.cp2)) / 2.0;
            Some((c.start + u1 * length, c.end + u2 * length))
        }
    }
}

/// Are both tensions (or, for parallel handles, lengths) equal within
/// `settings::tunni::EQUALIZED_TOLERANCE`?
pub fn are_tensions_equalized(segment: &SegmentInfo) -> bool {
    let Some(c) = Cubic::from_segment(segment) else {
        return false;
    };
    let tolerance = settings::tunni::EQUALIZED_TOLERANCE;
    match segment_tensions(segment) {
        Some((t1, t2)) => (t1 - t2).abs() < tolerance,
        None if c.true_tunni().is_none() => {
            (geom::distance(c.start, c.cp1) - geom::distance(c.end, c.cp2)).abs() < tolerance
        }
        None => false,
    }
}

/// Which Tunni point a drag grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunniTarget {
    /// Handle midpoint: moves the handles
    Midpoint,
    /// Handle-line intersection: moves the on-curve points
    TrueTunni,
}

/// A Tunni drag on one cubic segment of a contour
#[derive(Debug, Clone, PartialEq)]
pub struct TunniDrag {
    segment: SegmentInfo,
    target: TunniTarget,
    origin: Point,
}

impl TunniDrag {
    /// Start a drag on the segment that contains `index`
    ///
    /// Returns `None` if that segment is not cubic or the grabbed point is
    /// undefined (parallel handles for a true Tunni drag).
    pub fn new(contour: &Contour, index: usize, target: TunniTarget) -> Option<Self> {
        let segment = contour.segment_containing(index)?;
        Self::from_segment(segment, target)
    }

    pub fn from_segment(segment: SegmentInfo, target: TunniTarget) -> Option<Self> {
        let origin = match target {
            TunniTarget::Midpoint => calculate_tunni_point(&segment)?,
            TunniTarget::TrueTunni => calculate_true_tunni_point(&segment)?,
        };
        tracing::debug!(
            "Tunni drag on segment {}..{} from {:?}",
            segment.start_index,
            segment.end_index,
            origin
        );
        Some(Self {
            segment,
            target,
            origin,
        })
    }

    pub fn segment(&self) -> &SegmentInfo {
        &self.segment
    }

    /// Where the grabbed point started
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Updates for a pointer delta measured from gesture start
    ///
    /// Distances are equalized unless alt is held.
    pub fn apply_delta(&self, delta: Vec2, modifiers: Modifiers) -> Vec<PointUpdate> {
        let equalize = !modifiers.alt;
        let target = self.origin + delta;
        let seg = &self.segment;
        let updates = match self.target {
            TunniTarget::Midpoint => {
                calculate_control_points_from_tunni(target, seg, equalize).map(|(cp1, cp2)| {
                    vec![
                        PointUpdate::rounded(seg.control_indices[0], cp1),
                        PointUpdate::rounded(seg.control_indices[1], cp2),
                    ]
                })
            }
            TunniTarget::TrueTunni => calculate_on_curve_points_from_true_tunni(
                target, seg, equalize,
            )
            .map(|(start, end)| {
                vec![
                    PointUpdate::rounded(seg.start_index, start),
                    PointUpdate::rounded(seg.end_index, end),
                ]
            }),
        };
        updates.unwrap_or_default()
    }

    /// Original positions of every point the drag can move
    pub fn rollback(&self) -> Vec<PointPosition> {
        let seg = &self.segment;
        match self.target {
            TunniTarget::Midpoint => seg
                .control_indices
                .iter()
                .zip(&seg.control_points)
                .map(|(&i, &p)| PointPosition::new(i, p))
                .collect(),
            TunniTarget::TrueTunni => vec![
                PointPosition::new(seg.start_index, seg.start_point),
                PointPosition::new(seg.end_index, seg.end_point),
            ],
        }
    }
}

/// Updates that equalize the tensions of the segment containing `index`
pub fn equalize_segment(contour: &Contour, index: usize) -> Option<Vec<PointUpdate>> {
    let segment = contour.segment_containing(index)?;
    let (cp1, cp2) = calculate_equalized_control_points(&segment)?;
    Some(vec![
        PointUpdate::rounded(segment.control_indices[0], cp1),
        PointUpdate::rounded(segment.control_indices[1], cp2),
    ])
}
