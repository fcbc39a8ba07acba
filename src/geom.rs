// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Vector and line primitives shared by the edit behaviors.
//!
//! Everything here is a pure function over `kurbo` points and vectors.
//! Degenerate inputs (parallel lines, zero-length vectors) yield `None` or
//! a zero vector instead of NaNs, so callers can fall back to a sane
//! position without checking floats themselves.

use crate::settings;
use kurbo::{Affine, Point, Vec2};

/// Result of intersecting two infinite lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// The intersection point
    pub point: Point,
    /// Parameter along the first line (0 at `a1`, 1 at `a2`)
    pub t1: f64,
    /// Parameter along the second line (0 at `b1`, 1 at `b2`)
    pub t2: f64,
}

/// Intersect the line through `a1`,`a2` with the line through `b1`,`b2`
///
/// Returns `None` when the lines are parallel or either line is
/// degenerate (both of its points coincide).
pub fn intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Intersection> {
    let da = a2 - a1;
    let db = b2 - b1;
    let denom = da.cross(db);
    if denom.abs() < settings::geometry::PARALLEL_EPSILON {
        return None;
    }
    let offset = b1 - a1;
    let t1 = offset.cross(db) / denom;
    let t2 = offset.cross(da) / denom;
    Some(Intersection {
        point: a1 + da * t1,
        t1,
        t2,
    })
}

/// Shorthand for the intersection point only
pub fn line_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    intersect(a1, a2, b1, b2).map(|hit| hit.point)
}

/// Unit vector in the direction of `v`; the zero vector stays zero
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len == 0.0 { Vec2::ZERO } else { v / len }
}

/// Rotate a vector 90° clockwise (y-up coordinates)
pub fn rotate90_cw(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Rotate a vector 90° counter-clockwise (y-up coordinates)
pub fn rotate90_ccw(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Vector projection of `v` onto the direction of `onto`
pub fn project(v: Vec2, onto: Vec2) -> Vec2 {
    let len2 = onto.hypot2();
    if len2 == 0.0 {
        return Vec2::ZERO;
    }
    onto * (v.dot(onto) / len2)
}

/// Snap a vector to the nearest horizontal, vertical or 45° direction
///
/// Inside the diagonal band both components take the mean of their
/// magnitudes (keeping their signs); outside it the smaller component is
/// dropped.
pub fn constrain_hor_ver_diag(v: Vec2) -> Vec2 {
    let ax = v.x.abs();
    let ay = v.y.abs();
    let tan = if ax < settings::constrain::VERTICAL_EPSILON {
        0.0
    } else {
        ay / ax
    };
    if settings::constrain::DIAGONAL_TAN_MIN < tan && tan < settings::constrain::DIAGONAL_TAN_MAX
    {
        let d = 0.5 * (ax + ay);
        Vec2::new(d * v.x.signum(), d * v.y.signum())
    } else if ax > ay {
        Vec2::new(v.x, 0.0)
    } else {
        Vec2::new(0.0, v.y)
    }
}

/// Round a point to the output grid
pub fn round_point(p: Point) -> Point {
    let grid = settings::output::GRID;
    Point::new((p.x / grid).round() * grid, (p.y / grid).round() * grid)
}

/// Similarity transform (rotation, uniform scale, translation) that maps
/// `from_a` to `to_a` and `from_b` to `to_b`
///
/// Returns `None` when `from_a` and `from_b` coincide, since the rotation
/// and scale are then undefined.
pub fn similarity(from_a: Point, from_b: Point, to_a: Point, to_b: Point) -> Option<Affine> {
    let from = from_b - from_a;
    let to = to_b - to_a;
    let len2 = from.hypot2();
    if len2 < settings::geometry::MIN_REFERENCE_DISTANCE * settings::geometry::MIN_REFERENCE_DISTANCE
    {
        return None;
    }
    // Complex division to / from
    let re = (to.x * from.x + to.y * from.y) / len2;
    let im = (to.y * from.x - to.x * from.y) / len2;
    let rotate_scale = Affine::new([re, im, -im, re, 0.0, 0.0]);
    Some(Affine::translate(to_a.to_vec2()) * rotate_scale * Affine::translate(-from_a.to_vec2()))
}
