// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Geometric edit actions.
//!
//! An `ActionKind` is the name a rule refers to. When a behavior is built,
//! each matched point instantiates its kind against the *original*
//! neighborhood, capturing whatever it needs (handle lengths, reference
//! lines, interpolation parameters) as an `Action`. On every pointer move
//! the action is applied to the *live* neighborhood: positions already
//! recomputed earlier in the same frame, or originals for points that have
//! not moved.
//!
//! Degenerate constructions never fail; they fall back to the original or
//! the dragged position.

use super::drag::DragTransform;
use crate::geom;
use crate::settings;
use kurbo::{Affine, Point, Vec2};

/// A point and its logical neighbors, oriented by match direction
///
/// "prev" and "next" are logical: for a match in the reversed direction
/// `prev` is the physically following point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbors<T> {
    pub prev_prev_prev: Option<T>,
    pub prev_prev: Option<T>,
    pub prev: Option<T>,
    pub point: T,
    pub next: Option<T>,
    pub next_next: Option<T>,
}

impl<T: Copy> Neighbors<T> {
    pub fn map<U>(&self, mut f: impl FnMut(T) -> U) -> Neighbors<U> {
        Neighbors {
            prev_prev_prev: self.prev_prev_prev.map(&mut f),
            prev_prev: self.prev_prev.map(&mut f),
            prev: self.prev.map(&mut f),
            point: f(self.point),
            next: self.next.map(&mut f),
            next_next: self.next_next.map(&mut f),
        }
    }
}

/// Names of the available actions, as used in rule tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    DontMove,
    Move,
    RotateNext,
    ConstrainPrevAngle,
    ConstrainMiddle,
    ConstrainMiddleTwo,
    TangentIntersect,
    TangentIntersectLive,
    HandleIntersect,
    ConstrainHandle,
    ConstrainHandleIntersect,
    ConstrainHandleIntersectPrev,
    Interpolate,
    InterpolatePrevPrevNext,
    ConstrainAroundPrevPrev,
    ConstrainAroundPrevPrevPrev,
    /// Pseudo-action: computes a segment transform, never moves a point
    ComputeHelperTransform,
    ScaleHandle,
    ScaleHandleFromPrev,
}

impl ActionKind {
    /// True for entries that only feed later entries in the same frame
    pub fn is_transform_calculation(self) -> bool {
        matches!(self, ActionKind::ComputeHelperTransform)
    }

    /// Ordering pass within a constrain group
    ///
    /// Pass 0 settles anchor positions, pass 1 derives handles from them.
    pub fn pass(self) -> u8 {
        match self {
            ActionKind::RotateNext
            | ActionKind::HandleIntersect
            | ActionKind::TangentIntersect
            | ActionKind::TangentIntersectLive
            | ActionKind::ScaleHandle
            | ActionKind::ScaleHandleFromPrev => 1,
            _ => 0,
        }
    }

    /// Capture the original geometry this action needs
    ///
    /// `indices` are the physical point indices of the neighborhood; only
    /// the helper-transform actions keep them. A kind whose required
    /// neighbors are missing degrades to `Move`.
    pub fn instantiate(self, original: &Neighbors<Point>, indices: &Neighbors<usize>) -> Action {
        let point = original.point;
        let fallback = Action::Move { original: point };
        match self {
            ActionKind::DontMove => Action::DontMove { original: point },
            ActionKind::Move => Action::Move { original: point },
            ActionKind::RotateNext => match original.prev {
                Some(prev) if original.prev_prev.is_some() => Action::RotateNext {
                    original: point,
                    handle_length: geom::distance(prev, point),
                },
                _ => fallback,
            },
            ActionKind::ConstrainPrevAngle => match (original.prev_prev, original.prev) {
                (Some(a), Some(b)) => Action::ConstrainPrevAngle {
                    original: point,
                    line: (a, b),
                },
                _ => fallback,
            },
            ActionKind::ConstrainMiddle => match (original.prev, original.next) {
                (Some(a), Some(b)) => Action::ConstrainMiddle {
                    original: point,
                    line: (a, b),
                },
                _ => fallback,
            },
            ActionKind::ConstrainMiddleTwo => match (original.prev_prev, original.next) {
                (Some(a), Some(b)) => Action::ConstrainMiddleTwo {
                    original: point,
                    line: (a, b),
                },
                _ => fallback,
            },
            ActionKind::TangentIntersect => match original.next {
                Some(next) if original.prev.is_some() && original.prev_prev.is_some() => {
                    Action::TangentIntersect {
                        original: point,
                        next_handle: point - next,
                    }
                }
                _ => fallback,
            },
            ActionKind::TangentIntersectLive => {
                let complete = original.prev_prev.is_some()
                    && original.prev.is_some()
                    && original.next.is_some()
                    && original.next_next.is_some();
                if complete {
                    Action::TangentIntersectLive { original: point }
                } else {
                    fallback
                }
            }
            ActionKind::HandleIntersect => match (original.prev, original.next) {
                (Some(prev), Some(next)) => Action::HandleIntersect {
                    original: point,
                    handle_prev: point - prev,
                    handle_next: point - next,
                },
                _ => fallback,
            },
            ActionKind::ConstrainHandle => match original.prev {
                Some(_) => Action::ConstrainHandle { original: point },
                None => fallback,
            },
            ActionKind::ConstrainHandleIntersect => match (original.prev, original.next) {
                (Some(_), Some(_)) => Action::ConstrainHandleIntersect { original: point },
                _ => fallback,
            },
            ActionKind::ConstrainHandleIntersectPrev => {
                match (original.prev_prev, original.prev, original.next) {
                    (Some(prev_prev), Some(prev), Some(_)) => {
                        Action::ConstrainHandleIntersectPrev {
                            original: point,
                            tangent_prev: prev - prev_prev,
                        }
                    }
                    _ => fallback,
                }
            }
            ActionKind::Interpolate => match (original.prev, original.next) {
                (Some(prev), Some(next)) => Action::Interpolate {
                    original: point,
                    chord: ChordPosition::new(point, prev, next),
                },
                _ => fallback,
            },
            ActionKind::InterpolatePrevPrevNext => match (original.prev_prev, original.next) {
                (Some(prev_prev), Some(next)) => Action::InterpolatePrevPrevNext {
                    original: point,
                    chord: ChordPosition::new(point, prev_prev, next),
                },
                _ => fallback,
            },
            ActionKind::ConstrainAroundPrevPrev => match original.prev_prev {
                Some(_) => Action::ConstrainAroundPrevPrev { original: point },
                None => fallback,
            },
            ActionKind::ConstrainAroundPrevPrevPrev => match original.prev_prev_prev {
                Some(_) => Action::ConstrainAroundPrevPrevPrev { original: point },
                None => fallback,
            },
            ActionKind::ComputeHelperTransform => match (original.prev, original.next_next) {
                (Some(moving), Some(fixed)) => Action::ComputeHelperTransform { moving, fixed },
                _ => fallback,
            },
            ActionKind::ScaleHandle => Action::ScaleHandle {
                original: point,
                key: indices.point,
            },
            ActionKind::ScaleHandleFromPrev => match indices.prev {
                Some(key) => Action::ScaleHandleFromPrev {
                    original: point,
                    key,
                },
                None => fallback,
            },
        }
    }
}

/// Where a point sits relative to the chord `near`→`far`
///
/// `t` is the distance ratio `|point - near| / |far - near|`. A point that
/// is not on the chord keeps its remaining offset, stored in chord units
/// (along, across) so it turns and scales with the chord. A degenerate
/// chord keeps the raw offset from `near`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordPosition {
    t: f64,
    offset: Vec2,
    relative: bool,
}

impl ChordPosition {
    fn new(point: Point, near: Point, far: Point) -> Self {
        let chord = far - near;
        let len2 = chord.hypot2();
        let min = settings::geometry::MIN_REFERENCE_DISTANCE;
        if len2 <= min * min {
            return Self {
                t: 0.0,
                offset: point - near,
                relative: false,
            };
        }
        let t = geom::distance(near, point) / len2.sqrt();
        let rest = point - (near + chord * t);
        Self {
            t,
            offset: Vec2::new(
                rest.dot(chord) / len2,
                rest.dot(geom::rotate90_ccw(chord)) / len2,
            ),
            relative: true,
        }
    }

    fn place(&self, near: Point, far: Point) -> Point {
        if !self.relative {
            return near + self.offset;
        }
        let chord = far - near;
        near + chord * (self.t + self.offset.x) + geom::rotate90_ccw(chord) * self.offset.y
    }
}

/// An instantiated action holding the original geometry it depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    DontMove {
        original: Point,
    },
    Move {
        original: Point,
    },
    RotateNext {
        original: Point,
        handle_length: f64,
    },
    ConstrainPrevAngle {
        original: Point,
        line: (Point, Point),
    },
    ConstrainMiddle {
        original: Point,
        line: (Point, Point),
    },
    ConstrainMiddleTwo {
        original: Point,
        line: (Point, Point),
    },
    TangentIntersect {
        original: Point,
        next_handle: Vec2,
    },
    TangentIntersectLive {
        original: Point,
    },
    HandleIntersect {
        original: Point,
        handle_prev: Vec2,
        handle_next: Vec2,
    },
    ConstrainHandle {
        original: Point,
    },
    ConstrainHandleIntersect {
        original: Point,
    },
    ConstrainHandleIntersectPrev {
        original: Point,
        tangent_prev: Vec2,
    },
    Interpolate {
        original: Point,
        chord: ChordPosition,
    },
    InterpolatePrevPrevNext {
        original: Point,
        chord: ChordPosition,
    },
    ConstrainAroundPrevPrev {
        original: Point,
    },
    ConstrainAroundPrevPrevPrev {
        original: Point,
    },
    ComputeHelperTransform {
        moving: Point,
        fixed: Point,
    },
    ScaleHandle {
        original: Point,
        key: usize,
    },
    ScaleHandleFromPrev {
        original: Point,
        key: usize,
    },
}

/// What applying an action produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applied {
    /// New position for the entry's point
    Position(Point),
    /// Helper transform for later entries; `None` if degenerate
    HelperTransform(Option<Affine>),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::DontMove { .. } => ActionKind::DontMove,
            Action::Move { .. } => ActionKind::Move,
            Action::RotateNext { .. } => ActionKind::RotateNext,
            Action::ConstrainPrevAngle { .. } => ActionKind::ConstrainPrevAngle,
            Action::ConstrainMiddle { .. } => ActionKind::ConstrainMiddle,
            Action::ConstrainMiddleTwo { .. } => ActionKind::ConstrainMiddleTwo,
            Action::TangentIntersect { .. } => ActionKind::TangentIntersect,
            Action::TangentIntersectLive { .. } => ActionKind::TangentIntersectLive,
            Action::HandleIntersect { .. } => ActionKind::HandleIntersect,
            Action::ConstrainHandle { .. } => ActionKind::ConstrainHandle,
            Action::ConstrainHandleIntersect { .. } => ActionKind::ConstrainHandleIntersect,
            Action::ConstrainHandleIntersectPrev { .. } => {
                ActionKind::ConstrainHandleIntersectPrev
            }
            Action::Interpolate { .. } => ActionKind::Interpolate,
            Action::InterpolatePrevPrevNext { .. } => ActionKind::InterpolatePrevPrevNext,
            Action::ConstrainAroundPrevPrev { .. } => ActionKind::ConstrainAroundPrevPrev,
            Action::ConstrainAroundPrevPrevPrev { .. } => ActionKind::ConstrainAroundPrevPrevPrev,
            Action::ComputeHelperTransform { .. } => ActionKind::ComputeHelperTransform,
            Action::ScaleHandle { .. } => ActionKind::ScaleHandle,
            Action::ScaleHandleFromPrev { .. } => ActionKind::ScaleHandleFromPrev,
        }
    }

    /// Apply to the live neighborhood of the current frame
    ///
    /// `helpers` holds the helper transforms computed so far this frame,
    /// indexed by the point index they were stored under.
    pub fn apply(
        &self,
        transform: &DragTransform,
        live: &Neighbors<Point>,
        helpers: &[Option<Affine>],
    ) -> Applied {
        let position = match *self {
            Action::DontMove { original } => original,
            Action::Move { original } => transform.constrained(original),
            Action::RotateNext {
                original,
                handle_length,
            } => match (live.prev, live.prev_prev) {
                (Some(anchor), Some(reference)) => {
                    let direction = anchor - reference;
                    if direction.hypot2() == 0.0 {
                        // Angle undefined
                        original
                    } else {
                        anchor + geom::normalize(direction) * handle_length
                    }
                }
                _ => original,
            },
            Action::ConstrainPrevAngle { original, line }
            | Action::ConstrainMiddle { original, line }
            | Action::ConstrainMiddleTwo { original, line } => {
                constrain_to_line(transform.free(original), line)
            }
            Action::TangentIntersect {
                original,
                next_handle,
            } => {
                let dragged = transform.constrained(original);
                match (live.prev_prev, live.prev, live.next) {
                    (Some(a), Some(b), Some(next)) => {
                        geom::line_intersection(a, b, next, next + next_handle).unwrap_or(dragged)
                    }
                    _ => dragged,
                }
            }
            Action::TangentIntersectLive { original } => {
                match (live.prev_prev, live.prev, live.next, live.next_next) {
                    (Some(a), Some(b), Some(c), Some(d)) => {
                        geom::line_intersection(a, b, c, d).unwrap_or(original)
                    }
                    _ => original,
                }
            }
            Action::HandleIntersect {
                original,
                handle_prev,
                handle_next,
            } => match (live.prev, live.next) {
                (Some(prev), Some(next)) => {
                    geom::line_intersection(prev, prev + handle_prev, next, next + handle_next)
                        .unwrap_or_else(|| transform.constrained(original))
                }
                _ => transform.constrained(original),
            },
            Action::ConstrainHandle { original } => {
                let dragged = transform.free(original);
                match live.prev {
                    Some(anchor) => anchor + transform.constrain_vector(dragged - anchor),
                    None => dragged,
                }
            }
            Action::ConstrainHandleIntersect { original } => {
                let dragged = transform.free(original);
                match (live.prev, live.next) {
                    (Some(prev), Some(next)) => {
                        let handle_prev = transform.constrain_vector(dragged - prev);
                        let handle_next = transform.constrain_vector(dragged - next);
                        geom::line_intersection(prev, prev + handle_prev, next, next + handle_next)
                            .unwrap_or(dragged)
                    }
                    _ => dragged,
                }
            }
            Action::ConstrainHandleIntersectPrev {
                original,
                tangent_prev,
            } => {
                let dragged = transform.free(original);
                match (live.prev, live.next) {
                    (Some(prev), Some(next)) => {
                        let handle_next = transform.constrain_vector(dragged - next);
                        geom::line_intersection(prev, prev + tangent_prev, next, next + handle_next)
                            .unwrap_or(dragged)
                    }
                    _ => dragged,
                }
            }
            Action::Interpolate { original, chord } => match (live.prev, live.next) {
                (Some(near), Some(far)) => chord.place(near, far),
                _ => original,
            },
            Action::InterpolatePrevPrevNext { original, chord } => {
                match (live.prev_prev, live.next) {
                    (Some(near), Some(far)) => chord.place(near, far),
                    _ => original,
                }
            }
            Action::ConstrainAroundPrevPrev { original } => {
                constrain_around(transform, original, live.prev_prev)
            }
            Action::ConstrainAroundPrevPrevPrev { original } => {
                constrain_around(transform, original, live.prev_prev_prev)
            }
            Action::ComputeHelperTransform { moving, fixed } => {
                let helper = match (live.next_next, live.prev) {
                    (Some(new_fixed), Some(new_moving)) => {
                        geom::similarity(fixed, moving, new_fixed, new_moving)
                    }
                    _ => None,
                };
                return Applied::HelperTransform(helper);
            }
            Action::ScaleHandle { original, key } | Action::ScaleHandleFromPrev { original, key } => {
                match helpers.get(key).copied().flatten() {
                    Some(helper) => helper * original,
                    None => original,
                }
            }
        };
        Applied::Position(position)
    }
}

/// Project the dragged point perpendicularly onto `line`, or keep it as
/// is when the line is degenerate
fn constrain_to_line(dragged: Point, line: (Point, Point)) -> Point {
    let perpendicular = geom::rotate90_cw(line.1 - line.0);
    geom::line_intersection(line.0, line.1, dragged, dragged + perpendicular).unwrap_or(dragged)
}

/// Snap the vector from `anchor` to the dragged point
fn constrain_around(transform: &DragTransform, original: Point, anchor: Option<Point>) -> Point {
    let dragged = transform.free(original);
    match anchor {
        Some(anchor) => anchor + transform.constrain_vector(dragged - anchor),
        None => dragged,
    }
}
