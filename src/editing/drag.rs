// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The pointer delta of one gesture frame, as seen by edit actions

use crate::geom;
use kurbo::{Point, Vec2};

/// Pointer delta plus the shift-constrain state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTransform {
    delta: Vec2,
    constrain: bool,
}

impl DragTransform {
    pub fn new(delta: Vec2, constrain: bool) -> Self {
        Self { delta, constrain }
    }

    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    pub fn is_constrained(&self) -> bool {
        self.constrain
    }

    /// Apply the raw pointer delta
    pub fn free(&self, point: Point) -> Point {
        point + self.delta
    }

    /// Apply the delta, snapped to 0/45/90° when the gesture is constrained
    pub fn constrained(&self, point: Point) -> Point {
        point + self.constrain_vector(self.delta)
    }

    /// Snap an arbitrary vector when the gesture is constrained
    pub fn constrain_vector(&self, v: Vec2) -> Vec2 {
        if self.constrain {
            geom::constrain_hor_ver_diag(v)
        } else {
            v
        }
    }
}
