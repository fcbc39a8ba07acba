// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Gesture inputs and outputs shared by all edit behaviors

use crate::geom;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys held during a gesture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Constrain to 0/45/90 degrees
    #[serde(default)]
    pub shift: bool,
    /// Alternate behavior (proportional handle scaling, live tangents)
    #[serde(default)]
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
    };

    pub fn rule_set(self) -> RuleSetId {
        match (self.shift, self.alt) {
            (false, false) => RuleSetId::Default,
            (true, false) => RuleSetId::Constrain,
            (false, true) => RuleSetId::Alternate,
            (true, true) => RuleSetId::AlternateConstrain,
        }
    }
}

/// Which rule table governs a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSetId {
    Default,
    Constrain,
    Alternate,
    AlternateConstrain,
}

/// A rounded position emitted for one point after a pointer move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointUpdate {
    pub point_index: usize,
    pub x: i64,
    pub y: i64,
}

impl PointUpdate {
    /// Round `point` to the output grid
    pub fn rounded(point_index: usize, point: Point) -> Self {
        let p = geom::round_point(point);
        Self {
            point_index,
            x: p.x as i64,
            y: p.y as i64,
        }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// An exact (unrounded) position, used for rollback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointPosition {
    pub point_index: usize,
    pub x: f64,
    pub y: f64,
}

impl PointPosition {
    pub fn new(point_index: usize, point: Point) -> Self {
        Self {
            point_index,
            x: point.x,
            y: point.y,
        }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_pick_rule_set() {
        assert_eq!(Modifiers::NONE.rule_set(), RuleSetId::Default);
        let shift = Modifiers {
            shift: true,
            alt: false,
        };
        assert_eq!(shift.rule_set(), RuleSetId::Constrain);
        let both = Modifiers {
            shift: true,
            alt: true,
        };
        assert_eq!(both.rule_set(), RuleSetId::AlternateConstrain);
    }

    #[test]
    fn updates_are_rounded() {
        let update = PointUpdate::rounded(3, Point::new(10.49, -0.51));
        assert_eq!(update, PointUpdate { point_index: 3, x: 10, y: -1 });
    }
}
