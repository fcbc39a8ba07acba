// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit behavior for one contour over the lifetime of a drag gesture.
//!
//! The behavior is built once against a snapshot of the contour. Building
//! runs the matcher over every point and records an entry per match. Each
//! pointer move then replays the entries in order against a scratch buffer
//! that is refilled from the original snapshot every frame, so nothing
//! accumulates between frames.
//!
//! Entry order: unconstrained entries first, then constrained ones; within
//! each group anchor-producing actions run before the handle actions that
//! read them.

use super::actions::{Action, Applied, Neighbors};
use super::drag::DragTransform;
use super::edit_types::{Modifiers, PointPosition, PointUpdate, RuleSetId};
use super::matcher::find_match;
use super::rules::{Rule, RuleSet};
use super::selection::Selection;
use crate::path::Contour;
use kurbo::{Affine, Point, Vec2};
use std::collections::BTreeSet;

/// One matched point and the action that moves it
#[derive(Debug, Clone, PartialEq)]
pub struct EditEntry {
    pub point_index: usize,
    /// Physical indices of the logical neighbors, oriented by the match
    pub neighbors: Neighbors<usize>,
    pub constrained: bool,
    pub action: Action,
}

impl EditEntry {
    fn sort_key(&self) -> (bool, u8) {
        (self.constrained, self.action.kind().pass())
    }
}

/// Per-frame scratch state, indexed by point index
#[derive(Debug, Clone, Default)]
struct EditBuffer {
    positions: Vec<Option<Point>>,
    helpers: Vec<Option<Affine>>,
}

impl EditBuffer {
    fn with_len(len: usize) -> Self {
        Self {
            positions: vec![None; len],
            helpers: vec![None; len],
        }
    }

    fn clear(&mut self) {
        self.positions.iter_mut().for_each(|p| *p = None);
        self.helpers.iter_mut().for_each(|h| *h = None);
    }
}

/// Rule-driven edit behavior for a single contour
#[derive(Debug, Clone)]
pub struct EditBehavior {
    original: Contour,
    selection: Selection<usize>,
    modifiers: Modifiers,
    rule_set: RuleSet,
    entries: Vec<EditEntry>,
    buffer: EditBuffer,
    /// Every point that had an entry at any time during the gesture
    touched: BTreeSet<usize>,
}

impl EditBehavior {
    /// Build a behavior using the rule set selected by `modifiers`
    pub fn new(contour: &Contour, selection: &Selection<usize>, modifiers: Modifiers) -> Self {
        let rule_set = RuleSet::for_id(modifiers.rule_set());
        Self::with_rule_set(contour, selection, modifiers, rule_set)
    }

    /// Build a behavior with an explicit rule set
    ///
    /// A later `set_modifiers` that selects a different rule set replaces
    /// it with one of the built-in sets.
    pub fn with_rule_set(
        contour: &Contour,
        selection: &Selection<usize>,
        modifiers: Modifiers,
        rule_set: RuleSet,
    ) -> Self {
        for index in selection.iter().filter(|&&i| i >= contour.len()) {
            tracing::warn!(
                "Skipping selected point {} outside contour of {} points",
                index,
                contour.len()
            );
        }
        let mut behavior = Self {
            original: contour.clone(),
            selection: selection.clone(),
            modifiers,
            rule_set,
            entries: Vec::new(),
            buffer: EditBuffer::with_len(contour.len()),
            touched: BTreeSet::new(),
        };
        behavior.build();
        behavior
    }

    fn build(&mut self) {
        let mut entries = Vec::new();
        for index in 0..self.original.len() {
            if let Some(entry) = self.match_entry(&self.rule_set.rules, index) {
                entries.push(entry);
            }
            if let Some(entry) = self.match_entry(&self.rule_set.helpers, index) {
                entries.push(entry);
            }
        }
        entries.sort_by_key(EditEntry::sort_key);

        self.touched.extend(
            entries
                .iter()
                .filter(|entry| !entry.action.kind().is_transform_calculation())
                .map(|entry| entry.point_index),
        );
        tracing::debug!(
            "Built {} edit entries with {:?} rules for {} selected points",
            entries.len(),
            self.rule_set.id,
            self.selection.len()
        );
        self.entries = entries;
    }

    fn match_entry(&self, rules: &[Rule], index: usize) -> Option<EditEntry> {
        let contour = &self.original;
        let found = find_match(rules, index, contour, |i| self.selection.contains(&i))?;
        let neighbors = found.neighbor_indices(contour, index);
        let original = neighbors.map(|i| contour.points[i].point);
        Some(EditEntry {
            point_index: index,
            neighbors,
            constrained: found.constrained,
            action: found.action.instantiate(&original, &neighbors),
        })
    }

    /// Update the held modifier keys
    ///
    /// Returns `true` if the rule set changed, in which case all entries
    /// were rebuilt from the original snapshot.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) -> bool {
        self.modifiers = modifiers;
        let id = modifiers.rule_set();
        if id == self.rule_set.id {
            return false;
        }
        self.rule_set = RuleSet::for_id(id);
        self.build();
        true
    }

    /// Recompute positions for a pointer delta measured from gesture start
    pub fn apply_delta(&mut self, delta: Vec2) -> Vec<PointUpdate> {
        let transform = DragTransform::new(delta, self.modifiers.shift);
        let mut updates = Vec::with_capacity(self.entries.len());
        self.buffer.clear();

        for entry in &self.entries {
            let live = entry.neighbors.map(|i| {
                self.buffer.positions[i].unwrap_or(self.original.points[i].point)
            });
            match entry.action.apply(&transform, &live, &self.buffer.helpers) {
                Applied::Position(point) => {
                    self.buffer.positions[entry.point_index] = Some(point);
                    updates.push(PointUpdate::rounded(entry.point_index, point));
                }
                Applied::HelperTransform(helper) => {
                    self.buffer.helpers[entry.point_index] = helper;
                }
            }
        }

        tracing::trace!("Applied delta {:?}: {} updates", delta, updates.len());
        updates
    }

    /// Unrounded position of a point computed by the last `apply_delta`
    pub fn edited_position(&self, index: usize) -> Option<Point> {
        self.buffer.positions.get(index).copied().flatten()
    }

    /// Original positions of every point edited during the gesture
    pub fn rollback(&self) -> Vec<PointPosition> {
        self.touched
            .iter()
            .map(|&i| PointPosition::new(i, self.original.points[i].point))
            .collect()
    }

    pub fn entries(&self) -> &[EditEntry] {
        &self.entries
    }

    pub fn rule_set(&self) -> RuleSetId {
        self.rule_set.id
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The snapshot the behavior was built against
    pub fn original(&self) -> &Contour {
        &self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::actions::ActionKind;
    use crate::editing::rules::fallback_rule;
    use crate::path::PathPoint;
    use approx::assert_abs_diff_eq;

    const ALT: Modifiers = Modifiers {
        shift: false,
        alt: true,
    };
    const SHIFT: Modifiers = Modifiers {
        shift: true,
        alt: false,
    };

    fn selection(indices: &[usize]) -> Selection<usize> {
        indices.iter().copied().collect()
    }

    fn update(updates: &[PointUpdate], index: usize) -> Option<(i64, i64)> {
        updates
            .iter()
            .find(|u| u.point_index == index)
            .map(|u| (u.x, u.y))
    }

    fn kind_at(behavior: &EditBehavior, index: usize) -> Option<ActionKind> {
        behavior
            .entries()
            .iter()
            .find(|e| e.point_index == index && !e.action.kind().is_transform_calculation())
            .map(|e| e.action.kind())
    }

    fn assert_zero_delta_idempotent(contour: &Contour, sel: &[usize]) {
        for modifiers in [Modifiers::NONE, ALT] {
            let mut behavior = EditBehavior::new(contour, &selection(sel), modifiers);
            for u in behavior.apply_delta(Vec2::ZERO) {
                let expected =
                    PointUpdate::rounded(u.point_index, contour.points[u.point_index].point);
                assert_eq!(u, expected, "selection {sel:?}, {modifiers:?}");
            }
        }
    }

    /// Corner, smooth point with horizontal handles, corner; closed
    fn smooth_contour() -> Contour {
        Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::off_curve(0.0, 50.0),
                PathPoint::off_curve(50.0, 100.0),
                PathPoint::smooth(100.0, 100.0),
                PathPoint::off_curve(150.0, 100.0),
                PathPoint::off_curve(200.0, 50.0),
                PathPoint::corner(200.0, 0.0),
            ],
            true,
        )
    }

    /// Line into a tangent point, then a cubic segment; open
    fn tangent_contour() -> Contour {
        Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::smooth(100.0, 0.0),
                PathPoint::off_curve(150.0, 0.0),
                PathPoint::off_curve(200.0, 50.0),
                PathPoint::corner(200.0, 100.0),
            ],
            false,
        )
    }

    /// Two quadratic segments through a smooth point; open
    fn quad_contour() -> Contour {
        Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::quad_off_curve(0.0, 100.0),
                PathPoint::smooth(100.0, 100.0),
                PathPoint::quad_off_curve(200.0, 100.0),
                PathPoint::corner(200.0, 0.0),
            ],
            false,
        )
    }

    /// Smooth point between a quadratic handle and a line, off the chord
    /// of its two on-curve neighbors; open
    fn interpolated_quad_contour() -> Contour {
        Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::quad_off_curve(0.0, 100.0),
                PathPoint::smooth(100.0, 100.0),
                PathPoint::corner(200.0, 100.0),
            ],
            false,
        )
    }

    /// A single cubic segment between two corners; open
    fn cubic_segment() -> Contour {
        Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::off_curve(0.0, 50.0),
                PathPoint::off_curve(50.0, 100.0),
                PathPoint::corner(100.0, 100.0),
            ],
            false,
        )
    }

    #[test]
    fn zero_delta_reproduces_original() {
        let contour = smooth_contour();
        let selections: [&[usize]; 9] = [
            &[0],
            &[1],
            &[2],
            &[3],
            &[4],
            &[6],
            &[0, 6],
            &[2, 4],
            &[0, 3],
        ];
        for sel in selections {
            assert_zero_delta_idempotent(&contour, sel);
        }
    }

    #[test]
    fn zero_delta_reproduces_quadratic_outline() {
        // Smooth points sit between a quadratic handle and a line, or
        // between two quadratic handles
        let contour = Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::smooth(100.0, 0.0),
                PathPoint::quad_off_curve(200.0, 0.0),
                PathPoint::smooth(200.0, 100.0),
                PathPoint::quad_off_curve(200.0, 200.0),
                PathPoint::smooth(100.0, 200.0),
                PathPoint::corner(0.0, 200.0),
                PathPoint::quad_off_curve(-50.0, 100.0),
            ],
            true,
        );
        for bits in 0u32..(1 << contour.len()) {
            let sel: Vec<usize> = (0..contour.len()).filter(|&i| bits & (1 << i) != 0).collect();
            assert_zero_delta_idempotent(&contour, &sel);
        }
        assert_zero_delta_idempotent(&interpolated_quad_contour(), &[0, 3]);
    }

    #[test]
    fn tangent_handle_stays_on_line() {
        let contour = tangent_contour();
        let mut behavior = EditBehavior::new(&contour, &selection(&[1]), Modifiers::NONE);
        let updates = behavior.apply_delta(Vec2::new(0.0, 10.0));

        assert_eq!(update(&updates, 1), Some((100, 10)));
        assert_eq!(update(&updates, 2), Some((150, 15)));
        assert_eq!(update(&updates, 3), None);

        let anchor = behavior.edited_position(1).unwrap();
        let handle = behavior.edited_position(2).unwrap();
        let line = anchor - contour.points[0].point;
        assert_abs_diff_eq!(line.cross(handle - anchor), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!((handle - anchor).hypot(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn quadratic_handles_intersect_through_moved_smooth_point() {
        let contour = quad_contour();
        let mut behavior = EditBehavior::new(&contour, &selection(&[2]), Modifiers::NONE);
        let updates = behavior.apply_delta(Vec2::new(10.0, 20.0));

        assert_eq!(update(&updates, 2), Some((110, 120)));
        assert_eq!(update(&updates, 1), Some((0, 120)));
        assert_eq!(update(&updates, 3), Some((200, 120)));
    }

    #[test]
    fn rotated_handle_keeps_length() {
        let contour = smooth_contour();
        let mut behavior = EditBehavior::new(&contour, &selection(&[2]), Modifiers::NONE);
        let rotate = behavior
            .entries()
            .iter()
            .find(|e| e.point_index == 4)
            .unwrap();
        assert_eq!(rotate.action.kind(), ActionKind::RotateNext);

        for delta in [
            Vec2::new(0.0, 30.0),
            Vec2::new(-20.0, 7.5),
            Vec2::new(33.0, -80.0),
        ] {
            behavior.apply_delta(delta);
            let anchor = behavior.edited_position(3).unwrap_or(contour.points[3].point);
            let handle = behavior.edited_position(4).unwrap();
            let dragged = behavior.edited_position(2).unwrap();
            assert_abs_diff_eq!((handle - anchor).hypot(), 50.0, epsilon = 1e-9);
            assert_abs_diff_eq!((anchor - dragged).cross(handle - anchor), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn selected_corner_moves_alone_without_handle_rule() {
        let contour = cubic_segment();
        let rules = RuleSet::from_rules(RuleSetId::Default, vec![fallback_rule()], Vec::new());
        let mut behavior =
            EditBehavior::with_rule_set(&contour, &selection(&[0]), Modifiers::NONE, rules);
        let updates = behavior.apply_delta(Vec2::new(5.0, -3.0));
        assert_eq!(
            updates,
            vec![PointUpdate {
                point_index: 0,
                x: 5,
                y: -3
            }]
        );
    }

    #[test]
    fn handle_follows_selected_corner_by_default() {
        let contour = cubic_segment();
        let mut behavior = EditBehavior::new(&contour, &selection(&[0]), Modifiers::NONE);
        let updates = behavior.apply_delta(Vec2::new(5.0, -3.0));
        assert_eq!(update(&updates, 0), Some((5, -3)));
        assert_eq!(update(&updates, 1), Some((5, 47)));
        assert_eq!(update(&updates, 2), None);
    }

    #[test]
    fn modifier_change_rebuilds_from_original() {
        let contour = tangent_contour();
        let mut behavior = EditBehavior::new(&contour, &selection(&[2]), Modifiers::NONE);
        assert_eq!(behavior.rule_set(), RuleSetId::Default);
        let updates = behavior.apply_delta(Vec2::new(10.0, 60.0));
        assert_eq!(update(&updates, 2), Some((160, 0)));

        assert!(!behavior.set_modifiers(Modifiers::NONE));
        assert!(behavior.set_modifiers(SHIFT));
        assert_eq!(behavior.rule_set(), RuleSetId::Constrain);
        assert_eq!(kind_at(&behavior, 2), Some(ActionKind::ConstrainHandle));
        let updates = behavior.apply_delta(Vec2::new(10.0, 60.0));
        assert_eq!(update(&updates, 2), Some((160, 60)));

        assert!(behavior.set_modifiers(Modifiers::NONE));
        let updates = behavior.apply_delta(Vec2::ZERO);
        assert_eq!(update(&updates, 2), Some((150, 0)));

        let rollback = behavior.rollback();
        assert_eq!(rollback, vec![PointPosition::new(2, Point::new(150.0, 0.0))]);
    }

    #[test]
    fn alternate_drag_scales_segment_handles() {
        let contour = cubic_segment();
        let mut behavior = EditBehavior::new(&contour, &selection(&[0]), ALT);
        assert_eq!(behavior.rule_set(), RuleSetId::Alternate);
        let updates = behavior.apply_delta(Vec2::new(-100.0, -100.0));

        assert_eq!(update(&updates, 0), Some((-100, -100)));
        assert_eq!(update(&updates, 1), Some((-100, 0)));
        assert_eq!(update(&updates, 2), Some((0, 100)));
        assert_eq!(update(&updates, 3), None);
        // The helper entry never produces an update
        assert_eq!(updates.len(), 3);

        let indices: Vec<usize> = behavior.rollback().iter().map(|p| p.point_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn rollback_covers_entries_from_every_rule_set() {
        let contour = cubic_segment();
        let mut behavior = EditBehavior::new(&contour, &selection(&[0]), Modifiers::NONE);
        assert_eq!(behavior.rollback().len(), 2);
        behavior.set_modifiers(ALT);
        let rollback = behavior.rollback();
        assert_eq!(rollback.len(), 3);
        assert_eq!(rollback[2], PointPosition::new(2, Point::new(50.0, 100.0)));
    }

    #[test]
    fn unconstrained_entries_run_first() {
        let contour = smooth_contour();
        let behavior = EditBehavior::new(&contour, &selection(&[2]), Modifiers::NONE);
        let keys: Vec<(bool, u8)> = behavior.entries().iter().map(EditEntry::sort_key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(!keys[0].0);
    }

    #[test]
    fn smooth_point_between_moving_handles_stays() {
        let contour = smooth_contour();
        let mut behavior = EditBehavior::new(&contour, &selection(&[2, 4]), Modifiers::NONE);
        assert_eq!(kind_at(&behavior, 3), Some(ActionKind::DontMove));
        let updates = behavior.apply_delta(Vec2::new(10.0, 10.0));

        assert_eq!(update(&updates, 3), Some((100, 100)));
        // Both handles stay on the smooth point's tangent
        assert_eq!(update(&updates, 2), Some((60, 100)));
        assert_eq!(update(&updates, 4), Some((160, 100)));
        assert_eq!(updates.len(), 3);
    }

    #[test]
    fn handle_of_fixed_tangent_point_slides_on_tangent() {
        let contour = tangent_contour();
        let mut behavior = EditBehavior::new(&contour, &selection(&[2]), Modifiers::NONE);
        assert_eq!(kind_at(&behavior, 2), Some(ActionKind::ConstrainPrevAngle));

        for delta in [Vec2::new(17.0, -29.0), Vec2::new(-80.0, 40.0)] {
            let updates = behavior.apply_delta(delta);
            assert_eq!(update(&updates, 1), None);
            let handle = behavior.edited_position(2).unwrap();
            assert_abs_diff_eq!(handle.y, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(handle.x, 150.0 + delta.x, epsilon = 1e-9);
        }

        // Same layout written in the other direction
        let mut reversed = contour.clone();
        reversed.points.reverse();
        let mut behavior = EditBehavior::new(&reversed, &selection(&[2]), Modifiers::NONE);
        let updates = behavior.apply_delta(Vec2::new(17.0, -29.0));
        assert_eq!(update(&updates, 2), Some((167, 0)));
    }

    #[test]
    fn selected_tangent_point_and_handle_stay_on_line() {
        let contour = tangent_contour();
        let mut behavior = EditBehavior::new(&contour, &selection(&[1, 2]), Modifiers::NONE);
        assert_eq!(kind_at(&behavior, 1), Some(ActionKind::ConstrainMiddle));
        assert_eq!(kind_at(&behavior, 2), Some(ActionKind::ConstrainPrevAngle));
        let updates = behavior.apply_delta(Vec2::new(20.0, 30.0));
        assert_eq!(update(&updates, 1), Some((120, 0)));
        assert_eq!(update(&updates, 2), Some((170, 0)));
    }

    #[test]
    fn two_selected_smooth_points_slide_along_shared_tangent() {
        let contour = Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::smooth(100.0, 50.0),
                PathPoint::smooth(200.0, 100.0),
                PathPoint::corner(300.0, 150.0),
            ],
            false,
        );
        let mut behavior = EditBehavior::new(&contour, &selection(&[1, 2]), ALT);
        assert_eq!(kind_at(&behavior, 1), Some(ActionKind::ConstrainMiddleTwo));
        assert_eq!(kind_at(&behavior, 2), Some(ActionKind::ConstrainMiddleTwo));
        let updates = behavior.apply_delta(Vec2::new(10.0, 0.0));

        assert_eq!(update(&updates, 1), Some((108, 54)));
        assert_eq!(update(&updates, 2), Some((208, 104)));
        let line = Vec2::new(2.0, 1.0);
        for i in [1, 2] {
            let p = behavior.edited_position(i).unwrap();
            assert_abs_diff_eq!(p.to_vec2().cross(line), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn quadratic_handle_meets_tangent_at_moved_end() {
        let contour = Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::smooth(100.0, 0.0),
                PathPoint::quad_off_curve(200.0, 0.0),
                PathPoint::corner(200.0, 100.0),
            ],
            false,
        );
        let mut behavior = EditBehavior::new(&contour, &selection(&[3]), Modifiers::NONE);
        assert_eq!(kind_at(&behavior, 2), Some(ActionKind::TangentIntersect));
        let updates = behavior.apply_delta(Vec2::new(50.0, 0.0));

        assert_eq!(update(&updates, 3), Some((250, 100)));
        // On the tangent through 0 and 1, straight below the moved end
        assert_eq!(update(&updates, 2), Some((250, 0)));
        assert_eq!(update(&updates, 1), None);
    }

    #[test]
    fn handle_between_smooth_points_follows_live_tangents() {
        let contour = Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::smooth(100.0, 0.0),
                PathPoint::quad_off_curve(200.0, 0.0),
                PathPoint::smooth(200.0, 100.0),
                PathPoint::corner(200.0, 200.0),
            ],
            false,
        );
        let mut behavior = EditBehavior::new(&contour, &selection(&[0]), ALT);
        assert_eq!(kind_at(&behavior, 2), Some(ActionKind::TangentIntersectLive));
        let updates = behavior.apply_delta(Vec2::new(0.0, 50.0));

        assert_eq!(update(&updates, 0), Some((0, 50)));
        assert_eq!(update(&updates, 2), Some((200, -50)));
        // The smooth point between them stays collinear
        let handle = behavior.edited_position(2).unwrap();
        let corner = behavior.edited_position(0).unwrap();
        let smooth = contour.points[1].point;
        assert_abs_diff_eq!((smooth - corner).cross(handle - smooth), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn constrained_handle_between_corners_snaps_both_ways() {
        let contour = Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::quad_off_curve(50.0, 100.0),
                PathPoint::corner(100.0, 0.0),
            ],
            false,
        );
        let mut behavior = EditBehavior::new(&contour, &selection(&[1]), SHIFT);
        assert_eq!(kind_at(&behavior, 1), Some(ActionKind::ConstrainHandleIntersect));
        let updates = behavior.apply_delta(Vec2::new(10.0, 40.0));
        // 45° from the first corner, vertical from the second
        assert_eq!(updates, vec![PointUpdate { point_index: 1, x: 100, y: 100 }]);
    }

    #[test]
    fn constrained_handle_of_smooth_point_keeps_tangent() {
        let contour = Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::smooth(100.0, 0.0),
                PathPoint::quad_off_curve(200.0, 0.0),
                PathPoint::corner(200.0, 100.0),
            ],
            false,
        );
        let mut behavior = EditBehavior::new(&contour, &selection(&[2]), SHIFT);
        assert_eq!(kind_at(&behavior, 2), Some(ActionKind::ConstrainHandleIntersectPrev));
        let updates = behavior.apply_delta(Vec2::new(30.0, 70.0));
        // On the tangent, 45° from the corner
        assert_eq!(update(&updates, 2), Some((300, 0)));
    }

    #[test]
    fn smooth_point_keeps_place_between_moving_anchors() {
        let contour = interpolated_quad_contour();
        let mut behavior = EditBehavior::new(&contour, &selection(&[0, 3]), Modifiers::NONE);
        assert_eq!(kind_at(&behavior, 2), Some(ActionKind::InterpolatePrevPrevNext));
        assert_eq!(kind_at(&behavior, 1), Some(ActionKind::RotateNext));

        let updates = behavior.apply_delta(Vec2::ZERO);
        assert_eq!(update(&updates, 1), Some((0, 100)));
        assert_eq!(update(&updates, 2), Some((100, 100)));

        let updates = behavior.apply_delta(Vec2::new(10.0, 20.0));
        assert_eq!(update(&updates, 0), Some((10, 20)));
        assert_eq!(update(&updates, 3), Some((210, 120)));
        assert_eq!(update(&updates, 2), Some((110, 120)));
        assert_eq!(update(&updates, 1), Some((10, 120)));
    }

    #[test]
    fn constrained_open_end_snaps_around_previous_on_curve() {
        let quad = Contour::new(
            vec![
                PathPoint::corner(0.0, 0.0),
                PathPoint::quad_off_curve(50.0, 100.0),
                PathPoint::corner(100.0, 0.0),
            ],
            false,
        );
        let mut behavior = EditBehavior::new(&quad, &selection(&[2]), SHIFT);
        assert_eq!(kind_at(&behavior, 2), Some(ActionKind::ConstrainAroundPrevPrev));
        let updates = behavior.apply_delta(Vec2::new(30.0, 80.0));
        assert_eq!(update(&updates, 2), Some((105, 105)));

        let mut behavior = EditBehavior::new(&cubic_segment(), &selection(&[3]), SHIFT);
        assert_eq!(kind_at(&behavior, 3), Some(ActionKind::ConstrainAroundPrevPrevPrev));
        let updates = behavior.apply_delta(Vec2::new(-10.0, 6.0));
        assert_eq!(update(&updates, 3), Some((98, 98)));
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let contour = cubic_segment();
        let mut behavior = EditBehavior::new(&contour, &selection(&[3, 42]), Modifiers::NONE);
        let updates = behavior.apply_delta(Vec2::new(1.0, 1.0));
        assert_eq!(update(&updates, 3), Some((101, 101)));
        assert!(updates.iter().all(|u| u.point_index < contour.len()));
    }
}
