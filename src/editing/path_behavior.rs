// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit behavior over a whole multi-contour path.
//!
//! Selection and output use global point indices. One `EditBehavior` is
//! built for each contour that holds at least one selected point.

use super::behavior::EditBehavior;
use super::edit_types::{Modifiers, PointPosition, PointUpdate};
use super::selection::Selection;
use crate::path::Path;
use kurbo::{Point, Vec2};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct ContourBehavior {
    contour_index: usize,
    /// Global index of the contour's first point
    start: usize,
    behavior: EditBehavior,
}

/// Fan-out of per-contour edit behaviors for one gesture
#[derive(Debug, Clone)]
pub struct PathEditBehavior {
    behaviors: Vec<ContourBehavior>,
}

impl PathEditBehavior {
    pub fn new(path: &Path, selection: &Selection<usize>, modifiers: Modifiers) -> Self {
        let mut by_contour: BTreeMap<usize, Selection<usize>> = BTreeMap::new();
        for &global in selection.iter() {
            match path.locate(global) {
                Some((contour_index, local)) => {
                    by_contour.entry(contour_index).or_default().insert(local);
                }
                None => tracing::warn!(
                    "Skipping selected point {} outside path of {} points",
                    global,
                    path.point_count()
                ),
            }
        }

        let behaviors: Vec<ContourBehavior> = by_contour
            .into_iter()
            .filter_map(|(contour_index, local_selection)| {
                let contour = path.contours.get(contour_index)?;
                let start = path.contour_start(contour_index)?;
                Some(ContourBehavior {
                    contour_index,
                    start,
                    behavior: EditBehavior::new(contour, &local_selection, modifiers),
                })
            })
            .collect();
        tracing::debug!("Editing {} contours", behaviors.len());
        Self { behaviors }
    }

    /// Indices of the contours touched by the gesture
    pub fn contour_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.behaviors.iter().map(|b| b.contour_index)
    }

    pub fn behavior(&self, contour_index: usize) -> Option<&EditBehavior> {
        self.behaviors
            .iter()
            .find(|b| b.contour_index == contour_index)
            .map(|b| &b.behavior)
    }

    /// Returns `true` if any contour switched rule sets
    pub fn set_modifiers(&mut self, modifiers: Modifiers) -> bool {
        self.behaviors
            .iter_mut()
            .fold(false, |changed, b| b.behavior.set_modifiers(modifiers) || changed)
    }

    pub fn apply_delta(&mut self, delta: Vec2) -> Vec<PointUpdate> {
        let mut updates = Vec::new();
        for b in &mut self.behaviors {
            updates.extend(b.behavior.apply_delta(delta).into_iter().map(|u| PointUpdate {
                point_index: b.start + u.point_index,
                ..u
            }));
        }
        updates
    }

    pub fn rollback(&self) -> Vec<PointPosition> {
        self.behaviors
            .iter()
            .flat_map(|b| {
                b.behavior.rollback().into_iter().map(move |p| PointPosition {
                    point_index: b.start + p.point_index,
                    ..p
                })
            })
            .collect()
    }
}

/// Write rounded updates into a path
///
/// Indices outside the path are skipped.
pub fn apply_point_updates(path: &mut Path, updates: &[PointUpdate]) {
    for update in updates {
        set_position(path, update.point_index, update.to_point());
    }
}

/// Restore rollback positions into a path
pub fn apply_rollback(path: &mut Path, positions: &[PointPosition]) {
    for position in positions {
        set_position(path, position.point_index, position.to_point());
    }
}

fn set_position(path: &mut Path, global: usize, point: Point) {
    let Some((contour_index, local)) = path.locate(global) else {
        tracing::warn!("Skipping update for unknown point {}", global);
        return;
    };
    if let Some(p) = path.contours[contour_index].points.get_mut(local) {
        p.point = point;
    }
}
