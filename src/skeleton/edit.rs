// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Centerline editing for skeleton contours.
//!
//! Runs the same rule-driven behavior as path editing, one behavior per
//! touched skeleton contour, and tags the output with contour indices.

use super::{Skeleton, SkeletonPointRef};
use crate::editing::{EditBehavior, Modifiers, Selection};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A rounded centerline position emitted after a pointer move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonPointUpdate {
    pub contour_index: usize,
    pub point_index: usize,
    pub x: i64,
    pub y: i64,
}

/// An exact centerline position, for rollback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkeletonPointPosition {
    pub contour_index: usize,
    pub point_index: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct SkeletonEditBehavior {
    behaviors: Vec<(usize, EditBehavior)>,
}

impl SkeletonEditBehavior {
    pub fn new(
        skeleton: &Skeleton,
        selection: &Selection<SkeletonPointRef>,
        modifiers: Modifiers,
    ) -> Self {
        let mut by_contour: BTreeMap<usize, Selection<usize>> = BTreeMap::new();
        for at in selection.iter() {
            if at.contour_index >= skeleton.contours.len() {
                tracing::warn!("Skipping selection in unknown skeleton contour {}", at.contour_index);
                continue;
            }
            by_contour
                .entry(at.contour_index)
                .or_default()
                .insert(at.point_index);
        }

        let behaviors: Vec<(usize, EditBehavior)> = by_contour
            .into_iter()
            .map(|(contour_index, points)| {
                let contour = skeleton.contours[contour_index].to_contour();
                (contour_index, EditBehavior::new(&contour, &points, modifiers))
            })
            .collect();
        tracing::debug!("Editing {} skeleton contours", behaviors.len());
        Self { behaviors }
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) -> bool {
        self.behaviors
            .iter_mut()
            .fold(false, |changed, (_, b)| b.set_modifiers(modifiers) || changed)
    }

    pub fn apply_delta(&mut self, delta: Vec2) -> Vec<SkeletonPointUpdate> {
        let mut updates = Vec::new();
        for (contour_index, behavior) in &mut self.behaviors {
            let contour_index = *contour_index;
            updates.extend(behavior.apply_delta(delta).into_iter().map(|u| {
                SkeletonPointUpdate {
                    contour_index,
                    point_index: u.point_index,
                    x: u.x,
                    y: u.y,
                }
            }));
        }
        updates
    }

    pub fn rollback(&self) -> Vec<SkeletonPointPosition> {
        self.behaviors
            .iter()
            .flat_map(|(contour_index, behavior)| {
                behavior
                    .rollback()
                    .into_iter()
                    .map(move |p| SkeletonPointPosition {
                        contour_index: *contour_index,
                        point_index: p.point_index,
                        x: p.x,
                        y: p.y,
                    })
            })
            .collect()
    }
}
