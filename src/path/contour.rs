// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! A single contour: an ordered point list plus a closed flag.
//!
//! Neighbor lookup wraps around on closed contours and runs off the ends
//! (returning `None`) on open ones. All edit behaviors go through
//! `neighbor_index` so this is the only place that knows about wrapping.

use super::point::PathPoint;
use super::segment::{SegmentInfo, SegmentIter};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<PathPoint>,
    pub closed: bool,
}

impl Contour {
    pub fn new(points: Vec<PathPoint>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PathPoint> {
        self.points.get(index)
    }

    /// Index of the point `offset` steps away from `index`
    ///
    /// Wraps modulo the length on closed contours; on open contours an
    /// index past either end yields `None`.
    pub fn neighbor_index(&self, index: usize, offset: isize) -> Option<usize> {
        let len = self.points.len() as isize;
        if len == 0 {
            return None;
        }
        let target = index as isize + offset;
        if self.closed {
            Some(target.rem_euclid(len) as usize)
        } else if (0..len).contains(&target) {
            Some(target as usize)
        } else {
            None
        }
    }

    /// Previous index (with wrapping for closed contours)
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        self.neighbor_index(index, -1)
    }

    /// Next index (with wrapping for closed contours)
    pub fn next_index(&self, index: usize) -> Option<usize> {
        self.neighbor_index(index, 1)
    }

    /// Iterate over the segments between consecutive on-curve points
    pub fn segments(&self) -> SegmentIter<'_> {
        SegmentIter::new(self)
    }

    /// The segment that contains `index`, either as a control point or as
    /// its start point
    pub fn segment_containing(&self, index: usize) -> Option<SegmentInfo> {
        self.segments()
            .find(|seg| seg.start_index == index || seg.control_indices.contains(&index))
    }
}
