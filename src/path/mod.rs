// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Contour data model for editing.
//!
//! A `Path` is a list of `Contour`s addressed by a single running point
//! index, the way a glyph's packed point list is addressed. Each contour is
//! an ordered list of `PathPoint`s with on-curve / off-curve roles.
//! Segments are derived on demand and never stored.

pub mod contour;
pub mod point;
pub mod segment;

pub use contour::Contour;
pub use point::{HandleKind, PathPoint, PointType};
pub use segment::{SegmentInfo, SegmentIter};

/// All contours of one glyph layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub contours: Vec<Contour>,
}

impl Path {
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    /// Total number of points across all contours
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Global index of the first point of `contour_index`
    pub fn contour_start(&self, contour_index: usize) -> Option<usize> {
        if contour_index >= self.contours.len() {
            return None;
        }
        Some(self.contours[..contour_index].iter().map(Contour::len).sum())
    }

    /// Split a global point index into `(contour_index, local_index)`
    pub fn locate(&self, global_index: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (contour_index, contour) in self.contours.iter().enumerate() {
            if global_index < start + contour.len() {
                return Some((contour_index, global_index - start));
            }
            start += contour.len();
        }
        None
    }
}
