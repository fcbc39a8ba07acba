// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Segments derived on demand from a contour's on/off-curve sequence

use super::contour::Contour;
use kurbo::Point;

/// One segment of a contour, bounded by two on-curve points
///
/// Segments are never stored; they are rebuilt from the point list
/// whenever a Tunni or rib computation needs one.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInfo {
    pub start_point: Point,
    pub end_point: Point,
    /// Off-curve points between start and end, in contour order
    pub control_points: Vec<Point>,
    pub start_index: usize,
    pub end_index: usize,
    pub control_indices: Vec<usize>,
}

impl SegmentInfo {
    pub fn is_line(&self) -> bool {
        self.control_points.is_empty()
    }

    pub fn is_quadratic(&self) -> bool {
        self.control_points.len() == 1
    }

    pub fn is_cubic(&self) -> bool {
        self.control_points.len() == 2
    }
}

/// Iterator over the segments of a contour
pub struct SegmentIter<'a> {
    contour: &'a Contour,
    on_curve: Vec<usize>,
    position: usize,
}

impl<'a> SegmentIter<'a> {
    pub(super) fn new(contour: &'a Contour) -> Self {
        let on_curve = contour
            .points
            .iter()
            .enumerate()
            .filter(|(_, pt)| pt.is_on_curve())
            .map(|(i, _)| i)
            .collect();
        Self {
            contour,
            on_curve,
            position: 0,
        }
    }

    fn segment_count(&self) -> usize {
        let n = self.on_curve.len();
        if self.contour.closed { n } else { n.saturating_sub(1) }
    }
}

impl Iterator for SegmentIter<'_> {
    type Item = SegmentInfo;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.segment_count() {
            return None;
        }
        let start_index = self.on_curve[self.position];
        let end_index = self.on_curve[(self.position + 1) % self.on_curve.len()];
        self.position += 1;

        let len = self.contour.len();
        let mut control_indices = Vec::new();
        let mut i = (start_index + 1) % len;
        while i != end_index {
            control_indices.push(i);
            i = (i + 1) % len;
        }

        let points = &self.contour.points;
        Some(SegmentInfo {
            start_point: points[start_index].point,
            end_point: points[end_index].point,
            control_points: control_indices.iter().map(|&i| points[i].point).collect(),
            start_index,
            end_index,
            control_indices,
        })
    }
}
